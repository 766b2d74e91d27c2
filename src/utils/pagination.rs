use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::{request::Parts, StatusCode},
    response::Response,
    RequestPartsExt,
};
use serde::{Deserialize, Serialize};

use crate::utils::response::Responder;

/// One page of a larger result set.
pub trait Pager {
    type Item;

    fn total(&self) -> u64;
    fn per_page(&self) -> u32;
    fn current_page(&self) -> u32;
    fn into_items(self) -> Vec<Self::Item>;
}

#[derive(Serialize, Clone, Debug)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, total: u64, page: u32, per_page: u32) -> Paginated<T> {
        Self {
            items,
            total,
            page,
            per_page,
        }
    }

    /// Cuts the requested page out of an in-memory collection.
    pub fn from_vec(all: Vec<T>, pagination: &Pagination) -> Paginated<T> {
        let total = all.len() as u64;
        let items = all
            .into_iter()
            .skip(pagination.offset())
            .take(pagination.per_page as usize)
            .collect();

        Self::new(items, total, pagination.page, pagination.per_page)
    }
}

impl<T> Pager for Paginated<T> {
    type Item = T;

    fn total(&self) -> u64 {
        self.total
    }

    fn per_page(&self) -> u32 {
        self.per_page
    }

    fn current_page(&self) -> u32 {
        self.page
    }

    fn into_items(self) -> Vec<T> {
        self.items
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct PaginationLinks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PaginationMeta {
    pub total: u64,
    pub count: usize,
    pub per_page: u32,
    pub current_page: u32,
    pub total_pages: u32,
    pub links: PaginationLinks,
}

impl PaginationMeta {
    pub fn new(total: u64, count: usize, per_page: u32, current_page: u32, path: &str) -> Self {
        let total_pages = total_pages(total, per_page);

        let page_url = |page: u32| format!("{}?page={}&per_page={}", path, page, per_page);

        let links = PaginationLinks {
            previous: (current_page > 1).then(|| page_url(current_page - 1)),
            next: (current_page < total_pages).then(|| page_url(current_page + 1)),
        };

        Self {
            total,
            count,
            per_page,
            current_page,
            total_pages,
            links,
        }
    }
}

// Never below one, even for an empty result set.
fn total_pages(total: u64, per_page: u32) -> u32 {
    let per_page = u64::from(per_page.max(1));
    let pages = total.div_ceil(per_page).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

#[derive(Deserialize, Clone, Debug)]
pub struct Pagination {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

impl Pagination {
    pub fn offset(&self) -> usize {
        (self.page.saturating_sub(1) as usize) * self.per_page as usize
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: default_page(),
            per_page: default_per_page(),
        }
    }
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    10
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for Pagination {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extract::<Query<Pagination>>().await {
            Ok(Query(pagination)) if pagination.page > 0 && pagination.per_page > 0 => {
                Ok(pagination)
            }
            _ => Err(Responder::default()
                .at_path(parts.uri.path())
                .set_status_code(StatusCode::BAD_REQUEST)
                .respond_with_error("Invalid pagination options")),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use axum::{body::to_bytes, http::Request};

    async fn extract(uri: &str) -> Result<Pagination, Response> {
        let (mut parts, _) = Request::builder().uri(uri).body(()).unwrap().into_parts();
        Pagination::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn should_default_missing_pagination_options() {
        let pagination = extract("/meals").await.ok().unwrap();
        assert_eq!(pagination.page, 1);
        assert_eq!(pagination.per_page, 10);
    }

    #[tokio::test]
    async fn should_reject_invalid_pagination_options() {
        let rejection = extract("/meals?page=abc").await.err().unwrap();
        assert_eq!(rejection.status(), StatusCode::BAD_REQUEST);

        let rejection = extract("/meals?page=0").await.err().unwrap();
        assert_eq!(rejection.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(rejection.into_body(), usize::MAX).await.unwrap();
        assert_eq!(
            serde_json::from_slice::<serde_json::Value>(&body).unwrap(),
            serde_json::json!({
                "post": {},
                "data": "",
                "error": { "global": "Invalid pagination options" }
            })
        );
    }

    #[test]
    fn should_slice_requested_page() {
        let pagination = Pagination {
            page: 2,
            per_page: 3,
        };
        let page = Paginated::from_vec((1..=8).collect::<Vec<u32>>(), &pagination);

        assert_eq!(page.items, vec![4, 5, 6]);
        assert_eq!(page.total(), 8);
        assert_eq!(page.current_page(), 2);
        assert_eq!(page.per_page(), 3);
    }

    #[test]
    fn should_return_empty_page_past_the_end() {
        let pagination = Pagination {
            page: 5,
            per_page: 3,
        };
        let page = Paginated::from_vec(vec!["a", "b"], &pagination);

        assert!(page.items.is_empty());
        assert_eq!(page.total, 2);
    }

    #[test]
    fn should_link_neighbouring_pages() {
        let meta = PaginationMeta::new(25, 10, 10, 2, "/api/meals");

        assert_eq!(meta.total_pages, 3);
        assert_eq!(
            meta.links.previous.as_deref(),
            Some("/api/meals?page=1&per_page=10")
        );
        assert_eq!(
            meta.links.next.as_deref(),
            Some("/api/meals?page=3&per_page=10")
        );
    }

    #[test]
    fn should_omit_links_on_single_page() {
        let meta = PaginationMeta::new(0, 0, 10, 1, "/api/meals");

        assert_eq!(meta.total_pages, 1);
        assert_eq!(meta.links, PaginationLinks::default());
    }
}
