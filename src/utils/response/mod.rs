//! JSON envelope responses.
//!
//! Every handler answers through a [`Responder`], which echoes the request
//! input back under `post` and wraps the payload and error details in an
//! [`Envelope`]:
//!
//! ```json
//! { "post": {}, "data": {"id": 1}, "error": { "global": "" } }
//! ```

mod envelope;
mod failure;

pub use envelope::{Envelope, ErrorBag};
pub use failure::Failure;

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::{request::Parts, HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::utils::{
    pagination::{Pager, PaginationMeta},
    transformer::Transformer,
    validation::FieldErrors,
};

pub const DEFAULT_NOT_FOUND_MESSAGE: &str = "Not found";
pub const DEFAULT_SERVER_ERROR_MESSAGE: &str = "Internal server error";
pub const DEFAULT_VALIDATION_MESSAGE: &str = "There were validation errors on your request";

/// Status and headers applied when a response is emitted.
#[derive(Clone, Debug, Default)]
pub struct ResponseOptions {
    pub status: StatusCode,
    pub headers: HeaderMap,
}

impl ResponseOptions {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
        }
    }
}

/// Builds envelope responses for a single request.
///
/// A responder is created per request (usually by extraction) and consumed by
/// the `respond*` call that produces the response.
#[derive(Clone, Debug)]
pub struct Responder {
    input: Map<String, Value>,
    path: String,
    options: ResponseOptions,
}

impl Default for Responder {
    fn default() -> Self {
        Self::new(Map::new())
    }
}

impl Responder {
    pub fn new(input: Map<String, Value>) -> Self {
        Self {
            input,
            path: "/".to_string(),
            options: ResponseOptions::default(),
        }
    }

    pub fn at_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Merges a request body into the echoed input. Body fields win over query
    /// parameters with the same name. Payloads that don't serialize to an
    /// object are left out.
    pub fn merge_input<P: Serialize>(mut self, payload: &P) -> Self {
        match serde_json::to_value(payload) {
            Ok(Value::Object(fields)) => self.input.extend(fields),
            Ok(other) => {
                tracing::warn!("Ignoring non-object request input: {}", other);
            }
            Err(err) => {
                tracing::warn!("Failed to serialize request input: {}", err);
            }
        }

        self
    }

    pub fn input(&self) -> &Map<String, Value> {
        &self.input
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn with_options(mut self, options: ResponseOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.options.headers.extend(headers);
        self
    }

    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.options.headers.insert(name, value);
        self
    }

    pub fn set_status_code(mut self, status: StatusCode) -> Self {
        self.options.status = status;
        self
    }

    pub fn get_status_code(&self) -> StatusCode {
        self.options.status
    }

    /// Serializes `data` as the JSON body with the current status and headers.
    pub fn respond<T: Serialize>(self, data: T) -> Response {
        let ResponseOptions { status, headers } = self.options;

        tracing::debug!("Responding to {} with {}", self.path, status);

        (status, headers, Json(data)).into_response()
    }

    fn respond_with_envelope<T: Serialize>(
        mut self,
        data: T,
        meta: Option<PaginationMeta>,
        error: ErrorBag,
    ) -> Response {
        let envelope = Envelope {
            post: std::mem::take(&mut self.input),
            data,
            meta,
            error,
        };

        self.respond(envelope)
    }

    pub fn respond_with_data<T: Serialize>(self, data: T) -> Response {
        self.respond_with_envelope(data, None, ErrorBag::none())
    }

    pub fn respond_with_paginator<P, F>(self, page: P, transformer: F) -> Response
    where
        P: Pager,
        F: Transformer<P::Item>,
    {
        let (total, per_page, current_page) = (page.total(), page.per_page(), page.current_page());
        let items = transformer.transform_all(page.into_items());
        let meta = PaginationMeta::new(total, items.len(), per_page, current_page, &self.path);

        self.respond_with_envelope(items, Some(meta), ErrorBag::none())
    }

    /// Emits data that has already been through a transformer. It lands under
    /// `data` like every other success response.
    pub fn respond_with_transformed_data<T: Serialize>(self, data: T) -> Response {
        self.respond_with_data(data)
    }

    pub fn respond_with_item<T, F>(self, item: T, transformer: F) -> Response
    where
        F: Transformer<T>,
    {
        self.respond_with_transformed_data(transformer.transform(item))
    }

    pub fn respond_with_collection<T, F>(self, items: Vec<T>, transformer: F) -> Response
    where
        F: Transformer<T>,
    {
        self.respond_with_transformed_data(transformer.transform_all(items))
    }

    pub fn respond_not_found(self) -> Response {
        self.respond_not_found_with(DEFAULT_NOT_FOUND_MESSAGE)
    }

    pub fn respond_not_found_with(self, message: impl Into<String>) -> Response {
        self.set_status_code(StatusCode::NOT_FOUND)
            .respond_with_error(message)
    }

    /// Error envelope with the current status code, which callers set first.
    pub fn respond_with_error(self, message: impl Into<String>) -> Response {
        self.respond_with_envelope("", None, ErrorBag::global(message))
    }

    pub fn respond_with_server_error(self, server_error: impl Into<String>) -> Response {
        self.respond_with_server_error_and_message(server_error, DEFAULT_SERVER_ERROR_MESSAGE)
    }

    /// `server_error` is sent to the client verbatim.
    pub fn respond_with_server_error_and_message(
        self,
        server_error: impl Into<String>,
        global_message: impl Into<String>,
    ) -> Response {
        let server_error = server_error.into();

        tracing::error!("Server error while handling {}: {}", self.path, server_error);

        self.set_status_code(StatusCode::INTERNAL_SERVER_ERROR)
            .respond_with_envelope(
                Vec::<Value>::new(),
                None,
                ErrorBag::server(global_message, server_error),
            )
    }

    pub fn respond_with_validation_errors(self, errors: impl Into<FieldErrors>) -> Response {
        self.respond_with_validation_errors_and_message(errors, DEFAULT_VALIDATION_MESSAGE)
    }

    pub fn respond_with_validation_errors_and_message(
        self,
        errors: impl Into<FieldErrors>,
        message: impl Into<String>,
    ) -> Response {
        self.set_status_code(StatusCode::UNPROCESSABLE_ENTITY)
            .respond_with_envelope(
                Vec::<Value>::new(),
                None,
                ErrorBag::validation(message, errors.into()),
            )
    }

    pub fn fail(self, failure: Failure) -> Response {
        let status = failure.status();

        match failure {
            Failure::NotFound(message) => self.respond_not_found_with(message),
            Failure::Validation(errors) => self.respond_with_validation_errors(errors),
            Failure::Server(server_error) => self.respond_with_server_error(server_error),
            Failure::Status(_, message) => self.set_status_code(status).respond_with_error(message),
        }
    }
}

// `key[]` pairs collect into an array under `key`; other repeated keys keep the
// last value.
fn query_input(pairs: Vec<(String, String)>) -> Map<String, Value> {
    let mut input = Map::new();

    for (key, value) in pairs {
        match key.strip_suffix("[]") {
            Some(name) => match input
                .entry(name.to_string())
                .or_insert_with(|| Value::Array(Vec::new()))
            {
                Value::Array(values) => values.push(Value::String(value)),
                other => *other = Value::Array(vec![Value::String(value)]),
            },
            None => {
                input.insert(key, Value::String(value));
            }
        }
    }

    input
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for Responder {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let path = parts.uri.path().to_string();

        match Query::<Vec<(String, String)>>::try_from_uri(&parts.uri) {
            Ok(Query(pairs)) => Ok(Responder::new(query_input(pairs)).at_path(path)),
            // Only reachable if the pair type above changes to something stricter.
            Err(err) => {
                tracing::debug!("Rejected query string on {}: {}", path, err);

                Err(Responder::default()
                    .at_path(path)
                    .set_status_code(StatusCode::BAD_REQUEST)
                    .respond_with_error("Invalid query string"))
            }
        }
    }
}
