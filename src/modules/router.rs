use super::health;
use crate::{types::Context, utils::response::Responder};
use axum::{response::Response, Router};
use std::sync::Arc;

pub async fn not_found(responder: Responder) -> Response {
    responder.respond_not_found()
}

pub fn get_router() -> Router<Arc<Context>> {
    Router::new().merge(health::get_router())
}
