use super::types::response;
use crate::{types::Context, utils::response::Responder};
use axum::{extract::State, response::Response};
use std::sync::Arc;

pub async fn handler(State(ctx): State<Arc<Context>>, responder: Responder) -> Response {
    responder.respond_with_data(response::Health {
        message: "We up!",
        environment: ctx.app.environment.as_str(),
    })
}
