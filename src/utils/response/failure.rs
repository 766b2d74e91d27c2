use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::Responder;
use crate::utils::validation::FieldErrors;

/// Failures a handler can hand back to a [`Responder`].
#[derive(Debug, Clone, PartialEq)]
pub enum Failure {
    NotFound(String),
    Validation(FieldErrors),
    Server(String),
    Status(StatusCode, String),
}

impl Failure {
    pub fn not_found() -> Self {
        Self::NotFound(super::DEFAULT_NOT_FOUND_MESSAGE.to_string())
    }

    pub fn server(err: impl ToString) -> Self {
        Self::Server(err.to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Status(status, _) => *status,
        }
    }
}

impl From<FieldErrors> for Failure {
    fn from(errors: FieldErrors) -> Self {
        Self::Validation(errors)
    }
}

// Without a request at hand the envelope echoes an empty `post`.
impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        Responder::default().fail(self)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn should_map_failures_to_status() {
        assert_eq!(Failure::not_found().status(), StatusCode::NOT_FOUND);
        assert_eq!(
            Failure::from(FieldErrors::new().add("email", "required")).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            Failure::server("timeout").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            Failure::Status(StatusCode::FORBIDDEN, "Forbidden".into()).status(),
            StatusCode::FORBIDDEN
        );
    }
}
