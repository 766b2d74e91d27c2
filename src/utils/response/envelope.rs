use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::utils::{pagination::PaginationMeta, validation::FieldErrors};

/// The body of every API response.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Envelope<T = Value> {
    pub post: Map<String, Value>,
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<PaginationMeta>,
    pub error: ErrorBag,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ErrorBag {
    pub global: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<FieldErrors>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_error: Option<String>,
}

impl ErrorBag {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn global(message: impl Into<String>) -> Self {
        Self {
            global: message.into(),
            ..Self::default()
        }
    }

    pub fn validation(message: impl Into<String>, errors: FieldErrors) -> Self {
        Self {
            global: message.into(),
            validation: Some(errors),
            server_error: None,
        }
    }

    pub fn server(message: impl Into<String>, server_error: impl Into<String>) -> Self {
        Self {
            global: message.into(),
            validation: None,
            server_error: Some(server_error.into()),
        }
    }
}
