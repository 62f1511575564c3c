//! Request errors.
//!
//! Every failure the dashboard can hit while talking to the backend collapses
//! into [`ApiError`]. Views only distinguish two kinds: [`ApiError::Validation`]
//! is rendered inline next to form fields, everything else becomes a toast
//! built from [`ApiError::user_message`].

use std::collections::BTreeMap;

use serde::Deserialize;
use thiserror::Error;

/// Field name to first error message.
pub type FieldErrors = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Transport(String),

    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("{message}")]
    Validation { message: String, fields: FieldErrors },

    #[error("Your session has expired. Please log in again.")]
    Unauthorized,

    #[error("Unexpected response: {0}")]
    Decode(String),
}

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    errors: BTreeMap<String, Vec<String>>,
}

impl ApiError {
    /// Build an error from a non-2xx response.
    ///
    /// The message comes from the body's `message` (or `error`) field when
    /// present, otherwise a generic fallback naming the status.
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let parsed: Option<ErrorBody> = serde_json::from_slice(body).ok();
        let message = parsed
            .as_ref()
            .and_then(|b| b.message.clone().or_else(|| b.error.clone()))
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("Request failed (HTTP {status})"));

        if status == 401 {
            return ApiError::Unauthorized;
        }

        if status == 422 {
            let fields = parsed
                .map(|b| {
                    b.errors
                        .into_iter()
                        .filter_map(|(field, msgs)| msgs.into_iter().next().map(|m| (field, m)))
                        .collect()
                })
                .unwrap_or_default();
            return ApiError::Validation { message, fields };
        }

        ApiError::Status { status, message }
    }

    /// Client-side validation failure.
    pub fn invalid(fields: FieldErrors) -> Self {
        ApiError::Validation {
            message: "Please fix the highlighted fields.".to_string(),
            fields,
        }
    }

    /// Text for a toast notification.
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    /// Per-field messages, empty unless this is a validation error.
    pub fn field_errors(&self) -> FieldErrors {
        match self {
            ApiError::Validation { fields, .. } => fields.clone(),
            _ => FieldErrors::new(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}
