use std::collections::BTreeMap;

use serde_json::Value;
use thiserror::Error;

use crate::auth::StoreError;

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

/// Keys a backend uses for a single top-level error string.
const GENERIC_MESSAGE_KEYS: [&str; 2] = ["error", "detail"];

/// Decoded body of a rejected request.
///
/// Field-level validation errors come back as an object mapping each field
/// to one message or a list of messages. Everything else collapses into a
/// single generic message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorBody {
    FieldErrors(BTreeMap<String, Vec<String>>),
    Generic(String),
}

impl ErrorBody {
    /// Decode a raw response body. Never fails: unrecognized shapes become
    /// `Generic` with the (truncated) raw text.
    pub fn decode(body: &str) -> Self {
        let value = match serde_json::from_str::<Value>(body) {
            Ok(value) => value,
            Err(_) => return ErrorBody::Generic(truncate_body(body.trim())),
        };

        match value {
            Value::String(message) => ErrorBody::Generic(message),
            Value::Object(map) => {
                for key in GENERIC_MESSAGE_KEYS {
                    if let Some(Value::String(message)) = map.get(key) {
                        return ErrorBody::Generic(message.clone());
                    }
                }

                let mut fields = BTreeMap::new();
                for (field, messages) in map {
                    let messages = match messages {
                        Value::String(s) => vec![s],
                        Value::Array(items) => items
                            .into_iter()
                            .filter_map(|item| match item {
                                Value::String(s) => Some(s),
                                _ => None,
                            })
                            .collect(),
                        _ => continue,
                    };
                    if !messages.is_empty() {
                        fields.insert(field, messages);
                    }
                }

                if fields.is_empty() {
                    ErrorBody::Generic(String::new())
                } else {
                    ErrorBody::FieldErrors(fields)
                }
            }
            other => ErrorBody::Generic(truncate_body(&other.to_string())),
        }
    }

    /// The first message for `field`, if the body carries field errors.
    pub fn field(&self, field: &str) -> Option<&str> {
        match self {
            ErrorBody::FieldErrors(fields) => fields
                .get(field)
                .and_then(|messages| messages.first())
                .map(String::as_str),
            ErrorBody::Generic(_) => None,
        }
    }

    /// Pick the message to show a user: a non-empty generic message wins,
    /// otherwise the first message of the first field in `priority` that has one.
    pub fn first_message(&self, priority: &[&str]) -> Option<&str> {
        match self {
            ErrorBody::Generic(message) if !message.is_empty() => Some(message.as_str()),
            ErrorBody::Generic(_) => None,
            ErrorBody::FieldErrors(_) => priority.iter().find_map(|field| self.field(field)),
        }
    }
}

#[derive(Error, Debug)]
pub enum ApiError {
    /// Carries the decoded body when the backend sent one, since a rejected
    /// login is also answered with `401`.
    #[error("Unauthorized - session has ended")]
    Unauthorized(Option<ErrorBody>),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Request rejected ({status}): {body:?}")]
    Rejected { status: u16, body: ErrorBody },

    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Token storage error: {0}")]
    Storage(#[from] StoreError),
}

/// Truncate a response body to avoid logging excessive data
fn truncate_body(body: &str) -> String {
    if body.len() <= MAX_ERROR_BODY_LENGTH {
        body.to_string()
    } else {
        let mut end = MAX_ERROR_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
    }
}

impl ApiError {
    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        match status.as_u16() {
            401 => ApiError::Unauthorized(
                Some(body.trim())
                    .filter(|b| !b.is_empty())
                    .map(ErrorBody::decode),
            ),
            404 => ApiError::NotFound(truncate_body(body)),
            code @ 400..=499 => ApiError::Rejected {
                status: code,
                body: ErrorBody::decode(body),
            },
            code @ 500..=599 => ApiError::ServerError {
                status: code,
                message: truncate_body(body),
            },
            _ => ApiError::InvalidResponse(format!("Status {}: {}", status, truncate_body(body))),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }

    /// The decoded body of a 4xx rejection, including a `401` that had one.
    pub fn body(&self) -> Option<&ErrorBody> {
        match self {
            ApiError::Rejected { body, .. } => Some(body),
            ApiError::Unauthorized(body) => body.as_ref(),
            _ => None,
        }
    }
}
