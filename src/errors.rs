use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use std::fmt;

/// Failure reported by NetSuite, or the transport on the way there.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteError {
    /// HTTP status returned by NetSuite; `None` when the request never got a response.
    pub status: Option<u16>,
    /// NetSuite's error payload (JSON when parseable, text otherwise) or the
    /// transport error message.
    pub detail: Value,
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "NetSuite returned {}: {}", status, self.detail),
            None => write!(f, "NetSuite request failed: {}", self.detail),
        }
    }
}

/// Application-specific error types.
#[derive(Debug, Clone)]
pub enum AppError {
    /// Inbound body missing, unparsable, not an object, or carrying a field of the wrong type.
    InvalidPayload {
        /// Field path and reason for typed field errors.
        details: Option<String>,
    },
    /// Malformed input handed to the request signer.
    InvalidInput(String),
    /// NetSuite rejected the record or could not be reached. Only surfaced to
    /// callers when remote failure propagation is enabled.
    RemoteFailure(RemoteError),
    /// Internal server error.
    InternalError(String),
    /// Error with context chain for better debugging.
    WithContext {
        /// The underlying source of the error.
        source: Box<AppError>,
        /// Additional context message.
        context: String,
    },
}

impl AppError {
    /// The generic 400 for bodies that are not a JSON object.
    pub fn invalid_payload() -> Self {
        AppError::InvalidPayload { details: None }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InvalidPayload { details: None } => write!(f, "Invalid JSON payload"),
            AppError::InvalidPayload {
                details: Some(details),
            } => write!(f, "Invalid JSON payload: {}", details),
            AppError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            AppError::RemoteFailure(err) => write!(f, "Remote error: {}", err),
            AppError::InternalError(msg) => write!(f, "Internal error: {}", msg),
            AppError::WithContext { source, context } => {
                write!(f, "{}: {}", context, source)
            }
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    /// Maps each error variant to an HTTP status code and JSON body.
    ///
    /// Everything that is not the caller's fault collapses into the same
    /// opaque 500 body; the detail only goes to the log.
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::InvalidPayload { details } => {
                tracing::warn!("Rejected inbound payload: {}", self);
                let mut body = json!({ "error": "Invalid JSON payload" });
                if let Some(details) = details {
                    body["details"] = json!(details);
                }
                (StatusCode::BAD_REQUEST, body)
            }
            AppError::RemoteFailure(err) => {
                tracing::error!("NetSuite error surfaced to caller: {}", err);
                (
                    StatusCode::BAD_GATEWAY,
                    json!({
                        "status": "error",
                        "message": "Failed to create record",
                        "error": err.detail,
                    }),
                )
            }
            AppError::InvalidInput(msg) | AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal Server Error" }),
                )
            }
            AppError::WithContext { source, context } => {
                tracing::error!("Error with context: {} -> {}", context, source);
                return source.as_ref().clone().into_response();
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Extension trait for adding context to errors.
/// Similar to `anyhow::Context` but for our `AppError` type.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T, AppError>;

    /// Add context lazily (only evaluated on error).
    fn with_context<F>(self, f: F) -> Result<T, AppError>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T, AppError> {
    fn context(self, context: impl Into<String>) -> Result<T, AppError> {
        self.map_err(|e| AppError::WithContext {
            source: Box::new(e),
            context: context.into(),
        })
    }

    fn with_context<F>(self, f: F) -> Result<T, AppError>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::WithContext {
            source: Box::new(e),
            context: f(),
        })
    }
}

/// Extension for serde_json errors raised while building outbound bodies.
impl<T> ResultExt<T> for Result<T, serde_json::Error> {
    fn context(self, context: impl Into<String>) -> Result<T, AppError> {
        self.map_err(|e| AppError::WithContext {
            source: Box::new(AppError::InternalError(e.to_string())),
            context: context.into(),
        })
    }

    fn with_context<F>(self, f: F) -> Result<T, AppError>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::WithContext {
            source: Box::new(AppError::InternalError(e.to_string())),
            context: f(),
        })
    }
}
