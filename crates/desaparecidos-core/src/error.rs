use thiserror::Error;

/// Failure of a call against the case API.
///
/// Only transport and server failures live here. A response that arrives
/// but does not describe the requested record is not an error; the page
/// controllers turn it into a not-found view.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },

    #[error("invalid response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// Best human-readable detail for logs.
    ///
    /// The API reports failures as `{"message": "..."}`; fall back to the raw
    /// body or the transport message when that shape is absent.
    pub fn detail(&self) -> String {
        match self {
            Self::Server { body, .. } => serde_json::from_str::<serde_json::Value>(body)
                .ok()
                .and_then(|v| v.get("message")?.as_str().map(str::to_string))
                .unwrap_or_else(|| body.clone()),
            Self::Transport(msg) | Self::Decode(msg) => msg.clone(),
        }
    }
}

/// A form field rejected by validation, shown next to the field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}
