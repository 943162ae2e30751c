use serde::Serialize;

use super::KanbanError;

/// `{success, message}` result for operations whose failures are reported
/// to the caller as data rather than as errors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome<T = ()> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> Outcome<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }

    /// Converts an error into a failed outcome. An error with an empty
    /// message falls back to `fallback`.
    pub fn from_error(err: &KanbanError, fallback: &str) -> Self {
        let message = err.to_string();
        if message.trim().is_empty() {
            Self::failed(fallback)
        } else {
            Self::failed(message)
        }
    }

    pub fn into_result(self) -> Result<Option<T>, String> {
        if self.success {
            Ok(self.data)
        } else {
            Err(self.message.unwrap_or_default())
        }
    }
}

impl Outcome<()> {
    pub fn done() -> Self {
        Self {
            success: true,
            data: None,
            message: None,
        }
    }
}
