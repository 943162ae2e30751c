use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error payload returned by the API on non-2xx responses.
///
/// `detail` is usually a string, but validation failures carry a list of
/// objects instead.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub detail: Option<Value>,
}

impl ErrorDetail {
    /// Human readable message, or `None` when the payload carried no detail.
    /// Falsy details (`null`, `false`, `0`, `""`) count as absent.
    pub fn message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            Value::Null | Value::Bool(false) => None,
            Value::Number(n) if n.as_f64() == Some(0.0) => None,
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}
