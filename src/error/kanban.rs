use reqwest::StatusCode;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum KanbanError {
    /// Non-2xx response. `message` is the server's `detail`, or the status
    /// reason phrase when the body carried none.
    #[error("{message}")]
    Api { status: StatusCode, message: String },

    /// 401 response; the session has already been torn down.
    #[error("{0}")]
    Unauthorized(String),

    #[error("HTTP request error: {0}")]
    ReqwestError(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("URL parse error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Ractor error: {0}")]
    RactorError(String),

    /// A 204 (or empty) response where the endpoint should return a body.
    #[error("Empty response from {0}")]
    EmptyResponse(String),

    #[error("Cannot delete the last administrator")]
    LastAdmin,
}

impl KanbanError {
    /// HTTP status carried by the error, if it came from a response.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            KanbanError::Api { status, .. } => Some(*status),
            KanbanError::Unauthorized(_) => Some(StatusCode::UNAUTHORIZED),
            KanbanError::ReqwestError(e) => e.status(),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }
}
