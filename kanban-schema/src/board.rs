use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Column, Id, Ticket, timestamp};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Board {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub owner_id: Id,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
    /// Columns ordered by position, as embedded by the server.
    #[serde(default)]
    pub columns: Vec<Column>,
}

/// `GET /boards/{id}` payload: a board together with all of its tickets.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BoardDetail {
    #[serde(flatten)]
    pub board: Board,
    #[serde(default)]
    pub tickets: Vec<Ticket>,
}

/// Body for both `POST /boards/` and `PUT /boards/{id}`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BoardWrite {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
