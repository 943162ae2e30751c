use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::{Id, timestamp};

pub const DEFAULT_PRIORITY: &str = "medium";

fn default_priority() -> String {
    DEFAULT_PRIORITY.to_string()
}

/// The column is nullable server-side; `null` reads as the default.
fn priority_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(|v| v.unwrap_or_else(default_priority))
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Ticket {
    pub id: Id,
    pub board_id: Id,
    pub column_id: Id,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_priority", deserialize_with = "priority_or_default")]
    pub priority: String,
    #[serde(default, with = "timestamp::option")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, with = "timestamp::option")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub position: i64,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TicketCreate {
    pub board_id: Id,
    pub column_id: Id,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(with = "timestamp::option")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(with = "timestamp::option")]
    pub due_date: Option<DateTime<Utc>>,
}

impl TicketCreate {
    pub fn new(board_id: Id, column_id: Id, title: impl Into<String>) -> Self {
        Self {
            board_id,
            column_id,
            title: title.into(),
            description: None,
            priority: None,
            start_date: None,
            due_date: None,
        }
    }
}

/// Partial ticket update.
///
/// Only fields that are `Some` are sent. Description, priority and the dates
/// are doubly optional: `Some(None)` is serialized as `null` and clears the
/// value on the server.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TicketUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_id: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_date_patch"
    )]
    pub start_date: Option<Option<DateTime<Utc>>>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_date_patch"
    )]
    pub due_date: Option<Option<DateTime<Utc>>>,
}

impl TicketUpdate {
    pub fn move_to(column_id: Id) -> Self {
        Self {
            column_id: Some(column_id),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.column_id.is_none()
            && self.position.is_none()
            && self.start_date.is_none()
            && self.due_date.is_none()
    }
}

fn serialize_date_patch<S>(
    value: &Option<Option<DateTime<Utc>>>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    timestamp::option::serialize(&value.flatten(), serializer)
}
