use serde::{Deserialize, Deserializer, Serialize};

use crate::Id;

pub const DEFAULT_COLUMN_COLOR: &str = "slate";

fn default_color() -> String {
    DEFAULT_COLUMN_COLOR.to_string()
}

fn color_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(|v| v.unwrap_or_else(default_color))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Column {
    pub id: Id,
    pub board_id: Id,
    pub name: String,
    #[serde(default = "default_color", deserialize_with = "color_or_default")]
    pub color: String,
    #[serde(default)]
    pub position: i64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ColumnCreate {
    pub board_id: Id,
    pub name: String,
    #[serde(default = "default_color")]
    pub color: String,
}

impl ColumnCreate {
    pub fn new(board_id: Id, name: impl Into<String>) -> Self {
        Self {
            board_id,
            name: name.into(),
            color: default_color(),
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ColumnUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
}

impl ColumnUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.color.is_none() && self.position.is_none()
    }
}
