//! SQL DDL for the persisted session storage.

/// SQLite schema includes:
/// - `local_storage` table (string key/value pairs, one row per key)
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS local_storage (
    key TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL -- RFC3339
);
"#;
