//! Persistent key/value storage for session data.
//!
//! Layout:
//! - `schema.rs`: SQL DDL for initializing the database (SQLite)
//! - `actor.rs`: actor owning the connection pool, plus its handle

pub mod actor;
pub mod schema;

pub use actor::{StorageHandle, spawn};
pub use schema::SQLITE_INIT;

/// Key holding the raw session token.
pub const TOKEN_KEY: &str = "kanban_token";
/// Key holding the JSON-encoded current user.
pub const USER_KEY: &str = "kanban_user";
