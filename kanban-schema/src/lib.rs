pub mod auth;
pub mod board;
pub mod column;
pub mod error;
pub mod ticket;
pub mod timestamp;
pub mod user;

pub use auth::{LoginRequest, PasswordReset, TokenResponse};
pub use board::{Board, BoardDetail, BoardWrite};
pub use column::{Column, ColumnCreate, ColumnUpdate, DEFAULT_COLUMN_COLOR};
pub use error::ErrorDetail;
pub use ticket::{DEFAULT_PRIORITY, Ticket, TicketCreate, TicketUpdate};
pub use user::{Role, User, UserCreate, UserUpdate};

/// Server-assigned primary key. The API stores ids as BIGINT.
pub type Id = i64;
