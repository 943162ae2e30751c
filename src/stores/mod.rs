//! Local mirrors of server resources.
//!
//! Every store follows the same shape: send a request through
//! [`ApiClient`](crate::api::ApiClient), then splice the response into a flat
//! cached list. Lookups by foreign key read the cache only.

pub mod auth;
pub mod board;
pub mod column;
pub mod ticket;
pub mod user;

pub use auth::AuthStore;
pub use board::BoardStore;
pub use column::ColumnStore;
pub use ticket::TicketStore;
pub use user::UserStore;
