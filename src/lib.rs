pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod navigation;
pub mod session;
pub mod storage;
pub mod stores;

mod utils;

pub use app::KanbanApp;
pub use error::{KanbanError, Outcome};
pub use kanban_schema as schema;
