mod kanban;
mod outcome;

pub use kanban::KanbanError;
pub use outcome::Outcome;
