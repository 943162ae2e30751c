//! Endpoint paths, relative to `<api_url>/api`.

use kanban_schema::Id;

pub const AUTH_LOGIN: &str = "/auth/login";
pub const AUTH_ME: &str = "/auth/me";
pub const BOARDS: &str = "/boards/";
pub const COLUMNS: &str = "/columns/";
pub const TICKETS: &str = "/tickets/";
pub const USERS: &str = "/users/";

pub fn board(id: Id) -> String {
    format!("/boards/{id}")
}

pub fn columns_of_board(board_id: Id) -> String {
    format!("/columns/?board_id={board_id}")
}

pub fn column(id: Id) -> String {
    format!("/columns/{id}")
}

pub fn tickets_of_board(board_id: Id) -> String {
    format!("/tickets/?board_id={board_id}")
}

pub fn ticket(id: Id) -> String {
    format!("/tickets/{id}")
}

pub fn user(id: Id) -> String {
    format!("/users/{id}")
}

pub fn reset_password(user_id: Id) -> String {
    format!("/users/{user_id}/reset_password")
}
