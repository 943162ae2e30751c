//! Route table of the board client.

use kanban_schema::Id;

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/boards";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteName {
    Login,
    BoardList,
    BoardDetail,
    BoardStats,
    AdminDashboard,
    UserManagement,
    /// No entry in the table. Still nested under the authenticated layout.
    NotFound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RouteMeta {
    pub requires_auth: bool,
    pub requires_admin: bool,
}

const PUBLIC: RouteMeta = RouteMeta {
    requires_auth: false,
    requires_admin: false,
};
const MEMBER: RouteMeta = RouteMeta {
    requires_auth: true,
    requires_admin: false,
};
const ADMIN: RouteMeta = RouteMeta {
    requires_auth: true,
    requires_admin: true,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub name: RouteName,
    /// Normalized path after static redirects (`/` becomes `/boards`).
    pub path: String,
    pub board_id: Option<Id>,
    pub meta: RouteMeta,
}

impl RouteMatch {
    pub fn is_login(&self) -> bool {
        self.name == RouteName::Login
    }
}

/// Strip query, fragment and trailing slashes. The empty path is `/`.
fn normalize(raw: &str) -> String {
    let path = raw
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

pub fn resolve(raw: &str) -> RouteMatch {
    let mut path = normalize(raw);
    if path == "/" {
        path = HOME_PATH.to_string();
    }

    let segments: Vec<&str> = path.split('/').skip(1).collect();
    let (name, board_id, meta) = match segments.as_slice() {
        ["login"] => (RouteName::Login, None, PUBLIC),
        ["boards"] => (RouteName::BoardList, None, MEMBER),
        ["boards", id] => match id.parse::<Id>() {
            Ok(id) => (RouteName::BoardDetail, Some(id), MEMBER),
            Err(_) => (RouteName::NotFound, None, MEMBER),
        },
        ["boards", id, "stats"] => match id.parse::<Id>() {
            Ok(id) => (RouteName::BoardStats, Some(id), MEMBER),
            Err(_) => (RouteName::NotFound, None, MEMBER),
        },
        ["admin", "dashboard"] => (RouteName::AdminDashboard, None, ADMIN),
        ["admin", "users"] => (RouteName::UserManagement, None, ADMIN),
        _ => (RouteName::NotFound, None, MEMBER),
    };

    RouteMatch {
        name,
        path,
        board_id,
        meta,
    }
}
