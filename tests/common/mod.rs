//! In-process fake of the Kanban REST API plus temp-file session storage.
#![allow(dead_code)]

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, Uri, header},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use serde_json::{Value, json};
use std::{
    collections::HashMap,
    path::PathBuf,
    sync::{Arc, Mutex},
    time::{SystemTime, UNIX_EPOCH},
};
use tokio::net::TcpListener;
use url::Url;

use kanban::KanbanApp;
use kanban::navigation::Navigator;

pub const ADMIN_TOKEN: &str = "tok-admin";
pub const MEMBER_TOKEN: &str = "tok-alice";
/// Naive timestamp, as the server's database emits it.
pub const STAMP: &str = "2025-05-01T09:30:00";

#[derive(Debug, Clone)]
pub struct Captured {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub body: Value,
}

#[derive(Default)]
pub struct Fake {
    pub boards: Vec<Value>,
    pub columns: Vec<Value>,
    pub tickets: Vec<Value>,
    pub users: Vec<Value>,
    /// When set, every token is rejected with 401.
    pub revoked: bool,
    pub requests: Vec<Captured>,
    next_id: i64,
}

impl Fake {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        1000 + self.next_id
    }
}

#[derive(Clone, Default)]
pub struct FakeApi {
    inner: Arc<Mutex<Fake>>,
}

impl FakeApi {
    pub fn seeded() -> Self {
        let mut fake = Fake {
            users: vec![
                user_json(1, "admin", "Ada Admin", "admin"),
                user_json(2, "alice", "Alice Member", "user"),
            ],
            boards: vec![board_json(1, "Roadmap", 1), board_json(2, "Ops", 1)],
            columns: vec![
                column_json(11, 1, "Done", 1),
                column_json(10, 1, "Todo", 0),
                column_json(20, 2, "Inbox", 0),
            ],
            tickets: vec![
                ticket_json(100, 1, 10, "Write changelog", 1),
                ticket_json(101, 1, 10, "Cut release branch", 0),
                ticket_json(102, 1, 11, "Plan sprint", 0),
                ticket_json(200, 2, 20, "Rotate keys", 0),
            ],
            ..Fake::default()
        };
        // Both columns are nullable on the server.
        fake.columns[0]["color"] = Value::Null;
        fake.tickets[2]["priority"] = Value::Null;
        Self {
            inner: Arc::new(Mutex::new(fake)),
        }
    }

    pub fn with<R>(&self, f: impl FnOnce(&mut Fake) -> R) -> R {
        let mut fake = self.inner.lock().unwrap();
        f(&mut fake)
    }

    pub fn requests(&self) -> Vec<Captured> {
        self.with(|f| f.requests.clone())
    }

    pub fn revoke_tokens(&self) {
        self.with(|f| f.revoked = true);
    }
}

pub fn user_json(id: i64, username: &str, name: &str, role: &str) -> Value {
    json!({
        "id": id,
        "username": username,
        "name": name,
        "email": format!("{username}@example.com"),
        "role": role,
        "created_at": STAMP,
    })
}

fn board_json(id: i64, name: &str, owner_id: i64) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": null,
        "owner_id": owner_id,
        "created_at": STAMP,
        "updated_at": STAMP,
        "columns": [],
    })
}

fn column_json(id: i64, board_id: i64, name: &str, position: i64) -> Value {
    json!({
        "id": id,
        "board_id": board_id,
        "name": name,
        "color": "slate",
        "position": position,
    })
}

fn ticket_json(id: i64, board_id: i64, column_id: i64, title: &str, position: i64) -> Value {
    json!({
        "id": id,
        "board_id": board_id,
        "column_id": column_id,
        "title": title,
        "description": null,
        "priority": "medium",
        "start_date": null,
        "due_date": null,
        "position": position,
        "created_at": STAMP,
        "updated_at": "2025-05-01T09:30:00+00:00",
    })
}

fn reply(status: StatusCode, body: Value) -> Response {
    (status, Json(body)).into_response()
}

fn no_content() -> Response {
    StatusCode::NO_CONTENT.into_response()
}

fn not_found(what: &str) -> Response {
    reply(StatusCode::NOT_FOUND, json!({ "detail": format!("{what} not found") }))
}

fn record(fake: &mut Fake, method: &str, uri: &Uri, headers: &HeaderMap, body: &Value) {
    fake.requests.push(Captured {
        method: method.to_string(),
        path: uri.to_string(),
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: body.clone(),
    });
}

/// Resolve the caller's user id from `Authorization: Token <t>`.
fn caller(fake: &Fake, headers: &HeaderMap) -> Result<i64, Response> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Token "));
    match token {
        Some(ADMIN_TOKEN) if !fake.revoked => Ok(1),
        Some(MEMBER_TOKEN) if !fake.revoked => Ok(2),
        _ => Err(reply(
            StatusCode::UNAUTHORIZED,
            json!({ "detail": "Could not validate credentials" }),
        )),
    }
}

fn require_admin(fake: &Fake, headers: &HeaderMap) -> Result<i64, Response> {
    let id = caller(fake, headers)?;
    if id == 1 {
        Ok(id)
    } else {
        Err(reply(
            StatusCode::FORBIDDEN,
            json!({ "detail": "Not enough permissions" }),
        ))
    }
}

fn merge(target: &mut Value, patch: &Value) {
    if let (Some(t), Some(p)) = (target.as_object_mut(), patch.as_object()) {
        for (k, v) in p {
            t.insert(k.clone(), v.clone());
        }
    }
}

fn id_of(v: &Value) -> i64 {
    v["id"].as_i64().unwrap_or_default()
}

fn board_filter(q: &HashMap<String, String>) -> Option<i64> {
    q.get("board_id").and_then(|v| v.parse().ok())
}

async fn login(
    State(api): State<FakeApi>,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    api.with(|fake| {
        record(fake, "POST", &uri, &headers, &body);
        let creds = (body["username"].as_str(), body["password"].as_str());
        let (token, user_id) = match creds {
            (Some("admin"), Some("secret")) => (ADMIN_TOKEN, 1),
            (Some("alice"), Some("wonderland")) => (MEMBER_TOKEN, 2),
            _ => {
                return reply(
                    StatusCode::UNAUTHORIZED,
                    json!({ "detail": "Incorrect username or password" }),
                );
            }
        };
        fake.revoked = false;
        let user = fake.users.iter().find(|u| id_of(u) == user_id).cloned();
        reply(
            StatusCode::OK,
            json!({ "access_token": token, "token_type": "bearer", "user": user }),
        )
    })
}

async fn me(State(api): State<FakeApi>, uri: Uri, headers: HeaderMap) -> Response {
    api.with(|fake| {
        record(fake, "GET", &uri, &headers, &Value::Null);
        match caller(fake, &headers) {
            Ok(id) => match fake.users.iter().find(|u| id_of(u) == id) {
                Some(u) => reply(StatusCode::OK, u.clone()),
                None => not_found("User"),
            },
            Err(resp) => resp,
        }
    })
}

async fn list_boards(State(api): State<FakeApi>, uri: Uri, headers: HeaderMap) -> Response {
    api.with(|fake| {
        record(fake, "GET", &uri, &headers, &Value::Null);
        if let Err(resp) = caller(fake, &headers) {
            return resp;
        }
        reply(StatusCode::OK, Value::Array(fake.boards.clone()))
    })
}

async fn create_board(
    State(api): State<FakeApi>,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    api.with(|fake| {
        record(fake, "POST", &uri, &headers, &body);
        let owner = match caller(fake, &headers) {
            Ok(id) => id,
            Err(resp) => return resp,
        };
        let id = fake.next_id();
        let mut board = board_json(id, body["name"].as_str().unwrap_or_default(), owner);
        board["description"] = body.get("description").cloned().unwrap_or(Value::Null);
        fake.boards.push(board.clone());
        reply(StatusCode::OK, board)
    })
}

async fn board_detail(
    State(api): State<FakeApi>,
    Path(id): Path<i64>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    api.with(|fake| {
        record(fake, "GET", &uri, &headers, &Value::Null);
        if let Err(resp) = caller(fake, &headers) {
            return resp;
        }
        let Some(board) = fake.boards.iter().find(|b| id_of(b) == id) else {
            return not_found("Board");
        };
        let mut detail = board.clone();
        let mut columns: Vec<Value> = fake
            .columns
            .iter()
            .filter(|c| c["board_id"] == json!(id))
            .cloned()
            .collect();
        columns.sort_by_key(|c| c["position"].as_i64());
        detail["columns"] = Value::Array(columns);
        detail["tickets"] = Value::Array(
            fake.tickets
                .iter()
                .filter(|t| t["board_id"] == json!(id))
                .cloned()
                .collect(),
        );
        reply(StatusCode::OK, detail)
    })
}

async fn update_board(
    State(api): State<FakeApi>,
    Path(id): Path<i64>,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    api.with(|fake| {
        record(fake, "PUT", &uri, &headers, &body);
        if let Err(resp) = caller(fake, &headers) {
            return resp;
        }
        match fake.boards.iter_mut().find(|b| id_of(b) == id) {
            Some(board) => {
                merge(board, &body);
                reply(StatusCode::OK, board.clone())
            }
            None => not_found("Board"),
        }
    })
}

async fn delete_board(
    State(api): State<FakeApi>,
    Path(id): Path<i64>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    api.with(|fake| {
        record(fake, "DELETE", &uri, &headers, &Value::Null);
        if let Err(resp) = caller(fake, &headers) {
            return resp;
        }
        fake.boards.retain(|b| id_of(b) != id);
        fake.columns.retain(|c| c["board_id"] != json!(id));
        fake.tickets.retain(|t| t["board_id"] != json!(id));
        no_content()
    })
}

async fn list_columns(
    State(api): State<FakeApi>,
    Query(q): Query<HashMap<String, String>>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    api.with(|fake| {
        record(fake, "GET", &uri, &headers, &Value::Null);
        if let Err(resp) = caller(fake, &headers) {
            return resp;
        }
        let board_id = board_filter(&q);
        let cols: Vec<Value> = fake
            .columns
            .iter()
            .filter(|c| board_id.is_none_or(|b| c["board_id"] == json!(b)))
            .cloned()
            .collect();
        reply(StatusCode::OK, Value::Array(cols))
    })
}

async fn create_column(
    State(api): State<FakeApi>,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    api.with(|fake| {
        record(fake, "POST", &uri, &headers, &body);
        if let Err(resp) = caller(fake, &headers) {
            return resp;
        }
        let board_id = body["board_id"].as_i64().unwrap_or_default();
        let position = fake
            .columns
            .iter()
            .filter(|c| c["board_id"] == json!(board_id))
            .count();
        let id = fake.next_id();
        let mut col = column_json(
            id,
            board_id,
            body["name"].as_str().unwrap_or_default(),
            i64::try_from(position).unwrap_or_default(),
        );
        if let Some(color) = body["color"].as_str() {
            col["color"] = json!(color);
        }
        fake.columns.push(col.clone());
        reply(StatusCode::OK, col)
    })
}

async fn update_column(
    State(api): State<FakeApi>,
    Path(id): Path<i64>,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    api.with(|fake| {
        record(fake, "PUT", &uri, &headers, &body);
        if let Err(resp) = caller(fake, &headers) {
            return resp;
        }
        match fake.columns.iter_mut().find(|c| id_of(c) == id) {
            Some(col) => {
                merge(col, &body);
                reply(StatusCode::OK, col.clone())
            }
            None => not_found("Column"),
        }
    })
}

async fn delete_column(
    State(api): State<FakeApi>,
    Path(id): Path<i64>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    api.with(|fake| {
        record(fake, "DELETE", &uri, &headers, &Value::Null);
        if let Err(resp) = caller(fake, &headers) {
            return resp;
        }
        fake.columns.retain(|c| id_of(c) != id);
        fake.tickets.retain(|t| t["column_id"] != json!(id));
        no_content()
    })
}

async fn list_tickets(
    State(api): State<FakeApi>,
    Query(q): Query<HashMap<String, String>>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    api.with(|fake| {
        record(fake, "GET", &uri, &headers, &Value::Null);
        if let Err(resp) = caller(fake, &headers) {
            return resp;
        }
        let board_id = board_filter(&q);
        let tickets: Vec<Value> = fake
            .tickets
            .iter()
            .filter(|t| board_id.is_none_or(|b| t["board_id"] == json!(b)))
            .cloned()
            .collect();
        reply(StatusCode::OK, Value::Array(tickets))
    })
}

async fn create_ticket(
    State(api): State<FakeApi>,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    api.with(|fake| {
        record(fake, "POST", &uri, &headers, &body);
        if let Err(resp) = caller(fake, &headers) {
            return resp;
        }
        let column_id = body["column_id"].as_i64().unwrap_or_default();
        let position = fake
            .tickets
            .iter()
            .filter(|t| t["column_id"] == json!(column_id))
            .count();
        let id = fake.next_id();
        let mut ticket = ticket_json(
            id,
            body["board_id"].as_i64().unwrap_or_default(),
            column_id,
            body["title"].as_str().unwrap_or_default(),
            i64::try_from(position).unwrap_or_default(),
        );
        for key in ["description", "priority", "start_date", "due_date"] {
            if let Some(v) = body.get(key).filter(|v| !v.is_null()) {
                ticket[key] = v.clone();
            }
        }
        fake.tickets.push(ticket.clone());
        reply(StatusCode::OK, ticket)
    })
}

async fn update_ticket(
    State(api): State<FakeApi>,
    Path(id): Path<i64>,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    api.with(|fake| {
        record(fake, "PUT", &uri, &headers, &body);
        if let Err(resp) = caller(fake, &headers) {
            return resp;
        }
        match fake.tickets.iter_mut().find(|t| id_of(t) == id) {
            Some(ticket) => {
                merge(ticket, &body);
                reply(StatusCode::OK, ticket.clone())
            }
            None => not_found("Ticket"),
        }
    })
}

async fn delete_ticket(
    State(api): State<FakeApi>,
    Path(id): Path<i64>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    api.with(|fake| {
        record(fake, "DELETE", &uri, &headers, &Value::Null);
        if let Err(resp) = caller(fake, &headers) {
            return resp;
        }
        fake.tickets.retain(|t| id_of(t) != id);
        no_content()
    })
}

async fn list_users(State(api): State<FakeApi>, uri: Uri, headers: HeaderMap) -> Response {
    api.with(|fake| {
        record(fake, "GET", &uri, &headers, &Value::Null);
        if let Err(resp) = require_admin(fake, &headers) {
            return resp;
        }
        reply(StatusCode::OK, Value::Array(fake.users.clone()))
    })
}

async fn create_user(
    State(api): State<FakeApi>,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    api.with(|fake| {
        record(fake, "POST", &uri, &headers, &body);
        if let Err(resp) = require_admin(fake, &headers) {
            return resp;
        }
        let username = body["username"].as_str().unwrap_or_default().to_string();
        if fake.users.iter().any(|u| u["username"] == json!(username)) {
            return reply(
                StatusCode::BAD_REQUEST,
                json!({ "detail": "Username already registered" }),
            );
        }
        let id = fake.next_id();
        let mut user = user_json(id, &username, body["name"].as_str().unwrap_or_default(), "user");
        user["email"] = body.get("email").cloned().unwrap_or(Value::Null);
        fake.users.push(user.clone());
        reply(StatusCode::OK, user)
    })
}

async fn update_user(
    State(api): State<FakeApi>,
    Path(id): Path<i64>,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    api.with(|fake| {
        record(fake, "PUT", &uri, &headers, &body);
        if let Err(resp) = require_admin(fake, &headers) {
            return resp;
        }
        match fake.users.iter_mut().find(|u| id_of(u) == id) {
            Some(user) => {
                merge(user, &body);
                reply(StatusCode::OK, user.clone())
            }
            None => not_found("User"),
        }
    })
}

async fn delete_user(
    State(api): State<FakeApi>,
    Path(id): Path<i64>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    api.with(|fake| {
        record(fake, "DELETE", &uri, &headers, &Value::Null);
        if let Err(resp) = require_admin(fake, &headers) {
            return resp;
        }
        fake.users.retain(|u| id_of(u) != id);
        no_content()
    })
}

async fn reset_password(
    State(api): State<FakeApi>,
    Path(id): Path<i64>,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    api.with(|fake| {
        record(fake, "POST", &uri, &headers, &body);
        if let Err(resp) = require_admin(fake, &headers) {
            return resp;
        }
        if !fake.users.iter().any(|u| id_of(u) == id) {
            return not_found("User");
        }
        if body["password"].as_str().unwrap_or_default().len() < 6 {
            return reply(
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({ "detail": [{ "loc": ["body", "password"], "msg": "too short" }] }),
            );
        }
        reply(StatusCode::OK, json!({ "message": "Password updated" }))
    })
}

async fn broken() -> Response {
    (
        StatusCode::BAD_GATEWAY,
        [(header::CONTENT_TYPE, "text/html")],
        "<html>upstream down</html>",
    )
        .into_response()
}

pub fn router(api: FakeApi) -> Router {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/me", get(me))
        .route("/api/boards/", get(list_boards).post(create_board))
        .route(
            "/api/boards/{id}",
            get(board_detail).put(update_board).delete(delete_board),
        )
        .route("/api/columns/", get(list_columns).post(create_column))
        .route("/api/columns/{id}", put(update_column).delete(delete_column))
        .route("/api/tickets/", get(list_tickets).post(create_ticket))
        .route("/api/tickets/{id}", put(update_ticket).delete(delete_ticket))
        .route("/api/users/", get(list_users).post(create_user))
        .route("/api/users/{id}", put(update_user).delete(delete_user))
        .route("/api/users/{id}/reset_password", post(reset_password))
        .route("/api/broken", get(broken))
        .with_state(api)
}

pub async fn spawn_fake_api() -> (Url, FakeApi) {
    let api = FakeApi::seeded();
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    let base = Url::parse(&format!("http://{addr}")).expect("valid base url");

    let app = router(api.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server run");
    });

    (base, api)
}

pub fn unique_sqlite_path(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();

    let mut temp_path = std::env::temp_dir();
    temp_path.push(format!(
        "kanban-{prefix}-{}-{}.sqlite",
        std::process::id(),
        nanos
    ));
    temp_path
}

pub fn sqlite_url(path: &std::path::Path) -> String {
    format!("sqlite:{}", path.display())
}

/// A client whose session storage lives in `db_path`, starting at `location`.
pub async fn client_app(base: &Url, db_path: &std::path::Path, location: &str) -> KanbanApp {
    let storage = kanban::storage::spawn(&sqlite_url(db_path))
        .await
        .expect("spawn storage");
    KanbanApp::from_parts(base, reqwest::Client::new(), storage, Navigator::new(location))
        .await
        .expect("build app")
}

/// Fresh storage, logged in as `username`.
pub async fn logged_in_app(
    base: &Url,
    prefix: &str,
    username: &str,
    password: &str,
) -> (KanbanApp, PathBuf) {
    let path = unique_sqlite_path(prefix);
    let app = client_app(base, &path, "/boards").await;
    let outcome = app.auth().login(username, password).await;
    assert!(outcome.success, "login failed: {:?}", outcome.message);
    (app, path)
}

pub async fn cleanup(path: &std::path::Path) {
    for suffix in ["", "-wal", "-shm"] {
        let _ = tokio::fs::remove_file(format!("{}{suffix}", path.display())).await;
    }
}
