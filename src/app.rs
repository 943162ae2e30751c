//! Wiring of storage, session, navigation, HTTP client and the five stores.

use kanban_schema::{BoardDetail, Id};
use tracing::info;
use url::Url;

use crate::api::ApiClient;
use crate::config::BasicConfig;
use crate::error::KanbanError;
use crate::navigation::Navigator;
use crate::session::SessionHandle;
use crate::storage::{self, StorageHandle};
use crate::stores::{AuthStore, BoardStore, ColumnStore, TicketStore, UserStore};

pub struct KanbanApp {
    api: ApiClient,
    auth: AuthStore,
    boards: BoardStore,
    columns: ColumnStore,
    tickets: TicketStore,
    users: UserStore,
}

impl KanbanApp {
    /// Open session storage and build every store from configuration.
    pub async fn connect(cfg: &BasicConfig) -> Result<Self, KanbanError> {
        let storage = storage::spawn(&cfg.database_url).await?;
        let http = ApiClient::build_http_client(cfg)?;
        let navigator = Navigator::new(cfg.initial_location.clone());
        Self::from_parts(&cfg.api_url, http, storage, navigator).await
    }

    pub async fn from_parts(
        api_url: &Url,
        http: reqwest::Client,
        storage: StorageHandle,
        navigator: Navigator,
    ) -> Result<Self, KanbanError> {
        let session = SessionHandle::load(storage).await?;
        let api = ApiClient::new(api_url, http, session, navigator);
        info!(api_base = api.api_base(), "kanban client ready");

        Ok(Self {
            auth: AuthStore::new(api.clone()),
            boards: BoardStore::new(api.clone()),
            columns: ColumnStore::new(api.clone()),
            tickets: TicketStore::new(api.clone()),
            users: UserStore::new(api.clone()),
            api,
        })
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn navigator(&self) -> &Navigator {
        self.api.navigator()
    }

    pub fn auth(&self) -> &AuthStore {
        &self.auth
    }

    pub fn boards(&self) -> &BoardStore {
        &self.boards
    }

    pub fn columns(&self) -> &ColumnStore {
        &self.columns
    }

    pub fn tickets(&self) -> &TicketStore {
        &self.tickets
    }

    pub fn users(&self) -> &UserStore {
        &self.users
    }

    /// Navigate through the session guard; returns the location reached.
    pub async fn navigate(&self, to: &str) -> String {
        self.api.navigator().navigate(to, self.api.session()).await
    }

    /// Load one board and seed the column and ticket caches from it.
    pub async fn open_board(&self, board_id: Id) -> Result<BoardDetail, KanbanError> {
        let detail = self.boards.fetch_board_detail(board_id).await?;
        self.columns
            .replace_board(board_id, detail.board.columns.clone())
            .await;
        self.tickets
            .replace_board(board_id, detail.tickets.clone())
            .await;
        Ok(detail)
    }

    /// Delete a board and drop its cached columns and tickets.
    pub async fn delete_board(&self, board_id: Id) -> Result<(), KanbanError> {
        self.boards.delete_board(board_id).await?;
        self.columns.delete_columns_by_board(board_id).await;
        self.tickets.delete_tickets_by_board(board_id).await;
        Ok(())
    }

    /// Delete a column and drop its cached tickets.
    pub async fn delete_column(&self, column_id: Id) -> Result<(), KanbanError> {
        self.columns.delete_column(column_id).await?;
        self.tickets.delete_tickets_by_column(column_id).await;
        Ok(())
    }
}
