use kanban_schema::{Board, BoardDetail, BoardWrite, Id};
use tokio::sync::RwLock;
use tracing::{error, info};

use crate::api::{ApiClient, endpoints};
use crate::error::KanbanError;

pub struct BoardStore {
    api: ApiClient,
    all_boards: RwLock<Vec<Board>>,
    current_board: RwLock<Option<BoardDetail>>,
}

impl BoardStore {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            all_boards: RwLock::new(Vec::new()),
            current_board: RwLock::new(None),
        }
    }

    pub async fn all_boards(&self) -> Vec<Board> {
        self.all_boards.read().await.clone()
    }

    pub async fn current_board(&self) -> Option<BoardDetail> {
        self.current_board.read().await.clone()
    }

    /// Cached board by id; never hits the API.
    pub async fn get_board_by_id(&self, id: Id) -> Option<Board> {
        self.all_boards
            .read()
            .await
            .iter()
            .find(|b| b.id == id)
            .cloned()
    }

    pub async fn fetch_boards(&self) -> Result<Vec<Board>, KanbanError> {
        let boards: Vec<Board> = self
            .api
            .get(endpoints::BOARDS)
            .await
            .inspect_err(|e| error!(error = %e, "failed to fetch boards"))?;
        *self.all_boards.write().await = boards.clone();
        Ok(boards)
    }

    pub async fn fetch_board_detail(&self, board_id: Id) -> Result<BoardDetail, KanbanError> {
        let detail: BoardDetail = self
            .api
            .get(&endpoints::board(board_id))
            .await
            .inspect_err(|e| error!(board_id, error = %e, "failed to fetch board detail"))?;
        *self.current_board.write().await = Some(detail.clone());
        Ok(detail)
    }

    pub async fn create_board(
        &self,
        name: &str,
        description: Option<String>,
    ) -> Result<Board, KanbanError> {
        let body = BoardWrite {
            name: name.to_string(),
            description,
        };
        let board: Board = self
            .api
            .post(endpoints::BOARDS, &body)
            .await
            .inspect_err(|e| error!(name, error = %e, "failed to create board"))?;
        info!(board_id = board.id, name, "board created");
        self.all_boards.write().await.push(board.clone());
        Ok(board)
    }

    pub async fn update_board(
        &self,
        board_id: Id,
        name: &str,
        description: Option<String>,
    ) -> Result<Board, KanbanError> {
        let body = BoardWrite {
            name: name.to_string(),
            description,
        };
        let board: Board = self
            .api
            .put(&endpoints::board(board_id), &body)
            .await
            .inspect_err(|e| error!(board_id, error = %e, "failed to update board"))?;

        if let Some(slot) = self
            .all_boards
            .write()
            .await
            .iter_mut()
            .find(|b| b.id == board_id)
        {
            *slot = board.clone();
        }
        if let Some(current) = self.current_board.write().await.as_mut() {
            if current.board.id == board_id {
                // The update response carries no tickets; keep the cached ones.
                current.board = board.clone();
            }
        }
        Ok(board)
    }

    pub async fn delete_board(&self, board_id: Id) -> Result<(), KanbanError> {
        self.api
            .delete(&endpoints::board(board_id))
            .await
            .inspect_err(|e| error!(board_id, error = %e, "failed to delete board"))?;

        self.all_boards.write().await.retain(|b| b.id != board_id);
        let mut current = self.current_board.write().await;
        if current.as_ref().is_some_and(|d| d.board.id == board_id) {
            *current = None;
        }
        info!(board_id, "board deleted");
        Ok(())
    }
}
