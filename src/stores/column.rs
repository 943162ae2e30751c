use kanban_schema::{Column, ColumnCreate, ColumnUpdate, Id};
use tokio::sync::RwLock;
use tracing::{error, info};

use crate::api::{ApiClient, endpoints};
use crate::error::KanbanError;

/// Columns of every board seen so far, in one flat list keyed by `board_id`.
pub struct ColumnStore {
    api: ApiClient,
    columns: RwLock<Vec<Column>>,
}

impl ColumnStore {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            columns: RwLock::new(Vec::new()),
        }
    }

    pub async fn columns(&self) -> Vec<Column> {
        self.columns.read().await.clone()
    }

    /// Cached columns of one board, ordered by position.
    pub async fn get_columns_by_board(&self, board_id: Id) -> Vec<Column> {
        let mut cols: Vec<Column> = self
            .columns
            .read()
            .await
            .iter()
            .filter(|c| c.board_id == board_id)
            .cloned()
            .collect();
        cols.sort_by_key(|c| c.position);
        cols
    }

    pub async fn fetch_columns(&self, board_id: Id) -> Result<Vec<Column>, KanbanError> {
        let cols: Vec<Column> = self
            .api
            .get(&endpoints::columns_of_board(board_id))
            .await
            .inspect_err(|e| error!(board_id, error = %e, "failed to fetch columns"))?;
        self.replace_board(board_id, cols.clone()).await;
        Ok(cols)
    }

    /// Swap one board's slice of the cache, leaving other boards untouched.
    pub(crate) async fn replace_board(&self, board_id: Id, fresh: Vec<Column>) {
        let mut columns = self.columns.write().await;
        columns.retain(|c| c.board_id != board_id);
        columns.extend(fresh);
    }

    pub async fn create_column(&self, new: &ColumnCreate) -> Result<Column, KanbanError> {
        let col: Column = self
            .api
            .post(endpoints::COLUMNS, new)
            .await
            .inspect_err(|e| {
                error!(
                    board_id = new.board_id,
                    name = %new.name,
                    error = %e,
                    "failed to create column"
                );
            })?;
        info!(column_id = col.id, board_id = col.board_id, "column created");
        self.columns.write().await.push(col.clone());
        Ok(col)
    }

    pub async fn update_column(
        &self,
        column_id: Id,
        updates: &ColumnUpdate,
    ) -> Result<Column, KanbanError> {
        let col: Column = self
            .api
            .put(&endpoints::column(column_id), updates)
            .await
            .inspect_err(|e| error!(column_id, error = %e, "failed to update column"))?;
        if let Some(slot) = self
            .columns
            .write()
            .await
            .iter_mut()
            .find(|c| c.id == column_id)
        {
            *slot = col.clone();
        }
        Ok(col)
    }

    pub async fn delete_column(&self, column_id: Id) -> Result<(), KanbanError> {
        self.api
            .delete(&endpoints::column(column_id))
            .await
            .inspect_err(|e| error!(column_id, error = %e, "failed to delete column"))?;
        self.columns.write().await.retain(|c| c.id != column_id);
        info!(column_id, "column deleted");
        Ok(())
    }

    /// Local only: forget every cached column of a board.
    pub async fn delete_columns_by_board(&self, board_id: Id) {
        self.columns.write().await.retain(|c| c.board_id != board_id);
    }
}
