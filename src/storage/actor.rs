use crate::error::KanbanError;
use crate::storage::schema::SQLITE_INIT;
use chrono::Utc;
use ractor::{Actor, ActorProcessingErr, ActorRef, RpcReplyPort};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::{str::FromStr, time::Duration};
use tracing::{debug, info};

#[derive(Debug)]
pub enum StorageMessage {
    /// Read one value by key.
    GetItem(String, RpcReplyPort<Result<Option<String>, KanbanError>>),

    /// Insert or overwrite one value: (key, value).
    SetItem(String, String, RpcReplyPort<Result<(), KanbanError>>),

    /// Delete one key. Missing keys are not an error.
    RemoveItem(String, RpcReplyPort<Result<(), KanbanError>>),
}

/// Cloneable handle to the storage actor.
#[derive(Clone)]
pub struct StorageHandle {
    actor: ActorRef<StorageMessage>,
}

impl StorageHandle {
    pub async fn get_item(&self, key: &str) -> Result<Option<String>, KanbanError> {
        ractor::call!(self.actor, StorageMessage::GetItem, key.to_string())
            .map_err(|e| KanbanError::RactorError(format!("Storage GetItem RPC failed: {e}")))?
    }

    pub async fn set_item(&self, key: &str, value: impl Into<String>) -> Result<(), KanbanError> {
        ractor::call!(
            self.actor,
            StorageMessage::SetItem,
            key.to_string(),
            value.into()
        )
        .map_err(|e| KanbanError::RactorError(format!("Storage SetItem RPC failed: {e}")))?
    }

    pub async fn remove_item(&self, key: &str) -> Result<(), KanbanError> {
        ractor::call!(self.actor, StorageMessage::RemoveItem, key.to_string())
            .map_err(|e| KanbanError::RactorError(format!("Storage RemoveItem RPC failed: {e}")))?
    }
}

struct StorageState {
    pool: SqlitePool,
}

struct StorageActor;

#[ractor::async_trait]
impl Actor for StorageActor {
    type Msg = StorageMessage;
    type State = StorageState;
    type Arguments = String;

    async fn pre_start(
        &self,
        _myself: ActorRef<Self::Msg>,
        database_url: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        let connect_opts = SqliteConnectOptions::from_str(database_url.as_str())
            .map_err(|e| ActorProcessingErr::from(format!("invalid database url: {e}")))?
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(5))
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(connect_opts)
            .await
            .map_err(|e| ActorProcessingErr::from(format!("db connect failed: {e}")))?;

        apply_schema(&pool)
            .await
            .map_err(|e| ActorProcessingErr::from(format!("db schema init failed: {e}")))?;

        info!(database_url = %database_url, "StorageActor initialized");
        Ok(StorageState { pool })
    }

    async fn handle(
        &self,
        _myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        match message {
            StorageMessage::GetItem(key, reply) => {
                let res = get_item(&state.pool, &key).await;
                let _ = reply.send(res);
            }
            StorageMessage::SetItem(key, value, reply) => {
                let res = set_item(&state.pool, &key, &value).await;
                let _ = reply.send(res);
            }
            StorageMessage::RemoveItem(key, reply) => {
                let res = remove_item(&state.pool, &key).await;
                let _ = reply.send(res);
            }
        }
        Ok(())
    }
}

async fn get_item(pool: &SqlitePool, key: &str) -> Result<Option<String>, KanbanError> {
    let value: Option<String> =
        sqlx::query_scalar(r#"SELECT value FROM local_storage WHERE key = ?"#)
            .bind(key)
            .fetch_optional(pool)
            .await?;
    Ok(value)
}

async fn set_item(pool: &SqlitePool, key: &str, value: &str) -> Result<(), KanbanError> {
    sqlx::query(
        r#"
        INSERT INTO local_storage (key, value, updated_at)
        VALUES (?, ?, ?)
        ON CONFLICT(key) DO UPDATE SET
            value = excluded.value,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(key)
    .bind(value)
    .bind(Utc::now())
    .execute(pool)
    .await?;
    debug!(key, "storage item written");
    Ok(())
}

async fn remove_item(pool: &SqlitePool, key: &str) -> Result<(), KanbanError> {
    sqlx::query(r#"DELETE FROM local_storage WHERE key = ?"#)
        .bind(key)
        .execute(pool)
        .await?;
    debug!(key, "storage item removed");
    Ok(())
}

/// Spawn the storage actor and return a cloneable handle.
pub async fn spawn(database_url: &str) -> Result<StorageHandle, KanbanError> {
    let (actor, _jh) = ractor::Actor::spawn(None, StorageActor, database_url.to_string())
        .await
        .map_err(|e| KanbanError::RactorError(format!("failed to spawn StorageActor: {e}")))?;

    Ok(StorageHandle { actor })
}

async fn apply_schema(pool: &SqlitePool) -> Result<(), KanbanError> {
    for stmt in SQLITE_INIT.split(';') {
        let s = stmt.trim();
        if s.is_empty() {
            continue;
        }
        sqlx::query(s).execute(pool).await?;
    }
    Ok(())
}
