//! In-memory session mirrored to persistent storage.
//!
//! The request wrapper and the auth store share one [`SessionHandle`]; every
//! mutation writes through to the storage actor so a later process restores
//! the same token and user.

use std::sync::Arc;

use kanban_schema::User;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::error::KanbanError;
use crate::storage::{StorageHandle, TOKEN_KEY, USER_KEY};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<User>,
}

impl Session {
    pub fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(User::is_admin)
    }
}

#[derive(Clone)]
pub struct SessionHandle {
    state: Arc<RwLock<Session>>,
    storage: StorageHandle,
}

impl SessionHandle {
    /// Restore the session from storage. A stored user that no longer
    /// decodes is discarded rather than failing startup.
    pub async fn load(storage: StorageHandle) -> Result<Self, KanbanError> {
        let token = storage
            .get_item(TOKEN_KEY)
            .await?
            .filter(|t| !t.is_empty());
        let user = match storage.get_item(USER_KEY).await? {
            Some(raw) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => Some(user),
                Err(e) => {
                    warn!(error = %e, "discarding unreadable stored user");
                    None
                }
            },
            None => None,
        };
        debug!(
            has_token = token.is_some(),
            user = user.as_ref().map(|u| u.username.as_str()),
            "session restored"
        );

        Ok(Self {
            state: Arc::new(RwLock::new(Session { token, user })),
            storage,
        })
    }

    pub async fn snapshot(&self) -> Session {
        self.state.read().await.clone()
    }

    pub async fn token(&self) -> Option<String> {
        self.state.read().await.token.clone()
    }

    pub async fn user(&self) -> Option<User> {
        self.state.read().await.user.clone()
    }

    pub async fn is_logged_in(&self) -> bool {
        self.state.read().await.is_logged_in()
    }

    pub async fn is_admin(&self) -> bool {
        self.state.read().await.is_admin()
    }

    pub async fn establish(&self, token: String, user: User) -> Result<(), KanbanError> {
        let user_json = serde_json::to_string(&user)?;
        {
            let mut state = self.state.write().await;
            state.token = Some(token.clone());
            state.user = Some(user);
        }
        self.storage.set_item(TOKEN_KEY, token).await?;
        self.storage.set_item(USER_KEY, user_json).await
    }

    pub async fn set_user(&self, user: User) -> Result<(), KanbanError> {
        let user_json = serde_json::to_string(&user)?;
        self.state.write().await.user = Some(user);
        self.storage.set_item(USER_KEY, user_json).await
    }

    /// Drop token and user from memory and storage.
    pub async fn clear(&self) -> Result<(), KanbanError> {
        *self.state.write().await = Session::default();
        self.storage.remove_item(TOKEN_KEY).await?;
        self.storage.remove_item(USER_KEY).await
    }
}
