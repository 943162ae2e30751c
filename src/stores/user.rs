use kanban_schema::{Id, PasswordReset, User, UserCreate, UserUpdate};
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use crate::api::{ApiClient, endpoints};
use crate::error::{KanbanError, Outcome};

/// User management cache. Mutations report failures as [`Outcome`]s.
pub struct UserStore {
    api: ApiClient,
    users: RwLock<Vec<User>>,
}

impl UserStore {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            users: RwLock::new(Vec::new()),
        }
    }

    pub async fn all_users(&self) -> Vec<User> {
        self.users.read().await.clone()
    }

    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn admin_count(&self) -> usize {
        self.users
            .read()
            .await
            .iter()
            .filter(|u| u.is_admin())
            .count()
    }

    pub async fn get_user_by_id(&self, user_id: Id) -> Option<User> {
        self.users
            .read()
            .await
            .iter()
            .find(|u| u.id == user_id)
            .cloned()
    }

    pub async fn fetch_users(&self) -> Result<Vec<User>, KanbanError> {
        let users: Vec<User> = self
            .api
            .get(endpoints::USERS)
            .await
            .inspect_err(|e| error!(error = %e, "failed to fetch users"))?;
        *self.users.write().await = users.clone();
        Ok(users)
    }

    pub async fn create_user(&self, new: &UserCreate) -> Outcome<User> {
        match self.api.post::<_, User>(endpoints::USERS, new).await {
            Ok(user) => {
                info!(user_id = user.id, username = %user.username, "user created");
                self.users.write().await.push(user.clone());
                Outcome::ok(user)
            }
            Err(e) => {
                error!(username = %new.username, error = %e, "failed to create user");
                Outcome::from_error(&e, "Create failed")
            }
        }
    }

    pub async fn update_user(&self, user_id: Id, updates: &UserUpdate) -> Outcome<User> {
        match self
            .api
            .put::<_, User>(&endpoints::user(user_id), updates)
            .await
        {
            Ok(user) => {
                if let Some(slot) = self
                    .users
                    .write()
                    .await
                    .iter_mut()
                    .find(|u| u.id == user_id)
                {
                    *slot = user.clone();
                }
                Outcome::ok(user)
            }
            Err(e) => {
                error!(user_id, error = %e, "failed to update user");
                Outcome::from_error(&e, "Update failed")
            }
        }
    }

    /// Delete a user. Refused without a request when the target is the only
    /// cached administrator; the server remains the authority otherwise.
    pub async fn delete_user(&self, user_id: Id) -> Outcome {
        let target_is_admin = self
            .get_user_by_id(user_id)
            .await
            .is_some_and(|u| u.is_admin());
        if target_is_admin && self.admin_count().await <= 1 {
            warn!(user_id, "refusing to delete the last administrator");
            return Outcome::from_error(&KanbanError::LastAdmin, "Delete failed");
        }

        match self.api.delete(&endpoints::user(user_id)).await {
            Ok(()) => {
                self.users.write().await.retain(|u| u.id != user_id);
                info!(user_id, "user deleted");
                Outcome::done()
            }
            Err(e) => {
                error!(user_id, error = %e, "failed to delete user");
                Outcome::from_error(&e, "Delete failed")
            }
        }
    }

    pub async fn reset_password(&self, user_id: Id, new_password: &str) -> Outcome {
        let body = PasswordReset {
            password: new_password.to_string(),
        };
        match self
            .api
            .post_discard(&endpoints::reset_password(user_id), &body)
            .await
        {
            Ok(()) => {
                info!(user_id, "password reset");
                Outcome::done()
            }
            Err(e) => {
                error!(user_id, error = %e, "failed to reset password");
                Outcome::from_error(&e, "Password reset failed")
            }
        }
    }
}
