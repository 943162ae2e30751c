use kanban_schema::{LoginRequest, TokenResponse, User};
use tracing::{error, info, warn};

use crate::api::{ApiClient, endpoints};
use crate::error::Outcome;
use crate::navigation::LOGIN_PATH;

/// Session state as seen by the rest of the client.
#[derive(Clone)]
pub struct AuthStore {
    api: ApiClient,
}

impl AuthStore {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn token(&self) -> Option<String> {
        self.api.session().token().await
    }

    pub async fn current_user(&self) -> Option<User> {
        self.api.session().user().await
    }

    pub async fn is_logged_in(&self) -> bool {
        self.api.session().is_logged_in().await
    }

    pub async fn is_admin(&self) -> bool {
        self.api.session().is_admin().await
    }

    pub async fn login(&self, username: &str, password: &str) -> Outcome {
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let resp: TokenResponse = match self.api.post(endpoints::AUTH_LOGIN, &body).await {
            Ok(resp) => resp,
            Err(e) => {
                error!(username, error = %e, "login failed");
                return Outcome::from_error(&e, "Login failed");
            }
        };

        let user_id = resp.user.id;
        if let Err(e) = self
            .api
            .session()
            .establish(resp.access_token, resp.user)
            .await
        {
            error!(username, error = %e, "login succeeded but session could not be stored");
            return Outcome::from_error(&e, "Login failed");
        }
        info!(username, user_id, "logged in");
        Outcome::done()
    }

    /// Forget the session and go to the login page.
    pub async fn logout(&self) {
        if let Err(e) = self.api.session().clear().await {
            warn!(error = %e, "failed to clear stored session on logout");
        }
        self.api.navigator().redirect(LOGIN_PATH).await;
        info!("logged out");
    }

    /// Revalidate the stored token against `/auth/me`.
    ///
    /// Without a token this does nothing. A rejected token logs the user
    /// out. Returns whether a valid session remains.
    pub async fn check_auth(&self) -> bool {
        if !self.is_logged_in().await {
            return false;
        }
        match self.api.get::<User>(endpoints::AUTH_ME).await {
            Ok(user) => {
                if let Err(e) = self.api.session().set_user(user).await {
                    warn!(error = %e, "failed to persist refreshed user");
                }
                true
            }
            Err(e) => {
                warn!(error = %e, "stored session rejected");
                self.logout().await;
                false
            }
        }
    }
}
