use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::navigation::guard::{Navigation, before_each};
use crate::navigation::routes::{LOGIN_PATH, resolve};
use crate::session::SessionHandle;

/// Guard redirects never chain further than this.
const MAX_REDIRECTS: usize = 4;

/// Tracks the client's current location.
#[derive(Clone)]
pub struct Navigator {
    location: Arc<RwLock<String>>,
}

impl Navigator {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            location: Arc::new(RwLock::new(initial.into())),
        }
    }

    pub async fn current(&self) -> String {
        self.location.read().await.clone()
    }

    /// Move to `path` without consulting the guard.
    pub async fn redirect(&self, path: &str) {
        let mut location = self.location.write().await;
        info!(from = location.as_str(), to = path, "redirect");
        *location = path.to_string();
    }

    /// Send the client to the login page unless it is already there.
    /// Returns whether the location changed.
    pub async fn redirect_to_login(&self) -> bool {
        if self.current().await.contains(LOGIN_PATH) {
            return false;
        }
        self.redirect(LOGIN_PATH).await;
        true
    }

    /// Navigate to `to`, applying the guard to every hop, and return the
    /// location finally reached.
    pub async fn navigate(&self, to: &str, session: &SessionHandle) -> String {
        let snapshot = session.snapshot().await;
        let mut target = resolve(to);

        for _ in 0..MAX_REDIRECTS {
            match before_each(&target, &snapshot) {
                Navigation::Proceed => {
                    debug!(to = %target.path, route = ?target.name, "navigation allowed");
                    *self.location.write().await = target.path.clone();
                    return target.path;
                }
                Navigation::Redirect(next) => {
                    debug!(from = %target.path, to = next, "guard redirect");
                    target = resolve(next);
                }
            }
        }

        warn!(to, "navigation aborted after too many redirects");
        self.current().await
    }
}
