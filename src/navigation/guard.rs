use crate::navigation::routes::{HOME_PATH, LOGIN_PATH, RouteMatch};
use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Proceed,
    Redirect(&'static str),
}

/// Global before-each guard. Rules are checked in order; the first match wins.
pub fn before_each(to: &RouteMatch, session: &Session) -> Navigation {
    if to.meta.requires_auth && !session.is_logged_in() {
        return Navigation::Redirect(LOGIN_PATH);
    }

    // Logged-in users never see the login page.
    if to.is_login() && session.is_logged_in() {
        return Navigation::Redirect(HOME_PATH);
    }

    if to.meta.requires_admin && !session.is_admin() {
        return Navigation::Redirect(HOME_PATH);
    }

    Navigation::Proceed
}
