//! Client-side routing: the route table, the session guard and the
//! navigator that records where the client currently is.

pub mod guard;
pub mod navigator;
pub mod routes;

pub use guard::{Navigation, before_each};
pub use navigator::Navigator;
pub use routes::{HOME_PATH, LOGIN_PATH, RouteMatch, RouteMeta, RouteName, resolve};
