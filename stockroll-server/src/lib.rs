//! stockroll-server: inventory item registry over HTTP
//!
//! Each request gets its own lazily opened SQLite connection (see [`db`]),
//! the [`registry`] workflow lists or creates items on it, and [`http`]
//! exposes the two operations at `/`.

pub mod db;
pub mod http;
pub mod registry;
pub mod state;

pub use db::{DbError, RequestDb, Store};
pub use http::{build_router, run_server, ApiError, ServerConfig, ServerError};
pub use registry::{CreateOutcome, REGISTRATION_FAILED};
pub use state::AppState;
