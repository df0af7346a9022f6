//! Database layer - store handle and request-scoped connections
//!
//! # Design Principles
//!
//! - One connection per request scope, opened on first use and closed at scope end
//! - `PRAGMA foreign_keys = ON` before any statement runs on a connection
//! - Parameters are always bound, never interpolated into SQL
//! - Reads never commit; writes go through an explicit transaction

pub mod error;
pub mod scope;
pub mod store;

pub use error::DbError;
pub use scope::{Fetch, RequestDb, Rows, ScopeState, SqlParam};
pub use store::Store;
