//! Store handle shared by all requests
//!
//! The store holds connection options only. Connections belong to request
//! scopes (see [`RequestDb`]) and never outlive them.

use std::path::Path;
use std::sync::Arc;

use futures::future::BoxFuture;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::Connection;
use tracing::{debug, info};

use super::error::DbError;
use super::scope::RequestDb;

const SCHEMA: &str = include_str!("schema.sql");

/// Handle to the backing SQLite database
#[derive(Clone, Debug)]
pub struct Store {
    options: Arc<SqliteConnectOptions>,
}

impl Store {
    /// Wrap prepared connect options without touching the database.
    pub fn new(options: SqliteConnectOptions) -> Self {
        Self {
            options: Arc::new(options),
        }
    }

    /// Options for a database file, created on first connect if missing
    pub fn at_path(path: &Path) -> Self {
        Self::new(
            SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(true),
        )
    }

    /// Open the database at `path` and make sure the schema exists.
    ///
    /// Creates the parent directory when needed.
    pub async fn open(path: &Path) -> Result<Self, DbError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let store = Self::at_path(path);
        store.bootstrap().await?;
        info!(path = %path.display(), "item store ready");
        Ok(store)
    }

    /// Apply the idempotent schema
    pub async fn bootstrap(&self) -> Result<(), DbError> {
        self.scoped(|db| {
            Box::pin(async move {
                let conn = db.acquire().await?;
                sqlx::query(SCHEMA).execute(&mut *conn).await?;
                Ok::<(), DbError>(())
            })
        })
        .await
    }

    /// Start a request scope. No connection is opened until first use.
    pub fn request_scope(&self) -> RequestDb {
        RequestDb::new(self.clone())
    }

    /// Run `work` inside a fresh request scope and release it afterwards,
    /// whatever `work` returned.
    pub async fn scoped<T, F>(&self, work: F) -> T
    where
        F: for<'c> FnOnce(&'c mut RequestDb) -> BoxFuture<'c, T>,
    {
        let mut db = self.request_scope();
        let output = work(&mut db).await;
        db.release().await;
        output
    }

    /// Open a new connection with foreign key enforcement switched on.
    pub(crate) async fn connect(&self) -> Result<SqliteConnection, DbError> {
        let mut conn = SqliteConnection::connect_with(self.options.as_ref())
            .await
            .map_err(DbError::Unavailable)?;

        sqlx::query("PRAGMA foreign_keys = ON")
            .execute(&mut conn)
            .await
            .map_err(DbError::Unavailable)?;

        debug!("opened storage connection");
        Ok(conn)
    }
}
