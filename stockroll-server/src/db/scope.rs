//! Request-scoped connection
//!
//! A [`RequestDb`] moves through `Uninitialized -> Connected -> Closed` exactly
//! once. The connection is opened by the first [`RequestDb::acquire`], reused
//! by every later call and closed by [`RequestDb::release`]. A closed scope
//! cannot be reopened.

use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments, SqliteConnection, SqliteRow};
use sqlx::{Connection, Row, Transaction};
use tracing::{debug, warn};

use stockroll_core::MinStock;

use super::error::DbError;
use super::store::Store;

/// Observable lifecycle of a request scope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeState {
    Uninitialized,
    Connected,
    Closed,
}

enum Slot {
    Uninitialized,
    Connected(SqliteConnection),
    Closed,
}

/// A value bound to a `?` placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlParam {
    Int(i64),
    Text(String),
}

impl From<&str> for SqlParam {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<&MinStock> for SqlParam {
    fn from(value: &MinStock) -> Self {
        match value {
            MinStock::Count(count) => Self::Int(*count),
            MinStock::Raw(raw) => Self::Text(raw.clone()),
        }
    }
}

/// How many rows [`RequestDb::execute`] hands back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fetch {
    All,
    One,
}

/// Rows returned by [`RequestDb::execute`], addressable by column name
pub enum Rows {
    All(Vec<SqliteRow>),
    One(Option<SqliteRow>),
}

impl Rows {
    pub fn into_vec(self) -> Vec<SqliteRow> {
        match self {
            Self::All(rows) => rows,
            Self::One(row) => row.into_iter().collect(),
        }
    }

    pub fn into_first(self) -> Option<SqliteRow> {
        match self {
            Self::All(rows) => rows.into_iter().next(),
            Self::One(row) => row,
        }
    }
}

/// Build a query with `params` bound in order.
pub(crate) fn bind_all<'q>(
    sql: &'q str,
    params: &'q [SqlParam],
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    params.iter().fold(sqlx::query(sql), |query, param| match param {
        SqlParam::Int(value) => query.bind(*value),
        SqlParam::Text(value) => query.bind(value.as_str()),
    })
}

/// Connection manager for a single request
pub struct RequestDb {
    store: Store,
    slot: Slot,
}

impl RequestDb {
    pub(crate) fn new(store: Store) -> Self {
        Self {
            store,
            slot: Slot::Uninitialized,
        }
    }

    pub fn state(&self) -> ScopeState {
        match self.slot {
            Slot::Uninitialized => ScopeState::Uninitialized,
            Slot::Connected(_) => ScopeState::Connected,
            Slot::Closed => ScopeState::Closed,
        }
    }

    /// Return this request's connection, opening it on first use.
    ///
    /// # Errors
    ///
    /// `DbError::Unavailable` when the store cannot be opened, and
    /// `DbError::ScopeClosed` once the scope has been released.
    pub async fn acquire(&mut self) -> Result<&mut SqliteConnection, DbError> {
        if let Slot::Uninitialized = self.slot {
            let conn = self.store.connect().await?;
            self.slot = Slot::Connected(conn);
        }

        match &mut self.slot {
            Slot::Connected(conn) => Ok(conn),
            Slot::Uninitialized | Slot::Closed => Err(DbError::ScopeClosed),
        }
    }

    /// Run `sql` with bound `params` and fetch its rows. Does not commit.
    pub async fn execute(
        &mut self,
        sql: &str,
        params: &[SqlParam],
        fetch: Fetch,
    ) -> Result<Rows, DbError> {
        let conn = self.acquire().await?;
        let rows = bind_all(sql, params).fetch_all(&mut *conn).await?;

        Ok(match fetch {
            Fetch::All => Rows::All(rows),
            Fetch::One => Rows::One(rows.into_iter().next()),
        })
    }

    /// Begin a transaction on this request's connection.
    ///
    /// Dropping the transaction without committing rolls it back.
    pub async fn begin(&mut self) -> Result<Transaction<'_, Sqlite>, DbError> {
        let conn = self.acquire().await?;
        Ok(conn.begin().await?)
    }

    /// Ask the connection whether foreign key enforcement is on
    pub async fn foreign_keys_enabled(&mut self) -> Result<bool, DbError> {
        let row = self
            .execute("PRAGMA foreign_keys", &[], Fetch::One)
            .await?
            .into_first();

        match row {
            Some(row) => Ok(row.try_get::<i64, _>(0)? == 1),
            None => Ok(false),
        }
    }

    /// Close the connection if one was opened. The scope is closed afterwards
    /// either way.
    pub async fn release(&mut self) {
        match std::mem::replace(&mut self.slot, Slot::Closed) {
            Slot::Connected(conn) => match conn.close().await {
                Ok(()) => debug!("closed storage connection"),
                Err(e) => warn!(error = %e, "failed to close storage connection cleanly"),
            },
            Slot::Uninitialized | Slot::Closed => {}
        }
    }
}
