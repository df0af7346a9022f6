//! Item registry workflow - list and create
//!
//! Reads propagate storage errors. Writes never do: a failed insert is logged,
//! rolled back and turned into [`CreateOutcome::Rejected`] carrying the
//! current collection, so the caller can show the list again with a message.

use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use tracing::{error, info};

use stockroll_core::{Item, NewItem};

use crate::db::{scope::bind_all, DbError, Fetch, RequestDb, SqlParam};

/// Message shown to the submitter when an insert fails
pub const REGISTRATION_FAILED: &str = "item registration failed";

const LIST_ITEMS: &str = "SELECT * FROM items";
const INSERT_ITEM: &str = "INSERT INTO items (item_name, unit, min_stock) VALUES (?, ?, ?)";
const ITEM_BY_ID: &str = "SELECT * FROM items WHERE id = ?";

/// Result of a create attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    /// Inserted and committed
    Created(Item),
    /// Nothing was committed; `items` is the collection as it stands
    Rejected {
        message: &'static str,
        items: Vec<Item>,
    },
}

/// Map a named-column row onto an [`Item`]
pub fn item_from_row(row: &SqliteRow) -> Result<Item, sqlx::Error> {
    Ok(Item {
        id: row.try_get("id")?,
        item_name: row.try_get("item_name")?,
        unit: row.try_get("unit")?,
        min_stock: row.try_get("min_stock")?,
    })
}

/// Every stored item in storage order.
pub async fn list_items(db: &mut RequestDb) -> Result<Vec<Item>, DbError> {
    let rows = db.execute(LIST_ITEMS, &[], Fetch::All).await?.into_vec();

    Ok(rows
        .iter()
        .map(item_from_row)
        .collect::<Result<Vec<_>, _>>()?)
}

/// Insert `item` and commit, or contain the failure.
///
/// # Errors
///
/// Only when re-reading the collection after a failed insert fails too.
pub async fn create_item(db: &mut RequestDb, item: NewItem) -> Result<CreateOutcome, DbError> {
    match insert_item(db, &item).await {
        Ok(created) => {
            info!(id = created.id, item_name = %created.item_name, "item registered");
            Ok(CreateOutcome::Created(created))
        }
        Err(e) => {
            error!(error = %e, item_name = %item.item_name, "item registration failed");
            let items = list_items(db).await?;
            Ok(CreateOutcome::Rejected {
                message: REGISTRATION_FAILED,
                items,
            })
        }
    }
}

async fn insert_item(db: &mut RequestDb, item: &NewItem) -> Result<Item, DbError> {
    let params = [
        SqlParam::from(item.item_name.as_str()),
        SqlParam::from(item.unit.as_str()),
        SqlParam::from(&item.min_stock),
    ];

    let mut tx = db.begin().await?;
    let id = bind_all(INSERT_ITEM, &params)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

    let row = sqlx::query(ITEM_BY_ID).bind(id).fetch_one(&mut *tx).await?;
    let created = item_from_row(&row)?;

    tx.commit().await?;
    Ok(created)
}
