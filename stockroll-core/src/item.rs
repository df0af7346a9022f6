//! Inventory item records and the submission that creates them

use serde::{Deserialize, Serialize};

/// A stored inventory item.
///
/// `id` is assigned by storage on insert and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub item_name: String,
    pub unit: String,
    pub min_stock: i64,
}

/// Raw fields of the item registration form.
///
/// `item_name` and `unit` must be present; their contents are not checked here.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemForm {
    pub item_name: String,
    pub unit: String,
    #[serde(default)]
    pub min_stock: Option<String>,
}

/// Reorder threshold as submitted.
///
/// Numeric input becomes `Count`. Anything else is carried through as `Raw` and
/// left for the storage constraints to accept or reject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MinStock {
    Count(i64),
    Raw(String),
}

impl MinStock {
    /// Interpret an optional form value. Missing or blank input means 0.
    pub fn from_input(input: Option<&str>) -> Self {
        match input.map(str::trim) {
            None | Some("") => Self::Count(0),
            Some(value) => value
                .parse()
                .map(Self::Count)
                .unwrap_or_else(|_| Self::Raw(value.to_string())),
        }
    }
}

impl Default for MinStock {
    fn default() -> Self {
        Self::Count(0)
    }
}

/// An item ready to be inserted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub item_name: String,
    pub unit: String,
    pub min_stock: MinStock,
}

impl NewItem {
    pub fn new(item_name: impl Into<String>, unit: impl Into<String>, min_stock: Option<i64>) -> Self {
        Self {
            item_name: item_name.into(),
            unit: unit.into(),
            min_stock: min_stock.map(MinStock::Count).unwrap_or_default(),
        }
    }
}

impl From<ItemForm> for NewItem {
    fn from(form: ItemForm) -> Self {
        let min_stock = MinStock::from_input(form.min_stock.as_deref());
        Self {
            item_name: form.item_name,
            unit: form.unit,
            min_stock,
        }
    }
}
