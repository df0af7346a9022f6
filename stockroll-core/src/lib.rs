//! stockroll-core: the inventory item model and shared configuration
//!
//! Storage and HTTP live in `stockroll-server`; this crate only knows what an
//! item is, how a submitted form becomes an insertable item, and where the
//! registry keeps its database.

pub mod config;
pub mod item;

pub use config::{ServerSection, StockrollConfig};
pub use item::{Item, ItemForm, MinStock, NewItem};
