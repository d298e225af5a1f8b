//! BrickStoreXML - inventory file codec
//!
//! Reads and writes the XML inventory format exchanged between BrickStore and
//! the BrickLink / Brick Owl marketplaces.

pub mod codec;
pub mod codes;
pub mod config;
pub mod error;
pub mod models;

// Re-export commonly used items
pub use codec::{BrickStoreReader, BrickStoreWriter, Locator};
pub use codes::{Condition, ItemType, Status, SubCondition};
pub use config::{ReaderOptions, WriterOptions};
pub use error::{Error, LocatorError, Result, TextPosition};
pub use models::{Inventory, Item, PriceTier, TieredPrice};
