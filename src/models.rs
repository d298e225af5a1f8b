use std::io::{Read, Seek, Write};
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::codec::{BrickStoreReader, BrickStoreWriter};
use crate::codes::{Condition, ItemType, Status, SubCondition};
use crate::error::Result;

pub const DEFAULT_BULK: i32 = 1;
pub const DEFAULT_SALE: i32 = 0;

/// A BrickStore inventory document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    pub items: Vec<Item>,
    pub currency: Option<String>,
    /// BrickLink catalog revision the inventory was generated against
    pub changelog_id: Option<i32>,
    /// Free-text annotation written as a leading XML comment
    pub comment: Option<String>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads an inventory from a file with default reader options
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        BrickStoreReader::default().read_path(path)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        BrickStoreReader::default().read(reader)
    }

    /// Saves the inventory to a file, replacing any existing content
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        BrickStoreWriter::default().write_path(self, path)
    }

    /// Writes the inventory to a seekable stream, leaving its position unchanged
    pub fn write_to<W: Write + Seek>(&self, writer: &mut W) -> Result<()> {
        BrickStoreWriter::default().write(self, writer)
    }
}

/// One inventory lot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Item's identification number
    pub id: String,
    pub item_type: ItemType,
    pub color_id: Option<i32>,
    pub name: String,
    pub color_name: Option<String>,
    pub category_id: i32,
    pub category_name: String,
    pub status: Status,
    pub quantity: Option<i32>,
    /// Price per sale unit
    pub price: Option<Decimal>,
    pub condition: Condition,
    pub sub_condition: SubCondition,
    /// Public description, visible to every customer
    pub comments: Option<String>,
    /// Private note, visible only to the owner
    pub remarks: Option<String>,
    /// BrickLink lot id
    pub lot_id: Option<i32>,
    /// Item id at Brick Owl
    pub owl_id: String,
    /// Lot id at Brick Owl
    pub owl_lot_id: Option<i32>,
    pub stockroom: Option<String>,
    /// Keep the lot in stock after it sells out
    pub retain: bool,
    /// Buyers can only buy multiples of this amount
    pub bulk: i32,
    /// Sale discount in percent (20% => 20)
    pub sale: i32,
    pub tiered_price: Option<TieredPrice>,
}

impl Default for Item {
    fn default() -> Self {
        Self {
            id: String::new(),
            item_type: ItemType::Unknown,
            color_id: None,
            name: String::new(),
            color_name: None,
            category_id: 0,
            category_name: String::new(),
            status: Status::Unknown,
            quantity: None,
            price: None,
            condition: Condition::Unknown,
            sub_condition: SubCondition::Unknown,
            comments: None,
            remarks: None,
            lot_id: None,
            owl_id: String::new(),
            owl_lot_id: None,
            stockroom: None,
            retain: false,
            bulk: DEFAULT_BULK,
            sale: DEFAULT_SALE,
            tiered_price: None,
        }
    }
}

impl Item {
    pub fn new(id: impl Into<String>, item_type: ItemType) -> Self {
        Self {
            id: id.into(),
            item_type,
            ..Self::default()
        }
    }
}

/// One volume discount: from `quantity` units on, each unit costs `price`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceTier {
    pub quantity: i32,
    pub price: Decimal,
}

impl PriceTier {
    pub fn new(quantity: i32, price: Decimal) -> Self {
        Self { quantity, price }
    }

    /// A tier with zero quantity is not written
    pub fn is_set(&self) -> bool {
        self.quantity != 0
    }
}

/// Up to three volume discount tiers, always kept in tier order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TieredPrice {
    pub tiers: [PriceTier; 3],
}

impl TieredPrice {
    pub fn new(tiers: [PriceTier; 3]) -> Self {
        Self { tiers }
    }

    /// Returns true if no tier would be written
    pub fn is_empty(&self) -> bool {
        !self.tiers.iter().any(PriceTier::is_set)
    }
}
