//! BrickStoreXML document reader.

use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;

use log::{debug, info, warn};
use rayon::prelude::*;
use roxmltree::{Document, Node, ParsingOptions};
use rust_decimal::Decimal;

use super::field_parsers::{
    node_as_decimal, node_as_int, node_as_opt_string, node_as_string, node_exists,
};
use super::locator::Locator;
use crate::codes::{Condition, ItemType, Status, SubCondition};
use crate::config::{ReaderOptions, DEFAULT_DOCTYPE};
use crate::error::{Error, Result, TextPosition};
use crate::models::{Inventory, Item, PriceTier, TieredPrice, DEFAULT_BULK, DEFAULT_SALE};

const UTF8_BOM: char = '\u{feff}';

/// Parses BrickStoreXML documents into [`Inventory`] values.
///
/// Field-level problems never fail a read: missing or malformed values fall back
/// to the field's default. Only unreadable streams and malformed XML are errors.
#[derive(Debug, Clone, Default)]
pub struct BrickStoreReader {
    options: ReaderOptions,
}

impl BrickStoreReader {
    pub fn new(options: ReaderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ReaderOptions {
        &self.options
    }

    /// Reads a whole document from `reader`.
    ///
    /// # Arguments
    /// * `reader` - Any byte source positioned at the start of the document
    ///
    /// # Returns
    /// The decoded inventory, items in document order.
    ///
    /// # Errors
    /// [`Error::Stream`] if the stream cannot be read, [`Error::Parse`] if the
    /// content is not UTF-8 or not well-formed XML.
    pub fn read<R: Read>(&self, mut reader: R) -> Result<Inventory> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).map_err(Error::Stream)?;
        debug!("Read {} bytes from stream", bytes.len());

        let text = decode_utf8(&bytes)?;
        self.read_str(text)
    }

    /// Opens and reads the file at `path`.
    ///
    /// # Arguments
    /// * `path` - Location of a `.bsx` file
    ///
    /// # Returns
    /// The decoded inventory.
    ///
    /// # Errors
    /// [`Error::NotFound`] if no file exists at `path`, otherwise as [`Self::read`].
    pub fn read_path<P: AsRef<Path>>(&self, path: P) -> Result<Inventory> {
        let path = path.as_ref();
        info!("Loading inventory from {}", path.display());

        let file = File::open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => Error::NotFound(path.to_path_buf()),
            _ => Error::Stream(e),
        })?;
        self.read(BufReader::new(file))
    }

    /// Parses a document held in memory.
    ///
    /// # Arguments
    /// * `text` - The whole document, with or without a leading BOM
    ///
    /// # Returns
    /// The decoded inventory, or [`Error::Parse`] with the failing position if
    /// the text is not well-formed XML.
    pub fn read_str(&self, text: &str) -> Result<Inventory> {
        let text = text.strip_prefix(UTF8_BOM).unwrap_or(text);
        let parsing = ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        };
        let doc = Document::parse_with_options(text, parsing)?;
        let root = doc.root_element();

        if root.tag_name().name() != DEFAULT_DOCTYPE {
            warn!(
                "Unexpected root element '{}', expected '{}'",
                root.tag_name().name(),
                DEFAULT_DOCTYPE
            );
        }

        let item_nodes = Locator::parse("./Inventory/Item")?.select_all(root);
        if item_nodes.is_empty() {
            debug!("Document contains no inventory items");
        }

        let items = if self.options.parallel {
            item_nodes
                .par_iter()
                .map(|node| parse_item(*node))
                .collect::<Result<Vec<_>>>()?
        } else {
            item_nodes
                .iter()
                .map(|node| parse_item(*node))
                .collect::<Result<Vec<_>>>()?
        };

        let inventory = Inventory {
            items,
            currency: node_as_opt_string(Some(root), "./Currency")?,
            changelog_id: node_as_int(Some(root), "./BrickLinkChangelogId", None)?,
            comment: leading_comment(&doc),
        };

        info!("Parsed inventory with {} items", inventory.items.len());
        Ok(inventory)
    }
}

fn decode_utf8(bytes: &[u8]) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(|e| {
        let valid = &bytes[..e.valid_up_to()];
        let row = valid.iter().filter(|b| **b == b'\n').count() as u32 + 1;
        let line_start = valid
            .iter()
            .rposition(|b| *b == b'\n')
            .map_or(0, |i| i + 1);
        Error::Parse {
            message: format!("document is not valid UTF-8: {e}"),
            position: Some(TextPosition {
                row,
                col: (valid.len() - line_start) as u32 + 1,
            }),
        }
    })
}

/// The first comment before the root element, if any
fn leading_comment(doc: &Document) -> Option<String> {
    doc.root()
        .children()
        .take_while(|n| !n.is_element())
        .find(|n| n.is_comment())
        .and_then(|n| n.text())
        .map(str::to_string)
}

fn parse_item(node: Node) -> Result<Item> {
    let n = Some(node);

    let item_type = match ItemType::from_code(&node_as_string(n, "./ItemTypeID", "")?) {
        ItemType::Unknown => ItemType::from_display_name(&node_as_string(n, "./ItemTypeName", "")?),
        known => known,
    };

    let item = Item {
        id: node_as_string(n, "./ItemID", "")?,
        item_type,
        color_id: node_as_int(n, "./ColorID", None)?,
        name: node_as_string(n, "./ItemName", "")?,
        color_name: node_as_opt_string(n, "./ColorName")?,
        category_id: node_as_int(n, "./CategoryID", Some(0))?.unwrap_or(0),
        category_name: node_as_string(n, "./CategoryName", "")?,
        status: Status::from_code(&node_as_string(n, "./Status", "")?),
        quantity: node_as_int(n, "./Qty", None)?,
        price: node_as_decimal(n, "./Price", None)?,
        condition: Condition::from_code(&node_as_string(n, "./Condition", "")?),
        sub_condition: SubCondition::from_code(&node_as_string(n, "./SubCondition", "")?),
        comments: non_blank(node_as_opt_string(n, "./Comments")?),
        remarks: non_blank(node_as_opt_string(n, "./Remarks")?),
        lot_id: node_as_int(n, "./LotID", None)?,
        owl_id: node_as_string(n, "./OwlID", "")?,
        owl_lot_id: node_as_int(n, "./OwlLotID", None)?,
        stockroom: non_blank(node_as_opt_string(n, "./Stockroom")?),
        retain: node_exists(n, "./Retain")?,
        bulk: node_as_int(n, "./Bulk", Some(DEFAULT_BULK))?.unwrap_or(DEFAULT_BULK),
        sale: node_as_int(n, "./Sale", Some(DEFAULT_SALE))?.unwrap_or(DEFAULT_SALE),
        tiered_price: parse_tiered_price(node)?,
    };

    debug!("Parsed item {} ({:?})", item.id, item.item_type);
    Ok(item)
}

fn parse_tiered_price(node: Node) -> Result<Option<TieredPrice>> {
    let n = Some(node);
    let mut tiers = [PriceTier::default(); 3];
    for (i, tier) in tiers.iter_mut().enumerate() {
        let quantity = node_as_int(n, &format!("./TQ{}", i + 1), Some(0))?.unwrap_or(0);
        let price = node_as_decimal(n, &format!("./TP{}", i + 1), Some(Decimal::ZERO))?
            .unwrap_or(Decimal::ZERO);
        *tier = PriceTier::new(quantity, price);
    }

    let tiered = TieredPrice::new(tiers);
    Ok((!tiered.is_empty()).then_some(tiered))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
#[path = "reader_tests.rs"]
mod tests;
