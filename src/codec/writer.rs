//! BrickStoreXML document writer.

use std::fs::File;
use std::io::{BufWriter, Seek, SeekFrom, Write};
use std::path::Path;

use log::{debug, info, warn};
use quick_xml::escape::escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use rust_decimal::Decimal;

use super::is_xml_name;
use crate::config::WriterOptions;
use crate::error::{Error, Result};
use crate::models::{Inventory, Item, TieredPrice};

/// Fractional digits of every monetary value on the wire
const PRICE_SCALE: u32 = 4;

/// Serializes [`Inventory`] values as BrickStoreXML.
#[derive(Debug, Clone, Default)]
pub struct BrickStoreWriter {
    options: WriterOptions,
}

impl BrickStoreWriter {
    pub fn new(options: WriterOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &WriterOptions {
        &self.options
    }

    /// Writes `inventory` at the stream's current position, then moves the
    /// cursor back to that position.
    ///
    /// The document is rendered in memory first, so nothing reaches the stream
    /// unless rendering succeeded and the stream reported its position.
    ///
    /// # Errors
    /// [`Error::InvalidDoctype`] if the configured doctype is not an element
    /// name. [`Error::Stream`] if the stream cannot report or restore its
    /// position, or rejects the write.
    pub fn write<W: Write + Seek>(&self, inventory: &Inventory, stream: &mut W) -> Result<()> {
        let start = stream.stream_position().map_err(Error::Stream)?;
        let document = self.render(inventory)?;

        stream.write_all(&document).map_err(Error::Stream)?;
        stream.flush().map_err(Error::Stream)?;
        stream.seek(SeekFrom::Start(start)).map_err(Error::Stream)?;

        info!(
            "Wrote inventory with {} items ({} bytes)",
            inventory.items.len(),
            document.len()
        );
        Ok(())
    }

    /// Creates (or truncates) the file at `path` and writes `inventory` to it.
    pub fn write_path<P: AsRef<Path>>(&self, inventory: &Inventory, path: P) -> Result<()> {
        let path = path.as_ref();
        info!("Saving inventory to {}", path.display());

        let mut file = BufWriter::new(File::create(path)?);
        self.write(inventory, &mut file)
    }

    /// Renders `inventory` to a string.
    pub fn to_string(&self, inventory: &Inventory) -> Result<String> {
        let bytes = self.render(inventory)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn render(&self, inventory: &Inventory) -> Result<Vec<u8>> {
        let root = self.options.doctype.as_str();
        if !is_xml_name(root) {
            return Err(Error::InvalidDoctype(root.to_string()));
        }

        let mut xml = if self.options.indent > 0 {
            Writer::new_with_indent(Vec::new(), b' ', self.options.indent)
        } else {
            Writer::new(Vec::new())
        };

        xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        if let Some(comment) = inventory.comment.as_deref() {
            if !comment.trim().is_empty() {
                let comment = sanitize_comment(comment);
                xml.write_event(Event::Comment(BytesText::from_escaped(comment)))?;
            }
        }
        xml.write_event(Event::DocType(BytesText::from_escaped(root)))?;

        xml.write_event(Event::Start(BytesStart::new(root)))?;
        xml.write_event(Event::Start(BytesStart::new("Inventory")))?;
        for item in &inventory.items {
            write_item(&mut xml, item)?;
        }
        xml.write_event(Event::End(BytesEnd::new("Inventory")))?;

        if let Some(currency) = inventory.currency.as_deref() {
            text_element(&mut xml, "Currency", currency)?;
        }
        if let Some(changelog_id) = inventory.changelog_id {
            text_element(&mut xml, "BrickLinkChangelogId", &changelog_id.to_string())?;
        }
        xml.write_event(Event::End(BytesEnd::new(root)))?;

        let mut document = xml.into_inner();
        document.push(b'\n');
        Ok(document)
    }
}

fn write_item<W: Write>(xml: &mut Writer<W>, item: &Item) -> Result<()> {
    debug!("Writing item {} ({:?})", item.id, item.item_type);
    xml.write_event(Event::Start(BytesStart::new("Item")))?;

    text_element(xml, "ItemID", &item.id)?;
    text_element(xml, "ItemTypeID", item.item_type.code())?;
    if let Some(color_id) = item.color_id {
        text_element(xml, "ColorID", &color_id.to_string())?;
    }
    text_element(xml, "ItemName", &item.name)?;
    text_element(xml, "ItemTypeName", item.item_type.display_name())?;
    text_element(xml, "ColorName", item.color_name.as_deref().unwrap_or_default())?;
    text_element(xml, "CategoryID", &item.category_id.to_string())?;
    text_element(xml, "CategoryName", &item.category_name)?;

    optional_element(xml, "Status", item.status.code())?;
    if let Some(quantity) = item.quantity {
        text_element(xml, "Qty", &quantity.to_string())?;
    }
    if let Some(price) = item.price {
        text_element(xml, "Price", &format_price(price))?;
    }

    text_element(xml, "Condition", item.condition.code())?;
    text_element(xml, "Bulk", &item.bulk.to_string())?;
    text_element(xml, "Sale", &item.sale.to_string())?;

    optional_element(xml, "Comments", item.comments.as_deref().unwrap_or_default())?;
    optional_element(xml, "Remarks", item.remarks.as_deref().unwrap_or_default())?;
    if item.retain {
        xml.write_event(Event::Empty(BytesStart::new("Retain")))?;
    }

    text_element(xml, "LotID", &optional_int(item.lot_id))?;
    text_element(xml, "OwlID", &item.owl_id)?;
    text_element(xml, "OwlLotID", &optional_int(item.owl_lot_id))?;

    if let Some(tiered) = &item.tiered_price {
        write_tiers(xml, tiered)?;
    }

    optional_element(xml, "SubCondition", item.sub_condition.code())?;
    optional_element(xml, "Stockroom", item.stockroom.as_deref().unwrap_or_default())?;

    xml.write_event(Event::End(BytesEnd::new("Item")))?;
    Ok(())
}

/// Tiers go out in order 1, 2, 3; a tier with zero quantity is skipped.
fn write_tiers<W: Write>(xml: &mut Writer<W>, tiered: &TieredPrice) -> Result<()> {
    for (i, tier) in tiered.tiers.iter().enumerate() {
        if !tier.is_set() {
            continue;
        }
        text_element(xml, &format!("TQ{}", i + 1), &tier.quantity.to_string())?;
        text_element(xml, &format!("TP{}", i + 1), &format_price(tier.price))?;
    }
    Ok(())
}

fn text_element<W: Write>(xml: &mut Writer<W>, name: &str, text: &str) -> Result<()> {
    xml.write_event(Event::Start(BytesStart::new(name)))?;
    // A literal CR would come back as LF after end-of-line normalization
    let escaped = escape(text).replace('\r', "&#13;");
    xml.write_event(Event::Text(BytesText::from_escaped(escaped)))?;
    xml.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// Writes the element only if `text` is not blank
fn optional_element<W: Write>(xml: &mut Writer<W>, name: &str, text: &str) -> Result<()> {
    if text.trim().is_empty() {
        return Ok(());
    }
    text_element(xml, name, text)
}

fn optional_int(value: Option<i32>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Formats a price with exactly four fractional digits and a `.` separator.
///
/// A 96-bit decimal holds 28 significant digits, so values with more than 24
/// integer digits keep fewer fractional digits than four.
pub fn format_price(price: Decimal) -> String {
    let mut scaled = price;
    scaled.rescale(PRICE_SCALE);
    if scaled.scale() != PRICE_SCALE {
        warn!("Price {price} is too large for {PRICE_SCALE} fractional digits");
    }
    scaled.to_string()
}

/// XML comments may not contain `--` or end with `-`.
fn sanitize_comment(comment: &str) -> String {
    let mut sanitized = comment.to_string();
    while sanitized.contains("--") {
        sanitized = sanitized.replace("--", "- -");
    }
    if sanitized.ends_with('-') {
        sanitized.push(' ');
    }
    sanitized
}

#[cfg(test)]
#[path = "writer_tests.rs"]
mod tests;
