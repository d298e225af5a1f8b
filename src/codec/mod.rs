//! BrickStoreXML reading and writing.
//!
//! # Module Structure
//!
//! - [`locator`] - Path expressions selecting elements below a node
//! - [`field_parsers`] - Typed field extraction with caller-supplied defaults
//! - [`reader`] - Document to [`Inventory`](crate::Inventory) parsing
//! - [`writer`] - [`Inventory`](crate::Inventory) to document serialization
//!
//! # Example
//!
//! ```no_run
//! use brickstore_xml::{BrickStoreReader, BrickStoreWriter, ReaderOptions, WriterOptions};
//!
//! fn main() -> brickstore_xml::Result<()> {
//!     let reader = BrickStoreReader::new(ReaderOptions::default());
//!     let mut inventory = reader.read_path("store.bsx")?;
//!
//!     for item in &mut inventory.items {
//!         item.sale = 10;
//!     }
//!
//!     BrickStoreWriter::new(WriterOptions::default()).write_path(&inventory, "store.bsx")?;
//!     Ok(())
//! }
//! ```

pub mod field_parsers;
pub mod locator;
pub mod reader;
pub mod writer;

pub use locator::Locator;
pub use reader::BrickStoreReader;
pub use writer::{format_price, BrickStoreWriter};

/// True if `s` can be used as an element name: a letter or `_` followed by
/// letters, digits, `_`, `-`, `.` or `:`.
pub(crate) fn is_xml_name(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ':'))
}
