//! Wire code translation for the enumerated item fields.
//!
//! Each enum decodes from its short wire code (case-insensitive, total: unknown
//! codes become the `Unknown` member) and encodes back to it. The `Unknown`
//! member encodes to an empty string, which tells the writer to leave the
//! element out or empty.

use serde::{Deserialize, Serialize};

/// The catalog type of an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ItemType {
    Book,
    Catalog,
    Gear,
    Instruction,
    Minifigure,
    OriginalBox,
    Part,
    Set,
    #[default]
    Unknown,
}

impl ItemType {
    /// Returns the single-letter wire code (e.g., "M"), empty for `Unknown`
    pub fn code(&self) -> &'static str {
        match self {
            ItemType::Book => "B",
            ItemType::Catalog => "C",
            ItemType::Gear => "G",
            ItemType::Instruction => "I",
            ItemType::Minifigure => "M",
            ItemType::OriginalBox => "O",
            ItemType::Part => "P",
            ItemType::Set => "S",
            ItemType::Unknown => "",
        }
    }

    /// Returns the display name written to `ItemTypeName` (e.g., "Minifig")
    pub fn display_name(&self) -> &'static str {
        match self {
            ItemType::Book => "Book",
            ItemType::Catalog => "Catalog",
            ItemType::Gear => "Gear",
            ItemType::Instruction => "Instruction",
            ItemType::Minifigure => "Minifig",
            ItemType::OriginalBox => "OriginalBox",
            ItemType::Part => "Part",
            ItemType::Set => "Set",
            ItemType::Unknown => "",
        }
    }

    pub fn from_code(code: &str) -> Self {
        match code.trim().to_uppercase().as_str() {
            "B" => ItemType::Book,
            "C" => ItemType::Catalog,
            "G" => ItemType::Gear,
            "I" => ItemType::Instruction,
            "M" => ItemType::Minifigure,
            "O" => ItemType::OriginalBox,
            "P" => ItemType::Part,
            "S" => ItemType::Set,
            _ => ItemType::Unknown,
        }
    }

    /// Parse a display name (e.g., "Minifig", "Original Box") into an ItemType
    pub fn from_display_name(name: &str) -> Self {
        let normalized: String = name
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "book" => ItemType::Book,
            "catalog" => ItemType::Catalog,
            "gear" => ItemType::Gear,
            "instruction" => ItemType::Instruction,
            "minifig" | "minifigure" => ItemType::Minifigure,
            "originalbox" => ItemType::OriginalBox,
            "part" => ItemType::Part,
            "set" => ItemType::Set,
            _ => ItemType::Unknown,
        }
    }

    /// Returns all known item types, `Unknown` excluded
    pub fn all() -> &'static [ItemType] {
        &[
            ItemType::Book,
            ItemType::Catalog,
            ItemType::Gear,
            ItemType::Instruction,
            ItemType::Minifigure,
            ItemType::OriginalBox,
            ItemType::Part,
            ItemType::Set,
        ]
    }
}

/// Whether a lot counts toward stock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Status {
    #[default]
    Unknown,
    Include,
    Exclude,
    Extra,
}

impl Status {
    pub fn code(&self) -> &'static str {
        match self {
            Status::Include => "I",
            Status::Exclude => "X",
            Status::Extra => "E",
            Status::Unknown => "",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Status::Include => "Include",
            Status::Exclude => "Exclude",
            Status::Extra => "Extra",
            Status::Unknown => "Unknown",
        }
    }

    /// Accepts the short code or the long name, both case-insensitive.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_lowercase().as_str() {
            "i" | "include" => Status::Include,
            "x" | "exclude" => Status::Exclude,
            "e" | "extra" => Status::Extra,
            _ => Status::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Condition {
    #[default]
    Unknown,
    New,
    Used,
}

impl Condition {
    pub fn code(&self) -> &'static str {
        match self {
            Condition::New => "N",
            Condition::Used => "U",
            Condition::Unknown => "",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Condition::New => "New",
            Condition::Used => "Used",
            Condition::Unknown => "Unknown",
        }
    }

    pub fn from_code(code: &str) -> Self {
        match code.trim().to_uppercase().as_str() {
            "N" => Condition::New,
            "U" => Condition::Used,
            _ => Condition::Unknown,
        }
    }
}

/// Completeness of a set, only meaningful for sets and similar items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SubCondition {
    #[default]
    Unknown,
    Complete,
    Incomplete,
    Sealed,
}

impl SubCondition {
    pub fn code(&self) -> &'static str {
        match self {
            SubCondition::Complete => "C",
            SubCondition::Incomplete => "I",
            SubCondition::Sealed => "M",
            SubCondition::Unknown => "",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SubCondition::Complete => "Complete",
            SubCondition::Incomplete => "Incomplete",
            SubCondition::Sealed => "Sealed",
            SubCondition::Unknown => "Unknown",
        }
    }

    pub fn from_code(code: &str) -> Self {
        match code.trim().to_uppercase().as_str() {
            "C" => SubCondition::Complete,
            "I" => SubCondition::Incomplete,
            "M" => SubCondition::Sealed,
            _ => SubCondition::Unknown,
        }
    }
}

#[cfg(test)]
#[path = "codes_tests.rs"]
mod tests;
