//! Typed field extraction from parsed XML nodes.
//!
//! Every accessor takes the node (possibly absent), a locator expression and a
//! caller-supplied default. Absent nodes, missing or empty values and values that
//! do not parse as the requested type all yield the default. Only a malformed
//! locator expression is an error.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use log::{debug, warn};
use roxmltree::Node;
use rust_decimal::Decimal;

use super::locator::Locator;
use crate::error::Result;

/// Formats tried after RFC 3339 / RFC 2822, in order.
const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
const OFFSET_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";
const COMPACT_DATE_FORMAT: &str = "%Y%m%d";
const PLAIN_DATE_FORMAT: &str = "%Y-%m-%d";

/// Returns the concatenated text of an element and its descendants
pub fn inner_text(node: Node) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}

/// Reads an attribute value, or `default` if the node or attribute is missing.
///
/// # Arguments
/// * `node` - The element carrying the attribute, if any
/// * `name` - Attribute name, without namespace prefix
/// * `default` - Returned when there is nothing to read
///
/// # Returns
/// The attribute value as an owned string.
pub fn attribute_text(node: Option<Node>, name: &str, default: &str) -> String {
    node.and_then(|n| n.attribute(name))
        .unwrap_or(default)
        .to_string()
}

/// Returns true if the locator matches at least one element.
///
/// # Arguments
/// * `node` - Context node; `None` never matches
/// * `path` - Locator expression such as `./Retain`
///
/// # Returns
/// Whether a match exists, or [`Error::InvalidLocator`](crate::Error::InvalidLocator)
/// for a malformed `path`.
pub fn node_exists(node: Option<Node>, path: &str) -> Result<bool> {
    let Some(node) = node else {
        return Ok(false);
    };
    let locator = Locator::parse(path)?;
    Ok(locator.select_first(node).is_some())
}

/// Reads the text of the first match, or `default` if missing or empty.
///
/// # Arguments
/// * `node` - Context node; `None` yields `default`
/// * `path` - Locator expression such as `./ItemName`
/// * `default` - Returned when nothing matches or the text is empty
///
/// # Returns
/// The element text, untrimmed.
pub fn node_as_string(node: Option<Node>, path: &str, default: &str) -> Result<String> {
    Ok(matched_text(node, path)?.unwrap_or_else(|| default.to_string()))
}

/// Like [`node_as_string`], with `None` as the default.
///
/// # Arguments
/// * `node` - Context node; `None` yields `None`
/// * `path` - Locator expression such as `./Remarks`
///
/// # Returns
/// `Some(text)` for a non-empty match, `None` otherwise.
pub fn node_as_opt_string(node: Option<Node>, path: &str) -> Result<Option<String>> {
    matched_text(node, path)
}

/// Reads the text of every match in document order.
///
/// # Arguments
/// * `node` - Context node; `None` yields an empty list
/// * `path` - Locator expression such as `./Inventory/Item/ItemID`
///
/// # Returns
/// One string per matched element, empty ones included.
pub fn nodes_as_strings(node: Option<Node>, path: &str) -> Result<Vec<String>> {
    let Some(node) = node else {
        return Ok(Vec::new());
    };
    let locator = Locator::parse(path)?;
    Ok(locator.select_all(node).into_iter().map(inner_text).collect())
}

/// Reads a 32-bit integer.
///
/// # Arguments
/// * `node` - Context node; `None` yields `default`
/// * `path` - Locator expression such as `./Qty`
/// * `default` - Returned for missing, empty or non-numeric text
///
/// # Returns
/// The parsed value or `default`.
pub fn node_as_int(node: Option<Node>, path: &str, default: Option<i32>) -> Result<Option<i32>> {
    coerce(node, path, default, "integer", parse_int)
}

/// Reads a decimal written with `.` as the separator.
///
/// # Arguments
/// * `node` - Context node; `None` yields `default`
/// * `path` - Locator expression such as `./Price`
/// * `default` - Returned for missing, empty or malformed text
///
/// # Returns
/// The parsed value or `default`. See [`parse_decimal`] for accepted forms.
pub fn node_as_decimal(
    node: Option<Node>,
    path: &str,
    default: Option<Decimal>,
) -> Result<Option<Decimal>> {
    coerce(node, path, default, "decimal", parse_decimal)
}

/// Reads a date/time.
///
/// # Arguments
/// * `node` - Context node; `None` yields `default`
/// * `path` - Locator expression such as `./DateAdded`
/// * `default` - Returned when no supported pattern matches
///
/// # Returns
/// The parsed value or `default`. See [`parse_datetime`] for the patterns.
pub fn node_as_datetime(
    node: Option<Node>,
    path: &str,
    default: Option<NaiveDateTime>,
) -> Result<Option<NaiveDateTime>> {
    coerce(node, path, default, "date/time", parse_datetime)
}

/// Reads a boolean. Only "true" (any case) and "1" are recognized; anything
/// else, "false" included, yields `default`.
///
/// # Arguments
/// * `node` - Context node; `None` yields `default`
/// * `path` - Locator expression
/// * `default` - Returned for anything that is not a recognized true value
///
/// # Returns
/// `true` for a recognized value, `default` otherwise.
pub fn node_as_bool(node: Option<Node>, path: &str, default: bool) -> Result<bool> {
    Ok(coerce(node, path, Some(default), "boolean", parse_bool)?.unwrap_or(default))
}

fn matched_text(node: Option<Node>, path: &str) -> Result<Option<String>> {
    let Some(node) = node else {
        return Ok(None);
    };
    let locator = Locator::parse(path)?;
    let text = locator.select_first(node).map(inner_text);
    Ok(text.filter(|t| !t.is_empty()))
}

fn coerce<T, F>(
    node: Option<Node>,
    path: &str,
    default: Option<T>,
    kind: &str,
    parse: F,
) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<T>,
{
    let Some(text) = matched_text(node, path)? else {
        return Ok(default);
    };
    match parse(&text) {
        Some(value) => Ok(Some(value)),
        None => {
            warn!("Value '{text}' at '{path}' is not a valid {kind}, using default");
            Ok(default)
        }
    }
}

/// Parses a 32-bit integer, ignoring surrounding whitespace.
///
/// # Arguments
/// * `text` - A string like "250" or " -3 "
///
/// # Returns
/// The value, or `None` if the text is not an `i32`.
pub fn parse_int(text: &str) -> Option<i32> {
    text.trim().parse::<i32>().ok()
}

/// Parses a decimal with `.` as the separator, independent of locale.
///
/// Plain notation ("12.5", "-3") and scientific notation ("1.25e1") are
/// accepted; grouping separators are not.
///
/// # Arguments
/// * `text` - A string like "0.0900" or "1.25e1"
///
/// # Returns
/// The value, or `None` for empty text, grouped digits ("1,000.5",
/// "1_000.5") or anything else that is not a number.
pub fn parse_decimal(text: &str) -> Option<Decimal> {
    let trimmed = text.trim();
    if trimmed.is_empty() || !trimmed.chars().all(is_decimal_char) {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

/// Parses a date/time.
///
/// Tries RFC 3339, RFC 2822 and ISO-like naive timestamps first, then the
/// offset-aware `yyyy-MM-ddTHH:mm:sszzz`, compact `yyyyMMdd` and plain
/// `yyyy-MM-dd` patterns. Offset-aware values are converted to UTC; dates
/// without a time resolve to midnight.
///
/// # Arguments
/// * `text` - A string like "2024-03-01T10:15:00+01:00" or "20240301"
///
/// # Returns
/// The timestamp, or `None` if no pattern matched.
pub fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(trimmed) {
        return Some(dt.naive_utc());
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(dt);
        }
    }

    if let Ok(dt) = DateTime::parse_from_str(trimmed, OFFSET_DATETIME_FORMAT) {
        return Some(dt.naive_utc());
    }
    [COMPACT_DATE_FORMAT, PLAIN_DATE_FORMAT]
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .or_else(|| {
            debug!("No date/time pattern matched '{trimmed}'");
            None
        })
}

/// Recognizes "true" (any case) and "1". Everything else is `None`.
///
/// # Arguments
/// * `text` - A string like "True" or "1"
///
/// # Returns
/// `Some(true)` for a recognized value, `None` otherwise.
pub fn parse_bool(text: &str) -> Option<bool> {
    let trimmed = text.trim();
    if trimmed.eq_ignore_ascii_case("true") || trimmed == "1" {
        Some(true)
    } else {
        None
    }
}

// rust_decimal also takes `_` as a digit separator
fn is_decimal_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E')
}

#[cfg(test)]
#[path = "field_parsers_tests.rs"]
mod tests;
