//! Declaration sources - turning file contents into declarations
//!
//! Two layouts are accepted:
//!
//! ```text
//! # one human-readable declaration per line
//! function foo(uint a) public
//! event Transfer(address indexed from, address indexed to, uint value)
//! ```
//!
//! or a JSON array whose entries are declaration strings or ABI objects.

use serde_json::Value;

use crate::fragment::Declaration;
use crate::interchange::JsonFragment;
use crate::{Error, Result};

/// Split source text into declarations, detecting the layout.
///
/// Blank lines and lines starting with `#` are skipped in the line layout.
pub fn read_declarations(text: &str) -> Result<Vec<Declaration>> {
    if text.trim_start().starts_with('[') {
        return read_json(text);
    }

    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(Declaration::from)
        .collect())
}

/// Read a JSON array of declaration strings and/or ABI objects.
pub fn read_json(text: &str) -> Result<Vec<Declaration>> {
    let entries = match serde_json::from_str::<Value>(text)? {
        Value::Array(entries) => entries,
        other => {
            return Err(Error::argument(
                "expected a JSON array of declarations",
                "value",
                other.to_string(),
            ))
        }
    };

    entries
        .into_iter()
        .map(|entry| match entry {
            Value::String(text) => Ok(Declaration::Text(text)),
            Value::Object(_) => Ok(Declaration::Object(serde_json::from_value::<JsonFragment>(
                entry,
            )?)),
            other => Err(Error::argument(
                "invalid declaration",
                "value",
                other.to_string(),
            )),
        })
        .collect()
}
