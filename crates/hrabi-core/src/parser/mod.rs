//! hrabi parser - declaration splitter and type-expression parser
//!
//! Turns human-readable declarations into parse nodes:
//!
//! ```text
//! "function foo(uint a) view"
//!     → normalize_declaration → split_parens → split_nesting
//!     → parse_param (one call per field) → ParamNode
//! ```
//!
//! The checks shared by every stage (type normalization, modifier legality,
//! identifier syntax) live here.

pub mod param;
pub mod split;

pub use param::{parse_param, ParamNode, MAX_DEPTH};
pub use split::{normalize_declaration, split_nesting, split_parens, Parens};

use crate::{Error, Result};

const LOCATION_MODIFIERS: [&str; 3] = ["calldata", "memory", "storage"];
const NESTED_MODIFIERS: [&str; 2] = ["calldata", "memory"];

/// Expand bare `uint`/`int` to `uint256`/`int256`, keeping any array suffix.
///
/// Idempotent: `normalize_type(normalize_type(t)) == normalize_type(t)`.
pub fn normalize_type(type_name: &str) -> String {
    for (short, full) in [("uint", "uint256"), ("int", "int256")] {
        if let Some(rest) = type_name.strip_prefix(short) {
            if !rest.starts_with(is_identifier_char) {
                return format!("{}{}", full, rest);
            }
        }
    }
    type_name.to_string()
}

/// Decide whether `name` is a data-location/payability modifier for `type_name`.
///
/// Returns `Ok(true)` when the token is a modifier that must be discarded,
/// `Ok(false)` when it is an ordinary name, and `InvalidModifier` when it is a
/// modifier keyword the type does not accept.
pub fn check_modifier(type_name: &str, name: &str) -> Result<bool> {
    let accepted = match type_name {
        "bytes" | "string" => LOCATION_MODIFIERS.contains(&name),
        "address" => name == "payable",
        t if t.contains('[') || t == "tuple" => NESTED_MODIFIERS.contains(&name),
        _ => false,
    };
    if accepted {
        return Ok(true);
    }

    if LOCATION_MODIFIERS.contains(&name) || name == "payable" {
        return Err(Error::InvalidModifier {
            modifier: name.to_string(),
            type_name: type_name.to_string(),
        });
    }
    Ok(false)
}

/// Check identifier syntax: `[A-Za-z$_][A-Za-z0-9$_]*`.
pub fn verify_identifier(value: &str) -> Result<&str> {
    let mut chars = value.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '$' || first == '_')
                && chars.all(is_identifier_char)
        }
        None => false,
    };
    if valid {
        Ok(value)
    } else {
        Err(Error::InvalidIdentifier {
            value: value.to_string(),
        })
    }
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '$' || c == '_'
}
