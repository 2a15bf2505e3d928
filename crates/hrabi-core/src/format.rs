//! Output conventions
//!
//! | Mode      | Keyword | Separator | Names | Modifiers | Indexed/anonymous |
//! |-----------|---------|-----------|-------|-----------|-------------------|
//! | `sighash` | no      | `,`       | no    | no        | no                |
//! | `minimal` | yes     | `,`       | no    | yes       | yes               |
//! | `full`    | yes     | `, `      | yes   | yes       | yes               |
//! | `json`    | structured object                                           |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Rendering mode selected at format time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatMode {
    /// Bare canonical signature, used for identity and selectors
    Sighash,
    /// Compact human-readable
    Minimal,
    /// Verbose human-readable, including names
    #[default]
    Full,
    /// Interchange object
    Json,
}

impl FormatMode {
    pub const ALL: [FormatMode; 4] = [
        FormatMode::Sighash,
        FormatMode::Minimal,
        FormatMode::Full,
        FormatMode::Json,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FormatMode::Sighash => "sighash",
            FormatMode::Minimal => "minimal",
            FormatMode::Full => "full",
            FormatMode::Json => "json",
        }
    }

    /// Separator between parameters in human-readable modes
    pub(crate) fn separator(self) -> &'static str {
        match self {
            FormatMode::Full => ", ",
            _ => ",",
        }
    }
}

impl fmt::Display for FormatMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormatMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        FormatMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| Error::argument("invalid format type", "format", s))
    }
}

/// A rendered entity: a string for human-readable modes, a json tree otherwise
#[derive(Debug, Clone, PartialEq)]
pub enum Formatted {
    Text(String),
    Json(serde_json::Value),
}

impl Formatted {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Formatted::Text(text) => Some(text),
            Formatted::Json(_) => None,
        }
    }

    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Formatted::Json(value) => Some(value),
            Formatted::Text(_) => None,
        }
    }

    pub(crate) fn json<T: Serialize>(value: &T) -> Result<Self> {
        Ok(Formatted::Json(serde_json::to_value(value)?))
    }
}

impl fmt::Display for Formatted {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Formatted::Text(text) => f.write_str(text),
            Formatted::Json(value) => write!(f, "{}", value),
        }
    }
}
