//! Parameter values - the typed, immutable form of one input/output slot
//!
//! A [`ParamType`] is built once, from a parse node or an interchange object,
//! and never mutated. Its shape is one of scalar, tuple or array; the base
//! type (`"tuple"`, `"array"` or the scalar type) is derived from that shape.

use crate::format::{FormatMode, Formatted};
use crate::interchange::JsonParamType;
use crate::parser::{normalize_type, parse_param, ParamNode};
use crate::{Error, Result};

/// Shape of a parameter value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamKind {
    Scalar,
    Tuple(Vec<ParamType>),
    /// `length` is `-1` for dynamic arrays
    Array { length: i64, child: Box<ParamType> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamType {
    name: Option<String>,
    type_name: String,
    indexed: Option<bool>,
    kind: ParamKind,
}

impl ParamType {
    // ── Construction ───────────────────────────────────

    /// Parse a single parameter declaration such as `"address[] a"`.
    pub fn from_declaration(text: &str, allow_indexed: bool) -> Result<Self> {
        Self::from_node(parse_param(text, allow_indexed)?)
    }

    pub fn from_node(node: ParamNode) -> Result<Self> {
        let components = node
            .components
            .map(|nodes| nodes.into_iter().map(Self::from_node).collect::<Result<Vec<_>>>())
            .transpose()?;
        Self::build(non_empty(node.name), node.type_name, node.indexed, components)
    }

    pub fn from_object(value: &JsonParamType) -> Result<Self> {
        let type_name = match value.type_name.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => normalize_type(t),
            _ => {
                return Err(Error::argument(
                    "missing parameter type",
                    "type",
                    value.type_name.clone().unwrap_or_default(),
                ))
            }
        };
        let components = value
            .components
            .as_ref()
            .map(|c| c.iter().map(Self::from_object).collect::<Result<Vec<_>>>())
            .transpose()?;
        Self::build(non_empty(value.name.clone()), type_name, value.indexed, components)
    }

    fn build(
        name: Option<String>,
        type_name: String,
        indexed: Option<bool>,
        components: Option<Vec<ParamType>>,
    ) -> Result<Self> {
        let kind = if let Some((element, length)) = split_array_suffix(&type_name) {
            if element.is_empty() {
                return Err(Error::argument(
                    "missing array element type",
                    "type",
                    type_name.as_str(),
                ));
            }
            let length = if length.is_empty() {
                -1
            } else {
                length
                    .parse::<i64>()
                    .map_err(|_| Error::argument("invalid array length", "type", type_name.as_str()))?
            };
            let child = Self::build(None, normalize_type(element), None, components)?;
            ParamKind::Array {
                length,
                child: Box::new(child),
            }
        } else if let Some(components) = components {
            ParamKind::Tuple(components)
        } else {
            ParamKind::Scalar
        };

        Ok(ParamType {
            name,
            type_name,
            indexed,
            kind,
        })
    }

    // ── Accessors ──────────────────────────────────────

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Fully qualified type, e.g. `uint256[3]` or `tuple[]`
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// `"array"`, `"tuple"` or the scalar type
    pub fn base_type(&self) -> &str {
        match self.kind {
            ParamKind::Scalar => &self.type_name,
            ParamKind::Tuple(_) => "tuple",
            ParamKind::Array { .. } => "array",
        }
    }

    pub fn indexed(&self) -> Option<bool> {
        self.indexed
    }

    pub fn kind(&self) -> &ParamKind {
        &self.kind
    }

    pub fn components(&self) -> Option<&[ParamType]> {
        match &self.kind {
            ParamKind::Tuple(components) => Some(components),
            _ => None,
        }
    }

    pub fn array_length(&self) -> Option<i64> {
        match self.kind {
            ParamKind::Array { length, .. } => Some(length),
            _ => None,
        }
    }

    pub fn array_children(&self) -> Option<&ParamType> {
        match &self.kind {
            ParamKind::Array { child, .. } => Some(child),
            _ => None,
        }
    }

    // ── Formatting ─────────────────────────────────────

    pub fn format(&self, mode: FormatMode) -> Result<Formatted> {
        match mode {
            FormatMode::Json => Formatted::json(&self.to_json()),
            _ => Ok(Formatted::Text(self.render(mode))),
        }
    }

    /// Human-readable rendering; `mode` must not be `Json`.
    pub(crate) fn render(&self, mode: FormatMode) -> String {
        let mut out = String::new();

        match &self.kind {
            ParamKind::Array { length, child } => {
                out.push_str(&child.render(mode));
                out.push('[');
                if *length >= 0 {
                    out.push_str(&length.to_string());
                }
                out.push(']');
            }
            ParamKind::Tuple(components) => {
                if mode == FormatMode::Full {
                    out.push_str("tuple");
                }
                out.push('(');
                out.push_str(&render_list(components, mode));
                out.push(')');
            }
            ParamKind::Scalar => out.push_str(&self.type_name),
        }

        if mode != FormatMode::Sighash {
            if self.indexed == Some(true) {
                out.push_str(" indexed");
            }
            if mode == FormatMode::Full {
                if let Some(ref name) = self.name {
                    out.push(' ');
                    out.push_str(name);
                }
            }
        }

        out
    }

    pub fn to_json(&self) -> JsonParamType {
        let type_name = match self.kind {
            ParamKind::Tuple(_) => "tuple".to_string(),
            _ => self.type_name.clone(),
        };
        JsonParamType {
            type_name: Some(type_name),
            name: self.name.clone(),
            indexed: self.indexed,
            components: self
                .json_components()
                .map(|components| components.iter().map(ParamType::to_json).collect()),
        }
    }

    /// Tuple components, looking through array layers (`tuple[2][]`)
    fn json_components(&self) -> Option<&[ParamType]> {
        match &self.kind {
            ParamKind::Tuple(components) => Some(components),
            ParamKind::Array { child, .. } => child.json_components(),
            ParamKind::Scalar => None,
        }
    }
}

/// Join rendered parameters with the mode's separator.
pub(crate) fn render_list(params: &[ParamType], mode: FormatMode) -> String {
    params
        .iter()
        .map(|p| p.render(mode))
        .collect::<Vec<_>>()
        .join(mode.separator())
}

/// Split `element[digits]` at the last bracket pair.
fn split_array_suffix(type_name: &str) -> Option<(&str, &str)> {
    let body = type_name.strip_suffix(']')?;
    let open = body.rfind('[')?;
    let digits = &body[open + 1..];
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some((&body[..open], digits))
}

fn non_empty(name: impl Into<Option<String>>) -> Option<String> {
    name.into().filter(|n| !n.is_empty())
}
