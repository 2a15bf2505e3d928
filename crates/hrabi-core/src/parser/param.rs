//! Type-expression parser - converts one parameter declaration into a parse node
//!
//! Handles: scalar types, fixed and dynamic array suffixes, tuples (with or
//! without the `tuple` keyword), parameter names, the `indexed` keyword and
//! data-location/payability modifiers.
//!
//! ```text
//! "tuple(address to, uint256[3] amounts)[] calldata orders"
//!     → ParamNode { type: "tuple[]", name: "orders", components: [..] }
//! ```
//!
//! Each node is scanned left to right with a small set of permission flags.
//! Nested tuples are parsed by recursion, so the call stack is the parent
//! link and no node ever points back at its parent. Recursion is capped at
//! [`MAX_DEPTH`] open tuples.
//!
//! Guarantees:
//! - Deterministic: same input always produces the same node
//! - Every rejection reports the character offset it happened at

use super::{check_modifier, normalize_type};
use crate::{Error, Result};

const INDEXED: &str = "indexed";

/// Deepest tuple nesting a parameter may have
pub const MAX_DEPTH: usize = 128;

/// A parsed parameter before it becomes a [`crate::ParamType`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamNode {
    pub type_name: String,
    pub name: String,
    pub indexed: Option<bool>,
    pub components: Option<Vec<ParamNode>>,
}

/// Parse a single parameter declaration.
///
/// `allow_indexed` enables the `indexed` keyword (event parameter lists) and
/// starts every node with `indexed = Some(false)`.
///
/// # Errors
/// `Grammar` with the offending character offset, `InvalidModifier` for a
/// modifier the type does not accept, `Argument` when no type is given.
pub fn parse_param(text: &str, allow_indexed: bool) -> Result<ParamNode> {
    let node = ParamParser::new(text, allow_indexed).parse()?;
    if node.type_name.is_empty() {
        return Err(Error::argument("missing parameter type", "param", text));
    }
    Ok(node)
}

/// What may come next while scanning one node
#[derive(Debug, Clone, Copy, Default)]
struct NodeState {
    allow_type: bool,
    allow_name: bool,
    allow_params: bool,
    allow_array: bool,
    read_array: bool,
}

/// How a nested node ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Terminator {
    Comma,
    Close,
    End,
}

struct ParamParser<'a> {
    source: &'a str,
    input: Vec<char>,
    position: usize,
    depth: usize,
    allow_indexed: bool,
}

impl<'a> ParamParser<'a> {
    fn new(source: &'a str, allow_indexed: bool) -> Self {
        ParamParser {
            source,
            input: source.chars().collect(),
            position: 0,
            depth: 0,
            allow_indexed,
        }
    }

    fn parse(mut self) -> Result<ParamNode> {
        let (node, _) = self.parse_node(false)?;
        Ok(node)
    }

    // ── Character helpers ──────────────────────────────

    fn advance(&mut self) -> Option<char> {
        let c = self.input.get(self.position).copied()?;
        self.position += 1;
        Some(if c.is_whitespace() { ' ' } else { c })
    }

    fn unexpected(&self, position: usize) -> Error {
        Error::Grammar {
            reason: "unexpected character",
            position,
            input: self.source.to_string(),
        }
    }

    fn new_node(&self) -> ParamNode {
        ParamNode {
            type_name: String::new(),
            name: String::new(),
            indexed: self.allow_indexed.then_some(false),
            components: None,
        }
    }

    // ── Nodes ──────────────────────────────────────────

    /// Scan one node. A nested node stops at its `,` or `)`; the top-level
    /// node stops at end of input.
    fn parse_node(&mut self, nested: bool) -> Result<(ParamNode, Terminator)> {
        let mut node = self.new_node();
        let mut state = NodeState {
            allow_type: true,
            ..NodeState::default()
        };

        loop {
            let Some(c) = self.advance() else {
                if nested {
                    return Err(Error::Grammar {
                        reason: "unexpected end of input",
                        position: self.input.len(),
                        input: self.source.to_string(),
                    });
                }
                let keyword_start = self.input.len().saturating_sub(INDEXED.len());
                self.finish_name(&mut node, keyword_start)?;
                node.type_name = normalize_type(&node.type_name);
                return Ok((node, Terminator::End));
            };
            let at = self.position - 1;

            match c {
                '(' => {
                    if state.allow_type && node.type_name.is_empty() {
                        node.type_name = "tuple".to_string();
                    } else if !state.allow_params {
                        return Err(self.unexpected(at));
                    }
                    state.allow_type = false;
                    node.type_name = normalize_type(&node.type_name);
                    node.components = Some(self.parse_components()?);
                    state.allow_params = false;
                    state.allow_name = true;
                    state.allow_array = true;
                }

                ')' | ',' => {
                    if !nested {
                        return Err(self.unexpected(at));
                    }
                    self.finish_name(&mut node, at)?;
                    node.type_name = normalize_type(&node.type_name);
                    let terminator = if c == ')' {
                        Terminator::Close
                    } else {
                        Terminator::Comma
                    };
                    return Ok((node, terminator));
                }

                ' ' => {
                    // A space closes the type token...
                    if state.allow_type && !node.type_name.is_empty() {
                        node.type_name = normalize_type(&node.type_name);
                        state.allow_type = false;
                        state.allow_name = true;
                        state.allow_params = true;
                    }
                    // ...and a name token, unless it was a keyword
                    if state.allow_name && !node.name.is_empty() && !self.absorb_keyword(&mut node, at)? {
                        state.allow_name = false;
                    }
                }

                '[' => {
                    if !state.allow_array {
                        return Err(self.unexpected(at));
                    }
                    node.type_name.push(c);
                    state.allow_array = false;
                    state.allow_name = false;
                    state.read_array = true;
                }

                ']' => {
                    if !state.read_array {
                        return Err(self.unexpected(at));
                    }
                    node.type_name.push(c);
                    state.read_array = false;
                    state.allow_array = true;
                    state.allow_name = true;
                }

                c => {
                    if state.read_array {
                        if !c.is_ascii_digit() {
                            return Err(self.unexpected(at));
                        }
                        node.type_name.push(c);
                    } else if state.allow_type {
                        node.type_name.push(c);
                        state.allow_params = true;
                        state.allow_array = true;
                    } else if state.allow_name {
                        node.name.push(c);
                        state.allow_array = false;
                    } else {
                        return Err(self.unexpected(at));
                    }
                }
            }
        }
    }

    /// Parse tuple components up to and including the matching `)`.
    fn parse_components(&mut self) -> Result<Vec<ParamNode>> {
        if self.depth == MAX_DEPTH {
            return Err(Error::Grammar {
                reason: "nesting too deep",
                position: self.position - 1,
                input: self.source.to_string(),
            });
        }
        self.depth += 1;
        let components = self.parse_component_list();
        self.depth -= 1;
        components
    }

    fn parse_component_list(&mut self) -> Result<Vec<ParamNode>> {
        let mut components = Vec::new();
        loop {
            let (child, terminator) = self.parse_node(true)?;
            let at = self.position - 1;

            if child.type_name.is_empty() {
                // `()` is the empty tuple; any other blank slot is malformed
                if terminator == Terminator::Close && components.is_empty() {
                    return Ok(components);
                }
                return Err(self.unexpected(at));
            }
            components.push(child);

            if terminator == Terminator::Close {
                return Ok(components);
            }
        }
    }

    // ── Names ──────────────────────────────────────────

    /// Finalize the pending name token at a node boundary.
    fn finish_name(&self, node: &mut ParamNode, at: usize) -> Result<()> {
        self.absorb_keyword(node, at).map(|_| ())
    }

    /// Consume the name token when it is `indexed` or a modifier keyword.
    ///
    /// Returns `true` when the token was consumed and cleared.
    fn absorb_keyword(&self, node: &mut ParamNode, at: usize) -> Result<bool> {
        if node.name == INDEXED {
            if !self.allow_indexed || node.indexed == Some(true) {
                return Err(self.unexpected(at));
            }
            node.indexed = Some(true);
            node.name.clear();
            return Ok(true);
        }

        if check_modifier(&node.type_name, &node.name)? {
            node.name.clear();
            return Ok(true);
        }
        Ok(false)
    }
}
