//! Top-level declaration splitting
//!
//! A declaration has the shape `<prefix> ( <params> ) <suffix>`. The prefix
//! holds the keyword and name, the suffix holds modifiers. The parameter list
//! is split on commas that are not nested inside parentheses.

use crate::{Error, Result};

/// The three regions around the outermost parentheses of a declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parens<'a> {
    pub prefix: &'a str,
    pub inner: &'a str,
    pub suffix: &'a str,
}

/// Canonicalize declaration whitespace.
///
/// Every whitespace character becomes a space, `(` gets a space before it and
/// `)` a space after it, runs of spaces collapse to one and the result is
/// trimmed. This guarantees ` returns ` is always space-delimited.
pub fn normalize_declaration(value: &str) -> String {
    let mut spaced = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            '(' => spaced.push_str(" ("),
            ')' => spaced.push_str(") "),
            c if c.is_whitespace() => spaced.push(' '),
            c => spaced.push(c),
        }
    }
    spaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split around the first `(` and the last `)`.
///
/// Returns `None` when there are no parentheses, when a `)` appears in the
/// prefix or when a `(` appears in the suffix.
pub fn split_parens(value: &str) -> Option<Parens<'_>> {
    let open = value.find('(')?;
    let close = value.rfind(')')?;
    if close < open {
        return None;
    }

    let prefix = &value[..open];
    let suffix = &value[close + 1..];
    if prefix.contains(')') || suffix.contains('(') {
        return None;
    }

    Some(Parens {
        prefix,
        inner: &value[open + 1..close],
        suffix,
    })
}

/// Split a parameter list on top-level commas.
///
/// A trailing empty field is dropped, so `""` yields no fields. A `)` that
/// closes more than was opened fails with `UnbalancedParentheses`.
pub fn split_nesting(value: &str) -> Result<Vec<String>> {
    let value = value.trim();

    let mut fields = Vec::new();
    let mut accum = String::new();
    let mut depth = 0usize;

    for c in value.chars() {
        match c {
            ',' if depth == 0 => fields.push(std::mem::take(&mut accum)),
            '(' => {
                depth += 1;
                accum.push(c);
            }
            ')' => {
                depth = depth.checked_sub(1).ok_or_else(|| Error::UnbalancedParentheses {
                    value: value.to_string(),
                })?;
                accum.push(c);
            }
            c => accum.push(c),
        }
    }
    if !accum.is_empty() {
        fields.push(accum);
    }

    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── normalize_declaration ──────────────────────────

    #[test]
    fn test_normalize_spacing() {
        assert_eq!(
            normalize_declaration("function  foo(uint a)\tview returns(uint)"),
            "function foo (uint a) view returns (uint)"
        );
    }

    #[test]
    fn test_normalize_nested_parens() {
        assert_eq!(
            normalize_declaration("event E(tuple(uint a,bool b) c)"),
            "event E (tuple (uint a,bool b) c)"
        );
    }

    #[test]
    fn test_normalize_trims() {
        assert_eq!(normalize_declaration("  constructor()  "), "constructor ()");
    }

    // ── split_parens ───────────────────────────────────

    #[test]
    fn test_split_parens_regions() {
        let parens = split_parens("foo (uint a, (bool,bool) b) view").unwrap();
        assert_eq!(parens.prefix, "foo ");
        assert_eq!(parens.inner, "uint a, (bool,bool) b");
        assert_eq!(parens.suffix, " view");
    }

    #[test]
    fn test_split_parens_rejects_malformed() {
        assert_eq!(split_parens("foo"), None);
        assert_eq!(split_parens("foo)("), None);
        assert_eq!(split_parens("foo () (bar"), None);
        assert_eq!(split_parens("f)oo ()"), None);
    }

    // ── split_nesting ──────────────────────────────────

    #[test]
    fn test_split_top_level_commas_only() {
        let fields = split_nesting("uint a, tuple(bool,bool) b,address c").unwrap();
        assert_eq!(fields, vec!["uint a", " tuple(bool,bool) b", "address c"]);
    }

    #[test]
    fn test_split_empty_list() {
        assert!(split_nesting("").unwrap().is_empty());
        assert!(split_nesting("   ").unwrap().is_empty());
    }

    #[test]
    fn test_split_drops_trailing_empty_field() {
        assert_eq!(split_nesting("uint,").unwrap(), vec!["uint"]);
    }

    #[test]
    fn test_split_unbalanced_close() {
        assert_eq!(
            split_nesting("uint a)"),
            Err(Error::UnbalancedParentheses {
                value: "uint a)".into()
            })
        );
        assert!(split_nesting("(uint))(").is_err());
    }

    #[test]
    fn test_split_deep_nesting_balanced() {
        let fields = split_nesting("((uint,(bool)),address),bytes").unwrap();
        assert_eq!(fields.len(), 2);
    }
}
