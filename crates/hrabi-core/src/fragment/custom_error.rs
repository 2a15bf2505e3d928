use tracing::warn;

use super::{
    expect_kind, params_from_json, params_to_json, parse_params, selector, strip_keyword,
    FragmentKind,
};
use crate::format::{FormatMode, Formatted};
use crate::interchange::JsonFragment;
use crate::param::{render_list, ParamType};
use crate::parser::{normalize_declaration, split_parens, verify_identifier};
use crate::{Error, Result};

/// A custom error; the name is optional
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorFragment {
    name: Option<String>,
    inputs: Vec<ParamType>,
}

impl ErrorFragment {
    pub fn from_declaration(text: &str) -> Result<Self> {
        let value = normalize_declaration(text);
        let value = strip_keyword(&value, "error");
        let parens = split_parens(value)
            .ok_or_else(|| Error::argument("invalid error string", "value", text))?;

        let name = optional_name(parens.prefix)?;
        let inputs = parse_params(parens.inner, false)?;
        let trailing = parens.suffix.trim();
        if !trailing.is_empty() {
            warn!(modifiers = trailing, "ignoring trailing text after error: {}", trailing);
        }

        Ok(ErrorFragment { name, inputs })
    }

    pub fn from_object(value: &JsonFragment) -> Result<Self> {
        expect_kind(value, FragmentKind::Error)?;
        Ok(ErrorFragment {
            name: optional_name(value.name.as_deref().unwrap_or_default())?,
            inputs: params_from_json(value.inputs.as_deref())?,
        })
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn inputs(&self) -> &[ParamType] {
        &self.inputs
    }

    pub fn signature(&self) -> String {
        self.render(FormatMode::Sighash)
    }

    /// First four bytes of keccak256 over the signature
    pub fn selector(&self) -> [u8; 4] {
        selector(&self.signature())
    }

    pub fn format(&self, mode: FormatMode) -> Result<Formatted> {
        match mode {
            FormatMode::Json => Formatted::json(&self.to_json()),
            _ => Ok(Formatted::Text(self.render(mode))),
        }
    }

    fn render(&self, mode: FormatMode) -> String {
        let name = self.name.as_deref().unwrap_or_default();
        let list = render_list(&self.inputs, mode);
        match mode {
            FormatMode::Sighash => format!("{}({})", name, list),
            _ => format!("error {}({})", name, list),
        }
    }

    pub fn to_json(&self) -> JsonFragment {
        JsonFragment {
            name: self.name.clone(),
            inputs: Some(params_to_json(&self.inputs)),
            ..JsonFragment::new(FragmentKind::Error.as_str())
        }
    }
}

fn optional_name(value: &str) -> Result<Option<String>> {
    match value.trim() {
        "" => Ok(None),
        name => verify_identifier(name).map(|n| Some(n.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> ErrorFragment {
        ErrorFragment::from_declaration(text).unwrap()
    }

    fn text(f: &ErrorFragment, mode: FormatMode) -> String {
        f.format(mode).unwrap().to_string()
    }

    #[test]
    fn test_named_error() {
        let f = parse("error InsufficientBalance(uint256 available, uint256 required)");
        assert_eq!(f.name(), Some("InsufficientBalance"));
        assert_eq!(
            text(&f, FormatMode::Sighash),
            "InsufficientBalance(uint256,uint256)"
        );
        assert_eq!(
            text(&f, FormatMode::Minimal),
            "error InsufficientBalance(uint256,uint256)"
        );
        assert_eq!(
            text(&f, FormatMode::Full),
            "error InsufficientBalance(uint256 available, uint256 required)"
        );
    }

    #[test]
    fn test_unnamed_error() {
        let f = parse("error (uint code)");
        assert_eq!(f.name(), None);
        assert_eq!(f.signature(), "(uint256)");
        assert_eq!(
            f.format(FormatMode::Json).unwrap().as_json().unwrap(),
            &serde_json::json!({
                "type": "error",
                "inputs": [{"type": "uint256", "name": "code"}]
            })
        );
    }

    #[test]
    fn test_invalid_name() {
        assert!(matches!(
            ErrorFragment::from_declaration("error bad-name()"),
            Err(Error::InvalidIdentifier { .. })
        ));
    }

    #[test]
    fn test_trailing_text_ignored() {
        let f = parse("error Oops() view");
        assert_eq!(f.signature(), "Oops()");
    }

    #[test]
    fn test_indexed_not_allowed() {
        assert!(ErrorFragment::from_declaration("error E(uint indexed a)").is_err());
    }

    #[test]
    fn test_selector() {
        let f = parse("error Panic(uint256)");
        assert_eq!(hex::encode(f.selector()), "4e487b71");
    }

    #[test]
    fn test_from_object() {
        let value = JsonFragment {
            name: Some("Unauthorized".into()),
            ..JsonFragment::new("error")
        };
        let f = ErrorFragment::from_object(&value).unwrap();
        assert!(f.inputs().is_empty());
        assert_eq!(text(&f, FormatMode::Full), "error Unauthorized()");
    }
}
