use super::{
    expect_kind, params_from_json, params_to_json, parse_params, selector, strip_keyword,
    Callable, FragmentKind,
};
use crate::format::{FormatMode, Formatted};
use crate::interchange::JsonFragment;
use crate::mutability::{resolve, MutabilityInput, StateMutability};
use crate::param::{render_list, ParamType};
use crate::parser::{normalize_declaration, split_parens, verify_identifier};
use crate::{Error, Result};

const RETURNS: &str = " returns ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionFragment {
    name: String,
    callable: Callable,
    outputs: Vec<ParamType>,
}

impl FunctionFragment {
    /// Parse `[function] name(<inputs>) <modifiers> [returns (<outputs>)]`.
    pub fn from_declaration(text: &str) -> Result<Self> {
        let value = normalize_declaration(text);
        let value = strip_keyword(&value, "function");

        let mut clauses = value.split(RETURNS);
        let head = clauses.next().unwrap_or_default();
        let returns = clauses.next();
        if clauses.next().is_some() {
            return Err(Error::argument("invalid function string", "value", text));
        }

        let parens = split_parens(head)
            .ok_or_else(|| Error::argument("invalid function string", "value", text))?;
        let name = verify_identifier(parens.prefix.trim())?.to_string();
        let inputs = parse_params(parens.inner, false)?;
        let mutability = resolve(&MutabilityInput::from_modifiers(parens.suffix.trim(), false))?;

        let outputs = match returns {
            Some(clause) => {
                let parens = split_parens(clause)
                    .ok_or_else(|| Error::argument("invalid function string", "value", text))?;
                if !parens.prefix.trim().is_empty() || !parens.suffix.trim().is_empty() {
                    return Err(Error::argument("unexpected tokens", "value", text));
                }
                parse_params(parens.inner, false)?
            }
            None => Vec::new(),
        };

        Ok(FunctionFragment {
            name,
            callable: Callable::new(inputs, mutability),
            outputs,
        })
    }

    pub fn from_object(value: &JsonFragment) -> Result<Self> {
        expect_kind(value, FragmentKind::Function)?;
        let name = verify_identifier(value.name.as_deref().unwrap_or_default())?.to_string();
        let inputs = params_from_json(value.inputs.as_deref())?;
        let outputs = params_from_json(value.outputs.as_deref())?;
        let mutability = resolve(&MutabilityInput::from_object(value, false)?)?;
        Ok(FunctionFragment {
            name,
            callable: Callable::new(inputs, mutability),
            outputs,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn callable(&self) -> &Callable {
        &self.callable
    }

    pub fn inputs(&self) -> &[ParamType] {
        self.callable.inputs()
    }

    pub fn outputs(&self) -> &[ParamType] {
        &self.outputs
    }

    pub fn state_mutability(&self) -> StateMutability {
        self.callable.state_mutability()
    }

    pub fn constant(&self) -> bool {
        self.callable.constant()
    }

    pub fn payable(&self) -> bool {
        self.callable.payable()
    }

    /// `name(type,...)`
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
        let mut out = String::new();
        if mode != FormatMode::Sighash {
            out.push_str("function ");
        }
        out.push_str(&self.name);
        out.push('(');
        out.push_str(&render_list(self.inputs(), mode));
        out.push(')');

        if mode != FormatMode::Sighash {
            out.push_str(&self.callable.render_mutability());
            if !self.outputs.is_empty() {
                out.push_str(" returns (");
                out.push_str(&render_list(&self.outputs, mode));
                out.push(')');
            }
        }
        out
    }

    pub fn to_json(&self) -> JsonFragment {
        JsonFragment {
            name: Some(self.name.clone()),
            constant: Some(self.constant()),
            state_mutability: Some(self.state_mutability().to_string()),
            payable: Some(self.payable()),
            inputs: Some(params_to_json(self.inputs())),
            outputs: Some(params_to_json(&self.outputs)),
            ..JsonFragment::new(FragmentKind::Function.as_str())
        }
    }
}
