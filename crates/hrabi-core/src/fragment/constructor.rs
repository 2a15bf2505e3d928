use super::{
    expect_kind, params_from_json, params_to_json, parse_params, unsupported_sighash, Callable,
    FragmentKind,
};
use crate::format::{FormatMode, Formatted};
use crate::interchange::JsonFragment;
use crate::mutability::{resolve, Mutability, MutabilityInput, StateMutability};
use crate::param::{render_list, ParamType};
use crate::parser::{normalize_declaration, split_parens};
use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructorFragment {
    callable: Callable,
}

impl ConstructorFragment {
    /// Parse `constructor(<inputs>) <modifiers>`.
    pub fn from_declaration(text: &str) -> Result<Self> {
        let value = normalize_declaration(text);
        let parens = split_parens(&value)
            .ok_or_else(|| Error::argument("invalid constructor string", "value", text))?;
        if parens.prefix.trim() != "constructor" {
            return Err(Error::argument("invalid constructor string", "value", text));
        }

        let inputs = parse_params(parens.inner, false)?;
        let mutability = resolve(&MutabilityInput::from_modifiers(parens.suffix.trim(), true))?;
        Self::new(inputs, mutability, text)
    }

    pub fn from_object(value: &JsonFragment) -> Result<Self> {
        expect_kind(value, FragmentKind::Constructor)?;
        let inputs = params_from_json(value.inputs.as_deref())?;
        let mutability = resolve(&MutabilityInput::from_object(value, true)?)?;
        Self::new(inputs, mutability, &value.describe())
    }

    fn new(inputs: Vec<ParamType>, mutability: Mutability, source: &str) -> Result<Self> {
        if mutability.constant() {
            return Err(Error::argument(
                "constructor cannot be constant",
                "value",
                source,
            ));
        }
        Ok(ConstructorFragment {
            callable: Callable::new(inputs, mutability),
        })
    }

    pub fn callable(&self) -> &Callable {
        &self.callable
    }

    pub fn inputs(&self) -> &[ParamType] {
        self.callable.inputs()
    }

    pub fn state_mutability(&self) -> StateMutability {
        self.callable.state_mutability()
    }

    pub fn payable(&self) -> bool {
        self.callable.payable()
    }

    pub fn format(&self, mode: FormatMode) -> Result<Formatted> {
        match mode {
            FormatMode::Sighash => Err(unsupported_sighash(FragmentKind::Constructor)),
            FormatMode::Json => Formatted::json(&self.to_json()),
            _ => Ok(Formatted::Text(format!(
                "constructor({}){}",
                render_list(self.inputs(), mode),
                self.callable.render_mutability()
            ))),
        }
    }

    pub fn to_json(&self) -> JsonFragment {
        JsonFragment {
            state_mutability: Some(self.state_mutability().to_string()),
            inputs: Some(params_to_json(self.inputs())),
            ..JsonFragment::new(FragmentKind::Constructor.as_str())
        }
    }
}
