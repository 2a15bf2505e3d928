use tracing::warn;

use super::{
    expect_kind, keccak256, params_from_json, params_to_json, parse_params, strip_keyword,
    FragmentKind,
};
use crate::format::{FormatMode, Formatted};
use crate::interchange::JsonFragment;
use crate::param::{render_list, ParamType};
use crate::parser::{normalize_declaration, split_parens, verify_identifier};
use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventFragment {
    name: String,
    anonymous: bool,
    inputs: Vec<ParamType>,
}

impl EventFragment {
    /// Parse `[event] Name(<inputs>) [anonymous]`.
    ///
    /// Inputs may carry `indexed`. Modifiers other than `anonymous` are
    /// logged and ignored.
    pub fn from_declaration(text: &str) -> Result<Self> {
        let value = normalize_declaration(text);
        let value = strip_keyword(&value, "event");
        let parens = split_parens(value)
            .ok_or_else(|| Error::argument("invalid event string", "value", text))?;

        let inputs = parse_params(parens.inner, true)?;

        let mut anonymous = false;
        for modifier in parens.suffix.split(' ') {
            match modifier.trim() {
                "anonymous" => anonymous = true,
                "" => {}
                unknown => warn!(modifier = unknown, "unknown event modifier: {}", unknown),
            }
        }

        let name = verify_identifier(parens.prefix.trim())?.to_string();
        Ok(EventFragment {
            name,
            anonymous,
            inputs,
        })
    }

    pub fn from_object(value: &JsonFragment) -> Result<Self> {
        expect_kind(value, FragmentKind::Event)?;
        let name = verify_identifier(value.name.as_deref().unwrap_or_default())?.to_string();
        Ok(EventFragment {
            name,
            anonymous: value.anonymous.unwrap_or(false),
            inputs: params_from_json(value.inputs.as_deref())?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn anonymous(&self) -> bool {
        self.anonymous
    }

    pub fn inputs(&self) -> &[ParamType] {
        &self.inputs
    }

    pub fn signature(&self) -> String {
        self.render(FormatMode::Sighash)
    }

    /// keccak256 over the signature, the first log topic of a non-anonymous event
    pub fn topic(&self) -> [u8; 32] {
        keccak256(self.signature().as_bytes())
    }

    pub fn format(&self, mode: FormatMode) -> Result<Formatted> {
        match mode {
            FormatMode::Json => Formatted::json(&self.to_json()),
            _ => Ok(Formatted::Text(self.render(mode))),
        }
    }

    fn render(&self, mode: FormatMode) -> String {
        let list = render_list(&self.inputs, mode);
        match mode {
            FormatMode::Sighash => format!("{}({})", self.name, list),
            _ if self.anonymous => format!("event {}({}) anonymous", self.name, list),
            _ => format!("event {}({})", self.name, list),
        }
    }

    pub fn to_json(&self) -> JsonFragment {
        JsonFragment {
            name: Some(self.name.clone()),
            anonymous: Some(self.anonymous),
            inputs: Some(params_to_json(&self.inputs)),
            ..JsonFragment::new(FragmentKind::Event.as_str())
        }
    }
}
