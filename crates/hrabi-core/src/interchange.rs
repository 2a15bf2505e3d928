//! Interchange records - the JSON-ABI-like object form
//!
//! These are plain serde records used both as input (`from_object`) and as
//! the `json` rendering. Field order matches the conventional ABI layout and
//! survives conversion to `serde_json::Value` (`preserve_order`).
//! Unknown fields such as `internalType` or `gas` are ignored on input.

use serde::{Deserialize, Serialize};

/// One parameter: `{type, name?, indexed?, components?}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonParamType {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<JsonParamType>>,
}

impl JsonParamType {
    pub fn new(type_name: impl Into<String>) -> Self {
        JsonParamType {
            type_name: Some(type_name.into()),
            ..Default::default()
        }
    }

    pub fn named(type_name: impl Into<String>, name: impl Into<String>) -> Self {
        JsonParamType {
            type_name: Some(type_name.into()),
            name: Some(name.into()),
            ..Default::default()
        }
    }
}

/// One fragment: `{type, name?, constant?, anonymous?, stateMutability?, payable?, inputs?, outputs?}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonFragment {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constant: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anonymous: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_mutability: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inputs: Option<Vec<JsonParamType>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outputs: Option<Vec<JsonParamType>>,
}

impl JsonFragment {
    pub fn new(kind: impl Into<String>) -> Self {
        JsonFragment {
            kind: Some(kind.into()),
            ..Default::default()
        }
    }

    /// Compact one-line rendering used in error messages
    pub(crate) fn describe(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_solc_output() {
        let json = r#"{
            "type": "function",
            "name": "transfer",
            "stateMutability": "nonpayable",
            "inputs": [
                {"internalType": "address", "name": "to", "type": "address"},
                {"internalType": "uint256", "name": "amount", "type": "uint256"}
            ],
            "outputs": [{"internalType": "bool", "name": "", "type": "bool"}]
        }"#;
        let fragment: JsonFragment = serde_json::from_str(json).unwrap();
        assert_eq!(fragment.kind.as_deref(), Some("function"));
        assert_eq!(fragment.state_mutability.as_deref(), Some("nonpayable"));
        let inputs = fragment.inputs.unwrap();
        assert_eq!(inputs[0], JsonParamType::named("address", "to"));
        assert_eq!(fragment.outputs.unwrap()[0].name.as_deref(), Some(""));
    }

    #[test]
    fn test_serialize_skips_absent_fields() {
        let param = JsonParamType::new("uint256");
        assert_eq!(serde_json::to_string(&param).unwrap(), r#"{"type":"uint256"}"#);
    }

    #[test]
    fn test_serialize_field_order() {
        let fragment = JsonFragment {
            kind: Some("event".into()),
            name: Some("Transfer".into()),
            anonymous: Some(false),
            inputs: Some(vec![]),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_string(&fragment).unwrap(),
            r#"{"type":"event","name":"Transfer","anonymous":false,"inputs":[]}"#
        );
    }

    #[test]
    fn test_describe_is_single_line_json() {
        let fragment = JsonFragment::new("constructor");
        assert_eq!(fragment.describe(), r#"{"type":"constructor"}"#);
    }
}
