//! State-mutability resolver
//!
//! Legacy ABIs describe callables with `constant`/`payable` booleans, newer
//! ones with a `stateMutability` enumeration. [`resolve`] reconciles any mix
//! of the three into one [`Mutability`], whose flags are always derived from
//! the enumeration:
//!
//! - `constant == state_mutability ∈ {view, pure}`
//! - `payable == (state_mutability == payable)`

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::interchange::JsonFragment;
use crate::{Error, Result};

/// Side-effect and value-transfer contract of a callable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateMutability {
    Pure,
    View,
    NonPayable,
    Payable,
}

impl StateMutability {
    pub fn as_str(self) -> &'static str {
        match self {
            StateMutability::Pure => "pure",
            StateMutability::View => "view",
            StateMutability::NonPayable => "nonpayable",
            StateMutability::Payable => "payable",
        }
    }
}

impl fmt::Display for StateMutability {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StateMutability {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pure" => Ok(StateMutability::Pure),
            "view" => Ok(StateMutability::View),
            "nonpayable" => Ok(StateMutability::NonPayable),
            "payable" => Ok(StateMutability::Payable),
            _ => Err(Error::argument(
                "invalid state mutability",
                "stateMutability",
                s,
            )),
        }
    }
}

/// A resolved, always-consistent mutability triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mutability {
    state_mutability: StateMutability,
}

impl Mutability {
    pub fn new(state_mutability: StateMutability) -> Self {
        Mutability { state_mutability }
    }

    pub fn state_mutability(&self) -> StateMutability {
        self.state_mutability
    }

    pub fn constant(&self) -> bool {
        matches!(
            self.state_mutability,
            StateMutability::View | StateMutability::Pure
        )
    }

    pub fn payable(&self) -> bool {
        self.state_mutability == StateMutability::Payable
    }
}

/// Raw mutability inputs, any of which may be absent
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MutabilityInput {
    pub constant: Option<bool>,
    pub payable: Option<bool>,
    pub state_mutability: Option<StateMutability>,
    pub is_constructor: bool,
}

impl MutabilityInput {
    /// Fold a declaration's trailing modifier list into explicit inputs.
    ///
    /// The result always carries a `state_mutability` (`nonpayable` unless a
    /// modifier says otherwise). Visibility keywords are ignored; unknown
    /// modifiers are logged and ignored.
    pub fn from_modifiers(modifiers: &str, is_constructor: bool) -> Self {
        let mut input = MutabilityInput {
            constant: Some(false),
            payable: Some(false),
            state_mutability: Some(StateMutability::NonPayable),
            is_constructor,
        };

        for modifier in modifiers.split(' ') {
            match modifier.trim() {
                "constant" => input.constant = Some(true),
                "payable" => {
                    input.payable = Some(true);
                    input.state_mutability = Some(StateMutability::Payable);
                }
                "nonpayable" => {
                    input.payable = Some(false);
                    input.state_mutability = Some(StateMutability::NonPayable);
                }
                "pure" => {
                    input.constant = Some(true);
                    input.state_mutability = Some(StateMutability::Pure);
                }
                "view" => {
                    input.constant = Some(true);
                    input.state_mutability = Some(StateMutability::View);
                }
                "external" | "public" | "" => {}
                unknown => warn!(modifier = unknown, "unknown modifier: {}", unknown),
            }
        }

        input
    }

    /// Read the mutability fields of an interchange object.
    pub fn from_object(value: &JsonFragment, is_constructor: bool) -> Result<Self> {
        let state_mutability = value
            .state_mutability
            .as_deref()
            .map(str::parse::<StateMutability>)
            .transpose()?;
        Ok(MutabilityInput {
            constant: value.constant,
            payable: value.payable,
            state_mutability,
            is_constructor,
        })
    }
}

impl fmt::Display for MutabilityInput {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fn field<T: fmt::Display>(value: &Option<T>) -> String {
            value
                .as_ref()
                .map_or_else(|| "-".to_string(), ToString::to_string)
        }
        write!(
            f,
            "{{constant: {}, payable: {}, stateMutability: {}, constructor: {}}}",
            field(&self.constant),
            field(&self.payable),
            field(&self.state_mutability),
            self.is_constructor
        )
    }
}

/// Reconcile the mutability inputs.
///
/// Precedence: `state_mutability`, then `payable`, then `constant`, then the
/// constructor default (`payable`).
///
/// # Errors
/// `InconsistentMutability` when explicit inputs contradict each other,
/// `AmbiguousMutability` when nothing determines a value for a non-constructor.
pub fn resolve(input: &MutabilityInput) -> Result<Mutability> {
    let inconsistent = |reason: String| Error::InconsistentMutability {
        reason,
        value: input.to_string(),
    };

    if let Some(state_mutability) = input.state_mutability {
        let resolved = Mutability::new(state_mutability);
        if input.constant.is_some_and(|c| c != resolved.constant()) {
            return Err(inconsistent(format!(
                "cannot have constant function with mutability {}",
                state_mutability
            )));
        }
        if input.payable.is_some_and(|p| p != resolved.payable()) {
            return Err(inconsistent(format!(
                "cannot have payable function with mutability {}",
                state_mutability
            )));
        }
        return Ok(resolved);
    }

    if let Some(payable) = input.payable {
        // A payable callable cannot be constant; a non-payable one may be either
        if input.constant.is_none() && !payable && !input.is_constructor {
            return Err(Error::AmbiguousMutability {
                value: input.to_string(),
            });
        }
        let constant = input.constant.unwrap_or(false);
        if payable && constant {
            return Err(inconsistent("cannot have constant payable function".into()));
        }
        let state_mutability = if constant {
            StateMutability::View
        } else if payable {
            StateMutability::Payable
        } else {
            StateMutability::NonPayable
        };
        return Ok(Mutability::new(state_mutability));
    }

    if let Some(constant) = input.constant {
        let state_mutability = if constant {
            StateMutability::View
        } else {
            StateMutability::Payable
        };
        return Ok(Mutability::new(state_mutability));
    }

    if input.is_constructor {
        return Ok(Mutability::new(StateMutability::Payable));
    }

    Err(Error::AmbiguousMutability {
        value: input.to_string(),
    })
}
