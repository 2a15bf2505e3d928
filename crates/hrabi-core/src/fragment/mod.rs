//! Fragments - one parsed interface member each
//!
//! A [`Fragment`] is a constructor, function, event or custom error. Every
//! kind can be built from a human-readable declaration or an interchange
//! object, and rendered back in any [`FormatMode`].
//!
//! ```text
//! "function foo(uint a) view returns (bool)"
//!     → normalize_declaration → keyword dispatch → FunctionFragment
//!     → format(Sighash) = "foo(uint256)"
//! ```

mod constructor;
mod custom_error;
mod event;
mod function;

pub use constructor::ConstructorFragment;
pub use custom_error::ErrorFragment;
pub use event::EventFragment;
pub use function::FunctionFragment;

use std::fmt;
use std::str::FromStr;

use sha3::{Digest, Keccak256};

use crate::format::{FormatMode, Formatted};
use crate::interchange::{JsonFragment, JsonParamType};
use crate::mutability::{Mutability, StateMutability};
use crate::param::ParamType;
use crate::parser::{normalize_declaration, split_nesting};
use crate::{Error, Result};

// ── Kinds ─────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FragmentKind {
    Constructor,
    Function,
    Event,
    Error,
}

impl FragmentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FragmentKind::Constructor => "constructor",
            FragmentKind::Function => "function",
            FragmentKind::Event => "event",
            FragmentKind::Error => "error",
        }
    }
}

impl fmt::Display for FragmentKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FragmentKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "constructor" => Ok(FragmentKind::Constructor),
            "function" => Ok(FragmentKind::Function),
            "event" => Ok(FragmentKind::Event),
            "error" => Ok(FragmentKind::Error),
            _ => Err(Error::argument("unsupported fragment type", "type", s)),
        }
    }
}

// ── Shared callable record ────────────────────────────────

/// Inputs and mutability shared by constructors and functions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Callable {
    inputs: Vec<ParamType>,
    mutability: Mutability,
}

impl Callable {
    pub(crate) fn new(inputs: Vec<ParamType>, mutability: Mutability) -> Self {
        Callable { inputs, mutability }
    }

    pub fn inputs(&self) -> &[ParamType] {
        &self.inputs
    }

    pub fn mutability(&self) -> Mutability {
        self.mutability
    }

    pub fn state_mutability(&self) -> StateMutability {
        self.mutability.state_mutability()
    }

    pub fn payable(&self) -> bool {
        self.mutability.payable()
    }

    pub fn constant(&self) -> bool {
        self.mutability.constant()
    }

    /// ` <mutability>` unless it is the implied `nonpayable`
    fn render_mutability(&self) -> String {
        match self.state_mutability() {
            StateMutability::NonPayable => String::new(),
            other => format!(" {}", other),
        }
    }
}

// ── Fragment ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    Constructor(ConstructorFragment),
    Function(FunctionFragment),
    Event(EventFragment),
    Error(ErrorFragment),
}

impl Fragment {
    /// Parse a declaration, dispatching on its leading keyword.
    ///
    /// # Errors
    /// `Argument` for an unrecognized keyword, otherwise whatever the
    /// matching grammar reports.
    pub fn from_declaration(text: &str) -> Result<Self> {
        let value = normalize_declaration(text);
        let keyword = value.split(' ').next().unwrap_or_default();

        if keyword == "event" {
            EventFragment::from_declaration(&value).map(Fragment::Event)
        } else if keyword == "function" {
            FunctionFragment::from_declaration(&value).map(Fragment::Function)
        } else if value.split('(').next().map(str::trim) == Some("constructor") {
            ConstructorFragment::from_declaration(&value).map(Fragment::Constructor)
        } else if keyword == "error" {
            ErrorFragment::from_declaration(&value).map(Fragment::Error)
        } else {
            Err(Error::argument("unsupported fragment", "value", text))
        }
    }

    /// Build from an interchange object, dispatching on its `type`.
    pub fn from_object(value: &JsonFragment) -> Result<Self> {
        let kind = value.kind.as_deref().unwrap_or_default();
        match kind.parse::<FragmentKind>() {
            Ok(FragmentKind::Constructor) => {
                ConstructorFragment::from_object(value).map(Fragment::Constructor)
            }
            Ok(FragmentKind::Function) => FunctionFragment::from_object(value).map(Fragment::Function),
            Ok(FragmentKind::Event) => EventFragment::from_object(value).map(Fragment::Event),
            Ok(FragmentKind::Error) => ErrorFragment::from_object(value).map(Fragment::Error),
            Err(_) => Err(Error::argument(
                "invalid fragment object",
                "value",
                value.describe(),
            )),
        }
    }

    pub fn kind(&self) -> FragmentKind {
        match self {
            Fragment::Constructor(_) => FragmentKind::Constructor,
            Fragment::Function(_) => FragmentKind::Function,
            Fragment::Event(_) => FragmentKind::Event,
            Fragment::Error(_) => FragmentKind::Error,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Fragment::Constructor(_) => None,
            Fragment::Function(f) => Some(f.name()),
            Fragment::Event(f) => Some(f.name()),
            Fragment::Error(f) => f.name(),
        }
    }

    pub fn inputs(&self) -> &[ParamType] {
        match self {
            Fragment::Constructor(f) => f.inputs(),
            Fragment::Function(f) => f.inputs(),
            Fragment::Event(f) => f.inputs(),
            Fragment::Error(f) => f.inputs(),
        }
    }

    pub fn format(&self, mode: FormatMode) -> Result<Formatted> {
        match self {
            Fragment::Constructor(f) => f.format(mode),
            Fragment::Function(f) => f.format(mode),
            Fragment::Event(f) => f.format(mode),
            Fragment::Error(f) => f.format(mode),
        }
    }

    /// Canonical bare signature; constructors have none.
    pub fn signature(&self) -> Result<String> {
        match self {
            Fragment::Constructor(_) => Err(unsupported_sighash(FragmentKind::Constructor)),
            Fragment::Function(f) => Ok(f.signature()),
            Fragment::Event(f) => Ok(f.signature()),
            Fragment::Error(f) => Ok(f.signature()),
        }
    }

    /// `0x`-prefixed selector (functions, errors) or topic (events)
    pub fn selector_hex(&self) -> Option<String> {
        let bytes = match self {
            Fragment::Constructor(_) => return None,
            Fragment::Function(f) => f.selector().to_vec(),
            Fragment::Event(f) => f.topic().to_vec(),
            Fragment::Error(f) => f.selector().to_vec(),
        };
        Some(format!("0x{}", hex::encode(bytes)))
    }

    pub fn to_json(&self) -> JsonFragment {
        match self {
            Fragment::Constructor(f) => f.to_json(),
            Fragment::Function(f) => f.to_json(),
            Fragment::Event(f) => f.to_json(),
            Fragment::Error(f) => f.to_json(),
        }
    }
}

impl From<ConstructorFragment> for Fragment {
    fn from(f: ConstructorFragment) -> Self {
        Fragment::Constructor(f)
    }
}

impl From<FunctionFragment> for Fragment {
    fn from(f: FunctionFragment) -> Self {
        Fragment::Function(f)
    }
}

impl From<EventFragment> for Fragment {
    fn from(f: EventFragment) -> Self {
        Fragment::Event(f)
    }
}

impl From<ErrorFragment> for Fragment {
    fn from(f: ErrorFragment) -> Self {
        Fragment::Error(f)
    }
}

// ── Declarations ──────────────────────────────────────────

/// Anything that can become a fragment
#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    Text(String),
    Object(JsonFragment),
    Fragment(Fragment),
}

impl Declaration {
    /// Objects describing the default `fallback`/`receive` functions, which
    /// have no fragment representation
    pub fn is_default_function(&self) -> bool {
        match self {
            Declaration::Object(value) => {
                matches!(value.kind.as_deref(), Some("fallback") | Some("receive"))
            }
            _ => false,
        }
    }
}

impl From<&str> for Declaration {
    fn from(text: &str) -> Self {
        Declaration::Text(text.to_string())
    }
}

impl From<String> for Declaration {
    fn from(text: String) -> Self {
        Declaration::Text(text)
    }
}

impl From<&String> for Declaration {
    fn from(text: &String) -> Self {
        Declaration::Text(text.clone())
    }
}

impl From<JsonFragment> for Declaration {
    fn from(value: JsonFragment) -> Self {
        Declaration::Object(value)
    }
}

impl From<Fragment> for Declaration {
    fn from(fragment: Fragment) -> Self {
        Declaration::Fragment(fragment)
    }
}

/// Parse a declaration string, an interchange object or pass a fragment through.
///
/// # Example
/// ```
/// use hrabi_core::{parse_fragment, FormatMode};
///
/// let f = parse_fragment("function foo(uint a) public").unwrap();
/// assert_eq!(f.signature().unwrap(), "foo(uint256)");
/// assert_eq!(
///     f.format(FormatMode::Full).unwrap().to_string(),
///     "function foo(uint256 a)"
/// );
/// ```
pub fn parse_fragment(value: impl Into<Declaration>) -> Result<Fragment> {
    match value.into() {
        Declaration::Fragment(fragment) => Ok(fragment),
        Declaration::Text(text) => Fragment::from_declaration(&text),
        Declaration::Object(object) => Fragment::from_object(&object),
    }
}

// ── Shared helpers ────────────────────────────────────────

fn parse_params(text: &str, allow_indexed: bool) -> Result<Vec<ParamType>> {
    split_nesting(text)?
        .iter()
        .map(|field| ParamType::from_declaration(field, allow_indexed))
        .collect()
}

fn params_from_json(values: Option<&[JsonParamType]>) -> Result<Vec<ParamType>> {
    values
        .unwrap_or_default()
        .iter()
        .map(ParamType::from_object)
        .collect()
}

fn params_to_json(params: &[ParamType]) -> Vec<JsonParamType> {
    params.iter().map(ParamType::to_json).collect()
}

fn expect_kind(value: &JsonFragment, kind: FragmentKind) -> Result<()> {
    if value.kind.as_deref() == Some(kind.as_str()) {
        Ok(())
    } else {
        Err(Error::argument(
            format!("invalid {} object", kind),
            "value",
            value.describe(),
        ))
    }
}

/// Drop a leading `<keyword> ` from a normalized declaration.
fn strip_keyword<'a>(value: &'a str, keyword: &str) -> &'a str {
    value
        .strip_prefix(keyword)
        .and_then(|rest| rest.strip_prefix(' '))
        .unwrap_or(value)
        .trim()
}

fn unsupported_sighash(kind: FragmentKind) -> Error {
    Error::UnsupportedFormat {
        entity: kind.to_string(),
        mode: FormatMode::Sighash.to_string(),
    }
}

fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&Keccak256::digest(data));
    hash
}

fn selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}
