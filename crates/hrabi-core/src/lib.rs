//! hrabi core - human-readable contract interface fragments
//!
//! Parses constructor, function, event and custom-error declarations, in
//! either the compact human-readable form or the JSON ABI object form, and
//! renders them back in any of four output conventions.
//!
//! # Architecture
//!
//! ```text
//! "function foo(uint a) view"          {"type": "function", ...}
//!          ↓                                    ↓
//!   normalize → split → parse_param      serde → JsonFragment
//!          ↓                                    ↓
//!          └──────→ ParamType + Mutability ←────┘
//!                          ↓
//!                      Fragment ──→ format(sighash | minimal | full | json)
//!                          ↓
//!                      Interface (deduplicated by signature)
//! ```
//!
//! # Guarantees
//!
//! - **Immutable**: parameters and fragments have no mutation API once built
//! - **All or nothing**: a failed parse never yields a partial value
//! - **Reversible**: the `full` and `json` renderings parse back to an equal fragment
//!
//! # Example
//!
//! ```
//! use hrabi_core::{parse_fragment, FormatMode};
//!
//! let event = parse_fragment("event Transfer(address indexed from, address indexed to, uint value)")?;
//! assert_eq!(event.signature()?, "Transfer(address,address,uint256)");
//! assert_eq!(
//!     event.format(FormatMode::Minimal)?.to_string(),
//!     "event Transfer(address indexed,address indexed,uint256)"
//! );
//! # Ok::<(), hrabi_core::Error>(())
//! ```

pub mod diagnostic;
pub mod error;
pub mod format;
pub mod fragment;
pub mod interchange;
pub mod interface;
pub mod mutability;
pub mod param;
pub mod parser;
pub mod source;

pub use diagnostic::{Diagnostic, DiagnosticKind, Severity};
pub use error::{Error, Result};
pub use format::{FormatMode, Formatted};
pub use fragment::{
    parse_fragment, Callable, ConstructorFragment, Declaration, ErrorFragment, EventFragment,
    Fragment, FragmentKind, FunctionFragment,
};
pub use interchange::{JsonFragment, JsonParamType};
pub use interface::{parse_abi, Interface};
pub use mutability::{Mutability, MutabilityInput, StateMutability};
pub use param::{ParamKind, ParamType};

/// Version of this library crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
