//! Interface - a deduplicated collection of fragments
//!
//! Functions, events and errors are bucketed by their bare signature; the
//! first definition of a signature wins and later ones are reported as
//! duplicate diagnostics. Constructors are kept in declaration order but not
//! bucketed. Default `fallback`/`receive` objects are dropped.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::diagnostic::{Diagnostic, DiagnosticKind, Severity};
use crate::format::{FormatMode, Formatted};
use crate::fragment::{
    parse_fragment, ConstructorFragment, Declaration, ErrorFragment, EventFragment, Fragment,
    FragmentKind, FunctionFragment,
};
use crate::interchange::JsonFragment;
use crate::source::{read_declarations, read_json};
use crate::{Error, Result};

/// Built once from a list of declarations, read-only afterwards
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Interface {
    fragments: Vec<Fragment>,
    functions: BTreeMap<String, FunctionFragment>,
    events: BTreeMap<String, EventFragment>,
    errors: BTreeMap<String, ErrorFragment>,
    diagnostics: Vec<Diagnostic>,
}

impl Interface {
    // ── Construction ───────────────────────────────────

    /// Build from declarations; the first malformed one aborts the build.
    pub fn new<I, D>(declarations: I) -> Result<Self>
    where
        I: IntoIterator<Item = D>,
        D: Into<Declaration>,
    {
        let mut interface = Interface::default();
        for (index, declaration) in declarations.into_iter().enumerate() {
            interface.add(declaration.into(), index)?;
        }
        Ok(interface)
    }

    /// Build from declarations, skipping malformed ones.
    ///
    /// Every skipped declaration is recorded as an error-level diagnostic.
    pub fn new_lenient<I, D>(declarations: I) -> Self
    where
        I: IntoIterator<Item = D>,
        D: Into<Declaration>,
    {
        let mut interface = Interface::default();
        for (index, declaration) in declarations.into_iter().enumerate() {
            if let Err(err) = interface.add(declaration.into(), index) {
                warn!(index, error = %err, "skipping declaration #{}: {}", index, err);
                interface.diagnostics.push(Diagnostic::error(
                    DiagnosticKind::SkippedDeclaration,
                    err.to_string(),
                    Some(index),
                ));
            }
        }
        interface
    }

    /// Build from a JSON array of declaration strings and ABI objects.
    pub fn from_json(text: &str) -> Result<Self> {
        Self::new(read_json(text)?)
    }

    /// Build from a declaration file (line layout or JSON array).
    pub fn from_source(text: &str) -> Result<Self> {
        Self::new(read_declarations(text)?)
    }

    /// Parse one declaration and record it. Nothing is recorded on failure.
    fn add(&mut self, declaration: Declaration, index: usize) -> Result<()> {
        if declaration.is_default_function() {
            debug!(index, "dropping default function entry");
            return Ok(());
        }
        let fragment = parse_fragment(declaration)?;
        self.insert(fragment, index);
        Ok(())
    }

    fn insert(&mut self, fragment: Fragment, index: usize) {
        match self.bucket(&fragment) {
            Some((kind, signature, false)) => {
                warn!(%kind, signature = %signature, "duplicate definition of {} {}", kind, signature);
                self.diagnostics.push(Diagnostic::warning(
                    DiagnosticKind::DuplicateDefinition,
                    format!("duplicate definition of {} {}", kind, signature),
                    Some(index),
                ));
            }
            _ => self.fragments.push(fragment),
        }
    }

    /// Record a fragment in its signature map; constructors are not bucketed.
    ///
    /// Returns the kind, the signature and whether the signature was new.
    fn bucket(&mut self, fragment: &Fragment) -> Option<(FragmentKind, String, bool)> {
        let (kind, signature, fresh) = match fragment {
            Fragment::Constructor(_) => return None,
            Fragment::Function(f) => {
                let signature = f.signature();
                let fresh = insert_unique(&mut self.functions, &signature, f);
                (FragmentKind::Function, signature, fresh)
            }
            Fragment::Event(f) => {
                let signature = f.signature();
                let fresh = insert_unique(&mut self.events, &signature, f);
                (FragmentKind::Event, signature, fresh)
            }
            Fragment::Error(f) => {
                let signature = f.signature();
                let fresh = insert_unique(&mut self.errors, &signature, f);
                (FragmentKind::Error, signature, fresh)
            }
        };
        Some((kind, signature, fresh))
    }

    // ── Accessors ──────────────────────────────────────

    /// Retained fragments in declaration order
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// The first constructor, if any
    pub fn constructor(&self) -> Option<&ConstructorFragment> {
        self.fragments.iter().find_map(|f| match f {
            Fragment::Constructor(c) => Some(c),
            _ => None,
        })
    }

    /// Functions keyed by signature
    pub fn functions(&self) -> &BTreeMap<String, FunctionFragment> {
        &self.functions
    }

    /// Events keyed by signature
    pub fn events(&self) -> &BTreeMap<String, EventFragment> {
        &self.events
    }

    /// Errors keyed by signature
    pub fn errors(&self) -> &BTreeMap<String, ErrorFragment> {
        &self.errors
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    // ── Lookup ─────────────────────────────────────────

    /// Look up a function by signature (`foo(uint)`), selector (`0x...`) or bare name.
    pub fn function(&self, key: &str) -> Result<&FunctionFragment> {
        lookup(&self.functions, key)
    }

    /// Look up an event by signature, topic or bare name.
    pub fn event(&self, key: &str) -> Result<&EventFragment> {
        lookup(&self.events, key)
    }

    /// Look up an error by signature, selector or bare name.
    pub fn error(&self, key: &str) -> Result<&ErrorFragment> {
        lookup(&self.errors, key)
    }

    // ── Formatting ─────────────────────────────────────

    /// Render every retained fragment.
    ///
    /// # Errors
    /// `UnsupportedFormat` for `sighash`.
    pub fn format(&self, mode: FormatMode) -> Result<Vec<Formatted>> {
        if mode == FormatMode::Sighash {
            return Err(Error::UnsupportedFormat {
                entity: "interface".into(),
                mode: mode.to_string(),
            });
        }
        self.fragments.iter().map(|f| f.format(mode)).collect()
    }

    pub fn to_json(&self) -> Vec<JsonFragment> {
        self.fragments.iter().map(Fragment::to_json).collect()
    }

    /// The whole interface as a JSON array
    pub fn abi_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self.to_json())?)
    }

    pub fn to_json_string(&self, pretty: bool) -> Result<String> {
        let abi = self.to_json();
        let text = if pretty {
            serde_json::to_string_pretty(&abi)?
        } else {
            serde_json::to_string(&abi)?
        };
        Ok(text)
    }
}

/// Build an interface and return its JSON rendering in one call.
///
/// # Example
/// ```
/// let abi = hrabi_core::parse_abi(["function foo(uint a) view returns (bool)"]).unwrap();
/// assert_eq!(abi[0]["stateMutability"], "view");
/// ```
pub fn parse_abi<I, D>(declarations: I) -> Result<serde_json::Value>
where
    I: IntoIterator<Item = D>,
    D: Into<Declaration>,
{
    Interface::new(declarations)?.abi_json()
}

// ── Lookup helpers ────────────────────────────────────────

/// What lookups need from a bucketed fragment kind
trait Member {
    const KIND: FragmentKind;

    fn member_name(&self) -> Option<&str>;

    fn selector_hex(&self) -> String;

    /// Canonical signature of a lookup key such as `foo(uint a)`
    fn canonical(key: &str) -> Result<String>;
}

impl Member for FunctionFragment {
    const KIND: FragmentKind = FragmentKind::Function;

    fn member_name(&self) -> Option<&str> {
        Some(self.name())
    }

    fn selector_hex(&self) -> String {
        format!("0x{}", hex::encode(self.selector()))
    }

    fn canonical(key: &str) -> Result<String> {
        Ok(FunctionFragment::from_declaration(key)?.signature())
    }
}

impl Member for EventFragment {
    const KIND: FragmentKind = FragmentKind::Event;

    fn member_name(&self) -> Option<&str> {
        Some(self.name())
    }

    fn selector_hex(&self) -> String {
        format!("0x{}", hex::encode(self.topic()))
    }

    fn canonical(key: &str) -> Result<String> {
        Ok(EventFragment::from_declaration(key)?.signature())
    }
}

impl Member for ErrorFragment {
    const KIND: FragmentKind = FragmentKind::Error;

    fn member_name(&self) -> Option<&str> {
        self.name()
    }

    fn selector_hex(&self) -> String {
        format!("0x{}", hex::encode(self.selector()))
    }

    fn canonical(key: &str) -> Result<String> {
        Ok(ErrorFragment::from_declaration(key)?.signature())
    }
}

fn insert_unique<T: Clone>(map: &mut BTreeMap<String, T>, signature: &str, value: &T) -> bool {
    match map.entry(signature.to_string()) {
        Entry::Vacant(slot) => {
            slot.insert(value.clone());
            true
        }
        Entry::Occupied(_) => false,
    }
}

fn lookup<'a, T: Member>(map: &'a BTreeMap<String, T>, key: &str) -> Result<&'a T> {
    let key = key.trim();
    let missing = || Error::argument(format!("no matching {}", T::KIND), "key", key);

    if key.starts_with("0x") {
        let wanted = key.to_ascii_lowercase();
        return map
            .values()
            .find(|member| member.selector_hex() == wanted)
            .ok_or_else(missing);
    }

    if key.contains('(') {
        let signature = T::canonical(key)?;
        return map.get(&signature).ok_or_else(missing);
    }

    let mut matches = map.values().filter(|member| member.member_name() == Some(key));
    match (matches.next(), matches.next()) {
        (Some(member), None) => Ok(member),
        (Some(_), Some(_)) => Err(Error::argument(
            format!("multiple matching {}s", T::KIND),
            "key",
            key,
        )),
        (None, _) => Err(missing()),
    }
}
