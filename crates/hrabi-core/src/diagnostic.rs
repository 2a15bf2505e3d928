//! Diagnostics - non-fatal findings collected while building an interface
//!
//! Strict builds abort on the first error, so their diagnostics are only
//! warnings. Lenient builds also record each skipped declaration as an
//! error-level diagnostic.

use std::fmt;

use serde::Serialize;

/// A single finding, tied to the declaration that caused it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    pub message: String,
    /// Zero-based position of the declaration in the input list
    pub index: Option<usize>,
}

impl Diagnostic {
    pub fn warning(kind: DiagnosticKind, message: impl Into<String>, index: Option<usize>) -> Self {
        Diagnostic {
            severity: Severity::Warning,
            kind,
            message: message.into(),
            index,
        }
    }

    pub fn error(kind: DiagnosticKind, message: impl Into<String>, index: Option<usize>) -> Self {
        Diagnostic {
            severity: Severity::Error,
            kind,
            message: message.into(),
            index,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let prefix = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        if let Some(index) = self.index {
            write!(f, "{} [{}] at #{}: {}", prefix, self.kind, index, self.message)
        } else {
            write!(f, "{} [{}]: {}", prefix, self.kind, self.message)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A signature already present in the interface; the later one is dropped
    DuplicateDefinition,
    /// A malformed declaration left out of a lenient build
    SkippedDeclaration,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DiagnosticKind::DuplicateDefinition => write!(f, "duplicate"),
            DiagnosticKind::SkippedDeclaration => write!(f, "skipped"),
        }
    }
}
