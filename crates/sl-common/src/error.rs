use std::fmt;

use crate::span::Span;

/// An error raised while lowering an SL AST to Lua.
///
/// Lowering is single-pass and non-recovering: the first unsupported node
/// aborts translation of the whole file and any partial output is discarded
/// (`spec.md` §7). The error carries the span of the offending node so the
/// front-end can map it back to a source location; this crate never
/// resolves a span to line/column itself.
#[derive(Debug, Clone, PartialEq)]
pub struct TranspileError {
    pub reason: Reason,
    pub span: Span,
    pub message: String,
}

impl TranspileError {
    /// Create a new transpile error.
    pub fn new(reason: Reason, span: Span, message: impl Into<String>) -> Self {
        Self {
            reason,
            span,
            message: message.into(),
        }
    }
}

/// The specific reason a translation was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    /// A node kind or shape not in the supported subset (`continue`, object
    /// destructuring in a declaration, an unsupported import form, ...).
    UnsupportedSyntax,
    /// A string method call with no rewrite rule.
    UnsupportedStringCall,
    /// A string property access other than `.length`.
    UnsupportedStringProperty,
    /// An array method call with no rewrite rule.
    UnsupportedArrayCall,
    /// An array property access other than `.length`.
    UnsupportedArrayProperty,
    /// An enum member initializer that isn't a numeric literal.
    UnsupportedEnumInit,
    /// The for-loop analyzer could not recognize a numeric `for` shape.
    UnsupportedForShape,
    /// A named import renamed an imported binding (`import { a as b }`).
    RenamedImport,
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::UnsupportedSyntax => "unsupported syntax",
            Self::UnsupportedStringCall => "unsupported string method call",
            Self::UnsupportedStringProperty => "unsupported string property access",
            Self::UnsupportedArrayCall => "unsupported array method call",
            Self::UnsupportedArrayProperty => "unsupported array property access",
            Self::UnsupportedEnumInit => "unsupported enum member initializer",
            Self::UnsupportedForShape => "unsupported numeric for-loop shape",
            Self::RenamedImport => "renamed import binding",
        };
        write!(f, "{s}")
    }
}

impl fmt::Display for TranspileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.reason, self.message)
    }
}

impl std::error::Error for TranspileError {}
