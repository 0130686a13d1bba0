//! Shared primitives for the SL-to-Lua lowering workspace.
//!
//! Exists so `sl-ast` (the front-end data model) and `sl-lower` (the
//! lowering engine) can speak the same `Span` and `TranspileError` types
//! without a dependency cycle between them.

pub mod error;
pub mod span;

pub use error::{Reason, TranspileError};
pub use span::Span;
