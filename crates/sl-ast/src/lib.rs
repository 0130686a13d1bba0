//! The front-end data model `sl-lower` is written against.
//!
//! `spec.md` §3 describes four entities the lowering engine treats as
//! externally provided and never constructs itself: `Node`, `Type`,
//! `TypeChecker`, and `Token`. This crate is the Rust shape of that
//! contract — nothing here does lexing, parsing, or inference.
//!
//! The `testkit` module (only compiled for tests, or with the `testkit`
//! feature) is the one exception: a hand-built fixture front-end used to
//! exercise `sl-lower` in the absence of a real one. See `SPEC_FULL.md` §3a.

pub mod checker;
pub mod node;
pub mod ty;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;

pub use checker::TypeChecker;
pub use node::{Node, NodeId, NodeKind};
pub use ty::Type;
