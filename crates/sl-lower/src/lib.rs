//! The AST-to-Lua lowering engine.
//!
//! Bridges SL's class/type model onto Lua 5.x text: a single-pass,
//! synchronous recursive emitter driven by the node kind of each visited
//! tree node. Nothing here parses, type-checks, or writes files — the
//! `sl-ast` crate supplies the tree and the type oracle; this crate turns
//! that tree into a Lua source string, or fails synchronously with the
//! first unsupported node it meets.

mod class;
mod dispatcher;
mod expr;
mod forloop;
mod rewrite;
mod state;
mod stmt;

use sl_ast::{Node, TypeChecker};
use sl_common::TranspileError;

use state::EmitterState;

/// Lower one SL file to a Lua source string.
///
/// `root` must be a `Program` node. Translation is all-or-nothing: the
/// first unsupported construct aborts and discards any partial output.
pub fn lower_file(root: &Node, checker: &dyn TypeChecker) -> Result<String, TranspileError> {
    let mut emitter = Emitter::new(checker);
    emitter.emit_file(root)
}

/// Owns the mutable state of exactly one `lower_file` call.
///
/// Borrows the `TypeChecker` for that call's lifetime and never stores a
/// `Node` beyond the recursive call that's currently examining it.
pub struct Emitter<'a> {
    checker: &'a dyn TypeChecker,
    state: EmitterState,
}

impl<'a> Emitter<'a> {
    pub fn new(checker: &'a dyn TypeChecker) -> Self {
        Self {
            checker,
            state: EmitterState::new(),
        }
    }
}
