use std::rc::Rc;

use crate::node::Node;
use crate::ty::Type;

/// Maps a `Node` to its `Type`, per `spec.md` §3.
///
/// `spec.md` §5 requires the checker to be "a pure, idempotent oracle": the
/// lowering engine may call `type_of` any number of times on the same node
/// and must observe a stable answer. `sl-lower` relies on that — it never
/// caches a `type_of` result across a single `emit_node` call, trusting the
/// checker to answer consistently.
pub trait TypeChecker {
    fn type_of(&self, node: &Node) -> Option<Rc<dyn Type>>;
}
