//! Type-aware rewriting of string/array method calls and property access.
//!
//! These tables are deliberately small and exact — anything not listed
//! fails closed with the matching `Unsupported*` reason rather than
//! falling back to a generic call shape.

use sl_ast::Node;
use sl_common::{Reason, TranspileError};

use crate::Emitter;

impl<'a> Emitter<'a> {
    pub(crate) fn rewrite_string_call(
        &mut self,
        receiver: &Node,
        method: &str,
        args: &[Node],
    ) -> Result<String, TranspileError> {
        let s = self.emit_expr(receiver, false)?;
        match method {
            "replace" => {
                let rest = self.emit_arg_list(args)?;
                if rest.is_empty() {
                    Ok(format!("string.sub({s})"))
                } else {
                    Ok(format!("string.sub({s},{rest})"))
                }
            }
            "indexOf" if args.len() == 1 => {
                let x = self.emit_expr(&args[0], false)?;
                Ok(format!(
                    "(string.find({s}, {x}, 1, true) or 0) - 1"
                ))
            }
            "indexOf" if args.len() == 2 => {
                let x = self.emit_expr(&args[0], false)?;
                let from = self.emit_expr(&args[1], false)?;
                Ok(format!(
                    "(string.find({s}, {x}, {from}+1, true) or 0) - 1"
                ))
            }
            _ => Err(TranspileError::new(
                Reason::UnsupportedStringCall,
                receiver.span,
                format!("unsupported string method `{method}`"),
            )),
        }
    }

    pub(crate) fn rewrite_array_call(
        &mut self,
        receiver: &Node,
        method: &str,
        args: &[Node],
    ) -> Result<String, TranspileError> {
        let a = self.emit_expr(receiver, false)?;
        match method {
            "push" => {
                let rest = self.emit_arg_list(args)?;
                Ok(format!("table.insert({a},{rest})"))
            }
            "forEach" => {
                let rest = self.emit_arg_list(args)?;
                Ok(format!("TS_forEach({a},{rest})"))
            }
            "map" => self.array_prelude_call("TS_map", &a, args),
            "filter" => self.array_prelude_call("TS_filter", &a, args),
            "some" => self.array_prelude_call("TS_some", &a, args),
            "every" => self.array_prelude_call("TS_every", &a, args),
            "slice" => self.array_prelude_call("TS_slice", &a, args),
            _ => Err(TranspileError::new(
                Reason::UnsupportedArrayCall,
                receiver.span,
                format!("unsupported array method `{method}`"),
            )),
        }
    }

    fn array_prelude_call(
        &mut self,
        helper: &str,
        receiver_text: &str,
        args: &[Node],
    ) -> Result<String, TranspileError> {
        let rest = self.emit_arg_list(args)?;
        if rest.is_empty() {
            Ok(format!("{helper}({receiver_text})"))
        } else {
            Ok(format!("{helper}({receiver_text},{rest})"))
        }
    }

    pub(crate) fn emit_arg_list(&mut self, args: &[Node]) -> Result<String, TranspileError> {
        let mut parts = Vec::with_capacity(args.len());
        for arg in args {
            parts.push(self.emit_expr(arg, false)?);
        }
        Ok(parts.join(","))
    }

    /// `.length` is the only recognized string/array property.
    pub(crate) fn rewrite_string_property(
        &mut self,
        receiver: &Node,
        name: &str,
    ) -> Result<String, TranspileError> {
        if name == "length" {
            let s = self.emit_expr(receiver, false)?;
            Ok(format!("#{s}"))
        } else {
            Err(TranspileError::new(
                Reason::UnsupportedStringProperty,
                receiver.span,
                format!("unsupported string property `{name}`"),
            ))
        }
    }

    pub(crate) fn rewrite_array_property(
        &mut self,
        receiver: &Node,
        name: &str,
    ) -> Result<String, TranspileError> {
        if name == "length" {
            let a = self.emit_expr(receiver, false)?;
            Ok(format!("#{a}"))
        } else {
            Err(TranspileError::new(
                Reason::UnsupportedArrayProperty,
                receiver.span,
                format!("unsupported array property `{name}`"),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sl_ast::testkit::{NodeBuilder, SimpleType, SimpleTypeChecker};

    #[test]
    fn replace_maps_to_string_sub_bug_for_bug() {
        let b = NodeBuilder::new();
        let s = b.id("s");
        let s_id = s.id;
        let call = b.call(
            b.prop(s, "replace"),
            vec![b.str_lit("a"), b.str_lit("b")],
        );
        let mut checker = SimpleTypeChecker::new();
        checker.set(s_id, SimpleType::string());
        let mut emitter = Emitter::new(&checker);
        let out = emitter.emit_expr(&call, false).unwrap();
        assert_eq!(out, "string.sub(s,\"a\",\"b\")");
    }

    #[test]
    fn unknown_string_method_fails() {
        let b = NodeBuilder::new();
        let s = b.id("s");
        let s_id = s.id;
        let call = b.call(b.prop(s, "trim"), vec![]);
        let mut checker = SimpleTypeChecker::new();
        checker.set(s_id, SimpleType::string());
        let mut emitter = Emitter::new(&checker);
        let err = emitter.emit_expr(&call, false).unwrap_err();
        assert_eq!(err.reason, Reason::UnsupportedStringCall);
    }

    #[test]
    fn array_push_rewrite() {
        let b = NodeBuilder::new();
        let a = b.id("a");
        let a_id = a.id;
        let call = b.call(b.prop(a, "push"), vec![b.num("1")]);
        let mut checker = SimpleTypeChecker::new();
        checker.set(a_id, SimpleType::array());
        let mut emitter = Emitter::new(&checker);
        let out = emitter.emit_expr(&call, false).unwrap();
        assert_eq!(out, "table.insert(a,1)");
    }
}
