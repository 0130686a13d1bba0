//! Expression emission: literals, operators, calls, access, and the
//! literal/function forms.

use sl_ast::node::{
    ArrowBody, BinOpKind, Node, NodeKind, ObjectProperty, PropertyKey, UnaryOpKind,
};
use sl_common::{Reason, TranspileError};

use crate::Emitter;

impl<'a> Emitter<'a> {
    /// Emit `node` as an expression. When `brackets` is true the whole
    /// result is wrapped in parentheses — used for binary operands, per
    /// `spec.md` §4.3's "every operand is emitted with brackets=true".
    pub fn emit_expr(&mut self, node: &Node, brackets: bool) -> Result<String, TranspileError> {
        match &node.kind {
            NodeKind::Identifier(name) => Ok(wrap(name.clone(), brackets)),
            NodeKind::NumericLiteral(text) => Ok(wrap(text.clone(), brackets)),
            NodeKind::StringLiteral(text) => Ok(wrap(format!("\"{text}\""), brackets)),
            NodeKind::BoolLiteral(b) => Ok(wrap(b.to_string(), brackets)),
            NodeKind::NullLiteral => Ok(wrap("nil".to_string(), brackets)),
            NodeKind::This => Ok(wrap("self".to_string(), brackets)),
            NodeKind::Super => Ok(wrap("self.__base".to_string(), brackets)),

            NodeKind::TemplateExpr { quasis, exprs } => {
                let inner = self.emit_template(quasis, exprs)?;
                Ok(wrap(inner, brackets))
            }

            NodeKind::Binary { op, left, right } => {
                let inner = self.emit_binary(op.kind, left, right)?;
                Ok(wrap(inner, brackets))
            }

            NodeKind::Unary {
                op,
                operand,
                prefix,
            } => {
                let inner = self.emit_unary(op.kind, operand, *prefix)?;
                Ok(wrap(inner, brackets))
            }

            NodeKind::Conditional {
                cond,
                then_expr,
                else_expr,
            } => {
                let c = self.emit_expr(cond, false)?;
                let a = self.emit_expr(then_expr, false)?;
                let b = self.emit_expr(else_expr, false)?;
                let inner =
                    format!("TS_ITE({c}, function() return {a} end, function() return {b} end)");
                Ok(wrap(inner, brackets))
            }

            NodeKind::Call { callee, args } => {
                let inner = self.emit_call(callee, args)?;
                Ok(wrap(inner, brackets))
            }

            NodeKind::New { callee, args } => {
                let callee_text = self.emit_expr(callee, false)?;
                let mut parts = vec!["true".to_string()];
                for arg in args {
                    parts.push(self.emit_expr(arg, false)?);
                }
                Ok(wrap(format!("{}.new({})", callee_text, parts.join(",")), brackets))
            }

            NodeKind::PropertyAccess { object, name } => {
                let inner = self.emit_property_access(object, name)?;
                Ok(wrap(inner, brackets))
            }

            NodeKind::ElementAccess { object, index } => {
                let inner = self.emit_element_access(object, index)?;
                Ok(wrap(inner, brackets))
            }

            NodeKind::ArrayLiteral(elements) => {
                let mut parts = Vec::with_capacity(elements.len());
                for e in elements {
                    parts.push(self.emit_expr(e, false)?);
                }
                Ok(wrap(format!("{{{}}}", parts.join(", ")), brackets))
            }

            NodeKind::ObjectLiteral(props) => {
                let inner = self.emit_object_literal(props)?;
                Ok(wrap(inner, brackets))
            }

            NodeKind::FunctionExpr { params, body } => {
                let inner = self.emit_function_expr(params, body)?;
                Ok(wrap(inner, brackets))
            }

            NodeKind::ArrowExpr { params, body } => {
                let inner = self.emit_arrow_expr(params, body)?;
                Ok(wrap(inner, brackets))
            }

            NodeKind::Parenthesized(inner) => {
                let text = self.emit_expr(inner, false)?;
                Ok(wrap(text, brackets))
            }

            NodeKind::TypeAssertion(inner) | NodeKind::AsCast(inner) => {
                self.emit_expr(inner, brackets)
            }

            NodeKind::ComputedPropertyName(inner) => {
                let text = self.emit_expr(inner, false)?;
                Ok(wrap(format!("[{text}]"), brackets))
            }

            _ => Err(TranspileError::new(
                Reason::UnsupportedSyntax,
                node.span,
                "node kind is not a supported expression",
            )),
        }
    }

    fn emit_template(&mut self, quasis: &[String], exprs: &[Node]) -> Result<String, TranspileError> {
        let mut out = format!("\"{}\"", quasis[0]);
        for (i, expr) in exprs.iter().enumerate() {
            let text = self.emit_expr(expr, false)?;
            out.push_str("..(");
            out.push_str(&text);
            out.push(')');
            out.push_str("..");
            out.push_str(&format!("\"{}\"", quasis[i + 1]));
        }
        Ok(out)
    }

    fn emit_binary(
        &mut self,
        kind: BinOpKind,
        left: &Node,
        right: &Node,
    ) -> Result<String, TranspileError> {
        match kind {
            BinOpKind::Assign => {
                let l = self.emit_expr(left, false)?;
                let r = self.emit_expr(right, false)?;
                Ok(format!("{l} = {r}"))
            }
            BinOpKind::PlusAssign => {
                let l = self.emit_expr(left, false)?;
                let r = self.emit_expr(right, false)?;
                Ok(format!("{l} = {l} + {r}"))
            }
            BinOpKind::MinusAssign => {
                let l = self.emit_expr(left, false)?;
                let r = self.emit_expr(right, false)?;
                Ok(format!("{l} = {l} - {r}"))
            }
            BinOpKind::BitAnd => {
                let l = self.emit_expr(left, false)?;
                let r = self.emit_expr(right, false)?;
                Ok(format!("bit.band({l},{r})"))
            }
            BinOpKind::BitOr => {
                let l = self.emit_expr(left, false)?;
                let r = self.emit_expr(right, false)?;
                Ok(format!("bit.bor({l},{r})"))
            }
            BinOpKind::Add => {
                let l = self.emit_expr(left, true)?;
                let r = self.emit_expr(right, true)?;
                if self.is_string_operand(left) {
                    Ok(format!("{l}..{r}"))
                } else {
                    Ok(format!("{l}+{r}"))
                }
            }
            BinOpKind::Sub => self.plain_binary(left, right, "-"),
            BinOpKind::Mul => self.plain_binary(left, right, "*"),
            BinOpKind::Div => self.plain_binary(left, right, "/"),
            BinOpKind::Mod => self.plain_binary(left, right, "%"),
            BinOpKind::Lt => self.plain_binary(left, right, "<"),
            BinOpKind::Gt => self.plain_binary(left, right, ">"),
            BinOpKind::Le => self.plain_binary(left, right, "<="),
            BinOpKind::Ge => self.plain_binary(left, right, ">="),
            BinOpKind::StrictEq => self.plain_binary(left, right, "=="),
            BinOpKind::NotEq | BinOpKind::StrictNotEq => self.plain_binary(left, right, "~="),
            BinOpKind::AndAnd => self.plain_binary(left, right, "and"),
            BinOpKind::OrOr => self.plain_binary(left, right, "or"),
        }
    }

    fn plain_binary(
        &mut self,
        left: &Node,
        right: &Node,
        op_text: &str,
    ) -> Result<String, TranspileError> {
        let l = self.emit_expr(left, true)?;
        let r = self.emit_expr(right, true)?;
        Ok(format!("{l}{op_text}{r}"))
    }

    fn is_string_operand(&self, node: &Node) -> bool {
        if matches!(node.kind, NodeKind::StringLiteral(_)) {
            return true;
        }
        self.checker
            .type_of(node)
            .map(|t| t.is_string() || t.is_string_literal())
            .unwrap_or(false)
    }

    fn emit_unary(
        &mut self,
        kind: UnaryOpKind,
        operand: &Node,
        _prefix: bool,
    ) -> Result<String, TranspileError> {
        match kind {
            UnaryOpKind::Incr => {
                let x = self.emit_expr(operand, false)?;
                Ok(format!("{x} = {x} + 1"))
            }
            UnaryOpKind::Decr => {
                let x = self.emit_expr(operand, false)?;
                Ok(format!("{x} = {x} - 1"))
            }
            UnaryOpKind::Not => {
                let x = self.emit_expr(operand, false)?;
                Ok(format!("not {x}"))
            }
            UnaryOpKind::Neg => {
                let x = self.emit_expr(operand, false)?;
                Ok(format!("-{x}"))
            }
        }
    }

    fn emit_call(&mut self, callee: &Node, args: &[Node]) -> Result<String, TranspileError> {
        if matches!(callee.kind, NodeKind::Super) {
            let rest = self.emit_arg_list(args)?;
            return Ok(if rest.is_empty() {
                "self.__base.constructor(self)".to_string()
            } else {
                format!("self.__base.constructor(self,{rest})")
            });
        }

        if let NodeKind::PropertyAccess { object, name } = &callee.kind {
            let receiver_ty = self.checker.type_of(object);
            let is_string = matches!(object.kind, NodeKind::StringLiteral(_))
                || receiver_ty
                    .as_ref()
                    .map(|t| t.is_string() || t.is_string_literal())
                    .unwrap_or(false);
            let is_array = receiver_ty.as_ref().map(|t| t.is_array()).unwrap_or(false);

            if is_string {
                return self.rewrite_string_call(object, name, args);
            }
            if is_array {
                return self.rewrite_array_call(object, name, args);
            }

            let callee_text = self.emit_expr(callee, false)?;
            let receiver_text = self.emit_expr(object, false)?;
            let mut parts = vec![receiver_text];
            for arg in args {
                parts.push(self.emit_expr(arg, false)?);
            }
            return Ok(format!("{}({})", callee_text, parts.join(",")));
        }

        let callee_text = self.emit_expr(callee, false)?;
        let rest = self.emit_arg_list(args)?;
        Ok(format!("{}({})", callee_text, rest))
    }

    fn emit_property_access(&mut self, object: &Node, name: &str) -> Result<String, TranspileError> {
        let ty = self.checker.type_of(object);
        let is_string = matches!(object.kind, NodeKind::StringLiteral(_))
            || ty
                .as_ref()
                .map(|t| t.is_string() || t.is_string_literal())
                .unwrap_or(false);
        if is_string {
            return self.rewrite_string_property(object, name);
        }
        if ty.as_ref().map(|t| t.is_array()).unwrap_or(false) {
            return self.rewrite_array_property(object, name);
        }
        if ty
            .as_ref()
            .map(|t| t.is_compile_members_only_enum())
            .unwrap_or(false)
        {
            return Ok(name.to_string());
        }
        let receiver = self.emit_expr(object, false)?;
        Ok(format!("{receiver}.{name}"))
    }

    fn emit_element_access(&mut self, object: &Node, index: &Node) -> Result<String, TranspileError> {
        let ty = self.checker.type_of(object);
        let is_string = matches!(object.kind, NodeKind::StringLiteral(_))
            || ty
                .as_ref()
                .map(|t| t.is_string() || t.is_string_literal())
                .unwrap_or(false);
        if is_string {
            let receiver = self.emit_expr(object, false)?;
            let idx = self.emit_expr(index, false)?;
            return Ok(format!("string.sub({receiver}, {idx}+1, {idx}+1)"));
        }
        let is_offset = ty
            .as_ref()
            .map(|t| t.is_array() || t.is_tuple())
            .unwrap_or(false);
        let receiver = self.emit_expr(object, false)?;
        let idx = self.emit_expr(index, false)?;
        if is_offset {
            Ok(format!("{receiver}[{idx}+1]"))
        } else {
            Ok(format!("{receiver}[{idx}]"))
        }
    }

    fn emit_object_literal(&mut self, props: &[ObjectProperty]) -> Result<String, TranspileError> {
        let mut parts = Vec::with_capacity(props.len());
        for p in props {
            let value = self.emit_expr(&p.value, false)?;
            match &p.key {
                PropertyKey::Identifier(name) => parts.push(format!("{name} = {value}")),
                PropertyKey::Computed(key_expr) => {
                    let key = self.emit_expr(key_expr, false)?;
                    parts.push(format!("[{key}] = {value}"));
                }
            }
        }
        Ok(format!("{{{}}}", parts.join(", ")))
    }

    fn emit_function_expr(&mut self, params: &[String], body: &Node) -> Result<String, TranspileError> {
        let indent = self.indent().to_string();
        let mut out = format!("function({})\n", params.join(","));
        self.push_indent();
        out.push_str(&self.emit_body(body)?);
        self.pop_indent();
        out.push_str(&format!("{indent}end"));
        Ok(out)
    }

    fn emit_arrow_expr(&mut self, params: &[String], body: &ArrowBody) -> Result<String, TranspileError> {
        match body {
            ArrowBody::Concise(expr) => {
                let text = self.emit_expr(expr, false)?;
                Ok(format!("function({}) return {} end", params.join(","), text))
            }
            ArrowBody::Block(node) => self.emit_function_expr(params, node),
        }
    }
}

fn wrap(text: String, brackets: bool) -> String {
    if brackets {
        format!("({text})")
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sl_ast::testkit::{NodeBuilder, SimpleType, SimpleTypeChecker};

    fn emit(node: &Node, checker: &dyn sl_ast::TypeChecker) -> String {
        let mut emitter = Emitter::new(checker);
        emitter.emit_expr(node, false).expect("emit should succeed")
    }

    #[test]
    fn scenario_1_binary_add() {
        let b = NodeBuilder::new();
        let bin = b.bin(BinOpKind::Add, "+", b.num("1"), b.num("2"));
        let checker = SimpleTypeChecker::new();
        assert_eq!(emit(&bin, &checker), "(1)+(2)");
    }

    #[test]
    fn string_plus_uses_concat() {
        let b = NodeBuilder::new();
        let left = b.str_lit("a");
        let bin = b.bin(BinOpKind::Add, "+", left, b.id("name"));
        let checker = SimpleTypeChecker::new();
        assert_eq!(emit(&bin, &checker), "(\"a\")..(name)");
    }

    #[test]
    fn null_this_super_rewrites() {
        let b = NodeBuilder::new();
        let checker = SimpleTypeChecker::new();
        assert_eq!(emit(&b.null(), &checker), "nil");
        assert_eq!(emit(&b.this_expr(), &checker), "self");
        assert_eq!(emit(&b.super_expr(), &checker), "self.__base");
    }

    #[test]
    fn conditional_uses_ts_ite() {
        let b = NodeBuilder::new();
        let cond = b.conditional(b.id("c"), b.id("a"), b.id("b"));
        let checker = SimpleTypeChecker::new();
        assert_eq!(
            emit(&cond, &checker),
            "TS_ITE(c, function() return a end, function() return b end)"
        );
    }

    #[test]
    fn template_expression() {
        let b = NodeBuilder::new();
        let name = b.id("name");
        let tmpl = b.template(vec!["hi ", "!"], vec![name]);
        let checker = SimpleTypeChecker::new();
        assert_eq!(emit(&tmpl, &checker), "\"hi \"..(name)..\"!\"");
    }

    #[test]
    fn element_access_array_offsets_by_one() {
        let b = NodeBuilder::new();
        let arr = b.id("a");
        let arr_id = arr.id;
        let access = b.index(arr, b.num("0"));
        let mut checker = SimpleTypeChecker::new();
        checker.set(arr_id, SimpleType::array());
        assert_eq!(emit(&access, &checker), "a[0+1]");
    }

    #[test]
    fn element_access_object_no_offset() {
        let b = NodeBuilder::new();
        let obj = b.id("o");
        let access = b.index(obj, b.str_lit("k"));
        let checker = SimpleTypeChecker::new();
        assert_eq!(emit(&access, &checker), "o[\"k\"]");
    }

    #[test]
    fn property_length_on_array() {
        let b = NodeBuilder::new();
        let arr = b.id("a");
        let arr_id = arr.id;
        let access = b.prop(arr, "length");
        let mut checker = SimpleTypeChecker::new();
        checker.set(arr_id, SimpleType::array());
        assert_eq!(emit(&access, &checker), "#a");
    }

    #[test]
    fn compile_members_only_enum_property_is_bare() {
        let b = NodeBuilder::new();
        let e = b.id("Color");
        let e_id = e.id;
        let access = b.prop(e, "Red");
        let mut checker = SimpleTypeChecker::new();
        checker.set(e_id, SimpleType::compile_members_only_enum());
        assert_eq!(emit(&access, &checker), "Red");
    }

    #[test]
    fn method_call_passes_receiver_as_context() {
        let b = NodeBuilder::new();
        let obj = b.id("obj");
        let call = b.call(b.prop(obj, "doThing"), vec![b.num("1")]);
        let checker = SimpleTypeChecker::new();
        assert_eq!(emit(&call, &checker), "obj.doThing(obj,1)");
    }

    #[test]
    fn plain_call() {
        let b = NodeBuilder::new();
        let call = b.call(b.id("print"), vec![b.id("i")]);
        let checker = SimpleTypeChecker::new();
        assert_eq!(emit(&call, &checker), "print(i)");
    }

    #[test]
    fn new_expression() {
        let b = NodeBuilder::new();
        let n = b.new_expr(b.id("Foo"), vec![b.num("1")]);
        let checker = SimpleTypeChecker::new();
        assert_eq!(emit(&n, &checker), "Foo.new(true,1)");
    }

    #[test]
    fn bitwise_operators_use_bit_table() {
        let b = NodeBuilder::new();
        let and = b.bin(BinOpKind::BitAnd, "&", b.id("a"), b.id("b"));
        let or = b.bin(BinOpKind::BitOr, "|", b.id("a"), b.id("b"));
        let checker = SimpleTypeChecker::new();
        assert_eq!(emit(&and, &checker), "bit.band(a,b)");
        assert_eq!(emit(&or, &checker), "bit.bor(a,b)");
    }

    #[test]
    fn type_assertion_and_as_cast_are_transparent() {
        let b = NodeBuilder::new();
        let asserted = b.type_assertion(b.id("x"));
        let cast = b.as_cast(b.id("x"));
        let checker = SimpleTypeChecker::new();
        assert_eq!(emit(&asserted, &checker), "x");
        assert_eq!(emit(&cast, &checker), "x");
    }

    #[test]
    fn array_and_object_literals() {
        let b = NodeBuilder::new();
        let arr = b.array_lit(vec![b.num("1"), b.num("2")]);
        let checker = SimpleTypeChecker::new();
        assert_eq!(emit(&arr, &checker), "{1, 2}");

        let b2 = NodeBuilder::new();
        let one = b2.num("1");
        let prop = b2.prop_ident("x", one);
        let obj = b2.object_lit(vec![prop]);
        assert_eq!(emit(&obj, &checker), "{x = 1}");
    }

    #[test]
    fn arrow_concise_body() {
        let b = NodeBuilder::new();
        let body = b.bin(BinOpKind::Add, "+", b.id("x"), b.num("1"));
        let arrow = b.arrow_concise(vec!["x"], body);
        let checker = SimpleTypeChecker::new();
        assert_eq!(emit(&arrow, &checker), "function(x) return (x)+(1) end");
    }
}
