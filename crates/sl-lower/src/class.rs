//! Classes and enums lowered onto Lua's metatable object model.

use sl_ast::node::{ClassDecl, Constructor, EnumDecl, Method, Node, NodeKind};
use sl_common::{Reason, TranspileError};

use crate::Emitter;

impl<'a> Emitter<'a> {
    pub(crate) fn emit_class_decl(
        &mut self,
        node: &Node,
        class: &ClassDecl,
    ) -> Result<String, TranspileError> {
        if class.is_declare {
            return Ok(String::new());
        }

        let indent = self.indent().to_string();
        let is_extension = self
            .checker
            .type_of(node)
            .map(|t| t.is_extension_class())
            .unwrap_or(false);

        let mut out = String::new();

        if !is_extension {
            out.push_str(&self.emit_class_header(class)?);
        }

        for field in &class.statics {
            let value = self.emit_expr(&field.init, false)?;
            out.push_str(&format!("{indent}{}.{} = {value}\n", class.name, field.name));
        }

        out.push_str(&self.emit_constructor(class)?);

        for method in &class.methods {
            out.push_str(&self.emit_method(&class.name, method)?);
        }

        Ok(out)
    }

    fn emit_class_header(&mut self, class: &ClassDecl) -> Result<String, TranspileError> {
        let indent = self.indent().to_string();
        let name = &class.name;

        let mut base_name = None;
        let mut extends_kept = false;
        let mut no_class_or = false;

        if let Some(base_node) = &class.extends {
            let base_ty = self.checker.type_of(base_node);
            let pure_abstract = base_ty
                .as_ref()
                .map(|t| t.is_pure_abstract_class())
                .unwrap_or(false);
            no_class_or = base_ty
                .as_ref()
                .map(|t| t.has_custom_decorator("NoClassOr"))
                .unwrap_or(false);
            if !pure_abstract {
                extends_kept = true;
                base_name = Some(self.emit_expr(base_node, false)?);
            }
        }

        let initial = match (&base_name, extends_kept) {
            (Some(b), true) => format!("{b}.new()"),
            _ => "{}".to_string(),
        };

        let rhs = if no_class_or {
            initial
        } else {
            format!("{name} or {initial}")
        };

        let mut out = String::new();
        out.push_str(&format!("{indent}{name} = {rhs}\n"));
        out.push_str(&format!("{indent}{name}.__index = {name}\n"));
        if extends_kept {
            if let Some(b) = &base_name {
                out.push_str(&format!("{indent}{name}.__base = {b}\n"));
            }
        }
        out.push_str(&format!(
            "{indent}function {name}.new(construct, ...)\n\
             {indent}    local instance = setmetatable({{}}, {name})\n\
             {indent}    if construct and {name}.constructor then {name}.constructor(instance, ...) end\n\
             {indent}    return instance\n\
             {indent}end\n"
        ));
        Ok(out)
    }

    fn emit_constructor(&mut self, class: &ClassDecl) -> Result<String, TranspileError> {
        let synthesized;
        let ctor: &Constructor = match &class.constructor {
            Some(c) => c,
            None => {
                if class.fields.iter().any(|f| f.init.is_some()) {
                    synthesized = Constructor {
                        params: vec![],
                        body: vec![],
                    };
                    &synthesized
                } else {
                    return Ok(String::new());
                }
            }
        };

        let indent = self.indent().to_string();
        let params: Vec<&str> = ctor.params.iter().map(|p| p.name.as_str()).collect();
        let mut header_params = vec!["self"];
        header_params.extend(params);

        let mut out = format!(
            "{indent}function {}.constructor({})\n",
            class.name,
            header_params.join(",")
        );
        self.push_indent();
        let body_indent = self.indent().to_string();

        for p in &ctor.params {
            if p.is_field_shorthand {
                out.push_str(&format!("{body_indent}self.{0} = {0}\n", p.name));
            }
        }
        for field in &class.fields {
            if let Some(init) = &field.init {
                let value = self.emit_expr(init, false)?;
                out.push_str(&format!("{body_indent}self.{} = {value}\n", field.name));
            }
        }
        for stmt in &ctor.body {
            out.push_str(&self.emit_stmt(stmt)?);
        }
        self.pop_indent();
        out.push_str(&format!("{indent}end\n"));
        Ok(out)
    }

    fn emit_method(&mut self, class_name: &str, method: &Method) -> Result<String, TranspileError> {
        let indent = self.indent().to_string();
        let mut params = vec!["self".to_string()];
        params.extend(method.params.iter().cloned());

        let mut out = format!(
            "{indent}function {class_name}.{}({})\n",
            method.name,
            params.join(",")
        );
        self.push_indent();
        for stmt in &method.body {
            out.push_str(&self.emit_stmt(stmt)?);
        }
        self.pop_indent();
        out.push_str(&format!("{indent}end\n"));
        Ok(out)
    }

    pub(crate) fn emit_enum_decl(
        &mut self,
        node: &Node,
        e: &EnumDecl,
    ) -> Result<String, TranspileError> {
        let is_compile_members_only = self
            .checker
            .type_of(node)
            .map(|t| t.is_compile_members_only_enum())
            .unwrap_or(false);

        let indent = self.indent().to_string();
        let mut out = String::new();
        if !is_compile_members_only {
            out.push_str(&format!("{indent}{} = {{}}\n", e.name));
        }

        let mut counter: i64 = 0;
        for member in &e.members {
            let value = match &member.init {
                Some(init_node) => match &init_node.kind {
                    NodeKind::NumericLiteral(text) => {
                        let parsed: i64 = text.parse().map_err(|_| {
                            TranspileError::new(
                                Reason::UnsupportedEnumInit,
                                init_node.span,
                                "enum initializer is not an integer literal",
                            )
                        })?;
                        counter = parsed + 1;
                        text.clone()
                    }
                    _ => {
                        return Err(TranspileError::new(
                            Reason::UnsupportedEnumInit,
                            init_node.span,
                            "enum initializer must be a numeric literal",
                        ))
                    }
                },
                None => {
                    let v = counter;
                    counter += 1;
                    v.to_string()
                }
            };

            if is_compile_members_only {
                out.push_str(&format!("{indent}{} = {value}\n", member.name));
            } else {
                out.push_str(&format!("{indent}{}.{} = {value}\n", e.name, member.name));
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sl_ast::testkit::{NodeBuilder, SimpleType, SimpleTypeChecker};

    #[test]
    fn scenario_4_class_with_extends() {
        let b = NodeBuilder::new();
        let base = b.id("B");
        let this_expr = b.this_expr();
        let this_x = b.prop(this_expr, "x");
        let super_expr = b.super_expr();
        let x_arg = b.id("x");
        let super_call = b.call(super_expr, vec![x_arg]);
        let super_stmt = b.expr_stmt(super_call);
        let ctor_param = b.ctor_param("x", true);
        let ctor = b.constructor(vec![ctor_param], vec![super_stmt]);
        let ret = b.return_stmt(Some(this_x));
        let m = b.method("m", vec![], vec![ret]);
        let class = b.class_decl("C", Some(base), vec![], vec![], Some(ctor), vec![m]);

        let checker = SimpleTypeChecker::new();
        let mut emitter = Emitter::new(&checker);
        let out = emitter.emit_stmt(&class).unwrap();

        assert!(out.contains("C = C or B.new()"), "{out}");
        assert!(out.contains("C.__index = C"), "{out}");
        assert!(out.contains("C.__base = B"), "{out}");
        assert!(out.contains("function C.constructor(self,x)"), "{out}");
        assert!(out.contains("self.x = x"), "{out}");
        assert!(out.contains("self.__base.constructor(self,x)"), "{out}");
        assert!(out.contains("function C.m(self)"), "{out}");
        assert!(out.contains("return self.x"), "{out}");
    }

    #[test]
    fn pure_abstract_base_drops_extends_clause() {
        let b = NodeBuilder::new();
        let base = b.id("B");
        let base_id = base.id;
        let class = b.class_decl("C", Some(base), vec![], vec![], None, vec![]);
        let mut checker = SimpleTypeChecker::new();
        checker.set(base_id, SimpleType::pure_abstract_class());
        let mut emitter = Emitter::new(&checker);
        let out = emitter.emit_stmt(&class).unwrap();
        assert!(out.contains("C = C or {}"), "{out}");
        assert!(!out.contains("__base"), "{out}");
    }

    #[test]
    fn no_class_or_decorator_suppresses_reopen_guard() {
        let b = NodeBuilder::new();
        let base = b.id("B");
        let base_id = base.id;
        let class = b.class_decl("C", Some(base), vec![], vec![], None, vec![]);
        let mut checker = SimpleTypeChecker::new();
        checker.set(base_id, SimpleType::default().with_decorator("NoClassOr"));
        let mut emitter = Emitter::new(&checker);
        let out = emitter.emit_stmt(&class).unwrap();
        assert!(out.contains("C = B.new()"), "{out}");
    }

    #[test]
    fn extension_class_omits_header() {
        let b = NodeBuilder::new();
        let m = b.method("helper", vec![], vec![]);
        let class = b.class_decl("Array", None, vec![], vec![], None, vec![m]);
        let class_id = class.id;
        let mut checker = SimpleTypeChecker::new();
        checker.set(class_id, SimpleType::extension_class());
        let mut emitter = Emitter::new(&checker);
        let out = emitter.emit_stmt(&class).unwrap();
        assert!(!out.contains("__index"));
        assert!(out.contains("function Array.helper(self)"));
    }

    #[test]
    fn compile_members_only_enum_has_no_table() {
        let b = NodeBuilder::new();
        let members = vec![b.enum_member("Red", None), b.enum_member("Green", None)];
        let e = b.enum_decl("Color", members);
        let e_id = e.id;
        let mut checker = SimpleTypeChecker::new();
        checker.set(e_id, SimpleType::compile_members_only_enum());
        let mut emitter = Emitter::new(&checker);
        let out = emitter.emit_stmt(&e).unwrap();
        assert_eq!(out, "Red = 0\nGreen = 1\n");
    }

    #[test]
    fn regular_enum_auto_increments_and_resumes_from_literal() {
        let b = NodeBuilder::new();
        let five = b.num("5");
        let members = vec![
            b.enum_member("A", None),
            b.enum_member("B", Some(five)),
            b.enum_member("C", None),
        ];
        let e = b.enum_decl("E", members);
        let checker = SimpleTypeChecker::new();
        let mut emitter = Emitter::new(&checker);
        let out = emitter.emit_stmt(&e).unwrap();
        assert_eq!(out, "E = {}\nE.A = 0\nE.B = 5\nE.C = 6\n");
    }

    #[test]
    fn non_numeric_enum_init_fails() {
        let b = NodeBuilder::new();
        let bad = b.str_lit("x");
        let members = vec![b.enum_member("A", Some(bad))];
        let e = b.enum_decl("E", members);
        let checker = SimpleTypeChecker::new();
        let mut emitter = Emitter::new(&checker);
        let err = emitter.emit_stmt(&e).unwrap_err();
        assert_eq!(err.reason, Reason::UnsupportedEnumInit);
    }
}
