//! Fixtures for exercising `sl-lower` without a real SL front-end.
//!
//! `spec.md` treats the front-end as opaque and entirely out of scope; this
//! module is the narrowest possible stand-in for it, built the same way
//! `mesh-parser`'s own unit tests build CSTs directly rather than by
//! string-parsing a fixture. It is deliberately dumb: `SimpleType` stores
//! its nine answers as plain fields, and `SimpleTypeChecker` is a flat map
//! from `NodeId` to type. Neither infers or resolves anything.

use rustc_hash::FxHashMap;
use std::rc::Rc;

use sl_common::Span;

use crate::checker::TypeChecker;
use crate::node::{
    ArrowBody, BinOpKind, BinOpToken, ClassDecl, Constructor, ConstructorParam, DeclaratorPattern,
    EnumDecl, EnumMember, FunctionDecl, ImportClause, ImportSpecifier, InstanceField, Method,
    Node, NodeId, NodeKind, ObjectProperty, PropertyKey, StaticField, SwitchCase, UnaryOpKind,
    UnaryOpToken, VariableDeclarator,
};
use crate::ty::Type;

/// A fixture type: every `Type` capability is a plain field instead of
/// being derived from a real type system.
#[derive(Debug, Clone, Default)]
pub struct SimpleType {
    pub is_string: bool,
    pub is_string_literal: bool,
    pub is_object: bool,
    pub is_array: bool,
    pub is_tuple: bool,
    pub is_compile_members_only_enum: bool,
    pub is_pure_abstract_class: bool,
    pub is_extension_class: bool,
    pub decorators: Vec<String>,
}

impl SimpleType {
    pub fn string() -> Self {
        Self {
            is_string: true,
            ..Default::default()
        }
    }

    pub fn string_literal() -> Self {
        Self {
            is_string: true,
            is_string_literal: true,
            ..Default::default()
        }
    }

    pub fn array() -> Self {
        Self {
            is_array: true,
            ..Default::default()
        }
    }

    pub fn tuple() -> Self {
        Self {
            is_tuple: true,
            ..Default::default()
        }
    }

    pub fn object() -> Self {
        Self {
            is_object: true,
            ..Default::default()
        }
    }

    pub fn compile_members_only_enum() -> Self {
        Self {
            is_compile_members_only_enum: true,
            ..Default::default()
        }
    }

    pub fn pure_abstract_class() -> Self {
        Self {
            is_pure_abstract_class: true,
            ..Default::default()
        }
    }

    pub fn extension_class() -> Self {
        Self {
            is_extension_class: true,
            ..Default::default()
        }
    }

    pub fn with_decorator(mut self, name: impl Into<String>) -> Self {
        self.decorators.push(name.into());
        self
    }
}

impl Type for SimpleType {
    fn is_string(&self) -> bool {
        self.is_string
    }
    fn is_string_literal(&self) -> bool {
        self.is_string_literal
    }
    fn is_object(&self) -> bool {
        self.is_object
    }
    fn is_array(&self) -> bool {
        self.is_array
    }
    fn is_tuple(&self) -> bool {
        self.is_tuple
    }
    fn is_compile_members_only_enum(&self) -> bool {
        self.is_compile_members_only_enum
    }
    fn is_pure_abstract_class(&self) -> bool {
        self.is_pure_abstract_class
    }
    fn is_extension_class(&self) -> bool {
        self.is_extension_class
    }
    fn has_custom_decorator(&self, name: &str) -> bool {
        self.decorators.iter().any(|d| d == name)
    }
}

/// A flat `NodeId -> Type` map, populated by hand in test setup.
#[derive(Default)]
pub struct SimpleTypeChecker {
    types: FxHashMap<NodeId, Rc<dyn Type>>,
}

impl std::fmt::Debug for SimpleTypeChecker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimpleTypeChecker")
            .field("types", &self.types.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl SimpleTypeChecker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the type of a node, keyed by its `NodeId`.
    pub fn set(&mut self, id: NodeId, ty: impl Type + 'static) -> &mut Self {
        self.types.insert(id, Rc::new(ty));
        self
    }
}

impl TypeChecker for SimpleTypeChecker {
    fn type_of(&self, node: &Node) -> Option<Rc<dyn Type>> {
        self.types.get(&node.id).cloned()
    }
}

/// Mints sequential `NodeId`s while building a fixture tree by hand.
///
/// Every node produced this way carries `Span::synthetic()` — fixtures
/// have no real source text to point at, and the lowering engine never
/// inspects a span's value beyond carrying it into `TranspileError`.
#[derive(Debug, Default)]
pub struct NodeBuilder {
    next_id: std::cell::Cell<u32>,
}

impl NodeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self) -> NodeId {
        let id = NodeId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        id
    }

    pub fn node(&self, kind: NodeKind) -> Node {
        let id = self.next_id();
        Node::new(id, Span::synthetic(), kind)
    }

    pub fn program(&self, stmts: Vec<Node>) -> Node {
        self.node(NodeKind::Program(stmts))
    }

    pub fn block(&self, stmts: Vec<Node>) -> Node {
        self.node(NodeKind::Block(stmts))
    }

    pub fn id(&self, name: &str) -> Node {
        self.node(NodeKind::Identifier(name.to_string()))
    }

    pub fn num(&self, lit: &str) -> Node {
        self.node(NodeKind::NumericLiteral(lit.to_string()))
    }

    pub fn str_lit(&self, s: &str) -> Node {
        self.node(NodeKind::StringLiteral(s.to_string()))
    }

    pub fn bool_lit(&self, b: bool) -> Node {
        self.node(NodeKind::BoolLiteral(b))
    }

    pub fn null(&self) -> Node {
        self.node(NodeKind::NullLiteral)
    }

    pub fn this_expr(&self) -> Node {
        self.node(NodeKind::This)
    }

    pub fn super_expr(&self) -> Node {
        self.node(NodeKind::Super)
    }

    pub fn bin(&self, kind: BinOpKind, text: &str, left: Node, right: Node) -> Node {
        self.node(NodeKind::Binary {
            op: BinOpToken::new(kind, text),
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn unary(&self, kind: UnaryOpKind, text: &str, operand: Node, prefix: bool) -> Node {
        self.node(NodeKind::Unary {
            op: UnaryOpToken::new(kind, text),
            operand: Box::new(operand),
            prefix,
        })
    }

    pub fn conditional(&self, cond: Node, then_expr: Node, else_expr: Node) -> Node {
        self.node(NodeKind::Conditional {
            cond: Box::new(cond),
            then_expr: Box::new(then_expr),
            else_expr: Box::new(else_expr),
        })
    }

    pub fn call(&self, callee: Node, args: Vec<Node>) -> Node {
        self.node(NodeKind::Call {
            callee: Box::new(callee),
            args,
        })
    }

    pub fn new_expr(&self, callee: Node, args: Vec<Node>) -> Node {
        self.node(NodeKind::New {
            callee: Box::new(callee),
            args,
        })
    }

    pub fn prop(&self, object: Node, name: &str) -> Node {
        self.node(NodeKind::PropertyAccess {
            object: Box::new(object),
            name: name.to_string(),
        })
    }

    pub fn index(&self, object: Node, idx: Node) -> Node {
        self.node(NodeKind::ElementAccess {
            object: Box::new(object),
            index: Box::new(idx),
        })
    }

    pub fn array_lit(&self, elements: Vec<Node>) -> Node {
        self.node(NodeKind::ArrayLiteral(elements))
    }

    pub fn object_lit(&self, props: Vec<ObjectProperty>) -> Node {
        self.node(NodeKind::ObjectLiteral(props))
    }

    pub fn prop_ident(&self, name: &str, value: Node) -> ObjectProperty {
        ObjectProperty {
            key: PropertyKey::Identifier(name.to_string()),
            value,
        }
    }

    pub fn prop_computed(&self, key_expr: Node, value: Node) -> ObjectProperty {
        ObjectProperty {
            key: PropertyKey::Computed(Box::new(key_expr)),
            value,
        }
    }

    pub fn function_expr(&self, params: Vec<&str>, body: Node) -> Node {
        self.node(NodeKind::FunctionExpr {
            params: params.into_iter().map(String::from).collect(),
            body: Box::new(body),
        })
    }

    pub fn arrow_concise(&self, params: Vec<&str>, body: Node) -> Node {
        self.node(NodeKind::ArrowExpr {
            params: params.into_iter().map(String::from).collect(),
            body: ArrowBody::Concise(Box::new(body)),
        })
    }

    pub fn arrow_block(&self, params: Vec<&str>, body: Node) -> Node {
        self.node(NodeKind::ArrowExpr {
            params: params.into_iter().map(String::from).collect(),
            body: ArrowBody::Block(Box::new(body)),
        })
    }

    pub fn parenthesized(&self, inner: Node) -> Node {
        self.node(NodeKind::Parenthesized(Box::new(inner)))
    }

    pub fn as_cast(&self, inner: Node) -> Node {
        self.node(NodeKind::AsCast(Box::new(inner)))
    }

    pub fn type_assertion(&self, inner: Node) -> Node {
        self.node(NodeKind::TypeAssertion(Box::new(inner)))
    }

    pub fn template(&self, quasis: Vec<&str>, exprs: Vec<Node>) -> Node {
        self.node(NodeKind::TemplateExpr {
            quasis: quasis.into_iter().map(String::from).collect(),
            exprs,
        })
    }

    // ── Statements ───────────────────────────────────────────────────

    pub fn expr_stmt(&self, expr: Node) -> Node {
        self.node(NodeKind::ExprStmt(Box::new(expr)))
    }

    pub fn return_stmt(&self, value: Option<Node>) -> Node {
        self.node(NodeKind::Return(value.map(Box::new)))
    }

    pub fn break_stmt(&self) -> Node {
        self.node(NodeKind::Break)
    }

    pub fn continue_stmt(&self) -> Node {
        self.node(NodeKind::Continue)
    }

    pub fn if_stmt(&self, cond: Node, then_branch: Node, else_branch: Option<Node>) -> Node {
        self.node(NodeKind::If {
            cond: Box::new(cond),
            then_branch: Box::new(then_branch),
            else_branch: else_branch.map(Box::new),
        })
    }

    pub fn while_stmt(&self, cond: Node, body: Node) -> Node {
        self.node(NodeKind::While {
            cond: Box::new(cond),
            body: Box::new(body),
        })
    }

    pub fn for_stmt(
        &self,
        init: Option<Node>,
        cond: Option<Node>,
        update: Option<Node>,
        body: Node,
    ) -> Node {
        self.node(NodeKind::For {
            init: init.map(Box::new),
            cond: cond.map(Box::new),
            update: update.map(Box::new),
            body: Box::new(body),
        })
    }

    pub fn for_of_stmt(&self, binding: &str, iterable: Node, body: Node) -> Node {
        self.node(NodeKind::ForOf {
            binding: binding.to_string(),
            iterable: Box::new(iterable),
            body: Box::new(body),
        })
    }

    pub fn for_in_stmt(&self, binding: &str, object: Node, body: Node) -> Node {
        self.node(NodeKind::ForIn {
            binding: binding.to_string(),
            object: Box::new(object),
            body: Box::new(body),
        })
    }

    pub fn switch_stmt(&self, discriminant: Node, cases: Vec<SwitchCase>) -> Node {
        self.node(NodeKind::Switch {
            discriminant: Box::new(discriminant),
            cases,
        })
    }

    pub fn case(&self, test: Node, body: Vec<Node>) -> SwitchCase {
        SwitchCase {
            test: Some(test),
            body,
        }
    }

    pub fn default_case(&self, body: Vec<Node>) -> SwitchCase {
        SwitchCase { test: None, body }
    }

    pub fn var_stmt(&self, declarators: Vec<VariableDeclarator>) -> Node {
        self.node(NodeKind::VariableStmt {
            declarators,
            is_declare: false,
        })
    }

    pub fn ambient_var_stmt(&self, declarators: Vec<VariableDeclarator>) -> Node {
        self.node(NodeKind::VariableStmt {
            declarators,
            is_declare: true,
        })
    }

    pub fn decl_ident(&self, name: &str, init: Option<Node>) -> VariableDeclarator {
        VariableDeclarator {
            pattern: DeclaratorPattern::Identifier(name.to_string()),
            init,
        }
    }

    pub fn decl_unsupported(&self, init: Option<Node>) -> VariableDeclarator {
        VariableDeclarator {
            pattern: DeclaratorPattern::Unsupported,
            init,
        }
    }

    pub fn decl_array_destructure(
        &self,
        elements: Vec<&str>,
        rest: Option<&str>,
        init: Option<Node>,
    ) -> VariableDeclarator {
        VariableDeclarator {
            pattern: DeclaratorPattern::ArrayDestructure {
                elements: elements.into_iter().map(String::from).collect(),
                rest: rest.map(String::from),
            },
            init,
        }
    }

    pub fn function_decl(&self, name: &str, params: Vec<&str>, body: Node) -> Node {
        self.node(NodeKind::FunctionDecl(FunctionDecl {
            name: name.to_string(),
            params: params.into_iter().map(String::from).collect(),
            body: Box::new(body),
            is_declare: false,
        }))
    }

    pub fn namespace_import(&self, local: &str, module: &str) -> Node {
        self.node(NodeKind::Import(ImportClause::Namespace {
            local: local.to_string(),
            module: module.to_string(),
        }))
    }

    pub fn named_import(&self, names: Vec<&str>, module: &str) -> Node {
        let specifiers = names
            .into_iter()
            .map(|n| ImportSpecifier {
                imported: n.to_string(),
                alias: None,
            })
            .collect();
        self.node(NodeKind::Import(ImportClause::Named {
            specifiers,
            module: module.to_string(),
        }))
    }

    pub fn renamed_import(&self, imported: &str, alias: &str, module: &str) -> Node {
        self.node(NodeKind::Import(ImportClause::Named {
            specifiers: vec![ImportSpecifier {
                imported: imported.to_string(),
                alias: Some(alias.to_string()),
            }],
            module: module.to_string(),
        }))
    }

    pub fn type_alias_decl(&self) -> Node {
        self.node(NodeKind::TypeAliasDecl)
    }

    pub fn interface_decl(&self) -> Node {
        self.node(NodeKind::InterfaceDecl)
    }

    pub fn eof(&self) -> Node {
        self.node(NodeKind::Eof)
    }

    // ── Classes & enums ──────────────────────────────────────────────

    #[allow(clippy::too_many_arguments)]
    pub fn class_decl(
        &self,
        name: &str,
        extends: Option<Node>,
        statics: Vec<StaticField>,
        fields: Vec<InstanceField>,
        constructor: Option<Constructor>,
        methods: Vec<Method>,
    ) -> Node {
        self.node(NodeKind::ClassDecl(ClassDecl {
            name: name.to_string(),
            extends: extends.map(Box::new),
            statics,
            fields,
            constructor,
            methods,
            is_declare: false,
        }))
    }

    pub fn constructor(&self, params: Vec<ConstructorParam>, body: Vec<Node>) -> Constructor {
        Constructor { params, body }
    }

    pub fn ctor_param(&self, name: &str, is_field_shorthand: bool) -> ConstructorParam {
        ConstructorParam {
            name: name.to_string(),
            is_field_shorthand,
        }
    }

    pub fn method(&self, name: &str, params: Vec<&str>, body: Vec<Node>) -> Method {
        Method {
            name: name.to_string(),
            params: params.into_iter().map(String::from).collect(),
            body,
        }
    }

    pub fn instance_field(&self, name: &str, init: Option<Node>) -> InstanceField {
        InstanceField {
            name: name.to_string(),
            init,
        }
    }

    pub fn static_field(&self, name: &str, init: Node) -> StaticField {
        StaticField {
            name: name.to_string(),
            init,
        }
    }

    pub fn enum_decl(&self, name: &str, members: Vec<EnumMember>) -> Node {
        self.node(NodeKind::EnumDecl(EnumDecl {
            name: name.to_string(),
            members,
        }))
    }

    pub fn enum_member(&self, name: &str, init: Option<Node>) -> EnumMember {
        EnumMember {
            name: name.to_string(),
            init,
        }
    }
}
