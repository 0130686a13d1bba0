//! The AST node model the lowering engine consumes.
//!
//! `spec.md` treats the front-end's AST as an opaque, externally-provided
//! tree: "a tagged AST node with a `kind` tag and kind-specific children."
//! This module is that tree, modeled the way `spec.md` §9's Design Notes
//! recommend: a tagged variant (`NodeKind`) matched exhaustively, not a
//! polymorphic visitor trait — the compiler then enforces that every new
//! kind gets handled somewhere in `sl-lower`.

use sl_common::Span;

/// Identity for a node, independent of its position in the tree.
///
/// `TypeChecker::type_of` is keyed by `NodeId` rather than by structural
/// equality of `Node`, the same way the front-end's real type checker would
/// key off of a stable node identity rather than re-deriving one from
/// syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

/// One node of the SL AST, annotated with its source span.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub span: Span,
    pub kind: NodeKind,
}

impl Node {
    pub fn new(id: NodeId, span: Span, kind: NodeKind) -> Self {
        Self { id, span, kind }
    }
}

/// The complete vocabulary of node kinds this workspace accepts — exactly
/// the statement and expression kinds enumerated in `spec.md` §6, plus the
/// declaration-only/ambient kinds the Dispatcher (§4.1) must recognize and
/// drop.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    // ── File structure ──────────────────────────────────────────────
    Program(Vec<Node>),
    Block(Vec<Node>),

    // ── Declaration-only / ambient (always emit empty string) ───────
    TypeAliasDecl,
    InterfaceDecl,
    Eof,

    // ── Statements ───────────────────────────────────────────────────
    Import(ImportClause),
    ClassDecl(ClassDecl),
    EnumDecl(EnumDecl),
    FunctionDecl(FunctionDecl),
    VariableStmt {
        declarators: Vec<VariableDeclarator>,
        is_declare: bool,
    },
    ExprStmt(Box<Node>),
    Return(Option<Box<Node>>),
    If {
        cond: Box<Node>,
        then_branch: Box<Node>,
        else_branch: Option<Box<Node>>,
    },
    While {
        cond: Box<Node>,
        body: Box<Node>,
    },
    For {
        init: Option<Box<Node>>,
        cond: Option<Box<Node>>,
        update: Option<Box<Node>>,
        body: Box<Node>,
    },
    ForOf {
        binding: String,
        iterable: Box<Node>,
        body: Box<Node>,
    },
    ForIn {
        binding: String,
        object: Box<Node>,
        body: Box<Node>,
    },
    Switch {
        discriminant: Box<Node>,
        cases: Vec<SwitchCase>,
    },
    Break,
    Continue,

    // ── Expressions ──────────────────────────────────────────────────
    Identifier(String),
    NumericLiteral(String),
    StringLiteral(String),
    BoolLiteral(bool),
    NullLiteral,
    This,
    Super,
    TemplateExpr {
        /// Literal text segments; `quasis.len() == exprs.len() + 1`.
        quasis: Vec<String>,
        exprs: Vec<Node>,
    },
    Binary {
        op: BinOpToken,
        left: Box<Node>,
        right: Box<Node>,
    },
    Unary {
        op: UnaryOpToken,
        operand: Box<Node>,
        prefix: bool,
    },
    Conditional {
        cond: Box<Node>,
        then_expr: Box<Node>,
        else_expr: Box<Node>,
    },
    Call {
        callee: Box<Node>,
        args: Vec<Node>,
    },
    New {
        callee: Box<Node>,
        args: Vec<Node>,
    },
    PropertyAccess {
        object: Box<Node>,
        name: String,
    },
    ElementAccess {
        object: Box<Node>,
        index: Box<Node>,
    },
    ArrayLiteral(Vec<Node>),
    ObjectLiteral(Vec<ObjectProperty>),
    FunctionExpr {
        params: Vec<String>,
        body: Box<Node>,
    },
    ArrowExpr {
        params: Vec<String>,
        body: ArrowBody,
    },
    Parenthesized(Box<Node>),
    TypeAssertion(Box<Node>),
    AsCast(Box<Node>),
    ComputedPropertyName(Box<Node>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ArrowBody {
    Concise(Box<Node>),
    Block(Box<Node>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectProperty {
    pub key: PropertyKey,
    pub value: Node,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PropertyKey {
    Identifier(String),
    Computed(Box<Node>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchCase {
    /// `None` for the `default` clause.
    pub test: Option<Node>,
    pub body: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeclaratorPattern {
    Identifier(String),
    ArrayDestructure {
        elements: Vec<String>,
        rest: Option<String>,
    },
    /// Any declarator shape `sl-lower` doesn't recognize (object
    /// destructuring, parameter-list patterns, ...). Always rejected with
    /// `Reason::UnsupportedSyntax` — kept as its own variant (rather than
    /// left unrepresentable) so that rejection path has something to test.
    Unsupported,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclarator {
    pub pattern: DeclaratorPattern,
    pub init: Option<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ImportClause {
    /// `import * as X from "m"`.
    Namespace { local: String, module: String },
    /// `import { a, b } from "m"`.
    Named {
        specifiers: Vec<ImportSpecifier>,
        module: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportSpecifier {
    pub imported: String,
    /// `Some(alias)` when the source wrote `imported as alias`; any such
    /// rename is rejected (`Reason::RenamedImport`).
    pub alias: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub name: String,
    pub params: Vec<String>,
    pub body: Box<Node>,
    pub is_declare: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassDecl {
    pub name: String,
    /// The identifier/expression naming the base class, if any. Looked up
    /// through the `TypeChecker` to read the `@NoClassOr`/`@PureAbstract`
    /// decorators on the super-type.
    pub extends: Option<Box<Node>>,
    pub statics: Vec<StaticField>,
    pub fields: Vec<InstanceField>,
    pub constructor: Option<Constructor>,
    pub methods: Vec<Method>,
    pub is_declare: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StaticField {
    pub name: String,
    pub init: Node,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InstanceField {
    pub name: String,
    pub init: Option<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Constructor {
    pub params: Vec<ConstructorParam>,
    pub body: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstructorParam {
    pub name: String,
    /// `true` when the parameter carries a visibility/field modifier
    /// (`public`/`private`/`readonly`), triggering `self.p = p` shorthand.
    pub is_field_shorthand: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Method {
    pub name: String,
    pub params: Vec<String>,
    pub body: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumDecl {
    pub name: String,
    pub members: Vec<EnumMember>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumMember {
    pub name: String,
    pub init: Option<Node>,
}

/// Binary operator kinds, covering `spec.md` §6.1's table plus the special
/// cases §4.3 calls out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOpKind {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Lt,
    Gt,
    Le,
    Ge,
    Assign,
    StrictEq,
    NotEq,
    StrictNotEq,
    AndAnd,
    OrOr,
    BitAnd,
    BitOr,
    PlusAssign,
    MinusAssign,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinOpToken {
    pub kind: BinOpKind,
    pub text: String,
}

impl BinOpToken {
    pub fn new(kind: BinOpKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOpKind {
    Not,
    Neg,
    Incr,
    Decr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryOpToken {
    pub kind: UnaryOpKind,
    pub text: String,
}

impl UnaryOpToken {
    pub fn new(kind: UnaryOpKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}
