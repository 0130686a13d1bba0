//! Routes a node to the right emitter and owns indentation.

use sl_ast::node::NodeKind;
use sl_ast::Node;
use sl_common::{Reason, TranspileError};

use crate::Emitter;

impl<'a> Emitter<'a> {
    /// `emit_file(root) -> string`. `root` must be a `Program`.
    pub fn emit_file(&mut self, root: &Node) -> Result<String, TranspileError> {
        match &root.kind {
            NodeKind::Program(stmts) => {
                let mut out = String::new();
                for stmt in stmts {
                    out.push_str(&self.emit_stmt(stmt)?);
                }
                Ok(out)
            }
            _ => Err(TranspileError::new(
                Reason::UnsupportedSyntax,
                root.span,
                "emit_file requires a Program node",
            )),
        }
    }

    pub(crate) fn push_indent(&mut self) {
        self.state.push_indent();
    }

    pub(crate) fn pop_indent(&mut self) {
        self.state.pop_indent();
    }

    pub(crate) fn indent(&self) -> &str {
        &self.state.indent
    }

    /// Emit a node in statement position.
    ///
    /// Declaration-only/ambient node kinds emit the empty string. Any node
    /// kind not recognized as a statement falls through to the expression
    /// emitter with a trailing newline — the same latitude `spec.md` §4.1
    /// grants for an expression appearing where a statement was expected.
    pub fn emit_stmt(&mut self, node: &Node) -> Result<String, TranspileError> {
        match &node.kind {
            NodeKind::TypeAliasDecl | NodeKind::InterfaceDecl | NodeKind::Eof => Ok(String::new()),

            NodeKind::Block(stmts) => {
                let mut out = String::new();
                for s in stmts {
                    out.push_str(&self.emit_stmt(s)?);
                }
                Ok(out)
            }

            NodeKind::Import(clause) => self.emit_import(clause),

            NodeKind::ClassDecl(class) => self.emit_class_decl(node, class),
            NodeKind::EnumDecl(e) => self.emit_enum_decl(node, e),
            NodeKind::FunctionDecl(f) => self.emit_function_decl(f),

            NodeKind::VariableStmt {
                declarators,
                is_declare,
            } => {
                if *is_declare {
                    return Ok(String::new());
                }
                self.emit_variable_stmt(declarators)
            }

            NodeKind::ExprStmt(expr) => {
                let text = self.emit_expr(expr, false)?;
                Ok(format!("{}{}\n", self.indent(), text))
            }

            NodeKind::Return(expr) => self.emit_return(expr.as_deref()),

            NodeKind::If {
                cond,
                then_branch,
                else_branch,
            } => self.emit_if(cond, then_branch, else_branch.as_deref()),

            NodeKind::While { cond, body } => self.emit_while(cond, body),

            NodeKind::For {
                init,
                cond,
                update,
                body,
            } => self.emit_for(init.as_deref(), cond.as_deref(), update.as_deref(), body),

            NodeKind::ForOf {
                binding,
                iterable,
                body,
            } => self.emit_for_of(binding, iterable, body),

            NodeKind::ForIn {
                binding,
                object,
                body,
            } => self.emit_for_in(binding, object, body),

            NodeKind::Switch {
                discriminant,
                cases,
            } => self.emit_switch(discriminant, cases),

            NodeKind::Break => Ok(self.emit_break()),
            NodeKind::Continue => Err(TranspileError::new(
                Reason::UnsupportedSyntax,
                node.span,
                "continue is not supported",
            )),

            // Any other kind is an expression used in statement position.
            _ => {
                let text = self.emit_expr(node, false)?;
                Ok(format!("{}{}\n", self.indent(), text))
            }
        }
    }

    fn emit_import(
        &mut self,
        clause: &sl_ast::node::ImportClause,
    ) -> Result<String, TranspileError> {
        use sl_ast::node::ImportClause;
        let indent = self.indent().to_string();
        match clause {
            ImportClause::Namespace { local, module } => {
                Ok(format!("{indent}{local} = require(\"{module}\")\n"))
            }
            ImportClause::Named { specifiers, module } => {
                for spec in specifiers {
                    if spec.alias.is_some() {
                        return Err(TranspileError::new(
                            Reason::RenamedImport,
                            // No dedicated span on ImportSpecifier; attribute
                            // to the statement as a whole.
                            sl_common::Span::synthetic(),
                            format!("named import `{}` may not be renamed", spec.imported),
                        ));
                    }
                }
                Ok(format!("{indent}require(\"{module}\")\n"))
            }
        }
    }

    fn emit_return(&mut self, expr: Option<&Node>) -> Result<String, TranspileError> {
        let indent = self.indent().to_string();
        match expr {
            Some(e) => {
                let text = self.emit_expr(e, false)?;
                Ok(format!("{indent}return {text}\n"))
            }
            None => Ok(format!("{indent}return\n")),
        }
    }

    fn emit_break(&mut self) -> String {
        let indent = self.indent().to_string();
        if self.state.in_switch {
            format!("{indent}goto switchDone{}\n", self.state.gen_counter)
        } else {
            format!("{indent}break\n")
        }
    }

    fn emit_function_decl(
        &mut self,
        f: &sl_ast::node::FunctionDecl,
    ) -> Result<String, TranspileError> {
        if f.is_declare {
            return Ok(String::new());
        }
        let indent = self.indent().to_string();
        let mut out = format!("{indent}function {}({})\n", f.name, f.params.join(","));
        self.push_indent();
        out.push_str(&self.emit_body(&f.body)?);
        self.pop_indent();
        out.push_str(&format!("{indent}end\n"));
        Ok(out)
    }

    /// Emit `node` as a statement sequence, unwrapping a `Block` into its
    /// members; a non-block node is emitted as the single statement it is.
    pub(crate) fn emit_body(&mut self, node: &Node) -> Result<String, TranspileError> {
        match &node.kind {
            NodeKind::Block(stmts) => {
                let mut out = String::new();
                for s in stmts {
                    out.push_str(&self.emit_stmt(s)?);
                }
                Ok(out)
            }
            _ => self.emit_stmt(node),
        }
    }
}
