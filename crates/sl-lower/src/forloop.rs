//! Recognizes a restricted numeric `for` shape and extracts a Lua
//! `for i=start,end,step do` triple from it.

use sl_ast::node::{BinOpKind, DeclaratorPattern, Node, NodeKind, UnaryOpKind};
use sl_common::{Reason, TranspileError};

use crate::Emitter;

impl<'a> Emitter<'a> {
    /// Returns `(var, start, end, step)` as the literal text to splice into
    /// `for VAR=START,END,STEP do`.
    pub(crate) fn analyze_numeric_for(
        &mut self,
        init: Option<&Node>,
        cond: Option<&Node>,
        update: Option<&Node>,
    ) -> Result<(String, String, String, String), TranspileError> {
        let (var, start, init_span) = self.analyze_init(init)?;
        let end = self.analyze_cond(cond, &var, init_span)?;
        let step = self.analyze_update(update, &var, init_span)?;
        Ok((var, start, end, step))
    }

    fn analyze_init(
        &mut self,
        init: Option<&Node>,
    ) -> Result<(String, String, sl_common::Span), TranspileError> {
        let init = init.ok_or_else(|| shape_error(sl_common::Span::synthetic()))?;
        match &init.kind {
            NodeKind::VariableStmt {
                declarators,
                is_declare: _,
            } if declarators.len() == 1 => {
                let decl = &declarators[0];
                match &decl.pattern {
                    DeclaratorPattern::Identifier(name) => {
                        let start_expr = decl
                            .init
                            .as_ref()
                            .ok_or_else(|| shape_error(init.span))?;
                        let start = self.emit_expr(start_expr, false)?;
                        Ok((name.clone(), start, init.span))
                    }
                    _ => Err(shape_error(init.span)),
                }
            }
            _ => Err(shape_error(init.span)),
        }
    }

    fn analyze_cond(
        &mut self,
        cond: Option<&Node>,
        var: &str,
        fallback_span: sl_common::Span,
    ) -> Result<String, TranspileError> {
        let cond = cond.ok_or_else(|| shape_error(fallback_span))?;
        match &cond.kind {
            NodeKind::Binary { op, left, right } => {
                if !is_identifier(left, var) {
                    return Err(shape_error(cond.span));
                }
                let bound = self.emit_expr(right, false)?;
                match op.kind {
                    BinOpKind::Lt => Ok(format!("{bound}-1")),
                    BinOpKind::Le => Ok(bound),
                    BinOpKind::Gt => Ok(format!("{bound}+1")),
                    BinOpKind::Ge => Ok(bound),
                    _ => Err(shape_error(cond.span)),
                }
            }
            _ => Err(shape_error(cond.span)),
        }
    }

    fn analyze_update(
        &mut self,
        update: Option<&Node>,
        var: &str,
        fallback_span: sl_common::Span,
    ) -> Result<String, TranspileError> {
        let update = update.ok_or_else(|| shape_error(fallback_span))?;
        match &update.kind {
            NodeKind::Unary {
                op,
                operand,
                prefix: _,
            } if is_identifier(operand, var) => match op.kind {
                UnaryOpKind::Incr => Ok("1".to_string()),
                UnaryOpKind::Decr => Ok("-1".to_string()),
                _ => Err(shape_error(update.span)),
            },
            NodeKind::Binary { op, left, right } if is_identifier(left, var) => {
                let amount = self.emit_expr(right, false)?;
                match op.kind {
                    BinOpKind::PlusAssign => Ok(amount),
                    BinOpKind::MinusAssign => Ok(format!("-{amount}")),
                    _ => Err(shape_error(update.span)),
                }
            }
            _ => Err(shape_error(update.span)),
        }
    }
}

fn is_identifier(node: &Node, name: &str) -> bool {
    matches!(&node.kind, NodeKind::Identifier(n) if n == name)
}

fn shape_error(span: sl_common::Span) -> TranspileError {
    TranspileError::new(
        Reason::UnsupportedForShape,
        span,
        "for-loop header does not match the restricted numeric shape",
    )
}
