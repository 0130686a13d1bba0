//! Variable declarations, loops, and switch — the statement-level half of
//! the emitter.

use sl_ast::node::{DeclaratorPattern, Node, SwitchCase, VariableDeclarator};
use sl_common::{Reason, TranspileError};

use crate::Emitter;

impl<'a> Emitter<'a> {
    pub(crate) fn emit_variable_stmt(
        &mut self,
        declarators: &[VariableDeclarator],
    ) -> Result<String, TranspileError> {
        let mut out = String::new();
        for decl in declarators {
            out.push_str(&self.emit_declarator(decl)?);
        }
        Ok(out)
    }

    fn emit_declarator(&mut self, decl: &VariableDeclarator) -> Result<String, TranspileError> {
        let indent = self.indent().to_string();
        match &decl.pattern {
            DeclaratorPattern::Identifier(name) => {
                let init_text = match &decl.init {
                    Some(e) => self.emit_expr(e, false)?,
                    None => "nil".to_string(),
                };
                Ok(format!("{indent}local {name} = {init_text}\n"))
            }
            DeclaratorPattern::ArrayDestructure { elements, rest } => {
                let n = self.state.next_gen();
                let tmp = format!("__destr{n}");
                let init_text = match &decl.init {
                    Some(e) => self.emit_expr(e, false)?,
                    None => "nil".to_string(),
                };
                let mut out = format!("{indent}local {tmp} = {init_text}\n");
                for (i, name) in elements.iter().enumerate() {
                    out.push_str(&format!("{indent}local {name} = {tmp}[{}]\n", i + 1));
                }
                if let Some(rest_name) = rest {
                    out.push_str(&format!(
                        "{indent}local {rest_name} = TS_slice({tmp}, {})\n",
                        elements.len()
                    ));
                }
                Ok(out)
            }
            DeclaratorPattern::Unsupported => {
                let span = decl
                    .init
                    .as_ref()
                    .map(|n| n.span)
                    .unwrap_or_else(sl_common::Span::synthetic);
                Err(TranspileError::new(
                    Reason::UnsupportedSyntax,
                    span,
                    "unsupported variable declarator shape",
                ))
            }
        }
    }

    pub(crate) fn emit_if(
        &mut self,
        cond: &Node,
        then_branch: &Node,
        else_branch: Option<&Node>,
    ) -> Result<String, TranspileError> {
        let indent = self.indent().to_string();
        let cond_text = self.emit_expr(cond, false)?;
        let mut out = format!("{indent}if {cond_text} then\n");
        self.push_indent();
        out.push_str(&self.emit_body(then_branch)?);
        self.pop_indent();
        if let Some(else_b) = else_branch {
            out.push_str(&format!("{indent}else\n"));
            self.push_indent();
            out.push_str(&self.emit_body(else_b)?);
            self.pop_indent();
        }
        out.push_str(&format!("{indent}end\n"));
        Ok(out)
    }

    pub(crate) fn emit_while(&mut self, cond: &Node, body: &Node) -> Result<String, TranspileError> {
        let indent = self.indent().to_string();
        let cond_text = self.emit_expr(cond, false)?;
        let mut out = format!("{indent}while {cond_text} do\n");
        self.push_indent();
        out.push_str(&self.emit_body(body)?);
        self.pop_indent();
        out.push_str(&format!("{indent}end\n"));
        Ok(out)
    }

    pub(crate) fn emit_for(
        &mut self,
        init: Option<&Node>,
        cond: Option<&Node>,
        update: Option<&Node>,
        body: &Node,
    ) -> Result<String, TranspileError> {
        let indent = self.indent().to_string();
        let (var, start, end, step) = self.analyze_numeric_for(init, cond, update)?;
        let mut out = format!("{indent}for {var}={start},{end},{step} do\n");
        self.push_indent();
        out.push_str(&self.emit_body(body)?);
        self.pop_indent();
        out.push_str(&format!("{indent}end\n"));
        Ok(out)
    }

    pub(crate) fn emit_for_of(
        &mut self,
        binding: &str,
        iterable: &Node,
        body: &Node,
    ) -> Result<String, TranspileError> {
        let indent = self.indent().to_string();
        let iter_fn = self.iterator_fn(iterable);
        let iterable_text = self.emit_expr(iterable, false)?;
        let mut out = format!(
            "{indent}for _, {binding} in {iter_fn}({iterable_text}) do\n"
        );
        self.push_indent();
        out.push_str(&self.emit_body(body)?);
        self.pop_indent();
        out.push_str(&format!("{indent}end\n"));
        Ok(out)
    }

    pub(crate) fn emit_for_in(
        &mut self,
        binding: &str,
        object: &Node,
        body: &Node,
    ) -> Result<String, TranspileError> {
        let indent = self.indent().to_string();
        let iter_fn = self.iterator_fn(object);
        let object_text = self.emit_expr(object, false)?;
        let mut out = format!(
            "{indent}for {binding}, _ in {iter_fn}({object_text}) do\n"
        );
        self.push_indent();
        out.push_str(&self.emit_body(body)?);
        self.pop_indent();
        out.push_str(&format!("{indent}end\n"));
        Ok(out)
    }

    /// `ipairs` if the value's type is an array, else `pairs`.
    fn iterator_fn(&self, node: &Node) -> &'static str {
        let is_array = self
            .checker
            .type_of(node)
            .map(|t| t.is_array())
            .unwrap_or(false);
        if is_array {
            "ipairs"
        } else {
            "pairs"
        }
    }

    pub(crate) fn emit_switch(
        &mut self,
        discriminant: &Node,
        cases: &[SwitchCase],
    ) -> Result<String, TranspileError> {
        let indent = self.indent().to_string();
        let base = self.state.gen_counter;
        let scrutinee = self.emit_expr(discriminant, true)?;

        let mut out = String::new();
        for (i, case) in cases.iter().enumerate() {
            let label_n = base + i as u32;
            match &case.test {
                Some(test) => {
                    let value = self.emit_expr(test, true)?;
                    let keyword = if i == 0 { "if" } else { "elseif" };
                    out.push_str(&format!(
                        "{indent}{keyword} {scrutinee}=={value} then\n"
                    ));
                }
                None => out.push_str(&format!("{indent}else\n")),
            }

            self.push_indent();
            out.push_str(&format!("{}::switchCase{label_n}::\n", self.indent()));
            self.state.in_switch = true;
            for stmt in &case.body {
                out.push_str(&self.emit_stmt(stmt)?);
            }
            self.state.in_switch = false;
            if i + 1 < cases.len() {
                out.push_str(&format!(
                    "{}goto switchCase{}\n",
                    self.indent(),
                    base + i as u32 + 1
                ));
            }
            self.pop_indent();
        }
        out.push_str(&format!("{indent}end\n"));
        out.push_str(&format!("{indent}::switchDone{base}::\n"));
        self.state.gen_counter = base + cases.len() as u32;
        Ok(out)
    }
}
