//! Statement semantic analysis
//!
//! Scoping statements and `return`. Statements with no rule of their own
//! (`if`, `while`, `print`, ...) go through the generic traversal.

use crate::ast::{Node, NodeVisitor};
use crate::semantic::errors::TypeError;
use crate::semantic::types::ValueType;
use crate::semantic::TypeChecker;
use log::debug;

impl TypeChecker {
    pub(crate) fn visit_program(&mut self, gdecls: &[Node]) -> Result<Option<ValueType>, TypeError> {
        self.symtab.begin_scope();
        for item in gdecls {
            self.visit(item)?;
        }
        self.symtab.end_scope()?;
        debug!("checked {} global item(s)", gdecls.len());
        Ok(None)
    }

    pub(crate) fn visit_compound(&mut self, block_items: &[Node]) -> Result<Option<ValueType>, TypeError> {
        self.symtab.begin_scope();
        debug!("enter block scope (depth {})", self.symtab.depth());
        for item in block_items {
            self.visit(item)?;
        }
        self.symtab.end_scope()?;
        Ok(None)
    }

    /// The header's declarations stay visible through the body
    pub(crate) fn visit_for(
        &mut self,
        init: Option<&Node>,
        cond: Option<&Node>,
        next: Option<&Node>,
        stmt: &Node,
    ) -> Result<Option<ValueType>, TypeError> {
        self.symtab.begin_scope();
        for part in [init, cond, next].into_iter().flatten() {
            self.visit(part)?;
        }
        self.visit(stmt)?;
        self.symtab.end_scope()?;
        Ok(None)
    }

    pub(crate) fn visit_return(&mut self, node: &Node, expr: Option<&Node>) -> Result<Option<ValueType>, TypeError> {
        let Some(expr) = expr else {
            return Ok(None);
        };
        let found = self.expr_type(expr)?;
        match &self.current_return {
            Some(expected) if *expected != found => Err(TypeError::TypeMismatch {
                expected: expected.clone(),
                found,
                location: node.coord,
            }),
            _ => Ok(None),
        }
    }
}
