//! Type checking for uC
//!
//! Walks the AST produced by the parser, binding declared names in a scoped
//! symbol table and inferring the type of every expression against the
//! operator sets of the type registry. Checking stops at the first error and
//! never modifies the tree, so the same tree can be checked any number of
//! times with identical results.

pub mod errors;
pub mod types;
pub mod expressions;
pub mod statements;
pub mod symbols;

use crate::ast::{Node, NodeKind, NodeVisitor};
use ucc_common::ScopedTable;

pub use errors::TypeError;
pub use types::ValueType;

/// Type checker context
#[derive(Debug, Default)]
pub struct TypeChecker {
    symtab: ScopedTable<ValueType>,
    /// Return type of the function whose body is being checked
    current_return: Option<ValueType>,
    /// Every function signature declared during the last check, in order
    signatures: Vec<(String, ValueType)>,
}

impl TypeChecker {
    /// Create a new type checker
    pub fn new() -> Self {
        Self::default()
    }

    /// Check a whole program, starting from a fresh symbol table
    pub fn check(&mut self, program: &Node) -> Result<(), TypeError> {
        self.symtab = ScopedTable::new();
        self.current_return = None;
        self.signatures.clear();
        self.visit(program)?;
        Ok(())
    }

    /// Symbol table as left by the last check
    pub fn symtab(&self) -> &ScopedTable<ValueType> {
        &self.symtab
    }

    /// Function names and signatures seen by the last check
    pub fn signatures(&self) -> &[(String, ValueType)] {
        &self.signatures
    }

    /// Infer the type of an expression; statements and empty lists give `void`
    pub(crate) fn expr_type(&mut self, node: &Node) -> Result<ValueType, TypeError> {
        Ok(self.visit(node)?.unwrap_or_else(ValueType::void))
    }
}

impl NodeVisitor for TypeChecker {
    type Output = Option<ValueType>;
    type Error = TypeError;

    fn visit(&mut self, node: &Node) -> Result<Option<ValueType>, TypeError> {
        match &node.kind {
            NodeKind::Program { gdecls } => self.visit_program(gdecls),

            NodeKind::Decl { ty, init, .. } => self.visit_decl(node, ty, init.as_deref()),
            NodeKind::VarDecl { .. } | NodeKind::ArrayDecl { .. } | NodeKind::PtrDecl { .. } => {
                self.declare(node, &[]).map(Some)
            }
            NodeKind::FuncDecl { args, .. } => self.visit_func_decl(node, args.as_deref()),
            NodeKind::FuncDef { decl, param_decls, body } => self.visit_func_def(decl, param_decls, body),
            NodeKind::Type { .. } => types::resolve_specifier(node).map(Some),

            NodeKind::Constant { .. } => self.visit_constant(node),
            NodeKind::ID { name } => self.visit_id(node, name),
            NodeKind::BinaryOp { op, lvalue, rvalue } => self.visit_binary_op(node, op, lvalue, rvalue),
            NodeKind::UnaryOp { op, expr } => self.visit_unary_op(node, op, expr),
            NodeKind::Assignment { op, lvalue, rvalue } => self.visit_assignment(node, op, lvalue, rvalue),
            NodeKind::Cast { to_type, expr } => self.visit_cast(to_type, expr),
            NodeKind::ExprList { exprs } => self.visit_expr_list(exprs),
            NodeKind::FuncCall { name, args } => self.visit_func_call(node, name, args.as_deref()),
            NodeKind::ArrayRef { name, subscript } => self.visit_array_ref(name, subscript),
            NodeKind::InitList { exprs } => self.visit_init_list(exprs),

            NodeKind::Compound { block_items } => self.visit_compound(block_items),
            NodeKind::For { init, cond, next, stmt } => {
                self.visit_for(init.as_deref(), cond.as_deref(), next.as_deref(), stmt)
            }
            NodeKind::Return { expr } => self.visit_return(node, expr.as_deref()),

            NodeKind::GlobalDecl { .. }
            | NodeKind::DeclList { .. }
            | NodeKind::ParamList { .. }
            | NodeKind::If { .. }
            | NodeKind::While { .. }
            | NodeKind::Assert { .. }
            | NodeKind::Print { .. }
            | NodeKind::Read { .. }
            | NodeKind::EmptyStatement
            | NodeKind::Break => self.generic_visit(node),
        }
    }
}

/// Check a program tree with a fresh checker
pub fn check(program: &Node) -> Result<(), TypeError> {
    TypeChecker::new().check(program)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use crate::parser::Parser;

    pub(crate) fn parse(source: &str) -> Node {
        let mut parser = Parser::new(Lexer::new(source, |msg, line, col| {
            panic!("unexpected lexical error {msg} at {line}:{col}")
        }));
        parser.parse_program().unwrap()
    }

    pub(crate) fn check_source(source: &str) -> Result<(), TypeError> {
        check(&parse(source))
    }

    #[test]
    fn test_scopes_balance_after_success() {
        let program = parse("int g; int f(int a) { int b; { int c; } for (int i = 0; i < a; i++) b = i; return b; }");
        let mut checker = TypeChecker::new();
        checker.check(&program).unwrap();

        let symtab = checker.symtab();
        assert_eq!(symtab.opened(), symtab.closed());
        // program, function, body, inner block, for header
        assert_eq!(symtab.opened(), 5);
        assert_eq!(symtab.depth(), 0);
    }

    #[test]
    fn test_name_from_closed_scope_is_not_found() {
        let err = check_source("int f() { { int inner; } inner = 1; return 0; }").unwrap_err();
        assert!(matches!(err, TypeError::UndefinedSymbol { ref name, .. } if name == "inner"));
    }

    #[test]
    fn test_checking_twice_is_identical() {
        let program = parse("int x; x = 5.0;");
        let mut checker = TypeChecker::new();
        let first = checker.check(&program);
        let second = checker.check(&program);
        assert!(first.is_err());
        assert_eq!(first, second);
    }
}
