//! Declarations and symbol binding
//!
//! Handles `Decl`, the declarator kinds, `FuncDecl` and `FuncDef`: each one
//! resolves a [`ValueType`] and binds the declared name in the innermost
//! scope of the checker's symbol table.

use crate::ast::{Node, NodeKind, NodeVisitor};
use crate::semantic::errors::TypeError;
use crate::semantic::types::{self, ValueType};
use crate::semantic::TypeChecker;
use crate::types::CHAR_TYPE;
use crate::types::STRING_TYPE;
use log::debug;

impl TypeChecker {
    /// Resolve a declarator chain and bind its name
    pub(crate) fn declare(&mut self, declarator: &Node, old_style: &[Node]) -> Result<ValueType, TypeError> {
        let ty = types::resolve_declarator(declarator, old_style)?;
        if let Some(name) = types::declared_name(declarator) {
            self.symtab.put(name, ty.clone())?;
        }
        Ok(ty)
    }

    pub(crate) fn visit_decl(
        &mut self,
        decl: &Node,
        declarator: &Node,
        init: Option<&Node>,
    ) -> Result<Option<ValueType>, TypeError> {
        let declared = self.expr_type(declarator)?;
        if let Some(init) = init {
            self.check_initializer(&declared, init)?;
        }
        debug!("{}: declared {:?} as {}", at(decl), decl.name().unwrap_or("?"), declared);
        Ok(Some(declared))
    }

    /// A list may fill an array of equal or greater rank with the same
    /// element type; anything else must match the declared type exactly.
    fn check_initializer(&mut self, declared: &ValueType, init: &Node) -> Result<(), TypeError> {
        let found = match self.visit(init)? {
            Some(found) => found,
            // `{}` says nothing about the element type
            None => return Ok(()),
        };

        match (declared, &found) {
            (ValueType::Array { element, dims }, ValueType::Array { element: found_element, dims: found_dims })
                if matches!(init.kind, NodeKind::InitList { .. }) =>
            {
                if element != found_element {
                    return Err(TypeError::TypeMismatch {
                        expected: (**element).clone(),
                        found: (**found_element).clone(),
                        location: init.coord,
                    });
                }
                if found_dims.len() > dims.len() {
                    return Err(TypeError::TypeMismatch {
                        expected: declared.clone(),
                        found: found.clone(),
                        location: init.coord,
                    });
                }
                Ok(())
            }
            (ValueType::Array { element, .. }, _) if element.is_basic(&CHAR_TYPE) && found.is_basic(&STRING_TYPE) => {
                Ok(())
            }
            _ if found != *declared => Err(TypeError::TypeMismatch {
                expected: declared.clone(),
                found: found.clone(),
                location: init.coord,
            }),
            _ => Ok(()),
        }
    }

    /// A prototype binds the function name; its parameters live in a scope
    /// that closes straight away.
    pub(crate) fn visit_func_decl(&mut self, decl: &Node, args: Option<&Node>) -> Result<Option<ValueType>, TypeError> {
        let ty = self.declare(decl, &[])?;
        self.record_signature(decl, &ty);
        if let Some(args) = args {
            self.symtab.begin_scope();
            for (_, param) in args.children() {
                if matches!(param.kind, NodeKind::Decl { .. }) {
                    self.visit(param)?;
                }
            }
            self.symtab.end_scope()?;
        }
        Ok(Some(ty))
    }

    pub(crate) fn visit_func_def(
        &mut self,
        decl: &Node,
        param_decls: &[Node],
        body: &Node,
    ) -> Result<Option<ValueType>, TypeError> {
        let NodeKind::Decl { ty: declarator, .. } = &decl.kind else {
            return Err(TypeError::UndefinedSymbol {
                name: decl.kind_name().to_string(),
                location: decl.coord,
            });
        };

        let signature = self.declare(declarator, param_decls)?;
        let ValueType::Function { ret, .. } = &signature else {
            return Err(TypeError::UndefinedFunction {
                name: decl.name().unwrap_or_default().to_string(),
                location: decl.coord,
            });
        };
        self.record_signature(declarator, &signature);

        self.symtab.begin_scope();
        self.bind_parameters(declarator, param_decls)?;

        let enclosing = self.current_return.replace((**ret).clone());
        let result = self.visit(body);
        self.current_return = enclosing;
        result?;

        self.symtab.end_scope()?;
        Ok(Some(signature))
    }

    fn record_signature(&mut self, declarator: &Node, signature: &ValueType) {
        let name = types::declared_name(declarator).unwrap_or_default().to_string();
        debug!("{}: function {} : {}", at(declarator), name, signature);
        self.signatures.push((name, signature.clone()));
    }

    fn bind_parameters(&mut self, declarator: &Node, param_decls: &[Node]) -> Result<(), TypeError> {
        let Some(args) = function_args(declarator) else {
            return Ok(());
        };

        for (_, param) in args.children() {
            match &param.kind {
                NodeKind::ID { name } => {
                    // Identifier-list parameter; typed below if declared, else int
                    if !param_decls.iter().any(|d| d.name() == Some(name.as_str())) {
                        self.symtab.put(name, ValueType::int())?;
                    }
                }
                _ => {
                    self.visit(param)?;
                }
            }
        }
        for decl in param_decls {
            self.visit(decl)?;
        }
        Ok(())
    }
}

/// Parameter list of a function definition's declarator
fn function_args(declarator: &Node) -> Option<&Node> {
    match &declarator.kind {
        NodeKind::FuncDecl { args, .. } => args.as_deref(),
        _ => None,
    }
}

fn at(node: &Node) -> String {
    node.coord.map(|c| c.to_string()).unwrap_or_else(|| "<unknown>".to_string())
}
