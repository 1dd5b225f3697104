//! Expression type inference
//!
//! Each rule returns the inferred [`ValueType`] of its node. Operand types
//! must agree exactly; there are no implicit conversions in uC.

use crate::ast::{Node, NodeKind, NodeVisitor};
use crate::semantic::errors::TypeError;
use crate::semantic::types::{self, ValueType};
use crate::semantic::TypeChecker;
use crate::types::{self as registry, OpCategory, INT_TYPE};

impl TypeChecker {
    pub(crate) fn visit_constant(&mut self, node: &Node) -> Result<Option<ValueType>, TypeError> {
        let NodeKind::Constant { ty, .. } = &node.kind else {
            return Ok(None);
        };
        registry::lookup(ty)
            .map(|t| Some(ValueType::Basic(t)))
            .ok_or_else(|| TypeError::UndefinedSymbol { name: ty.clone(), location: node.coord })
    }

    pub(crate) fn visit_id(&mut self, node: &Node, name: &str) -> Result<Option<ValueType>, TypeError> {
        match self.symtab.lookup(name) {
            Some(ty) => Ok(Some(ty.clone())),
            None => Err(TypeError::UndefinedSymbol { name: name.to_string(), location: node.coord }),
        }
    }

    pub(crate) fn visit_binary_op(
        &mut self,
        node: &Node,
        op: &str,
        lvalue: &Node,
        rvalue: &Node,
    ) -> Result<Option<ValueType>, TypeError> {
        let left = self.expr_type(lvalue)?;
        let right = self.expr_type(rvalue)?;
        if left != right {
            return Err(TypeError::TypeMismatch { expected: left, found: right, location: node.coord });
        }

        let descriptor = left.descriptor();
        if !descriptor.supports(op, OpCategory::Binary) && !descriptor.supports(op, OpCategory::Relational) {
            return Err(TypeError::OperatorMismatch { op: op.to_string(), ty: left, location: node.coord });
        }
        Ok(Some(left))
    }

    pub(crate) fn visit_unary_op(&mut self, node: &Node, op: &str, expr: &Node) -> Result<Option<ValueType>, TypeError> {
        let operand = self.expr_type(expr)?;
        let mismatch = |ty: ValueType| TypeError::OperatorMismatch { op: op.to_string(), ty, location: node.coord };

        if !operand.descriptor().supports(op, OpCategory::Unary) {
            return Err(mismatch(operand));
        }
        match op {
            "&" => Ok(Some(ValueType::Pointer(Box::new(operand)))),
            "*" => match operand.element() {
                Some(inner) => Ok(Some(inner)),
                None => Err(mismatch(operand)),
            },
            _ => Ok(Some(operand)),
        }
    }

    pub(crate) fn visit_assignment(
        &mut self,
        node: &Node,
        op: &str,
        lvalue: &Node,
        rvalue: &Node,
    ) -> Result<Option<ValueType>, TypeError> {
        let target = self.expr_type(lvalue)?;
        if !lvalue.is_location() {
            return Err(TypeError::OperatorMismatch { op: op.to_string(), ty: target, location: lvalue.coord });
        }
        let value = self.expr_type(rvalue)?;
        if target != value {
            return Err(TypeError::TypeMismatch { expected: target, found: value, location: node.coord });
        }
        if !target.descriptor().supports(op, OpCategory::Assignment) {
            return Err(TypeError::OperatorMismatch { op: op.to_string(), ty: target, location: node.coord });
        }
        Ok(Some(target))
    }

    pub(crate) fn visit_cast(&mut self, to_type: &Node, expr: &Node) -> Result<Option<ValueType>, TypeError> {
        self.visit(expr)?;
        types::resolve_specifier(to_type).map(Some)
    }

    pub(crate) fn visit_expr_list(&mut self, exprs: &[Node]) -> Result<Option<ValueType>, TypeError> {
        let mut last = None;
        for expr in exprs {
            last = self.visit(expr)?;
        }
        Ok(last)
    }

    pub(crate) fn visit_func_call(
        &mut self,
        node: &Node,
        callee: &Node,
        args: Option<&Node>,
    ) -> Result<Option<ValueType>, TypeError> {
        let undefined = || TypeError::UndefinedFunction {
            name: callee.name().unwrap_or(callee.kind_name()).to_string(),
            location: callee.coord,
        };
        let (ret, params) = match &callee.kind {
            NodeKind::ID { name } => match self.symtab.lookup(name) {
                Some(ValueType::Function { ret, params }) => ((**ret).clone(), params.clone()),
                _ => return Err(undefined()),
            },
            _ => return Err(undefined()),
        };

        let args: Vec<&Node> = match args {
            None => Vec::new(),
            Some(Node { kind: NodeKind::ExprList { exprs }, .. }) => exprs.iter().collect(),
            Some(single) => vec![single],
        };
        let mut arg_types = Vec::with_capacity(args.len());
        for arg in &args {
            arg_types.push(self.expr_type(arg)?);
        }

        if arg_types.len() != params.len() {
            return Err(TypeError::ArgumentCountMismatch {
                name: callee.name().unwrap_or_default().to_string(),
                expected: params.len(),
                found: arg_types.len(),
                location: node.coord,
            });
        }
        for ((param, found), arg) in params.into_iter().zip(arg_types).zip(args) {
            if !param.accepts_argument(&found) {
                return Err(TypeError::TypeMismatch { expected: param, found, location: arg.coord });
            }
        }
        Ok(Some(ret))
    }

    pub(crate) fn visit_array_ref(&mut self, base: &Node, subscript: &Node) -> Result<Option<ValueType>, TypeError> {
        let not_indexable = || TypeError::UndefinedSymbol {
            name: base.name().unwrap_or(base.kind_name()).to_string(),
            location: base.coord,
        };

        let base_type = self.expr_type(base)?;
        if !base_type.is_indexable() {
            return Err(not_indexable());
        }

        let index = self.expr_type(subscript)?;
        if !index.is_basic(&INT_TYPE) {
            return Err(TypeError::IndexTypeError { found: index, location: subscript.coord });
        }
        base_type.element().map(Some).ok_or_else(not_indexable)
    }

    /// A list is an array of its elements. Every element must have the
    /// first element's shape, so a nested list never lines up with a scalar.
    pub(crate) fn visit_init_list(&mut self, exprs: &[Node]) -> Result<Option<ValueType>, TypeError> {
        let mut first: Option<ValueType> = None;
        for expr in exprs {
            let ty = self.expr_type(expr)?;
            match &first {
                None => first = Some(ty),
                Some(expected) if !expected.same_shape(&ty) => {
                    return Err(TypeError::TypeConsistency {
                        expected: expected.clone(),
                        found: ty,
                        location: expr.coord,
                    });
                }
                Some(_) => {}
            }
        }

        let length = Some(exprs.len() as i64);
        Ok(first.map(|first| match first {
            ValueType::Array { element, mut dims } => {
                dims.insert(0, length);
                ValueType::Array { element, dims }
            }
            scalar => ValueType::Array { element: Box::new(scalar), dims: vec![length] },
        }))
    }
}

#[cfg(test)]
mod tests {
    use crate::semantic::tests::check_source;
    use crate::semantic::{TypeError, ValueType};
    use crate::types::{CHAR_TYPE, FLOAT_TYPE};
    use ucc_common::Coord;

    fn error_of(source: &str) -> TypeError {
        check_source(source).unwrap_err()
    }

    #[test]
    fn test_binary_operands_must_agree() {
        assert!(check_source("int a; int b; a = a * b + 1;").is_ok());
        let err = error_of("1 + 1.0;");
        assert_eq!(
            err,
            TypeError::TypeMismatch {
                expected: ValueType::int(),
                found: ValueType::Basic(&FLOAT_TYPE),
                location: Some(Coord::new(1, 1)),
            }
        );
    }

    #[test]
    fn test_relational_result_is_operand_type() {
        assert!(check_source("float f; f = f < 1.0;").is_ok());
        assert!(check_source("int a; a = a == 1 && a != 2;").is_ok());
    }

    #[test]
    fn test_string_has_no_arithmetic() {
        let err = error_of("\"a\" + \"b\";");
        assert!(matches!(err, TypeError::OperatorMismatch { ref op, .. } if op == "+"));
        assert!(check_source("\"a\" == \"b\";").is_ok());
    }

    #[test]
    fn test_unary_operators() {
        assert!(check_source("int a; a = -a; a++; --a; a = !a;").is_ok());
        let err = error_of("int a; *a;");
        assert!(matches!(err, TypeError::OperatorMismatch { ref op, .. } if op == "*"));
        assert!(check_source("int a; int *p = &a; a = *p;").is_ok());
    }

    #[test]
    fn test_assignment_rules() {
        let err = error_of("y = 1;");
        assert!(matches!(err, TypeError::UndefinedSymbol { ref name, .. } if name == "y"));

        let err = error_of("int x;\nx = 5.0;");
        assert_eq!(err.location(), Some(Coord::new(2, 1)));

        assert!(check_source("float f; f += 2.0; f %= 1.0;").is_ok());
        let err = error_of("int a[2]; int b[2]; a = b;");
        assert!(matches!(err, TypeError::OperatorMismatch { ref op, .. } if op == "="));
    }

    #[test]
    fn test_assignment_target_must_be_a_location() {
        use crate::ast::{Node, NodeKind};
        use crate::semantic::check;

        let constant = |value: &str, col| {
            Node::new(
                NodeKind::Constant { ty: "int".to_string(), value: value.to_string() },
                Some(Coord::new(1, col)),
            )
        };
        // `5 = 3;` as a tree; the parser refuses to build it
        let assign = Node::new(
            NodeKind::Assignment {
                op: "=".to_string(),
                lvalue: Box::new(constant("5", 1)),
                rvalue: Box::new(constant("3", 5)),
            },
            Some(Coord::new(1, 1)),
        );
        let program = Node::new(NodeKind::Program { gdecls: vec![assign] }, None);

        let err = check(&program).unwrap_err();
        assert_eq!(
            err,
            TypeError::OperatorMismatch { op: "=".to_string(), ty: ValueType::int(), location: Some(Coord::new(1, 1)) }
        );

        assert!(check_source("int a[2]; int *p; a[1] = 4; *p = 1;").is_ok());
    }

    #[test]
    fn test_cast_yields_target_type() {
        assert!(check_source("int i; float f; f = (float) i;").is_ok());
        let err = error_of("int i; (float) j;");
        assert!(matches!(err, TypeError::UndefinedSymbol { ref name, .. } if name == "j"));
    }

    #[test]
    fn test_array_references() {
        assert!(check_source("int a[3]; a[0] = 1;").is_ok());
        assert!(check_source("float m[2][3]; m[1][2] = 0.5;").is_ok());
        assert!(check_source("char s[4]; char c; c = s[1];").is_ok());

        let err = error_of("int a[3]; a[1.0] = 1;");
        assert!(matches!(err, TypeError::IndexTypeError { ref found, .. } if *found == ValueType::Basic(&FLOAT_TYPE)));

        let err = error_of("int x; x[0] = 1;");
        assert!(matches!(err, TypeError::UndefinedSymbol { ref name, .. } if name == "x"));
    }

    #[test]
    fn test_partial_indexing_gives_sub_array() {
        let err = error_of("int m[2][3]; int x; x = m[1];");
        assert!(matches!(err, TypeError::TypeMismatch { ref found, .. } if found.to_string() == "int[3]"));
    }

    #[test]
    fn test_function_calls() {
        let base = "int f(int n) { return n; } int y; ";
        assert!(check_source(&format!("{base}y = f(2);")).is_ok());

        let err = error_of(&format!("{base}y = f(2, 3);"));
        assert!(matches!(err, TypeError::ArgumentCountMismatch { expected: 1, found: 2, .. }));

        let err = error_of(&format!("{base}y = f(2.0);"));
        assert!(matches!(err, TypeError::TypeMismatch { .. }));

        let err = error_of(&format!("{base}y = g(1);"));
        assert!(matches!(err, TypeError::UndefinedFunction { ref name, .. } if name == "g"));

        let err = error_of(&format!("{base}y = y(1);"));
        assert!(matches!(err, TypeError::UndefinedFunction { .. }));
    }

    #[test]
    fn test_unsized_array_parameter() {
        let source = "int sum(int v[], int n) { return v[0]; } int a[10]; int s; s = sum(a, 10);";
        assert!(check_source(source).is_ok());
        let err = error_of("int sum(int v[]) { return 0; } float a[10]; sum(a);");
        assert!(matches!(err, TypeError::TypeMismatch { .. }));
    }

    #[test]
    fn test_call_without_arguments() {
        assert!(check_source("void tick() { return; } tick();").is_ok());
        let err = error_of("int f(int n); f();");
        assert!(matches!(err, TypeError::ArgumentCountMismatch { expected: 1, found: 0, .. }));
    }

    #[test]
    fn test_init_list_consistency() {
        let err = error_of("int a[2] = {1, 'c'};");
        assert_eq!(
            err,
            TypeError::TypeConsistency {
                expected: ValueType::int(),
                found: ValueType::Basic(&CHAR_TYPE),
                location: Some(Coord::new(1, 16)),
            }
        );
    }

    #[test]
    fn test_nested_list_is_not_a_scalar() {
        let err = error_of("int a[2][2] = {{1, 2}, 3};");
        assert_eq!(
            err,
            TypeError::TypeConsistency {
                expected: ValueType::Array { element: Box::new(ValueType::int()), dims: vec![Some(2)] },
                found: ValueType::int(),
                location: Some(Coord::new(1, 24)),
            }
        );
        assert_eq!(err.to_string(), "1:24: Inconsistent initializer types: int[2] and int");

        let err = error_of("int a[2][2] = {1, {2, 3}};");
        assert!(matches!(err, TypeError::TypeConsistency { ref expected, .. } if *expected == ValueType::int()));

        // rows of different lengths still share a shape
        assert!(check_source("int m[2][3] = {{1, 2, 3}, {4}};").is_ok());
    }
}
