//! Resolved types
//!
//! [`ValueType`] is what the checker binds to names and infers for
//! expressions. Declarator chains from the AST are resolved into it here.

use crate::ast::{Node, NodeKind};
use crate::semantic::errors::TypeError;
use crate::types::{self, UcType, ARRAY_TYPE, CHAR_TYPE, INT_TYPE, VOID_TYPE};
use std::fmt;

/// A fully resolved uC type
#[derive(Debug, Clone, PartialEq)]
pub enum ValueType {
    Basic(&'static UcType),
    /// Nested array declarators flatten into one dimension list, outermost first
    Array {
        element: Box<ValueType>,
        dims: Vec<Option<i64>>,
    },
    Pointer(Box<ValueType>),
    Function {
        ret: Box<ValueType>,
        params: Vec<ValueType>,
    },
}

impl ValueType {
    pub fn int() -> Self {
        ValueType::Basic(&INT_TYPE)
    }

    pub fn void() -> Self {
        ValueType::Basic(&VOID_TYPE)
    }

    /// Descriptor whose operator sets apply to values of this type
    pub fn descriptor(&self) -> &'static UcType {
        match self {
            ValueType::Basic(ty) => *ty,
            ValueType::Array { .. } | ValueType::Pointer(_) => &ARRAY_TYPE,
            ValueType::Function { .. } => &VOID_TYPE,
        }
    }

    pub fn is_basic(&self, ty: &UcType) -> bool {
        matches!(self, ValueType::Basic(t) if *t == ty)
    }

    /// Whether this type can be subscripted
    pub fn is_indexable(&self) -> bool {
        matches!(self, ValueType::Array { .. } | ValueType::Pointer(_)) || self.is_basic(&types::STRING_TYPE)
    }

    /// Type produced by one subscript or dereference: the next array
    /// dimension, the pointee, or `char` for a string
    pub fn element(&self) -> Option<ValueType> {
        match self {
            ValueType::Array { element, dims } if dims.len() > 1 => Some(ValueType::Array {
                element: element.clone(),
                dims: dims[1..].to_vec(),
            }),
            ValueType::Array { element, .. } => Some((**element).clone()),
            ValueType::Pointer(inner) => Some((**inner).clone()),
            ValueType::Basic(ty) if *ty == &types::STRING_TYPE => Some(ValueType::Basic(&CHAR_TYPE)),
            _ => None,
        }
    }

    /// Arrays match on element type and rank, ignoring lengths; anything
    /// else must be equal.
    pub fn same_shape(&self, other: &ValueType) -> bool {
        match (self, other) {
            (
                ValueType::Array { element, dims },
                ValueType::Array { element: other_element, dims: other_dims },
            ) => element == other_element && dims.len() == other_dims.len(),
            _ => self == other,
        }
    }

    /// Whether an argument of type `arg` may be passed for this parameter.
    /// An unsized array parameter takes any array of the same element type and rank.
    pub fn accepts_argument(&self, arg: &ValueType) -> bool {
        match (self, arg) {
            (
                ValueType::Array { element, dims },
                ValueType::Array { element: arg_element, dims: arg_dims },
            ) if dims.first() == Some(&None) => {
                element == arg_element && dims.len() == arg_dims.len() && dims[1..] == arg_dims[1..]
            }
            _ => self == arg,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Basic(ty) => write!(f, "{}", ty),
            ValueType::Array { element, dims } => {
                write!(f, "{}", element)?;
                for dim in dims {
                    match dim {
                        Some(n) => write!(f, "[{}]", n)?,
                        None => write!(f, "[]")?,
                    }
                }
                Ok(())
            }
            ValueType::Pointer(inner) if matches!(**inner, ValueType::Function { .. }) => write!(f, "({})*", inner),
            ValueType::Pointer(inner) => write!(f, "{}*", inner),
            ValueType::Function { ret, params } => {
                write!(f, "(")?;
                for (i, param) in params.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", param)?;
                }
                write!(f, ") -> {}", ret)
            }
        }
    }
}

/// Resolve a type specifier node
pub fn resolve_specifier(node: &Node) -> Result<ValueType, TypeError> {
    match &node.kind {
        NodeKind::Type { names } => {
            let name = names.join(" ");
            types::lookup(&name)
                .map(ValueType::Basic)
                .ok_or(TypeError::UndefinedSymbol { name, location: node.coord })
        }
        // User type names have no descriptor
        NodeKind::ID { name } => Err(TypeError::UndefinedSymbol { name: name.clone(), location: node.coord }),
        NodeKind::VarDecl { .. } | NodeKind::ArrayDecl { .. } | NodeKind::PtrDecl { .. } | NodeKind::FuncDecl { .. } => {
            resolve_declarator(node, &[])
        }
        _ => Err(TypeError::UndefinedSymbol { name: node.kind_name().to_string(), location: node.coord }),
    }
}

/// Resolve a declarator chain (`VarDecl`, `ArrayDecl`, `PtrDecl`, `FuncDecl`).
/// `old_style` holds parameter declarations that give types to
/// identifier-list parameters; those without one default to `int`.
pub fn resolve_declarator(node: &Node, old_style: &[Node]) -> Result<ValueType, TypeError> {
    match &node.kind {
        NodeKind::VarDecl { ty, .. } => resolve_specifier(ty),

        NodeKind::ArrayDecl { ty, dim } => {
            let inner = resolve_declarator(ty, old_style)?;
            let size = dim.as_deref().and_then(literal_int);
            Ok(match inner {
                ValueType::Array { element, mut dims } => {
                    dims.insert(0, size);
                    ValueType::Array { element, dims }
                }
                other => ValueType::Array { element: Box::new(other), dims: vec![size] },
            })
        }

        NodeKind::PtrDecl { ty } => Ok(ValueType::Pointer(Box::new(resolve_declarator(ty, old_style)?))),

        NodeKind::FuncDecl { args, ty } => {
            let ret = resolve_declarator(ty, old_style)?;
            let mut params = Vec::new();
            if let Some(args) = args {
                for (_, param) in args.children() {
                    params.push(resolve_parameter(param, old_style)?);
                }
            }
            Ok(ValueType::Function { ret: Box::new(ret), params })
        }

        NodeKind::Decl { ty, .. } => resolve_declarator(ty, old_style),

        _ => resolve_specifier(node),
    }
}

fn resolve_parameter(param: &Node, old_style: &[Node]) -> Result<ValueType, TypeError> {
    match &param.kind {
        NodeKind::ID { name } => {
            match old_style.iter().find(|decl| decl.name() == Some(name.as_str())) {
                Some(decl) => resolve_declarator(decl, &[]),
                None => Ok(ValueType::int()),
            }
        }
        _ => resolve_declarator(param, &[]),
    }
}

/// Value of an integer literal array dimension; anything else is unresolved
fn literal_int(node: &Node) -> Option<i64> {
    match &node.kind {
        NodeKind::Constant { ty, value } if ty == "int" => value.parse().ok(),
        _ => None,
    }
}

/// Name held by the leaf of a declarator chain
pub fn declared_name(node: &Node) -> Option<&str> {
    match &node.kind {
        NodeKind::VarDecl { declname, .. } => Some(declname.as_str()),
        NodeKind::ArrayDecl { ty, .. } | NodeKind::PtrDecl { ty } | NodeKind::FuncDecl { ty, .. } => {
            declared_name(ty)
        }
        NodeKind::Decl { name, .. } => Some(name.as_str()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;
    use crate::lexer::Lexer;
    use crate::types::{FLOAT_TYPE, STRING_TYPE};

    fn decl_type(source: &str) -> Result<ValueType, TypeError> {
        let mut parser = Parser::new(Lexer::new(source, |_, _, _| {}));
        let program = parser.parse_program().unwrap();
        let global = program.children()[0].1;
        let decl = global.children()[0].1;
        resolve_declarator(decl, &[])
    }

    #[test]
    fn test_array_dimensions_flatten() {
        let ty = decl_type("int a[5][10];").unwrap();
        assert_eq!(
            ty,
            ValueType::Array { element: Box::new(ValueType::int()), dims: vec![Some(5), Some(10)] }
        );
        assert_eq!(ty.to_string(), "int[5][10]");
        assert_eq!(ty.element().map(|t| t.to_string()), Some("int[10]".to_string()));
    }

    #[test]
    fn test_unresolved_dimension() {
        let ty = decl_type("char s[n];").unwrap();
        assert_eq!(ty.to_string(), "char[]");
    }

    #[test]
    fn test_function_signature() {
        let ty = decl_type("float *f(int n, char s[]);").unwrap();
        assert_eq!(ty.to_string(), "(int, char[]) -> float*");
    }

    #[test]
    fn test_concatenated_specifier_is_undefined() {
        let err = decl_type("int float x;").unwrap_err();
        assert!(matches!(err, TypeError::UndefinedSymbol { ref name, .. } if name == "int float"));
    }

    #[test]
    fn test_unsized_array_parameter_accepts_any_length() {
        let param = ValueType::Array { element: Box::new(ValueType::int()), dims: vec![None] };
        let arg = ValueType::Array { element: Box::new(ValueType::int()), dims: vec![Some(8)] };
        let wrong_rank = ValueType::Array { element: Box::new(ValueType::int()), dims: vec![Some(8), Some(2)] };
        let wrong_element = ValueType::Array { element: Box::new(ValueType::Basic(&FLOAT_TYPE)), dims: vec![Some(8)] };

        assert!(param.accepts_argument(&arg));
        assert!(!param.accepts_argument(&wrong_rank));
        assert!(!param.accepts_argument(&wrong_element));
        assert!(!ValueType::int().accepts_argument(&ValueType::Basic(&FLOAT_TYPE)));
    }

    #[test]
    fn test_string_element_is_char() {
        let s = ValueType::Basic(&STRING_TYPE);
        assert!(s.is_indexable());
        assert_eq!(s.element(), Some(ValueType::Basic(&CHAR_TYPE)));
        assert_eq!(ValueType::int().element(), None);
    }
}
