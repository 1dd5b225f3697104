//! Type registry for uC
//!
//! Every primitive and composite type has one static descriptor carrying
//! the operators it supports. Descriptors are shared by `&'static`
//! reference and compared by name.

use serde::Serialize;
use std::fmt;

/// Operator category used when asking a type what it supports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum OpCategory {
    Unary,
    Binary,
    Relational,
    Assignment,
}

impl fmt::Display for OpCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpCategory::Unary => write!(f, "unary"),
            OpCategory::Binary => write!(f, "binary"),
            OpCategory::Relational => write!(f, "relational"),
            OpCategory::Assignment => write!(f, "assignment"),
        }
    }
}

/// Immutable type descriptor
#[derive(Debug, Serialize)]
pub struct UcType {
    pub name: &'static str,
    pub unary_ops: &'static [&'static str],
    pub binary_ops: &'static [&'static str],
    pub rel_ops: &'static [&'static str],
    pub assign_ops: &'static [&'static str],
}

impl UcType {
    /// Whether `op` is legal for this type in the given category
    pub fn supports(&self, op: &str, category: OpCategory) -> bool {
        let ops = match category {
            OpCategory::Unary => self.unary_ops,
            OpCategory::Binary => self.binary_ops,
            OpCategory::Relational => self.rel_ops,
            OpCategory::Assignment => self.assign_ops,
        };
        ops.contains(&op)
    }
}

impl PartialEq for UcType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for UcType {}

impl fmt::Display for UcType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

const NUMERIC_UNARY: &[&str] = &["-", "+", "--", "++", "p--", "p++", "&", "!"];
const NUMERIC_BINARY: &[&str] = &["+", "-", "*", "/", "%"];
const NUMERIC_REL: &[&str] = &["==", "!=", "<", ">", "<=", ">=", "&&", "||"];
const NUMERIC_ASSIGN: &[&str] = &["=", "+=", "-=", "*=", "/=", "%="];

pub static VOID_TYPE: UcType = UcType {
    name: "void",
    unary_ops: &[],
    binary_ops: &[],
    rel_ops: &[],
    assign_ops: &[],
};

pub static INT_TYPE: UcType = UcType {
    name: "int",
    unary_ops: NUMERIC_UNARY,
    binary_ops: NUMERIC_BINARY,
    rel_ops: NUMERIC_REL,
    assign_ops: NUMERIC_ASSIGN,
};

pub static FLOAT_TYPE: UcType = UcType {
    name: "float",
    unary_ops: NUMERIC_UNARY,
    binary_ops: NUMERIC_BINARY,
    rel_ops: NUMERIC_REL,
    assign_ops: NUMERIC_ASSIGN,
};

pub static CHAR_TYPE: UcType = UcType {
    name: "char",
    unary_ops: NUMERIC_UNARY,
    binary_ops: NUMERIC_BINARY,
    rel_ops: NUMERIC_REL,
    assign_ops: NUMERIC_ASSIGN,
};

pub static STRING_TYPE: UcType = UcType {
    name: "string",
    unary_ops: &["&"],
    binary_ops: &[],
    rel_ops: &["==", "!="],
    assign_ops: &[],
};

/// Also the descriptor for pointers
pub static ARRAY_TYPE: UcType = UcType {
    name: "array",
    unary_ops: &["*", "&"],
    binary_ops: &[],
    rel_ops: &["==", "!="],
    assign_ops: &[],
};

/// Look up a descriptor by name
pub fn lookup(name: &str) -> Option<&'static UcType> {
    match name {
        "void" => Some(&VOID_TYPE),
        "int" => Some(&INT_TYPE),
        "float" => Some(&FLOAT_TYPE),
        "char" => Some(&CHAR_TYPE),
        "string" => Some(&STRING_TYPE),
        "array" => Some(&ARRAY_TYPE),
        _ => None,
    }
}
