//! Abstract Syntax Tree definitions for uC
//!
//! Every syntactic construct is a variant of [`NodeKind`] wrapped in a
//! [`Node`] that carries its source coordinate. The tree is built by the
//! parser and only read afterwards.
//!
//! Each variant declares an ordered list of fields through [`Node::fields`].
//! Child enumeration, attribute listing and both renderers are derived from
//! that single list, so a new field only has to be added in one place.

pub mod display;

pub use display::ShowOptions;

use serde::{Deserialize, Serialize};
use ucc_common::Coord;

/// An AST node: a kind tag with its fields, plus a source coordinate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub kind: NodeKind,
    pub coord: Option<Coord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum NodeKind {
    /// Translation unit
    Program { gdecls: Vec<Node> },

    /// Top-level declaration list
    GlobalDecl { decls: Vec<Node> },

    /// A single declared name with its type chain and optional initializer
    Decl {
        name: String,
        ty: Box<Node>,
        init: Option<Box<Node>>,
    },

    /// Leaf of a declarator chain, holding the specifier
    VarDecl { declname: String, ty: Box<Node> },

    ArrayDecl {
        ty: Box<Node>,
        dim: Option<Box<Node>>,
    },

    PtrDecl { ty: Box<Node> },

    /// `args` is absent for `()` and `(void)`
    FuncDecl {
        args: Option<Box<Node>>,
        ty: Box<Node>,
    },

    /// Function definition; `param_decls` holds old-style parameter declarations
    FuncDef {
        decl: Box<Node>,
        param_decls: Vec<Node>,
        body: Box<Node>,
    },

    /// Primitive type specifier
    Type { names: Vec<String> },

    /// Literal; `ty` is one of int, float, char, string
    Constant { ty: String, value: String },

    ID { name: String },

    BinaryOp {
        op: String,
        lvalue: Box<Node>,
        rvalue: Box<Node>,
    },

    UnaryOp { op: String, expr: Box<Node> },

    Assignment {
        op: String,
        lvalue: Box<Node>,
        rvalue: Box<Node>,
    },

    Cast { to_type: Box<Node>, expr: Box<Node> },

    ExprList { exprs: Vec<Node> },

    ParamList { params: Vec<Node> },

    FuncCall {
        name: Box<Node>,
        args: Option<Box<Node>>,
    },

    ArrayRef {
        name: Box<Node>,
        subscript: Box<Node>,
    },

    Compound { block_items: Vec<Node> },

    If {
        cond: Box<Node>,
        iftrue: Box<Node>,
        iffalse: Option<Box<Node>>,
    },

    While { cond: Box<Node>, stmt: Box<Node> },

    For {
        init: Option<Box<Node>>,
        cond: Option<Box<Node>>,
        next: Option<Box<Node>>,
        stmt: Box<Node>,
    },

    /// Declarations in a `for` header
    DeclList { decls: Vec<Node> },

    EmptyStatement,

    Assert { expr: Box<Node> },

    Print { expr: Option<Box<Node>> },

    Read { expr: Box<Node> },

    InitList { exprs: Vec<Node> },

    Break,

    Return { expr: Option<Box<Node>> },
}

/// One named field of a node, in declaration order
#[derive(Debug, Clone, Copy)]
pub enum Field<'a> {
    /// Plain value rendered inline (operator symbol, name, literal)
    Attr(&'static str, &'a str),
    /// Type names list, rendered inline
    Names(&'static str, &'a [String]),
    /// Single child slot, possibly absent
    Child(&'static str, Option<&'a Node>),
    /// List of children
    List(&'static str, &'a [Node]),
}

impl Node {
    pub fn new(kind: NodeKind, coord: Option<Coord>) -> Self {
        Self { kind, coord }
    }

    /// Kind tag as written in renderings
    pub fn kind_name(&self) -> &'static str {
        match &self.kind {
            NodeKind::Program { .. } => "Program",
            NodeKind::GlobalDecl { .. } => "GlobalDecl",
            NodeKind::Decl { .. } => "Decl",
            NodeKind::VarDecl { .. } => "VarDecl",
            NodeKind::ArrayDecl { .. } => "ArrayDecl",
            NodeKind::PtrDecl { .. } => "PtrDecl",
            NodeKind::FuncDecl { .. } => "FuncDecl",
            NodeKind::FuncDef { .. } => "FuncDef",
            NodeKind::Type { .. } => "Type",
            NodeKind::Constant { .. } => "Constant",
            NodeKind::ID { .. } => "ID",
            NodeKind::BinaryOp { .. } => "BinaryOp",
            NodeKind::UnaryOp { .. } => "UnaryOp",
            NodeKind::Assignment { .. } => "Assignment",
            NodeKind::Cast { .. } => "Cast",
            NodeKind::ExprList { .. } => "ExprList",
            NodeKind::ParamList { .. } => "ParamList",
            NodeKind::FuncCall { .. } => "FuncCall",
            NodeKind::ArrayRef { .. } => "ArrayRef",
            NodeKind::Compound { .. } => "Compound",
            NodeKind::If { .. } => "If",
            NodeKind::While { .. } => "While",
            NodeKind::For { .. } => "For",
            NodeKind::DeclList { .. } => "DeclList",
            NodeKind::EmptyStatement => "EmptyStatement",
            NodeKind::Assert { .. } => "Assert",
            NodeKind::Print { .. } => "Print",
            NodeKind::Read { .. } => "Read",
            NodeKind::InitList { .. } => "InitList",
            NodeKind::Break => "Break",
            NodeKind::Return { .. } => "Return",
        }
    }

    /// Every field of this node, attributes and child slots, in order
    pub fn fields(&self) -> Vec<Field<'_>> {
        use Field::{Attr, Child, List, Names};

        match &self.kind {
            NodeKind::Program { gdecls } => vec![List("gdecls", gdecls)],
            NodeKind::GlobalDecl { decls } => vec![List("decls", decls)],
            NodeKind::Decl { name, ty, init } => vec![
                Attr("name", name),
                Child("type", present(ty)),
                Child("init", init.as_deref()),
            ],
            NodeKind::VarDecl { declname, ty } => {
                vec![Attr("declname", declname), Child("type", present(ty))]
            }
            NodeKind::ArrayDecl { ty, dim } => {
                vec![Child("type", present(ty)), Child("dim", dim.as_deref())]
            }
            NodeKind::PtrDecl { ty } => vec![Child("type", present(ty))],
            NodeKind::FuncDecl { args, ty } => {
                vec![Child("args", args.as_deref()), Child("type", present(ty))]
            }
            NodeKind::FuncDef { decl, param_decls, body } => vec![
                Child("decl", present(decl)),
                List("param_decls", param_decls),
                Child("body", present(body)),
            ],
            NodeKind::Type { names } => vec![Names("names", names)],
            NodeKind::Constant { ty, value } => vec![Attr("type", ty), Attr("value", value)],
            NodeKind::ID { name } => vec![Attr("name", name)],
            NodeKind::BinaryOp { op, lvalue, rvalue } | NodeKind::Assignment { op, lvalue, rvalue } => vec![
                Attr("op", op),
                Child("lvalue", present(lvalue)),
                Child("rvalue", present(rvalue)),
            ],
            NodeKind::UnaryOp { op, expr } => vec![Attr("op", op), Child("expr", present(expr))],
            NodeKind::Cast { to_type, expr } => {
                vec![Child("to_type", present(to_type)), Child("expr", present(expr))]
            }
            NodeKind::ExprList { exprs } | NodeKind::InitList { exprs } => vec![List("exprs", exprs)],
            NodeKind::ParamList { params } => vec![List("params", params)],
            NodeKind::FuncCall { name, args } => {
                vec![Child("name", present(name)), Child("args", args.as_deref())]
            }
            NodeKind::ArrayRef { name, subscript } => {
                vec![Child("name", present(name)), Child("subscript", present(subscript))]
            }
            NodeKind::Compound { block_items } => vec![List("block_items", block_items)],
            NodeKind::If { cond, iftrue, iffalse } => vec![
                Child("cond", present(cond)),
                Child("iftrue", present(iftrue)),
                Child("iffalse", iffalse.as_deref()),
            ],
            NodeKind::While { cond, stmt } => {
                vec![Child("cond", present(cond)), Child("stmt", present(stmt))]
            }
            NodeKind::For { init, cond, next, stmt } => vec![
                Child("init", init.as_deref()),
                Child("cond", cond.as_deref()),
                Child("next", next.as_deref()),
                Child("stmt", present(stmt)),
            ],
            NodeKind::DeclList { decls } => vec![List("decls", decls)],
            NodeKind::Assert { expr } | NodeKind::Read { expr } => vec![Child("expr", present(expr))],
            NodeKind::Print { expr } | NodeKind::Return { expr } => vec![Child("expr", expr.as_deref())],
            NodeKind::EmptyStatement | NodeKind::Break => Vec::new(),
        }
    }

    /// Non-absent structural children; list entries are named `field[i]`
    pub fn children(&self) -> Vec<(String, &Node)> {
        let mut nodelist = Vec::new();
        for field in self.fields() {
            match field {
                Field::Child(name, Some(child)) => nodelist.push((name.to_string(), child)),
                Field::List(name, items) => {
                    for (i, child) in items.iter().enumerate() {
                        nodelist.push((format!("{}[{}]", name, i), child));
                    }
                }
                Field::Child(_, None) | Field::Attr(..) | Field::Names(..) => {}
            }
        }
        nodelist
    }

    /// Attribute (name, rendered value) pairs, distinct from children
    pub fn attributes(&self) -> Vec<(&'static str, String)> {
        self.fields()
            .into_iter()
            .filter_map(|field| match field {
                Field::Attr(name, value) => Some((name, value.to_string())),
                Field::Names(name, names) => Some((name, names.join(" "))),
                Field::Child(..) | Field::List(..) => None,
            })
            .collect()
    }

    /// Whether this expression denotes storage: a name, a subscript or a dereference
    pub fn is_location(&self) -> bool {
        match &self.kind {
            NodeKind::ID { .. } | NodeKind::ArrayRef { .. } => true,
            NodeKind::UnaryOp { op, .. } => op == "*",
            _ => false,
        }
    }

    /// Declared or referenced name, for `ID`, `Decl` and `VarDecl` nodes
    pub fn name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::ID { name } | NodeKind::Decl { name, .. } => Some(name.as_str()),
            NodeKind::VarDecl { declname, .. } => Some(declname.as_str()),
            _ => None,
        }
    }
}

fn present(node: &Node) -> Option<&Node> {
    Some(node)
}

/// Pre-order tree walker. Implementors override `visit` for the kinds they
/// care about and fall back to `generic_visit` for the rest.
pub trait NodeVisitor {
    type Output: Default;
    type Error;

    fn visit(&mut self, node: &Node) -> Result<Self::Output, Self::Error> {
        self.generic_visit(node)
    }

    /// Visit every child left to right, discarding their results
    fn generic_visit(&mut self, node: &Node) -> Result<Self::Output, Self::Error> {
        for (_, child) in node.children() {
            self.visit(child)?;
        }
        Ok(Self::Output::default())
    }
}
