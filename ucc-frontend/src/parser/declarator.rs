//! Declarator composition
//!
//! Declarators are assembled piece by piece while the tokens arrive: the
//! name first, then array dimensions and parameter lists in source order,
//! then any leading pointers. Pieces live in an index-addressed arena and
//! link to each other through `next`. A [`Declarator`] handle remembers the
//! head of its chain, the name-holding leaf, and the piece that currently
//! links to the leaf, which is where the next modifier is spliced in.
//!
//! Once the specifier is known, [`DeclaratorArena::finish`] freezes the
//! chain into ordinary owned AST nodes.

use crate::ast::{Node, NodeKind};
use crate::parser::errors::ParseError;
use log::trace;
use ucc_common::Coord;

pub(crate) type PieceId = usize;

#[derive(Debug, Clone)]
pub(crate) enum PieceKind {
    Var { declname: String },
    Array { dim: Option<Node> },
    Func { args: Option<Node> },
    Ptr,
}

#[derive(Debug)]
struct Piece {
    kind: PieceKind,
    coord: Option<Coord>,
    next: Option<PieceId>,
}

/// Handle to a declarator under construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Declarator {
    head: PieceId,
    leaf: PieceId,
    leaf_parent: Option<PieceId>,
}

/// A run of modifier pieces already linked head to tail
#[derive(Debug, Clone, Copy)]
pub(crate) struct Modifier {
    head: PieceId,
    tail: PieceId,
}

#[derive(Debug, Default)]
pub(crate) struct DeclaratorArena {
    pieces: Vec<Option<Piece>>,
}

impl DeclaratorArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every piece; handles from before the reset become invalid
    pub fn reset(&mut self) {
        self.pieces.clear();
    }

    fn alloc(&mut self, kind: PieceKind, coord: Option<Coord>) -> PieceId {
        self.pieces.push(Some(Piece { kind, coord, next: None }));
        self.pieces.len() - 1
    }

    fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id).and_then(Option::as_ref)
    }

    fn link(&mut self, from: PieceId, to: PieceId) {
        if let Some(Some(piece)) = self.pieces.get_mut(from) {
            piece.next = Some(to);
        }
    }

    /// Start a declarator from its name
    pub fn leaf(&mut self, declname: String, coord: Option<Coord>) -> Declarator {
        let id = self.alloc(PieceKind::Var { declname }, coord);
        Declarator { head: id, leaf: id, leaf_parent: None }
    }

    /// A single array or function modifier
    pub fn modifier(&mut self, kind: PieceKind, coord: Option<Coord>) -> Modifier {
        let id = self.alloc(kind, coord);
        Modifier { head: id, tail: id }
    }

    /// One pointer per coordinate, outermost first
    pub fn pointers(&mut self, coords: &[Coord]) -> Option<Modifier> {
        let (first, rest) = coords.split_first()?;
        let head = self.alloc(PieceKind::Ptr, Some(*first));
        let mut tail = head;
        for coord in rest {
            let id = self.alloc(PieceKind::Ptr, Some(*coord));
            self.link(tail, id);
            tail = id;
        }
        Some(Modifier { head, tail })
    }

    /// Splice `modifier` between the declarator's leaf and whatever linked to it
    pub fn apply(&mut self, decl: Declarator, modifier: Modifier) -> Declarator {
        self.link(modifier.tail, decl.leaf);

        let head = match decl.leaf_parent {
            None => modifier.head,
            Some(parent) => {
                self.link(parent, modifier.head);
                decl.head
            }
        };

        trace!(
            "declarator splice: {:?} now links to leaf {} (head {})",
            self.piece(modifier.tail).map(|p| &p.kind),
            decl.leaf,
            head
        );

        Declarator { head, leaf: decl.leaf, leaf_parent: Some(modifier.tail) }
    }

    /// Whether the outermost piece is a parameter list
    pub fn is_function(&self, decl: Declarator) -> bool {
        matches!(self.piece(decl.head).map(|p| &p.kind), Some(PieceKind::Func { .. }))
    }

    /// Declared name and its coordinate
    pub fn name(&self, decl: Declarator) -> Option<(String, Option<Coord>)> {
        match self.piece(decl.leaf) {
            Some(Piece { kind: PieceKind::Var { declname }, coord, .. }) => Some((declname.clone(), *coord)),
            _ => None,
        }
    }

    /// Attach `specifier` to the leaf and freeze the chain into owned nodes
    pub fn finish(&mut self, decl: Declarator, specifier: Node) -> Result<Node, ParseError> {
        let mut chain = Vec::new();
        let mut cursor = Some(decl.head);
        while let Some(id) = cursor {
            let piece = self
                .pieces
                .get_mut(id)
                .and_then(Option::take)
                .ok_or_else(|| ParseError::InvalidExpression {
                    message: "Malformed declarator".to_string(),
                    location: specifier.coord,
                })?;
            cursor = if id == decl.leaf { None } else { piece.next };
            chain.push(piece);
        }

        let mut node = specifier;
        for piece in chain.into_iter().rev() {
            let ty = Box::new(node);
            let kind = match piece.kind {
                PieceKind::Var { declname } => NodeKind::VarDecl { declname, ty },
                PieceKind::Array { dim } => NodeKind::ArrayDecl { ty, dim: dim.map(Box::new) },
                PieceKind::Func { args } => NodeKind::FuncDecl { args: args.map(Box::new), ty },
                PieceKind::Ptr => NodeKind::PtrDecl { ty },
            };
            node = Node::new(kind, piece.coord);
        }

        Ok(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int_type() -> Node {
        Node::new(NodeKind::Type { names: vec!["int".to_string()] }, Some(Coord::new(1, 1)))
    }

    fn dim(value: &str) -> Option<Node> {
        Some(Node::new(
            NodeKind::Constant { ty: "int".to_string(), value: value.to_string() },
            None,
        ))
    }

    /// Kind names from the outermost node down to the specifier
    fn chain_of(mut node: &Node) -> Vec<&'static str> {
        let mut kinds = vec![node.kind_name()];
        loop {
            node = match &node.kind {
                NodeKind::VarDecl { ty, .. }
                | NodeKind::ArrayDecl { ty, .. }
                | NodeKind::PtrDecl { ty }
                | NodeKind::FuncDecl { ty, .. } => &**ty,
                _ => return kinds,
            };
            kinds.push(node.kind_name());
        }
    }

    #[test]
    fn test_bare_name() {
        let mut arena = DeclaratorArena::new();
        let d = arena.leaf("x".to_string(), None);
        assert!(!arena.is_function(d));

        let node = arena.finish(d, int_type()).unwrap();
        assert_eq!(chain_of(&node), vec!["VarDecl", "Type"]);
    }

    #[test]
    fn test_arrays_compose_in_source_order() {
        let mut arena = DeclaratorArena::new();
        let mut d = arena.leaf("a".to_string(), None);
        let m = arena.modifier(PieceKind::Array { dim: dim("5") }, None);
        d = arena.apply(d, m);
        let m = arena.modifier(PieceKind::Array { dim: dim("10") }, None);
        d = arena.apply(d, m);

        let node = arena.finish(d, int_type()).unwrap();
        assert_eq!(chain_of(&node), vec!["ArrayDecl", "ArrayDecl", "VarDecl", "Type"]);

        let NodeKind::ArrayDecl { dim: Some(outer), .. } = &node.kind else {
            panic!("expected array");
        };
        assert_eq!(outer.attributes()[1].1, "5");
    }

    #[test]
    fn test_pointer_after_function() {
        // *f()
        let mut arena = DeclaratorArena::new();
        let mut d = arena.leaf("f".to_string(), None);
        let m = arena.modifier(PieceKind::Func { args: None }, None);
        d = arena.apply(d, m);
        let ptrs = arena.pointers(&[Coord::new(1, 5)]).unwrap();
        d = arena.apply(d, ptrs);

        assert!(arena.is_function(d));
        let node = arena.finish(d, int_type()).unwrap();
        assert_eq!(chain_of(&node), vec!["FuncDecl", "PtrDecl", "VarDecl", "Type"]);
    }

    #[test]
    fn test_parenthesized_pointer_to_function() {
        // (*f)()
        let mut arena = DeclaratorArena::new();
        let mut d = arena.leaf("f".to_string(), None);
        let ptrs = arena.pointers(&[Coord::new(1, 6)]).unwrap();
        d = arena.apply(d, ptrs);
        let m = arena.modifier(PieceKind::Func { args: None }, None);
        d = arena.apply(d, m);

        assert!(!arena.is_function(d));
        let node = arena.finish(d, int_type()).unwrap();
        assert_eq!(chain_of(&node), vec!["PtrDecl", "FuncDecl", "VarDecl", "Type"]);
    }

    #[test]
    fn test_double_pointer_chain() {
        let mut arena = DeclaratorArena::new();
        let mut d = arena.leaf("p".to_string(), None);
        let ptrs = arena.pointers(&[Coord::new(1, 5), Coord::new(1, 6)]).unwrap();
        d = arena.apply(d, ptrs);

        let node = arena.finish(d, int_type()).unwrap();
        assert_eq!(chain_of(&node), vec!["PtrDecl", "PtrDecl", "VarDecl", "Type"]);
        assert!(arena.pointers(&[]).is_none());
    }

    #[test]
    fn test_finish_twice_is_an_error() {
        let mut arena = DeclaratorArena::new();
        let d = arena.leaf("x".to_string(), None);
        arena.finish(d, int_type()).unwrap();
        assert!(arena.finish(d, int_type()).is_err());
    }
}
