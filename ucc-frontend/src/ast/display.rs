//! AST renderers
//!
//! Two deterministic forms: the one-line parenthesized form produced by
//! `Display`, and the indented tree produced by [`Node::show`].

use super::{Field, Node};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Options for the indented tree form
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowOptions {
    /// Render attributes as `name=value` instead of bare values
    pub attrnames: bool,
    /// Prefix each child with the slot it occupies in its parent
    pub nodenames: bool,
    /// Append `   @ line:col` to every node that has a coordinate
    pub showcoord: bool,
}

impl Node {
    /// Write the indented tree form of this node and its subtree
    pub fn show(&self, buf: &mut dyn fmt::Write, offset: usize, options: &ShowOptions) -> fmt::Result {
        self.show_as(buf, offset, options, None)
    }

    fn show_as(
        &self,
        buf: &mut dyn fmt::Write,
        offset: usize,
        options: &ShowOptions,
        slot: Option<&str>,
    ) -> fmt::Result {
        let lead = " ".repeat(offset);
        match slot {
            Some(slot) if options.nodenames => write!(buf, "{}{} <{}>:", lead, self.kind_name(), slot)?,
            _ => write!(buf, "{}{}:", lead, self.kind_name())?,
        }

        let attrs: Vec<String> = self
            .attributes()
            .into_iter()
            .map(|(name, value)| {
                if options.attrnames {
                    format!("{}={}", name, value)
                } else {
                    value
                }
            })
            .collect();
        if !attrs.is_empty() {
            write!(buf, " {}", attrs.join(", "))?;
        }

        if options.showcoord {
            if let Some(coord) = self.coord {
                write!(buf, "   @ {}", coord)?;
            }
        }
        writeln!(buf)?;

        for (child_name, child) in self.children() {
            child.show_as(buf, offset + 4, options, Some(&child_name))?;
        }

        Ok(())
    }

    /// Render the indented tree form into a fresh string
    pub fn to_tree_string(&self, options: &ShowOptions) -> String {
        let mut out = String::new();
        // Writing into a String never fails
        let _ = self.show(&mut out, 0, options);
        out
    }
}

/// Parenthesized form: `Kind(field=value, ...)` with absent slots as `None`
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.kind_name())?;

        for (i, field) in self.fields().into_iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match field {
                Field::Attr(name, value) => write!(f, "{}={}", name, value)?,
                Field::Names(name, names) => write!(f, "{}=[{}]", name, names.join(", "))?,
                Field::Child(name, Some(child)) => write!(f, "{}={}", name, child)?,
                Field::Child(name, None) => write!(f, "{}=None", name)?,
                Field::List(name, items) => {
                    write!(f, "{}=[", name)?;
                    for (j, item) in items.iter().enumerate() {
                        if j > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{}", item)?;
                    }
                    write!(f, "]")?;
                }
            }
        }

        write!(f, ")")
    }
}
