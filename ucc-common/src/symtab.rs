//! Scoped symbol table
//!
//! A stack of name bindings with lexical shadowing. The table is generic
//! over the bound value so the type checker can store whatever it resolves
//! names to.

use crate::error::ScopeUnderflow;
use log::debug;
use std::collections::HashMap;

/// Stack of scope frames, innermost last
#[derive(Debug, Clone)]
pub struct ScopedTable<V> {
    scopes: Vec<HashMap<String, V>>,
    opened: usize,
    closed: usize,
}

impl<V> ScopedTable<V> {
    /// Create a table with no open scope
    pub fn new() -> Self {
        Self {
            scopes: Vec::new(),
            opened: 0,
            closed: 0,
        }
    }

    /// Enter a new scope
    pub fn begin_scope(&mut self) {
        self.scopes.push(HashMap::new());
        self.opened += 1;
        debug!("begin scope (depth {})", self.scopes.len());
    }

    /// Exit the innermost scope, discarding its bindings
    pub fn end_scope(&mut self) -> Result<(), ScopeUnderflow> {
        if self.scopes.pop().is_none() {
            return Err(ScopeUnderflow { operation: "end_scope" });
        }
        self.closed += 1;
        debug!("end scope (depth {})", self.scopes.len());
        Ok(())
    }

    /// Bind (or rebind) a name in the innermost scope
    pub fn put(&mut self, name: &str, value: V) -> Result<(), ScopeUnderflow> {
        let scope = self
            .scopes
            .last_mut()
            .ok_or(ScopeUnderflow { operation: "put" })?;
        scope.insert(name.to_string(), value);
        Ok(())
    }

    /// Look up a name, searching from the innermost scope outward
    pub fn lookup(&self, name: &str) -> Option<&V> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    /// Number of currently open scopes
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Total number of scopes opened so far
    pub fn opened(&self) -> usize {
        self.opened
    }

    /// Total number of scopes closed so far
    pub fn closed(&self) -> usize {
        self.closed
    }
}

impl<V> Default for ScopedTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_table() {
        let mut table = ScopedTable::new();
        table.begin_scope();
        table.put("global", 1).unwrap();
        assert_eq!(table.lookup("global"), Some(&1));

        table.begin_scope();
        table.put("local", 2).unwrap();

        assert_eq!(table.lookup("global"), Some(&1));
        assert_eq!(table.lookup("local"), Some(&2));

        table.end_scope().unwrap();

        assert_eq!(table.lookup("global"), Some(&1));
        assert_eq!(table.lookup("local"), None);
    }

    #[test]
    fn test_shadowing() {
        let mut table = ScopedTable::new();
        table.begin_scope();
        table.put("x", "int").unwrap();
        table.begin_scope();
        table.put("x", "float").unwrap();

        assert_eq!(table.lookup("x"), Some(&"float"));

        table.end_scope().unwrap();
        assert_eq!(table.lookup("x"), Some(&"int"));
    }

    #[test]
    fn test_put_overwrites_innermost_only() {
        let mut table = ScopedTable::new();
        table.begin_scope();
        table.put("x", 1).unwrap();
        table.begin_scope();
        table.put("x", 2).unwrap();
        table.put("x", 3).unwrap();
        table.end_scope().unwrap();

        assert_eq!(table.lookup("x"), Some(&1));
    }

    #[test]
    fn test_underflow() {
        let mut table: ScopedTable<i32> = ScopedTable::new();
        assert_eq!(
            table.end_scope(),
            Err(ScopeUnderflow { operation: "end_scope" })
        );
        assert_eq!(table.put("x", 1), Err(ScopeUnderflow { operation: "put" }));
    }

    #[test]
    fn test_scope_counters() {
        let mut table: ScopedTable<i32> = ScopedTable::new();
        table.begin_scope();
        table.begin_scope();
        assert_eq!(table.depth(), 2);
        table.end_scope().unwrap();
        table.end_scope().unwrap();

        assert_eq!(table.depth(), 0);
        assert_eq!(table.opened(), 2);
        assert_eq!(table.closed(), 2);
    }
}
