//! Index of `$`-prefixed entries, keyed by bare name.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::node::{Entry, NodePath};

/// Name-addressable global entries, built once alongside the tree.
///
/// Several sections may declare the same name. A lookup prefers the
/// declaration in the innermost section enclosing the referencing node,
/// then falls back to the first declaration in document order.
#[derive(Debug, Clone, Default)]
pub struct GlobalIndex {
    by_name: HashMap<String, Vec<Arc<Entry>>>,
}

impl GlobalIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, entry: Arc<Entry>) {
        self.by_name.entry(name.into()).or_default().push(entry);
    }

    /// Entry visible as `name` from a node located at `from`.
    pub fn resolve(&self, name: &str, from: &NodePath) -> Option<&Entry> {
        let declarations = self.by_name.get(name)?;
        declarations
            .iter()
            .filter(|entry| entry.path().parent().encloses(from))
            .max_by_key(|entry| entry.path().len())
            .or_else(|| declarations.first())
            .map(Arc::as_ref)
    }

    /// Bare names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.by_name.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
