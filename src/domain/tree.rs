//! Built translation tree: root section, global index and document metadata.

use std::sync::Arc;

use crate::domain::error::RenderError;
use crate::domain::globals::GlobalIndex;
use crate::domain::node::{Entry, NodePath, Section, TreeNode};

/// Contents of the reserved `tie:` block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    pub version: Option<String>,
    pub default_locale: Option<String>,
}

/// Borrowed view of a navigated node.
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    Section(&'a Section),
    Entry(&'a Arc<Entry>),
}

impl<'a> NodeRef<'a> {
    pub fn as_section(&self) -> Option<&'a Section> {
        match self {
            NodeRef::Section(section) => Some(section),
            NodeRef::Entry(_) => None,
        }
    }

    pub fn as_entry(&self) -> Option<&'a Arc<Entry>> {
        match self {
            NodeRef::Entry(entry) => Some(entry),
            NodeRef::Section(_) => None,
        }
    }
}

/// Immutable translation tree.
#[derive(Debug, Clone, Default)]
pub struct Tree {
    root: Section,
    globals: GlobalIndex,
    metadata: Metadata,
}

impl Tree {
    pub fn new(root: Section, globals: GlobalIndex, metadata: Metadata) -> Self {
        Self {
            root,
            globals,
            metadata,
        }
    }

    pub fn root(&self) -> &Section {
        &self.root
    }

    pub fn globals(&self) -> &GlobalIndex {
        &self.globals
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Descend section by section along `path`.
    pub fn navigate(&self, path: &NodePath) -> Result<NodeRef<'_>, RenderError> {
        let mut current = NodeRef::Section(&self.root);
        for (depth, key) in path.segments().iter().enumerate() {
            let section = match current {
                NodeRef::Section(section) => section,
                NodeRef::Entry(entry) => {
                    return Err(RenderError::PathNotFound {
                        path: path.to_string(),
                        reason: format!("'{}' is an entry, not a section", entry.path()),
                    });
                }
            };
            current = match section.get(key) {
                Some(TreeNode::Section(child)) => NodeRef::Section(child),
                Some(TreeNode::Entry(child)) => NodeRef::Entry(child),
                None => {
                    let at = NodePath::parse(&path.segments()[..depth].join("."));
                    return Err(RenderError::PathNotFound {
                        path: path.to_string(),
                        reason: format!("no key '{key}' in section '{at}'"),
                    });
                }
            };
        }
        Ok(current)
    }

    /// Section at `path`, failing when the path ends on an entry.
    pub fn section(&self, path: &NodePath) -> Result<&Section, RenderError> {
        self.navigate(path)?
            .as_section()
            .ok_or_else(|| RenderError::PathNotFound {
                path: path.to_string(),
                reason: "target is an entry, not a section".to_string(),
            })
    }

    /// Entry at `path`, failing with `NotRenderable` on a section.
    pub fn entry(&self, path: &NodePath) -> Result<&Arc<Entry>, RenderError> {
        self.navigate(path)?
            .as_entry()
            .ok_or_else(|| RenderError::NotRenderable {
                path: path.to_string(),
            })
    }
}
