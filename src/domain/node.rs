//! Typed translation tree: sections and entries.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use itertools::Itertools;

/// Key prefix marking a nested section in the source document.
pub const SECTION_PREFIX: char = '+';
/// Key prefix marking a global entry.
pub const GLOBAL_PREFIX: char = '$';

/// Dot-separated location of a node, root being the empty path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NodePath(Vec<String>);

impl NodePath {
    pub fn root() -> Self {
        Self::default()
    }

    /// Split `"menu.items.title"` into segments. Empty input is the root.
    pub fn parse(dotted: &str) -> Self {
        let dotted = dotted.trim();
        if dotted.is_empty() {
            return Self::root();
        }
        Self(dotted.split('.').map(str::to_string).collect())
    }

    pub fn child(&self, key: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(key.to_string());
        Self(segments)
    }

    /// Path of the enclosing section (root stays root).
    pub fn parent(&self) -> Self {
        let mut segments = self.0.clone();
        segments.pop();
        Self(segments)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when `self` equals `other` or encloses it.
    pub fn encloses(&self, other: &NodePath) -> bool {
        other.0.starts_with(&self.0)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            write!(f, "<root>")
        } else {
            write!(f, "{}", self.0.iter().join("."))
        }
    }
}

/// A node of the translation tree.
#[derive(Debug, Clone)]
pub enum TreeNode {
    Section(Section),
    Entry(Arc<Entry>),
}

impl TreeNode {
    pub fn as_section(&self) -> Option<&Section> {
        match self {
            TreeNode::Section(section) => Some(section),
            TreeNode::Entry(_) => None,
        }
    }

    pub fn as_entry(&self) -> Option<&Arc<Entry>> {
        match self {
            TreeNode::Entry(entry) => Some(entry),
            TreeNode::Section(_) => None,
        }
    }

    pub fn path(&self) -> &NodePath {
        match self {
            TreeNode::Section(section) => section.path(),
            TreeNode::Entry(entry) => entry.path(),
        }
    }
}

/// Ordered, uniquely keyed children.
#[derive(Debug, Clone, Default)]
pub struct Section {
    path: NodePath,
    children: Vec<(String, TreeNode)>,
}

impl Section {
    pub fn new(path: NodePath) -> Self {
        Self {
            path,
            children: Vec::new(),
        }
    }

    /// Append a child. Returns the rejected key back when it already exists.
    pub fn push(&mut self, key: String, node: TreeNode) -> Result<(), String> {
        if self.contains_key(&key) {
            return Err(key);
        }
        self.children.push((key, node));
        Ok(())
    }

    pub fn path(&self) -> &NodePath {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<&TreeNode> {
        self.children.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.children.iter().any(|(k, _)| k == key)
    }

    /// Children in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TreeNode)> {
        self.children.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub(crate) fn children(&self) -> &[(String, TreeNode)] {
        &self.children
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.children.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// Raw templates of an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Templates {
    /// Same text for every locale (a bare scalar in the document).
    Invariant(String),
    /// Locale tag to template, in document order.
    Localized(Vec<(String, String)>),
}

/// Leaf node: per-locale templates plus optional wrap and default values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    path: NodePath,
    templates: Templates,
    wrap: Option<String>,
    default_values: BTreeMap<String, String>,
}

impl Entry {
    pub fn new(path: NodePath, templates: Templates) -> Self {
        Self {
            path,
            templates,
            wrap: None,
            default_values: BTreeMap::new(),
        }
    }

    /// Entry with a single locale-independent template.
    pub fn invariant(path: NodePath, template: impl Into<String>) -> Self {
        Self::new(path, Templates::Invariant(template.into()))
    }

    /// Entry from `(locale, template)` pairs.
    pub fn localized<L, T, I>(path: NodePath, templates: I) -> Self
    where
        L: Into<String>,
        T: Into<String>,
        I: IntoIterator<Item = (L, T)>,
    {
        let templates = templates
            .into_iter()
            .map(|(l, t)| (l.into(), t.into()))
            .collect();
        Self::new(path, Templates::Localized(templates))
    }

    pub fn with_wrap(mut self, wrap: impl Into<String>) -> Self {
        self.wrap = Some(wrap.into());
        self
    }

    pub fn with_default(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_values.insert(name.into(), value.into());
        self
    }

    pub fn path(&self) -> &NodePath {
        &self.path
    }

    pub fn wrap(&self) -> Option<&str> {
        self.wrap.as_deref()
    }

    pub fn default_value(&self, name: &str) -> Option<&str> {
        self.default_values.get(name).map(String::as_str)
    }

    /// Template stored under exactly `locale`. Invariant entries match any tag.
    pub fn template_for(&self, locale: &str) -> Option<&str> {
        match &self.templates {
            Templates::Invariant(template) => Some(template),
            Templates::Localized(pairs) => pairs
                .iter()
                .find(|(tag, _)| tag == locale)
                .map(|(_, t)| t.as_str()),
        }
    }

    /// Locale tags with a template, in document order.
    pub fn locales(&self) -> Vec<&str> {
        match &self.templates {
            Templates::Invariant(_) => Vec::new(),
            Templates::Localized(pairs) => pairs.iter().map(|(tag, _)| tag.as_str()).collect(),
        }
    }
}
