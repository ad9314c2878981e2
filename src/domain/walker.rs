//! Section iteration and whole-tree rendering.

use std::slice;
use std::sync::Arc;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::domain::error::RenderError;
use crate::domain::node::{Entry, Section, TreeNode, GLOBAL_PREFIX};
use crate::domain::render::{Args, Renderer};
use crate::domain::tree::Tree;

/// Locale pair captured when an iteration starts.
#[derive(Debug, Clone)]
struct Locales {
    current: Arc<str>,
    default: Arc<str>,
}

/// Entry bound to a tree and a locale, rendered on demand.
#[derive(Debug, Clone)]
pub struct Renderable<'a> {
    tree: &'a Tree,
    key: &'a str,
    entry: &'a Entry,
    locales: Locales,
}

impl<'a> Renderable<'a> {
    pub fn key(&self) -> &'a str {
        self.key
    }

    pub fn entry(&self) -> &'a Entry {
        self.entry
    }

    pub fn locale(&self) -> &str {
        &self.locales.current
    }

    pub fn render(&self, args: &Args) -> Result<String, RenderError> {
        Renderer::new(self.tree.globals(), &self.locales.current, &self.locales.default)
            .render(self.entry, args)
    }
}

/// Nested section met during iteration; navigate or iterate further.
#[derive(Debug, Clone)]
pub struct SectionView<'a> {
    tree: &'a Tree,
    key: &'a str,
    section: &'a Section,
    locales: Locales,
}

impl<'a> SectionView<'a> {
    pub fn key(&self) -> &'a str {
        self.key
    }

    pub fn section(&self) -> &'a Section {
        self.section
    }

    /// Children of this section, with the same captured locale.
    pub fn iter(&self) -> Children<'a> {
        Children::with_locales(self.tree, self.section, self.locales.clone())
    }

    pub fn render_tree(&self, args: &Args) -> Result<RenderedNode, RenderError> {
        let renderer =
            Renderer::new(self.tree.globals(), &self.locales.current, &self.locales.default);
        render_section(&renderer, self.section, args)
    }
}

/// Item yielded by [`Children`].
#[derive(Debug, Clone)]
pub enum Child<'a> {
    Entry(Renderable<'a>),
    Section(SectionView<'a>),
}

impl<'a> Child<'a> {
    pub fn key(&self) -> &'a str {
        match self {
            Child::Entry(renderable) => renderable.key(),
            Child::Section(view) => view.key(),
        }
    }

    pub fn is_section(&self) -> bool {
        matches!(self, Child::Section(_))
    }

    pub fn as_renderable(&self) -> Option<&Renderable<'a>> {
        match self {
            Child::Entry(renderable) => Some(renderable),
            Child::Section(_) => None,
        }
    }

    pub fn as_section(&self) -> Option<&SectionView<'a>> {
        match self {
            Child::Section(view) => Some(view),
            Child::Entry(_) => None,
        }
    }
}

/// Lazy `(index, child)` sequence over a section, global entries skipped.
///
/// Each call to [`iterate`] starts a fresh, independent sequence.
#[derive(Debug, Clone)]
pub struct Children<'a> {
    tree: &'a Tree,
    inner: slice::Iter<'a, (String, TreeNode)>,
    index: usize,
    locales: Locales,
}

impl<'a> Children<'a> {
    fn with_locales(tree: &'a Tree, section: &'a Section, locales: Locales) -> Self {
        Self {
            tree,
            inner: section.children().iter(),
            index: 0,
            locales,
        }
    }
}

impl<'a> Iterator for Children<'a> {
    type Item = (usize, Child<'a>);

    fn next(&mut self) -> Option<Self::Item> {
        for (key, node) in self.inner.by_ref() {
            if key.starts_with(GLOBAL_PREFIX) {
                continue;
            }
            let child = match node {
                TreeNode::Entry(entry) => Child::Entry(Renderable {
                    tree: self.tree,
                    key: key.as_str(),
                    entry: entry.as_ref(),
                    locales: self.locales.clone(),
                }),
                TreeNode::Section(section) => Child::Section(SectionView {
                    tree: self.tree,
                    key: key.as_str(),
                    section,
                    locales: self.locales.clone(),
                }),
            };
            let index = self.index;
            self.index += 1;
            return Some((index, child));
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.inner.size_hint().1)
    }
}

/// Iterate the children of `section` for `locale`.
pub fn iterate<'a>(
    tree: &'a Tree,
    section: &'a Section,
    locale: &str,
    default_locale: &str,
) -> Children<'a> {
    let locales = Locales {
        current: Arc::from(locale),
        default: Arc::from(default_locale),
    };
    Children::with_locales(tree, section, locales)
}

/// Rendered value of a tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedNode {
    Text(String),
    /// Child values in document order.
    Section(Vec<(String, RenderedNode)>),
}

impl RenderedNode {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            RenderedNode::Text(text) => Some(text),
            RenderedNode::Section(_) => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&RenderedNode> {
        match self {
            RenderedNode::Section(children) => {
                children.iter().find(|(k, _)| k == key).map(|(_, v)| v)
            }
            RenderedNode::Text(_) => None,
        }
    }

    /// Follow `keys` through nested sections.
    pub fn get_path<'k>(&self, keys: impl IntoIterator<Item = &'k str>) -> Option<&RenderedNode> {
        keys.into_iter().try_fold(self, |node, key| node.get(key))
    }

    /// Every text leaf with its dotted path, depth first.
    pub fn leaves(&self) -> Vec<(String, &str)> {
        let mut leaves = Vec::new();
        collect_leaves(self, String::new(), &mut leaves);
        leaves
    }
}

fn collect_leaves<'n>(
    node: &'n RenderedNode,
    prefix: String,
    leaves: &mut Vec<(String, &'n str)>,
) {
    match node {
        RenderedNode::Text(text) => leaves.push((prefix, text.as_str())),
        RenderedNode::Section(children) => {
            for (key, child) in children {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                collect_leaves(child, path, leaves);
            }
        }
    }
}

impl Serialize for RenderedNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RenderedNode::Text(text) => serializer.serialize_str(text),
            RenderedNode::Section(children) => {
                let mut map = serializer.serialize_map(Some(children.len()))?;
                for (key, value) in children {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

/// Render every entry under `section`. Any failure aborts the whole walk.
pub fn render_section(
    renderer: &Renderer<'_>,
    section: &Section,
    args: &Args,
) -> Result<RenderedNode, RenderError> {
    let mut children = Vec::with_capacity(section.len());
    for (key, node) in section.iter() {
        let value = match node {
            TreeNode::Entry(entry) => RenderedNode::Text(renderer.render(entry, args)?),
            TreeNode::Section(child) => render_section(renderer, child, args)?,
        };
        children.push((key.to_string(), value));
    }
    Ok(RenderedNode::Section(children))
}
