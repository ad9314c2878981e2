//! `Tie` facade: a built tree plus current and default locale.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::domain::walker::{self, Children, RenderedNode};
use crate::domain::{
    locale, Args, Document, DocumentError, NodePath, NodeRef, RenderError, Renderer, Section, Tree,
    TreeBuilder, TreeNode,
};

/// Fallback when neither the caller nor the document names a default locale.
pub const FALLBACK_LOCALE: &str = "en";

/// Construction options for [`Tie`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TieOptions {
    /// Default locale that overrides the document's `tie.default_locale`.
    pub default_locale: Option<String>,
    /// Default locale used when neither the caller nor the document sets one.
    pub fallback_locale: String,
    /// Initial current locale (defaults to the default locale).
    pub locale: Option<String>,
    /// Reject documents declaring a newer version than this library.
    pub check_version: bool,
}

impl Default for TieOptions {
    fn default() -> Self {
        Self {
            default_locale: None,
            fallback_locale: FALLBACK_LOCALE.to_string(),
            locale: None,
            check_version: true,
        }
    }
}

/// Entry point for rendering translations.
///
/// The tree is shared and immutable, so cloning a `Tie` is cheap. Each
/// clone carries its own current locale; prefer [`Tie::with_locale`] or the
/// per-call `locale` argument over mutating a shared instance.
#[derive(Debug, Clone)]
pub struct Tie {
    tree: Arc<Tree>,
    default_locale: String,
    locale: String,
}

impl Tie {
    /// Wrap an already built tree. The current locale starts at `default_locale`.
    pub fn new(tree: Tree, default_locale: impl Into<String>) -> Result<Self, DocumentError> {
        let default_locale = default_locale.into();
        if !locale::is_valid_tag(&default_locale) {
            return Err(DocumentError::InvalidLocale {
                path: "default_locale".to_string(),
                locale: default_locale,
            });
        }
        Ok(Self {
            tree: Arc::new(tree),
            locale: default_locale.clone(),
            default_locale,
        })
    }

    pub fn from_document(document: &Document) -> Result<Self, DocumentError> {
        Self::with_options(document, &TieOptions::default())
    }

    /// Build from a document. Default locale precedence: explicit option,
    /// then the document's metadata, then `options.fallback_locale`.
    #[instrument(level = "debug", skip(document))]
    pub fn with_options(document: &Document, options: &TieOptions) -> Result<Self, DocumentError> {
        let tree = TreeBuilder::new()
            .check_version(options.check_version)
            .build(document)?;
        let default_locale = options
            .default_locale
            .clone()
            .or_else(|| tree.metadata().default_locale.clone())
            .unwrap_or_else(|| options.fallback_locale.clone());

        let mut tie = Self::new(tree, default_locale)?;
        if let Some(current) = &options.locale {
            tie.set_locale(current.as_str());
        }
        debug!(default = %tie.default_locale, current = %tie.locale, "tie ready");
        Ok(tie)
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Change the current locale. Availability is checked per entry at render time.
    pub fn set_locale(&mut self, tag: impl Into<String>) -> &mut Self {
        self.locale = tag.into();
        self
    }

    /// Like [`set_locale`](Self::set_locale), but rejects tags that are not ISO shaped.
    pub fn try_set_locale(&mut self, tag: impl Into<String>) -> Result<&mut Self, RenderError> {
        let tag = tag.into();
        if !locale::is_valid_tag(&tag) {
            return Err(RenderError::InvalidLocale(tag));
        }
        Ok(self.set_locale(tag))
    }

    /// Copy sharing the same tree, switched to `tag`.
    pub fn with_locale(&self, tag: impl Into<String>) -> Self {
        let mut copy = self.clone();
        copy.set_locale(tag);
        copy
    }

    /// Node at a dotted path (`""` is the root section).
    pub fn navigate(&self, path: &str) -> Result<NodeRef<'_>, RenderError> {
        self.tree.navigate(&NodePath::parse(path))
    }

    /// Render the entry at `path` in `locale` (or the current locale).
    pub fn render(&self, path: &str, locale: Option<&str>, args: &Args) -> Result<String, RenderError> {
        let path = NodePath::parse(path);
        let entry = self.tree.entry(&path)?;
        let locale = locale.unwrap_or(&self.locale);
        debug!(%path, locale, "render");
        self.renderer(locale).render(entry, args)
    }

    /// Iterate the section at `path` in `locale` (or the current locale).
    pub fn iterate(&self, path: &str, locale: Option<&str>) -> Result<Children<'_>, RenderError> {
        let section = self.tree.section(&NodePath::parse(path))?;
        let locale = locale.unwrap_or(&self.locale);
        Ok(walker::iterate(&self.tree, section, locale, &self.default_locale))
    }

    /// Render the whole tree in the current locale. Fails on the first broken entry.
    pub fn render_tree(&self, args: &Args) -> Result<RenderedNode, RenderError> {
        walker::render_section(&self.renderer(&self.locale), self.tree.root(), args)
    }

    /// Render the subtree of the section at `path` in the current locale.
    pub fn render_tree_at(&self, path: &str, args: &Args) -> Result<RenderedNode, RenderError> {
        let section = self.tree.section(&NodePath::parse(path))?;
        walker::render_section(&self.renderer(&self.locale), section, args)
    }

    /// Every locale tag used by any entry, sorted.
    pub fn available_locales(&self) -> BTreeSet<String> {
        let mut tags = BTreeSet::new();
        collect_locales(self.tree.root(), &mut tags);
        tags
    }

    fn renderer<'a>(&'a self, locale: &'a str) -> Renderer<'a> {
        Renderer::new(self.tree.globals(), locale, &self.default_locale)
    }
}

fn collect_locales(section: &Section, tags: &mut BTreeSet<String>) {
    for (_, node) in section.iter() {
        match node {
            TreeNode::Entry(entry) => tags.extend(entry.locales().into_iter().map(str::to_string)),
            TreeNode::Section(child) => collect_locales(child, tags),
        }
    }
}
