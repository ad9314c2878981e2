//! Tree builder turning a generic [`Document`] into a typed [`Tree`].

use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, instrument, trace};

use crate::domain::document::Document;
use crate::domain::error::DocumentError;
use crate::domain::globals::GlobalIndex;
use crate::domain::locale;
use crate::domain::node::{Entry, NodePath, Section, TreeNode, GLOBAL_PREFIX, SECTION_PREFIX};
use crate::domain::tree::{Metadata, Tree};

/// Result type for tree construction.
pub type TreeResult<T> = Result<T, DocumentError>;

/// Reserved top-level block holding document metadata.
pub const METADATA_KEY: &str = "tie";
/// Reserved entry key holding the wrap template.
pub const WRAP_KEY: &str = "wrap";
/// Reserved entry key holding placeholder default values.
pub const DEFAULTS_KEY: &str = "defaults";

/// Constructs immutable trees from parsed documents.
#[derive(Debug, Clone)]
pub struct TreeBuilder {
    check_version: bool,
    supported_version: String,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            check_version: true,
            supported_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Enable or disable rejecting documents newer than this library.
    pub fn check_version(mut self, enabled: bool) -> Self {
        self.check_version = enabled;
        self
    }

    /// Override the version documents are checked against.
    pub fn supported_version(mut self, version: impl Into<String>) -> Self {
        self.supported_version = version.into();
        self
    }

    /// Build a tree from a top-level mapping.
    #[instrument(level = "debug", skip_all)]
    pub fn build(&self, document: &Document) -> TreeResult<Tree> {
        let pairs = document
            .as_mapping()
            .ok_or_else(|| malformed(&NodePath::root(), "top level must be a mapping"))?;

        let mut metadata = None;
        let mut body = Vec::with_capacity(pairs.len());
        for pair in pairs {
            if pair.0 == METADATA_KEY {
                if metadata.is_some() {
                    return Err(DocumentError::DuplicateKey {
                        section: NodePath::root().to_string(),
                        key: METADATA_KEY.to_string(),
                    });
                }
                metadata = Some(self.read_metadata(&pair.1)?);
            } else {
                body.push(pair);
            }
        }
        let metadata = metadata.unwrap_or_default();

        let mut globals = GlobalIndex::new();
        let root = self.build_section(NodePath::root(), body, &mut globals)?;
        debug!(
            children = root.len(),
            globals = globals.len(),
            version = ?metadata.version,
            "tree built"
        );
        Ok(Tree::new(root, globals, metadata))
    }

    fn build_section<'d>(
        &self,
        path: NodePath,
        children: impl IntoIterator<Item = &'d (String, Document)>,
        globals: &mut GlobalIndex,
    ) -> TreeResult<Section> {
        let mut section = Section::new(path.clone());

        for (raw_key, value) in children {
            check_key(&path, raw_key)?;
            let (key, node) = if let Some(key) = raw_key.strip_prefix(SECTION_PREFIX) {
                let child_path = path.child(key);
                let grandchildren = value
                    .as_mapping()
                    .ok_or_else(|| malformed(&child_path, "section must be a mapping"))?;
                let child = self.build_section(child_path, grandchildren, globals)?;
                (key, TreeNode::Section(child))
            } else {
                let entry = Arc::new(self.build_entry(path.child(raw_key), value)?);
                if let Some(name) = raw_key.strip_prefix(GLOBAL_PREFIX) {
                    trace!(name, path = %entry.path(), "global registered");
                    globals.insert(name, Arc::clone(&entry));
                }
                (raw_key.as_str(), TreeNode::Entry(entry))
            };

            section
                .push(key.to_string(), node)
                .map_err(|key| DocumentError::DuplicateKey {
                    section: path.to_string(),
                    key,
                })?;
        }

        Ok(section)
    }

    fn build_entry(&self, path: NodePath, value: &Document) -> TreeResult<Entry> {
        let pairs = match value {
            Document::Scalar(text) => return Ok(Entry::invariant(path, text.clone())),
            Document::Mapping(pairs) => pairs,
        };

        let mut seen = HashSet::new();
        let mut templates = Vec::new();
        let mut wrap = None;
        let mut defaults = Vec::new();

        for (key, value) in pairs {
            if !seen.insert(key.as_str()) {
                return Err(DocumentError::DuplicateKey {
                    section: path.to_string(),
                    key: key.clone(),
                });
            }
            match key.as_str() {
                WRAP_KEY => wrap = Some(scalar(&path.child(key), value)?.to_string()),
                DEFAULTS_KEY => defaults = read_defaults(&path.child(key), value)?,
                tag if locale::is_valid_tag(tag) => {
                    templates.push((tag.to_string(), scalar(&path.child(tag), value)?.to_string()));
                }
                other => {
                    return Err(DocumentError::InvalidLocale {
                        path: path.to_string(),
                        locale: other.to_string(),
                    });
                }
            }
        }

        let mut entry = Entry::localized(path, templates);
        if let Some(wrap) = wrap {
            entry = entry.with_wrap(wrap);
        }
        Ok(defaults
            .into_iter()
            .fold(entry, |entry, (name, value)| entry.with_default(name, value)))
    }

    fn read_metadata(&self, value: &Document) -> TreeResult<Metadata> {
        let path = NodePath::root().child(METADATA_KEY);
        let pairs = value
            .as_mapping()
            .ok_or_else(|| malformed(&path, "metadata block must be a mapping"))?;

        let mut metadata = Metadata::default();
        for (key, value) in pairs {
            match key.as_str() {
                "version" => metadata.version = Some(scalar(&path.child(key), value)?.to_string()),
                "default_locale" => {
                    let tag = scalar(&path.child(key), value)?;
                    if !locale::is_valid_tag(tag) {
                        return Err(DocumentError::InvalidLocale {
                            path: path.child(key).to_string(),
                            locale: tag.to_string(),
                        });
                    }
                    metadata.default_locale = Some(tag.to_string());
                }
                other => debug!(key = other, "ignoring unknown metadata key"),
            }
        }

        if self.check_version {
            if let Some(required) = &metadata.version {
                self.ensure_supported(required)?;
            }
        }
        Ok(metadata)
    }

    fn ensure_supported(&self, required: &str) -> TreeResult<()> {
        let path = NodePath::root().child(METADATA_KEY).child("version");
        let wanted = parse_version(required)
            .ok_or_else(|| malformed(&path, &format!("unparsable version '{required}'")))?;
        let Some(have) = parse_version(&self.supported_version) else {
            return Ok(());
        };
        if compare_versions(&wanted, &have) == Ordering::Greater {
            return Err(DocumentError::UnsupportedVersion {
                required: required.to_string(),
                supported: self.supported_version.clone(),
            });
        }
        Ok(())
    }
}

fn check_key(section: &NodePath, raw_key: &str) -> TreeResult<()> {
    let bare = raw_key
        .strip_prefix(SECTION_PREFIX)
        .or_else(|| raw_key.strip_prefix(GLOBAL_PREFIX))
        .unwrap_or(raw_key);
    if bare.is_empty() {
        return Err(malformed(section, &format!("empty key '{raw_key}'")));
    }
    if raw_key.starts_with(SECTION_PREFIX) && bare.starts_with(GLOBAL_PREFIX) {
        return Err(malformed(section, &format!("section key '{raw_key}' cannot be global")));
    }
    if bare.contains('.') {
        return Err(malformed(section, &format!("key '{raw_key}' must not contain '.'")));
    }
    Ok(())
}

fn read_defaults(path: &NodePath, value: &Document) -> TreeResult<Vec<(String, String)>> {
    let pairs = value
        .as_mapping()
        .ok_or_else(|| malformed(path, "defaults must be a mapping"))?;
    pairs
        .iter()
        .map(|(name, value)| Ok((name.clone(), scalar(&path.child(name), value)?.to_string())))
        .collect()
}

fn scalar<'d>(path: &NodePath, value: &'d Document) -> TreeResult<&'d str> {
    value
        .as_scalar()
        .ok_or_else(|| malformed(path, "expected a scalar value"))
}

fn malformed(path: &NodePath, reason: &str) -> DocumentError {
    DocumentError::Malformed {
        path: path.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_version(version: &str) -> Option<Vec<u64>> {
    version
        .trim()
        .split('.')
        .map(|part| part.parse::<u64>().ok())
        .collect()
}

fn compare_versions(left: &[u64], right: &[u64]) -> Ordering {
    let len = left.len().max(right.len());
    (0..len)
        .map(|i| {
            let l = left.get(i).copied().unwrap_or(0);
            let r = right.get(i).copied().unwrap_or(0);
            l.cmp(&r)
        })
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}
