//! Format-agnostic parsed document.
//!
//! The engine never sees YAML or JSON syntax. A parser collaborator
//! produces a [`Document`] and the [`TreeBuilder`](crate::domain::TreeBuilder)
//! consumes it.

/// Generic nested mapping of scalars.
///
/// Mapping keys keep the order and multiplicity produced by the parser,
/// so repeated keys survive until the builder can report them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Document {
    /// Scalar value carried as text (strings, numbers and booleans alike).
    Scalar(String),
    /// Ordered key/value pairs.
    Mapping(Vec<(String, Document)>),
}

impl Document {
    pub fn scalar(value: impl Into<String>) -> Self {
        Document::Scalar(value.into())
    }

    /// Build a mapping from `(key, value)` pairs, keeping their order.
    pub fn mapping<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Document)>,
    {
        Document::Mapping(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Document::Scalar(s) => Some(s),
            Document::Mapping(_) => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&[(String, Document)]> {
        match self {
            Document::Mapping(entries) => Some(entries),
            Document::Scalar(_) => None,
        }
    }

    /// First value stored under `key`, if this is a mapping.
    pub fn get(&self, key: &str) -> Option<&Document> {
        self.as_mapping()?
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }
}

impl From<&str> for Document {
    fn from(value: &str) -> Self {
        Document::Scalar(value.to_string())
    }
}

impl From<String> for Document {
    fn from(value: String) -> Self {
        Document::Scalar(value)
    }
}
