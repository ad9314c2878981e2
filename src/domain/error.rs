//! Domain-level errors (no external dependencies)
//!
//! Construction-time problems ("bad document") and render-time problems
//! ("bad call") are separate types so callers can branch on them.

use thiserror::Error;

use crate::domain::template::Placeholder;

/// Errors raised while turning a [`Document`](crate::domain::Document) into a tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    #[error("malformed document at '{path}': {reason}")]
    Malformed { path: String, reason: String },

    #[error("duplicate key '{key}' in section '{section}'")]
    DuplicateKey { section: String, key: String },

    #[error("invalid locale tag '{locale}' at '{path}'")]
    InvalidLocale { path: String, locale: String },

    #[error("document requires version {required}, library supports up to {supported}")]
    UnsupportedVersion { required: String, supported: String },
}

/// Errors raised while navigating or rendering an already-built tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("no translation for '{path}' in locale '{requested}' (default '{default}')")]
    MissingTranslation {
        path: String,
        requested: String,
        default: String,
    },

    #[error("unresolved placeholder {placeholder} in '{path}'")]
    UnresolvedPlaceholder {
        path: String,
        placeholder: Placeholder,
    },

    #[error("path not found: '{path}': {reason}")]
    PathNotFound { path: String, reason: String },

    #[error("'{path}' is a section and cannot be rendered")]
    NotRenderable { path: String },

    #[error("cyclic reference to '{name}' while rendering '{path}'")]
    CyclicReference { path: String, name: String },

    #[error("locale '{0}' does not comply with supported standards (ISO 639, BCP 47)")]
    InvalidLocale(String),
}

impl RenderError {
    /// Placeholder name if this is an unresolved-placeholder error.
    pub fn placeholder(&self) -> Option<&Placeholder> {
        match self {
            RenderError::UnresolvedPlaceholder { placeholder, .. } => Some(placeholder),
            _ => None,
        }
    }
}
