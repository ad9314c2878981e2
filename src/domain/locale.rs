//! Locale tags and template fallback.
//!
//! Fallback order for an entry, first hit wins:
//! 1. requested tag exactly
//! 2. primary subtag of the requested tag (`en-US` -> `en`)
//! 3. default tag exactly, then its primary subtag
//!
//! A bare request (`en`) is never promoted to a tagged variant (`en-US`).

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::domain::error::RenderError;
use crate::domain::node::Entry;

static LOCALE_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z]{2,3}(-[a-zA-Z]{2,8})*$").expect("locale tag pattern is valid")
});

/// Whether `tag` looks like an ISO 639 language code with optional subtags.
pub fn is_valid_tag(tag: &str) -> bool {
    LOCALE_TAG.is_match(tag)
}

/// Tag up to the first `-`.
pub fn primary_subtag(tag: &str) -> &str {
    tag.split_once('-').map_or(tag, |(primary, _)| primary)
}

/// Locales to try, in order, without repeats.
pub fn fallback_chain<'a>(requested: &'a str, default: &'a str) -> Vec<&'a str> {
    let mut chain: Vec<&str> = Vec::with_capacity(4);
    for candidate in [
        requested,
        primary_subtag(requested),
        default,
        primary_subtag(default),
    ] {
        if !chain.contains(&candidate) {
            chain.push(candidate);
        }
    }
    chain
}

/// Pick the raw template of `entry` for `requested`, falling back to `default`.
pub fn resolve<'e>(entry: &'e Entry, requested: &str, default: &str) -> Result<&'e str, RenderError> {
    for candidate in fallback_chain(requested, default) {
        if let Some(template) = entry.template_for(candidate) {
            trace!(path = %entry.path(), requested, matched = candidate, "locale resolved");
            return Ok(template);
        }
    }
    Err(RenderError::MissingTranslation {
        path: entry.path().to_string(),
        requested: requested.to_string(),
        default: default.to_string(),
    })
}
