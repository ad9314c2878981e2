//! Placeholder substitution.
//!
//! Named placeholders resolve, in order, against call arguments, the
//! entry's default values and global entries. A referenced global is
//! rendered with the same locale and arguments.
//!
//! An entry with a `wrap` template renders in two passes: the locale
//! template first, leaving its `{}` untouched, then the wrap with its
//! first `{}` bound to that result. Substituted text is never re-scanned.

use std::collections::BTreeMap;
use std::fmt::Display;

use tracing::trace;

use crate::domain::error::RenderError;
use crate::domain::globals::GlobalIndex;
use crate::domain::locale;
use crate::domain::node::{Entry, NodePath};
use crate::domain::template::{self, Placeholder, Segment};

/// Render-time arguments: positional values for `{}` and named values for `{name}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Args {
    positional: Vec<String>,
    named: BTreeMap<String, String>,
}

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a positional value.
    pub fn arg(mut self, value: impl Display) -> Self {
        self.push(value);
        self
    }

    /// Set a named value.
    pub fn with(mut self, name: impl Into<String>, value: impl Display) -> Self {
        self.insert(name, value);
        self
    }

    pub fn push(&mut self, value: impl Display) {
        self.positional.push(value.to_string());
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Display) {
        self.named.insert(name.into(), value.to_string());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.named.get(name).map(String::as_str)
    }

    pub fn positional(&self) -> &[String] {
        &self.positional
    }

    pub fn named(&self) -> &BTreeMap<String, String> {
        &self.named
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.named.is_empty()
    }
}

impl<K: Into<String>, V: Display> FromIterator<(K, V)> for Args {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Args::new(), |args, (name, value)| args.with(name, value))
    }
}

/// What a `{}` slot means in one substitution pass.
#[derive(Debug, Clone, Copy)]
enum Slot<'s> {
    /// Consume positional arguments.
    Positional,
    /// Leave `{}` in place for the wrap pass.
    Keep,
    /// First `{}` takes the inner text, later ones consume positional arguments.
    Inner(&'s str),
}

/// Renders entries for one locale against a global index.
#[derive(Debug, Clone, Copy)]
pub struct Renderer<'a> {
    globals: &'a GlobalIndex,
    locale: &'a str,
    default_locale: &'a str,
}

impl<'a> Renderer<'a> {
    pub fn new(globals: &'a GlobalIndex, locale: &'a str, default_locale: &'a str) -> Self {
        Self {
            globals,
            locale,
            default_locale,
        }
    }

    /// Resolve and substitute `entry` into its final text.
    pub fn render(&self, entry: &Entry, args: &Args) -> Result<String, RenderError> {
        let mut active = Vec::new();
        self.render_entry(entry, args, &mut active)
    }

    fn render_entry(
        &self,
        entry: &Entry,
        args: &Args,
        active: &mut Vec<NodePath>,
    ) -> Result<String, RenderError> {
        if active.contains(entry.path()) {
            let origin = active.first().unwrap_or(entry.path());
            return Err(RenderError::CyclicReference {
                path: origin.to_string(),
                name: entry.path().to_string(),
            });
        }

        let raw = locale::resolve(entry, self.locale, self.default_locale)?;
        active.push(entry.path().clone());
        let rendered = match entry.wrap() {
            None => self.substitute(raw, entry, args, Slot::Positional, active),
            Some(wrap) => self
                .substitute(raw, entry, args, Slot::Keep, active)
                .and_then(|inner| self.substitute(wrap, entry, args, Slot::Inner(&inner), active)),
        };
        active.pop();
        rendered
    }

    fn substitute(
        &self,
        template: &str,
        entry: &Entry,
        args: &Args,
        slot: Slot<'_>,
        active: &mut Vec<NodePath>,
    ) -> Result<String, RenderError> {
        let mut out = String::with_capacity(template.len());
        let mut inner = match slot {
            Slot::Inner(text) => Some(text),
            _ => None,
        };
        let mut positional = args.positional().iter();
        let mut slot_index = 0;

        for segment in template::parse(template) {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Positional if matches!(slot, Slot::Keep) => out.push_str("{}"),
                Segment::Positional => {
                    if let Some(text) = inner.take() {
                        out.push_str(text);
                    } else if let Some(value) = positional.next() {
                        out.push_str(value);
                    } else {
                        return Err(RenderError::UnresolvedPlaceholder {
                            path: entry.path().to_string(),
                            placeholder: Placeholder::Positional(slot_index),
                        });
                    }
                    slot_index += 1;
                }
                Segment::Named(name) => self.substitute_named(name, entry, args, active, &mut out)?,
            }
        }
        Ok(out)
    }

    fn substitute_named(
        &self,
        name: &str,
        entry: &Entry,
        args: &Args,
        active: &mut Vec<NodePath>,
        out: &mut String,
    ) -> Result<(), RenderError> {
        if let Some(value) = args.get(name) {
            out.push_str(value);
        } else if let Some(value) = entry.default_value(name) {
            out.push_str(value);
        } else if let Some(global) = self.globals.resolve(name, entry.path()) {
            trace!(name, from = %entry.path(), global = %global.path(), "expanding global");
            out.push_str(&self.render_entry(global, args, active)?);
        } else {
            return Err(RenderError::UnresolvedPlaceholder {
                path: entry.path().to_string(),
                placeholder: Placeholder::Named(name.to_string()),
            });
        }
        Ok(())
    }
}
