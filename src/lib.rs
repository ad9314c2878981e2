//! Lightweight internationalization.
//!
//! A translation document is a tree of sections and entries. Each entry holds
//! one template per locale tag, optionally wrapped by an outer template and
//! carrying default values for its placeholders. Rendering picks a template
//! through a fallback chain (exact tag, primary subtag, default locale) and
//! substitutes `{name}` and `{}` placeholders from caller arguments, entry
//! defaults and `$global` entries.
//!
//! ```
//! use tie::{Args, Tie};
//! use tie::infrastructure::parser::from_yaml_str;
//!
//! let document = from_yaml_str(
//!     "greeting:\n  en: Hello, {name}!\n  de: Hallo, {name}!\n",
//! )?;
//! let tie = Tie::from_document(&document)?;
//! let args = Args::new().with("name", "Ann");
//!
//! assert_eq!(tie.render("greeting", Some("de-AT"), &args)?, "Hallo, Ann!");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

pub use application::{Tie, TieOptions};
pub use domain::{
    Args, Document, DocumentError, NodePath, Placeholder, RenderError, RenderedNode, Tree,
};
