//! Domain layer: translation tree and resolution engine
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod builder;
pub mod document;
pub mod error;
pub mod globals;
pub mod locale;
pub mod node;
pub mod render;
pub mod template;
pub mod tree;
pub mod walker;

pub use builder::{TreeBuilder, TreeResult};
pub use document::Document;
pub use error::{DocumentError, RenderError};
pub use globals::GlobalIndex;
pub use node::{Entry, NodePath, Section, Templates, TreeNode};
pub use render::{Args, Renderer};
pub use template::Placeholder;
pub use tree::{Metadata, NodeRef, Tree};
pub use walker::{Child, Children, Renderable, RenderedNode, SectionView};
