//! Application layer: the `Tie` facade and services
//!
//! This layer orchestrates domain logic and depends on I/O boundary traits.

pub mod error;
pub mod error_ext;
pub mod services;
pub mod tie;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::ResultExt;
pub use tie::{Tie, TieOptions, FALLBACK_LOCALE};
