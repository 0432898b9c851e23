#![deny(missing_docs)]
//! Core types shared across the cachelab crates: the auto-vivifying
//! configuration tree, campaign settings, and structured errors.

pub mod errors;
pub mod settings;
pub mod tree;

pub use errors::{CachelabError, ErrorInfo};
pub use settings::Settings;
pub use tree::{ConfigTree, Node};
