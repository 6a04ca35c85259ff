//! Filesystem module.
//!
//! Provides:
//! - Filename derivation and validation
//! - Output directory management

pub mod naming;
pub mod paths;

pub use naming::{file_name_from_url, sanitize_filename};
pub use paths::ensure_dir;
