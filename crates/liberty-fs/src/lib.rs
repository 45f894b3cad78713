//! Filesystem layer for Liberty server configuration generation
//!
//! Provides normalized path handling, atomic writes, file and directory
//! copies, and format-agnostic loading of parameter files.

pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod path;

pub use config::ConfigStore;
pub use constants::{GENERATED_HEADER, ServerFile};
pub use error::{Error, Result};
pub use path::NormalizedPath;
