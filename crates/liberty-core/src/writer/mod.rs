//! Artifact writers - serialize merged configuration into server files
//!
//! - **properties**: `bootstrap.properties` and `server.env`, `key=value` lines
//! - **jvm**: `jvm.options`, one raw option per line
//! - **variables**: the `configDropins/overrides` variable XML document
//!
//! Every writer renders the full artifact in memory and replaces the
//! target in a single atomic write, creating parent directories. Output
//! is deterministic for identical input.

mod jvm;
mod properties;
mod variables;

pub use jvm::{render_jvm_options, write_jvm_options};
pub use properties::{render_properties, write_properties};
pub use variables::{VariableEntry, render_variable_dropin, variable_entries, write_variable_dropin};
