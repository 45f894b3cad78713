//! Server configuration generation for Liberty servers
//!
//! This crate materializes the runtime configuration of a server
//! directory from layered sources and runs delegated plugin goals:
//!
//! - **Property classification**: `liberty.*` build and system properties
//!   routed into bootstrap, env, jvm, var and defaultVar namespaces
//! - **Merging**: explicit parameters take precedence over classified
//!   properties
//! - **Artifact writers**: `bootstrap.properties`, `server.env`,
//!   `jvm.options` and the variable dropin, regenerated on every run
//! - **Source resolution**: configuration directory, standalone files and
//!   inline configuration, with override warnings and provenance logging
//! - **Delegated goals**: `create`, `deploy`, `install-feature` and
//!   arbitrary goals run through an [`ExternalTaskInvoker`]
//!
//! # Architecture
//!
//! ```text
//!   PropertySources ──> PropertyBag ──> merge ──> writer
//!                                          ^
//!   ServerConfigParams ─> ConfigSourceResolver (copies, precedence, logging)
//!
//!   BuildDescriptor ──> DelegatedGoalRunner ──> ExternalTaskInvoker
//! ```
//!
//! # Example
//!
//! ```no_run
//! use liberty_core::{ConfigSourceResolver, PropertySources, ServerConfigParams};
//! use std::collections::BTreeMap;
//!
//! # fn main() -> liberty_core::Result<()> {
//! let params = ServerConfigParams {
//!     server_directory: Some("target/liberty/wlp/usr/servers/defaultServer".into()),
//!     config_directory: Some("src/main/liberty/config".into()),
//!     ..ServerConfigParams::default()
//! };
//! let sources = PropertySources::with_process_env(BTreeMap::new());
//! let report = ConfigSourceResolver::new(params).materialize(&sources)?;
//! println!("{} files resolved", report.provenance.len());
//! # Ok(())
//! # }
//! ```

pub mod delegate;
pub mod diagnostics;
pub mod error;
pub mod logging;
pub mod merge;
pub mod params;
pub mod properties;
pub mod resolver;
pub mod writer;

pub use delegate::{
    BuildDescriptor, ConfigNode, DelegatedGoalRunner, ExternalTaskInvoker, GoalRun,
    PluginCoordinate, PluginDeclaration,
};
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics, Level};
pub use error::{Error, ExecutionError, Result};
pub use merge::{PropertyEntries, merge_jvm_options, merge_properties};
pub use params::ServerConfigParams;
pub use properties::{ClassifiedProperty, ConfigNamespace, PropertyBag, PropertySources, classify};
pub use resolver::{ConfigSourceResolver, INLINED_CONFIGURATION, Provenance, ResolutionReport};
