//! Resolution of server configuration sources into the server directory
//!
//! Each of the four conventional server files is resolved from up to
//! three sources, later ones overriding earlier ones:
//!
//! 1. The file of that name in the shared configuration directory
//! 2. An explicitly configured standalone file
//! 3. Inline configuration: explicit parameters or classified
//!    `liberty.*` properties, merged and written by the artifact writers
//!
//! Every override of an earlier source is reported as a warning. The
//! variable dropin has a single source (classified `liberty.var.*` and
//! `liberty.defaultVar.*` properties) and is written whenever either has
//! entries.

use std::collections::BTreeMap;

use liberty_fs::{NormalizedPath, ServerFile, io};

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::merge::{merge_jvm_options, merge_properties};
use crate::params::ServerConfigParams;
use crate::properties::{PropertyBag, PropertySources};
use crate::{Result, writer};

/// Provenance label used when a file is generated from inline configuration.
pub const INLINED_CONFIGURATION: &str = "inlined configuration";

/// Where the content of a server file came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Provenance {
    /// Copied from this canonical path
    File(String),
    /// Generated from parameters and classified properties
    Inlined,
}

impl Provenance {
    fn describe(&self) -> String {
        match self {
            Self::File(path) => format!("the {path} file"),
            Self::Inlined => INLINED_CONFIGURATION.to_string(),
        }
    }
}

impl std::fmt::Display for Provenance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => f.write_str(path),
            Self::Inlined => f.write_str(INLINED_CONFIGURATION),
        }
    }
}

/// Outcome of a configuration pass
#[derive(Debug, Clone, Default)]
pub struct ResolutionReport {
    /// Resolved source of each conventional file that ended up in the server directory
    pub provenance: BTreeMap<ServerFile, Provenance>,
    /// Path of the variable dropin, when one was written
    pub variable_dropin: Option<NormalizedPath>,
    /// Whether the pass was skipped by parameter
    pub skipped: bool,
    pub diagnostics: Diagnostics,
}

impl ResolutionReport {
    pub fn provenance(&self, file: ServerFile) -> Option<&Provenance> {
        self.provenance.get(&file)
    }
}

/// Resolves and materializes server configuration for one server directory.
pub struct ConfigSourceResolver {
    params: ServerConfigParams,
}

impl ConfigSourceResolver {
    pub fn new(params: ServerConfigParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ServerConfigParams {
        &self.params
    }

    /// Run a full pass: classify properties, resolve every server file,
    /// write the results and log what was used.
    ///
    /// Diagnostics collected before a fatal error are still logged. The
    /// pass is safe to rerun after a failure.
    pub fn materialize(&self, sources: &PropertySources) -> Result<ResolutionReport> {
        let mut diagnostics = Diagnostics::new();

        if self.params.skip {
            diagnostics.info(
                DiagnosticKind::ConfigurationUsed,
                "Skipping server configuration generation.",
            );
            diagnostics.emit();
            return Ok(ResolutionReport {
                skipped: true,
                diagnostics,
                ..ResolutionReport::default()
            });
        }

        let bag = PropertyBag::from_sources(sources, &mut diagnostics);
        let result = self.apply(&bag, &mut diagnostics);
        diagnostics.emit();

        let (provenance, variable_dropin) = result?;
        Ok(ResolutionReport {
            provenance,
            variable_dropin,
            skipped: false,
            diagnostics,
        })
    }

    /// Resolve and write every server file from an already classified bag.
    pub fn apply(
        &self,
        bag: &PropertyBag,
        diagnostics: &mut Diagnostics,
    ) -> Result<(BTreeMap<ServerFile, Provenance>, Option<NormalizedPath>)> {
        let server_dir = self.params.server_directory()?;
        let mut provenance = BTreeMap::new();

        self.copy_config_directory(&server_dir, &mut provenance)?;
        self.resolve_server_xml(&server_dir, &mut provenance, diagnostics)?;
        self.resolve_jvm_options(&server_dir, bag, &mut provenance, diagnostics)?;
        self.resolve_bootstrap_properties(&server_dir, bag, &mut provenance, diagnostics)?;
        self.resolve_server_env(&server_dir, bag, &mut provenance, diagnostics)?;

        let variable_dropin = if bag.has_variables() {
            let path = server_dir.join(ServerFile::VariableDropin.as_str());
            writer::write_variable_dropin(&path, &bag.var, &bag.default_var, diagnostics)?;
            Some(path)
        } else {
            None
        };

        for (file, source) in &provenance {
            diagnostics.info(
                DiagnosticKind::ConfigurationUsed,
                format!("Update server configuration file {file} from {source}."),
            );
        }

        Ok((provenance, variable_dropin))
    }

    fn copy_config_directory(
        &self,
        server_dir: &NormalizedPath,
        provenance: &mut BTreeMap<ServerFile, Provenance>,
    ) -> Result<()> {
        let Some(config_dir) = existing(self.params.config_directory.as_deref()) else {
            return Ok(());
        };
        if !config_dir.is_dir() {
            return Ok(());
        }

        let copied = io::copy_dir_all(&config_dir, server_dir)?;
        tracing::debug!(from = %config_dir, to = %server_dir, copied, "Copied configuration directory");

        for file in ServerFile::CONVENTIONAL {
            let candidate = config_dir.join(file.as_str());
            if candidate.is_file() {
                provenance.insert(file, Provenance::File(candidate.canonical()?));
            }
        }
        Ok(())
    }

    fn resolve_server_xml(
        &self,
        server_dir: &NormalizedPath,
        provenance: &mut BTreeMap<ServerFile, Provenance>,
        diagnostics: &mut Diagnostics,
    ) -> Result<()> {
        if let Some(source) = existing_file(self.params.server_xml_file.as_deref()) {
            copy_over(&source, server_dir, ServerFile::ServerXml, provenance, diagnostics)?;
        }
        Ok(())
    }

    fn resolve_jvm_options(
        &self,
        server_dir: &NormalizedPath,
        bag: &PropertyBag,
        provenance: &mut BTreeMap<ServerFile, Provenance>,
        diagnostics: &mut Diagnostics,
    ) -> Result<()> {
        let file = ServerFile::JvmOptions;
        if let Some(options) = merge_jvm_options(self.params.jvm_options.as_deref(), &bag.jvm) {
            supersede(provenance, file, Provenance::Inlined, diagnostics);
            writer::write_jvm_options(&server_dir.join(file.as_str()), &options)?;
        } else if let Some(source) = existing_file(self.params.jvm_options_file.as_deref()) {
            copy_over(&source, server_dir, file, provenance, diagnostics)?;
        }
        Ok(())
    }

    fn resolve_bootstrap_properties(
        &self,
        server_dir: &NormalizedPath,
        bag: &PropertyBag,
        provenance: &mut BTreeMap<ServerFile, Provenance>,
        diagnostics: &mut Diagnostics,
    ) -> Result<()> {
        let file = ServerFile::BootstrapProperties;
        let explicit = self.params.bootstrap_properties.as_ref();
        if let Some(entries) = merge_properties(explicit, &bag.bootstrap) {
            supersede(provenance, file, Provenance::Inlined, diagnostics);
            writer::write_properties(&server_dir.join(file.as_str()), file, &entries, diagnostics)?;
        } else if let Some(source) = existing_file(self.params.bootstrap_properties_file.as_deref())
        {
            copy_over(&source, server_dir, file, provenance, diagnostics)?;
        }
        Ok(())
    }

    /// server.env only takes inline content from classified properties, and
    /// a standalone `serverEnvFile` replaces a directory-sourced file
    /// without an override warning.
    fn resolve_server_env(
        &self,
        server_dir: &NormalizedPath,
        bag: &PropertyBag,
        provenance: &mut BTreeMap<ServerFile, Provenance>,
        diagnostics: &mut Diagnostics,
    ) -> Result<()> {
        let file = ServerFile::ServerEnv;
        if let Some(entries) = merge_properties(None, &bag.env) {
            supersede(provenance, file, Provenance::Inlined, diagnostics);
            writer::write_properties(&server_dir.join(file.as_str()), file, &entries, diagnostics)?;
        } else if let Some(source) = existing_file(self.params.server_env_file.as_deref()) {
            io::copy_file(&source, &server_dir.join(file.as_str()))?;
            provenance.insert(file, Provenance::File(source.canonical()?));
        }
        Ok(())
    }
}

/// Record `next` as the provenance of `file`, warning if it replaces an earlier source.
fn supersede(
    provenance: &mut BTreeMap<ServerFile, Provenance>,
    file: ServerFile,
    next: Provenance,
    diagnostics: &mut Diagnostics,
) {
    if let Some(previous) = provenance.get(&file) {
        diagnostics.warn(
            DiagnosticKind::Override,
            format!(
                "The {previous} file is overwritten by {}.",
                next.describe()
            ),
        );
    }
    provenance.insert(file, next);
}

fn copy_over(
    source: &NormalizedPath,
    server_dir: &NormalizedPath,
    file: ServerFile,
    provenance: &mut BTreeMap<ServerFile, Provenance>,
    diagnostics: &mut Diagnostics,
) -> Result<()> {
    let canonical = source.canonical()?;
    supersede(provenance, file, Provenance::File(canonical), diagnostics);
    io::copy_file(source, &server_dir.join(file.as_str()))?;
    Ok(())
}

fn existing(path: Option<&std::path::Path>) -> Option<NormalizedPath> {
    path.map(NormalizedPath::new).filter(NormalizedPath::exists)
}

fn existing_file(path: Option<&std::path::Path>) -> Option<NormalizedPath> {
    existing(path).filter(NormalizedPath::is_file)
}
