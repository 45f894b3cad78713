//! Explicit server configuration parameters
//!
//! These are the values a build supplies directly, as opposed to the
//! convention-driven `liberty.*` properties. They can be constructed in
//! code or loaded from a TOML, JSON or YAML file whose keys use the
//! build plugin's parameter names:
//!
//! ```toml
//! serverDirectory = "target/liberty/wlp/usr/servers/defaultServer"
//! configDirectory = "src/main/liberty/config"
//! jvmOptions = ["-Xms256m"]
//!
//! [bootstrapProperties]
//! "default.http.port" = "9080"
//! ```

use std::collections::BTreeMap;
use std::path::PathBuf;

use liberty_fs::{ConfigStore, NormalizedPath};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerConfigParams {
    /// Target server directory receiving the generated files
    pub server_directory: Option<PathBuf>,

    /// Shared directory whose contents are copied into the server directory
    pub config_directory: Option<PathBuf>,

    /// Standalone server.xml
    #[serde(alias = "configFile")]
    pub server_xml_file: Option<PathBuf>,

    /// Standalone jvm.options
    pub jvm_options_file: Option<PathBuf>,

    /// Inline JVM options
    pub jvm_options: Option<Vec<String>>,

    /// Standalone bootstrap.properties
    pub bootstrap_properties_file: Option<PathBuf>,

    /// Inline bootstrap properties; a `null` value is written empty
    pub bootstrap_properties: Option<BTreeMap<String, Option<String>>>,

    /// Standalone server.env
    pub server_env_file: Option<PathBuf>,

    /// Skip configuration generation entirely
    pub skip: bool,
}

impl ServerConfigParams {
    /// Load parameters from a TOML, JSON or YAML file.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        let params = ConfigStore::new().load(path)?;
        tracing::debug!(path = %path, "Loaded server configuration parameters");
        Ok(params)
    }

    /// The server directory, required for any generation.
    pub fn server_directory(&self) -> Result<NormalizedPath> {
        self.server_directory
            .as_deref()
            .map(NormalizedPath::new)
            .ok_or_else(|| Error::InvalidParameter {
                name: "serverDirectory".into(),
                message: "a target server directory is required".into(),
            })
    }
}
