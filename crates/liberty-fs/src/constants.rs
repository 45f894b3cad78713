//! Conventional file names inside a Liberty server directory.

use std::path::Path;

/// Header line written at the top of every generated artifact.
pub const GENERATED_HEADER: &str = "# Generated by liberty-maven-plugin";

/// Files the configuration pass knows how to source or generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ServerFile {
    /// Primary server configuration
    ServerXml,
    /// JVM launch options, one per line
    JvmOptions,
    /// Bootstrap properties read before server.xml
    BootstrapProperties,
    /// Environment for the server process
    ServerEnv,
    /// Variable override dropin generated from `liberty.var.*` properties
    VariableDropin,
}

impl ServerFile {
    /// The four files that can be supplied from a shared configuration directory.
    pub const CONVENTIONAL: [ServerFile; 4] = [
        Self::ServerXml,
        Self::JvmOptions,
        Self::BootstrapProperties,
        Self::ServerEnv,
    ];

    /// Path of the file relative to the server directory.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ServerXml => "server.xml",
            Self::JvmOptions => "jvm.options",
            Self::BootstrapProperties => "bootstrap.properties",
            Self::ServerEnv => "server.env",
            Self::VariableDropin => "configDropins/overrides/liberty-plugin-variable-config.xml",
        }
    }
}

impl AsRef<Path> for ServerFile {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for ServerFile {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for ServerFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
