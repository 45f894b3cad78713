//! [`TestServer`] builder for configuration pass scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use liberty_core::ServerConfigParams;
use tempfile::TempDir;

/// A temporary layout with a shared configuration directory (`config/`),
/// a target server directory (`wlp/usr/servers/defaultServer/`) and room
/// for standalone files anywhere else under the root.
///
/// # Example
///
/// ```rust,no_run
/// use liberty_test_utils::TestServer;
///
/// let server = TestServer::new();
/// server.write_config_file("server.xml", "<server/>");
/// let params = server.params();
/// assert!(params.server_directory.is_some());
/// ```
pub struct TestServer {
    temp_dir: TempDir,
}

impl Default for TestServer {
    fn default() -> Self {
        Self::new()
    }
}

impl TestServer {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn config_dir(&self) -> PathBuf {
        self.root().join("config")
    }

    pub fn server_dir(&self) -> PathBuf {
        self.root().join("wlp/usr/servers/defaultServer")
    }

    /// Parameters targeting this layout's server directory and config directory.
    pub fn params(&self) -> ServerConfigParams {
        ServerConfigParams {
            server_directory: Some(self.server_dir()),
            config_directory: Some(self.config_dir()),
            ..ServerConfigParams::default()
        }
    }

    /// Write a file into the shared configuration directory.
    pub fn write_config_file(&self, name: &str, content: &str) -> PathBuf {
        self.write_file(&format!("config/{name}"), content)
    }

    /// Write a file anywhere under the root, creating parents.
    pub fn write_file(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    /// Canonical path string of a file under the root, as used in provenance.
    pub fn canonical(&self, relative: &str) -> String {
        let canonical = dunce::canonicalize(self.root().join(relative)).unwrap();
        canonical.to_string_lossy().into_owned()
    }

    /// Read a file from the server directory.
    pub fn read_server_file(&self, relative: &str) -> String {
        let path = self.server_dir().join(relative);
        fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()))
    }

    pub fn server_file_exists(&self, relative: &str) -> bool {
        self.server_dir().join(relative).is_file()
    }

    /// Assert that a server file has exactly the given content.
    pub fn assert_server_file(&self, relative: &str, expected: &str) {
        assert_eq!(
            self.read_server_file(relative),
            expected,
            "unexpected content in {relative}"
        );
    }
}
