//! Error types for liberty-core

/// Result type for liberty-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a configuration pass or a delegated goal run.
///
/// Overrides, null values and variable collisions are not errors; they
/// are reported as [`crate::Diagnostic`] values instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A parameter value cannot be used
    #[error("Invalid parameter {name}: {message}")]
    InvalidParameter { name: String, message: String },

    /// The build descriptor could not be read
    #[error("Failed to parse build descriptor: {message}")]
    DescriptorParse { message: String },

    /// A delegated goal failed; surfaced as-is, never retried
    #[error("Execution of {plugin}:{goal} failed: {source}")]
    GoalExecution {
        plugin: String,
        goal: String,
        #[source]
        source: ExecutionError,
    },

    /// Filesystem error from liberty-fs
    #[error(transparent)]
    Fs(#[from] liberty_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// XML reading or writing error
    #[error(transparent)]
    Xml(#[from] quick_xml::Error),
}

/// Failure reported by an [`crate::ExternalTaskInvoker`].
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct ExecutionError {
    pub message: String,
}

impl ExecutionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
