//! Diagnostic events collected while resolving and materializing configuration
//!
//! The merge and resolve steps never log directly. They push events into a
//! [`Diagnostics`] collector which is returned to the caller, who decides
//! whether to inspect them or render them through `tracing`.

use serde::Serialize;

/// Severity of a diagnostic event
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Debug,
    Info,
    Warning,
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

/// What a diagnostic event is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticKind {
    /// A lower-precedence source was superseded
    Override,
    /// A present key carried no value and was written as empty
    NullValue,
    /// A default variable was dropped because a concrete value exists
    VariableCollision,
    /// `looseApplication=false` was forced to `true` for deploy
    LooseApplicationForced,
    /// Final provenance of a server file
    ConfigurationUsed,
    /// A property was routed into a configuration namespace
    PropertyProcessed,
    /// A delegated goal is about to run
    GoalRun,
}

impl std::fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Override => "override",
            Self::NullValue => "null-value",
            Self::VariableCollision => "variable-collision",
            Self::LooseApplicationForced => "loose-application-forced",
            Self::ConfigurationUsed => "configuration-used",
            Self::PropertyProcessed => "property-processed",
            Self::GoalRun => "goal-run",
        };
        f.write_str(name)
    }
}

/// A single diagnostic event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub level: Level,
    pub kind: DiagnosticKind,
    pub message: String,
}

/// Ordered collection of diagnostic events
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics {
    events: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, level: Level, kind: DiagnosticKind, message: impl Into<String>) {
        self.events.push(Diagnostic {
            level,
            kind,
            message: message.into(),
        });
    }

    pub fn warn(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        self.push(Level::Warning, kind, message);
    }

    pub fn info(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        self.push(Level::Info, kind, message);
    }

    pub fn debug(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        self.push(Level::Debug, kind, message);
    }

    /// Append all events of `other`, keeping their order.
    pub fn extend(&mut self, other: Diagnostics) {
        self.events.extend(other.events);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.events.iter()
    }

    /// Events of the given kind, in order.
    pub fn of_kind(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.events.iter().filter(move |d| d.kind == kind)
    }

    /// Warning-level events, in order.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.events.iter().filter(|d| d.level == Level::Warning)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Render every event through `tracing` at its level.
    pub fn emit(&self) {
        for event in &self.events {
            match event.level {
                Level::Warning => tracing::warn!(kind = %event.kind, "{}", event.message),
                Level::Info => tracing::info!(kind = %event.kind, "{}", event.message),
                Level::Debug => tracing::debug!(kind = %event.kind, "{}", event.message),
            }
        }
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.into_iter()
    }
}
