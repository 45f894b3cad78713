//! [`RecordingInvoker`], a fake host mechanism that records goal runs.

use liberty_core::{ConfigNode, ExecutionError, ExternalTaskInvoker, PluginCoordinate};

/// One recorded `invoke` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub plugin: PluginCoordinate,
    pub goal: String,
    pub configuration: ConfigNode,
}

/// Records every invocation and optionally fails chosen goals.
#[derive(Debug, Default)]
pub struct RecordingInvoker {
    calls: Vec<RecordedCall>,
    failing_goals: Vec<String>,
}

impl RecordingInvoker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every invocation of `goal`. The call is still recorded.
    pub fn failing_on(mut self, goal: &str) -> Self {
        self.failing_goals.push(goal.to_string());
        self
    }

    pub fn calls(&self) -> &[RecordedCall] {
        &self.calls
    }

    pub fn goals(&self) -> Vec<&str> {
        self.calls.iter().map(|c| c.goal.as_str()).collect()
    }
}

impl ExternalTaskInvoker for RecordingInvoker {
    fn invoke(
        &mut self,
        plugin: &PluginCoordinate,
        goal: &str,
        configuration: &ConfigNode,
    ) -> Result<(), ExecutionError> {
        self.calls.push(RecordedCall {
            plugin: plugin.clone(),
            goal: goal.to_string(),
            configuration: configuration.clone(),
        });
        if self.failing_goals.iter().any(|g| g == goal) {
            return Err(ExecutionError::new(format!("goal {goal} failed")));
        }
        Ok(())
    }
}
