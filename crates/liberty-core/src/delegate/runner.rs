use super::descriptor::{BuildDescriptor, PluginCoordinate};
use super::node::ConfigNode;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::error::{Error, ExecutionError, Result};

pub const LIBERTY_PLUGIN_GROUP_ID: &str = "io.openliberty.tools";
pub const LIBERTY_PLUGIN_ARTIFACT_ID: &str = "liberty-maven-plugin";

/// Version marker for undeclared third-party plugins.
pub const RELEASE_VERSION: &str = "RELEASE";
/// Version marker for the server plugin itself when undeclared.
pub const LATEST_VERSION: &str = "LATEST";

const LOOSE_APPLICATION: &str = "looseApplication";

/// The host mechanism that actually executes a plugin goal.
///
/// Implementations must not retry: goals such as `deploy` have side
/// effects and may have partially run when they fail.
pub trait ExternalTaskInvoker {
    fn invoke(
        &mut self,
        plugin: &PluginCoordinate,
        goal: &str,
        configuration: &ConfigNode,
    ) -> std::result::Result<(), ExecutionError>;
}

impl<T: ExternalTaskInvoker + ?Sized> ExternalTaskInvoker for &mut T {
    fn invoke(
        &mut self,
        plugin: &PluginCoordinate,
        goal: &str,
        configuration: &ConfigNode,
    ) -> std::result::Result<(), ExecutionError> {
        (**self).invoke(plugin, goal, configuration)
    }
}

/// Record of a delegated goal that was executed successfully
#[derive(Debug, Clone)]
pub struct GoalRun {
    pub plugin: PluginCoordinate,
    pub goal: String,
    pub configuration: ConfigNode,
    pub diagnostics: Diagnostics,
}

/// Runs goals of other plugins with configuration taken from the build descriptor.
pub struct DelegatedGoalRunner<'a, I> {
    descriptor: &'a BuildDescriptor,
    invoker: I,
}

impl<'a, I: ExternalTaskInvoker> DelegatedGoalRunner<'a, I> {
    pub fn new(descriptor: &'a BuildDescriptor, invoker: I) -> Self {
        Self {
            descriptor,
            invoker,
        }
    }

    pub fn invoker(&self) -> &I {
        &self.invoker
    }

    pub fn into_invoker(self) -> I {
        self.invoker
    }

    /// Coordinate of a plugin, declared or synthesized with `RELEASE`.
    pub fn plugin(&self, group_id: &str, artifact_id: &str) -> PluginCoordinate {
        self.coordinate(group_id, artifact_id, RELEASE_VERSION)
    }

    /// Coordinate of the server plugin, declared or synthesized with `LATEST`.
    pub fn liberty_plugin(&self) -> PluginCoordinate {
        self.coordinate(LIBERTY_PLUGIN_GROUP_ID, LIBERTY_PLUGIN_ARTIFACT_ID, LATEST_VERSION)
    }

    fn coordinate(&self, group_id: &str, artifact_id: &str, fallback: &str) -> PluginCoordinate {
        match self.descriptor.plugin(group_id, artifact_id) {
            Some(declared) => declared.coordinate,
            None => PluginCoordinate::new(group_id, artifact_id).with_version(fallback),
        }
    }

    /// Effective configuration of `goal`, empty when the plugin is undeclared.
    pub fn goal_configuration(&self, group_id: &str, artifact_id: &str, goal: &str) -> ConfigNode {
        self.descriptor
            .plugin(group_id, artifact_id)
            .map(|declared| declared.goal_configuration(goal))
            .unwrap_or_else(ConfigNode::configuration)
    }

    /// Run an arbitrary goal of an arbitrary plugin.
    pub fn run_goal(&mut self, group_id: &str, artifact_id: &str, goal: &str) -> Result<GoalRun> {
        let plugin = self.plugin(group_id, artifact_id);
        let configuration = self.goal_configuration(group_id, artifact_id, goal);
        let label = format!("{artifact_id}:{goal}");
        self.execute(plugin, goal, &label, configuration, Diagnostics::new())
    }

    /// Run the server plugin's `create` goal.
    pub fn run_create(&mut self) -> Result<GoalRun> {
        let configuration = self.liberty_goal_configuration("create");
        self.run_liberty("create", configuration, Diagnostics::new())
    }

    /// Run the server plugin's `deploy` goal.
    ///
    /// With `force_loose_application`, an explicit `looseApplication=false`
    /// is flipped to `true` and reported.
    pub fn run_deploy(&mut self, force_loose_application: bool) -> Result<GoalRun> {
        let mut configuration = self.liberty_goal_configuration("deploy");
        let mut diagnostics = Diagnostics::new();
        if force_loose_application {
            enforce_loose_application(&mut configuration, &mut diagnostics);
        }
        self.run_liberty("deploy", configuration, diagnostics)
    }

    /// Run the server plugin's `install-feature` goal, with `features`
    /// merged over the declared configuration.
    pub fn run_install_feature(&mut self, features: Option<ConfigNode>) -> Result<GoalRun> {
        let mut configuration = self.liberty_goal_configuration("install-feature");
        if let Some(features) = features {
            let fragment = ConfigNode::configuration().with_child(features);
            configuration = ConfigNode::merge(fragment, &configuration);
        }
        self.run_liberty("install-feature", configuration, Diagnostics::new())
    }

    fn liberty_goal_configuration(&self, goal: &str) -> ConfigNode {
        self.goal_configuration(LIBERTY_PLUGIN_GROUP_ID, LIBERTY_PLUGIN_ARTIFACT_ID, goal)
    }

    fn run_liberty(
        &mut self,
        goal: &str,
        configuration: ConfigNode,
        diagnostics: Diagnostics,
    ) -> Result<GoalRun> {
        let plugin = self.liberty_plugin();
        let label = format!("liberty:{goal}");
        self.execute(plugin, goal, &label, configuration, diagnostics)
    }

    fn execute(
        &mut self,
        plugin: PluginCoordinate,
        goal: &str,
        label: &str,
        configuration: ConfigNode,
        mut diagnostics: Diagnostics,
    ) -> Result<GoalRun> {
        diagnostics.info(DiagnosticKind::GoalRun, format!("Running {label}"));
        diagnostics.debug(
            DiagnosticKind::GoalRun,
            format!("configuration:\n{}", configuration.to_xml()?),
        );
        diagnostics.emit();

        self.invoker
            .invoke(&plugin, goal, &configuration)
            .map_err(|source| Error::GoalExecution {
                plugin: plugin.key(),
                goal: goal.to_string(),
                source,
            })?;

        Ok(GoalRun {
            plugin,
            goal: goal.to_string(),
            configuration,
            diagnostics,
        })
    }
}

/// Flip an explicit `looseApplication=false` to `true`, with a warning.
/// Absent or other values are left alone.
pub fn enforce_loose_application(configuration: &mut ConfigNode, diagnostics: &mut Diagnostics) {
    let Some(loose) = configuration.child_mut(LOOSE_APPLICATION) else {
        return;
    };
    if loose.value.as_deref() == Some("false") {
        diagnostics.warn(
            DiagnosticKind::LooseApplicationForced,
            "Overriding liberty plugin parameter, \"looseApplication\" to \"true\" and deploying application in looseApplication format",
        );
        loose.value = Some("true".to_string());
    }
}
