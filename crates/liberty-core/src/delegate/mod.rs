//! Delegated execution of other plugins' goals
//!
//! The server plugin's `create`, `deploy` and `install-feature` goals,
//! and arbitrary goals of other plugins, are run through an
//! [`ExternalTaskInvoker`] supplied by the host build. Configuration for
//! each goal is read from the build descriptor and structurally merged
//! with any caller-supplied fragment.

mod descriptor;
mod node;
mod runner;

pub use descriptor::{
    BuildDescriptor, DEFAULT_PLUGIN_GROUP_ID, PluginCoordinate, PluginDeclaration, PluginExecution,
};
pub use node::ConfigNode;
pub use runner::{
    DelegatedGoalRunner, ExternalTaskInvoker, GoalRun, LATEST_VERSION, LIBERTY_PLUGIN_ARTIFACT_ID,
    LIBERTY_PLUGIN_GROUP_ID, RELEASE_VERSION, enforce_loose_application,
};
