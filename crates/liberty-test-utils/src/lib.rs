//! Shared test utilities for the liberty-config workspace.
//!
//! This crate provides standardised fixtures for end-to-end tests. It is a
//! dev-dependency only and is never published.
//!
//! # Modules
//!
//! - [`server`]: [`TestServer`] scratch layout with a config and server directory
//! - [`invoker`]: [`RecordingInvoker`], a fake `ExternalTaskInvoker`

pub mod invoker;
pub mod server;

pub use invoker::{RecordedCall, RecordingInvoker};
pub use server::TestServer;
