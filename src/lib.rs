//! Library exports shared by the desktop app, the command line client and tests.
/// Per-user application directory resolution.
pub mod app_dirs;
/// Client for the remote churn prediction API.
pub mod churn_api;
/// Persisted application configuration.
pub mod config;
/// Desktop UI modules.
pub mod egui_app;
/// Shared HTTP agent and bounded response reads.
pub mod http_client;
/// Tracing subscriber setup.
pub mod logging;
