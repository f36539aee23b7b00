//! Configuration and process utilities.

/// Tracing subscriber setup.
pub mod logging;
/// TOML configuration (`gatehouse.toml`).
pub mod toml_config;
