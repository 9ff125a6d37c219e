//! Command line host for the custom resource lifecycle controller.
//!
//! Loads `cfnres.toml` (plus `CFNRES__*` environment overrides), then either
//! drives an event through the controller against the configured REST
//! resource, or reports a status for an event directly.

pub mod cli;
pub mod commands;
pub mod config;
pub mod observability;
