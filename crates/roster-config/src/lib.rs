//! # Roster Config
//!
//! Configuration management for Roster.
//! Supports layered configuration from files, environment variables,
//! and the flat `DB_*` / `SERVER_PORT` variables older deployments use.
//! The loaded configuration is immutable.

mod app_config;
mod loader;

pub use app_config::*;
pub use loader::*;
