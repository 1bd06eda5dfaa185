//! # Roster Server Library
//!
//! Wiring for the Roster server: backend selection from configuration,
//! logging setup and startup output.

pub mod di;
pub mod logging;
pub mod startup;
