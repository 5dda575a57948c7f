//! Service Configuration Module
//!
//! Configuration is loaded from TOML, then layered with environment and CLI
//! overrides.
//!
//! ## Loading Order
//!
//! 1. `COMPETITOR_SCOUT_CONFIG` environment variable (path to TOML file)
//! 2. `competitor_scout.toml` in the current working directory
//! 3. Built-in defaults
//!
//! Environment overrides (`ELASTICSEARCH_URL`, `COMPETITOR_SCOUT_INDEX`,
//! `COMPETITOR_SCOUT_BIND`) are applied on top of whichever source won.

mod service_config;
pub mod defaults;
pub mod validation;

pub use service_config::*;
