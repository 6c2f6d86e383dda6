//! Configuration and profile management for gcpctl
//!
//! Profiles carry the ambient scope (project, region, location, cluster), the
//! access token, the API track and per-profile polling settings.
//!
//! # Features
//!
//! - Multiple named profiles with a default
//! - Environment variable expansion in config files
//! - Platform-specific config file locations

#![allow(clippy::module_inception)]

pub mod config;
pub mod error;
pub mod polling;

// Re-export main types for convenience
pub use config::{Config, EndpointOverrides, Profile};
pub use error::{ConfigError, Result};
pub use polling::PollingConfig;
