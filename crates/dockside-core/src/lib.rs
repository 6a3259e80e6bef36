//! Core types and configuration for dockside.
//!
//! This crate defines the `dockside.toml` schema ([`DocksideConfig`]),
//! project validation and the working directory layout ([`ProjectLayout`]),
//! resource naming ([`ResourceName`]) and shared error types.

pub mod config;
pub mod error;
pub mod project;
pub mod settings;

pub use config::{ArtifactsConfig, DocksideConfig, EngineConfig, ImageConfig, ToolchainConfig};
pub use error::{Error, Result};
pub use project::ProjectLayout;
pub use settings::{DeploySettings, Framework, ResourceName, SIMPLE_CONSOLE_ENV};
