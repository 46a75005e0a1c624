//! Infrastructure layer
//!
//! This module contains external integrations and adapters.

mod config;
pub mod git;
mod github_actions;
mod installer;
mod logging;
mod status;

pub use config::{CommitInputs, Config};
pub use github_actions::{ActionOutputs, LogGroup};
pub use installer::{install_cli, install_invocation};
pub use logging::{init_logging, level_for_verbosity};
pub use status::{DEFAULT_API_URL, DeploymentStatus, StatusClient};
