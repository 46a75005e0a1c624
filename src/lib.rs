//! # vercel-deploy - Deploy to Vercel from CI
//!
//! Wraps the Vercel CLI for CI/CD pipelines: builds the deploy command from
//! configuration, runs it with incremental output capture, extracts the
//! deployment URL, assigns aliases and looks up deployment metadata.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use vercel_deploy::{DeployMode, Deployer, DeploymentRequest, ProcessRunner};
//!
//! let request = DeploymentRequest::new("token", ".").with_mode(DeployMode::Production);
//! let mut deployer = Deployer::new(ProcessRunner::new().with_echo(true), request);
//!
//! let url = deployer.deploy()?;
//! deployer.assign_alias("https://www.example.com")?;
//! println!("Deployed to https://{url}");
//! # Ok::<(), vercel_deploy::DeployError>(())
//! ```
//!
//! ## License
//!
//! Licensed under either of
//! - Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or <https://www.apache.org/licenses/LICENSE-2.0>)
//! - MIT license ([LICENSE-MIT](LICENSE-MIT) or <https://opensource.org/licenses/MIT>)
//!
//! at your option.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod deploy;
pub mod executor;
pub mod infrastructure;

// Re-export commonly used types
pub use deploy::{
    CommitMetadata, DEFAULT_CLI, DeployError, DeployMode, Deployer, DeploymentRequest,
    LaunchErrorKind, expand_alias, parse_deployment_url, remove_scheme, slugify,
};
pub use executor::{CommandInvocation, CommandResult, ProcessRunner, Runner};
pub use infrastructure::{
    ActionOutputs, CommitInputs, Config, DEFAULT_API_URL, DeploymentStatus, LogGroup,
    StatusClient, init_logging, install_cli, level_for_verbosity,
};

/// Version of the vercel-deploy crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
