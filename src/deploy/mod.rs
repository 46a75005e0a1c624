//! Deployment domain
//!
//! Request model, CLI argument construction, output parsing and the
//! orchestrator that ties them to a [`Runner`](crate::executor::Runner).

mod deployer;
pub mod errors;
mod request;
mod url;

pub use deployer::Deployer;
pub use errors::{DeployError, LaunchErrorKind};
pub use request::{CommitMetadata, DEFAULT_CLI, DeployMode, DeploymentRequest};
pub use url::{expand_alias, has_placeholder, parse_deployment_url, remove_scheme, slugify};
