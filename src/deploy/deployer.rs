//! Deployment orchestrator
//!
//! Runs the deployment CLI, remembers the resulting URL and uses it for
//! alias assignment and status lookups.

use super::errors::DeployError;
use super::request::DeploymentRequest;
use super::url::{parse_deployment_url, remove_scheme};
use crate::executor::{CommandInvocation, CommandResult, Runner};
use crate::infrastructure::{DeploymentStatus, StatusClient};

/// Drives one deployment through the CLI
#[derive(Debug)]
pub struct Deployer<R: Runner> {
    runner: R,
    request: DeploymentRequest,
    deployment_url: Option<String>,
}

impl<R: Runner> Deployer<R> {
    /// Creates a deployer for the given request
    #[must_use]
    pub fn new(runner: R, request: DeploymentRequest) -> Self {
        Self {
            runner,
            request,
            deployment_url: None,
        }
    }

    /// The request this deployer runs
    #[must_use]
    pub fn request(&self) -> &DeploymentRequest {
        &self.request
    }

    /// Deployment URL (no scheme) once `deploy` has succeeded
    #[must_use]
    pub fn deployment_url(&self) -> Option<&str> {
        self.deployment_url.as_deref()
    }

    fn invocation(&self, args: Vec<String>) -> CommandInvocation {
        let mut invocation =
            CommandInvocation::new(&self.request.program, &self.request.cwd).args(args);
        for (key, value) in self.request.cli_env() {
            invocation = invocation.env(key, value);
        }
        invocation
    }

    /// Runs the deploy and stores the parsed deployment URL
    ///
    /// # Errors
    ///
    /// Propagates runner failures, and returns `DeployError::UrlNotFound`
    /// when the CLI succeeded but printed no URL.
    pub fn deploy(&mut self) -> Result<String, DeployError> {
        tracing::info!(
            production = self.request.is_production(),
            cwd = %self.request.cwd.display(),
            "Starting deploy with Vercel CLI"
        );

        let invocation = self.invocation(self.request.deploy_arguments());
        let result = self.runner.run(&invocation)?;
        let url = parse_deployment_url(&result.stdout)?;

        tracing::info!(
            deployment_url = %url,
            duration_ms = result.duration.as_millis(),
            "Deployment created"
        );

        self.deployment_url = Some(url.clone());
        Ok(url)
    }

    fn require_url(&self) -> Result<&str, DeployError> {
        self.deployment_url
            .as_deref()
            .ok_or(DeployError::MissingDeploymentUrl)
    }

    /// Points `alias_url` at the deployment
    ///
    /// # Errors
    ///
    /// Returns `DeployError::MissingDeploymentUrl` before a successful
    /// deploy; runner failures propagate unchanged.
    pub fn assign_alias(&self, alias_url: &str) -> Result<CommandResult, DeployError> {
        let deployment_url = self.require_url()?;
        let alias = remove_scheme(alias_url);

        tracing::info!(deployment_url, alias, "Assigning alias");

        let args = self.request.alias_arguments(deployment_url, alias);
        self.runner.run(&self.invocation(args))
    }

    /// Fetches deployment metadata from the REST API
    ///
    /// # Errors
    ///
    /// Returns `DeployError::MissingDeploymentUrl` before a successful
    /// deploy, or `DeployError::Lookup` on HTTP failure.
    pub fn get_deployment(&self, client: &StatusClient) -> Result<DeploymentStatus, DeployError> {
        let deployment_url = self.require_url()?;
        client.get_deployment_blocking(deployment_url)
    }
}
