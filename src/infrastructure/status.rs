//! Deployment status lookup
//!
//! Queries the Vercel REST API for metadata about a deployment, keyed by
//! its URL. One request, bearer authentication, no retry.

use crate::deploy::DeployError;
use serde::{Deserialize, Serialize};
use url::Url;

/// Default Vercel API base URL
pub const DEFAULT_API_URL: &str = "https://api.vercel.com";

const DEPLOYMENT_LOOKUP_PATH: [&str; 4] = ["v11", "now", "deployments", "get"];

/// Parsed deployment lookup response
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentStatus {
    /// Deployment id
    pub id: Option<String>,

    /// Deployment hostname
    pub url: Option<String>,

    /// Dashboard link for the deployment
    pub inspector_url: Option<String>,

    /// Build state, e.g. `READY`
    pub ready_state: Option<String>,

    /// Every other field of the response
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// HTTP client for the deployment lookup endpoint
#[derive(Debug, Clone)]
pub struct StatusClient {
    http: reqwest::Client,
    endpoint: Url,
    token: String,
}

impl StatusClient {
    /// Creates a client against the public API
    ///
    /// # Errors
    ///
    /// Returns `DeployError::Config` if the HTTP client cannot be built.
    pub fn new(token: impl Into<String>) -> Result<Self, DeployError> {
        Self::with_base_url(token, DEFAULT_API_URL)
    }

    /// Creates a client against a custom API base URL
    ///
    /// The lookup path is appended to any path already in `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `DeployError::Config` for an unparsable base URL.
    pub fn with_base_url(token: impl Into<String>, base_url: &str) -> Result<Self, DeployError> {
        let mut endpoint = Url::parse(base_url)
            .map_err(|e| DeployError::Config(format!("invalid API URL '{base_url}': {e}")))?;
        endpoint.set_query(None);
        endpoint.set_fragment(None);
        endpoint
            .path_segments_mut()
            .map_err(|()| DeployError::Config(format!("API URL '{base_url}' cannot be a base")))?
            .pop_if_empty()
            .extend(DEPLOYMENT_LOOKUP_PATH);

        let http = reqwest::Client::builder()
            .user_agent(concat!("vercel-deploy/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DeployError::Config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            endpoint,
            token: token.into(),
        })
    }

    /// Lookup endpoint, without query
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Fetches metadata for `deployment_url`
    ///
    /// # Errors
    ///
    /// Returns `DeployError::Lookup` for transport errors, non-2xx
    /// responses and undecodable bodies.
    pub async fn get_deployment(
        &self,
        deployment_url: &str,
    ) -> Result<DeploymentStatus, DeployError> {
        tracing::debug!(endpoint = %self.endpoint, deployment_url, "Looking up deployment");

        let response = self
            .http
            .get(self.endpoint.clone())
            .query(&[("url", deployment_url)])
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DeployError::Lookup {
                status: Some(status.as_u16()),
                message: format!("{status}: {}", body.trim()),
            });
        }

        let deployment = response.json::<DeploymentStatus>().await?;

        tracing::debug!(
            deployment_id = deployment.id.as_deref().unwrap_or_default(),
            ready_state = deployment.ready_state.as_deref().unwrap_or_default(),
            "Deployment lookup complete"
        );

        Ok(deployment)
    }

    /// Runs [`get_deployment`](Self::get_deployment) on a private runtime
    ///
    /// Must not be called from inside an async context.
    ///
    /// # Errors
    ///
    /// Same as `get_deployment`, plus `DeployError::Io` if the runtime
    /// cannot be created.
    pub fn get_deployment_blocking(
        &self,
        deployment_url: &str,
    ) -> Result<DeploymentStatus, DeployError> {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| DeployError::Io(format!("Failed to create runtime: {e}")))?;

        rt.block_on(self.get_deployment(deployment_url))
    }
}
