//! `vercel-deploy deploy` - Deploy with the Vercel CLI
//!
//! Runs the whole flow: optional CLI install, deploy, alias assignment,
//! status lookup, and step outputs.
//!
//! ## Usage
//!
//! ```bash
//! VERCEL_TOKEN=... vercel-deploy deploy --production --alias https://www.example.com
//! ```

use vercel_deploy::{
    ActionOutputs, Config, DeployError, Deployer, LogGroup, ProcessRunner, StatusClient,
    install_cli, remove_scheme,
};

/// Prefixes `https://` unless the value already has a scheme
fn with_scheme(url: &str) -> String {
    format!("https://{}", remove_scheme(url))
}

/// Deploys according to `config` and returns the published outputs
///
/// # Errors
///
/// Returns the first failure; nothing is retried.
pub fn run_deploy(config: &Config) -> Result<ActionOutputs, DeployError> {
    config.validate()?;

    let runner = ProcessRunner::new().with_echo(config.echo_output);

    if config.install_cli {
        let _group = LogGroup::start("Install Vercel CLI");
        install_cli(
            &runner,
            config.cli_version.as_deref(),
            &config.working_directory,
        )?;
    }

    let commit = config.commit_metadata(&runner);
    let aliases = config.aliases(commit.as_ref())?;
    let mut deployer = Deployer::new(&runner, config.deployment_request(commit));

    let deployment_url = {
        let _group = LogGroup::start("Deploy with Vercel CLI");
        deployer.deploy()?
    };

    let mut outputs = ActionOutputs::new();
    outputs.set("deployment-url", with_scheme(&deployment_url));

    if !aliases.is_empty() {
        let _group = LogGroup::start("Assign aliases");
        for alias in &aliases {
            deployer.assign_alias(alias)?;
        }
    }

    let preview_url = aliases
        .first()
        .map_or_else(|| with_scheme(&deployment_url), |alias| with_scheme(alias));
    outputs.set("preview-url", preview_url);

    if !aliases.is_empty() {
        let all_urls: Vec<String> = aliases
            .iter()
            .map(|alias| with_scheme(alias))
            .chain(std::iter::once(with_scheme(&deployment_url)))
            .collect();
        outputs.set("deployment-urls", all_urls.join("\n"));
    }

    if config.deployment_status {
        let client = StatusClient::with_base_url(config.token.as_str(), &config.api_url)?;
        let status = deployer.get_deployment(&client)?;
        if let Some(id) = status.id {
            outputs.set("deployment-id", id);
        }
        if let Some(inspector_url) = status.inspector_url {
            outputs.set("inspector-url", inspector_url);
        }
    }

    if let Some(path) = &config.output_file {
        outputs.write_to(path)?;
    }

    tracing::info!(deployment_url = %with_scheme(&deployment_url), "Deployment complete");

    Ok(outputs)
}
