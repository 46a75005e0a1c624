//! CLI front-end for vercel-deploy
//!
//! - `deploy`: deploy with the Vercel CLI, assign aliases, publish outputs
//! - `completions`: generate shell completions
//!
//! Every `deploy` flag falls back to an environment variable so the binary
//! can be driven from a workflow's `env:` block.

pub mod completions;
pub mod deploy;

use anyhow::{Context, Result};
use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use vercel_deploy::{
    CommitInputs, Config, DEFAULT_API_URL, DEFAULT_CLI, init_logging, level_for_verbosity,
};

/// CLI arguments for vercel-deploy
#[derive(Parser, Debug)]
#[command(name = "vercel-deploy")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
#[allow(clippy::large_enum_variant)]
enum Command {
    /// Deploy with the Vercel CLI
    Deploy(DeployArgs),

    /// Generate shell completions
    Completions {
        /// Shell type
        #[arg(value_enum)]
        shell: ShellArg,
        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Inputs of the `deploy` subcommand
#[derive(clap::Args, Debug)]
#[allow(clippy::struct_excessive_bools)]
pub struct DeployArgs {
    /// Vercel API token
    #[arg(long, env = "VERCEL_TOKEN", hide_env_values = true)]
    token: String,

    /// Team scope
    #[arg(long, env = "VERCEL_SCOPE")]
    scope: Option<String>,

    /// Organization id forwarded to the CLI
    #[arg(long, env = "VERCEL_ORG_ID")]
    org_id: Option<String>,

    /// Project id forwarded to the CLI
    #[arg(long, env = "VERCEL_PROJECT_ID")]
    project_id: Option<String>,

    /// Create a production deployment
    #[arg(long, env = "PRODUCTION")]
    production: bool,

    /// Deploy a prebuilt `.vercel/output` directory
    #[arg(long, env = "PREBUILT")]
    prebuilt: bool,

    /// Force a new deployment even if nothing changed
    #[arg(long, env = "FORCE")]
    force: bool,

    /// Pass --debug to the Vercel CLI
    #[arg(
        long,
        env = "VERCEL_DEBUG",
        default_value_t = true,
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new()
    )]
    debug: bool,

    /// Build environment entry, KEY=value (repeatable, newline separated in env)
    #[arg(long = "build-env", env = "BUILD_ENV", value_delimiter = '\n')]
    build_env: Vec<String>,

    /// Directory to deploy from
    #[arg(long, env = "WORKING_DIRECTORY", default_value = ".")]
    working_directory: PathBuf,

    /// Alias domain to assign (repeatable, newline separated in env)
    #[arg(long = "alias", env = "ALIAS_DOMAINS", value_delimiter = '\n')]
    alias_domains: Vec<String>,

    /// Forward commit metadata with --meta
    #[arg(
        long,
        env = "GITHUB_DEPLOYMENT",
        default_value_t = true,
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new()
    )]
    github_deployment: bool,

    /// Forward only the first line of the commit message
    #[arg(long, env = "TRIM_COMMIT_MESSAGE")]
    trim_commit_message: bool,

    /// Commit author name (read from git when omitted)
    #[arg(long, env = "COMMIT_AUTHOR_NAME")]
    commit_author_name: Option<String>,

    /// Commit author login
    #[arg(long, env = "GITHUB_ACTOR")]
    commit_author_login: Option<String>,

    /// Commit message (read from git when omitted)
    #[arg(long, env = "COMMIT_MESSAGE")]
    commit_message: Option<String>,

    /// Repository as owner/repo
    #[arg(long, env = "GITHUB_REPOSITORY")]
    repository: Option<String>,

    /// Git ref of the commit
    #[arg(long = "ref", env = "GITHUB_REF")]
    git_ref: Option<String>,

    /// Commit SHA
    #[arg(long, env = "GITHUB_SHA")]
    sha: Option<String>,

    /// Install the Vercel CLI with npm before deploying
    #[arg(long, env = "INSTALL_CLI")]
    install_cli: bool,

    /// Vercel CLI version to install
    #[arg(long, env = "VERCEL_CLI_VERSION")]
    cli_version: Option<String>,

    /// Vercel CLI executable
    #[arg(long = "cli", env = "VERCEL_CLI", default_value = DEFAULT_CLI)]
    cli_program: String,

    /// Vercel API base URL
    #[arg(long, env = "VERCEL_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Look up deployment metadata after deploying
    #[arg(
        long,
        env = "DEPLOYMENT_STATUS",
        default_value_t = true,
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new()
    )]
    deployment_status: bool,

    /// Mirror Vercel CLI output to the log
    #[arg(
        long,
        env = "ECHO_CLI_OUTPUT",
        default_value_t = true,
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new()
    )]
    echo: bool,

    /// File step outputs are appended to
    #[arg(long, env = "GITHUB_OUTPUT")]
    output_file: Option<PathBuf>,
}

impl DeployArgs {
    /// Converts parsed arguments into the application configuration
    fn into_config(self, log_level: &str) -> Config {
        let non_blank = |values: Vec<String>| -> Vec<String> {
            values
                .into_iter()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .collect()
        };

        Config {
            token: self.token,
            scope: self.scope,
            org_id: self.org_id,
            project_id: self.project_id,
            production: self.production,
            prebuilt: self.prebuilt,
            force: self.force,
            debug: self.debug,
            build_env: non_blank(self.build_env),
            working_directory: self.working_directory,
            alias_domains: non_blank(self.alias_domains),
            github_deployment: self.github_deployment,
            trim_commit_message: self.trim_commit_message,
            commit: CommitInputs {
                author_name: self.commit_author_name,
                author_login: self.commit_author_login,
                message: self.commit_message,
                repository: self.repository,
                git_ref: self.git_ref,
                sha: self.sha,
            },
            install_cli: self.install_cli,
            cli_version: self.cli_version,
            cli_program: self.cli_program,
            api_url: self.api_url,
            deployment_status: self.deployment_status,
            echo_output: self.echo,
            output_file: self.output_file,
            log_level: log_level.to_string(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ShellArg {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Parse and execute CLI arguments
pub fn run() -> Result<()> {
    let args = Args::parse();
    let level = level_for_verbosity(args.verbose);
    init_logging(level);

    match args.command {
        Command::Deploy(deploy_args) => {
            let config = deploy_args.into_config(level);
            tracing::debug!(
                config = %serde_json::to_string(&config).unwrap_or_default(),
                "Loaded configuration"
            );

            if let Err(e) = deploy::run_deploy(&config) {
                if let Some(report) = e.diagnostics() {
                    eprintln!("Deployment failed:\n{report}");
                }
                return Err(e).context("Deployment failed");
            }
        }
        Command::Completions { shell, output } => {
            use clap_complete::Shell;

            let shell_enum = match shell {
                ShellArg::Bash => Shell::Bash,
                ShellArg::Zsh => Shell::Zsh,
                ShellArg::Fish => Shell::Fish,
                ShellArg::PowerShell => Shell::PowerShell,
            };

            let completions = completions::generate_completions(shell_enum)?;

            if let Some(output_path) = output {
                completions::save_completions(&completions, &output_path)?;
            } else {
                println!("{}", completions);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(extra: &[&str]) -> DeployArgs {
        let mut argv = vec!["vercel-deploy", "deploy", "--token", "tok"];
        argv.extend_from_slice(extra);
        match Args::try_parse_from(argv).unwrap().command {
            Command::Deploy(args) => args,
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }

    #[test]
    fn test_deploy_flags() {
        let config = parse(&[
            "--production",
            "--prebuilt",
            "--scope",
            "team",
            "--build-env",
            "A=1",
            "--build-env",
            "B=2",
            "--alias",
            "https://foo.example.com",
            "--debug",
            "false",
        ])
        .into_config("info");

        assert_eq!(config.token, "tok");
        assert!(config.production);
        assert!(config.prebuilt);
        assert!(!config.debug);
        assert_eq!(config.scope.as_deref(), Some("team"));
        assert_eq!(config.build_env, vec!["A=1", "B=2"]);
        assert_eq!(config.alias_domains, vec!["https://foo.example.com"]);
    }

    #[test]
    fn test_toggles_accept_boolish_values() {
        let config = parse(&[
            "--deployment-status",
            "0",
            "--github-deployment",
            "no",
            "--echo",
            "off",
            "--debug",
            "false",
        ])
        .into_config("info");
        assert!(!config.deployment_status);
        assert!(!config.github_deployment);
        assert!(!config.echo_output);
        assert!(!config.debug);

        let config = parse(&[
            "--deployment-status",
            "1",
            "--github-deployment",
            "yes",
            "--echo",
            "on",
            "--debug",
            "true",
        ])
        .into_config("info");
        assert!(config.deployment_status);
        assert!(config.github_deployment);
        assert!(config.echo_output);
        assert!(config.debug);
    }

    #[test]
    fn test_toggles_reject_unknown_values() {
        let argv = [
            "vercel-deploy",
            "deploy",
            "--token",
            "tok",
            "--deployment-status",
            "maybe",
        ];
        assert!(Args::try_parse_from(argv).is_err());
    }

    #[test]
    fn test_newline_separated_values() {
        let config = parse(&["--build-env", "A=1\nB=2\n", "--alias", "a.example.com\n\nb.example.com"])
            .into_config("debug");

        assert_eq!(config.build_env, vec!["A=1", "B=2"]);
        assert_eq!(config.alias_domains, vec!["a.example.com", "b.example.com"]);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_commit_inputs_mapping() {
        let config = parse(&[
            "--repository",
            "acme/site",
            "--ref",
            "refs/heads/main",
            "--sha",
            "abc123",
            "--commit-message",
            "Release",
        ])
        .into_config("info");

        assert_eq!(config.commit.repository.as_deref(), Some("acme/site"));
        assert_eq!(config.commit.git_ref.as_deref(), Some("refs/heads/main"));
        assert_eq!(config.commit.sha.as_deref(), Some("abc123"));
        assert_eq!(config.commit.message.as_deref(), Some("Release"));
    }
}
