//! Configuration management
//!
//! `Config` is the validated form of the command-line / environment inputs.
//! It produces the [`DeploymentRequest`] and everything around it.

use super::git;
use super::status::DEFAULT_API_URL;
use crate::deploy::{
    CommitMetadata, DEFAULT_CLI, DeployError, DeployMode, DeploymentRequest, expand_alias,
    has_placeholder,
};
use crate::executor::Runner;
use serde::Serialize;
use std::path::PathBuf;

/// Commit fields supplied by the caller; missing ones are discovered
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommitInputs {
    /// Author display name
    pub author_name: Option<String>,
    /// Author login
    pub author_login: Option<String>,
    /// Commit message
    pub message: Option<String>,
    /// `owner/repo`
    pub repository: Option<String>,
    /// Git ref
    pub git_ref: Option<String>,
    /// Commit SHA
    pub sha: Option<String>,
}

/// Application configuration
#[derive(Debug, Clone, Serialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct Config {
    /// Vercel API token
    #[serde(skip_serializing)]
    pub token: String,
    /// Team scope
    pub scope: Option<String>,
    /// Organization id
    pub org_id: Option<String>,
    /// Project id
    pub project_id: Option<String>,
    /// Deploy to production
    pub production: bool,
    /// Deploy prebuilt output
    pub prebuilt: bool,
    /// Force a new deployment
    pub force: bool,
    /// Pass `--debug` to the CLI
    pub debug: bool,
    /// `KEY=value` build environment entries
    pub build_env: Vec<String>,
    /// Directory the CLI runs in
    pub working_directory: PathBuf,
    /// Alias domains, may contain placeholders
    pub alias_domains: Vec<String>,
    /// Forward commit metadata
    pub github_deployment: bool,
    /// Forward only the first line of the commit message
    pub trim_commit_message: bool,
    /// Commit fields supplied by the caller
    pub commit: CommitInputs,
    /// Install the CLI with npm before deploying
    pub install_cli: bool,
    /// CLI version to install
    pub cli_version: Option<String>,
    /// CLI executable
    pub cli_program: String,
    /// API base URL for the status lookup
    pub api_url: String,
    /// Look up deployment metadata after deploying
    pub deployment_status: bool,
    /// Mirror CLI output to the log
    pub echo_output: bool,
    /// Step output file (`$GITHUB_OUTPUT`)
    pub output_file: Option<PathBuf>,
    /// Log level
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            token: String::new(),
            scope: None,
            org_id: None,
            project_id: None,
            production: false,
            prebuilt: false,
            force: false,
            debug: true,
            build_env: Vec::new(),
            working_directory: PathBuf::from("."),
            alias_domains: Vec::new(),
            github_deployment: true,
            trim_commit_message: false,
            commit: CommitInputs::default(),
            install_cli: false,
            cli_version: None,
            cli_program: DEFAULT_CLI.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            deployment_status: true,
            echo_output: true,
            output_file: None,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Checks the configuration before anything is spawned
    ///
    /// # Errors
    ///
    /// Returns `DeployError::Config` naming the first invalid input.
    pub fn validate(&self) -> Result<(), DeployError> {
        if self.token.trim().is_empty() {
            return Err(DeployError::Config("Vercel token is required".to_string()));
        }

        for entry in &self.build_env {
            match entry.split_once('=') {
                Some((key, _)) if !key.trim().is_empty() => {}
                _ => {
                    return Err(DeployError::Config(format!(
                        "build env entry '{entry}' must be KEY=value"
                    )));
                }
            }
        }

        if !self.working_directory.is_dir() {
            return Err(DeployError::Config(format!(
                "working directory {} does not exist",
                self.working_directory.display()
            )));
        }

        if self.cli_program.trim().is_empty() {
            return Err(DeployError::Config("CLI program cannot be empty".to_string()));
        }

        Ok(())
    }

    /// Resolves commit metadata, discovering author and message from git
    ///
    /// Returns `None` when metadata is disabled, when no repository/SHA is
    /// known, or when discovery fails.
    pub fn commit_metadata<R: Runner>(&self, runner: &R) -> Option<CommitMetadata> {
        if !self.github_deployment {
            return None;
        }

        let inputs = &self.commit;
        let (Some(repository), Some(sha)) = (&inputs.repository, &inputs.sha) else {
            tracing::debug!("No repository or commit SHA configured, skipping commit metadata");
            return None;
        };

        let (author_name, message) = match (&inputs.author_name, &inputs.message) {
            (Some(name), Some(message)) => (name.clone(), message.clone()),
            (name, message) => match git::head_commit(runner, &self.working_directory) {
                Ok(head) => (
                    name.clone().unwrap_or(head.author_name),
                    message.clone().unwrap_or(head.message),
                ),
                Err(e) => {
                    tracing::warn!(error = %e, "Could not read commit metadata, deploying without it");
                    return None;
                }
            },
        };

        let (org, repo) = repository
            .split_once('/')
            .map_or((repository.as_str(), ""), |(org, repo)| (org, repo));

        Some(CommitMetadata {
            author_name,
            author_login: inputs.author_login.clone().unwrap_or_default(),
            message,
            org: org.to_string(),
            repo: repo.to_string(),
            git_ref: inputs.git_ref.clone().unwrap_or_default(),
            sha: sha.clone(),
        })
    }

    /// Builds the deployment request
    #[must_use]
    pub fn deployment_request(&self, commit: Option<CommitMetadata>) -> DeploymentRequest {
        DeploymentRequest {
            token: self.token.clone(),
            program: self.cli_program.clone(),
            cwd: self.working_directory.clone(),
            mode: if self.production {
                DeployMode::Production
            } else {
                DeployMode::Preview
            },
            scope: self.scope.clone().filter(|s| !s.is_empty()),
            prebuilt: self.prebuilt,
            force: self.force,
            debug: self.debug,
            build_env: self.build_env.clone(),
            commit,
            trim_commit_message: self.trim_commit_message,
            org_id: self.org_id.clone().filter(|s| !s.is_empty()),
            project_id: self.project_id.clone().filter(|s| !s.is_empty()),
        }
    }

    /// Alias domains with placeholders expanded
    ///
    /// # Errors
    ///
    /// Returns `DeployError::Config` if a domain uses placeholders and no
    /// commit metadata is available to expand them.
    pub fn aliases(&self, commit: Option<&CommitMetadata>) -> Result<Vec<String>, DeployError> {
        self.alias_domains
            .iter()
            .map(|domain| domain.trim())
            .filter(|domain| !domain.is_empty())
            .map(|domain| match commit {
                None if has_placeholder(domain) => Err(DeployError::Config(format!(
                    "alias '{domain}' uses placeholders but no commit metadata is available \
                     (set GITHUB_REPOSITORY and GITHUB_SHA and enable GITHUB_DEPLOYMENT)"
                ))),
                _ => Ok(expand_alias(domain, commit)),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::{CommandInvocation, CommandResult};
    use std::time::Duration;

    struct GitStub(&'static str);

    impl Runner for GitStub {
        fn run(&self, invocation: &CommandInvocation) -> Result<CommandResult, DeployError> {
            assert_eq!(invocation.program, "git");
            Ok(CommandResult {
                code: 0,
                stdout: self.0.to_string(),
                stderr: String::new(),
                command: invocation.command_line(),
                cwd: invocation.cwd.clone(),
                duration: Duration::ZERO,
            })
        }
    }

    struct NoRunner;

    impl Runner for NoRunner {
        fn run(&self, invocation: &CommandInvocation) -> Result<CommandResult, DeployError> {
            panic!("unexpected invocation: {}", invocation.command_line());
        }
    }

    fn config() -> Config {
        Config {
            token: "tok".to_string(),
            working_directory: std::env::temp_dir(),
            commit: CommitInputs {
                repository: Some("acme/site".to_string()),
                git_ref: Some("refs/heads/main".to_string()),
                sha: Some("0123456789abcdef".to_string()),
                author_login: Some("jdoe".to_string()),
                ..CommitInputs::default()
            },
            ..Config::default()
        }
    }

    #[test]
    fn test_aliases_without_metadata() {
        let config = Config {
            alias_domains: vec!["www.example.com".to_string()],
            ..config()
        };
        assert_eq!(config.aliases(None).unwrap(), vec!["www.example.com".to_string()]);

        let config = Config {
            alias_domains: vec!["https://{BRANCH}.example.com".to_string()],
            ..self::config()
        };
        match config.aliases(None) {
            Err(DeployError::Config(message)) => assert!(message.contains("{BRANCH}")),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.cli_program, "vercel");
        assert_eq!(config.api_url, "https://api.vercel.com");
        assert_eq!(config.log_level, "info");
        assert!(config.debug);
    }

    #[test]
    fn test_serialized_config_omits_token() {
        let json = serde_json::to_string(&config()).unwrap();
        assert!(!json.contains("\"token\""));
        assert!(json.contains("\"cli_program\":\"vercel\""));
    }

    #[test]
    fn test_validate_requires_token() {
        let config = Config {
            token: "  ".to_string(),
            ..config()
        };
        assert!(matches!(config.validate(), Err(DeployError::Config(_))));
    }

    #[test]
    fn test_validate_build_env_format() {
        let mut config = config();
        config.build_env = vec!["NODE_ENV=production".to_string(), "EMPTY=".to_string()];
        assert!(config.validate().is_ok());

        config.build_env.push("=value".to_string());
        assert!(config.validate().is_err());

        config.build_env = vec!["NO_EQUALS".to_string()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_working_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = Config {
            working_directory: temp_dir.path().join("missing"),
            ..config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_commit_metadata_discovers_from_git() {
        let metadata = config()
            .commit_metadata(&GitStub("Jane Doe\0Fix header\n"))
            .unwrap();

        assert_eq!(metadata.author_name, "Jane Doe");
        assert_eq!(metadata.message, "Fix header");
        assert_eq!(metadata.author_login, "jdoe");
        assert_eq!(metadata.org, "acme");
        assert_eq!(metadata.repo, "site");
        assert_eq!(metadata.branch(), "main");
    }

    #[test]
    fn test_commit_metadata_skips_git_when_supplied() {
        let mut config = config();
        config.commit.author_name = Some("Jane Doe".to_string());
        config.commit.message = Some("Release".to_string());

        let metadata = config.commit_metadata(&NoRunner).unwrap();
        assert_eq!(metadata.message, "Release");
    }

    #[test]
    fn test_commit_metadata_disabled() {
        let config = Config {
            github_deployment: false,
            ..config()
        };
        assert!(config.commit_metadata(&NoRunner).is_none());
    }

    #[test]
    fn test_commit_metadata_git_failure_omits() {
        assert!(config().commit_metadata(&GitStub("garbage")).is_none());
    }

    #[test]
    fn test_deployment_request_mapping() {
        let config = Config {
            production: true,
            scope: Some(String::new()),
            org_id: Some("team_1".to_string()),
            build_env: vec!["A=1".to_string()],
            ..config()
        };

        let request = config.deployment_request(None);
        assert!(request.is_production());
        assert_eq!(request.scope, None);
        assert_eq!(request.org_id.as_deref(), Some("team_1"));
        assert_eq!(request.build_env, vec!["A=1".to_string()]);
    }

    #[test]
    fn test_aliases_expand_and_skip_blank() {
        let config = Config {
            alias_domains: vec![
                "https://{BRANCH}.example.com".to_string(),
                "  ".to_string(),
                "static.example.com".to_string(),
            ],
            ..config()
        };
        let commit = config.commit_metadata(&GitStub("Jane\0msg")).unwrap();

        assert_eq!(
            config.aliases(Some(&commit)).unwrap(),
            vec![
                "https://main.example.com".to_string(),
                "static.example.com".to_string(),
            ]
        );
    }
}
