//! Deployment request model and CLI argument construction

use std::path::PathBuf;

/// Default name of the deployment CLI executable
pub const DEFAULT_CLI: &str = "vercel";

/// Deployment target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeployMode {
    /// Preview deployment (default)
    #[default]
    Preview,
    /// Production deployment, passes `--prod`
    Production,
}

/// Source-control metadata forwarded to the provider with `--meta`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommitMetadata {
    /// Commit author display name
    pub author_name: String,
    /// Commit author account login
    pub author_login: String,
    /// Full commit message
    pub message: String,
    /// Repository owner
    pub org: String,
    /// Repository name
    pub repo: String,
    /// Git ref, e.g. `refs/heads/main`
    pub git_ref: String,
    /// Commit SHA
    pub sha: String,
}

impl CommitMetadata {
    /// Branch or tag name without the `refs/heads/` / `refs/tags/` prefix
    #[must_use]
    pub fn branch(&self) -> &str {
        self.git_ref
            .strip_prefix("refs/heads/")
            .or_else(|| self.git_ref.strip_prefix("refs/tags/"))
            .unwrap_or(&self.git_ref)
    }

    /// `key=value` items passed after each `--meta` flag
    #[must_use]
    pub fn meta_items(&self, trim_message: bool) -> Vec<String> {
        let message = if trim_message {
            self.message.lines().next().unwrap_or_default()
        } else {
            self.message.as_str()
        };

        vec![
            format!("githubCommitAuthorName={}", self.author_name),
            format!("githubCommitAuthorLogin={}", self.author_login),
            format!("githubCommitMessage={message}"),
            format!("githubCommitOrg={}", self.org),
            format!("githubCommitRepo={}", self.repo),
            format!("githubCommitRef={}", self.branch()),
            format!("githubCommitSha={}", self.sha),
            format!("githubOrg={}", self.org),
            format!("githubRepo={}", self.repo),
            "githubDeployment=1".to_string(),
        ]
    }
}

/// Everything needed to run one deploy
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct DeploymentRequest {
    /// API token, passed as `--token=`
    pub token: String,

    /// Deployment CLI executable
    pub program: String,

    /// Directory the CLI runs in
    pub cwd: PathBuf,

    /// Preview or production
    pub mode: DeployMode,

    /// Team scope
    pub scope: Option<String>,

    /// Deploy a prebuilt output directory
    pub prebuilt: bool,

    /// Force a new deployment even if nothing changed
    pub force: bool,

    /// Pass `--debug` to the CLI
    pub debug: bool,

    /// `KEY=value` entries passed with `--build-env`
    pub build_env: Vec<String>,

    /// Commit metadata, omitted when `None`
    pub commit: Option<CommitMetadata>,

    /// Forward only the first line of the commit message
    pub trim_commit_message: bool,

    /// Organization id exported to the CLI as `VERCEL_ORG_ID`
    pub org_id: Option<String>,

    /// Project id exported to the CLI as `VERCEL_PROJECT_ID`
    pub project_id: Option<String>,
}

impl DeploymentRequest {
    /// Creates a preview request with defaults
    #[must_use]
    pub fn new(token: impl Into<String>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            token: token.into(),
            program: DEFAULT_CLI.to_string(),
            cwd: cwd.into(),
            mode: DeployMode::Preview,
            scope: None,
            prebuilt: false,
            force: false,
            debug: true,
            build_env: Vec::new(),
            commit: None,
            trim_commit_message: false,
            org_id: None,
            project_id: None,
        }
    }

    /// Sets the deploy target
    #[must_use]
    pub fn with_mode(mut self, mode: DeployMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the team scope
    #[must_use]
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Adds a build environment entry
    #[must_use]
    pub fn with_build_env(mut self, entry: impl Into<String>) -> Self {
        self.build_env.push(entry.into());
        self
    }

    /// Attaches commit metadata
    #[must_use]
    pub fn with_commit(mut self, commit: CommitMetadata) -> Self {
        self.commit = Some(commit);
        self
    }

    /// Returns true for production deploys
    #[must_use]
    pub fn is_production(&self) -> bool {
        self.mode == DeployMode::Production
    }

    /// Token argument shared by every CLI call
    #[must_use]
    pub fn token_argument(&self) -> String {
        format!("--token={}", self.token)
    }

    /// Scope argument, if a scope is configured
    #[must_use]
    pub fn scope_argument(&self) -> Option<String> {
        self.scope.as_ref().map(|scope| format!("--scope={scope}"))
    }

    /// Builds the deploy argument list
    #[must_use]
    pub fn deploy_arguments(&self) -> Vec<String> {
        let mut args = vec![self.token_argument()];

        if self.debug {
            args.push("--debug".to_string());
        }

        args.extend(self.scope_argument());

        if self.is_production() {
            args.push("--prod".to_string());
        }

        if self.prebuilt {
            args.push("--prebuilt".to_string());
        }

        if self.force {
            args.push("--force".to_string());
        }

        if let Some(commit) = &self.commit {
            for item in commit.meta_items(self.trim_commit_message) {
                args.push("--meta".to_string());
                args.push(item);
            }
        }

        for entry in &self.build_env {
            args.push("--build-env".to_string());
            args.push(entry.clone());
        }

        args
    }

    /// Builds the `alias set` argument list
    #[must_use]
    pub fn alias_arguments(&self, deployment_url: &str, bare_alias: &str) -> Vec<String> {
        let mut args = vec![
            self.token_argument(),
            "alias".to_string(),
            "set".to_string(),
            deployment_url.to_string(),
            bare_alias.to_string(),
        ];
        args.extend(self.scope_argument());
        args
    }

    /// Environment block for CLI invocations
    #[must_use]
    pub fn cli_env(&self) -> Vec<(&'static str, String)> {
        let mut env = Vec::new();
        if let Some(org_id) = &self.org_id {
            env.push(("VERCEL_ORG_ID", org_id.clone()));
        }
        if let Some(project_id) = &self.project_id {
            env.push(("VERCEL_PROJECT_ID", project_id.clone()));
        }
        env
    }
}
