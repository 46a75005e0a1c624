//! URL extraction and alias handling

use super::errors::DeployError;
use super::request::CommitMetadata;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static DEPLOYMENT_URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://(.*)").unwrap());

static SCHEME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:[A-Za-z][A-Za-z0-9+.\-]*:)?//").unwrap());

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{([A-Z_]+)\}").unwrap());

/// Extracts the deployment URL from CLI output
///
/// Returns the text following the first `http://` or `https://` up to the
/// end of that line.
///
/// # Errors
///
/// Returns `DeployError::UrlNotFound` if no URL is present.
///
/// # Example
///
/// ```rust
/// use vercel_deploy::parse_deployment_url;
///
/// let url = parse_deployment_url("Deployed to https://my-app.example.com\n").unwrap();
/// assert_eq!(url, "my-app.example.com");
/// ```
pub fn parse_deployment_url(stdout: &str) -> Result<String, DeployError> {
    DEPLOYMENT_URL
        .captures(stdout)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim_end())
        .filter(|url| !url.is_empty())
        .map(str::to_string)
        .ok_or_else(|| DeployError::UrlNotFound {
            stdout: stdout.to_string(),
        })
}

/// Strips a leading `scheme://` (or protocol-relative `//`) from a URL
#[must_use]
pub fn remove_scheme(url: &str) -> &str {
    SCHEME.find(url).map_or(url, |m| &url[m.end()..])
}

/// Lowercases and replaces every non-alphanumeric run with `-`
#[must_use]
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    for c in value.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_matches('-').to_string()
}

/// Whether `template` contains a `{NAME}` placeholder
#[must_use]
pub fn has_placeholder(template: &str) -> bool {
    PLACEHOLDER.is_match(template)
}

/// Expands `{BRANCH}`, `{SHA}`, `{USER}` and `{REPO}` in an alias domain
///
/// Unknown placeholders are left unchanged.
#[must_use]
pub fn expand_alias(template: &str, commit: Option<&CommitMetadata>) -> String {
    let Some(commit) = commit else {
        return template.to_string();
    };

    let vars: HashMap<&str, String> = HashMap::from([
        ("BRANCH", slugify(commit.branch())),
        ("SHA", commit.sha.chars().take(7).collect()),
        ("USER", slugify(&commit.org)),
        ("REPO", slugify(&commit.repo)),
    ]);

    PLACEHOLDER
        .replace_all(template, |caps: &regex::Captures| {
            let name = caps.get(1).map_or("", |m| m.as_str());
            vars.get(name).cloned().unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}
