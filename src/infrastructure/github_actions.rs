//! GitHub Actions integration
//!
//! Publishes step outputs through the `$GITHUB_OUTPUT` file and groups log
//! lines with workflow commands.

use crate::deploy::DeployError;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// Collected step outputs, written once at the end of a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionOutputs {
    entries: Vec<(String, String)>,
}

impl ActionOutputs {
    /// Creates an empty output set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an output, replacing an earlier value for the same name
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        tracing::info!(output = %name, value = %value, "Setting step output");
        match self.entries.iter_mut().find(|entry| entry.0 == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Value of an output, if set
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.0 == name)
            .map(|entry| entry.1.as_str())
    }

    /// Renders outputs in the `$GITHUB_OUTPUT` file format
    ///
    /// Multi-line values use the heredoc form with a delimiter that does not
    /// occur in the value.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (name, value) in &self.entries {
            if value.contains('\n') {
                let mut delimiter = String::from("ghadelimiter");
                while value.contains(&delimiter) {
                    delimiter.push('_');
                }
                out.push_str(&format!("{name}<<{delimiter}\n{value}\n{delimiter}\n"));
            } else {
                out.push_str(&format!("{name}={value}\n"));
            }
        }
        out
    }

    /// Appends outputs to `path`
    ///
    /// # Errors
    ///
    /// Returns `DeployError::Io` if the file cannot be written.
    pub fn write_to(&self, path: impl Into<PathBuf>) -> Result<(), DeployError> {
        let path = path.into();
        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
        file.write_all(self.render().as_bytes())?;
        Ok(())
    }
}

/// Log group that folds everything logged inside it in the Actions UI
pub struct LogGroup {
    enabled: bool,
}

impl LogGroup {
    /// Opens a group when running under GitHub Actions
    #[must_use]
    pub fn start(title: &str) -> Self {
        let enabled = std::env::var_os("GITHUB_ACTIONS").is_some();
        if enabled {
            println!("::group::{title}");
        }
        Self { enabled }
    }
}

impl Drop for LogGroup {
    fn drop(&mut self) {
        if self.enabled {
            println!("::endgroup::");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_single_line() {
        let mut outputs = ActionOutputs::new();
        outputs.set("deployment-url", "https://my-app.example.com");
        outputs.set("deployment-id", "dpl_1");

        assert_eq!(
            outputs.render(),
            "deployment-url=https://my-app.example.com\ndeployment-id=dpl_1\n"
        );
    }

    #[test]
    fn test_set_replaces_value() {
        let mut outputs = ActionOutputs::new();
        outputs.set("preview-url", "https://a.example.com");
        outputs.set("preview-url", "https://b.example.com");

        assert_eq!(outputs.get("preview-url"), Some("https://b.example.com"));
        assert_eq!(outputs.render().lines().count(), 1);
    }

    #[test]
    fn test_render_multiline_uses_heredoc() {
        let mut outputs = ActionOutputs::new();
        outputs.set("deployment-urls", "https://a.example.com\nhttps://b.example.com");

        assert_eq!(
            outputs.render(),
            "deployment-urls<<ghadelimiter\nhttps://a.example.com\nhttps://b.example.com\nghadelimiter\n"
        );
    }

    #[test]
    fn test_write_to_appends() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("output");
        std::fs::write(&path, "existing=1\n").unwrap();

        let mut outputs = ActionOutputs::new();
        outputs.set("deployment-url", "https://my-app.example.com");
        outputs.write_to(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "existing=1\ndeployment-url=https://my-app.example.com\n"
        );
    }
}
