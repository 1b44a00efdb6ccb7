//! Configuration handling.
//!
//! Two documents feed a run: the optional `.timereport.toml` settings file
//! (tool behavior: fetch timeout, concurrency, project file location) and
//! the project info document `project_info.json` (the project name and the
//! member list with report URLs).

use crate::error::ReportError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root settings structure (`.timereport.toml`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Fetch settings.
    #[serde(default)]
    pub fetch: FetchConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Default project info document path.
    #[serde(default = "default_project_file")]
    pub project_file: String,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,

    /// Number of concurrent report fetches.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            project_file: default_project_file(),
            verbose: false,
            concurrency: default_concurrency(),
        }
    }
}

fn default_project_file() -> String {
    "project_info.json".to_string()
}

fn default_concurrency() -> usize {
    4
}

/// HTTP fetch settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// User agent sent with report page requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("timereport/{}", env!("CARGO_PKG_VERSION"))
}

impl Config {
    /// Load settings from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load settings from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but
    /// can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(".timereport.toml");

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence; optional settings only override when
    /// explicitly provided.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(timeout) = args.timeout {
            self.fetch.timeout_seconds = timeout;
        }
        if let Some(concurrency) = args.concurrency {
            self.general.concurrency = concurrency;
        }
        if let Some(ref project) = args.project {
            self.general.project_file = project.display().to_string();
        }
        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

/// The project info document: project name plus tracked members.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectInfo {
    /// Project display name.
    #[serde(rename = "projectName")]
    pub project_name: String,

    /// Members whose reports are aggregated.
    pub members: Vec<MemberInfo>,
}

/// One tracked member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberInfo {
    /// Member display name.
    #[serde(rename = "memberName")]
    pub member_name: String,

    /// URL of the member's report page.
    #[serde(rename = "reportURL")]
    pub report_url: String,
}

impl ProjectInfo {
    /// Load the project info document.
    ///
    /// Shape violations (missing `projectName`, a member without `reportURL`)
    /// surface as [`ReportError::ConfigSchema`] naming the missing key.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read project file: {}", path.display()))?;

        let info: ProjectInfo = serde_json::from_str(&content)
            .map_err(|e| ReportError::ConfigSchema(e.to_string()))
            .with_context(|| format!("Invalid project file: {}", path.display()))?;

        Ok(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.general.project_file, "project_info.json");
        assert_eq!(config.general.concurrency, 4);
        assert_eq!(config.fetch.timeout_seconds, 30);
        assert!(config.fetch.user_agent.starts_with("timereport/"));
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[general]
project_file = "team.json"
verbose = true

[fetch]
timeout_seconds = 10
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.general.project_file, "team.json");
        assert!(config.general.verbose);
        assert_eq!(config.general.concurrency, 4);
        assert_eq!(config.fetch.timeout_seconds, 10);
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(!toml_str.is_empty());
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[fetch]"));
    }

    #[test]
    fn test_parse_project_info() {
        let json = r#"{
            "projectName": "skynet",
            "members": [
                {"memberName": "alice", "reportURL": "http://example.org/alice.html"},
                {"memberName": "bob", "reportURL": "http://example.org/bob.html"}
            ]
        }"#;

        let info: ProjectInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.project_name, "skynet");
        assert_eq!(info.members.len(), 2);
        assert_eq!(info.members[0].member_name, "alice");
        assert_eq!(info.members[1].report_url, "http://example.org/bob.html");
    }

    #[test]
    fn test_project_info_missing_key_names_the_key() {
        let json = r#"{
            "projectName": "skynet",
            "members": [{"memberName": "alice"}]
        }"#;

        let err = serde_json::from_str::<ProjectInfo>(json).unwrap_err();
        assert!(err.to_string().contains("reportURL"));
    }

    #[test]
    fn test_project_info_missing_name_names_the_key() {
        let json = r#"{"members": []}"#;

        let err = serde_json::from_str::<ProjectInfo>(json).unwrap_err();
        assert!(err.to_string().contains("projectName"));
    }
}
