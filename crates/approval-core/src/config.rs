use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// TrackerConfig
// ---------------------------------------------------------------------------

/// Where the tracker lives and which teams vote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// REST API root.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Web root used for member profile links in the status comment.
    #[serde(default = "default_web_url")]
    pub web_url: String,
    #[serde(default = "default_core_team")]
    pub core_team: String,
    #[serde(default = "default_maintainer_team")]
    pub maintainer_team: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_web_url() -> String {
    "https://github.com".to_string()
}

fn default_core_team() -> String {
    "core".to_string()
}

fn default_maintainer_team() -> String {
    "maintainers".to_string()
}

fn default_user_agent() -> String {
    "governance-approval".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            web_url: default_web_url(),
            core_team: default_core_team(),
            maintainer_team: default_maintainer_team(),
            user_agent: default_user_agent(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl TrackerConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let cfg: TrackerConfig = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        let teams = [
            ("core_team", &self.core_team),
            ("maintainer_team", &self.maintainer_team),
        ];
        for (field, value) in teams {
            if value.trim().is_empty() {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!("{field} is empty"),
                });
            }
        }

        if self.core_team == self.maintainer_team {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "core_team and maintainer_team are both '{}': every voter will count as core",
                    self.core_team
                ),
            });
        }

        for (field, value) in [("api_url", &self.api_url), ("web_url", &self.web_url)] {
            if !value.starts_with("http://") && !value.starts_with("https://") {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!("{field} '{value}' is not an http(s) URL"),
                });
            }
        }

        if self.timeout_seconds == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "timeout_seconds is 0: requests will fail immediately".to_string(),
            });
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_point_at_github() {
        let cfg = TrackerConfig::default();
        assert_eq!(cfg.api_url, "https://api.github.com");
        assert_eq!(cfg.web_url, "https://github.com");
        assert_eq!(cfg.core_team, "core");
        assert_eq!(cfg.maintainer_team, "maintainers");
        assert!(cfg.validate().is_empty());
    }

    #[test]
    fn load_fills_missing_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("approval.yaml");
        std::fs::write(&path, "web_url: https://ghe.example\ncore_team: steering\n").unwrap();

        let cfg = TrackerConfig::load(&path).unwrap();
        assert_eq!(cfg.web_url, "https://ghe.example");
        assert_eq!(cfg.core_team, "steering");
        assert_eq!(cfg.maintainer_team, "maintainers");
        assert_eq!(cfg.timeout_seconds, 30);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = TrackerConfig::load(&dir.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(err, crate::ApprovalError::Io(_)));
    }

    #[test]
    fn validate_flags_problems() {
        let cfg = TrackerConfig {
            api_url: "api.github.com".to_string(),
            core_team: "core".to_string(),
            maintainer_team: "core".to_string(),
            timeout_seconds: 0,
            ..TrackerConfig::default()
        };
        let warnings = cfg.validate();
        assert!(warnings
            .iter()
            .any(|w| w.level == WarnLevel::Error && w.message.contains("api_url")));
        assert!(warnings.iter().any(|w| w.message.contains("both 'core'")));
        assert!(warnings.iter().any(|w| w.message.contains("timeout_seconds")));
    }

    #[test]
    fn validate_empty_team() {
        let cfg = TrackerConfig {
            maintainer_team: " ".to_string(),
            ..TrackerConfig::default()
        };
        assert!(cfg
            .validate()
            .iter()
            .any(|w| w.message == "maintainer_team is empty"));
    }
}
