use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::app::infrastructure::error::AppError;

/// Runtime configuration: where the suggestion service lives and which
/// hosts need simulated write-back.
///
/// Read-only. The assistant never writes this file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_scheme")]
    pub scheme: String,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Hostname substrings whose pages ignore direct text mutation
    #[serde(default = "default_restricted_hosts")]
    pub restricted_hosts: Vec<String>,

    /// Hostname substrings known to accept direct text mutation
    #[serde(default)]
    pub direct_hosts: Vec<String>,
}

fn default_scheme() -> String {
    "https".to_string()
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    5001
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_restricted_hosts() -> Vec<String> {
    vec!["facebook.com".to_string()]
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scheme: default_scheme(),
            host: default_host(),
            port: default_port(),
            timeout_secs: default_timeout_secs(),
            restricted_hosts: default_restricted_hosts(),
            direct_hosts: Vec::new(),
        }
    }
}

impl Settings {
    /// Base URL of the suggestion service, without a trailing slash.
    pub fn base_url(&self) -> String {
        format!("{}://{}:{}", self.scheme, self.host, self.port)
    }

    /// Load settings from the default location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_or_default(&Self::get_config_path())
    }

    /// Load settings from `path`. A missing or malformed file yields defaults.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load_from(path) {
            Ok(settings) => settings,
            Err(AppError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(e) => {
                tracing::warn!("Failed to load settings from {}: {}. Using defaults.", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load and validate settings from `path`.
    pub fn load_from(path: &Path) -> Result<Self, AppError> {
        let contents = fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&contents)?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), AppError> {
        if self.scheme != "https" && self.scheme != "http" {
            return Err(AppError::Settings(format!("unsupported scheme '{}'", self.scheme)));
        }
        if self.host.trim().is_empty() {
            return Err(AppError::Settings("empty service host".to_string()));
        }
        if self.port == 0 {
            return Err(AppError::Settings("port must be non-zero".to_string()));
        }
        Ok(())
    }

    /// Get config file path (cross-platform)
    pub fn get_config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("corrigo");
        path.push("settings.json");
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.port, 5001);
        assert_eq!(settings.scheme, "https");
        assert_eq!(settings.host, "localhost");
        assert_eq!(settings.timeout_secs, 10);
        assert_eq!(settings.restricted_hosts, vec!["facebook.com".to_string()]);
        assert!(settings.direct_hosts.is_empty());
    }

    #[test]
    fn test_base_url() {
        assert_eq!(Settings::default().base_url(), "https://localhost:5001");

        let settings = Settings {
            scheme: "http".to_string(),
            host: "10.0.0.7".to_string(),
            port: 8443,
            ..Default::default()
        };
        assert_eq!(settings.base_url(), "http://10.0.0.7:8443");
    }

    #[test]
    fn test_partial_config() {
        let json = r#"{"port": 6000}"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.port, 6000);
        assert_eq!(settings.host, "localhost");
        assert_eq!(settings.restricted_hosts, vec!["facebook.com".to_string()]);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"host": "spell.example.org", "restricted_hosts": ["facebook.com", "messenger.com"]}}"#
        )
        .unwrap();

        let settings = Settings::load_from(file.path()).unwrap();
        assert_eq!(settings.host, "spell.example.org");
        assert_eq!(settings.restricted_hosts.len(), 2);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_or_default(&dir.path().join("absent.json"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_malformed_file_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "port = 5001").unwrap();

        assert!(matches!(Settings::load_from(file.path()), Err(AppError::Json(_))));
        assert_eq!(Settings::load_or_default(file.path()), Settings::default());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"scheme": "ftp"}}"#).unwrap();
        assert!(matches!(Settings::load_from(file.path()), Err(AppError::Settings(_))));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"port": 0}}"#).unwrap();
        assert!(matches!(Settings::load_from(file.path()), Err(AppError::Settings(_))));
    }
}
