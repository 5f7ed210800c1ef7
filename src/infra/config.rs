//! Configuration for the gatekeeper client and service
//!
//! Server config file is selected via:
//! 1. --config <path> command line argument
//! 2. CONFIG_FILE environment variable
//! 3. Default: config/gatekeeper.toml

use anyhow::Context;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;

/// Client-side configuration for `GateKeeperClient`.
///
/// Not validated at construction; a malformed `base_url` surfaces as an
/// error on the first call.
#[derive(Debug, Clone)]
pub struct Configuration {
    /// Base URL of the gatekeeper service. Only scheme, host and port are
    /// used; any path or query is replaced when a request is built.
    pub base_url: String,
    /// Per-request deadline in milliseconds.
    pub timeout_ms: u64,
    /// Opaque bearer credential sent in the `Authorization` header.
    pub token: String,
}

#[derive(Debug, Deserialize)]
struct TomlConfig {
    token: String,
    #[serde(default)]
    allowed_mails: Vec<String>,
    #[serde(default)]
    allowed_domains: Vec<String>,
}

/// Server-side configuration backing the allowance service.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    token: String,
    allowed_mails: Vec<String>,
    allowed_domains: Vec<String>,
    config_file: String,
}

impl ServerConfig {
    /// Build a config directly, normalizing allow-lists to lowercase.
    pub fn new(token: &str, allowed_mails: &[&str], allowed_domains: &[&str]) -> Self {
        Self {
            token: token.to_string(),
            allowed_mails: allowed_mails.iter().map(|m| m.to_lowercase()).collect(),
            allowed_domains: allowed_domains.iter().map(|d| d.to_lowercase()).collect(),
            config_file: "inline".to_string(),
        }
    }

    /// Determine config file path from CLI value or environment
    pub fn resolve_config_path(cli_path: Option<&str>) -> String {
        if let Some(path) = cli_path {
            return path.to_string();
        }

        if let Ok(path) = env::var("CONFIG_FILE") {
            return path;
        }

        "config/gatekeeper.toml".to_string()
    }

    /// Load configuration from a TOML file
    ///
    /// A missing or unparseable file is a hard error: falling back to an
    /// empty token would turn every well-formed request into a denial.
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let toml_config: TomlConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        // Allow-list matching is case-insensitive; normalize once at load
        Ok(Self {
            token: toml_config.token,
            allowed_mails: toml_config.allowed_mails.iter().map(|m| m.to_lowercase()).collect(),
            allowed_domains: toml_config.allowed_domains.iter().map(|d| d.to_lowercase()).collect(),
            config_file: path.display().to_string(),
        })
    }

    // Getters for all config fields
    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn allowed_mails(&self) -> &[String] {
        &self.allowed_mails
    }

    pub fn allowed_domains(&self) -> &[String] {
        &self.allowed_domains
    }

    pub fn config_file(&self) -> &str {
        &self.config_file
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn from_file_reads_and_normalizes_toml() {
        let toml_content = r#"
token = "SUPER_TOKEN"
allowed_mails = ["User@One.Org"]
allowed_domains = ["ExAmPlE.com", "API.Service.IO"]
"#;

        let mut tmp = NamedTempFile::new().unwrap();
        write!(tmp, "{toml_content}").unwrap();
        tmp.flush().unwrap();

        let config = ServerConfig::from_file(tmp.path()).unwrap();
        assert_eq!(config.token(), "SUPER_TOKEN");
        assert_eq!(config.allowed_mails(), ["user@one.org"]);
        assert_eq!(config.allowed_domains(), ["example.com", "api.service.io"]);
    }

    #[test]
    fn from_file_applies_defaults_for_missing_lists() {
        let mut tmp = NamedTempFile::new().unwrap();
        write!(tmp, "token = \"t123\"").unwrap();
        tmp.flush().unwrap();

        let config = ServerConfig::from_file(tmp.path()).unwrap();
        assert_eq!(config.token(), "t123");
        assert!(config.allowed_mails().is_empty());
        assert!(config.allowed_domains().is_empty());
    }

    #[test]
    fn from_file_errors_on_missing_file() {
        let err = ServerConfig::from_file("/path/does/not/exist.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn from_file_errors_on_missing_token() {
        let mut tmp = NamedTempFile::new().unwrap();
        write!(tmp, "allowed_domains = [\"example.com\"]").unwrap();
        tmp.flush().unwrap();

        let err = ServerConfig::from_file(tmp.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn resolve_config_path_prefers_cli_value() {
        let path = ServerConfig::resolve_config_path(Some("custom.toml"));
        assert_eq!(path, "custom.toml");
    }

    #[test]
    fn new_normalizes_allow_lists() {
        let config = ServerConfig::new("secret", &["User@Example.COM"], &["EXAMPLE.com"]);
        assert_eq!(config.allowed_mails(), ["user@example.com"]);
        assert_eq!(config.allowed_domains(), ["example.com"]);
    }
}
