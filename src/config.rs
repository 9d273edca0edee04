// This file is part of the product MiniArcade.
// SPDX-FileCopyrightText: 2026 MiniArcade Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum ConfigError {
    LoadError(String),
    ValidationError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::LoadError(msg) => write!(f, "Configuration load error: {}", msg),
            ConfigError::ValidationError(msg) => {
                write!(f, "Configuration validation error: {}", msg)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_workers")]
    pub workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: default_workers(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_workers() -> usize {
    4
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            description: String::new(),
        }
    }
}

fn default_app_name() -> String {
    "MiniArcade".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
        }
    }
}

fn default_database_url() -> String {
    "sqlite://miniarcade.db?mode=rwc".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct GithubConfig {
    pub client_id: String,
    pub client_secret: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_jwt_issuer")]
    pub issuer: String,
    #[serde(default = "default_jwt_audience")]
    pub audience: String,
    #[serde(default = "default_jwt_expiration_hours")]
    pub expiration_hours: u64,
    #[serde(default = "default_jwt_cookie_name")]
    pub cookie_name: String,
}

fn default_jwt_issuer() -> String {
    "miniarcade".to_string()
}

fn default_jwt_audience() -> String {
    "miniarcade".to_string()
}

fn default_jwt_expiration_hours() -> u64 {
    168
}

fn default_jwt_cookie_name() -> String {
    "miniarcade_auth".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AuthConfig {
    pub jwt: JwtConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct UploadConfig {
    #[serde(default = "default_upload_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_upload_public_base_url")]
    pub public_base_url: String,
    #[serde(default = "default_max_file_size_mb")]
    pub max_file_size_mb: u64,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: default_upload_dir(),
            public_base_url: default_upload_public_base_url(),
            max_file_size_mb: default_max_file_size_mb(),
        }
    }
}

fn default_upload_dir() -> PathBuf {
    PathBuf::from("screenshots")
}

fn default_upload_public_base_url() -> String {
    "/screenshots".to_string()
}

fn default_max_file_size_mb() -> u64 {
    5
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub app: AppConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    pub github: GithubConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub upload: UploadConfig,
}

/// Configuration that has passed startup validation. Handlers and
/// services only ever see this type.
#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    pub server: ServerConfig,
    pub app: AppConfig,
    pub logging: LoggingConfig,
    pub database: DatabaseConfig,
    pub github: GithubConfig,
    pub auth: AuthConfig,
    pub upload: UploadConfig,
}

impl Config {
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let config_path = root.join("config.yaml");
        let config_content = fs::read_to_string(&config_path).map_err(|e| {
            ConfigError::LoadError(format!(
                "Failed to read config file '{}': {}",
                config_path.display(),
                e
            ))
        })?;
        let config: Config = serde_yaml::from_str(&config_content).map_err(|e| {
            ConfigError::LoadError(format!(
                "Failed to parse config file '{}': {}",
                config_path.display(),
                e
            ))
        })?;
        Ok(config)
    }

    /// Loads and validates configuration at startup. If validation fails, the application should not start.
    pub fn load_and_validate(root: &Path) -> Result<ValidatedConfig, ConfigError> {
        let config = Self::load(root)?;
        config.validate()
    }

    pub fn validate(self) -> Result<ValidatedConfig, ConfigError> {
        Self::validate_logging(&self.logging)?;

        if self.github.client_id.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "GitHub client_id must not be empty".to_string(),
            ));
        }
        if self.github.client_secret.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "GitHub client_secret must not be empty".to_string(),
            ));
        }

        let jwt = &self.auth.jwt;
        if jwt.secret.len() < 16 {
            return Err(ConfigError::ValidationError(
                "JWT secret must be at least 16 characters".to_string(),
            ));
        }
        if jwt.expiration_hours < 1 {
            return Err(ConfigError::ValidationError(format!(
                "JWT expiration_hours must be at least 1, got: {}",
                jwt.expiration_hours
            )));
        }

        if self.upload.max_file_size_mb < 1 {
            return Err(ConfigError::ValidationError(format!(
                "Upload max_file_size_mb must be at least 1, got: {}",
                self.upload.max_file_size_mb
            )));
        }

        if self.server.workers < 1 {
            return Err(ConfigError::ValidationError(
                "Server workers must be at least 1".to_string(),
            ));
        }

        Ok(ValidatedConfig {
            server: self.server,
            app: self.app,
            logging: self.logging,
            database: self.database,
            github: self.github,
            auth: self.auth,
            upload: self.upload,
        })
    }

    fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
        match logging.level.as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => Ok(()),
            other => Err(ConfigError::ValidationError(format!(
                "Logging level must be one of error, warn, info, debug, trace; got: {}",
                other
            ))),
        }
    }
}

impl ValidatedConfig {
    /// True when the server only listens on a loopback address. Auth
    /// cookies drop the Secure flag in that case so plain-HTTP local
    /// setups still work.
    pub fn is_localhost(&self) -> bool {
        matches!(self.server.host.as_str(), "127.0.0.1" | "localhost" | "::1")
    }

    pub fn upload_max_bytes(&self) -> usize {
        (self.upload.max_file_size_mb as usize) * 1024 * 1024
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_config() -> Config {
        Config {
            server: ServerConfig::default(),
            app: AppConfig::default(),
            logging: LoggingConfig::default(),
            database: DatabaseConfig::default(),
            github: GithubConfig {
                client_id: "client".to_string(),
                client_secret: "secret".to_string(),
            },
            auth: AuthConfig {
                jwt: JwtConfig {
                    secret: "0123456789abcdef".to_string(),
                    issuer: default_jwt_issuer(),
                    audience: default_jwt_audience(),
                    expiration_hours: default_jwt_expiration_hours(),
                    cookie_name: default_jwt_cookie_name(),
                },
            },
            upload: UploadConfig::default(),
        }
    }

    #[test]
    fn minimal_yaml_fills_defaults() {
        let yaml = r#"
github:
  client_id: client
  client_secret: secret
auth:
  jwt:
    secret: 0123456789abcdef
"#;
        let config: Config = serde_yaml::from_str(yaml).expect("parse");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.upload.max_file_size_mb, 5);
        assert_eq!(config.auth.jwt.cookie_name, "miniarcade_auth");
        let validated = config.validate().expect("validate");
        assert!(validated.is_localhost());
        assert_eq!(validated.upload_max_bytes(), 5 * 1024 * 1024);
    }

    #[test]
    fn validate_rejects_short_jwt_secret() {
        let mut config = minimal_config();
        config.auth.jwt.secret = "short".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn validate_rejects_blank_github_credentials() {
        let mut config = minimal_config();
        config.github.client_id = "  ".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn validate_rejects_unknown_log_level() {
        let mut config = minimal_config();
        config.logging.level = "verbose".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn non_loopback_host_is_not_localhost() {
        let mut config = minimal_config();
        config.server.host = "0.0.0.0".to_string();
        let validated = config.validate().expect("validate");
        assert!(!validated.is_localhost());
    }
}
