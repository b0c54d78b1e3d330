// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Handles environment variables, deployment modes, and runtime configuration parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrolens Contributors

//! Environment-based configuration management for production deployment

use anyhow::{Context, Result};
use macrolens_core::constants::recognition::DEFAULT_CLASSIFIER_TIMEOUT_SECS;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

/// Default HTTP port
pub const DEFAULT_HTTP_PORT: u16 = 8000;
/// Default bind address
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Default allowed CORS origins (web dev server and Expo clients)
pub const DEFAULT_CORS_ORIGINS: &str =
    "http://localhost:3000,http://localhost:8081,http://localhost:19006,exp://localhost:8081";
/// Default upload limit (10 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
/// Default hosted food classification model
pub const DEFAULT_CLASSIFIER_URL: &str =
    "https://api-inference.huggingface.co/models/nutritious/food-classification";

/// Environment type for security and other configurations
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// How the image is sent to the classifier
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ClassifierTransport {
    /// Raw bytes as `application/octet-stream`
    #[default]
    Raw,
    /// `{"inputs": "<base64>"}` JSON body
    Base64Json,
}

impl FromStr for ClassifierTransport {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "raw" | "bytes" => Ok(Self::Raw),
            "base64-json" | "base64_json" | "base64" | "json" => Ok(Self::Base64Json),
            other => Err(anyhow::anyhow!(
                "Unknown classifier transport '{other}' (expected raw or base64-json)"
            )),
        }
    }
}

impl fmt::Display for ClassifierTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raw => write!(f, "raw"),
            Self::Base64Json => write!(f, "base64-json"),
        }
    }
}

/// Cross-origin settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Allowed origins, or `["*"]` for any
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: parse_origins(DEFAULT_CORS_ORIGINS),
        }
    }
}

/// Food image classifier settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Inference endpoint
    pub api_url: String,
    /// Optional bearer token
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Request timeout
    pub timeout: Duration,
    /// Body encoding
    pub transport: ClassifierTransport,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_CLASSIFIER_URL.to_owned(),
            api_key: None,
            timeout: Duration::from_secs(DEFAULT_CLASSIFIER_TIMEOUT_SECS),
            transport: ClassifierTransport::Raw,
        }
    }
}

/// Managed backend (auth service and table store) settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Backend base URL
    pub url: Option<String>,
    /// Service key for the auth and REST APIs
    #[serde(skip_serializing)]
    pub service_key: Option<String>,
}

impl BackendConfig {
    /// URL and key, when both are configured
    #[must_use]
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.url.as_deref(), self.service_key.as_deref()) {
            (Some(url), Some(key)) if !url.is_empty() && !key.is_empty() => Some((url, key)),
            _ => None,
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP port
    pub http_port: u16,
    /// Bind address
    pub host: String,
    /// Deployment environment
    pub environment: Environment,
    /// CORS settings
    pub cors: CorsConfig,
    /// Largest accepted request body in bytes
    pub max_upload_bytes: usize,
    /// Classifier settings
    pub classifier: ClassifierConfig,
    /// Managed backend settings
    pub backend: BackendConfig,
    /// Optional JSON reference food table replacing the built-in one
    pub food_table_path: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: DEFAULT_HTTP_PORT,
            host: DEFAULT_HOST.to_owned(),
            environment: Environment::Development,
            cors: CorsConfig::default(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            classifier: ClassifierConfig::default(),
            backend: BackendConfig::default(),
            food_table_path: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an unparseable value or the
    /// resulting configuration is invalid
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let config = Self {
            http_port: env_var_or("HTTP_PORT", &DEFAULT_HTTP_PORT.to_string())
                .parse()
                .context("Invalid HTTP_PORT value")?,
            host: env_var_or("HOST", DEFAULT_HOST),
            environment: Environment::from_str_or_default(&env_var_or("ENVIRONMENT", "development")),
            cors: CorsConfig {
                allowed_origins: parse_origins(&env_var_or("CORS_ORIGINS", DEFAULT_CORS_ORIGINS)),
            },
            max_upload_bytes: env_var_or("MAX_UPLOAD_BYTES", &DEFAULT_MAX_UPLOAD_BYTES.to_string())
                .parse()
                .context("Invalid MAX_UPLOAD_BYTES value")?,
            classifier: ClassifierConfig {
                api_url: env_var_or("CLASSIFIER_API_URL", DEFAULT_CLASSIFIER_URL),
                api_key: non_empty_var("CLASSIFIER_API_KEY"),
                timeout: Duration::from_secs(
                    env_var_or(
                        "CLASSIFIER_TIMEOUT_SECS",
                        &DEFAULT_CLASSIFIER_TIMEOUT_SECS.to_string(),
                    )
                    .parse()
                    .context("Invalid CLASSIFIER_TIMEOUT_SECS value")?,
                ),
                transport: env_var_or("CLASSIFIER_TRANSPORT", "raw")
                    .parse()
                    .context("Invalid CLASSIFIER_TRANSPORT value")?,
            },
            backend: BackendConfig {
                url: non_empty_var("BACKEND_URL"),
                service_key: non_empty_var("BACKEND_SERVICE_KEY"),
            },
            food_table_path: non_empty_var("FOOD_TABLE_PATH").map(PathBuf::from),
        };

        config.validate()?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error for a zero timeout, a zero upload limit or an empty
    /// classifier URL
    pub fn validate(&self) -> Result<()> {
        if self.classifier.timeout.is_zero() {
            return Err(anyhow::anyhow!("CLASSIFIER_TIMEOUT_SECS must be positive"));
        }
        if self.max_upload_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_UPLOAD_BYTES must be positive"));
        }
        if self.classifier.api_url.trim().is_empty() {
            return Err(anyhow::anyhow!("CLASSIFIER_API_URL must not be empty"));
        }

        if self.backend.url.is_some() != self.backend.service_key.is_some() {
            warn!("BACKEND_URL and BACKEND_SERVICE_KEY must both be set to use the managed backend");
        }
        if self.environment.is_production() && self.backend.credentials().is_none() {
            warn!("Production environment without a managed backend: data will not persist");
        }
        if self.classifier.api_key.is_none() {
            warn!("CLASSIFIER_API_KEY not set: classifier requests are unauthenticated");
        }

        Ok(())
    }

    /// Get a summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Macrolens Server Configuration:\n\
             - Environment: {}\n\
             - Listen: {}:{}\n\
             - CORS Origins: {}\n\
             - Max Upload: {} bytes\n\
             - Classifier: {} ({}, timeout {}s, {})\n\
             - Backend: {}\n\
             - Food Table: {}",
            self.environment,
            self.host,
            self.http_port,
            self.cors.allowed_origins.join(", "),
            self.max_upload_bytes,
            self.classifier.api_url,
            self.classifier.transport,
            self.classifier.timeout.as_secs(),
            if self.classifier.api_key.is_some() {
                "authenticated"
            } else {
                "anonymous"
            },
            self.backend
                .credentials()
                .map_or("in-memory", |(url, _)| url),
            self.food_table_path
                .as_ref()
                .map_or_else(|| "built-in".to_owned(), |path| path.display().to_string()),
        )
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Environment variable, treating blank values as unset
fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

/// Parse comma-separated CORS origins
fn parse_origins(origins_str: &str) -> Vec<String> {
    if origins_str.trim() == "*" {
        vec!["*".to_owned()]
    } else {
        origins_str
            .split(',')
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins() {
        assert_eq!(
            parse_origins("http://a.test, http://b.test ,,"),
            vec!["http://a.test", "http://b.test"]
        );
        assert_eq!(parse_origins(" * "), vec!["*"]);
    }

    #[test]
    fn test_default_origins_include_expo() {
        let cors = CorsConfig::default();
        assert_eq!(cors.allowed_origins.len(), 4);
        assert!(cors
            .allowed_origins
            .contains(&"exp://localhost:8081".to_owned()));
    }

    #[test]
    fn test_transport_parsing() {
        assert_eq!("RAW".parse::<ClassifierTransport>().ok(), Some(ClassifierTransport::Raw));
        assert_eq!(
            "base64-json".parse::<ClassifierTransport>().ok(),
            Some(ClassifierTransport::Base64Json)
        );
        assert!("carrier-pigeon".parse::<ClassifierTransport>().is_err());
    }

    #[test]
    fn test_backend_credentials_need_both_values() {
        let mut backend = BackendConfig::default();
        assert!(backend.credentials().is_none());
        backend.url = Some("https://backend.example".to_owned());
        assert!(backend.credentials().is_none());
        backend.service_key = Some("key".to_owned());
        assert_eq!(
            backend.credentials(),
            Some(("https://backend.example", "key"))
        );
    }

    #[test]
    fn test_summary_hides_secrets() {
        let mut config = ServerConfig::default();
        config.classifier.api_key = Some("hf_secret".to_owned());
        config.backend.service_key = Some("service_secret".to_owned());
        config.backend.url = Some("https://backend.example".to_owned());

        let summary = config.summary();
        assert!(!summary.contains("hf_secret"));
        assert!(!summary.contains("service_secret"));
        assert!(summary.contains("https://backend.example"));
        assert!(config.validate().is_ok());
    }
}
