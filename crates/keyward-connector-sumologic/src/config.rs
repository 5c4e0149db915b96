//! Configuration for the Sumo Logic connector.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::{SumoLogicError, SumoLogicResult};

/// Default API base URL (US1 deployment).
pub const DEFAULT_API_BASE_URL: &str = "https://api.sumologic.com";

/// Sumo Logic deployment regions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SumoLogicDeployment {
    Au,
    Ca,
    De,
    Eu,
    Fed,
    In,
    Jp,
    Kr,
    #[default]
    Us1,
    Us2,
}

impl SumoLogicDeployment {
    /// API base URL of the deployment.
    #[must_use]
    pub fn api_base_url(&self) -> &'static str {
        match self {
            Self::Au => "https://api.au.sumologic.com",
            Self::Ca => "https://api.ca.sumologic.com",
            Self::De => "https://api.de.sumologic.com",
            Self::Eu => "https://api.eu.sumologic.com",
            Self::Fed => "https://api.fed.sumologic.com",
            Self::In => "https://api.in.sumologic.com",
            Self::Jp => "https://api.jp.sumologic.com",
            Self::Kr => "https://api.kr.sumologic.com",
            Self::Us1 => DEFAULT_API_BASE_URL,
            Self::Us2 => "https://api.us2.sumologic.com",
        }
    }
}

/// Access ID / access key pair used for basic authentication.
#[derive(Debug)]
pub struct SumoLogicCredentials {
    pub access_id: String,
    pub access_key: SecretString,
}

impl SumoLogicCredentials {
    pub fn new(access_id: impl Into<String>, access_key: impl Into<String>) -> Self {
        Self {
            access_id: access_id.into(),
            access_key: SecretString::from(access_key.into()),
        }
    }

    /// Validates that both halves of the pair are present.
    ///
    /// # Errors
    ///
    /// Returns an error if the access ID or access key is empty.
    pub fn validate(&self) -> SumoLogicResult<()> {
        if self.access_id.trim().is_empty() {
            return Err(SumoLogicError::Config("api access id is required".into()));
        }
        if self.access_key.expose_secret().trim().is_empty() {
            return Err(SumoLogicError::Config("api access key is required".into()));
        }
        Ok(())
    }
}

/// Connector settings (non-secret).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SumoLogicConfig {
    /// API base URL, e.g. `https://api.eu.sumologic.com`.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Whether service accounts are synced alongside human users.
    #[serde(default = "default_include_service_accounts")]
    pub include_service_accounts: bool,

    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_include_service_accounts() -> bool {
    true
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for SumoLogicConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            include_service_accounts: default_include_service_accounts(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl SumoLogicConfig {
    /// Creates a builder seeded with defaults.
    #[must_use]
    pub fn builder() -> SumoLogicConfigBuilder {
        SumoLogicConfigBuilder::default()
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL does not parse, is not http(s), or the
    /// timeout is zero.
    pub fn validate(&self) -> SumoLogicResult<()> {
        let url = url::Url::parse(&self.api_base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(SumoLogicError::Config(format!(
                "api base url must use http or https, got '{}'",
                url.scheme()
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(SumoLogicError::Config(
                "request timeout must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

/// Builder for [`SumoLogicConfig`].
#[derive(Debug, Default)]
pub struct SumoLogicConfigBuilder {
    config: SumoLogicConfig,
}

impl SumoLogicConfigBuilder {
    /// Sets an explicit API base URL.
    #[must_use]
    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_base_url = url.into();
        self
    }

    /// Uses the API base URL of a deployment region.
    #[must_use]
    pub fn deployment(mut self, deployment: SumoLogicDeployment) -> Self {
        self.config.api_base_url = deployment.api_base_url().to_string();
        self
    }

    #[must_use]
    pub fn include_service_accounts(mut self, include: bool) -> Self {
        self.config.include_service_accounts = include;
        self
    }

    #[must_use]
    pub fn request_timeout_secs(mut self, secs: u64) -> Self {
        self.config.request_timeout_secs = secs;
        self
    }

    /// Validates and returns the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails.
    pub fn build(self) -> SumoLogicResult<SumoLogicConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
