//! Configuration for the Kopi API client
//!
//! Supports environment-based configuration with sensible defaults.

use crate::error::{ApiError, ApiResult};
use kopi_core::retry::RetryConfig;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Default production API URL
const DEFAULT_API_URL: &str = "https://api.kopi.app/v1";

/// Default bounded wait for a single request
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Environment types
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development (API on localhost)
    Development,
    /// Staging environment
    Staging,
    /// Production environment
    #[default]
    Production,
}

impl Environment {
    /// Parse from the `KOPI_ENV` environment variable
    pub fn from_env() -> Self {
        Self::parse(&env::var("KOPI_ENV").unwrap_or_default())
    }

    /// Parse a user-supplied name; unknown names mean production
    #[must_use]
    pub fn parse(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "development" | "dev" | "local" => Self::Development,
            "staging" | "stage" => Self::Staging,
            _ => Self::Production,
        }
    }

    /// Retry policy suited to this environment
    #[must_use]
    pub fn retry_policy(self) -> RetryConfig {
        match self {
            Self::Development => RetryConfig::quick(),
            Self::Staging => RetryConfig::default(),
            Self::Production => RetryConfig::patient(),
        }
    }
}

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL; endpoint paths are appended to it
    pub base_url: String,
    /// Bearer token sent on every request
    pub api_token: Option<String>,
    /// Request timeout
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
    /// Retry configuration
    pub retry: RetryConfig,
    /// Current environment
    pub environment: Environment,
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            api_token: None,
            timeout: DEFAULT_TIMEOUT,
            retry: RetryConfig::default(),
            environment: Environment::default(),
        }
    }
}

impl ClientConfig {
    /// Create configuration from environment variables
    ///
    /// Reads the following environment variables:
    /// - `KOPI_API_URL`: Base URL of the API
    /// - `KOPI_API_TOKEN`: Bearer token
    /// - `KOPI_ENV`: Environment (development/staging/production)
    /// - `KOPI_TIMEOUT_SECS`: Request timeout in seconds
    pub fn from_env() -> ApiResult<Self> {
        let environment = Environment::from_env();

        let base_url = env::var("KOPI_API_URL").unwrap_or_else(|_| match environment {
            Environment::Development => Self::development().base_url,
            Environment::Staging | Environment::Production => DEFAULT_API_URL.to_string(),
        });

        let timeout = match env::var("KOPI_TIMEOUT_SECS") {
            Ok(raw) => raw
                .trim()
                .parse()
                .map(Duration::from_secs)
                .map_err(|_| ApiError::config(format!("KOPI_TIMEOUT_SECS is not a number: {raw}")))?,
            Err(_) => DEFAULT_TIMEOUT,
        };

        Ok(Self {
            base_url,
            api_token: env::var("KOPI_API_TOKEN").ok().filter(|t| !t.is_empty()),
            timeout,
            retry: environment.retry_policy(),
            environment,
        })
    }

    /// Create development configuration (local API)
    #[must_use]
    pub fn development() -> Self {
        Self {
            base_url: "http://localhost:8000/api".to_string(),
            api_token: None,
            timeout: Duration::from_secs(10),
            retry: RetryConfig::quick(),
            environment: Environment::Development,
        }
    }

    /// Builder-style method to set base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Builder-style method to set the bearer token
    #[must_use]
    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Builder-style method to set timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builder-style method to set retry config
    #[must_use]
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Longest a call can take with every retry attempt and backoff spent.
    ///
    /// Outer deadlines sized below this cut retries short.
    #[must_use]
    pub fn call_budget(&self) -> Duration {
        let attempts = self.retry.max_attempts.max(1);
        let jitter = if self.retry.jitter { 1.25 } else { 1.0 };
        let backoff: Duration = (1..attempts)
            .map(|attempt| {
                let exponent = i32::try_from(attempt - 1).unwrap_or(i32::MAX);
                let base = self.retry.initial_delay.as_secs_f64() * self.retry.backoff_multiplier.powi(exponent);
                let capped = base.min(self.retry.max_delay.as_secs_f64()) * jitter;
                Duration::try_from_secs_f64(capped).unwrap_or(self.retry.max_delay)
            })
            .sum();
        self.timeout.saturating_mul(attempts).saturating_add(backoff)
    }

    /// Validate the configuration
    pub fn validate(&self) -> ApiResult<()> {
        if self.base_url.is_empty() {
            return Err(ApiError::config("base_url cannot be empty"));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ApiError::config("base_url must start with http:// or https://"));
        }

        if self.timeout.is_zero() {
            return Err(ApiError::config("timeout cannot be zero"));
        }

        if self.retry.max_attempts == 0 {
            return Err(ApiError::config("retry.max_attempts must be at least 1"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert!(config.base_url.starts_with("https://"));
        assert_eq!(config.timeout, Duration::from_secs(15));
        assert!(config.api_token.is_none());
    }

    #[test]
    fn test_development_config() {
        let config = ClientConfig::development();
        assert!(config.base_url.contains("localhost"));
        assert_eq!(config.environment, Environment::Development);
    }

    #[test]
    fn test_environment_parse() {
        assert_eq!(Environment::parse("DEV"), Environment::Development);
        assert_eq!(Environment::parse(" stage "), Environment::Staging);
        assert_eq!(Environment::parse("anything"), Environment::Production);
        assert_eq!(Environment::Development.retry_policy(), RetryConfig::quick());
    }

    #[test]
    fn test_builder_pattern() {
        let config = ClientConfig::default()
            .with_base_url("https://staging.kopi.app/v1")
            .with_api_token("secret")
            .with_timeout(Duration::from_secs(60));

        assert_eq!(config.base_url, "https://staging.kopi.app/v1");
        assert_eq!(config.api_token.as_deref(), Some("secret"));
        assert_eq!(config.timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_validation() {
        assert!(ClientConfig::default().validate().is_ok());
        assert!(ClientConfig::default().with_base_url("").validate().is_err());
        assert!(ClientConfig::default().with_base_url("ftp://x").validate().is_err());
        assert!(ClientConfig::default().with_timeout(Duration::ZERO).validate().is_err());

        let mut no_attempts = ClientConfig::default();
        no_attempts.retry.max_attempts = 0;
        assert!(no_attempts.validate().is_err());
    }

    #[test]
    fn test_call_budget_covers_retries() {
        let single = ClientConfig::default()
            .with_timeout(Duration::from_secs(2))
            .with_retry(RetryConfig::no_retry());
        assert_eq!(single.call_budget(), Duration::from_secs(2));

        let retry = RetryConfig {
            max_attempts: 3,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(5),
            backoff_multiplier: 2.0,
            jitter: false,
        };
        let config = ClientConfig::default()
            .with_timeout(Duration::from_secs(2))
            .with_retry(retry);
        // three attempts plus 100ms and 200ms of backoff
        assert_eq!(config.call_budget(), Duration::from_millis(6300));

        let jittered = config.clone().with_retry(RetryConfig { jitter: true, ..config.retry.clone() });
        assert_eq!(jittered.call_budget(), Duration::from_millis(6375));
        assert!(jittered.call_budget() > jittered.timeout);
    }

    #[test]
    fn test_serde_timeout_as_seconds() {
        let json = serde_json::to_value(ClientConfig::default()).unwrap();
        assert_eq!(json["timeout"], 15);
    }
}
