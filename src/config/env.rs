use crate::core::{ApiMode, ConfigProvider};
use crate::utils::error::{Result, TrackerError};
use crate::utils::validation::{validate_non_empty_string, validate_url, Validate};

pub const API_URL_VAR: &str = "REACT_APP_API_URL";
pub const API_USER_VAR: &str = "REACT_APP_API_UNAME";
pub const API_PASS_VAR: &str = "REACT_APP_API_PASS";
pub const SESSION_TOKEN_VAR: &str = "REACT_APP_SESSION_TOKEN";

/// Settings of the serverless functions, read from the deploy environment.
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    pub api_url: String,
    pub username: String,
    pub password: String,
    pub session_token: Option<String>,
}

impl ProxyConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key).ok_or_else(|| TrackerError::MissingConfigError {
                field: key.to_string(),
            })
        };

        Ok(Self {
            api_url: required(API_URL_VAR)?,
            username: required(API_USER_VAR)?,
            password: required(API_PASS_VAR)?,
            session_token: lookup(SESSION_TOKEN_VAR),
        })
    }
}

impl ConfigProvider for ProxyConfig {
    fn api_url(&self) -> &str {
        &self.api_url
    }

    fn credentials(&self) -> Option<(&str, &str)> {
        Some((&self.username, &self.password))
    }

    fn session_token(&self) -> Option<&str> {
        self.session_token.as_deref()
    }

    fn api_mode(&self) -> ApiMode {
        ApiMode::Direct
    }
}

impl Validate for ProxyConfig {
    fn validate(&self) -> Result<()> {
        validate_url(API_URL_VAR, &self.api_url)?;
        validate_non_empty_string(API_USER_VAR, &self.username)?;

        if self.session_token.as_deref().unwrap_or_default().is_empty() {
            tracing::warn!("{} is not set, the token function will return an empty string", SESSION_TOKEN_VAR);
        }

        tracing::info!("✅ Proxy configuration validation passed");
        Ok(())
    }
}
