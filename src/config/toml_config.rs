use crate::core::{ApiMode, ConfigProvider};
use crate::utils::error::{Result, TrackerError};
use crate::utils::validation::{validate_path, validate_url, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:275";
pub const DEFAULT_SESSION_FILE: &str = ".swim_session.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub api: ApiSection,
    #[serde(default)]
    pub session: SessionSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiSection {
    pub url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub mode: Option<ApiMode>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionSection {
    pub token: Option<String>,
    pub file: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${REACT_APP_API_PASS})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> String {
        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| {
            Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("static pattern is valid")
        });

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    pub fn session_file(&self) -> &str {
        self.session.file.as_deref().unwrap_or(DEFAULT_SESSION_FILE)
    }
}

impl ConfigProvider for TomlConfig {
    fn api_url(&self) -> &str {
        self.api.url.as_deref().unwrap_or(DEFAULT_API_URL)
    }

    fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.api.username, &self.api.password) {
            (Some(user), Some(pass)) => Some((user.as_str(), pass.as_str())),
            _ => None,
        }
    }

    fn session_token(&self) -> Option<&str> {
        self.session.token.as_deref()
    }

    fn api_mode(&self) -> ApiMode {
        self.api.mode.unwrap_or_default()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api.url", self.api_url())?;
        validate_path("session.file", self.session_file())?;

        if self.api.username.is_some() != self.api.password.is_some() {
            return Err(TrackerError::ConfigError {
                message: "api.username and api.password must be set together".to_string(),
            });
        }

        Ok(())
    }
}
