use crate::domain::model::{NewSwim, RoutePoint, SwimId, SwimRecord};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Key-value storage for the session token, the counterpart of browser session storage.
pub trait TokenStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ApiMode {
    /// Talk to the swim API directly with basic auth.
    #[default]
    Direct,
    /// Go through the deployed serverless functions.
    Functions,
}

pub trait ConfigProvider: Send + Sync {
    fn api_url(&self) -> &str;
    fn credentials(&self) -> Option<(&str, &str)>;
    fn session_token(&self) -> Option<&str>;
    fn api_mode(&self) -> ApiMode;
}

#[async_trait]
pub trait SwimApi: Send + Sync {
    async fn get_swims(&self) -> Result<Vec<SwimRecord>>;
    async fn to_swim(&self) -> Result<Vec<RoutePoint>>;
    async fn add_swim(&self, swim: &NewSwim) -> Result<Vec<SwimRecord>>;
    async fn delete_swims(&self, ids: &[SwimId]) -> Result<Vec<SwimRecord>>;
    async fn session_token(&self) -> Result<String>;
}
