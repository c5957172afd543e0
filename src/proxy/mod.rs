//! Serverless proxy functions.
//!
//! Every function forwards one verb/path to the swim API with the basic-auth
//! credentials injected, and hands the upstream body back untouched. Any
//! failure becomes a 404 carrying the error text.

use crate::adapters::http::HttpSwimApi;
use crate::domain::endpoint::Endpoint;
use crate::domain::ports::{ApiMode, ConfigProvider};
use crate::utils::error::{Result, TrackerError};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Incoming function event, as delivered by the functions runtime.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyEvent {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub path: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub http_method: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub headers: HashMap<String, String>,
    #[serde(default)]
    pub body: Option<String>,
}

// 部分執行環境會送出 "headers": null
fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyResponse {
    pub status_code: u16,
    #[serde(default)]
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl ProxyResponse {
    pub fn ok(body: String) -> Self {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        Self {
            status_code: 200,
            headers,
            body,
        }
    }

    pub fn not_found(error: &TrackerError) -> Self {
        Self {
            status_code: 404,
            headers: HashMap::new(),
            body: error.to_string(),
        }
    }
}

pub struct SwimProxy {
    upstream: HttpSwimApi,
    session_token: Option<String>,
}

impl SwimProxy {
    /// Upstream calls always go direct, whatever mode the config asks for.
    pub fn new<C: ConfigProvider>(config: &C) -> Self {
        Self {
            upstream: HttpSwimApi::new(&DirectConfig(config)),
            session_token: config.session_token().map(str::to_string),
        }
    }

    pub async fn handle(&self, event: &ProxyEvent) -> ProxyResponse {
        match self.dispatch(event).await {
            Ok(body) => ProxyResponse::ok(body),
            Err(e) => {
                tracing::warn!("Function {} failed: {}", event.path, e);
                ProxyResponse::not_found(&e)
            }
        }
    }

    async fn dispatch(&self, event: &ProxyEvent) -> Result<String> {
        let endpoint = Endpoint::from_path(&event.path)?;
        tracing::info!("{} {} -> {}", event.http_method, event.path, endpoint);

        match endpoint {
            Endpoint::Token => {
                let token = self.session_token.as_deref().unwrap_or_default();
                Ok(serde_json::to_string(token)?)
            }
            _ => self.upstream.forward(endpoint, event.body.as_deref()).await,
        }
    }
}

struct DirectConfig<'a, C: ConfigProvider>(&'a C);

impl<C: ConfigProvider> ConfigProvider for DirectConfig<'_, C> {
    fn api_url(&self) -> &str {
        self.0.api_url()
    }

    fn credentials(&self) -> Option<(&str, &str)> {
        self.0.credentials()
    }

    fn session_token(&self) -> Option<&str> {
        self.0.session_token()
    }

    fn api_mode(&self) -> ApiMode {
        ApiMode::Direct
    }
}
