use crate::domain::endpoint::{Endpoint, Method};
use crate::domain::model::{NewSwim, RoutePoint, SwimId, SwimRecord};
use crate::domain::ports::{ApiMode, ConfigProvider, SwimApi};
use crate::utils::error::{Result, TrackerError};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;

const FUNCTIONS_PREFIX: &str = "/.netlify/functions";

/// `reqwest` client for the swim API, either direct or through the functions.
#[derive(Debug, Clone)]
pub struct HttpSwimApi {
    client: Client,
    base_url: String,
    credentials: Option<(String, String)>,
    session_token: Option<String>,
    mode: ApiMode,
}

impl HttpSwimApi {
    pub fn new<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client<C: ConfigProvider + ?Sized>(client: Client, config: &C) -> Self {
        Self {
            client,
            base_url: config.api_url().trim_end_matches('/').to_string(),
            credentials: config
                .credentials()
                .map(|(user, pass)| (user.to_string(), pass.to_string())),
            session_token: config.session_token().map(str::to_string),
            mode: config.api_mode(),
        }
    }

    pub fn mode(&self) -> ApiMode {
        self.mode
    }

    fn url_for(&self, endpoint: Endpoint) -> Result<String> {
        match self.mode {
            ApiMode::Direct => endpoint
                .upstream_path()
                .map(|path| format!("{}{}", self.base_url, path))
                .ok_or_else(|| TrackerError::ConfigError {
                    message: format!("'{}' has no upstream path", endpoint),
                }),
            ApiMode::Functions => Ok(format!(
                "{}{}/{}",
                self.base_url,
                FUNCTIONS_PREFIX,
                endpoint.function_name()
            )),
        }
    }

    /// Sends `body` unchanged and returns the response text unchanged.
    pub async fn forward(&self, endpoint: Endpoint, body: Option<&str>) -> Result<String> {
        let url = self.url_for(endpoint)?;
        tracing::debug!("{:?} {}", endpoint.method(), url);

        let mut request = match endpoint.method() {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
        };

        if self.mode == ApiMode::Direct {
            if let Some((username, password)) = &self.credentials {
                request = request.basic_auth(username, Some(password));
            }
        }

        if let Some(body) = body {
            request = request
                .header(CONTENT_TYPE, "application/json")
                .body(body.to_string());
        }

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("{} responded with {}", endpoint, status);

        let text = response.text().await?;
        if !status.is_success() {
            return Err(TrackerError::UpstreamStatus {
                status: status.as_u16(),
                body: text,
            });
        }

        Ok(text)
    }

    async fn fetch_swims(&self, endpoint: Endpoint, body: Option<&str>) -> Result<Vec<SwimRecord>> {
        let text = self.forward(endpoint, body).await?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl SwimApi for HttpSwimApi {
    async fn get_swims(&self) -> Result<Vec<SwimRecord>> {
        self.fetch_swims(Endpoint::GetSwims, None).await
    }

    async fn to_swim(&self) -> Result<Vec<RoutePoint>> {
        let text = self.forward(Endpoint::ToSwim, None).await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn add_swim(&self, swim: &NewSwim) -> Result<Vec<SwimRecord>> {
        let body = serde_json::to_string(swim)?;
        self.fetch_swims(Endpoint::AddSwim, Some(&body)).await
    }

    async fn delete_swims(&self, ids: &[SwimId]) -> Result<Vec<SwimRecord>> {
        let body = serde_json::to_string(ids)?;
        self.fetch_swims(Endpoint::DeleteSwim, Some(&body)).await
    }

    async fn session_token(&self) -> Result<String> {
        match self.mode {
            ApiMode::Functions => {
                let text = self.forward(Endpoint::Token, None).await?;
                Ok(serde_json::from_str(&text)?)
            }
            ApiMode::Direct => {
                self.session_token
                    .clone()
                    .ok_or_else(|| TrackerError::MissingConfigError {
                        field: "session_token".to_string(),
                    })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    struct MockConfig {
        api_url: String,
        mode: ApiMode,
    }

    impl ConfigProvider for MockConfig {
        fn api_url(&self) -> &str {
            &self.api_url
        }

        fn credentials(&self) -> Option<(&str, &str)> {
            Some(("swimmer", "pa55"))
        }

        fn session_token(&self) -> Option<&str> {
            Some("local-token")
        }

        fn api_mode(&self) -> ApiMode {
            self.mode
        }
    }

    fn api(server: &MockServer, mode: ApiMode) -> HttpSwimApi {
        HttpSwimApi::new(&MockConfig {
            api_url: format!("{}/", server.base_url()),
            mode,
        })
    }

    #[tokio::test]
    async fn test_direct_mode_sends_basic_auth() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/getswims")
                .header("Authorization", "Basic c3dpbW1lcjpwYTU1");
            then.status(200).json_body(serde_json::json!([
                {"id": 1, "datum": "2023-07-01", "strecke": 1200, "name": "Flipper", "kommentar": ""}
            ]));
        });

        let swims = api(&server, ApiMode::Direct).get_swims().await.unwrap();

        api_mock.assert();
        assert_eq!(swims.len(), 1);
        assert_eq!(swims[0].distance_meters, 1200.0);
    }

    #[tokio::test]
    async fn test_functions_mode_uses_function_paths() {
        let server = MockServer::start();
        let route_mock = server.mock(|when, then| {
            when.method(GET).path("/.netlify/functions/toSwim");
            then.status(200).body("[[54.3,10.1],[54.4,10.2]]");
        });
        let token_mock = server.mock(|when, then| {
            when.method(GET).path("/.netlify/functions/token");
            then.status(200).body("\"remote-token\"");
        });

        let api = api(&server, ApiMode::Functions);
        let route = api.to_swim().await.unwrap();
        let token = api.session_token().await.unwrap();

        route_mock.assert();
        token_mock.assert();
        assert_eq!(route.len(), 2);
        assert_eq!(token, "remote-token");
    }

    #[tokio::test]
    async fn test_delete_posts_id_array() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/api/deleteswim")
                .json_body(serde_json::json!([2, "x-3"]));
            then.status(200).json_body(serde_json::json!([]));
        });

        let remaining = api(&server, ApiMode::Direct)
            .delete_swims(&[SwimId::Number(2), SwimId::Text("x-3".to_string())])
            .await
            .unwrap();

        api_mock.assert();
        assert!(remaining.is_empty());
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/getswims");
            then.status(500).body("database down");
        });

        let err = api(&server, ApiMode::Direct).get_swims().await.unwrap_err();
        match err {
            TrackerError::UpstreamStatus { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "database down");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_direct_mode_token_comes_from_config() {
        let server = MockServer::start();
        let token = api(&server, ApiMode::Direct).session_token().await.unwrap();
        assert_eq!(token, "local-token");
    }
}
