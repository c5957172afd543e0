use httpmock::prelude::*;
use swim_tracker::{ProxyConfig, ProxyEvent, SwimProxy};

fn proxy_for(server: &MockServer, token: Option<&str>) -> SwimProxy {
    let config = ProxyConfig {
        api_url: server.base_url(),
        username: "swimmer".to_string(),
        password: "pa55".to_string(),
        session_token: token.map(str::to_string),
    };
    SwimProxy::new(&config)
}

fn event(path: &str, method: &str, body: Option<&str>) -> ProxyEvent {
    ProxyEvent {
        path: path.to_string(),
        http_method: method.to_string(),
        body: body.map(str::to_string),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_get_swims_passes_body_through_with_basic_auth() {
    let server = MockServer::start();
    let upstream_body = r#"[{"id":1,"datum":"2023-07-01","strecke":1500,"name":"Flipper","kommentar":"Etappe 1"}]"#;
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/getswims")
            .header("Authorization", "Basic c3dpbW1lcjpwYTU1");
        then.status(200)
            .header("Content-Type", "application/json")
            .body(upstream_body);
    });

    let response = proxy_for(&server, None)
        .handle(&event("/.netlify/functions/getSwims", "GET", None))
        .await;

    api_mock.assert();
    assert_eq!(response.status_code, 200);
    assert_eq!(response.body, upstream_body);
    assert_eq!(
        response.headers.get("Content-Type").map(String::as_str),
        Some("application/json")
    );
}

#[tokio::test]
async fn test_add_swim_forwards_request_body() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/addswim")
            .header("Authorization", "Basic c3dpbW1lcjpwYTU1")
            .json_body(serde_json::json!({
                "datum": "2023-07-02",
                "strecke": "800",
                "dolphin": "Flipper",
                "etappe": "Laboe"
            }));
        then.status(200).body("[]");
    });

    let body = r#"{"datum":"2023-07-02","strecke":"800","dolphin":"Flipper","etappe":"Laboe"}"#;
    let response = proxy_for(&server, None)
        .handle(&event("/.netlify/functions/addSwim", "POST", Some(body)))
        .await;

    api_mock.assert();
    assert_eq!(response.status_code, 200);
    assert_eq!(response.body, "[]");
}

#[tokio::test]
async fn test_upstream_failure_becomes_404_with_error_text() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/deleteswim");
        then.status(500).body("internal");
    });

    let response = proxy_for(&server, None)
        .handle(&event("/.netlify/functions/deleteSwim", "POST", Some("[1]")))
        .await;

    assert_eq!(response.status_code, 404);
    assert_eq!(response.body, "Request failed with status code 500");
}

#[tokio::test]
async fn test_unreachable_upstream_becomes_404() {
    let config = ProxyConfig {
        // nothing listens on port 9 (discard)
        api_url: "http://127.0.0.1:9".to_string(),
        username: "swimmer".to_string(),
        password: "pa55".to_string(),
        session_token: None,
    };

    let response = SwimProxy::new(&config)
        .handle(&event("/.netlify/functions/toSwim", "GET", None))
        .await;

    assert_eq!(response.status_code, 404);
    assert!(response.body.starts_with("API request failed"));
}

#[tokio::test]
async fn test_token_function_answers_locally() {
    let server = MockServer::start();
    let any_call = server.mock(|when, then| {
        when.path_contains("/");
        then.status(200);
    });

    let response = proxy_for(&server, Some("t0k3n"))
        .handle(&event("/.netlify/functions/token", "GET", None))
        .await;

    assert_eq!(response.status_code, 200);
    assert_eq!(response.body, "\"t0k3n\"");
    any_call.assert_hits(0);
}

#[tokio::test]
async fn test_unknown_function_is_404() {
    let server = MockServer::start();

    let response = proxy_for(&server, None)
        .handle(&event("/.netlify/functions/dropTables", "POST", None))
        .await;

    assert_eq!(response.status_code, 404);
    assert_eq!(response.body, "Unknown function: dropTables");
}

#[tokio::test]
async fn test_login_is_forwarded_upstream() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/login")
            .header("Authorization", "Basic c3dpbW1lcjpwYTU1")
            .body("{\"token\":\"guess\"}");
        then.status(200).body("false");
    });

    let response = proxy_for(&server, Some("t0k3n"))
        .handle(&event("/.netlify/functions/login", "POST", Some("{\"token\":\"guess\"}")))
        .await;

    api_mock.assert();
    assert_eq!(response.status_code, 200);
    assert_eq!(response.body, "false");
}
