//! Server Startup Tests
//!
//! Serves the application on a real socket, the same way the binary does, and
//! talks to it over HTTP.

use std::net::SocketAddr;

use serde_json::{Value, json};
use tokio::net::TcpListener;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use convai_relay::{CredentialSource, ServerConfig, routes, state::AppState};

async fn spawn_server(config: ServerConfig) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = routes::create_app(AppState::new(config));

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    addr
}

fn create_minimal_config(base_url: &str, credential: CredentialSource) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        elevenlabs_base_url: base_url.to_string(),
        elevenlabs_credential: credential,
    }
}

/// The server boots and answers preflight without any API key configured
#[tokio::test]
async fn test_minimal_config_boot() {
    let addr = spawn_server(create_minimal_config(
        "https://api.elevenlabs.io",
        CredentialSource::from_env_var("CONVAI_RELAY_STARTUP_NEVER_SET"),
    ))
    .await;

    let response = reqwest::Client::new()
        .request(
            reqwest::Method::OPTIONS,
            format!("http://{addr}/elevenlabs-conversation"),
        )
        .header("Origin", "https://app.example.com")
        .header("Access-Control-Request-Method", "POST")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
    assert_eq!(
        response.headers()["access-control-allow-headers"],
        "authorization, x-client-info, apikey, content-type"
    );
    assert!(response.bytes().await.unwrap().is_empty());
}

/// A browser-style POST goes all the way through to the upstream and back
#[tokio::test]
async fn test_signed_url_over_http() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/convai/conversation/get_signed_url"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"signed_url": "wss://example"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let addr = spawn_server(create_minimal_config(
        &mock_server.uri(),
        CredentialSource::fixed("xi-startup-key"),
    ))
    .await;

    let response = reqwest::Client::new()
        .post(format!("http://{addr}/elevenlabs-conversation"))
        .json(&json!({"action": "get_signed_url", "agentId": "agent_9501"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["signed_url"], "wss://example");
}

/// Per-request failures never take the server down
#[tokio::test]
async fn test_server_survives_request_failures() {
    let addr = spawn_server(create_minimal_config(
        "http://127.0.0.1:1",
        CredentialSource::fixed("xi-startup-key"),
    ))
    .await;
    let client = reqwest::Client::new();
    let url = format!("http://{addr}/elevenlabs-conversation");

    let response = client.post(&url).body("{broken").send().await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);

    let response = client
        .post(&url)
        .json(&json!({"action": "get_signed_url", "agentId": "abc"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);

    let response = client
        .post(&url)
        .json(&json!({"action": "nope"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
}
