use std::sync::Arc;

use fuusor_common::testing::MockClock;
use fuusor_domain::ClientConfig;
use fuusor_infra::FuusorApiClient;
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

pub const TOKEN_PATH: &str = "/connect/token";

/// Install a test-friendly subscriber once; honours `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Config pointing every endpoint at the mock server.
pub fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig::new("client", "secret", "api@example.com", "pw")
        .with_uri_connect(format!("{}{TOKEN_PATH}", server.uri()))
        .with_uri_base(format!("{}/api/v1", server.uri()))
        .with_uri_dataset(format!("{}/api/v1/dataset", server.uri()))
        .with_uri_upload_file(format!("{}/api/v1/uploadfile", server.uri()))
}

pub fn client_for(server: &MockServer) -> FuusorApiClient {
    init_tracing();
    FuusorApiClient::new(config_for(server)).expect("client should build")
}

pub fn client_with_clock(server: &MockServer, clock: &MockClock) -> FuusorApiClient {
    init_tracing();
    FuusorApiClient::builder()
        .config(config_for(server))
        .clock(Arc::new(clock.clone()))
        .build()
        .expect("client should build")
}

/// Token endpoint handing out `token` valid for `expires_in` seconds.
pub async fn mount_token(server: &MockServer, token: &str, expires_in: u64) {
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "access_token": token, "expires_in": expires_in })),
        )
        .mount(server)
        .await;
}

/// Requests received on `request_path`, in arrival order.
pub async fn requests_to(server: &MockServer, request_path: &str) -> Vec<Request> {
    server
        .received_requests()
        .await
        .expect("request recording enabled")
        .into_iter()
        .filter(|request| request.url.path() == request_path)
        .collect()
}

pub fn json_body(request: &Request) -> Value {
    serde_json::from_slice(&request.body).expect("request body should be JSON")
}
