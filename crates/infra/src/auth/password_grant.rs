//! Token endpoint client for the resource-owner password grant

use async_trait::async_trait;
use fuusor_domain::constants::{GRANT_TYPE_PASSWORD, TOKEN_FILETYPE};
use fuusor_domain::{ClientConfig, FuusorError, Result};
use reqwest::Method;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::errors::InfraError;
use crate::http::{error_body, HttpClient};

/// Token endpoint response. Unknown fields (`token_type`, `scope`) are
/// ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    /// Lifetime in seconds.
    #[serde(default)]
    pub expires_in: u64,
}

/// Source of fresh access tokens.
///
/// Implemented by [`PasswordGrantClient`]; tests substitute counting fakes.
#[async_trait]
pub trait TokenFetcher: Send + Sync {
    /// Request a new token for `scope`. Never cached.
    async fn fetch_token(&self, scope: &str) -> Result<TokenResponse>;
}

/// Posts the password-grant form to the configured token endpoint.
pub struct PasswordGrantClient {
    http: HttpClient,
    config: ClientConfig,
}

impl PasswordGrantClient {
    pub fn new(http: HttpClient, config: ClientConfig) -> Self {
        Self { http, config }
    }

    fn form<'a>(&'a self, scope: &'a str) -> [(&'static str, &'a str); 7] {
        [
            ("scope", scope),
            ("grant_type", GRANT_TYPE_PASSWORD),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("username", self.config.username.as_str()),
            ("password", self.config.password.as_str()),
            ("filetype", TOKEN_FILETYPE),
        ]
    }
}

#[async_trait]
impl TokenFetcher for PasswordGrantClient {
    #[instrument(skip(self), fields(uri = %self.config.uri_connect))]
    async fn fetch_token(&self, scope: &str) -> Result<TokenResponse> {
        let request = self
            .http
            .request(Method::POST, self.config.uri_connect.as_str())
            .form(&self.form(scope));

        let response = self.http.send(request).await?;
        let status = response.status();

        if !status.is_success() {
            let body = error_body(response).await;
            warn!(%status, scope, "token endpoint rejected the request");
            return Err(InfraError::from_status(status, body).into());
        }

        let body = response.text().await.map_err(|err| FuusorError::from(InfraError::from(err)))?;
        let token: TokenResponse = serde_json::from_str(&body)?;

        debug!(scope, expires_in = token.expires_in, "token endpoint returned a token");
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client_for(server: &MockServer) -> PasswordGrantClient {
        let config = ClientConfig::new("client", "s3cret", "api@example.com", "pw")
            .with_uri_connect(format!("{}/connect/token", server.uri()));
        PasswordGrantClient::new(HttpClient::new().unwrap(), config)
    }

    #[tokio::test]
    async fn posts_password_grant_form() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/connect/token"))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(body_string_contains("scope=fileupload"))
            .and(body_string_contains("grant_type=password"))
            .and(body_string_contains("client_id=client"))
            .and(body_string_contains("client_secret=s3cret"))
            .and(body_string_contains("username=api%40example.com"))
            .and(body_string_contains("password=pw"))
            .and(body_string_contains("filetype=JsonTransformer"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "abc",
                "expires_in": 3600,
                "token_type": "Bearer"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let token = client_for(&server).fetch_token("fileupload").await.unwrap();

        assert_eq!(token, TokenResponse { access_token: "abc".to_string(), expires_in: 3600 });
    }

    #[tokio::test]
    async fn rejected_credentials_surface_as_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(400).set_body_string("{\"error\":\"invalid_grant\"}"),
            )
            .mount(&server)
            .await;

        let err = client_for(&server).fetch_token("users").await.unwrap_err();

        match err {
            FuusorError::Http { status, body, .. } => {
                assert_eq!(status, 400);
                assert!(body.contains("invalid_grant"));
            }
            other => panic!("expected http error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn malformed_token_body_is_serialization_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client_for(&server).fetch_token("users").await.unwrap_err();
        assert!(matches!(err, FuusorError::Serialization(_)));
    }
}
