//! Top-level API client
//!
//! Holds validated configuration, the HTTP transport and the per-scope token
//! cache. Cloning is cheap and clones share the cache.

use std::sync::Arc;

use fuusor_common::validation::{EmailValidator, FieldValidator};
use fuusor_common::Clock;
use fuusor_domain::constants::SCOPE_FILE_UPLOAD;
use fuusor_domain::{
    minimize_object_keys, ClientConfig, DataSetOptions, DataSetPayload, FuusorError, Result,
};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use super::user_groups::UserGroups;
use super::users::Users;
use crate::auth::{PasswordGrantClient, TokenCache, TokenFetcher};
use crate::dataset::DataSet;
use crate::errors::InfraError;
use crate::http::{error_body, HttpClient};

struct ClientInner {
    config: ClientConfig,
    http: HttpClient,
    fetcher: Arc<dyn TokenFetcher>,
    tokens: TokenCache,
}

/// Client for the Fuusor reporting API.
#[derive(Clone)]
pub struct FuusorApiClient {
    inner: Arc<ClientInner>,
}

impl std::fmt::Debug for FuusorApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FuusorApiClient").field("config", &self.inner.config).finish()
    }
}

impl FuusorApiClient {
    /// Create a client from explicit configuration.
    ///
    /// # Errors
    ///
    /// [`FuusorError::Config`] naming the first missing credential, or if the
    /// HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::builder().config(config).build()
    }

    /// Create a builder for fluent configuration
    pub fn builder() -> FuusorApiClientBuilder {
        FuusorApiClientBuilder::default()
    }

    /// Validated configuration in use.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// User account endpoints.
    pub fn users(&self) -> Users<'_> {
        Users::new(self)
    }

    /// User group endpoints.
    pub fn user_groups(&self) -> UserGroups<'_> {
        UserGroups::new(self)
    }

    /// Start a dataset upload.
    ///
    /// # Errors
    ///
    /// [`FuusorError::Config`] naming the missing or malformed option.
    pub fn create_data_set(&self, options: DataSetOptions) -> Result<DataSet> {
        DataSet::new(self.clone(), options)
    }

    /// Ensure a live token exists for `scope`.
    ///
    /// # Errors
    ///
    /// Token endpoint failures ([`FuusorError::Http`], [`FuusorError::Network`]).
    pub async fn refresh_access_token(&self, scope: &str) -> Result<()> {
        self.inner.tokens.refresh_access_token(scope).await
    }

    /// Live bearer token for `scope`, fetched on first use and after expiry.
    ///
    /// # Errors
    ///
    /// Token endpoint failures ([`FuusorError::Http`], [`FuusorError::Network`]).
    pub async fn access_token(&self, scope: &str) -> Result<String> {
        self.inner.tokens.access_token(scope).await
    }

    /// Check that `email` looks like an email address.
    ///
    /// # Errors
    ///
    /// [`FuusorError::Validation`] naming the address.
    pub fn validate_email(&self, email: &str) -> Result<()> {
        EmailValidator::new().validate(email).map_err(FuusorError::Validation)
    }

    /// Authenticated JSON request against `uri_base`.
    ///
    /// `path` is relative to the base URI (`User/Get`). Only `200 OK` counts
    /// as success; an empty 200 body is read as JSON `null`.
    ///
    /// # Errors
    ///
    /// - [`FuusorError::Http`] for any other status, carrying the body
    /// - [`FuusorError::Network`] for transport failures
    /// - [`FuusorError::Serialization`] if the body does not decode into `T`
    #[instrument(skip(self, json, query), fields(method = %method))]
    pub async fn request<T: DeserializeOwned>(
        &self,
        scope: &str,
        path: &str,
        method: Method,
        json: Option<&Value>,
        query: Option<&[(&str, &str)]>,
    ) -> Result<T> {
        let url = self.resource_url(path);
        let token = self.access_token(scope).await?;

        debug!(url = %url, "API request");

        let mut request = self
            .inner
            .http
            .request(method, url.as_str())
            .header(AUTHORIZATION, format!("Bearer {token}"));

        if let Some(body) = json {
            request = request.json(body);
        }

        if let Some(params) = query {
            request = request.query(params);
        }

        let response = self.inner.http.send(request).await?;
        let status = response.status();

        if status != StatusCode::OK {
            return Err(Self::status_error(response, &url).await);
        }

        let body = Self::read_body(response).await?;
        let value = if body.trim().is_empty() { Value::Null } else { serde_json::from_str(&body)? };

        info!(path, %status, "API request successful");
        Ok(serde_json::from_value(value)?)
    }

    /// Fetch a `fileupload` token without touching the cache.
    ///
    /// # Errors
    ///
    /// Token endpoint failures ([`FuusorError::Http`], [`FuusorError::Network`]).
    pub async fn fetch_access_token_for_data_set_upload(&self) -> Result<String> {
        let response = self.inner.fetcher.fetch_token(SCOPE_FILE_UPLOAD).await?;
        Ok(response.access_token)
    }

    /// Upload `data` to the legacy file endpoint.
    ///
    /// Top-level keys are lower-cased and the JSON is sent as
    /// `application/octet-stream`.
    ///
    /// # Errors
    ///
    /// - [`FuusorError::Serialization`] if `data` cannot be encoded
    /// - [`FuusorError::Http`] for non-success responses
    #[instrument(skip(self, access_token, data), fields(uri = %self.inner.config.uri_upload_file))]
    pub async fn save_data_set<T>(&self, access_token: &str, data: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let body = serde_json::to_vec(&minimize_object_keys(serde_json::to_value(data)?))?;

        let request = self
            .inner
            .http
            .request(Method::POST, self.inner.config.uri_upload_file.as_str())
            .header(AUTHORIZATION, format!("Bearer {access_token}"))
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(body);

        self.send_upload(request, &self.inner.config.uri_upload_file).await
    }

    /// Upload a dataset payload to the dataset endpoint.
    ///
    /// # Errors
    ///
    /// - [`FuusorError::Serialization`] if the payload cannot be encoded
    /// - [`FuusorError::Http`] for non-success responses
    #[instrument(skip(self, access_token, payload), fields(uri = %self.inner.config.uri_dataset))]
    pub async fn upload_data_set(
        &self,
        access_token: &str,
        payload: &DataSetPayload<'_>,
    ) -> Result<()> {
        let body = payload.to_bytes()?;

        let request = self
            .inner
            .http
            .request(Method::POST, self.inner.config.uri_dataset.as_str())
            .header(AUTHORIZATION, format!("Bearer {access_token}"))
            .header(CONTENT_TYPE, "application/json")
            .body(body);

        self.send_upload(request, &self.inner.config.uri_dataset).await
    }

    async fn send_upload(&self, request: reqwest::RequestBuilder, url: &str) -> Result<()> {
        let response = self.inner.http.send(request).await?;
        let status = response.status();

        if !status.is_success() {
            return Err(Self::status_error(response, url).await);
        }

        info!(%status, "dataset uploaded");
        Ok(())
    }

    fn resource_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.inner.config.uri_base.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn read_body(response: Response) -> Result<String> {
        response.text().await.map_err(|err| FuusorError::from(InfraError::from(err)))
    }

    async fn status_error(response: Response, url: &str) -> FuusorError {
        let status = response.status();
        let body = error_body(response).await;
        warn!(url = %url, %status, "API returned unexpected status");
        InfraError::from_status(status, body).into()
    }
}

/// Builder for [`FuusorApiClient`]
#[derive(Default)]
pub struct FuusorApiClientBuilder {
    config: Option<ClientConfig>,
    clock: Option<Arc<dyn Clock>>,
    fetcher: Option<Arc<dyn TokenFetcher>>,
}

impl FuusorApiClientBuilder {
    /// Set the client configuration
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Clock used for token expiry
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Replace the password-grant token fetcher
    pub fn token_fetcher(mut self, fetcher: Arc<dyn TokenFetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Build the API client
    ///
    /// # Errors
    ///
    /// Returns error if the configuration is missing or incomplete, or the
    /// HTTP client cannot be created
    pub fn build(self) -> Result<FuusorApiClient> {
        let config = self
            .config
            .ok_or_else(|| FuusorError::Config("Client configuration not set".to_string()))?
            .validate()?;

        let http = HttpClient::builder().timeout(config.timeout()).build()?;

        let fetcher: Arc<dyn TokenFetcher> = match self.fetcher {
            Some(fetcher) => fetcher,
            None => Arc::new(PasswordGrantClient::new(http.clone(), config.clone())),
        };

        let tokens = match self.clock {
            Some(clock) => TokenCache::with_clock(fetcher.clone(), clock),
            None => TokenCache::new(fetcher.clone()),
        };

        Ok(FuusorApiClient { inner: Arc::new(ClientInner { config, http, fetcher, tokens }) })
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn config_for(server: &MockServer) -> ClientConfig {
        ClientConfig::new("client", "secret", "api@example.com", "pw")
            .with_uri_connect(format!("{}/connect/token", server.uri()))
            .with_uri_base(format!("{}/api/v1/", server.uri()))
    }

    async fn mount_token(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/connect/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "test-token",
                "expires_in": 3600
            })))
            .mount(server)
            .await;
    }

    #[test]
    fn test_new_reports_missing_credentials() {
        let err = FuusorApiClient::new(ClientConfig::new("", "secret", "u", "p")).unwrap_err();
        assert_eq!(err, FuusorError::Config("Missing config.client_id".to_string()));
    }

    #[test]
    fn test_builder_missing_config() {
        let result = FuusorApiClient::builder().build();
        assert!(matches!(result, Err(FuusorError::Config(_))));
    }

    #[test]
    fn test_resource_url_joins_with_single_slash() {
        let client = FuusorApiClient::new(
            ClientConfig::new("id", "secret", "u", "p").with_uri_base("https://host/api/v1/"),
        )
        .unwrap();

        assert_eq!(client.resource_url("User/Get"), "https://host/api/v1/User/Get");
        assert_eq!(client.resource_url("/User/Get"), "https://host/api/v1/User/Get");
    }

    #[test]
    fn test_validate_email() {
        let client = FuusorApiClient::new(ClientConfig::new("id", "secret", "u", "p")).unwrap();

        assert!(client.validate_email("someone@example.com").is_ok());
        let err = client.validate_email("not-an-email").unwrap_err();
        assert!(matches!(err, FuusorError::Validation(ref msg) if msg.contains("not-an-email")));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let client = FuusorApiClient::new(ClientConfig::new("id", "hunter2", "u", "pw1")).unwrap();
        let rendered = format!("{client:?}");

        assert!(!rendered.contains("hunter2"));
        assert!(!rendered.contains("pw1"));
    }

    #[tokio::test]
    async fn test_request_sends_bearer_and_query() {
        let server = MockServer::start().await;
        mount_token(&server).await;
        Mock::given(method("DELETE"))
            .and(path("/api/v1/User/Delete"))
            .and(query_param("userName", "someone@example.com"))
            .and(header("Authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = FuusorApiClient::new(config_for(&server)).unwrap();
        let value: Value = client
            .request(
                "users",
                "User/Delete",
                Method::DELETE,
                None,
                Some(&[("userName", "someone@example.com")]),
            )
            .await
            .unwrap();

        assert_eq!(value, Value::Null);
    }

    #[tokio::test]
    async fn test_request_treats_created_as_error() {
        let server = MockServer::start().await;
        mount_token(&server).await;
        Mock::given(method("POST"))
            .and(path("/api/v1/User/Create"))
            .respond_with(ResponseTemplate::new(201).set_body_string("created"))
            .mount(&server)
            .await;

        let client = FuusorApiClient::new(config_for(&server)).unwrap();
        let body = serde_json::json!({"userName": "someone@example.com"});
        let err = client
            .request::<Value>("users", "User/Create", Method::POST, Some(&body), None)
            .await
            .unwrap_err();

        assert_eq!(
            err,
            FuusorError::Http {
                status: 201,
                status_text: "Created".to_string(),
                body: "created".to_string(),
            }
        );
    }
}
