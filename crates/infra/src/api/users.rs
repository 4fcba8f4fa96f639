//! User account endpoints (`User/...`, scope `users`)

use fuusor_common::validation::is_valid_date;
use fuusor_domain::constants::SCOPE_USERS;
use fuusor_domain::{CreateUserOutcome, FuusorError, Result, User};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{info, instrument};

use super::client::FuusorApiClient;

/// User account operations.
#[derive(Debug, Clone, Copy)]
pub struct Users<'a> {
    client: &'a FuusorApiClient,
}

impl<'a> Users<'a> {
    pub(crate) fn new(client: &'a FuusorApiClient) -> Self {
        Self { client }
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        json: Option<&Value>,
        query: Option<&[(&str, &str)]>,
    ) -> Result<T> {
        let path = format!("User/{endpoint}");
        self.client.request(SCOPE_USERS, &path, method, json, query).await
    }

    fn check_user_name(&self, user_name: &str) -> Result<()> {
        if user_name.is_empty() {
            return Err(FuusorError::Validation("Missing user_name".to_string()));
        }

        self.client
            .validate_email(user_name)
            .map_err(|_| FuusorError::Validation(format!("Invalid user_name {user_name}")))
    }

    /// All user accounts.
    ///
    /// # Errors
    /// Token or HTTP failures from [`FuusorApiClient::request`].
    pub async fn get_all(&self) -> Result<Vec<User>> {
        self.request(Method::GET, "Get", None, None).await
    }

    /// Create a user account.
    ///
    /// Authentication type and language default to Microsoft and Finnish.
    /// Activation-link users get the link the API returns.
    ///
    /// # Errors
    /// - [`FuusorError::Validation`] for a missing or malformed user name or
    ///   a `valid_until` that is not `YYYY-MM-DD`
    /// - Token or HTTP failures from [`FuusorApiClient::request`]
    #[instrument(skip(self, user), fields(user_name = %user.user_name))]
    pub async fn create(&self, user: User) -> Result<CreateUserOutcome> {
        self.check_user_name(&user.user_name)?;

        if let Some(valid_until) = user.valid_until.as_deref() {
            if !is_valid_date(valid_until) {
                return Err(FuusorError::Validation(format!(
                    "Incorrect user.valid_until format: \"{valid_until}\", use YYYY-MM-DD"
                )));
            }
        }

        let user = user.with_defaults();
        let body = serde_json::to_value(&user)?;
        let response: Value = self.request(Method::POST, "Create", Some(&body), None).await?;

        let activation_link = if user.uses_activation_link() {
            match response {
                Value::Null => None,
                Value::String(link) => Some(link),
                other => Some(other.to_string()),
            }
        } else {
            None
        };

        info!(activation_link = activation_link.is_some(), "user created");
        Ok(CreateUserOutcome::Created { activation_link })
    }

    /// Delete a user account.
    ///
    /// # Errors
    /// - [`FuusorError::Validation`] for a missing or malformed user name
    /// - Token or HTTP failures from [`FuusorApiClient::request`]
    #[instrument(skip(self))]
    pub async fn delete(&self, user_name: &str) -> Result<()> {
        self.check_user_name(user_name)?;

        let _: Value =
            self.request(Method::DELETE, "Delete", None, Some(&[("userName", user_name)])).await?;

        info!("user deleted");
        Ok(())
    }
}
