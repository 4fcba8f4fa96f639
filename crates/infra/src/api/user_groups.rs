//! User group endpoints (`UserGroup/...`, scope `users`)

use fuusor_domain::constants::SCOPE_USERS;
use fuusor_domain::{FuusorError, Result, UserGroup};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{info, instrument};

use super::client::FuusorApiClient;

/// User group operations.
#[derive(Debug, Clone, Copy)]
pub struct UserGroups<'a> {
    client: &'a FuusorApiClient,
}

impl<'a> UserGroups<'a> {
    pub(crate) fn new(client: &'a FuusorApiClient) -> Self {
        Self { client }
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        json: Option<&Value>,
    ) -> Result<T> {
        let path = format!("UserGroup/{endpoint}");
        self.client.request(SCOPE_USERS, &path, method, json, None).await
    }

    /// Build the `{id, users}` body after checking the id and every email.
    fn membership_body<I, S>(&self, id: &str, users: I) -> Result<Value>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if id.is_empty() {
            return Err(FuusorError::Validation("Missing id".to_string()));
        }

        let users: Vec<String> = users.into_iter().map(Into::into).collect();
        if let Some(invalid) = users.iter().find(|user| self.client.validate_email(user).is_err()) {
            return Err(FuusorError::Validation(format!("Invalid user {invalid}")));
        }

        Ok(json!({ "id": id, "users": users }))
    }

    /// All user groups.
    ///
    /// # Errors
    /// Token or HTTP failures from [`FuusorApiClient::request`].
    pub async fn get_all(&self) -> Result<Vec<UserGroup>> {
        self.request(Method::GET, "Get", None).await
    }

    /// Add users (emails) to group `id`.
    ///
    /// # Errors
    /// - [`FuusorError::Validation`] for an empty id or a malformed email;
    ///   nothing is sent in that case
    /// - Token or HTTP failures from [`FuusorApiClient::request`]
    #[instrument(skip(self, users))]
    pub async fn add_users<I, S>(&self, id: &str, users: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let body = self.membership_body(id, users)?;
        let _: Value = self.request(Method::POST, "AddUsers", Some(&body)).await?;

        info!("users added to group");
        Ok(())
    }

    /// Remove users (emails) from group `id`.
    ///
    /// # Errors
    /// - [`FuusorError::Validation`] for an empty id or a malformed email;
    ///   nothing is sent in that case
    /// - Token or HTTP failures from [`FuusorApiClient::request`]
    #[instrument(skip(self, users))]
    pub async fn remove_users<I, S>(&self, id: &str, users: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let body = self.membership_body(id, users)?;
        let _: Value = self.request(Method::DELETE, "RemoveUsers", Some(&body)).await?;

        info!("users removed from group");
        Ok(())
    }
}
