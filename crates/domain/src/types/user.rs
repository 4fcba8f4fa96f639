//! User and user-group resource types

use serde::{Deserialize, Serialize};

use crate::impl_wire_enum_conversions;

/// How a user signs in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuthenticationType {
    #[default]
    #[serde(rename = "microsoft")]
    Microsoft,
    #[serde(rename = "google")]
    Google,
    /// Account activated through a link returned by the create call.
    #[serde(rename = "activationlink")]
    ActivationLink,
}

impl_wire_enum_conversions!(AuthenticationType {
    Microsoft => "microsoft",
    Google => "google",
    ActivationLink => "activationlink",
});

/// Default UI language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "fi-FI")]
    Finnish,
    #[serde(rename = "en-US")]
    English,
}

impl_wire_enum_conversions!(Language {
    Finnish => "fi-FI",
    English => "en-US",
});

/// User account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Email used for login.
    pub user_name: String,
    /// Defaults to [`AuthenticationType::Microsoft`] on create.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authentication_type: Option<AuthenticationType>,
    /// Defaults to [`Language::Finnish`] on create.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    /// Optional account expiry, `YYYY-MM-DD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<String>,
}

impl User {
    pub fn new(user_name: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            authentication_type: None,
            language: None,
            valid_until: None,
        }
    }

    pub fn with_authentication_type(mut self, authentication_type: AuthenticationType) -> Self {
        self.authentication_type = Some(authentication_type);
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    pub fn with_valid_until(mut self, valid_until: impl Into<String>) -> Self {
        self.valid_until = Some(valid_until.into());
        self
    }

    /// Copy with authentication type and language filled with defaults.
    pub fn with_defaults(mut self) -> Self {
        self.authentication_type.get_or_insert_with(AuthenticationType::default);
        self.language.get_or_insert_with(Language::default);
        self
    }

    pub fn uses_activation_link(&self) -> bool {
        self.authentication_type == Some(AuthenticationType::ActivationLink)
    }
}

/// User group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserGroup {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Member emails.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<String>>,
}

/// Result of creating a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateUserOutcome {
    /// The account exists. `activation_link` is only returned for
    /// [`AuthenticationType::ActivationLink`] users.
    Created { activation_link: Option<String> },
}

impl CreateUserOutcome {
    pub fn activation_link(&self) -> Option<&str> {
        match self {
            Self::Created { activation_link } => activation_link.as_deref(),
        }
    }
}
