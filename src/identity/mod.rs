pub mod cognito;

use async_trait::async_trait;
use secrecy::SecretString;
use std::fmt;
use thiserror::Error;

pub const DEFAULT_TOKEN_TYPE: &str = "Bearer";
pub const DEFAULT_EXPIRES_IN: i64 = 3600;

pub const PHONE_NUMBER_ATTR: &str = "phone_number";
pub const NAME_ATTR: &str = "name";
pub const ROLE_ATTR: &str = "custom:role";

/// Provider failure classes the handlers branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    InvalidParameter,
    UsernameExists,
    NotAuthorized,
    UserNotFound,
    UserNotConfirmed,
    Other,
}

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ProviderError {
    pub kind: ProviderErrorKind,
    pub message: String,
}

impl ProviderError {
    pub fn new(kind: ProviderErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// True when the provider refused the `custom:role` attribute, which happens
    /// on user pools created without that custom attribute.
    #[must_use]
    pub fn rejects_role_attribute(&self) -> bool {
        self.kind == ProviderErrorKind::InvalidParameter && self.message.contains(ROLE_ATTR)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAttribute {
    pub name: String,
    pub value: String,
}

impl UserAttribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Tokens issued by a successful password authentication.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthTokens {
    pub id_token: String,
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

impl fmt::Debug for AuthTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthTokens")
            .field("id_token", &"***")
            .field("access_token", &"***")
            .field("refresh_token", &"***")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

/// Managed identity service holding customer credentials.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create a credential for `username`.
    async fn sign_up(
        &self,
        username: &str,
        password: &SecretString,
        attributes: &[UserAttribute],
    ) -> Result<(), ProviderError>;

    /// Verify `password` for `username` and issue session tokens.
    async fn authenticate(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<AuthTokens, ProviderError>;
}
