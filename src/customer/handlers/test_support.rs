//! In-memory collaborators for handler tests.

use crate::{
    customer::profile::UserProfile,
    directory::{DirectoryError, UserDirectory},
    identity::{
        AuthTokens, IdentityProvider, ProviderError, ProviderErrorKind, UserAttribute,
        DEFAULT_EXPIRES_IN, DEFAULT_TOKEN_TYPE, ROLE_ATTR,
    },
};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use std::{collections::HashMap, sync::Mutex};

#[derive(Default)]
pub struct MemoryDirectory {
    pub profiles: Mutex<Vec<UserProfile>>,
    pub fail_queries: bool,
    pub fail_writes: bool,
}

impl MemoryDirectory {
    pub fn with_profile(profile: UserProfile) -> Self {
        let directory = Self::default();
        directory
            .profiles
            .lock()
            .expect("poisoned mutex")
            .push(profile);
        directory
    }

    pub fn profiles(&self) -> Vec<UserProfile> {
        self.profiles.lock().expect("poisoned mutex").clone()
    }
}

#[async_trait]
impl UserDirectory for MemoryDirectory {
    async fn find_by_phone(
        &self,
        phone_e164: &str,
    ) -> Result<Option<UserProfile>, DirectoryError> {
        if self.fail_queries {
            return Err(DirectoryError::Query("ResourceNotFoundException".to_string()));
        }

        Ok(self
            .profiles
            .lock()
            .expect("poisoned mutex")
            .iter()
            .find(|profile| profile.phone_e164 == phone_e164)
            .cloned())
    }

    async fn put_profile(&self, profile: &UserProfile) -> Result<(), DirectoryError> {
        if self.fail_writes {
            return Err(DirectoryError::Write(
                "ProvisionedThroughputExceededException".to_string(),
            ));
        }

        self.profiles
            .lock()
            .expect("poisoned mutex")
            .push(profile.clone());
        Ok(())
    }
}

/// Identity provider fake holding plain passwords.
#[derive(Default)]
pub struct MemoryProvider {
    pub passwords: Mutex<HashMap<String, String>>,
    pub sign_up_calls: Mutex<Vec<Vec<UserAttribute>>>,
    pub without_role_attribute: bool,
    pub unconfirmed: bool,
    pub sign_up_failure: Option<ProviderError>,
    pub authenticate_failure: Option<ProviderError>,
}

impl MemoryProvider {
    pub fn with_user(username: &str, password: &str) -> Self {
        let provider = Self::default();
        provider
            .passwords
            .lock()
            .expect("poisoned mutex")
            .insert(username.to_string(), password.to_string());
        provider
    }

    pub fn sign_up_calls(&self) -> Vec<Vec<UserAttribute>> {
        self.sign_up_calls.lock().expect("poisoned mutex").clone()
    }

    pub fn has_user(&self, username: &str) -> bool {
        self.passwords
            .lock()
            .expect("poisoned mutex")
            .contains_key(username)
    }
}

pub fn tokens() -> AuthTokens {
    AuthTokens {
        id_token: "id-token".to_string(),
        access_token: "access-token".to_string(),
        refresh_token: "refresh-token".to_string(),
        token_type: DEFAULT_TOKEN_TYPE.to_string(),
        expires_in: DEFAULT_EXPIRES_IN,
    }
}

#[async_trait]
impl IdentityProvider for MemoryProvider {
    async fn sign_up(
        &self,
        username: &str,
        password: &SecretString,
        attributes: &[UserAttribute],
    ) -> Result<(), ProviderError> {
        self.sign_up_calls
            .lock()
            .expect("poisoned mutex")
            .push(attributes.to_vec());

        if let Some(failure) = &self.sign_up_failure {
            return Err(failure.clone());
        }

        if self.without_role_attribute && attributes.iter().any(|a| a.name == ROLE_ATTR) {
            return Err(ProviderError::new(
                ProviderErrorKind::InvalidParameter,
                "InvalidParameterException: Attributes did not conform to the schema: \
                 Type for attribute {custom:role} could not be determined",
            ));
        }

        let mut passwords = self.passwords.lock().expect("poisoned mutex");
        if passwords.contains_key(username) {
            return Err(ProviderError::new(
                ProviderErrorKind::UsernameExists,
                "UsernameExistsException: User already exists",
            ));
        }
        passwords.insert(username.to_string(), password.expose_secret().to_string());

        Ok(())
    }

    async fn authenticate(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<AuthTokens, ProviderError> {
        if let Some(failure) = &self.authenticate_failure {
            return Err(failure.clone());
        }

        let passwords = self.passwords.lock().expect("poisoned mutex");
        let Some(stored) = passwords.get(username) else {
            return Err(ProviderError::new(
                ProviderErrorKind::UserNotFound,
                "UserNotFoundException: User does not exist.",
            ));
        };

        if stored != password.expose_secret() {
            return Err(ProviderError::new(
                ProviderErrorKind::NotAuthorized,
                "NotAuthorizedException: Incorrect username or password.",
            ));
        }

        if self.unconfirmed {
            return Err(ProviderError::new(
                ProviderErrorKind::UserNotConfirmed,
                "UserNotConfirmedException: User is not confirmed.",
            ));
        }

        Ok(tokens())
    }
}
