pub mod dynamodb;

use crate::customer::profile::UserProfile;
use async_trait::async_trait;
use thiserror::Error;

pub const DEFAULT_PHONE_INDEX: &str = "GSI_PHONE";

pub const PRIMARY_KEY_ATTR: &str = "PK";
pub const PHONE_INDEX_KEY_ATTR: &str = "GSI_PHONE_PK";

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("directory query failed: {0}")]
    Query(String),
    #[error("directory write failed: {0}")]
    Write(String),
}

/// Storage of customer profiles, addressable by phone number.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Look up the profile registered for `phone_e164` through the phone index.
    async fn find_by_phone(
        &self,
        phone_e164: &str,
    ) -> Result<Option<UserProfile>, DirectoryError>;

    /// Store `profile` unconditionally.
    async fn put_profile(&self, profile: &UserProfile) -> Result<(), DirectoryError>;
}

#[must_use]
pub fn user_key(user_id: &str) -> String {
    format!("USER#{user_id}")
}

#[must_use]
pub fn phone_key(phone_e164: &str) -> String {
    format!("PHONE#{phone_e164}")
}
