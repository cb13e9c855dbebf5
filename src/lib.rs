//! # Customer Auth (mobile number signup & login)
//!
//! `customer-auth` ships two AWS Lambda handlers that register and authenticate
//! customers by mobile number.
//!
//! ## Identity
//!
//! A customer is identified by a normalized phone number: every non-digit is
//! stripped, exactly 10 digits must remain, and the configured country calling
//! code is prefixed (`+919876543210`). That number is the Cognito username.
//!
//! - **Signup** is idempotent by phone number. A second signup for a number that
//!   already has a profile answers `200` with the existing `user_id`.
//! - **Login** requires a stored profile before asking Cognito to verify the
//!   password, so an unknown number answers `404` regardless of the password.
//!
//! ## Storage
//!
//! Profiles live in a DynamoDB table keyed by `USER#<user_id>` with a `GSI_PHONE`
//! index on `PHONE#<phone_e164>`. Credentials never touch the table; they are
//! owned by the Cognito user pool.

pub mod aws;
pub mod cli;
pub mod customer;
pub mod directory;
pub mod identity;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
