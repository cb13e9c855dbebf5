use crate::customer::phone::PhoneNumber;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use uuid::Uuid;

/// Role stored on a profile. Signup only ever writes `CUSTOMER`; any other
/// stored value is carried through unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Role {
    #[default]
    Customer,
    Other(String),
}

impl Role {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Customer => "CUSTOMER",
            Self::Other(role) => role,
        }
    }
}

impl From<&str> for Role {
    fn from(role: &str) -> Self {
        match role {
            "CUSTOMER" => Self::Customer,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(|role| Self::from(role.as_str()))
    }
}

/// Account status; `ACTIVE` at signup, other stored values are kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Status {
    #[default]
    Active,
    Other(String),
}

impl Status {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Active => "ACTIVE",
            Self::Other(status) => status,
        }
    }
}

impl From<&str> for Status {
    fn from(status: &str) -> Self {
        match status {
            "ACTIVE" => Self::Active,
            other => Self::Other(other.to_string()),
        }
    }
}

/// Customer record kept in the user directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub user_id: String,
    pub name: String,
    pub phone_e164: String,
    pub phone_digits: String,
    pub role: Role,
    pub status: Status,
}

impl UserProfile {
    /// Fresh active customer profile with a random `user_id`.
    #[must_use]
    pub fn new_customer(name: &str, phone: &PhoneNumber) -> Self {
        Self {
            user_id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            phone_e164: phone.e164().to_string(),
            phone_digits: phone.digits().to_string(),
            role: Role::Customer,
            status: Status::Active,
        }
    }
}
