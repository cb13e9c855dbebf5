use crate::{
    customer::{
        error::AuthError,
        handlers::{present, present_secret, HandlerConfig},
        phone::PhoneNumber,
        profile::{Role, UserProfile},
        response::{parse_body, ApiGatewayResponse},
    },
    directory::UserDirectory,
    identity::{
        IdentityProvider, ProviderError, UserAttribute, NAME_ATTR, PHONE_NUMBER_ATTR, ROLE_ATTR,
    },
};
use anyhow::Context;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

pub const REQUIRED_FIELDS_MESSAGE: &str = "user_name, mobile_number, password required";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

#[derive(Deserialize)]
pub struct SignupRequest {
    user_name: Option<String>,
    mobile_number: Option<String>,
    password: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct SignupResponse {
    message: &'static str,
    user_id: String,
    role: Role,
}

#[derive(Debug)]
enum Registration {
    Created(UserProfile),
    Existing(UserProfile),
}

impl Registration {
    fn into_response(self) -> ApiGatewayResponse {
        let (status, message, profile) = match self {
            Self::Created(profile) => (201, "Customer registered successfully", profile),
            Self::Existing(profile) => (200, "User already registered", profile),
        };

        ApiGatewayResponse::json(
            status,
            &SignupResponse {
                message,
                user_id: profile.user_id,
                role: profile.role,
            },
        )
    }
}

/// Registers customers by mobile number.
pub struct SignupHandler {
    directory: Arc<dyn UserDirectory>,
    provider: Arc<dyn IdentityProvider>,
    config: HandlerConfig,
}

impl SignupHandler {
    #[must_use]
    pub fn new(
        directory: Arc<dyn UserDirectory>,
        provider: Arc<dyn IdentityProvider>,
        config: HandlerConfig,
    ) -> Self {
        Self {
            directory,
            provider,
            config,
        }
    }

    /// Handle one API Gateway proxy event. Never fails: every error becomes a
    /// JSON response with a `message`.
    #[instrument(skip(self, event))]
    pub async fn handle(&self, event: Value) -> ApiGatewayResponse {
        match self.register(&event).await {
            Ok(registration) => registration.into_response(),
            Err(e) => {
                if e.status_code() >= 500 {
                    error!("signup failed: {e:#}");
                } else {
                    debug!("signup rejected: {e}");
                }

                e.into_response(self.config.verbose_errors(), INTERNAL_ERROR_MESSAGE)
            }
        }
    }

    async fn register(&self, event: &Value) -> Result<Registration, AuthError> {
        let request: SignupRequest = parse_body(event)?;

        let (Some(user_name), Some(mobile_number), Some(password)) = (
            present(request.user_name),
            present(request.mobile_number),
            present_secret(request.password),
        ) else {
            return Err(AuthError::Validation(REQUIRED_FIELDS_MESSAGE.to_string()));
        };

        let phone = PhoneNumber::parse(&mobile_number, self.config.country_code())?;

        // signup is idempotent by phone number
        if let Some(existing) = self
            .directory
            .find_by_phone(phone.e164())
            .await
            .context("Error checking if user exists")?
        {
            debug!(user_id = %existing.user_id, "phone number already registered");

            return Ok(Registration::Existing(existing));
        }

        self.create_credential(&user_name, &phone, &password)
            .await
            .map_err(|source| AuthError::AuthProvider {
                status: 500,
                message: INTERNAL_ERROR_MESSAGE.to_string(),
                source,
            })?;

        // Not conditional: two concurrent signups for one number can both land here.
        let profile = UserProfile::new_customer(&user_name, &phone);
        self.directory
            .put_profile(&profile)
            .await
            .context("Error storing user profile")?;

        info!(user_id = %profile.user_id, "customer registered");

        Ok(Registration::Created(profile))
    }

    async fn create_credential(
        &self,
        user_name: &str,
        phone: &PhoneNumber,
        password: &SecretString,
    ) -> Result<(), ProviderError> {
        let mut attributes = vec![
            UserAttribute::new(PHONE_NUMBER_ATTR, phone.e164()),
            UserAttribute::new(NAME_ATTR, user_name),
            UserAttribute::new(ROLE_ATTR, Role::Customer.as_str()),
        ];

        match self
            .provider
            .sign_up(phone.e164(), password, &attributes)
            .await
        {
            Err(e) if e.rejects_role_attribute() => {
                warn!("user pool has no {ROLE_ATTR} attribute, signing up without it");

                attributes.retain(|attribute| attribute.name != ROLE_ATTR);

                self.provider
                    .sign_up(phone.e164(), password, &attributes)
                    .await
            }
            result => result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        customer::handlers::test_support::{MemoryDirectory, MemoryProvider},
        identity::ProviderErrorKind,
    };
    use serde_json::json;

    fn handler(directory: &Arc<MemoryDirectory>, provider: &Arc<MemoryProvider>) -> SignupHandler {
        SignupHandler::new(directory.clone(), provider.clone(), HandlerConfig::new())
    }

    fn event(body: &Value) -> Value {
        json!({"body": body.to_string()})
    }

    fn asha() -> Value {
        json!({"user_name": "Asha", "mobile_number": "98-765-43210", "password": "Secret1"})
    }

    #[tokio::test]
    async fn test_signup_creates_customer() {
        let directory = Arc::new(MemoryDirectory::default());
        let provider = Arc::new(MemoryProvider::default());

        let response = handler(&directory, &provider).handle(event(&asha())).await;

        assert_eq!(response.status_code, 201);
        let body = response.body_json().unwrap_or_default();
        assert_eq!(body["message"], "Customer registered successfully");
        assert_eq!(body["role"], "CUSTOMER");

        let profiles = directory.profiles();
        assert_eq!(profiles.len(), 1);
        assert_eq!(body["user_id"], profiles[0].user_id.as_str());
        assert_eq!(profiles[0].phone_e164, "+919876543210");
        assert_eq!(profiles[0].phone_digits, "9876543210");
        assert_eq!(profiles[0].name, "Asha");
        assert!(provider.has_user("+919876543210"));

        let calls = provider.sign_up_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0],
            vec![
                UserAttribute::new(PHONE_NUMBER_ATTR, "+919876543210"),
                UserAttribute::new(NAME_ATTR, "Asha"),
                UserAttribute::new(ROLE_ATTR, "CUSTOMER"),
            ]
        );
    }

    #[tokio::test]
    async fn test_signup_is_idempotent_by_phone() {
        let directory = Arc::new(MemoryDirectory::default());
        let provider = Arc::new(MemoryProvider::default());
        let handler = handler(&directory, &provider);

        let first = handler.handle(event(&asha())).await;
        let second = handler
            .handle(event(&json!({
                "user_name": "Someone Else",
                "mobile_number": "9876543210",
                "password": "Other1"
            })))
            .await;

        assert_eq!(first.status_code, 201);
        assert_eq!(second.status_code, 200);

        let first = first.body_json().unwrap_or_default();
        let second = second.body_json().unwrap_or_default();
        assert_eq!(second["message"], "User already registered");
        assert_eq!(first["user_id"], second["user_id"]);
        assert_eq!(directory.profiles().len(), 1);
        assert_eq!(provider.sign_up_calls().len(), 1);
    }

    #[tokio::test]
    async fn test_signup_retries_without_role_attribute() {
        let directory = Arc::new(MemoryDirectory::default());
        let provider = Arc::new(MemoryProvider {
            without_role_attribute: true,
            ..MemoryProvider::default()
        });

        let response = handler(&directory, &provider).handle(event(&asha())).await;

        assert_eq!(response.status_code, 201);
        let calls = provider.sign_up_calls();
        assert_eq!(calls.len(), 2);
        assert!(calls[0].iter().any(|a| a.name == ROLE_ATTR));
        assert!(calls[1].iter().all(|a| a.name != ROLE_ATTR));
        assert_eq!(directory.profiles().len(), 1);
    }

    #[tokio::test]
    async fn test_signup_provider_error_is_internal() {
        let directory = Arc::new(MemoryDirectory::default());
        let provider = Arc::new(MemoryProvider {
            sign_up_failure: Some(ProviderError::new(
                ProviderErrorKind::InvalidParameter,
                "InvalidPasswordException: Password did not conform with policy",
            )),
            ..MemoryProvider::default()
        });

        let response = handler(&directory, &provider).handle(event(&asha())).await;

        assert_eq!(response.status_code, 500);
        let body = response.body_json().unwrap_or_default();
        assert_eq!(body["message"], "Internal Server Error");
        assert_eq!(
            body["error"],
            "InvalidPasswordException: Password did not conform with policy"
        );
        assert_eq!(provider.sign_up_calls().len(), 1);
        assert!(directory.profiles().is_empty());
    }

    #[tokio::test]
    async fn test_signup_hides_error_detail_when_not_verbose() {
        let directory = Arc::new(MemoryDirectory {
            fail_writes: true,
            ..MemoryDirectory::default()
        });
        let provider = Arc::new(MemoryProvider::default());
        let handler = SignupHandler::new(
            directory,
            provider,
            HandlerConfig::new().with_verbose_errors(false),
        );

        let response = handler.handle(event(&asha())).await;

        assert_eq!(response.status_code, 500);
        assert_eq!(
            response.body_json().unwrap_or_default(),
            json!({"message": "Internal Server Error"})
        );
    }

    #[tokio::test]
    async fn test_signup_directory_failure_is_internal() {
        let directory = Arc::new(MemoryDirectory {
            fail_queries: true,
            ..MemoryDirectory::default()
        });
        let provider = Arc::new(MemoryProvider::default());

        let response = handler(&directory, &provider).handle(event(&asha())).await;

        assert_eq!(response.status_code, 500);
        let body = response.body_json().unwrap_or_default();
        assert_eq!(body["message"], "Internal Server Error");
        assert!(body["error"]
            .as_str()
            .is_some_and(|e| e.starts_with("Error checking if user exists")));
        assert!(provider.sign_up_calls().is_empty());
    }

    #[tokio::test]
    async fn test_signup_requires_all_fields() {
        let directory = Arc::new(MemoryDirectory::default());
        let provider = Arc::new(MemoryProvider::default());
        let handler = handler(&directory, &provider);

        for body in [
            json!({"mobile_number": "9876543210", "password": "Secret1"}),
            json!({"user_name": "Asha", "password": "Secret1"}),
            json!({"user_name": "Asha", "mobile_number": "9876543210"}),
            json!({"user_name": "", "mobile_number": "9876543210", "password": "Secret1"}),
            json!({"user_name": "Asha", "mobile_number": "9876543210", "password": ""}),
        ] {
            let response = handler.handle(event(&body)).await;
            assert_eq!(response.status_code, 400, "{body}");
            assert_eq!(
                response.body_json().unwrap_or_default(),
                json!({"message": REQUIRED_FIELDS_MESSAGE})
            );
        }

        assert!(provider.sign_up_calls().is_empty());
    }

    #[tokio::test]
    async fn test_signup_rejects_bad_numbers() {
        let directory = Arc::new(MemoryDirectory::default());
        let provider = Arc::new(MemoryProvider::default());
        let handler = handler(&directory, &provider);

        for number in ["12345", "98765432101", "phone"] {
            let response = handler
                .handle(event(&json!({
                    "user_name": "Asha",
                    "mobile_number": number,
                    "password": "Secret1"
                })))
                .await;
            assert_eq!(response.status_code, 400, "{number}");
            assert_eq!(
                response.body_json().unwrap_or_default()["message"],
                "Mobile number must be exactly 10 digits"
            );
        }

        assert!(directory.profiles().is_empty());
    }

    #[tokio::test]
    async fn test_signup_malformed_json() {
        let directory = Arc::new(MemoryDirectory::default());
        let provider = Arc::new(MemoryProvider::default());

        let response = handler(&directory, &provider)
            .handle(json!({"body": "{\"user_name\": "}))
            .await;

        assert_eq!(response.status_code, 400);
        assert_eq!(
            response.body_json().unwrap_or_default(),
            json!({"message": "Invalid JSON in request body"})
        );
    }
}
