use crate::{
    customer::{
        error::AuthError,
        handlers::{present, present_secret, HandlerConfig},
        phone::PhoneNumber,
        profile::{Role, UserProfile},
        response::{parse_body, ApiGatewayResponse},
    },
    directory::UserDirectory,
    identity::{AuthTokens, IdentityProvider, ProviderError, ProviderErrorKind},
};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

pub const REQUIRED_FIELDS_MESSAGE: &str = "mobile_number and password are required";
pub const SIGN_UP_FIRST_MESSAGE: &str = "User not found. Please sign up first.";
pub const PROVIDER_USER_MISSING_MESSAGE: &str = "User not found in Cognito";
pub const AUTHENTICATION_FAILED_MESSAGE: &str = "Authentication failed";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Deserialize)]
pub struct LoginRequest {
    mobile_number: Option<String>,
    password: Option<String>,
}

#[derive(Serialize)]
pub struct LoginResponse {
    message: &'static str,
    user_id: String,
    name: String,
    role: Role,
    phone: String,
    id_token: String,
    access_token: String,
    refresh_token: String,
    token_type: String,
    expires_in: i64,
}

impl LoginResponse {
    fn new(profile: UserProfile, phone: &PhoneNumber, tokens: AuthTokens) -> Self {
        Self {
            message: "Login successful",
            user_id: profile.user_id,
            name: profile.name,
            role: profile.role,
            phone: phone.e164().to_string(),
            id_token: tokens.id_token,
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            token_type: tokens.token_type,
            expires_in: tokens.expires_in,
        }
    }
}

/// Authenticates registered customers and issues session tokens.
pub struct LoginHandler {
    directory: Arc<dyn UserDirectory>,
    provider: Arc<dyn IdentityProvider>,
    config: HandlerConfig,
}

impl LoginHandler {
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
        match self.login(&event).await {
            Ok(response) => ApiGatewayResponse::json(200, &response),
            Err(e) => {
                if e.status_code() >= 500 {
                    error!("login failed: {e:#}");
                } else {
                    debug!("login rejected: {e}");
                }

                e.into_response(self.config.verbose_errors(), INTERNAL_ERROR_MESSAGE)
            }
        }
    }

    async fn login(&self, event: &Value) -> Result<LoginResponse, AuthError> {
        let request: LoginRequest = parse_body(event)?;

        let (Some(mobile_number), Some(password)) = (
            present(request.mobile_number),
            present_secret(request.password),
        ) else {
            return Err(AuthError::Validation(REQUIRED_FIELDS_MESSAGE.to_string()));
        };

        let phone = PhoneNumber::parse(&mobile_number, self.config.country_code())?;

        let Some(profile) = self
            .directory
            .find_by_phone(phone.e164())
            .await
            .context("Error looking up user")?
        else {
            return Err(AuthError::NotFound {
                message: SIGN_UP_FIRST_MESSAGE.to_string(),
                user_id: None,
            });
        };

        let tokens = self
            .provider
            .authenticate(phone.e164(), &password)
            .await
            .map_err(|e| provider_failure(e, &profile.user_id))?;

        info!(user_id = %profile.user_id, "customer logged in");

        Ok(LoginResponse::new(profile, &phone, tokens))
    }
}

fn provider_failure(error: ProviderError, user_id: &str) -> AuthError {
    let user_id = user_id.to_string();

    match error.kind {
        ProviderErrorKind::NotAuthorized => AuthError::InvalidCredentials { user_id },
        ProviderErrorKind::UserNotFound => AuthError::NotFound {
            message: PROVIDER_USER_MISSING_MESSAGE.to_string(),
            user_id: Some(user_id),
        },
        ProviderErrorKind::UserNotConfirmed => AuthError::UnconfirmedAccount { user_id },
        _ => AuthError::AuthProvider {
            status: 400,
            message: AUTHENTICATION_FAILED_MESSAGE.to_string(),
            source: error,
        },
    }
}
