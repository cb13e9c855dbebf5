use crate::identity::{
    AuthTokens, IdentityProvider, ProviderError, ProviderErrorKind, UserAttribute,
    DEFAULT_EXPIRES_IN, DEFAULT_TOKEN_TYPE,
};
use async_trait::async_trait;
use aws_sdk_cognitoidentityprovider::{
    error::{DisplayErrorContext, ProvideErrorMetadata, SdkError},
    operation::{
        initiate_auth::{InitiateAuthError, InitiateAuthOutput},
        sign_up::SignUpError,
    },
    types::{AttributeType, AuthFlowType, AuthenticationResultType},
    Client,
};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument};

/// [`IdentityProvider`] backed by a Cognito user pool app client.
#[derive(Debug, Clone)]
pub struct CognitoIdentityProvider {
    client: Client,
    client_id: String,
}

impl CognitoIdentityProvider {
    #[must_use]
    pub fn new(client: Client, client_id: impl Into<String>) -> Self {
        Self {
            client,
            client_id: client_id.into(),
        }
    }
}

#[async_trait]
impl IdentityProvider for CognitoIdentityProvider {
    #[instrument(skip(self, password, attributes))]
    async fn sign_up(
        &self,
        username: &str,
        password: &SecretString,
        attributes: &[UserAttribute],
    ) -> Result<(), ProviderError> {
        let attributes = attributes
            .iter()
            .map(|attribute| {
                AttributeType::builder()
                    .name(&attribute.name)
                    .value(&attribute.value)
                    .build()
                    .map_err(|e| ProviderError::new(ProviderErrorKind::Other, e.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let output = self
            .client
            .sign_up()
            .client_id(&self.client_id)
            .username(username)
            .password(password.expose_secret())
            .set_user_attributes(Some(attributes))
            .send()
            .await
            .map_err(|e| classify(e, sign_up_kind))?;

        debug!(
            confirmed = output.user_confirmed(),
            "identity provider accepted signup"
        );

        Ok(())
    }

    #[instrument(skip(self, password))]
    async fn authenticate(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<AuthTokens, ProviderError> {
        let output = self
            .client
            .initiate_auth()
            .client_id(&self.client_id)
            .auth_flow(AuthFlowType::UserPasswordAuth)
            .auth_parameters("USERNAME", username)
            .auth_parameters("PASSWORD", password.expose_secret())
            .send()
            .await
            .map_err(|e| classify(e, initiate_auth_kind))?;

        tokens_or_challenge(&output)
    }
}

/// A challenge response carries no tokens and counts as an `Other` failure.
fn tokens_or_challenge(output: &InitiateAuthOutput) -> Result<AuthTokens, ProviderError> {
    let Some(result) = output.authentication_result() else {
        let challenge = output
            .challenge_name()
            .map_or("unknown", |challenge| challenge.as_str());

        return Err(ProviderError::new(
            ProviderErrorKind::Other,
            format!("authentication challenge required: {challenge}"),
        ));
    };

    Ok(tokens_from_result(result))
}

fn sign_up_kind(error: &SignUpError) -> ProviderErrorKind {
    match error {
        SignUpError::InvalidParameterException(_) => ProviderErrorKind::InvalidParameter,
        SignUpError::UsernameExistsException(_) => ProviderErrorKind::UsernameExists,
        _ => ProviderErrorKind::Other,
    }
}

fn initiate_auth_kind(error: &InitiateAuthError) -> ProviderErrorKind {
    match error {
        InitiateAuthError::NotAuthorizedException(_) => ProviderErrorKind::NotAuthorized,
        InitiateAuthError::UserNotFoundException(_) => ProviderErrorKind::UserNotFound,
        InitiateAuthError::UserNotConfirmedException(_) => ProviderErrorKind::UserNotConfirmed,
        InitiateAuthError::InvalidParameterException(_) => ProviderErrorKind::InvalidParameter,
        _ => ProviderErrorKind::Other,
    }
}

/// Reduce an SDK failure to a [`ProviderError`]; only modeled service errors
/// get a specific kind, transport and timeout failures are `Other`.
fn classify<E>(error: SdkError<E>, kind_of: fn(&E) -> ProviderErrorKind) -> ProviderError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
{
    match error {
        SdkError::ServiceError(context) => {
            let service_error = context.into_err();

            ProviderError::new(
                kind_of(&service_error),
                format!(
                    "{}: {}",
                    service_error.code().unwrap_or("Unknown"),
                    service_error.message().unwrap_or("no message")
                ),
            )
        }
        other => ProviderError::new(
            ProviderErrorKind::Other,
            DisplayErrorContext(&other).to_string(),
        ),
    }
}

fn tokens_from_result(result: &AuthenticationResultType) -> AuthTokens {
    let expires_in = match result.expires_in() {
        0 => DEFAULT_EXPIRES_IN,
        seconds => i64::from(seconds),
    };

    AuthTokens {
        id_token: result.id_token().unwrap_or_default().to_string(),
        access_token: result.access_token().unwrap_or_default().to_string(),
        refresh_token: result.refresh_token().unwrap_or_default().to_string(),
        token_type: result
            .token_type()
            .unwrap_or(DEFAULT_TOKEN_TYPE)
            .to_string(),
        expires_in,
    }
}
