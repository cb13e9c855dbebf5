use crate::customer::response::ApiGatewayResponse;
use crate::identity::ProviderError;
use serde_json::{json, Map, Value};
use thiserror::Error;

/// Failure of a signup or login request, mapped one to one onto a response.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(String),
    #[error("{message}")]
    NotFound {
        message: String,
        user_id: Option<String>,
    },
    #[error("Invalid password")]
    InvalidCredentials { user_id: String },
    #[error("Please verify your account")]
    UnconfirmedAccount { user_id: String },
    #[error("{message}")]
    AuthProvider {
        status: u16,
        message: String,
        #[source]
        source: ProviderError,
    },
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AuthError {
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::NotFound { .. } => 404,
            Self::InvalidCredentials { .. } => 401,
            Self::UnconfirmedAccount { .. } => 403,
            Self::AuthProvider { status, .. } => *status,
            Self::Internal(_) => 500,
        }
    }

    /// Render the error as a JSON body.
    ///
    /// `verbose` controls whether raw collaborator error text is echoed in the
    /// `error` field. `internal_message` is the `message` of an
    /// [`AuthError::Internal`] body; each handler has its own wording.
    #[must_use]
    pub fn to_body(&self, verbose: bool, internal_message: &str) -> Value {
        let mut body = Map::new();

        match self {
            Self::Validation(message) => {
                body.insert("message".into(), json!(message));
            }
            Self::NotFound { message, user_id } => {
                body.insert("message".into(), json!(message));
                if let Some(user_id) = user_id {
                    body.insert("user_id".into(), json!(user_id));
                }
            }
            Self::InvalidCredentials { user_id } | Self::UnconfirmedAccount { user_id } => {
                body.insert("message".into(), json!(self.to_string()));
                body.insert("user_id".into(), json!(user_id));
            }
            Self::AuthProvider {
                message, source, ..
            } => {
                body.insert("message".into(), json!(message));
                if verbose {
                    body.insert("error".into(), json!(source.to_string()));
                }
            }
            Self::Internal(error) => {
                body.insert("message".into(), json!(internal_message));
                if verbose {
                    body.insert("error".into(), json!(format!("{error:#}")));
                }
            }
        }

        Value::Object(body)
    }

    #[must_use]
    pub fn into_response(self, verbose: bool, internal_message: &str) -> ApiGatewayResponse {
        ApiGatewayResponse::json(
            self.status_code(),
            &self.to_body(verbose, internal_message),
        )
    }
}
