use crate::{
    aws,
    cli::{actions::Function, telemetry},
    customer::{ApiGatewayResponse, HandlerConfig, LoginHandler, SignupHandler},
    directory::{dynamodb::DynamoUserDirectory, UserDirectory},
    identity::{cognito::CognitoIdentityProvider, IdentityProvider},
    GIT_COMMIT_HASH,
};
use anyhow::{anyhow, Result};
use lambda_runtime::{service_fn, LambdaEvent};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug)]
pub struct Args {
    pub function: Function,
    pub users_table: String,
    pub phone_index: String,
    pub cognito_client_id: String,
    pub country_code: String,
    pub verbose_errors: bool,
}

/// Build the AWS-backed collaborators and hand the selected handler to the
/// Lambda runtime loop.
///
/// # Errors
/// Returns an error if AWS configuration cannot be loaded or the runtime loop
/// stops with an error.
pub async fn execute(args: Args) -> Result<()> {
    info!(
        function = %args.function,
        version = env!("CARGO_PKG_VERSION"),
        commit = GIT_COMMIT_HASH,
        users_table = %args.users_table,
        phone_index = %args.phone_index,
        "starting"
    );

    let sdk_config = aws::sdk_config().await?;

    let directory: Arc<dyn UserDirectory> = Arc::new(DynamoUserDirectory::new(
        aws_sdk_dynamodb::Client::new(sdk_config),
        args.users_table,
        args.phone_index,
    ));
    let provider: Arc<dyn IdentityProvider> = Arc::new(CognitoIdentityProvider::new(
        aws_sdk_cognitoidentityprovider::Client::new(sdk_config),
        args.cognito_client_id,
    ));
    let config = HandlerConfig::new()
        .with_country_code(args.country_code)
        .with_verbose_errors(args.verbose_errors);

    let result = match args.function {
        Function::Signup => {
            let handler = SignupHandler::new(directory, provider, config);
            let handler = &handler;
            lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
                Ok::<_, lambda_runtime::Error>(flushed(handler.handle(event.payload).await).await)
            }))
            .await
        }
        Function::Login => {
            let handler = LoginHandler::new(directory, provider, config);
            let handler = &handler;
            lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
                Ok::<_, lambda_runtime::Error>(flushed(handler.handle(event.payload).await).await)
            }))
            .await
        }
    };

    telemetry::shutdown_tracer();

    result.map_err(|e| anyhow!("lambda runtime stopped: {e}"))
}

/// Export the invocation's spans before the response is handed back.
async fn flushed(response: ApiGatewayResponse) -> ApiGatewayResponse {
    if let Err(e) = tokio::task::spawn_blocking(telemetry::flush).await {
        warn!("span flush task failed: {e}");
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_flushed_returns_response_unchanged() {
        let response = ApiGatewayResponse::json(201, &json!({"message": "ok"}));

        assert_eq!(flushed(response.clone()).await, response);
    }
}
