//! Process-wide AWS SDK configuration.
//!
//! Loaded once on first use and kept for the lifetime of the execution
//! environment, so warm invocations reuse credentials and connection pools.

use crate::APP_NAME;
use anyhow::{Context, Result};
use aws_config::{AppName, BehaviorVersion, SdkConfig};
use tokio::sync::OnceCell;
use tracing::debug;

static SDK_CONFIG: OnceCell<SdkConfig> = OnceCell::const_new();

/// Shared SDK configuration, resolved from the Lambda environment on first call.
///
/// # Errors
///
/// Returns an error if the application name is rejected by the SDK.
pub async fn sdk_config() -> Result<&'static SdkConfig> {
    SDK_CONFIG
        .get_or_try_init(|| async {
            let app_name = AppName::new(APP_NAME).context("invalid SDK application name")?;

            let config = aws_config::defaults(BehaviorVersion::latest())
                .app_name(app_name)
                .load()
                .await;

            debug!(region = ?config.region(), "loaded AWS SDK configuration");

            Ok::<_, anyhow::Error>(config)
        })
        .await
}
