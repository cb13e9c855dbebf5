use anyhow::Result;
use customer_auth::cli::{actions::Function, start};

// Main function
#[tokio::main]
async fn main() -> Result<()> {
    // Parse configuration and initialize telemetry
    let action = start(Function::Signup)?;

    // Serve invocations until the runtime shuts down
    action.execute().await
}
