//! API Gateway proxy integration envelope.

use crate::customer::error::AuthError;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

pub const INVALID_JSON_MESSAGE: &str = "Invalid JSON in request body";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiGatewayResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub headers: Value,
    pub body: String,
}

impl ApiGatewayResponse {
    pub fn json(status_code: u16, payload: &impl Serialize) -> Self {
        let body = serde_json::to_string(payload).unwrap_or_else(|e| {
            // only reachable with non-string map keys, which no payload has
            json!({"message": format!("failed to serialize response: {e}")}).to_string()
        });

        Self {
            status_code,
            headers: json!({"Content-Type": "application/json"}),
            body,
        }
    }

    /// Decoded `body`, mostly for assertions.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not valid JSON.
    pub fn body_json(&self) -> serde_json::Result<Value> {
        serde_json::from_str(&self.body)
    }
}

/// Extract and decode the request payload from a proxy event.
///
/// `body` may be a JSON string (the proxy integration default), an object
/// (direct invocation), or missing/null, which reads as `{}`.
///
/// # Errors
///
/// Returns [`AuthError::Validation`] when the body is not a JSON object of the
/// expected shape.
pub fn parse_body<T: DeserializeOwned>(event: &Value) -> Result<T, AuthError> {
    let invalid = |detail: String| {
        debug!("rejecting request body: {detail}");
        AuthError::Validation(INVALID_JSON_MESSAGE.to_string())
    };

    let payload = match event.get("body") {
        None | Some(Value::Null) => json!({}),
        Some(Value::String(text)) => {
            serde_json::from_str::<Value>(text).map_err(|e| invalid(e.to_string()))?
        }
        Some(object @ Value::Object(_)) => object.clone(),
        Some(other) => return Err(invalid(format!("unexpected body type: {other}"))),
    };

    if !payload.is_object() {
        return Err(invalid("body is not a JSON object".to_string()));
    }

    serde_json::from_value(payload).map_err(|e| invalid(e.to_string()))
}
