use reqwest::{Client, Response};
use serde_json::Value;
use std::time::Duration;

use crate::errors::PricingError;

/// Build a client with a bounded request timeout.
pub(crate) fn build_client(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Read an upstream response as JSON.
///
/// Non-2xx answers become [`PricingError::Upstream`] carrying whatever code and
/// message the body exposes. Undecodable 2xx bodies become
/// [`PricingError::MalformedResponse`].
pub(crate) async fn read_json(provider: &str, response: Response) -> Result<Value, PricingError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| PricingError::from_reqwest(provider, e))?;

    if !status.is_success() {
        let (code, message) = serde_json::from_str::<Value>(&body)
            .map(|v| error_fields(&v))
            .unwrap_or((None, None));
        return Err(PricingError::Upstream {
            provider: provider.to_string(),
            status: status.as_u16(),
            code,
            message,
        });
    }

    serde_json::from_str(&body).map_err(|e| PricingError::MalformedResponse {
        provider: provider.to_string(),
        message: e.to_string(),
    })
}

/// Pull `(code, message)` out of an upstream error body.
///
/// Recognised shapes:
/// - `{"code": "...", "message": "..."}`
/// - `{"error": "...", "message": "..."}`
/// - `{"error": {"code": "...", "message": "..."}}`
pub(crate) fn error_fields(body: &Value) -> (Option<String>, Option<String>) {
    let text = |v: Option<&Value>| v.and_then(Value::as_str).map(str::to_string);

    match body.get("error") {
        Some(Value::Object(inner)) => (
            text(inner.get("code")).or_else(|| text(body.get("code"))),
            text(inner.get("message")).or_else(|| text(body.get("message"))),
        ),
        Some(Value::String(code)) => (Some(code.clone()), text(body.get("message"))),
        _ => (text(body.get("code")), text(body.get("message"))),
    }
}
