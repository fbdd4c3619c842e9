//! Translation of backend failures into actionable diagnostic text.
//!
//! Authentication failures get credential-specific guidance based on the
//! server's response body; everything else surfaces the most useful message
//! the response carried. Failures without an HTTP status pass through as
//! their own message.

use serde_json::Value;

use abagenta_core::{AgentaError, ApiFailure};

/// Render a failure as human-readable guidance. With `debug`, the request
/// context that produced the failure is appended.
pub fn diagnose(error: &AgentaError, debug: bool) -> String {
    match error {
        AgentaError::Api(failure) => diagnose_api(failure, debug),
        other => other.to_string(),
    }
}

fn diagnose_api(failure: &ApiFailure, debug: bool) -> String {
    let mut text = format!("API Error: {}", failure.status);

    if failure.status == 401 {
        text.push_str("\nAuthentication failed. ");
        if failure.body.contains("service-password") {
            text.push_str("The service password is invalid or incorrectly formatted.");
        } else if failure.body.contains("Authorization") {
            text.push_str("Basic authentication (username/password) is missing or invalid.");
        } else {
            text.push_str(&format!("Server message: {}", failure.body));
        }
        text.push_str("\n\nPlease verify your credentials in the environment:");
        text.push_str("\n- AB_AGENTA_USERNAME and AB_AGENTA_PASSWORD for basic auth");
        text.push_str("\n- AB_AGENTA_SERVICE_PASSWORD for API access");
        text.push_str("\n- AB_AGENTA_DATA_DIRECTORY and AB_AGENTA_CLIENT_SECRET if required");
    } else {
        text.push_str(&format!(" - {}", server_message(failure)));
    }

    if debug {
        text.push_str("\n\nDebug info:");
        text.push_str(&format!("\n- URL: {}", failure.url));
        text.push_str(&format!(
            "\n- Headers sent: {}",
            render_headers(&failure.headers)
        ));
    }

    text
}

/// Prefer a JSON `message` field, fall back to the raw body, then to the
/// bare HTTP status text.
fn server_message(failure: &ApiFailure) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(&failure.body) {
        if let Some(message) = value.get("message").and_then(Value::as_str) {
            return message.to_string();
        }
    }
    if !failure.body.is_empty() {
        return failure.body.clone();
    }
    reqwest::StatusCode::from_u16(failure.status)
        .ok()
        .and_then(|status| status.canonical_reason())
        .unwrap_or("Unknown Status")
        .to_string()
}

fn render_headers(headers: &[(String, String)]) -> String {
    let map: serde_json::Map<String, Value> = headers
        .iter()
        .map(|(name, value)| (name.clone(), Value::String(value.clone())))
        .collect();
    serde_json::to_string_pretty(&map).unwrap_or_else(|_| format!("{headers:?}"))
}
