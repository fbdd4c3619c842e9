//! Invocation dispatcher: validate, execute, normalize or classify.
//!
//! Each invocation moves through Received → Validated → Executed →
//! Normalized|Classified → Responded. Validation failures resolve locally
//! without touching the backend, and every failure path comes back as an
//! error-flagged response — this function never raises to the caller.

use serde_json::Value;
use tracing::{debug, error};

use abagenta_client::diagnose;
use abagenta_core::{AgentaError, ToolRegistry, ToolResponse};

/// Route one named call through its tool.
pub async fn dispatch(
    registry: &ToolRegistry,
    name: &str,
    args: &Value,
    debug_info: bool,
) -> ToolResponse {
    let Some(tool) = registry.get(name) else {
        return error_response(&AgentaError::UnknownTool(name.to_string()), debug_info);
    };

    if let Some(missing) = missing_parameters(&tool.parameters(), args) {
        return error_response(
            &AgentaError::MissingParameters {
                tool: name.to_string(),
                params: missing,
            },
            debug_info,
        );
    }

    debug!(tool = name, "Dispatching tool call");
    match tool.execute(args).await {
        Ok(text) => ToolResponse::ok(text),
        Err(err) => {
            error!(tool = name, error = %err, "Tool call failed");
            error_response(&err, debug_info)
        }
    }
}

/// Every declared-required parameter missing from the argument bag, so the
/// caller learns about all of them at once.
fn missing_parameters(schema: &Value, args: &Value) -> Option<Vec<String>> {
    let required = schema.get("required")?.as_array()?;
    let missing: Vec<String> = required
        .iter()
        .filter_map(Value::as_str)
        .filter(|name| args.get(name).is_none_or(Value::is_null))
        .map(str::to_string)
        .collect();
    if missing.is_empty() {
        None
    } else {
        Some(missing)
    }
}

fn error_response(err: &AgentaError, debug_info: bool) -> ToolResponse {
    ToolResponse::error(format!("Error: {}", diagnose(err, debug_info)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use serde_json::json;

    use abagenta_client::SimulatedBackend;
    use abagenta_core::{ApiFailure, Tool};

    use crate::catalog;

    /// Counts executions so tests can prove the backend was never reached.
    struct CountingTool {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Tool for CountingTool {
        fn name(&self) -> &str {
            "counting"
        }

        fn description(&self) -> &str {
            "records whether it ran"
        }

        fn parameters(&self) -> Value {
            json!({
                "type": "object",
                "properties": {
                    "alpha": { "type": "string" },
                    "beta": { "type": "string" }
                },
                "required": ["alpha", "beta"]
            })
        }

        async fn execute(&self, _args: &Value) -> Result<String, AgentaError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok("ran".to_string())
        }
    }

    struct FailingTool;

    #[async_trait]
    impl Tool for FailingTool {
        fn name(&self) -> &str {
            "failing"
        }

        fn description(&self) -> &str {
            "always fails with a 401"
        }

        fn parameters(&self) -> Value {
            json!({ "type": "object", "properties": {} })
        }

        async fn execute(&self, _args: &Value) -> Result<String, AgentaError> {
            Err(AgentaError::Api(ApiFailure {
                status: 401,
                body: "invalid service-password".to_string(),
                url: "https://abagenta-mobile.de/api2_1/records/x".to_string(),
                headers: vec![("ab-servicepassword".to_string(), "***".to_string())],
            }))
        }
    }

    fn simulated_catalog() -> ToolRegistry {
        catalog(Arc::new(SimulatedBackend::new()))
    }

    #[tokio::test]
    async fn unknown_tool_is_reported_as_data() {
        let registry = simulated_catalog();
        let response = dispatch(&registry, "not_a_tool", &json!({}), false).await;
        assert!(response.is_error);
        assert_eq!(response.text, "Error: Unknown tool: not_a_tool");
    }

    #[tokio::test]
    async fn missing_parameters_name_every_field_and_skip_the_backend() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(CountingTool {
            calls: calls.clone(),
        }));

        let response = dispatch(&registry, "counting", &json!({}), false).await;
        assert!(response.is_error);
        assert_eq!(
            response.text,
            "Error: missing required parameters for counting: alpha, beta"
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        // Null counts as absent; one present field narrows the report.
        let response = dispatch(
            &registry,
            "counting",
            &json!({ "alpha": "x", "beta": null }),
            false,
        )
        .await;
        assert!(response.is_error);
        assert_eq!(
            response.text,
            "Error: missing required parameters for counting: beta"
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn backend_failures_are_classified_once() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(FailingTool));

        let response = dispatch(&registry, "failing", &json!({}), false).await;
        assert!(response.is_error);
        assert!(response.text.starts_with("Error: API Error: 401"));
        assert!(response
            .text
            .contains("The service password is invalid or incorrectly formatted."));

        let with_debug = dispatch(&registry, "failing", &json!({}), true).await;
        assert!(with_debug.text.contains("Debug info:"));
        assert!(with_debug.text.contains("- URL: https://abagenta-mobile.de"));
    }

    #[tokio::test]
    async fn get_record_dispatches_through_the_simulated_backend() {
        let registry = simulated_catalog();
        let response = dispatch(
            &registry,
            "get_record",
            &json!({ "objecttype": "-54346245", "id": "rec-1" }),
            false,
        )
        .await;
        assert!(!response.is_error);
        assert!(response.text.contains("\"system_id\": \"rec-1\""));
        assert!(response.text.contains("\"vertragsnummer\": \"VD-TEST-123456\""));

        // Identical read calls produce identical envelopes.
        let again = dispatch(
            &registry,
            "get_record",
            &json!({ "objecttype": "-54346245", "id": "rec-1" }),
            false,
        )
        .await;
        assert_eq!(response.text, again.text);
    }

    #[tokio::test]
    async fn filtered_listing_end_to_end() {
        let registry = simulated_catalog();
        let response = dispatch(
            &registry,
            "filter_records",
            &json!({
                "objecttype": "-54346245",
                "filter": { "$or": [{ "idadresse": "7" }] },
                "resolvetexts": true,
                "limit": 1
            }),
            false,
        )
        .await;
        assert!(!response.is_error);
        assert!(response.text.contains("\"idadresse\": \"7\""));
        assert!(response.text.contains("\"plaintext__idadresse\": \"Test User, John\""));
        assert!(response.text.contains("\"plaintext__spartennr\": \"KFZ\""));
        assert!(response.text.contains("Total Count: 2"));
        assert!(response.text.contains("Content-Range: items 0-0/2"));
    }

    #[tokio::test]
    async fn create_record_confirms_a_fresh_id() {
        let registry = simulated_catalog();
        let args = json!({
            "objecttype": "-54346245",
            "data": { "vertragsnummer": "VD-NEW-1" }
        });
        let first = dispatch(&registry, "create_record", &args, false).await;
        let second = dispatch(&registry, "create_record", &args, false).await;
        assert!(!first.is_error);
        assert!(first
            .text
            .starts_with("Record created successfully with ID: test-"));
        assert_ne!(first.text, second.text);
    }

    #[tokio::test]
    async fn download_document_summarizes_the_payload() {
        let registry = simulated_catalog();
        let response = dispatch(
            &registry,
            "download_document",
            &json!({ "id": "doc-1" }),
            false,
        )
        .await;
        assert!(!response.is_error);
        assert!(response.text.starts_with("Document downloaded successfully"));
        assert!(response.text.contains("Content-Type: application/pdf"));
        assert!(response.text.contains("Filename: test-document.pdf"));
        assert!(response.text.contains("Data (base64): "));
    }

    #[tokio::test]
    async fn upload_document_reads_the_file_and_confirms() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan_2022_1_1.pdf");
        std::fs::write(&path, b"fake pdf bytes").unwrap();

        let registry = simulated_catalog();
        let response = dispatch(
            &registry,
            "upload_document",
            &json!({
                "addressid": "7",
                "filepath": path.to_str().unwrap()
            }),
            false,
        )
        .await;
        assert!(!response.is_error);
        assert!(response
            .text
            .starts_with("Document uploaded successfully with ID: doc-test-"));
    }

    #[tokio::test]
    async fn upload_document_with_unreadable_file_reports_as_data() {
        let registry = simulated_catalog();
        let response = dispatch(
            &registry,
            "upload_document",
            &json!({
                "addressid": "7",
                "filepath": "/definitely/not/here.pdf"
            }),
            false,
        )
        .await;
        assert!(response.is_error);
        assert!(response.text.contains("failed to read /definitely/not/here.pdf"));
    }

    #[tokio::test]
    async fn metadata_tools_round_trip() {
        let registry = simulated_catalog();

        let types = dispatch(&registry, "get_objecttypes", &json!({}), false).await;
        assert!(!types.is_error);
        assert!(types.text.contains("Vertragsdaten"));
        assert!(types.text.contains("Adressdaten"));

        let props = dispatch(
            &registry,
            "get_properties",
            &json!({ "objecttype": "-54346245" }),
            false,
        )
        .await;
        assert!(!props.is_error);
        assert!(props.text.contains("\"plaintext__datatype_user\": \"Text\""));
    }
}
