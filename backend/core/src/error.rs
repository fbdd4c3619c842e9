use thiserror::Error;

/// Request context captured when the remote service answers with a non-2xx
/// status. Everything the diagnostics layer needs to explain the failure.
#[derive(Debug, Clone)]
pub struct ApiFailure {
    /// HTTP status code of the response.
    pub status: u16,
    /// Raw response body text.
    pub body: String,
    /// Final request URL.
    pub url: String,
    /// Headers that were sent with the request.
    pub headers: Vec<(String, String)>,
}

/// Top-level error type for the aB-Agenta MCP runtime.
#[derive(Debug, Error)]
pub enum AgentaError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("missing required parameters for {}: {}", .tool, .params.join(", "))]
    MissingParameters { tool: String, params: Vec<String> },

    /// The remote service answered with an error status.
    #[error("API Error: {}", .0.status)]
    Api(ApiFailure),

    /// Connectivity, timeout, or serialization failure with no HTTP status.
    #[error("{0}")]
    Transport(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_parameters_names_every_field() {
        let err = AgentaError::MissingParameters {
            tool: "get_record".to_string(),
            params: vec!["objecttype".to_string(), "id".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "missing required parameters for get_record: objecttype, id"
        );
    }

    #[test]
    fn api_error_shows_status() {
        let err = AgentaError::Api(ApiFailure {
            status: 404,
            body: String::new(),
            url: "https://example.invalid/api2_1/records/x/y".to_string(),
            headers: Vec::new(),
        });
        assert_eq!(err.to_string(), "API Error: 404");
    }

    #[test]
    fn transport_error_is_its_own_message() {
        let err = AgentaError::Transport("connection refused".to_string());
        assert_eq!(err.to_string(), "connection refused");
    }
}
