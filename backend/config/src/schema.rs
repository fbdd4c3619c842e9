use serde::Deserialize;

/// aB-Agenta MCP server configuration, established once at process start.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Base URL of the aB-Agenta REST service.
    pub base_url: String,
    /// Basic-auth username.
    pub username: Option<String>,
    /// Basic-auth password.
    pub password: Option<String>,
    /// Value for the `ab-servicepassword` header.
    pub service_password: Option<String>,
    /// Value for the `ab-datadirectory` header.
    pub data_directory: Option<String>,
    /// Value for the `ab-client-secret` header.
    pub client_secret: Option<String>,
    /// Serve deterministic canned data instead of calling the remote service.
    pub test_mode: bool,
    /// Append request details to diagnostic messages.
    pub debug: bool,
    /// HTTP server bind address.
    pub bind_address: String,
    /// HTTP server port.
    pub port: u16,
    /// Log level fallback when RUST_LOG is unset.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "https://abagenta-mobile.de".to_string(),
            username: None,
            password: None,
            service_password: None,
            data_directory: None,
            client_secret: None,
            test_mode: false,
            debug: false,
            bind_address: "0.0.0.0".to_string(),
            port: 3000,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("AB_AGENTA_BASE_URL")
                .unwrap_or_else(|_| "https://abagenta-mobile.de".to_string()),
            username: std::env::var("AB_AGENTA_USERNAME").ok(),
            password: std::env::var("AB_AGENTA_PASSWORD").ok(),
            service_password: std::env::var("AB_AGENTA_SERVICE_PASSWORD").ok(),
            data_directory: std::env::var("AB_AGENTA_DATA_DIRECTORY").ok(),
            client_secret: std::env::var("AB_AGENTA_CLIENT_SECRET").ok(),
            test_mode: flag("AB_AGENTA_TEST_MODE"),
            debug: flag("DEBUG"),
            bind_address: std::env::var("BIND").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        }
    }
}

fn flag(name: &str) -> bool {
    std::env::var(name).map(|v| v == "true").unwrap_or(false)
}
