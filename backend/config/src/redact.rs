//! Masking of credential material before it reaches logs.

use crate::Config;

/// Mask a secret, keeping only a two-character prefix as a recognition aid.
pub fn mask(value: &str) -> String {
    if value.chars().count() <= 4 {
        "****".to_string()
    } else {
        let head: String = value.chars().take(2).collect();
        format!("{head}****")
    }
}

impl Config {
    /// Copy of the configuration with every credential field masked, safe
    /// for startup logging.
    pub fn redacted(&self) -> Config {
        Config {
            password: self.password.as_deref().map(mask),
            service_password: self.service_password.as_deref().map(mask),
            client_secret: self.client_secret.as_deref().map(mask),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_keep_only_a_short_prefix() {
        assert_eq!(mask("hunter2-long-secret"), "hu****");
        assert_eq!(mask("abc"), "****");
    }

    #[test]
    fn redacted_config_hides_credentials_but_not_addresses() {
        let config = Config {
            password: Some("super-secret-password".to_string()),
            service_password: Some("svc-secret".to_string()),
            client_secret: Some("client-secret-value".to_string()),
            ..Config::default()
        };
        let redacted = config.redacted();
        assert_eq!(redacted.password.as_deref(), Some("su****"));
        assert_eq!(redacted.service_password.as_deref(), Some("sv****"));
        assert_eq!(redacted.client_secret.as_deref(), Some("cl****"));
        assert_eq!(redacted.base_url, config.base_url);
        assert_eq!(redacted.port, config.port);
    }
}
