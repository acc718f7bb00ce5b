//! API configuration types.

use serde::{Deserialize, Serialize};

/// API server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Shared-secret authentication configuration
    #[serde(default)]
    pub auth: AuthConfig,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            auth: AuthConfig::default(),
        }
    }
}

impl ApiConfig {
    /// Returns the server bind address.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Shared-secret authentication configuration.
///
/// Two independent secrets are supported: an API key checked against the
/// `X-API-Key` header, and a token checked against `Authorization: Bearer`.
/// With neither configured the surface is open; the deployment is expected
/// to sit behind its own perimeter in that case.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Expected `X-API-Key` header value, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Expected bearer token, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl AuthConfig {
    /// Returns true if no secret is configured at all.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.api_key.is_none() && self.token.is_none()
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_config_default() {
        let config = ApiConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert!(config.auth.is_open());
    }

    #[test]
    fn test_bind_address() {
        let config = ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 8090,
            ..Default::default()
        };
        assert_eq!(config.bind_address(), "127.0.0.1:8090");
    }

    #[test]
    fn test_auth_config_open() {
        assert!(AuthConfig::default().is_open());
        let closed = AuthConfig {
            api_key: Some("secret".to_string()),
            token: None,
        };
        assert!(!closed.is_open());
    }
}
