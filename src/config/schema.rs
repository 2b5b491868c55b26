//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files, and
//! every field has a default so a minimal config file works.

use serde::{Deserialize, Serialize};

/// Root configuration for the hub.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct HubConfig {
    /// Admin API settings (bind address, token).
    pub admin: AdminConfig,

    /// The managed proxy: admin endpoint, credential, timeouts.
    pub proxy: ProxySettings,

    /// Hub-side routing settings.
    pub hub: HubSettings,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Statically configured services, registered at startup.
    pub services: Vec<ServiceConfig>,
}

/// Admin API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Admin API bind address.
    pub bind_address: String,

    /// Bearer token callers must present.
    pub api_token: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8081".to_string(),
            // WARNING: This is a placeholder! Change this in production.
            api_token: "CHANGE_ME_IN_PRODUCTION".to_string(),
        }
    }
}

/// The proxy whose routing table this hub manages.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProxySettings {
    /// Base URL of the proxy's admin API.
    pub api_url: String,

    /// Bearer token for the proxy's admin API.
    pub auth_token: String,

    /// Connection establishment timeout in seconds.
    pub connect_timeout_secs: u64,

    /// Per-call request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ProxySettings {
    fn default() -> Self {
        Self {
            api_url: "http://127.0.0.1:8001".to_string(),
            auth_token: String::new(),
            connect_timeout_secs: 5,
            request_timeout_secs: 20,
        }
    }
}

/// Hub-side routing settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HubSettings {
    /// Public URL of the hub itself; when set, the default route `*/`
    /// points here so unmatched traffic lands on the hub.
    pub public_url: Option<String>,

    /// Seconds between timer-triggered reconciliation passes; 0 disables
    /// the timer (passes then run only on admin triggers).
    pub check_interval_secs: u64,
}

impl Default for HubSettings {
    fn default() -> Self {
        Self {
            public_url: None,
            check_interval_secs: 30,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// A statically configured service.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
    /// Unique service name.
    pub name: String,

    /// Reachable address of the service.
    pub target: String,

    /// Routed host; defaults to the wildcard host.
    #[serde(default = "default_service_host")]
    pub host: String,

    /// Routed path; defaults to `/services/{name}/`.
    #[serde(default)]
    pub path: Option<String>,
}

fn default_service_host() -> String {
    "*".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_parses_with_defaults() {
        let config: HubConfig = toml::from_str(
            r#"
            [proxy]
            auth_token = "proxy-secret"
            "#,
        )
        .unwrap();

        assert_eq!(config.proxy.api_url, "http://127.0.0.1:8001");
        assert_eq!(config.proxy.auth_token, "proxy-secret");
        assert_eq!(config.admin.bind_address, "127.0.0.1:8081");
        assert_eq!(config.hub.check_interval_secs, 30);
        assert!(config.services.is_empty());
    }

    #[test]
    fn test_service_entries_parse() {
        let config: HubConfig = toml::from_str(
            r#"
            [[services]]
            name = "announcer"
            target = "http://10.0.0.9:9999"

            [[services]]
            name = "docs"
            target = "http://10.0.0.10:8000"
            host = "docs.example"
            path = "/"
            "#,
        )
        .unwrap();

        assert_eq!(config.services.len(), 2);
        assert_eq!(config.services[0].host, "*");
        assert_eq!(config.services[0].path, None);
        assert_eq!(config.services[1].host, "docs.example");
        assert_eq!(config.services[1].path.as_deref(), Some("/"));
    }
}
