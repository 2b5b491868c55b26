//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check addresses and URLs actually parse
//! - Detect duplicate or malformed service entries
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: HubConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;
use thiserror::Error;
use url::Url;

use crate::config::schema::HubConfig;
use crate::routes::RouteSpec;

/// One semantic problem in a config.
#[derive(Debug, Clone, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Validate a parsed config, collecting every problem found.
pub fn validate_config(config: &HubConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.admin.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "admin.bind_address",
            format!("'{}' is not a socket address", config.admin.bind_address),
        ));
    }
    if config.admin.api_token.is_empty() {
        errors.push(ValidationError::new("admin.api_token", "must not be empty"));
    }

    match Url::parse(&config.proxy.api_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => errors.push(ValidationError::new(
            "proxy.api_url",
            format!("scheme '{}' is not http or https", url.scheme()),
        )),
        Err(e) => errors.push(ValidationError::new("proxy.api_url", e.to_string())),
    }
    if config.proxy.auth_token.is_empty() {
        errors.push(ValidationError::new("proxy.auth_token", "must not be empty"));
    }
    if config.proxy.connect_timeout_secs == 0 {
        errors.push(ValidationError::new(
            "proxy.connect_timeout_secs",
            "must be greater than 0",
        ));
    }
    if config.proxy.request_timeout_secs == 0 {
        errors.push(ValidationError::new(
            "proxy.request_timeout_secs",
            "must be greater than 0",
        ));
    }

    if let Some(public_url) = &config.hub.public_url {
        if let Err(e) = Url::parse(public_url) {
            errors.push(ValidationError::new("hub.public_url", e.to_string()));
        }
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!(
                "'{}' is not a socket address",
                config.observability.metrics_address
            ),
        ));
    }

    let mut seen = HashSet::new();
    for (i, service) in config.services.iter().enumerate() {
        let field = format!("services[{i}]");
        if service.name.is_empty() {
            errors.push(ValidationError::new(&field, "name must not be empty"));
        } else if !seen.insert(service.name.clone()) {
            errors.push(ValidationError::new(
                &field,
                format!("duplicate service name '{}'", service.name),
            ));
        }
        if let Err(e) = Url::parse(&service.target) {
            errors.push(ValidationError::new(&field, format!("target: {e}")));
        }
        let path = service
            .path
            .clone()
            .unwrap_or_else(|| format!("/services/{}/", service.name));
        if let Err(e) = RouteSpec::new(service.host.as_str(), path) {
            errors.push(ValidationError::new(&field, e.to_string()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::ServiceConfig;

    fn valid_config() -> HubConfig {
        let mut config = HubConfig::default();
        config.proxy.auth_token = "proxy-secret".to_string();
        config
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_all_errors_collected() {
        let mut config = valid_config();
        config.admin.bind_address = "not-an-address".to_string();
        config.proxy.api_url = "not a url".to_string();
        config.proxy.request_timeout_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"admin.bind_address"));
        assert!(fields.contains(&"proxy.api_url"));
        assert!(fields.contains(&"proxy.request_timeout_secs"));
    }

    #[test]
    fn test_duplicate_service_names_rejected() {
        let mut config = valid_config();
        for _ in 0..2 {
            config.services.push(ServiceConfig {
                name: "announcer".to_string(),
                target: "http://10.0.0.9:9999".to_string(),
                host: "*".to_string(),
                path: None,
            });
        }

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("duplicate"));
    }

    #[test]
    fn test_bad_service_route_rejected() {
        let mut config = valid_config();
        config.services.push(ServiceConfig {
            name: "announcer".to_string(),
            target: "http://10.0.0.9:9999".to_string(),
            host: "*".to_string(),
            path: Some("no-leading-slash".to_string()),
        });

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].field.starts_with("services[0]"));
    }
}
