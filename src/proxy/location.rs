//! Proxy endpoint and credential management.

use arc_swap::ArcSwap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use url::Url;

/// Relocation input was rejected; the previous location stays active.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("invalid proxy location: {0}")]
    Invalid(String),
}

/// Where the proxy's admin API lives and how to authenticate against it.
#[derive(Clone, PartialEq, Eq)]
pub struct ProxyLocation {
    pub api_url: Url,
    pub auth_token: String,
}

impl ProxyLocation {
    /// Validate raw location fields.
    pub fn parse(api_url: &str, auth_token: &str) -> Result<Self, LocationError> {
        if api_url.is_empty() {
            return Err(LocationError::Invalid("api_url must not be empty".into()));
        }
        let api_url: Url = api_url
            .parse()
            .map_err(|e| LocationError::Invalid(format!("api_url: {e}")))?;
        if !matches!(api_url.scheme(), "http" | "https") {
            return Err(LocationError::Invalid(format!(
                "api_url scheme '{}' is not http or https",
                api_url.scheme()
            )));
        }
        if auth_token.is_empty() {
            return Err(LocationError::Invalid("auth_token must not be empty".into()));
        }
        Ok(Self {
            api_url,
            auth_token: auth_token.to_string(),
        })
    }
}

// Keep the token out of logs.
impl fmt::Debug for ProxyLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyLocation")
            .field("api_url", &self.api_url.as_str())
            .field("auth_token", &"<redacted>")
            .finish()
    }
}

/// Holder of the single live [`ProxyLocation`].
///
/// Readers load a snapshot that stays valid for the duration of their call;
/// writers replace the whole location in one atomic store, never one field
/// at a time. Serialization of relocation against reconciliation passes is
/// the engine's job, not this type's.
pub struct LocationManager {
    current: ArcSwap<ProxyLocation>,
}

impl LocationManager {
    pub fn new(initial: ProxyLocation) -> Self {
        Self {
            current: ArcSwap::from_pointee(initial),
        }
    }

    pub fn current(&self) -> Arc<ProxyLocation> {
        self.current.load_full()
    }

    /// Build the location a partial update would produce, without applying
    /// it. Fields not supplied retain their current values.
    pub fn resolve_update(
        &self,
        api_url: Option<&str>,
        auth_token: Option<&str>,
    ) -> Result<ProxyLocation, LocationError> {
        let base = self.current();
        let api_url = match api_url {
            Some(raw) => raw,
            None => base.api_url.as_str(),
        };
        let auth_token = match auth_token {
            Some(raw) => raw,
            None => base.auth_token.as_str(),
        };
        ProxyLocation::parse(api_url, auth_token)
    }

    /// Swap in a new location. Both fields become visible together.
    pub fn commit(&self, next: ProxyLocation) {
        self.current.store(Arc::new(next));
    }
}
