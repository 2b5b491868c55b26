//! Route key type and its string codec.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

/// Host sentinel for the default route.
pub const WILDCARD_HOST: &str = "*";

/// A route key failed to parse or validate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed route key '{input}': {reason}")]
pub struct MalformedRouteKey {
    pub input: String,
    pub reason: &'static str,
}

impl MalformedRouteKey {
    fn new(input: impl Into<String>, reason: &'static str) -> Self {
        Self {
            input: input.into(),
            reason,
        }
    }
}

/// Unique key of a route: host plus path.
///
/// The host is a lowercased hostname, or `*` for the default route. The path
/// always starts with `/`. Immutable once constructed; build a new value
/// instead of mutating.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteSpec {
    host: String,
    path: String,
}

impl RouteSpec {
    /// Construct a validated spec. The host is normalized to lowercase.
    pub fn new(
        host: impl Into<String>,
        path: impl Into<String>,
    ) -> Result<Self, MalformedRouteKey> {
        let host = host.into();
        let path = path.into();

        if host.is_empty() {
            return Err(MalformedRouteKey::new(path, "missing host segment"));
        }
        let host = if host == WILDCARD_HOST {
            host
        } else {
            let lowered = host.to_lowercase();
            if !lowered
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.')
            {
                return Err(MalformedRouteKey::new(
                    format!("{host}{path}"),
                    "host contains invalid characters",
                ));
            }
            lowered
        };
        if !path.starts_with('/') {
            return Err(MalformedRouteKey::new(
                format!("{host}{path}"),
                "path must start with '/'",
            ));
        }

        Ok(Self { host, path })
    }

    /// The default route: every host, root path.
    pub fn default_route() -> Self {
        Self {
            host: WILDCARD_HOST.to_string(),
            path: "/".to_string(),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_default(&self) -> bool {
        self.host == WILDCARD_HOST && self.path == "/"
    }

    /// Wire form: `host ++ path`.
    pub fn encode(&self) -> String {
        format!("{}{}", self.host, self.path)
    }

    /// Inverse of [`encode`](Self::encode) on well-formed input.
    ///
    /// The host segment runs up to the first `/`; it must be non-empty, so a
    /// bare path like `/foo` is rejected rather than guessed at.
    pub fn decode(raw: &str) -> Result<Self, MalformedRouteKey> {
        let slash = raw
            .find('/')
            .ok_or_else(|| MalformedRouteKey::new(raw, "missing path segment"))?;
        if slash == 0 {
            return Err(MalformedRouteKey::new(raw, "missing host segment"));
        }
        Self::new(&raw[..slash], &raw[slash..])
    }
}

impl fmt::Display for RouteSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.host, self.path)
    }
}

// A RouteSpec crosses every boundary as its encoded string, whether it is a
// map key or a plain value. serde applies these impls per occurrence, so
// nested tables need no extra key-mapping step.
impl Serialize for RouteSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encode())
    }
}

impl<'de> Deserialize<'de> for RouteSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        RouteSpec::decode(&raw).map_err(de::Error::custom)
    }
}
