//! Registry record types.

use url::Url;

use crate::routes::{MalformedRouteKey, RouteSpec, WILDCARD_HOST};

/// Lifecycle state of a backend target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendState {
    /// Spawn requested, no reachable address yet.
    Starting,
    /// Up and serving at its target address.
    Running,
    /// Shut down; any route for it is stale.
    Stopped,
}

/// One backend target as the hub knows it.
#[derive(Debug, Clone)]
pub struct BackendRecord {
    pub spec: RouteSpec,
    pub target: Option<Url>,
    pub state: BackendState,
}

impl BackendRecord {
    pub fn running(spec: RouteSpec, target: Url) -> Self {
        Self {
            spec,
            target: Some(target),
            state: BackendState::Running,
        }
    }

    pub fn starting(spec: RouteSpec) -> Self {
        Self {
            spec,
            target: None,
            state: BackendState::Starting,
        }
    }

    pub fn stopped(spec: RouteSpec) -> Self {
        Self {
            spec,
            target: None,
            state: BackendState::Stopped,
        }
    }

    /// A record gets a route only when running at a known address.
    pub fn is_routable(&self) -> bool {
        self.state == BackendState::Running && self.target.is_some()
    }
}

/// Conventional routespec for a named user server: `/user/{name}/`.
pub fn user_routespec(name: &str) -> Result<RouteSpec, MalformedRouteKey> {
    RouteSpec::new(WILDCARD_HOST, format!("/user/{name}/"))
}

/// Conventional routespec for a named service: `/services/{name}/`.
pub fn service_routespec(name: &str) -> Result<RouteSpec, MalformedRouteKey> {
    RouteSpec::new(WILDCARD_HOST, format!("/services/{name}/"))
}
