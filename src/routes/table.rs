//! Routes and the routing table.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use url::Url;

use crate::routes::spec::RouteSpec;

/// Key in route data marking a route as owned by this hub.
///
/// Routes lacking the marker were put on the proxy by someone else and are
/// never removed by a reconciliation pass.
pub const HUB_MARKER: &str = "hub";

/// One proxy route: where traffic for a spec is sent, plus opaque metadata.
///
/// `data` is carried for diagnostics only and never influences routing
/// decisions or diffing (except for the ownership marker).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub spec: RouteSpec,
    pub target: Url,
    #[serde(default)]
    pub data: serde_json::Map<String, serde_json::Value>,
}

/// Mapping from spec to route, unique keys.
///
/// Two instances exist per reconciliation pass (expected and actual); they
/// are diffed, never merged in place.
pub type RoutingTable = HashMap<RouteSpec, Route>;

impl Route {
    /// A route owned by this hub, stamped with the ownership marker.
    pub fn hub_owned(spec: RouteSpec, target: Url) -> Self {
        let mut data = serde_json::Map::new();
        data.insert(HUB_MARKER.to_string(), serde_json::Value::Bool(true));
        Self { spec, target, data }
    }

    /// A route as observed on the proxy, metadata taken verbatim.
    pub fn observed(
        spec: RouteSpec,
        target: Url,
        data: serde_json::Map<String, serde_json::Value>,
    ) -> Self {
        Self { spec, target, data }
    }

    pub fn is_hub_owned(&self) -> bool {
        self.data
            .get(HUB_MARKER)
            .and_then(|v| v.as_bool())
            .unwrap_or(false)
    }

    /// Attach a diagnostic field, e.g. the owning user or service name.
    pub fn tag(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.data.insert(key.to_string(), value.into());
        self
    }
}
