//! HTTP client for the proxy's admin API.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::proxy::location::LocationManager;
use crate::routes::{Route, RouteSpec, RoutingTable};

/// Errors from talking to the proxy.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// Connection refused, DNS failure, or timeout.
    #[error("proxy unreachable: {0}")]
    Unreachable(String),

    /// The proxy answered with something we cannot use.
    #[error("proxy protocol error: {0}")]
    Protocol(String),
}

/// Route payload as it travels to and from the proxy: the target plus the
/// flattened metadata object. The spec itself is carried in the URL path
/// (or as the map key on a full-table fetch), never in the payload.
#[derive(Debug, Serialize, Deserialize)]
struct WireRoute {
    target: Url,
    #[serde(flatten)]
    data: serde_json::Map<String, serde_json::Value>,
}

/// Client for the proxy's `/api/routes` surface.
///
/// Reads the live [`ProxyLocation`](crate::proxy::ProxyLocation) at the
/// start of each call. A call that fails because the proxy moved out from
/// under it reports `Unreachable`; it is never replayed against the new
/// location here.
#[derive(Clone)]
pub struct ProxyClient {
    http: reqwest::Client,
    location: Arc<LocationManager>,
}

impl ProxyClient {
    pub fn new(
        location: Arc<LocationManager>,
        connect_timeout: Duration,
        request_timeout: Duration,
    ) -> Result<Self, ProxyError> {
        let http = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .build()
            .map_err(|e| ProxyError::Unreachable(format!("client init: {e}")))?;
        Ok(Self { http, location })
    }

    fn routes_url(&self, base: &Url, spec: Option<&RouteSpec>) -> String {
        let base = base.as_str().trim_end_matches('/');
        match spec {
            Some(spec) => format!("{base}/api/routes/{}", spec.encode()),
            None => format!("{base}/api/routes"),
        }
    }

    /// Retrieve every route the proxy currently holds.
    pub async fn fetch_all(&self) -> Result<RoutingTable, ProxyError> {
        let location = self.location.current();
        let url = self.routes_url(&location.api_url, None);

        let response = self
            .http
            .get(&url)
            .bearer_auth(&location.auth_token)
            .send()
            .await
            .map_err(send_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ProxyError::Protocol(format!(
                "GET /api/routes returned {status}"
            )));
        }

        let raw: HashMap<RouteSpec, WireRoute> = response
            .json()
            .await
            .map_err(|e| ProxyError::Protocol(format!("routing table body: {e}")))?;

        let table = raw
            .into_iter()
            .map(|(spec, wire)| {
                let route = Route::observed(spec.clone(), wire.target, wire.data);
                (spec, route)
            })
            .collect();
        Ok(table)
    }

    /// Add a route, replacing any existing route for the same spec.
    pub async fn add(&self, route: &Route) -> Result<(), ProxyError> {
        let location = self.location.current();
        let url = self.routes_url(&location.api_url, Some(&route.spec));
        let payload = WireRoute {
            target: route.target.clone(),
            data: route.data.clone(),
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(&location.auth_token)
            .json(&payload)
            .send()
            .await
            .map_err(send_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ProxyError::Protocol(format!(
                "POST /api/routes/{} returned {status}",
                route.spec
            )));
        }
        tracing::debug!(routespec = %route.spec, target = %route.target, "Route added");
        Ok(())
    }

    /// Remove a route. Removing a spec the proxy does not hold succeeds.
    pub async fn remove(&self, spec: &RouteSpec) -> Result<(), ProxyError> {
        let location = self.location.current();
        let url = self.routes_url(&location.api_url, Some(spec));

        let response = self
            .http
            .delete(&url)
            .bearer_auth(&location.auth_token)
            .send()
            .await
            .map_err(send_error)?;
        let status = response.status();
        if !status.is_success() && status != reqwest::StatusCode::NOT_FOUND {
            return Err(ProxyError::Protocol(format!(
                "DELETE /api/routes/{spec} returned {status}"
            )));
        }
        tracing::debug!(routespec = %spec, "Route removed");
        Ok(())
    }
}

fn send_error(e: reqwest::Error) -> ProxyError {
    if e.is_decode() {
        ProxyError::Protocol(e.to_string())
    } else {
        ProxyError::Unreachable(e.to_string())
    }
}
