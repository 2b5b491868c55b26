//! Outcome of one reconciliation pass.

use serde::{Deserialize, Serialize};

use crate::proxy::ProxyError;
use crate::routes::RouteSpec;

/// Corrective operation attempted against the proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteOp {
    Add,
    Remove,
}

/// One route the pass could not correct.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteFailure {
    /// Encoded spec of the affected route.
    pub routespec: String,
    pub op: RouteOp,
    /// Error kind: `unreachable` or `protocol`.
    pub kind: String,
    pub error: String,
}

impl RouteFailure {
    pub fn new(spec: &RouteSpec, op: RouteOp, error: &ProxyError) -> Self {
        let kind = match error {
            ProxyError::Unreachable(_) => "unreachable",
            ProxyError::Protocol(_) => "protocol",
        };
        Self {
            routespec: spec.encode(),
            op,
            kind: kind.to_string(),
            error: error.to_string(),
        }
    }
}

/// Counts and failures from one completed pass.
///
/// A pass with failures still counts as completed: re-running retries
/// exactly the routes that failed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReconcileReport {
    pub added: usize,
    pub removed: usize,
    pub unchanged: usize,
    pub foreign: usize,
    #[serde(default)]
    pub failures: Vec<RouteFailure>,
}

impl ReconcileReport {
    /// True when the proxy table matched the registry exactly and every
    /// correction (if any) landed.
    pub fn is_clean(&self) -> bool {
        self.added == 0 && self.removed == 0 && self.failures.is_empty()
    }
}
