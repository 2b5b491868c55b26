//! The reconciliation pass.

use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::observability::metrics;
use crate::proxy::{LocationError, LocationManager, ProxyClient, ProxyError};
use crate::reconcile::report::{ReconcileReport, RouteFailure, RouteOp};
use crate::registry::Registry;
use crate::routes::{Route, RouteSpec, RoutingTable};

/// The pass could not run at all. Per-route trouble never surfaces here;
/// it lands in the report instead.
#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("reconciliation pass could not run: {0}")]
    Proxy(#[from] ProxyError),
}

/// Relocation failed before or during its follow-up pass.
#[derive(Debug, Error)]
pub enum RelocateError {
    #[error(transparent)]
    Location(#[from] LocationError),
    #[error(transparent)]
    Pass(#[from] ReconcileError),
}

/// Corrections one pass intends to apply, computed before any network write.
#[derive(Debug, Default)]
struct DiffPlan {
    adds: Vec<Route>,
    removes: Vec<RouteSpec>,
    unchanged: usize,
    foreign: usize,
}

/// Diff expected against actual.
///
/// Expected routes missing from the proxy, or present with a different
/// target, are (re)added. Proxy routes the registry no longer knows are
/// removed only when this hub owns them; anything else is foreign and left
/// untouched.
fn compute_diff(expected: &RoutingTable, actual: &RoutingTable) -> DiffPlan {
    let mut plan = DiffPlan::default();

    for (spec, want) in expected {
        match actual.get(spec) {
            Some(have) if have.target == want.target => plan.unchanged += 1,
            _ => plan.adds.push(want.clone()),
        }
    }

    for (spec, have) in actual {
        if expected.contains_key(spec) {
            continue;
        }
        if have.is_hub_owned() {
            plan.removes.push(spec.clone());
        } else {
            plan.foreign += 1;
        }
    }

    plan
}

/// Keeps the proxy's routing table converged with the registry.
///
/// Holds no background state machine: every pass is externally triggered
/// (bootstrap, admin action, relocation, or a caller-owned timer) and runs
/// to completion under the pass mutex.
pub struct Reconciler {
    registry: Arc<Registry>,
    client: ProxyClient,
    location: Arc<LocationManager>,
    pass_gate: Mutex<()>,
}

impl Reconciler {
    pub fn new(registry: Arc<Registry>, client: ProxyClient, location: Arc<LocationManager>) -> Self {
        Self {
            registry,
            client,
            location,
            pass_gate: Mutex::new(()),
        }
    }

    /// Run one reconciliation pass now.
    ///
    /// A trigger arriving while another pass runs waits its turn, then runs
    /// a fresh pass against then-current registry and proxy state.
    pub async fn check_routes(&self) -> Result<ReconcileReport, ReconcileError> {
        let _gate = self.pass_gate.lock().await;
        self.run_locked().await
    }

    /// Point the hub at a (possibly new) proxy and bring it up to date.
    ///
    /// Fields not supplied keep their current values. Invalid input leaves
    /// the previous location fully intact and runs no pass. On success the
    /// swap and the follow-up pass happen under the same exclusion as any
    /// other pass.
    pub async fn relocate(
        &self,
        api_url: Option<&str>,
        auth_token: Option<&str>,
    ) -> Result<ReconcileReport, RelocateError> {
        let _gate = self.pass_gate.lock().await;
        let next = self.location.resolve_update(api_url, auth_token)?;
        self.location.commit(next);
        tracing::info!(
            api_url = %self.location.current().api_url,
            "Proxy relocated, running reconciliation"
        );
        Ok(self.run_locked().await?)
    }

    /// Read-only snapshot of the proxy's actual table, no side effects.
    pub async fn get_all_routes(&self) -> Result<RoutingTable, ProxyError> {
        self.client.fetch_all().await
    }

    async fn run_locked(&self) -> Result<ReconcileReport, ReconcileError> {
        let started = Instant::now();

        let expected = self.registry.expected_routes();
        let actual = match self.client.fetch_all().await {
            Ok(table) => table,
            Err(e) => {
                metrics::record_failed_pass();
                return Err(e.into());
            }
        };

        let plan = compute_diff(&expected, &actual);
        let mut report = ReconcileReport {
            unchanged: plan.unchanged,
            foreign: plan.foreign,
            ..Default::default()
        };

        // Best-effort batch: every correction is attempted even when
        // earlier ones fail.
        for route in &plan.adds {
            match self.client.add(route).await {
                Ok(()) => report.added += 1,
                Err(e) => {
                    tracing::warn!(routespec = %route.spec, error = %e, "Failed to add route");
                    report.failures.push(RouteFailure::new(&route.spec, RouteOp::Add, &e));
                }
            }
        }
        for spec in &plan.removes {
            match self.client.remove(spec).await {
                Ok(()) => report.removed += 1,
                Err(e) => {
                    tracing::warn!(routespec = %spec, error = %e, "Failed to remove route");
                    report.failures.push(RouteFailure::new(spec, RouteOp::Remove, &e));
                }
            }
        }

        metrics::record_pass(&report, expected.len(), started.elapsed());
        tracing::info!(
            added = report.added,
            removed = report.removed,
            unchanged = report.unchanged,
            foreign = report.foreign,
            failures = report.failures.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Reconciliation pass complete"
        );
        Ok(report)
    }
}
