//! Route reconciliation.
//!
//! # Responsibilities
//! - Diff the expected routing table against the proxy's actual table
//! - Apply the minimal add/remove set, best-effort per route
//! - Report what changed, what failed, and what was left alone
//!
//! # Design Decisions
//! - At most one pass runs at a time; overlapping triggers serialize and
//!   each runs its own fresh pass (no coalescing)
//! - Relocation shares the pass mutex, so the location never changes under
//!   a pass that is mid-flight
//! - Per-route failures are collected into the report, never raised; only a
//!   pass that cannot start at all surfaces an error

pub mod engine;
pub mod report;

pub use engine::{Reconciler, ReconcileError, RelocateError};
pub use report::{ReconcileReport, RouteFailure, RouteOp};
