//! Hub-side Route Reconciliation Service
//!
//! Keeps an external dynamic reverse proxy's routing table consistent with
//! the hub's registry of live user servers and services. The proxy owns the
//! traffic; this crate owns the truth about where traffic should go.

// Core subsystems
pub mod config;
pub mod proxy;
pub mod reconcile;
pub mod registry;
pub mod routes;

// Transport
pub mod admin;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::HubConfig;
pub use lifecycle::Shutdown;
pub use reconcile::Reconciler;
