//! Live backend registry.
//!
//! # Responsibilities
//! - Track user servers and services known to the hub
//! - Derive the expected routing table from current registry state
//!
//! # Design Decisions
//! - DashMap-backed store; callers mutate through the store API
//! - Snapshot derivation is a pure read of store state at call time,
//!   no caching between calls
//! - Only Running records with an assigned target are routable

pub mod store;
pub mod types;

pub use store::Registry;
pub use types::{service_routespec, user_routespec, BackendRecord, BackendState};
