//! Network boundary to the managed proxy.
//!
//! # Responsibilities
//! - Hold the single live proxy location (API URL + auth token)
//! - Fetch the proxy's routing table and apply add/remove operations
//! - Map transport failures into the two proxy error kinds
//!
//! # Design Decisions
//! - The location lives behind an ArcSwap and is replaced as a whole;
//!   in-flight calls keep the location they started with
//! - Every call carries a bounded timeout; a timeout is an unreachable
//!   proxy, not a protocol error
//! - Failed calls are never retried against a newer location here; callers
//!   re-trigger reconciliation instead

pub mod client;
pub mod location;

pub use client::{ProxyClient, ProxyError};
pub use location::{LocationError, LocationManager, ProxyLocation};
