//! Route identity and table model.
//!
//! # Data Flow
//! ```text
//! registry snapshot ──▶ RoutingTable (expected)
//!                                      │ diff
//! proxy /api/routes ──▶ RoutingTable (actual)
//! ```
//!
//! # Design Decisions
//! - A route is keyed by `RouteSpec` (host + path); equality is structural
//! - The wire form of a key is always its encoded string (`host ++ path`),
//!   enforced through the serde impls so map keys need no special casing
//! - No ordering is defined for keys; consumers must not rely on lexical order

pub mod spec;
pub mod table;

pub use spec::{MalformedRouteKey, RouteSpec, WILDCARD_HOST};
pub use table::{Route, RoutingTable, HUB_MARKER};
