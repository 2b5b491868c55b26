//! Registry store and expected-table derivation.

use dashmap::DashMap;
use url::Url;

use crate::registry::types::BackendRecord;
use crate::routes::{Route, RouteSpec, RoutingTable};

/// Thread-safe registry of live user servers and services.
///
/// Shared across the admin API and the reconciliation engine. Mutation goes
/// through the typed methods; snapshot derivation never mutates.
#[derive(Default)]
pub struct Registry {
    users: DashMap<String, BackendRecord>,
    services: DashMap<String, BackendRecord>,
    /// Target of the default route `*/`, normally the hub's own public URL.
    default_target: Option<Url>,
}

impl Registry {
    pub fn new(default_target: Option<Url>) -> Self {
        Self {
            users: DashMap::new(),
            services: DashMap::new(),
            default_target,
        }
    }

    pub fn upsert_user(&self, name: impl Into<String>, record: BackendRecord) {
        self.users.insert(name.into(), record);
    }

    pub fn remove_user(&self, name: &str) {
        self.users.remove(name);
    }

    pub fn upsert_service(&self, name: impl Into<String>, record: BackendRecord) {
        self.services.insert(name.into(), record);
    }

    pub fn remove_service(&self, name: &str) {
        self.services.remove(name);
    }

    /// (users, services) currently registered, regardless of state.
    pub fn summary(&self) -> (usize, usize) {
        (self.users.len(), self.services.len())
    }

    /// Derive the expected routing table from registry state at call time.
    ///
    /// Exactly one route per routable record, stamped with the hub ownership
    /// marker and the owning record's name. Records that are starting,
    /// stopped, or have no assigned address are omitted. Repeated calls may
    /// differ when the registry changes in between; nothing is cached.
    pub fn expected_routes(&self) -> RoutingTable {
        let mut table = RoutingTable::new();

        if let Some(hub) = &self.default_target {
            let spec = RouteSpec::default_route();
            table.insert(spec.clone(), Route::hub_owned(spec, hub.clone()));
        }

        for entry in self.users.iter() {
            let record = entry.value();
            if let (true, Some(target)) = (record.is_routable(), &record.target) {
                let route = Route::hub_owned(record.spec.clone(), target.clone())
                    .tag("user", entry.key().as_str());
                table.insert(record.spec.clone(), route);
            }
        }

        for entry in self.services.iter() {
            let record = entry.value();
            if let (true, Some(target)) = (record.is_routable(), &record.target) {
                let route = Route::hub_owned(record.spec.clone(), target.clone())
                    .tag("service", entry.key().as_str());
                table.insert(record.spec.clone(), route);
            }
        }

        table
    }
}
