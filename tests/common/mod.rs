//! Shared utilities for integration testing.
//!
//! Provides an in-process mock of the managed proxy's admin API: a routing
//! table behind `GET/POST/DELETE /api/routes`, bearer-token auth, and
//! per-spec failure injection.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use dashmap::DashMap;
use serde_json::Value;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;

#[derive(Clone)]
struct MockState {
    token: Arc<str>,
    table: Arc<DashMap<String, Value>>,
    failing: Arc<DashMap<String, ()>>,
    hits: Arc<AtomicUsize>,
}

/// Handle to a running mock proxy.
#[allow(dead_code)]
pub struct MockProxy {
    pub addr: SocketAddr,
    table: Arc<DashMap<String, Value>>,
    failing: Arc<DashMap<String, ()>>,
    hits: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl MockProxy {
    pub fn api_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Snapshot of the mock's table, keyed by encoded spec.
    pub fn routes(&self) -> HashMap<String, Value> {
        self.table
            .iter()
            .map(|r| (r.key().clone(), r.value().clone()))
            .collect()
    }

    /// Seed a route directly, bypassing the API.
    pub fn seed_route(&self, spec: &str, payload: Value) {
        self.table.insert(spec.to_string(), payload);
    }

    /// Make add/remove for this spec answer 500 until cleared.
    pub fn fail_spec(&self, spec: &str) {
        self.failing.insert(spec.to_string(), ());
    }

    pub fn clear_failures(&self) {
        self.failing.clear();
    }

    /// Total API requests observed, including rejected ones.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Start a mock proxy on an ephemeral port.
pub async fn start_mock_proxy(token: &str) -> MockProxy {
    let state = MockState {
        token: Arc::from(token),
        table: Arc::new(DashMap::new()),
        failing: Arc::new(DashMap::new()),
        hits: Arc::new(AtomicUsize::new(0)),
    };
    let table = state.table.clone();
    let failing = state.failing.clone();
    let hits = state.hits.clone();

    let app = Router::new()
        .route("/api/routes", get(list_routes))
        .route(
            "/api/routes/{*spec}",
            axum::routing::post(add_route).delete(delete_route),
        )
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockProxy {
        addr,
        table,
        failing,
        hits,
    }
}

fn authorize(state: &MockState, headers: &HeaderMap) -> Result<(), StatusCode> {
    let expected = format!("Bearer {}", state.token);
    match headers.get("Authorization").and_then(|h| h.to_str().ok()) {
        Some(value) if value == expected => Ok(()),
        _ => Err(StatusCode::FORBIDDEN),
    }
}

async fn list_routes(
    State(state): State<MockState>,
    headers: HeaderMap,
) -> Result<Json<HashMap<String, Value>>, StatusCode> {
    state.hits.fetch_add(1, Ordering::SeqCst);
    authorize(&state, &headers)?;
    let table = state
        .table
        .iter()
        .map(|r| (r.key().clone(), r.value().clone()))
        .collect();
    Ok(Json(table))
}

async fn add_route(
    State(state): State<MockState>,
    Path(spec): Path<String>,
    headers: HeaderMap,
    Json(payload): Json<Value>,
) -> Result<StatusCode, StatusCode> {
    state.hits.fetch_add(1, Ordering::SeqCst);
    authorize(&state, &headers)?;
    if state.failing.contains_key(&spec) {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    state.table.insert(spec, payload);
    Ok(StatusCode::CREATED)
}

async fn delete_route(
    State(state): State<MockState>,
    Path(spec): Path<String>,
    headers: HeaderMap,
) -> Result<StatusCode, StatusCode> {
    state.hits.fetch_add(1, Ordering::SeqCst);
    authorize(&state, &headers)?;
    if state.failing.contains_key(&spec) {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    match state.table.remove(&spec) {
        Some(_) => Ok(StatusCode::NO_CONTENT),
        None => Err(StatusCode::NOT_FOUND),
    }
}
