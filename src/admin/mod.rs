//! Admin API for the hub.
//!
//! Thin transport over the reconciliation engine: a bearer-token guard runs
//! before any handler, and handlers do no more than decode input, call the
//! engine, and encode the result.

pub mod auth;
pub mod handlers;

use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::reconcile::Reconciler;
use self::auth::admin_auth_middleware;
use self::handlers::{check_proxy, get_proxy_routes, relocate_proxy};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub reconciler: Arc<Reconciler>,
    pub api_token: Arc<str>,
}

pub fn admin_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/proxy",
            get(get_proxy_routes).post(check_proxy).patch(relocate_proxy),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            admin_auth_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
