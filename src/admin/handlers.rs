use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::admin::AppState;
use crate::proxy::ProxyError;
use crate::reconcile::{ReconcileError, ReconcileReport, RelocateError};
use crate::routes::RoutingTable;

/// Handler-level error with its HTTP mapping.
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "error": self.message }));
        (self.status, body).into_response()
    }
}

impl From<ProxyError> for ApiError {
    fn from(e: ProxyError) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            message: e.to_string(),
        }
    }
}

impl From<ReconcileError> for ApiError {
    fn from(e: ReconcileError) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            message: e.to_string(),
        }
    }
}

impl From<RelocateError> for ApiError {
    fn from(e: RelocateError) -> Self {
        match e {
            RelocateError::Location(e) => Self {
                status: StatusCode::BAD_REQUEST,
                message: e.to_string(),
            },
            RelocateError::Pass(e) => e.into(),
        }
    }
}

/// GET /api/proxy — the proxy's actual routing table.
///
/// Same view as asking the proxy directly, without callers having to hold
/// the proxy's location or credential. Keys are encoded specs.
pub async fn get_proxy_routes(
    State(state): State<AppState>,
) -> Result<Json<RoutingTable>, ApiError> {
    let table = state.reconciler.get_all_routes().await?;
    Ok(Json(table))
}

/// POST /api/proxy — run one reconciliation pass now.
///
/// Used to verify the proxy is up to date, and to jumpstart a newly
/// launched proxy without waiting for the check interval.
pub async fn check_proxy(
    State(state): State<AppState>,
) -> Result<Json<ReconcileReport>, ApiError> {
    let report = state.reconciler.check_routes().await?;
    Ok(Json(report))
}

#[derive(Debug, Deserialize)]
pub struct RelocateRequest {
    pub api_url: Option<String>,
    pub auth_token: Option<String>,
}

/// PATCH /api/proxy — point the hub at a new proxy instance.
///
/// Only the supplied fields change. On success the new proxy is brought up
/// to date immediately and the pass report is returned.
pub async fn relocate_proxy(
    State(state): State<AppState>,
    Json(request): Json<RelocateRequest>,
) -> Result<Json<ReconcileReport>, ApiError> {
    let report = state
        .reconciler
        .relocate(request.api_url.as_deref(), request.auth_token.as_deref())
        .await?;
    Ok(Json(report))
}
