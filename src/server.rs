//!
//! studyhall HTTP server
//! ---------------------
//! Axum-based HTTP API fronting the course platform's admin area.
//!
//! Responsibilities:
//! - Build the per-request context from headers (bearer token or session
//!   cookie) and run it through the admin access gate.
//! - Page guard on /admin: redirect to login (with post-login return) for
//!   anonymous callers, to the fallback path for unprivileged ones.
//! - Action guard on /admin/authorize for callers that shape their own
//!   denial response.
//! - Role readout on /me/role for UI personalization.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tracing::{error, info};

use crate::backend::{http_client, BackendIdentityClient, BackendProfileClient};
use crate::config::Config;
use crate::error::AppError;
use crate::identity::{AccessError, AccessGate, AdminGate, RequestContext};

/// Shared server state injected into all handlers.
#[derive(Clone)]
pub struct AppState {
    pub gate: AccessGate,
}

/// Convenience entry point reading configuration from the environment.
pub async fn run() -> anyhow::Result<()> {
    run_with_config(Config::from_env()).await
}

pub async fn run_with_config(cfg: Config) -> anyhow::Result<()> {
    let http = http_client(&cfg)?;
    let gate = AccessGate::new(
        Arc::new(BackendIdentityClient::from_config(http.clone(), &cfg)),
        Arc::new(BackendProfileClient::from_config(http, &cfg)),
    )
    .with_paths(cfg.login_path.clone(), cfg.fallback_path.clone());
    let state = AppState { gate };

    let app = router(state);
    let addr: SocketAddr = format!("0.0.0.0:{}", cfg.http_port).parse()?;
    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { "studyhall ok" }))
        .route("/me/role", get(me_role))
        .route("/admin", get(admin_home))
        .route("/admin/authorize", post(admin_authorize))
        .with_state(state)
}

fn upstream_error(err: AccessError) -> Response {
    let app: AppError = err.into();
    (
        StatusCode::from_u16(app.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(json!({"status":"error","code": app.code_str(), "message": app.message()})),
    )
        .into_response()
}

/// Resolved role for the current caller; null when anonymous or when no
/// profile row exists. Personalization only, not a gate.
async fn me_role(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let ctx = RequestContext::from_headers(&headers);
    match state.gate.current_role(&ctx).await {
        Ok(role) => (StatusCode::OK, Json(json!({"status":"ok","role": role}))).into_response(),
        Err(e) => {
            error!("role lookup unavailable: {e}");
            upstream_error(e)
        }
    }
}

/// Admin back-office home. Denials navigate away; only an allowed decision
/// renders, returning the resolved principal and role to the caller.
async fn admin_home(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let ctx = RequestContext::from_headers(&headers);
    match state.gate.require_admin(&ctx, "/admin").await {
        Ok(AdminGate::Granted(admin)) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "principal": admin.principal,
                "role": admin.role,
            })),
        )
            .into_response(),
        Ok(AdminGate::Redirect(path)) => Redirect::to(&path).into_response(),
        Err(e) => {
            error!("admin gate unavailable: {e}");
            upstream_error(e)
        }
    }
}

/// Boolean form of the admin gate for admin-only mutations: the caller keeps
/// executing and receives a structured verdict instead of a navigation.
async fn admin_authorize(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let ctx = RequestContext::from_headers(&headers);
    match state.gate.check_admin_role(&ctx).await {
        Ok(true) => (StatusCode::OK, Json(json!({"status":"ok","allowed": true}))).into_response(),
        Ok(false) => (
            StatusCode::FORBIDDEN,
            Json(json!({"status":"forbidden","allowed": false})),
        )
            .into_response(),
        Err(e) => {
            error!("admin authorize unavailable: {e}");
            upstream_error(e)
        }
    }
}
