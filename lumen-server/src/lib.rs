//! HTTP surface of the Lumen backend
//!
//! Thin axum layer over [`lumen_core`]: request parsing, status mapping and
//! per-request logging. All behavior lives in the core services.

pub mod error;

pub use error::ApiError;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Request, State};
use axum::http::HeaderValue;
use axum::middleware::{from_fn, Next};
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};
use lumen_core::auth::{AuthService, IdentityProvider};
use lumen_core::config::Settings;
use lumen_core::generation::GenerationService;
use lumen_core::http::HttpClient;
use lumen_core::protocol::{AuthRequest, GenerateResponse, GenerationRequest, LoginResponse};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::CorsLayer;
use tracing::info;
use uuid::Uuid;

/// Header carrying the per-request correlation id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Shared state of every handler
#[derive(Clone)]
pub struct AppState {
    pub generation: Arc<GenerationService>,
    pub auth: Arc<AuthService>,
    /// Deployment label reported by `/health`
    pub env: String,
}

impl AppState {
    pub fn new(generation: GenerationService, auth: AuthService, env: impl Into<String>) -> Self {
        Self {
            generation: Arc::new(generation),
            auth: Arc::new(auth),
            env: env.into(),
        }
    }

    /// Wire the production services from settings.
    ///
    /// Providers and identity verifiers share one connection pool.
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let http = HttpClient::new(settings.server.request_timeout)?;
        let generation = GenerationService::from_settings(settings, http.clone());
        let auth = AuthService::from_settings(&settings.auth, http.inner().clone());
        Ok(Self::new(generation, auth, settings.env.clone()))
    }
}

/// Build the axum router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/auth/google", post(google_login_handler))
        .route("/auth/apple", post(apple_login_handler))
        .route("/ai/generate", post(generate_handler))
        .layer(from_fn(request_logging))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serve `router` on `bind_addr` until the process stops
pub async fn serve(router: Router, bind_addr: &str) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!("Lumen backend listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}

// ── Handlers ──

async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "status": "ok", "env": state.env }))
}

async fn google_login_handler(
    State(state): State<AppState>,
    payload: Result<Json<AuthRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    login(&state, IdentityProvider::Google, payload).await
}

async fn apple_login_handler(
    State(state): State<AppState>,
    payload: Result<Json<AuthRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    login(&state, IdentityProvider::Apple, payload).await
}

async fn login(
    state: &AppState,
    provider: IdentityProvider,
    payload: Result<Json<AuthRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(request) = payload?;
    let response = state.auth.login(provider, &request.id_token).await?;
    Ok(Json(response))
}

async fn generate_handler(
    State(state): State<AppState>,
    payload: Result<Json<GenerationRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let Json(request) = payload?;
    let response = state.generation.generate(&request).await?;
    Ok(Json(response))
}

// ── Middleware ──

/// Log each request on completion and stamp the response with its
/// request id, echoing the caller's id when one was sent
async fn request_logging(req: Request, next: Next) -> Response {
    let request_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let start = Instant::now();

    let mut response = next.run(req).await;

    info!(
        "{} {} status={} duration_ms={} [request_id: {}]",
        method,
        path,
        response.status().as_u16(),
        start.elapsed().as_millis(),
        request_id
    );
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}
