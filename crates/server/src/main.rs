use std::net::SocketAddr;

use anyhow::Context;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use shared::{
    domain::InteractionId,
    error::{ApiError, ErrorCode},
    protocol::{ActionMetadata, InteractionEnvelope},
};
use storage::{CorrelationRecord, CorrelationStore, StoreError};
use tower_http::limit::RequestBodyLimitLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod app_state;
mod config;

use app_state::AppState;
use config::load_settings;

const BASE_PATH: &str = "/poll-action";
const MAX_INTERACTION_BYTES: usize = 64 * 1024;

type ApiResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = load_settings();
    let state = AppState::new(CorrelationStore::new(settings.retention()));
    info!(
        retention_seconds = settings.retention_seconds,
        "correlation store ready"
    );
    let app = build_router(state);

    let addr: SocketAddr = settings
        .server_bind
        .parse()
        .with_context(|| format!("invalid bind address '{}'", settings.server_bind))?;
    info!(%addr, base_path = BASE_PATH, "server listening");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: AppState) -> Router {
    let action = Router::new()
        .route("/metadata", get(http_metadata))
        .route("/interactions", post(http_dispatch))
        .route("/interactions/:id", get(http_get_interaction));

    Router::new()
        .route("/healthz", get(healthz))
        .nest(BASE_PATH, action)
        .layer(RequestBodyLimitLayer::new(MAX_INTERACTION_BYTES))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn http_metadata(State(state): State<AppState>) -> Json<ActionMetadata> {
    Json(state.dispatcher.metadata())
}

async fn http_dispatch(
    State(state): State<AppState>,
    payload: Result<Json<InteractionEnvelope>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(envelope) = payload.map_err(|rejection| {
        warn!(error = %rejection.body_text(), "rejecting undecodable interaction");
        let status = match rejection.status() {
            StatusCode::PAYLOAD_TOO_LARGE => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::BAD_REQUEST,
        };
        (
            status,
            Json(ApiError::new(ErrorCode::Validation, rejection.body_text())),
        )
    })?;

    let outcome = state.dispatcher.dispatch(envelope).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiError::new(ErrorCode::Validation, e.to_string())),
        )
    })?;

    Ok(match outcome {
        Some(response) => Json(response).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}

async fn http_get_interaction(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<CorrelationRecord>> {
    let record = state
        .store
        .lookup(&InteractionId(id))
        .map_err(|StoreError::NotFound { id }| {
            (
                StatusCode::NOT_FOUND,
                Json(ApiError::new(
                    ErrorCode::NotFound,
                    format!("Interaction {id} does not exist"),
                )),
            )
        })?;
    Ok(Json(record))
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
