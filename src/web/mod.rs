//! Read-only JSON API for the map front end.
//!
//! The session is generated before the server starts and shared behind an
//! `Arc`; handlers only read from it, so no locking is needed.

use std::{net::SocketAddr, sync::Arc};

use anyhow::{Context, Result};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tokio::net::TcpListener;
use tracing::{debug, info};

use crate::{
    boundary::BoundaryId,
    geojson::FeatureCollection,
    player::Player,
    resources::ResourceProperties,
    session::{BoundaryProperties, Session, SessionError, SessionSummary},
    stats::AggregatedStats,
};

pub struct WebServerConfig {
    pub host: String,
    pub port: u16,
}

type AppState = Arc<Session>;

pub fn router(session: Arc<Session>) -> Router {
    Router::new()
        .route("/api/session", get(session_summary))
        .route("/api/boundaries", get(boundaries))
        .route("/api/resources", get(resources))
        .route("/api/players", get(players))
        .route("/api/players/:id/stats", get(player_stats))
        .with_state(session)
}

pub async fn run(session: Session, config: WebServerConfig) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("invalid listen address {}:{}", config.host, config.port))?;

    let app = router(Arc::new(session));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "serving district data (Ctrl+C to stop)");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutting down");
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug)]
pub struct ApiError(SessionError);

impl From<SessionError> for ApiError {
    fn from(value: SessionError) -> Self {
        ApiError(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            SessionError::UnknownBoundary(_) => StatusCode::NOT_FOUND,
            SessionError::Generation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = ErrorBody {
            error: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

async fn session_summary(State(session): State<AppState>) -> Json<SessionSummary> {
    Json(session.summary())
}

async fn boundaries(
    State(session): State<AppState>,
) -> Json<FeatureCollection<BoundaryProperties>> {
    Json(session.boundaries_geojson())
}

async fn resources(
    State(session): State<AppState>,
) -> Json<FeatureCollection<ResourceProperties>> {
    Json(session.resources_geojson())
}

async fn players(State(session): State<AppState>) -> Json<Vec<Player>> {
    Json(session.players().to_vec())
}

async fn player_stats(
    State(session): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<AggregatedStats>, ApiError> {
    let id = BoundaryId::new(id);
    debug!(boundary = id.raw(), "stats query");
    Ok(Json(session.stats(id)?))
}
