//! API Handlers
//!
//! HTTP request handlers for each registry endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::config::Config;
use crate::error::Result;
use crate::models::{
    AutoRefreshResponse, DeleteResponse, HealthResponse, ListQuery, Player, PlayerRequest,
    ReloadResponse, StatsResponse,
};
use crate::repository::InMemoryRepository;
use crate::service::PlayerService;

/// Service type served by the binary.
pub type RegistryService = PlayerService<InMemoryRepository, InMemoryRepository>;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<RegistryService>,
}

impl AppState {
    pub fn new(service: RegistryService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Builds the service from configuration around the given stores.
    pub fn from_config(
        config: &Config,
        local: InMemoryRepository,
        remote: InMemoryRepository,
    ) -> Result<Self> {
        Ok(Self::new(PlayerService::from_config(local, remote, config)?))
    }
}

/// Handler for GET /players
pub async fn list_handler(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Player>>> {
    let players = state.service.get_all(query.remote).await?;
    Ok(Json(players))
}

/// Handler for GET /players/:id
pub async fn get_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Player>> {
    Ok(Json(state.service.get_by_id(id).await?))
}

/// Handler for POST /players
pub async fn create_handler(
    State(state): State<AppState>,
    Json(req): Json<PlayerRequest>,
) -> Result<(StatusCode, Json<Player>)> {
    let saved = state.service.save(req.into_player()).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

/// Handler for PUT /players/:id
pub async fn update_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<PlayerRequest>,
) -> Result<Json<Player>> {
    let updated = state.service.update(id, req.into_player()).await?;
    Ok(Json(updated))
}

/// Handler for DELETE /players/:id
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>> {
    let id = state.service.delete(id).await?;
    Ok(Json(DeleteResponse::new(id)))
}

/// Handler for POST /refresh
pub async fn reload_handler(State(state): State<AppState>) -> Result<Json<ReloadResponse>> {
    let count = state.service.load_data().await?;
    Ok(Json(ReloadResponse::new(count)))
}

/// Handler for PUT /refresh/auto
pub async fn enable_refresh_handler(State(state): State<AppState>) -> Json<AutoRefreshResponse> {
    let started = state.service.enable_auto_refresh().is_some();
    Json(AutoRefreshResponse::new(
        state.service.auto_refresh_state(),
        started,
    ))
}

/// Handler for DELETE /refresh/auto
pub async fn disable_refresh_handler(State(state): State<AppState>) -> Json<AutoRefreshResponse> {
    state.service.disable_auto_refresh();
    Json(AutoRefreshResponse::new(
        state.service.auto_refresh_state(),
        false,
    ))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.service.cache_stats().await;
    Json(StatsResponse::new(
        &stats,
        state.service.auto_refresh_state(),
        state.service.auto_refresh_interval(),
    ))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
