//! Health, configuration and data refresh handlers

use std::sync::Arc;

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{AppError, AppState};
use nimman_core::insights::thresholds::{SERVICE_MARKET_BENCHMARK, SERVICE_VALUE_BETA};
use nimman_core::{DataRange, RefreshOutcome, Thresholds};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub shop_count: usize,
    pub loaded_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    pub thresholds: Thresholds,
    pub default_range: DataRange,
    pub data_source: String,
    pub service_benchmark: f64,
    pub service_value_beta: f64,
}

/// GET /api/health - Liveness plus the size of the current snapshot
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let dataset = state.store.snapshot();

    Json(HealthResponse {
        status: "ok",
        shop_count: dataset.len(),
        loaded_at: dataset.loaded_at(),
    })
}

/// GET /api/config - Effective thresholds
pub async fn get_config(State(state): State<Arc<AppState>>) -> Json<ConfigResponse> {
    Json(ConfigResponse {
        thresholds: *state.engine.thresholds(),
        default_range: state.default_range,
        data_source: state.store.source().describe(),
        service_benchmark: SERVICE_MARKET_BENCHMARK,
        service_value_beta: SERVICE_VALUE_BETA,
    })
}

/// POST /api/refresh - Reload shop data from the configured source
///
/// Invalid data is rejected with 422 and the previous snapshot stays live.
pub async fn refresh(State(state): State<Arc<AppState>>) -> Result<Json<RefreshOutcome>, AppError> {
    let worker = Arc::clone(&state);
    let outcome = tokio::task::spawn_blocking(move || worker.store.refresh())
        .await
        .map_err(|e| AppError::from(anyhow::Error::from(e)))??;

    Ok(Json(outcome))
}
