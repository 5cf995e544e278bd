//! Shop handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{AppError, AppState};
use nimman_core::{
    AspectScore, DataRange, PriceLevel, SentimentDelta, ShopInsights, ShopRecord, ShopReport,
    ValueTier,
};

/// One row of the shop picker
#[derive(Debug, Serialize)]
pub struct ShopSummary {
    pub name: String,
    pub display_name: String,
    pub rating: f64,
    pub review_count: u32,
    pub price_level: PriceLevel,
    pub value_tier: ValueTier,
    pub weakest_aspect: AspectScore,
    pub sentiment: SentimentDelta,
}

/// Query parameters for shop reports
#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    /// last-3-months, last-6-months or last-1-year
    pub range: Option<String>,
}

/// GET /api/shops - List shops in dataset order
pub async fn list_shops(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ShopSummary>>, AppError> {
    let dataset = state.store.snapshot();

    let summaries = dataset
        .shops()
        .iter()
        .map(|shop| -> Result<ShopSummary, AppError> {
            let insights = state.engine.analyze(shop)?;
            Ok(ShopSummary {
                name: shop.name.clone(),
                display_name: shop.display_name().to_string(),
                rating: shop.rating,
                review_count: shop.review_count,
                price_level: shop.price_level,
                value_tier: insights.value_tier,
                weakest_aspect: insights.weakest_aspect,
                sentiment: insights.sentiment,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(summaries))
}

/// GET /api/shops/:name - Get the validated record for one shop
pub async fn get_shop(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<ShopRecord>, AppError> {
    let dataset = state.store.snapshot();
    let shop = dataset.resolve(&name)?;

    Ok(Json(shop.clone()))
}

/// GET /api/shops/:name/insights - Derived insights for one shop
pub async fn get_shop_insights(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<ShopInsights>, AppError> {
    let dataset = state.store.snapshot();
    let shop = dataset.resolve(&name)?;

    Ok(Json(state.engine.analyze(shop)?))
}

/// GET /api/shops/:name/report - Full dashboard payload for one shop
pub async fn get_shop_report(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Query(params): Query<ReportQuery>,
) -> Result<Json<ShopReport>, AppError> {
    let range = match params.range.as_deref() {
        Some(r) => r.parse::<DataRange>().map_err(|e| AppError::bad_request(&e))?,
        None => state.default_range,
    };

    let dataset = state.store.snapshot();
    let shop = dataset.resolve(&name)?;

    Ok(Json(ShopReport::build(&state.engine, shop, range)?))
}
