use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Serialize;
use std::sync::Arc;

use crate::{
    error::AppResult,
    middleware::{Caller, RequestId},
    models::DietRecommendation,
    routes::{success, AppState, Success},
    services::{recommendations, swap::SwapRequest},
};

#[derive(Debug, Serialize)]
pub struct SwapResponse {
    pub new_meal: String,
}

/// Handler for the diet recommendation endpoint
pub async fn diet(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    caller: Caller,
) -> AppResult<Json<Success<DietRecommendation>>> {
    tracing::info!(
        request_id = %request_id,
        owner = caller.id(),
        "Processing diet recommendation request"
    );

    let recommendation = recommendations::recommend_diet(
        state.profiles.as_ref(),
        &state.classifier,
        &state.catalog,
        &state.rng,
        caller.id(),
    )
    .await?;

    Ok(success(recommendation))
}

/// Handler for the meal swap endpoint
pub async fn swap(
    State(state): State<Arc<AppState>>,
    _caller: Caller,
    Query(request): Query<SwapRequest>,
) -> AppResult<Json<Success<SwapResponse>>> {
    let new_meal = state
        .rng
        .with(|rng| crate::services::swap::swap(&state.catalog, &request, rng))?;

    Ok(success(SwapResponse { new_meal }))
}
