use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::{
    error::AppResult,
    middleware::Caller,
    routes::{success, AppState, Success},
    services::selector::select_tip,
};

#[derive(Debug, Serialize)]
pub struct TipResponse {
    pub tip: String,
}

/// Returns a random health tip
pub async fn daily(
    State(state): State<Arc<AppState>>,
    _caller: Caller,
) -> AppResult<Json<Success<TipResponse>>> {
    let tip = state
        .rng
        .with(|rng| select_tip(&state.catalog, rng).map(str::to_string))?;

    Ok(success(TipResponse { tip }))
}
