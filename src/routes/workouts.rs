use axum::{
    extract::{Query, State},
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use crate::{
    error::AppResult,
    middleware::Caller,
    models::{WorkoutPlan, WorkoutQuery},
    routes::{success, AppState, Success},
    services::selector::select_workout,
};

#[derive(Debug, Serialize)]
pub struct WorkoutResponse {
    pub plan: WorkoutPlan,
}

/// Handler for the workout lookup endpoint
pub async fn lookup(
    State(state): State<Arc<AppState>>,
    _caller: Caller,
    Query(query): Query<WorkoutQuery>,
) -> AppResult<Json<Success<WorkoutResponse>>> {
    let plan = select_workout(&state.catalog, &query)?;

    tracing::debug!(
        goal = %plan.goal,
        level = %plan.level,
        duration = %plan.duration,
        "Workout matched"
    );

    Ok(success(WorkoutResponse { plan: plan.clone() }))
}
