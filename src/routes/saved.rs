use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    middleware::Caller,
    models::{
        NewSavedPlan, NewSavedWorkout, SavePlanRequest, SaveWorkoutRequest, SavedCollection,
        SavedPlan, SavedWorkout,
    },
    routes::{success, AppState, Success},
};

#[derive(Debug, Serialize)]
pub struct SavedPlansResponse {
    pub saved_diets: Vec<SavedPlan>,
}

#[derive(Debug, Serialize)]
pub struct SavedWorkoutsResponse {
    pub saved_workouts: Vec<SavedWorkout>,
}

#[derive(Debug, Serialize)]
pub struct SavedRecordResponse<T> {
    pub message: &'static str,
    pub record: T,
}

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub message: &'static str,
}

/// Record ids that do not parse are reported like any other miss
fn record_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFoundOrForbidden)
}

/// Lists every saved diet plan and workout of the caller
pub async fn list_all(
    State(state): State<Arc<AppState>>,
    caller: Caller,
) -> AppResult<Json<Success<SavedCollection>>> {
    let saved_diets = state.plans.list_plans(caller.id()).await?;
    let saved_workouts = state.plans.list_workouts(caller.id()).await?;

    Ok(success(SavedCollection {
        saved_diets,
        saved_workouts,
    }))
}

pub async fn list_diets(
    State(state): State<Arc<AppState>>,
    caller: Caller,
) -> AppResult<Json<Success<SavedPlansResponse>>> {
    let saved_diets = state.plans.list_plans(caller.id()).await?;
    Ok(success(SavedPlansResponse { saved_diets }))
}

pub async fn save_diet(
    State(state): State<Arc<AppState>>,
    caller: Caller,
    Json(request): Json<SavePlanRequest>,
) -> AppResult<(StatusCode, Json<Success<SavedRecordResponse<SavedPlan>>>)> {
    let content = NewSavedPlan::try_from(request)?;
    let record = state.plans.save_plan(caller.id(), content).await?;

    tracing::info!(
        owner = caller.id(),
        id = %record.id,
        meal_plan = %record.meal_plan_name,
        "Diet plan saved"
    );

    Ok((
        StatusCode::CREATED,
        success(SavedRecordResponse {
            message: "Plan saved successfully!",
            record,
        }),
    ))
}

pub async fn delete_diet(
    State(state): State<Arc<AppState>>,
    caller: Caller,
    Path(id): Path<String>,
) -> AppResult<Json<Success<DeletedResponse>>> {
    let id = record_id(&id)?;

    if !state.plans.delete_plan(caller.id(), id).await? {
        return Err(AppError::NotFoundOrForbidden);
    }

    tracing::info!(owner = caller.id(), id = %id, "Diet plan deleted");
    Ok(success(DeletedResponse {
        message: "Plan deleted successfully.",
    }))
}

pub async fn list_workouts(
    State(state): State<Arc<AppState>>,
    caller: Caller,
) -> AppResult<Json<Success<SavedWorkoutsResponse>>> {
    let saved_workouts = state.plans.list_workouts(caller.id()).await?;
    Ok(success(SavedWorkoutsResponse { saved_workouts }))
}

pub async fn save_workout(
    State(state): State<Arc<AppState>>,
    caller: Caller,
    Json(request): Json<SaveWorkoutRequest>,
) -> AppResult<(StatusCode, Json<Success<SavedRecordResponse<SavedWorkout>>>)> {
    let content = NewSavedWorkout::try_from(request)?;
    let record = state.plans.save_workout(caller.id(), content).await?;

    tracing::info!(
        owner = caller.id(),
        id = %record.id,
        title = %record.title,
        "Workout saved"
    );

    Ok((
        StatusCode::CREATED,
        success(SavedRecordResponse {
            message: "Workout saved successfully!",
            record,
        }),
    ))
}

pub async fn delete_workout(
    State(state): State<Arc<AppState>>,
    caller: Caller,
    Path(id): Path<String>,
) -> AppResult<Json<Success<DeletedResponse>>> {
    let id = record_id(&id)?;

    if !state.plans.delete_workout(caller.id(), id).await? {
        return Err(AppError::NotFoundOrForbidden);
    }

    tracing::info!(owner = caller.id(), id = %id, "Workout deleted");
    Ok(success(DeletedResponse {
        message: "Workout deleted successfully.",
    }))
}
