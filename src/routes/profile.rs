use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::{
    error::AppResult,
    middleware::Caller,
    models::{HealthProfile, ProfileUpdate},
    routes::{success, AppState, Success},
};

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub profile: Option<HealthProfile>,
}

/// Returns the caller's profile, or `null` before the first update
pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    caller: Caller,
) -> AppResult<Json<Success<ProfileResponse>>> {
    let profile = state.profiles.get_profile(caller.id()).await?;
    Ok(success(ProfileResponse { profile }))
}

/// Replaces the caller's profile; BMI is recomputed from height and weight
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    caller: Caller,
    Json(update): Json<ProfileUpdate>,
) -> AppResult<Json<Success<ProfileResponse>>> {
    let profile = HealthProfile::from_update(caller.id(), update);
    let stored = state.profiles.upsert_profile(profile).await?;

    tracing::info!(owner = caller.id(), bmi = ?stored.bmi, "Profile updated");

    Ok(success(ProfileResponse {
        profile: Some(stored),
    }))
}
