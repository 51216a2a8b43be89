use axum::{
    http::StatusCode,
    middleware::from_fn,
    routing::{delete, get},
    Json, Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::{
    db::{PlanStore, ProfileStore},
    middleware::request_id::{make_span_with_request_id, request_id_middleware},
    services::{catalog::Catalog, classifier::Classifier, SharedRng},
};

pub mod profile;
pub mod recommendations;
pub mod saved;
pub mod tips;
pub mod workouts;

/// Shared handler state
///
/// Catalog and classifier are read-only after startup; stores and the RNG
/// are injected so tests can swap them.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub classifier: Arc<Classifier>,
    pub profiles: Arc<dyn ProfileStore>,
    pub plans: Arc<dyn PlanStore>,
    pub rng: SharedRng,
}

/// Successful response envelope: `{"success": true, ...body}`
#[derive(Debug, Serialize)]
pub struct Success<T> {
    success: bool,
    #[serde(flatten)]
    body: T,
}

pub fn success<T: Serialize>(body: T) -> Json<Success<T>> {
    Json(Success {
        success: true,
        body,
    })
}

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id)),
        )
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/profile", get(profile::get_profile).put(profile::update_profile))
        .route("/recommendations/diet", get(recommendations::diet))
        .route("/recommendations/diet/swap", get(recommendations::swap))
        .route("/workouts", get(workouts::lookup))
        .route("/tips/daily", get(tips::daily))
        .route("/saved", get(saved::list_all))
        .route("/saved/diets", get(saved::list_diets).post(saved::save_diet))
        .route("/saved/diets/:id", delete(saved::delete_diet))
        .route(
            "/saved/workouts",
            get(saved::list_workouts).post(saved::save_workout),
        )
        .route("/saved/workouts/:id", delete(saved::delete_workout))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
