use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
///
/// Every variant is a structured, user-facing failure. Startup failures live in
/// [`crate::services::classifier::ModelError`] and never reach a handler.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Please complete your profile first! Age, gender, height, and weight are required.")]
    IncompleteProfile,

    #[error("Invalid data in profile field '{field}'. Please check your details.")]
    InvalidProfileData { field: &'static str },

    #[error("Unknown diet category: {0}")]
    UnknownDietCategory(String),

    #[error("No meal recommendation available for diet '{0}'")]
    NoRecommendationAvailable(String),

    #[error("No matching workout found.")]
    NoMatchingWorkout,

    #[error("Missing required parameters: diet_name, meal_type and current_meal are required.")]
    MissingSwapParameters,

    #[error("Health tips are currently unavailable.")]
    TipsUnavailable,

    #[error("Record not found or permission denied.")]
    NotFoundOrForbidden,

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(#[from] sqlx::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Missing caller identity")]
    Unauthenticated,

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Stable machine-readable code for the error body
    pub fn code(&self) -> &'static str {
        match self {
            AppError::IncompleteProfile => "incomplete_profile",
            AppError::InvalidProfileData { .. } => "invalid_profile_data",
            AppError::UnknownDietCategory(_) => "unknown_diet_category",
            AppError::NoRecommendationAvailable(_) => "no_recommendation_available",
            AppError::NoMatchingWorkout => "no_matching_workout",
            AppError::MissingSwapParameters => "missing_swap_parameters",
            AppError::TipsUnavailable => "tips_unavailable",
            AppError::NotFoundOrForbidden => "not_found_or_forbidden",
            AppError::StorageUnavailable(_) => "storage_unavailable",
            AppError::InvalidInput(_) => "invalid_input",
            AppError::Unauthenticated => "unauthenticated",
            AppError::Internal(_) => "internal",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::IncompleteProfile | AppError::InvalidProfileData { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::MissingSwapParameters | AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::UnknownDietCategory(_)
            | AppError::NoRecommendationAvailable(_)
            | AppError::NoMatchingWorkout
            | AppError::NotFoundOrForbidden => StatusCode::NOT_FOUND,
            AppError::TipsUnavailable | AppError::StorageUnavailable(_) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            AppError::StorageUnavailable(e) => {
                tracing::error!(error = %e, "Storage backend failure");
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
            }
            _ => {
                tracing::debug!(code = self.code(), "Request failed");
            }
        }

        let body = Json(json!({
            "success": false,
            "error": self.code(),
            "message": self.to_string(),
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
