use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::MealOption;
use crate::error::{AppError, AppResult};

/// A diet recommendation the user chose to keep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedPlan {
    pub id: Uuid,
    pub user_id: String,
    pub meal_plan_name: String,
    pub meals: MealOption,
    pub saved_at: DateTime<Utc>,
}

/// A workout plan the user chose to keep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedWorkout {
    pub id: Uuid,
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub plan: Value,
    pub saved_at: DateTime<Utc>,
}

/// Request body for saving a diet plan
#[derive(Debug, Clone, Deserialize)]
pub struct SavePlanRequest {
    pub meal_plan_name: Option<String>,
    pub meals: Option<MealOption>,
}

/// Request body for saving a workout
#[derive(Debug, Clone, Deserialize)]
pub struct SaveWorkoutRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub plan: Value,
}

/// Validated diet plan content ready to persist
#[derive(Debug, Clone, PartialEq)]
pub struct NewSavedPlan {
    pub meal_plan_name: String,
    pub meals: MealOption,
}

/// Validated workout content ready to persist
#[derive(Debug, Clone, PartialEq)]
pub struct NewSavedWorkout {
    pub title: String,
    pub description: Option<String>,
    pub plan: Value,
}

impl TryFrom<SavePlanRequest> for NewSavedPlan {
    type Error = AppError;

    fn try_from(request: SavePlanRequest) -> AppResult<Self> {
        let meal_plan_name = request
            .meal_plan_name
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| AppError::InvalidInput("meal_plan_name is required".to_string()))?;
        let meals = request
            .meals
            .filter(|meals| !meals.is_empty())
            .ok_or_else(|| AppError::InvalidInput("meals are required".to_string()))?;

        Ok(Self {
            meal_plan_name,
            meals,
        })
    }
}

impl TryFrom<SaveWorkoutRequest> for NewSavedWorkout {
    type Error = AppError;

    fn try_from(request: SaveWorkoutRequest) -> AppResult<Self> {
        let title = request
            .title
            .filter(|title| !title.trim().is_empty())
            .ok_or_else(|| AppError::InvalidInput("title is required".to_string()))?;

        if request.plan.is_null() {
            return Err(AppError::InvalidInput("plan is required".to_string()));
        }

        Ok(Self {
            title,
            description: request.description,
            plan: request.plan,
        })
    }
}

impl SavedPlan {
    /// Stamps new content with its owner and the current time
    pub fn new(user_id: &str, content: NewSavedPlan) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            meal_plan_name: content.meal_plan_name,
            meals: content.meals,
            saved_at: Utc::now(),
        }
    }
}

impl SavedWorkout {
    /// Stamps new content with its owner and the current time
    pub fn new(user_id: &str, content: NewSavedWorkout) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            title: content.title,
            description: content.description,
            plan: content.plan,
            saved_at: Utc::now(),
        }
    }
}

/// Everything a user has saved, each list most-recent-first
#[derive(Debug, Clone, Serialize)]
pub struct SavedCollection {
    pub saved_diets: Vec<SavedPlan>,
    pub saved_workouts: Vec<SavedWorkout>,
}
