use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{HealthProfile, NewSavedPlan, NewSavedWorkout, SavedPlan, SavedWorkout},
};

/// Persistence for saved diet plans and workouts
///
/// Every operation is scoped to an owner. Deletes report `false` both when the
/// record does not exist and when it belongs to someone else.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait PlanStore: Send + Sync {
    async fn save_plan(&self, owner: &str, content: NewSavedPlan) -> AppResult<SavedPlan>;

    /// Most recent first
    async fn list_plans(&self, owner: &str) -> AppResult<Vec<SavedPlan>>;

    async fn delete_plan(&self, owner: &str, id: Uuid) -> AppResult<bool>;

    async fn save_workout(&self, owner: &str, content: NewSavedWorkout) -> AppResult<SavedWorkout>;

    /// Most recent first
    async fn list_workouts(&self, owner: &str) -> AppResult<Vec<SavedWorkout>>;

    async fn delete_workout(&self, owner: &str, id: Uuid) -> AppResult<bool>;
}

/// Persistence for health profiles, one per owner
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get_profile(&self, owner: &str) -> AppResult<Option<HealthProfile>>;

    /// Creates or fully replaces the owner's profile, returning it as stored
    async fn upsert_profile(&self, profile: HealthProfile) -> AppResult<HealthProfile>;
}
