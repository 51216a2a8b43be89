use std::collections::HashMap;

use tokio::sync::RwLock;
use uuid::Uuid;

use super::store::{PlanStore, ProfileStore};
use crate::{
    error::AppResult,
    models::{HealthProfile, NewSavedPlan, NewSavedWorkout, SavedPlan, SavedWorkout},
};

/// Process-local store, used for tests and database-less runs
#[derive(Default)]
pub struct InMemoryStore {
    plans: RwLock<Vec<SavedPlan>>,
    workouts: RwLock<Vec<SavedWorkout>>,
    profiles: RwLock<HashMap<String, HealthProfile>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Owner's records, newest first; ties keep the later insert first
fn owned_newest_first<T: Clone>(
    records: &[T],
    owner: &str,
    owner_of: impl Fn(&T) -> &str,
    saved_at: impl Fn(&T) -> chrono::DateTime<chrono::Utc>,
) -> Vec<T> {
    let mut owned: Vec<T> = records
        .iter()
        .rev()
        .filter(|r| owner_of(*r) == owner)
        .cloned()
        .collect();
    owned.sort_by(|a, b| saved_at(b).cmp(&saved_at(a)));
    owned
}

#[async_trait::async_trait]
impl PlanStore for InMemoryStore {
    async fn save_plan(&self, owner: &str, content: NewSavedPlan) -> AppResult<SavedPlan> {
        let record = SavedPlan::new(owner, content);
        self.plans.write().await.push(record.clone());
        Ok(record)
    }

    async fn list_plans(&self, owner: &str) -> AppResult<Vec<SavedPlan>> {
        let plans = self.plans.read().await;
        Ok(owned_newest_first(
            &plans,
            owner,
            |p| p.user_id.as_str(),
            |p| p.saved_at,
        ))
    }

    async fn delete_plan(&self, owner: &str, id: Uuid) -> AppResult<bool> {
        let mut plans = self.plans.write().await;
        let before = plans.len();
        plans.retain(|p| !(p.id == id && p.user_id == owner));
        Ok(before - plans.len() == 1)
    }

    async fn save_workout(&self, owner: &str, content: NewSavedWorkout) -> AppResult<SavedWorkout> {
        let record = SavedWorkout::new(owner, content);
        self.workouts.write().await.push(record.clone());
        Ok(record)
    }

    async fn list_workouts(&self, owner: &str) -> AppResult<Vec<SavedWorkout>> {
        let workouts = self.workouts.read().await;
        Ok(owned_newest_first(
            &workouts,
            owner,
            |w| w.user_id.as_str(),
            |w| w.saved_at,
        ))
    }

    async fn delete_workout(&self, owner: &str, id: Uuid) -> AppResult<bool> {
        let mut workouts = self.workouts.write().await;
        let before = workouts.len();
        workouts.retain(|w| !(w.id == id && w.user_id == owner));
        Ok(before - workouts.len() == 1)
    }
}

#[async_trait::async_trait]
impl ProfileStore for InMemoryStore {
    async fn get_profile(&self, owner: &str) -> AppResult<Option<HealthProfile>> {
        Ok(self.profiles.read().await.get(owner).cloned())
    }

    async fn upsert_profile(&self, profile: HealthProfile) -> AppResult<HealthProfile> {
        self.profiles
            .write()
            .await
            .insert(profile.user_id.clone(), profile.clone());
        Ok(profile)
    }
}
