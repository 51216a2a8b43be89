use chrono::{DateTime, Utc};
use sqlx::{types::Json, PgPool};
use uuid::Uuid;

use super::store::{PlanStore, ProfileStore};
use crate::{
    error::AppResult,
    models::{
        FieldValue, HealthProfile, MealOption, NewSavedPlan, NewSavedWorkout, SavedPlan,
        SavedWorkout,
    },
};

/// Postgres-backed store for profiles and saved plans
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct SavedPlanRow {
    id: Uuid,
    user_id: String,
    meal_plan_name: String,
    meals: Json<MealOption>,
    saved_at: DateTime<Utc>,
}

impl From<SavedPlanRow> for SavedPlan {
    fn from(row: SavedPlanRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            meal_plan_name: row.meal_plan_name,
            meals: row.meals.0,
            saved_at: row.saved_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct SavedWorkoutRow {
    id: Uuid,
    user_id: String,
    title: String,
    description: Option<String>,
    plan: Json<serde_json::Value>,
    saved_at: DateTime<Utc>,
}

impl From<SavedWorkoutRow> for SavedWorkout {
    fn from(row: SavedWorkoutRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            description: row.description,
            plan: row.plan.0,
            saved_at: row.saved_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ProfileRow {
    user_id: String,
    age: Option<String>,
    gender: Option<String>,
    height_cm: Option<String>,
    weight_kg: Option<String>,
    bmi: Option<f64>,
    chronic_disease: Option<String>,
    blood_pressure_systolic: Option<String>,
    blood_pressure_diastolic: Option<String>,
    cholesterol_level: Option<String>,
    blood_sugar_level: Option<String>,
    sleep_hours: Option<String>,
    updated_at: DateTime<Utc>,
}

impl From<ProfileRow> for HealthProfile {
    fn from(row: ProfileRow) -> Self {
        Self {
            user_id: row.user_id,
            age: row.age.map(FieldValue::Text),
            gender: row.gender.map(FieldValue::Text),
            height_cm: row.height_cm.map(FieldValue::Text),
            weight_kg: row.weight_kg.map(FieldValue::Text),
            bmi: row.bmi,
            chronic_disease: row.chronic_disease.map(FieldValue::Text),
            blood_pressure_systolic: row.blood_pressure_systolic.map(FieldValue::Text),
            blood_pressure_diastolic: row.blood_pressure_diastolic.map(FieldValue::Text),
            cholesterol_level: row.cholesterol_level.map(FieldValue::Text),
            blood_sugar_level: row.blood_sugar_level.map(FieldValue::Text),
            sleep_hours: row.sleep_hours.map(FieldValue::Text),
            updated_at: row.updated_at,
        }
    }
}

fn text(value: &Option<FieldValue>) -> Option<String> {
    value.as_ref().map(ToString::to_string)
}

#[async_trait::async_trait]
impl PlanStore for PgStore {
    async fn save_plan(&self, owner: &str, content: NewSavedPlan) -> AppResult<SavedPlan> {
        let record = SavedPlan::new(owner, content);

        sqlx::query(
            r#"
            INSERT INTO saved_plans (id, user_id, meal_plan_name, meals, saved_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(record.id)
        .bind(&record.user_id)
        .bind(&record.meal_plan_name)
        .bind(Json(&record.meals))
        .bind(record.saved_at)
        .execute(&self.pool)
        .await?;

        tracing::debug!(owner, id = %record.id, "Saved diet plan");
        Ok(record)
    }

    async fn list_plans(&self, owner: &str) -> AppResult<Vec<SavedPlan>> {
        let rows: Vec<SavedPlanRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, meal_plan_name, meals, saved_at
            FROM saved_plans
            WHERE user_id = $1
            ORDER BY saved_at DESC
            "#,
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(SavedPlan::from).collect())
    }

    async fn delete_plan(&self, owner: &str, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM saved_plans WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn save_workout(&self, owner: &str, content: NewSavedWorkout) -> AppResult<SavedWorkout> {
        let record = SavedWorkout::new(owner, content);

        sqlx::query(
            r#"
            INSERT INTO saved_workouts (id, user_id, title, description, plan, saved_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(record.id)
        .bind(&record.user_id)
        .bind(&record.title)
        .bind(&record.description)
        .bind(Json(&record.plan))
        .bind(record.saved_at)
        .execute(&self.pool)
        .await?;

        tracing::debug!(owner, id = %record.id, "Saved workout");
        Ok(record)
    }

    async fn list_workouts(&self, owner: &str) -> AppResult<Vec<SavedWorkout>> {
        let rows: Vec<SavedWorkoutRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, title, description, plan, saved_at
            FROM saved_workouts
            WHERE user_id = $1
            ORDER BY saved_at DESC
            "#,
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(SavedWorkout::from).collect())
    }

    async fn delete_workout(&self, owner: &str, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM saved_workouts WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() == 1)
    }
}

#[async_trait::async_trait]
impl ProfileStore for PgStore {
    async fn get_profile(&self, owner: &str) -> AppResult<Option<HealthProfile>> {
        let row: Option<ProfileRow> = sqlx::query_as(
            r#"
            SELECT user_id, age, gender, height_cm, weight_kg, bmi, chronic_disease,
                   blood_pressure_systolic, blood_pressure_diastolic, cholesterol_level,
                   blood_sugar_level, sleep_hours, updated_at
            FROM health_profiles
            WHERE user_id = $1
            "#,
        )
        .bind(owner)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(HealthProfile::from))
    }

    async fn upsert_profile(&self, profile: HealthProfile) -> AppResult<HealthProfile> {
        let row: ProfileRow = sqlx::query_as(
            r#"
            INSERT INTO health_profiles (
                user_id, age, gender, height_cm, weight_kg, bmi, chronic_disease,
                blood_pressure_systolic, blood_pressure_diastolic, cholesterol_level,
                blood_sugar_level, sleep_hours, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            ON CONFLICT (user_id) DO UPDATE SET
                age = EXCLUDED.age,
                gender = EXCLUDED.gender,
                height_cm = EXCLUDED.height_cm,
                weight_kg = EXCLUDED.weight_kg,
                bmi = EXCLUDED.bmi,
                chronic_disease = EXCLUDED.chronic_disease,
                blood_pressure_systolic = EXCLUDED.blood_pressure_systolic,
                blood_pressure_diastolic = EXCLUDED.blood_pressure_diastolic,
                cholesterol_level = EXCLUDED.cholesterol_level,
                blood_sugar_level = EXCLUDED.blood_sugar_level,
                sleep_hours = EXCLUDED.sleep_hours,
                updated_at = EXCLUDED.updated_at
            RETURNING user_id, age, gender, height_cm, weight_kg, bmi, chronic_disease,
                      blood_pressure_systolic, blood_pressure_diastolic, cholesterol_level,
                      blood_sugar_level, sleep_hours, updated_at
            "#,
        )
        .bind(&profile.user_id)
        .bind(text(&profile.age))
        .bind(text(&profile.gender))
        .bind(text(&profile.height_cm))
        .bind(text(&profile.weight_kg))
        .bind(profile.bmi)
        .bind(text(&profile.chronic_disease))
        .bind(text(&profile.blood_pressure_systolic))
        .bind(text(&profile.blood_pressure_diastolic))
        .bind(text(&profile.cholesterol_level))
        .bind(text(&profile.blood_sugar_level))
        .bind(text(&profile.sleep_hours))
        .bind(profile.updated_at)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(owner = %row.user_id, "Profile upserted");
        Ok(row.into())
    }
}
