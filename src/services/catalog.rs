use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::models::{DietCategory, DietPlan, WorkoutPlan};

pub const DIET_PLANS_FILE: &str = "diet_plans.json";
pub const WORKOUTS_FILE: &str = "workouts.json";
pub const HEALTH_TIPS_FILE: &str = "health_tips.json";

/// Failure to load one catalog source
#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("diet catalog has no entry for model categories: {0}")]
    Inconsistent(String),
}

/// Whether a collection came from its source or degraded to empty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Loaded,
    Degraded,
}

#[derive(Deserialize)]
struct DietPlansDocument {
    diets: Vec<DietPlan>,
}

#[derive(Deserialize)]
struct WorkoutsDocument {
    #[serde(default)]
    workout_plans: Vec<serde_json::Value>,
}

#[derive(Deserialize)]
struct HealthTipsDocument {
    #[serde(default)]
    tips: Vec<String>,
}

/// Read-only reference data: diet plans, workout plans and health tips
///
/// Built once at startup and shared behind an `Arc`. There are no mutation
/// methods, so concurrent readers need no locking.
#[derive(Debug, Clone)]
pub struct Catalog {
    diets: HashMap<String, DietPlan>,
    workouts: Vec<WorkoutPlan>,
    tips: Vec<String>,
    diets_status: LoadStatus,
}

impl Catalog {
    /// Builds a catalog from in-memory collections
    ///
    /// Later diet plans with a duplicate name replace earlier ones.
    pub fn new(diets: Vec<DietPlan>, workouts: Vec<WorkoutPlan>, tips: Vec<String>) -> Self {
        Self {
            diets: index_diets(diets),
            workouts,
            tips,
            diets_status: LoadStatus::Loaded,
        }
    }

    /// Loads all three sources from `data_dir`
    ///
    /// Each source is independent: a missing or malformed file is logged and that
    /// collection is left empty while the others still load.
    pub fn load(data_dir: &Path) -> Self {
        let (diets, diets_status) = degrade(
            "diet_plans",
            load_document::<DietPlansDocument>(&data_dir.join(DIET_PLANS_FILE))
                .map(|doc| index_diets(doc.diets)),
        );
        let (workouts, _) = degrade(
            "workout_plans",
            load_document::<WorkoutsDocument>(&data_dir.join(WORKOUTS_FILE))
                .map(|doc| usable_workouts(doc.workout_plans)),
        );
        let (tips, _) = degrade(
            "health_tips",
            load_document::<HealthTipsDocument>(&data_dir.join(HEALTH_TIPS_FILE))
                .map(|doc| doc.tips),
        );

        tracing::info!(
            diets = diets.len(),
            workouts = workouts.len(),
            tips = tips.len(),
            "Catalog loaded"
        );

        Self {
            diets,
            workouts,
            tips,
            diets_status,
        }
    }

    pub fn diet(&self, name: &str) -> Option<&DietPlan> {
        self.diets.get(name)
    }

    pub fn diet_names(&self) -> impl Iterator<Item = &str> {
        self.diets.keys().map(String::as_str)
    }

    pub fn workouts(&self) -> &[WorkoutPlan] {
        &self.workouts
    }

    pub fn tips(&self) -> &[String] {
        &self.tips
    }

    pub fn diets_status(&self) -> LoadStatus {
        self.diets_status
    }

    /// Categories the classifier can emit that have no diet plan entry
    pub fn missing_categories(&self) -> Vec<DietCategory> {
        DietCategory::ALL
            .into_iter()
            .filter(|category| !self.diets.contains_key(category.label()))
            .collect()
    }

    /// Startup check that every category the classifier can emit has a diet plan
    ///
    /// A diet source that failed to load is already degraded and logged; the
    /// check is skipped for it and recommendations report the unknown category.
    pub fn ensure_covers_model(&self) -> Result<(), CatalogError> {
        if self.diets_status == LoadStatus::Degraded {
            tracing::warn!("Diet catalog degraded, skipping model coverage check");
            return Ok(());
        }

        let missing = self.missing_categories();
        if missing.is_empty() {
            return Ok(());
        }

        let names = missing
            .iter()
            .map(|category| category.label())
            .collect::<Vec<_>>()
            .join(", ");
        Err(CatalogError::Inconsistent(names))
    }
}

fn index_diets(diets: Vec<DietPlan>) -> HashMap<String, DietPlan> {
    diets
        .into_iter()
        .map(|plan| (plan.name.clone(), plan))
        .collect()
}

/// Keeps every entry with a string goal, level and duration; others are skipped
fn usable_workouts(entries: Vec<serde_json::Value>) -> Vec<WorkoutPlan> {
    entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(plan) => Some(plan),
            Err(e) => {
                tracing::warn!(index, error = %e, "Skipping malformed workout plan");
                None
            }
        })
        .collect()
}

fn load_document<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, CatalogError> {
    let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn degrade<T: Default>(source: &str, result: Result<T, CatalogError>) -> (T, LoadStatus) {
    match result {
        Ok(collection) => (collection, LoadStatus::Loaded),
        Err(e) => {
            tracing::error!(
                source,
                error = %e,
                "Catalog source failed to load, continuing with empty collection"
            );
            (T::default(), LoadStatus::Degraded)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MealOption;

    fn plan(name: &str, options: Vec<MealOption>) -> DietPlan {
        DietPlan {
            name: name.to_string(),
            description: None,
            meal_options: options,
        }
    }

    #[test]
    fn test_duplicate_diet_names_keep_last() {
        let first = plan("Low Fat", vec![]);
        let second = plan(
            "Low Fat",
            vec![MealOption::from([("dinner".to_string(), "Fish".to_string())])],
        );
        let catalog = Catalog::new(vec![first, second], vec![], vec![]);
        assert_eq!(catalog.diet("Low Fat").unwrap().meal_options.len(), 1);
    }

    #[test]
    fn test_missing_categories_reports_gaps() {
        let catalog = Catalog::new(
            vec![plan("Balanced Diet", vec![]), plan("Low Carb", vec![])],
            vec![],
            vec![],
        );
        let missing = catalog.missing_categories();
        assert_eq!(
            missing,
            vec![
                DietCategory::HighProtein,
                DietCategory::LowFat,
                DietCategory::Mediterranean
            ]
        );
    }

    #[test]
    fn test_complete_catalog_has_no_missing_categories() {
        let diets = DietCategory::ALL
            .iter()
            .map(|c| plan(c.label(), vec![]))
            .collect();
        let catalog = Catalog::new(diets, vec![], vec![]);
        assert!(catalog.missing_categories().is_empty());
        assert_eq!(catalog.diets_status(), LoadStatus::Loaded);
    }

    #[test]
    fn test_coverage_check_fails_on_gap() {
        let catalog = Catalog::new(vec![plan("Balanced Diet", vec![])], vec![], vec![]);
        let err = catalog.ensure_covers_model().unwrap_err();
        assert!(err.to_string().contains("Mediterranean"));
    }

    #[test]
    fn test_coverage_check_skipped_when_degraded() {
        let catalog = Catalog::load(Path::new("/definitely/not/a/helio/data/dir"));
        assert!(catalog.ensure_covers_model().is_ok());
    }

    #[test]
    fn test_malformed_workout_entry_is_skipped() {
        let entries = vec![
            serde_json::json!({"goal": "g", "level": "l", "duration": "30", "title": "Keep"}),
            serde_json::json!({"goal": "g", "level": "l", "duration": 45, "title": "Numeric"}),
            serde_json::json!({"goal": "g", "duration": "30", "title": "No level"}),
        ];
        let workouts = usable_workouts(entries);
        assert_eq!(workouts.len(), 1);
        assert_eq!(workouts[0].payload["title"], "Keep");
    }

    #[test]
    fn test_load_from_missing_directory_degrades_everything() {
        let catalog = Catalog::load(Path::new("/definitely/not/a/helio/data/dir"));
        assert_eq!(catalog.diets_status(), LoadStatus::Degraded);
        assert_eq!(catalog.diet_names().count(), 0);
        assert!(catalog.workouts().is_empty());
        assert!(catalog.tips().is_empty());
    }
}
