use std::fs;
use std::path::{Path, PathBuf};

use helio_api::{
    models::{DietCategory, WorkoutQuery},
    services::{
        catalog::{Catalog, LoadStatus, DIET_PLANS_FILE, HEALTH_TIPS_FILE, WORKOUTS_FILE},
        classifier::{Classifier, LABEL_ENCODER_FILE, MODEL_FILE, SCALER_FILE},
        selector::select_workout,
        vectorizer::FeatureVector,
    },
};

fn shipped(dir: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(dir)
}

fn copy_dir(from: &Path, to: &Path) {
    for entry in fs::read_dir(from).unwrap() {
        let entry = entry.unwrap();
        fs::copy(entry.path(), to.join(entry.file_name())).unwrap();
    }
}

#[test]
fn test_shipped_catalog_covers_every_category() {
    let catalog = Catalog::load(&shipped("data"));
    assert_eq!(catalog.diets_status(), LoadStatus::Loaded);
    assert!(catalog.ensure_covers_model().is_ok());
    assert!(!catalog.workouts().is_empty());
    assert!(!catalog.tips().is_empty());

    for category in DietCategory::ALL {
        let plan = catalog.diet(category.label()).unwrap();
        assert!(!plan.meal_options.is_empty(), "{} has no meals", category);
    }
}

#[test]
fn test_shipped_model_classifies_reference_profile() {
    let classifier = Classifier::load(&shipped("model")).unwrap();
    let vector = FeatureVector::new([
        30.0, 1.0, 175.0, 70.0, 24.2, 0.0, 120.0, 80.0, 180.0, 95.0, 7.0,
    ]);
    assert_eq!(
        classifier.classify(&vector).unwrap(),
        DietCategory::BalancedDiet
    );
}

#[test]
fn test_malformed_source_degrades_alone() {
    let dir = tempfile::tempdir().unwrap();
    copy_dir(&shipped("data"), dir.path());
    fs::write(dir.path().join(WORKOUTS_FILE), "{\"workout_plans\": [").unwrap();

    let catalog = Catalog::load(dir.path());
    assert!(catalog.workouts().is_empty());
    assert_eq!(catalog.diets_status(), LoadStatus::Loaded);
    assert_eq!(catalog.diet_names().count(), DietCategory::ALL.len());
    assert!(!catalog.tips().is_empty());
}

#[test]
fn test_bad_workout_entry_keeps_the_rest_matchable() {
    let dir = tempfile::tempdir().unwrap();
    copy_dir(&shipped("data"), dir.path());
    fs::write(
        dir.path().join(WORKOUTS_FILE),
        r#"{"workout_plans": [
            {"goal": "g", "level": "l", "duration": "30", "title": "Good"},
            {"goal": "g", "level": "l", "duration": 45, "title": "Bad"}
        ]}"#,
    )
    .unwrap();

    let catalog = Catalog::load(dir.path());
    assert_eq!(catalog.workouts().len(), 1);

    let query = WorkoutQuery {
        goal: Some("g".to_string()),
        level: Some("l".to_string()),
        duration: Some("30".to_string()),
    };
    let plan = select_workout(&catalog, &query).unwrap();
    assert_eq!(plan.payload["title"], "Good");
}

#[test]
fn test_missing_diet_source_degrades_and_skips_coverage_check() {
    let dir = tempfile::tempdir().unwrap();
    copy_dir(&shipped("data"), dir.path());
    fs::remove_file(dir.path().join(DIET_PLANS_FILE)).unwrap();

    let catalog = Catalog::load(dir.path());
    assert_eq!(catalog.diets_status(), LoadStatus::Degraded);
    assert!(catalog.ensure_covers_model().is_ok());
    assert!(!catalog.workouts().is_empty());
}

#[test]
fn test_diet_source_missing_a_category_fails_coverage_check() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join(DIET_PLANS_FILE),
        r#"{"diets": [{"name": "Low Carb", "meal_options": [{"breakfast": "Eggs"}]}]}"#,
    )
    .unwrap();
    fs::write(dir.path().join(HEALTH_TIPS_FILE), r#"{"tips": []}"#).unwrap();

    let catalog = Catalog::load(dir.path());
    assert_eq!(catalog.diets_status(), LoadStatus::Loaded);
    let err = catalog.ensure_covers_model().unwrap_err().to_string();
    assert!(err.contains("Balanced Diet"));
    assert!(!err.contains("Low Carb"));
}

#[test]
fn test_missing_model_artifact_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    copy_dir(&shipped("model"), dir.path());
    fs::remove_file(dir.path().join(MODEL_FILE)).unwrap();

    let err = Classifier::load(dir.path()).unwrap_err();
    assert!(err.to_string().contains(MODEL_FILE));
}

#[test]
fn test_reordered_label_table_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    copy_dir(&shipped("model"), dir.path());
    fs::write(
        dir.path().join(LABEL_ENCODER_FILE),
        r#"{"classes": ["High Protein", "Balanced Diet", "Low Carb", "Low Fat", "Mediterranean"]}"#,
    )
    .unwrap();

    assert!(Classifier::load(dir.path()).is_err());
}

#[test]
fn test_scaler_with_wrong_width_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    copy_dir(&shipped("model"), dir.path());
    fs::write(
        dir.path().join(SCALER_FILE),
        r#"{"mean": [0.0, 0.0], "scale": [1.0, 1.0]}"#,
    )
    .unwrap();

    assert!(Classifier::load(dir.path()).is_err());
}
