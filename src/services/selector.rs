use rand::seq::SliceRandom;
use rand::Rng;

use crate::{
    error::{AppError, AppResult},
    models::{MealOption, WorkoutPlan, WorkoutQuery},
    services::catalog::Catalog,
};

/// Picks one meal option for a diet category, uniformly at random
pub fn select_meal<'a, R: Rng + ?Sized>(
    catalog: &'a Catalog,
    category: &str,
    rng: &mut R,
) -> AppResult<&'a MealOption> {
    let plan = catalog
        .diet(category)
        .ok_or_else(|| AppError::UnknownDietCategory(category.to_string()))?;

    plan.meal_options
        .choose(rng)
        .ok_or_else(|| AppError::NoRecommendationAvailable(category.to_string()))
}

/// Returns the first workout plan whose goal, level and duration all match exactly
pub fn select_workout<'a>(
    catalog: &'a Catalog,
    query: &WorkoutQuery,
) -> AppResult<&'a WorkoutPlan> {
    catalog
        .workouts()
        .iter()
        .find(|plan| plan.matches(query))
        .ok_or(AppError::NoMatchingWorkout)
}

/// Picks one health tip uniformly at random
pub fn select_tip<'a, R: Rng + ?Sized>(catalog: &'a Catalog, rng: &mut R) -> AppResult<&'a str> {
    catalog
        .tips()
        .choose(rng)
        .map(String::as_str)
        .ok_or(AppError::TipsUnavailable)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DietPlan;
    use rand::{rngs::StdRng, SeedableRng};
    use serde_json::json;

    fn meal(slot: &str, value: &str) -> MealOption {
        MealOption::from([(slot.to_string(), value.to_string())])
    }

    fn catalog() -> Catalog {
        let diets = vec![
            DietPlan {
                name: "High Protein".to_string(),
                description: None,
                meal_options: vec![
                    meal("breakfast", "Greek yogurt"),
                    meal("breakfast", "Egg whites"),
                    meal("breakfast", "Protein oats"),
                ],
            },
            DietPlan {
                name: "Low Fat".to_string(),
                description: None,
                meal_options: vec![],
            },
        ];
        let workouts = vec![
            serde_json::from_value(json!({
                "goal": "weight_loss", "level": "beginner", "duration": "30",
                "title": "First match"
            }))
            .unwrap(),
            serde_json::from_value(json!({
                "goal": "weight_loss", "level": "beginner", "duration": "30",
                "title": "Second match"
            }))
            .unwrap(),
        ];
        Catalog::new(diets, workouts, vec!["Drink water".to_string()])
    }

    #[test]
    fn test_select_meal_only_returns_catalog_options() {
        let catalog = catalog();
        let options = &catalog.diet("High Protein").unwrap().meal_options;
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let picked = select_meal(&catalog, "High Protein", &mut rng).unwrap();
            assert!(options.contains(picked));
        }
    }

    #[test]
    fn test_select_meal_is_reproducible_with_seed() {
        let catalog = catalog();
        let mut a = StdRng::seed_from_u64(99);
        let mut b = StdRng::seed_from_u64(99);
        for _ in 0..20 {
            assert_eq!(
                select_meal(&catalog, "High Protein", &mut a).unwrap(),
                select_meal(&catalog, "High Protein", &mut b).unwrap()
            );
        }
    }

    #[test]
    fn test_select_meal_unknown_category() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            select_meal(&catalog(), "Keto", &mut rng),
            Err(AppError::UnknownDietCategory(name)) if name == "Keto"
        ));
    }

    #[test]
    fn test_select_meal_empty_options() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            select_meal(&catalog(), "Low Fat", &mut rng),
            Err(AppError::NoRecommendationAvailable(_))
        ));
    }

    #[test]
    fn test_select_workout_first_exact_match() {
        let catalog = catalog();
        let query = WorkoutQuery {
            goal: Some("weight_loss".to_string()),
            level: Some("beginner".to_string()),
            duration: Some("30".to_string()),
        };
        let plan = select_workout(&catalog, &query).unwrap();
        assert_eq!(plan.payload["title"], "First match");
    }

    #[test]
    fn test_select_workout_no_partial_match() {
        let query = WorkoutQuery {
            goal: Some("weight_loss".to_string()),
            level: Some("beginner".to_string()),
            duration: Some("45".to_string()),
        };
        assert!(matches!(
            select_workout(&catalog(), &query),
            Err(AppError::NoMatchingWorkout)
        ));
        assert!(matches!(
            select_workout(&catalog(), &WorkoutQuery::default()),
            Err(AppError::NoMatchingWorkout)
        ));
    }

    #[test]
    fn test_select_tip() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(select_tip(&catalog(), &mut rng).unwrap(), "Drink water");

        let empty = Catalog::new(vec![], vec![], vec![]);
        assert!(matches!(
            select_tip(&empty, &mut rng),
            Err(AppError::TipsUnavailable)
        ));
    }
}
