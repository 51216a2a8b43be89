use rand::Rng;

use crate::{
    db::ProfileStore,
    error::AppResult,
    models::{DietCategory, DietRecommendation, HealthProfile},
    services::{
        catalog::Catalog, classifier::Classifier, selector::select_meal, vectorizer::vectorize,
        SharedRng,
    },
};

/// Vectorizes a profile and classifies it into a diet category
pub fn classify_profile(
    profile: Option<&HealthProfile>,
    classifier: &Classifier,
) -> AppResult<DietCategory> {
    let vector = vectorize(profile)?;
    classifier.classify(&vector)
}

/// Generates a diet recommendation from a profile
///
/// Classifies the profile and picks one meal option of that category at random.
pub fn recommend_for_profile<R: Rng + ?Sized>(
    profile: Option<&HealthProfile>,
    classifier: &Classifier,
    catalog: &Catalog,
    rng: &mut R,
) -> AppResult<DietRecommendation> {
    let category = classify_profile(profile, classifier)?;
    let meal = select_meal(catalog, category.label(), rng)?;

    Ok(DietRecommendation {
        meal_plan: category,
        recommendation: meal.clone(),
    })
}

/// Loads the owner's stored profile and recommends a diet for it
pub async fn recommend_diet(
    profiles: &dyn ProfileStore,
    classifier: &Classifier,
    catalog: &Catalog,
    rng: &SharedRng,
    owner: &str,
) -> AppResult<DietRecommendation> {
    let profile = profiles.get_profile(owner).await?;

    // Inference runs outside the generator lock; only the pick needs it.
    let category = classify_profile(profile.as_ref(), classifier)?;
    let meal = rng.with(|rng| select_meal(catalog, category.label(), rng).cloned())?;
    let recommendation = DietRecommendation {
        meal_plan: category,
        recommendation: meal,
    };

    tracing::info!(
        owner,
        meal_plan = %recommendation.meal_plan,
        "Diet recommendation generated"
    );

    Ok(recommendation)
}
