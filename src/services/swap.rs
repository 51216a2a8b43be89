use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    services::catalog::Catalog,
};

/// Raw swap request parameters; empty strings count as absent
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SwapRequest {
    pub diet_name: Option<String>,
    pub meal_type: Option<String>,
    pub current_meal: Option<String>,
}

impl SwapRequest {
    fn parts(&self) -> AppResult<(&str, &str, &str)> {
        Ok((
            required(&self.diet_name)?,
            required(&self.meal_type)?,
            required(&self.current_meal)?,
        ))
    }
}

fn required(value: &Option<String>) -> AppResult<&str> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .ok_or(AppError::MissingSwapParameters)
}

/// Returns a different meal for `slot` from the same diet, or `current` when
/// the diet has no alternative for that slot
pub fn swap_meal<R: Rng + ?Sized>(
    catalog: &Catalog,
    category: &str,
    slot: &str,
    current: &str,
    rng: &mut R,
) -> AppResult<String> {
    let plan = catalog
        .diet(category)
        .ok_or_else(|| AppError::UnknownDietCategory(category.to_string()))?;

    let candidates: Vec<&String> = plan
        .meal_options
        .iter()
        .filter_map(|option| option.get(slot))
        .filter(|value| value.as_str() != current)
        .collect();

    match candidates.choose(rng) {
        Some(value) => Ok((*value).clone()),
        None => {
            tracing::debug!(category, slot, "No alternative meal, keeping current");
            Ok(current.to_string())
        }
    }
}

/// Validates the request and performs the swap
pub fn swap<R: Rng + ?Sized>(
    catalog: &Catalog,
    request: &SwapRequest,
    rng: &mut R,
) -> AppResult<String> {
    let (category, slot, current) = request.parts()?;
    swap_meal(catalog, category, slot, current, rng)
}
