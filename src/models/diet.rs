use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Dietary category produced by the classifier
///
/// The discriminants are the model's class indices and must not be reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DietCategory {
    #[serde(rename = "Balanced Diet")]
    BalancedDiet = 0,
    #[serde(rename = "High Protein")]
    HighProtein = 1,
    #[serde(rename = "Low Carb")]
    LowCarb = 2,
    #[serde(rename = "Low Fat")]
    LowFat = 3,
    #[serde(rename = "Mediterranean")]
    Mediterranean = 4,
}

impl DietCategory {
    /// All categories in class-index order
    pub const ALL: [DietCategory; 5] = [
        DietCategory::BalancedDiet,
        DietCategory::HighProtein,
        DietCategory::LowCarb,
        DietCategory::LowFat,
        DietCategory::Mediterranean,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Catalog key for this category
    pub fn label(self) -> &'static str {
        match self {
            DietCategory::BalancedDiet => "Balanced Diet",
            DietCategory::HighProtein => "High Protein",
            DietCategory::LowCarb => "Low Carb",
            DietCategory::LowFat => "Low Fat",
            DietCategory::Mediterranean => "Mediterranean",
        }
    }
}

impl Display for DietCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DietCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.label() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// One concrete day of meals, keyed by meal slot (breakfast, lunch, ...) in
/// catalog order
pub type MealOption = IndexMap<String, String>;

/// Diet plan catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DietPlan {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub meal_options: Vec<MealOption>,
}

/// Response for a diet recommendation
#[derive(Debug, Clone, Serialize)]
pub struct DietRecommendation {
    pub meal_plan: DietCategory,
    pub recommendation: MealOption,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_table_is_fixed() {
        assert_eq!(DietCategory::from_index(0), Some(DietCategory::BalancedDiet));
        assert_eq!(DietCategory::from_index(1), Some(DietCategory::HighProtein));
        assert_eq!(DietCategory::from_index(2), Some(DietCategory::LowCarb));
        assert_eq!(DietCategory::from_index(3), Some(DietCategory::LowFat));
        assert_eq!(DietCategory::from_index(4), Some(DietCategory::Mediterranean));
        assert_eq!(DietCategory::from_index(5), None);
        for (i, category) in DietCategory::ALL.iter().enumerate() {
            assert_eq!(category.index(), i);
        }
    }

    #[test]
    fn test_category_serializes_as_label() {
        let json = serde_json::to_string(&DietCategory::LowCarb).unwrap();
        assert_eq!(json, "\"Low Carb\"");
        let parsed: DietCategory = serde_json::from_str("\"Balanced Diet\"").unwrap();
        assert_eq!(parsed, DietCategory::BalancedDiet);
    }

    #[test]
    fn test_from_str_is_exact() {
        assert_eq!("Low Fat".parse::<DietCategory>(), Ok(DietCategory::LowFat));
        assert!("low fat".parse::<DietCategory>().is_err());
    }

    #[test]
    fn test_meal_slots_keep_catalog_order() {
        let raw = r#"{"breakfast":"Oats","lunch":"Soup","dinner":"Fish","snack":"Apple"}"#;
        let meal: MealOption = serde_json::from_str(raw).unwrap();
        assert_eq!(serde_json::to_string(&meal).unwrap(), raw);
    }

    #[test]
    fn test_diet_plan_defaults_missing_options() {
        let plan: DietPlan = serde_json::from_str(r#"{"name": "Low Fat"}"#).unwrap();
        assert!(plan.meal_options.is_empty());
        assert_eq!(plan.description, None);
    }
}
