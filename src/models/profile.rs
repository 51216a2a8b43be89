use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A raw profile field as captured from the user
///
/// Profiles are stored as entered, so a field may hold a number or free text.
/// Numeric coercion happens once, in the vectorizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// Returns true for blank text, which is treated the same as an absent field
    pub fn is_blank(&self) -> bool {
        matches!(self, FieldValue::Text(s) if s.trim().is_empty())
    }

    /// Coerces the value to a finite number
    pub fn as_number(&self) -> Option<f64> {
        let value = match self {
            FieldValue::Number(n) => *n,
            FieldValue::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

impl Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

/// Profile fields a user submits on update
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default)]
    pub age: Option<FieldValue>,
    #[serde(default)]
    pub gender: Option<FieldValue>,
    #[serde(default)]
    pub height_cm: Option<FieldValue>,
    #[serde(default)]
    pub weight_kg: Option<FieldValue>,
    #[serde(default)]
    pub chronic_disease: Option<FieldValue>,
    #[serde(default)]
    pub blood_pressure_systolic: Option<FieldValue>,
    #[serde(default)]
    pub blood_pressure_diastolic: Option<FieldValue>,
    #[serde(default)]
    pub cholesterol_level: Option<FieldValue>,
    #[serde(default)]
    pub blood_sugar_level: Option<FieldValue>,
    #[serde(default)]
    pub sleep_hours: Option<FieldValue>,
}

/// Stored health profile, one per user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthProfile {
    pub user_id: String,
    pub age: Option<FieldValue>,
    pub gender: Option<FieldValue>,
    pub height_cm: Option<FieldValue>,
    pub weight_kg: Option<FieldValue>,
    /// Derived from height and weight on every update
    pub bmi: Option<f64>,
    pub chronic_disease: Option<FieldValue>,
    pub blood_pressure_systolic: Option<FieldValue>,
    pub blood_pressure_diastolic: Option<FieldValue>,
    pub cholesterol_level: Option<FieldValue>,
    pub blood_sugar_level: Option<FieldValue>,
    pub sleep_hours: Option<FieldValue>,
    pub updated_at: DateTime<Utc>,
}

impl HealthProfile {
    /// Builds the full replacement profile for `user_id` from an update
    pub fn from_update(user_id: impl Into<String>, update: ProfileUpdate) -> Self {
        let bmi = derive_bmi(update.height_cm.as_ref(), update.weight_kg.as_ref());

        Self {
            user_id: user_id.into(),
            age: update.age,
            gender: update.gender,
            height_cm: update.height_cm,
            weight_kg: update.weight_kg,
            bmi,
            chronic_disease: update.chronic_disease,
            blood_pressure_systolic: update.blood_pressure_systolic,
            blood_pressure_diastolic: update.blood_pressure_diastolic,
            cholesterol_level: update.cholesterol_level,
            blood_sugar_level: update.blood_sugar_level,
            sleep_hours: update.sleep_hours,
            updated_at: Utc::now(),
        }
    }
}

/// BMI rounded to one decimal, or `None` when height or weight is unusable
pub fn derive_bmi(height_cm: Option<&FieldValue>, weight_kg: Option<&FieldValue>) -> Option<f64> {
    let height_m = height_cm?.as_number()? / 100.0;
    let weight = weight_kg?.as_number()?;

    if height_m <= 0.0 {
        return None;
    }

    let bmi = weight / (height_m * height_m);
    bmi.is_finite().then(|| (bmi * 10.0).round() / 10.0)
}
