use crate::{
    error::{AppError, AppResult},
    models::{FieldValue, HealthProfile},
};

/// Number of model inputs
pub const FEATURE_COUNT: usize = 11;

/// Feature names in model input order
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "age",
    "gender",
    "height_cm",
    "weight_kg",
    "bmi",
    "chronic_disease",
    "blood_pressure_systolic",
    "blood_pressure_diastolic",
    "cholesterol_level",
    "blood_sugar_level",
    "sleep_hours",
];

pub const DEFAULT_BMI: f64 = 24.2;
pub const DEFAULT_CHRONIC_DISEASE: f64 = 0.0;
pub const DEFAULT_SYSTOLIC: f64 = 120.0;
pub const DEFAULT_DIASTOLIC: f64 = 80.0;
pub const DEFAULT_CHOLESTEROL: f64 = 180.0;
pub const DEFAULT_BLOOD_SUGAR: f64 = 95.0;
pub const DEFAULT_SLEEP_HOURS: f64 = 7.0;

/// Model input built from a health profile
///
/// The order of values is a contract with the trained scaler and model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn new(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn values(&self) -> [f64; FEATURE_COUNT] {
        self.0
    }
}

/// Converts a stored profile into the model's feature vector
///
/// Fails with `IncompleteProfile` when the profile is missing or any of age,
/// gender, height or weight is absent or blank. Optional fields fall back to
/// their defaults. Any present value that is not numeric fails with
/// `InvalidProfileData`.
pub fn vectorize(profile: Option<&HealthProfile>) -> AppResult<FeatureVector> {
    let profile = profile.ok_or(AppError::IncompleteProfile)?;

    let mandatory = [
        &profile.age,
        &profile.gender,
        &profile.height_cm,
        &profile.weight_kg,
    ];
    if mandatory.iter().any(|field| present(field).is_none()) {
        return Err(AppError::IncompleteProfile);
    }

    let bmi = match profile.bmi {
        Some(bmi) if bmi.is_finite() => bmi,
        Some(_) => return Err(AppError::InvalidProfileData { field: "bmi" }),
        None => DEFAULT_BMI,
    };

    Ok(FeatureVector([
        required("age", &profile.age)?,
        required("gender", &profile.gender)?,
        required("height_cm", &profile.height_cm)?,
        required("weight_kg", &profile.weight_kg)?,
        bmi,
        optional(
            "chronic_disease",
            &profile.chronic_disease,
            DEFAULT_CHRONIC_DISEASE,
        )?,
        optional(
            "blood_pressure_systolic",
            &profile.blood_pressure_systolic,
            DEFAULT_SYSTOLIC,
        )?,
        optional(
            "blood_pressure_diastolic",
            &profile.blood_pressure_diastolic,
            DEFAULT_DIASTOLIC,
        )?,
        optional(
            "cholesterol_level",
            &profile.cholesterol_level,
            DEFAULT_CHOLESTEROL,
        )?,
        optional(
            "blood_sugar_level",
            &profile.blood_sugar_level,
            DEFAULT_BLOOD_SUGAR,
        )?,
        optional("sleep_hours", &profile.sleep_hours, DEFAULT_SLEEP_HOURS)?,
    ]))
}

fn present(field: &Option<FieldValue>) -> Option<&FieldValue> {
    field.as_ref().filter(|value| !value.is_blank())
}

fn required(name: &'static str, field: &Option<FieldValue>) -> AppResult<f64> {
    let value = present(field).ok_or(AppError::IncompleteProfile)?;
    value
        .as_number()
        .ok_or(AppError::InvalidProfileData { field: name })
}

fn optional(name: &'static str, field: &Option<FieldValue>, default: f64) -> AppResult<f64> {
    match present(field) {
        Some(value) => value
            .as_number()
            .ok_or(AppError::InvalidProfileData { field: name }),
        None => Ok(default),
    }
}
