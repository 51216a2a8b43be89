mod diet;
mod profile;
mod saved;
mod workout;

pub use diet::{DietCategory, DietPlan, DietRecommendation, MealOption};
pub use profile::{derive_bmi, FieldValue, HealthProfile, ProfileUpdate};
pub use saved::{
    NewSavedPlan, NewSavedWorkout, SavePlanRequest, SaveWorkoutRequest, SavedCollection,
    SavedPlan, SavedWorkout,
};
pub use workout::{WorkoutPlan, WorkoutQuery};
