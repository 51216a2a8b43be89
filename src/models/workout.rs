use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// Workout plan catalog entry
///
/// The lookup key is copied out of the entry; the entry itself is kept whole
/// and serialized back verbatim, key order included.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct WorkoutPlan {
    pub goal: String,
    pub level: String,
    pub duration: String,
    pub payload: Map<String, Value>,
}

impl TryFrom<Map<String, Value>> for WorkoutPlan {
    type Error = String;

    fn try_from(payload: Map<String, Value>) -> Result<Self, Self::Error> {
        let key = |name: &str| match payload.get(name) {
            Some(Value::String(value)) => Ok(value.clone()),
            Some(other) => Err(format!("'{}' must be a string, found {}", name, other)),
            None => Err(format!("missing '{}'", name)),
        };

        let goal = key("goal")?;
        let level = key("level")?;
        let duration = key("duration")?;

        Ok(Self {
            goal,
            level,
            duration,
            payload,
        })
    }
}

impl Serialize for WorkoutPlan {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.payload.serialize(serializer)
    }
}

impl WorkoutPlan {
    pub fn matches(&self, query: &WorkoutQuery) -> bool {
        query.goal.as_deref() == Some(self.goal.as_str())
            && query.level.as_deref() == Some(self.level.as_str())
            && query.duration.as_deref() == Some(self.duration.as_str())
    }
}

/// Lookup key for a workout plan. Absent parts never match.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkoutQuery {
    pub goal: Option<String>,
    pub level: Option<String>,
    pub duration: Option<String>,
}
