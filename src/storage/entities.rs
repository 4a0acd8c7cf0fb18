use serde::Deserialize;
use serde::Serialize;

/// A finished activity as it is stored in the activity log. Records are never modified after
/// they are created, only appended.
#[derive(PartialEq, Eq, Debug, Serialize, Deserialize, Clone)]
pub struct ActivityRecord {
    pub id: String,
    pub name: String,
    /// Tracked time in whole seconds.
    pub duration: u64,
}

impl ActivityRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>, duration: u64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            duration,
        }
    }
}
