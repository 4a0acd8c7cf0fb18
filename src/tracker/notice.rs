use crate::{storage::entities::ActivityRecord, utils::time::format_seconds};

use super::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Default,
    Destructive,
}

/// Short message about the outcome of an operation. Notices are only shown to the user and are
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Started { name: String },
    Resumed { name: String, elapsed: u64 },
    AlreadyRunning { name: String },
    Paused { name: String },
    NotRunning,
    Logged(ActivityRecord),
    NothingToStop,
    /// Reset of a timer that had a name or some elapsed time.
    Reset { name: String },
    /// Reset of a timer that had nothing on it.
    Cleared,
    /// A paused timer was dropped because the activity name changed.
    TimerCleared { name: String },
    Rejected(ValidationError),
}

impl Notice {
    pub fn title(&self) -> &'static str {
        match self {
            Notice::Started { .. } => "Started",
            Notice::Resumed { .. } => "Resumed",
            Notice::AlreadyRunning { .. } => "Already running",
            Notice::Paused { .. } => "Paused",
            Notice::NotRunning => "Not running",
            Notice::Logged(_) => "Activity logged",
            Notice::NothingToStop => "Nothing to stop",
            Notice::Reset { .. } | Notice::Cleared => "Timer reset",
            Notice::TimerCleared { .. } => "Timer reset for current activity",
            Notice::Rejected(e) => e.title(),
        }
    }

    pub fn description(&self) -> String {
        match self {
            Notice::Started { name } => format!("Tracking \"{name}\"."),
            Notice::Resumed { name, elapsed } => {
                format!("\"{name}\" resumed at {}.", format_seconds(*elapsed))
            }
            Notice::AlreadyRunning { name } => format!("\"{name}\" is already being tracked."),
            Notice::Paused { name } => format!("\"{name}\" paused."),
            Notice::NotRunning => "There is no running activity to pause.".into(),
            Notice::Logged(record) => format!("\"{}\" for {}s.", record.name, record.duration),
            Notice::NothingToStop => "There is no running or paused activity.".into(),
            Notice::Reset { name } => format!("Timer for \"{name}\" was reset."),
            Notice::Cleared => "Timer cleared.".into(),
            Notice::TimerCleared { name } => format!("Timer for \"{name}\" was cleared."),
            Notice::Rejected(e) => e.to_string(),
        }
    }

    pub fn variant(&self) -> Variant {
        match self {
            Notice::Rejected(_) => Variant::Destructive,
            _ => Variant::Default,
        }
    }
}

impl From<ValidationError> for Notice {
    fn from(value: ValidationError) -> Self {
        Notice::Rejected(value)
    }
}
