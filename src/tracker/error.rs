use thiserror::Error;

/// Raised when an operation can't proceed with the activity as it is. The tracker is left
/// untouched so the user can fix the input and try again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Enter an activity name to start the timer.")]
    MissingName,
    #[error("The current timer has no activity name.")]
    UnnamedDuration,
    #[error("Pause or stop the timer before renaming the activity.")]
    NameLocked,
}

impl ValidationError {
    pub fn title(&self) -> &'static str {
        match self {
            ValidationError::MissingName => "Activity name required",
            ValidationError::UnnamedDuration => "Can't log activity",
            ValidationError::NameLocked => "Timer is running",
        }
    }
}
