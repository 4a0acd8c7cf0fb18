//!  Persistence of completed activities.
//!   - [activity_log::ActivityLog] keeps records in completion order.
//!   - The whole log lives in one [slot::LogSlot] as a JSON array and is rewritten on every
//!     change.

pub mod activity_log;
pub mod entities;
pub mod slot;
