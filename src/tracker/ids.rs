use uuid::Uuid;

/// Source of identifiers for finished activities. Swappable so tests can pin ids.
#[cfg_attr(test, mockall::automock)]
pub trait IdGenerator: Send {
    fn next_id(&mut self) -> String;
}

/// Time ordered ids, so sorting by id roughly follows completion order.
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&mut self) -> String {
        Uuid::now_v7().to_string()
    }
}
