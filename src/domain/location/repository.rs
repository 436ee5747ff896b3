use super::entity::Location;

/// Read-only access to the location table loaded at startup.
pub trait LocationRepository: Send + Sync {
    fn all(&self) -> &[Location];

    fn len(&self) -> usize {
        self.all().len()
    }

    fn is_empty(&self) -> bool {
        self.all().is_empty()
    }
}
