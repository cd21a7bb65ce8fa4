use std::collections::HashSet;
use tracing::debug;
use uuid::Uuid;

pub type RegionId = Uuid;

/// Explicit bookkeeping of interactive regions. The presentation layer
/// registers a region when it mounts and unregisters it when it unmounts;
/// enter/leave maintain the set of regions the pointer currently overlaps.
/// Hover is active iff at least one region is entered, so leaving one of
/// two overlapping regions does not drop hover while still over the other.
#[derive(Debug, Default)]
pub struct HoverRegistry {
    registered: HashSet<RegionId>,
    entered: HashSet<RegionId>,
}

impl HoverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self) -> RegionId {
        let id = Uuid::new_v4();
        self.registered.insert(id);
        id
    }

    pub fn unregister(&mut self, id: RegionId) {
        self.registered.remove(&id);
        self.entered.remove(&id);
    }

    /// Enter/leave carry no error path: all pointer input is valid. Calls
    /// referencing unknown regions are dropped with a debug log.
    pub fn enter(&mut self, id: RegionId) {
        if !self.registered.contains(&id) {
            debug!(region = %id, "enter for unregistered region ignored");
            return;
        }
        self.entered.insert(id);
    }

    pub fn leave(&mut self, id: RegionId) {
        if !self.entered.remove(&id) {
            debug!(region = %id, "leave for region that was not entered ignored");
        }
    }

    pub fn any_active(&self) -> bool {
        !self.entered.is_empty()
    }

    pub fn registered_count(&self) -> usize {
        self.registered.len()
    }
}
