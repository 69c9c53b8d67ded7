use super::object::ObjectId;
use rustc_hash::FxHashSet;

/// Identifiers treated as externally reachable (stack slots, globals).
/// Membership only; validation against the heap is the collector's job.
#[derive(Debug, Clone, Default)]
pub struct RootSet {
    members: FxHashSet<ObjectId>,
}

impl RootSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if `id` was already a root
    pub fn insert(&mut self, id: ObjectId) -> bool {
        self.members.insert(id)
    }

    pub fn remove(&mut self, id: ObjectId) -> bool {
        self.members.remove(&id)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.members.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.members.iter().copied()
    }

    /// Members in ascending identifier order
    pub fn sorted(&self) -> Vec<ObjectId> {
        let mut ids: Vec<ObjectId> = self.iter().collect();
        ids.sort_unstable();
        ids
    }
}
