use super::object::{ManagedObject, MarkState, ObjectId};
use crate::error::{GcError, GcResult};
use rustc_hash::{FxHashMap, FxHashSet};

/// Owner of every live object, plus tombstones for the ones already collected
#[derive(Debug)]
pub struct Heap<P> {
    /// Next identifier to hand out
    next_id: u64,
    /// Live objects
    live: FxHashMap<ObjectId, ManagedObject<P>>,
    /// Identifiers of collected objects
    tombstones: FxHashSet<ObjectId>,
}

impl<P> Heap<P> {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            live: FxHashMap::default(),
            tombstones: FxHashSet::default(),
        }
    }

    pub fn allocate(&mut self, label: impl Into<String>, payload: P) -> ObjectId {
        let id = ObjectId::from_raw(self.next_id);
        self.next_id += 1;
        self.live.insert(id, ManagedObject::new(id, label, payload));
        id
    }

    pub fn lookup(&self, id: ObjectId) -> GcResult<&ManagedObject<P>> {
        match self.live.get(&id) {
            Some(obj) => Ok(obj),
            None => Err(self.missing(id)),
        }
    }

    pub fn lookup_mut(&mut self, id: ObjectId) -> GcResult<&mut ManagedObject<P>> {
        if !self.live.contains_key(&id) {
            return Err(self.missing(id));
        }
        self.live
            .get_mut(&id)
            .ok_or(GcError::UnknownObject(id))
    }

    /// Take an object out of the live mapping and leave a tombstone behind.
    /// The returned object is in the `Collected` state.
    pub fn remove(&mut self, id: ObjectId) -> GcResult<ManagedObject<P>> {
        match self.live.remove(&id) {
            Some(mut obj) => {
                obj.mark = MarkState::Collected;
                self.tombstones.insert(id);
                Ok(obj)
            }
            None => Err(self.missing(id)),
        }
    }

    /// Error for an identifier that is not live
    fn missing(&self, id: ObjectId) -> GcError {
        if self.tombstones.contains(&id) {
            GcError::ObjectAlreadyCollected(id)
        } else {
            GcError::UnknownObject(id)
        }
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.live.contains_key(&id)
    }

    pub fn is_tombstoned(&self, id: ObjectId) -> bool {
        self.tombstones.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Number of identifiers handed out so far
    pub fn allocated_total(&self) -> u64 {
        self.next_id - 1
    }

    pub fn tombstone_count(&self) -> usize {
        self.tombstones.len()
    }

    /// Live objects in no particular order
    pub fn iter(&self) -> impl Iterator<Item = &ManagedObject<P>> {
        self.live.values()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut ManagedObject<P>> {
        self.live.values_mut()
    }
}

impl<P> Default for Heap<P> {
    fn default() -> Self {
        Self::new()
    }
}
