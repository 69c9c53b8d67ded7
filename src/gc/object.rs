use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Edge lists stay inline for the common case of a handful of references
pub type EdgeList = SmallVec<[ObjectId; 4]>;

/// Handle to a managed object. Handed out by the collector, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(u64);

impl ObjectId {
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Reachability state of an object within a collection cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkState {
    Unmarked,
    Marked,
    Collected,
}

impl fmt::Display for MarkState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkState::Unmarked => write!(f, "unmarked"),
            MarkState::Marked => write!(f, "marked"),
            MarkState::Collected => write!(f, "collected"),
        }
    }
}

/// A node in the object graph
#[derive(Debug, Clone)]
pub struct ManagedObject<P> {
    id: ObjectId,
    label: String,
    payload: P,
    edges: EdgeList,
    pub(crate) mark: MarkState,
}

impl<P> ManagedObject<P> {
    pub(crate) fn new(id: ObjectId, label: impl Into<String>, payload: P) -> Self {
        Self {
            id,
            label: label.into(),
            payload,
            edges: SmallVec::new(),
            mark: MarkState::Unmarked,
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn payload(&self) -> &P {
        &self.payload
    }

    pub(crate) fn payload_mut(&mut self) -> &mut P {
        &mut self.payload
    }

    /// Outgoing references in insertion order
    pub fn edges(&self) -> &[ObjectId] {
        &self.edges
    }

    pub fn mark(&self) -> MarkState {
        self.mark
    }

    pub fn references(&self, target: ObjectId) -> bool {
        self.edges.contains(&target)
    }

    /// Insert an edge. Returns false if it was already present.
    pub(crate) fn add_edge(&mut self, target: ObjectId) -> bool {
        if self.references(target) {
            return false;
        }
        self.edges.push(target);
        true
    }

    /// Remove an edge. Returns whether it existed.
    pub(crate) fn remove_edge(&mut self, target: ObjectId) -> bool {
        match self.edges.iter().position(|e| *e == target) {
            Some(pos) => {
                self.edges.remove(pos);
                true
            }
            None => false,
        }
    }
}

impl<P> fmt::Display for ManagedObject<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Object({}: {}, refs={}, state={})",
            self.id.0,
            self.label,
            self.edges.len(),
            self.mark
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_object_is_unmarked_and_empty() {
        let obj = ManagedObject::new(ObjectId::from_raw(1), "test", "value");
        assert_eq!(obj.label(), "test");
        assert_eq!(*obj.payload(), "value");
        assert_eq!(obj.mark(), MarkState::Unmarked);
        assert!(obj.edges().is_empty());
    }

    #[test]
    fn test_duplicate_edges_collapse() {
        let mut obj = ManagedObject::new(ObjectId::from_raw(1), "a", ());
        let target = ObjectId::from_raw(2);
        assert!(obj.add_edge(target));
        assert!(!obj.add_edge(target));
        assert_eq!(obj.edges(), &[target]);
    }

    #[test]
    fn test_remove_edge_keeps_order() {
        let mut obj = ManagedObject::new(ObjectId::from_raw(1), "a", ());
        for raw in 2..6 {
            obj.add_edge(ObjectId::from_raw(raw));
        }
        assert!(obj.remove_edge(ObjectId::from_raw(3)));
        assert!(!obj.remove_edge(ObjectId::from_raw(3)));
        let raws: Vec<u64> = obj.edges().iter().map(|e| e.as_u64()).collect();
        assert_eq!(raws, vec![2, 4, 5]);
    }

    #[test]
    fn test_display() {
        let mut obj = ManagedObject::new(ObjectId::from_raw(4), "Main", ());
        obj.add_edge(ObjectId::from_raw(5));
        assert_eq!(obj.to_string(), "Object(4: Main, refs=1, state=unmarked)");
        assert_eq!(ObjectId::from_raw(4).to_string(), "#4");
    }
}
