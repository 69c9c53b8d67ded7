// Read-only view of the object graph for renderers and inspectors.
// Everything here is an owned copy; nothing links back into the heap.

use super::heap::Heap;
use super::object::{MarkState, ObjectId};
use super::roots::RootSet;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectView {
    pub id: ObjectId,
    pub label: String,
    pub edges: Vec<ObjectId>,
    pub mark: MarkState,
    pub is_root: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct HeapSnapshot {
    /// Live objects in ascending identifier order
    pub objects: Vec<ObjectView>,
    pub roots: Vec<ObjectId>,
}

impl HeapSnapshot {
    pub(crate) fn capture<P>(heap: &Heap<P>, roots: &RootSet) -> Self {
        let mut objects: Vec<ObjectView> = heap
            .iter()
            .map(|obj| ObjectView {
                id: obj.id(),
                label: obj.label().to_string(),
                edges: obj.edges().to_vec(),
                mark: obj.mark(),
                is_root: roots.contains(obj.id()),
            })
            .collect();
        objects.sort_unstable_by_key(|view| view.id);

        Self {
            objects,
            roots: roots.sorted(),
        }
    }

    pub fn get(&self, id: ObjectId) -> Option<&ObjectView> {
        self.objects
            .binary_search_by_key(&id, |view| view.id)
            .ok()
            .map(|idx| &self.objects[idx])
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
