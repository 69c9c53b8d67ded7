// Marksweep Collector
// Two-phase mark-and-sweep over an explicit object graph
//
// - Mark: reset every mark, then walk outgoing edges from the root set with
//   an explicit worklist. Objects are marked when first discovered, so each
//   one is expanded at most once and cycles terminate.
// - Sweep: every live object still unmarked is removed from the heap and
//   tombstoned. Survivors go back to unmarked for the next cycle.
//
// All mutation goes through `&mut self`, so nothing can interleave with a
// cycle in progress.

use super::heap::Heap;
use super::object::{EdgeList, ManagedObject, MarkState, ObjectId};
use super::roots::RootSet;
use super::snapshot::HeapSnapshot;
use super::stats::{CollectionStats, GcStats};
use crate::config::GcConfig;
use crate::error::{GcError, GcResult};
use tracing::{debug, error, trace};

pub struct Collector<P> {
    heap: Heap<P>,
    roots: RootSet,
    config: GcConfig,
    /// Live object count above which `should_collect` fires
    threshold: usize,
    total_collected: u64,
    cycles: u64,
    /// Append-only, one entry per completed cycle
    history: Vec<CollectionStats>,
}

impl<P> Collector<P> {
    pub fn new() -> Self {
        Self::with_config(GcConfig::default())
    }

    pub fn with_config(config: GcConfig) -> Self {
        Self {
            heap: Heap::new(),
            roots: RootSet::new(),
            threshold: config.initial_threshold,
            config,
            total_collected: 0,
            cycles: 0,
            history: Vec::new(),
        }
    }

    /// Allocate a new unmarked object with no outgoing references
    pub fn allocate(&mut self, label: impl Into<String>, payload: P) -> ObjectId {
        let id = self.heap.allocate(label, payload);
        trace!(id = %id, live = self.heap.len(), "allocated");
        id
    }

    pub fn lookup(&self, id: ObjectId) -> GcResult<&ManagedObject<P>> {
        self.heap.lookup(id)
    }

    pub fn payload_mut(&mut self, id: ObjectId) -> GcResult<&mut P> {
        Ok(self.heap.lookup_mut(id)?.payload_mut())
    }

    /// Add the edge `from -> to`. Both ends must be live.
    /// Returns false if the edge already existed.
    pub fn add_reference(&mut self, from: ObjectId, to: ObjectId) -> GcResult<bool> {
        self.heap
            .lookup(to)
            .map_err(GcError::into_dangling_reference)?;
        let source = self
            .heap
            .lookup_mut(from)
            .map_err(GcError::into_dangling_reference)?;
        let added = source.add_edge(to);
        if added {
            trace!(from = %from, to = %to, "reference added");
        }
        Ok(added)
    }

    /// Drop the edge `from -> to` if present. Only `from` has to be live, so a
    /// stale edge can still be cleaned up.
    pub fn remove_reference(&mut self, from: ObjectId, to: ObjectId) -> GcResult<bool> {
        let source = self
            .heap
            .lookup_mut(from)
            .map_err(GcError::into_dangling_reference)?;
        Ok(source.remove_edge(to))
    }

    /// Returns false if `id` was already a root
    pub fn add_root(&mut self, id: ObjectId) -> GcResult<bool> {
        self.heap.lookup(id).map_err(GcError::into_dangling_root)?;
        Ok(self.roots.insert(id))
    }

    pub fn remove_root(&mut self, id: ObjectId) -> bool {
        self.roots.remove(id)
    }

    /// Mark everything reachable from the root set. Returns the marked count.
    pub fn mark_phase(&mut self) -> GcResult<usize> {
        for obj in self.heap.iter_mut() {
            obj.mark = MarkState::Unmarked;
        }

        let mut worklist: Vec<ObjectId> = Vec::with_capacity(self.roots.len());
        let mut marked = 0;

        for root in self.roots.iter() {
            let obj = match self.heap.lookup_mut(root) {
                Ok(obj) => obj,
                Err(err) => {
                    let err = err.into_dangling_root();
                    error!(root = %root, %err, "mark phase hit a stale root");
                    return Err(err);
                }
            };
            if obj.mark == MarkState::Unmarked {
                obj.mark = MarkState::Marked;
                marked += 1;
                worklist.push(root);
            }
        }

        while let Some(id) = worklist.pop() {
            let edges = EdgeList::from_slice(self.heap.lookup(id)?.edges());
            for target in edges {
                let child = match self.heap.lookup_mut(target) {
                    Ok(child) => child,
                    Err(err) => {
                        let err = err.into_dangling_reference();
                        error!(from = %id, to = %target, %err, "mark phase followed a stale reference");
                        return Err(err);
                    }
                };
                if child.mark == MarkState::Unmarked {
                    child.mark = MarkState::Marked;
                    marked += 1;
                    trace!(id = %target, "marked");
                    worklist.push(target);
                }
            }
        }

        debug!(marked, live = self.heap.len(), "mark phase complete");
        Ok(marked)
    }

    /// Reclaim every object the last mark phase left unmarked.
    /// Returns the number collected.
    pub fn sweep_phase(&mut self) -> GcResult<usize> {
        let mut garbage = Vec::new();
        for obj in self.heap.iter_mut() {
            match obj.mark {
                MarkState::Marked => obj.mark = MarkState::Unmarked,
                _ => garbage.push(obj.id()),
            }
        }

        for id in &garbage {
            let obj = self.heap.remove(*id)?;
            trace!(id = %id, label = obj.label(), "collected");
        }

        let collected = garbage.len();
        self.total_collected += collected as u64;
        debug!(collected, live = self.heap.len(), "sweep phase complete");
        Ok(collected)
    }

    /// Run one full cycle and record its stats in the history
    pub fn collect(&mut self) -> GcResult<CollectionStats> {
        let live_before = self.heap.len();
        debug!(
            cycle = self.cycles + 1,
            live = live_before,
            roots = self.roots.len(),
            "collection cycle started"
        );

        let marked = self.mark_phase()?;
        let collected = self.sweep_phase()?;

        self.cycles += 1;
        let stats = CollectionStats {
            cycle_number: self.cycles,
            allocated_total: self.heap.allocated_total(),
            live_before,
            marked,
            collected_this_cycle: collected,
            remaining_live: self.heap.len(),
            total_collected_cumulative: self.total_collected,
            roots: self.roots.len(),
        };
        self.history.push(stats);
        self.threshold = self.config.next_threshold(self.heap.len());

        debug!(
            cycle = stats.cycle_number,
            collected,
            remaining = stats.remaining_live,
            threshold = self.threshold,
            "collection cycle finished"
        );
        Ok(stats)
    }

    pub fn should_collect(&self) -> bool {
        self.heap.len() > self.threshold
    }

    /// Collect only if the live object count has passed the threshold
    pub fn collect_if_needed(&mut self) -> GcResult<Option<CollectionStats>> {
        if !self.should_collect() {
            return Ok(None);
        }
        self.collect().map(Some)
    }

    pub fn get_stats(&self) -> GcStats {
        GcStats {
            allocated_total: self.heap.allocated_total(),
            live_objects: self.heap.len(),
            root_objects: self.roots.len(),
            total_collected: self.total_collected,
            collection_cycles: self.cycles,
        }
    }

    pub fn collection_history(&self) -> &[CollectionStats] {
        &self.history
    }

    pub fn snapshot(&self) -> HeapSnapshot {
        HeapSnapshot::capture(&self.heap, &self.roots)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.heap.contains(id)
    }

    pub fn is_collected(&self, id: ObjectId) -> bool {
        self.heap.is_tombstoned(id)
    }

    pub fn is_root(&self, id: ObjectId) -> bool {
        self.roots.contains(id)
    }

    pub fn roots(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.roots.iter()
    }

    pub fn objects(&self) -> impl Iterator<Item = &ManagedObject<P>> {
        self.heap.iter()
    }

    pub fn live_count(&self) -> usize {
        self.heap.len()
    }

    pub fn root_count(&self) -> usize {
        self.roots.len()
    }

    pub fn config(&self) -> &GcConfig {
        &self.config
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }
}

impl<P> Default for Collector<P> {
    fn default() -> Self {
        Self::new()
    }
}
