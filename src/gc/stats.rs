use serde::Serialize;

/// Record of a single collection cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CollectionStats {
    /// 1-based index of this cycle
    pub cycle_number: u64,
    /// Objects ever allocated, as of the end of this cycle
    pub allocated_total: u64,
    /// Live objects when the cycle started
    pub live_before: usize,
    /// Objects found reachable by the mark phase
    pub marked: usize,
    pub collected_this_cycle: usize,
    pub remaining_live: usize,
    /// Objects collected across all cycles so far, this one included
    pub total_collected_cumulative: u64,
    /// Root set size during this cycle
    pub roots: usize,
}

/// Running view of the collector, as returned by `get_stats`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct GcStats {
    pub allocated_total: u64,
    pub live_objects: usize,
    pub root_objects: usize,
    pub total_collected: u64,
    pub collection_cycles: u64,
}
