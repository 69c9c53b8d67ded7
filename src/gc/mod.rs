pub mod collector;
pub mod heap;
pub mod object;
pub mod roots;
pub mod shared;
pub mod snapshot;
pub mod stats;

#[cfg(test)]
mod proptests;

pub use collector::Collector;
pub use heap::Heap;
pub use object::{EdgeList, ManagedObject, MarkState, ObjectId};
pub use roots::RootSet;
pub use shared::SharedCollector;
pub use snapshot::{HeapSnapshot, ObjectView};
pub use stats::{CollectionStats, GcStats};
