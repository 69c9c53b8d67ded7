// Marksweep
// A two-phase mark-and-sweep collector over an explicit object graph

pub mod config;
pub mod error;
pub mod gc;

pub use config::GcConfig;
pub use error::{ConfigError, GcError, GcResult};
pub use gc::{
    CollectionStats, Collector, GcStats, HeapSnapshot, ManagedObject, MarkState, ObjectId,
    ObjectView, SharedCollector,
};
