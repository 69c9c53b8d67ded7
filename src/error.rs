// Marksweep Error Handling Module
// Every fallible collector operation reports one of these kinds to its caller

use crate::gc::ObjectId;
use thiserror::Error;

/// Errors raised by heap, root set and collector operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GcError {
    /// The identifier was never handed out by this collector
    #[error("UnknownObject: {0} was never allocated")]
    UnknownObject(ObjectId),

    /// An edge names an object that has already been collected
    #[error("DanglingReference: {0} has already been collected")]
    DanglingReference(ObjectId),

    /// A root names an object that has already been collected
    #[error("DanglingRoot: root {0} has already been collected")]
    DanglingRoot(ObjectId),

    #[error("ObjectAlreadyCollected: {0} is a tombstone")]
    ObjectAlreadyCollected(ObjectId),
}

impl GcError {
    /// The identifier the failing operation was given
    pub fn object_id(&self) -> ObjectId {
        match self {
            GcError::UnknownObject(id)
            | GcError::DanglingReference(id)
            | GcError::DanglingRoot(id)
            | GcError::ObjectAlreadyCollected(id) => *id,
        }
    }

    /// Turn a tombstone lookup failure into a dangling edge error
    pub(crate) fn into_dangling_reference(self) -> Self {
        match self {
            GcError::ObjectAlreadyCollected(id) => GcError::DanglingReference(id),
            other => other,
        }
    }

    /// Turn a tombstone lookup failure into a dangling root error
    pub(crate) fn into_dangling_root(self) -> Self {
        match self {
            GcError::ObjectAlreadyCollected(id) => GcError::DanglingRoot(id),
            other => other,
        }
    }
}

/// Errors raised while loading a [`GcConfig`](crate::config::GcConfig)
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid collector config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("initial_threshold must be greater than zero")]
    ZeroThreshold,

    #[error("grow_factor must be at least 1.0, got {0}")]
    GrowFactorTooSmall(f64),
}

/// Result type for collector operations
pub type GcResult<T> = Result<T, GcError>;
