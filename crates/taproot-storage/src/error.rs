//! Storage error types

use taproot_core::{EntityId, RevisionId, TemporalAxis};
use thiserror::Error;

/// Result type alias for storage operations
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Storage-specific error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// The same `(base id, revision id)` pair was inserted twice.
    #[error("duplicate revision {revision_id} for entity {entity_id}")]
    DuplicateRevision {
        entity_id: EntityId,
        revision_id: RevisionId,
    },

    /// A new revision's validity interval overlaps an existing revision of
    /// the same base id on the same axis, which would break the partition
    /// of that axis.
    #[error("revision {revision_id} of entity {entity_id} overlaps an existing revision on {axis}")]
    OverlappingRevision {
        entity_id: EntityId,
        revision_id: RevisionId,
        axis: TemporalAxis,
    },

    /// A link revision references an endpoint the store has never seen.
    #[error("link {entity_id} references unknown endpoint {endpoint}")]
    MissingEndpoint {
        entity_id: EntityId,
        endpoint: EntityId,
    },
}
