//! In-memory snapshot store

use crate::error::{StorageError, StorageResult};
use std::collections::HashMap;
use taproot_core::{
    EdgeKind, Entity, EntityId, GraphStore, ResolvedTemporalAxes, TemporalAxis,
};

/// In-memory implementation of [`GraphStore`].
///
/// Holds one snapshot of the revision history. Writes go through
/// [`MemoryStore::insert`], which enforces the per-axis partition invariant;
/// queries never mutate the store, so a traversal borrows it without any
/// locking.
#[derive(Debug, Default)]
pub struct MemoryStore {
    revisions: HashMap<EntityId, Vec<Entity>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a revision history, validating every insert.
    pub fn from_entities(entities: impl IntoIterator<Item = Entity>) -> StorageResult<Self> {
        let mut store = Self::new();
        for entity in entities {
            store.insert(entity)?;
        }
        Ok(store)
    }

    /// Insert one revision snapshot.
    ///
    /// Rejects duplicate `(base id, revision id)` pairs, revisions whose
    /// validity interval overlaps an existing revision of the same base id
    /// on either axis, and link revisions referencing endpoints the store
    /// has never seen (endpoints must be inserted before the links between
    /// them).
    pub fn insert(&mut self, entity: Entity) -> StorageResult<()> {
        if let Some(link_data) = &entity.link_data {
            for endpoint in [&link_data.left_entity_id, &link_data.right_entity_id] {
                if !self.revisions.contains_key(endpoint) {
                    return Err(StorageError::MissingEndpoint {
                        entity_id: entity.record_id.entity_id.clone(),
                        endpoint: endpoint.clone(),
                    });
                }
            }
        }

        let entity_id = entity.record_id.entity_id.clone();
        let revision_id = entity.record_id.revision_id;
        if let Some(existing) = self.revisions.get(&entity_id) {
            if existing
                .iter()
                .any(|revision| revision.record_id.revision_id == revision_id)
            {
                return Err(StorageError::DuplicateRevision {
                    entity_id,
                    revision_id,
                });
            }
            for axis in [TemporalAxis::DecisionTime, TemporalAxis::TransactionTime] {
                let interval = entity.temporal_versioning.interval(axis);
                if existing
                    .iter()
                    .any(|revision| revision.temporal_versioning.interval(axis).overlaps(interval))
                {
                    return Err(StorageError::OverlappingRevision {
                        entity_id,
                        revision_id,
                        axis,
                    });
                }
            }
        }

        tracing::trace!(%entity_id, %revision_id, is_link = entity.is_link(), "inserting revision");
        let revisions = self.revisions.entry(entity_id).or_default();
        revisions.push(entity);
        revisions.sort_by_key(|revision| revision.record_id.revision_id);
        Ok(())
    }

    /// Number of revision snapshots across all base ids.
    pub fn len(&self) -> usize {
        self.revisions.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.revisions.is_empty()
    }

    fn overlapping<'a>(
        &self,
        revisions: &'a [Entity],
        axes: &'a ResolvedTemporalAxes,
    ) -> impl Iterator<Item = &'a Entity> + 'a {
        revisions.iter().filter(move |revision| {
            revision
                .temporal_versioning
                .interval(axes.variable.axis)
                .overlaps(&axes.variable.interval)
        })
    }
}

impl GraphStore for MemoryStore {
    fn find_entity_revisions(
        &self,
        entity_id: &EntityId,
        axes: &ResolvedTemporalAxes,
    ) -> Vec<Entity> {
        // revisions are kept sorted by revision id at insert time
        self.revisions
            .get(entity_id)
            .map(|revisions| self.overlapping(revisions, axes).cloned().collect())
            .unwrap_or_default()
    }

    fn locate_entity_revision(
        &self,
        entity_id: &EntityId,
        axes: &ResolvedTemporalAxes,
    ) -> Option<Entity> {
        let revisions = self.revisions.get(entity_id)?;
        self.overlapping(revisions, axes)
            .max_by_key(|revision| revision.record_id.revision_id)
            .cloned()
    }

    fn find_link_revisions(
        &self,
        endpoint: &EntityId,
        kind: EdgeKind,
        axes: &ResolvedTemporalAxes,
    ) -> Vec<Entity> {
        let mut links: Vec<Entity> = self
            .revisions
            .values()
            .flat_map(|revisions| self.overlapping(revisions, axes))
            .filter(|revision| {
                revision.link_data.as_ref().is_some_and(|link_data| {
                    (match kind {
                        EdgeKind::HasLeftEntity => &link_data.left_entity_id,
                        EdgeKind::HasRightEntity => &link_data.right_entity_id,
                    }) == endpoint
                })
            })
            .cloned()
            .collect();
        // stable order so repeated queries return identical results
        links.sort_by(|a, b| a.record_id.entity_id.cmp(&b.record_id.entity_id).then(
            a.record_id.revision_id.cmp(&b.record_id.revision_id),
        ));
        links
    }

    fn all_entity_revisions(&self, axes: &ResolvedTemporalAxes) -> Vec<Entity> {
        let mut entities: Vec<Entity> = self
            .revisions
            .values()
            .flat_map(|revisions| self.overlapping(revisions, axes))
            .filter(|revision| !revision.is_link())
            .cloned()
            .collect();
        entities.sort_by(|a, b| a.record_id.entity_id.cmp(&b.record_id.entity_id).then(
            a.record_id.revision_id.cmp(&b.record_id.revision_id),
        ));
        entities
    }
}
