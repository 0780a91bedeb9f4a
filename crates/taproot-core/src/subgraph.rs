//! Traversal accumulator and the finalized subgraph
//!
//! Resolution is two-phase: a [`TraversalSubgraph`] builder is exclusively
//! owned and mutated by a single traversal, then consumed once by
//! [`TraversalSubgraph::finalize`] into the read-only [`Subgraph`] handed
//! to callers.

use crate::depths::{EdgeKind, GraphResolveDepths};
use crate::element::Entity;
use crate::identifier::{EntityId, EntityRecordId, RevisionId};
use crate::temporal::{Interval, QueryTemporalAxes, ResolvedTemporalAxes};
use serde::{Deserialize, Serialize};
use std::collections::{btree_map, BTreeMap, HashMap};

/// An edge endpoint together with the endpoint revision's variable-axis
/// validity interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityIdWithInterval {
    pub entity_id: EntityId,
    pub interval: Interval,
}

/// One discovered edge, recorded on the revision it points away from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutwardEdge {
    pub kind: EdgeKind,
    /// `false`: a link revision pointing at one of its endpoint entities.
    /// `true`: an entity pointed at by a link revision.
    pub reversed: bool,
    pub right_endpoint: EntityIdWithInterval,
}

/// The temporal context a subgraph was resolved under: the caller's
/// original request (if any) plus its resolved form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubgraphTemporalAxes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial: Option<QueryTemporalAxes>,
    pub resolved: ResolvedTemporalAxes,
}

/// Visited revisions keyed by base id, then by revision id.
pub type VertexMap = HashMap<EntityId, BTreeMap<RevisionId, Entity>>;

/// Discovered edges keyed like [`VertexMap`].
pub type EdgeMap = HashMap<EntityId, BTreeMap<RevisionId, Vec<OutwardEdge>>>;

/// Mutable traversal accumulator, owned by one query invocation.
#[derive(Debug)]
pub struct TraversalSubgraph {
    roots: Vec<EntityRecordId>,
    vertices: VertexMap,
    edges: EdgeMap,
    depths: GraphResolveDepths,
    temporal_axes: SubgraphTemporalAxes,
}

impl TraversalSubgraph {
    pub fn new(
        roots: Vec<EntityRecordId>,
        depths: GraphResolveDepths,
        temporal_axes: SubgraphTemporalAxes,
    ) -> Self {
        Self {
            roots,
            vertices: HashMap::new(),
            edges: HashMap::new(),
            depths,
            temporal_axes,
        }
    }

    pub fn depths(&self) -> GraphResolveDepths {
        self.depths
    }

    pub fn resolved_axes(&self) -> &ResolvedTemporalAxes {
        &self.temporal_axes.resolved
    }

    /// Record a visited revision.
    ///
    /// Returns `false` when this exact `(base id, revision id)` pair was
    /// already present, in which case the caller must not walk outward from
    /// it again. This check is what makes cyclic graphs safe to traverse.
    pub fn insert_vertex(&mut self, element: Entity) -> bool {
        let entity_id = element.record_id.entity_id.clone();
        let revision_id = element.record_id.revision_id;
        match self.vertices.entry(entity_id).or_default().entry(revision_id) {
            btree_map::Entry::Occupied(_) => false,
            btree_map::Entry::Vacant(slot) => {
                slot.insert(element);
                true
            }
        }
    }

    /// Record an edge discovered on `source`; identical edges collapse.
    pub fn insert_edge(&mut self, source: &EntityRecordId, edge: OutwardEdge) {
        let edges = self
            .edges
            .entry(source.entity_id.clone())
            .or_default()
            .entry(source.revision_id)
            .or_default();
        if !edges.contains(&edge) {
            edges.push(edge);
        }
    }

    /// Consume the accumulator into the immutable result.
    ///
    /// No entries are added or dropped; edge lists are put into canonical
    /// order so structurally equal traversals compare equal.
    pub fn finalize(self) -> Subgraph {
        let mut edges = self.edges;
        for revisions in edges.values_mut() {
            for list in revisions.values_mut() {
                list.sort_by(|a, b| {
                    (a.kind, a.reversed, &a.right_endpoint.entity_id).cmp(&(
                        b.kind,
                        b.reversed,
                        &b.right_endpoint.entity_id,
                    ))
                });
            }
        }
        Subgraph {
            roots: self.roots,
            vertices: self.vertices,
            edges,
            depths: self.depths,
            temporal_axes: self.temporal_axes,
        }
    }
}

/// Finalized, read-only result of a bounded traversal.
///
/// Produced only by [`TraversalSubgraph::finalize`]; nothing mutates it
/// afterwards, so it is safe to share across readers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subgraph {
    pub roots: Vec<EntityRecordId>,
    pub vertices: VertexMap,
    pub edges: EdgeMap,
    pub depths: GraphResolveDepths,
    #[serde(rename = "temporalAxes")]
    pub temporal_axes: SubgraphTemporalAxes,
}

impl Subgraph {
    pub fn vertex(&self, record_id: &EntityRecordId) -> Option<&Entity> {
        self.vertices
            .get(&record_id.entity_id)?
            .get(&record_id.revision_id)
    }

    pub fn contains(&self, entity_id: &EntityId) -> bool {
        self.vertices.contains_key(entity_id)
    }

    /// Total number of revision snapshots across all base ids.
    pub fn entity_count(&self) -> usize {
        self.vertices.values().map(BTreeMap::len).sum()
    }

    pub fn edge_count(&self) -> usize {
        self.edges
            .values()
            .flat_map(BTreeMap::values)
            .map(Vec::len)
            .sum()
    }

    /// Edges recorded on one revision, empty when none were discovered.
    pub fn outward_edges(&self, record_id: &EntityRecordId) -> &[OutwardEdge] {
        self.edges
            .get(&record_id.entity_id)
            .and_then(|revisions| revisions.get(&record_id.revision_id))
            .map_or(&[], Vec::as_slice)
    }
}
