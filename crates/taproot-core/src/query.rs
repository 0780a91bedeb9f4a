//! Public query operations over the versioned graph

use crate::depths::GraphResolveDepths;
use crate::error::Result;
use crate::identifier::EntityId;
use crate::store::GraphStore;
use crate::subgraph::{Subgraph, SubgraphTemporalAxes, TraversalSubgraph};
use crate::temporal::{resolve_temporal_axes, QueryTemporalAxes};
use crate::traversal::TraversalEngine;
use serde::{Deserialize, Serialize};

/// Request shape for [`get_entity`].
///
/// Leaving `temporal_axes` unset is the non-temporal calling convention;
/// the system default axes are assigned during resolution, before the
/// engine runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetEntityData {
    pub entity_id: EntityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graph_resolve_depths: Option<GraphResolveDepths>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temporal_axes: Option<QueryTemporalAxes>,
}

impl GetEntityData {
    pub fn new(entity_id: impl Into<EntityId>) -> Self {
        Self {
            entity_id: entity_id.into(),
            graph_resolve_depths: None,
            temporal_axes: None,
        }
    }

    pub fn with_depths(mut self, depths: GraphResolveDepths) -> Self {
        self.graph_resolve_depths = Some(depths);
        self
    }

    pub fn with_temporal_axes(mut self, temporal_axes: QueryTemporalAxes) -> Self {
        self.temporal_axes = Some(temporal_axes);
        self
    }
}

/// Request shape for [`query_entities`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryEntitiesData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graph_resolve_depths: Option<GraphResolveDepths>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temporal_axes: Option<QueryTemporalAxes>,
}

impl QueryEntitiesData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_depths(mut self, depths: GraphResolveDepths) -> Self {
        self.graph_resolve_depths = Some(depths);
        self
    }

    pub fn with_temporal_axes(mut self, temporal_axes: QueryTemporalAxes) -> Self {
        self.temporal_axes = Some(temporal_axes);
        self
    }
}

/// Resolve a single entity outward to the configured depths under the
/// requested temporal projection.
///
/// `Ok(None)` means the root entity has no revision at the resolved time; a
/// malformed temporal request is the only error. The operation is a pure
/// function of the store snapshot.
pub fn get_entity<S: GraphStore>(data: &GetEntityData, store: &S) -> Result<Option<Subgraph>> {
    let resolved = resolve_temporal_axes(data.temporal_axes.as_ref())?;
    let depths = data.graph_resolve_depths.unwrap_or_default();

    let Some(root) = store.locate_entity_revision(&data.entity_id, &resolved) else {
        tracing::debug!(entity_id = %data.entity_id, "root entity not found at resolved time");
        return Ok(None);
    };

    let mut subgraph = TraversalSubgraph::new(
        vec![root.record_id.clone()],
        depths,
        SubgraphTemporalAxes {
            initial: data.temporal_axes.clone(),
            resolved,
        },
    );
    TraversalEngine::traverse(&mut subgraph, store, vec![root]);
    Ok(Some(subgraph.finalize()))
}

/// Resolve every entity visible at the requested time as a root.
///
/// Link revisions still enter the subgraph through traversal but are not
/// seeded as roots. An empty store yields an empty subgraph, not an error.
pub fn query_entities<S: GraphStore>(data: &QueryEntitiesData, store: &S) -> Result<Subgraph> {
    let resolved = resolve_temporal_axes(data.temporal_axes.as_ref())?;
    let depths = data.graph_resolve_depths.unwrap_or_default();

    let roots = store.all_entity_revisions(&resolved);
    let mut subgraph = TraversalSubgraph::new(
        roots.iter().map(|root| root.record_id.clone()).collect(),
        depths,
        SubgraphTemporalAxes {
            initial: data.temporal_axes.clone(),
            resolved,
        },
    );
    TraversalEngine::traverse(&mut subgraph, store, roots);
    Ok(subgraph.finalize())
}
