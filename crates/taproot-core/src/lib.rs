//! Taproot Core - bitemporal entity graph resolution
//!
//! This crate provides the data model and the depth-bounded subgraph
//! resolution engine for the Taproot versioned entity graph: temporal axis
//! resolution, revision-aware traversal, and subgraph finalization.

pub mod depths;
pub mod element;
pub mod error;
pub mod identifier;
pub mod query;
pub mod store;
pub mod subgraph;
pub mod temporal;
pub mod traversal;

pub use depths::{EdgeDepths, EdgeDirection, EdgeKind, GraphResolveDepths};
pub use element::{Entity, LinkData};
pub use error::{Error, Result};
pub use identifier::{EntityId, EntityRecordId, RevisionId, Timestamp};
pub use query::{get_entity, query_entities, GetEntityData, QueryEntitiesData};
pub use store::GraphStore;
pub use subgraph::{
    EntityIdWithInterval, OutwardEdge, Subgraph, SubgraphTemporalAxes, TraversalSubgraph,
};
pub use temporal::{
    default_temporal_axes, resolve_temporal_axes, Interval, PartialInterval, PinnedAxis,
    QueryTemporalAxes, ResolvedPinnedAxis, ResolvedTemporalAxes, ResolvedVariableAxis,
    TemporalAxis, TemporalBound, TemporalVersioning, VariableAxis,
};
pub use traversal::TraversalEngine;
