//! Depth-bounded traversal over the versioned entity graph

use crate::depths::{EdgeDirection, EdgeKind, GraphResolveDepths};
use crate::element::Entity;
use crate::store::GraphStore;
use crate::subgraph::{EntityIdWithInterval, OutwardEdge, TraversalSubgraph};
use std::collections::VecDeque;

/// Graph traversal engine
pub struct TraversalEngine;

impl TraversalEngine {
    /// Walk outward from `roots`, recording into `subgraph` every revision
    /// reachable within its depth budgets.
    ///
    /// The walk is an explicit worklist rather than recursion, so adversarial
    /// graphs cannot exhaust the stack. Sibling order is unspecified;
    /// exhaustiveness is guaranteed by the worklist together with the
    /// visited-revision short-circuit in
    /// [`TraversalSubgraph::insert_vertex`], and termination by one budget
    /// strictly decreasing on every hop.
    pub fn traverse<S: GraphStore>(
        subgraph: &mut TraversalSubgraph,
        store: &S,
        roots: Vec<Entity>,
    ) {
        let axes = subgraph.resolved_axes().clone();
        let initial_depths = subgraph.depths();
        tracing::debug!(
            roots = roots.len(),
            ?initial_depths,
            variable_interval = ?axes.variable.interval,
            "starting traversal"
        );

        let mut worklist: VecDeque<(Entity, GraphResolveDepths)> = roots
            .into_iter()
            .map(|element| (element, initial_depths))
            .collect();

        while let Some((element, depths)) = worklist.pop_front() {
            let record_id = element.record_id.clone();
            let link_data = element.link_data.clone();
            if !subgraph.insert_vertex(element) {
                // this exact revision was already walked
                continue;
            }
            tracing::trace!(
                entity_id = %record_id.entity_id,
                revision_id = %record_id.revision_id,
                "visiting revision"
            );

            // link revision -> its endpoint entities
            if let Some(link_data) = &link_data {
                for kind in [EdgeKind::HasLeftEntity, EdgeKind::HasRightEntity] {
                    if depths.remaining(kind, EdgeDirection::Outgoing) == 0 {
                        continue;
                    }
                    let endpoint = match kind {
                        EdgeKind::HasLeftEntity => &link_data.left_entity_id,
                        EdgeKind::HasRightEntity => &link_data.right_entity_id,
                    };
                    let revisions = store.find_entity_revisions(endpoint, &axes);
                    if revisions.len() > 1 {
                        // the endpoint changed during the interval: one hop
                        // fans out to every overlapping revision
                        tracing::debug!(
                            endpoint = %endpoint,
                            revisions = revisions.len(),
                            "endpoint hop fans out"
                        );
                    }
                    let next = depths.decrement(kind, EdgeDirection::Outgoing);
                    for revision in revisions {
                        subgraph.insert_edge(
                            &record_id,
                            OutwardEdge {
                                kind,
                                reversed: false,
                                right_endpoint: EntityIdWithInterval {
                                    entity_id: revision.record_id.entity_id.clone(),
                                    interval: *revision
                                        .temporal_versioning
                                        .interval(axes.variable.axis),
                                },
                            },
                        );
                        worklist.push_back((revision, next));
                    }
                }
            }

            // entity revision <- link revisions referencing it as endpoint
            for kind in [EdgeKind::HasLeftEntity, EdgeKind::HasRightEntity] {
                if depths.remaining(kind, EdgeDirection::Incoming) == 0 {
                    continue;
                }
                let links = store.find_link_revisions(&record_id.entity_id, kind, &axes);
                let next = depths.decrement(kind, EdgeDirection::Incoming);
                for link in links {
                    subgraph.insert_edge(
                        &record_id,
                        OutwardEdge {
                            kind,
                            reversed: true,
                            right_endpoint: EntityIdWithInterval {
                                entity_id: link.record_id.entity_id.clone(),
                                interval: *link
                                    .temporal_versioning
                                    .interval(axes.variable.axis),
                            },
                        },
                    );
                    worklist.push_back((link, next));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::depths::EdgeDepths;
    use crate::identifier::{EntityId, Timestamp};
    use crate::subgraph::SubgraphTemporalAxes;
    use crate::temporal::{resolve_temporal_axes, Interval, ResolvedTemporalAxes};
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    /// Minimal scan-everything store for engine tests.
    struct TestStore {
        entities: Vec<Entity>,
    }

    impl TestStore {
        fn overlapping<'a>(
            &'a self,
            axes: &'a ResolvedTemporalAxes,
        ) -> impl Iterator<Item = &'a Entity> + 'a {
            self.entities.iter().filter(move |entity| {
                entity
                    .temporal_versioning
                    .interval(axes.variable.axis)
                    .overlaps(&axes.variable.interval)
            })
        }
    }

    impl GraphStore for TestStore {
        fn find_entity_revisions(
            &self,
            entity_id: &EntityId,
            axes: &ResolvedTemporalAxes,
        ) -> Vec<Entity> {
            self.overlapping(axes)
                .filter(|entity| entity.id() == entity_id)
                .cloned()
                .collect()
        }

        fn locate_entity_revision(
            &self,
            entity_id: &EntityId,
            axes: &ResolvedTemporalAxes,
        ) -> Option<Entity> {
            self.find_entity_revisions(entity_id, axes)
                .into_iter()
                .max_by_key(Entity::revision_id)
        }

        fn find_link_revisions(
            &self,
            endpoint: &EntityId,
            kind: EdgeKind,
            axes: &ResolvedTemporalAxes,
        ) -> Vec<Entity> {
            self.overlapping(axes)
                .filter(|entity| {
                    entity.link_data.as_ref().is_some_and(|link_data| {
                        (match kind {
                            EdgeKind::HasLeftEntity => &link_data.left_entity_id,
                            EdgeKind::HasRightEntity => &link_data.right_entity_id,
                        }) == endpoint
                    })
                })
                .cloned()
                .collect()
        }

        fn all_entity_revisions(&self, axes: &ResolvedTemporalAxes) -> Vec<Entity> {
            self.overlapping(axes)
                .filter(|entity| !entity.is_link())
                .cloned()
                .collect()
        }
    }

    fn ts(secs: i64) -> Timestamp {
        Timestamp::from(Utc.timestamp_opt(secs, 0).unwrap())
    }

    fn run(store: &TestStore, root: &str, depths: GraphResolveDepths) -> crate::subgraph::Subgraph {
        let axes = resolve_temporal_axes(None).unwrap();
        let root = store
            .locate_entity_revision(&EntityId::from(root), &axes)
            .unwrap();
        let mut subgraph = TraversalSubgraph::new(
            vec![root.record_id.clone()],
            depths,
            SubgraphTemporalAxes {
                initial: None,
                resolved: axes,
            },
        );
        TraversalEngine::traverse(&mut subgraph, store, vec![root]);
        subgraph.finalize()
    }

    fn chain_store() -> TestStore {
        // e1 <-left- l1 -right-> e2
        TestStore {
            entities: vec![
                Entity::new("e1", ts(10), json!({})),
                Entity::new("e2", ts(10), json!({})),
                Entity::new("l1", ts(20), json!({})).with_link_data("e1", "e2"),
            ],
        }
    }

    #[test]
    fn test_walks_chain_within_budget() {
        let store = chain_store();
        let subgraph = run(&store, "e1", GraphResolveDepths::default());

        for id in ["e1", "l1", "e2"] {
            assert!(subgraph.contains(&EntityId::from(id)), "missing {id}");
        }
        // e1's incoming hasLeftEntity edge and l1's outgoing edges
        assert!(subgraph
            .outward_edges(&store.entities[0].record_id)
            .iter()
            .any(|edge| edge.kind == EdgeKind::HasLeftEntity && edge.reversed));
        assert!(subgraph
            .outward_edges(&store.entities[2].record_id)
            .iter()
            .any(|edge| edge.kind == EdgeKind::HasRightEntity && !edge.reversed));
    }

    #[test]
    fn test_zero_budget_records_root_only() {
        let store = chain_store();
        let subgraph = run(&store, "e1", GraphResolveDepths::zero());

        assert_eq!(subgraph.entity_count(), 1);
        assert_eq!(subgraph.edge_count(), 0);
    }

    #[test]
    fn test_right_budget_zero_stops_at_link() {
        let store = chain_store();
        let depths = GraphResolveDepths::default()
            .with_depths(EdgeKind::HasRightEntity, EdgeDepths::new(1, 0));
        let subgraph = run(&store, "e1", depths);

        assert!(subgraph.contains(&EntityId::from("e1")));
        assert!(subgraph.contains(&EntityId::from("l1")));
        assert!(!subgraph.contains(&EntityId::from("e2")));
    }

    #[test]
    fn test_cycle_terminates_and_visits_once() {
        // a <-> b through two links, budget 2 in every direction
        let store = TestStore {
            entities: vec![
                Entity::new("a", ts(1), json!({})),
                Entity::new("b", ts(1), json!({})),
                Entity::new("a-to-b", ts(2), json!({})).with_link_data("a", "b"),
                Entity::new("b-to-a", ts(2), json!({})).with_link_data("b", "a"),
            ],
        };
        let depths = GraphResolveDepths {
            has_left_entity: EdgeDepths::new(2, 2),
            has_right_entity: EdgeDepths::new(2, 2),
        };
        let subgraph = run(&store, "a", depths);

        // each base id appears with exactly one revision
        for id in ["a", "b", "a-to-b", "b-to-a"] {
            assert_eq!(
                subgraph.vertices[&EntityId::from(id)].len(),
                1,
                "{id} visited more than once"
            );
        }
    }

    #[test]
    fn test_interval_hop_fans_out_to_all_revisions() {
        // e2 existed as two revisions within the queried interval
        let store = TestStore {
            entities: vec![
                Entity::new("e1", ts(10), json!({})),
                Entity::new("e2", ts(10), json!({ "v": 1 })).with_interval(
                    crate::temporal::TemporalAxis::DecisionTime,
                    Interval::half_open(ts(10), ts(50)),
                ),
                Entity::new("e2", ts(50), json!({ "v": 2 })),
                Entity::new("l1", ts(20), json!({})).with_link_data("e1", "e2"),
            ],
        };
        let subgraph = run(&store, "e1", GraphResolveDepths::default());

        assert_eq!(subgraph.vertices[&EntityId::from("e2")].len(), 2);
        // both revisions were reached through a single conceptual hop
        let link_edges = subgraph.outward_edges(&store.entities[3].record_id);
        assert_eq!(
            link_edges
                .iter()
                .filter(|edge| edge.kind == EdgeKind::HasRightEntity)
                .count(),
            2
        );
    }
}
