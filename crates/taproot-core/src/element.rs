//! Versioned entity and link revision snapshots

use crate::identifier::{EntityId, EntityRecordId, RevisionId};
use crate::temporal::{Interval, TemporalAxis, TemporalVersioning};
use serde::{Deserialize, Serialize};

/// Endpoint references carried by a link revision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkData {
    pub left_entity_id: EntityId,
    pub right_entity_id: EntityId,
}

/// One point-in-time snapshot of an entity.
///
/// A link is an entity carrying [`LinkData`]; the traversal engine walks
/// from a link to its endpoints and from an entity back to the links that
/// reference it. Properties are an opaque payload and are never traversed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub record_id: EntityRecordId,
    pub temporal_versioning: TemporalVersioning,
    pub properties: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_data: Option<LinkData>,
}

impl Entity {
    /// Create a revision current on both axes from `revision_id` onward.
    pub fn new(
        entity_id: impl Into<EntityId>,
        revision_id: RevisionId,
        properties: serde_json::Value,
    ) -> Self {
        let current = Interval::since(revision_id);
        Self {
            record_id: EntityRecordId {
                entity_id: entity_id.into(),
                revision_id,
            },
            temporal_versioning: TemporalVersioning {
                decision_time: current,
                transaction_time: current,
            },
            properties,
            link_data: None,
        }
    }

    /// Turn this revision into a link connecting `left` to `right`.
    pub fn with_link_data(
        mut self,
        left: impl Into<EntityId>,
        right: impl Into<EntityId>,
    ) -> Self {
        self.link_data = Some(LinkData {
            left_entity_id: left.into(),
            right_entity_id: right.into(),
        });
        self
    }

    /// Replace the validity interval on one axis.
    pub fn with_interval(mut self, axis: TemporalAxis, interval: Interval) -> Self {
        match axis {
            TemporalAxis::DecisionTime => self.temporal_versioning.decision_time = interval,
            TemporalAxis::TransactionTime => self.temporal_versioning.transaction_time = interval,
        }
        self
    }

    pub fn is_link(&self) -> bool {
        self.link_data.is_some()
    }

    pub fn id(&self) -> &EntityId {
        &self.record_id.entity_id
    }

    pub fn revision_id(&self) -> RevisionId {
        self.record_id.revision_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifier::Timestamp;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn ts(secs: i64) -> Timestamp {
        Timestamp::from(Utc.timestamp_opt(secs, 0).unwrap())
    }

    #[test]
    fn test_new_revision_is_current_on_both_axes() {
        let entity = Entity::new("page", ts(100), json!({ "title": "Home" }));

        assert_eq!(entity.id(), &EntityId::from("page"));
        assert_eq!(entity.revision_id(), ts(100));
        assert!(!entity.is_link());
        for axis in [TemporalAxis::DecisionTime, TemporalAxis::TransactionTime] {
            let interval = entity.temporal_versioning.interval(axis);
            assert!(interval.contains(ts(100)));
            assert!(interval.contains(ts(1_000_000)));
            assert!(!interval.contains(ts(99)));
        }
    }

    #[test]
    fn test_link_builder() {
        let link = Entity::new("authored", ts(50), json!({}))
            .with_link_data("alice", "page");

        assert!(link.is_link());
        let link_data = link.link_data.unwrap();
        assert_eq!(link_data.left_entity_id, EntityId::from("alice"));
        assert_eq!(link_data.right_entity_id, EntityId::from("page"));
    }

    #[test]
    fn test_with_interval_replaces_one_axis() {
        let entity = Entity::new("page", ts(10), json!({}))
            .with_interval(TemporalAxis::DecisionTime, Interval::half_open(ts(10), ts(20)));

        assert!(!entity
            .temporal_versioning
            .interval(TemporalAxis::DecisionTime)
            .contains(ts(20)));
        assert!(entity
            .temporal_versioning
            .interval(TemporalAxis::TransactionTime)
            .contains(ts(20)));
    }
}
