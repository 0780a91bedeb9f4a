//! Per-edge-kind traversal hop budgets

use serde::{Deserialize, Serialize};

/// Kind of typed edge induced by a link revision.
///
/// A `HasLeftEntity` edge points from a link to its left endpoint, a
/// `HasRightEntity` edge to its right endpoint. Traversal can follow either
/// kind in both directions, under separate budgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EdgeKind {
    HasLeftEntity,
    HasRightEntity,
}

/// Direction of an edge relative to the element under traversal.
///
/// `Outgoing` steps from a link to its endpoint entity; `Incoming` steps
/// from an entity to the link revisions that reference it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeDirection {
    Incoming,
    Outgoing,
}

/// Remaining hops for one edge kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeDepths {
    #[serde(default = "default_depth")]
    pub incoming: u32,
    #[serde(default = "default_depth")]
    pub outgoing: u32,
}

fn default_depth() -> u32 {
    1
}

impl Default for EdgeDepths {
    fn default() -> Self {
        Self {
            incoming: default_depth(),
            outgoing: default_depth(),
        }
    }
}

impl EdgeDepths {
    pub fn new(incoming: u32, outgoing: u32) -> Self {
        Self { incoming, outgoing }
    }

    pub fn zero() -> Self {
        Self::new(0, 0)
    }
}

/// Remaining hop budgets per edge kind.
///
/// Fixed at query time and decremented as the frontier moves outward; a
/// budget of 0 in a direction means that edge kind is not followed in that
/// direction from the current frontier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphResolveDepths {
    #[serde(default)]
    pub has_left_entity: EdgeDepths,
    #[serde(default)]
    pub has_right_entity: EdgeDepths,
}

impl Default for GraphResolveDepths {
    fn default() -> Self {
        Self {
            has_left_entity: EdgeDepths::default(),
            has_right_entity: EdgeDepths::default(),
        }
    }
}

impl GraphResolveDepths {
    /// No traversal at all: every budget zero.
    pub fn zero() -> Self {
        Self {
            has_left_entity: EdgeDepths::zero(),
            has_right_entity: EdgeDepths::zero(),
        }
    }

    pub fn with_depths(mut self, kind: EdgeKind, depths: EdgeDepths) -> Self {
        match kind {
            EdgeKind::HasLeftEntity => self.has_left_entity = depths,
            EdgeKind::HasRightEntity => self.has_right_entity = depths,
        }
        self
    }

    pub fn remaining(&self, kind: EdgeKind, direction: EdgeDirection) -> u32 {
        let depths = match kind {
            EdgeKind::HasLeftEntity => self.has_left_entity,
            EdgeKind::HasRightEntity => self.has_right_entity,
        };
        match direction {
            EdgeDirection::Incoming => depths.incoming,
            EdgeDirection::Outgoing => depths.outgoing,
        }
    }

    /// Copy with the consumed direction's budget reduced by one hop; all
    /// other budgets are unchanged.
    pub fn decrement(mut self, kind: EdgeKind, direction: EdgeDirection) -> Self {
        let depths = match kind {
            EdgeKind::HasLeftEntity => &mut self.has_left_entity,
            EdgeKind::HasRightEntity => &mut self.has_right_entity,
        };
        match direction {
            EdgeDirection::Incoming => depths.incoming = depths.incoming.saturating_sub(1),
            EdgeDirection::Outgoing => depths.outgoing = depths.outgoing.saturating_sub(1),
        }
        self
    }

    pub fn is_exhausted(&self) -> bool {
        self.has_left_entity == EdgeDepths::zero() && self.has_right_entity == EdgeDepths::zero()
    }
}
