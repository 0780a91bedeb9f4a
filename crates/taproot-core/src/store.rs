//! Backing graph store contract consumed by the traversal engine

use crate::depths::EdgeKind;
use crate::element::Entity;
use crate::identifier::EntityId;
use crate::temporal::ResolvedTemporalAxes;

/// Read-side contract of the backing graph store.
///
/// The engine treats the store as an immutable snapshot for the duration of
/// a query: every lookup is synchronous and infallible, and an empty result
/// means "nothing connected at that time", never a failure.
///
/// Revision matching happens on the variable axis: a lookup considers a
/// revision when its variable-axis interval overlaps the resolved variable
/// interval. Which axis that is comes from `axes`, so pinning the other
/// axis switches between time-travel and audit-log projections of the same
/// history.
pub trait GraphStore {
    /// All revisions of `entity_id` whose variable-axis interval overlaps
    /// the variable interval, ordered by revision id.
    fn find_entity_revisions(
        &self,
        entity_id: &EntityId,
        axes: &ResolvedTemporalAxes,
    ) -> Vec<Entity>;

    /// The revision of `entity_id` current at the end of the variable
    /// interval: the latest revision overlapping it. `None` means the
    /// entity does not exist at that time.
    fn locate_entity_revision(
        &self,
        entity_id: &EntityId,
        axes: &ResolvedTemporalAxes,
    ) -> Option<Entity>;

    /// Link revisions whose endpoint of the given kind is `endpoint`,
    /// overlapping the variable interval. Multiple links may be
    /// simultaneously active between different endpoint pairs.
    fn find_link_revisions(
        &self,
        endpoint: &EntityId,
        kind: EdgeKind,
        axes: &ResolvedTemporalAxes,
    ) -> Vec<Entity>;

    /// Every non-link entity revision overlapping the variable interval;
    /// used to seed multi-root queries.
    fn all_entity_revisions(&self, axes: &ResolvedTemporalAxes) -> Vec<Entity>;
}
