//! Temporal bounds, intervals, and query-axis resolution
//!
//! Every record is versioned along two time axes. A query collapses one
//! axis to a single instant (the *pinned* axis) and resolves revisions over
//! an interval on the other (the *variable* axis). Swapping which axis is
//! pinned switches between time-travel and audit-log semantics.

use crate::error::{Error, Result};
use crate::identifier::Timestamp;
use serde::{Deserialize, Serialize};

/// One of the two tracked time dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TemporalAxis {
    /// When a fact was decided to hold.
    DecisionTime,
    /// When the record was written to the store.
    TransactionTime,
}

impl std::fmt::Display for TemporalAxis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DecisionTime => write!(f, "decisionTime"),
            Self::TransactionTime => write!(f, "transactionTime"),
        }
    }
}

/// One side of a temporal interval.
///
/// Open-ended validity is an explicit variant, never a sentinel timestamp:
/// an unbounded start lies before every instant and an unbounded end after
/// every instant. All comparisons are spelled out by `match` below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "limit", rename_all = "camelCase")]
pub enum TemporalBound {
    Unbounded,
    Inclusive(Timestamp),
    Exclusive(Timestamp),
}

/// A contiguous span of time on a single axis.
///
/// Versioning intervals are half-open: inclusive start, exclusive (or
/// unbounded) end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    pub start: TemporalBound,
    pub end: TemporalBound,
}

impl Interval {
    pub fn new(start: TemporalBound, end: TemporalBound) -> Self {
        Self { start, end }
    }

    /// The half-open interval `[start, end)`.
    pub fn half_open(start: Timestamp, end: Timestamp) -> Self {
        Self {
            start: TemporalBound::Inclusive(start),
            end: TemporalBound::Exclusive(end),
        }
    }

    /// `[start, +∞)`, the shape of a still-current revision.
    pub fn since(start: Timestamp) -> Self {
        Self {
            start: TemporalBound::Inclusive(start),
            end: TemporalBound::Unbounded,
        }
    }

    /// `(-∞, +∞)`, full history on an axis.
    pub fn unbounded() -> Self {
        Self {
            start: TemporalBound::Unbounded,
            end: TemporalBound::Unbounded,
        }
    }

    /// Whether `instant` lies within this interval.
    pub fn contains(&self, instant: Timestamp) -> bool {
        let after_start = match self.start {
            TemporalBound::Unbounded => true,
            TemporalBound::Inclusive(start) => start <= instant,
            TemporalBound::Exclusive(start) => start < instant,
        };
        let before_end = match self.end {
            TemporalBound::Unbounded => true,
            TemporalBound::Inclusive(end) => instant <= end,
            TemporalBound::Exclusive(end) => instant < end,
        };
        after_start && before_end
    }

    /// Whether at least one instant lies in both intervals.
    pub fn overlaps(&self, other: &Interval) -> bool {
        // a non-empty intersection requires each start to precede the
        // other's end
        fn start_precedes_end(start: TemporalBound, end: TemporalBound) -> bool {
            match (start, end) {
                (TemporalBound::Unbounded, _) | (_, TemporalBound::Unbounded) => true,
                (TemporalBound::Inclusive(s), TemporalBound::Inclusive(e)) => s <= e,
                (TemporalBound::Inclusive(s), TemporalBound::Exclusive(e))
                | (TemporalBound::Exclusive(s), TemporalBound::Inclusive(e))
                | (TemporalBound::Exclusive(s), TemporalBound::Exclusive(e)) => s < e,
            }
        }
        start_precedes_end(self.start, other.end) && start_precedes_end(other.start, self.end)
    }
}

/// Per-axis validity intervals carried by one revision snapshot.
///
/// For a fixed base id, the intervals of all revisions partition each axis
/// with no gaps and no overlaps; stores enforce the no-overlap half on
/// write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemporalVersioning {
    pub decision_time: Interval,
    pub transaction_time: Interval,
}

impl TemporalVersioning {
    pub fn interval(&self, axis: TemporalAxis) -> &Interval {
        match axis {
            TemporalAxis::DecisionTime => &self.decision_time,
            TemporalAxis::TransactionTime => &self.transaction_time,
        }
    }
}

/// The axis a query collapses to a single instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinnedAxis {
    pub axis: TemporalAxis,
    /// Defaults to the instant the query is resolved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Timestamp>,
}

/// Interval bounds still to be defaulted during resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialInterval {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<TemporalBound>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<TemporalBound>,
}

/// The axis a query resolves over an interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableAxis {
    pub axis: TemporalAxis,
    #[serde(default)]
    pub interval: PartialInterval,
}

/// A possibly-partial temporal request as issued by callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryTemporalAxes {
    pub pinned: PinnedAxis,
    pub variable: VariableAxis,
}

/// Fully-specified pinned axis after resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPinnedAxis {
    pub axis: TemporalAxis,
    pub timestamp: Timestamp,
}

/// Fully-specified variable axis after resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedVariableAxis {
    pub axis: TemporalAxis,
    pub interval: Interval,
}

/// A temporal request with every bound filled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedTemporalAxes {
    pub pinned: ResolvedPinnedAxis,
    pub variable: ResolvedVariableAxis,
}

impl ResolvedTemporalAxes {
    pub fn variable_interval(&self) -> &Interval {
        &self.variable.interval
    }
}

/// The system default: transaction time pinned at "now", decision time
/// resolved over `(-∞, now]`.
///
/// Callers using the non-temporal convention are assigned this request
/// before the engine runs.
pub fn default_temporal_axes() -> QueryTemporalAxes {
    QueryTemporalAxes {
        pinned: PinnedAxis {
            axis: TemporalAxis::TransactionTime,
            timestamp: None,
        },
        variable: VariableAxis {
            axis: TemporalAxis::DecisionTime,
            interval: PartialInterval::default(),
        },
    }
}

/// Normalize a possibly-partial temporal request into two fully-specified
/// axes.
///
/// "Now" is captured once per call. Fails with [`Error::InvalidAxes`] when
/// the request names the same axis as both pinned and variable, which would
/// pin both axes or leave both variable.
pub fn resolve_temporal_axes(request: Option<&QueryTemporalAxes>) -> Result<ResolvedTemporalAxes> {
    let now = Timestamp::now();
    let default;
    let request = match request {
        Some(request) => request,
        None => {
            default = default_temporal_axes();
            &default
        }
    };

    if request.pinned.axis == request.variable.axis {
        return Err(Error::InvalidAxes(request.pinned.axis));
    }

    Ok(ResolvedTemporalAxes {
        pinned: ResolvedPinnedAxis {
            axis: request.pinned.axis,
            timestamp: request.pinned.timestamp.unwrap_or(now),
        },
        variable: ResolvedVariableAxis {
            axis: request.variable.axis,
            interval: Interval {
                start: request
                    .variable
                    .interval
                    .start
                    .unwrap_or(TemporalBound::Unbounded),
                end: request
                    .variable
                    .interval
                    .end
                    .unwrap_or(TemporalBound::Inclusive(now)),
            },
        },
    })
}
