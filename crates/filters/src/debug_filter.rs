//! Structured tracing for query construction and entry evaluation.
//!
//! All functions are compiled behind the `tracing` feature flag and reduce to
//! inline no-ops when it is disabled.
//!
//! # Examples
//!
//! ```rust,ignore
//! use filters::debug_filter::{MatchTally, trace_entry_decision};
//!
//! let mut tally = MatchTally::new();
//! trace_entry_decision("src/lib.rs", true);
//! tally.record_evaluation(true);
//! tally.summary();
//! ```

/// Target name for filter tracing events.
#[cfg(feature = "tracing")]
pub const FILTER_TARGET: &str = "finder::filter";

/// Traces compilation of a mask set.
///
/// `expression` is `None` when the set short-circuited to match everything.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_masks_compiled(masks: &[String], expression: Option<&str>) {
    tracing::debug!(
        target: FILTER_TARGET,
        masks = ?masks,
        expression = ?expression,
        "masks_compiled"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_masks_compiled(_masks: &[String], _expression: Option<&str>) {}

/// Traces a predicate appended to a selection group or the exclusion group.
///
/// `group` is `None` for the exclusion group.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_predicate_added(kind: &str, group: Option<usize>) {
    tracing::debug!(
        target: FILTER_TARGET,
        kind = %kind,
        group = ?group,
        "predicate_added"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_predicate_added(_kind: &str, _group: Option<usize>) {}

/// Traces a directory pruned by the exclusion group.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_entry_pruned(subpath: &str) {
    tracing::trace!(target: FILTER_TARGET, subpath = %subpath, "entry_pruned");
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_entry_pruned(_subpath: &str) {}

/// Traces whether an entry was accepted by the selection groups.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_entry_decision(subpath: &str, accepted: bool) {
    tracing::trace!(
        target: FILTER_TARGET,
        subpath = %subpath,
        accepted = accepted,
        "entry_decision"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_entry_decision(_subpath: &str, _accepted: bool) {}

/// Traces the totals of a finished traversal.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_match_summary(evaluated: usize, accepted: usize, pruned: usize) {
    tracing::info!(
        target: FILTER_TARGET,
        evaluated = evaluated,
        accepted = accepted,
        rejected = evaluated - accepted,
        pruned = pruned,
        "match_summary"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_match_summary(_evaluated: usize, _accepted: usize, _pruned: usize) {}

/// Counts evaluation outcomes over one traversal.
///
/// # Examples
///
/// ```
/// # use filters::debug_filter::MatchTally;
/// let mut tally = MatchTally::new();
/// tally.record_evaluation(true);
/// tally.record_evaluation(false);
/// tally.record_pruned();
///
/// assert_eq!(tally.evaluated(), 2);
/// assert_eq!(tally.accepted(), 1);
/// assert_eq!(tally.pruned(), 1);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct MatchTally {
    evaluated: usize,
    accepted: usize,
    pruned: usize,
}

impl MatchTally {
    /// Creates a tally with zero counts.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            evaluated: 0,
            accepted: 0,
            pruned: 0,
        }
    }

    /// Records a selection decision.
    pub const fn record_evaluation(&mut self, accepted: bool) {
        self.evaluated += 1;
        if accepted {
            self.accepted += 1;
        }
    }

    /// Records an entry removed by the exclusion group.
    pub const fn record_pruned(&mut self) {
        self.pruned += 1;
    }

    /// Emits the accumulated totals as a tracing event.
    pub fn summary(&self) {
        trace_match_summary(self.evaluated, self.accepted, self.pruned);
    }

    /// Number of entries tested against the selection groups.
    #[must_use]
    pub const fn evaluated(&self) -> usize {
        self.evaluated
    }

    /// Number of entries accepted.
    #[must_use]
    pub const fn accepted(&self) -> usize {
        self.accepted
    }

    /// Number of entries pruned.
    #[must_use]
    pub const fn pruned(&self) -> usize {
        self.pruned
    }
}
