use std::path::PathBuf;
use std::sync::Arc;

use filters::{FilterGroup, GroupSet};

use crate::chain::WalkChain;
use crate::entry::WalkEntry;
use crate::plan::{MaxDepth, Order, TraversalPlan};

/// Configures a traversal over one or more search roots.
///
/// Without [`selection`](Self::selection) every entry is yielded; without
/// [`exclusion`](Self::exclusion) nothing is pruned.
#[derive(Clone, Debug)]
pub struct WalkBuilder {
    roots: Vec<PathBuf>,
    plan: TraversalPlan,
}

impl WalkBuilder {
    /// Creates a new builder that will traverse the provided root path.
    #[must_use]
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            roots: vec![root.into()],
            plan: TraversalPlan::default(),
        }
    }

    /// Appends another search root, walked after the ones already added.
    #[must_use]
    pub fn root<P: Into<PathBuf>>(mut self, root: P) -> Self {
        self.roots.push(root.into());
        self
    }

    /// Sets how far below each root the walker descends.
    #[must_use]
    pub const fn max_depth(mut self, max_depth: MaxDepth) -> Self {
        self.plan.max_depth = max_depth;
        self
    }

    /// Sets whether directories are yielded before or after their contents.
    #[must_use]
    pub const fn order(mut self, order: Order) -> Self {
        self.plan.order = order;
        self
    }

    /// Sets the group a non-file entry must satisfy to be visited at all.
    #[must_use]
    pub fn exclusion(mut self, exclusion: FilterGroup<WalkEntry>) -> Self {
        self.plan.exclusion = exclusion;
        self
    }

    /// Sets the groups an entry must match (any of) to be yielded.
    #[must_use]
    pub fn selection(mut self, selection: GroupSet<WalkEntry>) -> Self {
        self.plan.selection = selection;
        self
    }

    /// Builds a lazy [`WalkChain`]; no filesystem access happens here.
    #[must_use]
    pub fn build(self) -> WalkChain {
        WalkChain::new(self.roots, Arc::new(self.plan))
    }
}
