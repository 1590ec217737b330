use filters::{FilterGroup, GroupSet};

use crate::entry::WalkEntry;

/// How far below a search root the walker descends.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MaxDepth {
    /// Descend into every directory.
    #[default]
    Unlimited,
    /// Descend at most this many levels below the root's children.
    ///
    /// `Levels(0)` lists only the root's immediate children.
    Levels(usize),
}

impl MaxDepth {
    /// Reports whether a directory found at `depth` may be entered.
    #[must_use]
    pub const fn allows_descent(self, depth: usize) -> bool {
        match self {
            Self::Unlimited => true,
            Self::Levels(levels) => depth <= levels,
        }
    }
}

impl MaxDepth {
    /// Converts a signed level count where `-1` means unlimited.
    ///
    /// Returns `None` for values below `-1`.
    #[must_use]
    pub const fn from_signed(levels: i32) -> Option<Self> {
        match levels {
            -1 => Some(Self::Unlimited),
            levels if levels < 0 => None,
            levels => Some(Self::Levels(levels as usize)),
        }
    }
}

/// Position of a directory relative to its contents in the output.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Order {
    /// Yield a directory before its children.
    #[default]
    ParentFirst,
    /// Yield a directory after its children.
    ChildFirst,
}

/// Immutable traversal configuration shared by every root of a walk.
#[derive(Clone, Debug)]
pub struct TraversalPlan {
    pub(crate) exclusion: FilterGroup<WalkEntry>,
    pub(crate) selection: GroupSet<WalkEntry>,
    pub(crate) max_depth: MaxDepth,
    pub(crate) order: Order,
}

impl TraversalPlan {
    /// Creates a plan.
    ///
    /// Entries that are neither files nor dot entries and fail `exclusion`
    /// are skipped together with their subtree. Every other entry is yielded
    /// when it matches at least one group of `selection`.
    #[must_use]
    pub const fn new(
        exclusion: FilterGroup<WalkEntry>,
        selection: GroupSet<WalkEntry>,
        max_depth: MaxDepth,
        order: Order,
    ) -> Self {
        Self {
            exclusion,
            selection,
            max_depth,
            order,
        }
    }

    /// Returns the exclusion group.
    #[must_use]
    pub const fn exclusion(&self) -> &FilterGroup<WalkEntry> {
        &self.exclusion
    }

    /// Returns the selection groups.
    #[must_use]
    pub const fn selection(&self) -> &GroupSet<WalkEntry> {
        &self.selection
    }

    /// Returns the depth limit.
    #[must_use]
    pub const fn max_depth(&self) -> MaxDepth {
        self.max_depth
    }

    /// Returns the yield order.
    #[must_use]
    pub const fn order(&self) -> Order {
        self.order
    }
}

impl Default for TraversalPlan {
    /// Unlimited parent-first walk that yields every entry.
    fn default() -> Self {
        let selection = std::iter::once(FilterGroup::new()).collect();
        Self::new(
            FilterGroup::new(),
            selection,
            MaxDepth::Unlimited,
            Order::ParentFirst,
        )
    }
}
