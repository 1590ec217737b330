use std::fmt;
use std::sync::Arc;

/// Attributes of a directory entry that predicates inspect.
///
/// Implemented by the walker's entry type; tests implement it on plain
/// structs to exercise predicates without touching the filesystem.
pub trait Candidate {
    /// Path relative to the search root using `/` separators.
    fn subpath(&self) -> &str;
    /// Reports whether the entry is a directory (after following symlinks).
    fn is_dir(&self) -> bool;
    /// Reports whether the entry is a regular file (after following symlinks).
    fn is_file(&self) -> bool;
    /// Reports whether the entry is the `.` or `..` pseudo-entry.
    fn is_dot(&self) -> bool;
    /// Size in bytes.
    fn size(&self) -> u64;
    /// Modification time in Unix epoch seconds.
    fn modified(&self) -> i64;
}

/// Shared, side-effect-free boolean test over an entry.
pub type Predicate<E> = Arc<dyn Fn(&E) -> bool + Send + Sync>;

/// Ordered list of predicates combined with logical AND.
///
/// An empty group places no restriction.
pub struct FilterGroup<E> {
    predicates: Vec<Predicate<E>>,
}

impl<E> FilterGroup<E> {
    /// Creates an empty group.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            predicates: Vec::new(),
        }
    }

    /// Appends `predicate` to the group.
    pub fn push(&mut self, predicate: Predicate<E>) {
        self.predicates.push(predicate);
    }

    /// Number of predicates in the group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    /// Returns `true` when the group holds no predicates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Returns `true` when every predicate accepts `entry`.
    ///
    /// Evaluation stops at the first rejecting predicate.
    pub fn matches(&self, entry: &E) -> bool {
        self.predicates.iter().all(|predicate| predicate(entry))
    }
}

impl<E> Default for FilterGroup<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for FilterGroup<E> {
    fn clone(&self) -> Self {
        Self {
            predicates: self.predicates.clone(),
        }
    }
}

impl<E> fmt::Debug for FilterGroup<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterGroup")
            .field("predicates", &self.predicates.len())
            .finish()
    }
}

/// Ordered list of [`FilterGroup`]s combined with logical OR.
///
/// An entry is accepted when any group matches it, so an empty set accepts
/// nothing.
pub struct GroupSet<E> {
    groups: Vec<FilterGroup<E>>,
}

impl<E> GroupSet<E> {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self { groups: Vec::new() }
    }

    /// Appends a group and returns its index.
    pub fn push(&mut self, group: FilterGroup<E>) -> usize {
        self.groups.push(group);
        self.groups.len() - 1
    }

    /// Mutable access to the group at `index`.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut FilterGroup<E>> {
        self.groups.get_mut(index)
    }

    /// Number of groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns `true` when the set holds no groups.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Iterates over the groups in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, FilterGroup<E>> {
        self.groups.iter()
    }

    /// Returns `true` when at least one group matches `entry`.
    pub fn matches(&self, entry: &E) -> bool {
        self.groups.iter().any(|group| group.matches(entry))
    }
}

impl<E> Default for GroupSet<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for GroupSet<E> {
    fn clone(&self) -> Self {
        Self {
            groups: self.groups.clone(),
        }
    }
}

impl<E> fmt::Debug for GroupSet<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.groups.iter()).finish()
    }
}

impl<E> FromIterator<FilterGroup<E>> for GroupSet<E> {
    fn from_iter<I: IntoIterator<Item = FilterGroup<E>>>(iter: I) -> Self {
        Self {
            groups: iter.into_iter().collect(),
        }
    }
}
