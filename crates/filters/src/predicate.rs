//! Constructors for the atomic predicates a query is assembled from.

use std::sync::Arc;

use crate::{Candidate, DateSpec, MaskPattern, Predicate, SizeSpec};

/// Entry type a selection is restricted to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EntryKind {
    /// Regular files.
    File,
    /// Directories.
    Directory,
}

impl EntryKind {
    /// Reports whether `entry` is of this kind.
    pub fn describes<E: Candidate + ?Sized>(self, entry: &E) -> bool {
        match self {
            Self::File => entry.is_file(),
            Self::Directory => entry.is_dir(),
        }
    }
}

/// Predicate used by a selection group: not a dot entry, of the requested
/// kind (if any), and matching `pattern`.
pub fn select_predicate<E>(kind: Option<EntryKind>, pattern: MaskPattern) -> Predicate<E>
where
    E: Candidate + 'static,
{
    Arc::new(move |entry: &E| {
        !entry.is_dot()
            && kind.is_none_or(|kind| kind.describes(entry))
            && pattern.is_match(entry.subpath())
    })
}

/// Predicate rejecting entries whose subpath matches `pattern`.
///
/// Returns `None` when the pattern places no restriction, in which case
/// nothing is excluded.
pub fn exclude_predicate<E>(pattern: MaskPattern) -> Option<Predicate<E>>
where
    E: Candidate + 'static,
{
    if !pattern.is_restrictive() {
        return None;
    }
    Some(Arc::new(move |entry: &E| !pattern.is_match(entry.subpath())))
}

/// Predicate comparing the entry size against `spec`.
pub fn size_predicate<E>(spec: SizeSpec) -> Predicate<E>
where
    E: Candidate + 'static,
{
    Arc::new(move |entry: &E| spec.matches(entry.size()))
}

/// Predicate comparing the entry modification time against `spec`.
pub fn date_predicate<E>(spec: DateSpec) -> Predicate<E>
where
    E: Candidate + 'static,
{
    Arc::new(move |entry: &E| spec.matches(entry.modified()))
}
