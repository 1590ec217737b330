use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Step of the walk that hit the filesystem error.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WalkErrorKind {
    /// The search root could not be inspected.
    RootMetadata,
    /// A directory could not be opened for listing.
    ReadDir,
    /// Listing a directory failed partway through.
    ReadDirEntry,
    /// An entry vanished or could not be inspected after it was listed.
    Metadata,
}

impl WalkErrorKind {
    const fn action(self) -> &'static str {
        match self {
            Self::RootMetadata => "cannot access search root",
            Self::ReadDir => "cannot list directory",
            Self::ReadDirEntry => "listing interrupted in",
            Self::Metadata => "cannot inspect",
        }
    }
}

/// Filesystem failure that ended the walk below one search root.
///
/// `depth` uses the walker's numbering: `0` for the root itself, `1` for its
/// children, and so on. For listing failures it is the depth of the
/// directory being listed.
#[derive(Debug, Error)]
#[error("{} '{}': {source}", .kind.action(), .path.display())]
pub struct WalkError {
    kind: WalkErrorKind,
    path: PathBuf,
    depth: usize,
    #[source]
    source: io::Error,
}

impl WalkError {
    pub(crate) const fn new(
        kind: WalkErrorKind,
        path: PathBuf,
        depth: usize,
        source: io::Error,
    ) -> Self {
        Self {
            kind,
            path,
            depth,
            source,
        }
    }

    /// Step that failed.
    #[must_use]
    pub const fn kind(&self) -> WalkErrorKind {
        self.kind
    }

    /// Path the failing operation was applied to.
    ///
    /// # Examples
    ///
    /// ```
    /// use walk::{WalkBuilder, WalkErrorKind};
    ///
    /// let mut walk = WalkBuilder::new("./definitely_missing_root").build();
    /// let error = walk.next().expect("one item").unwrap_err();
    /// assert_eq!(error.kind(), WalkErrorKind::RootMetadata);
    /// assert!(error.path().ends_with("definitely_missing_root"));
    /// ```
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Depth at which the walk stopped.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Operating-system error reported for the path.
    #[must_use]
    pub const fn io_error(&self) -> &io::Error {
        &self.source
    }
}
