//! Structured tracing for directory traversal.
//!
//! Compiled behind the `tracing` feature flag; every function is an inline
//! no-op otherwise.

use std::path::Path;

/// Target name for walker tracing events.
#[cfg(feature = "tracing")]
pub const WALK_TARGET: &str = "finder::walk";

/// Traces the start of a walk below `root`.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_root_opened(root: &Path) {
    tracing::debug!(target: WALK_TARGET, root = %root.display(), "root_opened");
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_root_opened(_root: &Path) {}

/// Traces a directory listing read from disk.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_directory_entered(path: &Path, entries: usize, depth: usize) {
    tracing::trace!(
        target: WALK_TARGET,
        path = %path.display(),
        entries = entries,
        depth = depth,
        "directory_entered"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_directory_entered(_path: &Path, _entries: usize, _depth: usize) {}

/// Traces a directory skipped together with its subtree.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_directory_pruned(path: &Path) {
    tracing::debug!(target: WALK_TARGET, path = %path.display(), "directory_pruned");
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_directory_pruned(_path: &Path) {}

/// Traces a failure that ended the walk of one root.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_walk_failed(error: &crate::WalkError) {
    tracing::warn!(target: WALK_TARGET, error = %error, "walk_failed");
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_walk_failed(_error: &crate::WalkError) {}
