use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use filters::Candidate;
use filters::debug_filter::{MatchTally, trace_entry_decision, trace_entry_pruned};

use crate::debug_walk::{
    trace_directory_entered, trace_directory_pruned, trace_root_opened, trace_walk_failed,
};
use crate::entry::WalkEntry;
use crate::error::{WalkError, WalkErrorKind};
use crate::plan::{Order, TraversalPlan};

/// Depth-first iterator over the entries below one search root.
///
/// The root itself is never yielded. Nothing is read from disk until the
/// first call to [`Iterator::next`], and each directory listing is read only
/// when the walker reaches it. The first error ends the walk.
pub struct Walker {
    root: PathBuf,
    plan: Arc<TraversalPlan>,
    stack: Vec<DirectoryState>,
    opened: bool,
    finished: bool,
    tally: MatchTally,
}

impl Walker {
    /// Creates a walker over `root` governed by `plan`.
    #[must_use]
    pub const fn new(root: PathBuf, plan: Arc<TraversalPlan>) -> Self {
        Self {
            root,
            plan,
            stack: Vec::new(),
            opened: false,
            finished: false,
            tally: MatchTally::new(),
        }
    }

    /// Returns the search root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn open_root(&mut self) -> Result<(), WalkError> {
        trace_root_opened(&self.root);
        fs::metadata(&self.root).map_err(|error| {
            WalkError::new(WalkErrorKind::RootMetadata, self.root.clone(), 0, error)
        })?;
        self.stack
            .push(DirectoryState::new(self.root.clone(), PathBuf::new(), 0, None));
        Ok(())
    }

    fn accepts(&mut self, entry: &WalkEntry) -> bool {
        let accepted = self.plan.selection.matches(entry);
        trace_entry_decision(entry.subpath(), accepted);
        self.tally.record_evaluation(accepted);
        accepted
    }

    fn prunes(&mut self, entry: &WalkEntry) -> bool {
        if entry.is_file() || Candidate::is_dot(entry) || self.plan.exclusion.matches(entry) {
            return false;
        }
        trace_directory_pruned(entry.full_path());
        trace_entry_pruned(entry.subpath());
        self.tally.record_pruned();
        true
    }

    fn fail(&mut self, error: WalkError) -> Option<Result<WalkEntry, WalkError>> {
        trace_walk_failed(&error);
        self.finish();
        Some(Err(error))
    }

    fn finish(&mut self) {
        if !self.finished {
            self.finished = true;
            self.stack.clear();
            self.tally.summary();
        }
    }
}

impl Iterator for Walker {
    type Item = Result<WalkEntry, WalkError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        if !self.opened {
            self.opened = true;
            if let Err(error) = self.open_root() {
                return self.fail(error);
            }
        }

        loop {
            let (full_path, relative_path, depth) = {
                let Some(state) = self.stack.last_mut() else {
                    self.finish();
                    return None;
                };

                match state.next_name() {
                    Ok(Some(name)) => {
                        let full_path = state.fs_path.join(&name);
                        let relative_path = if state.relative_prefix.as_os_str().is_empty() {
                            PathBuf::from(&name)
                        } else {
                            state.relative_prefix.join(&name)
                        };
                        (full_path, relative_path, state.depth + 1)
                    }
                    Ok(None) => {
                        let owner = self.stack.pop().and_then(|state| state.owner);
                        if let Some(directory) = owner
                            && self.accepts(&directory)
                        {
                            return Some(Ok(directory));
                        }
                        continue;
                    }
                    Err(error) => return self.fail(error),
                }
            };

            let entry = match WalkEntry::capture(full_path, relative_path, depth) {
                Ok(entry) => entry,
                Err(error) => return self.fail(error),
            };

            if self.prunes(&entry) {
                continue;
            }

            if entry.is_dir() && self.plan.max_depth.allows_descent(depth) {
                let fs_path = entry.full_path.clone();
                let relative_prefix = entry.relative_path.clone();
                match self.plan.order {
                    Order::ParentFirst => {
                        self.stack
                            .push(DirectoryState::new(fs_path, relative_prefix, depth, None));
                        if self.accepts(&entry) {
                            return Some(Ok(entry));
                        }
                    }
                    Order::ChildFirst => {
                        self.stack.push(DirectoryState::new(
                            fs_path,
                            relative_prefix,
                            depth,
                            Some(entry),
                        ));
                    }
                }
                continue;
            }

            if self.accepts(&entry) {
                return Some(Ok(entry));
            }
        }
    }
}

/// Directory whose children are being visited.
///
/// `entries` stays `None` until the first child is requested.
#[derive(Debug)]
struct DirectoryState {
    fs_path: PathBuf,
    relative_prefix: PathBuf,
    entries: Option<Vec<OsString>>,
    index: usize,
    depth: usize,
    owner: Option<WalkEntry>,
}

impl DirectoryState {
    const fn new(
        fs_path: PathBuf,
        relative_prefix: PathBuf,
        depth: usize,
        owner: Option<WalkEntry>,
    ) -> Self {
        Self {
            fs_path,
            relative_prefix,
            entries: None,
            index: 0,
            depth,
            owner,
        }
    }

    fn next_name(&mut self) -> Result<Option<OsString>, WalkError> {
        if self.entries.is_none() {
            self.entries = Some(self.read_sorted()?);
        }
        let name = self
            .entries
            .as_ref()
            .and_then(|entries| entries.get(self.index))
            .cloned();
        if name.is_some() {
            self.index += 1;
        }
        Ok(name)
    }

    fn failure(&self, kind: WalkErrorKind, error: io::Error) -> WalkError {
        WalkError::new(kind, self.fs_path.clone(), self.depth, error)
    }

    fn read_sorted(&self) -> Result<Vec<OsString>, WalkError> {
        let read_dir = fs::read_dir(&self.fs_path)
            .map_err(|error| self.failure(WalkErrorKind::ReadDir, error))?;
        let mut entries = Vec::new();
        for entry in read_dir {
            let entry = entry.map_err(|error| self.failure(WalkErrorKind::ReadDirEntry, error))?;
            entries.push(entry.file_name());
        }
        entries.sort();

        trace_directory_entered(&self.fs_path, entries.len(), self.depth);
        Ok(entries)
    }
}
