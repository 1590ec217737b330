use std::ffi::OsStr;
use std::fs;
use std::path::{Component, Path, PathBuf};

use filetime::FileTime;
use filters::Candidate;

use crate::error::{WalkError, WalkErrorKind};

/// Snapshot of one filesystem entry produced by the walker.
///
/// Metadata is captured once, when the walker reaches the entry, and follows
/// symbolic links. A link whose target cannot be inspected keeps the link's
/// own metadata and is then neither a file nor a directory.
#[derive(Clone, Debug)]
pub struct WalkEntry {
    pub(crate) full_path: PathBuf,
    pub(crate) relative_path: PathBuf,
    pub(crate) subpath: String,
    pub(crate) metadata: fs::Metadata,
    pub(crate) depth: usize,
    pub(crate) is_symlink: bool,
}

impl WalkEntry {
    pub(crate) fn capture(
        full_path: PathBuf,
        relative_path: PathBuf,
        depth: usize,
    ) -> Result<Self, WalkError> {
        let link = fs::symlink_metadata(&full_path).map_err(|error| {
            WalkError::new(WalkErrorKind::Metadata, full_path.clone(), depth, error)
        })?;
        let is_symlink = link.file_type().is_symlink();
        let metadata = if is_symlink {
            fs::metadata(&full_path).unwrap_or(link)
        } else {
            link
        };

        Ok(Self {
            subpath: slash_joined(&relative_path),
            full_path,
            relative_path,
            metadata,
            depth,
            is_symlink,
        })
    }

    /// Returns the path of the entry as reached from its search root.
    ///
    /// This is the root exactly as supplied joined with the relative path, so
    /// relative roots produce relative paths.
    #[must_use]
    pub fn full_path(&self) -> &Path {
        &self.full_path
    }

    /// Returns the path relative to the search root.
    #[must_use]
    pub fn relative_path(&self) -> &Path {
        &self.relative_path
    }

    /// Returns the path relative to the search root with `/` separators.
    #[must_use]
    pub fn subpath(&self) -> &str {
        &self.subpath
    }

    /// Returns the final component of the path.
    #[must_use]
    pub fn file_name(&self) -> Option<&OsStr> {
        self.relative_path.file_name()
    }

    /// Provides access to the [`fs::Metadata`] captured for the entry.
    #[must_use]
    pub const fn metadata(&self) -> &fs::Metadata {
        &self.metadata
    }

    /// Reports the depth of the entry; the root's children are at depth `1`.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Reports whether the entry is a directory or a link to one.
    #[must_use]
    pub fn is_dir(&self) -> bool {
        self.metadata.is_dir()
    }

    /// Reports whether the entry is a regular file or a link to one.
    #[must_use]
    pub fn is_file(&self) -> bool {
        self.metadata.is_file()
    }

    /// Reports whether the entry itself is a symbolic link.
    #[must_use]
    pub const fn is_symlink(&self) -> bool {
        self.is_symlink
    }

    /// Size in bytes.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.metadata.len()
    }

    /// Modification time in Unix epoch seconds.
    #[must_use]
    pub fn modified(&self) -> i64 {
        FileTime::from_last_modification_time(&self.metadata).unix_seconds()
    }
}

impl Candidate for WalkEntry {
    fn subpath(&self) -> &str {
        Self::subpath(self)
    }

    fn is_dir(&self) -> bool {
        Self::is_dir(self)
    }

    fn is_file(&self) -> bool {
        Self::is_file(self)
    }

    fn is_dot(&self) -> bool {
        matches!(self.file_name().and_then(OsStr::to_str), Some("." | ".."))
    }

    fn size(&self) -> u64 {
        Self::size(self)
    }

    fn modified(&self) -> i64 {
        Self::modified(self)
    }
}

fn slash_joined(relative: &Path) -> String {
    let mut joined = String::new();
    for component in relative.components() {
        if let Component::Normal(name) = component {
            if !joined.is_empty() {
                joined.push('/');
            }
            joined.push_str(&name.to_string_lossy());
        }
    }
    joined
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subpath_uses_forward_slashes() {
        let relative: PathBuf = ["a", "b", "c.txt"].iter().collect();
        assert_eq!(slash_joined(&relative), "a/b/c.txt");
        assert_eq!(slash_joined(Path::new("")), "");
    }

    #[test]
    fn capture_reports_missing_entries() {
        let temp = tempfile::tempdir().expect("tempdir");
        let missing = temp.path().join("missing");
        let error = WalkEntry::capture(missing.clone(), PathBuf::from("missing"), 1)
            .expect_err("missing entry");
        assert_eq!(error.path(), missing);
    }

    #[test]
    fn capture_reads_file_attributes() {
        let temp = tempfile::tempdir().expect("tempdir");
        let file = temp.path().join("data.bin");
        fs::write(&file, [0_u8; 42]).expect("write");
        filetime::set_file_mtime(&file, FileTime::from_unix_time(1_000_000_000, 0))
            .expect("set mtime");

        let entry = WalkEntry::capture(file, PathBuf::from("data.bin"), 1).expect("entry");
        assert!(entry.is_file());
        assert!(!entry.is_dir());
        assert!(!entry.is_symlink());
        assert!(!Candidate::is_dot(&entry));
        assert_eq!(entry.size(), 42);
        assert_eq!(entry.modified(), 1_000_000_000);
        assert_eq!(entry.file_name(), Some(OsStr::new("data.bin")));
    }

    #[cfg(unix)]
    #[test]
    fn dangling_symlink_keeps_link_metadata() {
        let temp = tempfile::tempdir().expect("tempdir");
        let link = temp.path().join("dangling");
        std::os::unix::fs::symlink(temp.path().join("nowhere"), &link).expect("symlink");

        let entry = WalkEntry::capture(link, PathBuf::from("dangling"), 1).expect("entry");
        assert!(entry.is_symlink());
        assert!(!entry.is_file());
        assert!(!entry.is_dir());
    }

    #[cfg(unix)]
    #[test]
    fn symlink_to_directory_reports_directory() {
        let temp = tempfile::tempdir().expect("tempdir");
        let target = temp.path().join("target");
        fs::create_dir(&target).expect("dir");
        let link = temp.path().join("link");
        std::os::unix::fs::symlink(&target, &link).expect("symlink");

        let entry = WalkEntry::capture(link, PathBuf::from("link"), 1).expect("entry");
        assert!(entry.is_symlink());
        assert!(entry.is_dir());
    }
}
