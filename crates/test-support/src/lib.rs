//! Temporary directory trees for `finder` tests.
//!
//! [`TestDir`] owns a temporary directory that is removed on drop.
//! [`FileTree`] describes files and directories declaratively and
//! materialises them inside a [`TestDir`].

#![deny(unsafe_code)]

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use filetime::FileTime;
use tempfile::TempDir;

/// Temporary directory removed when dropped.
#[derive(Debug)]
pub struct TestDir {
    temp: TempDir,
}

impl TestDir {
    /// Creates a fresh, empty directory.
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            temp: tempfile::tempdir()?,
        })
    }

    /// Root of the directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    /// Resolves `relative` below the root.
    #[must_use]
    pub fn join(&self, relative: &str) -> PathBuf {
        self.temp.path().join(relative)
    }

    /// Creates `relative` and any missing parents.
    pub fn mkdir(&self, relative: &str) -> io::Result<PathBuf> {
        let path = self.join(relative);
        fs::create_dir_all(&path)?;
        Ok(path)
    }

    /// Writes `contents` to `relative`, creating parent directories.
    pub fn write_file(&self, relative: &str, contents: &[u8]) -> io::Result<PathBuf> {
        let path = self.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents)?;
        Ok(path)
    }

    /// Reads the file at `relative`.
    pub fn read_file(&self, relative: &str) -> io::Result<Vec<u8>> {
        fs::read(self.join(relative))
    }

    /// Reports whether `relative` exists.
    #[must_use]
    pub fn exists(&self, relative: &str) -> bool {
        self.join(relative).exists()
    }

    /// Sets the modification time of `relative` to `seconds` since the epoch.
    pub fn set_mtime(&self, relative: &str, seconds: i64) -> io::Result<()> {
        set_mtime(&self.join(relative), seconds)
    }
}

/// Sets the modification time of `path` to `seconds` since the epoch.
pub fn set_mtime(path: &Path, seconds: i64) -> io::Result<()> {
    filetime::set_file_mtime(path, FileTime::from_unix_time(seconds, 0))
}

#[derive(Clone, Debug)]
enum Node {
    Dir(String),
    File {
        path: String,
        contents: Vec<u8>,
        mtime: Option<i64>,
    },
}

/// Declarative description of a directory tree.
///
/// Nodes are created in insertion order; parents are created implicitly.
#[derive(Clone, Debug, Default)]
pub struct FileTree {
    nodes: Vec<Node>,
}

impl FileTree {
    /// Creates an empty tree.
    #[must_use]
    pub const fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Adds an empty directory.
    pub fn dir(&mut self, path: &str) -> &mut Self {
        self.nodes.push(Node::Dir(path.to_owned()));
        self
    }

    /// Adds a file with text contents.
    pub fn text_file(&mut self, path: &str, contents: &str) -> &mut Self {
        self.file(path, contents.as_bytes())
    }

    /// Adds a file with binary contents.
    pub fn file(&mut self, path: &str, contents: &[u8]) -> &mut Self {
        self.nodes.push(Node::File {
            path: path.to_owned(),
            contents: contents.to_vec(),
            mtime: None,
        });
        self
    }

    /// Adds a file of `len` zero bytes.
    pub fn sized_file(&mut self, path: &str, len: usize) -> &mut Self {
        self.file(path, &vec![0; len])
    }

    /// Adds an empty file whose modification time is `seconds` since the epoch.
    pub fn dated_file(&mut self, path: &str, seconds: i64) -> &mut Self {
        self.nodes.push(Node::File {
            path: path.to_owned(),
            contents: Vec::new(),
            mtime: Some(seconds),
        });
        self
    }

    /// Materialises the tree inside `dir`.
    pub fn create_in(&self, dir: &TestDir) -> io::Result<()> {
        for node in &self.nodes {
            match node {
                Node::Dir(path) => {
                    dir.mkdir(path)?;
                }
                Node::File {
                    path,
                    contents,
                    mtime,
                } => {
                    let written = dir.write_file(path, contents)?;
                    if let Some(seconds) = mtime {
                        set_mtime(&written, *seconds)?;
                    }
                }
            }
        }
        Ok(())
    }
}
