#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `walk` performs the directory traversal behind `finder` queries. It walks
//! one or more search roots depth-first, prunes directories rejected by an
//! exclusion group, bounds recursion depth, and yields only the entries that
//! match at least one selection group.
//!
//! # Design
//!
//! - [`WalkBuilder`] collects roots and a [`TraversalPlan`] and builds a
//!   [`WalkChain`], which concatenates one [`Walker`] per root.
//! - [`Walker`] implements [`Iterator`] over [`WalkEntry`] values. Directory
//!   listings are read lazily, one directory at a time, and sorted so the
//!   sequence is deterministic regardless of the filesystem's own order.
//! - [`WalkEntry`] implements [`filters::Candidate`], so the predicates of
//!   the `filters` crate evaluate directly against walker output.
//!
//! # Invariants
//!
//! - The search root itself is never yielded; its children have depth `1`.
//! - Pruning happens before selection and before depth accounting: a pruned
//!   directory is neither yielded nor entered.
//! - [`Order`] changes only the position of a directory relative to its
//!   contents, never which entries are yielded.
//! - Symbolic links are followed. There is no cycle detection; a link to an
//!   ancestor is descended until the operating system reports an error.
//!
//! # Errors
//!
//! Traversal emits [`WalkError`] when metadata cannot be queried or a
//! directory cannot be read. The error ends the walk of the affected root.
//!
//! # Examples
//!
//! ```
//! use walk::{MaxDepth, WalkBuilder};
//! use std::fs;
//!
//! # fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let temp = tempfile::tempdir()?;
//! fs::create_dir_all(temp.path().join("nested/deeper"))?;
//! fs::write(temp.path().join("file.txt"), b"data")?;
//!
//! let mut seen = Vec::new();
//! for entry in WalkBuilder::new(temp.path()).max_depth(MaxDepth::Levels(0)).build() {
//!     seen.push(entry?.subpath().to_owned());
//! }
//!
//! assert_eq!(seen, ["file.txt", "nested"]);
//! # Ok(())
//! # }
//! # demo().unwrap();
//! ```

mod builder;
mod chain;
pub mod debug_walk;
mod entry;
mod error;
mod plan;
mod walker;

pub use builder::WalkBuilder;
pub use chain::WalkChain;
pub use entry::WalkEntry;
pub use error::{WalkError, WalkErrorKind};
pub use plan::{MaxDepth, Order, TraversalPlan};
pub use walker::Walker;
