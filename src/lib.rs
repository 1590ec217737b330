#![deny(unsafe_code, missing_docs, rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `finder` searches directory trees for files and directories through a
//! fluent query. A query names what to select with glob masks, where to look
//! with [`Finder::from`] or [`Finder::within`], and narrows the result with
//! size, date, exclusion and custom predicates. Iterating a query walks the
//! live filesystem lazily and yields [`WalkEntry`] values.
//!
//! # Design
//!
//! - [`filters`] compiles masks and predicate strings into boolean
//!   predicates grouped into an OR-of-ANDs selection and an exclusion group.
//! - [`walk`] performs the depth-first traversal, pruning directories the
//!   exclusion group rejects before reading them.
//! - [`Finder`] ties both together and tracks which group restriction calls
//!   append to via a [`Cursor`].
//! - [`ExtensionRegistry`] holds named methods callable through
//!   [`Finder::call`].
//! - [`cli`] backs the `ffind` binary.
//!
//! # Errors
//!
//! Malformed masks and predicate strings fail at the call that receives them
//! with [`FinderError::Filter`]. Filesystem failures surface as
//! [`FinderError::Walk`] items during iteration.
//!
//! # Examples
//!
//! ```
//! use finder::Finder;
//! # fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let temp = tempfile::tempdir()?;
//! std::fs::create_dir(temp.path().join("src"))?;
//! std::fs::write(temp.path().join("src/lib.rs"), b"")?;
//! std::fs::write(temp.path().join("README.md"), b"")?;
//!
//! let count = Finder::find_files(["*.rs"])?.from([temp.path()])?.count()?;
//! assert_eq!(count, 1);
//! # Ok(())
//! # }
//! # demo().unwrap();
//! ```

pub mod cli;
mod error;
mod extension;
mod finder;

pub use crate::error::FinderError;
pub use crate::extension::{ExtensionMethod, ExtensionRegistry};
pub use crate::finder::{Cursor, Finder};
pub use filters::{Candidate, FilterError};
pub use walk::{MaxDepth, Order, WalkEntry, WalkError, WalkErrorKind};
