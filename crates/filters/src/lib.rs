#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `filters` provides the matching vocabulary of the `finder` workspace:
//! glob masks compiled to anchored regular expressions, comparison operators,
//! size and modification-time restrictions, and the boolean grouping used to
//! assemble a query out of predicates.
//!
//! # Design
//!
//! - [`compile_masks`] turns a set of masks into a [`MaskPattern`]. Masks are
//!   matched case-insensitively against `/` followed by an entry's subpath, so
//!   `*` never crosses a separator while `**` does.
//! - [`SizeSpec`] and [`DateSpec`] resolve their operands once, when the query
//!   is built, to a [`Comparison`] and a normalised threshold.
//! - Predicates are shared closures over any [`Candidate`]. A [`FilterGroup`]
//!   combines them with AND; a [`GroupSet`] combines groups with OR.
//!
//! # Invariants
//!
//! - An empty [`FilterGroup`] accepts every entry; an empty [`GroupSet`]
//!   accepts none.
//! - A lone `*` mask short-circuits the whole set to [`MaskPattern::MatchAll`]
//!   and suppresses compilation of the remaining masks.
//! - Predicates never fail at evaluation time; every parse error surfaces
//!   while the query is being built.
//!
//! # Errors
//!
//! Construction reports [`FilterError`] for masks that do not compile,
//! malformed size or date predicates, unparseable dates, and unknown
//! comparison operators.
//!
//! # Examples
//!
//! ```
//! use filters::{SizeSpec, compile_masks};
//!
//! let sources = compile_masks(["*.rs", "/Cargo.toml"]).unwrap();
//! assert!(sources.is_match("src/lib.rs"));
//! assert!(sources.is_match("Cargo.toml"));
//! assert!(!sources.is_match("crates/walk/Cargo.toml"));
//!
//! let large = SizeSpec::parse(">1M").unwrap();
//! assert!(large.matches(1_000_001));
//! ```

mod compare;
pub mod debug_filter;
mod error;
mod group;
mod mask;
mod predicate;
mod spec;
mod timestamp;

pub use compare::{Comparison, compare};
pub use error::FilterError;
pub use group::{Candidate, FilterGroup, GroupSet, Predicate};
pub use mask::{MaskPattern, compile_masks};
pub use predicate::{
    EntryKind, date_predicate, exclude_predicate, select_predicate, size_predicate,
};
pub use spec::{DateSpec, SizeSpec};
pub use timestamp::{RELATIVE_SECONDS_LIMIT, parse_timestamp, parse_timestamp_at};
