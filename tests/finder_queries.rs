//! End-to-end queries against real directory trees.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use finder::{Finder, FinderError, MaxDepth};
use test_support::{FileTree, TestDir, set_mtime};

fn subpaths(finder: &Finder) -> Vec<String> {
    finder
        .iter()
        .expect("roots configured")
        .map(|entry| entry.expect("entry").subpath().to_owned())
        .collect()
}

fn project_tree() -> TestDir {
    let dir = TestDir::new().expect("tempdir");
    FileTree::new()
        .text_file("README.md", "readme")
        .text_file("src/lib.rs", "lib")
        .text_file("src/nested/mod.rs", "mod")
        .text_file("temp/scratch.rs", "scratch")
        .text_file("docs/guide.md", "guide")
        .create_in(&dir)
        .expect("tree");
    dir
}

// ============================================================================
// Masks
// ============================================================================

#[test]
fn files_are_selected_by_mask_at_any_depth() {
    let dir = project_tree();
    let finder = Finder::find_files(["*.rs"])
        .expect("finder")
        .from([dir.path()])
        .expect("from");
    assert_eq!(
        subpaths(&finder),
        ["src/lib.rs", "src/nested/mod.rs", "temp/scratch.rs"]
    );
}

#[test]
fn star_mask_discards_its_siblings() {
    let dir = project_tree();
    let all = Finder::find_files(["*"]).expect("finder").from([dir.path()]).expect("from");
    let mixed = Finder::find_files(["*.nothing", "*"])
        .expect("finder")
        .from([dir.path()])
        .expect("from");
    assert_eq!(subpaths(&all), subpaths(&mixed));
    assert_eq!(subpaths(&all).len(), 5);
}

#[test]
fn backslash_masks_match_like_slash_masks() {
    let dir = project_tree();
    let slash = Finder::find_files(["src/*.rs"]).expect("finder").from([dir.path()]).expect("from");
    let backslash = Finder::find_files(["src\\*.rs"])
        .expect("finder")
        .from([dir.path()])
        .expect("from");
    assert_eq!(subpaths(&slash), ["src/lib.rs"]);
    assert_eq!(subpaths(&slash), subpaths(&backslash));
}

#[test]
fn anchored_masks_match_from_the_root_only() {
    let dir = project_tree();
    let finder = Finder::find_files(["/*.md"]).expect("finder").from([dir.path()]).expect("from");
    assert_eq!(subpaths(&finder), ["README.md"]);
}

#[test]
fn find_selects_directories_and_files() {
    let dir = project_tree();
    let finder = Finder::find(["src", "*.md"]).expect("finder").from([dir.path()]).expect("from");
    assert_eq!(subpaths(&finder), ["README.md", "docs/guide.md", "src"]);

    let directories = Finder::find_directories(["*"])
        .expect("finder")
        .from([dir.path()])
        .expect("from");
    assert_eq!(subpaths(&directories), ["docs", "src", "src/nested", "temp"]);
}

// ============================================================================
// Size and date restrictions
// ============================================================================

#[test]
fn bare_size_means_equality() {
    let dir = TestDir::new().expect("tempdir");
    FileTree::new()
        .sized_file("ten.bin", 10)
        .sized_file("eleven.bin", 11)
        .create_in(&dir)
        .expect("tree");

    let parsed = Finder::find_files(["*"]).expect("finder").size("10").expect("size");
    let explicit = Finder::find_files(["*"])
        .expect("finder")
        .size_with("=", 10)
        .expect("size");

    let parsed = parsed.from([dir.path()]).expect("from");
    let explicit = explicit.from([dir.path()]).expect("from");
    assert_eq!(subpaths(&parsed), ["ten.bin"]);
    assert_eq!(subpaths(&parsed), subpaths(&explicit));
}

#[test]
fn kilo_unit_is_decimal() {
    let dir = TestDir::new().expect("tempdir");
    FileTree::new()
        .sized_file("at.bin", 10_000)
        .sized_file("below.bin", 9_999)
        .create_in(&dir)
        .expect("tree");

    let finder = Finder::find_files(["*"])
        .expect("finder")
        .size(">=10K")
        .expect("size")
        .from([dir.path()])
        .expect("from");
    assert_eq!(subpaths(&finder), ["at.bin"]);
}

#[test]
fn dates_compare_against_modification_time() {
    let dir = TestDir::new().expect("tempdir");
    FileTree::new()
        .dated_file("old.txt", 1_000_000_000)
        .dated_file("new.txt", 1_700_000_000)
        .create_in(&dir)
        .expect("tree");

    let before = Finder::find_files(["*"])
        .expect("finder")
        .date("< 2005-01-01")
        .expect("date")
        .from([dir.path()])
        .expect("from");
    assert_eq!(subpaths(&before), ["old.txt"]);

    let after = Finder::find_files(["*"])
        .expect("finder")
        .date_with(">", "2020-01-01")
        .expect("date")
        .from([dir.path()])
        .expect("from");
    assert_eq!(subpaths(&after), ["new.txt"]);
}

#[test]
fn date_predicates_see_updated_times() {
    let dir = TestDir::new().expect("tempdir");
    let file = dir.write_file("touched.txt", b"x").expect("write");
    set_mtime(&file, 1_000_000_000).expect("mtime");

    let finder = Finder::find_files(["*"])
        .expect("finder")
        .date("1000000000")
        .expect("date")
        .from([dir.path()])
        .expect("from");
    assert_eq!(subpaths(&finder), ["touched.txt"]);
}

// ============================================================================
// Exclusion and depth
// ============================================================================

#[test]
fn excluded_directories_are_never_visited() {
    let dir = project_tree();
    let visited = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&visited);

    let finder = Finder::find_files(["*"])
        .expect("finder")
        .filter(move |entry| {
            if entry.subpath().starts_with("temp") {
                counter.fetch_add(1, Ordering::SeqCst);
            }
            true
        })
        .from([dir.path()])
        .expect("from")
        .exclude(["temp"])
        .expect("exclude");

    let found = subpaths(&finder);
    assert!(!found.iter().any(|path| path.starts_with("temp")));
    assert_eq!(visited.load(Ordering::SeqCst), 0);
}

#[test]
fn exclude_before_from_only_filters_results() {
    let dir = project_tree();
    let finder = Finder::find_directories(["*"])
        .expect("finder")
        .exclude(["src"])
        .expect("exclude")
        .from([dir.path()])
        .expect("from");
    assert_eq!(subpaths(&finder), ["docs", "src/nested", "temp"]);
}

#[test]
fn within_lists_immediate_contents() {
    let dir = project_tree();
    let finder = Finder::find(["*"]).expect("finder").within([dir.path()]).expect("within");
    assert_eq!(subpaths(&finder), ["README.md", "docs", "src", "temp"]);
}

#[test]
fn limit_depth_counts_levels_below_children() {
    let dir = project_tree();
    let finder = Finder::find_files(["*"])
        .expect("finder")
        .from([dir.path()])
        .expect("from")
        .limit_depth(1)
        .expect("depth");
    assert_eq!(finder.max_depth(), MaxDepth::Levels(1));
    assert_eq!(
        subpaths(&finder),
        ["README.md", "docs/guide.md", "src/lib.rs", "temp/scratch.rs"]
    );
}

#[test]
fn child_first_places_directories_after_contents() {
    let dir = project_tree();
    let finder = Finder::find(["*"])
        .expect("finder")
        .from([dir.path().join("src")])
        .expect("from")
        .child_first();
    assert_eq!(subpaths(&finder), ["lib.rs", "nested/mod.rs", "nested"]);
}

#[test]
fn multiple_roots_are_searched_in_order() {
    let first = TestDir::new().expect("tempdir");
    let second = TestDir::new().expect("tempdir");
    first.write_file("a.txt", b"a").expect("write");
    second.write_file("b.txt", b"b").expect("write");

    let finder = Finder::find_files(["*.txt"])
        .expect("finder")
        .from([first.path(), second.path()])
        .expect("from");
    let paths: Vec<PathBuf> = finder
        .iter()
        .expect("roots")
        .map(|entry| entry.expect("entry").full_path().to_path_buf())
        .collect();
    assert_eq!(paths, [first.join("a.txt"), second.join("b.txt")]);
    assert_eq!(finder.count().expect("count"), 2);
}

#[test]
fn iteration_reflects_the_live_filesystem() {
    let dir = TestDir::new().expect("tempdir");
    let finder = Finder::find_files(["*"]).expect("finder").from([dir.path()]).expect("from");
    assert_eq!(finder.count().expect("count"), 0);

    dir.write_file("later.txt", b"x").expect("write");
    assert_eq!(subpaths(&finder), ["later.txt"]);
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn unknown_operator_is_rejected_immediately() {
    let error = Finder::find_files(["*"])
        .expect("finder")
        .size_with("=>", 1)
        .expect_err("bad operator");
    assert!(error.is_invalid_argument());
    assert_eq!(error.to_string(), "unknown operator '=>'");
}

#[test]
fn roots_cannot_be_set_twice() {
    let error = Finder::find_files(["*"])
        .expect("finder")
        .from(["."])
        .expect("from")
        .within(["."])
        .expect_err("second root call");
    assert!(matches!(error, FinderError::PathsAlreadySet));
    assert!(error.is_invalid_state());
}

#[test]
fn depth_below_unlimited_is_rejected() {
    let error = Finder::find_files(["*"])
        .expect("finder")
        .limit_depth(-2)
        .expect_err("depth below -1");
    assert!(matches!(error, FinderError::InvalidDepth(-2)));
    assert!(error.is_invalid_argument());
}

#[test]
fn iterating_without_roots_fails() {
    let finder = Finder::find_files(["*"]).expect("finder");
    assert!(matches!(finder.iter(), Err(FinderError::NoPaths)));
    assert!(matches!(finder.count(), Err(FinderError::NoPaths)));
}

#[test]
fn missing_root_surfaces_as_walk_error() {
    let dir = TestDir::new().expect("tempdir");
    let finder = Finder::find_files(["*"])
        .expect("finder")
        .from([dir.join("missing")])
        .expect("from");
    assert!(matches!(finder.count(), Err(FinderError::Walk(_))));
}
