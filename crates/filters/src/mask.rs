//! Glob mask compilation.
//!
//! Masks are matched against the subpath of an entry relative to the search
//! root, prefixed with `/` so that every path component starts on a slash
//! boundary. A compiled mask set becomes one case-insensitive alternation
//! anchored at the end of that subject.

use regex::{Regex, RegexBuilder};

use crate::FilterError;
use crate::debug_filter::trace_masks_compiled;

/// Matching rule derived from a set of masks.
#[derive(Clone, Debug)]
pub enum MaskPattern {
    /// A literal `*` mask was present; every path matches.
    MatchAll,
    /// No usable mask was supplied; every path matches.
    Unrestricted,
    /// Compiled alternation over the supplied masks.
    Pattern(Regex),
}

impl MaskPattern {
    /// Reports whether `subpath` (relative to the search root) satisfies the rule.
    ///
    /// Backslashes in `subpath` are treated as separators.
    #[must_use]
    pub fn is_match(&self, subpath: &str) -> bool {
        match self {
            Self::MatchAll | Self::Unrestricted => true,
            Self::Pattern(regex) => regex.is_match(&subject(subpath)),
        }
    }

    /// Returns `true` when the rule rejects at least some paths.
    #[must_use]
    pub const fn is_restrictive(&self) -> bool {
        matches!(self, Self::Pattern(_))
    }

    /// Returns the compiled expression, if any.
    #[must_use]
    pub fn as_regex(&self) -> Option<&Regex> {
        match self {
            Self::Pattern(regex) => Some(regex),
            Self::MatchAll | Self::Unrestricted => None,
        }
    }
}

/// Compiles `masks` into a single [`MaskPattern`].
///
/// A mask equal to `*` short-circuits the whole call to
/// [`MaskPattern::MatchAll`], discarding any other masks supplied alongside
/// it. Empty masks (after separator normalisation) are skipped; when nothing
/// remains the result is [`MaskPattern::Unrestricted`].
///
/// # Examples
///
/// ```
/// use filters::compile_masks;
///
/// let pattern = compile_masks(["*.txt", "/docs/*.md"]).unwrap();
/// assert!(pattern.is_match("notes.txt"));
/// assert!(pattern.is_match("deep/nested/NOTES.TXT"));
/// assert!(pattern.is_match("docs/readme.md"));
/// assert!(!pattern.is_match("src/docs/readme.md"));
/// ```
pub fn compile_masks<I, S>(masks: I) -> Result<MaskPattern, FilterError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut alternatives = Vec::new();
    let mut sources = Vec::new();

    for mask in masks {
        let normalized = mask.as_ref().replace('\\', "/");
        let normalized = normalized.trim_end_matches('/');
        if normalized.is_empty() {
            continue;
        }
        if normalized == "*" {
            trace_masks_compiled(&sources, None);
            return Ok(MaskPattern::MatchAll);
        }

        let alternative = match normalized.strip_prefix('/') {
            Some(anchored) => format!("^/{}", translate(anchored.trim_start_matches('/'))),
            None => format!("/{}", translate(normalized)),
        };
        alternatives.push(alternative);
        sources.push(normalized.to_owned());
    }

    if alternatives.is_empty() {
        return Ok(MaskPattern::Unrestricted);
    }

    let expression = format!("(?:{})\\z", alternatives.join("|"));
    let regex = RegexBuilder::new(&expression)
        .case_insensitive(true)
        .build()
        .map_err(|error| FilterError::invalid_mask(sources.join(", "), error))?;

    trace_masks_compiled(&sources, Some(regex.as_str()));
    Ok(MaskPattern::Pattern(regex))
}

/// Translates one mask body into regular-expression syntax.
///
/// Character classes are passed through without validation.
fn translate(mask: &str) -> String {
    let mut out = String::with_capacity(mask.len() * 2);
    let mut chars = mask.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '*' if chars.peek() == Some(&'*') => {
                chars.next();
                out.push_str(".*");
            }
            '*' => out.push_str("[^/]*"),
            '?' => out.push_str("[^/]"),
            '[' if chars.peek() == Some(&'!') => {
                chars.next();
                out.push_str("[^");
            }
            '[' | ']' | '-' => out.push(ch),
            other => {
                let mut buf = [0; 4];
                out.push_str(&regex::escape(other.encode_utf8(&mut buf)));
            }
        }
    }

    out
}

fn subject(subpath: &str) -> String {
    let mut subject = String::with_capacity(subpath.len() + 1);
    subject.push('/');
    subject.push_str(&subpath.replace('\\', "/"));
    subject
}
