//! Size and modification-time restrictions.
//!
//! Both restrictions come in two calling conventions: a single predicate
//! string such as `>=10K` or `<2020-01-01`, and an explicit operator plus
//! operand. The operator defaults to `=` when a predicate string omits it.

use std::sync::OnceLock;

use regex::{Regex, RegexBuilder};

use crate::{Comparison, FilterError, parse_timestamp};

/// Resolved size restriction: entry size compared against a byte threshold.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SizeSpec {
    comparison: Comparison,
    bytes: f64,
}

impl SizeSpec {
    /// Builds a restriction from an explicit operator and byte count.
    ///
    /// # Examples
    ///
    /// ```
    /// use filters::SizeSpec;
    ///
    /// let spec = SizeSpec::new(">", 1024).unwrap();
    /// assert!(spec.matches(1025));
    /// assert!(SizeSpec::new("=>", 1024).is_err());
    /// ```
    pub fn new(operator: &str, bytes: u64) -> Result<Self, FilterError> {
        Ok(Self {
            comparison: operator.parse()?,
            bytes: bytes as f64,
        })
    }

    /// Parses `[operator] number [K|M|G][B]`.
    ///
    /// Units are decimal (`K` = 1000) and case-insensitive; the number may be
    /// fractional.
    ///
    /// # Examples
    ///
    /// ```
    /// use filters::SizeSpec;
    ///
    /// let spec = SizeSpec::parse(">=10K").unwrap();
    /// assert!(spec.matches(10_000));
    /// assert!(!spec.matches(9_999));
    /// ```
    pub fn parse(predicate: &str) -> Result<Self, FilterError> {
        let invalid = || FilterError::InvalidSizePredicate(predicate.to_owned());
        let captures = size_pattern().captures(predicate).ok_or_else(invalid)?;

        let comparison = operator_or_default(captures.get(1).map(|m| m.as_str()))?;
        let number: f64 = captures[2].parse().map_err(|_| invalid())?;
        let multiplier = match captures[3].to_ascii_lowercase().as_str() {
            "k" => 1e3,
            "m" => 1e6,
            "g" => 1e9,
            _ => 1.0,
        };

        Ok(Self {
            comparison,
            bytes: number * multiplier,
        })
    }

    /// Returns the operator.
    #[must_use]
    pub const fn comparison(&self) -> Comparison {
        self.comparison
    }

    /// Returns the threshold in bytes.
    #[must_use]
    pub const fn bytes(&self) -> f64 {
        self.bytes
    }

    /// Compares `size` against the threshold.
    #[must_use]
    pub fn matches(&self, size: u64) -> bool {
        self.comparison.evaluate(&(size as f64), &self.bytes)
    }
}

/// Resolved modification-time restriction in Unix epoch seconds.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DateSpec {
    comparison: Comparison,
    timestamp: i64,
}

impl DateSpec {
    /// Builds a restriction from an explicit operator and a date operand.
    ///
    /// The operand is resolved immediately with [`parse_timestamp`].
    pub fn new(operator: &str, date: &str) -> Result<Self, FilterError> {
        let comparison = operator.parse()?;
        Ok(Self {
            comparison,
            timestamp: parse_timestamp(date)?,
        })
    }

    /// Builds a restriction from an operator and an already resolved timestamp.
    pub fn at(operator: &str, timestamp: i64) -> Result<Self, FilterError> {
        Ok(Self {
            comparison: operator.parse()?,
            timestamp,
        })
    }

    /// Parses `[operator] date`.
    ///
    /// # Examples
    ///
    /// ```
    /// use filters::{Comparison, DateSpec};
    ///
    /// let spec = DateSpec::parse("< 2001-09-09T01:46:40Z").unwrap();
    /// assert_eq!(spec.comparison(), Comparison::Less);
    /// assert_eq!(spec.timestamp(), 1_000_000_000);
    /// ```
    pub fn parse(predicate: &str) -> Result<Self, FilterError> {
        let captures = date_pattern()
            .captures(predicate)
            .ok_or_else(|| FilterError::InvalidDatePredicate(predicate.to_owned()))?;

        let comparison = operator_or_default(captures.get(1).map(|m| m.as_str()))?;
        Ok(Self {
            comparison,
            timestamp: parse_timestamp(&captures[2])?,
        })
    }

    /// Returns the operator.
    #[must_use]
    pub const fn comparison(&self) -> Comparison {
        self.comparison
    }

    /// Returns the resolved threshold.
    #[must_use]
    pub const fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// Compares `modified` (epoch seconds) against the threshold.
    #[must_use]
    pub fn matches(&self, modified: i64) -> bool {
        self.comparison.evaluate(&modified, &self.timestamp)
    }
}

fn operator_or_default(operator: Option<&str>) -> Result<Comparison, FilterError> {
    match operator {
        Some(operator) if !operator.is_empty() => operator.parse(),
        _ => Ok(Comparison::Equal),
    }
}

fn size_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        RegexBuilder::new(r"^(?:(<>|[=<>!]=?)\s*)?((?:\d*\.)?\d+)\s*(K|M|G|)B?\z")
            .case_insensitive(true)
            .build()
            .expect("valid regex")
    })
}

fn date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        RegexBuilder::new(r"^(?:(<>|[=<>!]=?)\s*)?(.+)\z")
            .case_insensitive(true)
            .dot_matches_new_line(true)
            .build()
            .expect("valid regex")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_number_defaults_to_equality() {
        let parsed = SizeSpec::parse("10").unwrap();
        let explicit = SizeSpec::new("=", 10).unwrap();
        assert_eq!(parsed, explicit);
        assert!(parsed.matches(10));
        assert!(!parsed.matches(11));
    }

    #[test]
    fn units_are_powers_of_thousand() {
        assert_eq!(SizeSpec::parse("1K").unwrap().bytes(), 1_000.0);
        assert_eq!(SizeSpec::parse("2m").unwrap().bytes(), 2_000_000.0);
        assert_eq!(SizeSpec::parse("3GB").unwrap().bytes(), 3_000_000_000.0);
        assert_eq!(SizeSpec::parse("4 kb").unwrap().bytes(), 4_000.0);
        assert_eq!(SizeSpec::parse("5B").unwrap().bytes(), 5.0);
    }

    #[test]
    fn fractional_thresholds_survive() {
        let spec = SizeSpec::parse("<1.5K").unwrap();
        assert_eq!(spec.bytes(), 1_500.0);
        assert!(spec.matches(1_499));
        assert!(!spec.matches(1_500));

        let odd = SizeSpec::parse("=10.5").unwrap();
        assert!(!odd.matches(10));
        assert!(!odd.matches(11));
    }

    #[test]
    fn every_operator_spelling_is_accepted() {
        for (text, comparison) in [
            (">1", Comparison::Greater),
            (">= 1", Comparison::GreaterOrEqual),
            ("<1", Comparison::Less),
            ("<=1", Comparison::LessOrEqual),
            ("=1", Comparison::Equal),
            ("==1", Comparison::Equal),
            ("!1", Comparison::NotEqual),
            ("!=1", Comparison::NotEqual),
            ("<>1", Comparison::NotEqual),
        ] {
            assert_eq!(SizeSpec::parse(text).unwrap().comparison(), comparison);
        }
    }

    #[test]
    fn malformed_size_predicates_are_rejected() {
        for text in ["", ">", "ten", "10T", "=>10", "1..2", "10 K B", "-5"] {
            assert!(
                matches!(SizeSpec::parse(text), Err(FilterError::InvalidSizePredicate(_))),
                "{text:?} should be rejected"
            );
        }
    }

    #[test]
    fn explicit_size_operator_is_validated() {
        assert!(matches!(
            SizeSpec::new("~", 1),
            Err(FilterError::UnknownOperator(op)) if op == "~"
        ));
    }

    #[test]
    fn date_predicate_defaults_to_equality() {
        let spec = DateSpec::parse("1000000000").unwrap();
        assert_eq!(spec.comparison(), Comparison::Equal);
        assert!(spec.matches(1_000_000_000));
    }

    #[test]
    fn date_predicate_with_operator() {
        let spec = DateSpec::parse(">=2001-09-09T01:46:40Z").unwrap();
        assert_eq!(spec.comparison(), Comparison::GreaterOrEqual);
        assert!(spec.matches(1_000_000_000));
        assert!(!spec.matches(999_999_999));
    }

    #[test]
    fn date_predicate_accepts_every_negated_operator() {
        for text in [
            "<>2001-09-09T01:46:40Z",
            "<> 2001-09-09T01:46:40Z",
            "!= 2001-09-09T01:46:40Z",
            "!2001-09-09T01:46:40Z",
        ] {
            let spec = DateSpec::parse(text).unwrap();
            assert_eq!(spec.comparison(), Comparison::NotEqual, "{text:?}");
            assert_eq!(spec.timestamp(), 1_000_000_000, "{text:?}");
            assert!(!spec.matches(1_000_000_000));
            assert!(spec.matches(1_000_000_001));
        }
    }

    #[test]
    fn size_predicate_accepts_every_negated_operator() {
        for text in ["<>10", "<> 10", "!=10", "!10"] {
            let spec = SizeSpec::parse(text).unwrap();
            assert_eq!(spec.comparison(), Comparison::NotEqual, "{text:?}");
            assert!(!spec.matches(10));
            assert!(spec.matches(11));
        }
    }

    #[test]
    fn date_predicate_reports_unparseable_dates() {
        assert!(matches!(
            DateSpec::parse("> whenever"),
            Err(FilterError::InvalidDate(_))
        ));
        assert!(matches!(
            DateSpec::parse(""),
            Err(FilterError::InvalidDatePredicate(_))
        ));
    }

    #[test]
    fn explicit_date_form_matches_string_form() {
        let explicit = DateSpec::new("<", "2001-09-09T01:46:40Z").unwrap();
        let parsed = DateSpec::parse("<2001-09-09T01:46:40Z").unwrap();
        assert_eq!(explicit, parsed);
        assert_eq!(DateSpec::at("<", 1_000_000_000).unwrap(), parsed);
    }
}
