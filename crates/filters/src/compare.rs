use std::fmt;
use std::str::FromStr;

use crate::FilterError;

/// Comparison operator accepted by size and date restrictions.
///
/// Parsed from `>`, `>=`, `<`, `<=`, `=`, `==`, `!`, `!=`, and `<>`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Comparison {
    /// `>`
    Greater,
    /// `>=`
    GreaterOrEqual,
    /// `<`
    Less,
    /// `<=`
    LessOrEqual,
    /// `=` or `==`
    #[default]
    Equal,
    /// `!`, `!=`, or `<>`
    NotEqual,
}

impl Comparison {
    /// Applies the operator to two already-normalised operands.
    #[must_use]
    pub fn evaluate<T: PartialOrd + ?Sized>(self, left: &T, right: &T) -> bool {
        match self {
            Self::Greater => left > right,
            Self::GreaterOrEqual => left >= right,
            Self::Less => left < right,
            Self::LessOrEqual => left <= right,
            Self::Equal => left == right,
            Self::NotEqual => left != right,
        }
    }

    /// Returns the canonical spelling of the operator.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Greater => ">",
            Self::GreaterOrEqual => ">=",
            Self::Less => "<",
            Self::LessOrEqual => "<=",
            Self::Equal => "=",
            Self::NotEqual => "!=",
        }
    }
}

impl FromStr for Comparison {
    type Err = FilterError;

    fn from_str(operator: &str) -> Result<Self, Self::Err> {
        match operator {
            ">" => Ok(Self::Greater),
            ">=" => Ok(Self::GreaterOrEqual),
            "<" => Ok(Self::Less),
            "<=" => Ok(Self::LessOrEqual),
            "=" | "==" => Ok(Self::Equal),
            "!" | "!=" | "<>" => Ok(Self::NotEqual),
            other => Err(FilterError::UnknownOperator(other.to_owned())),
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compares `left` against `right` using the textual `operator`.
///
/// Operands must already share one numeric representation; callers convert
/// sizes and timestamps before comparing.
///
/// # Examples
///
/// ```
/// use filters::compare;
///
/// assert!(compare(&10_000.0, ">=", &10_000.0).unwrap());
/// assert!(compare(&3_i64, "<>", &4_i64).unwrap());
/// assert!(compare(&1, "?", &1).is_err());
/// ```
pub fn compare<T: PartialOrd + ?Sized>(
    left: &T,
    operator: &str,
    right: &T,
) -> Result<bool, FilterError> {
    let comparison: Comparison = operator.parse()?;
    Ok(comparison.evaluate(left, right))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_supported_spelling() {
        let cases = [
            (">", Comparison::Greater),
            (">=", Comparison::GreaterOrEqual),
            ("<", Comparison::Less),
            ("<=", Comparison::LessOrEqual),
            ("=", Comparison::Equal),
            ("==", Comparison::Equal),
            ("!", Comparison::NotEqual),
            ("!=", Comparison::NotEqual),
            ("<>", Comparison::NotEqual),
        ];
        for (text, expected) in cases {
            assert_eq!(text.parse::<Comparison>().expect(text), expected);
        }
    }

    #[test]
    fn unknown_operator_is_named_in_error() {
        for operator in ["?", "=>", "", "lt"] {
            match compare(&1, operator, &2) {
                Err(FilterError::UnknownOperator(op)) => assert_eq!(op, operator),
                other => panic!("unexpected result for {operator:?}: {other:?}"),
            }
        }
    }

    #[test]
    fn evaluates_boundaries() {
        assert!(!compare(&5, ">", &5).unwrap());
        assert!(compare(&5, ">=", &5).unwrap());
        assert!(!compare(&5, "<", &5).unwrap());
        assert!(compare(&5, "<=", &5).unwrap());
        assert!(compare(&5, "==", &5).unwrap());
        assert!(!compare(&5, "!", &5).unwrap());
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for comparison in [
            Comparison::Greater,
            Comparison::GreaterOrEqual,
            Comparison::Less,
            Comparison::LessOrEqual,
            Comparison::Equal,
            Comparison::NotEqual,
        ] {
            assert_eq!(comparison.to_string().parse::<Comparison>().unwrap(), comparison);
        }
    }
}
