use thiserror::Error;

/// Error produced when a mask, predicate string, or operator is rejected.
///
/// Every variant is raised synchronously by the call that received the bad
/// input, before any filesystem access takes place.
#[derive(Debug, Error)]
pub enum FilterError {
    /// The regular expression built from one or more masks failed to compile.
    #[error("failed to compile mask '{mask}': {source}")]
    InvalidMask {
        /// The masks that produced the expression, joined with `, `.
        mask: String,
        /// Underlying compilation failure.
        #[source]
        source: Box<regex::Error>,
    },

    /// A single-string size predicate did not follow `[operator] number[unit]`.
    #[error("invalid size predicate format: '{0}'")]
    InvalidSizePredicate(String),

    /// A single-string date predicate did not follow `[operator] date`.
    #[error("invalid date predicate format: '{0}'")]
    InvalidDatePredicate(String),

    /// The date operand could not be resolved to a timestamp.
    #[error("unable to resolve date '{0}'")]
    InvalidDate(String),

    /// A comparison operator outside the supported set.
    #[error("unknown operator '{0}'")]
    UnknownOperator(String),
}

impl FilterError {
    pub(crate) fn invalid_mask(mask: String, source: regex::Error) -> Self {
        Self::InvalidMask {
            mask,
            source: Box::new(source),
        }
    }
}
