use filters::FilterError;
use walk::WalkError;

/// Error type for query construction and execution.
#[derive(Debug, thiserror::Error)]
pub enum FinderError {
    /// `from` or `within` was called on a query that already has roots.
    #[error("directory to search has already been specified")]
    PathsAlreadySet,

    /// Results were requested before any root was configured.
    #[error("call within() or from() to specify directory to search")]
    NoPaths,

    /// A mask, size or date restriction was rejected.
    #[error(transparent)]
    Filter(#[from] FilterError),

    /// The filesystem walk failed.
    #[error(transparent)]
    Walk(#[from] WalkError),

    /// A depth limit below `-1` was requested.
    #[error("invalid depth limit {0}: expected -1 for unlimited or a non-negative level count")]
    InvalidDepth(i32),

    /// No extension method is registered under this name.
    #[error("call to undefined extension method '{0}'")]
    UnknownExtension(String),
}

impl FinderError {
    /// Reports whether the query was used out of order.
    #[must_use]
    pub const fn is_invalid_state(&self) -> bool {
        matches!(self, Self::PathsAlreadySet | Self::NoPaths)
    }

    /// Reports whether a caller-supplied value was rejected.
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Self::Filter(_) | Self::InvalidDepth(_) | Self::UnknownExtension(_)
        )
    }
}
