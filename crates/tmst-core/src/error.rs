//! Error types shared by every analysis stage.

use thiserror::Error;

/// Errors raised by the modulation analyses and their collaborators.
#[derive(Debug, Error)]
pub enum TmstError {
    /// Signal or sample rate has the wrong shape or is not a usable number.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A rate, frequency range, count or window parameter is out of range.
    #[error("invalid range: {0}")]
    InvalidRange(String),

    /// A collaborator (filterbank, pitch tracker, spectral estimator) failed.
    #[error("{stage} failed: {source}")]
    Collaborator {
        /// Pipeline stage that produced the failure.
        stage: &'static str,
        /// Underlying error reported by the collaborator.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl TmstError {
    /// Create an invalid input error.
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        TmstError::InvalidInput(reason.into())
    }

    /// Create an invalid range error.
    pub fn invalid_range(reason: impl Into<String>) -> Self {
        TmstError::InvalidRange(reason.into())
    }

    /// Wrap an error reported by an external collaborator.
    pub fn collaborator(
        stage: &'static str,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        TmstError::Collaborator {
            stage,
            source: source.into(),
        }
    }

    /// True for [`TmstError::InvalidInput`].
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, TmstError::InvalidInput(_))
    }

    /// True for [`TmstError::InvalidRange`].
    pub fn is_invalid_range(&self) -> bool {
        matches!(self, TmstError::InvalidRange(_))
    }
}

/// Result alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, TmstError>;
