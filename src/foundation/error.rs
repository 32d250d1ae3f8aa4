use std::path::PathBuf;

/// Convenience result type used across cardstamp.
pub type StampResult<T> = Result<T, StampError>;

/// Top-level error taxonomy used by the loader, compositor and assembler.
#[derive(thiserror::Error, Debug)]
pub enum StampError {
    /// A required image (artwork or overlay) could not be located under any filename candidate.
    #[error("missing asset: {}", path.display())]
    MissingAsset {
        /// The first path that was tried.
        path: PathBuf,
    },

    /// Tabular metadata that cannot be interpreted (bad color identity, dangling front link).
    #[error("malformed metadata: {0}")]
    MalformedMetadata(String),

    /// Invalid caller-provided data (layer indices, configuration values).
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StampError {
    /// Build a [`StampError::MissingAsset`] value.
    pub fn missing_asset(path: impl Into<PathBuf>) -> Self {
        Self::MissingAsset { path: path.into() }
    }

    /// Build a [`StampError::MalformedMetadata`] value.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedMetadata(msg.into())
    }

    /// Build a [`StampError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
