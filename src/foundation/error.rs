/// Convenience result type used across adcomp.
pub type AdcompResult<T> = Result<T, AdcompError>;

/// Top-level error taxonomy used by compositing and animation APIs.
#[derive(thiserror::Error, Debug)]
pub enum AdcompError {
    /// A supplied image reference could not be loaded or decoded.
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// Sheet or frame dimensions are zero or otherwise unusable.
    #[error("degenerate dimensions: {0}")]
    DegenerateDimensions(String),

    /// Fewer frames were produced than the sprite grid requires.
    #[error("incomplete extraction: expected {expected} frames, got {got}")]
    IncompleteExtraction {
        /// Frame count required by the grid (`rows * cols`).
        expected: usize,
        /// Frame count actually produced.
        got: usize,
    },

    /// The GIF encoding step reported failure.
    #[error("animation encoding error: {0}")]
    AnimationEncoding(String),

    /// Invalid caller-provided configuration or arguments.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AdcompError {
    /// Build an [`AdcompError::InvalidImage`] value.
    pub fn invalid_image(msg: impl Into<String>) -> Self {
        Self::InvalidImage(msg.into())
    }

    /// Build an [`AdcompError::DegenerateDimensions`] value.
    pub fn degenerate(msg: impl Into<String>) -> Self {
        Self::DegenerateDimensions(msg.into())
    }

    /// Build an [`AdcompError::IncompleteExtraction`] value.
    pub fn incomplete(expected: usize, got: usize) -> Self {
        Self::IncompleteExtraction { expected, got }
    }

    /// Build an [`AdcompError::AnimationEncoding`] value.
    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::AnimationEncoding(msg.into())
    }

    /// Build an [`AdcompError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
