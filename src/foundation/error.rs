/// Convenience result type used across Silhouette.
pub type SilhouetteResult<T> = Result<T, SilhouetteError>;

/// Top-level error taxonomy.
///
/// Out-of-range body metrics, missing optional fields and unknown lookups are never errors;
/// they are clamped, defaulted or reported through `Option`/`bool` returns instead.
#[derive(thiserror::Error, Debug)]
pub enum SilhouetteError {
    /// Invalid user-provided data that cannot be clamped or defaulted.
    #[error("validation error: {0}")]
    Validation(String),

    /// Malformed colour input (non-hex or wrong length).
    #[error("color error: {0}")]
    Color(String),

    /// Errors while rasterizing a drawing or composition.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SilhouetteError {
    /// Build a [`SilhouetteError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SilhouetteError::Color`] value.
    pub fn color(msg: impl Into<String>) -> Self {
        Self::Color(msg.into())
    }

    /// Build a [`SilhouetteError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`SilhouetteError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for SilhouetteError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
