/// Convenience result type used across deckfit.
pub type DeckfitResult<T> = Result<T, DeckfitError>;

/// Caller-visible failures.
///
/// Malformed payload data never produces one of these; it is repaired and
/// reported through [`crate::Diagnostic`] records instead. These variants cover
/// programming and configuration mistakes.
#[derive(thiserror::Error, Debug)]
pub enum DeckfitError {
    /// A schema or layout catalog is inconsistent, or was asked for something it does not hold.
    #[error("catalog error: {0}")]
    Catalog(String),

    /// Invalid caller-supplied configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DeckfitError {
    /// Build a [`DeckfitError::Catalog`] value.
    pub fn catalog(msg: impl Into<String>) -> Self {
        Self::Catalog(msg.into())
    }

    /// Build a [`DeckfitError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`DeckfitError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for DeckfitError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
