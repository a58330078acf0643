/// Convenience result type used across scrollstack.
pub type SequencerResult<T> = Result<T, SequencerError>;

/// Error taxonomy for authoring-time failures.
///
/// Runtime anomalies (unmeasured layout, missing card handles, out-of-range lookups) are never
/// reported through this type; they degrade to a static layout instead.
#[derive(thiserror::Error, Debug)]
pub enum SequencerError {
    /// Invalid configuration values.
    #[error("validation error: {0}")]
    Validation(String),

    /// A choreography whose chaining does not form a single contiguous chain.
    #[error("choreography error: {0}")]
    Choreography(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SequencerError {
    /// Build a [`SequencerError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SequencerError::Choreography`] value.
    pub fn choreography(msg: impl Into<String>) -> Self {
        Self::Choreography(msg.into())
    }

    /// Build a [`SequencerError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
