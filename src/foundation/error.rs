/// Convenience result type used across pulsator.
pub type PulsatorResult<T> = Result<T, PulsatorError>;

/// Top-level error taxonomy used by pulsator APIs.
#[derive(thiserror::Error, Debug)]
pub enum PulsatorError {
    /// Invalid caller-provided configuration (negative count/duration, malformed color, ...).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Failure reported by a host collaborator (container, clock or surface).
    #[error("host error: {0}")]
    Host(String),

    /// Errors while rasterizing rings into a frame.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PulsatorError {
    /// Build a [`PulsatorError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`PulsatorError::Host`] value.
    pub fn host(msg: impl Into<String>) -> Self {
        Self::Host(msg.into())
    }

    /// Build a [`PulsatorError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`PulsatorError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Return `true` for [`PulsatorError::Configuration`].
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

impl From<serde_json::Error> for PulsatorError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
