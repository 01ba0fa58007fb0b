/// Convenience result type used across cueplay.
pub type CueResult<T> = Result<T, CueError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Only boundary operations (parsing, repositories, configuration) return errors. Runtime
/// anomalies during playback (unknown actions, dangling references, ownership mismatches) are
/// logged and ignored instead.
#[derive(thiserror::Error, Debug)]
pub enum CueError {
    /// Invalid user-provided section, overlay or frame-config data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A record addressed by id does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Transient failure while fetching a section snapshot or catalog.
    #[error("load error: {0}")]
    Load(String),

    /// A playback surface failed to load or play its media.
    #[error("media error: {0}")]
    Media(String),

    /// Invalid engine options or missing configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CueError {
    /// Build a [`CueError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CueError::NotFound`] value.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Build a [`CueError::Load`] value.
    pub fn load(msg: impl Into<String>) -> Self {
        Self::Load(msg.into())
    }

    /// Build a [`CueError::Media`] value.
    pub fn media(msg: impl Into<String>) -> Self {
        Self::Media(msg.into())
    }

    /// Build a [`CueError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`CueError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Return `true` for failures a caller may retry (network-style fetch errors).
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Load(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
