/// Convenience result type used across lifegrid.
pub type LifegridResult<T> = Result<T, LifegridError>;

/// Top-level error taxonomy used by the compositor APIs.
///
/// Malformed habit/goal/reminder records never show up here: they are normalized to neutral
/// values while parsing so that one bad record cannot blank a whole wallpaper.
#[derive(thiserror::Error, Debug)]
pub enum LifegridError {
    /// Invalid caller-provided configuration (canvas size, input file shape).
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors raised by a drawing backend while painting or reading back pixels.
    #[error("render error: {0}")]
    Render(String),

    /// Errors while loading or registering font data.
    #[error("font error: {0}")]
    Font(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LifegridError {
    /// Build a [`LifegridError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`LifegridError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`LifegridError::Font`] value.
    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    /// Build a [`LifegridError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
