//! Error types for the autosave runtime.

/// Top-level error type for the autosave and self-update system.
#[derive(Debug, thiserror::Error)]
pub enum AutosaveError {
    /// A settings value is outside its allowed range.
    #[error("config error: {0}")]
    Config(String),

    /// Preference store read/write error.
    #[error("prefs error: {0}")]
    Prefs(String),

    /// Network error during a version check or payload download.
    #[error("network error: {0}")]
    Network(String),

    /// Self-update error (staging, verification, artifact replacement).
    #[error("update error: {0}")]
    Update(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, AutosaveError>;
