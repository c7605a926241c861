//! Identity provider error types.

/// Identity provider error.
#[derive(Debug, thiserror::Error)]
pub enum IdpError {
    /// No provider is registered under this name.
    #[error("unknown identity provider: {0}")]
    UnknownProvider(String),

    /// Provider settings are missing or invalid.
    #[error("identity provider config: {0}")]
    Config(String),

    /// Backend error (directory service, network, etc.).
    #[error("backend error: {0}")]
    Backend(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl IdpError {
    /// Create a backend error from any error type.
    #[inline]
    pub fn backend<E: std::fmt::Display>(err: E) -> Self {
        Self::Backend(err.to_string())
    }
}
