//! Cache error types.

/// Cache store error.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// The URL names no supported store (or its feature is disabled).
    #[error("unsupported cache url: {0}")]
    UnsupportedUrl(String),

    /// Store connectivity or command error.
    #[error("cache backend error: {0}")]
    Backend(String),

    /// A cached value could not be encoded or decoded.
    #[error("cache codec error: {0}")]
    Codec(#[from] serde_json::Error),

    #[cfg(feature = "redis")]
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),
}

impl CacheError {
    /// Create a backend error from any error type.
    #[inline]
    pub fn backend<E: std::fmt::Display>(err: E) -> Self {
        Self::Backend(err.to_string())
    }
}
