//! Storage error types.

use thiserror::Error;

/// Errors that can occur when using the storage layer.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Failed to open the store.
    #[error("Failed to open store: {0}")]
    OpenError(String),

    /// Failed to serialize or deserialize a value.
    #[error("Serialization error: {0}")]
    SerializeError(#[from] serde_json::Error),

    /// A stored value is not valid text and cannot be decoded.
    #[error("Corrupt value: {0}")]
    CorruptValue(String),

    /// The backing store rejected a read or write.
    #[error("Store operation failed: {0}")]
    StoreError(String),

    /// The backing store is not available (disabled, read-only, out of quota).
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Filesystem error from a file-backed store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CacheError {
    /// True when the value was read but could not be decoded.
    ///
    /// Callers use this to tell a corrupt entry apart from a broken store.
    pub fn is_corrupt_value(&self) -> bool {
        match self {
            CacheError::SerializeError(e) => !e.is_io(),
            CacheError::CorruptValue(_) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corrupt_value_classification() {
        let parse = serde_json::from_str::<u32>("nope").unwrap_err();
        assert!(CacheError::from(parse).is_corrupt_value());
        assert!(CacheError::CorruptValue("bad utf-8".to_string()).is_corrupt_value());

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert!(!CacheError::from(io).is_corrupt_value());
        assert!(!CacheError::Unavailable("quota".to_string()).is_corrupt_value());
    }
}
