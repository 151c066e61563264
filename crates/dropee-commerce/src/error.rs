//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in storefront operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Duplicate product id in a catalog.
    #[error("Duplicate product id in catalog: {0}")]
    DuplicateProduct(String),

    /// Checkout attempted with nothing in the cart.
    #[error("Cannot check out an empty cart")]
    EmptyCart,

    /// Checkout incomplete.
    #[error("Checkout incomplete: missing {0}")]
    CheckoutIncomplete(String),

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Storage error.
    #[error("Storage error: {0}")]
    Storage(#[from] dropee_cache::CacheError),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Validation error.
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dropee_cache::CacheError;

    #[test]
    fn test_storage_error_converts() {
        let err: CommerceError = CacheError::Unavailable("quota exceeded".to_string()).into();
        assert!(matches!(err, CommerceError::Storage(_)));
        assert_eq!(err.to_string(), "Storage error: Store unavailable: quota exceeded");
    }

    #[test]
    fn test_json_error_converts() {
        let err: CommerceError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, CommerceError::SerializationError(_)));
    }
}
