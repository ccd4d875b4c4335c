//! # Error Types
//!
//! Domain-specific error types for ladle-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  ladle-core errors (this file)                                         │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  ladle-db errors (separate crate)                                      │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  HTTP API errors (in apps/server)                                      │
//! │  └── ApiError         - What clients see (serialized JSON)            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → ApiError → Client       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, id, value)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
/// They should be caught and translated to user-friendly messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A quantity fed to the pricing engine is below the domain minimum of 1.
    ///
    /// ## When This Occurs
    /// The draft layer ignores sub-1 quantity edits, so under normal
    /// operation this never fires. It exists as the engine's own floor
    /// against malformed intermediate state.
    #[error("{field} must be at least 1, got {value}")]
    InvalidQuantity { field: &'static str, value: i64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Rules run in a fixed order per entity and the first failure wins, so one
/// submission surfaces exactly one of these.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Invalid format (e.g., malformed email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., duplicate email, compared case-insensitively).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },

    /// Value must be zero or greater.
    #[error("{field} cannot be negative")]
    MustBeNonNegative { field: String },

    /// An order was submitted without selecting a company.
    #[error("select a company before submitting the order")]
    MissingCompany,

    /// An order item was submitted without a name.
    #[error("every order item needs a name (item {item_id} is blank)")]
    EmptyItemName { item_id: i64 },

    /// A delivery order was submitted without a delivery address.
    #[error("delivery address is required for delivery orders")]
    DeliveryAddressRequired,
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InvalidQuantity {
            field: "pack_count",
            value: 0,
        };
        assert_eq!(err.to_string(), "pack_count must be at least 1, got 0");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::Duplicate {
            field: "email".to_string(),
            value: "a@b.com".to_string(),
        };
        assert_eq!(err.to_string(), "email 'a@b.com' already exists");

        let err = ValidationError::DeliveryAddressRequired;
        assert_eq!(
            err.to_string(),
            "delivery address is required for delivery orders"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MissingCompany;
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
