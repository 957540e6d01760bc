//! # Error Types
//!
//! What can go wrong while registering a customer or assembling a bill.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  roomrent-core errors (this file)                                      │
//! │  ├── CoreError        - Empty-state and session errors                 │
//! │  └── ValidationError  - Malformed or missing field input               │
//! │                                                                         │
//! │  roomrent-store errors (separate crate)                                │
//! │  └── StoreError       - File I/O with path and operation context       │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → CLI message          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every validation variant carries the name of the offending field, so the
//! message printed by the desk tells the operator which input to correct.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Business-level conditions that stop a bill from being assembled.
///
/// None of these are system faults: they guide the operator to the missing
/// step (register a customer, pick one, add a room).
#[derive(Debug, Error)]
pub enum CoreError {
    /// The customer store is empty, so there is nobody to bill.
    #[error("No customers registered yet. Please add customers first")]
    NoCustomersRegistered,

    /// No customer with the given identifier.
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    /// A room was added or a bill generated before choosing a customer.
    #[error("Please select a customer first")]
    CustomerNotSelected,

    /// Bill generation with an empty booking list.
    #[error("Please add at least one room")]
    NoBookings,

    /// Booking list is full.
    #[error("A bill cannot have more than {max} rooms")]
    TooManyBookings { max: usize },

    /// A field failed validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Rejected operator input.
///
/// Raised before anything is mutated, so a rejected input never leaves
/// partial state behind.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Blank after trimming.
    #[error("{field} is required")]
    Required { field: String },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Counts such as adults, where zero makes no sense.
    #[error("{field} must be at least 1")]
    MustBePositive { field: String },

    /// Text that does not parse as a rate, date or phone number.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Outside a fixed vocabulary (room types, ID types, photo extensions).
    #[error("{field} must be one of: {}", allowed.join(", "))]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Stay ends before it starts.
    #[error("end date {end} must not be before start date {start}")]
    DateOrder { start: String, end: String },
}

impl ValidationError {
    /// Shorthand for [`ValidationError::Required`].
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    /// Shorthand for [`ValidationError::InvalidFormat`].
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Result of a core operation.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
