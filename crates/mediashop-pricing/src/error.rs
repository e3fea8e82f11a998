//! # Error Types
//!
//! Domain-specific error types for mediashop-pricing.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  PricingError     - a rush surcharge was requested for an order that   │
//! │                     may not be rushed (stops the money computation)    │
//! │  CartError        - cart operation rejected                            │
//! │  ValidationError  - input failed a pre-flight check                    │
//! │                                                                         │
//! │  NOT errors: RushOrderValidation / ProductRushCheck are REPORTS.       │
//! │  A checkout page asks "may I rush?" and renders the answer; only the   │
//! │  surcharge calculation refuses to continue.                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Pricing messages are part of the public contract; callers match them
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Pricing Error
// =============================================================================

/// Errors raised while pricing an order.
///
/// ## Caller Contract
/// The order service translates both variants into a 400-class response.
/// The two messages are stable and must not be reworded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    /// Rush delivery requested for a city other than Hanoi.
    #[error("Rush delivery is only available in Hanoi")]
    RushAddressNotEligible {
        /// The city as given, if any.
        city: Option<String>,
    },

    /// Rush delivery requested with at least one explicitly ineligible line.
    #[error("Some items are not eligible for rush delivery")]
    RushItemsNotEligible {
        /// Titles of the offending lines, in cart order.
        items: Vec<String>,
    },
}

// =============================================================================
// Cart Error
// =============================================================================

/// Cart operation errors.
///
/// ## User Workflow
/// ```text
/// Add to Cart (qty: 5)
///      │
///      ▼
/// Check stock: available=3
///      │
///      ▼
/// InsufficientStock { title: "Dune", available: 3, requested: 5 }
///      │
///      ▼
/// UI shows: "Not enough stock for Dune"
/// ```
#[derive(Debug, Error)]
pub enum CartError {
    /// No cart line for this product.
    #[error("Product {0} not in cart")]
    ItemNotFound(String),

    #[error("Not enough stock for {title}: available {available}, requested {requested}")]
    InsufficientStock {
        title: String,
        available: u32,
        requested: u32,
    },

    /// Cart has exceeded maximum allowed lines.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Line quantity exceeds maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: u32, max: u32 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: String,
        min: String,
        max: String,
    },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result of a pricing computation.
pub type PricingResult<T> = Result<T, PricingError>;

/// Result of a cart operation.
pub type CartResult<T> = Result<T, CartError>;

// =============================================================================
// Unit Tests
// =============================================================================
