//! # API Error Type
//!
//! What a caller of the quote tool sees when a cart cannot be priced.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  mediashop-pricing                        quote tool output             │
//! │  ─────────────────                        ─────────────────             │
//! │                                                                         │
//! │  PricingError::RushAddressNotEligible ──► RUSH_NOT_AVAILABLE     (400) │
//! │  PricingError::RushItemsNotEligible   ──► RUSH_ITEMS_INELIGIBLE  (400) │
//! │  ValidationError                      ──► VALIDATION_ERROR       (400) │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The library message is passed through unchanged; clients match on it.

use mediashop_pricing::{PricingError, ValidationError};
use serde::Serialize;

/// Error payload written to stdout when a quote fails.
///
/// ```json
/// {
///   "code": "RUSH_ITEMS_INELIGIBLE",
///   "status": 400,
///   "message": "Some items are not eligible for rush delivery",
///   "ineligibleItems": ["Regular DVD"]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// HTTP-equivalent status, for callers that forward the payload
    pub status: u16,

    /// Human-readable error message for display
    pub message: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ineligible_items: Vec<String>,
}

/// Error codes for quote responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Rush requested outside Hanoi (400)
    RushNotAvailable,

    /// Rush requested with ineligible items (400)
    RushItemsIneligible,

    /// Input validation failed (400)
    ValidationError,
}

impl ApiError {
    /// Creates a new 400-class API error.
    pub fn bad_request(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            status: 400,
            message: message.into(),
            ineligible_items: Vec::new(),
        }
    }
}

impl From<PricingError> for ApiError {
    fn from(err: PricingError) -> Self {
        let message = err.to_string();
        match err {
            PricingError::RushAddressNotEligible { .. } => {
                ApiError::bad_request(ErrorCode::RushNotAvailable, message)
            }
            PricingError::RushItemsNotEligible { items } => ApiError {
                ineligible_items: items,
                ..ApiError::bad_request(ErrorCode::RushItemsIneligible, message)
            },
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::bad_request(ErrorCode::ValidationError, err.to_string())
    }
}
