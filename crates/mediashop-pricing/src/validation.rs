//! # Validation Module
//!
//! Input validation for cart lines and pricing configuration.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Storefront (TypeScript)                                      │
//! │  └── Immediate user feedback on forms                                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Order service / quote tool (Rust)                            │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── THIS MODULE: business rule validation                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Pricing functions                                            │
//! │  └── Total: bad input degrades to zero, never panics                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The calculator does not call these; callers run them before pricing when
//! they want to reject bad input instead of pricing it.
//!
//! ## Usage
//! ```rust
//! use mediashop_pricing::validation::{validate_quantity, validate_config};
//! use mediashop_pricing::PriceCalculatorConfig;
//!
//! validate_quantity(5).unwrap();
//! validate_config(&PriceCalculatorConfig::default()).unwrap();
//! ```

use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{CartLineItem, PriceCalculatorConfig};
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY, MAX_UNIT_PRICE_CENTS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Maximum length of a product title.
pub const MAX_TITLE_LEN: usize = 200;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product title.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 200 characters
pub fn validate_title(title: &str) -> ValidationResult<()> {
    let title = title.trim();

    if title.is_empty() {
        return Err(ValidationError::Required {
            field: "title".to_string(),
        });
    }

    if title.chars().count() > MAX_TITLE_LEN {
        return Err(ValidationError::TooLong {
            field: "title".to_string(),
            max: MAX_TITLE_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity being added to a cart.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Cart: Add Item                                                         │
/// │                                                                         │
/// │  User enters quantity: 5                                               │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_quantity(5) ← THIS FUNCTION                                  │
/// │       │                                                                 │
/// │       ├── qty == 0?   → Error: "quantity must be positive"             │
/// │       ├── qty > 999?  → Error: "quantity must be between 1 and 999"    │
/// │       └── OK → Proceed with add_item                                   │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_quantity(qty: u32) -> ValidationResult<()> {
    if qty == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: "1".to_string(),
            max: MAX_ITEM_QUANTITY.to_string(),
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Zero is allowed (free items)
/// - At most MAX_UNIT_PRICE_CENTS ($1,000,000.00)
///
/// ## Example
/// ```rust
/// use mediashop_pricing::validation::validate_unit_price;
/// use mediashop_pricing::Money;
///
/// assert!(validate_unit_price(Money::from_cents(1099)).is_ok());
/// assert!(validate_unit_price(Money::zero()).is_ok());
/// assert!(validate_unit_price(Money::from_cents(-100)).is_err());
/// assert!(validate_unit_price(Money::from_cents(100_000_001)).is_err());
/// ```
pub fn validate_unit_price(price: Money) -> ValidationResult<()> {
    validate_non_negative("unit price", price)?;

    let max = Money::from_cents(MAX_UNIT_PRICE_CENTS);
    if price > max {
        return Err(ValidationError::OutOfRange {
            field: "unit price".to_string(),
            min: "0".to_string(),
            max: max.amount().to_string(),
        });
    }

    Ok(())
}

fn validate_non_negative(field: &str, amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates a cart snapshot before pricing.
///
/// ## Rules
/// - At most MAX_CART_ITEMS lines
/// - Every unit price between 0 and MAX_UNIT_PRICE_CENTS
/// - Every quantity at most MAX_ITEM_QUANTITY (zero is allowed here: a zero
///   line prices as nothing)
pub fn validate_line_items(items: &[CartLineItem]) -> ValidationResult<()> {
    if items.len() > MAX_CART_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "cart items".to_string(),
            min: "0".to_string(),
            max: MAX_CART_ITEMS.to_string(),
        });
    }

    for item in items {
        validate_unit_price(item.unit_price)?;

        if item.quantity > MAX_ITEM_QUANTITY {
            return Err(ValidationError::OutOfRange {
                field: "quantity".to_string(),
                min: "0".to_string(),
                max: MAX_ITEM_QUANTITY.to_string(),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Configuration Validators
// =============================================================================

/// Validates a pricing configuration.
///
/// ## Rules
/// - All money amounts non-negative
/// - Tax rate between 0 and 1 (0% to 100%)
pub fn validate_config(config: &PriceCalculatorConfig) -> ValidationResult<()> {
    validate_non_negative("free shipping threshold", config.free_shipping_threshold())?;
    validate_non_negative("standard shipping cost", config.standard_shipping_cost())?;
    validate_non_negative("rush surcharge per item", config.rush_surcharge_per_item())?;

    let rate = config.tax_rate().fraction();
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(ValidationError::OutOfRange {
            field: "tax rate".to_string(),
            min: "0".to_string(),
            max: "1".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
