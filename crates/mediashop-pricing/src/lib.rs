//! # mediashop-pricing: Order Pricing for the Media Shop
//!
//! This crate is the **single source of truth** for order prices. The order
//! service uses it to compute the authoritative breakdown stored with an
//! order; the storefront uses the same engine (and the TypeScript types
//! generated from it) for the optimistic total shown at checkout.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Media Shop Architecture                           │
//! │                                                                         │
//! │  ┌──────────────────────────┐        ┌──────────────────────────────┐  │
//! │  │  Storefront (preview)    │        │  Order service (authority)   │  │
//! │  │  cart page, checkout     │        │  create order, persist total │  │
//! │  └────────────┬─────────────┘        └──────────────┬───────────────┘  │
//! │               │ bindings/*.ts                       │                  │
//! │  ┌────────────▼─────────────────────────────────────▼───────────────┐  │
//! │  │             ★ mediashop-pricing (THIS CRATE) ★                   │  │
//! │  │                                                                  │  │
//! │  │  address ──► rush ──► calculator ◄── cart                        │  │
//! │  │  (Hanoi?)    (who may   (subtotal, shipping,  (price-at-add      │  │
//! │  │               rush?)     surcharge, tax, total) line items)      │  │
//! │  │                                                                  │  │
//! │  │  NO I/O • NO CLOCK • NO GLOBAL STATE • PURE FUNCTIONS            │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Exact decimal `Money` with per-step cent rounding
//! - [`types`] - Line items, addresses, config, breakdown and report types
//! - [`address`] - Hanoi city classifier
//! - [`rush`] - Rush eligibility reports (never fail)
//! - [`calculator`] - Price components and the order total (rush errors)
//! - [`cart`] - Cart aggregate enforcing price-at-add
//! - [`validation`] - Opt-in input validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use mediashop_pricing::{
//!     calculate_order_total, CartLineItem, Money, PriceCalculatorConfig, ShippingAddress,
//! };
//!
//! let items = vec![
//!     CartLineItem::new("Dune", 2, Money::from_cents(1000)),
//!     CartLineItem::new("Abbey Road", 1, Money::from_cents(1500)),
//! ];
//! let config = PriceCalculatorConfig::default();
//! let hanoi = ShippingAddress::in_city("Hà Nội");
//!
//! let breakdown = calculate_order_total(&items, &config, true, Some(&hanoi)).unwrap();
//! assert_eq!(breakdown.total, Money::from_cents(5279)); // $52.79
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod address;
pub mod calculator;
pub mod cart;
pub mod error;
pub mod money;
pub mod rush;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use address::{is_address_rush_eligible, is_hanoi_city, is_rush_delivery_available};
pub use calculator::{
    calculate_order_total, calculate_rush_surcharge, calculate_shipping_cost,
    calculate_subtotal, calculate_tax_amount, calculate_total_items,
};
pub use cart::{Cart, CatalogProduct};
pub use error::{CartError, PricingError, ValidationError};
pub use money::Money;
pub use rush::{check_products_rush_eligible, validate_rush_order, RushCandidate};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default free-shipping threshold: $50.00.
pub const DEFAULT_FREE_SHIPPING_THRESHOLD_CENTS: i64 = 5_000;

/// Default standard shipping cost: $2.99.
pub const DEFAULT_STANDARD_SHIPPING_CENTS: i64 = 299;

/// Default tax rate: 8%.
pub const DEFAULT_TAX_RATE_BPS: u32 = 800;

/// Default rush surcharge: $4.00 per item.
pub const DEFAULT_RUSH_SURCHARGE_PER_ITEM_CENTS: i64 = 400;

/// Maximum unit price accepted from outside input: $1,000,000.00.
///
/// With at most 100 lines of 999 units each, every total stays far inside
/// the decimal range.
pub const MAX_UNIT_PRICE_CENTS: i64 = 100_000_000;

/// Maximum distinct lines allowed in a single cart.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single line.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_ITEM_QUANTITY: u32 = 999;
