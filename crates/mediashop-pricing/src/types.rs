//! # Domain Types
//!
//! Value types flowing through the pricing pipeline.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Pricing Types                                   │
//! │                                                                         │
//! │  INPUTS                                   OUTPUTS                       │
//! │  ┌─────────────────┐  ┌────────────────┐  ┌──────────────────────┐     │
//! │  │  CartLineItem   │  │ShippingAddress │  │  PriceCalculation    │     │
//! │  │  ─────────────  │  │ ─────────────  │  │  ──────────────────  │     │
//! │  │  title          │  │ city           │  │  subtotal            │     │
//! │  │  quantity       │  │ full_name ...  │  │  shipping_cost       │     │
//! │  │  unit_price     │  └────────────────┘  │  rush_surcharge      │     │
//! │  │  rush_eligible? │                      │  tax_amount / total  │     │
//! │  └─────────────────┘                      └──────────────────────┘     │
//! │                                                                         │
//! │  ┌──────────────────────┐  ┌─────────────┐  ┌──────────────────────┐   │
//! │  │PriceCalculatorConfig │  │   TaxRate   │  │ RushOrderValidation  │   │
//! │  │ threshold, shipping  │  │ 0.08 = 8%   │  │ ProductRushCheck     │   │
//! │  │ tax, rush per item   │  └─────────────┘  └──────────────────────┘   │
//! │  └──────────────────────┘                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every type here is a plain value: no identity, no persistence, no
//! interior mutability. Wire names are camelCase to match the storefront.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use ts_rs::TS;

use crate::money::Money;
use crate::{
    DEFAULT_FREE_SHIPPING_THRESHOLD_CENTS, DEFAULT_RUSH_SURCHARGE_PER_ITEM_CENTS,
    DEFAULT_STANDARD_SHIPPING_CENTS, DEFAULT_TAX_RATE_BPS,
};

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate as a decimal fraction (`0.08` = 8%).
///
/// ## Why a Fraction?
/// The storefront configures rates as fractions. Basis points are still
/// accepted for callers that store rates as integers (800 bps = 8%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(#[ts(type = "string")] Decimal);

impl TaxRate {
    /// Creates a tax rate from a decimal fraction.
    #[inline]
    pub const fn from_fraction(fraction: Decimal) -> Self {
        TaxRate(fraction)
    }

    /// Creates a tax rate from basis points (1 bps = 0.01%).
    #[inline]
    pub fn from_bps(bps: u32) -> Self {
        TaxRate(Decimal::new(i64::from(bps), 4))
    }

    /// Creates a tax rate from a percentage (`8.25` = 8.25%).
    pub fn from_percentage(pct: Decimal) -> Self {
        TaxRate(pct / Decimal::ONE_HUNDRED)
    }

    /// Returns the rate as a fraction.
    #[inline]
    pub const fn fraction(&self) -> Decimal {
        self.0
    }

    /// Returns the rate as a percentage (for display).
    #[inline]
    pub fn percentage(&self) -> Decimal {
        self.0.saturating_mul(Decimal::ONE_HUNDRED)
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(Decimal::ZERO)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Cart Line Item
// =============================================================================

/// One priced line of a cart or order-in-progress.
///
/// ## Price-at-Add
/// `unit_price` is the catalog price captured when the line entered the
/// cart. It is never re-read from the catalog afterwards.
///
/// ## Rush Eligibility
/// `rush_eligible` is tri-state. `None` comes from data written before rush
/// delivery existed and counts as ELIGIBLE. Only `Some(false)` excludes a
/// line from rush delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLineItem {
    /// Catalog identifier, carried for callers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub product_id: Option<String>,

    /// Display title, used to name lines that block rush delivery.
    #[serde(default)]
    pub title: String,

    /// Quantity; zero contributes nothing.
    pub quantity: u32,

    /// Unit price at time of adding (frozen).
    #[serde(rename = "priceAtAdd")]
    pub unit_price: Money,

    /// Rush delivery flag; missing means eligible.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub rush_eligible: Option<bool>,
}

impl CartLineItem {
    /// Creates a line with no product id and no rush flag.
    pub fn new(title: impl Into<String>, quantity: u32, unit_price: Money) -> Self {
        CartLineItem {
            product_id: None,
            title: title.into(),
            quantity,
            unit_price,
            rush_eligible: None,
        }
    }

    /// Sets the catalog identifier.
    pub fn with_product_id(mut self, product_id: impl Into<String>) -> Self {
        self.product_id = Some(product_id.into());
        self
    }

    /// Sets the rush eligibility flag explicitly.
    pub fn with_rush_eligible(mut self, eligible: bool) -> Self {
        self.rush_eligible = Some(eligible);
        self
    }

    /// Unrounded line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Shipping Address
// =============================================================================

/// Delivery address. Only `city` matters for pricing.
///
/// A `city` that is missing, `null`, or not a string deserializes as `None`
/// rather than failing; such an address is never rush-eligible.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ShippingAddress {
    #[serde(default, deserialize_with = "lenient_string")]
    pub city: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub full_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub address_line1: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub state: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub country: Option<String>,
}

impl ShippingAddress {
    /// Creates an address with only a city.
    pub fn in_city(city: impl Into<String>) -> Self {
        ShippingAddress {
            city: Some(city.into()),
            ..ShippingAddress::default()
        }
    }

    /// Returns the city, if one was given.
    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }
}

/// Accepts any JSON value; keeps it only when it is a string.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}

// =============================================================================
// Catalog Product (rush view)
// =============================================================================

/// The part of a catalog product relevant to rush reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductRushInfo {
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub rush_eligible: Option<bool>,
}

impl ProductRushInfo {
    pub fn new(title: impl Into<String>, rush_eligible: Option<bool>) -> Self {
        ProductRushInfo {
            title: title.into(),
            rush_eligible,
        }
    }
}

// =============================================================================
// Price Calculator Configuration
// =============================================================================

/// Tunable pricing parameters.
///
/// ## Immutability
/// Fields are private. A configuration is built once (usually
/// [`PriceCalculatorConfig::default`]) and passed by reference into every
/// pricing call; variants are derived with the `with_*` methods, which
/// return a NEW value and leave the original untouched.
///
/// ## Defaults
/// ```text
/// free shipping threshold   $50.00
/// standard shipping         $2.99
/// tax rate                  8%
/// rush surcharge            $4.00 per item
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PriceCalculatorConfig {
    free_shipping_threshold: Money,
    standard_shipping_cost: Money,
    tax_rate: TaxRate,
    rush_surcharge_per_item: Money,
}

impl PriceCalculatorConfig {
    pub fn new(
        free_shipping_threshold: Money,
        standard_shipping_cost: Money,
        tax_rate: TaxRate,
        rush_surcharge_per_item: Money,
    ) -> Self {
        PriceCalculatorConfig {
            free_shipping_threshold,
            standard_shipping_cost,
            tax_rate,
            rush_surcharge_per_item,
        }
    }

    /// Subtotal at or above which shipping is free.
    #[inline]
    pub fn free_shipping_threshold(&self) -> Money {
        self.free_shipping_threshold
    }

    /// Flat shipping cost below the threshold.
    #[inline]
    pub fn standard_shipping_cost(&self) -> Money {
        self.standard_shipping_cost
    }

    /// Tax rate applied to the subtotal.
    #[inline]
    pub fn tax_rate(&self) -> TaxRate {
        self.tax_rate
    }

    /// Rush surcharge charged per unit.
    #[inline]
    pub fn rush_surcharge_per_item(&self) -> Money {
        self.rush_surcharge_per_item
    }

    pub fn with_free_shipping_threshold(self, threshold: Money) -> Self {
        PriceCalculatorConfig {
            free_shipping_threshold: threshold,
            ..self
        }
    }

    pub fn with_standard_shipping_cost(self, cost: Money) -> Self {
        PriceCalculatorConfig {
            standard_shipping_cost: cost,
            ..self
        }
    }

    pub fn with_tax_rate(self, tax_rate: TaxRate) -> Self {
        PriceCalculatorConfig { tax_rate, ..self }
    }

    pub fn with_rush_surcharge_per_item(self, surcharge: Money) -> Self {
        PriceCalculatorConfig {
            rush_surcharge_per_item: surcharge,
            ..self
        }
    }
}

impl Default for PriceCalculatorConfig {
    fn default() -> Self {
        PriceCalculatorConfig {
            free_shipping_threshold: Money::from_cents(DEFAULT_FREE_SHIPPING_THRESHOLD_CENTS),
            standard_shipping_cost: Money::from_cents(DEFAULT_STANDARD_SHIPPING_CENTS),
            tax_rate: TaxRate::from_bps(DEFAULT_TAX_RATE_BPS),
            rush_surcharge_per_item: Money::from_cents(DEFAULT_RUSH_SURCHARGE_PER_ITEM_CENTS),
        }
    }
}

// =============================================================================
// Price Calculation (order breakdown)
// =============================================================================

/// Priced order breakdown.
///
/// Every monetary field is already rounded to cents, and
/// `total == round(subtotal + shipping_cost + rush_surcharge + tax_amount)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PriceCalculation {
    pub subtotal: Money,
    pub shipping_cost: Money,
    pub rush_surcharge: Money,
    pub tax_amount: Money,
    pub total: Money,
    #[ts(type = "number")]
    pub total_items: u64,
}

// =============================================================================
// Rush Reports
// =============================================================================

/// Pre-flight rush delivery check for a cart and address.
///
/// Carries the reason instead of failing, so a checkout page can render
/// which items block rush delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct RushOrderValidation {
    pub can_rush_order: bool,
    pub address_valid: bool,
    /// Titles of explicitly ineligible lines, in cart order.
    pub ineligible_items: Vec<String>,
    pub message: String,
}

/// Rush eligibility summary for a product collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductRushCheck {
    pub all_eligible: bool,
    pub ineligible_products: Vec<String>,
    pub eligible_count: usize,
    pub total_count: usize,
}

// =============================================================================
// Unit Tests
// =============================================================================
