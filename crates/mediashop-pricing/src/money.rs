//! # Money Module
//!
//! Provides the `Money` type for handling USD amounts exactly.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │    (1.005).toFixed(2) = "1.00"      ❌ rounds the wrong way            │
//! │                                                                         │
//! │  OUR SOLUTION: base-10 Decimal                                          │
//! │    1.005 is stored as 1005 × 10^-3, so rounding is exact               │
//! │    Server and storefront run the SAME code and get the SAME cents      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Prices may carry more than two decimal places (e.g. a price converted from
//! another currency). Every pricing step rounds its own result back to cents
//! with [`Money::round_cents`], which also pads to exactly two places, so the
//! wire form of a result is always `"60.00"`, never `"60"`.
//!
//! ## Range
//! Arithmetic saturates at `Decimal::MAX`/`Decimal::MIN` (about ±7.9 × 10^28)
//! instead of panicking. Amounts that large cannot keep two decimal places;
//! callers that accept outside input bound it first with
//! [`validate_unit_price`](crate::validation::validate_unit_price).
//!
//! ## Usage
//! ```rust
//! use mediashop_pricing::money::Money;
//!
//! let price = Money::from_cents(1099); // $10.99
//! let line = price.multiply_quantity(3);
//! assert_eq!(line, Money::from_cents(3297));
//! assert_eq!(line.to_string(), "$32.97");
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::TaxRate;

/// Number of decimal places every monetary result is rounded to.
pub const CENT_SCALE: u32 = 2;

// =============================================================================
// Money Type
// =============================================================================

/// A USD amount backed by an exact decimal.
///
/// ## Design Decisions
/// - **Decimal, not f64**: no binary rounding surprises
/// - **Signed**: negative values are representable, validation rejects them
///   where a price must be non-negative
/// - **Serialized as a string** (`"10.99"`) so no JSON client truncates it
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  CatalogProduct.price ──► CartLineItem.unit_price (price-at-add)        │
/// │                                   │                                     │
/// │                                   ▼                                     │
/// │  subtotal ──► shipping ──► rush surcharge ──► tax ──► total             │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(#[ts(type = "string")] Decimal);

impl Money {
    /// Wraps an exact decimal amount in dollars.
    #[inline]
    pub const fn from_decimal(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use mediashop_pricing::money::Money;
    ///
    /// let price = Money::from_cents(299);
    /// assert_eq!(price.to_string(), "$2.99");
    /// ```
    #[inline]
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, CENT_SCALE))
    }

    /// Returns the underlying decimal amount in dollars.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns the amount in whole cents, rounding half away from zero.
    ///
    /// `None` when the amount does not fit in an `i64`.
    pub fn to_cents(&self) -> Option<i64> {
        self.round_cents()
            .0
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|cents| cents.to_i64())
    }

    /// Returns zero money value (`0.00`).
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::from_parts(0, 0, 0, false, CENT_SCALE))
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Returns the absolute value.
    #[inline]
    pub fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Rounds to whole cents, half away from zero, at scale 2.
    ///
    /// ## Rounding Rule
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  HALF AWAY FROM ZERO (what a cashier does by hand)                  │
    /// │                                                                     │
    /// │    2.804  → 2.80                                                    │
    /// │    0.805  → 0.81                                                    │
    /// │   -0.805  → -0.81                                                   │
    /// │                                                                     │
    /// │  Each price component calls this on its OWN result; the total is   │
    /// │  the rounded sum of already-rounded components.                     │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    ///
    /// ## Example
    /// ```rust
    /// use mediashop_pricing::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let raw = Money::from_decimal(Decimal::new(805, 3)); // 0.805
    /// assert_eq!(raw.round_cents(), Money::from_cents(81));
    /// ```
    pub fn round_cents(&self) -> Money {
        let mut rounded = self
            .0
            .round_dp_with_strategy(CENT_SCALE, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(CENT_SCALE);
        Money(rounded)
    }

    /// Multiplies money by a quantity. No rounding.
    ///
    /// ## User Workflow
    /// ```text
    /// Product: "Dune" $10.00 (price at add)
    /// Quantity: 2
    ///      │
    ///      ▼
    /// multiply_quantity(2) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Line Total: $20.00
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, qty: u32) -> Self {
        self.multiply_units(u64::from(qty))
    }

    /// Multiplies money by a unit count, saturating at the decimal range.
    #[inline]
    pub fn multiply_units(&self, units: u64) -> Self {
        Money(self.0.saturating_mul(Decimal::from(units)))
    }

    /// Applies a tax rate and returns the UNROUNDED tax amount.
    ///
    /// Callers round with [`Money::round_cents`]; keeping the two steps apart
    /// lets the calculator control exactly where rounding happens.
    ///
    /// ## Example
    /// ```rust
    /// use mediashop_pricing::money::Money;
    /// use mediashop_pricing::types::TaxRate;
    ///
    /// let subtotal = Money::from_cents(3500); // $35.00
    /// let tax = subtotal.apply_rate(TaxRate::from_bps(800)).round_cents();
    /// assert_eq!(tax, Money::from_cents(280)); // $2.80
    /// ```
    #[inline]
    pub fn apply_rate(&self, rate: TaxRate) -> Money {
        Money(self.0.saturating_mul(rate.fraction()))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Formats as `en-US` currency: `$1,234.50`, `-$5.50`.
///
/// The amount is rounded to cents for display only; the stored value is
/// untouched.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self.round_cents().0;
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        let digits = format!("{:.2}", rounded.abs());
        let (whole, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, ch) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        write!(f, "{}${}.{}", sign, grouped, fraction)
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

/// Multiplication by a quantity.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
