//! # Rush Eligibility Reports
//!
//! Pre-flight checks for rush delivery. These functions NEVER fail: they
//! return a report the checkout page can render ("these two CDs cannot be
//! rushed"). The money path in [`crate::calculator`] enforces the same rules
//! by returning an error instead.
//!
//! ## Decision Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  validate_rush_order(items, address)                                    │
//! │                                                                         │
//! │  address is Hanoi? ── no ──► can_rush=false, address_valid=false        │
//! │        │                                                                │
//! │       yes                                                               │
//! │        ▼                                                                │
//! │  any item flagged false? ── yes ──► can_rush=false, names listed        │
//! │        │                                                                │
//! │        no (missing flag = eligible)                                     │
//! │        ▼                                                                │
//! │  can_rush=true                                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::address::is_address_rush_eligible;
use crate::types::{
    CartLineItem, ProductRushCheck, ProductRushInfo, RushOrderValidation, ShippingAddress,
};

const ADDRESS_NOT_ELIGIBLE_MESSAGE: &str =
    "Rush delivery is only available in Hanoi. Please check your shipping address.";

const ALL_ELIGIBLE_MESSAGE: &str = "All items are eligible for rush delivery to your address.";

// =============================================================================
// Rush Candidate
// =============================================================================

/// Anything that can be checked for rush eligibility: a cart line or a
/// catalog product.
pub trait RushCandidate {
    /// Title shown when the candidate blocks rush delivery.
    fn title(&self) -> &str;

    /// Tri-state flag. `None` counts as eligible.
    fn rush_flag(&self) -> Option<bool>;

    /// `false` only for an explicit `Some(false)`.
    fn is_rush_eligible(&self) -> bool {
        self.rush_flag() != Some(false)
    }
}

impl RushCandidate for CartLineItem {
    fn title(&self) -> &str {
        &self.title
    }

    fn rush_flag(&self) -> Option<bool> {
        self.rush_eligible
    }
}

impl RushCandidate for ProductRushInfo {
    fn title(&self) -> &str {
        &self.title
    }

    fn rush_flag(&self) -> Option<bool> {
        self.rush_eligible
    }
}

impl<T: RushCandidate + ?Sized> RushCandidate for &T {
    fn title(&self) -> &str {
        (**self).title()
    }

    fn rush_flag(&self) -> Option<bool> {
        (**self).rush_flag()
    }
}

/// Titles of explicitly ineligible candidates, in input order, duplicates kept.
pub(crate) fn ineligible_titles<T: RushCandidate>(candidates: &[T]) -> Vec<String> {
    candidates
        .iter()
        .filter(|c| !c.is_rush_eligible())
        .map(|c| c.title().to_string())
        .collect()
}

// =============================================================================
// Order Validation
// =============================================================================

/// Checks whether a cart may be delivered by rush to `address`.
///
/// ## Example
/// ```rust
/// use mediashop_pricing::{validate_rush_order, CartLineItem, Money, ShippingAddress};
///
/// let items = vec![
///     CartLineItem::new("Regular DVD", 1, Money::from_cents(1200)).with_rush_eligible(false),
/// ];
/// let report = validate_rush_order(&items, &ShippingAddress::in_city("Hanoi"));
///
/// assert!(!report.can_rush_order);
/// assert!(report.address_valid);
/// assert_eq!(report.ineligible_items, vec!["Regular DVD"]);
/// ```
pub fn validate_rush_order<T: RushCandidate>(
    items: &[T],
    address: &ShippingAddress,
) -> RushOrderValidation {
    if !is_address_rush_eligible(address) {
        return RushOrderValidation {
            can_rush_order: false,
            address_valid: false,
            ineligible_items: Vec::new(),
            message: ADDRESS_NOT_ELIGIBLE_MESSAGE.to_string(),
        };
    }

    let ineligible_items = ineligible_titles(items);
    if !ineligible_items.is_empty() {
        let message = format!(
            "Some items are not eligible for rush delivery: {}. Please remove these items or choose regular delivery.",
            ineligible_items.join(", ")
        );
        return RushOrderValidation {
            can_rush_order: false,
            address_valid: true,
            ineligible_items,
            message,
        };
    }

    RushOrderValidation {
        can_rush_order: true,
        address_valid: true,
        ineligible_items: Vec::new(),
        message: ALL_ELIGIBLE_MESSAGE.to_string(),
    }
}

// =============================================================================
// Collection Check
// =============================================================================

/// Summarizes rush eligibility of a product collection, independent of any
/// address.
pub fn check_products_rush_eligible<T: RushCandidate>(products: &[T]) -> ProductRushCheck {
    let ineligible_products = ineligible_titles(products);
    let total_count = products.len();

    ProductRushCheck {
        all_eligible: ineligible_products.is_empty(),
        eligible_count: total_count - ineligible_products.len(),
        total_count,
        ineligible_products,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
