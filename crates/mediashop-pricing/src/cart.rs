//! # Cart
//!
//! A shopping cart that freezes each line's price when it is first added.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Storefront Action        Cart Method            Effect                 │
//! │  ─────────────────        ───────────            ──────                 │
//! │                                                                         │
//! │  Add to cart ───────────► add_item() ──────────► push line (price      │
//! │                                                   frozen) or merge qty  │
//! │                                                                         │
//! │  Change quantity ───────► update_quantity() ───► qty = n (0 removes)    │
//! │                                                                         │
//! │  Untick for later ──────► set_selected() ──────► excluded from checkout │
//! │                                                                         │
//! │  Checkout page ─────────► quote() ─────────────► calculate_order_total │
//! │                           rush_check() ────────► validate_rush_order   │
//! │                                                                         │
//! │  NOTE: no operation ever rewrites a line's unit price.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart is plain data: the embedding application owns it and decides how
//! it is stored or shared.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::calculator::calculate_order_total;
use crate::error::{CartError, CartResult, PricingResult};
use crate::money::Money;
use crate::rush::validate_rush_order;
use crate::types::{
    CartLineItem, PriceCalculation, PriceCalculatorConfig, RushOrderValidation, ShippingAddress,
};
use crate::validation::{validate_quantity, validate_title, validate_unit_price};
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

// =============================================================================
// Catalog Product
// =============================================================================

/// The catalog entry as seen at the moment of adding to the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CatalogProduct {
    pub id: String,
    pub title: String,
    /// Current catalog price.
    pub price: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub rush_eligible: Option<bool>,
    /// Units in stock; `None` when stock is not tracked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub stock: Option<u32>,
}

impl CatalogProduct {
    /// Checks if `quantity` units can be sold.
    pub fn can_sell(&self, quantity: u32) -> bool {
        self.stock.map_or(true, |stock| stock >= quantity)
    }
}

// =============================================================================
// Cart Entry
// =============================================================================

/// One line in the cart.
///
/// ## Design Notes
/// - `line.unit_price` is frozen at add time (price-at-add)
/// - `selected` lines are the ones checked out; new lines start selected
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartEntry {
    #[serde(flatten)]
    pub line: CartLineItem,
    pub selected: bool,
}

impl CartEntry {
    fn product_id(&self) -> Option<&str> {
        self.line.product_id.as_deref()
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by product id (adding again increases quantity)
/// - Every line quantity is between 1 and 999
/// - At most 100 lines
/// - A line's unit price never changes after it is added
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Adds a product, or increases the quantity of its existing line.
    ///
    /// ## Price Freezing
    /// A new line captures `product.price`. Merging into an existing line
    /// keeps the price that line was created with, even if the catalog price
    /// has changed since.
    pub fn add_item(&mut self, product: &CatalogProduct, quantity: u32) -> CartResult<()> {
        validate_quantity(quantity)?;

        if let Some(entry) = self.find_mut(&product.id) {
            let new_qty = entry.line.quantity.saturating_add(quantity);
            if new_qty > MAX_ITEM_QUANTITY {
                return Err(CartError::QuantityTooLarge {
                    requested: new_qty,
                    max: MAX_ITEM_QUANTITY,
                });
            }
            if !product.can_sell(new_qty) {
                return Err(insufficient_stock(product, new_qty));
            }
            entry.line.quantity = new_qty;
            return Ok(());
        }

        if self.entries.len() >= MAX_CART_ITEMS {
            return Err(CartError::CartTooLarge {
                max: MAX_CART_ITEMS,
            });
        }
        validate_title(&product.title)?;
        validate_unit_price(product.price)?;
        if !product.can_sell(quantity) {
            return Err(insufficient_stock(product, quantity));
        }

        let mut line = CartLineItem::new(product.title.clone(), quantity, product.price)
            .with_product_id(product.id.clone());
        line.rush_eligible = product.rush_eligible;

        self.entries.push(CartEntry {
            line,
            selected: true,
        });
        Ok(())
    }

    /// Sets a line's quantity. Zero removes the line.
    ///
    /// Pass the current catalog entry as `product` to enforce its stock
    /// level; the line's price is NOT refreshed from it.
    pub fn update_quantity(
        &mut self,
        product_id: &str,
        quantity: u32,
        product: Option<&CatalogProduct>,
    ) -> CartResult<()> {
        if quantity == 0 {
            return self.remove_item(product_id);
        }

        if quantity > MAX_ITEM_QUANTITY {
            return Err(CartError::QuantityTooLarge {
                requested: quantity,
                max: MAX_ITEM_QUANTITY,
            });
        }

        if let Some(product) = product {
            if !product.can_sell(quantity) {
                return Err(insufficient_stock(product, quantity));
            }
        }

        let entry = self
            .find_mut(product_id)
            .ok_or_else(|| CartError::ItemNotFound(product_id.to_string()))?;
        entry.line.quantity = quantity;
        Ok(())
    }

    /// Removes a line by product id.
    pub fn remove_item(&mut self, product_id: &str) -> CartResult<()> {
        let initial_len = self.entries.len();
        self.entries.retain(|e| e.product_id() != Some(product_id));

        if self.entries.len() == initial_len {
            Err(CartError::ItemNotFound(product_id.to_string()))
        } else {
            Ok(())
        }
    }

    /// Ticks or unticks a line for checkout.
    pub fn set_selected(&mut self, product_id: &str, selected: bool) -> CartResult<()> {
        let entry = self
            .find_mut(product_id)
            .ok_or_else(|| CartError::ItemNotFound(product_id.to_string()))?;
        entry.selected = selected;
        Ok(())
    }

    /// Clears all lines.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// All lines, selected or not.
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    /// Number of distinct lines.
    pub fn item_count(&self) -> usize {
        self.entries.len()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Selected lines, in cart order, ready for pricing.
    pub fn checkout_lines(&self) -> Vec<CartLineItem> {
        self.entries
            .iter()
            .filter(|e| e.selected)
            .map(|e| e.line.clone())
            .collect()
    }

    /// Prices the selected lines.
    pub fn quote(
        &self,
        config: &PriceCalculatorConfig,
        is_rush_order: bool,
        address: Option<&ShippingAddress>,
    ) -> PricingResult<PriceCalculation> {
        calculate_order_total(&self.checkout_lines(), config, is_rush_order, address)
    }

    /// Rush pre-flight report for the selected lines.
    pub fn rush_check(&self, address: &ShippingAddress) -> RushOrderValidation {
        let selected: Vec<&CartLineItem> = self
            .entries
            .iter()
            .filter(|e| e.selected)
            .map(|e| &e.line)
            .collect();
        validate_rush_order(&selected, address)
    }

    fn find_mut(&mut self, product_id: &str) -> Option<&mut CartEntry> {
        self.entries
            .iter_mut()
            .find(|e| e.product_id() == Some(product_id))
    }
}

fn insufficient_stock(product: &CatalogProduct, requested: u32) -> CartError {
    CartError::InsufficientStock {
        title: product.title.clone(),
        available: product.stock.unwrap_or(0),
        requested,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PricingError;

    fn product(id: &str, cents: i64) -> CatalogProduct {
        CatalogProduct {
            id: id.to_string(),
            title: format!("Product {}", id),
            price: Money::from_cents(cents),
            rush_eligible: None,
            stock: None,
        }
    }

    #[test]
    fn test_cart_add_item() {
        let mut cart = Cart::new();
        cart.add_item(&product("1", 999), 2).unwrap();

        assert_eq!(cart.item_count(), 1);
        let lines = cart.checkout_lines();
        assert_eq!(lines[0].quantity, 2);
        assert_eq!(lines[0].unit_price, Money::from_cents(999));
        assert_eq!(lines[0].product_id.as_deref(), Some("1"));
    }

    #[test]
    fn test_add_same_product_keeps_price_at_add() {
        let mut cart = Cart::new();
        let mut dune = product("1", 1000);
        cart.add_item(&dune, 1).unwrap();

        // Catalog price changes after the first add.
        dune.price = Money::from_cents(1500);
        cart.add_item(&dune, 2).unwrap();

        assert_eq!(cart.item_count(), 1);
        let line = &cart.checkout_lines()[0];
        assert_eq!(line.quantity, 3);
        assert_eq!(line.unit_price, Money::from_cents(1000));
    }

    #[test]
    fn test_update_quantity_keeps_price_at_add() {
        let mut cart = Cart::new();
        let mut dune = product("1", 1000);
        cart.add_item(&dune, 1).unwrap();

        dune.price = Money::from_cents(1);
        cart.update_quantity("1", 4, Some(&dune)).unwrap();

        let line = &cart.checkout_lines()[0];
        assert_eq!(line.quantity, 4);
        assert_eq!(line.unit_price, Money::from_cents(1000));
    }

    #[test]
    fn test_update_to_zero_removes() {
        let mut cart = Cart::new();
        cart.add_item(&product("1", 1000), 1).unwrap();
        cart.update_quantity("1", 0, None).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_rejects_zero_quantity_add() {
        let mut cart = Cart::new();
        assert!(matches!(
            cart.add_item(&product("1", 1000), 0),
            Err(CartError::Validation(_))
        ));
    }

    #[test]
    fn test_stock_limits() {
        let mut cart = Cart::new();
        let mut limited = product("1", 1000);
        limited.stock = Some(3);

        cart.add_item(&limited, 2).unwrap();
        let err = cart.add_item(&limited, 2).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Not enough stock for Product 1: available 3, requested 4"
        );
        assert!(cart.update_quantity("1", 5, Some(&limited)).is_err());
        assert_eq!(cart.checkout_lines()[0].quantity, 2);
    }

    #[test]
    fn test_quantity_and_size_limits() {
        let mut cart = Cart::new();
        cart.add_item(&product("1", 100), MAX_ITEM_QUANTITY).unwrap();
        assert!(matches!(
            cart.add_item(&product("1", 100), 1),
            Err(CartError::QuantityTooLarge { .. })
        ));

        let mut full = Cart::new();
        for i in 0..MAX_CART_ITEMS {
            full.add_item(&product(&i.to_string(), 100), 1).unwrap();
        }
        assert!(matches!(
            full.add_item(&product("extra", 100), 1),
            Err(CartError::CartTooLarge { .. })
        ));
    }

    #[test]
    fn test_rejects_overpriced_product() {
        let mut cart = Cart::new();
        let err = cart
            .add_item(&product("vault", crate::MAX_UNIT_PRICE_CENTS + 1), 1)
            .unwrap_err();

        assert!(matches!(
            err,
            CartError::Validation(crate::error::ValidationError::OutOfRange { .. })
        ));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_missing_item() {
        let mut cart = Cart::new();
        assert!(matches!(
            cart.remove_item("nope"),
            Err(CartError::ItemNotFound(_))
        ));
    }

    #[test]
    fn test_unselected_lines_are_not_quoted() {
        let mut cart = Cart::new();
        cart.add_item(&product("1", 1000), 2).unwrap();
        cart.add_item(&product("2", 1500), 1).unwrap();
        cart.add_item(&product("3", 9900), 1).unwrap();
        cart.set_selected("3", false).unwrap();

        let quote = cart
            .quote(&PriceCalculatorConfig::default(), false, None)
            .unwrap();
        assert_eq!(quote.subtotal, Money::from_cents(3500));
        assert_eq!(quote.total, Money::from_cents(4079));
    }

    #[test]
    fn test_rush_check_ignores_unselected_lines() {
        let mut cart = Cart::new();
        let mut regular = product("1", 1000);
        regular.rush_eligible = Some(false);
        cart.add_item(&regular, 1).unwrap();
        cart.add_item(&product("2", 1000), 1).unwrap();

        let hanoi = ShippingAddress::in_city("Hanoi");
        assert!(!cart.rush_check(&hanoi).can_rush_order);
        assert!(matches!(
            cart.quote(&PriceCalculatorConfig::default(), true, Some(&hanoi)),
            Err(PricingError::RushItemsNotEligible { .. })
        ));

        cart.set_selected("1", false).unwrap();
        assert!(cart.rush_check(&hanoi).can_rush_order);
        let quote = cart
            .quote(&PriceCalculatorConfig::default(), true, Some(&hanoi))
            .unwrap();
        assert_eq!(quote.rush_surcharge, Money::from_cents(400));
    }

    #[test]
    fn test_cart_clear() {
        let mut cart = Cart::new();
        cart.add_item(&product("1", 999), 2).unwrap();
        assert!(!cart.is_empty());

        cart.clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_cart_wire_format() {
        let mut cart = Cart::new();
        cart.add_item(&product("1", 999), 1).unwrap();

        let value = serde_json::to_value(&cart).unwrap();
        let entry = &value["entries"][0];
        assert_eq!(entry["productId"], "1");
        assert_eq!(entry["selected"], true);
        assert!(entry.get("priceAtAdd").is_some());
    }
}
