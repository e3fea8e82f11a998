//! # Price Calculator
//!
//! Turns cart lines plus delivery context into a [`PriceCalculation`].
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  calculate_order_total(items, config, is_rush, address)                 │
//! │                                                                         │
//! │  1. subtotal        = round(Σ unit_price × qty)                         │
//! │  2. total_items     = Σ qty                                             │
//! │  3. shipping_cost   = 0 if subtotal ≥ threshold                         │
//! │                       standard if total_items > 0, else 0               │
//! │  4. rush_surcharge  = round(total_items × per_item)   ── may FAIL ──►  │
//! │  5. tax_amount      = round(subtotal × rate)                            │
//! │  6. total           = round(1 + 3 + 4 + 5)                              │
//! │                                                                         │
//! │  Each component is rounded on its own; the total adds ROUNDED parts.   │
//! │  Tax never applies to shipping or the rush surcharge.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`calculate_order_total`] is the one entry point callers should use for
//! a total. The component functions are public for display and testing.

use crate::address::is_address_rush_eligible;
use crate::error::{PricingError, PricingResult};
use crate::money::Money;
use crate::rush::ineligible_titles;
use crate::types::{CartLineItem, PriceCalculation, PriceCalculatorConfig, ShippingAddress};

// =============================================================================
// Components
// =============================================================================

/// Sum of line totals, rounded to cents.
pub fn calculate_subtotal(items: &[CartLineItem]) -> Money {
    items
        .iter()
        .map(CartLineItem::line_total)
        .sum::<Money>()
        .round_cents()
}

/// Total number of units across all lines.
pub fn calculate_total_items(items: &[CartLineItem]) -> u64 {
    items.iter().map(|item| u64::from(item.quantity)).sum()
}

/// Shipping for a cart with the given subtotal and unit count.
///
/// ## Rules
/// - subtotal at or above the threshold ships free (the boundary is free)
/// - otherwise the standard cost applies, but only to a non-empty cart
pub fn calculate_shipping_cost(
    subtotal: Money,
    total_items: u64,
    config: &PriceCalculatorConfig,
) -> Money {
    if subtotal >= config.free_shipping_threshold() {
        return Money::zero();
    }

    if total_items > 0 {
        config.standard_shipping_cost().round_cents()
    } else {
        Money::zero()
    }
}

/// Tax on the subtotal, rounded to cents.
pub fn calculate_tax_amount(subtotal: Money, config: &PriceCalculatorConfig) -> Money {
    subtotal.apply_rate(config.tax_rate()).round_cents()
}

// =============================================================================
// Rush Surcharge
// =============================================================================

/// Rush surcharge for the cart.
///
/// ## Rules
/// ```text
/// is_rush_order == false ──► $0, nothing checked
///
/// address given and not Hanoi ──► Err(RushAddressNotEligible)
/// any line flagged false       ──► Err(RushItemsNotEligible)
/// otherwise                    ──► round(total_items × per_item)
/// ```
///
/// When no address is given the city check is skipped; the caller is then
/// responsible for having checked the address.
///
/// ## Example
/// ```rust
/// use mediashop_pricing::{calculate_rush_surcharge, CartLineItem, Money,
///     PriceCalculatorConfig, PricingError, ShippingAddress};
///
/// let items = vec![CartLineItem::new("Dune", 3, Money::from_cents(1000))];
/// let config = PriceCalculatorConfig::default();
///
/// let hanoi = ShippingAddress::in_city("Hanoi");
/// assert_eq!(
///     calculate_rush_surcharge(&items, true, Some(&hanoi), &config),
///     Ok(Money::from_cents(1200)),
/// );
///
/// let saigon = ShippingAddress::in_city("Saigon");
/// assert!(matches!(
///     calculate_rush_surcharge(&items, true, Some(&saigon), &config),
///     Err(PricingError::RushAddressNotEligible { .. }),
/// ));
/// ```
pub fn calculate_rush_surcharge(
    items: &[CartLineItem],
    is_rush_order: bool,
    address: Option<&ShippingAddress>,
    config: &PriceCalculatorConfig,
) -> PricingResult<Money> {
    if !is_rush_order {
        return Ok(Money::zero());
    }

    if let Some(address) = address {
        if !is_address_rush_eligible(address) {
            return Err(PricingError::RushAddressNotEligible {
                city: address.city.clone(),
            });
        }
    }

    let ineligible = ineligible_titles(items);
    if !ineligible.is_empty() {
        return Err(PricingError::RushItemsNotEligible { items: ineligible });
    }

    Ok(config
        .rush_surcharge_per_item()
        .multiply_units(calculate_total_items(items))
        .round_cents())
}

// =============================================================================
// Order Total
// =============================================================================

/// Prices an order. THE entry point for any total shown or stored.
///
/// Rush errors from [`calculate_rush_surcharge`] are returned unchanged; the
/// caller decides how to present them.
pub fn calculate_order_total(
    items: &[CartLineItem],
    config: &PriceCalculatorConfig,
    is_rush_order: bool,
    address: Option<&ShippingAddress>,
) -> PricingResult<PriceCalculation> {
    let subtotal = calculate_subtotal(items);
    let total_items = calculate_total_items(items);
    let shipping_cost = calculate_shipping_cost(subtotal, total_items, config);
    let rush_surcharge = calculate_rush_surcharge(items, is_rush_order, address, config)?;
    let tax_amount = calculate_tax_amount(subtotal, config);
    let total = (subtotal + shipping_cost + rush_surcharge + tax_amount).round_cents();

    Ok(PriceCalculation {
        subtotal,
        shipping_cost,
        rush_surcharge,
        tax_amount,
        total,
        total_items,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TaxRate;
    use proptest::prelude::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn item(qty: u32, cents: i64) -> CartLineItem {
        CartLineItem::new(format!("Item {cents}"), qty, Money::from_cents(cents))
    }

    fn money(amount: Decimal) -> Money {
        Money::from_decimal(amount)
    }

    fn hanoi() -> ShippingAddress {
        ShippingAddress::in_city("Hanoi")
    }

    fn scenario_items() -> Vec<CartLineItem> {
        vec![item(2, 1000), item(1, 1500)]
    }

    // -------------------------------------------------------------------------
    // Components
    // -------------------------------------------------------------------------

    #[test]
    fn test_subtotal_and_item_count() {
        let items = vec![item(2, 1000), item(0, 9999), item(1, 1500)];
        assert_eq!(calculate_subtotal(&items), money(dec!(35.00)));
        assert_eq!(calculate_total_items(&items), 3);
        assert_eq!(calculate_subtotal(&[]), Money::zero());
    }

    #[test]
    fn test_subtotal_rounds_after_summing() {
        // 0.333 + 0.333 + 0.333 = 0.999 → 1.00 (rounding each line first gives 0.99)
        let items = vec![
            CartLineItem::new("A", 1, money(dec!(0.333))),
            CartLineItem::new("B", 1, money(dec!(0.333))),
            CartLineItem::new("C", 1, money(dec!(0.333))),
        ];
        assert_eq!(calculate_subtotal(&items), money(dec!(1.00)));
    }

    #[test]
    fn test_free_shipping_boundary() {
        let config = PriceCalculatorConfig::default();

        assert_eq!(
            calculate_shipping_cost(money(dec!(50.00)), 1, &config),
            Money::zero()
        );
        assert_eq!(
            calculate_shipping_cost(money(dec!(49.99)), 1, &config),
            money(dec!(2.99))
        );
        assert_eq!(
            calculate_shipping_cost(Money::zero(), 0, &config),
            Money::zero()
        );
    }

    #[test]
    fn test_empty_cart_never_ships() {
        let config = PriceCalculatorConfig::default();
        assert_eq!(calculate_shipping_cost(money(dec!(10.00)), 0, &config), Money::zero());
    }

    #[test]
    fn test_tax_on_subtotal() {
        let config = PriceCalculatorConfig::default();
        assert_eq!(calculate_tax_amount(money(dec!(35.00)), &config), money(dec!(2.80)));
        assert_eq!(calculate_tax_amount(money(dec!(60.00)), &config), money(dec!(4.80)));
        // 0.0825 × 10.00 = 0.825 → 0.83
        let config = config.with_tax_rate(TaxRate::from_bps(825));
        assert_eq!(calculate_tax_amount(money(dec!(10.00)), &config), money(dec!(0.83)));
    }

    // -------------------------------------------------------------------------
    // Rush surcharge
    // -------------------------------------------------------------------------

    #[test]
    fn test_rush_surcharge_per_item() {
        let config = PriceCalculatorConfig::default();
        let single = vec![item(1, 1000).with_rush_eligible(true)];

        assert_eq!(
            calculate_rush_surcharge(&single, true, Some(&hanoi()), &config),
            Ok(money(dec!(4.00)))
        );
        assert_eq!(
            calculate_rush_surcharge(&scenario_items(), true, Some(&hanoi()), &config),
            Ok(money(dec!(12.00)))
        );
    }

    #[test]
    fn test_no_rush_skips_all_checks() {
        let config = PriceCalculatorConfig::default();
        let blocked = vec![item(1, 1000).with_rush_eligible(false)];
        let saigon = ShippingAddress::in_city("Ho Chi Minh");

        assert_eq!(
            calculate_rush_surcharge(&blocked, false, Some(&saigon), &config),
            Ok(Money::zero())
        );
    }

    #[test]
    fn test_rush_rejects_non_hanoi() {
        let config = PriceCalculatorConfig::default();
        let saigon = ShippingAddress::in_city("Ho Chi Minh");

        let err = calculate_rush_surcharge(&scenario_items(), true, Some(&saigon), &config)
            .unwrap_err();
        assert_eq!(err.to_string(), "Rush delivery is only available in Hanoi");
    }

    #[test]
    fn test_rush_rejects_ineligible_items() {
        let config = PriceCalculatorConfig::default();
        let items = vec![
            item(1, 1000).with_rush_eligible(true),
            CartLineItem::new("Regular CD", 1, money(dec!(15))).with_rush_eligible(false),
        ];

        let err = calculate_rush_surcharge(&items, true, Some(&hanoi()), &config).unwrap_err();
        assert_eq!(err.to_string(), "Some items are not eligible for rush delivery");
        assert_eq!(
            err,
            PricingError::RushItemsNotEligible {
                items: vec!["Regular CD".to_string()]
            }
        );
    }

    #[test]
    fn test_address_checked_before_items() {
        let config = PriceCalculatorConfig::default();
        let blocked = vec![item(1, 1000).with_rush_eligible(false)];
        let saigon = ShippingAddress::in_city("Saigon");

        assert!(matches!(
            calculate_rush_surcharge(&blocked, true, Some(&saigon), &config),
            Err(PricingError::RushAddressNotEligible { .. })
        ));
    }

    #[test]
    fn test_rush_without_address_skips_city_check() {
        let config = PriceCalculatorConfig::default();
        assert_eq!(
            calculate_rush_surcharge(&scenario_items(), true, None, &config),
            Ok(money(dec!(12.00)))
        );

        let blocked = vec![item(1, 1000).with_rush_eligible(false)];
        assert!(matches!(
            calculate_rush_surcharge(&blocked, true, None, &config),
            Err(PricingError::RushItemsNotEligible { .. })
        ));
    }

    #[test]
    fn test_rush_empty_cart_is_free() {
        let config = PriceCalculatorConfig::default();
        assert_eq!(
            calculate_rush_surcharge(&[], true, Some(&hanoi()), &config),
            Ok(Money::zero())
        );
    }

    #[test]
    fn test_rush_with_missing_flag() {
        let config = PriceCalculatorConfig::default();
        let legacy = vec![item(1, 1000)];
        assert_eq!(
            calculate_rush_surcharge(&legacy, true, Some(&hanoi()), &config),
            Ok(money(dec!(4.00)))
        );
    }

    // -------------------------------------------------------------------------
    // Order total scenarios
    // -------------------------------------------------------------------------

    #[test]
    fn test_scenario_rush_to_hanoi() {
        let config = PriceCalculatorConfig::default();
        let result =
            calculate_order_total(&scenario_items(), &config, true, Some(&hanoi())).unwrap();

        assert_eq!(result.subtotal, money(dec!(35.00)));
        assert_eq!(result.shipping_cost, money(dec!(2.99)));
        assert_eq!(result.rush_surcharge, money(dec!(12.00)));
        assert_eq!(result.tax_amount, money(dec!(2.80)));
        assert_eq!(result.total, money(dec!(52.79)));
        assert_eq!(result.total_items, 3);
    }

    #[test]
    fn test_scenario_regular_delivery() {
        let config = PriceCalculatorConfig::default();
        let result =
            calculate_order_total(&scenario_items(), &config, false, Some(&hanoi())).unwrap();

        assert_eq!(result.rush_surcharge, Money::zero());
        assert_eq!(result.total, money(dec!(40.79)));
    }

    #[test]
    fn test_scenario_free_shipping_with_rush() {
        let config = PriceCalculatorConfig::default();
        let items = vec![item(1, 6000).with_rush_eligible(true)];
        let result = calculate_order_total(&items, &config, true, Some(&hanoi())).unwrap();

        assert_eq!(result.shipping_cost, Money::zero());
        assert_eq!(result.rush_surcharge, money(dec!(4.00)));
        assert_eq!(result.tax_amount, money(dec!(4.80)));
        assert_eq!(result.total, money(dec!(68.80)));
    }

    #[test]
    fn test_scenario_empty_cart_rush() {
        let config = PriceCalculatorConfig::default();
        let result = calculate_order_total(&[], &config, true, Some(&hanoi())).unwrap();
        assert_eq!(result, PriceCalculation::default());
    }

    #[test]
    fn test_scenario_ineligible_item() {
        let config = PriceCalculatorConfig::default();
        let items = vec![CartLineItem::new("Regular Book", 1, money(dec!(10))).with_rush_eligible(false)];

        let err = calculate_order_total(&items, &config, true, Some(&hanoi())).unwrap_err();
        assert_eq!(err.to_string(), "Some items are not eligible for rush delivery");

        let report = crate::rush::validate_rush_order(&items, &hanoi());
        assert!(!report.can_rush_order);
        assert_eq!(report.ineligible_items, vec!["Regular Book"]);
    }

    #[test]
    fn test_scenario_non_hanoi_rush() {
        let config = PriceCalculatorConfig::default();
        let saigon = ShippingAddress::in_city("Ho Chi Minh City");

        let err = calculate_order_total(&scenario_items(), &config, true, Some(&saigon))
            .unwrap_err();
        assert_eq!(err.to_string(), "Rush delivery is only available in Hanoi");
    }

    #[test]
    fn test_total_adds_rounded_components() {
        // tax: 10.00 × 0.0805 = 0.805 → 0.81
        // rush: 1 × 1.005 = 1.005 → 1.01
        // component-wise: 10.00 + 2.99 + 1.01 + 0.81 = 14.81
        // sum-then-round would give round(14.800) = 14.80
        let config = PriceCalculatorConfig::default()
            .with_tax_rate(TaxRate::from_bps(805))
            .with_rush_surcharge_per_item(money(dec!(1.005)));
        let items = vec![item(1, 1000)];

        let result = calculate_order_total(&items, &config, true, None).unwrap();

        assert_eq!(result.tax_amount, money(dec!(0.81)));
        assert_eq!(result.rush_surcharge, money(dec!(1.01)));
        assert_eq!(result.total, money(dec!(14.81)));

        let unrounded = money(dec!(10.00))
            + config.standard_shipping_cost()
            + money(dec!(1.005))
            + money(dec!(0.805));
        assert_ne!(result.total, unrounded.round_cents());
    }

    #[test]
    fn test_custom_config_does_not_leak() {
        let default = PriceCalculatorConfig::default();
        let generous = default.with_free_shipping_threshold(Money::zero());

        let items = vec![item(1, 1000)];
        let with_custom = calculate_order_total(&items, &generous, false, None).unwrap();
        let with_default = calculate_order_total(&items, &default, false, None).unwrap();

        assert_eq!(with_custom.shipping_cost, Money::zero());
        assert_eq!(with_default.shipping_cost, money(dec!(2.99)));
    }

    #[test]
    fn test_breakdown_wire_format_has_two_decimals() {
        let config = PriceCalculatorConfig::default();

        let empty = calculate_order_total(&[], &config, true, Some(&hanoi())).unwrap();
        let json = serde_json::to_value(empty).unwrap();
        for field in ["subtotal", "shippingCost", "rushSurcharge", "taxAmount", "total"] {
            assert_eq!(json[field], "0.00", "{field}");
        }

        let items: Vec<CartLineItem> =
            serde_json::from_str(r#"[{"title": "Box Set", "quantity": 1, "priceAtAdd": 60}]"#)
                .unwrap();
        let result = calculate_order_total(&items, &config, false, None).unwrap();
        let json = serde_json::to_value(result).unwrap();
        assert_eq!(json["subtotal"], "60.00");
        assert_eq!(json["shippingCost"], "0.00");
        assert_eq!(json["rushSurcharge"], "0.00");
        assert_eq!(json["taxAmount"], "4.80");
        assert_eq!(json["total"], "64.80");
    }

    #[test]
    fn test_huge_prices_do_not_panic() {
        let config = PriceCalculatorConfig::default();
        let max = Money::from_decimal(Decimal::MAX);
        let items = vec![
            CartLineItem::new("Collector's Vault", 2, max),
            CartLineItem::new("Dune", 1, money(dec!(10))),
        ];

        let result = calculate_order_total(&items, &config, false, None).unwrap();
        assert_eq!(result.subtotal, max);
        assert_eq!(result.total, max);

        let huge_rush = config.with_rush_surcharge_per_item(max);
        let result = calculate_order_total(&items, &huge_rush, true, None).unwrap();
        assert_eq!(result.rush_surcharge, max);
    }

    // -------------------------------------------------------------------------
    // Properties
    // -------------------------------------------------------------------------

    fn arb_line() -> impl Strategy<Value = CartLineItem> {
        (0u32..20, 0i64..100_000, proptest::option::of(any::<bool>())).prop_map(
            |(qty, cents, flag)| CartLineItem {
                product_id: None,
                title: format!("P{cents}"),
                quantity: qty,
                unit_price: Money::from_cents(cents),
                rush_eligible: flag,
            },
        )
    }

    proptest! {
        #[test]
        fn prop_order_total_is_deterministic(
            items in proptest::collection::vec(arb_line(), 0..8),
            rush in any::<bool>(),
        ) {
            let config = PriceCalculatorConfig::default();
            let first = calculate_order_total(&items, &config, rush, Some(&hanoi()));
            let second = calculate_order_total(&items, &config, rush, Some(&hanoi()));
            prop_assert_eq!(first, second);
        }

        #[test]
        fn prop_total_is_sum_of_rounded_components(
            items in proptest::collection::vec(arb_line(), 0..8),
            bps in 0u32..2_500,
        ) {
            let config = PriceCalculatorConfig::default().with_tax_rate(TaxRate::from_bps(bps));
            let result = calculate_order_total(&items, &config, false, None).unwrap();

            for part in [result.subtotal, result.shipping_cost, result.rush_surcharge, result.tax_amount] {
                prop_assert_eq!(part, part.round_cents());
            }
            prop_assert_eq!(
                result.total,
                result.subtotal + result.shipping_cost + result.rush_surcharge + result.tax_amount
            );
        }

        #[test]
        fn prop_missing_flag_prices_like_true(
            items in proptest::collection::vec(arb_line(), 0..8),
        ) {
            let config = PriceCalculatorConfig::default();
            let as_true: Vec<CartLineItem> = items
                .iter()
                .cloned()
                .map(|mut line| {
                    if line.rush_eligible.is_none() {
                        line.rush_eligible = Some(true);
                    }
                    line
                })
                .collect();

            prop_assert_eq!(
                calculate_order_total(&items, &config, true, Some(&hanoi())),
                calculate_order_total(&as_true, &config, true, Some(&hanoi()))
            );
        }
    }
}
