//! Command handlers.
//!
//! Each handler takes already-loaded inputs and returns a serializable
//! result, so they run the same from `main` and from tests.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use anyhow::Context;
use mediashop_pricing::validation::validate_line_items;
use mediashop_pricing::{
    calculate_order_total, validate_rush_order, CartLineItem, PriceCalculation,
    RushOrderValidation, ShippingAddress,
};
use tracing::{debug, info, warn};

use crate::config::QuoteSettings;
use crate::error::ApiError;

/// Path value meaning "read from stdin".
pub const STDIN_PATH: &str = "-";

/// Reads a cart snapshot (JSON array of line items) from a file or stdin.
pub fn load_cart(path: &str) -> anyhow::Result<Vec<CartLineItem>> {
    if path == STDIN_PATH {
        return parse_cart(io::stdin().lock()).context("Failed to read cart from stdin");
    }

    let file = File::open(Path::new(path)).with_context(|| format!("Failed to open {path}"))?;
    parse_cart(BufReader::new(file)).with_context(|| format!("Failed to read cart from {path}"))
}

/// Parses a cart snapshot.
pub fn parse_cart<R: Read>(reader: R) -> anyhow::Result<Vec<CartLineItem>> {
    let items: Vec<CartLineItem> = serde_json::from_reader(reader)?;
    debug!(lines = items.len(), "Cart loaded");
    Ok(items)
}

/// Prices a cart the way the order service does before persisting an order.
pub fn quote(
    items: &[CartLineItem],
    settings: &QuoteSettings,
    is_rush_order: bool,
    city: Option<&str>,
) -> Result<PriceCalculation, ApiError> {
    validate_line_items(items)?;

    let address = city.map(ShippingAddress::in_city);
    if is_rush_order && address.is_none() {
        warn!("Rush quote without a city; Hanoi check skipped");
    }

    match calculate_order_total(items, &settings.pricing, is_rush_order, address.as_ref()) {
        Ok(breakdown) => {
            info!(
                total = %breakdown.total,
                total_items = breakdown.total_items,
                rush = is_rush_order,
                "Quote computed"
            );
            Ok(breakdown)
        }
        Err(err) => {
            warn!(error = %err, city = city.unwrap_or_default(), "Quote rejected");
            Err(err.into())
        }
    }
}

/// Rush pre-flight report for a cart and city.
pub fn rush_check(items: &[CartLineItem], city: &str) -> RushOrderValidation {
    let report = validate_rush_order(items, &ShippingAddress::in_city(city));
    info!(
        can_rush = report.can_rush_order,
        address_valid = report.address_valid,
        ineligible = report.ineligible_items.len(),
        "Rush check"
    );
    report
}
