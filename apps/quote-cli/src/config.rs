//! Quote CLI configuration module.
//!
//! Configuration is loaded from environment variables with fallback to the
//! canonical pricing defaults.
//!
//! | Variable                              | Default |
//! |---------------------------------------|---------|
//! | `MEDIASHOP_FREE_SHIPPING_THRESHOLD`   | 50.00   |
//! | `MEDIASHOP_STANDARD_SHIPPING_COST`    | 2.99    |
//! | `MEDIASHOP_TAX_RATE`                  | 0.08    |
//! | `MEDIASHOP_RUSH_SURCHARGE_PER_ITEM`   | 4.00    |

use std::env;
use std::str::FromStr;

use mediashop_pricing::validation::validate_config;
use mediashop_pricing::{Money, PriceCalculatorConfig, TaxRate, ValidationError};
use rust_decimal::Decimal;
use serde::Serialize;

pub const FREE_SHIPPING_THRESHOLD_VAR: &str = "MEDIASHOP_FREE_SHIPPING_THRESHOLD";
pub const STANDARD_SHIPPING_COST_VAR: &str = "MEDIASHOP_STANDARD_SHIPPING_COST";
pub const TAX_RATE_VAR: &str = "MEDIASHOP_TAX_RATE";
pub const RUSH_SURCHARGE_PER_ITEM_VAR: &str = "MEDIASHOP_RUSH_SURCHARGE_PER_ITEM";

/// Quote CLI configuration.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSettings {
    /// Pricing parameters handed to every calculation.
    pub pricing: PriceCalculatorConfig,
}

impl QuoteSettings {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn load_from<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = PriceCalculatorConfig::default();

        let free_shipping_threshold = parse_or(
            &lookup,
            FREE_SHIPPING_THRESHOLD_VAR,
            defaults.free_shipping_threshold().amount(),
        )?;
        let standard_shipping_cost = parse_or(
            &lookup,
            STANDARD_SHIPPING_COST_VAR,
            defaults.standard_shipping_cost().amount(),
        )?;
        let tax_rate = parse_or(&lookup, TAX_RATE_VAR, defaults.tax_rate().fraction())?;
        let rush_surcharge_per_item = parse_or(
            &lookup,
            RUSH_SURCHARGE_PER_ITEM_VAR,
            defaults.rush_surcharge_per_item().amount(),
        )?;

        let pricing = PriceCalculatorConfig::new(
            Money::from_decimal(free_shipping_threshold),
            Money::from_decimal(standard_shipping_cost),
            TaxRate::from_fraction(tax_rate),
            Money::from_decimal(rush_surcharge_per_item),
        );

        validate_config(&pricing)?;

        Ok(QuoteSettings { pricing })
    }
}

fn parse_or<F>(lookup: &F, name: &str, default: Decimal) -> Result<Decimal, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(raw) => {
            Decimal::from_str(raw.trim()).map_err(|_| ConfigError::InvalidValue(name.to_string()))
        }
        None => Ok(default),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Invalid pricing configuration: {0}")]
    Invalid(#[from] ValidationError),
}
