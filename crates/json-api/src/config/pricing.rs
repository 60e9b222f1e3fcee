//! Pricing Config

use clap::Args;
use decimal_percentage::Percentage;
use storefront::{
    prices::Price,
    pricing::{DEFAULT_SHIPPING_PRICE, PricingPolicy},
};
use thiserror::Error;

/// Invalid pricing settings.
#[derive(Debug, Error)]
#[error("tax rate must be a finite fraction between 0 and 1, got {0}")]
pub struct InvalidTaxRate(f64);

/// Shipping and tax settings applied to every order.
#[derive(Debug, Args)]
pub struct PricingConfig {
    /// Flat shipping fee in cents
    #[arg(long, env = "SHIPPING_PRICE", default_value_t = DEFAULT_SHIPPING_PRICE.to_minor_units())]
    pub shipping_price: u64,

    /// Tax rate as a fraction of the items price, e.g. 0.15
    #[arg(long, env = "TAX_RATE", default_value_t = 0.0)]
    pub tax_rate: f64,
}

impl PricingConfig {
    /// Build the server pricing policy.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidTaxRate`] for rates outside `0..=1` or non-finite values.
    pub fn policy(&self) -> Result<PricingPolicy, InvalidTaxRate> {
        if !self.tax_rate.is_finite() || !(0.0..=1.0).contains(&self.tax_rate) {
            return Err(InvalidTaxRate(self.tax_rate));
        }

        Ok(PricingPolicy::new(
            Price::from_minor(self.shipping_price),
            Percentage::from(self.tax_rate),
        ))
    }
}
