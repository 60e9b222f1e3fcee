//! Pricing
//!
//! Order summaries are derived, never stored on the cart: the items price is
//! recomputed from the lines on every read and shipping and tax come from a
//! [`PricingPolicy`].

use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::prices::{Price, PriceError};

/// Default flat shipping fee, $250.00.
pub const DEFAULT_SHIPPING_PRICE: Price = Price::from_minor(25_000);

/// Errors that can occur while pricing an order.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PricingError {
    /// A sum or product did not fit.
    #[error(transparent)]
    Price(#[from] PriceError),

    /// Percentage calculation could not be safely converted.
    #[error("percentage conversion overflowed or was not finite")]
    PercentConversion,
}

/// Anything with a unit price and a quantity.
pub trait PricedLine {
    /// Unit price.
    fn unit_price(&self) -> Price;

    /// Quantity.
    fn quantity(&self) -> u32;
}

/// Shipping and tax settings applied on top of the items price.
#[derive(Debug, Clone, Copy)]
pub struct PricingPolicy {
    /// Flat shipping fee per order.
    pub shipping_price: Price,

    /// Flat tax rate applied to the items price.
    pub tax_rate: Percentage,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            shipping_price: DEFAULT_SHIPPING_PRICE,
            tax_rate: Percentage::from(0.0),
        }
    }
}

impl PricingPolicy {
    /// Create a policy.
    pub fn new(shipping_price: Price, tax_rate: Percentage) -> Self {
        Self {
            shipping_price,
            tax_rate,
        }
    }

    /// Summarize an order from its items price.
    ///
    /// # Errors
    ///
    /// Returns an error if the tax or total cannot be represented.
    pub fn summarize(&self, items_price: Price) -> Result<OrderSummary, PricingError> {
        let tax_price = tax_of(&self.tax_rate, items_price)?;

        let total_price = items_price
            .checked_add(self.shipping_price)?
            .checked_add(tax_price)?;

        Ok(OrderSummary {
            items_price,
            shipping_price: self.shipping_price,
            tax_price,
            total_price,
        })
    }

    /// Summarize an order straight from its lines.
    ///
    /// # Errors
    ///
    /// Returns an error if any sum overflows.
    pub fn summarize_lines<'a, L, I>(&self, lines: I) -> Result<OrderSummary, PricingError>
    where
        L: PricedLine + 'a,
        I: IntoIterator<Item = &'a L>,
    {
        self.summarize(items_price(lines)?)
    }
}

/// Items, shipping, tax and total prices of an order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    /// Sum of unit price times quantity.
    pub items_price: Price,

    /// Shipping fee.
    pub shipping_price: Price,

    /// Tax on the items price.
    pub tax_price: Price,

    /// Items plus shipping plus tax.
    pub total_price: Price,
}

/// Sum of `price x qty` over all lines.
///
/// # Errors
///
/// Returns [`PricingError::Price`] if the sum overflows.
pub fn items_price<'a, L, I>(lines: I) -> Result<Price, PricingError>
where
    L: PricedLine + 'a,
    I: IntoIterator<Item = &'a L>,
{
    lines.into_iter().try_fold(Price::ZERO, |total, line| {
        let line_total = line.unit_price().checked_mul(line.quantity())?;

        Ok(total.checked_add(line_total)?)
    })
}

/// Tax on a price, rounded half away from zero to whole minor units.
///
/// # Errors
///
/// Returns [`PricingError::PercentConversion`] if the calculation overflows.
pub fn tax_of(rate: &Percentage, price: Price) -> Result<Price, PricingError> {
    let minor = Decimal::from_u64(price.to_minor_units()).ok_or(PricingError::PercentConversion)?;

    ((*rate) * Decimal::ONE) // decimal_percentage doesn't expose the underlying Decimal
        .checked_mul(minor)
        .ok_or(PricingError::PercentConversion)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
        .map(Price::from_minor)
        .ok_or(PricingError::PercentConversion)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    struct Line(Price, u32);

    impl PricedLine for Line {
        fn unit_price(&self) -> Price {
            self.0
        }

        fn quantity(&self) -> u32 {
            self.1
        }
    }

    #[test]
    fn items_price_sums_price_times_quantity() -> TestResult {
        let lines = [Line(Price::from_minor(5_000), 2), Line(Price::from_minor(199), 3)];

        assert_eq!(items_price(&lines)?, Price::from_minor(10_597));

        Ok(())
    }

    #[test]
    fn items_price_of_nothing_is_zero() -> TestResult {
        let lines: [Line; 0] = [];

        assert_eq!(items_price(&lines)?, Price::ZERO);

        Ok(())
    }

    #[test]
    fn items_price_overflow_is_an_error() {
        let lines = [Line(Price::from_minor(u64::MAX), 2)];

        assert_eq!(
            items_price(&lines),
            Err(PricingError::Price(PriceError::Overflow))
        );
    }

    #[test]
    fn default_policy_adds_flat_shipping_and_no_tax() -> TestResult {
        let summary = PricingPolicy::default().summarize(Price::from_major(100))?;

        assert_eq!(summary.items_price, Price::from_major(100));
        assert_eq!(summary.shipping_price, Price::from_major(250));
        assert_eq!(summary.tax_price, Price::ZERO);
        assert_eq!(summary.total_price, Price::from_major(350));

        Ok(())
    }

    #[test]
    fn tax_rounds_half_away_from_zero() -> TestResult {
        let rate = Percentage::from(0.15);

        // 15% of 1.50 is 0.225
        assert_eq!(tax_of(&rate, Price::from_minor(150))?, Price::from_minor(23));
        // 15% of 0.10 is 0.015
        assert_eq!(tax_of(&rate, Price::from_minor(10))?, Price::from_minor(2));

        Ok(())
    }

    #[test]
    fn summary_total_includes_tax() -> TestResult {
        let policy = PricingPolicy::new(Price::from_minor(1_000), Percentage::from(0.15));

        let summary = policy.summarize(Price::from_minor(10_000))?;

        assert_eq!(summary.tax_price, Price::from_minor(1_500));
        assert_eq!(summary.total_price, Price::from_minor(12_500));

        Ok(())
    }

    #[test]
    fn summary_overflow_is_an_error() {
        let policy = PricingPolicy::new(Price::from_minor(u64::MAX), Percentage::from(0.0));

        assert!(policy.summarize(Price::from_minor(1)).is_err());
    }
}
