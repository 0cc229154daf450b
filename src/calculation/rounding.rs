//! Monetary rounding.
//!
//! Every monetary value the engine produces passes through [`round`], and
//! every aggregate through [`sum_rounded`]. Arithmetic is exact decimal, so a
//! half-even tie is a true tie rather than a float landing near 0.5.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::{RoundingConfig, RoundingMode};

impl RoundingMode {
    fn strategy(self) -> RoundingStrategy {
        match self {
            RoundingMode::HalfEven => RoundingStrategy::MidpointNearestEven,
            RoundingMode::HalfUp => RoundingStrategy::MidpointAwayFromZero,
        }
    }
}

/// Rounds a value to `decimals` places.
///
/// `HalfUp` rounds ties away from zero; `HalfEven` rounds ties toward the even
/// neighbour.
///
/// # Example
///
/// ```
/// use labor_cost_engine::calculation::round;
/// use labor_cost_engine::config::RoundingMode;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let value = Decimal::from_str("1.245").unwrap();
/// assert_eq!(round(value, 2, RoundingMode::HalfEven), Decimal::from_str("1.24").unwrap());
/// assert_eq!(round(value, 2, RoundingMode::HalfUp), Decimal::from_str("1.25").unwrap());
/// ```
pub fn round(value: Decimal, decimals: u32, mode: RoundingMode) -> Decimal {
    value.round_dp_with_strategy(decimals, mode.strategy())
}

/// Sums values after rounding each one, then rounds the sum.
///
/// The final round keeps the aggregate on the decimal grid even when the
/// inputs carry more places than `decimals`.
pub fn sum_rounded<I>(values: I, decimals: u32, mode: RoundingMode) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    let total: Decimal = values
        .into_iter()
        .map(|value| round(value, decimals, mode))
        .sum();
    round(total, decimals, mode)
}

/// Converts a float into a [`Decimal`].
///
/// `NaN`, infinities and values outside the decimal range become zero.
pub fn decimal_from_f64(value: f64) -> Decimal {
    if !value.is_finite() {
        return Decimal::ZERO;
    }
    Decimal::from_f64(value).unwrap_or(Decimal::ZERO)
}

/// [`round`] for float input.
pub fn round_f64(value: f64, decimals: u32, mode: RoundingMode) -> Decimal {
    round(decimal_from_f64(value), decimals, mode)
}

/// [`sum_rounded`] for float input.
pub fn sum_rounded_f64(values: &[f64], decimals: u32, mode: RoundingMode) -> Decimal {
    sum_rounded(values.iter().copied().map(decimal_from_f64), decimals, mode)
}

impl RoundingConfig {
    /// Rounds a value under this configuration.
    pub fn round(&self, value: Decimal) -> Decimal {
        round(value, self.decimals, self.mode)
    }

    /// Rounding-safe sum under this configuration.
    pub fn sum<I>(&self, values: I) -> Decimal
    where
        I: IntoIterator<Item = Decimal>,
    {
        sum_rounded(values, self.decimals, self.mode)
    }
}
