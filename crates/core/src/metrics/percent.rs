//! Share-of-total percentages.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to 2 decimal places, half away from zero.
#[must_use]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// `part * 100 / whole`, rounded half-up to 2 dp.
///
/// Returns zero when `whole` is zero, whatever `part` is.
#[must_use]
pub fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    part.checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|scaled| scaled.checked_div(whole))
        .map_or(Decimal::ZERO, round_money)
}

/// `actual - planned`.
#[must_use]
pub fn variance(actual: Decimal, planned: Decimal) -> Decimal {
    actual - planned
}
