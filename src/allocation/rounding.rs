//! Denomination rounding functionality.
//!
//! Employee payouts are rounded to a fixed cash denomination (nearest $5
//! by default) so weekly envelopes can be made up from bills. The rounding
//! strategy is half away from zero, applied consistently for the whole
//! engine, and the house entry absorbs whatever the rounding leaves over.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds an amount to the nearest multiple of `denomination`.
///
/// Midpoints round half away from zero: with a $5 denomination, $12.50
/// rounds to $15. A non-positive denomination disables rounding and
/// returns the amount unchanged.
///
/// # Examples
///
/// ```
/// use tip_engine::allocation::round_to_denomination;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let amount = Decimal::from_str("285.71").unwrap();
/// let denom = Decimal::from(5);
/// assert_eq!(round_to_denomination(amount, denom), Decimal::from(285));
/// ```
pub fn round_to_denomination(amount: Decimal, denomination: Decimal) -> Decimal {
    if denomination <= Decimal::ZERO {
        return amount;
    }

    let units = (amount / denomination)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    units * denomination
}
