//! Weekly hours aggregation.
//!
//! The entry grid records hours per day; the allocator works on weekly
//! totals. The contract is simple: total = sum of the daily values,
//! missing days count as zero.

use rust_decimal::Decimal;

/// Number of day slots in an entry week.
pub const DAYS_PER_WEEK: usize = 7;

/// Sums a week's daily entries into a total, treating missing days as zero.
///
/// # Examples
///
/// ```
/// use tip_engine::allocation::weekly_total;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let days = vec![
///     Some(Decimal::from(8)),
///     None,
///     Some(Decimal::from_str("7.5").unwrap()),
/// ];
/// assert_eq!(weekly_total(&days), Decimal::from_str("15.5").unwrap());
/// ```
pub fn weekly_total(days: &[Option<Decimal>]) -> Decimal {
    days.iter().map(|d| d.unwrap_or(Decimal::ZERO)).sum()
}
