//! Best-fraction approximation for displaying proportions.
//!
//! The entry grid shows each employee's share as a small human-readable
//! fraction ("4/7") rather than a long decimal. This is presentation
//! only; nothing in the conservation contract depends on it.

use std::fmt;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A reduced display fraction `numerator / denominator`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fraction {
    /// The numerator.
    pub numerator: u32,
    /// The denominator, always at least 1.
    pub denominator: u32,
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

/// Default denominator bound for display fractions.
pub const DEFAULT_MAX_DENOMINATOR: u32 = 20;

/// Finds the fraction `n/d` with `d <= max_denominator` closest to
/// `proportion`, ties going to the smallest denominator.
///
/// Non-positive input returns `0/1`. The search is a bounded linear scan
/// over denominators; for each `d` the best numerator is the rounding of
/// `proportion * d`.
///
/// # Examples
///
/// ```
/// use tip_engine::allocation::{best_fraction, DEFAULT_MAX_DENOMINATOR};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let p = Decimal::from_str("0.5714").unwrap();
/// let fraction = best_fraction(p, DEFAULT_MAX_DENOMINATOR);
/// assert_eq!(fraction.to_string(), "4/7");
/// ```
pub fn best_fraction(proportion: Decimal, max_denominator: u32) -> Fraction {
    if proportion <= Decimal::ZERO || max_denominator == 0 {
        return Fraction {
            numerator: 0,
            denominator: 1,
        };
    }

    let mut best = Fraction {
        numerator: 0,
        denominator: 1,
    };
    let mut best_error = proportion;

    for denominator in 1..=max_denominator {
        let d = Decimal::from(denominator);
        let Some(numerator) = (proportion * d)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u32()
        else {
            continue;
        };

        let error = (proportion - Decimal::from(numerator) / d).abs();
        if error < best_error {
            best = Fraction {
                numerator,
                denominator,
            };
            best_error = error;
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_exact_half() {
        assert_eq!(best_fraction(dec("0.5"), 20).to_string(), "1/2");
    }

    #[test]
    fn test_four_sevenths() {
        assert_eq!(best_fraction(dec("0.5714"), 20).to_string(), "4/7");
    }

    #[test]
    fn test_three_sevenths() {
        assert_eq!(best_fraction(dec("0.4286"), 20).to_string(), "3/7");
    }

    #[test]
    fn test_whole_share() {
        assert_eq!(best_fraction(dec("1"), 20).to_string(), "1/1");
    }

    #[test]
    fn test_ties_prefer_smallest_denominator() {
        // 0.5 is matched exactly by 1/2, 2/4, 3/6, ... keep 1/2.
        let fraction = best_fraction(dec("0.5"), 20);
        assert_eq!(fraction.denominator, 2);

        // 0.25 by 1/4, 2/8, ... keep 1/4.
        assert_eq!(best_fraction(dec("0.25"), 20).to_string(), "1/4");
    }

    #[test]
    fn test_zero_returns_zero_over_one() {
        assert_eq!(best_fraction(Decimal::ZERO, 20).to_string(), "0/1");
    }

    #[test]
    fn test_negative_returns_zero_over_one() {
        assert_eq!(best_fraction(dec("-0.3"), 20).to_string(), "0/1");
    }

    #[test]
    fn test_zero_max_denominator_returns_zero_over_one() {
        assert_eq!(best_fraction(dec("0.5"), 0).to_string(), "0/1");
    }

    #[test]
    fn test_respects_denominator_bound() {
        // 1/13 is the best approximation of 0.0769, but with a bound of 10
        // the search must settle for a coarser fraction.
        let fraction = best_fraction(dec("0.0769"), 10);
        assert!(fraction.denominator <= 10);

        let unbounded = best_fraction(dec("0.0769"), 20);
        assert_eq!(unbounded.to_string(), "1/13");
    }

    #[test]
    fn test_small_proportion_rounds_to_zero_numerator() {
        // 0.01 with d <= 20: closest candidates are 0/1 (err 0.01) and
        // 1/20 (err 0.04); 0/1 wins.
        assert_eq!(best_fraction(dec("0.01"), 20).to_string(), "0/1");
    }

    #[test]
    fn test_display_format() {
        let fraction = Fraction {
            numerator: 3,
            denominator: 8,
        };
        assert_eq!(format!("{}", fraction), "3/8");
    }
}
