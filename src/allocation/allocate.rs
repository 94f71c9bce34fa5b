//! The pool allocation procedure.
//!
//! This module implements the deterministic procedure that turns a pool
//! amount, a house-share fraction and a set of weighted contributions
//! into per-employee payouts that sum back to the pool exactly.
//!
//! The procedure is pure: no I/O, no shared state, no suspension points.
//! Callers may invoke it concurrently with distinct inputs without any
//! coordination.

use std::collections::HashSet;

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AllocationInput, AllocationResult, ExcludedContribution, ExclusionReason, HousePayout,
    PayoutLine, WeightedContribution,
};

use super::rounding::round_to_denomination;

/// Upper bound the house-share fraction is clamped to.
pub const MAX_HOUSE_SHARE: Decimal = Decimal::from_parts(99, 0, 0, false, 2);

/// Allocates a tip pool across weighted contributions.
///
/// Each eligible contribution receives a share of the pool proportional
/// to its points, scaled down by the house share, rounded to the nearest
/// `denomination` (half away from zero). The house entry receives the
/// exact residual, which preserves conservation and may be negative when
/// rounding over-distributes to employees.
///
/// Contributions with an empty name or non-positive hours are filtered
/// out and reported in the result's `excluded` list. Payouts keep the
/// input order of the contributions, so identical inputs produce
/// identical outputs.
///
/// A house share outside [0, 1) is clamped to [0, 0.99]; the value
/// actually applied is surfaced as `AllocationResult::house_share`.
///
/// # Errors
///
/// Fails with [`EngineError::InvalidInput`] when:
/// - `total_pool <= 0`
/// - no contribution survives the eligibility filter
/// - two eligible contributions share an employee id
///
/// # Examples
///
/// ```
/// use tip_engine::allocation::allocate;
/// use tip_engine::config::DEFAULT_DENOMINATION;
/// use tip_engine::models::{AllocationInput, WeightedContribution};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let input = AllocationInput {
///     total_pool: Decimal::from(500),
///     house_share: Decimal::ZERO,
///     contributions: vec![
///         WeightedContribution {
///             employee_id: "alice".to_string(),
///             name: "Alice".to_string(),
///             role: None,
///             total_hours: Decimal::from(40),
///             multiplier: Decimal::from_str("0.8").unwrap(),
///             points: Decimal::from(32),
///         },
///         WeightedContribution {
///             employee_id: "bob".to_string(),
///             name: "Bob".to_string(),
///             role: None,
///             total_hours: Decimal::from(30),
///             multiplier: Decimal::from_str("0.8").unwrap(),
///             points: Decimal::from(24),
///         },
///     ],
/// };
///
/// let result = allocate(&input, DEFAULT_DENOMINATION).unwrap();
/// assert_eq!(result.payouts[0].rounded_amount, Decimal::from(285));
/// assert_eq!(result.payouts[1].rounded_amount, Decimal::from(215));
/// assert_eq!(result.house.rounded_amount, Decimal::ZERO);
/// ```
pub fn allocate(input: &AllocationInput, denomination: Decimal) -> EngineResult<AllocationResult> {
    if input.total_pool <= Decimal::ZERO {
        return Err(EngineError::invalid_input("pool must be positive"));
    }

    let house_share = clamp_house_share(input.house_share);

    let (eligible, excluded) = filter_eligible(&input.contributions);

    let total_points: Decimal = eligible.iter().map(|c| c.points).sum();
    if eligible.is_empty() || total_points <= Decimal::ZERO {
        return Err(EngineError::invalid_input(
            "no eligible employee contributions",
        ));
    }

    let mut seen = HashSet::with_capacity(eligible.len());
    for contribution in &eligible {
        if !seen.insert(contribution.employee_id.as_str()) {
            return Err(EngineError::invalid_input(format!(
                "duplicate employee id '{}'",
                contribution.employee_id
            )));
        }
    }

    let employee_fraction = Decimal::ONE - house_share;
    let mut payouts = Vec::with_capacity(eligible.len());
    let mut rounded_total = Decimal::ZERO;

    for contribution in eligible {
        let raw_proportion = contribution.points / total_points;
        let scaled_proportion = raw_proportion * employee_fraction;
        let raw_amount = scaled_proportion * input.total_pool;
        let rounded_amount = round_to_denomination(raw_amount, denomination);
        rounded_total += rounded_amount;

        payouts.push(PayoutLine {
            employee_id: contribution.employee_id.clone(),
            name: contribution.name.clone(),
            total_hours: contribution.total_hours,
            multiplier: contribution.multiplier,
            points: contribution.points,
            raw_proportion,
            scaled_proportion,
            raw_amount,
            rounded_amount,
            final_proportion: rounded_amount / input.total_pool,
        });
    }

    // The house takes the exact residual, never re-rounded. This is what
    // makes conservation hold for every input.
    let house = HousePayout {
        raw_proportion: house_share,
        raw_amount: house_share * input.total_pool,
        rounded_amount: input.total_pool - rounded_total,
    };

    Ok(AllocationResult {
        total_pool: input.total_pool,
        total_points,
        house_share,
        payouts,
        house,
        excluded,
    })
}

/// Clamps a house-share fraction into [0, 0.99].
fn clamp_house_share(house_share: Decimal) -> Decimal {
    house_share.clamp(Decimal::ZERO, MAX_HOUSE_SHARE)
}

/// Splits contributions into eligible entries (in input order) and
/// excluded entries with reasons.
fn filter_eligible(
    contributions: &[WeightedContribution],
) -> (Vec<&WeightedContribution>, Vec<ExcludedContribution>) {
    let mut eligible = Vec::with_capacity(contributions.len());
    let mut excluded = Vec::new();

    for contribution in contributions {
        if contribution.name.trim().is_empty() {
            excluded.push(ExcludedContribution {
                employee_id: contribution.employee_id.clone(),
                reason: ExclusionReason::EmptyName,
            });
        } else if contribution.total_hours <= Decimal::ZERO {
            excluded.push(ExcludedContribution {
                employee_id: contribution.employee_id.clone(),
                reason: ExclusionReason::NoHours,
            });
        } else {
            eligible.push(contribution);
        }
    }

    (eligible, excluded)
}
