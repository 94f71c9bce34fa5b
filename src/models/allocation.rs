//! Allocation input and result models.
//!
//! This module contains the [`AllocationInput`] consumed by the allocator
//! and the [`AllocationResult`] it produces, along with the per-employee
//! [`PayoutLine`] and the synthetic [`HousePayout`] entry that absorbs
//! rounding residue.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An employee's share basis: hours weighted by the resolved multiplier.
///
/// Derived from an [`HoursRecord`](super::HoursRecord) and a role-weight
/// table. `points` is always `total_hours * multiplier`, so it is zero
/// whenever the hours are zero.
///
/// # Example
///
/// ```
/// use tip_engine::models::WeightedContribution;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let contribution = WeightedContribution {
///     employee_id: "alice".to_string(),
///     name: "Alice".to_string(),
///     role: Some("waiter".to_string()),
///     total_hours: Decimal::from(40),
///     multiplier: Decimal::from_str("0.8").unwrap(),
///     points: Decimal::from(32),
/// };
/// assert_eq!(contribution.points, contribution.total_hours * contribution.multiplier);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedContribution {
    /// Opaque stable identifier for the employee.
    pub employee_id: String,
    /// Display name carried through for presentation.
    pub name: String,
    /// The role label the multiplier was resolved from, if any.
    pub role: Option<String>,
    /// Total hours worked in the period.
    pub total_hours: Decimal,
    /// The resolved multiplier (role table lookup or per-record override).
    pub multiplier: Decimal,
    /// Weighted hours: `total_hours * multiplier`.
    pub points: Decimal,
}

/// The input to a single allocation: pool, house share and contributions.
///
/// Constructed fresh for each calculation; contributions keep caller order
/// and carry unique employee ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationInput {
    /// Total gratuity amount to distribute.
    pub total_pool: Decimal,
    /// Fraction of the pool reserved for the establishment, in [0, 1).
    pub house_share: Decimal,
    /// The weighted contributions, in caller order.
    pub contributions: Vec<WeightedContribution>,
}

/// Why a contribution was excluded from allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionReason {
    /// The record's name was empty or whitespace.
    EmptyName,
    /// The record's hours were zero or negative.
    NoHours,
}

/// A contribution filtered out before allocation, with the reason.
///
/// Excluded entries receive nothing and contribute nothing to the points
/// total; they are reported back for display only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExcludedContribution {
    /// The excluded employee's id.
    pub employee_id: String,
    /// Why the entry was excluded.
    pub reason: ExclusionReason,
}

/// One employee's payout within an allocation result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoutLine {
    /// Opaque stable identifier for the employee.
    pub employee_id: String,
    /// Display name.
    pub name: String,
    /// Total hours worked in the period.
    pub total_hours: Decimal,
    /// The multiplier applied to the hours.
    pub multiplier: Decimal,
    /// Weighted hours used as the share basis.
    pub points: Decimal,
    /// Share of total points before the house cut.
    pub raw_proportion: Decimal,
    /// `raw_proportion * (1 - house_share)`.
    pub scaled_proportion: Decimal,
    /// `scaled_proportion * total_pool`, unrounded.
    pub raw_amount: Decimal,
    /// `raw_amount` rounded to the nearest denomination.
    pub rounded_amount: Decimal,
    /// `rounded_amount / total_pool`, the share actually received.
    pub final_proportion: Decimal,
}

/// The synthetic house entry in an allocation result.
///
/// The house receives the exact residual left after rounding every
/// employee payout. It is not independently rounded and may be negative
/// when rounding over-distributes to employees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HousePayout {
    /// The house-share fraction that was applied.
    pub raw_proportion: Decimal,
    /// `house_share * total_pool`, the pre-rounding house amount.
    pub raw_amount: Decimal,
    /// The exact residual: `total_pool - sum(employee rounded amounts)`.
    pub rounded_amount: Decimal,
}

/// The complete result of one allocation.
///
/// Conservation holds by construction: the employee rounded amounts plus
/// the house residual always sum to exactly `total_pool`.
///
/// # Example
///
/// ```
/// use tip_engine::models::{AllocationResult, HousePayout};
/// use rust_decimal::Decimal;
///
/// let result = AllocationResult {
///     total_pool: Decimal::from(500),
///     total_points: Decimal::from(56),
///     house_share: Decimal::ZERO,
///     payouts: vec![],
///     house: HousePayout {
///         raw_proportion: Decimal::ZERO,
///         raw_amount: Decimal::ZERO,
///         rounded_amount: Decimal::from(500),
///     },
///     excluded: vec![],
/// };
/// assert_eq!(result.distributed_total(), Decimal::from(500));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationResult {
    /// The pool that was distributed.
    pub total_pool: Decimal,
    /// Sum of points over eligible contributions.
    pub total_points: Decimal,
    /// The house-share fraction actually applied (after clamping).
    pub house_share: Decimal,
    /// Employee payouts, in deterministic input order.
    pub payouts: Vec<PayoutLine>,
    /// The synthetic house entry.
    pub house: HousePayout,
    /// Contributions filtered out before allocation.
    pub excluded: Vec<ExcludedContribution>,
}

impl AllocationResult {
    /// Sum of all rounded amounts, including the house entry.
    ///
    /// Equals `total_pool` for every result the allocator produces.
    pub fn distributed_total(&self) -> Decimal {
        let employees: Decimal = self.payouts.iter().map(|p| p.rounded_amount).sum();
        employees + self.house.rounded_amount
    }
}
