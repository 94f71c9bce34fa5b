//! Contribution weighting functionality.
//!
//! This module turns raw hours records into weighted contributions by
//! resolving each record's multiplier, either from a per-record override
//! or from the role-weight table.

use rust_decimal::Decimal;

use crate::config::RoleWeightTable;
use crate::models::{HoursRecord, WeightedContribution};

/// Resolves the multiplier for a record.
///
/// An explicit `multiplier` on the record takes precedence; otherwise the
/// role label is looked up in the table, falling back to the table's
/// default role for absent or unrecognized labels.
///
/// # Examples
///
/// ```
/// use tip_engine::allocation::resolve_multiplier;
/// use tip_engine::config::RoleWeightTable;
/// use tip_engine::models::HoursRecord;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let table = RoleWeightTable::standard();
/// let record = HoursRecord {
///     employee_id: "alice".to_string(),
///     name: "Alice".to_string(),
///     total_hours: Decimal::from(40),
///     role: Some("kitchen".to_string()),
///     multiplier: None,
/// };
/// assert_eq!(resolve_multiplier(&record, &table), Decimal::from_str("0.5").unwrap());
/// ```
pub fn resolve_multiplier(record: &HoursRecord, table: &RoleWeightTable) -> Decimal {
    match record.multiplier {
        Some(multiplier) => multiplier,
        None => table.multiplier_for(record.role.as_deref()),
    }
}

/// Weighs a single record into a [`WeightedContribution`].
///
/// `points = total_hours * multiplier`, so points are zero exactly when
/// the hours are zero.
pub fn weigh_record(record: &HoursRecord, table: &RoleWeightTable) -> WeightedContribution {
    let multiplier = resolve_multiplier(record, table);
    WeightedContribution {
        employee_id: record.employee_id.clone(),
        name: record.name.clone(),
        role: record.role.clone(),
        total_hours: record.total_hours,
        multiplier,
        points: record.total_hours * multiplier,
    }
}

/// Weighs a batch of records, preserving input order.
pub fn weigh_records(records: &[HoursRecord], table: &RoleWeightTable) -> Vec<WeightedContribution> {
    records.iter().map(|r| weigh_record(r, table)).collect()
}
