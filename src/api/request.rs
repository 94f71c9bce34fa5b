//! Request types for the tip pool engine API.
//!
//! This module defines the JSON request structures for the `/calculate`
//! and `/distributions` endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::allocation::weekly_total;
use crate::models::HoursRecord;

/// Request body for the `/calculate` and `/distributions` endpoints.
///
/// Carries the pool and the week's employee entries. `house_share` and
/// `denomination` override the configured policy when present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// Total gratuity amount to distribute.
    pub total_pool: Decimal,
    /// Optional override of the configured house-share fraction.
    #[serde(default)]
    pub house_share: Option<Decimal>,
    /// Optional override of the configured rounding denomination.
    #[serde(default)]
    pub denomination: Option<Decimal>,
    /// The employee entries for the period.
    pub employees: Vec<EmployeeEntry>,
}

/// One employee's entry in a calculation request.
///
/// Hours may be supplied either as a weekly `hours` total or as a
/// `daily_hours` grid (missing days are zero); an explicit total wins
/// when both are present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeEntry {
    /// Stable identifier; defaults to the name when absent.
    #[serde(default)]
    pub id: Option<String>,
    /// Display name. Entries with an empty name are excluded from allocation.
    pub name: String,
    /// Weekly hours total.
    #[serde(default)]
    pub hours: Option<Decimal>,
    /// Daily hours grid, summed with missing days as zero.
    #[serde(default)]
    pub daily_hours: Option<Vec<Option<Decimal>>>,
    /// Role label for the role-weight table.
    #[serde(default)]
    pub role: Option<String>,
    /// Explicit multiplier override.
    #[serde(default)]
    pub multiplier: Option<Decimal>,
}

impl EmployeeEntry {
    /// Converts this entry into a domain [`HoursRecord`].
    pub fn to_record(&self) -> HoursRecord {
        let total_hours = match (self.hours, &self.daily_hours) {
            (Some(hours), _) => hours,
            (None, Some(days)) => weekly_total(days),
            (None, None) => Decimal::ZERO,
        };

        HoursRecord {
            employee_id: self.id.clone().unwrap_or_else(|| self.name.clone()),
            name: self.name.clone(),
            total_hours,
            role: self.role.clone(),
            multiplier: self.multiplier,
        }
    }
}

impl CalculationRequest {
    /// Converts all entries into domain records, preserving order.
    pub fn to_records(&self) -> Vec<HoursRecord> {
        self.employees.iter().map(EmployeeEntry::to_record).collect()
    }
}
