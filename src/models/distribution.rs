//! Persisted distribution models.
//!
//! This module defines the shapes stored by the history layer: an
//! append-only [`DistributionRecord`] per saved calculation and the
//! [`EmployeeProfile`] rows upserted from each save.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{AllocationResult, HoursRecord};

/// The payload persisted with a distribution: the entries as submitted
/// plus the result computed from them. Immutable once saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedDistribution {
    /// The hours entries the calculation was run against.
    pub entries: Vec<HoursRecord>,
    /// The allocation result, stored verbatim.
    pub result: AllocationResult,
}

/// One saved distribution in the history listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionRecord {
    /// Generated identifier for this record.
    pub id: Uuid,
    /// When the distribution was saved.
    pub saved_at: DateTime<Utc>,
    /// The pool that was distributed.
    pub total_pool: Decimal,
    /// Sum of hours across all submitted entries, eligible or not.
    pub total_hours: Decimal,
    /// The saved entries and result.
    pub payload: SavedDistribution,
}

/// A known employee, remembered across saves with their latest role
/// and multiplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeProfile {
    /// The employee's display name (unique).
    pub name: String,
    /// The role recorded on the most recent save, if any.
    pub role: Option<String>,
    /// The multiplier resolved on the most recent save.
    pub multiplier: Decimal,
    /// When the employee last appeared in a saved distribution.
    pub last_seen: DateTime<Utc>,
}
