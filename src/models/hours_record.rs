//! Hours record model.
//!
//! This module defines the [`HoursRecord`] struct representing one
//! employee's weekly hours entry before weighting.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One employee's hours entry for a distribution period.
///
/// Records arrive from the entry grid with a display name, the week's
/// total hours and an optional role. An explicit `multiplier` overrides
/// the role-weight table lookup for this record only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoursRecord {
    /// Opaque stable identifier for the employee.
    pub employee_id: String,
    /// Display name. Records with an empty name are excluded from allocation.
    pub name: String,
    /// Total hours worked in the period. Non-positive hours exclude the record.
    pub total_hours: Decimal,
    /// Role label, a key into the role-weight table. Unrecognized or absent
    /// roles resolve to the table's default role.
    #[serde(default)]
    pub role: Option<String>,
    /// Optional multiplier override, taking precedence over the role table.
    #[serde(default)]
    pub multiplier: Option<Decimal>,
}

impl HoursRecord {
    /// Returns true if this record participates in allocation.
    ///
    /// Eligible records have a non-empty (after trimming) name and strictly
    /// positive hours.
    ///
    /// # Examples
    ///
    /// ```
    /// use tip_engine::models::HoursRecord;
    /// use rust_decimal::Decimal;
    ///
    /// let record = HoursRecord {
    ///     employee_id: "alice".to_string(),
    ///     name: "Alice".to_string(),
    ///     total_hours: Decimal::from(40),
    ///     role: None,
    ///     multiplier: None,
    /// };
    /// assert!(record.is_eligible());
    /// ```
    pub fn is_eligible(&self) -> bool {
        !self.name.trim().is_empty() && self.total_hours > Decimal::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn record(name: &str, hours: &str) -> HoursRecord {
        HoursRecord {
            employee_id: name.to_string(),
            name: name.to_string(),
            total_hours: dec(hours),
            role: None,
            multiplier: None,
        }
    }

    #[test]
    fn test_eligible_with_name_and_positive_hours() {
        assert!(record("Alice", "40").is_eligible());
    }

    #[test]
    fn test_empty_name_is_not_eligible() {
        assert!(!record("", "40").is_eligible());
    }

    #[test]
    fn test_whitespace_name_is_not_eligible() {
        assert!(!record("   ", "40").is_eligible());
    }

    #[test]
    fn test_zero_hours_is_not_eligible() {
        assert!(!record("Alice", "0").is_eligible());
    }

    #[test]
    fn test_negative_hours_is_not_eligible() {
        assert!(!record("Alice", "-2.5").is_eligible());
    }

    #[test]
    fn test_deserialize_minimal_record() {
        let json = r#"{
            "employee_id": "alice",
            "name": "Alice",
            "total_hours": "38.5"
        }"#;

        let record: HoursRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.employee_id, "alice");
        assert_eq!(record.total_hours, dec("38.5"));
        assert_eq!(record.role, None);
        assert_eq!(record.multiplier, None);
    }

    #[test]
    fn test_deserialize_record_with_role_and_override() {
        let json = r#"{
            "employee_id": "bob",
            "name": "Bob",
            "total_hours": "30",
            "role": "kitchen",
            "multiplier": "0.75"
        }"#;

        let record: HoursRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.role.as_deref(), Some("kitchen"));
        assert_eq!(record.multiplier, Some(dec("0.75")));
    }

    #[test]
    fn test_serialize_round_trip() {
        let record = HoursRecord {
            employee_id: "carol".to_string(),
            name: "Carol".to_string(),
            total_hours: dec("22.25"),
            role: Some("new".to_string()),
            multiplier: None,
        };

        let json = serde_json::to_string(&record).unwrap();
        let deserialized: HoursRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, deserialized);
    }
}
