//! Configuration types for tip pool allocation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files: the role-weight table
//! and the allocation policy.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

use crate::error::{EngineError, EngineResult};

/// Default house-share fraction (2% of the pool).
pub const DEFAULT_HOUSE_SHARE: Decimal = Decimal::from_parts(2, 0, 0, false, 2);

/// Default payout rounding denomination ($5).
pub const DEFAULT_DENOMINATION: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// Raw shape of `roles.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct RolesFile {
    /// The role assumed for absent or unrecognized role labels.
    pub default_role: String,
    /// Map of role label to multiplier.
    pub weights: HashMap<String, Decimal>,
}

/// The injectable table mapping role labels to multipliers in (0, 1].
///
/// Lookups are case-insensitive; absent or unrecognized roles resolve to
/// the default role's weight. The table is validated on construction and
/// never mutated afterwards.
///
/// # Example
///
/// ```
/// use tip_engine::config::RoleWeightTable;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let table = RoleWeightTable::standard();
/// assert_eq!(
///     table.multiplier_for(Some("kitchen")),
///     Decimal::from_str("0.5").unwrap()
/// );
/// // Unknown roles fall back to the default role ("waiter", 0.8).
/// assert_eq!(
///     table.multiplier_for(Some("sommelier")),
///     Decimal::from_str("0.8").unwrap()
/// );
/// ```
#[derive(Debug, Clone)]
pub struct RoleWeightTable {
    default_role: String,
    weights: HashMap<String, Decimal>,
}

impl RoleWeightTable {
    /// Creates a validated table from a default role and weight map.
    ///
    /// Role labels are lowercased for lookup. Fails with
    /// [`EngineError::InvalidRoleWeight`] if any weight lies outside
    /// (0, 1] or the default role has no weight.
    pub fn new(default_role: impl Into<String>, weights: HashMap<String, Decimal>) -> EngineResult<Self> {
        let default_role = default_role.into().to_lowercase();
        let mut normalized = HashMap::with_capacity(weights.len());

        for (role, weight) in weights {
            if weight <= Decimal::ZERO || weight > Decimal::ONE {
                return Err(EngineError::InvalidRoleWeight {
                    role,
                    message: format!("weight {} must be in (0, 1]", weight),
                });
            }
            normalized.insert(role.to_lowercase(), weight);
        }

        if !normalized.contains_key(&default_role) {
            return Err(EngineError::InvalidRoleWeight {
                role: default_role,
                message: "default role has no weight".to_string(),
            });
        }

        Ok(Self {
            default_role,
            weights: normalized,
        })
    }

    /// The built-in standard table.
    ///
    /// `experienced waiter` 1.0, `waiter` 0.8, `kitchen` 0.5, `new` 0.6;
    /// default role `waiter`.
    pub fn standard() -> Self {
        let weights = HashMap::from([
            ("experienced waiter".to_string(), Decimal::ONE),
            ("waiter".to_string(), Decimal::from_parts(8, 0, 0, false, 1)),
            ("kitchen".to_string(), Decimal::from_parts(5, 0, 0, false, 1)),
            ("new".to_string(), Decimal::from_parts(6, 0, 0, false, 1)),
        ]);
        Self::new("waiter", weights).expect("standard table is valid")
    }

    /// Resolves the multiplier for a role label.
    ///
    /// `None` and unknown labels both resolve to the default role's weight.
    pub fn multiplier_for(&self, role: Option<&str>) -> Decimal {
        role.map(|r| r.trim().to_lowercase())
            .and_then(|r| self.weights.get(&r).copied())
            .unwrap_or_else(|| self.weights[&self.default_role])
    }

    /// The role assumed when a record carries no recognized role.
    pub fn default_role(&self) -> &str {
        &self.default_role
    }

    /// All configured weights, keyed by lowercase role label.
    pub fn weights(&self) -> &HashMap<String, Decimal> {
        &self.weights
    }
}

impl TryFrom<RolesFile> for RoleWeightTable {
    type Error = EngineError;

    fn try_from(file: RolesFile) -> EngineResult<Self> {
        Self::new(file.default_role, file.weights)
    }
}

/// Allocation policy: the house share and rounding denomination applied
/// when a calculation request does not override them.
#[derive(Debug, Clone, Deserialize)]
pub struct AllocationPolicy {
    /// Fraction of the pool reserved for the establishment.
    #[serde(default = "default_house_share")]
    pub house_share: Decimal,
    /// Rounding denomination for employee payouts.
    #[serde(default = "default_denomination")]
    pub denomination: Decimal,
}

fn default_house_share() -> Decimal {
    DEFAULT_HOUSE_SHARE
}

fn default_denomination() -> Decimal {
    DEFAULT_DENOMINATION
}

impl Default for AllocationPolicy {
    fn default() -> Self {
        Self {
            house_share: DEFAULT_HOUSE_SHARE,
            denomination: DEFAULT_DENOMINATION,
        }
    }
}
