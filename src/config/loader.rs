//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the role
//! weight table and allocation policy from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{AllocationPolicy, RoleWeightTable, RolesFile};

/// Loads and provides access to the tip pool configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory and
/// exposes the validated role-weight table and allocation policy.
///
/// # Directory Structure
///
/// ```text
/// config/tip_pool/
/// ├── roles.yaml   # default role + role-weight map
/// └── policy.yaml  # house share + rounding denomination
/// ```
///
/// # Example
///
/// ```no_run
/// use tip_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/tip_pool").unwrap();
/// println!("default role: {}", loader.roles().default_role());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    roles: RoleWeightTable,
    policy: AllocationPolicy,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if either file is missing (`ConfigNotFound`),
    /// contains invalid YAML (`ConfigParseError`), or the role table fails
    /// validation (`InvalidRoleWeight`).
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let roles_file = Self::load_yaml::<RolesFile>(&path.join("roles.yaml"))?;
        let roles = RoleWeightTable::try_from(roles_file)?;

        let policy = Self::load_yaml::<AllocationPolicy>(&path.join("policy.yaml"))?;

        Ok(Self { roles, policy })
    }

    /// Builds a loader from in-memory parts, bypassing the filesystem.
    ///
    /// Useful for tests and embedded callers that construct alternate
    /// weight schemes programmatically.
    pub fn from_parts(roles: RoleWeightTable, policy: AllocationPolicy) -> Self {
        Self { roles, policy }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// The validated role-weight table.
    pub fn roles(&self) -> &RoleWeightTable {
        &self.roles
    }

    /// The allocation policy.
    pub fn policy(&self) -> &AllocationPolicy {
        &self.policy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_load_shipped_config() {
        let loader = ConfigLoader::load("./config/tip_pool").unwrap();

        assert_eq!(loader.roles().default_role(), "waiter");
        assert_eq!(loader.roles().multiplier_for(Some("kitchen")), dec("0.5"));
        assert_eq!(loader.policy().house_share, dec("0.02"));
        assert_eq!(loader.policy().denomination, dec("5"));
    }

    #[test]
    fn test_missing_directory_returns_config_not_found() {
        let result = ConfigLoader::load("./config/does_not_exist");

        match result.unwrap_err() {
            EngineError::ConfigNotFound { path } => {
                assert!(path.contains("roles.yaml"));
            }
            other => panic!("Expected ConfigNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_from_parts_skips_filesystem() {
        let loader = ConfigLoader::from_parts(
            RoleWeightTable::standard(),
            AllocationPolicy::default(),
        );

        assert_eq!(loader.roles().multiplier_for(None), dec("0.8"));
        assert_eq!(loader.policy().denomination, dec("5"));
    }
}
