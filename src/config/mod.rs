//! Configuration loading and management for the tip pool engine.
//!
//! This module provides the role-weight table and allocation policy,
//! loaded from YAML files or constructed programmatically. The role table
//! is always passed into the allocation pipeline explicitly; nothing in
//! the core reads configuration through a global.
//!
//! # Example
//!
//! ```no_run
//! use tip_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/tip_pool").unwrap();
//! println!("house share: {}", config.policy().house_share);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AllocationPolicy, DEFAULT_DENOMINATION, DEFAULT_HOUSE_SHARE, RoleWeightTable, RolesFile,
};
