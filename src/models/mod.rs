//! Core data models for the tip pool distribution engine.
//!
//! This module contains all the domain models used throughout the engine.

mod allocation;
mod distribution;
mod hours_record;

pub use allocation::{
    AllocationInput, AllocationResult, ExcludedContribution, ExclusionReason, HousePayout,
    PayoutLine, WeightedContribution,
};
pub use distribution::{DistributionRecord, EmployeeProfile, SavedDistribution};
pub use hours_record::HoursRecord;
