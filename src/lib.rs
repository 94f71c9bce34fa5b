//! Tip Pool Distribution Engine
//!
//! This crate distributes a pooled gratuity amount across a week's
//! employees in proportion to role-weighted hours, rounds each payout
//! to a cash denomination, and books the rounding residue against a
//! house entry so every dollar of the pool is accounted for.

#![warn(missing_docs)]

pub mod allocation;
pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
