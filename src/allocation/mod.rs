//! Allocation logic for the tip pool distribution engine.
//!
//! This module contains the core computation: weighting hours records by
//! role multipliers, the pool allocation procedure with denomination
//! rounding and house residual, the best-fraction display helper, and
//! weekly hours aggregation.

mod allocate;
mod fraction;
mod rounding;
mod week;
mod weighting;

pub use allocate::{MAX_HOUSE_SHARE, allocate};
pub use fraction::{DEFAULT_MAX_DENOMINATOR, Fraction, best_fraction};
pub use rounding::round_to_denomination;
pub use week::{DAYS_PER_WEEK, weekly_total};
pub use weighting::{resolve_multiplier, weigh_record, weigh_records};
