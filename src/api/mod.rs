//! HTTP API module for the tip pool engine.
//!
//! This module provides the REST endpoints for calculating, saving,
//! and browsing tip distributions.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CalculationRequest, EmployeeEntry};
pub use response::{ApiError, CalculationResponse, SaveResponse};
pub use state::AppState;
