//! HTTP API module for the Incentive Engine.
//!
//! This module exposes the batch incentive calculation and the effective
//! threshold table over JSON.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CalculationRequest, PeriodRequest, SalesRowRequest, ValidatedRequest};
pub use response::{ApiError, CalculationResponse, ThresholdsResponse};
pub use state::AppState;
