//! HTTP API module for the Labor Cost Engine.
//!
//! This module exposes the accrual, severance and cost report calculations
//! as JSON endpoints.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CalculationRequest, EmploymentRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
