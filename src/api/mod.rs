//! HTTP API for the PAYE calculation engine.
//!
//! This module provides an axum router exposing the engine over HTTP:
//! `POST /calculate` for a deduction breakdown and `GET /tax-years` for the
//! supported tax-year labels.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::{TaxYearsResponse, create_router};
pub use request::CalculateApiRequest;
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
