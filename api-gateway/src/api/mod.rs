//! API handlers
//!
//! This module contains all the API endpoint handlers organized by resource.
//! Each handler follows a consistent pattern:
//! - Extract state and parameters using Axum extractors
//! - Call the appropriate service method
//! - Map the result to a standardized response format

pub mod account;
pub mod customer;
pub mod response;

// Re-export the response module for easy access
pub use response::{ApiResponse, ApiListResponse};
