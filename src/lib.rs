//! Metapackage tying the account workspace together for end-to-end tests

pub use account_service;
pub use api_gateway;
pub use common;
