//! Customer projection as served by the customer service

use serde::{Deserialize, Serialize};
#[cfg(feature = "utoipa")]
use crate::utoipa::ToSchema;

/// Kind of customer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CustomerType {
    Personal,
    Business,
}

/// Read-only customer record owned by the customer service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Customer ID
    pub id: String,
    /// Customer type
    #[serde(rename = "type")]
    pub customer_type: CustomerType,
}

impl Customer {
    pub fn new(id: impl Into<String>, customer_type: CustomerType) -> Self {
        Self {
            id: id.into(),
            customer_type,
        }
    }
}
