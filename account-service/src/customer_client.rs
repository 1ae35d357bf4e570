//! Client for the external customer service

use std::time::Duration;

use async_trait::async_trait;
use common::error::{Error, Result};
use common::model::customer::Customer;
use dashmap::DashMap;
use reqwest::{Client, StatusCode, Url};
use tracing::{debug, warn};

use crate::config::{AccountServiceConfig, DEFAULT_CUSTOMER_SERVICE_URL};

/// Lookup of customer profiles
#[async_trait]
pub trait CustomerClient: Send + Sync {
    /// Fetch a customer by ID; fails when the customer does not exist
    async fn find_customer(&self, customer_id: &str) -> Result<Customer>;
}

/// Customer client talking to the customer service over HTTP
pub struct HttpCustomerClient {
    http_client: Client,
    base_url: String,
}

impl HttpCustomerClient {
    /// Create a client for the given base URL
    pub fn new(base_url: &str) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create a client with a request timeout
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::ConfigurationError(format!("Cannot build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a client from the service configuration
    pub fn from_config(config: &AccountServiceConfig) -> Result<Self> {
        Self::with_timeout(&config.customer_service_url, config.customer_service_timeout())
    }

    /// Resource URL for a customer; the ID is percent-encoded as one path segment
    fn customer_url(&self, customer_id: &str) -> Result<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            Error::ConfigurationError(format!("Invalid customer service URL {}: {}", self.base_url, e))
        })?;
        url.path_segments_mut()
            .map_err(|_| Error::ConfigurationError(format!("Customer service URL {} cannot take a path", self.base_url)))?
            .pop_if_empty()
            .extend(["api", "v1", "customer", customer_id]);
        Ok(url)
    }
}

impl Default for HttpCustomerClient {
    fn default() -> Self {
        Self::new(DEFAULT_CUSTOMER_SERVICE_URL)
    }
}

#[async_trait]
impl CustomerClient for HttpCustomerClient {
    async fn find_customer(&self, customer_id: &str) -> Result<Customer> {
        let url = self.customer_url(customer_id)?;
        debug!("Fetching customer from {}", url);

        let response = self.http_client.get(url.clone()).send().await.map_err(|e| {
            Error::CustomerService(format!("Request to {} failed: {}", url, e))
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(Error::CustomerNotFound(customer_id.to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|e| e.to_string());
            warn!("Customer service answered {} for {}: {}", status, customer_id, body);
            return Err(Error::CustomerService(format!(
                "Unexpected status {} for customer {}", status, customer_id
            )));
        }

        let customer = response.json::<Customer>().await.map_err(|e| {
            Error::CustomerService(format!("Invalid customer payload for {}: {}", customer_id, e))
        })?;

        if customer.id != customer_id {
            warn!("Customer service answered customer {} when asked for {}", customer.id, customer_id);
            return Err(Error::CustomerService(format!(
                "Customer service returned customer {} for {}", customer.id, customer_id
            )));
        }

        Ok(customer)
    }
}

/// In-memory customer directory for tests and local runs
pub struct InMemoryCustomerClient {
    /// Customers by ID
    pub customers: DashMap<String, Customer>,
}

impl InMemoryCustomerClient {
    /// Create an empty directory
    pub fn new() -> Self {
        Self {
            customers: DashMap::new(),
        }
    }

    /// Create a directory pre-populated with customers
    pub fn with_customers(customers: impl IntoIterator<Item = Customer>) -> Self {
        let client = Self::new();
        for customer in customers {
            client.insert(customer);
        }
        client
    }

    /// Register or replace a customer
    pub fn insert(&self, customer: Customer) {
        self.customers.insert(customer.id.clone(), customer);
    }
}

impl Default for InMemoryCustomerClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CustomerClient for InMemoryCustomerClient {
    async fn find_customer(&self, customer_id: &str) -> Result<Customer> {
        self.customers
            .get(customer_id)
            .map(|c| c.clone())
            .ok_or_else(|| Error::CustomerNotFound(customer_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::model::customer::CustomerType;

    #[test]
    fn test_customer_url_strips_trailing_slash() {
        let client = HttpCustomerClient::new("http://customers:8085/");
        assert_eq!(client.customer_url("c1").unwrap().as_str(), "http://customers:8085/api/v1/customer/c1");
    }

    #[test]
    fn test_customer_url_encodes_reserved_characters() {
        let client = HttpCustomerClient::new("http://customers:8085");
        assert_eq!(
            client.customer_url("c1?evil=1").unwrap().as_str(),
            "http://customers:8085/api/v1/customer/c1%3Fevil=1"
        );
        assert_eq!(
            client.customer_url("c1#frag").unwrap().as_str(),
            "http://customers:8085/api/v1/customer/c1%23frag"
        );
        assert_eq!(
            client.customer_url("x/../c1").unwrap().as_str(),
            "http://customers:8085/api/v1/customer/x%2F..%2Fc1"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let client = HttpCustomerClient::new("not a url");
        assert!(matches!(client.customer_url("c1"), Err(Error::ConfigurationError(_))));
    }

    #[tokio::test]
    async fn test_in_memory_lookup() {
        let client = InMemoryCustomerClient::with_customers([Customer::new("c1", CustomerType::Personal)]);

        let customer = client.find_customer("c1").await.unwrap();
        assert_eq!(customer.customer_type, CustomerType::Personal);

        match client.find_customer("missing").await {
            Err(Error::CustomerNotFound(id)) => assert_eq!(id, "missing"),
            other => panic!("Expected CustomerNotFound, got {:?}", other),
        }
    }
}
