//! Account service: bank account records and the rules for opening them

pub mod chain;
pub mod config;
pub mod customer_client;
pub mod repository;
pub mod service;
pub mod validation;

pub use chain::ValidationChain;
pub use config::AccountServiceConfig;
pub use customer_client::{CustomerClient, HttpCustomerClient, InMemoryCustomerClient};
pub use repository::{AccountRepository, InMemoryAccountRepository, PostgresAccountRepository};
pub use service::{AccountService, RepositoryType};
