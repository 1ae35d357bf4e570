//! Account service implementation

use std::sync::Arc;

use chrono::Utc;
use common::error::{Error, ErrorExt, Result};
use common::model::account::{Account, AccountPatch, AccountRequest};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::chain::ValidationChain;
use crate::customer_client::{CustomerClient, HttpCustomerClient};
use crate::repository::{AccountRepository, InMemoryAccountRepository, PostgresAccountRepository};
use crate::validation::{validate_account_rules, validate_request};

/// Digits in a generated account number
const ACCOUNT_NUMBER_DIGITS: u32 = 14;

/// Attempts at drawing a free account number before giving up
const ACCOUNT_NUMBER_ATTEMPTS: usize = 5;

/// Account service: CRUD over bank accounts with creation-time business rules
pub struct AccountService {
    /// Repository for account data
    repo: Arc<dyn AccountRepository>,
    /// Customer service client
    customers: Arc<dyn CustomerClient>,
}

/// Repository Type
pub enum RepositoryType {
    /// In-memory repository
    InMemory,
    /// PostgreSQL repository
    Postgres(Option<String>),
}

impl AccountService {
    /// Create a new account service over explicit collaborators
    pub fn new(repo: Arc<dyn AccountRepository>, customers: Arc<dyn CustomerClient>) -> Self {
        Self { repo, customers }
    }

    /// Create a new account service with a specific repository type
    pub async fn with_repository(repo_type: RepositoryType, customers: Arc<dyn CustomerClient>) -> Result<Self> {
        let repo: Arc<dyn AccountRepository> = match repo_type {
            RepositoryType::InMemory => {
                Arc::new(InMemoryAccountRepository::new())
            },
            RepositoryType::Postgres(database_url) => {
                Arc::new(PostgresAccountRepository::new(database_url).await?)
            }
        };

        Ok(Self { repo, customers })
    }

    /// Create a new account service with a configuration
    pub async fn with_config(config: &crate::config::AccountServiceConfig) -> Result<Self> {
        let repo: Arc<dyn AccountRepository> = Arc::new(
            PostgresAccountRepository::with_config(config).await?
        );
        let customers: Arc<dyn CustomerClient> = Arc::new(HttpCustomerClient::from_config(config)?);

        Ok(Self { repo, customers })
    }

    /// Repository backing this service
    pub fn repository(&self) -> Arc<dyn AccountRepository> {
        Arc::clone(&self.repo)
    }

    /// Get every account
    pub async fn find_all(&self) -> Result<Vec<Account>> {
        self.repo.find_all().await
    }

    /// Get an account by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>> {
        let account = self.repo.find_by_id(id).await?;
        debug!("Lookup of account {}: found={}", id, account.is_some());
        Ok(account)
    }

    /// Get an account by account number
    pub async fn find_by_account_number(&self, account_number: &str) -> Result<Option<Account>> {
        let account = self.repo.find_by_account_number(account_number).await?;
        debug!("Lookup of account number {}: found={}", account_number, account.is_some());
        Ok(account)
    }

    /// Get all accounts of a customer
    pub async fn find_by_customer_id(&self, customer_id: &str) -> Result<Vec<Account>> {
        self.repo.find_by_customer_id(customer_id).await
    }

    /// Get an account only if it belongs to the customer
    pub async fn find_by_id_and_customer_id(&self, id: Uuid, customer_id: &str) -> Result<Option<Account>> {
        self.repo.find_by_id_and_customer_id(id, customer_id).await
    }

    /// Create a new account.
    ///
    /// Static field rules run first and fail before any external call. The
    /// customer is then fetched and the chain for its type decides whether
    /// the account may be opened.
    pub async fn create(&self, request: AccountRequest) -> Result<Account> {
        info!("Creating {} account for customer {}", request.account_type, request.customer_id);

        let mut account = Account::from_request(&request);

        if let Err(e) = validate_request(&request) {
            warn!("Rejected account request for customer {}: {}", request.customer_id, e);
            return Err(e);
        }

        let customer = self.customers.find_customer(&account.customer_id).await
            .with_context(|| format!("Failed to fetch customer {}", account.customer_id))?;

        let chain = ValidationChain::for_customer_type(customer.customer_type);
        if let Err(e) = chain.execute(&account, &customer, self.repo.as_ref()).await {
            warn!("{:?} chain rejected account for customer {}: {}", chain, customer.id, e);
            return Err(e);
        }

        account.account_number = self.assign_account_number(request.account_number.as_deref()).await?;
        account.stamp_opening(Utc::now());

        let saved = self.repo.save(account).await
            .with_context(|| format!("Failed to save account for customer {}", customer.id))?;

        info!("Opened account {} ({}) for customer {}", saved.id, saved.account_number, saved.customer_id);
        Ok(saved)
    }

    /// Apply a partial update to an existing account.
    ///
    /// The patch balance is added to the stored balance. The merged account
    /// must still satisfy its type's rules.
    pub async fn update(&self, id: Uuid, patch: AccountPatch) -> Result<Account> {
        info!("Updating account {}", id);

        let mut account = self.repo.find_by_id(id).await
            .with_context(|| format!("Failed to retrieve account {}", id))?
            .ok_or_else(|| Error::AccountNotFound(id.to_string()))?;

        if !account.apply_patch(&patch)? {
            debug!("Update of account {} changed nothing", id);
            return Ok(account);
        }

        validate_account_rules(&account)?;

        self.repo.save(account).await
            .with_context(|| format!("Failed to save account {}", id))
    }

    /// Delete an account; missing accounts are ignored
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        info!("Deleting account {}", id);
        self.repo.delete_by_id(id).await
    }

    async fn assign_account_number(&self, requested: Option<&str>) -> Result<String> {
        if let Some(number) = requested.map(str::trim).filter(|n| !n.is_empty()) {
            if self.repo.exists_by_account_number(number).await? {
                return Err(Error::ValidationError(format!("Numero de cuenta {} ya existe", number)));
            }
            return Ok(number.to_string());
        }

        for _ in 0..ACCOUNT_NUMBER_ATTEMPTS {
            let candidate = generate_account_number();
            if !self.repo.exists_by_account_number(&candidate).await? {
                return Ok(candidate);
            }
            debug!("Generated account number {} already taken", candidate);
        }

        Err(Error::Internal("Could not generate a free account number".to_string()))
    }
}

/// Random fixed-width numeric account number
fn generate_account_number() -> String {
    let modulus = 10u128.pow(ACCOUNT_NUMBER_DIGITS);
    let value = Uuid::new_v4().as_u128() % modulus;
    format!("{:0width$}", value, width = ACCOUNT_NUMBER_DIGITS as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_account_numbers() {
        let a = generate_account_number();
        let b = generate_account_number();

        assert_eq!(a.len(), ACCOUNT_NUMBER_DIGITS as usize);
        assert!(a.chars().all(|c| c.is_ascii_digit()));
        assert_ne!(a, b);
    }
}
