//! Repository for account data

use async_trait::async_trait;
use common::db::{self, DbAccount};
use common::error::{Error, Result};
use common::model::account::{Account, AccountType};
use dashmap::DashMap;
use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

/// Account repository trait defining the interface for account data storage
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Get every account
    async fn find_all(&self) -> Result<Vec<Account>>;

    /// Get an account by ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>>;

    /// Get an account by its account number
    async fn find_by_account_number(&self, account_number: &str) -> Result<Option<Account>>;

    /// Get all accounts held by a customer
    async fn find_by_customer_id(&self, customer_id: &str) -> Result<Vec<Account>>;

    /// Get an account by ID, only if it belongs to the given customer
    async fn find_by_id_and_customer_id(&self, id: Uuid, customer_id: &str) -> Result<Option<Account>>;

    /// Get a customer's accounts of one type
    async fn find_by_customer_id_and_type(&self, customer_id: &str, account_type: AccountType) -> Result<Vec<Account>>;

    /// Count a customer's accounts of one type
    async fn count_by_customer_id_and_type(&self, customer_id: &str, account_type: AccountType) -> Result<u64> {
        Ok(self.find_by_customer_id_and_type(customer_id, account_type).await?.len() as u64)
    }

    /// Insert or update an account
    async fn save(&self, account: Account) -> Result<Account>;

    /// Delete an account; deleting a missing account is a no-op
    async fn delete_by_id(&self, id: Uuid) -> Result<()>;

    /// Whether an account number is already taken
    async fn exists_by_account_number(&self, account_number: &str) -> Result<bool>;
}

/// In-memory repository for account data
pub struct InMemoryAccountRepository {
    /// Accounts by ID
    pub accounts: DashMap<Uuid, Account>,
}

impl InMemoryAccountRepository {
    /// Create a new in-memory account repository
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
        }
    }

    fn filtered<F>(&self, predicate: F) -> Vec<Account>
    where
        F: Fn(&Account) -> bool,
    {
        let mut accounts: Vec<Account> = self.accounts
            .iter()
            .filter(|entry| predicate(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();

        accounts.sort_by(|a, b| a.opening_date.cmp(&b.opening_date).then(a.id.cmp(&b.id)));
        accounts
    }
}

impl Default for InMemoryAccountRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn find_all(&self) -> Result<Vec<Account>> {
        Ok(self.filtered(|_| true))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>> {
        Ok(self.accounts.get(&id).map(|a| a.clone()))
    }

    async fn find_by_account_number(&self, account_number: &str) -> Result<Option<Account>> {
        Ok(self.filtered(|a| a.account_number == account_number).into_iter().next())
    }

    async fn find_by_customer_id(&self, customer_id: &str) -> Result<Vec<Account>> {
        Ok(self.filtered(|a| a.customer_id == customer_id))
    }

    async fn find_by_id_and_customer_id(&self, id: Uuid, customer_id: &str) -> Result<Option<Account>> {
        Ok(self.accounts
            .get(&id)
            .filter(|a| a.customer_id == customer_id)
            .map(|a| a.clone()))
    }

    async fn find_by_customer_id_and_type(&self, customer_id: &str, account_type: AccountType) -> Result<Vec<Account>> {
        Ok(self.filtered(|a| a.customer_id == customer_id && a.account_type == account_type))
    }

    async fn save(&self, account: Account) -> Result<Account> {
        self.accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<()> {
        self.accounts.remove(&id);
        Ok(())
    }

    async fn exists_by_account_number(&self, account_number: &str) -> Result<bool> {
        Ok(self.accounts.iter().any(|entry| entry.value().account_number == account_number))
    }
}

const ACCOUNT_COLUMNS: &str = "id, account_number, customer_id, account_type, balance, \
     opening_date, last_transaction_date, maintenance_fee, monthly_transaction_limit, \
     allowed_day_of_month, co_holders, authorized_signers";

/// PostgreSQL repository for account data
pub struct PostgresAccountRepository {
    /// Database connection pool
    pool: PgPool,
}

impl PostgresAccountRepository {
    /// Create a new PostgreSQL account repository
    pub async fn new(database_url: Option<String>) -> Result<Self> {
        let database_url = match database_url {
            Some(url) => url,
            None => std::env::var("DATABASE_URL")
                .map_err(|_| Error::ConfigurationError("DATABASE_URL must be set".to_string()))?,
        };

        let pool = db::init_db_pool(&database_url, 5).await?;
        Ok(Self { pool })
    }

    /// Create a new PostgreSQL account repository with configuration
    pub async fn with_config(config: &crate::config::AccountServiceConfig) -> Result<Self> {
        info!("Connecting to PostgreSQL database with pool size: {}", config.db_pool_size);

        let pool = db::init_db_pool(&config.database_url, config.db_pool_size).await?;
        Ok(Self { pool })
    }

    /// Underlying connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn into_accounts(rows: Vec<DbAccount>) -> Result<Vec<Account>> {
    rows.into_iter().map(Account::try_from).collect()
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn find_all(&self) -> Result<Vec<Account>> {
        debug!("Loading all accounts from database");

        let rows = sqlx::query_as::<_, DbAccount>(&format!(
            "SELECT {} FROM accounts ORDER BY opening_date, id",
            ACCOUNT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        into_accounts(rows)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>> {
        debug!("Getting account from database: {}", id);

        let row = sqlx::query_as::<_, DbAccount>(&format!(
            "SELECT {} FROM accounts WHERE id = $1",
            ACCOUNT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Account::try_from).transpose()
    }

    async fn find_by_account_number(&self, account_number: &str) -> Result<Option<Account>> {
        debug!("Getting account by number from database: {}", account_number);

        let row = sqlx::query_as::<_, DbAccount>(&format!(
            "SELECT {} FROM accounts WHERE account_number = $1",
            ACCOUNT_COLUMNS
        ))
        .bind(account_number)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Account::try_from).transpose()
    }

    async fn find_by_customer_id(&self, customer_id: &str) -> Result<Vec<Account>> {
        debug!("Getting accounts for customer: {}", customer_id);

        let rows = sqlx::query_as::<_, DbAccount>(&format!(
            "SELECT {} FROM accounts WHERE customer_id = $1 ORDER BY opening_date, id",
            ACCOUNT_COLUMNS
        ))
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        into_accounts(rows)
    }

    async fn find_by_id_and_customer_id(&self, id: Uuid, customer_id: &str) -> Result<Option<Account>> {
        let row = sqlx::query_as::<_, DbAccount>(&format!(
            "SELECT {} FROM accounts WHERE id = $1 AND customer_id = $2",
            ACCOUNT_COLUMNS
        ))
        .bind(id)
        .bind(customer_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Account::try_from).transpose()
    }

    async fn find_by_customer_id_and_type(&self, customer_id: &str, account_type: AccountType) -> Result<Vec<Account>> {
        let rows = sqlx::query_as::<_, DbAccount>(&format!(
            "SELECT {} FROM accounts WHERE customer_id = $1 AND account_type = $2 ORDER BY opening_date, id",
            ACCOUNT_COLUMNS
        ))
        .bind(customer_id)
        .bind(account_type.as_str())
        .fetch_all(&self.pool)
        .await?;

        into_accounts(rows)
    }

    async fn count_by_customer_id_and_type(&self, customer_id: &str, account_type: AccountType) -> Result<u64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM accounts WHERE customer_id = $1 AND account_type = $2"
        )
        .bind(customer_id)
        .bind(account_type.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(count.max(0) as u64)
    }

    async fn save(&self, account: Account) -> Result<Account> {
        debug!("Saving account {} ({})", account.id, account.account_number);

        let row = DbAccount::from(&account);
        sqlx::query(
            "INSERT INTO accounts (id, account_number, customer_id, account_type, balance,
                opening_date, last_transaction_date, maintenance_fee, monthly_transaction_limit,
                allowed_day_of_month, co_holders, authorized_signers)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             ON CONFLICT (id)
             DO UPDATE SET
                account_number = $2,
                customer_id = $3,
                account_type = $4,
                balance = $5,
                opening_date = $6,
                last_transaction_date = $7,
                maintenance_fee = $8,
                monthly_transaction_limit = $9,
                allowed_day_of_month = $10,
                co_holders = $11,
                authorized_signers = $12"
        )
        .bind(row.id)
        .bind(&row.account_number)
        .bind(&row.customer_id)
        .bind(&row.account_type)
        .bind(&row.balance)
        .bind(row.opening_date)
        .bind(row.last_transaction_date)
        .bind(&row.maintenance_fee)
        .bind(row.monthly_transaction_limit)
        .bind(row.allowed_day_of_month)
        .bind(&row.co_holders)
        .bind(&row.authorized_signers)
        .execute(&self.pool)
        .await?;

        Ok(account)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        debug!("Deleted {} account row(s) for {}", result.rows_affected(), id);
        Ok(())
    }

    async fn exists_by_account_number(&self, account_number: &str) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM accounts WHERE account_number = $1)"
        )
        .bind(account_number)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}
