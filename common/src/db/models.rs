use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::decimal::precision::parse_amount;
use crate::error::{Error, ErrorExt};
use crate::model::account::Account;

/// Database model for the accounts table
///
/// Amounts are stored as TEXT and parsed back into decimals.
#[derive(Debug, Clone, FromRow)]
pub struct DbAccount {
    pub id: Uuid,
    pub account_number: String,
    pub customer_id: String,
    pub account_type: String,
    pub balance: String,
    pub opening_date: DateTime<Utc>,
    pub last_transaction_date: DateTime<Utc>,
    pub maintenance_fee: Option<String>,
    pub monthly_transaction_limit: Option<i32>,
    pub allowed_day_of_month: Option<i32>,
    pub co_holders: Vec<String>,
    pub authorized_signers: Vec<String>,
}

impl TryFrom<DbAccount> for Account {
    type Error = Error;

    fn try_from(row: DbAccount) -> Result<Self, Self::Error> {
        let balance = parse_amount(&row.balance)
            .with_context(|| format!("Invalid balance for account {}", row.id))?;
        let maintenance_fee = row
            .maintenance_fee
            .as_deref()
            .map(parse_amount)
            .transpose()
            .with_context(|| format!("Invalid maintenance fee for account {}", row.id))?;

        Ok(Account {
            id: row.id,
            account_number: row.account_number,
            customer_id: row.customer_id,
            account_type: row.account_type.parse()?,
            balance,
            opening_date: row.opening_date,
            last_transaction_date: row.last_transaction_date,
            maintenance_fee,
            monthly_transaction_limit: row.monthly_transaction_limit,
            allowed_day_of_month: row.allowed_day_of_month,
            co_holders: row.co_holders,
            authorized_signers: row.authorized_signers,
        })
    }
}

impl From<&Account> for DbAccount {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            account_number: account.account_number.clone(),
            customer_id: account.customer_id.clone(),
            account_type: account.account_type.as_str().to_string(),
            balance: account.balance.to_string(),
            opening_date: account.opening_date,
            last_transaction_date: account.last_transaction_date,
            maintenance_fee: account.maintenance_fee.map(|fee| fee.to_string()),
            monthly_transaction_limit: account.monthly_transaction_limit,
            allowed_day_of_month: account.allowed_day_of_month,
            co_holders: account.co_holders.clone(),
            authorized_signers: account.authorized_signers.clone(),
        }
    }
}
