//! Account models and related types

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Amount;
use crate::error::Error;
#[cfg(feature = "utoipa")]
use crate::utoipa::ToSchema;

/// Kind of bank account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountType {
    /// Savings account: no maintenance fee, capped monthly movements
    Savings,
    /// Checking account: unlimited monthly movements
    Checking,
    /// Fixed-term deposit: one movement per month on a fixed day
    FixedTerm,
}

impl AccountType {
    /// Storage/wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Savings => "SAVINGS",
            AccountType::Checking => "CHECKING",
            AccountType::FixedTerm => "FIXED_TERM",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SAVINGS" => Ok(AccountType::Savings),
            "CHECKING" => Ok(AccountType::Checking),
            "FIXED_TERM" => Ok(AccountType::FixedTerm),
            other => Err(Error::Internal(format!("Unknown account type: {}", other))),
        }
    }
}

/// Account model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Unique account ID
    pub id: Uuid,
    /// Customer-facing account number
    pub account_number: String,
    /// Owning customer
    pub customer_id: String,
    /// Account type
    #[serde(rename = "type")]
    pub account_type: AccountType,
    /// Current balance
    pub balance: Amount,
    /// When the account was opened
    pub opening_date: DateTime<Utc>,
    /// Last movement on the account
    pub last_transaction_date: DateTime<Utc>,
    /// Monthly maintenance fee
    pub maintenance_fee: Option<Amount>,
    /// Maximum number of movements per month
    pub monthly_transaction_limit: Option<i32>,
    /// Only day of the month movements are allowed (fixed-term)
    pub allowed_day_of_month: Option<i32>,
    /// Co-holders of the account
    #[serde(default)]
    pub co_holders: Vec<String>,
    /// Authorized signers (business accounts)
    #[serde(default)]
    pub authorized_signers: Vec<String>,
}

impl Account {
    /// Build an unsaved account from a creation request.
    ///
    /// The balance starts at the opening amount. The account number is left
    /// empty when the request carries none; the service assigns one.
    pub fn from_request(request: &AccountRequest) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            account_number: request.account_number.clone().unwrap_or_default(),
            customer_id: request.customer_id.clone(),
            account_type: request.account_type,
            balance: request.opening_amount,
            opening_date: now,
            last_transaction_date: now,
            maintenance_fee: request.maintenance_fee,
            monthly_transaction_limit: request.monthly_transaction_limit,
            allowed_day_of_month: request.allowed_day_of_month,
            co_holders: request.co_holders.clone(),
            authorized_signers: request.authorized_signers.clone(),
        }
    }

    /// Stamp opening and last-transaction dates
    pub fn stamp_opening(&mut self, at: DateTime<Utc>) {
        self.opening_date = at;
        self.last_transaction_date = at;
    }

    /// Merge a partial update into this account.
    ///
    /// The balance in the patch is a delta added to the current balance.
    /// Returns true when any field changed. A delta that overflows the
    /// balance fails and leaves the account untouched.
    pub fn apply_patch(&mut self, patch: &AccountPatch) -> crate::error::Result<bool> {
        let balance = match patch.balance {
            Some(delta) => self.balance.checked_add(delta).ok_or_else(|| {
                Error::ValidationError(format!("Balance change {} overflows balance {}", delta, self.balance))
            })?,
            None => self.balance,
        };
        let before = self.clone();

        self.balance = balance;
        if let Some(fee) = patch.maintenance_fee {
            self.maintenance_fee = Some(fee);
        }
        if let Some(limit) = patch.monthly_transaction_limit {
            self.monthly_transaction_limit = Some(limit);
        }
        if let Some(day) = patch.allowed_day_of_month {
            self.allowed_day_of_month = Some(day);
        }
        if let Some(holders) = &patch.co_holders {
            self.co_holders = holders.clone();
        }
        if let Some(signers) = &patch.authorized_signers {
            self.authorized_signers = signers.clone();
        }

        Ok(*self != before)
    }
}

/// Account creation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct AccountRequest {
    /// Owning customer
    pub customer_id: String,
    /// Requested account type
    #[serde(rename = "type")]
    pub account_type: AccountType,
    /// Initial deposit
    pub opening_amount: Amount,
    /// Explicit account number; generated when absent
    #[serde(default)]
    pub account_number: Option<String>,
    #[serde(default)]
    pub maintenance_fee: Option<Amount>,
    #[serde(default)]
    pub monthly_transaction_limit: Option<i32>,
    #[serde(default)]
    pub allowed_day_of_month: Option<i32>,
    #[serde(default)]
    pub co_holders: Vec<String>,
    #[serde(default)]
    pub authorized_signers: Vec<String>,
}

impl AccountRequest {
    /// Minimal request for the given customer, type and opening amount
    pub fn new(customer_id: impl Into<String>, account_type: AccountType, opening_amount: Amount) -> Self {
        Self {
            customer_id: customer_id.into(),
            account_type,
            opening_amount,
            account_number: None,
            maintenance_fee: None,
            monthly_transaction_limit: None,
            allowed_day_of_month: None,
            co_holders: Vec::new(),
            authorized_signers: Vec::new(),
        }
    }
}

/// Partial account update; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct AccountPatch {
    /// Amount to add to the current balance (negative to subtract)
    #[serde(default)]
    pub balance: Option<Amount>,
    #[serde(default)]
    pub maintenance_fee: Option<Amount>,
    #[serde(default)]
    pub monthly_transaction_limit: Option<i32>,
    #[serde(default)]
    pub allowed_day_of_month: Option<i32>,
    /// Replaces the co-holder list
    #[serde(default)]
    pub co_holders: Option<Vec<String>>,
    /// Replaces the authorized signer list
    #[serde(default)]
    pub authorized_signers: Option<Vec<String>>,
}
