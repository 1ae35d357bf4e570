//! Customer-type validation chains run before an account is persisted
//!
//! Each customer type maps to a fixed, ordered list of rules. Rules may read
//! the repository (e.g. to count the customer's existing accounts) and fail
//! with [`Error::BusinessRule`]. Reads and the later write are not atomic, so
//! two concurrent creations for the same customer can both pass the limits.

use common::error::{Error, Result};
use common::model::account::{Account, AccountType};
use common::model::customer::{Customer, CustomerType};
use tracing::debug;

use crate::repository::AccountRepository;

pub const MSG_BUSINESS_ACCOUNT_TYPE: &str = "Business customers cannot have savings or fixed-term accounts";
pub const MSG_ACCOUNT_LIMIT: &str = "Customer already has an account of this type";

/// Single check within a chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Account type must be allowed for the customer type
    CustomerType,
    /// At most one savings and one checking account per customer
    AccountLimits,
}

/// Validation chain selected by customer type.
///
/// Both chains currently run the same rules; the customer type changes the
/// outcome inside [`validate_customer_type`]. Checks that only apply to one
/// customer type, such as a credit check against the credit service, belong
/// in that chain's arm of [`ValidationChain::rules`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationChain {
    Personal,
    Business,
}

impl ValidationChain {
    /// Select the chain responsible for a customer type
    pub fn for_customer_type(customer_type: CustomerType) -> Self {
        match customer_type {
            CustomerType::Personal => ValidationChain::Personal,
            CustomerType::Business => ValidationChain::Business,
        }
    }

    /// Rules of this chain, in execution order
    pub fn rules(&self) -> &'static [Rule] {
        match self {
            ValidationChain::Personal => &[Rule::CustomerType, Rule::AccountLimits],
            ValidationChain::Business => &[Rule::CustomerType, Rule::AccountLimits],
        }
    }

    /// Run every rule against the pending account, stopping at the first failure
    pub async fn execute(
        &self,
        account: &Account,
        customer: &Customer,
        repo: &dyn AccountRepository,
    ) -> Result<()> {
        for rule in self.rules() {
            debug!("Running {:?} rule of {:?} chain for customer {}", rule, self, customer.id);
            match rule {
                Rule::CustomerType => validate_customer_type(customer.customer_type, account.account_type)?,
                Rule::AccountLimits => {
                    validate_account_limits(repo, &account.customer_id, account.account_type).await?
                }
            }
        }
        Ok(())
    }
}

/// Business customers may not hold savings or fixed-term accounts
pub fn validate_customer_type(customer_type: CustomerType, account_type: AccountType) -> Result<()> {
    let barred = customer_type == CustomerType::Business
        && matches!(account_type, AccountType::Savings | AccountType::FixedTerm);

    if barred {
        return Err(Error::BusinessRule(MSG_BUSINESS_ACCOUNT_TYPE.to_string()));
    }
    Ok(())
}

/// A customer may hold at most one savings and one checking account.
///
/// Fixed-term accounts are not limited.
pub async fn validate_account_limits(
    repo: &dyn AccountRepository,
    customer_id: &str,
    account_type: AccountType,
) -> Result<()> {
    if !matches!(account_type, AccountType::Savings | AccountType::Checking) {
        return Ok(());
    }

    let existing = repo.count_by_customer_id_and_type(customer_id, account_type).await?;
    if existing > 0 {
        return Err(Error::BusinessRule(MSG_ACCOUNT_LIMIT.to_string()));
    }
    Ok(())
}
