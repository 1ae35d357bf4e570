//! Static field rules checked before any external call

use common::decimal::Amount;
use common::error::{Error, Result};
use common::model::account::{Account, AccountRequest, AccountType};
use rust_decimal::Decimal;

pub const MSG_NEGATIVE_OPENING: &str = "Monto de apertura de cuenta debe ser minimo de 0";
pub const MSG_SAVINGS_FEE: &str = "Cuenta de ahorro esta libre de comisión por mantenimiento";
pub const MSG_SAVINGS_LIMIT: &str = "Cuenta de ahorro debe tener un limite maximo de movimientos mensual";
pub const MSG_CHECKING_LIMIT: &str = "Cuenta corriente no debe tener limite de movimientos";
pub const MSG_FIXED_TERM_FEE: &str = "Cuenta Plazo fijo debe estar libre de comisión por mantenimiento";
pub const MSG_FIXED_TERM_LIMIT: &str = "Cuenta Plazo fijo solo puede hacer una transaccion al mes";
pub const MSG_FIXED_TERM_DAY: &str = "Cuenta Plazo se debe asignar un dia para realizar cualquier transaction";

/// Validate a creation request against the static field rules.
///
/// Fails on the first violated rule with its message.
pub fn validate_request(request: &AccountRequest) -> Result<()> {
    if request.opening_amount < Decimal::ZERO {
        return Err(invalid(MSG_NEGATIVE_OPENING));
    }

    validate_type_rules(
        request.account_type,
        request.maintenance_fee,
        request.monthly_transaction_limit,
        request.allowed_day_of_month,
    )
}

/// Validate a stored account against its type's invariants
pub fn validate_account_rules(account: &Account) -> Result<()> {
    validate_type_rules(
        account.account_type,
        account.maintenance_fee,
        account.monthly_transaction_limit,
        account.allowed_day_of_month,
    )
}

fn validate_type_rules(
    account_type: AccountType,
    maintenance_fee: Option<Amount>,
    monthly_transaction_limit: Option<i32>,
    allowed_day_of_month: Option<i32>,
) -> Result<()> {
    let charges_fee = maintenance_fee.map_or(false, |fee| fee > Decimal::ZERO);

    match account_type {
        AccountType::Savings => {
            if charges_fee {
                return Err(invalid(MSG_SAVINGS_FEE));
            }
            if monthly_transaction_limit.unwrap_or(0) == 0 {
                return Err(invalid(MSG_SAVINGS_LIMIT));
            }
        }
        AccountType::Checking => {
            if monthly_transaction_limit.unwrap_or(0) > 0 {
                return Err(invalid(MSG_CHECKING_LIMIT));
            }
        }
        AccountType::FixedTerm => {
            if charges_fee {
                return Err(invalid(MSG_FIXED_TERM_FEE));
            }
            if monthly_transaction_limit != Some(1) {
                return Err(invalid(MSG_FIXED_TERM_LIMIT));
            }
            if allowed_day_of_month.unwrap_or(0) == 0 {
                return Err(invalid(MSG_FIXED_TERM_DAY));
            }
        }
    }

    Ok(())
}

fn invalid(message: &str) -> Error {
    Error::ValidationError(message.to_string())
}
