//! Decimal type utilities for precise monetary calculations

use rust_decimal::Decimal;
pub use rust_decimal_macros::dec;

/// Monetary amount (balances, opening amounts, fees)
pub type Amount = Decimal;

/// Conversions for amounts stored as text
pub mod precision {
    use super::*;

    /// Parse an amount stored as text
    pub fn parse_amount(raw: &str) -> crate::error::Result<Amount> {
        raw.trim().parse::<Amount>().map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(precision::parse_amount(" 150.25 ").unwrap(), dec!(150.25));
        assert!(precision::parse_amount("abc").is_err());
    }
}
