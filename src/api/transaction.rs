//! Transaction context shown on the checkout page.
//!
//! The page url carries the context as `/{transaction_id}/{amount}`. A missing
//! or malformed context is replaced by a fixed test transaction.

use log::warn;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

use crate::{api::checkout::CheckoutError, consts};

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionSummary {
    pub transaction_id: String,
    pub amount: Decimal,
    pub fee: Decimal,
}

impl TransactionSummary {
    pub fn new(transaction_id: &str, amount: Decimal) -> Self {
        Self {
            transaction_id: transaction_id.to_string(),
            amount,
            fee: consts::TRANSACTION_FEE,
        }
    }

    pub fn fallback() -> Self {
        Self::new(consts::FALLBACK_TRANSACTION_ID, consts::FALLBACK_AMOUNT)
    }

    /// Builds the summary from the two url segments
    fn from_segments(transaction_id: &str, amount: &str) -> Result<Self, CheckoutError> {
        let transaction_id = transaction_id.trim();
        if transaction_id.is_empty() {
            return Err(CheckoutError::MissingTransactionContext);
        }

        let amount = Decimal::from_str(amount.trim())
            .map_err(|_| CheckoutError::MissingTransactionContext)?;
        if amount.is_sign_negative() {
            return Err(CheckoutError::MissingTransactionContext);
        }

        Ok(Self::new(transaction_id, amount))
    }

    /// Reads the first two segments of a url path, e.g. `/TX-1/2500`
    pub fn from_path(path: &str) -> Result<Self, CheckoutError> {
        let mut segments = path.split('/').filter(|s| !s.is_empty());

        match (segments.next(), segments.next()) {
            (Some(transaction_id), Some(amount)) => Self::from_segments(transaction_id, amount),
            _ => Err(CheckoutError::MissingTransactionContext),
        }
    }

    /// Same as [from_path](Self::from_path) but never fails, the test
    /// transaction is used instead
    pub fn resolve(path: &str) -> Self {
        Self::from_path(path).unwrap_or_else(|e| {
            warn!("{e} in {path}, using the test transaction");
            Self::fallback()
        })
    }

    /// Shared test transaction of visitors without a transaction url
    pub fn is_fallback(&self) -> bool {
        self.transaction_id == consts::FALLBACK_TRANSACTION_ID
    }

    pub fn total(&self) -> Decimal {
        self.amount + self.fee
    }

    /// Url prefix of every checkout action for this transaction
    pub fn checkout_path(&self) -> String {
        format!("/{}/{}", self.transaction_id, self.amount)
    }
}

/// Nigerian Naira in the `en-NG` style, e.g. `₦1,000.00`
pub fn format_naira(amount: Decimal) -> String {
    let rounded = amount
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .abs();
    let plain = format!("{rounded:.2}");
    let (integer, fraction) = plain.split_once('.').unwrap_or((&plain, "00"));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (idx, c) in integer.chars().enumerate() {
        if idx > 0 && (integer.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if amount.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    format!("{sign}{}{grouped}.{fraction}", consts::NAIRA_SYMBOL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_from_path() {
        let summary = TransactionSummary::from_path("/TX-77/2500.50").unwrap();

        assert_eq!(summary.transaction_id, "TX-77");
        assert_eq!(summary.amount, dec!(2500.50));
        assert_eq!(summary.fee, dec!(0.00));
        assert_eq!(summary.total(), dec!(2500.50));
    }

    #[test]
    fn test_from_path_ignores_extra_segments() {
        let summary = TransactionSummary::from_path("/TX-77/100/submit").unwrap();

        assert_eq!(summary.transaction_id, "TX-77");
        assert_eq!(summary.amount, dec!(100));
    }

    #[test]
    fn test_from_path_missing_or_malformed_context() {
        for path in ["", "/", "/TX-77", "/TX-77/abc", "/TX-77/-5"] {
            assert!(matches!(
                TransactionSummary::from_path(path),
                Err(CheckoutError::MissingTransactionContext)
            ));
        }
    }

    #[test]
    fn test_resolve_falls_back_to_test_transaction() {
        assert_eq!(
            TransactionSummary::resolve("/TX-77/not-a-number"),
            TransactionSummary::fallback()
        );
        assert_eq!(TransactionSummary::resolve("/"), TransactionSummary::fallback());
        assert_eq!(
            TransactionSummary::resolve("/TX-77/10/submit"),
            TransactionSummary::new("TX-77", dec!(10))
        );
    }

    #[test]
    fn test_is_fallback() {
        assert!(TransactionSummary::fallback().is_fallback());
        assert!(TransactionSummary::resolve("/").is_fallback());
        assert!(!TransactionSummary::new("TX-77", dec!(10)).is_fallback());
    }

    #[test]
    fn test_checkout_path() {
        assert_eq!(
            TransactionSummary::fallback().checkout_path(),
            "/XNET-TEST-TRANSACTION/1000.00"
        );
    }

    #[test]
    fn test_format_naira() {
        assert_eq!(format_naira(dec!(1000)), "₦1,000.00");
        assert_eq!(format_naira(dec!(0)), "₦0.00");
        assert_eq!(format_naira(dec!(999.999)), "₦1,000.00");
        assert_eq!(format_naira(dec!(1234567.5)), "₦1,234,567.50");
        assert_eq!(format_naira(dec!(12.345)), "₦12.35");
        assert_eq!(format_naira(dec!(-5)), "-₦5.00");
    }
}
