use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub const CARD_NUMBER_MAX_DIGITS: usize = 16;
pub const CARD_NUMBER_MIN_RUN: usize = 4;
pub const CARD_NUMBER_GROUP_SIZE: usize = 4;
pub const EXPIRY_DIGITS: usize = 4;
pub const EXPIRY_SEPARATOR: &str = " / ";
pub const CVV_DIGITS: usize = 3;

/// Used when the page url carries no usable transaction context
pub const FALLBACK_TRANSACTION_ID: &str = "XNET-TEST-TRANSACTION";
pub const FALLBACK_AMOUNT: Decimal = dec!(1000.00);
pub const TRANSACTION_FEE: Decimal = dec!(0.00);

pub const NAIRA_SYMBOL: &str = "₦";

/// Appended to the payment api base url, followed by the transaction id
pub const CONFIRM_TRANSACTION_PATH: &str = "confirm/test/transaction";
