use derive_more::Display;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, Display)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    // Debit or credit card: Visa, Mastercard, Verve, American Express
    #[default]
    #[display("card")]
    Card,
}

/// Body sent to the confirmation api
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    /// Digits only
    pub card_number: String,
    /// `YYYY-MM`
    pub expiry_date: String,
    pub cvv: String,
}

/// Result of a confirmation request, drives which screen is rendered
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum RequestOutcome {
    #[display("pending")]
    Pending,
    #[display("success")]
    Success,
    #[display("failed")]
    Failed(String),
}

impl RequestOutcome {
    pub fn message(&self) -> Option<&str> {
        match self {
            RequestOutcome::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Answer of a successful confirmation call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfirmationReceipt {
    pub status: u16,
    /// Parsed best-effort, `None` when the body is empty or not json
    pub body: Option<serde_json::Value>,
}
