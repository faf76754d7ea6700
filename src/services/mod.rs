pub mod confirmation;
pub mod simulated;

use crate::models::payment::{ConfirmationReceipt, SubmissionPayload};
use async_trait::async_trait;
use derive_more::{Display, Error};

#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum GatewayError {
    #[display("payment api answered with status {_0}")]
    Status(#[error(not(source))] u16),
    #[display("payment api could not be reached: {_0}")]
    Transport(#[error(not(source))] String),
}

/// Remote endpoint that confirms a card payment for a transaction
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentGateway {
    async fn confirm_transaction(
        &self,
        transaction_id: &str,
        payload: &SubmissionPayload,
    ) -> Result<ConfirmationReceipt, GatewayError>;
}

pub type ImplPaymentGateway = Box<dyn PaymentGateway>;
