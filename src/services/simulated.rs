//! Gateway used by the test harness, answers without any network I/O.

use async_trait::async_trait;
use log::info;

use crate::{
    models::payment::{ConfirmationReceipt, SubmissionPayload},
    services::GatewayError,
};

#[derive(Clone, Debug)]
pub struct SimulatedGateway {
    /// Status every confirmation answers with
    pub status: u16,
}

impl SimulatedGateway {
    pub fn new(status: u16) -> Self {
        Self { status }
    }
}

#[async_trait]
impl crate::services::PaymentGateway for SimulatedGateway {
    async fn confirm_transaction(
        &self,
        transaction_id: &str,
        _: &SubmissionPayload,
    ) -> Result<ConfirmationReceipt, GatewayError> {
        info!("simulated confirmation of {transaction_id} with status {}", self.status);

        if !(200..300).contains(&self.status) {
            return Err(GatewayError::Status(self.status));
        }

        Ok(ConfirmationReceipt {
            status: self.status,
            body: None,
        })
    }
}
