//! Form controller of the checkout screen.
//!
//! The controller owns the card fields of one transaction and moves through
//! `Editing -> Submitting -> Success | Failed`. A failed submission leaves the
//! form editable so the user can retry; a successful one is terminal until
//! [reset](CheckoutController::reset).

use derive_more::{Display, Error};
use log::{debug, info, warn};
use serde::Serialize;
use std::{
    collections::HashSet,
    str::FromStr,
    sync::{Arc, Mutex, PoisonError},
};

use crate::{
    api::{formatters, transaction::TransactionSummary},
    consts,
    models::payment::{ConfirmationReceipt, PaymentMethod, RequestOutcome, SubmissionPayload},
    services::{GatewayError, PaymentGateway},
};

/// How complete the fields must be before a submission is allowed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display)]
pub enum ValidationPolicy {
    /// 16 card digits, 4 expiry digits and 3 cvv digits
    #[default]
    #[display("strict")]
    Strict,
    /// Card number and cvv non-empty, expiry complete since the api needs `YYYY-MM`
    #[display("permissive")]
    Permissive,
}

impl FromStr for ValidationPolicy {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "strict" => Ok(ValidationPolicy::Strict),
            "permissive" => Ok(ValidationPolicy::Permissive),
            other => anyhow::bail!("unknown validation policy: {other}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum FormField {
    #[display("card number")]
    CardNumber,
    #[display("expiry date")]
    ExpiryDate,
    #[display("cvv")]
    Cvv,
}

#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum CheckoutError {
    #[display("missing transaction context")]
    MissingTransactionContext,
    #[display("please enter a valid {_0}")]
    ValidationFailure(#[error(not(source))] FormField),
    #[display("payment could not be confirmed: {_0}")]
    NetworkOrServerFailure(GatewayError),
    #[display("this payment is already being processed")]
    SubmissionLocked,
}

/// Options the controller is built with
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckoutSettings {
    pub validation_policy: ValidationPolicy,
    /// Confirmations go to a simulated gateway and the page says so
    pub test_harness: bool,
}

/// Masked card fields as displayed in the form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormState {
    pub card_number_display: String,
    pub expiry_display: String,
    pub cvv: String,
    pub payment_method: PaymentMethod,
}

impl FormState {
    /// Digits past the sixteenth are dropped by the formatter
    pub fn set_card_number(&mut self, raw: &str) {
        self.card_number_display = formatters::format_card_number(raw);
    }

    pub fn set_expiry(&mut self, raw: &str) {
        self.expiry_display = formatters::format_expiry(raw);
    }

    pub fn set_cvv(&mut self, raw: &str) {
        self.cvv = formatters::format_cvv(raw);
    }

    pub fn card_digits(&self) -> String {
        formatters::digits_only(&self.card_number_display)
    }

    pub fn expiry_digits(&self) -> String {
        formatters::digits_only(&self.expiry_display)
    }

    /// First field not complete enough for `policy`
    pub fn validate(&self, policy: ValidationPolicy) -> Result<(), CheckoutError> {
        let lengths = [
            (FormField::CardNumber, self.card_digits().len(), consts::CARD_NUMBER_MAX_DIGITS),
            (FormField::ExpiryDate, self.expiry_digits().len(), consts::EXPIRY_DIGITS),
            (FormField::Cvv, self.cvv.len(), consts::CVV_DIGITS),
        ];

        for (field, len, expected) in lengths {
            let is_valid = match policy {
                ValidationPolicy::Strict => len == expected,
                ValidationPolicy::Permissive if field == FormField::ExpiryDate => len == expected,
                ValidationPolicy::Permissive => len > 0,
            };
            if !is_valid {
                return Err(CheckoutError::ValidationFailure(field));
            }
        }

        Ok(())
    }

    pub fn to_payload(&self) -> SubmissionPayload {
        SubmissionPayload {
            card_number: self.card_digits(),
            expiry_date: formatters::expiry_to_year_month(&self.expiry_display),
            cvv: self.cvv.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CheckoutPhase {
    #[default]
    Editing,
    Submitting,
    Success,
    Failed(String),
}

impl CheckoutPhase {
    /// Inputs and the submit control are enabled
    pub fn is_editable(&self) -> bool {
        matches!(self, CheckoutPhase::Editing | CheckoutPhase::Failed(_))
    }

    pub fn outcome(&self) -> Option<RequestOutcome> {
        match self {
            CheckoutPhase::Editing => None,
            CheckoutPhase::Submitting => Some(RequestOutcome::Pending),
            CheckoutPhase::Success => Some(RequestOutcome::Success),
            CheckoutPhase::Failed(msg) => Some(RequestOutcome::Failed(msg.clone())),
        }
    }
}

pub struct CheckoutController {
    settings: CheckoutSettings,
    summary: TransactionSummary,
    form: FormState,
    phase: CheckoutPhase,
}

impl CheckoutController {
    pub fn new(settings: CheckoutSettings, summary: TransactionSummary) -> Self {
        Self {
            settings,
            summary,
            form: FormState::default(),
            phase: CheckoutPhase::Editing,
        }
    }

    pub fn settings(&self) -> &CheckoutSettings {
        &self.settings
    }

    pub fn summary(&self) -> &TransactionSummary {
        &self.summary
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn phase(&self) -> &CheckoutPhase {
        &self.phase
    }

    pub fn on_payment_method_input(&mut self, payment_method: PaymentMethod) {
        if self.phase.is_editable() {
            self.form.payment_method = payment_method;
        }
    }

    pub fn on_card_number_input(&mut self, raw: &str) {
        if self.phase.is_editable() {
            self.form.set_card_number(raw);
        }
    }

    pub fn on_expiry_input(&mut self, raw: &str) {
        if self.phase.is_editable() {
            self.form.set_expiry(raw);
        }
    }

    pub fn on_cvv_input(&mut self, raw: &str) {
        if self.phase.is_editable() {
            self.form.set_cvv(raw);
        }
    }

    /// Validates the form and locks it for the outbound request
    pub fn begin_submit(&mut self) -> Result<SubmissionPayload, CheckoutError> {
        if !self.phase.is_editable() {
            return Err(CheckoutError::SubmissionLocked);
        }

        if let Err(e) = self.form.validate(self.settings.validation_policy) {
            self.phase = CheckoutPhase::Editing;
            return Err(e);
        }

        self.phase = CheckoutPhase::Submitting;
        Ok(self.form.to_payload())
    }

    /// Applies the answer of the confirmation api
    pub fn finish_submit(
        &mut self,
        result: Result<ConfirmationReceipt, GatewayError>,
    ) -> Result<ConfirmationReceipt, CheckoutError> {
        match result {
            Ok(receipt) => {
                info!(
                    "transaction {} confirmed with status {}",
                    self.summary.transaction_id, receipt.status
                );
                debug!("confirmation body: {:?}", receipt.body);
                self.phase = CheckoutPhase::Success;
                Ok(receipt)
            }
            Err(e) => {
                let error = CheckoutError::NetworkOrServerFailure(e);
                warn!("transaction {}: {error}", self.summary.transaction_id);
                self.phase = CheckoutPhase::Failed(error.to_string());
                Err(error)
            }
        }
    }

    pub async fn submit(
        &mut self,
        gateway: &dyn PaymentGateway,
    ) -> Result<ConfirmationReceipt, CheckoutError> {
        let payload = self.begin_submit()?;
        let result = gateway
            .confirm_transaction(&self.summary.transaction_id, &payload)
            .await;

        self.finish_submit(result)
    }

    /// Clears every field and enables the form again
    pub fn reset(&mut self) {
        self.form = FormState::default();
        self.phase = CheckoutPhase::Editing;
    }
}

/// Transactions with a confirmation request on the wire, shared by all workers
#[derive(Clone, Default)]
pub struct InFlightSubmissions {
    transactions: Arc<Mutex<HashSet<String>>>,
}

impl InFlightSubmissions {
    /// `None` while another submission of `transaction_id` is running
    pub fn try_acquire(&self, transaction_id: &str) -> Option<SubmissionGuard> {
        let mut transactions = self
            .transactions
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if !transactions.insert(transaction_id.to_string()) {
            return None;
        }

        Some(SubmissionGuard {
            transactions: Arc::clone(&self.transactions),
            transaction_id: transaction_id.to_string(),
        })
    }
}

/// Releases the transaction when dropped
pub struct SubmissionGuard {
    transactions: Arc<Mutex<HashSet<String>>>,
    transaction_id: String,
}

impl Drop for SubmissionGuard {
    fn drop(&mut self) {
        self.transactions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.transaction_id);
    }
}
