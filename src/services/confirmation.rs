//! # Confirmation API Client
//!
//! Posts the card details of a transaction to the payment api.

use async_trait::async_trait;
use log::error;

use crate::{
    consts,
    models::payment::{ConfirmationReceipt, SubmissionPayload},
    services::GatewayError,
};

#[derive(Clone)]
pub struct HttpPaymentGateway {
    /// HTTP client for making API requests
    client: reqwest::Client,
    /// Payment api base url, e.g. `https://pay.example.com/api/v1`
    base_url: String,
}

impl HttpPaymentGateway {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// `{base_url}/confirm/test/transaction/{transaction_id}`
    pub fn confirm_endpoint(&self, transaction_id: &str) -> String {
        format!(
            "{base}/{path}/{transaction_id}",
            base = self.base_url,
            path = consts::CONFIRM_TRANSACTION_PATH
        )
    }
}

#[async_trait]
impl crate::services::PaymentGateway for HttpPaymentGateway {
    #[tracing::instrument(skip(self, payload))]
    async fn confirm_transaction(
        &self,
        transaction_id: &str,
        payload: &SubmissionPayload,
    ) -> Result<ConfirmationReceipt, GatewayError> {
        let response = self
            .client
            .post(self.confirm_endpoint(transaction_id))
            .header("content-type", "application/json")
            .json(payload)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read response body".to_string());
            error!("confirmation of {transaction_id} returned status {status}: {body}");

            return Err(GatewayError::Status(status.as_u16()));
        }

        tracing::info!("transaction {} confirmed with status {}", transaction_id, status);

        Ok(ConfirmationReceipt {
            status: status.as_u16(),
            body: response.json::<serde_json::Value>().await.ok(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::PaymentGateway;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_json, header, method, path},
    };

    fn create_test_payload() -> SubmissionPayload {
        SubmissionPayload {
            card_number: "4111111111111111".to_string(),
            expiry_date: "2025-12".to_string(),
            cvv: "123".to_string(),
        }
    }

    #[test]
    fn test_confirm_endpoint_trims_trailing_slash() {
        let gateway = HttpPaymentGateway::new("https://pay.example.com/api/v1/");

        assert_eq!(
            gateway.confirm_endpoint("TX-1"),
            "https://pay.example.com/api/v1/confirm/test/transaction/TX-1"
        );
    }

    #[tokio::test]
    async fn test_confirm_transaction_posts_json_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/confirm/test/transaction/TX-1"))
            .and(header("content-type", "application/json"))
            .and(body_json(serde_json::json!({
                "cardNumber": "4111111111111111",
                "expiryDate": "2025-12",
                "cvv": "123"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        let gateway = HttpPaymentGateway::new(&format!("{}/api/v1", server.uri()));
        let receipt = gateway
            .confirm_transaction("TX-1", &create_test_payload())
            .await
            .unwrap();

        assert_eq!(receipt.status, 200);
        assert_eq!(receipt.body, Some(serde_json::json!({"ok": true})));
    }

    #[tokio::test]
    async fn test_confirm_transaction_ignores_unparseable_success_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201).set_body_string("confirmed"))
            .mount(&server)
            .await;

        let gateway = HttpPaymentGateway::new(&server.uri());
        let receipt = gateway
            .confirm_transaction("TX-1", &create_test_payload())
            .await
            .unwrap();

        assert_eq!(receipt.status, 201);
        assert!(receipt.body.is_none());
    }

    #[tokio::test]
    async fn test_confirm_transaction_non_success_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let gateway = HttpPaymentGateway::new(&server.uri());
        let result = gateway
            .confirm_transaction("TX-1", &create_test_payload())
            .await;

        assert_eq!(result, Err(GatewayError::Status(500)));
    }

    #[tokio::test]
    async fn test_confirm_transaction_unreachable_api() {
        // nothing listens on port 9 of localhost
        let gateway = HttpPaymentGateway::new("http://127.0.0.1:9");
        let result = gateway
            .confirm_transaction("TX-1", &create_test_payload())
            .await;

        assert!(matches!(result, Err(GatewayError::Transport(_))));
    }
}
