//! Application configuration read from the environment.
//!
//! Values are loaded once at startup and handed to the components that need
//! them; nothing here is global.

use anyhow::Context;
use envconfig::Envconfig;

use crate::{
    api::checkout::{CheckoutSettings, ValidationPolicy},
    services,
};

#[derive(Envconfig, Clone)]
pub struct AppConfig {
    /// Environment name to deploy the app
    /// Values: "local", "dev", "staging", "prod"
    #[envconfig(default = "local")]
    pub env: String,

    /// Host address for web server binding
    #[envconfig(default = "0.0.0.0")]
    pub web_server_host: String,

    /// Port for web server binding
    #[envconfig(default = "8080")]
    pub web_server_port: u16,

    /// Path to SSL private key file, only read in prod
    /// Security: File should have 600 permissions
    #[envconfig(default = "server.key")]
    pub private_key_path: String,

    /// Path to SSL certificate file, only read in prod
    #[envconfig(default = "server.crt")]
    pub certificate_path: String,

    /// Base url of the payment api
    /// Example: "https://pay.example.com/api/v1"
    #[envconfig(default = "https://localhost/api/v1")]
    pub payment_api_base_url: String,

    /// "strict" or "permissive"
    #[envconfig(default = "strict")]
    pub validation_policy: ValidationPolicy,

    /// Confirms payments against a simulated gateway instead of the payment api
    #[envconfig(default = "false")]
    pub test_harness: bool,

    /// Status answered by the simulated gateway
    #[envconfig(default = "200")]
    pub test_harness_status: u16,

    /// Level of the stdout logger: "error", "warn", "info", "debug", "trace"
    #[envconfig(default = "info")]
    pub log_level: log::LevelFilter,

    /// 🔒 SENSITIVE: Logfire write token, logs go to stdout when unset
    pub logfire_token: Option<String>,
}

impl AppConfig {
    /// Checks if running in production environment
    pub fn is_prod(&self) -> bool {
        self.env.to_lowercase() == "prod"
    }

    pub fn checkout_settings(&self) -> CheckoutSettings {
        CheckoutSettings {
            validation_policy: self.validation_policy,
            test_harness: self.test_harness,
        }
    }

    /// Gateway the checkout confirms payments with
    pub fn build_gateway(&self) -> services::ImplPaymentGateway {
        if self.test_harness {
            return Box::new(services::simulated::SimulatedGateway::new(
                self.test_harness_status,
            ));
        }

        Box::new(services::confirmation::HttpPaymentGateway::new(
            &self.payment_api_base_url,
        ))
    }
}

pub fn init_config() -> anyhow::Result<AppConfig> {
    AppConfig::init_from_env().context("failed to load app config from environment")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let app_config = AppConfig::init_from_hashmap(&HashMap::new()).unwrap();

        assert!(!app_config.is_prod());
        assert_eq!(app_config.web_server_port, 8080);
        assert_eq!(
            app_config.checkout_settings(),
            CheckoutSettings {
                validation_policy: ValidationPolicy::Strict,
                test_harness: false,
            }
        );
        assert_eq!(app_config.log_level, log::LevelFilter::Info);
        assert!(app_config.logfire_token.is_none());
    }

    #[test]
    fn test_overrides() {
        let env = HashMap::from([
            ("ENV".to_string(), "PROD".to_string()),
            ("VALIDATION_POLICY".to_string(), "permissive".to_string()),
            ("TEST_HARNESS".to_string(), "true".to_string()),
            ("LOGFIRE_TOKEN".to_string(), "token".to_string()),
        ]);
        let app_config = AppConfig::init_from_hashmap(&env).unwrap();

        assert!(app_config.is_prod());
        assert_eq!(
            app_config.validation_policy,
            ValidationPolicy::Permissive
        );
        assert!(app_config.test_harness);
        assert_eq!(app_config.logfire_token.as_deref(), Some("token"));
    }

    #[test]
    fn test_unknown_validation_policy_is_rejected() {
        let env = HashMap::from([("VALIDATION_POLICY".to_string(), "lenient".to_string())]);

        assert!(AppConfig::init_from_hashmap(&env).is_err());
    }
}
