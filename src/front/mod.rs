pub mod checkout;
pub mod errors;
pub mod forms;
pub mod routes;
pub mod server;
pub mod templates;
pub mod utils;

use crate::{api, services};

pub struct AppState {
    pub settings: api::checkout::CheckoutSettings,
    pub gateway: services::ImplPaymentGateway,
    pub in_flight: api::checkout::InFlightSubmissions,
}
