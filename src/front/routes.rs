//! Frontend route configuration module.

use super::checkout;
use ntex::web;

/// Configures the checkout page and its htmx actions.
///
/// # Routes
/// - `GET /` - Checkout page for the test transaction
/// - `GET /{transaction_id}/{amount}` - Checkout page
/// - `POST /{transaction_id}/{amount}/format` - Mask the card fields
/// - `POST /{transaction_id}/{amount}/submit` - Confirm the payment
/// - `POST /{transaction_id}/{amount}/reset` - Empty the form after a payment
pub fn checkout(cfg: &mut web::ServiceConfig) {
    cfg.service((
        checkout::get_fallback_checkout_view,
        checkout::get_checkout_view,
        checkout::format_card_fields,
        checkout::submit_payment,
        checkout::reset_checkout,
    ));
}
