//! Checkout page and the htmx partials it swaps in.
//!
//! Every action posts the raw card fields back; the server rebuilds the
//! controller for the transaction in the url and answers with the next
//! rendering of the checkout panel.

use log::{info, warn};
use ntex::web;
use serde_json::json;

use crate::{
    api::{
        checkout::{CheckoutController, CheckoutError},
        transaction::{TransactionSummary, format_naira},
    },
    front::{AppState, forms, utils},
    metric,
};

fn checkout_context(controller: &CheckoutController, notice: Option<String>) -> tera::Context {
    let summary = controller.summary();
    let phase = controller.phase();
    let outcome = phase.outcome();
    let notice = notice.or_else(|| {
        outcome
            .as_ref()
            .and_then(|o| o.message().map(str::to_string))
    });

    tera::Context::from_value(json!({
        "transaction_id": &summary.transaction_id,
        "amount": format_naira(summary.amount),
        "fee": format_naira(summary.fee),
        "total": format_naira(summary.total()),
        "checkout_path": summary.checkout_path(),
        "form": controller.form(),
        "editable": phase.is_editable(),
        "outcome": outcome.map(|o| o.to_string()),
        "notice": notice,
        "test_harness": controller.settings().test_harness,
    }))
    .unwrap_or_default()
}

/// Controller of the transaction in the url with the posted fields typed in
fn restore_controller(
    req: &web::HttpRequest,
    app_state: &AppState,
    form: forms::payment::CardFormData,
) -> CheckoutController {
    let mut controller =
        CheckoutController::new(app_state.settings, TransactionSummary::resolve(req.path()));

    controller.on_payment_method_input(form.payment_method);
    controller.on_card_number_input(&form.card_number);
    controller.on_expiry_input(&form.expiry_date);
    controller.on_cvv_input(&form.cvv);
    controller
}

fn render_checkout_page(
    req: &web::HttpRequest,
    app_state: &AppState,
    endpoint: &str,
) -> Result<web::HttpResponse, web::Error> {
    let controller =
        CheckoutController::new(app_state.settings, TransactionSummary::resolve(req.path()));
    utils::render_html("checkout.html", &checkout_context(&controller, None), endpoint)
}

/// Checkout page without transaction context, uses the test transaction
#[web::get("/")]
async fn get_fallback_checkout_view(
    req: web::HttpRequest,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    render_checkout_page(&req, &app_state, "/")
}

#[web::get("/{transaction_id}/{amount}")]
async fn get_checkout_view(
    req: web::HttpRequest,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    render_checkout_page(&req, &app_state, "/{transaction_id}/{amount}")
}

/// Masks the raw field values while the user types
#[web::post("/{transaction_id}/{amount}/format")]
async fn format_card_fields(
    req: web::HttpRequest,
    form: web::types::Form<forms::payment::CardFormData>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let controller = restore_controller(&req, &app_state, form.into_inner());

    utils::render_html(
        "partials/card_form.html",
        &checkout_context(&controller, None),
        "/{transaction_id}/{amount}/format",
    )
}

#[web::post("/{transaction_id}/{amount}/submit")]
async fn submit_payment(
    req: web::HttpRequest,
    form: web::types::Form<forms::payment::CardFormData>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let mut controller = restore_controller(&req, &app_state, form.into_inner());
    let endpoint = "/{transaction_id}/{amount}/submit";

    // every visitor of `/` shares the test transaction, it is not gated
    let _guard = if controller.summary().is_fallback() {
        None
    } else {
        let Some(guard) = app_state
            .in_flight
            .try_acquire(&controller.summary().transaction_id)
        else {
            warn!(
                "transaction {} submitted while a confirmation is running",
                controller.summary().transaction_id
            );
            let notice = CheckoutError::SubmissionLocked.to_string();
            return utils::render_html(
                "partials/card_form.html",
                &checkout_context(&controller, Some(notice)),
                endpoint,
            );
        };
        Some(guard)
    };

    let result = controller.submit(app_state.gateway.as_ref()).await;
    if let Some(outcome) = controller.phase().outcome() {
        metric::incr_checkout_outcome_statds(&outcome);
    }

    match result {
        Ok(_) => {
            info!("checkout of {} completed", controller.summary().transaction_id);
            utils::render_html(
                "partials/success.html",
                &checkout_context(&controller, None),
                endpoint,
            )
        }
        Err(e) => {
            if let CheckoutError::ValidationFailure(field) = e {
                metric::incr_validation_failure_statds(field);
            }

            utils::render_html(
                "partials/card_form.html",
                &checkout_context(&controller, Some(e.to_string())),
                endpoint,
            )
        }
    }
}

/// Empty form for a new attempt after a successful payment
#[web::post("/{transaction_id}/{amount}/reset")]
async fn reset_checkout(
    req: web::HttpRequest,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let mut controller =
        CheckoutController::new(app_state.settings, TransactionSummary::resolve(req.path()));
    controller.reset();

    utils::render_html(
        "partials/card_form.html",
        &checkout_context(&controller, None),
        "/{transaction_id}/{amount}/reset",
    )
}
