use opentelemetry::{KeyValue, metrics::UpDownCounter};
use std::sync::LazyLock;

use crate::{api::checkout::FormField, models::payment::RequestOutcome};

static STATDS: LazyLock<UpDownCounter<i64>> = LazyLock::new(|| {
    logfire::i64_up_down_counter("xnet_pay_statds")
        .with_description("XNET pay checkout statistics")
        .with_unit("attempt")
        .build()
});

fn incr_statds(metric: String, value: String) {
    STATDS.add(1, &[KeyValue::new(metric, value)]);
}

pub fn incr_checkout_outcome_statds(outcome: &RequestOutcome) {
    incr_statds("checkout_outcome".to_string(), outcome.to_string())
}

pub fn incr_validation_failure_statds(field: FormField) {
    incr_statds("validation_failure".to_string(), field.to_string())
}
