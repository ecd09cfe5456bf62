use lazy_static::lazy_static;
use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, TextEncoder};

lazy_static! {
    pub static ref MOVEMENTS_RECORDED: IntCounter = prometheus::register_int_counter!(
        "stockflow_movements_recorded_total",
        "Total number of stock movements recorded"
    )
    .expect("metric can be created");
    pub static ref MOVEMENT_FAILURES: IntCounterVec = prometheus::register_int_counter_vec!(
        Opts::new(
            "stockflow_movement_failures_total",
            "Total number of rejected or failed stock movements"
        ),
        &["error_type"]
    )
    .expect("metric can be created");
    pub static ref ASSISTANT_FALLBACKS: IntCounter = prometheus::register_int_counter!(
        "stockflow_assistant_fallbacks_total",
        "Assistant queries answered with the static fallback message"
    )
    .expect("metric can be created");
}

/// Render all registered metrics in the Prometheus text format.
pub fn metrics_handler() -> Result<String, prometheus::Error> {
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    let encoder = TextEncoder::new();
    encoder.encode(&metric_families, &mut buffer)?;
    String::from_utf8(buffer)
        .map_err(|e| prometheus::Error::Msg(format!("metrics encoding error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_render_in_text_format() {
        MOVEMENTS_RECORDED.inc();
        MOVEMENT_FAILURES.with_label_values(&["validation_error"]).inc();

        let body = metrics_handler().expect("metrics encode");
        assert!(body.contains("stockflow_movements_recorded_total"));
        assert!(body.contains("stockflow_movement_failures_total"));
    }
}
