use metrics::counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Install the Prometheus exporter and register all application metrics.
/// Returns a `PrometheusHandle` whose `render()` method produces the
/// text/plain Prometheus scrape payload.
pub fn init_metrics() -> PrometheusHandle {
    let builder = PrometheusBuilder::new();
    let handle = builder
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    // Pre-register counters so they appear even before the first increment.
    counter!("poll_cycles_total").absolute(0);
    counter!("poll_failures_total").absolute(0);
    counter!("change_events_total").absolute(0);
    counter!("notifications_sent_total").absolute(0);
    counter!("summary_requests_total").absolute(0);

    handle
}
