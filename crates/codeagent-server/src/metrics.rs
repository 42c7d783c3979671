use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use lazy_static::lazy_static;
use prometheus::IntCounter;

lazy_static! {
    pub static ref GITHUB_API_CALLS: IntCounter =
        IntCounter::new("github_api_calls", "GitHub API calls").unwrap();
    pub static ref AI_BACKEND_CALLS: IntCounter =
        IntCounter::new("ai_backend_calls", "AI backend calls").unwrap();
    pub static ref GIT_CLONES: IntCounter =
        IntCounter::new("git_clones", "Repository clones").unwrap();
}

pub(crate) fn build_metrics_handler() -> PrometheusMetrics {
    let prometheus = PrometheusMetricsBuilder::new("api")
        .endpoint("/metrics")
        .build()
        .unwrap();

    setup_process_metrics(&prometheus);

    prometheus
        .registry
        .register(Box::new(GITHUB_API_CALLS.clone()))
        .unwrap();
    prometheus
        .registry
        .register(Box::new(AI_BACKEND_CALLS.clone()))
        .unwrap();
    prometheus
        .registry
        .register(Box::new(GIT_CLONES.clone()))
        .unwrap();
    prometheus
}

#[cfg(unix)]
fn setup_process_metrics(metrics: &PrometheusMetrics) {
    use prometheus::process_collector::ProcessCollector;

    metrics
        .registry
        .register(Box::new(ProcessCollector::for_self()))
        .unwrap();
}

#[cfg(not(unix))]
fn setup_process_metrics(_metrics: &PrometheusMetrics) {}
