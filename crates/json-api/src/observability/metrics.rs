//! Prometheus metrics for HTTP traffic and order lifecycle events.

use std::sync::OnceLock;

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder, core::Collector,
};
use salvo::{
    Request, Response, handler,
    http::{
        StatusCode,
        header::{CONTENT_TYPE, HeaderValue},
    },
};
use tracing::error;

const DURATION_BUCKETS: [f64; 13] = [
    0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

/// Administrative order transitions counted by
/// `storefront_fulfillment_actions_total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FulfillmentAction {
    Paid,
    Delivered,
    Fulfilled,
}

impl FulfillmentAction {
    fn label(self) -> &'static str {
        match self {
            Self::Paid => "paid",
            Self::Delivered => "delivered",
            Self::Fulfilled => "fulfilled",
        }
    }
}

#[derive(Debug)]
struct StoreMetrics {
    registry: Registry,
    requests_total: IntCounterVec,
    request_duration_seconds: HistogramVec,
    requests_in_flight: IntGauge,
    orders_placed_total: IntCounter,
    payments_captured_total: IntCounter,
    fulfillment_actions_total: IntCounterVec,
}

static METRICS: OnceLock<Option<StoreMetrics>> = OnceLock::new();

#[derive(Debug)]
pub(super) struct InFlightRequestGuard {
    tracked: bool,
}

impl InFlightRequestGuard {
    pub(super) fn track() -> Self {
        let Some(metrics) = metrics() else {
            return Self { tracked: false };
        };

        metrics.requests_in_flight.inc();

        Self { tracked: true }
    }
}

impl Drop for InFlightRequestGuard {
    fn drop(&mut self) {
        if self.tracked
            && let Some(metrics) = metrics()
        {
            metrics.requests_in_flight.dec();
        }
    }
}

pub(super) fn observe_request(method: &str, route: &str, status_code: u16, duration_seconds: f64) {
    let Some(metrics) = metrics() else {
        return;
    };

    let status_code_label = status_code.to_string();

    metrics
        .requests_total
        .with_label_values(&[
            method,
            route,
            status_class(status_code),
            status_code_label.as_str(),
        ])
        .inc();

    metrics
        .request_duration_seconds
        .with_label_values(&[method, route])
        .observe(duration_seconds);
}

/// Count a successfully placed order.
pub(crate) fn record_order_placed() {
    if let Some(metrics) = metrics() {
        metrics.orders_placed_total.inc();
    }
}

/// Count a completed provider capture.
pub(crate) fn record_payment_captured() {
    if let Some(metrics) = metrics() {
        metrics.payments_captured_total.inc();
    }
}

/// Count an administrative transition.
pub(crate) fn record_fulfillment_action(action: FulfillmentAction) {
    if let Some(metrics) = metrics() {
        metrics
            .fulfillment_actions_total
            .with_label_values(&[action.label()])
            .inc();
    }
}

#[handler]
pub(crate) async fn metrics_handler(_req: &mut Request, res: &mut Response) {
    let Some(metrics) = metrics() else {
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
        return;
    };

    let encoder = TextEncoder::new();
    let mut encoded = Vec::new();

    if let Err(source) = encoder.encode(&metrics.registry.gather(), &mut encoded) {
        error!("failed to encode metrics response: {source}");
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);

        return;
    }

    match HeaderValue::from_str(encoder.format_type()) {
        Ok(content_type) => {
            res.headers_mut().insert(CONTENT_TYPE, content_type);
        }
        Err(source) => {
            error!("failed to encode metrics content type header: {source}");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);

            return;
        }
    }

    res.render(String::from_utf8_lossy(&encoded).into_owned());
}

fn metrics() -> Option<&'static StoreMetrics> {
    METRICS.get_or_init(build_metrics).as_ref()
}

fn build_metrics() -> Option<StoreMetrics> {
    let registry = Registry::new();

    let requests_total = register(
        &registry,
        IntCounterVec::new(
            Opts::new(
                "storefront_json_http_requests_total",
                "Total HTTP requests partitioned by method, route, status class, and status code.",
            ),
            &["method", "route", "status_class", "status_code"],
        ),
    )?;

    let request_duration_seconds = register(
        &registry,
        HistogramVec::new(
            HistogramOpts::new(
                "storefront_json_http_request_duration_seconds",
                "HTTP request duration in seconds partitioned by method and route.",
            )
            .buckets(DURATION_BUCKETS.to_vec()),
            &["method", "route"],
        ),
    )?;

    let requests_in_flight = register(
        &registry,
        IntGauge::with_opts(Opts::new(
            "storefront_json_http_requests_in_flight",
            "Current number of in-flight HTTP requests.",
        )),
    )?;

    let orders_placed_total = register(
        &registry,
        IntCounter::new("storefront_orders_placed_total", "Orders placed by shoppers."),
    )?;

    let payments_captured_total = register(
        &registry,
        IntCounter::new(
            "storefront_payments_captured_total",
            "Provider payments captured and recorded against orders.",
        ),
    )?;

    let fulfillment_actions_total = register(
        &registry,
        IntCounterVec::new(
            Opts::new(
                "storefront_fulfillment_actions_total",
                "Administrative order transitions partitioned by action.",
            ),
            &["action"],
        ),
    )?;

    Some(StoreMetrics {
        registry,
        requests_total,
        request_duration_seconds,
        requests_in_flight,
        orders_placed_total,
        payments_captured_total,
        fulfillment_actions_total,
    })
}

fn register<M>(registry: &Registry, metric: prometheus::Result<M>) -> Option<M>
where
    M: Collector + Clone + 'static,
{
    let metric = match metric {
        Ok(metric) => metric,
        Err(source) => {
            error!("failed to create metric: {source}");
            return None;
        }
    };

    if let Err(source) = registry.register(Box::new(metric.clone())) {
        error!("failed to register metric: {source}");
        return None;
    }

    Some(metric)
}

fn status_class(status_code: u16) -> &'static str {
    match status_code {
        100..=199 => "1xx",
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    }
}

#[cfg(test)]
mod tests {
    use salvo::{
        Router, Service,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use super::*;

    async fn scrape() -> TestResult<String> {
        let service =
            Service::new(Router::new().push(Router::with_path("metrics").get(metrics_handler)));

        let body = TestClient::get("http://example.com/metrics")
            .send(&service)
            .await
            .take_string()
            .await?;

        Ok(body)
    }

    #[tokio::test]
    async fn metrics_endpoint_exposes_http_metrics() -> TestResult {
        observe_request("GET", "/products", 200, 0.042);
        observe_request("GET", "/products", 500, 0.123);

        let body = scrape().await?;

        assert!(body.contains("storefront_json_http_requests_total"));
        assert!(body.contains("storefront_json_http_request_duration_seconds"));
        assert!(body.contains("storefront_json_http_requests_in_flight"));

        Ok(())
    }

    #[tokio::test]
    async fn metrics_endpoint_exposes_order_lifecycle_counters() -> TestResult {
        record_order_placed();
        record_payment_captured();
        record_fulfillment_action(FulfillmentAction::Delivered);

        let body = scrape().await?;

        assert!(body.contains("storefront_orders_placed_total"));
        assert!(body.contains("storefront_payments_captured_total"));
        assert!(body.contains("storefront_fulfillment_actions_total{action=\"delivered\"}"));

        Ok(())
    }

    #[test]
    fn status_classes_group_by_hundreds() {
        assert_eq!(status_class(201), "2xx");
        assert_eq!(status_class(404), "4xx");
        assert_eq!(status_class(502), "5xx");
        assert_eq!(status_class(42), "other");
    }
}
