//! Prometheus metrics: HTTP traffic plus booking and service-error counters.

use std::sync::OnceLock;

use prometheus::{
    Encoder as _, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};
use salvo::{
    Request, Response, handler,
    http::{StatusCode, StatusError, header::CONTENT_TYPE},
};
use tracing::error;

use shareit_app::domain::bookings::{
    data::BookingRole, records::BookingStatus, state::BookingState,
};

const PREFIX: &str = "shareit_json";

const DURATION_BUCKETS: [f64; 13] = [
    0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

#[derive(Debug)]
struct Metrics {
    registry: Registry,
    requests_total: IntCounterVec,
    request_duration_seconds: HistogramVec,
    requests_in_flight: IntGauge,
    booking_listings_total: IntCounterVec,
    booking_decisions_total: IntCounterVec,
    service_errors_total: IntCounterVec,
}

static METRICS: OnceLock<Option<Metrics>> = OnceLock::new();

/// Counts a request as in flight until dropped.
#[derive(Debug)]
pub(super) struct InFlightRequestGuard(Option<&'static IntGauge>);

impl InFlightRequestGuard {
    pub(super) fn track() -> Self {
        let gauge = metrics().map(|metrics| &metrics.requests_in_flight);

        if let Some(gauge) = gauge {
            gauge.inc();
        }

        Self(gauge)
    }
}

impl Drop for InFlightRequestGuard {
    fn drop(&mut self) {
        if let Some(gauge) = self.0 {
            gauge.dec();
        }
    }
}

pub(super) fn observe_request(method: &str, route: &str, status_code: u16, duration_seconds: f64) {
    let Some(metrics) = metrics() else {
        return;
    };

    let status_code = status_code.to_string();

    metrics
        .requests_total
        .with_label_values(&[method, route, status_class(&status_code), status_code.as_str()])
        .inc();

    metrics
        .request_duration_seconds
        .with_label_values(&[method, route])
        .observe(duration_seconds);
}

/// Counts a booking listing by the caller's role and the requested state.
pub(crate) fn record_booking_listing(role: BookingRole, state: BookingState) {
    if let Some(metrics) = metrics() {
        metrics
            .booking_listings_total
            .with_label_values(&[role_label(role), state_label(state)])
            .inc();
    }
}

/// Counts an owner's decision by the status it produced.
pub(crate) fn record_booking_decision(status: BookingStatus) {
    if let Some(metrics) = metrics() {
        metrics
            .booking_decisions_total
            .with_label_values(&[status_label(status)])
            .inc();
    }
}

/// Counts a service error by domain and the HTTP status it was mapped to.
pub(crate) fn record_service_error(domain: &str, status: &StatusError) {
    if let Some(metrics) = metrics() {
        metrics
            .service_errors_total
            .with_label_values(&[domain, status.code.as_str()])
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

    let body = match encoder.encode_to_string(&metrics.registry.gather()) {
        Ok(body) => body,
        Err(source) => {
            error!("failed to encode metrics: {source}");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);

            return;
        }
    };

    if let Err(source) = res.add_header(CONTENT_TYPE, encoder.format_type(), true) {
        error!("failed to set metrics content type: {source}");
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);

        return;
    }

    res.render(body);
}

fn metrics() -> Option<&'static Metrics> {
    METRICS
        .get_or_init(|| {
            build_metrics()
                .inspect_err(|source| error!("failed to build metrics registry: {source}"))
                .ok()
        })
        .as_ref()
}

fn counter(name: &str, help: &str, labels: &[&str]) -> prometheus::Result<IntCounterVec> {
    IntCounterVec::new(Opts::new(format!("{PREFIX}_{name}"), help), labels)
}

fn build_metrics() -> prometheus::Result<Metrics> {
    let registry = Registry::new();

    let requests_total = counter(
        "http_requests_total",
        "HTTP requests by method, route, status class and status code.",
        &["method", "route", "status_class", "status_code"],
    )?;

    let request_duration_seconds = HistogramVec::new(
        HistogramOpts::new(
            format!("{PREFIX}_http_request_duration_seconds"),
            "HTTP request duration in seconds by method and route.",
        )
        .buckets(DURATION_BUCKETS.to_vec()),
        &["method", "route"],
    )?;

    let requests_in_flight = IntGauge::with_opts(Opts::new(
        format!("{PREFIX}_http_requests_in_flight"),
        "HTTP requests currently being served.",
    ))?;

    let booking_listings_total = counter(
        "booking_listings_total",
        "Booking listings served by caller role and requested state.",
        &["role", "state"],
    )?;

    let booking_decisions_total = counter(
        "booking_decisions_total",
        "Owner decisions on waiting bookings by resulting status.",
        &["status"],
    )?;

    let service_errors_total = counter(
        "service_errors_total",
        "Service errors returned to clients by domain and HTTP status.",
        &["domain", "status_code"],
    )?;

    registry.register(Box::new(requests_total.clone()))?;
    registry.register(Box::new(request_duration_seconds.clone()))?;
    registry.register(Box::new(requests_in_flight.clone()))?;
    registry.register(Box::new(booking_listings_total.clone()))?;
    registry.register(Box::new(booking_decisions_total.clone()))?;
    registry.register(Box::new(service_errors_total.clone()))?;

    Ok(Metrics {
        registry,
        requests_total,
        request_duration_seconds,
        requests_in_flight,
        booking_listings_total,
        booking_decisions_total,
        service_errors_total,
    })
}

fn status_class(status_code: &str) -> &'static str {
    match status_code.as_bytes().first() {
        Some(b'1') => "1xx",
        Some(b'2') => "2xx",
        Some(b'3') => "3xx",
        Some(b'4') => "4xx",
        Some(b'5') => "5xx",
        _ => "other",
    }
}

fn role_label(role: BookingRole) -> &'static str {
    match role {
        BookingRole::Booker => "booker",
        BookingRole::Owner => "owner",
    }
}

fn state_label(state: BookingState) -> &'static str {
    match state {
        BookingState::All => "all",
        BookingState::Current => "current",
        BookingState::Past => "past",
        BookingState::Future => "future",
        BookingState::Waiting => "waiting",
        BookingState::Rejected => "rejected",
    }
}

fn status_label(status: BookingStatus) -> &'static str {
    match status {
        BookingStatus::Waiting => "waiting",
        BookingStatus::Approved => "approved",
        BookingStatus::Rejected => "rejected",
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

    #[test]
    fn status_codes_fall_into_classes() {
        assert_eq!(status_class("204"), "2xx");
        assert_eq!(status_class("404"), "4xx");
        assert_eq!(status_class("503"), "5xx");
        assert_eq!(status_class(""), "other");
    }

    #[tokio::test]
    async fn http_metrics_are_exposed() -> TestResult {
        observe_request("GET", "/items/{id}", 200, 0.042);

        let body = scrape().await?;

        assert!(
            body.contains(r#"shareit_json_http_requests_total{method="GET",route="/items/{id}",status_class="2xx",status_code="200"}"#),
            "expected labelled request counter in {body}"
        );
        assert!(
            body.contains("shareit_json_http_request_duration_seconds"),
            "expected duration histogram"
        );
        assert!(
            body.contains("shareit_json_http_requests_in_flight"),
            "expected in-flight gauge"
        );

        Ok(())
    }

    #[tokio::test]
    async fn booking_listings_are_counted_by_role_and_state() -> TestResult {
        record_booking_listing(BookingRole::Owner, BookingState::Current);

        let body = scrape().await?;

        assert!(
            body.contains(r#"shareit_json_booking_listings_total{role="owner",state="current"}"#),
            "expected owner/current listing counter in {body}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn decisions_and_service_errors_are_counted() -> TestResult {
        record_booking_decision(BookingStatus::Rejected);
        record_service_error("bookings", &StatusError::forbidden());

        let body = scrape().await?;

        assert!(
            body.contains(r#"shareit_json_booking_decisions_total{status="rejected"}"#),
            "expected rejected decision counter in {body}"
        );
        assert!(
            body.contains(r#"shareit_json_service_errors_total{domain="bookings",status_code="403"}"#),
            "expected forbidden bookings error counter in {body}"
        );

        Ok(())
    }
}
