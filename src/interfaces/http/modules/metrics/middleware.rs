//! HTTP request metrics middleware

use std::time::Instant;

use axum::{body::Body, extract::MatchedPath, http::Request, middleware::Next, response::Response};

pub const REQUESTS_TOTAL: &str = "usuarios_http_requests_total";
pub const REQUEST_DURATION: &str = "usuarios_http_request_duration_seconds";
pub const REQUESTS_IN_FLIGHT: &str = "usuarios_http_requests_in_flight";

/// Register help texts with the installed recorder. Safe to call repeatedly.
pub fn describe_http_metrics() {
    metrics::describe_counter!(REQUESTS_TOTAL, "HTTP requests by method, route and status");
    metrics::describe_histogram!(
        REQUEST_DURATION,
        metrics::Unit::Seconds,
        "HTTP request latency by method and route"
    );
    metrics::describe_gauge!(REQUESTS_IN_FLIGHT, "HTTP requests currently being served");
}

/// Records request count, latency and in-flight gauge.
///
/// The `path` label is the matched route template (`/api/v1/usuarios/{id}`),
/// never the raw URI, so ids do not explode label cardinality.
pub async fn http_metrics_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().to_string();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|mp| mp.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let in_flight = metrics::gauge!(REQUESTS_IN_FLIGHT);
    in_flight.increment(1.0);
    let start = Instant::now();
    let response = next.run(request).await;
    let duration = start.elapsed().as_secs_f64();
    in_flight.decrement(1.0);

    let status = response.status().as_u16().to_string();

    metrics::counter!(REQUESTS_TOTAL, "method" => method.clone(), "path" => path.clone(), "status" => status)
        .increment(1);
    metrics::histogram!(REQUEST_DURATION, "method" => method, "path" => path).record(duration);

    response
}
