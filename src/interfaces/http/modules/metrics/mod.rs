//! Prometheus metrics endpoint and HTTP metrics middleware

pub mod handlers;
pub mod middleware;

pub use handlers::*;
pub use middleware::{describe_http_metrics, http_metrics_middleware};
