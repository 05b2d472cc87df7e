//! # Actix Middleware Library
//!
//! Shared middleware components for actix-web services
//!
//! ## Modules
//! - `correlation_id`: `x-correlation-id` propagation
//! - `logging`: structured request/response logging
//! - `metrics`: Prometheus request metrics and `/metrics` handler

pub mod correlation_id;
pub mod logging;
pub mod metrics;

pub use correlation_id::{get_correlation_id, CorrelationId, CorrelationIdMiddleware};
pub use logging::Logging;
pub use metrics::{metrics_handler, MetricsMiddleware};
