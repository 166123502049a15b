//! Observability subsystem for storefront
//!
//! - Structured logging through `tracing`
//! - Atomic counters for the index and its fallback
//!
//! Observability never affects request outcomes.

mod logging;
mod metrics;

pub use logging::{init_logging, LogConfig};
pub use metrics::{MetricsRegistry, MetricsSnapshot};
