//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! converter + http host produce:
//!     → logging.rs (tracing subscriber, env filter)
//!     → metrics.rs (conversion counters, Prometheus endpoint)
//! ```
//!
//! # Design Decisions
//! - Header contents never appear in logs or metric labels
//! - Conversion failures are debug-level events, never warnings
//! - Metric updates are no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
