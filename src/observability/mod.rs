//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Relay handler and middleware produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through log fields
//! - Metrics are off by default

pub mod logging;
pub mod metrics;
