//! Upstream API access.
//!
//! # Data Flow
//! ```text
//! RouteMatch (upstream segments) + query pairs
//!     → client.rs build_url (base URL + segments + api_key + query)
//!     → client.rs get (single GET, no retry)
//!     → UpstreamResponse (status + JSON bytes) or UpstreamError
//! ```
//!
//! # Design Decisions
//! - One shared reqwest client; its default pool is the only connection policy
//! - Bodies are validated as JSON but relayed as the original bytes
//! - Error messages never carry the request URL (it holds the credential)

pub mod client;

pub use client::{redact, UpstreamClient, UpstreamError, UpstreamResponse};
