//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path)
//!     → router.rs (route lookup)
//!     → template.rs (segment match, parameter capture)
//!     → Return: matched Route + upstream path, or NoMatch
//!
//! Route Compilation (at startup):
//!     table.rs ROUTES
//!     → Parse inbound and upstream templates
//!     → Check every upstream placeholder is captured inbound
//!     → Freeze as immutable Router
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex in hot path (segment comparison only)
//! - Deterministic: same input always matches same route
//! - First match wins (table order)

pub mod router;
pub mod table;
pub mod template;

pub use router::{RouteError, RouteMatch, Router};
pub use table::{ForwardParams, MissingQuery, RouteSpec, ROUTES};
