//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, CORS, tracing)
//!     → request.rs (request ID)
//!     → routing (route table lookup)
//!     → upstream (single GET against the metadata API)
//!     → response.rs (relay body as 200, or error envelope)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{RequestIdExt, X_REQUEST_ID};
pub use response::{ErrorBody, RelayError};
pub use server::{AppState, HttpServer, ServerError};
