//! TMDB Gateway Library
//!
//! A stateless HTTP gateway in front of the TMDB metadata API. Each inbound
//! route maps onto exactly one upstream GET; the server-held API key is
//! injected and the upstream JSON is relayed unchanged.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod upstream;

pub use config::schema::ProxyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
