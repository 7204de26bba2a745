//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Compile the route table into path templates
//! - Look up the matching route for a request path
//! - Return matched route or explicit no-match
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) template scan (the table holds about twenty rows)
//! - Explicit NoMatch rather than silent default

use std::collections::HashMap;

use crate::routing::table::{RouteSpec, ROUTES};
use crate::routing::template::PathTemplate;

/// A route table that references an upstream placeholder its inbound
/// pattern does not capture.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("route `{route}` uses upstream parameter `{param}` that its path does not capture")]
pub struct RouteError {
    pub route: &'static str,
    pub param: String,
}

#[derive(Debug)]
struct CompiledRoute {
    spec: &'static RouteSpec,
    inbound: PathTemplate,
    upstream: PathTemplate,
}

/// A successful lookup.
#[derive(Debug)]
pub struct RouteMatch<'a> {
    /// The table row that matched.
    pub route: &'static RouteSpec,
    /// Parameters captured from the inbound path.
    pub params: HashMap<String, String>,
    upstream: &'a PathTemplate,
}

impl RouteMatch<'_> {
    /// Upstream path segments with the captured parameters substituted.
    pub fn upstream_segments(&self) -> Vec<String> {
        self.upstream.render(&self.params)
    }
}

/// Compiled, ordered route table.
#[derive(Debug)]
pub struct Router {
    routes: Vec<CompiledRoute>,
}

impl Router {
    /// Compile the built-in route table.
    pub fn new() -> Result<Self, RouteError> {
        Self::from_specs(ROUTES)
    }

    /// Compile an arbitrary table. Earlier rows take precedence.
    pub fn from_specs(specs: &'static [RouteSpec]) -> Result<Self, RouteError> {
        let mut routes = Vec::with_capacity(specs.len());

        for spec in specs {
            let inbound = PathTemplate::parse(spec.path);
            let upstream = PathTemplate::parse(spec.upstream);

            let captured: Vec<&str> = inbound.param_names().collect();
            if let Some(missing) = upstream.param_names().find(|p| !captured.contains(p)) {
                return Err(RouteError {
                    route: spec.name,
                    param: missing.to_string(),
                });
            }

            routes.push(CompiledRoute {
                spec,
                inbound,
                upstream,
            });
        }

        tracing::debug!(routes = routes.len(), "Route table compiled");
        Ok(Self { routes })
    }

    /// Find the first route matching `path`.
    pub fn match_path(&self, path: &str) -> Option<RouteMatch<'_>> {
        self.routes.iter().find_map(|route| {
            route.inbound.match_path(path).map(|params| RouteMatch {
                route: route.spec,
                params,
                upstream: &route.upstream,
            })
        })
    }

    /// Number of compiled routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// True when no routes are compiled.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
