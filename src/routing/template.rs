//! Path templates.
//!
//! # Responsibilities
//! - Parse route patterns into literal and parameter segments
//! - Match a request path, capturing parameter values
//! - Render a template back into path segments from captured values
//!
//! # Design Decisions
//! - Both `:name` and `{name}` placeholders are accepted
//! - Literal segments are case-sensitive
//! - Leading and trailing slashes are ignored
//! - Captured values are percent-decoded; rendering leaves encoding to the URL builder

use std::collections::HashMap;

/// One segment of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Param(String),
}

/// A parsed route pattern such as `/tv/:id/season/:season_number`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    segments: Vec<Segment>,
}

impl PathTemplate {
    /// Parse a pattern. Placeholders are `:name` or `{name}`.
    pub fn parse(pattern: &str) -> Self {
        let segments = split_path(pattern)
            .map(|raw| {
                if let Some(name) = raw.strip_prefix(':') {
                    Segment::Param(name.to_string())
                } else if let Some(name) = raw.strip_prefix('{').and_then(|r| r.strip_suffix('}')) {
                    Segment::Param(name.to_string())
                } else {
                    Segment::Literal(raw.to_string())
                }
            })
            .collect();

        Self { segments }
    }

    /// Names of every placeholder, in order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Match a request path. Returns the captured parameters on success.
    ///
    /// Parameters must be non-empty and valid UTF-8 once decoded, and may not
    /// decode to a dot segment (`.` or `..`).
    pub fn match_path(&self, path: &str) -> Option<HashMap<String, String>> {
        let parts: Vec<&str> = split_path(path).collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = HashMap::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(lit) => {
                    if lit != part {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    if part.is_empty() {
                        return None;
                    }
                    let value = urlencoding::decode(part).ok()?;
                    if value == "." || value == ".." {
                        return None;
                    }
                    params.insert(name.clone(), value.into_owned());
                }
            }
        }

        Some(params)
    }

    /// Render the template into path segments.
    ///
    /// Every placeholder must have a value in `params`; route tables check
    /// this when they are compiled.
    pub fn render(&self, params: &HashMap<String, String>) -> Vec<String> {
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Literal(lit) => lit.clone(),
                Segment::Param(name) => params.get(name).cloned().unwrap_or_default(),
            })
            .collect()
    }
}

fn split_path(path: &str) -> impl Iterator<Item = &str> {
    let trimmed = path.trim_matches('/');
    trimmed.split('/').filter(move |_| !trimmed.is_empty())
}
