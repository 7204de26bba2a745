//! The gateway's route table.
//!
//! Each entry maps one inbound path pattern onto one upstream path, names
//! the query parameters the upstream call carries, and the message used
//! when the upstream call fails. Order matters: the first matching entry
//! wins, so literal paths sit above the `:id` patterns they overlap with.

/// Query parameters attached to the upstream call, besides `api_key`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForwardParams {
    /// Nothing beyond the credential.
    None,
    /// `language`.
    Language,
    /// `language` and `page`.
    LanguageAndPage,
    /// Every inbound query pair, as received.
    AllQuery,
    /// Inbound `q` sent as `query`, plus `language`. `q` is required.
    Search,
}

/// Inbound query parameter required by [`ForwardParams::Search`].
pub const SEARCH_PARAM: &str = "q";

/// The `/search` route was called without a usable `q`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Missing query parameter ?q=")]
pub struct MissingQuery;

impl ForwardParams {
    /// Build the upstream query pairs for this route, excluding `api_key`.
    ///
    /// Inbound `api_key` pairs are never forwarded.
    pub fn query_pairs(
        self,
        inbound: &[(String, String)],
        language: &str,
        page: u32,
    ) -> Result<Vec<(String, String)>, MissingQuery> {
        let language = ("language".to_string(), language.to_string());

        let pairs = match self {
            ForwardParams::None => Vec::new(),
            ForwardParams::Language => vec![language],
            ForwardParams::LanguageAndPage => vec![language, ("page".to_string(), page.to_string())],
            ForwardParams::AllQuery => inbound
                .iter()
                .filter(|(key, _)| key != "api_key")
                .cloned()
                .collect(),
            ForwardParams::Search => {
                let query = inbound
                    .iter()
                    .find(|(key, _)| key == SEARCH_PARAM)
                    .map(|(_, value)| value)
                    .filter(|value| !value.is_empty())
                    .ok_or(MissingQuery)?;
                vec![("query".to_string(), query.clone()), language]
            }
        };

        Ok(pairs)
    }
}

/// One row of the route table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteSpec {
    /// Route identifier for logging/metrics.
    pub name: &'static str,
    /// Inbound path pattern (`:name` placeholders).
    pub path: &'static str,
    /// Upstream path pattern (`{name}` placeholders).
    pub upstream: &'static str,
    /// Query parameters sent upstream.
    pub params: ForwardParams,
    /// `error` field of the 500 envelope when the upstream call fails.
    pub failure: &'static str,
}

const fn route(
    name: &'static str,
    path: &'static str,
    upstream: &'static str,
    params: ForwardParams,
    failure: &'static str,
) -> RouteSpec {
    RouteSpec {
        name,
        path,
        upstream,
        params,
        failure,
    }
}

use ForwardParams::{AllQuery, Language, LanguageAndPage, Search};

/// Every relayed route, in match order.
pub static ROUTES: &[RouteSpec] = &[
    route("popular_movies", "/movie/popular", "/movie/popular", LanguageAndPage, "Failed to fetch popular movies"),
    route("popular_movies_legacy", "/movies/popular", "/movie/popular", LanguageAndPage, "Failed to fetch popular movies"),
    route("now_playing_movies", "/movie/now-playing", "/movie/now_playing", LanguageAndPage, "Failed to fetch now playing movies"),
    route("discover_movies", "/discover/movie", "/discover/movie", AllQuery, "Failed to discover movies"),
    route("movie_genres", "/genre/movie/list", "/genre/movie/list", Language, "Failed to fetch movie genres"),
    route("trending_movies", "/trending/movie", "/trending/movie/week", Language, "Failed to fetch trending movies"),
    route("popular_tv", "/tv/popular", "/tv/popular", LanguageAndPage, "Failed to fetch popular TV shows"),
    route("on_the_air_tv", "/tv/on-the-air", "/tv/on_the_air", LanguageAndPage, "Failed to fetch on-the-air TV shows"),
    route("discover_tv", "/discover/tv", "/discover/tv", AllQuery, "Failed to discover TV shows"),
    route("tv_genres", "/genre/tv/list", "/genre/tv/list", Language, "Failed to fetch TV genres"),
    route("trending_tv", "/trending/tv", "/trending/tv/week", Language, "Failed to fetch trending TV shows"),
    route("search_movies", "/search", "/search/movie", Search, "Search failed"),
    route("movie_details", "/movie/:id", "/movie/{id}", Language, "Failed to fetch movie details"),
    route("movie_videos", "/movie/:id/videos", "/movie/{id}/videos", Language, "Failed to fetch movie videos"),
    route("movie_watch_providers", "/movie/:id/watch/providers", "/movie/{id}/watch/providers", ForwardParams::None, "Failed to fetch movie watch providers"),
    route("movie_credits", "/movie/:id/credits", "/movie/{id}/credits", Language, "Failed to fetch movie credits"),
    route("tv_details", "/tv/:id", "/tv/{id}", Language, "Failed to fetch TV show details"),
    route("tv_season", "/tv/:id/season/:season_number", "/tv/{id}/season/{season_number}", Language, "Failed to fetch season details"),
    route("tv_videos", "/tv/:id/videos", "/tv/{id}/videos", Language, "Failed to fetch TV videos"),
    route("tv_watch_providers", "/tv/:id/watch/providers", "/tv/{id}/watch/providers", ForwardParams::None, "Failed to fetch TV watch providers"),
    route("tv_credits", "/tv/:id/credits", "/tv/{id}/credits", Language, "Failed to fetch TV credits"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_route_names_unique() {
        let names: HashSet<_> = ROUTES.iter().map(|r| r.name).collect();
        assert_eq!(names.len(), ROUTES.len());
    }

    #[test]
    fn test_language_and_page() {
        let got = LanguageAndPage.query_pairs(&[], "en-US", 1).unwrap();
        assert_eq!(got, pairs(&[("language", "en-US"), ("page", "1")]));
    }

    #[test]
    fn test_none_ignores_inbound() {
        let got = ForwardParams::None
            .query_pairs(&pairs(&[("language", "de")]), "en-US", 1)
            .unwrap();
        assert!(got.is_empty());
    }

    #[test]
    fn test_all_query_forwarded_except_api_key() {
        let inbound = pairs(&[
            ("with_genres", "28"),
            ("api_key", "stolen"),
            ("sort_by", "popularity.desc"),
        ]);
        let got = AllQuery.query_pairs(&inbound, "en-US", 1).unwrap();
        assert_eq!(
            got,
            pairs(&[("with_genres", "28"), ("sort_by", "popularity.desc")])
        );
    }

    #[test]
    fn test_search_maps_q_to_query() {
        let got = Search
            .query_pairs(&pairs(&[("q", "batman")]), "en-US", 1)
            .unwrap();
        assert_eq!(got, pairs(&[("query", "batman"), ("language", "en-US")]));
    }

    #[test]
    fn test_search_requires_q() {
        assert_eq!(Search.query_pairs(&[], "en-US", 1), Err(MissingQuery));
        assert_eq!(
            Search.query_pairs(&pairs(&[("q", "")]), "en-US", 1),
            Err(MissingQuery)
        );
        assert_eq!(
            MissingQuery.to_string(),
            "Missing query parameter ?q="
        );
    }
}
