//! Internal navigation routes
//!
//! Views link to each other through paths of the form `/anime/<token>`,
//! `/watch/<token>` and `/search/<query>`. Tokens are produced by the codec
//! and stay opaque here: this module only places them in paths and reads
//! them back out.

use serde::Serialize;

use crate::codec::RouteToken;

/// A location in the browser's navigation scheme
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Route {
    Home,
    Search {
        query: String,
    },
    /// Title detail page
    Anime {
        token: RouteToken,
    },
    /// Episode player; `from` points back at the title detail page
    Watch {
        token: RouteToken,
        #[serde(skip_serializing_if = "Option::is_none")]
        from: Option<RouteToken>,
    },
}

impl Route {
    /// Detail route for an upstream detail page URL
    pub fn anime(detail_url: &str) -> Self {
        Route::Anime {
            token: RouteToken::encode(detail_url),
        }
    }

    /// Watch route for an upstream episode page URL
    pub fn watch(episode_url: &str) -> Self {
        Route::Watch {
            token: RouteToken::encode(episode_url),
            from: None,
        }
    }

    /// Watch route that remembers the detail page it was opened from
    pub fn watch_from(episode_url: &str, detail: &RouteToken) -> Self {
        Route::Watch {
            token: RouteToken::encode(episode_url),
            from: Some(detail.clone()),
        }
    }

    pub fn search(query: &str) -> Self {
        Route::Search {
            query: query.to_string(),
        }
    }

    /// Build the navigation path for this route
    pub fn to_path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Search { query } => format!("/search/{}", urlencoding::encode(query)),
            Route::Anime { token } => format!("/anime/{}", token),
            Route::Watch { token, from: None } => format!("/watch/{}", token),
            Route::Watch {
                token,
                from: Some(from),
            } => format!("/watch/{}?from={}", token, from),
        }
    }

    /// Read a navigation path back into a route
    ///
    /// Accepts hash-router forms (`#/anime/...`). Anything unrecognized
    /// resolves to [`Route::Home`].
    pub fn parse(path: &str) -> Self {
        let path = path.trim_start_matches('#');
        let path = path.split('#').next().unwrap_or_default();
        let (path, query) = match path.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (path, None),
        };

        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            ["search", raw] => {
                let query = urlencoding::decode(raw)
                    .map(|q| q.into_owned())
                    .unwrap_or_else(|_| raw.to_string());
                Route::Search { query }
            }
            ["anime", token] => Route::Anime {
                token: RouteToken::from_raw(*token),
            },
            ["watch", token] => Route::Watch {
                token: RouteToken::from_raw(*token),
                from: query.and_then(from_parameter),
            },
            _ => Route::Home,
        }
    }
}

/// Extract a non-empty `from` parameter from a query string
fn from_parameter(query: &str) -> Option<RouteToken> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, value)| *key == "from" && !value.is_empty())
        .map(|(_, value)| RouteToken::from_raw(value))
}
