//! Browser service
//!
//! Ties the pieces together for each page: decode the route token, fetch
//! from upstream, assemble the view. Handlers in [`crate::routes`] are thin
//! wrappers around these methods.

use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};
use utoipa::ToSchema;

use crate::cache::EpisodeCache;
use crate::client::ContentFetcher;
use crate::codec::RouteToken;
use crate::error::{AppError, AppResult};
use crate::models::Episode;
use crate::navigation::Route;
use crate::views::{
    detail_view, home_view, search_view, watch_view, DetailView, HomeView, SearchView, WatchView,
};

/// An internal path resolved to the upstream URL it addresses
#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    #[schema(value_type = Object)]
    pub route: Route,
    /// Decoded upstream URL for anime and watch routes
    pub upstream_url: Option<String>,
    /// Decoded detail URL a watch route was opened from
    pub from_url: Option<String>,
}

pub struct Browser {
    fetcher: Arc<dyn ContentFetcher>,
    episodes: EpisodeCache,
}

impl Browser {
    pub fn new(fetcher: Arc<dyn ContentFetcher>, episodes: EpisodeCache) -> Self {
        Self { fetcher, episodes }
    }

    pub fn episode_cache(&self) -> &EpisodeCache {
        &self.episodes
    }

    /// Home page; pages start at 1
    pub async fn home(&self, page: u32) -> AppResult<HomeView> {
        if page == 0 {
            return Err(AppError::validation("Page must be at least 1"));
        }

        let data = self.fetcher.home(page).await?;
        info!(
            "Home page {}: {} latest releases, {} genre sections",
            page,
            data.latest_releases.len(),
            data.genre_recommendations.len()
        );
        Ok(home_view(page, &data))
    }

    pub async fn search(&self, query: &str) -> AppResult<SearchView> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::validation("Search query is required"));
        }

        info!("Searching for anime: {}", query);
        let results = self.fetcher.search(query).await?;
        Ok(search_view(query, &results))
    }

    /// Detail page of the title addressed by `token`
    ///
    /// The episode list is remembered for the watch page.
    pub async fn detail(&self, token: &RouteToken) -> AppResult<DetailView> {
        let detail_url = token.decode()?;
        info!("Fetching anime detail: {}", detail_url);

        let detail = self.fetcher.detail(&detail_url).await?;
        if detail.title.is_empty() {
            return Err(AppError::not_found("Anime not found"));
        }

        self.episodes
            .insert(&detail_url, detail.episodes.clone())
            .await;
        Ok(detail_view(token, &detail))
    }

    /// Watch page of the episode addressed by `token`
    ///
    /// `from` is the detail page token the viewer came from. A bad `from`
    /// or a failure to load the episode list only drops the navigation
    /// controls, never the page.
    pub async fn watch(
        &self,
        token: &RouteToken,
        from: Option<&RouteToken>,
    ) -> AppResult<WatchView> {
        let episode_url = token.decode()?;
        info!("Fetching stream data: {}", episode_url);

        let stream = self.fetcher.stream(&episode_url).await?;

        let origin = from.and_then(|from| match from.decode() {
            Ok(detail_url) => Some((from, detail_url)),
            Err(e) => {
                warn!("Ignoring malformed detail token on watch page: {}", e);
                None
            }
        });

        let view = match origin {
            Some((from, detail_url)) => {
                let episodes = self.episodes_for(&detail_url).await;
                watch_view(&episode_url, &stream, Some(from), episodes.as_deref())
            }
            None => watch_view(&episode_url, &stream, None, None),
        };

        Ok(view)
    }

    /// Forget the episode list of a title the viewer navigated away from
    pub async fn leave_title(&self, token: &RouteToken) -> AppResult<bool> {
        let detail_url = token.decode()?;
        Ok(self.episodes.evict(&detail_url).await)
    }

    /// Resolve an internal navigation path to the upstream URL it carries
    pub fn resolve(&self, path: &str) -> AppResult<Resolution> {
        let route = Route::parse(path);
        let (upstream_url, from_url) = match &route {
            Route::Anime { token } => (Some(token.decode()?), None),
            Route::Watch { token, from } => (
                Some(token.decode()?),
                from.as_ref().map(RouteToken::decode).transpose()?,
            ),
            Route::Home | Route::Search { .. } => (None, None),
        };

        Ok(Resolution {
            route,
            upstream_url,
            from_url,
        })
    }

    /// Episode list for a title, from the cache or a fresh detail fetch
    async fn episodes_for(&self, detail_url: &str) -> Option<Vec<Episode>> {
        if let Some(episodes) = self.episodes.get(detail_url).await {
            return Some(episodes);
        }

        info!("Episode list not cached, fetching detail: {}", detail_url);
        match self.fetcher.detail(detail_url).await {
            Ok(detail) => {
                self.episodes
                    .insert(detail_url, detail.episodes.clone())
                    .await;
                Some(detail.episodes)
            }
            Err(e) => {
                warn!("Failed to load episode list for {}: {}", detail_url, e);
                None
            }
        }
    }
}
