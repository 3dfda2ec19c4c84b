//! Page view models
//!
//! Each view is assembled from an already-fetched upstream payload. All
//! links are internal navigation paths with encoded tokens, so whatever
//! renders a view never has to touch an upstream URL itself.

use serde::Serialize;
use utoipa::ToSchema;

use crate::codec::RouteToken;
use crate::constants::VIDEO_NOT_AVAILABLE;
use crate::derive::derive_detail_url;
use crate::models::{
    AnimeDetail, AnimeListItem, DownloadLink, Episode, HomeData, LatestRelease, Recommendation,
    SearchResultItem, StreamData, StreamingServer,
};
use crate::navigation::Route;

/// Poster card linking to a title detail page
#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub title: String,
    pub image: String,
    /// Internal `/anime/<token>` path
    pub href: String,
    /// Episode badge, when the source carries one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub episode: Option<String>,
}

impl Card {
    /// Card for an upstream detail page URL
    fn for_detail(title: &str, image: &str, detail_url: &str, episode: Option<&str>) -> Self {
        Self {
            title: title.to_string(),
            image: image.to_string(),
            href: Route::anime(detail_url).to_path(),
            episode: episode
                .filter(|e| !e.is_empty())
                .map(|e| e.to_string()),
        }
    }

    /// Card for an upstream URL that may point at an episode page
    fn for_episode_or_detail(title: &str, image: &str, url: &str, episode: &str) -> Self {
        Self::for_detail(title, image, &derive_detail_url(url), Some(episode))
    }
}

impl From<&Recommendation> for Card {
    fn from(rec: &Recommendation) -> Self {
        Card::for_detail(&rec.title, &rec.image, &rec.url, None)
    }
}

impl From<&LatestRelease> for Card {
    fn from(item: &LatestRelease) -> Self {
        Card::for_episode_or_detail(&item.title, &item.image, &item.url, &item.episode)
    }
}

impl From<&AnimeListItem> for Card {
    fn from(item: &AnimeListItem) -> Self {
        Card::for_episode_or_detail(&item.title, &item.image, &item.url, &item.episode)
    }
}

impl From<&SearchResultItem> for Card {
    fn from(item: &SearchResultItem) -> Self {
        Card::for_detail(&item.title, &item.image, &item.link, None)
    }
}

/// Featured title at the top of the home page
#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Hero {
    pub title: String,
    pub image: String,
    pub summary: String,
    pub status: String,
    #[serde(rename = "type")]
    pub anime_type: String,
    pub href: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenreSection {
    pub genre: String,
    pub cards: Vec<Card>,
}

#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HomeView {
    pub page: u32,
    pub hero: Option<Hero>,
    pub latest_releases: Vec<Card>,
    pub genre_sections: Vec<GenreSection>,
}

/// Build the home view
///
/// Only the first slide is featured. Latest releases and genre entries
/// carry episode URLs, which are mapped to their title's detail page.
pub fn home_view(page: u32, data: &HomeData) -> HomeView {
    let hero = data.slide.first().map(|slide| Hero {
        title: slide.title.clone(),
        image: slide.image.clone(),
        summary: slide.summary.clone(),
        status: slide.status.clone(),
        anime_type: slide.anime_type.clone(),
        href: Route::anime(&slide.url).to_path(),
    });

    HomeView {
        page,
        hero,
        latest_releases: data.latest_releases.iter().map(Card::from).collect(),
        genre_sections: data
            .genre_recommendations
            .iter()
            .map(|section| GenreSection {
                genre: section.genre.clone(),
                cards: section.anime_list.iter().map(Card::from).collect(),
            })
            .collect(),
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchView {
    pub query: String,
    pub results: Vec<Card>,
}

pub fn search_view(query: &str, results: &[SearchResultItem]) -> SearchView {
    SearchView {
        query: query.to_string(),
        results: results.iter().map(Card::from).collect(),
    }
}

/// Link to an episode's watch page
#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeLink {
    pub number: String,
    pub title: String,
    pub date: String,
    /// Upstream episode page URL, used to match the current episode
    #[serde(skip)]
    pub url: String,
    /// Internal `/watch/<token>?from=<detail token>` path
    pub href: String,
}

impl EpisodeLink {
    fn new(episode: &Episode, detail: &RouteToken) -> Self {
        Self {
            number: episode.number.clone(),
            title: episode.title.clone(),
            date: episode.date.clone(),
            url: episode.url.clone(),
            href: Route::watch_from(&episode.url, detail).to_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DetailView {
    pub title: String,
    pub alternative_title: String,
    pub status: String,
    pub studio: String,
    pub release_date: String,
    pub duration: String,
    pub season: String,
    #[serde(rename = "type")]
    pub anime_type: String,
    pub fansub: String,
    pub genres: Vec<String>,
    pub description: String,
    pub cover: Option<String>,
    pub big_cover: Option<String>,
    /// Newest episode first, as listed upstream
    pub episodes: Vec<EpisodeLink>,
    pub recommendations: Vec<Card>,
}

/// Build the detail view for the title addressed by `token`
pub fn detail_view(token: &RouteToken, detail: &AnimeDetail) -> DetailView {
    let images = detail.image_url.first();

    DetailView {
        title: detail.title.clone(),
        alternative_title: detail.alternative_title.clone(),
        status: detail.status.clone(),
        studio: detail.studio.clone(),
        release_date: detail.release_date.clone(),
        duration: detail.duration.clone(),
        season: detail.season.clone(),
        anime_type: detail.anime_type.clone(),
        fansub: detail.fansub.clone(),
        genres: detail.genres.clone(),
        description: detail.description.clone(),
        cover: images.map(|i| i.cover.clone()),
        big_cover: images.map(|i| i.big_cover.clone()),
        episodes: detail
            .episodes
            .iter()
            .map(|ep| EpisodeLink::new(ep, token))
            .collect(),
        recommendations: detail.recommendations.iter().map(Card::from).collect(),
    }
}

/// Previous/next controls and episode picker for the watch page
#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeNavigator {
    pub previous: Option<EpisodeLink>,
    pub next: Option<EpisodeLink>,
    /// Position of the current episode in `episodes`
    pub current_index: usize,
    /// Oldest episode first
    pub episodes: Vec<EpisodeLink>,
}

/// Build the navigator for `current_url` out of an upstream episode list
///
/// Upstream lists episodes newest first; the navigator runs oldest first so
/// that "next" means the following episode. Returns `None` when the current
/// episode is not part of the list.
pub fn episode_navigator(
    episodes: &[Episode],
    current_url: &str,
    detail: &RouteToken,
) -> Option<EpisodeNavigator> {
    let ordered: Vec<EpisodeLink> = episodes
        .iter()
        .rev()
        .map(|ep| EpisodeLink::new(ep, detail))
        .collect();

    let current_index = ordered.iter().position(|ep| ep.url == current_url)?;

    let previous = current_index
        .checked_sub(1)
        .and_then(|i| ordered.get(i))
        .cloned();
    let next = ordered.get(current_index + 1).cloned();

    Some(EpisodeNavigator {
        previous,
        next,
        current_index,
        episodes: ordered,
    })
}

/// Servers that actually carry an embed
pub fn valid_servers(servers: &[StreamingServer]) -> Vec<StreamingServer> {
    servers
        .iter()
        .filter(|s| !s.link.is_empty() && !s.link.contains(VIDEO_NOT_AVAILABLE))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WatchView {
    pub title: String,
    pub image: String,
    pub episode_number: String,
    pub description: String,
    pub rating: String,
    pub genres: Vec<String>,
    /// Servers with a playable embed
    pub servers: Vec<StreamingServer>,
    /// Embed URL to load first; `None` when no server is playable
    pub active_server: Option<String>,
    pub download_links: Vec<DownloadLink>,
    pub related: Vec<Card>,
    /// Internal path back to the title detail page
    pub back_href: Option<String>,
    pub navigator: Option<EpisodeNavigator>,
}

/// Build the watch view for the episode at `current_url`
///
/// `from` and `episodes` come from the detail page the viewer arrived from,
/// when known.
pub fn watch_view(
    current_url: &str,
    stream: &StreamData,
    from: Option<&RouteToken>,
    episodes: Option<&[Episode]>,
) -> WatchView {
    let servers = valid_servers(&stream.streaming_servers);
    let active_server = servers.first().map(|s| s.link.clone());

    let navigator = match (from, episodes) {
        (Some(detail), Some(episodes)) => episode_navigator(episodes, current_url, detail),
        _ => None,
    };

    WatchView {
        title: stream.title.clone(),
        image: stream.image.clone(),
        episode_number: stream.episode_number.clone(),
        description: stream.description.clone(),
        rating: stream.rating.clone(),
        genres: stream.genre.clone(),
        servers,
        active_server,
        download_links: stream.download_links.clone(),
        related: stream.related_anime.iter().map(Card::from).collect(),
        back_href: from.map(|token| {
            Route::Anime {
                token: token.clone(),
            }
            .to_path()
        }),
        navigator,
    }
}
