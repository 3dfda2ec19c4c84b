//! Data models for the Kompi browser
//!
//! Upstream records mirror the JSON returned by the content API verbatim
//! (camelCase on the wire). The API is not schema-validated, so every field
//! falls back to an empty value when missing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Hero slide on the home page
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Slide {
    pub title: String,
    /// Detail page URL
    pub url: String,
    pub image: String,
    /// Short synopsis
    #[serde(rename = "ringkasan")]
    pub summary: String,
    pub status: String,
    #[serde(rename = "tipe")]
    pub anime_type: String,
}

/// Entry in the latest releases section
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct LatestRelease {
    pub title: String,
    /// Episode page URL
    pub url: String,
    pub image: String,
    /// Episode badge (e.g. "Ep 12")
    pub episode: String,
}

/// Entry of a genre recommendation section
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct AnimeListItem {
    pub title: String,
    /// Episode or detail page URL
    pub url: String,
    pub image: String,
    pub episode: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct GenreRecommendation {
    pub genre: String,
    pub anime_list: Vec<AnimeListItem>,
}

/// Payload of the `/home` endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct HomeData {
    pub slide: Vec<Slide>,
    #[serde(rename = "rilisanTerbaru")]
    pub latest_releases: Vec<LatestRelease>,
    #[serde(rename = "rekomendasiGenre")]
    pub genre_recommendations: Vec<GenreRecommendation>,
}

/// Entry of the `/search` endpoint payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchResultItem {
    pub title: String,
    /// Detail page URL
    pub link: String,
    pub image: String,
}

/// Cover images of a title
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageSet {
    pub big_cover: String,
    pub cover: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Episode {
    pub number: String,
    pub title: String,
    /// Episode page URL
    pub url: String,
    pub date: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Recommendation {
    pub title: String,
    /// Detail page URL
    pub url: String,
    pub image: String,
}

/// Payload of the `/detail` endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct AnimeDetail {
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
    pub image_url: Vec<ImageSet>,
    /// Newest episode first
    pub episodes: Vec<Episode>,
    pub recommendations: Vec<Recommendation>,
}

/// Embed server for an episode
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct StreamingServer {
    pub server: String,
    /// Embed URL, or a placeholder text when the server has no video
    pub link: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct DownloadLinkItem {
    pub name: String,
    pub url: String,
}

/// Download mirrors for one quality level
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct DownloadLink {
    pub quality: String,
    pub links: Vec<DownloadLinkItem>,
}

/// Payload of the `/stream` endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct StreamData {
    pub title: String,
    pub image: String,
    pub episode_number: String,
    pub description: String,
    pub rating: String,
    pub genre: Vec<String>,
    pub streaming_servers: Vec<StreamingServer>,
    pub download_links: Vec<DownloadLink>,
    pub related_anime: Vec<Recommendation>,
}

/// Generic API response wrapper for successful responses
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    /// Whether the operation was successful (always true for this type)
    pub success: bool,
    /// The response payload
    pub data: T,
    /// ISO timestamp of when data was assembled
    pub timestamp: String,
}

impl<T> ApiResponse<T> {
    /// Create a new successful API response with the current timestamp
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Whether the operation was successful (always false for errors)
    pub success: bool,
    /// Error message describing what went wrong
    pub error: String,
    /// ISO timestamp of when the error occurred
    pub timestamp: String,
}

impl ApiError {
    /// Create a new API error response with the current timestamp
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    /// Create a new API error response with a custom timestamp
    pub fn with_timestamp(error: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            success: false,
            error: error.into(),
            timestamp: timestamp.to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_home_data_from_upstream_json() {
        let value = json!({
            "slide": [{
                "title": "Gintama",
                "url": "https://x.example/anime/gintama/",
                "image": "https://img.example/g.jpg",
                "ringkasan": "Samurai comedy",
                "status": "Completed",
                "tipe": "TV"
            }],
            "rilisanTerbaru": [{
                "title": "Bleach",
                "url": "https://x.example/bleach-episode-3/",
                "image": "https://img.example/b.jpg",
                "episode": "Ep 3"
            }],
            "rekomendasiGenre": [{
                "genre": "Action",
                "animeList": [{
                    "title": "Naruto",
                    "url": "https://x.example/naruto-episode-1/",
                    "image": "https://img.example/n.jpg",
                    "episode": "Ep 1"
                }]
            }]
        });

        let home: HomeData = serde_json::from_value(value).unwrap();
        assert_eq!(home.slide[0].summary, "Samurai comedy");
        assert_eq!(home.slide[0].anime_type, "TV");
        assert_eq!(home.latest_releases[0].episode, "Ep 3");
        assert_eq!(home.genre_recommendations[0].anime_list[0].title, "Naruto");
    }

    #[test]
    fn test_anime_detail_missing_fields_default() {
        let detail: AnimeDetail = serde_json::from_value(json!({
            "title": "Gintama",
            "imageUrl": [{ "bigCover": "big.jpg", "cover": "cover.jpg" }],
            "type": "TV"
        }))
        .unwrap();

        assert_eq!(detail.title, "Gintama");
        assert_eq!(detail.anime_type, "TV");
        assert_eq!(detail.image_url[0].big_cover, "big.jpg");
        assert!(detail.episodes.is_empty());
        assert!(detail.alternative_title.is_empty());
    }

    #[test]
    fn test_stream_data_from_upstream_json() {
        let stream: StreamData = serde_json::from_value(json!({
            "title": "Gintama Episode 1",
            "episodeNumber": "1",
            "streamingServers": [{ "server": "Main", "link": "https://embed.example/1" }],
            "downloadLinks": [{
                "quality": "720p",
                "links": [{ "name": "Drive", "url": "https://dl.example/1" }]
            }],
            "relatedAnime": [{ "title": "Gintama'", "url": "https://x.example/anime/gintama-2/", "image": "" }]
        }))
        .unwrap();

        assert_eq!(stream.episode_number, "1");
        assert_eq!(stream.streaming_servers[0].server, "Main");
        assert_eq!(stream.download_links[0].links[0].name, "Drive");
        assert_eq!(stream.related_anime.len(), 1);
    }

    #[test]
    fn test_slide_serializes_upstream_names() {
        let slide = Slide {
            summary: "s".to_string(),
            anime_type: "TV".to_string(),
            ..Default::default()
        };
        let value = serde_json::to_value(&slide).unwrap();
        assert_eq!(value["ringkasan"], "s");
        assert_eq!(value["tipe"], "TV");
    }

    #[test]
    fn test_api_response_new() {
        let response = ApiResponse::new(vec![1, 2, 3]);
        assert!(response.success);
        assert_eq!(response.data, vec![1, 2, 3]);
        assert!(!response.timestamp.is_empty());
    }

    #[test]
    fn test_api_error_with_timestamp() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let err = ApiError::with_timestamp("Anime not found", ts);
        assert!(!err.success);
        assert_eq!(err.error, "Anime not found");
        assert_eq!(err.timestamp, "2024-01-02T03:04:05+00:00");
    }
}
