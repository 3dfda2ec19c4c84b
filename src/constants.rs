//! Constants module for the Kompi browser
//!
//! Contains the default upstream location and endpoint path builders. Paths
//! are relative to the configured API base URL.

/// Default base URL of the upstream content API
pub const DEFAULT_API_BASE_URL: &str = "https://fathurweb.qzz.io/api/anime/kompi";

/// Placeholder upstream puts in a server link when no embed exists
pub const VIDEO_NOT_AVAILABLE: &str = "Video Not Available";

/// Path builder functions for all upstream endpoints
pub mod endpoints {
    /// Home page data (slides, latest releases, genre sections)
    pub fn home(page: u32) -> String {
        format!("/home?page={}", page)
    }

    /// Search by keyword
    pub fn search(query: &str) -> String {
        format!("/search?q={}", urlencoding::encode(query))
    }

    /// Title detail for a detail page URL
    pub fn detail(url: &str) -> String {
        format!("/detail?url={}", urlencoding::encode(url))
    }

    /// Stream servers and downloads for an episode page URL
    pub fn stream(url: &str) -> String {
        format!("/stream?url={}", urlencoding::encode(url))
    }
}

#[cfg(test)]
mod tests {
    use super::endpoints;

    #[test]
    fn test_home_path() {
        assert_eq!(endpoints::home(1), "/home?page=1");
        assert_eq!(endpoints::home(12), "/home?page=12");
    }

    #[test]
    fn test_search_query_is_encoded() {
        assert_eq!(endpoints::search("one piece"), "/search?q=one%20piece");
        assert_eq!(endpoints::search("a&b=c"), "/search?q=a%26b%3Dc");
    }

    #[test]
    fn test_url_parameter_is_encoded() {
        assert_eq!(
            endpoints::detail("https://x.example/anime/gintama/"),
            "/detail?url=https%3A%2F%2Fx.example%2Fanime%2Fgintama%2F"
        );
        assert_eq!(
            endpoints::stream("https://x.example/a?b=1"),
            "/stream?url=https%3A%2F%2Fx.example%2Fa%3Fb%3D1"
        );
    }
}
