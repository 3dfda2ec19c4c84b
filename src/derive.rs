//! Episode to detail URL derivation
//!
//! Widgets such as "latest releases" only carry episode page URLs, while
//! their cards should open the title's detail page. Upstream episode slugs
//! follow the shape `<title-slug>-episode-<n>[-suffix]`, and detail pages
//! live under `/anime/<title-slug>/` on the same origin, so the detail URL
//! can be guessed without another round trip.
//!
//! This is a best-effort display transform: whenever the guess is not
//! possible the input is handed back untouched.

use thiserror::Error;
use tracing::debug;
use url::Url;

/// Path marker identifying a detail page URL
pub const DETAIL_MARKER: &str = "/anime/";

/// Slug marker separating the title slug from the episode suffix
pub const EPISODE_MARKER: &str = "-episode-";

/// The input could not be read as an absolute URL with a usable origin
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot parse absolute URL {input:?}: {reason}")]
pub struct UnparseableUrlError {
    pub input: String,
    pub reason: String,
}

/// Derive the detail page URL for an episode page URL
///
/// Returns the input unchanged when it already points at a detail page,
/// when it is not an absolute URL, or when its slug has no episode marker.
///
/// ```
/// use kompi_browser::derive::derive_detail_url;
///
/// assert_eq!(
///     derive_detail_url("https://x.example/gintama-episode-1-subtitle-indonesia/"),
///     "https://x.example/anime/gintama/"
/// );
/// ```
pub fn derive_detail_url(input: &str) -> String {
    if input.contains(DETAIL_MARKER) {
        return input.to_string();
    }

    match try_derive_detail_url(input) {
        Ok(Some(detail_url)) => detail_url,
        Ok(None) => input.to_string(),
        Err(e) => {
            debug!("Keeping URL as-is: {}", e);
            input.to_string()
        }
    }
}

/// Fallible core of [`derive_detail_url`]
///
/// `Ok(None)` means the URL parsed but carries no episode marker.
fn try_derive_detail_url(input: &str) -> Result<Option<String>, UnparseableUrlError> {
    let url = Url::parse(input).map_err(|e| UnparseableUrlError {
        input: input.to_string(),
        reason: e.to_string(),
    })?;

    let origin = url.origin();
    if !origin.is_tuple() {
        return Err(UnparseableUrlError {
            input: input.to_string(),
            reason: "URL has no host origin".to_string(),
        });
    }

    let path = url.path();
    let path = path.strip_prefix('/').unwrap_or(path);
    let slug_with_episode = path.strip_suffix('/').unwrap_or(path);

    Ok(strip_episode_suffix(slug_with_episode)
        .map(|slug| format!("{}{}{}/", origin.ascii_serialization(), DETAIL_MARKER, slug)))
}

/// Remove the first episode marker and everything after it
///
/// Returns `None` when the slug has no marker.
pub fn strip_episode_suffix(slug: &str) -> Option<&str> {
    slug.find(EPISODE_MARKER).map(|idx| &slug[..idx])
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn arbitrary_slug() -> impl Strategy<Value = String> {
        "[a-z0-9]{1,10}(-[a-z0-9]{1,10}){0,3}".prop_filter("no episode marker", |s| {
            !s.contains(EPISODE_MARKER)
        })
    }

    proptest! {
        #[test]
        fn property_detail_urls_are_identity(slug in arbitrary_slug()) {
            let url = format!("https://x.example/anime/{}/", slug);
            prop_assert_eq!(derive_detail_url(&url), url);
        }

        #[test]
        fn property_episode_suffix_is_removed(
            slug in arbitrary_slug(),
            number in 1u32..2000,
            suffix in prop_oneof![Just(""), Just("-subtitle-indonesia"), Just("-end")],
        ) {
            let url = format!("https://x.example/{}-episode-{}{}/", slug, number, suffix);
            prop_assert_eq!(
                derive_detail_url(&url),
                format!("https://x.example/anime/{}/", slug)
            );
        }

        #[test]
        fn property_unmarked_urls_pass_through(slug in arbitrary_slug()) {
            let url = format!("https://x.example/{}/", slug);
            prop_assert_eq!(derive_detail_url(&url), url);
        }

        #[test]
        fn property_never_panics(input in any::<String>()) {
            let _ = derive_detail_url(&input);
        }
    }
}
