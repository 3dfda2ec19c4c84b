//! Route token codec
//!
//! Upstream URLs are opaque to the rest of the application. To carry one
//! inside an internal navigation path (`/anime/<token>`, `/watch/<token>`)
//! it is turned into a route token: the URL-safe, unpadded base64 form of
//! its UTF-8 bytes. The alphabet (`A-Z a-z 0-9 - _`) never contains a path
//! delimiter, so a token is always a single path segment.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use utoipa::ToSchema;

/// Error returned when a route token was not produced by [`encode`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedTokenError {
    /// Token is not valid base64 (bad alphabet or impossible length)
    #[error("route token is not valid base64: {0}")]
    InvalidEncoding(String),

    /// Token decoded to bytes that are not UTF-8 text
    #[error("route token does not decode to UTF-8 text")]
    InvalidUtf8,
}

/// A path-segment-safe encoding of an upstream URL
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct RouteToken(String);

impl RouteToken {
    /// Encode an upstream URL into a token
    pub fn encode(url: &str) -> Self {
        Self(encode(url))
    }

    /// Wrap a token read from a route parameter without validating it
    pub fn from_raw(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Decode back to the upstream URL
    pub fn decode(&self) -> Result<String, MalformedTokenError> {
        decode(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for RouteToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Encode an upstream URL into a route token
///
/// The empty string encodes to the empty token.
pub fn encode(url: &str) -> String {
    URL_SAFE_NO_PAD.encode(url.as_bytes())
}

/// Decode a route token back into the upstream URL it was produced from
///
/// Links minted by older clients used standard padded base64 (`+`, `/`,
/// trailing `=`), so those are normalized before decoding.
pub fn decode(token: &str) -> Result<String, MalformedTokenError> {
    let normalized: String = token
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect();

    let bytes = URL_SAFE_NO_PAD
        .decode(normalized.as_bytes())
        .map_err(|e| MalformedTokenError::InvalidEncoding(e.to_string()))?;

    String::from_utf8(bytes).map_err(|_| MalformedTokenError::InvalidUtf8)
}
