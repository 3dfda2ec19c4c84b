//! Kompi Browser Library
//!
//! This library provides page views for browsing the Kompi anime content
//! API, together with the route token codec and episode-to-detail URL
//! derivation that link those pages to each other.

pub mod browser;
pub mod cache;
pub mod client;
pub mod codec;
pub mod config;
pub mod constants;
pub mod derive;
pub mod error;
pub mod models;
pub mod navigation;
pub mod routes;
pub mod views;
