//! API Routes module for the Kompi browser
//!
//! This module contains the HTTP route handlers serving page views. Route
//! tokens arrive as path segments and are only ever decoded by the browser
//! service.

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use tracing::info;
use utoipa::{IntoParams, OpenApi, ToSchema};

use crate::browser::{Browser, Resolution};
use crate::codec::RouteToken;
use crate::error::AppResult;
use crate::models::{ApiError, ApiResponse, DownloadLink, DownloadLinkItem, StreamingServer};
use crate::views::{
    Card, DetailView, EpisodeLink, EpisodeNavigator, GenreSection, Hero, HomeView, SearchView,
    WatchView,
};

/// Application state shared across handlers
pub struct AppState {
    pub browser: Browser,
}

/// Query parameters for the home endpoint
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct HomeQuery {
    /// Page number (default: 1)
    pub page: Option<u32>,
}

/// GET /api/home - Home page view
#[utoipa::path(
    get,
    path = "/api/home",
    tag = "pages",
    params(HomeQuery),
    responses(
        (status = 200, description = "Home view assembled successfully", body = HomeView),
        (status = 400, description = "Bad request - page must be at least 1", body = ApiError),
        (status = 502, description = "Upstream API failure", body = ApiError)
    )
)]
pub async fn get_home(
    data: web::Data<AppState>,
    query: web::Query<HomeQuery>,
) -> AppResult<HttpResponse> {
    let view = data.browser.home(query.page.unwrap_or(1)).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::new(view)))
}

/// GET /api/search/{query} - Search results view
#[utoipa::path(
    get,
    path = "/api/search/{query}",
    tag = "pages",
    params(
        ("query" = String, Path, description = "Search keyword")
    ),
    responses(
        (status = 200, description = "Search view assembled successfully", body = SearchView),
        (status = 400, description = "Bad request - search query is required", body = ApiError),
        (status = 502, description = "Upstream API failure", body = ApiError)
    )
)]
pub async fn search_anime(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let view = data.browser.search(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::new(view)))
}

/// GET /api/anime/{token} - Title detail view
#[utoipa::path(
    get,
    path = "/api/anime/{token}",
    tag = "pages",
    params(
        ("token" = String, Path, description = "Route token of the detail page URL")
    ),
    responses(
        (status = 200, description = "Detail view assembled successfully", body = DetailView),
        (status = 404, description = "Anime not found", body = ApiError),
        (status = 502, description = "Upstream API failure", body = ApiError)
    )
)]
pub async fn get_anime(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let token = RouteToken::from_raw(path.into_inner());
    let view = data.browser.detail(&token).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::new(view)))
}

/// DELETE /api/anime/{token}/episodes - Forget a title's episode list
#[utoipa::path(
    delete,
    path = "/api/anime/{token}/episodes",
    tag = "pages",
    params(
        ("token" = String, Path, description = "Route token of the detail page URL")
    ),
    responses(
        (status = 204, description = "Episode list dropped (or was not cached)"),
        (status = 404, description = "Malformed token", body = ApiError)
    )
)]
pub async fn leave_anime(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let token = RouteToken::from_raw(path.into_inner());
    if data.browser.leave_title(&token).await? {
        info!("Dropped cached episode list for token {}", token);
    }
    Ok(HttpResponse::NoContent().finish())
}

/// Query parameters for the watch endpoint
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct WatchQuery {
    /// Route token of the detail page the viewer came from
    pub from: Option<String>,
}

/// GET /api/watch/{token} - Episode player view
#[utoipa::path(
    get,
    path = "/api/watch/{token}",
    tag = "pages",
    params(
        ("token" = String, Path, description = "Route token of the episode page URL"),
        WatchQuery
    ),
    responses(
        (status = 200, description = "Watch view assembled successfully", body = WatchView),
        (status = 404, description = "Episode not found", body = ApiError),
        (status = 502, description = "Upstream API failure", body = ApiError)
    )
)]
pub async fn watch_episode(
    data: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<WatchQuery>,
) -> AppResult<HttpResponse> {
    let token = RouteToken::from_raw(path.into_inner());
    let from = query
        .into_inner()
        .from
        .filter(|f| !f.is_empty())
        .map(RouteToken::from_raw);

    let view = data.browser.watch(&token, from.as_ref()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::new(view)))
}

/// Query parameters for the resolve endpoint
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct ResolveQuery {
    /// Internal navigation path, e.g. `/anime/<token>`
    pub path: String,
}

/// GET /api/resolve - Resolve an internal navigation path
#[utoipa::path(
    get,
    path = "/api/resolve",
    tag = "navigation",
    params(ResolveQuery),
    responses(
        (status = 200, description = "Path resolved", body = Resolution),
        (status = 404, description = "Malformed token", body = ApiError)
    )
)]
pub async fn resolve_path(
    data: web::Data<AppState>,
    query: web::Query<ResolveQuery>,
) -> AppResult<HttpResponse> {
    let resolution = data.browser.resolve(&query.path)?;
    Ok(HttpResponse::Ok().json(ApiResponse::new(resolution)))
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Kompi Browser API",
        version = "0.1.0",
        description = "Page views for browsing and watching anime from the Kompi content API",
        license(
            name = "MIT"
        )
    ),
    paths(
        get_home,
        search_anime,
        get_anime,
        leave_anime,
        watch_episode,
        resolve_path
    ),
    components(
        schemas(
            HomeView,
            Hero,
            GenreSection,
            Card,
            SearchView,
            DetailView,
            EpisodeLink,
            WatchView,
            EpisodeNavigator,
            StreamingServer,
            DownloadLink,
            DownloadLinkItem,
            Resolution,
            RouteToken,
            ApiError,
            HomeQuery,
            WatchQuery,
            ResolveQuery
        )
    ),
    tags(
        (name = "pages", description = "Page view endpoints"),
        (name = "navigation", description = "Internal route resolution")
    )
)]
pub struct ApiDoc;

/// Configure API routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/home", web::get().to(get_home))
            .route("/search/{query}", web::get().to(search_anime))
            .route("/anime/{token}", web::get().to(get_anime))
            .route("/anime/{token}/episodes", web::delete().to(leave_anime))
            .route("/watch/{token}", web::get().to(watch_episode))
            .route("/resolve", web::get().to(resolve_path)),
    );
}
