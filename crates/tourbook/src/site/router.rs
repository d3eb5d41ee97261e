use std::sync::Arc;

use axum::{
    extract::{RawQuery, State},
    http::{header, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tracing::debug;

use super::{ContentPage, LocaleTag, RouteOutcome, SiteDirectory};
use crate::booking::{resolve_booking_reference, BookingParams};
use crate::catalog::{SitemapSource, SourceKind};
use crate::error::SiteError;
use crate::sitemap::{static_sitemap, SitemapAggregator, SitemapEntry, SITEMAP_CACHE_CONTROL};

/// Shared, read-only state behind the public site routes.
pub struct SiteState<T, H> {
    pub directory: Arc<SiteDirectory>,
    pub sitemap: Arc<SitemapAggregator<T, H>>,
    static_sitemap: Arc<str>,
}

impl<T, H> SiteState<T, H>
where
    T: SitemapSource + 'static,
    H: SitemapSource + 'static,
{
    pub fn new(directory: Arc<SiteDirectory>, sitemap: Arc<SitemapAggregator<T, H>>) -> Self {
        let static_sitemap = static_sitemap(sitemap.urls().base()).into();
        Self {
            directory,
            sitemap,
            static_sitemap,
        }
    }
}

impl<T, H> Clone for SiteState<T, H> {
    fn clone(&self) -> Self {
        Self {
            directory: Arc::clone(&self.directory),
            sitemap: Arc::clone(&self.sitemap),
            static_sitemap: Arc::clone(&self.static_sitemap),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ContentPageView<'a> {
    locale: &'a LocaleTag,
    path: &'a str,
    title: &'a str,
    body: &'a str,
}

impl<'a> From<&'a ContentPage> for ContentPageView<'a> {
    fn from(page: &'a ContentPage) -> Self {
        Self {
            locale: &page.locale,
            path: &page.path,
            title: &page.title,
            body: &page.body,
        }
    }
}

/// Router builder for the public site: sitemaps, booking confirmation, and the
/// locale-aware content fallback.
pub fn site_router<T, H>(state: SiteState<T, H>) -> Router
where
    T: SitemapSource + 'static,
    H: SitemapSource + 'static,
{
    Router::new()
        .route("/sitemap.xml", get(static_sitemap_handler::<T, H>))
        .route("/api/sitemap", get(sitemap_handler::<T, H>))
        .route("/api/sitemap/hotels", get(hotel_sitemap_handler::<T, H>))
        .route("/booking/confirm", get(booking_confirmation_handler::<T, H>))
        .fallback(content_handler::<T, H>)
        .with_state(state)
}

pub(crate) async fn static_sitemap_handler<T, H>(State(state): State<SiteState<T, H>>) -> Response
where
    T: SitemapSource + 'static,
    H: SitemapSource + 'static,
{
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/xml"),
            (header::CACHE_CONTROL, SITEMAP_CACHE_CONTROL),
        ],
        state.static_sitemap.to_string(),
    )
        .into_response()
}

pub(crate) async fn sitemap_handler<T, H>(
    State(state): State<SiteState<T, H>>,
) -> Result<Json<Vec<SitemapEntry>>, SiteError>
where
    T: SitemapSource + 'static,
    H: SitemapSource + 'static,
{
    Ok(Json(state.sitemap.build().await?))
}

pub(crate) async fn hotel_sitemap_handler<T, H>(
    State(state): State<SiteState<T, H>>,
) -> Result<Json<Vec<SitemapEntry>>, SiteError>
where
    T: SitemapSource + 'static,
    H: SitemapSource + 'static,
{
    let entries = state
        .sitemap
        .build_restricted(&[SourceKind::Hotels])
        .await?;
    Ok(Json(entries))
}

pub(crate) async fn booking_confirmation_handler<T, H>(
    State(state): State<SiteState<T, H>>,
    RawQuery(query): RawQuery,
) -> Result<Response, SiteError>
where
    T: SitemapSource + 'static,
    H: SitemapSource + 'static,
{
    let params = BookingParams::from_query(query.as_deref().unwrap_or_default());
    let reference = resolve_booking_reference(&params).ok_or_else(|| SiteError::not_found("booking", ""))?;
    let location = state
        .sitemap
        .urls()
        .relative(["booking", "confirmed", reference.as_str()]);

    debug!(booking = %reference, %location, "redirecting to booking confirmation");
    Ok(redirect(StatusCode::FOUND, &location))
}

pub(crate) async fn content_handler<T, H>(
    State(state): State<SiteState<T, H>>,
    method: Method,
    uri: Uri,
) -> Result<Response, SiteError>
where
    T: SitemapSource + 'static,
    H: SitemapSource + 'static,
{
    if method != Method::GET && method != Method::HEAD {
        debug!(%method, path = uri.path(), "content routes are read-only");
        return Ok((StatusCode::METHOD_NOT_ALLOWED, [(header::ALLOW, "GET, HEAD")]).into_response());
    }

    match state.directory.route(uri.path()) {
        RouteOutcome::Redirect(target) => Ok(redirect(StatusCode::MOVED_PERMANENTLY, target)),
        RouteOutcome::Page(page) => Ok(Json(ContentPageView::from(page)).into_response()),
        RouteOutcome::NotFound { locale, path } => {
            debug!(%locale, %path, "no content page");
            Err(SiteError::not_found("content page", path))
        }
    }
}

fn redirect(status: StatusCode, location: &str) -> Response {
    (status, [(header::LOCATION, location.to_string())]).into_response()
}
