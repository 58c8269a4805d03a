//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with page, API and asset handlers
//! - Wire up middleware (timeout, request ID, tracing, metrics, sessions)
//! - Swap in reloaded configuration without restarting
//! - Bind server to listener and shut down on signal

use std::sync::Arc;
use std::time::{Duration, Instant};

use arc_swap::ArcSwap;
use axum::{
    body::Body,
    extract::{MatchedPath, Path, Query, State},
    http::{header, Request, StatusCode},
    middleware::{self, Next},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::SiteConfig;
use crate::demo::{RandomCount, TitleSetter};
use crate::fonts::{default_fonts, stylesheet, Font};
use crate::http::pages::{self, Page};
use crate::http::request::{request_id_layer, RequestIdExt};
use crate::observability::metrics;
use crate::routing::Route;
use crate::supabase::middleware::refresh_and_run;
use crate::supabase::{SupabaseError, SupabaseInfo};
use crate::ui::image::ImageError;
use crate::ui::{DynamicImage, ImageLoader};
use crate::util::measure_time;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("image loader: {0}")]
    Image(#[from] ImageError),

    #[error("supabase: {0}")]
    Supabase(#[from] SupabaseError),
}

/// Everything derived from one configuration snapshot.
pub struct SiteState {
    pub config: SiteConfig,
    pub images: ImageLoader,
    pub supabase: Option<Arc<SupabaseInfo>>,
    pub fonts: Vec<Font>,
    pub title: TitleSetter,
}

impl SiteState {
    pub fn build(config: SiteConfig) -> Result<Self, ServerError> {
        let images = ImageLoader::new(&config.images)?;
        let supabase = SupabaseInfo::from_config(&config.supabase)?.map(Arc::new);
        let title = TitleSetter::new(
            config.site.title.clone(),
            Duration::from_millis(config.demo.title_debounce_ms),
        );

        Ok(Self {
            config,
            images,
            supabase,
            fonts: default_fonts(),
            title,
        })
    }
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub site: Arc<ArcSwap<SiteState>>,
}

impl AppState {
    pub fn new(site: SiteState) -> Self {
        Self {
            site: Arc::new(ArcSwap::from_pointee(site)),
        }
    }

    /// Rebuild the site state from `config`, keeping the current one on error.
    pub fn reload(&self, config: SiteConfig) -> Result<(), ServerError> {
        let site = SiteState::build(config)?;
        self.site.store(Arc::new(site));
        Ok(())
    }
}

/// HTTP server for the site.
pub struct HttpServer {
    router: Router,
    state: AppState,
}

impl HttpServer {
    pub fn new(config: SiteConfig) -> Result<Self, ServerError> {
        let timeout = Duration::from_secs(config.server.request_timeout_secs);
        let state = AppState::new(SiteState::build(config)?);
        let router = Self::build_router(state.clone(), timeout);
        Ok(Self { router, state })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(state: AppState, timeout: Duration) -> Router {
        let pages = Router::new()
            .route("/", get(home_handler))
            .route("/{*path}", get(page_handler))
            .route_layer(middleware::from_fn_with_state(state.clone(), session_middleware));

        let api = Router::new()
            .route("/api/random-count", get(random_count_handler))
            .route("/api/title", get(title_handler))
            .route("/health", get(health_handler))
            .route("/fonts.css", get(fonts_handler));

        Router::new()
            .merge(api)
            .merge(pages)
            .route_layer(middleware::from_fn(track_metrics))
            .with_state(state)
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(timeout))
            .layer(request_id_layer())
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Run the server until `shutdown` fires, applying configs from `config_updates`.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<SiteConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let state = self.state.clone();
        tokio::spawn(async move {
            while let Some(config) = config_updates.recv().await {
                let bind_changed = config.server.bind_address != addr.to_string();
                match state.reload(config) {
                    Ok(()) => {
                        tracing::info!("Configuration reloaded");
                        if bind_changed {
                            tracing::warn!("bind_address changes take effect after restart");
                        }
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to apply config. Keeping current configuration.")
                    }
                }
            }
        });

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn track_metrics(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    let response = next.run(request).await;
    metrics::record_request(&path, response.status().as_u16(), start);
    response
}

async fn session_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let site = state.site.load_full();
    match &site.supabase {
        Some(info) => refresh_and_run(info, request, next).await,
        None => next.run(request).await,
    }
}

fn render(site: &SiteState, current: &Route, page: &Page) -> Html<String> {
    Html(pages::layout(&site.config, &site.fonts, current, page))
}

async fn home_handler(State(state): State<AppState>, request: Request<Body>) -> Html<String> {
    let site = state.site.load_full();
    let demo = &site.config.demo;
    let draw = RandomCount::draw(demo.min, demo.max);
    site.title.set(draw.count);

    tracing::debug!(
        request_id = %request.request_id(),
        count = draw.count,
        hue = draw.hue,
        "Rendering home page"
    );

    let hero = match &site.config.site.hero_image {
        Some(hero) => {
            let image = DynamicImage::new(hero.src.as_str(), hero.alt.as_str())
                .sizes(site.config.images.sizes.as_str())
                .priority(true);
            let (element, _) = measure_time("hero image", image.load_and_render(&site.images)).await;
            Some(element)
        }
        None => None,
    };

    let page = pages::home_page(&site.config, draw, hero);
    render(&site, &Route::root(), &page)
}

async fn page_handler(State(state): State<AppState>, Path(path): Path<String>) -> Response {
    let site = state.site.load_full();
    let current = match Route::new(format!("/{path}")) {
        Ok(route) => route,
        Err(e) => {
            tracing::debug!(error = %e, "Unroutable path");
            Route::root()
        }
    };

    match pages::find_entry(&site.config.navigation, &current) {
        Some(entry) => {
            let page = pages::section_page(&site.config, entry, &current);
            render(&site, &current, &page).into_response()
        }
        None => {
            tracing::debug!(path = %current, "No page for path");
            let page = pages::not_found_page(&site.config, &current);
            (StatusCode::NOT_FOUND, render(&site, &current, &page)).into_response()
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    pub min: Option<u32>,
    pub max: Option<u32>,
}

async fn random_count_handler(
    State(state): State<AppState>,
    Query(range): Query<RangeQuery>,
) -> Json<RandomCount> {
    let site = state.site.load_full();
    let min = range.min.unwrap_or(site.config.demo.min);
    let max = range.max.unwrap_or(site.config.demo.max);
    let draw = RandomCount::draw(min, max);
    site.title.set(draw.count);
    Json(draw)
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TitleResponse {
    pub title: String,
}

async fn title_handler(State(state): State<AppState>) -> Json<TitleResponse> {
    Json(TitleResponse {
        title: state.site.load().title.current(),
    })
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn fonts_handler(State(state): State<AppState>) -> impl IntoResponse {
    let css = stylesheet(&state.site.load().fonts);
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], css)
}
