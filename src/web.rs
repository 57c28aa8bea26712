use std::net::SocketAddr;
use std::num::NonZeroU64;
use std::path::Path as FsPath;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use axum::body::Body;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::header::{self, HeaderMap, HeaderValue};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Json, Response};
use axum::routing::get;
use chrono::{DateTime, Datelike, TimeDelta, Utc};
use futures::TryStreamExt;
use memory_catalog::{Catalog, CatalogEntry};
use serde::{Deserialize, Serialize};
use tokio::fs::File;
use tokio::net::TcpListener;
use tokio::signal;
use tokio_util::io::ReaderStream;
use tracing::{debug, error, info};

use crate::config::{CacheConfig, CachePolicy, Config};

pub const MEMORY_PATH: &str = "/api/memory";
pub const EMPTY_MEMORY_PATH: &str = "/api/empty_memory";
pub const CURRENT_MEMORY_PATH: &str = "/api/current_memory";

const INDEX_TEMPLATE: &str = include_str!("../static/index.html");
const EMPTY_MEMORY: &[u8] = include_bytes!("../static/empty_memory.svg");

/// Source of "now" in Unix seconds.
pub type Clock = Arc<dyn Fn() -> i64 + Send + Sync>;

/// Body of `GET /api/current_memory`.
#[derive(Debug, Serialize, Deserialize)]
pub struct CurrentMemory {
    pub url: String,
}

#[derive(Clone)]
pub struct AppState {
    catalog: Arc<Catalog>,
    period: NonZeroU64,
    cache: CacheConfig,
    clock: Clock,
}

impl AppState {
    pub fn new(catalog: Arc<Catalog>, cfg: &Config) -> Self {
        Self {
            catalog,
            period: cfg.period_secs(),
            cache: cfg.cache.clone(),
            clock: Arc::new(|| Utc::now().timestamp()),
        }
    }

    /// Replace the wall clock, e.g. to pin time in tests.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Fn() -> i64 + Send + Sync + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    fn now(&self) -> i64 {
        (self.clock)()
    }

    fn now_utc(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.now(), 0).unwrap_or_else(Utc::now)
    }

    /// URL of the memory shown right now, or the placeholder if there is none.
    fn current_url(&self) -> String {
        self.catalog
            .current(self.now(), self.period)
            .map_or_else(|| EMPTY_MEMORY_PATH.to_string(), memory_url)
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route(CURRENT_MEMORY_PATH, get(current_memory))
        .route(&format!("{MEMORY_PATH}/{{id}}"), get(memory))
        .route(EMPTY_MEMORY_PATH, get(empty_memory))
        .with_state(state)
}

pub async fn serve(state: AppState, addr: SocketAddr) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind listener on {addr}"))?;
    info!(%addr, "memory frame listening");

    axum::serve(listener, router(state).into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server exited")?;
    info!("memory frame stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.ok();
    };
    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        if let Ok(mut term) = signal(SignalKind::terminate()) {
            term.recv().await;
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();
    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[must_use]
pub fn memory_url(entry: &CatalogEntry) -> String {
    format!("{MEMORY_PATH}/{}", entry.id())
}

async fn index(State(state): State<AppState>) -> Html<String> {
    let year = state.now_utc().year();
    let rotation_ms = state.period.get().saturating_mul(1000);
    Html(
        INDEX_TEMPLATE
            .replace("{{memory_link}}", &state.current_url())
            .replace("{{current_year}}", &year.to_string())
            .replace("{{rotation_ms}}", &rotation_ms.to_string()),
    )
}

async fn current_memory(State(state): State<AppState>) -> Response {
    let url = state.current_url();
    debug!(%url, "current memory");
    let mut headers = HeaderMap::new();
    apply_cache_policy(&mut headers, state.cache.current, state.now_utc());
    (headers, Json(CurrentMemory { url })).into_response()
}

async fn memory(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Response {
    let id = match id {
        Ok(Path(id)) => id,
        Err(rejection) => {
            debug!(error = %rejection, "undecodable memory id");
            return (StatusCode::NOT_FOUND, "not found").into_response();
        }
    };
    let Some(entry) = state.catalog.resolve(&id) else {
        debug!(%id, "memory not found");
        return (StatusCode::NOT_FOUND, "not found").into_response();
    };
    let path = entry.path().to_path_buf();
    let file = match File::open(&path).await {
        Ok(file) => file,
        Err(err) => {
            error!(path = %path.display(), error = %err, "failed to open memory");
            return (StatusCode::INTERNAL_SERVER_ERROR, "error remembering memory").into_response();
        }
    };

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type_for(&path)));
    apply_cache_policy(&mut headers, state.cache.memory, state.now_utc());

    let stream = ReaderStream::new(file).inspect_err(move |err| {
        error!(path = %path.display(), error = %err, "error sending memory to client");
    });
    (headers, Body::from_stream(stream)).into_response()
}

async fn empty_memory(State(state): State<AppState>) -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("image/svg+xml"));
    apply_cache_policy(&mut headers, state.cache.empty, state.now_utc());
    (headers, EMPTY_MEMORY).into_response()
}

fn content_type_for(path: &FsPath) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

fn apply_cache_policy(headers: &mut HeaderMap, policy: CachePolicy, now: DateTime<Utc>) {
    match policy {
        CachePolicy::NoCache => {
            headers.insert(
                header::CACHE_CONTROL,
                HeaderValue::from_static("no-cache, no-store, must-revalidate"),
            );
            headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
            insert_expires(headers, now - TimeDelta::seconds(60));
        }
        CachePolicy::Public { max_age } => {
            if let Ok(value) = HeaderValue::try_from(format!("public, max-age={}", max_age.as_secs())) {
                headers.insert(header::CACHE_CONTROL, value);
            }
            let expires = TimeDelta::from_std(max_age)
                .ok()
                .and_then(|delta| now.checked_add_signed(delta))
                .unwrap_or(now);
            insert_expires(headers, expires);
        }
    }
}

fn insert_expires(headers: &mut HeaderMap, at: DateTime<Utc>) {
    if let Ok(value) = HeaderValue::try_from(http_date(at)) {
        headers.insert(header::EXPIRES, value);
    }
}

/// IMF-fixdate, the format HTTP uses for `Expires`.
fn http_date(at: DateTime<Utc>) -> String {
    at.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}
