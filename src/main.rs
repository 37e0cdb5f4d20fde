//! Portfolio Shell
//!
//! Headless core of a single-page portfolio site: view switching without a router,
//! a mocked guestbook over a durable blob, and the command palette, served as JSON
//! to the presentation layer.

mod api;
mod config;
mod content;
mod db;
mod errors;
mod guestbook;
mod models;
mod palette;
mod share;
mod view;

use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::{Config, StorageBackend};
use content::Catalog;
use db::{BlobStore, MemoryBlobStore, SqliteBlobStore};
use guestbook::{GuestbookConfig, GuestbookFeed, GuestbookStore};
use palette::{default_commands, CommandPalette};
use share::MemoryClipboard;
use view::ViewController;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub view: Arc<RwLock<ViewController>>,
    pub palette: Arc<RwLock<CommandPalette>>,
    pub guestbook: Arc<GuestbookStore>,
    pub feed: Arc<RwLock<GuestbookFeed>>,
    pub catalog: Arc<Catalog>,
    pub clipboard: Arc<MemoryClipboard>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Build a fresh session over the given blob storage.
    pub fn new(config: Config, storage: Arc<dyn BlobStore>) -> Self {
        let guestbook = GuestbookStore::new(
            storage,
            GuestbookConfig::default().with_latency(config.latency),
        );

        Self {
            view: Arc::new(RwLock::new(ViewController::new())),
            palette: Arc::new(RwLock::new(CommandPalette::new(default_commands(
                &config.contact_email,
            )))),
            guestbook: Arc::new(guestbook),
            feed: Arc::new(RwLock::new(GuestbookFeed::new())),
            catalog: Arc::new(Catalog::builtin()),
            clipboard: Arc::new(MemoryClipboard::new()),
            config: Arc::new(config),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Portfolio Shell");
    tracing::info!("Storage backend: {:?}", config.storage);
    tracing::info!("Guestbook latency: {:?}", config.latency);
    tracing::info!("Bind address: {}", config.bind_addr);

    let storage: Arc<dyn BlobStore> = match config.storage {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; guestbook entries are lost on restart");
            Arc::new(MemoryBlobStore::new())
        }
        StorageBackend::Sqlite => {
            tracing::info!("Database path: {:?}", config.db_path);
            let pool = db::init_database(&config.db_path).await?;
            Arc::new(SqliteBlobStore::new(pool))
        }
    };

    let bind_addr = config.bind_addr;
    let state = AppState::new(config, storage);

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Server listening on {}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // View state
        .route("/view", get(api::get_view).put(api::change_view))
        .route("/view/screen", get(api::get_screen))
        .route("/view/home", post(api::go_home))
        .route("/view/projects", post(api::view_all_projects))
        .route("/view/blogs", post(api::view_all_blogs))
        .route("/view/posts/{id}", post(api::open_post))
        // Content
        .route("/posts", get(api::list_posts))
        .route("/posts/{id}", get(api::get_post))
        .route("/posts/{id}/share", post(api::share_post))
        .route("/projects", get(api::list_projects))
        // Guestbook
        .route("/guestbook", get(api::list_entries).post(api::create_entry))
        .route("/guestbook/feed", get(api::get_feed))
        // Command palette
        .route("/palette", get(api::get_palette))
        .route("/palette/query", put(api::set_query))
        .route("/palette/keys", post(api::press_key))
        // Clipboard
        .route("/clipboard", get(api::get_clipboard));

    // Health check
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests;
