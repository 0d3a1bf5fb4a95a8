//! # HTTP Server for QR Generation and Scanning
//!
//! Serves the two-tab web UI and the JSON/multipart API behind it.
//!
//! ## Usage
//!
//! ```bash
//! qrsmith serve --listen 0.0.0.0:8080
//! ```
//!
//! Then open http://localhost:8080 in a browser.

mod handlers;
mod state;
mod static_files;

pub use state::ServerConfig;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::error::QrsmithError;
use state::{AppState, SESSION_EXPIRATION_SECS};

/// Uploaded logo/scan images are capped at 10MB.
const UPLOAD_LIMIT_BYTES: usize = 10 * 1024 * 1024;

/// Start the HTTP server.
///
/// ## Example
///
/// ```no_run
/// use qrsmith::server::{serve, ServerConfig};
///
/// # async fn example() -> Result<(), qrsmith::error::QrsmithError> {
/// let config = ServerConfig {
///     listen_addr: "0.0.0.0:8080".to_string(),
/// };
///
/// serve(config).await?;
/// # Ok(())
/// # }
/// ```
pub async fn serve(config: ServerConfig) -> Result<(), QrsmithError> {
    let app_state = Arc::new(AppState::new(config.clone()));

    // Spawn background session cleanup task
    tokio::spawn(cleanup_sessions(app_state.clone()));

    let app = Router::new()
        // Frontend
        .route("/", get(static_files::index_handler))
        .route("/assets/*path", get(static_files::asset_handler))
        // Generate API
        .route(
            "/api/generate",
            post(handlers::generate::generate).layer(DefaultBodyLimit::max(UPLOAD_LIMIT_BYTES)),
        )
        .route("/api/session/:id/sync", post(handlers::session::sync))
        .route("/api/session/:id/preview", get(handlers::session::preview))
        .route(
            "/api/session/:id/download",
            get(handlers::session::download),
        )
        // Scan API
        .route(
            "/api/scan",
            post(handlers::scan::scan).layer(DefaultBodyLimit::max(UPLOAD_LIMIT_BYTES)),
        )
        .with_state(app_state);

    println!("Qrsmith HTTP server starting...");
    println!("Listening on: {}", config.listen_addr);
    println!();
    println!(
        "Open http://{}/ in your browser to create and scan QR codes",
        config.listen_addr
    );
    println!();

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .map_err(|e| {
            QrsmithError::Server(format!("Failed to bind to {}: {}", config.listen_addr, e))
        })?;

    axum::serve(listener, app)
        .await
        .map_err(|e| QrsmithError::Server(format!("Server error: {e}")))?;

    Ok(())
}

/// Background task to clean up expired sessions.
async fn cleanup_sessions(state: Arc<AppState>) {
    let mut interval = tokio::time::interval(Duration::from_secs(60));
    let expiration = Duration::from_secs(SESSION_EXPIRATION_SECS);

    loop {
        interval.tick().await;
        let now = Instant::now();

        let mut sessions = state.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| now.duration_since(s.last_accessed) < expiration);
        let after = sessions.len();
        if before != after {
            println!(
                "[session] Cleaned up {} expired sessions ({} remaining)",
                before - after,
                after
            );
        }
    }
}
