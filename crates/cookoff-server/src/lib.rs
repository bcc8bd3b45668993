//! Cookoff web server.
//!
//! A small axum application for collecting crowd-sourced ratings of entrants
//! in a cooking competition: one rating per device per entrant, an aggregate
//! leaderboard, a password-gated admin view, and a CSV export.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tokio::signal;
use tower_sessions::cookie::SameSite;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};
use tracing::info;

use cookoff_core::Roster;

pub mod admin;
pub mod device;
pub mod error;
pub mod export;
pub mod pages;
pub mod routes;
pub mod session;
pub mod storage;

use storage::RatingsDatabase;

/// Shared application state, cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: RatingsDatabase,
    pub roster: Arc<Roster>,
    pub admin_password: Arc<str>,
}

impl AppState {
    pub fn new(db: RatingsDatabase, roster: Roster, admin_password: &str) -> Self {
        Self {
            db,
            roster: Arc::new(roster),
            admin_password: Arc::from(admin_password),
        }
    }
}

/// Assemble the full HTTP surface: voting form, JSON API, CSV export, and
/// the session-gated admin pages.
pub fn build_router(state: AppState, signing_secret: &str) -> Router {
    let sessions = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(false)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnSessionEnd)
        .with_signed(session::signing_key(signing_secret));

    Router::new()
        .route("/", get(routes::home))
        .route("/api/rate", post(routes::rate))
        .route("/api/my-rating", get(routes::my_rating))
        .route("/api/leaderboard", get(routes::leaderboard))
        .route("/export.csv", get(export::export_csv))
        .route("/admin", get(admin::admin_page).post(admin::admin_login))
        .route("/admin/logout", get(admin::admin_logout))
        .layer(sessions)
        .with_state(state)
}

/// Resolves on Ctrl+C or SIGTERM.
#[allow(clippy::expect_used)]
pub async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
