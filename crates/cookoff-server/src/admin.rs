//! Password-gated admin view.
//!
//! Two session states, unauthenticated and authenticated. The password is a
//! single shared secret compared as plain equality (kept from the source
//! behavior; not hardened for hostile deployments).

use axum::Form;
use axum::extract::State;
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::{info, warn};

use crate::AppState;
use crate::error::ApiError;
use crate::pages;
use crate::session::ADMIN_SESSION_FLAG;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    password: String,
}

/// `GET /admin` — password prompt, or the detailed view once authenticated.
pub async fn admin_page(
    State(state): State<AppState>,
    session: Session,
) -> Result<Response, ApiError> {
    if !is_admin(&session).await? {
        return Ok(Html(pages::admin_login_page(None)).into_response());
    }

    let ratings = state.db.ratings_by_entrant().await?;
    let leaderboard = state.db.leaderboard().await?;

    Ok(Html(pages::admin_results_page(&state.roster, &ratings, &leaderboard)).into_response())
}

/// `POST /admin` — check the shared password. Re-entry while already
/// authenticated is idempotent.
pub async fn admin_login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response, ApiError> {
    if form.password.trim() == state.admin_password.as_ref() {
        session.insert(ADMIN_SESSION_FLAG, true).await?;
        info!("Admin session opened");
        return Ok(Redirect::to("/admin").into_response());
    }

    warn!("Rejected admin login attempt");
    Ok(Html(pages::admin_login_page(Some("Incorrect password"))).into_response())
}

/// `GET /admin/logout` — drop the admin flag and return to the gate.
pub async fn admin_logout(session: Session) -> Result<Response, ApiError> {
    let _: Option<bool> = session.remove(ADMIN_SESSION_FLAG).await?;
    Ok(Redirect::to("/admin").into_response())
}

async fn is_admin(session: &Session) -> Result<bool, ApiError> {
    Ok(session
        .get::<bool>(ADMIN_SESSION_FLAG)
        .await?
        .unwrap_or(false))
}
