//! CSV export of the full rating history.

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};

use cookoff_core::Roster;

use crate::AppState;
use crate::error::ApiError;
use crate::storage::Rating;

/// `GET /export.csv` — every rating row, oldest first, with a fixed header.
pub async fn export_csv(State(state): State<AppState>) -> Result<Response, ApiError> {
    let rows = state.db.ratings_by_creation().await?;
    let body = render_csv(&state.roster, &rows);

    Ok(([(header::CONTENT_TYPE, "text/csv")], body).into_response())
}

/// Render rating rows as delimited text. Text fields are quoted with
/// internal quote-doubling; the header row is always present.
fn render_csv(roster: &Roster, rows: &[Rating]) -> String {
    let mut out = String::from("id,entrant_name,taste,presentation,easy,judge,device_id,created_at\n");

    for r in rows {
        let name = roster.name(r.entrant_index).unwrap_or("");
        out.push_str(&format!(
            "{},{},{},{},{},{},{},{}\n",
            r.id,
            quote(name),
            r.taste,
            r.presentation,
            r.easy,
            quote(r.judge.as_deref().unwrap_or("")),
            quote(&r.device_id),
            r.created_at,
        ));
    }

    out
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
