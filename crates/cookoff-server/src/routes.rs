//! JSON API handlers: rating submission, own-rating lookup, leaderboard.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::device;
use crate::error::ApiError;
use crate::pages;

const JUDGE_MAX_CHARS: usize = 50;

/// `POST /api/rate` request body.
#[derive(Debug, Deserialize)]
pub struct RateRequest {
    pub entrant_index: i64,
    pub taste: i64,
    pub presentation: i64,
    pub easy: i64,
    #[serde(default)]
    pub judge: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Ack {
    pub ok: bool,
}

/// A device's stored scores for one entrant.
#[derive(Debug, Serialize)]
pub struct RatingView {
    pub taste: i64,
    pub presentation: i64,
    pub easy: i64,
    pub judge: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MyRatingResponse {
    pub ok: bool,
    pub rating: Option<RatingView>,
}

#[derive(Debug, Serialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub votes: i64,
    pub avg_taste: f64,
    pub avg_presentation: f64,
    pub avg_easy: f64,
    pub avg_total: f64,
}

#[derive(Debug, Deserialize)]
pub struct MyRatingParams {
    pub entrant_index: Option<i64>,
}

/// `GET /` — the voting form. Issues a device-identity cookie if absent.
pub async fn home(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let jar = device::ensure_device_cookie(jar);
    (jar, Html(pages::vote_page(&state.roster)))
}

/// `POST /api/rate` — create or update this device's rating for an entrant.
pub async fn rate(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<RateRequest>, JsonRejection>,
) -> Result<Json<Ack>, ApiError> {
    let Json(req) = payload.map_err(|_| ApiError::InvalidPayload)?;

    if !state.roster.contains(req.entrant_index) {
        return Err(ApiError::InvalidEntrant);
    }
    for score in [req.taste, req.presentation, req.easy] {
        if !(1..=5).contains(&score) {
            return Err(ApiError::InvalidScore);
        }
    }
    let judge = normalize_judge(req.judge.as_deref());

    let device_id = device::device_id(&jar);
    state
        .db
        .upsert_rating(
            req.entrant_index,
            req.taste,
            req.presentation,
            req.easy,
            judge.as_deref(),
            &device_id,
        )
        .await?;

    Ok(Json(Ack { ok: true }))
}

/// `GET /api/my-rating?entrant_index=N` — this device's rating, if any.
///
/// An out-of-range or absent index is not an error; it answers "no rating"
/// just like an unrated entrant. Only a present but non-integer index fails.
pub async fn my_rating(
    State(state): State<AppState>,
    jar: CookieJar,
    params: Result<Query<MyRatingParams>, QueryRejection>,
) -> Result<Json<MyRatingResponse>, ApiError> {
    let Query(params) = params.map_err(|_| ApiError::InvalidPayload)?;

    // A missing parameter behaves like an out-of-range index.
    let entrant_index = params.entrant_index.unwrap_or(-1);

    if !state.roster.contains(entrant_index) {
        return Ok(Json(MyRatingResponse {
            ok: true,
            rating: None,
        }));
    }

    let device_id = device::device_id(&jar);
    let rating = state
        .db
        .rating_for_device(entrant_index, &device_id)
        .await?
        .map(|r| RatingView {
            taste: r.taste,
            presentation: r.presentation,
            easy: r.easy,
            judge: r.judge,
        });

    Ok(Json(MyRatingResponse { ok: true, rating }))
}

/// `GET /api/leaderboard` — aggregate snapshot, best mean total first.
pub async fn leaderboard(
    State(state): State<AppState>,
) -> Result<Json<Vec<LeaderboardEntry>>, ApiError> {
    let rows = state.db.leaderboard().await?;

    let out = rows
        .into_iter()
        .filter_map(|r| {
            // Rows recorded against an older, larger roster have no display
            // name; skip them rather than invent one.
            state.roster.name(r.entrant_index).map(|name| LeaderboardEntry {
                name: name.to_string(),
                votes: r.votes,
                avg_taste: round2(r.avg_taste),
                avg_presentation: round2(r.avg_presentation),
                avg_easy: round2(r.avg_easy),
                avg_total: round2(r.avg_total),
            })
        })
        .collect();

    Ok(Json(out))
}

/// Round to 2 decimal places for presentation.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Trim, cap at 50 characters, and drop empty judge names.
fn normalize_judge(judge: Option<&str>) -> Option<String> {
    let trimmed = judge?.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.chars().take(JUDGE_MAX_CHARS).collect())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn round2_rounds_half_up() {
        assert!((round2(29.0 / 3.0) - 9.67).abs() < 1e-9);
        assert!((round2(4.5) - 4.5).abs() < 1e-9);
        assert!((round2(3.0) - 3.0).abs() < 1e-9);
    }

    #[test]
    fn judge_is_trimmed_and_capped() {
        assert_eq!(normalize_judge(Some("  Pat  ")), Some("Pat".to_string()));
        assert_eq!(normalize_judge(Some("   ")), None);
        assert_eq!(normalize_judge(None), None);

        let long = "x".repeat(80);
        assert_eq!(normalize_judge(Some(&long)).unwrap().chars().count(), 50);
    }
}
