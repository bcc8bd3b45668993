//! Data models for Cookoff storage.

/// One device's rating of one entrant. The sole persisted entity.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Rating {
    pub id: i64,
    pub entrant_index: i64,
    pub taste: i64,
    pub presentation: i64,
    pub easy: i64,
    pub judge: Option<String>,
    pub device_id: String,
    /// Unix seconds, set at first insert and never touched on update.
    pub created_at: i64,
}

impl Rating {
    /// Sum of the three score dimensions.
    pub const fn total(&self) -> i64 {
        self.taste + self.presentation + self.easy
    }
}

/// Aggregate leaderboard row for one entrant with at least one vote.
///
/// Averages are raw arithmetic means; presentation rounding happens at the
/// API boundary.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EntrantAggregate {
    pub entrant_index: i64,
    pub votes: i64,
    pub avg_taste: f64,
    pub avg_presentation: f64,
    pub avg_easy: f64,
    pub avg_total: f64,
}
