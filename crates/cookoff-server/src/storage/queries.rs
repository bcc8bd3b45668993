//! Database queries for the ratings table.

use cookoff_core::DatabaseError;
use cookoff_core::db::unix_timestamp;

use super::db::RatingsDatabase;
use super::models::{EntrantAggregate, Rating};

impl RatingsDatabase {
    /// Record or update a rating for the given (entrant, device) pair.
    ///
    /// A second submission from the same device for the same entrant
    /// overwrites the scores and judge name but keeps the original
    /// `created_at`. Single statement, so concurrent submissions cannot race
    /// a read-then-write window.
    pub async fn upsert_rating(
        &self,
        entrant_index: i64,
        taste: i64,
        presentation: i64,
        easy: i64,
        judge: Option<&str>,
        device_id: &str,
    ) -> Result<(), DatabaseError> {
        sqlx::query(
            "INSERT INTO ratings (entrant_index, taste, presentation, easy, judge, device_id, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?) \
             ON CONFLICT(entrant_index, device_id) DO UPDATE SET \
                 taste = excluded.taste, \
                 presentation = excluded.presentation, \
                 easy = excluded.easy, \
                 judge = excluded.judge",
        )
        .bind(entrant_index)
        .bind(taste)
        .bind(presentation)
        .bind(easy)
        .bind(judge)
        .bind(device_id)
        .bind(unix_timestamp())
        .execute(self.pool())
        .await?;

        Ok(())
    }

    /// Get one device's rating for an entrant, if any.
    pub async fn rating_for_device(
        &self,
        entrant_index: i64,
        device_id: &str,
    ) -> Result<Option<Rating>, DatabaseError> {
        let rating = sqlx::query_as::<_, Rating>(
            "SELECT * FROM ratings WHERE entrant_index = ? AND device_id = ?",
        )
        .bind(entrant_index)
        .bind(device_id)
        .fetch_optional(self.pool())
        .await?;

        Ok(rating)
    }

    /// Aggregate vote counts and mean scores per entrant.
    ///
    /// Entrants with zero votes produce no row. Ordered by mean total score
    /// descending; ties broken by entrant index ascending.
    pub async fn leaderboard(&self) -> Result<Vec<EntrantAggregate>, DatabaseError> {
        let rows = sqlx::query_as::<_, EntrantAggregate>(
            "SELECT entrant_index, \
                    COUNT(*) AS votes, \
                    AVG(taste) AS avg_taste, \
                    AVG(presentation) AS avg_presentation, \
                    AVG(easy) AS avg_easy, \
                    AVG(taste + presentation + easy) AS avg_total \
             FROM ratings \
             GROUP BY entrant_index \
             ORDER BY avg_total DESC, entrant_index ASC",
        )
        .fetch_all(self.pool())
        .await?;

        Ok(rows)
    }

    /// Every rating row, oldest first (id breaks same-second ties).
    pub async fn ratings_by_creation(&self) -> Result<Vec<Rating>, DatabaseError> {
        let rows = sqlx::query_as::<_, Rating>(
            "SELECT * FROM ratings ORDER BY created_at ASC, id ASC",
        )
        .fetch_all(self.pool())
        .await?;

        Ok(rows)
    }

    /// Every rating row, grouped for the admin view: entrant index first,
    /// then submission time.
    pub async fn ratings_by_entrant(&self) -> Result<Vec<Rating>, DatabaseError> {
        let rows = sqlx::query_as::<_, Rating>(
            "SELECT * FROM ratings ORDER BY entrant_index ASC, created_at ASC, id ASC",
        )
        .fetch_all(self.pool())
        .await?;

        Ok(rows)
    }
}
