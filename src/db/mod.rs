pub mod models;

use std::collections::HashSet;
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use models::CityQuery;

#[derive(Debug, thiserror::Error)]
#[error("store error: {0}")]
pub struct StoreError(#[from] sqlx::Error);

#[derive(Debug, Clone)]
pub struct Database {
    pub pool: SqlitePool,
}

impl Database {
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    pub async fn run_migrations(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"CREATE TABLE IF NOT EXISTS cities (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                city_name TEXT NOT NULL
            )"#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_cities_user ON cities(user_id, id DESC)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    // ── City History Operations ────────────────────────────────────

    /// Append one history row. The name is stored exactly as typed;
    /// "Paris" and "paris" are distinct entries.
    pub async fn record(&self, user_id: i64, city_name: &str) -> Result<CityQuery, StoreError> {
        let row = sqlx::query_as::<_, CityQuery>(
            r#"
            INSERT INTO cities (user_id, city_name)
            VALUES (?1, ?2)
            RETURNING id, user_id, city_name
            "#,
        )
        .bind(user_id)
        .bind(city_name)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// Up to `limit` most recently recorded city names for a user,
    /// newest first (autoincrement id descending).
    pub async fn recent_cities(
        &self,
        user_id: i64,
        limit: i64,
    ) -> Result<Vec<String>, StoreError> {
        let rows = sqlx::query_as::<_, CityQuery>(
            "SELECT id, user_id, city_name FROM cities WHERE user_id = ?1 ORDER BY id DESC LIMIT ?2",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.city_name).collect())
    }
}

/// Collapse a recency-ordered city list into first-seen-order unique
/// entries. Exact, case-sensitive matching.
pub fn dedupe_cities(cities: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut unique = Vec::new();

    for city in cities {
        if seen.insert(city.as_str()) {
            unique.push(city.clone());
        }
    }

    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cities(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn dedupe_empty_is_empty() {
        assert!(dedupe_cities(&[]).is_empty());
    }

    #[test]
    fn dedupe_keeps_first_occurrence_order() {
        let input = cities(&["Oslo", "Oslo", "Riga", "Oslo"]);
        assert_eq!(dedupe_cities(&input), cities(&["Oslo", "Riga"]));
    }

    #[test]
    fn dedupe_is_case_sensitive() {
        let input = cities(&["Paris", "paris"]);
        assert_eq!(dedupe_cities(&input), cities(&["Paris", "paris"]));
    }

    #[test]
    fn dedupe_is_idempotent() {
        let input = cities(&["Berlin", "Oslo", "Berlin", "Riga", "Oslo"]);
        let once = dedupe_cities(&input);
        assert_eq!(dedupe_cities(&once), once);
    }

    // One connection only: every new connection to `sqlite::memory:` opens
    // its own empty database.
    async fn test_db() -> Database {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory database should open");

        let db = Database { pool };
        db.run_migrations().await.expect("migrations should apply");
        db
    }

    #[tokio::test]
    async fn record_assigns_increasing_ids() {
        let db = test_db().await;

        let first = db.record(1, "Oslo").await.unwrap();
        let second = db.record(1, "Riga").await.unwrap();

        assert_eq!(first.user_id, 1);
        assert_eq!(first.city_name, "Oslo");
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn recent_cities_newest_first_capped_at_limit() {
        let db = test_db().await;

        for name in ["A", "B", "C", "D", "E", "F", "G"] {
            db.record(7, name).await.unwrap();
        }

        let recent = db.recent_cities(7, 5).await.unwrap();
        assert_eq!(recent, cities(&["G", "F", "E", "D", "C"]));
    }

    #[tokio::test]
    async fn recent_cities_scoped_to_user() {
        let db = test_db().await;

        db.record(1, "Oslo").await.unwrap();
        db.record(2, "Riga").await.unwrap();

        assert_eq!(db.recent_cities(1, 5).await.unwrap(), cities(&["Oslo"]));
        assert_eq!(db.recent_cities(2, 5).await.unwrap(), cities(&["Riga"]));
        assert!(db.recent_cities(3, 5).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn repeats_are_stored_verbatim_and_deduped_on_read() {
        let db = test_db().await;

        db.record(1, "Oslo").await.unwrap();
        db.record(1, "Riga").await.unwrap();
        db.record(1, "Oslo").await.unwrap();

        let recent = db.recent_cities(1, 5).await.unwrap();
        assert_eq!(recent, cities(&["Oslo", "Riga", "Oslo"]));
        assert_eq!(dedupe_cities(&recent), cities(&["Oslo", "Riga"]));
    }
}
