//! SQLite persistence for saved distributions.
//!
//! This module provides the [`Store`] type wrapping a sqlx connection
//! pool. History is append-only: a saved distribution is inserted once
//! and never updated; known employees are upserted with their latest
//! role and multiplier so the entry grid can pre-fill them.

use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{Row, Sqlite, SqlitePool, migrate::MigrateDatabase};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{DistributionRecord, EmployeeProfile, SavedDistribution};

// The database URL for the production database
const DATABASE_URL: &str = "sqlite:tips.db";

/// Manages distribution history and employee persistence.
#[derive(Clone)]
pub struct Store {
    pool: Arc<SqlitePool>,
}

impl Store {
    /// Creates a store backed by the database at `url`, creating the
    /// database and schema if they do not exist.
    pub async fn new(url: &str) -> EngineResult<Self> {
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            Sqlite::create_database(url).await?;
        }

        let pool = SqlitePool::connect(url).await?;
        Self::setup_schema(&pool).await?;

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// Opens the standard database.
    pub async fn init() -> EngineResult<Self> {
        Self::new(DATABASE_URL).await
    }

    /// Sets up the required database schema.
    async fn setup_schema(pool: &SqlitePool) -> EngineResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS distributions (
                id TEXT PRIMARY KEY,
                saved_at TEXT NOT NULL,
                total_pool TEXT NOT NULL,
                total_hours TEXT NOT NULL,
                payload TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS employees (
                name TEXT PRIMARY KEY,
                role TEXT,
                multiplier TEXT NOT NULL,
                last_seen TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Appends a distribution record to the history.
    pub async fn save_distribution(&self, record: &DistributionRecord) -> EngineResult<()> {
        let payload = serde_json::to_string(&record.payload)?;

        sqlx::query(
            "INSERT INTO distributions (id, saved_at, total_pool, total_hours, payload) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(record.id.to_string())
        .bind(record.saved_at.to_rfc3339())
        .bind(record.total_pool.to_string())
        .bind(record.total_hours.to_string())
        .bind(payload)
        .execute(&*self.pool)
        .await?;

        Ok(())
    }

    /// Records an employee's latest role and multiplier.
    pub async fn upsert_employee(
        &self,
        name: &str,
        role: Option<&str>,
        multiplier: Decimal,
        seen_at: DateTime<Utc>,
    ) -> EngineResult<()> {
        sqlx::query(
            "INSERT INTO employees (name, role, multiplier, last_seen) \
             VALUES (?, ?, ?, ?) \
             ON CONFLICT(name) DO UPDATE SET \
                 role = excluded.role, \
                 multiplier = excluded.multiplier, \
                 last_seen = excluded.last_seen",
        )
        .bind(name)
        .bind(role)
        .bind(multiplier.to_string())
        .bind(seen_at.to_rfc3339())
        .execute(&*self.pool)
        .await?;

        Ok(())
    }

    /// Lists saved distributions, newest first, up to `limit`.
    pub async fn list_distributions(&self, limit: u32) -> EngineResult<Vec<DistributionRecord>> {
        let rows = sqlx::query(
            "SELECT id, saved_at, total_pool, total_hours, payload \
             FROM distributions ORDER BY saved_at DESC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&*self.pool)
        .await?;

        rows.iter().map(Self::row_to_record).collect()
    }

    /// Deletes a distribution by id, returning whether a row was removed.
    pub async fn delete_distribution(&self, id: Uuid) -> EngineResult<bool> {
        let result = sqlx::query("DELETE FROM distributions WHERE id = ?")
            .bind(id.to_string())
            .execute(&*self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Lists known employees, most recently seen first, up to `limit`.
    pub async fn list_employees(&self, limit: u32) -> EngineResult<Vec<EmployeeProfile>> {
        let rows = sqlx::query(
            "SELECT name, role, multiplier, last_seen \
             FROM employees ORDER BY last_seen DESC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&*self.pool)
        .await?;

        rows.iter()
            .map(|row| {
                Ok(EmployeeProfile {
                    name: row.get("name"),
                    role: row.get("role"),
                    multiplier: parse_decimal(&row.get::<String, _>("multiplier"))?,
                    last_seen: parse_timestamp(&row.get::<String, _>("last_seen"))?,
                })
            })
            .collect()
    }

    fn row_to_record(row: &sqlx::sqlite::SqliteRow) -> EngineResult<DistributionRecord> {
        let id: String = row.get("id");
        let id = Uuid::parse_str(&id).map_err(|e| EngineError::Storage {
            message: format!("invalid record id '{}': {}", id, e),
        })?;

        let payload: SavedDistribution = serde_json::from_str(&row.get::<String, _>("payload"))?;

        Ok(DistributionRecord {
            id,
            saved_at: parse_timestamp(&row.get::<String, _>("saved_at"))?,
            total_pool: parse_decimal(&row.get::<String, _>("total_pool"))?,
            total_hours: parse_decimal(&row.get::<String, _>("total_hours"))?,
            payload,
        })
    }
}

fn parse_decimal(value: &str) -> EngineResult<Decimal> {
    Decimal::from_str(value).map_err(|e| EngineError::Storage {
        message: format!("invalid decimal '{}': {}", value, e),
    })
}

fn parse_timestamp(value: &str) -> EngineResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| EngineError::Storage {
            message: format!("invalid timestamp '{}': {}", value, e),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AllocationResult, HousePayout, HoursRecord};
    use chrono::Duration;

    // Setup a new in-memory test database for each test
    async fn setup_test() -> Store {
        let test_id = Uuid::new_v4().simple().to_string();
        let url = format!("sqlite:file:memdb_{}?mode=memory&cache=shared", test_id);
        Store::new(&url).await.expect("Failed to create test store")
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sample_record(saved_at: DateTime<Utc>) -> DistributionRecord {
        DistributionRecord {
            id: Uuid::new_v4(),
            saved_at,
            total_pool: dec("500"),
            total_hours: dec("70"),
            payload: SavedDistribution {
                entries: vec![HoursRecord {
                    employee_id: "alice".to_string(),
                    name: "Alice".to_string(),
                    total_hours: dec("70"),
                    role: Some("waiter".to_string()),
                    multiplier: None,
                }],
                result: AllocationResult {
                    total_pool: dec("500"),
                    total_points: dec("56"),
                    house_share: dec("0.02"),
                    payouts: vec![],
                    house: HousePayout {
                        raw_proportion: dec("0.02"),
                        raw_amount: dec("10"),
                        rounded_amount: dec("500"),
                    },
                    excluded: vec![],
                },
            },
        }
    }

    #[tokio::test]
    async fn test_save_and_list_round_trip() {
        let store = setup_test().await;
        let record = sample_record(Utc::now());

        store.save_distribution(&record).await.unwrap();
        let listed = store.list_distributions(10).await.unwrap();

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, record.id);
        assert_eq!(listed[0].total_pool, record.total_pool);
        assert_eq!(listed[0].payload, record.payload);
    }

    #[tokio::test]
    async fn test_list_is_newest_first_and_bounded() {
        let store = setup_test().await;
        let base = Utc::now();

        for i in 0..5 {
            let record = sample_record(base + Duration::seconds(i));
            store.save_distribution(&record).await.unwrap();
        }

        let listed = store.list_distributions(3).await.unwrap();
        assert_eq!(listed.len(), 3);
        assert!(listed[0].saved_at >= listed[1].saved_at);
        assert!(listed[1].saved_at >= listed[2].saved_at);
    }

    #[tokio::test]
    async fn test_delete_existing_record() {
        let store = setup_test().await;
        let record = sample_record(Utc::now());
        store.save_distribution(&record).await.unwrap();

        assert!(store.delete_distribution(record.id).await.unwrap());
        assert!(store.list_distributions(10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_record_returns_false() {
        let store = setup_test().await;
        assert!(!store.delete_distribution(Uuid::new_v4()).await.unwrap());
    }

    #[tokio::test]
    async fn test_employee_upsert_keeps_latest_values() {
        let store = setup_test().await;
        let first = Utc::now();
        let later = first + Duration::hours(1);

        store
            .upsert_employee("Alice", Some("new"), dec("0.6"), first)
            .await
            .unwrap();
        store
            .upsert_employee("Alice", Some("waiter"), dec("0.8"), later)
            .await
            .unwrap();

        let employees = store.list_employees(10).await.unwrap();
        assert_eq!(employees.len(), 1);
        assert_eq!(employees[0].role.as_deref(), Some("waiter"));
        assert_eq!(employees[0].multiplier, dec("0.8"));
    }

    #[tokio::test]
    async fn test_employees_listed_most_recent_first() {
        let store = setup_test().await;
        let base = Utc::now();

        store
            .upsert_employee("Old", None, dec("0.8"), base)
            .await
            .unwrap();
        store
            .upsert_employee("Recent", None, dec("0.8"), base + Duration::minutes(5))
            .await
            .unwrap();

        let employees = store.list_employees(10).await.unwrap();
        assert_eq!(employees[0].name, "Recent");
        assert_eq!(employees[1].name, "Old");
    }
}
