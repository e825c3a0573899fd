use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use tracing::info;
use uuid::Uuid;

use crate::models::{Category, CourseEntry};

pub async fn init_db(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

pub async fn seed(pool: &PgPool, key: &str) -> anyhow::Result<usize> {
    let entries = vec![
        CourseEntry::new("Calculus I", Category::Required, "3", "84"),
        CourseEntry::new("Introduction to Programming", Category::Required, "3", "91"),
        CourseEntry::new("Modern Poetry", Category::Elective, "2", "76"),
        CourseEntry::new("Ethics and Society", Category::GeneralEd, "2", "68"),
        CourseEntry::new("Badminton", Category::PhysicalEd, "1", "88"),
        CourseEntry::new("Campus Orientation", Category::Other, "0", "100"),
    ];

    save_snapshot(pool, key, &entries).await?;
    Ok(entries.len())
}

/// Replaces the whole snapshot stored under `key`.
pub async fn save_snapshot(
    pool: &PgPool,
    key: &str,
    entries: &[CourseEntry],
) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO gpa_calculator.snapshots (id, snapshot_key, entries, saved_at)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (snapshot_key) DO UPDATE
        SET entries = EXCLUDED.entries, saved_at = EXCLUDED.saved_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(key)
    .bind(Json(entries))
    .bind(Utc::now())
    .execute(pool)
    .await?;

    info!(key, count = entries.len(), "saved snapshot to postgres");
    Ok(())
}

pub async fn load_snapshot(pool: &PgPool, key: &str) -> anyhow::Result<Vec<CourseEntry>> {
    let row = sqlx::query(
        "SELECT entries, saved_at FROM gpa_calculator.snapshots WHERE snapshot_key = $1",
    )
    .bind(key)
    .fetch_optional(pool)
    .await?;

    let Some(row) = row else {
        return Ok(Vec::new());
    };

    let Json(entries): Json<Vec<CourseEntry>> = row.try_get("entries")?;
    let saved_at: DateTime<Utc> = row.try_get("saved_at")?;
    info!(key, count = entries.len(), %saved_at, "loaded snapshot from postgres");
    Ok(entries)
}

pub async fn clear_snapshot(pool: &PgPool, key: &str) -> anyhow::Result<()> {
    let result = sqlx::query("DELETE FROM gpa_calculator.snapshots WHERE snapshot_key = $1")
        .bind(key)
        .execute(pool)
        .await?;

    info!(key, removed = result.rows_affected(), "cleared postgres snapshot");
    Ok(())
}
