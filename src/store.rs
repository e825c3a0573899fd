use std::path::PathBuf;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::{Backend, Config};
use crate::db;
use crate::models::CourseEntry;
use crate::snapshot;

/// Where the course snapshot lives.
pub enum Store {
    File(PathBuf),
    Postgres { pool: PgPool, key: String },
}

impl Store {
    pub async fn open(config: &Config) -> anyhow::Result<Store> {
        match config.backend {
            Backend::File => Ok(Store::File(config.data_file.clone())),
            Backend::Postgres => {
                let pool = PgPoolOptions::new()
                    .max_connections(5)
                    .connect(config.database_url()?)
                    .await
                    .context("failed to connect to Postgres")?;
                Ok(Store::Postgres {
                    pool,
                    key: config.snapshot_key.clone(),
                })
            }
        }
    }

    pub fn pool(&self) -> Option<&PgPool> {
        match self {
            Store::File(_) => None,
            Store::Postgres { pool, .. } => Some(pool),
        }
    }

    pub async fn load(&self) -> anyhow::Result<Vec<CourseEntry>> {
        match self {
            Store::File(path) => snapshot::load_file(path),
            Store::Postgres { pool, key } => db::load_snapshot(pool, key).await,
        }
    }

    pub async fn save(&self, entries: &[CourseEntry]) -> anyhow::Result<()> {
        match self {
            Store::File(path) => snapshot::save_file(path, entries),
            Store::Postgres { pool, key } => db::save_snapshot(pool, key, entries).await,
        }
    }

    pub async fn clear(&self) -> anyhow::Result<()> {
        match self {
            Store::File(path) => snapshot::clear_file(path),
            Store::Postgres { pool, key } => db::clear_snapshot(pool, key).await,
        }
    }
}
