use std::path::PathBuf;

use anyhow::{bail, Context};

use crate::snapshot::{DEFAULT_SNAPSHOT_FILE, DEFAULT_SNAPSHOT_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    File,
    Postgres,
}

impl Backend {
    fn parse(value: &str) -> anyhow::Result<Backend> {
        match value.trim().to_lowercase().as_str() {
            "" | "file" => Ok(Backend::File),
            "postgres" | "postgresql" | "db" => Ok(Backend::Postgres),
            other => bail!("unknown GPA_STORE backend `{other}` (expected `file` or `postgres`)"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub data_file: PathBuf,
    pub snapshot_key: String,
    pub backend: Backend,
    pub database_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_SNAPSHOT_FILE),
            snapshot_key: DEFAULT_SNAPSHOT_KEY.to_string(),
            backend: Backend::File,
            database_url: None,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Config> {
        Config::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Config> {
        let mut config = Config::default();

        if let Some(path) = lookup("GPA_DATA_FILE").filter(|value| !value.is_empty()) {
            config.data_file = PathBuf::from(path);
        }
        if let Some(key) = lookup("GPA_SNAPSHOT_KEY").filter(|value| !value.is_empty()) {
            config.snapshot_key = key;
        }
        if let Some(backend) = lookup("GPA_STORE") {
            config.backend = Backend::parse(&backend)?;
        }
        config.database_url = lookup("DATABASE_URL").filter(|value| !value.is_empty());

        Ok(config)
    }

    pub fn database_url(&self) -> anyhow::Result<&str> {
        self.database_url
            .as_deref()
            .context("DATABASE_URL must be set to use the Postgres snapshot store")
    }
}
