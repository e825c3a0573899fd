use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{debug, info};

use crate::models::{Category, CourseEntry, FieldValue};

pub const DEFAULT_SNAPSHOT_FILE: &str = "gpa_data.json";
pub const DEFAULT_SNAPSHOT_KEY: &str = "gpaData";

pub fn to_json(entries: &[CourseEntry]) -> anyhow::Result<String> {
    serde_json::to_string_pretty(entries).context("failed to serialize course snapshot")
}

pub fn from_json(raw: &str) -> anyhow::Result<Vec<CourseEntry>> {
    serde_json::from_str(raw).context("course snapshot is not a JSON list of courses")
}

/// Reads the snapshot at `path`. A missing file is an empty course list.
pub fn load_file(path: &Path) -> anyhow::Result<Vec<CourseEntry>> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no snapshot yet");
            return Ok(Vec::new());
        }
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read {}", path.display()));
        }
    };

    let entries =
        from_json(&raw).with_context(|| format!("failed to load {}", path.display()))?;
    debug!(path = %path.display(), count = entries.len(), "loaded snapshot");
    Ok(entries)
}

/// Replaces the snapshot at `path` with `entries`. The new content is
/// written beside the target first and renamed over it.
pub fn save_file(path: &Path, entries: &[CourseEntry]) -> anyhow::Result<()> {
    let json = to_json(entries)?;
    let staging = staging_path(path);

    std::fs::write(&staging, json)
        .with_context(|| format!("failed to write {}", staging.display()))?;
    std::fs::rename(&staging, path)
        .with_context(|| format!("failed to replace {}", path.display()))?;

    info!(path = %path.display(), count = entries.len(), "saved snapshot");
    Ok(())
}

pub fn clear_file(path: &Path) -> anyhow::Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => {
            info!(path = %path.display(), "cleared snapshot");
            Ok(())
        }
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err).with_context(|| format!("failed to remove {}", path.display())),
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| DEFAULT_SNAPSHOT_FILE.into());
    name.push(".tmp");
    path.with_file_name(name)
}

/// Reads course rows from a CSV file with `name,category,credit,score`
/// headers. Credit and score stay as text so typos survive the import.
pub fn read_csv(csv_path: &Path) -> anyhow::Result<Vec<CourseEntry>> {
    #[derive(serde::Deserialize)]
    struct CsvRow {
        #[serde(default)]
        name: String,
        #[serde(default)]
        category: String,
        #[serde(default)]
        credit: String,
        #[serde(default)]
        score: String,
    }

    let mut reader = csv::Reader::from_path(csv_path)
        .with_context(|| format!("failed to open {}", csv_path.display()))?;
    let mut entries = Vec::new();

    for (line, result) in reader.deserialize::<CsvRow>().enumerate() {
        let row = result.with_context(|| format!("invalid course row {}", line + 1))?;
        let category = if row.category.trim().is_empty() {
            Category::default()
        } else {
            Category::from(row.category)
        };
        entries.push(CourseEntry {
            name: row.name,
            category,
            credit: FieldValue::Text(row.credit),
            score: FieldValue::Text(row.score),
        });
    }

    Ok(entries)
}
