use std::path::PathBuf;

use anyhow::{bail, Context};
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing::{info, warn};

mod aggregate;
mod config;
mod db;
mod error;
mod grading;
mod models;
mod projection;
mod report;
mod snapshot;
mod store;

use crate::config::{Backend, Config};
use crate::error::GradeError;
use crate::models::{Category, CourseEntry, FieldValue};
use crate::store::Store;

#[derive(Parser)]
#[command(name = "gpa-calculator")]
#[command(about = "Credit-weighted GPA calculator with target projections", long_about = None)]
struct Cli {
    /// Snapshot file for the local store
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,
    /// Keep the snapshot in Postgres (DATABASE_URL) instead of a local file
    #[arg(long, global = true)]
    database: bool,
    /// Snapshot key for the Postgres store
    #[arg(long, global = true)]
    key: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a course
    Add {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "required", value_parser = parse_category)]
        category: Category,
        #[arg(long, default_value = "")]
        credit: String,
        #[arg(long, default_value = "")]
        score: String,
    },
    /// Remove a course by its position in `list`
    Remove { index: usize },
    /// List saved courses
    List,
    /// Calculate averages, GPA and per-category statistics
    Calc {
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Project what it takes to reach a target GPA
    Target {
        #[arg(long)]
        gpa: f64,
        #[arg(long)]
        planned_credits: Option<f64>,
    },
    /// Delete every saved course
    Clear {
        #[arg(long)]
        yes: bool,
    },
    /// Append courses from a CSV file (name,category,credit,score)
    Import {
        #[arg(long)]
        csv: PathBuf,
    },
    /// Create or upgrade the Postgres schema
    InitDb,
    /// Store a sample course list in Postgres
    Seed,
}

fn parse_category(value: &str) -> Result<Category, String> {
    Category::parse(value).ok_or_else(|| {
        let known: Vec<&str> = Category::ALL.iter().map(|category| category.code()).collect();
        format!("unknown category `{value}` (expected one of {})", known.join(", "))
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gpa_calculator=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    if let Some(path) = cli.data_file {
        config.data_file = path;
    }
    if let Some(key) = cli.key {
        config.snapshot_key = key;
    }
    if cli.database {
        config.backend = Backend::Postgres;
    }

    let store = Store::open(&config).await?;

    match cli.command {
        Commands::Add {
            name,
            category,
            credit,
            score,
        } => {
            let mut entries = store.load().await?;
            let entry = CourseEntry::new(
                name,
                category,
                FieldValue::Text(credit),
                FieldValue::Text(score),
            );
            if entry.to_record().is_none() {
                warn!("course has no numeric credit and score; it is left out of calculations");
            }
            entries.push(entry);
            store.save(&entries).await?;
            println!("Saved {} courses.", entries.len());
        }
        Commands::Remove { index } => {
            let mut entries = store.load().await?;
            if index == 0 || index > entries.len() {
                bail!("no course at position {index} ({} saved)", entries.len());
            }
            let removed = entries.remove(index - 1);
            store.save(&entries).await?;
            println!("Removed {}.", display_name(&removed));
        }
        Commands::List => {
            let entries = store.load().await?;
            if entries.is_empty() {
                println!("No courses saved.");
                return Ok(());
            }
            for (position, entry) in entries.iter().enumerate() {
                let marker = if entry.to_record().is_some() { "" } else { " (skipped)" };
                println!(
                    "{}. {} [{}] credit {} score {}{}",
                    position + 1,
                    display_name(entry),
                    entry.category.code(),
                    entry.credit,
                    entry.score,
                    marker
                );
            }
        }
        Commands::Calc { out } => {
            let entries = store.load().await?;
            let result = match aggregate::aggregate(&entries) {
                Ok(result) => result,
                Err(err) => {
                    print_prompt(&err);
                    return Ok(());
                }
            };
            let report = report::build_report(&entries, &result, Utc::now().date_naive());
            match out {
                Some(path) => {
                    std::fs::write(&path, &report)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    println!("Report written to {}.", path.display());
                }
                None => print!("{report}"),
            }
        }
        Commands::Target {
            gpa,
            planned_credits,
        } => {
            let entries = store.load().await?;
            let projection = aggregate::aggregate(&entries)
                .map_err(|_| GradeError::NoBaseline)
                .and_then(|result| {
                    projection::project_target(result.baseline(), gpa, planned_credits)
                });
            match projection {
                Ok(projection) => print!("{}", report::build_projection_report(&projection)),
                Err(err) => print_prompt(&err),
            }
        }
        Commands::Clear { yes } => {
            if !yes {
                println!("This deletes every saved course. Re-run with --yes to confirm.");
                return Ok(());
            }
            store.clear().await?;
            println!("All courses cleared.");
        }
        Commands::Import { csv } => {
            let imported = snapshot::read_csv(&csv)?;
            let mut entries = store.load().await?;
            let count = imported.len();
            entries.extend(imported);
            store.save(&entries).await?;
            info!(count, source = %csv.display(), "imported courses");
            println!("Imported {count} courses from {}.", csv.display());
        }
        Commands::InitDb => {
            let pool = require_pool(&store)?;
            db::init_db(pool).await?;
            println!("Schema ready.");
        }
        Commands::Seed => {
            let pool = require_pool(&store)?;
            let count = db::seed(pool, &config.snapshot_key).await?;
            println!("Seeded {count} courses under `{}`.", config.snapshot_key);
        }
    }

    Ok(())
}

fn require_pool(store: &Store) -> anyhow::Result<&sqlx::PgPool> {
    store
        .pool()
        .context("this command needs the Postgres store (pass --database)")
}

fn display_name(entry: &CourseEntry) -> &str {
    if entry.name.is_empty() {
        "(unnamed course)"
    } else {
        &entry.name
    }
}

fn print_prompt(err: &GradeError) {
    match err {
        GradeError::EmptyInput => {
            println!("Enter at least one course with a valid credit and score.")
        }
        GradeError::NoBaseline => {
            println!("Enter your current courses first so there is a GPA to project from.")
        }
        GradeError::InvalidTarget(_) => println!("Enter a numeric target GPA."),
    }
}
