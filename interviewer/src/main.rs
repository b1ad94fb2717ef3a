//! `interviewer`: the console front end.
//!
//! With no subcommand it opens the interactive menu: pick skills, draw random
//! questions from the configured store, review and export them. Subcommands
//! cover the one-shot jobs (seeding, backups, SQLite to PostgreSQL migration,
//! catalog maintenance) without entering the menu.
//!
//! Logs go to `logs/interviewer.YYYY-MM-DD`, never to the terminal.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use interview_catalog::{load_initial, Catalog};
use interview_store::{AnyStore, AppConfig, QuestionStore};
use rand::rngs::StdRng;
use rand::SeedableRng;

mod commands;
mod logging;
mod menu;
mod selection;

#[derive(Parser)]
#[command(name = "interviewer", about = "Technical interview question generator")]
struct Cli {
    /// Optional subcommand. When omitted, starts the interactive menu.
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the built-in catalog into the configured store.
    Seed {
        /// Clear the store first, even if it already holds questions.
        #[arg(short, long)]
        force: bool,
    },
    /// Turn a SQLite question database into a PostgreSQL import script.
    Migrate {
        /// SQLite file to read. Defaults to the configured SQLite path.
        #[arg(long)]
        source: Option<PathBuf>,
        #[arg(long, default_value = "migration_postgresql.sql")]
        output: PathBuf,
    },
    /// Write a SQL backup of the configured store.
    Backup {
        /// Defaults to `backup_YYYYMMDD_HHMMSS.sql` in the current directory.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Check the built-in catalog for malformed entries.
    Validate,
    /// Write the built-in catalog as a JSON document.
    CatalogExport {
        #[arg(short, long, default_value = "questions_catalog.json")]
        output: PathBuf,
    },
    /// Write the built-in catalog as a standalone SQLite script.
    CatalogSql {
        #[arg(short, long, default_value = "initial_questions.sql")]
        output: PathBuf,
    },
    /// Print store statistics.
    Stats,
}

/// Builds the configured store and makes sure its schema exists.
async fn open_store(config: &AppConfig) -> anyhow::Result<AnyStore> {
    let store = AnyStore::from_config(config);
    store
        .initialize()
        .await
        .with_context(|| format!("failed to initialize {}", store.describe()))?;
    tracing::info!(
        kind = config.backend.as_str(),
        backend = %store.describe(),
        "Store ready"
    );
    Ok(store)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = logging::init();

    let config = AppConfig::from_env();
    let catalog = Catalog::initial();
    let mut out = std::io::stdout().lock();

    match cli.command {
        None => {
            let store = open_store(&config).await?;
            let report = load_initial(&store, &catalog, false)
                .await
                .context("failed to load the initial catalog")?;
            if !report.skipped {
                writeln!(out, "First run: loaded {} questions", report.inserted)?;
            }

            let stdin = std::io::stdin().lock();
            let mut console = menu::Console::new(
                &store,
                &catalog,
                stdin,
                out,
                StdRng::from_entropy(),
                ".",
            );
            console.run().await?;
        }
        Some(Commands::Seed { force }) => {
            let store = open_store(&config).await?;
            commands::seed(&store, &catalog, force, &mut out).await?;
        }
        Some(Commands::Migrate { source, output }) => {
            let source = source.unwrap_or_else(|| config.sqlite_path.clone());
            commands::migrate(&source, &output, &config.postgres, &mut out).await?;
        }
        Some(Commands::Backup { output }) => {
            let store = open_store(&config).await?;
            let output = output.unwrap_or_else(|| menu::backup_path(Path::new(".")));
            commands::backup(&store, &output, &mut out).await?;
        }
        Some(Commands::Validate) => commands::validate(&catalog, &mut out)?,
        Some(Commands::CatalogExport { output }) => {
            commands::catalog_export(&catalog, &output, &mut out).await?;
        }
        Some(Commands::CatalogSql { output }) => {
            commands::catalog_sql(&catalog, &output, &mut out).await?;
        }
        Some(Commands::Stats) => {
            let store = open_store(&config).await?;
            commands::stats(&store, &mut out).await?;
        }
    }

    Ok(())
}
