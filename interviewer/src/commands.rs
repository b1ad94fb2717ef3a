//! Non-interactive subcommands. Each writes its report to `out`.

use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context};
use chrono::Local;
use interview_catalog::{load_initial, Catalog};
use interview_store::{generate_migration, source_statistics, PostgresConfig, QuestionStore};

pub async fn seed<S: QuestionStore>(
    store: &S,
    catalog: &Catalog,
    force: bool,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let report = load_initial(store, catalog, force)
        .await
        .context("failed to load the catalog")?;

    if report.skipped {
        writeln!(
            out,
            "Store already holds questions, nothing loaded (use --force to reload)"
        )?;
        return Ok(());
    }
    writeln!(out, "Backend: {}", store.describe())?;
    writeln!(out, "Attempted: {}", report.attempted)?;
    writeln!(out, "Inserted:  {}", report.inserted)?;
    if !report.succeeded() {
        bail!("{} of {} inserts failed", report.failed, report.attempted);
    }
    Ok(())
}

/// `target` only appears in the printed `createdb`/`psql` hints.
pub async fn migrate(
    source: &Path,
    output: &Path,
    target: &PostgresConfig,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let stats = source_statistics(source)
        .await
        .with_context(|| format!("failed to read {}", source.display()))?;
    writeln!(out, "Source: {}", source.display())?;
    writeln!(out, "  Rows: {}", stats.total)?;
    for (skill, count) in &stats.per_skill {
        writeln!(out, "    {skill}: {count}")?;
    }
    writeln!(out, "  Levels:")?;
    for (level, count) in &stats.per_level {
        writeln!(out, "    {level}: {count}")?;
    }

    let report = generate_migration(source, output)
        .await
        .context("failed to generate the migration script")?;
    writeln!(
        out,
        "\nGenerated {} INSERT statements for {} rows across {} skills",
        report.statements, report.rows, report.skills
    )?;
    writeln!(out, "Output: {}", report.output.display())?;
    writeln!(out, "\nNext steps:")?;
    writeln!(out, "  createdb {}", target.database)?;
    writeln!(
        out,
        "  psql \"{}\" -f {}",
        target.connection_string(),
        report.output.display()
    )?;
    Ok(())
}

pub async fn backup<S: QuestionStore>(
    store: &S,
    output: &Path,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    store
        .export_as_script(output)
        .await
        .with_context(|| format!("failed to write {}", output.display()))?;
    writeln!(out, "Database exported to {}", output.display())?;
    Ok(())
}

/// Fails when the catalog has errors. Warnings are only printed.
pub fn validate(catalog: &Catalog, out: &mut impl Write) -> anyhow::Result<()> {
    let report = catalog.validate();
    writeln!(
        out,
        "Catalog: {} skills, {} questions",
        report.statistics.total_skills, report.statistics.total_questions
    )?;
    for (skill, breakdown) in &report.statistics.per_skill {
        let levels: Vec<String> = breakdown
            .per_level
            .iter()
            .map(|(level, n)| format!("{level}: {n}"))
            .collect();
        writeln!(out, "  {skill}: {} ({})", breakdown.total, levels.join(", "))?;
    }
    for warning in &report.warnings {
        writeln!(out, "warning: {warning}")?;
    }
    for error in &report.errors {
        writeln!(out, "error: {error}")?;
    }

    if !report.is_valid() {
        bail!("catalog has {} errors", report.errors.len());
    }
    writeln!(out, "Catalog is valid")?;
    Ok(())
}

pub async fn catalog_export(
    catalog: &Catalog,
    output: &Path,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    catalog
        .export_json(output)
        .await
        .with_context(|| format!("failed to write {}", output.display()))?;
    writeln!(
        out,
        "Exported {} questions to {}",
        catalog.total_questions(),
        output.display()
    )?;
    Ok(())
}

pub async fn catalog_sql(
    catalog: &Catalog,
    output: &Path,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    tokio::fs::write(output, catalog.to_sql_script(Local::now()))
        .await
        .with_context(|| format!("failed to write {}", output.display()))?;
    writeln!(out, "SQL script written to {}", output.display())?;
    Ok(())
}

pub async fn stats<S: QuestionStore>(store: &S, out: &mut impl Write) -> anyhow::Result<()> {
    let summary = store.summary().await?;
    let overall = store.overall_statistics().await?;

    writeln!(out, "Backend: {}", summary.backend)?;
    writeln!(out, "Questions: {}", summary.total_questions)?;
    writeln!(out, "Skills: {}", summary.total_skills)?;
    for (skill, stats) in &summary.statistics {
        writeln!(out, "  {skill}: {}", stats.total)?;
    }
    writeln!(out, "By level:")?;
    for (level, n) in &overall.by_level {
        writeln!(out, "  {level}: {n}")?;
    }
    writeln!(out, "By kind:")?;
    for (kind, n) in &overall.by_kind {
        writeln!(out, "  {kind}: {n}")?;
    }
    Ok(())
}
