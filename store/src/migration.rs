//! SQLite → PostgreSQL migration script generator.
//!
//! Reads the `question` table of an existing SQLite file and writes a plain
//! SQL script that recreates the rows on a PostgreSQL server. The script is
//! idempotent: the table and indexes are created only if missing, and every
//! insert skips rows that collide on (skill, question_text).
//!
//! Older databases may lack the `kind` and `category` columns; their rows
//! are exported with the default values instead.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use sqlx::sqlite::SqliteConnection;
use sqlx::Connection;
use tracing::info;

use crate::error::StoreError;
use crate::model::{into_counts, DEFAULT_CATEGORY, DEFAULT_KIND};
use crate::sql::{banner, quote_literal};
use crate::sqlite::connect_existing;

const RULE_WIDTH: usize = 53;
const SKILL_RULE_WIDTH: usize = 31;

const TARGET_SCHEMA: &str = "\
CREATE TABLE IF NOT EXISTS question (
    id BIGSERIAL PRIMARY KEY,
    skill VARCHAR(100) NOT NULL,
    question_text TEXT NOT NULL,
    kind VARCHAR(50) DEFAULT 'general',
    level VARCHAR(20) DEFAULT 'intermediate',
    category VARCHAR(50) DEFAULT 'technical',
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    CONSTRAINT unique_question UNIQUE (skill, question_text)
);
";

const TARGET_INDEXES: &str = "\
CREATE INDEX IF NOT EXISTS idx_question_skill ON question(skill);
CREATE INDEX IF NOT EXISTS idx_question_level ON question(level);
CREATE INDEX IF NOT EXISTS idx_question_kind_level ON question(kind, level);
CREATE INDEX IF NOT EXISTS idx_question_text_search ON question USING gin(to_tsvector('english', question_text));
";

const VERIFICATION: &str = "\
-- Total rows
SELECT COUNT(*) AS total_questions FROM question;

-- Rows per skill
SELECT skill, COUNT(*) AS total
FROM question
GROUP BY skill
ORDER BY total DESC;

-- Rows per level
SELECT level, COUNT(*) AS total
FROM question
GROUP BY level
ORDER BY total DESC;
";

/// What a migration run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationReport {
    /// Rows read from the source table.
    pub rows: u64,
    /// Distinct skills in the source.
    pub skills: u64,
    /// `INSERT` statements written.
    pub statements: u64,
    pub per_skill: BTreeMap<String, u64>,
    pub per_level: BTreeMap<String, u64>,
    pub output: PathBuf,
}

/// Row counts of a source file, shown before a migration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceStatistics {
    pub total: u64,
    pub per_skill: Vec<(String, u64)>,
    pub per_level: Vec<(String, u64)>,
}

/// Which optional columns the source table carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SourceColumns {
    kind: bool,
    category: bool,
}

impl SourceColumns {
    fn kind_expr(&self) -> String {
        if self.kind {
            format!("COALESCE(kind, '{DEFAULT_KIND}')")
        } else {
            format!("'{DEFAULT_KIND}'")
        }
    }

    fn category_expr(&self) -> String {
        if self.category {
            format!("COALESCE(category, '{DEFAULT_CATEGORY}')")
        } else {
            format!("'{DEFAULT_CATEGORY}'")
        }
    }
}

/// Writes a PostgreSQL script for every row of `source` into `output`.
///
/// Fails without writing anything when the source file or table is missing
/// or the table is empty.
pub async fn generate_migration(
    source: &Path,
    output: &Path,
) -> Result<MigrationReport, StoreError> {
    info!(source = %source.display(), output = %output.display(), "Starting migration script generation");

    let mut conn = connect_existing(source).await?;
    ensure_table(&mut conn).await?;

    let columns = detect_columns(&mut conn).await?;
    info!(
        has_kind = columns.kind,
        has_category = columns.category,
        "Inspected source columns"
    );

    let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM question")
        .fetch_one(&mut conn)
        .await?;
    if total == 0 {
        conn.close().await?;
        return Err(StoreError::EmptySource);
    }

    let skills: Vec<(String,)> =
        sqlx::query_as("SELECT DISTINCT skill FROM question ORDER BY skill")
            .fetch_all(&mut conn)
            .await?;

    let mut script = String::new();
    banner(&mut script, "INTERVIEW QUESTION MIGRATION", RULE_WIDTH);
    script.push_str(&format!(
        "-- Generated: {}\n-- Source: {}\n-- Total rows: {total}\n",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        source.display()
    ));
    script.push_str(&format!("-- {}\n\n", "=".repeat(RULE_WIDTH)));

    script.push_str("-- Create the table if it does not exist\n");
    script.push_str(TARGET_SCHEMA);
    script.push('\n');
    script.push_str("-- Indexes\n");
    script.push_str(TARGET_INDEXES);
    script.push('\n');
    script.push_str("BEGIN;\n\n");

    let select = format!(
        "SELECT question_text, {}, COALESCE(level, 'intermediate'), {} \
         FROM question WHERE skill = ? ORDER BY level, question_text",
        columns.kind_expr(),
        columns.category_expr()
    );

    let mut per_skill = BTreeMap::new();
    let mut statements = 0u64;
    for (skill,) in &skills {
        banner(
            &mut script,
            &format!("SKILL: {}", skill.to_uppercase()),
            SKILL_RULE_WIDTH,
        );
        script.push('\n');

        let rows: Vec<(String, String, String, String)> = sqlx::query_as(&select)
            .bind(skill)
            .fetch_all(&mut conn)
            .await?;

        for (text, kind, level, category) in &rows {
            script.push_str("INSERT INTO question (skill, question_text, kind, level, category) VALUES\n");
            script.push_str(&format!(
                "({}, {}, {}, {}, {})\n",
                quote_literal(Some(skill)),
                quote_literal(Some(text)),
                quote_literal(Some(kind)),
                quote_literal(Some(level)),
                quote_literal(Some(category)),
            ));
            script.push_str("ON CONFLICT (skill, question_text) DO NOTHING;\n\n");
        }

        let count = rows.len() as u64;
        script.push_str(&format!("-- Total {skill}: {count} questions\n\n"));
        per_skill.insert(skill.clone(), count);
        statements += count;
    }

    script.push_str("COMMIT;\n\n");

    let per_level: Vec<(String, i64)> = sqlx::query_as(
        "SELECT COALESCE(level, 'intermediate') AS level, COUNT(*) FROM question GROUP BY 1",
    )
    .fetch_all(&mut conn)
    .await?;
    conn.close().await?;

    banner(&mut script, "VERIFICATION", RULE_WIDTH);
    script.push('\n');
    script.push_str(VERIFICATION);
    script.push('\n');
    script.push_str(&format!("-- INSERT statements generated: {statements}\n"));

    tokio::fs::write(output, script).await?;

    let report = MigrationReport {
        rows: total as u64,
        skills: skills.len() as u64,
        statements,
        per_skill,
        per_level: into_counts(per_level),
        output: output.to_path_buf(),
    };

    info!(
        rows = report.rows,
        skills = report.skills,
        statements = report.statements,
        output = %report.output.display(),
        "Migration script generated"
    );

    Ok(report)
}

/// Row counts per skill and per level of a source file, largest first.
pub async fn source_statistics(source: &Path) -> Result<SourceStatistics, StoreError> {
    let mut conn = connect_existing(source).await?;
    ensure_table(&mut conn).await?;

    let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM question")
        .fetch_one(&mut conn)
        .await?;
    let per_skill: Vec<(String, i64)> = sqlx::query_as(
        "SELECT skill, COUNT(*) AS total FROM question GROUP BY skill ORDER BY total DESC, skill",
    )
    .fetch_all(&mut conn)
    .await?;
    let per_level: Vec<(String, i64)> = sqlx::query_as(
        r#"
        SELECT COALESCE(level, 'intermediate') AS level, COUNT(*) AS total
        FROM question GROUP BY 1 ORDER BY total DESC, level
        "#,
    )
    .fetch_all(&mut conn)
    .await?;
    conn.close().await?;

    let widen = |rows: Vec<(String, i64)>| {
        rows.into_iter()
            .map(|(label, count)| (label, count as u64))
            .collect()
    };
    Ok(SourceStatistics {
        total: total as u64,
        per_skill: widen(per_skill),
        per_level: widen(per_level),
    })
}

async fn ensure_table(conn: &mut SqliteConnection) -> Result<(), StoreError> {
    let found: Option<(String,)> =
        sqlx::query_as("SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'question'")
            .fetch_optional(&mut *conn)
            .await?;
    match found {
        Some(_) => Ok(()),
        None => Err(StoreError::TableMissing("question".to_string())),
    }
}

async fn detect_columns(conn: &mut SqliteConnection) -> Result<SourceColumns, StoreError> {
    let names: Vec<(String,)> = sqlx::query_as("SELECT name FROM pragma_table_info('question')")
        .fetch_all(&mut *conn)
        .await?;
    let has = |column: &str| names.iter().any(|(name,)| name == column);
    Ok(SourceColumns {
        kind: has("kind"),
        category: has("category"),
    })
}
