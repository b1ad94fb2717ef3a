//! SQLite implementation of [`QuestionStore`].
//!
//! The embedded backend stores everything in a single file. It does not
//! enforce uniqueness on (skill, text): inserting the same question twice
//! produces two rows. Callers that seed repeatedly guard against this
//! themselves (the catalog seeder only loads into an empty table).
//!
//! Case-insensitive matching relies on SQLite's `LIKE`, which folds ASCII
//! case only. PostgreSQL's `ILIKE` folds every letter, so a term such as
//! `Ärger` can match rows there that it misses here. Patterns escape `%`,
//! `_` and `\` so the term always matches literally.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{ConnectOptions, Connection, QueryBuilder, Sqlite};

use crate::error::StoreError;
use crate::model::{
    into_counts, like_pattern, NewQuestion, OverallStatistics, Question, QuestionPatch,
    SearchHit, SkillCount, SkillStatistics,
};
use crate::sql::{quote_ident, quote_literal};
use crate::traits::QuestionStore;

const BACKEND: &str = "sqlite";

/// Schema statements, applied in order by [`SqliteStore::initialize`].
const SCHEMA: [&str; 3] = [
    r#"
    CREATE TABLE IF NOT EXISTS question (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        skill TEXT NOT NULL,
        question_text TEXT NOT NULL,
        kind TEXT DEFAULT 'general',
        level TEXT DEFAULT 'intermediate',
        category TEXT DEFAULT 'technical',
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_question_skill ON question(skill)",
    "CREATE INDEX IF NOT EXISTS idx_question_kind_level ON question(kind, level)",
];

type QuestionRow = (i64, String, String, String, String, String, Option<String>);

/// SQLite-backed question store. Holds only the file path; each operation
/// opens and closes its own connection.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    path: PathBuf,
}

impl SqliteStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn connect(&self) -> Result<SqliteConnection, StoreError> {
        SqliteConnectOptions::new()
            .filename(&self.path)
            .create_if_missing(true)
            .connect()
            .await
            .map_err(StoreError::connection(BACKEND))
    }
}

/// Opens an existing SQLite file without creating it.
pub(crate) async fn connect_existing(path: &Path) -> Result<SqliteConnection, StoreError> {
    if !path.exists() {
        return Err(StoreError::SourceMissing(path.to_path_buf()));
    }
    SqliteConnectOptions::new()
        .filename(path)
        .read_only(true)
        .connect()
        .await
        .map_err(StoreError::connection(BACKEND))
}

fn into_question(row: QuestionRow) -> Question {
    let (id, skill, text, kind, level, category, created_at) = row;
    Question {
        id,
        skill,
        text,
        kind,
        level,
        category,
        created_at,
    }
}

impl QuestionStore for SqliteStore {
    fn describe(&self) -> String {
        format!("SQLITE ({})", self.path.display())
    }

    async fn initialize(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let mut conn = self.connect().await?;
        for statement in SCHEMA {
            sqlx::query(statement).execute(&mut conn).await?;
        }
        conn.close().await?;

        tracing::info!(path = %self.path.display(), "SQLite question store ready");
        Ok(())
    }

    async fn test_connection(&self) -> Result<String, StoreError> {
        let mut conn = self.connect().await?;
        let (version,): (String,) = sqlx::query_as("SELECT sqlite_version()")
            .fetch_one(&mut conn)
            .await?;
        conn.close().await?;
        Ok(format!("SQLite {version}"))
    }

    async fn add_question(&self, question: &NewQuestion) -> Result<bool, StoreError> {
        let mut conn = self.connect().await?;
        let result = sqlx::query(
            r#"
            INSERT INTO question (skill, question_text, kind, level, category)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&question.skill)
        .bind(&question.text)
        .bind(&question.kind)
        .bind(&question.level)
        .bind(&question.category)
        .execute(&mut conn)
        .await?;
        conn.close().await?;

        Ok(result.rows_affected() > 0)
    }

    async fn questions_for_skill(
        &self,
        skill: &str,
        count: u32,
        level: Option<&str>,
    ) -> Result<Vec<String>, StoreError> {
        let mut conn = self.connect().await?;
        let rows: Vec<(String,)> = match level {
            Some(level) => {
                sqlx::query_as(
                    r#"
                    SELECT question_text FROM question
                    WHERE skill LIKE ? ESCAPE '\' AND level = ?
                    ORDER BY RANDOM() LIMIT ?
                    "#,
                )
                .bind(like_pattern(skill))
                .bind(level)
                .bind(i64::from(count))
                .fetch_all(&mut conn)
                .await?
            }
            None => {
                sqlx::query_as(
                    r#"
                    SELECT question_text FROM question
                    WHERE skill LIKE ? ESCAPE '\'
                    ORDER BY RANDOM() LIMIT ?
                    "#,
                )
                .bind(like_pattern(skill))
                .bind(i64::from(count))
                .fetch_all(&mut conn)
                .await?
            }
        };
        conn.close().await?;

        Ok(rows.into_iter().map(|(text,)| text).collect())
    }

    async fn questions_by_criteria(
        &self,
        skills: &[String],
        level: Option<&str>,
        kind: Option<&str>,
        per_skill: u32,
    ) -> Result<BTreeMap<String, Vec<String>>, StoreError> {
        let skills = if skills.is_empty() {
            self.all_skills().await?
        } else {
            skills.to_vec()
        };

        let mut conn = self.connect().await?;
        let mut result = BTreeMap::new();
        for skill in skills {
            let mut builder =
                QueryBuilder::<Sqlite>::new("SELECT question_text FROM question WHERE skill = ");
            builder.push_bind(skill.clone());
            if let Some(level) = level {
                builder.push(" AND level = ").push_bind(level.to_string());
            }
            if let Some(kind) = kind {
                builder.push(" AND kind = ").push_bind(kind.to_string());
            }
            builder
                .push(" ORDER BY RANDOM() LIMIT ")
                .push_bind(i64::from(per_skill));

            let rows: Vec<(String,)> = builder.build_query_as().fetch_all(&mut conn).await?;
            if !rows.is_empty() {
                result.insert(skill, rows.into_iter().map(|(text,)| text).collect());
            }
        }
        conn.close().await?;

        Ok(result)
    }

    async fn all_skills(&self) -> Result<Vec<String>, StoreError> {
        let mut conn = self.connect().await?;
        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT DISTINCT skill FROM question ORDER BY skill")
                .fetch_all(&mut conn)
                .await?;
        conn.close().await?;

        Ok(rows.into_iter().map(|(skill,)| skill).collect())
    }

    async fn skill_statistics(&self, skill: &str) -> Result<SkillStatistics, StoreError> {
        let pattern = like_pattern(skill);
        let mut conn = self.connect().await?;

        let (total,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM question WHERE skill LIKE ? ESCAPE '\\'")
            .bind(&pattern)
            .fetch_one(&mut conn)
            .await?;

        let by_level: Vec<(String, i64)> = sqlx::query_as(
            r#"
            SELECT COALESCE(level, 'intermediate') AS level, COUNT(*)
            FROM question WHERE skill LIKE ? ESCAPE '\'
            GROUP BY 1
            "#,
        )
        .bind(&pattern)
        .fetch_all(&mut conn)
        .await?;

        let by_kind: Vec<(String, i64)> = sqlx::query_as(
            r#"
            SELECT COALESCE(kind, 'general') AS kind, COUNT(*)
            FROM question WHERE skill LIKE ? ESCAPE '\'
            GROUP BY 1
            "#,
        )
        .bind(&pattern)
        .fetch_all(&mut conn)
        .await?;
        conn.close().await?;

        Ok(SkillStatistics {
            skill: skill.to_string(),
            total: total as u64,
            by_level: into_counts(by_level),
            by_kind: into_counts(by_kind),
        })
    }

    async fn count_all(&self) -> Result<u64, StoreError> {
        let mut conn = self.connect().await?;
        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM question")
            .fetch_one(&mut conn)
            .await?;
        conn.close().await?;
        Ok(total as u64)
    }

    async fn count_for_skill(&self, skill: &str) -> Result<u64, StoreError> {
        let mut conn = self.connect().await?;
        let (total,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM question WHERE skill LIKE ? ESCAPE '\\'")
            .bind(like_pattern(skill))
            .fetch_one(&mut conn)
            .await?;
        conn.close().await?;
        Ok(total as u64)
    }

    async fn search_questions(&self, term: &str, limit: u32) -> Result<Vec<SearchHit>, StoreError> {
        let pattern = like_pattern(term);
        let mut conn = self.connect().await?;
        let rows: Vec<(String, String, String, String)> = sqlx::query_as(
            r#"
            SELECT skill, question_text,
                   COALESCE(kind, 'general'), COALESCE(level, 'intermediate')
            FROM question
            WHERE question_text LIKE ? ESCAPE '\' OR skill LIKE ? ESCAPE '\'
            ORDER BY skill, question_text
            LIMIT ?
            "#,
        )
        .bind(&pattern)
        .bind(&pattern)
        .bind(i64::from(limit))
        .fetch_all(&mut conn)
        .await?;
        conn.close().await?;

        Ok(rows
            .into_iter()
            .map(|(skill, text, kind, level)| SearchHit {
                skill,
                text,
                kind,
                level,
            })
            .collect())
    }

    async fn update_question(&self, id: i64, patch: &QuestionPatch) -> Result<bool, StoreError> {
        if patch.is_empty() {
            tracing::warn!(id, "No changes to apply");
            return Ok(false);
        }

        let mut builder = QueryBuilder::<Sqlite>::new("UPDATE question SET ");
        let mut fields = builder.separated(", ");
        if let Some(text) = patch.text() {
            fields.push("question_text = ").push_bind_unseparated(text.to_string());
        }
        if let Some(level) = patch.level() {
            fields.push("level = ").push_bind_unseparated(level.to_string());
        }
        if let Some(kind) = patch.kind() {
            fields.push("kind = ").push_bind_unseparated(kind.to_string());
        }
        builder.push(" WHERE id = ").push_bind(id);

        let mut conn = self.connect().await?;
        let result = builder.build().execute(&mut conn).await?;
        conn.close().await?;

        let updated = result.rows_affected() > 0;
        if updated {
            tracing::info!(id, "Question updated");
        } else {
            tracing::warn!(id, "No question with this id");
        }
        Ok(updated)
    }

    async fn delete_question(&self, id: i64) -> Result<bool, StoreError> {
        let mut conn = self.connect().await?;
        let result = sqlx::query("DELETE FROM question WHERE id = ?")
            .bind(id)
            .execute(&mut conn)
            .await?;
        conn.close().await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            tracing::info!(id, "Question deleted");
        } else {
            tracing::warn!(id, "No question with this id");
        }
        Ok(deleted)
    }

    async fn question_by_id(&self, id: i64) -> Result<Option<Question>, StoreError> {
        let mut conn = self.connect().await?;
        let row: Option<QuestionRow> = sqlx::query_as(
            r#"
            SELECT id, skill, question_text,
                   COALESCE(kind, 'general'), COALESCE(level, 'intermediate'),
                   COALESCE(category, 'technical'), CAST(created_at AS TEXT)
            FROM question
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&mut conn)
        .await?;
        conn.close().await?;

        Ok(row.map(into_question))
    }

    async fn overall_statistics(&self) -> Result<OverallStatistics, StoreError> {
        let mut conn = self.connect().await?;

        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM question")
            .fetch_one(&mut conn)
            .await?;
        let by_level: Vec<(String, i64)> = sqlx::query_as(
            "SELECT COALESCE(level, 'intermediate') AS level, COUNT(*) FROM question GROUP BY 1",
        )
        .fetch_all(&mut conn)
        .await?;
        let by_kind: Vec<(String, i64)> = sqlx::query_as(
            "SELECT COALESCE(kind, 'general') AS kind, COUNT(*) FROM question GROUP BY 1",
        )
        .fetch_all(&mut conn)
        .await?;
        let by_category: Vec<(String, i64)> = sqlx::query_as(
            "SELECT COALESCE(category, 'technical') AS category, COUNT(*) FROM question GROUP BY 1",
        )
        .fetch_all(&mut conn)
        .await?;
        let top: Vec<(String, i64)> = sqlx::query_as(
            r#"
            SELECT skill, COUNT(*) AS total
            FROM question
            GROUP BY skill
            ORDER BY total DESC, skill
            LIMIT 5
            "#,
        )
        .fetch_all(&mut conn)
        .await?;
        conn.close().await?;

        Ok(OverallStatistics {
            total: total as u64,
            by_level: into_counts(by_level),
            by_kind: into_counts(by_kind),
            by_category: into_counts(by_category),
            top_skills: top
                .into_iter()
                .map(|(skill, total)| SkillCount {
                    skill,
                    total: total as u64,
                })
                .collect(),
            backend: self.describe(),
        })
    }

    async fn clear_all(&self) -> Result<(), StoreError> {
        let mut conn = self.connect().await?;
        let result = sqlx::query("DELETE FROM question").execute(&mut conn).await?;
        conn.close().await?;

        tracing::info!(removed = result.rows_affected(), "SQLite question store cleared");
        Ok(())
    }

    /// Dumps schema and data the way `sqlite3 .dump` does: every table's
    /// `CREATE` statement followed by one `INSERT` per row, then indexes,
    /// triggers and views, all inside a single transaction.
    async fn render_script(&self) -> Result<String, StoreError> {
        let mut conn = self.connect().await?;
        let mut out = String::from("BEGIN TRANSACTION;\n");

        let tables: Vec<(String, String)> = sqlx::query_as(
            r#"
            SELECT name, sql FROM sqlite_master
            WHERE sql NOT NULL AND type = 'table'
            ORDER BY name
            "#,
        )
        .fetch_all(&mut conn)
        .await?;

        for (name, create_sql) in &tables {
            if name == "sqlite_sequence" {
                out.push_str("DELETE FROM \"sqlite_sequence\";\n");
            } else if name.starts_with("sqlite_") {
                continue;
            } else {
                out.push_str(create_sql);
                out.push_str(";\n");
            }

            let columns: Vec<(String,)> =
                sqlx::query_as("SELECT name FROM pragma_table_info(?) ORDER BY cid")
                    .bind(name)
                    .fetch_all(&mut conn)
                    .await?;
            if columns.is_empty() {
                continue;
            }

            let values = columns
                .iter()
                .map(|(column,)| format!("quote({})", quote_ident(column)))
                .collect::<Vec<_>>()
                .join(" || ',' || ");
            let prefix = quote_literal(Some(&format!("INSERT INTO {} VALUES(", quote_ident(name))));
            let select = format!(
                "SELECT {prefix} || {values} || ')' FROM {}",
                quote_ident(name)
            );

            let rows: Vec<(String,)> = sqlx::query_as(&select).fetch_all(&mut conn).await?;
            for (insert,) in rows {
                out.push_str(&insert);
                out.push_str(";\n");
            }
        }

        let others: Vec<(String,)> = sqlx::query_as(
            r#"
            SELECT sql FROM sqlite_master
            WHERE sql NOT NULL AND type IN ('index', 'trigger', 'view')
            "#,
        )
        .fetch_all(&mut conn)
        .await?;
        conn.close().await?;

        for (sql,) in others {
            out.push_str(&sql);
            out.push_str(";\n");
        }
        out.push_str("COMMIT;\n");

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn test_store() -> (TempDir, SqliteStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteStore::new(dir.path().join("questions.db"));
        store.initialize().await.unwrap();
        (dir, store)
    }

    async fn seed(store: &SqliteStore) {
        let rows = [
            ("JavaScript", "Explain the concept of closures in JavaScript", "conceptual", "intermediate"),
            ("JavaScript", "What is a closure-based module pattern?", "practical", "advanced"),
            ("JavaScript", "What is the DOM?", "practical", "basic"),
            ("Python", "What are Python decorators?", "practical", "intermediate"),
            ("Python", "How does the GIL work?", "practical", "advanced"),
            ("Docker", "What problem does Docker solve?", "practical", "basic"),
        ];
        for (skill, text, kind, level) in rows {
            let q = NewQuestion::new(skill, text).with_kind(kind).with_level(level);
            assert!(store.add_question(&q).await.unwrap());
        }
    }

    #[tokio::test]
    async fn test_initialize_is_idempotent() {
        let (_dir, store) = test_store().await;
        store.initialize().await.unwrap();
        store.initialize().await.unwrap();
        assert_eq!(store.count_all().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_initialize_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("q.db");
        let store = SqliteStore::new(&path);
        store.initialize().await.unwrap();
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_add_then_get_roundtrip() {
        let (_dir, store) = test_store().await;
        let q = NewQuestion::new("Rust", "What is a lifetime?")
            .with_kind("conceptual")
            .with_level("advanced")
            .with_category("systems");
        assert!(store.add_question(&q).await.unwrap());

        let loaded = store.question_by_id(1).await.unwrap().unwrap();
        assert_eq!(loaded.id, 1);
        assert_eq!(loaded.skill, "Rust");
        assert_eq!(loaded.text, "What is a lifetime?");
        assert_eq!(loaded.kind, "conceptual");
        assert_eq!(loaded.level, "advanced");
        assert_eq!(loaded.category, "systems");
        assert!(loaded.created_at.is_some());
    }

    #[tokio::test]
    async fn test_duplicates_are_accepted() {
        let (_dir, store) = test_store().await;
        let q = NewQuestion::new("Git", "What is a rebase?");
        assert!(store.add_question(&q).await.unwrap());
        assert!(store.add_question(&q).await.unwrap());
        assert_eq!(store.count_all().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_ids_increase() {
        let (_dir, store) = test_store().await;
        seed(&store).await;
        let first = store.question_by_id(1).await.unwrap().unwrap();
        let last = store.question_by_id(6).await.unwrap().unwrap();
        assert!(first.id < last.id);
    }

    #[tokio::test]
    async fn test_questions_for_skill_respects_count_and_match() {
        let (_dir, store) = test_store().await;
        seed(&store).await;

        let picked = store.questions_for_skill("javascript", 2, None).await.unwrap();
        assert_eq!(picked.len(), 2);
        let js = [
            "Explain the concept of closures in JavaScript",
            "What is a closure-based module pattern?",
            "What is the DOM?",
        ];
        assert!(picked.iter().all(|t| js.contains(&t.as_str())));

        let picked = store.questions_for_skill("script", 10, None).await.unwrap();
        assert_eq!(picked.len(), 3);

        let picked = store
            .questions_for_skill("Python", 5, Some("advanced"))
            .await
            .unwrap();
        assert_eq!(picked, vec!["How does the GIL work?".to_string()]);

        let picked = store.questions_for_skill("Haskell", 5, None).await.unwrap();
        assert!(picked.is_empty());
    }

    #[tokio::test]
    async fn test_questions_by_criteria() {
        let (_dir, store) = test_store().await;
        seed(&store).await;

        let all = store.questions_by_criteria(&[], None, None, 10).await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all["JavaScript"].len(), 3);

        let basic = store
            .questions_by_criteria(&[], Some("basic"), None, 10)
            .await
            .unwrap();
        assert_eq!(basic.keys().collect::<Vec<_>>(), vec!["Docker", "JavaScript"]);

        let exact = store
            .questions_by_criteria(&["Java".to_string()], None, None, 10)
            .await
            .unwrap();
        assert!(exact.is_empty());

        let conceptual = store
            .questions_by_criteria(&["JavaScript".to_string()], None, Some("conceptual"), 10)
            .await
            .unwrap();
        assert_eq!(conceptual["JavaScript"].len(), 1);
    }

    #[tokio::test]
    async fn test_all_skills_sorted_and_distinct() {
        let (_dir, store) = test_store().await;
        seed(&store).await;
        assert_eq!(
            store.all_skills().await.unwrap(),
            vec!["Docker", "JavaScript", "Python"]
        );
    }

    #[tokio::test]
    async fn test_skill_statistics() {
        let (_dir, store) = test_store().await;
        seed(&store).await;
        let stats = store.skill_statistics("JavaScript").await.unwrap();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.by_level["basic"], 1);
        assert_eq!(stats.by_level["intermediate"], 1);
        assert_eq!(stats.by_level["advanced"], 1);
        assert_eq!(stats.by_kind["conceptual"], 1);
        assert_eq!(stats.by_kind["practical"], 2);

        let empty = store.skill_statistics("Cobol").await.unwrap();
        assert_eq!(empty.total, 0);
        assert!(empty.by_level.is_empty());
    }

    #[tokio::test]
    async fn test_counts() {
        let (_dir, store) = test_store().await;
        seed(&store).await;
        assert_eq!(store.count_all().await.unwrap(), 6);
        assert_eq!(store.count_for_skill("python").await.unwrap(), 2);
        assert_eq!(store.count_for_skill("o").await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_search_matches_text_or_skill_in_order() {
        let (_dir, store) = test_store().await;
        seed(&store).await;

        let hits = store.search_questions("CLOSURE", 5).await.unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].text, "Explain the concept of closures in JavaScript");
        assert_eq!(hits[1].text, "What is a closure-based module pattern?");
        assert!(hits.iter().all(|h| h.skill == "JavaScript"));

        let hits = store.search_questions("python", 10).await.unwrap();
        assert_eq!(hits.len(), 2);

        let hits = store.search_questions("what", 2).await.unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].skill, "Docker");
    }

    #[tokio::test]
    async fn test_wildcards_in_terms_match_literally() {
        let (_dir, store) = test_store().await;
        for text in [
            "What is 100% test coverage?",
            "What is 1000 test coverage?",
            "What is a rebase?",
        ] {
            store
                .add_question(&NewQuestion::new("Testing", text))
                .await
                .unwrap();
        }
        store
            .add_question(&NewQuestion::new("snake_case", "Why use underscores?"))
            .await
            .unwrap();

        let hits = store.search_questions("100%", 10).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].text, "What is 100% test coverage?");

        let hits = store.search_questions("_", 10).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].skill, "snake_case");

        assert_eq!(store.count_for_skill("_").await.unwrap(), 1);
        assert_eq!(store.count_for_skill("%").await.unwrap(), 0);
        assert_eq!(store.skill_statistics("%").await.unwrap().total, 0);
        assert!(store
            .questions_for_skill("Test_ng", 5, None)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_update_changes_only_given_fields() {
        let (_dir, store) = test_store().await;
        seed(&store).await;
        let before = store.question_by_id(4).await.unwrap().unwrap();

        let patch = QuestionPatch {
            level: Some("advanced".to_string()),
            ..Default::default()
        };
        assert!(store.update_question(4, &patch).await.unwrap());

        let after = store.question_by_id(4).await.unwrap().unwrap();
        assert_eq!(after.level, "advanced");
        assert_eq!(after.text, before.text);
        assert_eq!(after.kind, before.kind);
        assert_eq!(after.skill, before.skill);
    }

    #[tokio::test]
    async fn test_update_all_fields() {
        let (_dir, store) = test_store().await;
        seed(&store).await;
        let patch = QuestionPatch {
            text: Some("What's new?".to_string()),
            level: Some("basic".to_string()),
            kind: Some("conceptual".to_string()),
        };
        assert!(store.update_question(1, &patch).await.unwrap());
        let q = store.question_by_id(1).await.unwrap().unwrap();
        assert_eq!(q.text, "What's new?");
        assert_eq!(q.level, "basic");
        assert_eq!(q.kind, "conceptual");
    }

    #[tokio::test]
    async fn test_update_noop_and_missing() {
        let (_dir, store) = test_store().await;
        seed(&store).await;
        assert!(!store.update_question(1, &QuestionPatch::default()).await.unwrap());

        let patch = QuestionPatch {
            kind: Some("practical".to_string()),
            ..Default::default()
        };
        assert!(!store.update_question(999, &patch).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete() {
        let (_dir, store) = test_store().await;
        seed(&store).await;
        assert!(store.delete_question(2).await.unwrap());
        assert_eq!(store.question_by_id(2).await.unwrap(), None);
        assert!(!store.delete_question(2).await.unwrap());
        assert_eq!(store.count_all().await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_overall_statistics() {
        let (_dir, store) = test_store().await;
        seed(&store).await;
        let stats = store.overall_statistics().await.unwrap();
        assert_eq!(stats.total, 6);
        assert_eq!(stats.by_level["basic"], 2);
        assert_eq!(stats.by_kind["practical"], 5);
        assert_eq!(stats.by_category["technical"], 6);
        assert_eq!(stats.top_skills[0].skill, "JavaScript");
        assert_eq!(stats.top_skills[0].total, 3);
        assert_eq!(stats.top_skills.len(), 3);
        assert!(stats.backend.starts_with("SQLITE"));
    }

    #[tokio::test]
    async fn test_summary() {
        let (_dir, store) = test_store().await;
        seed(&store).await;
        let summary = store.summary().await.unwrap();
        assert_eq!(summary.total_questions, 6);
        assert_eq!(summary.total_skills, 3);
        assert_eq!(summary.statistics["Python"].total, 2);
    }

    #[tokio::test]
    async fn test_clear_all() {
        let (_dir, store) = test_store().await;
        seed(&store).await;
        store.clear_all().await.unwrap();
        assert_eq!(store.count_all().await.unwrap(), 0);
        assert!(store.all_skills().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_test_connection_reports_version() {
        let (_dir, store) = test_store().await;
        let version = store.test_connection().await.unwrap();
        assert!(version.starts_with("SQLite 3."));
    }

    #[tokio::test]
    async fn test_script_recreates_database() {
        let (dir, store) = test_store().await;
        seed(&store).await;
        store
            .add_question(&NewQuestion::new("SQL", "What's a JOIN?"))
            .await
            .unwrap();

        let script_path = dir.path().join("backup.sql");
        store.export_as_script(&script_path).await.unwrap();
        let script = std::fs::read_to_string(&script_path).unwrap();
        assert!(script.starts_with("BEGIN TRANSACTION;\n"));
        assert!(script.trim_end().ends_with("COMMIT;"));
        assert!(script.contains("CREATE TABLE question"));
        assert!(script.contains("CREATE INDEX idx_question_skill"));
        assert!(script.contains("'What''s a JOIN?'"));
        assert!(script.contains("DELETE FROM \"sqlite_sequence\";"));

        let restored = SqliteStore::new(dir.path().join("restored.db"));
        let mut conn = restored.connect().await.unwrap();
        sqlx::raw_sql(&script).execute(&mut conn).await.unwrap();
        conn.close().await.unwrap();

        assert_eq!(restored.count_all().await.unwrap(), 7);
        assert_eq!(
            restored.question_by_id(7).await.unwrap().unwrap().text,
            "What's a JOIN?"
        );
        assert_eq!(
            restored.all_skills().await.unwrap(),
            store.all_skills().await.unwrap()
        );
    }

    #[tokio::test]
    async fn test_connect_existing_rejects_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = connect_existing(&dir.path().join("absent.db")).await.unwrap_err();
        assert!(matches!(err, StoreError::SourceMissing(_)));
    }
}
