//! PostgreSQL implementation of [`QuestionStore`].
//!
//! Unlike the SQLite backend, the table carries a `unique_question`
//! constraint on (skill, question_text) and inserts skip conflicting rows.
//! Text ordering uses `COLLATE "C"` so results come back in byte order, the
//! same order SQLite's default collation produces.

use std::collections::BTreeMap;
use std::fmt;

use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::{ConnectOptions, Connection, Postgres, QueryBuilder};

use crate::config::PostgresConfig;
use crate::error::StoreError;
use crate::model::{
    into_counts, like_pattern, NewQuestion, OverallStatistics, Question, QuestionPatch,
    SearchHit, SkillCount, SkillStatistics,
};
use crate::sql::quote_literal;
use crate::traits::QuestionStore;

const BACKEND: &str = "postgresql";

const SCHEMA: [&str; 5] = [
    r#"
    CREATE TABLE IF NOT EXISTS question (
        id BIGSERIAL PRIMARY KEY,
        skill VARCHAR(100) NOT NULL,
        question_text TEXT NOT NULL,
        kind VARCHAR(50) DEFAULT 'general',
        level VARCHAR(20) DEFAULT 'intermediate',
        category VARCHAR(50) DEFAULT 'technical',
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
        CONSTRAINT unique_question UNIQUE (skill, question_text)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_question_skill ON question(skill)",
    "CREATE INDEX IF NOT EXISTS idx_question_kind_level ON question(kind, level)",
    "CREATE INDEX IF NOT EXISTS idx_question_level ON question(level)",
    "CREATE INDEX IF NOT EXISTS idx_question_text_search ON question USING gin(to_tsvector('english', question_text))",
];

type QuestionRow = (i64, String, String, String, String, String, Option<String>);

/// PostgreSQL-backed question store. Holds connection options only; each
/// operation opens and closes its own connection.
#[derive(Clone)]
pub struct PostgresStore {
    options: PgConnectOptions,
    label: String,
}

impl PostgresStore {
    pub fn new(config: &PostgresConfig) -> Self {
        let options = PgConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .database(&config.database)
            .username(&config.user)
            .password(&config.password);
        Self {
            options,
            label: format!("{}:{}/{}", config.host, config.port, config.database),
        }
    }

    /// Build from a `postgresql://` URL.
    pub fn from_url(url: &str) -> Result<Self, StoreError> {
        let options: PgConnectOptions = url.parse().map_err(StoreError::connection(BACKEND))?;
        let label = format!(
            "{}:{}/{}",
            options.get_host(),
            options.get_port(),
            options.get_database().unwrap_or("postgres")
        );
        Ok(Self { options, label })
    }

    async fn connect(&self) -> Result<PgConnection, StoreError> {
        self.options
            .connect()
            .await
            .map_err(StoreError::connection(BACKEND))
    }
}

impl fmt::Debug for PostgresStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgresStore")
            .field("target", &self.label)
            .finish()
    }
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

impl QuestionStore for PostgresStore {
    fn describe(&self) -> String {
        format!("POSTGRESQL ({})", self.label)
    }

    async fn initialize(&self) -> Result<(), StoreError> {
        let mut conn = self.connect().await?;
        for statement in SCHEMA {
            sqlx::query(statement).execute(&mut conn).await?;
        }
        conn.close().await?;

        tracing::info!(target_db = %self.label, "PostgreSQL question store ready");
        Ok(())
    }

    async fn test_connection(&self) -> Result<String, StoreError> {
        let mut conn = self.connect().await?;
        let (version,): (String,) = sqlx::query_as("SELECT version()")
            .fetch_one(&mut conn)
            .await?;
        conn.close().await?;
        Ok(version)
    }

    async fn add_question(&self, question: &NewQuestion) -> Result<bool, StoreError> {
        let mut conn = self.connect().await?;
        let result = sqlx::query(
            r#"
            INSERT INTO question (skill, question_text, kind, level, category)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (skill, question_text) DO NOTHING
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

        let inserted = result.rows_affected() > 0;
        if !inserted {
            tracing::debug!(skill = %question.skill, "Duplicate question skipped");
        }
        Ok(inserted)
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
                    WHERE skill ILIKE $1 ESCAPE '\' AND level = $2
                    ORDER BY RANDOM() LIMIT $3
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
                    WHERE skill ILIKE $1 ESCAPE '\'
                    ORDER BY RANDOM() LIMIT $2
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
                QueryBuilder::<Postgres>::new("SELECT question_text FROM question WHERE skill = ");
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
        let rows: Vec<(String,)> = sqlx::query_as(
            r#"SELECT skill FROM question GROUP BY skill ORDER BY skill COLLATE "C""#,
        )
        .fetch_all(&mut conn)
        .await?;
        conn.close().await?;

        Ok(rows.into_iter().map(|(skill,)| skill).collect())
    }

    async fn skill_statistics(&self, skill: &str) -> Result<SkillStatistics, StoreError> {
        let pattern = like_pattern(skill);
        let mut conn = self.connect().await?;

        let (total,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM question WHERE skill ILIKE $1 ESCAPE '\\'")
                .bind(&pattern)
                .fetch_one(&mut conn)
                .await?;

        let by_level: Vec<(String, i64)> = sqlx::query_as(
            r#"
            SELECT COALESCE(level, 'intermediate')::TEXT, COUNT(*)
            FROM question WHERE skill ILIKE $1 ESCAPE '\'
            GROUP BY 1
            "#,
        )
        .bind(&pattern)
        .fetch_all(&mut conn)
        .await?;

        let by_kind: Vec<(String, i64)> = sqlx::query_as(
            r#"
            SELECT COALESCE(kind, 'general')::TEXT, COUNT(*)
            FROM question WHERE skill ILIKE $1 ESCAPE '\'
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
            sqlx::query_as("SELECT COUNT(*) FROM question WHERE skill ILIKE $1 ESCAPE '\\'")
                .bind(like_pattern(skill))
                .fetch_one(&mut conn)
                .await?;
        conn.close().await?;
        Ok(total as u64)
    }

    async fn search_questions(&self, term: &str, limit: u32) -> Result<Vec<SearchHit>, StoreError> {
        let mut conn = self.connect().await?;
        let rows: Vec<(String, String, String, String)> = sqlx::query_as(
            r#"
            SELECT skill::TEXT, question_text,
                   COALESCE(kind, 'general')::TEXT, COALESCE(level, 'intermediate')::TEXT
            FROM question
            WHERE question_text ILIKE $1 ESCAPE '\' OR skill ILIKE $1 ESCAPE '\'
            ORDER BY skill COLLATE "C", question_text COLLATE "C"
            LIMIT $2
            "#,
        )
        .bind(like_pattern(term))
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

        let mut builder = QueryBuilder::<Postgres>::new("UPDATE question SET ");
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
        let result = sqlx::query("DELETE FROM question WHERE id = $1")
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
            SELECT id, skill::TEXT, question_text,
                   COALESCE(kind, 'general')::TEXT, COALESCE(level, 'intermediate')::TEXT,
                   COALESCE(category, 'technical')::TEXT, created_at::TEXT
            FROM question
            WHERE id = $1
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
            "SELECT COALESCE(level, 'intermediate')::TEXT, COUNT(*) FROM question GROUP BY 1",
        )
        .fetch_all(&mut conn)
        .await?;
        let by_kind: Vec<(String, i64)> = sqlx::query_as(
            "SELECT COALESCE(kind, 'general')::TEXT, COUNT(*) FROM question GROUP BY 1",
        )
        .fetch_all(&mut conn)
        .await?;
        let by_category: Vec<(String, i64)> = sqlx::query_as(
            "SELECT COALESCE(category, 'technical')::TEXT, COUNT(*) FROM question GROUP BY 1",
        )
        .fetch_all(&mut conn)
        .await?;
        let top: Vec<(String, i64)> = sqlx::query_as(
            r#"
            SELECT skill::TEXT, COUNT(*) AS total
            FROM question
            GROUP BY skill
            ORDER BY total DESC, skill COLLATE "C"
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
        sqlx::query("TRUNCATE TABLE question RESTART IDENTITY")
            .execute(&mut conn)
            .await?;
        conn.close().await?;

        tracing::info!(target_db = %self.label, "PostgreSQL question store cleared");
        Ok(())
    }

    /// Data-only backup: one literal `INSERT` per row, including the original
    /// `created_at`. The schema is expected to exist on the restore target.
    async fn render_script(&self) -> Result<String, StoreError> {
        let mut conn = self.connect().await?;
        let rows: Vec<(String, String, String, String, String, Option<String>)> = sqlx::query_as(
            r#"
            SELECT skill::TEXT, question_text,
                   COALESCE(kind, 'general')::TEXT, COALESCE(level, 'intermediate')::TEXT,
                   COALESCE(category, 'technical')::TEXT, created_at::TEXT
            FROM question
            ORDER BY id
            "#,
        )
        .fetch_all(&mut conn)
        .await?;
        conn.close().await?;

        let mut out = String::new();
        out.push_str("-- PostgreSQL backup of table question\n");
        out.push_str(&format!(
            "-- Generated: {}\n",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        ));
        out.push_str(&format!("-- Source: {}\n", self.label));
        out.push_str(&format!("-- Rows: {}\n\n", rows.len()));

        for (skill, text, kind, level, category, created_at) in &rows {
            out.push_str(&format!(
                "INSERT INTO question (skill, question_text, kind, level, category, created_at) VALUES ({}, {}, {}, {}, {}, {});\n",
                quote_literal(Some(skill)),
                quote_literal(Some(text)),
                quote_literal(Some(kind)),
                quote_literal(Some(level)),
                quote_literal(Some(category)),
                quote_literal(created_at.as_deref()),
            ));
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Connects to the database named by `INTERVIEW_TEST_POSTGRES_URL`, or
    /// returns `None` so the test is skipped.
    async fn test_store() -> Option<PostgresStore> {
        let url = std::env::var("INTERVIEW_TEST_POSTGRES_URL").ok()?;
        let store = PostgresStore::from_url(&url).unwrap();
        store.initialize().await.unwrap();
        store.clear_all().await.unwrap();
        Some(store)
    }

    #[test]
    fn test_describe_and_debug_hide_password() {
        let config = PostgresConfig {
            host: "db.local".to_string(),
            port: 5433,
            database: "questions".to_string(),
            user: "app".to_string(),
            password: "hunter2".to_string(),
        };
        let store = PostgresStore::new(&config);
        assert_eq!(store.describe(), "POSTGRESQL (db.local:5433/questions)");
        assert!(!format!("{store:?}").contains("hunter2"));
    }

    #[test]
    fn test_from_url_label() {
        let store = PostgresStore::from_url("postgresql://u:p@example.org:6000/qs").unwrap();
        assert_eq!(store.describe(), "POSTGRESQL (example.org:6000/qs)");
    }

    #[test]
    fn test_from_url_rejects_garbage() {
        assert!(PostgresStore::from_url("not a url").is_err());
    }

    // Every live assertion lives in one test so runs never race on the table.
    #[tokio::test]
    async fn test_live_roundtrip() {
        let Some(store) = test_store().await else {
            return;
        };

        let q = NewQuestion::new("Python", "What's a generator?")
            .with_kind("practical")
            .with_level("basic");
        assert!(store.add_question(&q).await.unwrap());
        // Conflicting (skill, text) is skipped, not an error.
        assert!(!store.add_question(&q).await.unwrap());
        assert_eq!(store.count_all().await.unwrap(), 1);

        store
            .add_question(&NewQuestion::new("JavaScript", "Explain the concept of closures in JavaScript").with_kind("conceptual"))
            .await
            .unwrap();
        store
            .add_question(&NewQuestion::new("AWS", "What is S3?").with_level("basic"))
            .await
            .unwrap();

        assert_eq!(
            store.all_skills().await.unwrap(),
            vec!["AWS", "JavaScript", "Python"]
        );

        let loaded = store.question_by_id(1).await.unwrap().unwrap();
        assert_eq!(loaded.text, "What's a generator?");
        assert_eq!(loaded.level, "basic");
        assert!(loaded.created_at.is_some());

        let hits = store.search_questions("CLOSURE", 5).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].kind, "conceptual");
        // Wildcards in the term are literal.
        assert!(store.search_questions("_", 5).await.unwrap().is_empty());
        assert_eq!(store.count_for_skill("%").await.unwrap(), 0);

        let patch = QuestionPatch {
            level: Some("advanced".to_string()),
            ..Default::default()
        };
        assert!(store.update_question(1, &patch).await.unwrap());
        let after = store.question_by_id(1).await.unwrap().unwrap();
        assert_eq!(after.level, "advanced");
        assert_eq!(after.text, loaded.text);

        let stats = store.skill_statistics("python").await.unwrap();
        assert_eq!(stats.total, 1);
        assert_eq!(stats.by_level["advanced"], 1);

        let script = store.render_script().await.unwrap();
        assert!(script.contains("'What''s a generator?'"));
        assert_eq!(script.matches("INSERT INTO question").count(), 3);

        assert!(store.delete_question(1).await.unwrap());
        assert_eq!(store.question_by_id(1).await.unwrap(), None);

        store.clear_all().await.unwrap();
        store
            .add_question(&NewQuestion::new("Git", "What is a commit?"))
            .await
            .unwrap();
        // Identity restarts after a clear.
        assert!(store.question_by_id(1).await.unwrap().is_some());
        store.clear_all().await.unwrap();
    }
}
