//! Runtime backend selection.

use std::collections::BTreeMap;

use crate::config::{AppConfig, BackendKind};
use crate::error::StoreError;
use crate::model::{
    NewQuestion, OverallStatistics, Question, QuestionPatch, SearchHit, SkillStatistics,
};
use crate::postgres::PostgresStore;
use crate::sqlite::SqliteStore;
use crate::traits::QuestionStore;

/// Either backend, chosen once from [`AppConfig`].
#[derive(Debug, Clone)]
pub enum AnyStore {
    Sqlite(SqliteStore),
    Postgres(PostgresStore),
}

macro_rules! dispatch {
    ($self:ident, $store:ident => $call:expr) => {
        match $self {
            AnyStore::Sqlite($store) => $call,
            AnyStore::Postgres($store) => $call,
        }
    };
}

impl AnyStore {
    pub fn from_config(config: &AppConfig) -> Self {
        match config.backend {
            BackendKind::Sqlite => AnyStore::Sqlite(SqliteStore::new(&config.sqlite_path)),
            BackendKind::Postgres => AnyStore::Postgres(PostgresStore::new(&config.postgres)),
        }
    }

    pub fn kind(&self) -> BackendKind {
        match self {
            AnyStore::Sqlite(_) => BackendKind::Sqlite,
            AnyStore::Postgres(_) => BackendKind::Postgres,
        }
    }
}

impl QuestionStore for AnyStore {
    fn describe(&self) -> String {
        dispatch!(self, s => s.describe())
    }

    async fn initialize(&self) -> Result<(), StoreError> {
        dispatch!(self, s => s.initialize().await)
    }

    async fn test_connection(&self) -> Result<String, StoreError> {
        dispatch!(self, s => s.test_connection().await)
    }

    async fn add_question(&self, question: &NewQuestion) -> Result<bool, StoreError> {
        dispatch!(self, s => s.add_question(question).await)
    }

    async fn questions_for_skill(
        &self,
        skill: &str,
        count: u32,
        level: Option<&str>,
    ) -> Result<Vec<String>, StoreError> {
        dispatch!(self, s => s.questions_for_skill(skill, count, level).await)
    }

    async fn questions_by_criteria(
        &self,
        skills: &[String],
        level: Option<&str>,
        kind: Option<&str>,
        per_skill: u32,
    ) -> Result<BTreeMap<String, Vec<String>>, StoreError> {
        dispatch!(self, s => s.questions_by_criteria(skills, level, kind, per_skill).await)
    }

    async fn all_skills(&self) -> Result<Vec<String>, StoreError> {
        dispatch!(self, s => s.all_skills().await)
    }

    async fn skill_statistics(&self, skill: &str) -> Result<SkillStatistics, StoreError> {
        dispatch!(self, s => s.skill_statistics(skill).await)
    }

    async fn count_all(&self) -> Result<u64, StoreError> {
        dispatch!(self, s => s.count_all().await)
    }

    async fn count_for_skill(&self, skill: &str) -> Result<u64, StoreError> {
        dispatch!(self, s => s.count_for_skill(skill).await)
    }

    async fn search_questions(&self, term: &str, limit: u32) -> Result<Vec<SearchHit>, StoreError> {
        dispatch!(self, s => s.search_questions(term, limit).await)
    }

    async fn update_question(&self, id: i64, patch: &QuestionPatch) -> Result<bool, StoreError> {
        dispatch!(self, s => s.update_question(id, patch).await)
    }

    async fn delete_question(&self, id: i64) -> Result<bool, StoreError> {
        dispatch!(self, s => s.delete_question(id).await)
    }

    async fn question_by_id(&self, id: i64) -> Result<Option<Question>, StoreError> {
        dispatch!(self, s => s.question_by_id(id).await)
    }

    async fn overall_statistics(&self) -> Result<OverallStatistics, StoreError> {
        dispatch!(self, s => s.overall_statistics().await)
    }

    async fn clear_all(&self) -> Result<(), StoreError> {
        dispatch!(self, s => s.clear_all().await)
    }

    async fn render_script(&self) -> Result<String, StoreError> {
        dispatch!(self, s => s.render_script().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_from_config_picks_backend() {
        let sqlite = AppConfig::from_lookup(|_| None);
        assert_eq!(AnyStore::from_config(&sqlite).kind(), BackendKind::Sqlite);

        let vars = HashMap::from([("INTERVIEW_DATABASE_TYPE", "postgresql")]);
        let pg = AppConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        let store = AnyStore::from_config(&pg);
        assert_eq!(store.kind(), BackendKind::Postgres);
        assert_eq!(store.describe(), "POSTGRESQL (localhost:5432/interview_questions)");
    }

    #[tokio::test]
    async fn test_sqlite_variant_delegates() {
        let dir = tempfile::tempdir().unwrap();
        let store = AnyStore::Sqlite(SqliteStore::new(dir.path().join("any.db")));
        store.initialize().await.unwrap();
        store
            .add_question(&NewQuestion::new("CSS", "What is the box model?"))
            .await
            .unwrap();
        assert_eq!(store.count_all().await.unwrap(), 1);
        assert!(store.describe().starts_with("SQLITE"));
    }
}
