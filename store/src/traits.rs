//! The [`QuestionStore`] contract.
//!
//! Both backends implement the same operations; the differences between them
//! (placeholder syntax, case-insensitive match operator, identity reset on
//! clear, uniqueness enforcement) stay inside the implementations.
//!
//! Methods return `impl Future + Send` rather than using `async fn` so that
//! the futures are guaranteed `Send`, which axum handlers and `tokio::spawn`
//! require.

use std::collections::BTreeMap;
use std::future::Future;
use std::path::Path;

use crate::error::StoreError;
use crate::model::{
    NewQuestion, OverallStatistics, Question, QuestionPatch, SearchHit, SkillStatistics,
    StoreSummary,
};

/// Persistence for interview questions.
pub trait QuestionStore: Send + Sync {
    /// Human-readable backend description, e.g. `SQLITE (questions.db)`.
    fn describe(&self) -> String;

    /// Create the table and its indexes if they do not exist yet.
    fn initialize(&self) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Run the backend's version query.
    fn test_connection(&self) -> impl Future<Output = Result<String, StoreError>> + Send;

    /// Insert one question. Returns `true` when a row was written and `false`
    /// when the backend skipped it as a duplicate (PostgreSQL only).
    fn add_question(
        &self,
        question: &NewQuestion,
    ) -> impl Future<Output = Result<bool, StoreError>> + Send;

    /// Random sample of at most `count` question texts whose skill contains
    /// `skill` (case-insensitive), optionally restricted to one level.
    fn questions_for_skill(
        &self,
        skill: &str,
        count: u32,
        level: Option<&str>,
    ) -> impl Future<Output = Result<Vec<String>, StoreError>> + Send;

    /// For each skill (every stored skill when `skills` is empty), a random
    /// sample of at most `per_skill` texts matching the skill name exactly and
    /// the optional level and kind. Skills without matches are left out.
    fn questions_by_criteria(
        &self,
        skills: &[String],
        level: Option<&str>,
        kind: Option<&str>,
        per_skill: u32,
    ) -> impl Future<Output = Result<BTreeMap<String, Vec<String>>, StoreError>> + Send;

    /// Distinct skill names in byte order.
    fn all_skills(&self) -> impl Future<Output = Result<Vec<String>, StoreError>> + Send;

    /// Totals by level and kind for skills containing `skill`.
    fn skill_statistics(
        &self,
        skill: &str,
    ) -> impl Future<Output = Result<SkillStatistics, StoreError>> + Send;

    fn count_all(&self) -> impl Future<Output = Result<u64, StoreError>> + Send;

    /// Number of rows whose skill contains `skill` (case-insensitive).
    fn count_for_skill(
        &self,
        skill: &str,
    ) -> impl Future<Output = Result<u64, StoreError>> + Send;

    /// Rows whose skill or text contains `term`, ordered by skill then text.
    fn search_questions(
        &self,
        term: &str,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<SearchHit>, StoreError>> + Send;

    /// Apply a partial update. `false` when the patch is empty or no row has
    /// this id.
    fn update_question(
        &self,
        id: i64,
        patch: &QuestionPatch,
    ) -> impl Future<Output = Result<bool, StoreError>> + Send;

    /// `false` when no row has this id.
    fn delete_question(&self, id: i64) -> impl Future<Output = Result<bool, StoreError>> + Send;

    fn question_by_id(
        &self,
        id: i64,
    ) -> impl Future<Output = Result<Option<Question>, StoreError>> + Send;

    fn overall_statistics(
        &self,
    ) -> impl Future<Output = Result<OverallStatistics, StoreError>> + Send;

    /// Delete every row. PostgreSQL also restarts the id sequence.
    fn clear_all(&self) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Render the backup script that [`export_as_script`](Self::export_as_script)
    /// writes.
    fn render_script(&self) -> impl Future<Output = Result<String, StoreError>> + Send;

    /// Write the backup script to `path`.
    fn export_as_script(
        &self,
        path: &Path,
    ) -> impl Future<Output = Result<(), StoreError>> + Send {
        async move {
            let script = self.render_script().await?;
            tokio::fs::write(path, script).await?;
            tracing::info!(path = %path.display(), backend = %self.describe(), "Exported database script");
            Ok(())
        }
    }

    /// Total count, skill list, and per-skill statistics in one value.
    fn summary(&self) -> impl Future<Output = Result<StoreSummary, StoreError>> + Send {
        async move {
            let total_questions = self.count_all().await?;
            let skills = self.all_skills().await?;
            let mut statistics = BTreeMap::new();
            for skill in &skills {
                statistics.insert(skill.clone(), self.skill_statistics(skill).await?);
            }
            Ok(StoreSummary {
                total_questions,
                total_skills: skills.len(),
                skills,
                statistics,
                backend: self.describe(),
            })
        }
    }
}
