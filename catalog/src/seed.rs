//! Loading catalog questions into a store.

use interview_store::{NewQuestion, QuestionStore, DEFAULT_KIND};
use serde::Serialize;
use tracing::{error, info};

use crate::catalog::{Catalog, SkillMap};
use crate::error::CatalogError;

/// What a load did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// The store already held rows and the load was not forced.
    pub skipped: bool,
    pub attempted: u64,
    /// Rows actually written. Lower than `attempted` when PostgreSQL skips
    /// duplicates.
    pub inserted: u64,
    /// Inserts that returned an error. They are logged and counted, the load
    /// continues with the next question.
    pub failed: u64,
}

impl LoadReport {
    /// Every insert attempt nominally succeeded. A skipped duplicate counts
    /// as success.
    pub fn succeeded(&self) -> bool {
        self.failed == 0
    }
}

/// Loads the catalog into `store`.
///
/// A store that already holds rows is left alone unless `force` is set, in
/// which case it is cleared first.
pub async fn load_initial<S: QuestionStore>(
    store: &S,
    catalog: &Catalog,
    force: bool,
) -> Result<LoadReport, CatalogError> {
    let existing = store.count_all().await?;
    if existing > 0 && !force {
        info!(existing, "Store already contains questions, skipping initial load");
        return Ok(LoadReport {
            skipped: true,
            ..LoadReport::default()
        });
    }

    if force {
        info!(backend = %store.describe(), "Forcing reload, clearing store");
        store.clear_all().await?;
    }

    info!(
        skills = catalog.skills().len(),
        questions = catalog.total_questions(),
        "Loading initial questions"
    );
    let report = insert_all(store, catalog.questions()).await;
    info!(
        attempted = report.attempted,
        inserted = report.inserted,
        failed = report.failed,
        "Initial load completed"
    );
    Ok(report)
}

/// Inserts every question of `skills` with the default kind. Used for bulk
/// imports, which carry no kind information.
pub async fn import_questions<S: QuestionStore>(store: &S, skills: &SkillMap) -> LoadReport {
    let questions: Vec<NewQuestion> = skills
        .iter()
        .flat_map(|(skill, levels)| {
            levels.iter().flat_map(move |(level, texts)| {
                texts.iter().map(move |text| {
                    NewQuestion::new(skill.as_str(), text.as_str())
                        .with_kind(DEFAULT_KIND)
                        .with_level(level.as_str())
                })
            })
        })
        .collect();

    let report = insert_all(store, questions).await;
    info!(
        attempted = report.attempted,
        inserted = report.inserted,
        failed = report.failed,
        "Bulk import completed"
    );
    report
}

async fn insert_all<S, I>(store: &S, questions: I) -> LoadReport
where
    S: QuestionStore,
    I: IntoIterator<Item = NewQuestion>,
{
    let mut report = LoadReport::default();
    for question in questions {
        report.attempted += 1;
        match store.add_question(&question).await {
            Ok(true) => report.inserted += 1,
            Ok(false) => {}
            Err(e) => {
                error!(skill = %question.skill, error = %e, "Failed to insert question");
                report.failed += 1;
            }
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::LevelMap;
    use interview_store::SqliteStore;
    use tempfile::TempDir;

    async fn test_store() -> (TempDir, SqliteStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteStore::new(dir.path().join("seed.db"));
        store.initialize().await.unwrap();
        (dir, store)
    }

    #[tokio::test]
    async fn test_load_into_empty_store() {
        let (_dir, store) = test_store().await;
        let catalog = Catalog::initial();

        let report = load_initial(&store, &catalog, false).await.unwrap();
        assert!(!report.skipped);
        assert!(report.succeeded());
        assert_eq!(report.attempted, 143);
        assert_eq!(report.inserted, 143);
        assert_eq!(store.count_all().await.unwrap(), 143);
    }

    #[tokio::test]
    async fn test_statistics_match_catalog_per_skill() {
        let (_dir, store) = test_store().await;
        let catalog = Catalog::initial();
        load_initial(&store, &catalog, false).await.unwrap();

        for (skill, breakdown) in catalog.statistics().per_skill {
            let stats = store.skill_statistics(&skill).await.unwrap();
            assert_eq!(stats.total as usize, breakdown.total, "{skill}");
            assert_eq!(stats.by_level["basic"], 4);
        }

        assert_eq!(
            store.all_skills().await.unwrap(),
            vec![
                "AWS", "Angular", "CSS", "Docker", "Git", "JavaScript", "MongoDB", "Node.js",
                "Python", "React", "SQL"
            ]
        );

        let hits = store.search_questions("closure", 5).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].kind, "conceptual");
    }

    #[tokio::test]
    async fn test_second_load_without_force_is_noop() {
        let (_dir, store) = test_store().await;
        let catalog = Catalog::initial();
        load_initial(&store, &catalog, false).await.unwrap();

        let report = load_initial(&store, &catalog, false).await.unwrap();
        assert!(report.skipped);
        assert!(report.succeeded());
        assert_eq!(store.count_all().await.unwrap(), 143);
    }

    #[tokio::test]
    async fn test_forced_load_replaces_contents() {
        let (_dir, store) = test_store().await;
        store
            .add_question(&NewQuestion::new("Rust", "What is a trait object?"))
            .await
            .unwrap();

        let report = load_initial(&store, &Catalog::initial(), true).await.unwrap();
        assert_eq!(report.inserted, 143);
        assert_eq!(store.count_all().await.unwrap(), 143);
        assert_eq!(store.count_for_skill("Rust").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_import_uses_default_kind() {
        let (_dir, store) = test_store().await;
        let mut levels = LevelMap::new();
        levels.insert(
            "advanced".to_string(),
            vec!["Explain the concept of Pin".to_string(), "What is unsafe?".to_string()],
        );
        let mut skills = SkillMap::new();
        skills.insert("Rust".to_string(), levels);

        let report = import_questions(&store, &skills).await;
        assert_eq!(report.inserted, 2);

        let stats = store.skill_statistics("Rust").await.unwrap();
        assert_eq!(stats.by_kind["general"], 2);
        assert_eq!(stats.by_level["advanced"], 2);
    }

    #[tokio::test]
    async fn test_failed_inserts_are_counted() {
        let dir = tempfile::tempdir().unwrap();
        // Never initialized: the table does not exist.
        let store = SqliteStore::new(dir.path().join("bare.db"));
        let mut skills = SkillMap::new();
        skills.insert(
            "Go".to_string(),
            LevelMap::from([("basic".to_string(), vec!["What is a goroutine?".to_string()])]),
        );

        let report = import_questions(&store, &skills).await;
        assert_eq!(report.attempted, 1);
        assert_eq!(report.failed, 1);
        assert!(!report.succeeded());
    }
}
