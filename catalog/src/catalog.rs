//! In-memory question catalog: skill → level → question texts.
//!
//! The catalog is the source the seeder loads into a store. It can be
//! extended with custom skills, checked for obvious data problems, exported
//! to and merged from a JSON document, and rendered as a standalone SQL
//! script.

use std::path::Path;

use chrono::{DateTime, Local};
use indexmap::IndexMap;
use interview_store::{NewQuestion, DEFAULT_CATEGORY, LEVELS};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::data::INITIAL;
use crate::error::CatalogError;

/// Questions of one skill, keyed by level in insertion order.
pub type LevelMap = IndexMap<String, Vec<String>>;
/// Every skill of a catalog, in insertion order.
pub type SkillMap = IndexMap<String, LevelMap>;

const DOCUMENT_VERSION: &str = "1.0";
const MIN_QUESTION_LEN: usize = 10;

/// `conceptual` when the text mentions "concept" in any case, otherwise
/// `practical`.
pub fn classify(text: &str) -> &'static str {
    if text.to_lowercase().contains("concept") {
        "conceptual"
    } else {
        "practical"
    }
}

fn is_known_level(level: &str) -> bool {
    LEVELS.contains(&level)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    skills: SkillMap,
}

/// Per-skill counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillBreakdown {
    pub total: usize,
    pub per_level: IndexMap<String, usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogStatistics {
    pub total_questions: usize,
    pub total_skills: usize,
    pub per_skill: IndexMap<String, SkillBreakdown>,
}

/// Outcome of [`Catalog::validate`]. Problems are reported, never raised.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub statistics: CatalogStatistics,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub generated: String,
    pub total_skills: usize,
    pub total_questions: usize,
    pub version: String,
}

/// The on-disk JSON form of a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogDocument {
    pub metadata: DocumentMetadata,
    pub questions: SkillMap,
}

impl Catalog {
    /// The built-in catalog.
    pub fn initial() -> Self {
        let skills = INITIAL
            .iter()
            .map(|(skill, levels)| {
                let levels = levels
                    .iter()
                    .map(|(level, texts)| {
                        (
                            level.to_string(),
                            texts.iter().map(|t| t.to_string()).collect(),
                        )
                    })
                    .collect();
                (skill.to_string(), levels)
            })
            .collect();
        Self { skills }
    }

    pub fn from_skills(skills: SkillMap) -> Self {
        Self { skills }
    }

    pub fn skills(&self) -> &SkillMap {
        &self.skills
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.skills.contains_key(skill)
    }

    pub fn total_questions(&self) -> usize {
        self.skills
            .values()
            .flat_map(|levels| levels.values())
            .map(Vec::len)
            .sum()
    }

    /// Every question as an insertable row, classified and tagged
    /// `technical`.
    pub fn questions(&self) -> impl Iterator<Item = NewQuestion> + '_ {
        self.skills.iter().flat_map(|(skill, levels)| {
            levels.iter().flat_map(move |(level, texts)| {
                texts.iter().map(move |text| {
                    NewQuestion::new(skill.as_str(), text.as_str())
                        .with_kind(classify(text))
                        .with_level(level.as_str())
                        .with_category(DEFAULT_CATEGORY)
                })
            })
        })
    }

    /// Registers a new skill. Fails if the name is already present or any
    /// level is not one of the known tags; the catalog is unchanged then.
    pub fn add_custom_skill(
        &mut self,
        name: &str,
        levels: LevelMap,
    ) -> Result<(), CatalogError> {
        if self.skills.contains_key(name) {
            return Err(CatalogError::SkillExists(name.to_string()));
        }
        if let Some(level) = levels.keys().find(|level| !is_known_level(level)) {
            return Err(CatalogError::InvalidLevel {
                level: level.clone(),
            });
        }

        let count: usize = levels.values().map(Vec::len).sum();
        self.skills.insert(name.to_string(), levels);
        info!(skill = name, questions = count, "Custom skill added");
        Ok(())
    }

    pub fn statistics(&self) -> CatalogStatistics {
        let per_skill: IndexMap<String, SkillBreakdown> = self
            .skills
            .iter()
            .map(|(skill, levels)| {
                let per_level: IndexMap<String, usize> = levels
                    .iter()
                    .map(|(level, texts)| (level.clone(), texts.len()))
                    .collect();
                let breakdown = SkillBreakdown {
                    total: per_level.values().sum(),
                    per_level,
                };
                (skill.clone(), breakdown)
            })
            .collect();

        CatalogStatistics {
            total_questions: per_skill.values().map(|b| b.total).sum(),
            total_skills: per_skill.len(),
            per_skill,
        }
    }

    pub fn validate(&self) -> ValidationReport {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        for (skill, levels) in &self.skills {
            if skill.trim().is_empty() {
                errors.push("Empty skill name found".to_string());
            }

            for (level, texts) in levels {
                if !is_known_level(level) {
                    errors.push(format!("Invalid level in {skill}: {level}"));
                }
                if texts.is_empty() {
                    warnings.push(format!("{skill}-{level}: no questions"));
                }

                for (i, text) in texts.iter().enumerate() {
                    let n = i + 1;
                    if text.trim().is_empty() {
                        errors.push(format!("{skill}-{level}: question {n} is empty"));
                    } else if text.chars().count() < MIN_QUESTION_LEN {
                        warnings.push(format!("{skill}-{level}: question {n} is too short"));
                    } else if !text.ends_with('?') {
                        warnings.push(format!("{skill}-{level}: question {n} does not end with '?'"));
                    }
                }
            }
        }

        ValidationReport {
            errors,
            warnings,
            statistics: self.statistics(),
        }
    }

    pub fn to_document(&self, generated: DateTime<Local>) -> CatalogDocument {
        CatalogDocument {
            metadata: DocumentMetadata {
                generated: generated.to_rfc3339(),
                total_skills: self.skills.len(),
                total_questions: self.total_questions(),
                version: DOCUMENT_VERSION.to_string(),
            },
            questions: self.skills.clone(),
        }
    }

    /// Writes the catalog as a pretty-printed JSON document.
    pub async fn export_json(&self, path: &Path) -> Result<(), CatalogError> {
        let document = self.to_document(Local::now());
        let json = serde_json::to_string_pretty(&document)?;
        tokio::fs::write(path, json).await?;
        info!(
            path = %path.display(),
            skills = document.metadata.total_skills,
            questions = document.metadata.total_questions,
            "Catalog exported to JSON"
        );
        Ok(())
    }

    /// Merges the `questions` of a JSON document into this catalog. A skill
    /// present in both is replaced by the document's version. Returns the
    /// number of skills read.
    pub async fn import_json(&mut self, path: &Path) -> Result<usize, CatalogError> {
        let raw = tokio::fs::read_to_string(path).await?;
        let skills = parse_document(&raw)?;
        let count = skills.len();
        self.merge(skills);
        info!(path = %path.display(), skills = count, "Catalog imported from JSON");
        Ok(count)
    }

    pub fn merge(&mut self, skills: SkillMap) {
        self.skills.extend(skills);
    }

    /// A standalone SQLite script that creates the table and inserts every
    /// catalog question.
    pub fn to_sql_script(&self, generated: DateTime<Local>) -> String {
        let mut out = String::new();
        out.push_str("-- Initial interview questions\n");
        out.push_str(&format!(
            "-- Generated: {}\n\n",
            generated.format("%Y-%m-%d %H:%M:%S")
        ));
        out.push_str(
            "CREATE TABLE IF NOT EXISTS question (\n\
            \x20   id INTEGER PRIMARY KEY AUTOINCREMENT,\n\
            \x20   skill TEXT NOT NULL,\n\
            \x20   question_text TEXT NOT NULL,\n\
            \x20   kind TEXT DEFAULT 'general',\n\
            \x20   level TEXT DEFAULT 'intermediate',\n\
            \x20   category TEXT DEFAULT 'technical',\n\
            \x20   created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP\n\
            );\n\n",
        );
        out.push_str("CREATE INDEX IF NOT EXISTS idx_question_skill ON question(skill);\n");
        out.push_str("CREATE INDEX IF NOT EXISTS idx_question_kind_level ON question(kind, level);\n");

        for (skill, levels) in &self.skills {
            out.push_str(&format!("\n-- {skill} --\n"));
            for (level, texts) in levels {
                for text in texts {
                    out.push_str(&format!(
                        "INSERT INTO question (skill, question_text, kind, level, category) VALUES ('{}', '{}', '{}', '{}', '{}');\n",
                        escape(skill),
                        escape(text),
                        classify(text),
                        escape(level),
                        DEFAULT_CATEGORY,
                    ));
                }
            }
        }

        out.push_str(&format!("\n-- Total questions: {}\n", self.total_questions()));
        out
    }
}

fn escape(value: &str) -> String {
    value.replace('\'', "''")
}

/// Extracts the `questions` map from a catalog document. `metadata` is
/// optional; anything without `questions` is rejected.
pub fn parse_document(raw: &str) -> Result<SkillMap, CatalogError> {
    let value: serde_json::Value = serde_json::from_str(raw)?;
    document_questions(value)
}

/// Like [`parse_document`], for a document that is already parsed.
pub fn document_questions(mut value: serde_json::Value) -> Result<SkillMap, CatalogError> {
    let questions = value
        .get_mut("questions")
        .map(serde_json::Value::take)
        .ok_or_else(|| CatalogError::InvalidDocument("missing 'questions'".to_string()))?;
    serde_json::from_value(questions)
        .map_err(|e| CatalogError::InvalidDocument(format!("malformed 'questions': {e}")))
}
