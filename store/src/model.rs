//! Row and aggregate types shared by every backend.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Kind assigned when the caller does not supply one.
pub const DEFAULT_KIND: &str = "general";
/// Level assigned when the caller does not supply one.
pub const DEFAULT_LEVEL: &str = "intermediate";
/// Category assigned when the caller does not supply one.
pub const DEFAULT_CATEGORY: &str = "technical";

/// Conventional difficulty tags, easiest first. Levels are stored as free
/// text, so rows outside this set are legal.
pub const LEVELS: [&str; 3] = ["basic", "intermediate", "advanced"];

/// A persisted question row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Question {
    pub id: i64,
    pub skill: String,
    pub text: String,
    pub kind: String,
    pub level: String,
    pub category: String,
    pub created_at: Option<String>,
}

/// Input for a single insert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewQuestion {
    pub skill: String,
    pub text: String,
    pub kind: String,
    pub level: String,
    pub category: String,
}

impl NewQuestion {
    /// A question with the default kind, level and category.
    pub fn new(skill: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            skill: skill.into(),
            text: text.into(),
            kind: DEFAULT_KIND.to_string(),
            level: DEFAULT_LEVEL.to_string(),
            category: DEFAULT_CATEGORY.to_string(),
        }
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }
}

/// Partial update. Fields left as `None` (or empty) are not touched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuestionPatch {
    pub text: Option<String>,
    pub level: Option<String>,
    pub kind: Option<String>,
}

impl QuestionPatch {
    pub fn text(&self) -> Option<&str> {
        non_empty(&self.text)
    }

    pub fn level(&self) -> Option<&str> {
        non_empty(&self.level)
    }

    pub fn kind(&self) -> Option<&str> {
        non_empty(&self.kind)
    }

    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self.text().is_none() && self.level().is_none() && self.kind().is_none()
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// One row returned by a free-text search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchHit {
    pub skill: String,
    pub text: String,
    pub kind: String,
    pub level: String,
}

/// Aggregates scoped to one skill.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SkillStatistics {
    pub skill: String,
    pub total: u64,
    pub by_level: BTreeMap<String, u64>,
    pub by_kind: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SkillCount {
    pub skill: String,
    pub total: u64,
}

/// Aggregates over the whole table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct OverallStatistics {
    pub total: u64,
    pub by_level: BTreeMap<String, u64>,
    pub by_kind: BTreeMap<String, u64>,
    pub by_category: BTreeMap<String, u64>,
    pub top_skills: Vec<SkillCount>,
    pub backend: String,
}

/// Per-skill breakdown of the whole store.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoreSummary {
    pub total_questions: u64,
    pub total_skills: usize,
    pub skills: Vec<String>,
    pub statistics: BTreeMap<String, SkillStatistics>,
    pub backend: String,
}

/// Collects `(label, count)` rows from a `GROUP BY` into a map.
pub(crate) fn into_counts(rows: Vec<(String, i64)>) -> BTreeMap<String, u64> {
    rows.into_iter()
        .map(|(label, count)| (label, count as u64))
        .collect()
}

/// Wraps a search term for a `LIKE`/`ILIKE` substring match. Wildcards in
/// the term are escaped with `\`; queries must say `ESCAPE '\'`.
pub(crate) fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
