//! Interview question sets: picking questions per skill and rendering the
//! result as a downloadable document.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local};
use indexmap::IndexMap;
use interview_store::{QuestionStore, StoreError};
use serde::{Deserialize, Serialize};

/// Selected questions, keyed by skill in selection order.
pub type QuestionSet = IndexMap<String, Vec<String>>;

const TITLE: &str = "TECHNICAL INTERVIEW QUESTIONS";
const RULE_WIDTH: usize = 65;

/// Generic questions used for a skill the store knows nothing about.
pub fn fallback_questions(skill: &str) -> Vec<String> {
    vec![
        format!("What is your experience working with {skill}?"),
        format!("Describe a project where you applied {skill} effectively"),
    ]
}

/// Draws up to `per_skill` random questions for every requested skill.
/// Skills without any stored match get [`fallback_questions`].
pub async fn generate_question_set<S: QuestionStore>(
    store: &S,
    skills: &[String],
    level: Option<&str>,
    per_skill: u32,
) -> Result<QuestionSet, StoreError> {
    let mut set = QuestionSet::new();
    for skill in skills {
        let questions = store.questions_for_skill(skill, per_skill, level).await?;
        if questions.is_empty() {
            tracing::debug!(skill = %skill, "No stored questions, using fallback");
            set.insert(skill.clone(), fallback_questions(skill));
        } else {
            set.insert(skill.clone(), questions);
        }
    }
    Ok(set)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SetStatistics {
    pub total_skills: usize,
    pub total_questions: usize,
    /// Rounded to one decimal; `0.0` for an empty set.
    pub average_per_skill: f64,
}

pub fn set_statistics(set: &QuestionSet) -> SetStatistics {
    let total_questions = total_questions(set);
    let average_per_skill = if set.is_empty() {
        0.0
    } else {
        (total_questions as f64 / set.len() as f64 * 10.0).round() / 10.0
    };
    SetStatistics {
        total_skills: set.len(),
        total_questions,
        average_per_skill,
    }
}

fn total_questions(set: &QuestionSet) -> usize {
    set.values().map(Vec::len).sum()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Txt,
    Json,
    Csv,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Txt, ExportFormat::Json, ExportFormat::Csv];

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Txt => "txt",
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Txt => "text/plain; charset=utf-8",
            ExportFormat::Json => "application/json",
            ExportFormat::Csv => "text/csv; charset=utf-8",
        }
    }

    /// `technical_interview_YYYYMMDD_HHMMSS.<ext>`
    pub fn file_name(&self, at: DateTime<Local>) -> String {
        format!(
            "technical_interview_{}.{}",
            at.format("%Y%m%d_%H%M%S"),
            self.extension()
        )
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "txt" => Ok(ExportFormat::Txt),
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(format!("unknown export format '{other}'")),
        }
    }
}

/// A rendered document, ready to be written or sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedExport {
    pub file_name: String,
    pub mime_type: &'static str,
    pub content: String,
}

#[derive(Serialize)]
struct SetMetadata {
    generated: String,
    total_skills: usize,
    total_questions: usize,
}

#[derive(Serialize)]
struct SetDocument<'a> {
    metadata: SetMetadata,
    questions_by_skill: &'a QuestionSet,
}

pub fn render(
    set: &QuestionSet,
    format: ExportFormat,
    at: DateTime<Local>,
) -> Result<RenderedExport, serde_json::Error> {
    let content = match format {
        ExportFormat::Txt => render_txt(set, at),
        ExportFormat::Json => render_json(set, at)?,
        ExportFormat::Csv => render_csv(set),
    };
    Ok(RenderedExport {
        file_name: format.file_name(at),
        mime_type: format.mime_type(),
        content,
    })
}

fn render_txt(set: &QuestionSet, at: DateTime<Local>) -> String {
    let mut out = String::new();
    out.push_str(TITLE);
    out.push('\n');
    out.push_str(&"=".repeat(RULE_WIDTH));
    out.push('\n');
    out.push_str(&format!("Generated: {}\n", at.format("%Y-%m-%d %H:%M:%S")));
    out.push_str(&format!("Skills: {}\n", set.len()));
    out.push_str(&format!("Total questions: {}\n\n", total_questions(set)));

    for (skill, questions) in set {
        out.push_str(&format!("\n{}:\n", skill.to_uppercase()));
        out.push_str(&"-".repeat(skill.chars().count() + 1));
        out.push('\n');
        for (i, question) in questions.iter().enumerate() {
            out.push_str(&format!("  {}. {question}\n", i + 1));
        }
    }

    out.push_str("\n\n--- End of document ---");
    out
}

fn render_json(set: &QuestionSet, at: DateTime<Local>) -> Result<String, serde_json::Error> {
    let document = SetDocument {
        metadata: SetMetadata {
            generated: at.to_rfc3339(),
            total_skills: set.len(),
            total_questions: total_questions(set),
        },
        questions_by_skill: set,
    };
    serde_json::to_string_pretty(&document)
}

fn render_csv(set: &QuestionSet) -> String {
    let mut out = String::from("Skill,Question_Number,Question\n");
    for (skill, questions) in set {
        for (i, question) in questions.iter().enumerate() {
            out.push_str(&format!(
                "{},{},{}\n",
                csv_field(skill),
                i + 1,
                csv_field(question)
            ));
        }
    }
    out
}

fn csv_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use interview_store::{NewQuestion, SqliteStore};

    fn sample() -> QuestionSet {
        let mut set = QuestionSet::new();
        set.insert(
            "Python".to_string(),
            vec![
                "What is a \"generator\"?".to_string(),
                "How does the GIL work?".to_string(),
            ],
        );
        set.insert("Git".to_string(), vec!["What is a rebase?".to_string()]);
        set
    }

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap()
    }

    #[test]
    fn test_file_name() {
        assert_eq!(
            ExportFormat::Csv.file_name(fixed_time()),
            "technical_interview_20240309_140507.csv"
        );
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("JSON".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!(" txt ".parse::<ExportFormat>().unwrap(), ExportFormat::Txt);
        assert!("xml".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_render_txt() {
        let rendered = render(&sample(), ExportFormat::Txt, fixed_time()).unwrap();
        let text = rendered.content;
        assert!(text.starts_with("TECHNICAL INTERVIEW QUESTIONS\n"));
        assert!(text.contains("Generated: 2024-03-09 14:05:07\n"));
        assert!(text.contains("Skills: 2\n"));
        assert!(text.contains("Total questions: 3\n"));
        assert!(text.contains("\nPYTHON:\n-------\n  1. What is a \"generator\"?\n  2. How does the GIL work?\n"));
        assert!(text.contains("\nGIT:\n----\n  1. What is a rebase?\n"));
        assert!(text.ends_with("--- End of document ---"));
        assert_eq!(rendered.mime_type, "text/plain; charset=utf-8");
    }

    #[test]
    fn test_render_json_keeps_skill_order() {
        let rendered = render(&sample(), ExportFormat::Json, fixed_time()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered.content).unwrap();
        assert_eq!(value["metadata"]["total_skills"], 2);
        assert_eq!(value["metadata"]["total_questions"], 3);
        assert!(value["metadata"]["generated"]
            .as_str()
            .unwrap()
            .starts_with("2024-03-09T14:05:07"));
        assert_eq!(value["questions_by_skill"]["Git"][0], "What is a rebase?");

        let python = rendered.content.find("\"Python\"").unwrap();
        let git = rendered.content.find("\"Git\"").unwrap();
        assert!(python < git);
    }

    #[test]
    fn test_render_csv_escapes_quotes() {
        let rendered = render(&sample(), ExportFormat::Csv, fixed_time()).unwrap();
        let lines: Vec<&str> = rendered.content.lines().collect();
        assert_eq!(lines[0], "Skill,Question_Number,Question");
        assert_eq!(lines[1], "\"Python\",1,\"What is a \"\"generator\"\"?\"");
        assert_eq!(lines[3], "\"Git\",1,\"What is a rebase?\"");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_set_statistics() {
        let stats = set_statistics(&sample());
        assert_eq!(stats.total_skills, 2);
        assert_eq!(stats.total_questions, 3);
        assert_eq!(stats.average_per_skill, 1.5);
        assert_eq!(set_statistics(&QuestionSet::new()).average_per_skill, 0.0);
    }

    #[tokio::test]
    async fn test_generate_with_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteStore::new(dir.path().join("set.db"));
        store.initialize().await.unwrap();
        for text in ["What is a slice?", "What is a channel?", "What is a goroutine?"] {
            store
                .add_question(&NewQuestion::new("Go", text).with_level("basic"))
                .await
                .unwrap();
        }

        let skills = vec!["Go".to_string(), "Elixir".to_string()];
        let set = generate_question_set(&store, &skills, None, 2).await.unwrap();
        assert_eq!(set.keys().collect::<Vec<_>>(), vec!["Go", "Elixir"]);
        assert_eq!(set["Go"].len(), 2);
        assert_eq!(
            set["Elixir"],
            vec![
                "What is your experience working with Elixir?".to_string(),
                "Describe a project where you applied Elixir effectively".to_string(),
            ]
        );

        let set = generate_question_set(&store, &skills[..1], Some("advanced"), 2)
            .await
            .unwrap();
        assert_eq!(set["Go"], fallback_questions("Go"));
    }
}
