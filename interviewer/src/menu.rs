//! The interactive console.
//!
//! [`Console`] reads answers line by line from any `BufRead` and writes to any
//! `Write`, so a whole session can be scripted in tests. End of input behaves
//! like choosing "exit" at whatever prompt is open.

use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use interview_catalog::{
    generate_question_set, load_initial, render, set_statistics, Catalog, ExportFormat,
    QuestionSet,
};
use interview_store::{NewQuestion, QuestionStore, StoreError, DEFAULT_LEVEL, LEVELS};
use rand::rngs::StdRng;

use crate::selection::{SkillListing, SkillSelection};

pub const DEFAULT_PER_SKILL: u32 = 2;
const MAX_PER_SKILL: u32 = 10;
const SEARCH_LIMIT: u32 = 10;

/// What the user has picked so far.
#[derive(Debug, Clone)]
struct Session {
    skills: Vec<String>,
    level: Option<String>,
    per_skill: u32,
    questions: QuestionSet,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            skills: Vec::new(),
            level: None,
            per_skill: DEFAULT_PER_SKILL,
            questions: QuestionSet::new(),
        }
    }
}

pub struct Console<'a, S, R, W> {
    store: &'a S,
    catalog: &'a Catalog,
    input: R,
    out: W,
    rng: StdRng,
    /// Where exports and backups are written.
    output_dir: PathBuf,
    session: Session,
}

impl<'a, S, R, W> Console<'a, S, R, W>
where
    S: QuestionStore,
    R: BufRead,
    W: Write,
{
    pub fn new(
        store: &'a S,
        catalog: &'a Catalog,
        input: R,
        out: W,
        rng: StdRng,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            store,
            catalog,
            input,
            out,
            rng,
            output_dir: output_dir.into(),
            session: Session::default(),
        }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.out
    }

    /// Status, first skill selection, generation, then the main menu.
    pub async fn run(&mut self) -> io::Result<()> {
        writeln!(self.out, "\nTECHNICAL INTERVIEW QUESTION GENERATOR")?;
        writeln!(self.out, "{}", "=".repeat(65))?;
        writeln!(self.out, "Backend: {}", self.store.describe())?;

        match self.store.count_all().await {
            Ok(total) => writeln!(self.out, "{total} questions in the database")?,
            Err(e) => self.report("Could not count questions", &e)?,
        }

        if !self.select_skills().await? {
            writeln!(self.out, "No skills selected. Exiting.")?;
            return Ok(());
        }
        self.generate().await?;
        self.show_summary()?;
        self.main_menu().await
    }

    async fn main_menu(&mut self) -> io::Result<()> {
        loop {
            writeln!(self.out, "\nMAIN MENU")?;
            writeln!(self.out, "{}", "=".repeat(50))?;
            writeln!(self.out, "1. Show current questions")?;
            writeln!(self.out, "2. Export questions (TXT/JSON/CSV)")?;
            writeln!(self.out, "3. Change skill selection")?;
            writeln!(self.out, "4. Advanced settings")?;
            writeln!(self.out, "5. Database statistics")?;
            writeln!(self.out, "6. Database tools")?;
            writeln!(self.out, "7. Exit")?;

            let Some(choice) = self.prompt("\nSelect an option (1-7): ")? else {
                break;
            };
            match choice.as_str() {
                "1" => self.show_summary()?,
                "2" => self.export().await?,
                "3" => {
                    if self.select_skills().await? {
                        self.generate().await?;
                    }
                }
                "4" => self.advanced_menu().await?,
                "5" => self.overall_statistics().await?,
                "6" => self.tools_menu().await?,
                "7" => break,
                _ => writeln!(self.out, "Invalid option. Choose 1-7.")?,
            }
        }
        writeln!(self.out, "Goodbye!")?;
        Ok(())
    }

    /// Prints the prompt and reads one trimmed line. `None` at end of input.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.out, "{label}")?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Logs a store failure and tells the user, then carries on.
    fn report(&mut self, context: &str, err: &dyn Display) -> io::Result<()> {
        tracing::error!(error = %err, "{context}");
        writeln!(self.out, "Error: {context}: {err}")
    }

    async fn listing(&self) -> Result<Vec<SkillListing>, StoreError> {
        let mut listing = Vec::new();
        for name in self.store.all_skills().await? {
            let stats = self.store.skill_statistics(&name).await?;
            listing.push(SkillListing {
                name,
                total: stats.total,
                by_level: stats.by_level,
            });
        }
        Ok(listing)
    }

    /// Returns `false` when nothing was selected.
    async fn select_skills(&mut self) -> io::Result<bool> {
        let listing = match self.listing().await {
            Ok(listing) => listing,
            Err(e) => {
                self.report("Could not list skills", &e)?;
                return Ok(false);
            }
        };
        if listing.is_empty() {
            writeln!(self.out, "No skills available in the database")?;
            return Ok(false);
        }

        writeln!(self.out, "\nAVAILABLE SKILLS")?;
        writeln!(self.out, "{}", "=".repeat(55))?;
        for (i, skill) in listing.iter().enumerate() {
            writeln!(
                self.out,
                "{:2}. {:<12} ({} questions)",
                i + 1,
                skill.name,
                skill.total
            )?;
            if !skill.by_level.is_empty() {
                writeln!(self.out, "    Levels: {}", join_counts(&skill.by_level))?;
            }
        }

        writeln!(self.out, "\nSelection options:")?;
        writeln!(self.out, "  Numbers: 1,3,5")?;
        writeln!(self.out, "  Names:   Python,React")?;
        writeln!(self.out, "  Range:   1-5")?;
        writeln!(self.out, "  Level:   level:basic")?;
        writeln!(self.out, "  All:     all")?;
        writeln!(self.out, "  Random:  random:5")?;

        loop {
            let Some(line) = self.prompt("\nYour selection: ")? else {
                return Ok(false);
            };
            let resolved = SkillSelection::parse(&line)
                .and_then(|selection| selection.resolve(&listing, &mut self.rng));
            match resolved {
                Ok(resolution) => {
                    for warning in &resolution.warnings {
                        writeln!(self.out, "Warning: {warning}")?;
                    }
                    writeln!(self.out, "\nSelected {} skills:", resolution.skills.len())?;
                    for (i, skill) in resolution.skills.iter().enumerate() {
                        writeln!(self.out, "   {}. {skill}", i + 1)?;
                    }
                    tracing::info!(skills = ?resolution.skills, "Skills selected");
                    self.session.skills = resolution.skills;
                    return Ok(true);
                }
                Err(e) => writeln!(self.out, "Invalid selection: {e}. Try again.")?,
            }
        }
    }

    /// Draws a fresh question set with the current level and count.
    async fn generate(&mut self) -> io::Result<()> {
        if self.session.skills.is_empty() {
            writeln!(self.out, "No skills selected")?;
            return Ok(());
        }

        writeln!(self.out, "\nFETCHING QUESTIONS")?;
        if let Some(level) = &self.session.level {
            writeln!(self.out, "Level filter: {level}")?;
        }
        writeln!(self.out, "Questions per skill: {}", self.session.per_skill)?;

        let generated = generate_question_set(
            self.store,
            &self.session.skills,
            self.session.level.as_deref(),
            self.session.per_skill,
        )
        .await;
        match generated {
            Ok(questions) => {
                let total: usize = questions.values().map(Vec::len).sum();
                writeln!(self.out, "Done: {total} questions")?;
                self.session.questions = questions;
            }
            Err(e) => self.report("Could not fetch questions", &e)?,
        }
        Ok(())
    }

    fn show_summary(&mut self) -> io::Result<()> {
        if self.session.questions.is_empty() {
            writeln!(self.out, "No questions generated")?;
            return Ok(());
        }

        writeln!(self.out, "\nQUESTION SUMMARY")?;
        writeln!(self.out, "{}", "=".repeat(65))?;
        for (skill, questions) in &self.session.questions {
            writeln!(self.out, "\n{}:", skill.to_uppercase())?;
            writeln!(self.out, "{}", "-".repeat(skill.chars().count() + 1))?;
            for (i, question) in questions.iter().enumerate() {
                writeln!(self.out, "  {}. {}", i + 1, truncate(question, 80))?;
            }
        }

        let stats = set_statistics(&self.session.questions);
        writeln!(self.out, "\nSTATISTICS")?;
        writeln!(self.out, "{}", "-".repeat(25))?;
        writeln!(self.out, "Skills: {}", stats.total_skills)?;
        writeln!(self.out, "Total questions: {}", stats.total_questions)?;
        writeln!(self.out, "Average per skill: {:.1}", stats.average_per_skill)?;
        Ok(())
    }

    async fn export(&mut self) -> io::Result<()> {
        if self.session.questions.is_empty() {
            writeln!(self.out, "No questions to export")?;
            return Ok(());
        }

        writeln!(self.out, "\nFormats:")?;
        writeln!(self.out, "1. TXT (plain text)")?;
        writeln!(self.out, "2. JSON (structured data)")?;
        writeln!(self.out, "3. CSV (spreadsheet)")?;
        let format = match self.prompt("Select a format (1-3): ")?.as_deref() {
            Some("1") => ExportFormat::Txt,
            Some("2") => ExportFormat::Json,
            Some("3") => ExportFormat::Csv,
            _ => {
                writeln!(self.out, "Invalid format")?;
                return Ok(());
            }
        };

        let rendered = match render(&self.session.questions, format, Local::now()) {
            Ok(rendered) => rendered,
            Err(e) => return self.report("Could not render export", &e),
        };
        let path = self.output_dir.join(&rendered.file_name);
        match tokio::fs::write(&path, rendered.content).await {
            Ok(()) => {
                tracing::info!(path = %path.display(), %format, "Exported question set");
                writeln!(self.out, "Questions exported: {}", path.display())
            }
            Err(e) => self.report("Could not write export", &e),
        }
    }

    async fn advanced_menu(&mut self) -> io::Result<()> {
        loop {
            writeln!(self.out, "\nADVANCED SETTINGS")?;
            writeln!(self.out, "1. Filter by difficulty level")?;
            writeln!(self.out, "2. Change questions per skill")?;
            writeln!(self.out, "3. Regenerate questions")?;
            writeln!(self.out, "4. Add questions manually")?;
            writeln!(self.out, "5. Detailed database statistics")?;
            writeln!(self.out, "6. Back to main menu")?;

            let Some(choice) = self.prompt("\nSelect (1-6): ")? else {
                return Ok(());
            };
            match choice.as_str() {
                "1" => {
                    writeln!(self.out, "\nLevels: {}", LEVELS.join(", "))?;
                    let Some(level) =
                        self.prompt("Level to filter by ('none' to clear): ")?
                    else {
                        return Ok(());
                    };
                    let level = level.to_lowercase();
                    self.session.level = match level.as_str() {
                        "" | "none" => None,
                        _ => Some(level),
                    };
                    self.generate().await?;
                    let shown = self.session.level.clone().unwrap_or_else(|| "all".to_string());
                    writeln!(self.out, "Level filter: {shown}")?;
                }
                "2" => {
                    let Some(raw) = self.prompt("Questions per skill (1-10): ")? else {
                        return Ok(());
                    };
                    match raw.parse::<u32>() {
                        Ok(count) => {
                            self.session.per_skill = count.clamp(1, MAX_PER_SKILL);
                            self.generate().await?;
                            writeln!(
                                self.out,
                                "Now {} questions per skill",
                                self.session.per_skill
                            )?;
                        }
                        Err(_) => writeln!(self.out, "Invalid count")?,
                    }
                }
                "3" => {
                    self.generate().await?;
                    writeln!(self.out, "Questions regenerated")?;
                }
                "4" => self.add_manually().await?,
                "5" => self.detailed_statistics().await?,
                "6" => return Ok(()),
                _ => writeln!(self.out, "Invalid option")?,
            }
        }
    }

    async fn add_manually(&mut self) -> io::Result<()> {
        writeln!(self.out, "\nADD QUESTIONS")?;
        writeln!(self.out, "{}", "-".repeat(30))?;
        let Some(skill) = self.prompt("Skill name: ")? else {
            return Ok(());
        };
        if skill.is_empty() {
            writeln!(self.out, "Invalid name")?;
            return Ok(());
        }

        writeln!(self.out, "Enter questions ('done' to finish):")?;
        let mut texts = Vec::new();
        loop {
            let Some(text) = self.prompt(&format!("{}. ", texts.len() + 1))? else {
                break;
            };
            if matches!(text.to_lowercase().as_str(), "done" | "end") {
                break;
            }
            if !text.is_empty() {
                texts.push(text);
            }
        }
        if texts.is_empty() {
            writeln!(self.out, "No questions added")?;
            return Ok(());
        }

        let level = self
            .prompt(&format!("Level ({}) [{DEFAULT_LEVEL}]: ", LEVELS.join("/")))?
            .map(|l| l.to_lowercase())
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| DEFAULT_LEVEL.to_string());
        let level = if LEVELS.contains(&level.as_str()) {
            level
        } else {
            writeln!(self.out, "Unknown level '{level}', using {DEFAULT_LEVEL}")?;
            DEFAULT_LEVEL.to_string()
        };

        let mut added = 0;
        for text in texts {
            let question = NewQuestion::new(skill.as_str(), text).with_level(level.as_str());
            match self.store.add_question(&question).await {
                Ok(true) => added += 1,
                Ok(false) => {}
                Err(e) => self.report("Could not add question", &e)?,
            }
        }
        writeln!(self.out, "Added {added} questions for {skill}")
    }

    async fn detailed_statistics(&mut self) -> io::Result<()> {
        let summary = match self.store.summary().await {
            Ok(summary) => summary,
            Err(e) => return self.report("Could not read statistics", &e),
        };

        writeln!(self.out, "\nDETAILED DATABASE STATISTICS")?;
        writeln!(self.out, "{}", "=".repeat(60))?;
        writeln!(self.out, "Backend: {}", summary.backend)?;
        writeln!(self.out, "Total questions: {}", summary.total_questions)?;
        writeln!(self.out, "Total skills: {}", summary.total_skills)?;
        if summary.statistics.is_empty() {
            return Ok(());
        }

        writeln!(self.out, "\nBREAKDOWN BY SKILL")?;
        writeln!(self.out, "{}", "-".repeat(40))?;
        for (skill, stats) in &summary.statistics {
            writeln!(self.out, "\n{skill}: {} questions", stats.total)?;
            if !stats.by_level.is_empty() {
                writeln!(self.out, "  Levels: {}", join_counts(&stats.by_level))?;
            }
            if !stats.by_kind.is_empty() {
                writeln!(self.out, "  Kinds: {}", join_counts(&stats.by_kind))?;
            }
        }
        Ok(())
    }

    async fn overall_statistics(&mut self) -> io::Result<()> {
        let stats = match self.store.overall_statistics().await {
            Ok(stats) => stats,
            Err(e) => return self.report("Could not read statistics", &e),
        };

        writeln!(self.out, "\nDATABASE STATISTICS")?;
        writeln!(self.out, "{}", "=".repeat(50))?;
        writeln!(self.out, "Backend: {}", stats.backend)?;
        writeln!(self.out, "Total questions: {}", stats.total)?;
        writeln!(self.out, "By level: {}", join_counts(&stats.by_level))?;
        writeln!(self.out, "By kind: {}", join_counts(&stats.by_kind))?;
        writeln!(self.out, "By category: {}", join_counts(&stats.by_category))?;
        writeln!(self.out, "Top skills:")?;
        for (i, skill) in stats.top_skills.iter().enumerate() {
            writeln!(self.out, "  {}. {} ({})", i + 1, skill.skill, skill.total)?;
        }
        Ok(())
    }

    async fn tools_menu(&mut self) -> io::Result<()> {
        loop {
            writeln!(self.out, "\nDATABASE TOOLS")?;
            writeln!(self.out, "1. Reload catalog")?;
            writeln!(self.out, "2. Export full database to SQL")?;
            writeln!(self.out, "3. Clear database")?;
            writeln!(self.out, "4. Search questions")?;
            writeln!(self.out, "5. Back to main menu")?;

            let Some(choice) = self.prompt("\nSelect (1-5): ")? else {
                return Ok(());
            };
            match choice.as_str() {
                "1" => self.reload_catalog().await?,
                "2" => self.backup().await?,
                "3" => self.clear().await?,
                "4" => self.search().await?,
                "5" => return Ok(()),
                _ => writeln!(self.out, "Invalid option")?,
            }
        }
    }

    async fn reload_catalog(&mut self) -> io::Result<()> {
        let answer = self
            .prompt("Reload the catalog? Every stored question is replaced (y/n): ")?
            .unwrap_or_default()
            .to_lowercase();
        if !matches!(answer.as_str(), "y" | "yes") {
            return Ok(());
        }
        match load_initial(self.store, self.catalog, true).await {
            Ok(report) => writeln!(
                self.out,
                "Catalog reloaded: {} of {} questions inserted",
                report.inserted, report.attempted
            ),
            Err(e) => self.report("Could not reload the catalog", &e),
        }
    }

    async fn backup(&mut self) -> io::Result<()> {
        let path = backup_path(&self.output_dir);
        match self.store.export_as_script(&path).await {
            Ok(()) => writeln!(self.out, "Database exported to {}", path.display()),
            Err(e) => self.report("Could not export the database", &e),
        }
    }

    async fn clear(&mut self) -> io::Result<()> {
        let answer = self
            .prompt("Type CONFIRM to delete every question: ")?
            .unwrap_or_default();
        if answer != "CONFIRM" {
            writeln!(self.out, "Cancelled")?;
            return Ok(());
        }
        if let Err(e) = self.store.clear_all().await {
            return self.report("Could not clear the database", &e);
        }
        writeln!(self.out, "Database cleared")?;
        match load_initial(self.store, self.catalog, false).await {
            Ok(report) => writeln!(
                self.out,
                "Catalog reloaded: {} questions inserted",
                report.inserted
            ),
            Err(e) => self.report("Could not reload the catalog", &e),
        }
    }

    async fn search(&mut self) -> io::Result<()> {
        let Some(term) = self.prompt("Search term: ")? else {
            return Ok(());
        };
        if term.is_empty() {
            return Ok(());
        }
        let hits = match self.store.search_questions(&term, SEARCH_LIMIT).await {
            Ok(hits) => hits,
            Err(e) => return self.report("Search failed", &e),
        };
        if hits.is_empty() {
            return writeln!(self.out, "No results");
        }
        writeln!(self.out, "\nFound {} questions:", hits.len())?;
        for hit in &hits {
            writeln!(
                self.out,
                "  {} ({}): {}",
                hit.skill,
                hit.level,
                truncate(&hit.text, 60)
            )?;
        }
        Ok(())
    }
}

/// `backup_YYYYMMDD_HHMMSS.sql` under `dir`.
pub fn backup_path(dir: &Path) -> PathBuf {
    dir.join(format!("backup_{}.sql", Local::now().format("%Y%m%d_%H%M%S")))
}

fn join_counts(counts: &std::collections::BTreeMap<String, u64>) -> String {
    counts
        .iter()
        .map(|(label, n)| format!("{label}: {n}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Shortens `text` to at most `max` characters, ending in `...` when cut.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}

#[cfg(test)]
mod tests {
    use super::*;
    use interview_store::SqliteStore;
    use rand::SeedableRng;
    use tempfile::TempDir;

    async fn seeded() -> (TempDir, SqliteStore, Catalog) {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteStore::new(dir.path().join("questions.db"));
        store.initialize().await.unwrap();
        let catalog = Catalog::initial();
        load_initial(&store, &catalog, false).await.unwrap();
        (dir, store, catalog)
    }

    /// Runs a scripted session and returns everything written.
    async fn session(store: &SqliteStore, catalog: &Catalog, dir: &Path, script: &str) -> String {
        let mut console = Console::new(
            store,
            catalog,
            script.as_bytes(),
            Vec::new(),
            StdRng::seed_from_u64(1),
            dir,
        );
        console.run().await.unwrap();
        String::from_utf8(console.into_output()).unwrap()
    }

    fn files_with_extension(dir: &Path, ext: &str) -> Vec<PathBuf> {
        std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().path())
            .filter(|p| p.extension().is_some_and(|e| e == ext))
            .collect()
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghijkl", 8), "abcde...");
    }

    #[tokio::test]
    async fn test_select_generate_and_exit() {
        let (dir, store, catalog) = seeded().await;
        let out = session(&store, &catalog, dir.path(), "python\n7\n").await;

        assert!(out.contains("143 questions in the database"));
        assert!(out.contains(" 9. Python       (13 questions)"));
        assert!(out.contains("Selected 1 skills:"));
        assert!(out.contains("\nPYTHON:\n"));
        assert!(out.contains("Total questions: 2"));
        assert!(out.ends_with("Goodbye!\n"));
    }

    #[tokio::test]
    async fn test_end_of_input_before_selection() {
        let (dir, store, catalog) = seeded().await;
        let out = session(&store, &catalog, dir.path(), "").await;
        assert!(out.contains("No skills selected. Exiting."));
    }

    #[tokio::test]
    async fn test_invalid_selection_reprompts() {
        let (dir, store, catalog) = seeded().await;
        let out = session(&store, &catalog, dir.path(), "random:x\nCobol,aws\n7\n").await;
        assert!(out.contains("Invalid selection: invalid format, use random:5"));
        assert!(out.contains("Warning: Skill not found: Cobol"));
        assert!(out.contains("\nAWS:\n"));
    }

    #[tokio::test]
    async fn test_export_csv() {
        let (dir, store, catalog) = seeded().await;
        let out = session(&store, &catalog, dir.path(), "git\n2\n3\n7\n").await;
        assert!(out.contains("Questions exported:"));

        let exports = files_with_extension(dir.path(), "csv");
        assert_eq!(exports.len(), 1);
        let name = exports[0].file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("technical_interview_"));
        let content = std::fs::read_to_string(&exports[0]).unwrap();
        assert!(content.starts_with("Skill,Question_Number,Question\n"));
        assert_eq!(content.lines().count(), 3);
    }

    #[tokio::test]
    async fn test_level_filter_and_count() {
        let (dir, store, catalog) = seeded().await;
        let script = "react\n4\n1\nadvanced\n2\n25\n6\n7\n";
        let out = session(&store, &catalog, dir.path(), script).await;
        assert!(out.contains("Level filter: advanced"));
        // Only 4 advanced React questions exist, whatever the count.
        assert!(out.contains("Now 10 questions per skill"));
        assert!(out.contains("Done: 4 questions"));
    }

    #[tokio::test]
    async fn test_add_questions_manually() {
        let (dir, store, catalog) = seeded().await;
        let script = "1\n4\n4\nRust\nWhat is ownership?\n\nWhat is borrowing?\ndone\nexpert\n6\n7\n";
        let out = session(&store, &catalog, dir.path(), script).await;
        assert!(out.contains("Unknown level 'expert', using intermediate"));
        assert!(out.contains("Added 2 questions for Rust"));

        let stats = store.skill_statistics("Rust").await.unwrap();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.by_level.get("intermediate"), Some(&2));
    }

    #[tokio::test]
    async fn test_tools_search_backup_and_clear() {
        let (dir, store, catalog) = seeded().await;
        store
            .add_question(&NewQuestion::new("Rust", "What is a trait object?"))
            .await
            .unwrap();

        let script = "1\n6\n4\nclosure\n2\n3\nno\n3\nCONFIRM\n5\n7\n";
        let out = session(&store, &catalog, dir.path(), script).await;

        assert!(out.contains("Found 1 questions:"));
        assert!(out.contains("  JavaScript (intermediate): Explain the concept of closures"));
        assert!(out.contains("Database exported to"));
        assert_eq!(files_with_extension(dir.path(), "sql").len(), 1);
        assert!(out.contains("Cancelled"));
        assert!(out.contains("Catalog reloaded: 143 questions inserted"));
        assert_eq!(store.count_all().await.unwrap(), 143);
        assert_eq!(store.count_for_skill("Rust").await.unwrap(), 0);
    }
}
