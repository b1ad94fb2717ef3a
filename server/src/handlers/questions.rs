//! Question generation, export, search and single-row CRUD.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::response::Response;
use axum::Json;
use chrono::Local;
use interview_catalog::{
    document_questions, generate_question_set, import_questions, render, set_statistics,
    ExportFormat, LoadReport, QuestionSet, SetStatistics,
};
use interview_store::{
    NewQuestion, Question, QuestionPatch, QuestionStore, SearchHit, DEFAULT_KIND, DEFAULT_LEVEL,
};
use serde::{Deserialize, Serialize};

use super::attachment;
use crate::error::{ApiError, Envelope};
use crate::state::AppState;

const DEFAULT_COUNT_PER_SKILL: u32 = 2;
const SEARCH_LIMIT: u32 = 20;

fn default_count() -> u32 {
    DEFAULT_COUNT_PER_SKILL
}

/// Trims and drops empty strings.
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default = "default_count")]
    pub count_per_skill: u32,
}

#[derive(Debug, Serialize)]
pub struct GeneratedSet {
    pub questions: QuestionSet,
    pub statistics: SetStatistics,
}

/// `POST /api/questions/generate`
pub async fn generate<S: QuestionStore + 'static>(
    State(state): State<AppState<S>>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<Envelope<GeneratedSet>>, ApiError> {
    let Json(request) = payload?;
    let skills: Vec<String> = request
        .skills
        .iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if skills.is_empty() {
        return Err(ApiError::BadRequest("No skills selected".to_string()));
    }
    if request.count_per_skill == 0 {
        return Err(ApiError::BadRequest(
            "count_per_skill must be at least 1".to_string(),
        ));
    }

    let level = non_blank(request.level);
    let questions = generate_question_set(
        state.store.as_ref(),
        &skills,
        level.as_deref(),
        request.count_per_skill,
    )
    .await?;
    let statistics = set_statistics(&questions);

    tracing::info!(
        skills = statistics.total_skills,
        questions = statistics.total_questions,
        level = level.as_deref().unwrap_or("any"),
        "Generated question set"
    );
    Ok(Envelope::data(GeneratedSet {
        questions,
        statistics,
    }))
}

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    #[serde(default)]
    pub questions: QuestionSet,
    #[serde(default)]
    pub format: Option<String>,
}

/// `POST /api/export`
///
/// Unknown formats fall back to plain text.
pub async fn export(payload: Result<Json<ExportRequest>, JsonRejection>) -> Result<Response, ApiError> {
    let Json(request) = payload?;
    if request.questions.is_empty() {
        return Err(ApiError::BadRequest("No questions to export".to_string()));
    }

    let format = match request.format.as_deref() {
        Some(raw) => raw.parse::<ExportFormat>().unwrap_or_else(|e| {
            tracing::debug!(reason = %e, "Falling back to txt export");
            ExportFormat::Txt
        }),
        None => ExportFormat::default(),
    };

    let rendered = render(&request.questions, format, Local::now())?;
    Ok(attachment(
        &rendered.file_name,
        rendered.mime_type,
        rendered.content,
    ))
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub term: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResults {
    pub term: String,
    pub total_found: usize,
    pub results: Vec<SearchHit>,
}

/// `POST /api/search`
pub async fn search<S: QuestionStore + 'static>(
    State(state): State<AppState<S>>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<Envelope<SearchResults>>, ApiError> {
    let Json(request) = payload?;
    let term = request.term.trim().to_string();
    if term.is_empty() {
        return Err(ApiError::BadRequest("Empty search term".to_string()));
    }

    let results = state.store.search_questions(&term, SEARCH_LIMIT).await?;
    Ok(Envelope::data(SearchResults {
        term,
        total_found: results.len(),
        results,
    }))
}

#[derive(Debug, Deserialize)]
pub struct AddRequest {
    #[serde(default)]
    pub skill: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Added {
    pub inserted: bool,
}

/// `POST /api/questions`
pub async fn add<S: QuestionStore + 'static>(
    State(state): State<AppState<S>>,
    payload: Result<Json<AddRequest>, JsonRejection>,
) -> Result<Json<Envelope<Added>>, ApiError> {
    let Json(request) = payload?;
    let skill = request.skill.trim();
    let text = request.text.trim();
    if skill.is_empty() || text.is_empty() {
        return Err(ApiError::BadRequest(
            "Skill and question text are required".to_string(),
        ));
    }

    let mut question = NewQuestion::new(skill, text)
        .with_kind(non_blank(request.kind).unwrap_or_else(|| DEFAULT_KIND.to_string()))
        .with_level(non_blank(request.level).unwrap_or_else(|| DEFAULT_LEVEL.to_string()));
    if let Some(category) = non_blank(request.category) {
        question = question.with_category(category);
    }

    let inserted = state.store.add_question(&question).await?;
    let message = if inserted {
        format!("Question added for {skill}")
    } else {
        format!("Question already exists for {skill}")
    };
    Ok(Envelope::data_with_message(Added { inserted }, message))
}

/// `GET /api/questions/{id}`
pub async fn get_one<S: QuestionStore + 'static>(
    State(state): State<AppState<S>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Envelope<Question>>, ApiError> {
    let Path(id) = id?;
    match state.store.question_by_id(id).await? {
        Some(question) => Ok(Envelope::data(question)),
        None => Err(ApiError::NotFound(format!("Question {id} not found"))),
    }
}

/// `PUT /api/questions/{id}`
pub async fn update<S: QuestionStore + 'static>(
    State(state): State<AppState<S>>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<QuestionPatch>, JsonRejection>,
) -> Result<Json<Envelope<()>>, ApiError> {
    let Path(id) = id?;
    let Json(patch) = payload?;
    if state.store.update_question(id, &patch).await? {
        Ok(Envelope::message(format!("Question {id} updated")))
    } else {
        Err(ApiError::NotFound(format!(
            "Question {id} not found or nothing to change"
        )))
    }
}

/// `DELETE /api/questions/{id}`
pub async fn delete<S: QuestionStore + 'static>(
    State(state): State<AppState<S>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Envelope<()>>, ApiError> {
    let Path(id) = id?;
    if state.store.delete_question(id).await? {
        Ok(Envelope::message(format!("Question {id} deleted")))
    } else {
        Err(ApiError::NotFound(format!("Question {id} not found")))
    }
}

/// `POST /api/import` with a `{"questions": {skill: {level: [text]}}}` body.
pub async fn import<S: QuestionStore + 'static>(
    State(state): State<AppState<S>>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<Envelope<LoadReport>>, ApiError> {
    let Json(document) = payload?;
    let skills = document_questions(document)?;
    let report = import_questions(state.store.as_ref(), &skills).await;
    let message = format!("Imported {} questions", report.inserted);
    Ok(Envelope::data_with_message(report, message))
}
