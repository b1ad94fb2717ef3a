//! Health, status, statistics and whole-database operations.

use std::collections::BTreeMap;

use axum::extract::State;
use axum::response::Response;
use axum::Json;
use chrono::Local;
use interview_catalog::{load_initial, LoadReport};
use interview_store::{OverallStatistics, QuestionStore, StoreSummary};
use serde::Serialize;

use super::attachment;
use crate::error::{ApiError, Envelope};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct Health {
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct Status {
    pub total_questions: u64,
    pub total_skills: usize,
    pub skills: Vec<String>,
    pub ready: bool,
}

#[derive(Debug, Serialize)]
pub struct SkillInfo {
    pub name: String,
    pub total: u64,
    pub by_level: BTreeMap<String, u64>,
    pub by_kind: BTreeMap<String, u64>,
}

#[derive(Debug, Serialize)]
pub struct Statistics {
    pub summary: StoreSummary,
    pub overall: OverallStatistics,
}

/// `GET /api/health`
pub async fn health() -> Json<Envelope<Health>> {
    Envelope::data_with_message(
        Health {
            timestamp: Local::now().to_rfc3339(),
        },
        "API is running",
    )
}

/// `GET /api/status`
pub async fn status<S: QuestionStore + 'static>(
    State(state): State<AppState<S>>,
) -> Result<Json<Envelope<Status>>, ApiError> {
    let total_questions = state.store.count_all().await?;
    let skills = state.store.all_skills().await?;
    Ok(Envelope::data(Status {
        total_questions,
        total_skills: skills.len(),
        skills,
        ready: total_questions > 0,
    }))
}

/// `GET /api/skills`
pub async fn skills<S: QuestionStore + 'static>(
    State(state): State<AppState<S>>,
) -> Result<Json<Envelope<Vec<SkillInfo>>>, ApiError> {
    let names = state.store.all_skills().await?;
    let mut skills = Vec::with_capacity(names.len());
    for name in names {
        let stats = state.store.skill_statistics(&name).await?;
        skills.push(SkillInfo {
            name,
            total: stats.total,
            by_level: stats.by_level,
            by_kind: stats.by_kind,
        });
    }
    Ok(Envelope::data(skills))
}

/// `GET /api/statistics`
pub async fn statistics<S: QuestionStore + 'static>(
    State(state): State<AppState<S>>,
) -> Result<Json<Envelope<Statistics>>, ApiError> {
    let summary = state.store.summary().await?;
    let overall = state.store.overall_statistics().await?;
    Ok(Envelope::data(Statistics { summary, overall }))
}

/// `GET /api/backup`
pub async fn backup<S: QuestionStore + 'static>(
    State(state): State<AppState<S>>,
) -> Result<Response, ApiError> {
    let script = state.store.render_script().await?;
    let file_name = format!("backup_{}.sql", Local::now().format("%Y%m%d_%H%M%S"));
    tracing::info!(file_name = %file_name, bytes = script.len(), "Serving database backup");
    Ok(attachment(&file_name, "application/sql", script))
}

/// `POST /api/clear`: wipe every row, then reload the catalog.
pub async fn clear<S: QuestionStore + 'static>(
    State(state): State<AppState<S>>,
) -> Result<Json<Envelope<LoadReport>>, ApiError> {
    state.store.clear_all().await?;
    let report = load_initial(state.store.as_ref(), &state.catalog, false).await?;
    if !report.succeeded() {
        return Err(ApiError::Internal(format!(
            "Database cleared but {} of {} questions failed to reload",
            report.failed, report.attempted
        )));
    }
    Ok(Envelope::data_with_message(
        report,
        "Database cleared and reloaded",
    ))
}

/// Fallback for unknown routes.
pub async fn not_found() -> ApiError {
    ApiError::NotFound("Endpoint not found".to_string())
}
