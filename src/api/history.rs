use std::collections::HashSet;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{Duration, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::db::Database;
use crate::models::{
    CareLogEntry, CareLogWithPlant, HistoryWindow, Page, PerformTasksInput, TaskType,
    UpdateCareLogInput,
};

use super::{ApiError, HistoryQuery};

pub(crate) async fn list(
    State(db): State<Database>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Page<CareLogWithPlant>>, ApiError> {
    let window = query.time.as_deref().and_then(HistoryWindow::from_str);
    let cutoff = window.map(|w| Utc::now() - Duration::days(w.days()));
    let page = db.list_history(query.filter.as_deref(), cutoff, query.page.unwrap_or(1))?;
    Ok(Json(page))
}

pub(crate) async fn update(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateCareLogInput>,
) -> Result<Json<CareLogEntry>, ApiError> {
    if !db.update_care_log(id, input)? {
        return Err(ApiError::NotFound);
    }
    let entry = db.get_care_log(id)?.ok_or(ApiError::NotFound)?;
    Ok(Json(entry))
}

pub(crate) async fn remove(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if db.delete_care_log(id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct PerformTasksResponse {
    pub created: u64,
}

pub(crate) async fn perform_tasks(
    State(db): State<Database>,
    Json(input): Json<PerformTasksInput>,
) -> Result<(StatusCode, Json<PerformTasksResponse>), ApiError> {
    if input.plant_ids.is_empty() {
        return Err(ApiError::Invalid("select at least one plant".into()));
    }
    if input.task_types.is_empty() {
        return Err(ApiError::Invalid("select at least one task type".into()));
    }

    let mut seen_plants = HashSet::new();
    let plant_ids: Vec<Uuid> = input
        .plant_ids
        .iter()
        .copied()
        .filter(|id| seen_plants.insert(*id))
        .collect();
    let mut seen_tasks = HashSet::new();
    let task_types: Vec<TaskType> = input
        .task_types
        .iter()
        .copied()
        .filter(|t| seen_tasks.insert(*t))
        .collect();

    for id in &plant_ids {
        let plant = db
            .get_plant(*id)?
            .ok_or_else(|| ApiError::Invalid(format!("unknown plant: {id}")))?;
        if !plant.is_alive {
            return Err(ApiError::Invalid(format!(
                "{} is in the graveyard and cannot be cared for",
                plant.name
            )));
        }
    }

    let performed_at = input.performed_at.unwrap_or_else(Utc::now);
    let created = db.record_care(&plant_ids, &task_types, performed_at)?;
    Ok((StatusCode::CREATED, Json(PerformTasksResponse { created })))
}
