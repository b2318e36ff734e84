use std::collections::HashSet;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::care::{self, OverdueTask};
use crate::db::Database;
use crate::models::{
    CauseOfDeath, CreatePlantInput, GraveyardEntry, GraveyardRow, GraveyardSortKey,
    MarkDeadInput, Page, PlantListItem, PlantSortKey, PlantWithGroup, TaskFrequency,
    TaskFrequencyInput, UpdatePlantInput,
};

use super::{ApiError, ListQuery, SortQuery};

#[derive(Debug, Serialize)]
pub(crate) struct PlantDetail {
    #[serde(flatten)]
    pub plant: PlantWithGroup,
    pub frequencies: Vec<TaskFrequency>,
    pub warnings: Vec<OverdueTask>,
}

pub(crate) async fn list(
    State(db): State<Database>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Page<PlantListItem>>, ApiError> {
    let (key, desc) = PlantSortKey::parse(query.sort.as_deref());
    let page = db.list_plants(query.filter.as_deref(), key, desc, query.page.unwrap_or(1))?;

    let today = Utc::now().date_naive();
    let needy: HashSet<Uuid> = care::warnings(&db, today)?
        .into_iter()
        .map(|w| w.plant_id)
        .collect();

    let items = page
        .items
        .into_iter()
        .map(|plant| PlantListItem {
            needs_care: needy.contains(&plant.plant.id),
            plant,
        })
        .collect();

    Ok(Json(Page {
        items,
        total: page.total,
        page: page.page,
        page_size: page.page_size,
    }))
}

pub(crate) async fn create(
    State(db): State<Database>,
    Json(input): Json<CreatePlantInput>,
) -> Result<(StatusCode, Json<PlantDetail>), ApiError> {
    validate_name(&input.name)?;
    validate_purchase_date(input.purchased_on)?;
    validate_frequencies(&input.frequencies)?;
    if let Some(group_id) = input.group_id {
        db.get_group(group_id)?
            .ok_or_else(|| ApiError::Invalid("unknown group".into()))?;
    }

    let plant = db.create_plant(input)?;
    let detail = load_detail(&db, plant)?;
    Ok((StatusCode::CREATED, Json(detail)))
}

pub(crate) async fn detail(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Json<PlantDetail>, ApiError> {
    let plant = db.get_plant_with_group(id)?.ok_or(ApiError::NotFound)?;
    Ok(Json(load_detail(&db, plant)?))
}

pub(crate) async fn update(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdatePlantInput>,
) -> Result<Json<PlantDetail>, ApiError> {
    if let Some(name) = &input.name {
        validate_name(name)?;
    }
    validate_purchase_date(input.purchased_on)?;
    validate_frequencies(&input.frequencies)?;
    if let Some(group_id) = input.group_id {
        db.get_group(group_id)?
            .ok_or_else(|| ApiError::Invalid("unknown group".into()))?;
    }

    if !db.update_plant(id, input)? {
        return Err(ApiError::NotFound);
    }
    let plant = db.get_plant_with_group(id)?.ok_or(ApiError::NotFound)?;
    Ok(Json(load_detail(&db, plant)?))
}

pub(crate) async fn remove(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if db.delete_plant(id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}

pub(crate) async fn mark_dead(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Json(input): Json<MarkDeadInput>,
) -> Result<Json<GraveyardEntry>, ApiError> {
    let cause = input.cause_of_death.unwrap_or(CauseOfDeath::Unknown);
    let today = Utc::now().date_naive();
    let entry = db
        .mark_plant_dead(id, cause, today)?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(entry))
}

pub(crate) async fn graveyard(
    State(db): State<Database>,
    Query(query): Query<SortQuery>,
) -> Result<Json<Vec<GraveyardRow>>, ApiError> {
    let (key, desc) = GraveyardSortKey::parse(query.sort.as_deref());
    Ok(Json(db.list_graveyard(key, desc)?))
}

fn load_detail(db: &Database, plant: PlantWithGroup) -> Result<PlantDetail, ApiError> {
    let frequencies = db.task_frequencies(plant.plant.id)?;
    let history = db.care_logs_for_plant(plant.plant.id)?;
    let warnings = care::overdue_tasks(&plant.plant, &frequencies, &history, Utc::now().date_naive());
    Ok(PlantDetail {
        plant,
        frequencies,
        warnings,
    })
}

fn validate_name(name: &str) -> Result<(), ApiError> {
    if name.trim().is_empty() {
        return Err(ApiError::Invalid("name must not be empty".into()));
    }
    Ok(())
}

fn validate_purchase_date(purchased_on: Option<NaiveDate>) -> Result<(), ApiError> {
    if let Some(date) = purchased_on {
        if date > Utc::now().date_naive() {
            return Err(ApiError::Invalid(
                "purchase date cannot be in the future".into(),
            ));
        }
    }
    Ok(())
}

fn validate_frequencies(frequencies: &[TaskFrequencyInput]) -> Result<(), ApiError> {
    let mut seen = HashSet::new();
    for entry in frequencies {
        if !seen.insert(entry.task_type) {
            return Err(ApiError::Invalid(format!(
                "duplicate frequency for {}",
                entry.task_type.as_str()
            )));
        }
        if entry.frequency_days == Some(0) {
            return Err(ApiError::Invalid(
                "frequency must be a positive number of days".into(),
            ));
        }
    }
    Ok(())
}
