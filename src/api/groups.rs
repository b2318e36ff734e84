use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use crate::db::Database;
use crate::models::{
    CreateGroupInput, GroupSortKey, GroupWithPlantCount, Page, PlantGroup, PlantSortKey,
    PlantWithGroup, UpdateGroupInput, DEFAULT_GROUP_NAME,
};

use super::{ApiError, PageSortQuery, SortQuery};

pub(crate) async fn list(
    State(db): State<Database>,
    Query(query): Query<SortQuery>,
) -> Result<Json<Vec<GroupWithPlantCount>>, ApiError> {
    let (key, desc) = GroupSortKey::parse(query.sort.as_deref());
    Ok(Json(db.list_groups(key, desc)?))
}

pub(crate) async fn create(
    State(db): State<Database>,
    Json(input): Json<CreateGroupInput>,
) -> Result<(StatusCode, Json<PlantGroup>), ApiError> {
    let name = valid_name(&input.name)?;
    if db.find_group_by_name(&name)?.is_some() {
        return Err(ApiError::Invalid(format!(
            "a group named '{name}' already exists"
        )));
    }
    Ok((StatusCode::CREATED, Json(db.create_group(&name)?)))
}

pub(crate) async fn detail(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Json<GroupWithPlantCount>, ApiError> {
    let group = db.get_group_with_count(id)?.ok_or(ApiError::NotFound)?;
    Ok(Json(group))
}

pub(crate) async fn update(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateGroupInput>,
) -> Result<Json<GroupWithPlantCount>, ApiError> {
    let group = db.get_group(id)?.ok_or(ApiError::NotFound)?;

    if let Some(raw) = input.name {
        let name = valid_name(&raw)?;
        if group.name == DEFAULT_GROUP_NAME && name != DEFAULT_GROUP_NAME {
            return Err(ApiError::Invalid(format!(
                "the '{DEFAULT_GROUP_NAME}' group cannot be renamed"
            )));
        }
        if name != group.name && db.find_group_by_name(&name)?.is_some() {
            return Err(ApiError::Invalid(format!(
                "a group named '{name}' already exists"
            )));
        }
        db.update_group(id, &name)?;
    }

    let group = db.get_group_with_count(id)?.ok_or(ApiError::NotFound)?;
    Ok(Json(group))
}

pub(crate) async fn remove(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let group = db.get_group(id)?.ok_or(ApiError::NotFound)?;
    if group.name == DEFAULT_GROUP_NAME {
        return Err(ApiError::Invalid(format!(
            "the '{DEFAULT_GROUP_NAME}' group cannot be deleted"
        )));
    }
    db.delete_group(id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) async fn plants(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Query(query): Query<PageSortQuery>,
) -> Result<Json<Page<PlantWithGroup>>, ApiError> {
    db.get_group(id)?.ok_or(ApiError::NotFound)?;
    let (key, desc) = PlantSortKey::parse(query.sort.as_deref());
    Ok(Json(db.list_plants_in_group(
        id,
        key,
        desc,
        query.page.unwrap_or(1),
    )?))
}

fn valid_name(raw: &str) -> Result<String, ApiError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ApiError::Invalid("group name must not be empty".into()));
    }
    Ok(name.to_string())
}
