use std::collections::HashSet;

use axum::extract::{Query, State};
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use crate::care::{self, CareWarning, WarningSortKey};
use crate::db::Database;

use super::{ApiError, SortQuery};

#[derive(Debug, Serialize)]
pub(crate) struct Overview {
    pub living_plants: u64,
    pub groups: u64,
    pub plants_needing_care: u64,
}

pub(crate) async fn overview(State(db): State<Database>) -> Result<Json<Overview>, ApiError> {
    let today = Utc::now().date_naive();
    let warnings = care::warnings(&db, today)?;
    let plants_needing_care = warnings
        .iter()
        .map(|w| w.plant_id)
        .collect::<HashSet<_>>()
        .len() as u64;

    Ok(Json(Overview {
        living_plants: db.count_living_plants()?,
        groups: db.count_groups()?,
        plants_needing_care,
    }))
}

pub(crate) async fn list_warnings(
    State(db): State<Database>,
    Query(query): Query<SortQuery>,
) -> Result<Json<Vec<CareWarning>>, ApiError> {
    let (key, desc) = WarningSortKey::parse(query.sort.as_deref());
    let mut warnings = care::warnings(&db, Utc::now().date_naive())?;
    care::sort_warnings(&mut warnings, key, desc);
    Ok(Json(warnings))
}
