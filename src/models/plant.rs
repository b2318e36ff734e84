use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{split_sort, TaskFrequencyInput};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plant {
    pub id: Uuid,
    pub group_id: Uuid,
    pub name: String,
    pub purchased_on: NaiveDate,
    pub notes: Option<String>,
    pub is_alive: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlantWithGroup {
    #[serde(flatten)]
    pub plant: Plant,
    pub group_name: String,
}

/// Listing row: the plant plus a flag for the warning marker shown next
/// to its name when any tracked task is overdue.
#[derive(Debug, Clone, Serialize)]
pub struct PlantListItem {
    #[serde(flatten)]
    pub plant: PlantWithGroup,
    pub needs_care: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlantInput {
    pub name: String,
    /// Defaults to the `Uncategorized` group.
    pub group_id: Option<Uuid>,
    /// Defaults to today.
    pub purchased_on: Option<NaiveDate>,
    pub notes: Option<String>,
    /// Task types absent from this list get their default frequency; an
    /// entry with a null `frequency_days` leaves the task untracked.
    #[serde(default)]
    pub frequencies: Vec<TaskFrequencyInput>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePlantInput {
    pub name: Option<String>,
    pub group_id: Option<Uuid>,
    pub purchased_on: Option<NaiveDate>,
    pub notes: Option<String>,
    /// Applied as a patch: a numeric entry upserts the frequency, a null
    /// entry removes it, unmentioned task types are left alone.
    #[serde(default)]
    pub frequencies: Vec<TaskFrequencyInput>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlantSortKey {
    Name,
    Group,
    Purchased,
}

impl PlantSortKey {
    pub fn parse(raw: Option<&str>) -> (Self, bool) {
        let Some(raw) = raw else {
            return (Self::Name, false);
        };
        let (key, desc) = split_sort(raw);
        let key = match key {
            "group" => Self::Group,
            "purchased" => Self::Purchased,
            _ => Self::Name,
        };
        (key, desc)
    }
}
