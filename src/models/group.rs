use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::split_sort;

/// Name of the catch-all group that always exists. Plants created without
/// a group land here, as do plants whose group is deleted.
pub const DEFAULT_GROUP_NAME: &str = "Uncategorized";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlantGroup {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupWithPlantCount {
    #[serde(flatten)]
    pub group: PlantGroup,
    pub living_plants: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGroupInput {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateGroupInput {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupSortKey {
    Name,
    Plants,
}

impl GroupSortKey {
    /// Unknown keys fall back to the default, matching how the listing
    /// views have always behaved.
    pub fn parse(raw: Option<&str>) -> (Self, bool) {
        let Some(raw) = raw else {
            return (Self::Name, false);
        };
        let (key, desc) = split_sort(raw);
        let key = match key {
            "plants" => Self::Plants,
            _ => Self::Name,
        };
        (key, desc)
    }
}
