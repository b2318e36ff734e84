use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::split_sort;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CauseOfDeath {
    Overwatering,
    Underwatering,
    PestInfestation,
    LackOfLight,
    TooMuchLight,
    NutrientDeficiency,
    Unknown,
}

impl CauseOfDeath {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Overwatering => "overwatering",
            Self::Underwatering => "underwatering",
            Self::PestInfestation => "pest_infestation",
            Self::LackOfLight => "lack_of_light",
            Self::TooMuchLight => "too_much_light",
            Self::NutrientDeficiency => "nutrient_deficiency",
            Self::Unknown => "unknown",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "overwatering" => Some(Self::Overwatering),
            "underwatering" => Some(Self::Underwatering),
            "pest_infestation" => Some(Self::PestInfestation),
            "lack_of_light" => Some(Self::LackOfLight),
            "too_much_light" => Some(Self::TooMuchLight),
            "nutrient_deficiency" => Some(Self::NutrientDeficiency),
            "unknown" => Some(Self::Unknown),
            _ => None,
        }
    }
}

/// Death record for a plant. Written once when the plant is marked dead
/// and never updated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraveyardEntry {
    pub id: Uuid,
    pub plant_id: Uuid,
    pub died_on: NaiveDate,
    pub cause_of_death: CauseOfDeath,
}

#[derive(Debug, Clone, Serialize)]
pub struct GraveyardRow {
    #[serde(flatten)]
    pub entry: GraveyardEntry,
    pub plant_name: String,
    pub group_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkDeadInput {
    /// Defaults to `unknown`.
    #[serde(default)]
    pub cause_of_death: Option<CauseOfDeath>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraveyardSortKey {
    Name,
    Cause,
    Died,
}

impl GraveyardSortKey {
    pub fn parse(raw: Option<&str>) -> (Self, bool) {
        let Some(raw) = raw else {
            return (Self::Name, false);
        };
        let (key, desc) = split_sort(raw);
        let key = match key {
            "cause" => Self::Cause,
            "died" => Self::Died,
            _ => Self::Name,
        };
        (key, desc)
    }
}
