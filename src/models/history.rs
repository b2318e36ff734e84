use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::TaskType;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CareLogEntry {
    pub id: Uuid,
    pub plant_id: Uuid,
    pub task_type: TaskType,
    pub performed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CareLogWithPlant {
    #[serde(flatten)]
    pub entry: CareLogEntry,
    pub plant_name: String,
    pub group_name: String,
}

/// Bulk completion: one log entry is created per (plant, task type) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformTasksInput {
    pub plant_ids: Vec<Uuid>,
    pub task_types: Vec<TaskType>,
    /// Defaults to now.
    pub performed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCareLogInput {
    pub task_type: Option<TaskType>,
    pub performed_at: Option<DateTime<Utc>>,
}

/// Relative time window for the history listing (`?time=`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HistoryWindow {
    Day,
    Week,
    Month,
}

impl HistoryWindow {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "day" => Some(Self::Day),
            "week" => Some(Self::Week),
            "month" => Some(Self::Month),
            _ => None,
        }
    }

    pub fn days(&self) -> i64 {
        match self {
            Self::Day => 1,
            Self::Week => 7,
            Self::Month => 30,
        }
    }
}
