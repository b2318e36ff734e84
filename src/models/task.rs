use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    Watering,
    Fertilizing,
    Repotting,
    Vitamins,
    Insecticide,
}

impl TaskType {
    pub const ALL: [TaskType; 5] = [
        Self::Watering,
        Self::Fertilizing,
        Self::Repotting,
        Self::Vitamins,
        Self::Insecticide,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Watering => "watering",
            Self::Fertilizing => "fertilizing",
            Self::Repotting => "repotting",
            Self::Vitamins => "vitamins",
            Self::Insecticide => "insecticide",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "watering" => Some(Self::Watering),
            "fertilizing" => Some(Self::Fertilizing),
            "repotting" => Some(Self::Repotting),
            "vitamins" => Some(Self::Vitamins),
            "insecticide" => Some(Self::Insecticide),
            _ => None,
        }
    }

    /// Frequency in days used to prefill a new plant when the request
    /// says nothing about this task type. Vitamins and insecticide have
    /// no sensible default and start untracked.
    pub fn default_frequency_days(&self) -> Option<u32> {
        match self {
            Self::Watering => Some(7),
            Self::Fertilizing => Some(30),
            Self::Repotting => Some(730),
            Self::Vitamins | Self::Insecticide => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskFrequency {
    pub id: Uuid,
    pub plant_id: Uuid,
    pub task_type: TaskType,
    /// Days between required occurrences. `None` means the task is not
    /// tracked for this plant and never produces warnings.
    pub frequency_days: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskFrequencyInput {
    pub task_type: TaskType,
    pub frequency_days: Option<u32>,
}
