//! Overdue-task evaluation.
//!
//! The evaluator is a pure function: it never reads the clock or the
//! database, so every caller passes `today` in explicitly. A tracked task
//! is due `frequency_days` after it was last performed (or after the
//! purchase date if it never was), and overdue once `today` is past that.

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::db::Database;
use crate::models::{split_sort, CareLogEntry, Plant, TaskFrequency, TaskType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OverdueTask {
    pub task_type: TaskType,
    pub days_overdue: u32,
}

/// Computes which tracked tasks are overdue for one plant as of `today`.
///
/// Frequency entries without a day count are skipped entirely. When
/// several log entries share the latest timestamp, the one with the
/// greatest id counts as most recent; the choice never changes the due
/// date. Results come back in task-type order.
pub fn overdue_tasks(
    plant: &Plant,
    frequencies: &[TaskFrequency],
    history: &[CareLogEntry],
    today: NaiveDate,
) -> Vec<OverdueTask> {
    let mut overdue = Vec::new();
    for frequency in frequencies {
        let Some(days) = frequency.frequency_days else {
            continue;
        };
        let last = history
            .iter()
            .filter(|log| log.task_type == frequency.task_type)
            .max_by_key(|log| (log.performed_at, log.id))
            .map(|log| log.performed_at.date_naive())
            .unwrap_or(plant.purchased_on);
        let Some(due) = last.checked_add_days(chrono::Days::new(u64::from(days))) else {
            continue;
        };
        if today > due {
            overdue.push(OverdueTask {
                task_type: frequency.task_type,
                days_overdue: (today - due).num_days() as u32,
            });
        }
    }
    overdue.sort_by_key(|task| task.task_type);
    overdue
}

/// One row of the warnings listing: a plant with an overdue task.
#[derive(Debug, Clone, Serialize)]
pub struct CareWarning {
    pub plant_id: Uuid,
    pub plant_name: String,
    pub group_id: Uuid,
    pub group_name: String,
    pub task_type: TaskType,
    pub days_overdue: u32,
}

/// Runs the evaluator over every living plant.
pub fn warnings(db: &Database, today: NaiveDate) -> anyhow::Result<Vec<CareWarning>> {
    let mut out = Vec::new();
    for plant in db.living_plants()? {
        let frequencies = db.task_frequencies(plant.plant.id)?;
        let history = db.care_logs_for_plant(plant.plant.id)?;
        for task in overdue_tasks(&plant.plant, &frequencies, &history, today) {
            out.push(CareWarning {
                plant_id: plant.plant.id,
                plant_name: plant.plant.name.clone(),
                group_id: plant.plant.group_id,
                group_name: plant.group_name.clone(),
                task_type: task.task_type,
                days_overdue: task.days_overdue,
            });
        }
    }
    Ok(out)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningSortKey {
    Plant,
    Group,
    Task,
    DaysOverdue,
}

impl WarningSortKey {
    pub fn parse(raw: Option<&str>) -> (Self, bool) {
        let Some(raw) = raw else {
            return (Self::Plant, false);
        };
        let (key, desc) = split_sort(raw);
        let key = match key {
            "group" => Self::Group,
            "task" => Self::Task,
            "days_overdue" => Self::DaysOverdue,
            _ => Self::Plant,
        };
        (key, desc)
    }
}

/// In-memory sort of the warnings listing; the warning set is computed
/// per request, never stored.
pub fn sort_warnings(warnings: &mut [CareWarning], key: WarningSortKey, desc: bool) {
    match key {
        WarningSortKey::Plant => warnings.sort_by_key(|w| w.plant_name.to_lowercase()),
        WarningSortKey::Group => warnings.sort_by_key(|w| w.group_name.to_lowercase()),
        WarningSortKey::Task => warnings.sort_by_key(|w| w.task_type),
        WarningSortKey::DaysOverdue => warnings.sort_by_key(|w| w.days_overdue),
    }
    if desc {
        warnings.reverse();
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, NaiveDate, Utc};
    use uuid::Uuid;

    use super::*;
    use crate::models::{CareLogEntry, Plant, TaskFrequency, TaskType};

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn timestamp(s: &str) -> DateTime<Utc> {
        format!("{s}T12:00:00Z").parse().unwrap()
    }

    fn plant(purchased: &str) -> Plant {
        Plant {
            id: Uuid::new_v4(),
            group_id: Uuid::new_v4(),
            name: "Boston fern".into(),
            purchased_on: date(purchased),
            notes: None,
            is_alive: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn frequency(plant: &Plant, task_type: TaskType, days: Option<u32>) -> TaskFrequency {
        TaskFrequency {
            id: Uuid::new_v4(),
            plant_id: plant.id,
            task_type,
            frequency_days: days,
        }
    }

    fn log(plant: &Plant, task_type: TaskType, performed: &str) -> CareLogEntry {
        CareLogEntry {
            id: Uuid::new_v4(),
            plant_id: plant.id,
            task_type,
            performed_at: timestamp(performed),
        }
    }

    #[test]
    fn falls_back_to_purchase_date_when_never_logged() {
        // Purchased 2024-01-01, watering every 7 days, today 2024-01-20:
        // due 2024-01-08, overdue by 12.
        let plant = plant("2024-01-01");
        let frequencies = [frequency(&plant, TaskType::Watering, Some(7))];

        let overdue = overdue_tasks(&plant, &frequencies, &[], date("2024-01-20"));

        assert_eq!(
            overdue,
            vec![OverdueTask {
                task_type: TaskType::Watering,
                days_overdue: 12,
            }]
        );
    }

    #[test]
    fn recent_log_pushes_due_date_out() {
        // Watered 2024-01-15 with a 7 day frequency: due 2024-01-22, so
        // nothing is overdue on 2024-01-20.
        let plant = plant("2024-01-01");
        let frequencies = [frequency(&plant, TaskType::Watering, Some(7))];
        let history = [log(&plant, TaskType::Watering, "2024-01-15")];

        let overdue = overdue_tasks(&plant, &frequencies, &history, date("2024-01-20"));

        assert!(overdue.is_empty());
    }

    #[test]
    fn untracked_task_never_warns() {
        let plant = plant("2020-01-01");
        let frequencies = [frequency(&plant, TaskType::Vitamins, None)];
        let history = [log(&plant, TaskType::Vitamins, "2020-02-01")];

        let overdue = overdue_tasks(&plant, &frequencies, &history, date("2024-01-01"));

        assert!(overdue.is_empty());
    }

    #[test]
    fn due_date_itself_is_not_overdue() {
        let plant = plant("2024-01-01");
        let frequencies = [frequency(&plant, TaskType::Watering, Some(7))];

        let on_due_date = overdue_tasks(&plant, &frequencies, &[], date("2024-01-08"));
        assert!(on_due_date.is_empty());

        let day_after = overdue_tasks(&plant, &frequencies, &[], date("2024-01-09"));
        assert_eq!(day_after[0].days_overdue, 1);
    }

    #[test]
    fn logging_today_clears_the_warning() {
        let plant = plant("2024-01-01");
        let frequencies = [frequency(&plant, TaskType::Watering, Some(7))];
        let today = date("2024-01-20");

        assert_eq!(overdue_tasks(&plant, &frequencies, &[], today).len(), 1);

        let history = [log(&plant, TaskType::Watering, "2024-01-20")];
        assert!(overdue_tasks(&plant, &frequencies, &history, today).is_empty());
    }

    #[test]
    fn only_the_latest_log_counts() {
        let plant = plant("2024-01-01");
        let frequencies = [frequency(&plant, TaskType::Watering, Some(7))];
        let history = [
            log(&plant, TaskType::Watering, "2024-01-02"),
            log(&plant, TaskType::Watering, "2024-01-10"),
            log(&plant, TaskType::Watering, "2024-01-05"),
        ];

        // Latest log 2024-01-10, due 2024-01-17, overdue by 3 on the 20th.
        let overdue = overdue_tasks(&plant, &frequencies, &history, date("2024-01-20"));
        assert_eq!(overdue[0].days_overdue, 3);
    }

    #[test]
    fn same_day_duplicates_do_not_change_the_due_date() {
        let plant = plant("2024-01-01");
        let frequencies = [frequency(&plant, TaskType::Watering, Some(7))];
        let history = [
            log(&plant, TaskType::Watering, "2024-01-10"),
            log(&plant, TaskType::Watering, "2024-01-10"),
        ];

        let overdue = overdue_tasks(&plant, &frequencies, &history, date("2024-01-20"));
        assert_eq!(overdue[0].days_overdue, 3);
    }

    #[test]
    fn evaluation_is_idempotent() {
        let plant = plant("2024-01-01");
        let frequencies = [
            frequency(&plant, TaskType::Watering, Some(7)),
            frequency(&plant, TaskType::Fertilizing, Some(3)),
        ];
        let history = [log(&plant, TaskType::Watering, "2024-01-02")];
        let today = date("2024-01-20");

        let first = overdue_tasks(&plant, &frequencies, &history, today);
        let second = overdue_tasks(&plant, &frequencies, &history, today);
        assert_eq!(first, second);
    }

    #[test]
    fn results_come_back_in_task_type_order() {
        let plant = plant("2023-01-01");
        let frequencies = [
            frequency(&plant, TaskType::Repotting, Some(30)),
            frequency(&plant, TaskType::Watering, Some(7)),
            frequency(&plant, TaskType::Fertilizing, Some(14)),
        ];

        let overdue = overdue_tasks(&plant, &frequencies, &[], date("2023-06-01"));
        let order: Vec<TaskType> = overdue.iter().map(|t| t.task_type).collect();
        assert_eq!(
            order,
            vec![TaskType::Watering, TaskType::Fertilizing, TaskType::Repotting]
        );
    }

    #[test]
    fn logs_for_other_tasks_are_ignored() {
        let plant = plant("2024-01-01");
        let frequencies = [frequency(&plant, TaskType::Watering, Some(7))];
        let history = [log(&plant, TaskType::Fertilizing, "2024-01-19")];

        // Fertilizing yesterday says nothing about watering.
        let overdue = overdue_tasks(&plant, &frequencies, &history, date("2024-01-20"));
        assert_eq!(overdue[0].days_overdue, 12);
    }
}
