//! SQLite persistence. One connection behind a mutex is plenty for a
//! single-user tracker; every method takes the lock, runs its queries,
//! and returns plain model structs.

mod schema;

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{bail, Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

use crate::models::{
    CareLogEntry, CareLogWithPlant, CauseOfDeath, CreatePlantInput, GraveyardEntry,
    GraveyardRow, GraveyardSortKey, GroupSortKey, GroupWithPlantCount, Page, Plant, PlantGroup,
    PlantSortKey, PlantWithGroup, TaskFrequency, TaskType, UpdateCareLogInput, UpdatePlantInput,
    DEFAULT_GROUP_NAME, PAGE_SIZE,
};

#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("failed to open database at {}", path.display()))?;
        Self::new(conn)
    }

    /// Opens the database in the platform data directory, creating it on
    /// first use.
    pub fn open_default() -> Result<Self> {
        let dirs = directories::ProjectDirs::from("dev", "leaflog", "leaflog")
            .context("could not determine a data directory")?;
        let data_dir = dirs.data_dir();
        std::fs::create_dir_all(data_dir)
            .with_context(|| format!("failed to create {}", data_dir.display()))?;
        Self::open(&data_dir.join("leaflog.db"))
    }

    pub fn open_memory() -> Result<Self> {
        Self::new(Connection::open_in_memory()?)
    }

    fn new(conn: Connection) -> Result<Self> {
        conn.pragma_update(None, "foreign_keys", true)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Applies the schema and makes sure the default group exists.
    pub fn migrate(&self) -> Result<()> {
        let conn = self.conn();
        conn.execute_batch(schema::SCHEMA)?;
        default_group_conn(&conn)?;
        Ok(())
    }

    // GROUPS ------------------------------------------------------------

    pub fn default_group(&self) -> Result<PlantGroup> {
        default_group_conn(&self.conn())
    }

    pub fn create_group(&self, name: &str) -> Result<PlantGroup> {
        let group = PlantGroup {
            id: Uuid::new_v4(),
            name: name.to_string(),
            created_at: Utc::now(),
        };
        self.conn().execute(
            "INSERT INTO plant_groups (id, name, created_at) VALUES (?1, ?2, ?3)",
            params![group.id.to_string(), group.name, group.created_at],
        )?;
        tracing::debug!("created group {} ({})", group.name, group.id);
        Ok(group)
    }

    pub fn get_group(&self, id: Uuid) -> Result<Option<PlantGroup>> {
        get_group_conn(&self.conn(), id)
    }

    pub fn find_group_by_name(&self, name: &str) -> Result<Option<PlantGroup>> {
        Ok(self
            .conn()
            .query_row(
                "SELECT id, name, created_at FROM plant_groups WHERE LOWER(name) = LOWER(?1)",
                params![name],
                group_from_row,
            )
            .optional()?)
    }

    pub fn get_group_with_count(&self, id: Uuid) -> Result<Option<GroupWithPlantCount>> {
        Ok(self
            .conn()
            .query_row(
                "SELECT g.id, g.name, g.created_at, \
                    (SELECT COUNT(*) FROM plants p WHERE p.group_id = g.id AND p.is_alive = 1) \
                 FROM plant_groups g WHERE g.id = ?1",
                params![id.to_string()],
                group_with_count_from_row,
            )
            .optional()?)
    }

    pub fn list_groups(&self, key: GroupSortKey, desc: bool) -> Result<Vec<GroupWithPlantCount>> {
        let column = match key {
            GroupSortKey::Name => "LOWER(g.name)",
            GroupSortKey::Plants => "living",
        };
        let sql = format!(
            "SELECT g.id, g.name, g.created_at, \
                (SELECT COUNT(*) FROM plants p WHERE p.group_id = g.id AND p.is_alive = 1) AS living \
             FROM plant_groups g ORDER BY {} {}, g.id",
            column,
            direction(desc)
        );
        let conn = self.conn();
        let mut stmt = conn.prepare(&sql)?;
        let groups = stmt
            .query_map([], group_with_count_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(groups)
    }

    pub fn update_group(&self, id: Uuid, name: &str) -> Result<bool> {
        let changed = self.conn().execute(
            "UPDATE plant_groups SET name = ?2 WHERE id = ?1",
            params![id.to_string(), name],
        )?;
        Ok(changed > 0)
    }

    /// Deletes a group after reassigning its plants to the default group.
    /// The default group itself is never deletable.
    pub fn delete_group(&self, id: Uuid) -> Result<bool> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;
        let Some(group) = get_group_conn(&tx, id)? else {
            return Ok(false);
        };
        if group.name == DEFAULT_GROUP_NAME {
            bail!("the '{}' group cannot be deleted", DEFAULT_GROUP_NAME);
        }
        let fallback = default_group_conn(&tx)?;
        tx.execute(
            "UPDATE plants SET group_id = ?2 WHERE group_id = ?1",
            params![id.to_string(), fallback.id.to_string()],
        )?;
        tx.execute(
            "DELETE FROM plant_groups WHERE id = ?1",
            params![id.to_string()],
        )?;
        tx.commit()?;
        Ok(true)
    }

    pub fn count_groups(&self) -> Result<u64> {
        Ok(self
            .conn()
            .query_row("SELECT COUNT(*) FROM plant_groups", [], |row| row.get(0))?)
    }

    // PLANTS ------------------------------------------------------------

    pub fn create_plant(&self, input: CreatePlantInput) -> Result<PlantWithGroup> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;

        let group = match input.group_id {
            Some(id) => get_group_conn(&tx, id)?.context("group does not exist")?,
            None => default_group_conn(&tx)?,
        };

        let now = Utc::now();
        let plant = Plant {
            id: Uuid::new_v4(),
            group_id: group.id,
            name: input.name,
            purchased_on: input.purchased_on.unwrap_or_else(|| now.date_naive()),
            notes: input.notes,
            is_alive: true,
            created_at: now,
            updated_at: now,
        };
        tx.execute(
            "INSERT INTO plants (id, group_id, name, purchased_on, notes, is_alive, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                plant.id.to_string(),
                plant.group_id.to_string(),
                plant.name,
                plant.purchased_on,
                plant.notes,
                plant.is_alive,
                plant.created_at,
                plant.updated_at
            ],
        )?;

        for task_type in TaskType::ALL {
            let frequency = match input.frequencies.iter().find(|f| f.task_type == task_type) {
                Some(entry) => entry.frequency_days,
                None => task_type.default_frequency_days(),
            };
            if let Some(days) = frequency {
                tx.execute(
                    "INSERT INTO task_frequencies (id, plant_id, task_type, frequency_days) \
                     VALUES (?1, ?2, ?3, ?4)",
                    params![
                        Uuid::new_v4().to_string(),
                        plant.id.to_string(),
                        task_type.as_str(),
                        days
                    ],
                )?;
            }
        }

        tx.commit()?;
        tracing::debug!("created plant {} ({})", plant.name, plant.id);
        Ok(PlantWithGroup {
            plant,
            group_name: group.name,
        })
    }

    pub fn get_plant(&self, id: Uuid) -> Result<Option<Plant>> {
        get_plant_conn(&self.conn(), id)
    }

    pub fn get_plant_with_group(&self, id: Uuid) -> Result<Option<PlantWithGroup>> {
        Ok(self
            .conn()
            .query_row(
                &format!("{PLANT_WITH_GROUP_SELECT} WHERE p.id = ?1"),
                params![id.to_string()],
                plant_with_group_from_row,
            )
            .optional()?)
    }

    /// Paged listing of living plants; `filter` matches plant or group
    /// name as a case-insensitive substring.
    pub fn list_plants(
        &self,
        filter: Option<&str>,
        key: PlantSortKey,
        desc: bool,
        page: u32,
    ) -> Result<Page<PlantWithGroup>> {
        let pattern = filter.map(|f| format!("%{}%", f.to_lowercase()));
        let where_clause =
            "p.is_alive = 1 AND (?1 IS NULL OR LOWER(p.name) LIKE ?1 OR LOWER(g.name) LIKE ?1)";

        let conn = self.conn();
        let total: u64 = conn.query_row(
            &format!(
                "SELECT COUNT(*) FROM plants p JOIN plant_groups g ON g.id = p.group_id \
                 WHERE {where_clause}"
            ),
            params![pattern],
            |row| row.get(0),
        )?;

        let page = page.max(1);
        let sql = format!(
            "{PLANT_WITH_GROUP_SELECT} WHERE {where_clause} \
             ORDER BY {}, p.id LIMIT ?2 OFFSET ?3",
            plant_order(key, desc)
        );
        let mut stmt = conn.prepare(&sql)?;
        let items = stmt
            .query_map(
                params![pattern, PAGE_SIZE, (page - 1) * PAGE_SIZE],
                plant_with_group_from_row,
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(Page {
            items,
            total,
            page,
            page_size: PAGE_SIZE,
        })
    }

    pub fn list_plants_in_group(
        &self,
        group_id: Uuid,
        key: PlantSortKey,
        desc: bool,
        page: u32,
    ) -> Result<Page<PlantWithGroup>> {
        let where_clause = "p.is_alive = 1 AND p.group_id = ?1";

        let conn = self.conn();
        let total: u64 = conn.query_row(
            &format!("SELECT COUNT(*) FROM plants p WHERE {where_clause}"),
            params![group_id.to_string()],
            |row| row.get(0),
        )?;

        // Sorting by group is meaningless inside one group.
        let key = match key {
            PlantSortKey::Group => PlantSortKey::Name,
            other => other,
        };
        let page = page.max(1);
        let sql = format!(
            "{PLANT_WITH_GROUP_SELECT} WHERE {where_clause} \
             ORDER BY {}, p.id LIMIT ?2 OFFSET ?3",
            plant_order(key, desc)
        );
        let mut stmt = conn.prepare(&sql)?;
        let items = stmt
            .query_map(
                params![group_id.to_string(), PAGE_SIZE, (page - 1) * PAGE_SIZE],
                plant_with_group_from_row,
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(Page {
            items,
            total,
            page,
            page_size: PAGE_SIZE,
        })
    }

    /// Every living plant, unpaged. Used by the warning collector and the
    /// perform-tasks selection list.
    pub fn living_plants(&self) -> Result<Vec<PlantWithGroup>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "{PLANT_WITH_GROUP_SELECT} WHERE p.is_alive = 1 ORDER BY LOWER(p.name), p.id"
        ))?;
        let plants = stmt
            .query_map([], plant_with_group_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(plants)
    }

    pub fn update_plant(&self, id: Uuid, input: UpdatePlantInput) -> Result<bool> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;
        let Some(mut plant) = get_plant_conn(&tx, id)? else {
            return Ok(false);
        };

        if let Some(name) = input.name {
            plant.name = name;
        }
        if let Some(group_id) = input.group_id {
            plant.group_id = group_id;
        }
        if let Some(purchased_on) = input.purchased_on {
            plant.purchased_on = purchased_on;
        }
        if let Some(notes) = input.notes {
            plant.notes = Some(notes);
        }
        plant.updated_at = Utc::now();

        tx.execute(
            "UPDATE plants SET group_id = ?2, name = ?3, purchased_on = ?4, notes = ?5, updated_at = ?6 \
             WHERE id = ?1",
            params![
                plant.id.to_string(),
                plant.group_id.to_string(),
                plant.name,
                plant.purchased_on,
                plant.notes,
                plant.updated_at
            ],
        )?;

        for entry in &input.frequencies {
            match entry.frequency_days {
                Some(days) => {
                    tx.execute(
                        "INSERT INTO task_frequencies (id, plant_id, task_type, frequency_days) \
                         VALUES (?1, ?2, ?3, ?4) \
                         ON CONFLICT(plant_id, task_type) \
                         DO UPDATE SET frequency_days = excluded.frequency_days",
                        params![
                            Uuid::new_v4().to_string(),
                            id.to_string(),
                            entry.task_type.as_str(),
                            days
                        ],
                    )?;
                }
                None => {
                    tx.execute(
                        "DELETE FROM task_frequencies WHERE plant_id = ?1 AND task_type = ?2",
                        params![id.to_string(), entry.task_type.as_str()],
                    )?;
                }
            }
        }

        tx.commit()?;
        Ok(true)
    }

    /// Deletes a plant; frequencies, care logs and any graveyard entry go
    /// with it via the cascading foreign keys.
    pub fn delete_plant(&self, id: Uuid) -> Result<bool> {
        let changed = self
            .conn()
            .execute("DELETE FROM plants WHERE id = ?1", params![id.to_string()])?;
        Ok(changed > 0)
    }

    /// Marks a plant dead and writes its graveyard entry. Calling this on
    /// an already-dead plant changes nothing and returns the existing
    /// entry; `None` means the plant does not exist.
    pub fn mark_plant_dead(
        &self,
        id: Uuid,
        cause: CauseOfDeath,
        died_on: NaiveDate,
    ) -> Result<Option<GraveyardEntry>> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;
        let Some(plant) = get_plant_conn(&tx, id)? else {
            return Ok(None);
        };

        if !plant.is_alive {
            let existing = tx
                .query_row(
                    "SELECT id, plant_id, died_on, cause_of_death FROM graveyard WHERE plant_id = ?1",
                    params![id.to_string()],
                    graveyard_from_row,
                )
                .optional()?
                .context("dead plant has no graveyard entry")?;
            return Ok(Some(existing));
        }

        tx.execute(
            "UPDATE plants SET is_alive = 0, updated_at = ?2 WHERE id = ?1",
            params![id.to_string(), Utc::now()],
        )?;
        let entry = GraveyardEntry {
            id: Uuid::new_v4(),
            plant_id: id,
            died_on,
            cause_of_death: cause,
        };
        tx.execute(
            "INSERT INTO graveyard (id, plant_id, died_on, cause_of_death) VALUES (?1, ?2, ?3, ?4)",
            params![
                entry.id.to_string(),
                entry.plant_id.to_string(),
                entry.died_on,
                entry.cause_of_death.as_str()
            ],
        )?;
        tx.commit()?;
        tracing::debug!("moved plant {} to the graveyard", plant.name);
        Ok(Some(entry))
    }

    pub fn count_living_plants(&self) -> Result<u64> {
        Ok(self.conn().query_row(
            "SELECT COUNT(*) FROM plants WHERE is_alive = 1",
            [],
            |row| row.get(0),
        )?)
    }

    // TASK FREQUENCIES ---------------------------------------------------

    pub fn task_frequencies(&self, plant_id: Uuid) -> Result<Vec<TaskFrequency>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT id, plant_id, task_type, frequency_days FROM task_frequencies \
             WHERE plant_id = ?1 ORDER BY task_type",
        )?;
        let frequencies = stmt
            .query_map(params![plant_id.to_string()], frequency_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(frequencies)
    }

    // CARE LOGS ----------------------------------------------------------

    /// Bulk completion: inserts one log row per (plant, task type) pair.
    pub fn record_care(
        &self,
        plant_ids: &[Uuid],
        task_types: &[TaskType],
        performed_at: DateTime<Utc>,
    ) -> Result<u64> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;
        let mut created = 0;
        for plant_id in plant_ids {
            for task_type in task_types {
                tx.execute(
                    "INSERT INTO care_logs (id, plant_id, task_type, performed_at) \
                     VALUES (?1, ?2, ?3, ?4)",
                    params![
                        Uuid::new_v4().to_string(),
                        plant_id.to_string(),
                        task_type.as_str(),
                        performed_at
                    ],
                )?;
                created += 1;
            }
        }
        tx.commit()?;
        tracing::debug!("recorded {} care log entries", created);
        Ok(created)
    }

    /// Full history for one plant, newest first.
    pub fn care_logs_for_plant(&self, plant_id: Uuid) -> Result<Vec<CareLogEntry>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT id, plant_id, task_type, performed_at FROM care_logs \
             WHERE plant_id = ?1 ORDER BY performed_at DESC, id DESC",
        )?;
        let logs = stmt
            .query_map(params![plant_id.to_string()], care_log_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(logs)
    }

    /// Paged history across all plants, newest first. `filter` matches
    /// the task type as a substring and plant/group names as a prefix;
    /// `cutoff` drops entries older than the requested window.
    pub fn list_history(
        &self,
        filter: Option<&str>,
        cutoff: Option<DateTime<Utc>>,
        page: u32,
    ) -> Result<Page<CareLogWithPlant>> {
        let needle = filter.map(str::to_lowercase);
        let where_clause = "(?1 IS NULL \
                OR LOWER(h.task_type) LIKE '%' || ?1 || '%' \
                OR LOWER(p.name) LIKE ?1 || '%' \
                OR LOWER(g.name) LIKE ?1 || '%') \
             AND (?2 IS NULL OR h.performed_at >= ?2)";

        let conn = self.conn();
        let total: u64 = conn.query_row(
            &format!(
                "SELECT COUNT(*) FROM care_logs h \
                 JOIN plants p ON p.id = h.plant_id \
                 JOIN plant_groups g ON g.id = p.group_id \
                 WHERE {where_clause}"
            ),
            params![needle, cutoff],
            |row| row.get(0),
        )?;

        let page = page.max(1);
        let mut stmt = conn.prepare(&format!(
            "SELECT h.id, h.plant_id, h.task_type, h.performed_at, p.name, g.name \
             FROM care_logs h \
             JOIN plants p ON p.id = h.plant_id \
             JOIN plant_groups g ON g.id = p.group_id \
             WHERE {where_clause} \
             ORDER BY h.performed_at DESC, h.id DESC LIMIT ?3 OFFSET ?4"
        ))?;
        let items = stmt
            .query_map(
                params![needle, cutoff, PAGE_SIZE, (page - 1) * PAGE_SIZE],
                care_log_with_plant_from_row,
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(Page {
            items,
            total,
            page,
            page_size: PAGE_SIZE,
        })
    }

    pub fn get_care_log(&self, id: Uuid) -> Result<Option<CareLogEntry>> {
        Ok(self
            .conn()
            .query_row(
                "SELECT id, plant_id, task_type, performed_at FROM care_logs WHERE id = ?1",
                params![id.to_string()],
                care_log_from_row,
            )
            .optional()?)
    }

    pub fn update_care_log(&self, id: Uuid, input: UpdateCareLogInput) -> Result<bool> {
        let Some(mut entry) = self.get_care_log(id)? else {
            return Ok(false);
        };
        if let Some(task_type) = input.task_type {
            entry.task_type = task_type;
        }
        if let Some(performed_at) = input.performed_at {
            entry.performed_at = performed_at;
        }
        self.conn().execute(
            "UPDATE care_logs SET task_type = ?2, performed_at = ?3 WHERE id = ?1",
            params![
                entry.id.to_string(),
                entry.task_type.as_str(),
                entry.performed_at
            ],
        )?;
        Ok(true)
    }

    pub fn delete_care_log(&self, id: Uuid) -> Result<bool> {
        let changed = self.conn().execute(
            "DELETE FROM care_logs WHERE id = ?1",
            params![id.to_string()],
        )?;
        Ok(changed > 0)
    }

    // GRAVEYARD ----------------------------------------------------------

    pub fn list_graveyard(&self, key: GraveyardSortKey, desc: bool) -> Result<Vec<GraveyardRow>> {
        let column = match key {
            GraveyardSortKey::Name => "LOWER(p.name)",
            GraveyardSortKey::Cause => "gy.cause_of_death",
            GraveyardSortKey::Died => "gy.died_on",
        };
        let sql = format!(
            "SELECT gy.id, gy.plant_id, gy.died_on, gy.cause_of_death, p.name, g.name \
             FROM graveyard gy \
             JOIN plants p ON p.id = gy.plant_id \
             JOIN plant_groups g ON g.id = p.group_id \
             ORDER BY {} {}, gy.id",
            column,
            direction(desc)
        );
        let conn = self.conn();
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map([], graveyard_row_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }
}

const PLANT_WITH_GROUP_SELECT: &str =
    "SELECT p.id, p.group_id, p.name, p.purchased_on, p.notes, p.is_alive, \
        p.created_at, p.updated_at, g.name \
     FROM plants p JOIN plant_groups g ON g.id = p.group_id";

fn direction(desc: bool) -> &'static str {
    if desc {
        "DESC"
    } else {
        "ASC"
    }
}

fn plant_order(key: PlantSortKey, desc: bool) -> String {
    let column = match key {
        PlantSortKey::Name => "LOWER(p.name)",
        PlantSortKey::Group => "LOWER(g.name)",
        PlantSortKey::Purchased => "p.purchased_on",
    };
    format!("{} {}", column, direction(desc))
}

fn get_group_conn(conn: &Connection, id: Uuid) -> Result<Option<PlantGroup>> {
    Ok(conn
        .query_row(
            "SELECT id, name, created_at FROM plant_groups WHERE id = ?1",
            params![id.to_string()],
            group_from_row,
        )
        .optional()?)
}

fn default_group_conn(conn: &Connection) -> Result<PlantGroup> {
    if let Some(group) = conn
        .query_row(
            "SELECT id, name, created_at FROM plant_groups WHERE name = ?1",
            params![DEFAULT_GROUP_NAME],
            group_from_row,
        )
        .optional()?
    {
        return Ok(group);
    }
    let group = PlantGroup {
        id: Uuid::new_v4(),
        name: DEFAULT_GROUP_NAME.to_string(),
        created_at: Utc::now(),
    };
    conn.execute(
        "INSERT INTO plant_groups (id, name, created_at) VALUES (?1, ?2, ?3)",
        params![group.id.to_string(), group.name, group.created_at],
    )?;
    Ok(group)
}

fn get_plant_conn(conn: &Connection, id: Uuid) -> Result<Option<Plant>> {
    Ok(conn
        .query_row(
            "SELECT id, group_id, name, purchased_on, notes, is_alive, created_at, updated_at \
             FROM plants WHERE id = ?1",
            params![id.to_string()],
            plant_from_row,
        )
        .optional()?)
}

// Row mapping. Ids are stored as uuid TEXT; dates and timestamps rely on
// the rusqlite chrono bindings.

fn uuid_col(row: &Row<'_>, idx: usize) -> rusqlite::Result<Uuid> {
    let raw: String = row.get(idx)?;
    Uuid::parse_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e)))
}

fn task_type_col(row: &Row<'_>, idx: usize) -> rusqlite::Result<TaskType> {
    let raw: String = row.get(idx)?;
    TaskType::from_str(&raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            rusqlite::types::Type::Text,
            format!("unknown task type: {raw}").into(),
        )
    })
}

fn cause_col(row: &Row<'_>, idx: usize) -> rusqlite::Result<CauseOfDeath> {
    let raw: String = row.get(idx)?;
    CauseOfDeath::from_str(&raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            rusqlite::types::Type::Text,
            format!("unknown cause of death: {raw}").into(),
        )
    })
}

fn group_from_row(row: &Row<'_>) -> rusqlite::Result<PlantGroup> {
    Ok(PlantGroup {
        id: uuid_col(row, 0)?,
        name: row.get(1)?,
        created_at: row.get(2)?,
    })
}

fn group_with_count_from_row(row: &Row<'_>) -> rusqlite::Result<GroupWithPlantCount> {
    Ok(GroupWithPlantCount {
        group: group_from_row(row)?,
        living_plants: row.get(3)?,
    })
}

fn plant_from_row(row: &Row<'_>) -> rusqlite::Result<Plant> {
    Ok(Plant {
        id: uuid_col(row, 0)?,
        group_id: uuid_col(row, 1)?,
        name: row.get(2)?,
        purchased_on: row.get(3)?,
        notes: row.get(4)?,
        is_alive: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

fn plant_with_group_from_row(row: &Row<'_>) -> rusqlite::Result<PlantWithGroup> {
    Ok(PlantWithGroup {
        plant: plant_from_row(row)?,
        group_name: row.get(8)?,
    })
}

fn frequency_from_row(row: &Row<'_>) -> rusqlite::Result<TaskFrequency> {
    Ok(TaskFrequency {
        id: uuid_col(row, 0)?,
        plant_id: uuid_col(row, 1)?,
        task_type: task_type_col(row, 2)?,
        frequency_days: row.get(3)?,
    })
}

fn care_log_from_row(row: &Row<'_>) -> rusqlite::Result<CareLogEntry> {
    Ok(CareLogEntry {
        id: uuid_col(row, 0)?,
        plant_id: uuid_col(row, 1)?,
        task_type: task_type_col(row, 2)?,
        performed_at: row.get(3)?,
    })
}

fn care_log_with_plant_from_row(row: &Row<'_>) -> rusqlite::Result<CareLogWithPlant> {
    Ok(CareLogWithPlant {
        entry: care_log_from_row(row)?,
        plant_name: row.get(4)?,
        group_name: row.get(5)?,
    })
}

fn graveyard_from_row(row: &Row<'_>) -> rusqlite::Result<GraveyardEntry> {
    Ok(GraveyardEntry {
        id: uuid_col(row, 0)?,
        plant_id: uuid_col(row, 1)?,
        died_on: row.get(2)?,
        cause_of_death: cause_col(row, 3)?,
    })
}

fn graveyard_row_from_row(row: &Row<'_>) -> rusqlite::Result<GraveyardRow> {
    Ok(GraveyardRow {
        entry: graveyard_from_row(row)?,
        plant_name: row.get(4)?,
        group_name: row.get(5)?,
    })
}
