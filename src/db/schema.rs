pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS plant_groups (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL UNIQUE,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS plants (
    id TEXT PRIMARY KEY,
    group_id TEXT NOT NULL REFERENCES plant_groups(id),
    name TEXT NOT NULL,
    purchased_on TEXT NOT NULL,
    notes TEXT,
    is_alive INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS task_frequencies (
    id TEXT PRIMARY KEY,
    plant_id TEXT NOT NULL REFERENCES plants(id) ON DELETE CASCADE,
    task_type TEXT NOT NULL CHECK (task_type IN ('watering', 'fertilizing', 'repotting', 'vitamins', 'insecticide')),
    frequency_days INTEGER CHECK (frequency_days IS NULL OR frequency_days > 0)
);

CREATE TABLE IF NOT EXISTS care_logs (
    id TEXT PRIMARY KEY,
    plant_id TEXT NOT NULL REFERENCES plants(id) ON DELETE CASCADE,
    task_type TEXT NOT NULL CHECK (task_type IN ('watering', 'fertilizing', 'repotting', 'vitamins', 'insecticide')),
    performed_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS graveyard (
    id TEXT PRIMARY KEY,
    plant_id TEXT NOT NULL UNIQUE REFERENCES plants(id) ON DELETE CASCADE,
    died_on TEXT NOT NULL,
    cause_of_death TEXT NOT NULL DEFAULT 'unknown' CHECK (cause_of_death IN ('overwatering', 'underwatering', 'pest_infestation', 'lack_of_light', 'too_much_light', 'nutrient_deficiency', 'unknown'))
);

CREATE INDEX IF NOT EXISTS idx_plants_group ON plants(group_id);
CREATE INDEX IF NOT EXISTS idx_care_logs_plant ON care_logs(plant_id);
CREATE INDEX IF NOT EXISTS idx_care_logs_plant_task ON care_logs(plant_id, task_type, performed_at);

-- At most one frequency per (plant, task type)
CREATE UNIQUE INDEX IF NOT EXISTS idx_one_frequency_per_task
    ON task_frequencies(plant_id, task_type);
"#;
