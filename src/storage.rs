use crate::errors::StoreError;
use crate::models::{AppData, Habit, Theme};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{error, warn};

/// Key under which the whole application state is stored.
pub const STORAGE_KEY: &str = "habitlite:v1";

/// Minimal key-value store holding serialized blobs.
pub trait Store {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Stores each key as a JSON file inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        let file_name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{file_name}.json"))
    }
}

impl Store for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(value.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

/// In-process store; contents vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Loads the application state, falling back to defaults field by field.
/// Never fails: unreadable or corrupt data yields an empty dark-themed state.
pub fn load_state<S: Store + ?Sized>(store: &S) -> AppData {
    let raw = match store.get(STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return AppData::default(),
        Err(err) => {
            error!("failed to read stored state: {err}");
            return AppData::default();
        }
    };

    match serde_json::from_str::<Value>(&raw) {
        Ok(value) => decode_state(value),
        Err(err) => {
            error!("failed to parse stored state: {err}");
            AppData::default()
        }
    }
}

pub fn save_state<S: Store + ?Sized>(store: &S, data: &AppData) -> Result<(), StoreError> {
    let payload = serde_json::to_string(data)?;
    store.set(STORAGE_KEY, &payload)
}

fn decode_state(value: Value) -> AppData {
    let Value::Object(mut root) = value else {
        warn!("stored state is not an object, starting fresh");
        return AppData::default();
    };

    let habits = match root.remove("habits") {
        Some(Value::Array(items)) => {
            let mut habits: Vec<Habit> = Vec::with_capacity(items.len());
            for habit in items.into_iter().filter_map(decode_habit) {
                if habits.iter().any(|kept| kept.id == habit.id) {
                    warn!(habit_id = %habit.id, "skipping habit record with duplicate id");
                    continue;
                }
                habits.push(habit);
            }
            habits
        }
        _ => Vec::new(),
    };
    let theme = root
        .remove("theme")
        .and_then(|value| serde_json::from_value::<Theme>(value).ok())
        .unwrap_or_default();

    AppData { habits, theme }
}

fn decode_habit(value: Value) -> Option<Habit> {
    match serde_json::from_value::<Habit>(value) {
        Ok(mut habit) => {
            habit.days = normalize_days(&habit.days);
            if habit.days.is_empty() {
                warn!(habit_id = %habit.id, "skipping habit record with no valid days");
                return None;
            }
            let mut seen = Vec::with_capacity(habit.done.len());
            habit.done.retain(|date| {
                if seen.contains(date) {
                    false
                } else {
                    seen.push(*date);
                    true
                }
            });
            Some(habit)
        }
        Err(err) => {
            warn!("skipping unreadable habit record: {err}");
            None
        }
    }
}

/// Sorted, distinct weekday codes within 1..=7.
pub fn normalize_days(days: &[u8]) -> Vec<u8> {
    let mut days: Vec<u8> = days.iter().copied().filter(|d| (1..=7).contains(d)).collect();
    days.sort_unstable();
    days.dedup();
    days
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_state() -> AppData {
        AppData {
            habits: vec![
                Habit {
                    id: "a1".into(),
                    name: "Read".into(),
                    days: vec![1, 3, 5],
                    done: vec![date(2024, 1, 3), date(2024, 1, 1)],
                },
                Habit {
                    id: "b2".into(),
                    name: "Stretch".into(),
                    days: vec![7],
                    done: vec![],
                },
            ],
            theme: Theme::Light,
        }
    }

    #[test]
    fn missing_blob_loads_default() {
        let store = MemoryStore::new();
        assert_eq!(load_state(&store), AppData::default());
        assert_eq!(load_state(&store).theme, Theme::Dark);
    }

    #[test]
    fn corrupt_blob_loads_default() {
        let store = MemoryStore::new();
        store.set(STORAGE_KEY, "{not json").unwrap();
        assert_eq!(load_state(&store), AppData::default());

        store.set(STORAGE_KEY, "[1, 2, 3]").unwrap();
        assert_eq!(load_state(&store), AppData::default());
    }

    #[test]
    fn missing_fields_are_defaulted_independently() {
        let store = MemoryStore::new();
        store.set(STORAGE_KEY, r#"{"theme":"light"}"#).unwrap();
        let data = load_state(&store);
        assert!(data.habits.is_empty());
        assert_eq!(data.theme, Theme::Light);

        store
            .set(
                STORAGE_KEY,
                r#"{"habits":[{"id":"x","name":"Walk","days":[2]}],"theme":"neon"}"#,
            )
            .unwrap();
        let data = load_state(&store);
        assert_eq!(data.theme, Theme::Dark);
        assert_eq!(data.habits.len(), 1);
        assert!(data.habits[0].done.is_empty());
    }

    #[test]
    fn bad_records_are_skipped_and_good_ones_normalized() {
        let store = MemoryStore::new();
        store
            .set(
                STORAGE_KEY,
                r#"{"habits":[
                    {"id":"bad","name":"Broken","days":[1],"done":["not-a-date"]},
                    {"id":"ok","name":"Run","days":[5,1,9,1],"done":["2024-01-02","2024-01-01","2024-01-02"]},
                    {"id":"nodays","name":"Walk","days":[0,9]},
                    {"id":"empty","name":"Swim","days":[]}
                ],"theme":"dark"}"#,
            )
            .unwrap();
        let data = load_state(&store);
        assert_eq!(data.habits.len(), 1);
        assert_eq!(data.habits[0].id, "ok");
        assert_eq!(data.habits[0].days, vec![1, 5]);
        assert_eq!(data.habits[0].done, vec![date(2024, 1, 2), date(2024, 1, 1)]);
    }

    #[test]
    fn duplicate_ids_keep_first_record_only() {
        let store = MemoryStore::new();
        store
            .set(
                STORAGE_KEY,
                r#"{"habits":[
                    {"id":"x","name":"One","days":[1]},
                    {"id":"y","name":"Other","days":[4]},
                    {"id":"x","name":"Two","days":[2]}
                ],"theme":"dark"}"#,
            )
            .unwrap();
        let data = load_state(&store);
        let loaded: Vec<(&str, &str)> = data
            .habits
            .iter()
            .map(|h| (h.id.as_str(), h.name.as_str()))
            .collect();
        assert_eq!(loaded, vec![("x", "One"), ("y", "Other")]);
    }

    #[test]
    fn round_trip_preserves_state() {
        let store = MemoryStore::new();
        let data = sample_state();
        save_state(&store, &data).unwrap();
        assert_eq!(load_state(&store), data);

        let empty = AppData::default();
        save_state(&store, &empty).unwrap();
        assert_eq!(load_state(&store), empty);
    }

    #[test]
    fn persisted_layout_uses_plain_dates_and_lowercase_theme() {
        let store = MemoryStore::new();
        save_state(&store, &sample_state()).unwrap();
        let raw: Value = serde_json::from_str(&store.get(STORAGE_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(raw["theme"], "light");
        assert_eq!(raw["habits"][0]["done"][0], "2024-01-03");
        assert_eq!(raw["habits"][0]["days"], serde_json::json!([1, 3, 5]));
    }

    #[test]
    fn file_store_round_trip_and_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested"));
        assert_eq!(load_state(&store), AppData::default());

        save_state(&store, &sample_state()).unwrap();
        assert_eq!(load_state(&store), sample_state());

        save_state(&store, &AppData::default()).unwrap();
        assert_eq!(load_state(&store), AppData::default());

        let path = store.path_for(STORAGE_KEY);
        assert_eq!(path.file_name().unwrap(), "habitlite_v1.json");
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn normalize_days_sorts_and_filters() {
        assert_eq!(normalize_days(&[7, 0, 3, 3, 8, 1]), vec![1, 3, 7]);
        assert!(normalize_days(&[]).is_empty());
    }
}
