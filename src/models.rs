use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A named recurring task scheduled on a set of ISO weekdays (1 = Monday, 7 = Sunday).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    pub id: String,
    pub name: String,
    pub days: Vec<u8>,
    /// Completion stamps in the order they were toggled on.
    #[serde(default)]
    pub done: Vec<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

/// Root object persisted as a single blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AppData {
    pub habits: Vec<Habit>,
    pub theme: Theme,
}

#[derive(Debug, Deserialize)]
pub struct HabitRequest {
    pub name: String,
    /// Raw weekday codes; range checks happen in the repository.
    #[serde(default)]
    pub days: Vec<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SettingsPayload {
    pub theme: Theme,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TodayHabit {
    pub id: String,
    pub name: String,
    pub done: bool,
    pub progress: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TodayView {
    pub date: String,
    pub date_label: String,
    pub weekday: u8,
    pub habits: Vec<TodayHabit>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HabitListItem {
    pub id: String,
    pub name: String,
    pub days: Vec<u8>,
    pub day_labels: String,
}
