//! In-memory habit collection backed by a [`Store`].
//!
//! Every mutating call validates first, mutates, then persists the whole
//! state before returning. A failed save is logged and the in-memory change
//! is kept; the next successful save carries it to disk.

use crate::errors::HabitError;
use crate::ids::new_id;
use crate::models::{AppData, Habit, Theme};
use crate::storage::{load_state, normalize_days, save_state, Store};
use chrono::NaiveDate;
use tracing::{error, info};

const MIN_NAME_CHARS: usize = 2;

pub struct HabitRepository<S: Store> {
    store: S,
    data: AppData,
}

impl<S: Store> HabitRepository<S> {
    /// Loads the stored state, or starts empty when none is readable.
    pub fn open(store: S) -> Self {
        let data = load_state(&store);
        Self { store, data }
    }

    pub fn state(&self) -> &AppData {
        &self.data
    }

    pub fn habits(&self) -> &[Habit] {
        &self.data.habits
    }

    pub fn theme(&self) -> Theme {
        self.data.theme
    }

    pub fn find(&self, id: &str) -> Option<&Habit> {
        self.data.habits.iter().find(|habit| habit.id == id)
    }

    pub fn create(&mut self, name: &str, days: &[i64]) -> Result<Habit, HabitError> {
        let (name, days) = validate(name, days)?;
        let habit = Habit {
            id: new_id(),
            name,
            days,
            done: Vec::new(),
        };
        self.data.habits.push(habit.clone());
        self.persist();
        info!(habit_id = %habit.id, "habit created");
        Ok(habit)
    }

    /// Replaces name and days; id and completion history are kept.
    pub fn update(&mut self, id: &str, name: &str, days: &[i64]) -> Result<Habit, HabitError> {
        let (name, days) = validate(name, days)?;
        let habit = self
            .data
            .habits
            .iter_mut()
            .find(|habit| habit.id == id)
            .ok_or_else(|| HabitError::NotFound(id.to_string()))?;
        habit.name = name;
        habit.days = days;
        let updated = habit.clone();
        self.persist();
        info!(habit_id = %id, "habit updated");
        Ok(updated)
    }

    /// Removes the habit. Unknown ids are ignored.
    pub fn delete(&mut self, id: &str) {
        let before = self.data.habits.len();
        self.data.habits.retain(|habit| habit.id != id);
        self.persist();
        if self.data.habits.len() < before {
            info!(habit_id = %id, "habit deleted");
        }
    }

    /// Flips membership of `date` in the habit's completion list.
    /// Returns `None` without touching state when the id is unknown.
    pub fn toggle_completion(&mut self, id: &str, date: NaiveDate) -> Option<&Habit> {
        let index = self.data.habits.iter().position(|habit| habit.id == id)?;
        let habit = &mut self.data.habits[index];
        if let Some(pos) = habit.done.iter().position(|stamp| *stamp == date) {
            habit.done.remove(pos);
        } else {
            habit.done.push(date);
        }
        self.persist();
        Some(&self.data.habits[index])
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.data.theme = theme;
        self.persist();
    }

    /// Drops every habit; the theme survives.
    pub fn reset_all(&mut self) {
        self.data.habits.clear();
        self.persist();
        info!("all habits reset");
    }

    fn persist(&self) {
        if let Err(err) = save_state(&self.store, &self.data) {
            error!("failed to persist state, changes will not survive a restart: {err}");
        }
    }
}

fn validate(name: &str, days: &[i64]) -> Result<(String, Vec<u8>), HabitError> {
    let name = name.trim();
    if name.chars().count() < MIN_NAME_CHARS {
        return Err(HabitError::Validation(
            "name must be at least 2 characters".to_string(),
        ));
    }
    if let Some(day) = days.iter().find(|day| !(1..=7).contains(*day)) {
        return Err(HabitError::Validation(format!(
            "day {day} is outside 1 (Monday) to 7 (Sunday)"
        )));
    }
    let days: Vec<u8> = days.iter().filter_map(|day| u8::try_from(*day).ok()).collect();
    let days = normalize_days(&days);
    if days.is_empty() {
        return Err(HabitError::Validation(
            "select at least one day".to_string(),
        ));
    }
    Ok((name.to_string(), days))
}
