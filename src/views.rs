use crate::models::{AppData, Habit, HabitListItem, TodayHabit, TodayView};
use chrono::{Datelike, Local, NaiveDate};
use std::fmt;

const DAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Maps a calendar date to its weekday code, Monday = 1 through Sunday = 7.
///
/// Calendars commonly count from Sunday = 0; that zero is the one value
/// that moves, to the end of the week.
pub fn iso_weekday(date: NaiveDate) -> u8 {
    match date.weekday().num_days_from_sunday() {
        0 => 7,
        day => day as u8,
    }
}

pub fn due_today(habits: &[Habit], weekday: u8) -> Vec<&Habit> {
    habits
        .iter()
        .filter(|habit| habit.days.contains(&weekday))
        .collect()
}

pub fn is_done_on(habit: &Habit, date: NaiveDate) -> bool {
    habit.done.contains(&date)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressSummary {
    pub total: usize,
    /// Most recently toggled-on stamp, by position rather than calendar order.
    pub last: Option<NaiveDate>,
}

impl fmt::Display for ProgressSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.last {
            Some(last) => write!(f, "{} completions • Last: {}", self.total, last),
            None => write!(f, "{} completions • Nothing completed yet", self.total),
        }
    }
}

pub fn progress_summary(habit: &Habit) -> ProgressSummary {
    ProgressSummary {
        total: habit.done.len(),
        last: habit.done.last().copied(),
    }
}

pub fn day_labels(days: &[u8]) -> String {
    let labels: Vec<&str> = days
        .iter()
        .filter_map(|day| DAY_LABELS.get(usize::from(*day).checked_sub(1)?).copied())
        .collect();
    if labels.is_empty() {
        "none selected".to_string()
    } else {
        labels.join(", ")
    }
}

pub fn human_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

pub fn today_view(data: &AppData) -> TodayView {
    today_view_at(Local::now().date_naive(), data)
}

pub fn today_view_at(today: NaiveDate, data: &AppData) -> TodayView {
    let weekday = iso_weekday(today);
    let habits = due_today(&data.habits, weekday)
        .into_iter()
        .map(|habit| today_habit(habit, today))
        .collect();

    TodayView {
        date: today.to_string(),
        date_label: human_date(today),
        weekday,
        habits,
    }
}

pub fn today_habit(habit: &Habit, today: NaiveDate) -> TodayHabit {
    TodayHabit {
        id: habit.id.clone(),
        name: habit.name.clone(),
        done: is_done_on(habit, today),
        progress: progress_summary(habit).to_string(),
    }
}

pub fn all_habits_view(data: &AppData) -> Vec<HabitListItem> {
    data.habits
        .iter()
        .map(|habit| HabitListItem {
            id: habit.id.clone(),
            name: habit.name.clone(),
            days: habit.days.clone(),
            day_labels: day_labels(&habit.days),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Theme;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn habit(id: &str, days: &[u8], done: &[NaiveDate]) -> Habit {
        Habit {
            id: id.to_string(),
            name: format!("habit {id}"),
            days: days.to_vec(),
            done: done.to_vec(),
        }
    }

    #[test]
    fn sunday_maps_to_seven() {
        // 2024-01-07 is a Sunday, 2024-01-01 a Monday.
        assert_eq!(iso_weekday(date(2024, 1, 7)), 7);
        assert_eq!(iso_weekday(date(2024, 1, 1)), 1);
        assert_eq!(iso_weekday(date(2024, 1, 3)), 3);
        assert_eq!(iso_weekday(date(2024, 1, 6)), 6);
    }

    #[test]
    fn due_today_filters_by_weekday() {
        let habits = vec![habit("a", &[1, 3, 5], &[]), habit("b", &[2], &[]), habit("c", &[3, 7], &[])];

        let wednesday: Vec<&str> = due_today(&habits, 3).into_iter().map(|h| h.id.as_str()).collect();
        assert_eq!(wednesday, vec!["a", "c"]);

        let tuesday: Vec<&str> = due_today(&habits, 2).into_iter().map(|h| h.id.as_str()).collect();
        assert_eq!(tuesday, vec!["b"]);

        for weekday in 1..=7 {
            for due in due_today(&habits, weekday) {
                assert!(due.days.contains(&weekday));
            }
            let expected = habits.iter().filter(|h| h.days.contains(&weekday)).count();
            assert_eq!(due_today(&habits, weekday).len(), expected);
        }
    }

    #[test]
    fn is_done_on_checks_membership() {
        let h = habit("a", &[1], &[date(2024, 1, 1)]);
        assert!(is_done_on(&h, date(2024, 1, 1)));
        assert!(!is_done_on(&h, date(2024, 1, 2)));
    }

    #[test]
    fn progress_summary_uses_last_appended_stamp() {
        let h = habit("a", &[1], &[date(2024, 1, 8), date(2024, 1, 1)]);
        let summary = progress_summary(&h);
        assert_eq!(summary.total, 2);
        assert_eq!(summary.last, Some(date(2024, 1, 1)));
        assert_eq!(summary.to_string(), "2 completions • Last: 2024-01-01");
    }

    #[test]
    fn progress_summary_for_empty_history() {
        let summary = progress_summary(&habit("a", &[1], &[]));
        assert_eq!(summary, ProgressSummary { total: 0, last: None });
        assert_eq!(summary.to_string(), "0 completions • Nothing completed yet");
    }

    #[test]
    fn labels_follow_weekday_codes() {
        assert_eq!(day_labels(&[1, 3, 7]), "Mon, Wed, Sun");
        assert_eq!(day_labels(&[]), "none selected");
        assert_eq!(day_labels(&[0, 8]), "none selected");
    }

    #[test]
    fn human_date_is_spelled_out() {
        assert_eq!(human_date(date(2024, 1, 3)), "Wednesday, January 3, 2024");
    }

    #[test]
    fn today_view_lists_due_habits_with_done_flags() {
        let today = date(2024, 1, 3);
        let data = AppData {
            habits: vec![
                habit("a", &[1, 3, 5], &[today]),
                habit("b", &[2], &[]),
                habit("c", &[3], &[]),
            ],
            theme: Theme::Dark,
        };

        let view = today_view_at(today, &data);
        assert_eq!(view.date, "2024-01-03");
        assert_eq!(view.weekday, 3);
        assert_eq!(view.habits.len(), 2);
        assert_eq!(view.habits[0].id, "a");
        assert!(view.habits[0].done);
        assert_eq!(view.habits[0].progress, "1 completions • Last: 2024-01-03");
        assert_eq!(view.habits[1].id, "c");
        assert!(!view.habits[1].done);
    }

    #[test]
    fn all_habits_view_keeps_order_and_labels() {
        let data = AppData {
            habits: vec![habit("z", &[6, 7], &[]), habit("a", &[1], &[])],
            theme: Theme::Light,
        };
        let items = all_habits_view(&data);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "z");
        assert_eq!(items[0].day_labels, "Sat, Sun");
        assert_eq!(items[1].day_labels, "Mon");
    }
}
