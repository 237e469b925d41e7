use crate::errors::AppError;
use crate::models::{Habit, HabitListItem, HabitRequest, SettingsPayload, TodayView};
use crate::state::AppState;
use crate::ui::render_index;
use crate::views::{all_habits_view, human_date, today_habit, today_view};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use chrono::{Local, NaiveDate};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let theme = state.repo.lock().await.theme();
    Html(render_index(&human_date(today()), theme))
}

pub async fn get_today(State(state): State<AppState>) -> Json<TodayView> {
    let repo = state.repo.lock().await;
    Json(today_view(repo.state()))
}

pub async fn list_habits(State(state): State<AppState>) -> Json<Vec<HabitListItem>> {
    let repo = state.repo.lock().await;
    Json(all_habits_view(repo.state()))
}

pub async fn create_habit(
    State(state): State<AppState>,
    Json(payload): Json<HabitRequest>,
) -> Result<(StatusCode, Json<Habit>), AppError> {
    let habit = state
        .mutate(move |repo| repo.create(&payload.name, &payload.days))
        .await??;
    Ok((StatusCode::CREATED, Json(habit)))
}

pub async fn edit_habit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<HabitRequest>,
) -> Result<Json<Habit>, AppError> {
    let habit = state
        .mutate(move |repo| repo.update(&id, &payload.name, &payload.days))
        .await??;
    Ok(Json(habit))
}

pub async fn delete_habit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.mutate(move |repo| repo.delete(&id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn toggle_today(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let date = today();
    let row = state
        .mutate(move |repo| {
            repo.toggle_completion(&id, date)
                .map(|habit| today_habit(habit, date))
        })
        .await?;
    Ok(match row {
        Some(row) => Json(row).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}

pub async fn get_settings(State(state): State<AppState>) -> Json<SettingsPayload> {
    let repo = state.repo.lock().await;
    Json(SettingsPayload { theme: repo.theme() })
}

pub async fn set_theme(
    State(state): State<AppState>,
    Json(payload): Json<SettingsPayload>,
) -> Result<Json<SettingsPayload>, AppError> {
    let theme = state
        .mutate(move |repo| {
            repo.set_theme(payload.theme);
            repo.theme()
        })
        .await?;
    Ok(Json(SettingsPayload { theme }))
}

pub async fn reset_all(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.mutate(|repo| repo.reset_all()).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
