use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post, put}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/today", get(handlers::get_today))
        .route("/api/habits", get(handlers::list_habits).post(handlers::create_habit))
        .route("/api/habits/:id", put(handlers::edit_habit).delete(handlers::delete_habit))
        .route("/api/habits/:id/toggle", post(handlers::toggle_today))
        .route("/api/settings", get(handlers::get_settings).put(handlers::set_theme))
        .route("/api/reset", post(handlers::reset_all))
        .with_state(state)
}
