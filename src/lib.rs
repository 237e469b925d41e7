pub mod app;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod ids;
pub mod models;
pub mod repository;
pub mod state;
pub mod storage;
pub mod ui;
pub mod views;

pub use app::router;
pub use config::Config;
pub use repository::HabitRepository;
pub use state::AppState;
pub use storage::{FileStore, MemoryStore, Store};
