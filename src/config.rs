use std::{env, path::PathBuf};

const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub port: u16,
}

impl Config {
    /// Reads `HABIT_LITE_DATA_DIR` and `PORT`, falling back to `data` and 8080.
    pub fn from_env() -> Self {
        let data_dir = env::var("HABIT_LITE_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data"));
        let port = env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        Self { data_dir, port }
    }
}
