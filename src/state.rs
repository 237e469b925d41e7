use crate::errors::AppError;
use crate::repository::HabitRepository;
use crate::storage::FileStore;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Mutex<HabitRepository<FileStore>>>,
}

impl AppState {
    pub fn new(repo: HabitRepository<FileStore>) -> Self {
        Self {
            repo: Arc::new(Mutex::new(repo)),
        }
    }

    /// Runs a mutating repository call on the blocking pool, since every
    /// mutation writes and syncs the state file before returning.
    pub async fn mutate<T, F>(&self, op: F) -> Result<T, AppError>
    where
        F: FnOnce(&mut HabitRepository<FileStore>) -> T + Send + 'static,
        T: Send + 'static,
    {
        let mut repo = Arc::clone(&self.repo).lock_owned().await;
        tokio::task::spawn_blocking(move || op(&mut *repo))
            .await
            .map_err(AppError::internal)
    }
}
