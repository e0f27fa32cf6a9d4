// Application state (AppState)

use crate::core::config::Config;
use crate::stores::{json_list::JsonListStore, user_table::UserTable};
use std::sync::Arc;

/// Shared application state
///
/// Each store owns its backing file; handlers never touch the files directly.
#[derive(Clone)]
pub struct AppState {
    /// User table (fixed-width text file)
    pub users: Arc<UserTable>,

    /// Class schedule entries
    pub classes: Arc<JsonListStore>,

    /// Equipment inventory entries
    pub equipment: Arc<JsonListStore>,

    /// Configuration
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let config = Arc::new(config);

        Self {
            users: Arc::new(UserTable::new(config.storage.users_file.clone())),
            classes: Arc::new(JsonListStore::new(
                "classes",
                config.storage.classes_file.clone(),
            )),
            equipment: Arc::new(JsonListStore::new(
                "equipment",
                config.storage.equipment_file.clone(),
            )),
            config,
        }
    }
}

#[cfg(test)]
pub(crate) async fn create_test_state() -> (tempfile::TempDir, Arc<AppState>) {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let state = AppState::new(Config::rooted_at(temp_dir.path()));
    crate::core::startup::ensure_storage(&state).await.unwrap();
    (temp_dir, Arc::new(state))
}
