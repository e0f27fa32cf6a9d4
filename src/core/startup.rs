use anyhow::{Context, Result};
use tracing::info;

use crate::core::state::AppState;

// this runs at boot time, before the listener is bound
pub async fn ensure_storage(state: &AppState) -> Result<()> {
    let created = state.users.ensure_initialized().await.context(format!(
        "Failed to initialize user table at {}",
        state.users.path().display()
    ))?;
    if !created {
        let users = state
            .users
            .list_all()
            .await
            .context("Failed to read user table")?;
        info!(
            path = %state.users.path().display(),
            users = users.len(),
            "User table loaded"
        );
    }

    for store in [&state.classes, &state.equipment] {
        let created = store.ensure_initialized().await.context(format!(
            "Failed to initialize {} store at {}",
            store.name(),
            store.path().display()
        ))?;
        if !created {
            info!(store = store.name(), path = %store.path().display(), "List store found");
        }
    }

    Ok(())
}
