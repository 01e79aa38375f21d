mod config;
pub mod database;
pub mod store;

pub use config::{Config, DurationsConfig, GoalConfig, NotificationsConfig};
pub use database::Database;
pub use store::Store;

use std::path::PathBuf;

/// Returns `~/.config/deepflow[-dev]/` based on DEEPFLOW_ENV.
///
/// Set DEEPFLOW_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if the config directory cannot be created.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("DEEPFLOW_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("deepflow-dev")
    } else {
        base_dir.join("deepflow")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
