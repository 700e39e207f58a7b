use sea_orm::DatabaseConnection;

use crate::config::AppConfig;

/// Per-process dependencies handed to every handler through axum's `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: AppConfig,
}
