//! Application configuration.
//!
//! All knobs come from environment variables and are read once into a
//! process-wide [`AppConfig`]. The storage backend is selected here a
//! single time at startup; no call site ever branches on it again.

use crate::{models, repo, utils};
use anyhow::bail;
use envconfig::Envconfig;
use std::sync::LazyLock;

#[derive(Envconfig, Clone)]
pub struct AppConfig {
    /// Environment name to deploy the app
    /// Values: "local", "dev", "staging", "prod"
    #[envconfig(default = "local")]
    pub env: String,

    /// Storage backend the core is wired to at startup
    /// Values: "memory" (local mock store), "sqlite" (hosted database)
    #[envconfig(default = "memory")]
    pub storage_backend: String,

    /// Database connection string for the sqlite backend
    /// Example: "sqlite:data/petbkk.db"
    #[envconfig(default = "sqlite::memory:")]
    pub db_host: String,

    /// Active bookings allowed per (provider, date, time) slot.
    /// Unset keeps the observed behavior: double-booking is tolerated.
    pub slot_capacity: Option<u32>,
}

impl AppConfig {
    pub fn is_prod(&self) -> bool {
        self.env.to_lowercase() == "prod"
    }
}

/// Global application configuration instance.
pub static APP_CONFIG: LazyLock<AppConfig> = LazyLock::new(|| {
    AppConfig::init_from_env()
        .expect("Failed to load application configuration. Check environment variables.")
});

/// Builds the repository and catalog handles for the configured backend.
///
/// Called once at process start; the returned trait objects are injected
/// into the `api` operations. `catalog_seed` is the provider reference
/// data loaded at startup: the memory backend serves it directly, the
/// sqlite backend upserts it after the schema bootstrap.
pub async fn build_storage(
    catalog_seed: Vec<models::provider::Provider>,
) -> anyhow::Result<(repo::ImplAppRepo, repo::ImplCatalog)> {
    match APP_CONFIG.storage_backend.as_str() {
        "memory" => {
            let memory_repo = repo::memory::MemoryRepo::with_catalog(catalog_seed)?;
            Ok((Box::new(memory_repo.clone()), Box::new(memory_repo)))
        }
        "sqlite" => {
            let sqlite_repo = repo::sqlite::SqlxSqliteRepo {
                db_pool: utils::setup_sqlite_db_pool().await?,
            };
            sqlite_repo.ensure_schema().await?;
            for provider in &catalog_seed {
                sqlite_repo.upsert_provider(provider).await?;
            }
            Ok((Box::new(sqlite_repo.clone()), Box::new(sqlite_repo)))
        }
        other => bail!("unsupported STORAGE_BACKEND: {other}"),
    }
}
