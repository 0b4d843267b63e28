//! BARBACK Server — application entry point.
//!
//! Connects to SurrealDB, runs migrations, and bootstraps one
//! backoffice session: restore a persisted selection if present,
//! auto-select the first directory entry otherwise.

use std::env;

use barback_core::models::identity::CallerIdentity;
use barback_db::repository::{
    SurrealBrandRepository, SurrealDirectoryService, SurrealLocationRepository,
    SurrealOrganizationRepository, SurrealSelectionStorage,
};
use barback_db::{DbConfig, DbManager};
use barback_tenancy::{BootstrapState, EntityResolver, SelectionStore, SessionBootstrap};
use tracing_subscriber::EnvFilter;

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn db_config_from_env() -> DbConfig {
    let defaults = DbConfig::default();
    DbConfig {
        url: env_or("BARBACK_DB_URL", &defaults.url),
        namespace: env_or("BARBACK_DB_NS", &defaults.namespace),
        database: env_or("BARBACK_DB_NAME", &defaults.database),
        username: env_or("BARBACK_DB_USER", &defaults.username),
        password: env_or("BARBACK_DB_PASS", &defaults.password),
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("barback=info".parse().unwrap()),
        )
        .json()
        .init();

    tracing::info!("Starting BARBACK server...");

    let config = db_config_from_env();
    let manager = match DbManager::connect(&config).await {
        Ok(manager) => manager,
        Err(err) => {
            tracing::error!(error = %err, "Failed to connect to SurrealDB");
            std::process::exit(1);
        }
    };

    let db = manager.client().clone();
    if let Err(err) = barback_db::run_migrations(&db).await {
        tracing::error!(error = %err, "Migrations failed");
        std::process::exit(1);
    }

    let session = env_or("BARBACK_SESSION", "local-dev");
    let caller = CallerIdentity::new(session.clone());

    let resolver = EntityResolver::new(
        SurrealOrganizationRepository::new(db.clone()),
        SurrealBrandRepository::new(db.clone()),
        SurrealLocationRepository::new(db.clone()),
    );
    let store = SelectionStore::new(resolver, SurrealSelectionStorage::new(db.clone(), session));
    let mut bootstrap = SessionBootstrap::new(SurrealDirectoryService::new(db));

    match bootstrap.run(&caller, &store).await {
        BootstrapState::Restored(context) => {
            tracing::info!(
                organization = %context.organization().name,
                brand = %context.brand().name,
                location = %context.location().name,
                "Session restored"
            );
        }
        BootstrapState::AutoSelected(context) => {
            tracing::info!(
                organization = %context.organization().name,
                brand = %context.brand().name,
                location = %context.location().name,
                "Session auto-selected default location"
            );
        }
        BootstrapState::Onboarding => {
            tracing::info!("Directory is empty; create a first location to begin");
        }
        BootstrapState::Failed(err) => {
            tracing::error!(error = %err, "Bootstrap failed");
            std::process::exit(1);
        }
        state @ (BootstrapState::Uninitialized | BootstrapState::Loading) => {
            // run() always leaves a terminal state.
            tracing::error!(?state, "Bootstrap ended in a non-terminal state");
            std::process::exit(1);
        }
    }

    tracing::info!("BARBACK server stopped.");
}
