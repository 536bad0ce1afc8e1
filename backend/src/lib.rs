//! # Chicken Incubator Backend
//!
//! Record keeping for a small flock: eggs in the incubator, chicks, laying
//! hens, the incubator environment, reminders and an activity log.
//!
//! This crate provides direct, synchronous access to the domain services and
//! storage. A UI owns one [`AppState`], reads from `state.store.state()` and
//! calls services for every change.

use anyhow::{Context, Result};
use log::info;
use std::sync::Arc;

pub mod config;
pub mod domain;
pub mod storage;

use config::AppConfig;
use domain::{
    ActivityLog, ChickService, Clock, EnvironmentService, HenService, IncubatorService, SystemClock, TaskService,
};
use storage::{FileImageStorage, FileKeyValueStore, FlockStore, ImageStorage, KeyValueStore};

/// The store plus every service, wired to the same clock and image storage
pub struct AppState {
    pub store: FlockStore,
    pub incubator_service: IncubatorService,
    pub chick_service: ChickService,
    pub hen_service: HenService,
    pub environment_service: EnvironmentService,
    pub task_service: TaskService,
    pub activity_log: ActivityLog,
}

impl AppState {
    /// Build the state from explicit collaborators
    pub fn with_parts(kv: Box<dyn KeyValueStore>, images: Arc<dyn ImageStorage>, clock: Arc<dyn Clock>) -> Self {
        let store = FlockStore::initialize(kv);

        Self {
            store,
            incubator_service: IncubatorService::new(clock.clone()),
            chick_service: ChickService::new(clock.clone(), images.clone()),
            hen_service: HenService::new(clock.clone(), images),
            environment_service: EnvironmentService::new(clock.clone()),
            task_service: TaskService::new(clock.clone()),
            activity_log: ActivityLog::new(clock),
        }
    }
}

/// Open the file-backed store described by `config`
pub fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Initializing backend in {}", config.data_directory.display());

    let kv = FileKeyValueStore::new(&config.data_directory)
        .with_context(|| format!("Failed to open data directory {}", config.data_directory.display()))?;
    let photos_directory = config.photos_directory();
    let images = FileImageStorage::new(&photos_directory)
        .with_context(|| format!("Failed to open photos directory {}", photos_directory.display()))?;

    Ok(AppState::with_parts(Box::new(kv), Arc::new(images), Arc::new(SystemClock)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::incubator::AddEggCommand;
    use shared::Egg;
    use tempfile::TempDir;

    #[test]
    fn test_initialize_backend_persists_across_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let config = AppConfig::for_directory(temp_dir.path());

        let egg = {
            let mut app = initialize_backend(&config).unwrap();
            app.incubator_service
                .add_egg(
                    &mut app.store,
                    AddEggCommand {
                        start_date: chrono::Utc::now(),
                        incubation_days: Egg::DEFAULT_INCUBATION_DAYS,
                    },
                )
                .unwrap()
        };

        let app = initialize_backend(&config).unwrap();
        assert_eq!(app.store.state().eggs, vec![egg]);
        assert_eq!(app.store.state().logs.len(), 1);
        assert!(temp_dir.path().join("photos").is_dir());
    }
}
