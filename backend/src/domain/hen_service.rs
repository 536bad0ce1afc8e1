use log::{info, warn};
use shared::Hen;
use std::sync::Arc;
use uuid::Uuid;

use super::activity_log::ActivityLog;
use super::clock::Clock;
use super::commands::hens::{AddHenCommand, UpdateHenCommand};
use super::error::{ServiceError, ServiceResult, ValidationError};
use crate::storage::{CollectionName, FlockStore, Hens, ImageStorage};

/// Service for the laying flock
#[derive(Clone)]
pub struct HenService {
    images: Arc<dyn ImageStorage>,
    activity_log: ActivityLog,
}

impl HenService {
    pub fn new(clock: Arc<dyn Clock>, images: Arc<dyn ImageStorage>) -> Self {
        Self {
            images,
            activity_log: ActivityLog::new(clock),
        }
    }

    /// Add a hen to the flock
    pub fn add_hen(&self, store: &mut FlockStore, command: AddHenCommand) -> ServiceResult<Hen> {
        let name = command.name.trim().to_string();
        let breed = command.breed.trim().to_string();
        info!("Adding hen: name={}, breed={}", name, breed);

        if name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if breed.is_empty() {
            return Err(ValidationError::EmptyBreed.into());
        }

        let photo_name = command.photo.as_deref().and_then(|bytes| match self.images.save(bytes) {
            Ok(reference) => Some(reference),
            Err(e) => {
                warn!("Failed to save photo for hen {}: {}", name, e);
                None
            }
        });

        let hen = Hen::new(
            name,
            breed,
            command.egg_count,
            command.feed_time,
            command.health_status,
            photo_name,
        );

        let added = hen.clone();
        let saved = store.mutate::<Hens, _, _>(move |hens| hens.push(added));
        let logged = self.activity_log.record(store, format!("Hen {} added", hen.name));

        saved?;
        logged?;
        Ok(hen)
    }

    /// Edit the weekly egg count, feed time or health status
    pub fn update_hen(&self, store: &mut FlockStore, hen_id: Uuid, command: UpdateHenCommand) -> ServiceResult<Hen> {
        let updated = store.try_mutate::<Hens, _, _, _>(move |hens| {
            let Some(hen) = hens.iter_mut().find(|h| h.id == hen_id) else {
                return Err(ServiceError::NotFound {
                    collection: CollectionName::Hens,
                    id: hen_id,
                });
            };

            if let Some(egg_count) = command.egg_count {
                hen.egg_count = egg_count;
            }
            if let Some(feed_time) = command.feed_time {
                hen.feed_time = Some(feed_time);
            }
            if let Some(health_status) = command.health_status {
                hen.health_status = health_status.trim().to_string();
            }
            Ok(hen.clone())
        })?;

        self.activity_log
            .record(store, format!("Hen {} updated", updated.name))?;
        info!("Updated hen {} ({} eggs this week)", updated.name, updated.egg_count);
        Ok(updated)
    }

    /// Eggs laid this week across the whole flock
    pub fn weekly_egg_total(hens: &[Hen]) -> u32 {
        hens.iter().map(|h| h.egg_count).sum()
    }
}
