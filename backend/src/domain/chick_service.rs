use log::{info, warn};
use shared::{Chick, ChickWeight};
use std::sync::Arc;
use uuid::Uuid;

use super::activity_log::ActivityLog;
use super::clock::Clock;
use super::commands::chicks::{AddChickCommand, RecordChickUpdateCommand};
use super::error::{ServiceError, ServiceResult, ValidationError};
use crate::storage::{Chicks, CollectionName, FlockStore, ImageStorage};

/// Service for chicks and their growth records
#[derive(Clone)]
pub struct ChickService {
    clock: Arc<dyn Clock>,
    images: Arc<dyn ImageStorage>,
    activity_log: ActivityLog,
}

impl ChickService {
    pub fn new(clock: Arc<dyn Clock>, images: Arc<dyn ImageStorage>) -> Self {
        Self {
            activity_log: ActivityLog::new(clock.clone()),
            clock,
            images,
        }
    }

    /// Register a new chick
    pub fn add_chick(&self, store: &mut FlockStore, command: AddChickCommand) -> ServiceResult<Chick> {
        let name = command.name.trim().to_string();
        info!("Adding chick: name={}, hatch_date={}", name, command.hatch_date);

        if name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        validate_weight(command.start_weight)?;

        let photo_name = command.photo.as_deref().and_then(|bytes| self.save_photo(bytes));
        let mut chick = Chick::new(name, command.hatch_date, command.health_status, photo_name);
        chick
            .weight_history
            .push(ChickWeight::new(command.hatch_date, command.start_weight));

        let added = chick.clone();
        let saved = store.mutate::<Chicks, _, _>(move |chicks| chicks.push(added));
        let logged = self
            .activity_log
            .record(store, format!("{} chick added", chick.name));

        saved?;
        logged?;
        info!("Added chick {} with ID {}", chick.name, chick.id);
        Ok(chick)
    }

    /// Append a weighing and, if given, replace the health status
    ///
    /// The weight history only ever grows; entries are stamped with the clock.
    pub fn record_update(
        &self,
        store: &mut FlockStore,
        chick_id: Uuid,
        command: RecordChickUpdateCommand,
    ) -> ServiceResult<ChickWeight> {
        validate_weight(command.weight)?;

        let entry = ChickWeight::new(self.clock.now(), command.weight);
        let health_status = command.health_status.trim().to_string();

        let appended = entry.clone();
        let name = store.try_mutate::<Chicks, _, _, _>(move |chicks| {
            match chicks.iter_mut().find(|c| c.id == chick_id) {
                Some(chick) => {
                    chick.weight_history.push(appended);
                    if !health_status.is_empty() {
                        chick.health_status = health_status;
                    }
                    Ok(chick.name.clone())
                }
                None => Err(ServiceError::NotFound {
                    collection: CollectionName::Chicks,
                    id: chick_id,
                }),
            }
        })?;

        self.activity_log
            .record(store, format!("{} status/weight updated", name))?;
        info!("Recorded {:.2} kg for chick {}", entry.weight, name);
        Ok(entry)
    }

    /// Age in days as of now
    pub fn age_in_days(&self, chick: &Chick) -> u32 {
        chick.age_in_days(self.clock.now())
    }

    /// Photo bytes for a chick, if it has one and the file is still there
    pub fn load_photo(&self, chick: &Chick) -> Option<Vec<u8>> {
        let reference = chick.photo_name.as_deref()?;
        match self.images.load(reference) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Failed to load photo {} for chick {}: {}", reference, chick.name, e);
                None
            }
        }
    }

    fn save_photo(&self, bytes: &[u8]) -> Option<String> {
        match self.images.save(bytes) {
            Ok(reference) => Some(reference),
            Err(e) => {
                warn!("Failed to save chick photo, continuing without it: {}", e);
                None
            }
        }
    }
}

fn validate_weight(weight: f64) -> Result<(), ValidationError> {
    if weight.is_finite() && weight > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::InvalidWeight(weight))
    }
}
