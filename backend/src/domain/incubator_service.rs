use log::{info, warn};
use shared::Egg;
use std::sync::Arc;
use uuid::Uuid;

use super::activity_log::ActivityLog;
use super::clock::Clock;
use super::commands::incubator::AddEggCommand;
use super::error::{ServiceError, ServiceResult, ValidationError};
use crate::storage::{CollectionName, Eggs, FlockStore};

/// Service for eggs in the incubator
#[derive(Clone)]
pub struct IncubatorService {
    clock: Arc<dyn Clock>,
    activity_log: ActivityLog,
}

impl IncubatorService {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            activity_log: ActivityLog::new(clock.clone()),
            clock,
        }
    }

    /// Put a new egg in the incubator
    pub fn add_egg(&self, store: &mut FlockStore, command: AddEggCommand) -> ServiceResult<Egg> {
        info!(
            "Adding egg: start_date={}, incubation_days={}",
            command.start_date, command.incubation_days
        );

        if !Egg::is_valid_incubation_days(command.incubation_days) {
            return Err(ValidationError::IncubationDaysOutOfRange(command.incubation_days).into());
        }

        let egg = Egg::new(command.start_date, command.incubation_days);
        let added = egg.clone();
        let saved = store.mutate::<Eggs, _, _>(move |eggs| eggs.push(added));

        let logged = self.activity_log.record(
            store,
            format!(
                "Egg added, hatch expected {}",
                egg.expected_hatch_date.format("%-m/%-d/%Y")
            ),
        );

        saved?;
        logged?;
        info!("Added egg {} expected to hatch {}", egg.id, egg.expected_hatch_date);
        Ok(egg)
    }

    /// Flip the "turned today" flag; returns the new value
    pub fn toggle_turned(&self, store: &mut FlockStore, egg_id: Uuid) -> ServiceResult<bool> {
        let turned = store.try_mutate::<Eggs, _, _, _>(|eggs| match eggs.iter_mut().find(|e| e.id == egg_id) {
            Some(egg) => {
                egg.turned_today = !egg.turned_today;
                Ok(egg.turned_today)
            }
            None => Err(not_found(egg_id)),
        })?;

        info!("Egg {} turned today: {}", egg_id, turned);
        Ok(turned)
    }

    /// Record that an egg has hatched
    pub fn mark_hatched(&self, store: &mut FlockStore, egg_id: Uuid) -> ServiceResult<()> {
        let changed = store.try_mutate::<Eggs, _, _, _>(|eggs| match eggs.iter_mut().find(|e| e.id == egg_id) {
            Some(egg) => {
                let changed = !egg.hatched;
                egg.hatched = true;
                Ok(changed)
            }
            None => Err(not_found(egg_id)),
        })?;

        if changed {
            self.activity_log.record(store, "Egg marked as hatched")?;
            info!("Egg {} hatched", egg_id);
        } else {
            warn!("Egg {} was already marked as hatched", egg_id);
        }
        Ok(())
    }

    /// Days of incubation remaining as of now
    pub fn days_left(&self, egg: &Egg) -> u32 {
        egg.days_left(self.clock.now())
    }
}

fn not_found(id: Uuid) -> ServiceError {
    ServiceError::NotFound {
        collection: CollectionName::Eggs,
        id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::FixedClock;
    use crate::storage::InMemoryKeyValueStore;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn setup_test() -> (IncubatorService, FlockStore, Arc<FixedClock>) {
        let clock = Arc::new(FixedClock::new(Utc.with_ymd_and_hms(2025, 6, 10, 18, 0, 0).unwrap()));
        let service = IncubatorService::new(clock.clone());
        let store = FlockStore::initialize(Box::new(InMemoryKeyValueStore::new()));
        (service, store, clock)
    }

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 7, 0, 0).unwrap()
    }

    #[test]
    fn test_add_egg() {
        let (service, mut store, _clock) = setup_test();

        let egg = service
            .add_egg(&mut store, AddEggCommand { start_date: start(), incubation_days: 21 })
            .expect("Failed to add egg");

        assert_eq!(egg.expected_hatch_date, start() + Duration::days(21));
        assert_eq!(store.state().eggs, vec![egg]);
        assert_eq!(store.state().logs.len(), 1);
        assert_eq!(store.state().logs[0].description, "Egg added, hatch expected 3/22/2025");
    }

    #[test]
    fn test_hatch_date_independent_of_current_date() {
        let (service, mut store, clock) = setup_test();
        let first = service
            .add_egg(&mut store, AddEggCommand { start_date: start(), incubation_days: 21 })
            .unwrap();

        clock.advance(Duration::days(400));
        let second = service
            .add_egg(&mut store, AddEggCommand { start_date: start(), incubation_days: 21 })
            .unwrap();

        assert_eq!(first.expected_hatch_date, second.expected_hatch_date);
    }

    #[test]
    fn test_add_egg_rejects_out_of_range_days() {
        let (service, mut store, _clock) = setup_test();

        for days in [0, 17, 25] {
            let result = service.add_egg(&mut store, AddEggCommand { start_date: start(), incubation_days: days });
            assert!(matches!(
                result,
                Err(ServiceError::Validation(ValidationError::IncubationDaysOutOfRange(d))) if d == days
            ));
        }
        assert!(store.state().eggs.is_empty());
        assert!(store.state().logs.is_empty());
    }

    #[test]
    fn test_toggle_turned_twice_restores_value() {
        let (service, mut store, _clock) = setup_test();
        let egg = service
            .add_egg(&mut store, AddEggCommand { start_date: start(), incubation_days: 19 })
            .unwrap();

        assert!(service.toggle_turned(&mut store, egg.id).unwrap());
        assert!(!service.toggle_turned(&mut store, egg.id).unwrap());
        assert!(!store.state().eggs[0].turned_today);
    }

    #[test]
    fn test_toggle_turned_does_not_touch_hatch_date() {
        let (service, mut store, clock) = setup_test();
        let egg = service
            .add_egg(&mut store, AddEggCommand { start_date: start(), incubation_days: 21 })
            .unwrap();

        clock.advance(Duration::days(3));
        service.toggle_turned(&mut store, egg.id).unwrap();

        assert_eq!(store.state().eggs[0].expected_hatch_date, egg.expected_hatch_date);
    }

    #[test]
    fn test_toggle_unknown_egg() {
        let (service, mut store, _clock) = setup_test();
        let result = service.toggle_turned(&mut store, Uuid::new_v4());
        assert!(matches!(result, Err(ServiceError::NotFound { collection: CollectionName::Eggs, .. })));
    }

    #[test]
    fn test_mark_hatched_logs_once() {
        let (service, mut store, _clock) = setup_test();
        let egg = service
            .add_egg(&mut store, AddEggCommand { start_date: start(), incubation_days: 21 })
            .unwrap();

        service.mark_hatched(&mut store, egg.id).unwrap();
        service.mark_hatched(&mut store, egg.id).unwrap();

        assert!(store.state().eggs[0].hatched);
        assert_eq!(store.state().logs.len(), 2);
        assert_eq!(store.state().logs[1].description, "Egg marked as hatched");
    }

    #[test]
    fn test_days_left_uses_clock() {
        let (service, mut store, clock) = setup_test();
        clock.set(start() + Duration::days(5));
        let egg = service
            .add_egg(&mut store, AddEggCommand { start_date: start(), incubation_days: 21 })
            .unwrap();

        assert_eq!(service.days_left(&egg), 16);
        clock.advance(Duration::days(30));
        assert_eq!(service.days_left(&egg), 0);
    }
}
