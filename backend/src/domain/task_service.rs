use log::info;
use shared::ReminderTask;
use std::sync::Arc;
use uuid::Uuid;

use super::activity_log::ActivityLog;
use super::clock::Clock;
use super::commands::tasks::AddTaskCommand;
use super::error::{ServiceError, ServiceResult, ValidationError};
use crate::storage::{CollectionName, FlockStore, Tasks};

/// Service for reminders
#[derive(Clone)]
pub struct TaskService {
    activity_log: ActivityLog,
}

impl TaskService {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            activity_log: ActivityLog::new(clock),
        }
    }

    /// Create a new reminder
    pub fn add_task(&self, store: &mut FlockStore, command: AddTaskCommand) -> ServiceResult<ReminderTask> {
        let title = command.title.trim().to_string();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle.into());
        }

        let task = ReminderTask::new(title, command.date);
        let added = task.clone();
        let saved = store.mutate::<Tasks, _, _>(move |tasks| tasks.push(added));
        let logged = self
            .activity_log
            .record(store, format!("New task added: {}", task.title));

        saved?;
        logged?;
        info!("Added task '{}' due {}", task.title, task.date);
        Ok(task)
    }

    /// Flip a reminder between done and not done; returns the new value
    pub fn toggle_done(&self, store: &mut FlockStore, task_id: Uuid) -> ServiceResult<bool> {
        store.try_mutate::<Tasks, _, _, _>(|tasks| match tasks.iter_mut().find(|t| t.id == task_id) {
            Some(task) => {
                task.done = !task.done;
                Ok(task.done)
            }
            None => Err(ServiceError::NotFound {
                collection: CollectionName::Tasks,
                id: task_id,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::SystemClock;
    use crate::storage::InMemoryKeyValueStore;
    use chrono::{TimeZone, Utc};

    fn setup_test() -> (TaskService, FlockStore) {
        let service = TaskService::new(Arc::new(SystemClock));
        let store = FlockStore::initialize(Box::new(InMemoryKeyValueStore::new()));
        (service, store)
    }

    fn due() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 7, 4, 17, 30, 0).unwrap()
    }

    #[test]
    fn test_add_task() {
        let (service, mut store) = setup_test();

        let task = service
            .add_task(&mut store, AddTaskCommand { title: "Candle eggs".to_string(), date: due() })
            .unwrap();

        assert!(!task.done);
        assert_eq!(task.date, due());
        assert_eq!(store.state().tasks, vec![task]);
        assert_eq!(store.state().logs[0].description, "New task added: Candle eggs");
    }

    #[test]
    fn test_add_task_requires_title() {
        let (service, mut store) = setup_test();
        let result = service.add_task(&mut store, AddTaskCommand { title: " ".to_string(), date: due() });

        assert!(matches!(result, Err(ServiceError::Validation(ValidationError::EmptyTitle))));
        assert!(store.state().tasks.is_empty());
    }

    #[test]
    fn test_toggle_done_twice_restores_value() {
        let (service, mut store) = setup_test();
        let task = service
            .add_task(&mut store, AddTaskCommand { title: "Clean feeder".to_string(), date: due() })
            .unwrap();

        assert!(service.toggle_done(&mut store, task.id).unwrap());
        assert!(!service.toggle_done(&mut store, task.id).unwrap());
        assert!(!store.state().tasks[0].done);
        // toggles are not logged
        assert_eq!(store.state().logs.len(), 1);
    }

    #[test]
    fn test_toggle_unknown_task() {
        let (service, mut store) = setup_test();
        let result = service.toggle_done(&mut store, Uuid::new_v4());
        assert!(matches!(result, Err(ServiceError::NotFound { collection: CollectionName::Tasks, .. })));
    }
}
