//! # Flock Store
//!
//! The single source of truth for the six record collections.
//!
//! ## Lifecycle
//!
//! - [`FlockStore::initialize`] runs once at startup: every collection is read
//!   from its own key and decoded. A missing or undecodable value falls back to
//!   the documented default (empty list, or the 37.5 °C / 55 % reading) for
//!   that key only.
//! - [`FlockStore::mutate`] / [`FlockStore::try_mutate`] are the only write
//!   path. A mutation is typed by the collection it touches, applies the change
//!   in memory, re-encodes that one collection, writes it through the adapter
//!   and then notifies observers synchronously.
//!
//! ## Persistence failures
//!
//! When the adapter rejects a write, the in-memory change is kept, the
//! collection is remembered as unsaved and [`StoreError::Write`] is returned.
//! [`FlockStore::flush`] retries every unsaved collection.

use log::{debug, error, info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::{Chick, Egg, EnvironmentReading, Hen, LogEntry, ReminderTask};
use std::collections::BTreeSet;
use std::fmt;

use super::codec;
use super::error::{StoreError, StoreResult};
use super::traits::KeyValueStore;

/// Names of the independently persisted collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CollectionName {
    Eggs,
    Chicks,
    Hens,
    Environment,
    Logs,
    Tasks,
}

impl CollectionName {
    pub const ALL: [CollectionName; 6] = [
        CollectionName::Eggs,
        CollectionName::Chicks,
        CollectionName::Hens,
        CollectionName::Environment,
        CollectionName::Logs,
        CollectionName::Tasks,
    ];

    /// Key the collection is stored under
    pub fn key(self) -> &'static str {
        match self {
            CollectionName::Eggs => "eggsKey",
            CollectionName::Chicks => "chicksKey",
            CollectionName::Hens => "hensKey",
            CollectionName::Environment => "envKey",
            CollectionName::Logs => "logsKey",
            CollectionName::Tasks => "tasksKey",
        }
    }
}

impl fmt::Display for CollectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CollectionName::Eggs => "eggs",
            CollectionName::Chicks => "chicks",
            CollectionName::Hens => "hens",
            CollectionName::Environment => "environment",
            CollectionName::Logs => "logs",
            CollectionName::Tasks => "tasks",
        };
        f.write_str(name)
    }
}

/// In-memory state of every collection
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FlockState {
    pub eggs: Vec<Egg>,
    pub chicks: Vec<Chick>,
    pub hens: Vec<Hen>,
    pub environment: EnvironmentReading,
    pub logs: Vec<LogEntry>,
    pub tasks: Vec<ReminderTask>,
}

/// A collection the store can load, mutate and persist
pub trait Collection {
    type Value: Serialize + DeserializeOwned + Default + Clone;

    const NAME: CollectionName;

    fn get(state: &FlockState) -> &Self::Value;

    fn get_mut(state: &mut FlockState) -> &mut Self::Value;
}

macro_rules! collection {
    ($marker:ident, $field:ident, $value:ty, $name:expr) => {
        #[doc = concat!("Marker for the `", stringify!($field), "` collection")]
        pub struct $marker;

        impl Collection for $marker {
            type Value = $value;

            const NAME: CollectionName = $name;

            fn get(state: &FlockState) -> &Self::Value {
                &state.$field
            }

            fn get_mut(state: &mut FlockState) -> &mut Self::Value {
                &mut state.$field
            }
        }
    };
}

collection!(Eggs, eggs, Vec<Egg>, CollectionName::Eggs);
collection!(Chicks, chicks, Vec<Chick>, CollectionName::Chicks);
collection!(Hens, hens, Vec<Hen>, CollectionName::Hens);
collection!(Environment, environment, EnvironmentReading, CollectionName::Environment);
collection!(Logs, logs, Vec<LogEntry>, CollectionName::Logs);
collection!(Tasks, tasks, Vec<ReminderTask>, CollectionName::Tasks);

/// Sent to observers after every applied mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreChange {
    pub collection: CollectionName,
    /// False when the change is only in memory because the write failed
    pub persisted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn Fn(&StoreChange, &FlockState) + Send>;

/// Owns the collections and writes each change through a [`KeyValueStore`]
pub struct FlockStore {
    kv: Box<dyn KeyValueStore>,
    state: FlockState,
    unsaved: BTreeSet<CollectionName>,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl FlockStore {
    /// Load all six collections, substituting defaults for anything missing or corrupt
    pub fn initialize(kv: Box<dyn KeyValueStore>) -> Self {
        let state = FlockState {
            eggs: load::<Eggs>(kv.as_ref()),
            chicks: load::<Chicks>(kv.as_ref()),
            hens: load::<Hens>(kv.as_ref()),
            environment: load::<Environment>(kv.as_ref()),
            logs: load::<Logs>(kv.as_ref()),
            tasks: load::<Tasks>(kv.as_ref()),
        };

        info!(
            "Flock store initialized: {} eggs, {} chicks, {} hens, {} logs, {} tasks",
            state.eggs.len(),
            state.chicks.len(),
            state.hens.len(),
            state.logs.len(),
            state.tasks.len()
        );

        Self {
            kv,
            state,
            unsaved: BTreeSet::new(),
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn state(&self) -> &FlockState {
        &self.state
    }

    /// Apply an infallible change to one collection and persist it
    pub fn mutate<C, R, F>(&mut self, apply: F) -> StoreResult<R>
    where
        C: Collection,
        F: FnOnce(&mut C::Value) -> R,
    {
        self.try_mutate::<C, R, StoreError, _>(|value| Ok(apply(value)))
    }

    /// Apply a change that may be refused
    ///
    /// `apply` works on a copy of the collection. If it returns an error the
    /// copy is dropped: memory and storage stay as they were and no observer
    /// is notified.
    pub fn try_mutate<C, R, E, F>(&mut self, apply: F) -> Result<R, E>
    where
        C: Collection,
        E: From<StoreError>,
        F: FnOnce(&mut C::Value) -> Result<R, E>,
    {
        let mut draft = C::get(&self.state).clone();
        let output = apply(&mut draft)?;
        *C::get_mut(&mut self.state) = draft;

        let persisted = self.persist::<C>();
        self.notify(StoreChange {
            collection: C::NAME,
            persisted: persisted.is_ok(),
        });

        persisted.map_err(E::from)?;
        Ok(output)
    }

    /// Collections whose latest in-memory state has not reached storage
    pub fn unsaved_collections(&self) -> Vec<CollectionName> {
        self.unsaved.iter().copied().collect()
    }

    pub fn has_unsaved_changes(&self) -> bool {
        !self.unsaved.is_empty()
    }

    /// Retry persisting every unsaved collection
    ///
    /// All collections are attempted; the first failure is returned.
    pub fn flush(&mut self) -> StoreResult<()> {
        let pending: Vec<CollectionName> = self.unsaved.iter().copied().collect();
        if pending.is_empty() {
            return Ok(());
        }
        info!("Flushing {} unsaved collection(s)", pending.len());

        let mut first_error = None;
        for name in pending {
            let result = match name {
                CollectionName::Eggs => self.persist::<Eggs>(),
                CollectionName::Chicks => self.persist::<Chicks>(),
                CollectionName::Hens => self.persist::<Hens>(),
                CollectionName::Environment => self.persist::<Environment>(),
                CollectionName::Logs => self.persist::<Logs>(),
                CollectionName::Tasks => self.persist::<Tasks>(),
            };
            match result {
                Ok(()) => self.notify(StoreChange {
                    collection: name,
                    persisted: true,
                }),
                Err(e) => {
                    first_error.get_or_insert(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Register an observer called after every mutation
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: Fn(&StoreChange, &FlockState) + Send + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove an observer; returns false if it was not registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    fn persist<C: Collection>(&mut self) -> StoreResult<()> {
        let key = C::NAME.key();
        let result = codec::encode(C::get(&self.state))
            .map_err(StoreError::from)
            .and_then(|bytes| self.kv.put(key, &bytes));

        match result {
            Ok(()) => {
                self.unsaved.remove(&C::NAME);
                debug!("Persisted {} under '{}'", C::NAME, key);
                Ok(())
            }
            Err(e) => {
                error!("Failed to persist {} under '{}': {}", C::NAME, key, e);
                self.unsaved.insert(C::NAME);
                Err(StoreError::Write {
                    collection: C::NAME,
                    source: Box::new(e),
                })
            }
        }
    }

    fn notify(&self, change: StoreChange) {
        for (_, observer) in &self.observers {
            observer(&change, &self.state);
        }
    }
}

impl fmt::Debug for FlockStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlockStore")
            .field("state", &self.state)
            .field("unsaved", &self.unsaved)
            .field("observers", &self.observers.len())
            .finish()
    }
}

fn load<C: Collection>(kv: &dyn KeyValueStore) -> C::Value {
    let key = C::NAME.key();

    let bytes = match kv.get(key) {
        Ok(Some(bytes)) => bytes,
        Ok(None) => {
            debug!("No stored {} under '{}', using default", C::NAME, key);
            return C::Value::default();
        }
        Err(e) => {
            warn!("Could not read {} under '{}': {}. Using default.", C::NAME, key, e);
            return C::Value::default();
        }
    };

    match codec::decode(&bytes) {
        Ok(value) => value,
        Err(e) => {
            warn!("Stored {} under '{}' is unreadable: {}. Using default.", C::NAME, key, e);
            C::Value::default()
        }
    }
}
