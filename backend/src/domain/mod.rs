//! # Domain Module
//!
//! Contains the record-keeping rules for the chicken incubator tracker.
//!
//! Services validate input, change exactly one collection through
//! [`FlockStore::mutate`](crate::storage::FlockStore::mutate) and append the
//! matching entry to the activity log. They do not know how collections are
//! stored.
//!
//! ## Module Organization
//!
//! - **incubator_service**: Eggs, turning and hatching
//! - **chick_service**: Chicks, weighings and health notes
//! - **hen_service**: The laying flock and weekly egg counts
//! - **environment_service**: Incubator temperature/humidity and the health overview
//! - **task_service**: Reminders
//! - **activity_log**: Appending log entries and ordering them for display
//! - **clock**: Injectable source of the current time
//! - **commands**: Input structs for every mutating operation
//!
//! ## Business Rules
//!
//! - Incubation lasts 18 to 24 days; the expected hatch date is fixed when the egg is added
//! - Weight history only grows, in the order weighings were recorded
//! - A blank health status on a chick update keeps the previous status
//! - Every add/update appends one log entry; toggles do not

pub mod activity_log;
pub mod chick_service;
pub mod clock;
pub mod commands;
pub mod environment_service;
pub mod error;
pub mod hen_service;
pub mod incubator_service;
pub mod task_service;

pub use activity_log::ActivityLog;
pub use chick_service::ChickService;
pub use clock::{Clock, FixedClock, SystemClock};
pub use environment_service::{EnvironmentService, HealthReport};
pub use error::{ServiceError, ServiceResult, ValidationError};
pub use hen_service::HenService;
pub use incubator_service::IncubatorService;
pub use task_service::TaskService;
