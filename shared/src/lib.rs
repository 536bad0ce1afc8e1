use chrono::{DateTime, Duration, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An egg in the incubator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Egg {
    pub id: Uuid,
    /// When the egg went into the incubator
    pub start_date: DateTime<Utc>,
    /// Length of the incubation period (18..=24 days)
    pub incubation_days: u32,
    /// Manual toggle, never reset automatically
    pub turned_today: bool,
    /// Computed once at creation from `start_date + incubation_days`
    pub expected_hatch_date: DateTime<Utc>,
    pub hatched: bool,
}

/// A chick and its growth record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chick {
    pub id: Uuid,
    pub name: String,
    pub hatch_date: DateTime<Utc>,
    /// Append-only, in recording order
    pub weight_history: Vec<ChickWeight>,
    /// Free text, e.g. "Healthy" or "Limping"
    pub health_status: String,
    /// Reference to an image held by the image storage
    pub photo_name: Option<String>,
}

/// A single weighing of a chick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChickWeight {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    /// Weight in kilograms
    pub weight: f64,
}

/// A laying hen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hen {
    pub id: Uuid,
    pub name: String,
    /// Eggs laid this week, edited by hand
    pub egg_count: u32,
    pub feed_time: Option<NaiveTime>,
    pub health_status: String,
    pub breed: String,
    pub photo_name: Option<String>,
}

/// The single incubator environment reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentReading {
    /// Degrees Celsius
    pub temperature: f64,
    /// Relative humidity in percent
    pub humidity: f64,
}

/// An entry in the activity log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub description: String,
}

/// A reminder the keeper can tick off
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReminderTask {
    pub id: Uuid,
    pub title: String,
    /// Date and time the reminder is due
    pub date: DateTime<Utc>,
    pub done: bool,
}

impl Egg {
    pub const MIN_INCUBATION_DAYS: u32 = 18;
    pub const MAX_INCUBATION_DAYS: u32 = 24;
    pub const DEFAULT_INCUBATION_DAYS: u32 = 21;

    /// Create a new egg; the expected hatch date is fixed here and never recomputed
    pub fn new(start_date: DateTime<Utc>, incubation_days: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            start_date,
            incubation_days,
            turned_today: false,
            expected_hatch_date: start_date + Duration::days(i64::from(incubation_days)),
            hatched: false,
        }
    }

    /// Whether an incubation period is within the supported range
    pub fn is_valid_incubation_days(days: u32) -> bool {
        (Self::MIN_INCUBATION_DAYS..=Self::MAX_INCUBATION_DAYS).contains(&days)
    }

    /// Whole days of incubation remaining, never negative
    pub fn days_left(&self, now: DateTime<Utc>) -> u32 {
        let passed = (now - self.start_date).num_days();
        let left = i64::from(self.incubation_days) - passed;
        left.max(0) as u32
    }
}

impl Chick {
    pub fn new(
        name: String,
        hatch_date: DateTime<Utc>,
        health_status: String,
        photo_name: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            hatch_date,
            weight_history: Vec::new(),
            health_status,
            photo_name,
        }
    }

    /// Age in whole days since hatching
    pub fn age_in_days(&self, now: DateTime<Utc>) -> u32 {
        (now - self.hatch_date).num_days().max(0) as u32
    }

    /// Most recently recorded weight
    pub fn latest_weight(&self) -> Option<f64> {
        self.weight_history.last().map(|entry| entry.weight)
    }
}

impl ChickWeight {
    pub fn new(date: DateTime<Utc>, weight: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            weight,
        }
    }
}

impl Hen {
    pub fn new(
        name: String,
        breed: String,
        egg_count: u32,
        feed_time: Option<NaiveTime>,
        health_status: String,
        photo_name: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            egg_count,
            feed_time,
            health_status,
            breed,
            photo_name,
        }
    }
}

impl EnvironmentReading {
    pub const DEFAULT_TEMPERATURE: f64 = 37.5;
    pub const DEFAULT_HUMIDITY: f64 = 55.0;
}

impl Default for EnvironmentReading {
    fn default() -> Self {
        Self {
            temperature: Self::DEFAULT_TEMPERATURE,
            humidity: Self::DEFAULT_HUMIDITY,
        }
    }
}

impl LogEntry {
    pub fn new(date: DateTime<Utc>, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            description: description.into(),
        }
    }
}

impl ReminderTask {
    pub fn new(title: String, date: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            date,
            done: false,
        }
    }
}

/// Whether a free-text health status reads as healthy
///
/// A status counts as healthy when it mentions "healthy" without saying "unhealthy".
pub fn is_healthy_status(status: &str) -> bool {
    let status = status.to_lowercase();
    status.contains("healthy") && !status.contains("unhealthy")
}
