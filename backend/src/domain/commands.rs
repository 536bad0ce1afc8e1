// backend/src/domain/commands.rs

//! Command types accepted by the domain services.
//! They carry exactly what the add/update forms collect; ids and timestamps
//! are assigned by the services.

pub mod incubator {
    use chrono::{DateTime, Utc};

    /// Input for putting a new egg in the incubator.
    #[derive(Debug, Clone)]
    pub struct AddEggCommand {
        pub start_date: DateTime<Utc>,
        pub incubation_days: u32,
    }
}

pub mod chicks {
    use chrono::{DateTime, Utc};

    /// Input for registering a newly hatched chick.
    #[derive(Debug, Clone)]
    pub struct AddChickCommand {
        pub name: String,
        pub hatch_date: DateTime<Utc>,
        /// First weighing in kilograms, dated at the hatch date
        pub start_weight: f64,
        pub health_status: String,
        /// Raw image bytes, handed to the image storage
        pub photo: Option<Vec<u8>>,
    }

    /// A weighing plus an optional new health status.
    #[derive(Debug, Clone)]
    pub struct RecordChickUpdateCommand {
        pub weight: f64,
        /// Ignored when empty
        pub health_status: String,
    }
}

pub mod hens {
    use chrono::NaiveTime;

    /// Input for adding a hen to the flock.
    #[derive(Debug, Clone)]
    pub struct AddHenCommand {
        pub name: String,
        pub breed: String,
        pub egg_count: u32,
        pub feed_time: Option<NaiveTime>,
        pub health_status: String,
        pub photo: Option<Vec<u8>>,
    }

    /// Fields of a hen that can be edited after creation.
    #[derive(Debug, Clone, Default)]
    pub struct UpdateHenCommand {
        pub egg_count: Option<u32>,
        pub feed_time: Option<NaiveTime>,
        pub health_status: Option<String>,
    }
}

pub mod environment {
    /// New incubator reading.
    #[derive(Debug, Clone, Copy)]
    pub struct UpdateEnvironmentCommand {
        pub temperature: f64,
        pub humidity: f64,
    }
}

pub mod tasks {
    use chrono::{DateTime, Utc};

    /// Input for creating a reminder.
    #[derive(Debug, Clone)]
    pub struct AddTaskCommand {
        pub title: String,
        pub date: DateTime<Utc>,
    }
}
