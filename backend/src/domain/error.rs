use thiserror::Error;
use uuid::Uuid;

use crate::storage::{CollectionName, StoreError};

/// Input rejected before it reaches the store
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Name cannot be empty")]
    EmptyName,
    #[error("Breed cannot be empty")]
    EmptyBreed,
    #[error("Title cannot be empty")]
    EmptyTitle,
    #[error("Incubation days must be between 18 and 24, got {0}")]
    IncubationDaysOutOfRange(u32),
    #[error("Weight must be a positive number of kilograms, got {0}")]
    InvalidWeight(f64),
    #[error("Temperature must be a finite number, got {0}")]
    InvalidTemperature(f64),
    #[error("Humidity must be between 0 and 100 percent, got {0}")]
    InvalidHumidity(f64),
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("No record {id} in {collection}")]
    NotFound { collection: CollectionName, id: Uuid },

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
