use log::info;
use shared::{is_healthy_status, EnvironmentReading};
use std::sync::Arc;

use super::activity_log::ActivityLog;
use super::clock::Clock;
use super::commands::environment::UpdateEnvironmentCommand;
use super::error::{ServiceResult, ValidationError};
use crate::storage::{Environment, FlockState, FlockStore};

/// Incubator reading plus how the flock is doing
#[derive(Debug, Clone, PartialEq)]
pub struct HealthReport {
    pub environment: EnvironmentReading,
    pub chicks_needing_attention: usize,
    pub hens_needing_attention: usize,
    pub chicks_summary: String,
    pub hens_summary: String,
}

/// Service for the incubator environment and the health overview
#[derive(Clone)]
pub struct EnvironmentService {
    activity_log: ActivityLog,
}

impl EnvironmentService {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            activity_log: ActivityLog::new(clock),
        }
    }

    /// Replace the incubator reading
    pub fn update(&self, store: &mut FlockStore, command: UpdateEnvironmentCommand) -> ServiceResult<EnvironmentReading> {
        if !command.temperature.is_finite() {
            return Err(ValidationError::InvalidTemperature(command.temperature).into());
        }
        if !command.humidity.is_finite() || !(0.0..=100.0).contains(&command.humidity) {
            return Err(ValidationError::InvalidHumidity(command.humidity).into());
        }

        let reading = EnvironmentReading {
            temperature: command.temperature,
            humidity: command.humidity,
        };
        let saved = store.mutate::<Environment, _, _>(|current| *current = reading);
        let logged = self.activity_log.record(
            store,
            format!(
                "Environment updated: Temp {:?}°C, Humidity {:?}%",
                reading.temperature, reading.humidity
            ),
        );

        saved?;
        logged?;
        info!("Environment now {:.1}°C / {:.0}%", reading.temperature, reading.humidity);
        Ok(reading)
    }

    /// Current reading and health summaries for chicks and hens
    pub fn health_report(state: &FlockState) -> HealthReport {
        let chicks = state
            .chicks
            .iter()
            .filter(|c| !is_healthy_status(&c.health_status))
            .count();
        let hens = state
            .hens
            .iter()
            .filter(|h| !is_healthy_status(&h.health_status))
            .count();

        HealthReport {
            environment: state.environment,
            chicks_needing_attention: chicks,
            hens_needing_attention: hens,
            chicks_summary: summary(chicks, "chick"),
            hens_summary: summary(hens, "hen"),
        }
    }
}

fn summary(needing_attention: usize, noun: &str) -> String {
    if needing_attention == 0 {
        "All healthy".to_string()
    } else {
        format!("{} {}(s) need attention", needing_attention, noun)
    }
}
