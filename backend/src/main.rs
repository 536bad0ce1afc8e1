use anyhow::Result;
use log::{info, warn};

use incubator_backend::config::AppConfig;
use incubator_backend::domain::{ActivityLog, EnvironmentService, HenService};
use incubator_backend::initialize_backend;

const RECENT_LOG_ENTRIES: usize = 5;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();
    info!("Starting Chicken Incubator backend");

    let config = AppConfig::load_default()?;
    let app = initialize_backend(&config)?;
    let state = app.store.state();

    if app.store.has_unsaved_changes() {
        warn!("Some collections have unsaved changes: {:?}", app.store.unsaved_collections());
    }

    let active_eggs: Vec<_> = state.eggs.iter().filter(|e| !e.hatched).collect();
    println!("Data directory: {}", config.data_directory.display());
    println!("Eggs incubating: {} ({} hatched)", active_eggs.len(), state.eggs.len() - active_eggs.len());
    for egg in &active_eggs {
        println!(
            "  hatch expected {} ({} days left)",
            egg.expected_hatch_date.format("%-m/%-d/%Y"),
            app.incubator_service.days_left(egg)
        );
    }

    println!("Chicks: {}", state.chicks.len());
    println!(
        "Hens: {} ({} eggs this week)",
        state.hens.len(),
        HenService::weekly_egg_total(&state.hens)
    );

    let report = EnvironmentService::health_report(state);
    println!(
        "Incubator: {:.1}°C, {:.0}% humidity",
        report.environment.temperature, report.environment.humidity
    );
    println!("Chick health: {}", report.chicks_summary);
    println!("Hen health: {}", report.hens_summary);

    let open_tasks = state.tasks.iter().filter(|t| !t.done).count();
    println!("Open tasks: {}", open_tasks);

    println!("Recent activity:");
    for entry in ActivityLog::display_order(&state.logs).into_iter().take(RECENT_LOG_ENTRIES) {
        println!("  {}  {}", entry.date.format("%Y-%m-%d %H:%M"), entry.description);
    }

    Ok(())
}
