//! CLI probe over the tracking engine.
//!
//! # Responsibility
//! - Load the configured tracking document and print a deterministic
//!   progress/bonus summary for quick local checks.
//!
//! Usage: `cockpit_cli [DOCUMENT_PATH]`. Without an argument the path comes
//! from `COCKPIT_DATA_PATH` (see `CockpitConfig`).

use cockpit_core::{
    core_version, dashboard_snapshot, init_from_config, CockpitConfig, Tracker,
};
use log::info;
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut config = match CockpitConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("invalid configuration: {err}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(path) = std::env::args_os().nth(1) {
        config.data_path = PathBuf::from(path);
    }

    if let Err(err) = init_from_config(&config) {
        eprintln!("file logging disabled: {err}");
    }

    let port = match config.open_port() {
        Ok(port) => port,
        Err(err) => {
            eprintln!("cannot open {}: {err}", config.data_path.display());
            return ExitCode::FAILURE;
        }
    };
    let tracker = Tracker::open(port);
    info!(
        "event=cli_summary module=cli status=start plans={} tasks={}",
        tracker.store().plans.len(),
        tracker.store().tasks.len()
    );

    let snapshot = dashboard_snapshot(tracker.store(), chrono::Local::now().naive_local());

    println!("cockpit_core version={}", core_version());
    println!("document={}", config.data_path.display());
    for entry in &snapshot.objectives {
        println!(
            "objective={} category={} weight={} progress={} plans={} kpis={}",
            entry.objective.id,
            entry.objective.category.as_str(),
            entry.objective.weight_percent,
            entry.progress_percent,
            entry.plans.total(),
            entry.kpis.len()
        );
    }
    for bonus in &snapshot.bonuses {
        println!(
            "bonus period={} personal={:.2} project={:.2} organization=n/a total={:.2}",
            bonus.period.as_str(),
            bonus.personal,
            bonus.project,
            bonus.total
        );
    }
    println!("overdue_tasks={}", snapshot.overdue_task_ids.len());

    ExitCode::SUCCESS
}
