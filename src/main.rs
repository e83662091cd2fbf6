//! Binary entry point: load the saved registry, log a per-course summary and
//! write everything back so the CSV exports reflect the current state.
use anyhow::Context;
use log::info;
use simplelog::{ColorChoice, Config as LogConfig, TermLogger, TerminalMode};

use grade_tracker::{load, save, Config};

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let config = Config::from_env()?;

    TermLogger::init(
        config.log_level,
        LogConfig::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .context("failed to initialize logging")?;

    let registry = load(&config.data_dir)
        .with_context(|| format!("failed to load data from {}", config.data_dir.display()))?;

    for course in registry.courses() {
        let report = registry.course_report(course.code())?;
        match report.statistics {
            Some(stats) => info!(
                "{course}: {} enrolled, average {:.2}% (high {:.2}%, low {:.2}%)",
                report.roster.len(),
                stats.average,
                stats.highest,
                stats.lowest
            ),
            None => info!("{course}: no enrollments"),
        }
    }

    save(&registry, &config.data_dir)
        .with_context(|| format!("failed to save data to {}", config.data_dir.display()))
}
