//! Headless household binary for the Nursery simulation.
//!
//! Wires the tick cycle to a scripted household and a logging observer,
//! then runs a paced session until the tick limit or Ctrl-C.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `nursery-config.yaml` (or the path given as
//!    the first argument), honoring `NURSERY_SEED`
//! 2. Initialize structured logging (tracing)
//! 3. Create the simulation clock
//! 4. Spawn the children from the session seed
//! 5. Create run control and hook Ctrl-C to a clean stop
//! 6. Run the session loop
//! 7. Log the result

mod error;
mod household;
mod observer;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use nursery_agents::Population;
use nursery_core::config::SEED_ENV_VAR;
use nursery_core::{
    LoggingConfig, RunControl, SimClock, SimulationConfig, SimulationState, log_simulation_end,
    run_simulation,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::household::{HouseholdConfig, ScriptedHousehold};
use crate::observer::LogObserver;

/// Default configuration file, relative to the working directory.
const DEFAULT_CONFIG_PATH: &str = "nursery-config.yaml";

/// Ticks between household status lines.
const STATUS_EVERY_TICKS: u64 = 120;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, logging setup, or the session
/// itself fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let config_path = std::env::args_os()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    let (config, household_config, found) = load_config(&config_path)?;

    // 2. Initialize structured logging.
    init_logging(&config.logging)?;
    info!("nursery-engine starting");
    if found {
        info!(path = %config_path.display(), "Configuration loaded");
    } else {
        info!(path = %config_path.display(), "Config file not found, using defaults");
    }
    info!(
        world_name = config.world.name,
        seed = config.world.seed,
        children = config.world.children,
        rooms = config.world.rooms,
        step_seconds = config.world.step_seconds,
        tick_interval_ms = config.world.tick_interval_ms,
        max_ticks = config.world.max_ticks,
        "World configuration"
    );

    // 3. Create the clock.
    let clock = SimClock::new(config.world.step_seconds).map_err(EngineError::from)?;

    // 4. Spawn the children.
    let behavior = Arc::new(config.behavior.clone());
    let population = Population::spawn(
        config.world.seed,
        config.world.children,
        config.world.rooms,
        &behavior,
    );
    for agent in population.iter() {
        info!(
            agent_id = %agent.id(),
            tier = ?agent.personality().age_tier,
            regime = %agent.regime(),
            action = %agent.action(),
            wellbeing = agent.wellbeing(),
            "Child spawned"
        );
    }
    let mut state = SimulationState::new(clock, population, behavior);
    let mut household = ScriptedHousehold::new(
        config.world.seed,
        config.world.rooms,
        household_config,
    );
    let mut observer = LogObserver::new(STATUS_EVERY_TICKS);

    // 5. Create run control and stop cleanly on Ctrl-C.
    let control = Arc::new(RunControl::new(
        config.world.tick_interval_ms,
        config.world.max_ticks,
    ));
    {
        let control = Arc::clone(&control);
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    info!("Ctrl-C received, stopping after the current tick");
                    control.request_stop();
                }
                Err(e) => warn!(error = %e, "failed to listen for Ctrl-C"),
            }
        });
    }

    // 6. Run the session.
    let result = run_simulation(&mut state, &mut household, &control, &mut observer)
        .await
        .map_err(EngineError::from)?;

    // 7. Log results.
    log_simulation_end(&result);
    let tally = household.tally();
    let stats = observer.stats();
    info!(
        meals = tally.meals,
        games = tally.games,
        hugs = tally.hugs,
        lullabies = tally.lullabies,
        tantrums = stats.tantrums,
        encounters = stats.encounters,
        signals = ?stats.signals,
        simulated_seconds = state.clock.elapsed_seconds(),
        wall_seconds = control.elapsed_seconds(),
        "nursery-engine shutdown complete"
    );

    Ok(())
}

/// Load the session and household configuration.
///
/// A missing file means defaults (still subject to `NURSERY_SEED`). The
/// returned flag says whether the file was found.
fn load_config(path: &Path) -> Result<(SimulationConfig, HouseholdConfig, bool), EngineError> {
    if path.exists() {
        let config = SimulationConfig::from_file(path)?;
        let contents = std::fs::read_to_string(path).map_err(|e| EngineError::Household {
            message: format!("failed to read config file: {e}"),
        })?;
        let household = HouseholdConfig::from_yaml(&contents)?;
        Ok((config, household, true))
    } else {
        let mut config = SimulationConfig::default();
        config.apply_seed_override(std::env::var(SEED_ENV_VAR).ok().as_deref())?;
        config.validate()?;
        Ok((config, HouseholdConfig::default(), false))
    }
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over `logging.level` when set.
fn init_logging(logging: &LoggingConfig) -> Result<(), EngineError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .map_err(|e| EngineError::Logging {
            message: format!("invalid log filter {:?}: {e}", logging.level),
        })?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    let installed = if logging.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| EngineError::Logging {
        message: format!("failed to install subscriber: {e}"),
    })
}
