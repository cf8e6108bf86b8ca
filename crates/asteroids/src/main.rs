//! Headless Asteroids run
//!
//! Usage: `asteroids [config.toml|config.ron]`

use asteroids::{run, AppError, AsteroidsConfig};
use roid_engine::config::Config;
use roid_engine::foundation::logging;

fn main() -> Result<(), AppError> {
    let mut args = std::env::args().skip(1);
    let path = args.next();
    if args.next().is_some() {
        return Err(AppError::Usage("asteroids [CONFIG_FILE]".to_string()));
    }

    let config = AsteroidsConfig::load_or_default(path.as_deref())?;
    logging::init_with_level(&config.engine.log_level);
    match &path {
        Some(path) => log::info!("Loaded configuration from {path}"),
        None => log::info!("Using default configuration"),
    }

    let summary = run(&config)?;
    log::info!(
        "Finished {} frames ({:.1}s simulated in {:.2}s, {:.0} fps): {} collisions, {} timeouts, {} removed",
        summary.frames,
        summary.sim_time,
        summary.wall_time,
        summary.average_fps,
        summary.collisions,
        summary.timeouts_fired,
        summary.removed
    );
    log::info!("Final population: {}", summary.census);
    Ok(())
}
