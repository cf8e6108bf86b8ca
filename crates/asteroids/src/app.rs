//! Headless game driver
//!
//! Runs the simulation for a fixed number of frames at the configured
//! timestep, feeding scripted input in place of a keyboard and logging a
//! population census along the way.

use std::fmt;

use roid_engine::config::ConfigError;
use roid_engine::ecs::World;
use roid_engine::foundation::time::Timer;
use roid_engine::input::{KeyCode, KeyEvent};

use crate::behaviors::spawn_initial_wave;
use crate::config::AsteroidsConfig;
use crate::shapes::Shape;

/// Errors surfaced by the driver
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Configuration could not be loaded or failed validation
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Bad command line
    #[error("Usage: {0}")]
    Usage(String),
}

/// Frames per thrust cycle
const THRUST_PERIOD: u64 = 180;
/// Frames of each cycle spent thrusting
const THRUST_BURST: u64 = 30;

/// Scripted pilot: keeps turning left, pulses the thruster and fires on a
/// fixed cadence
#[derive(Debug, Clone, Copy)]
pub struct Autopilot {
    fire_interval: u64,
}

impl Autopilot {
    /// Pilot firing once every `fire_interval` frames
    pub fn new(fire_interval: u64) -> Self {
        Self { fire_interval: fire_interval.max(1) }
    }

    /// Key events to feed before simulating `frame`
    pub fn events(&self, frame: u64) -> Vec<KeyEvent> {
        let mut events = Vec::new();
        if frame == 0 {
            events.push(KeyEvent::press(KeyCode::Left));
        }
        match frame % THRUST_PERIOD {
            0 => events.push(KeyEvent::press(KeyCode::Up)),
            THRUST_BURST => events.push(KeyEvent::release(KeyCode::Up)),
            _ => {}
        }
        if frame % self.fire_interval == 0 {
            events.push(KeyEvent::press(KeyCode::Space));
            events.push(KeyEvent::release(KeyCode::Space));
        }
        events
    }
}

/// Living population by kind, read from the render list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Census {
    /// Asteroids of any magnitude
    pub asteroids: usize,
    /// Bullets in flight
    pub bullets: usize,
    /// Player ships (0 while waiting to respawn)
    pub players: usize,
    /// Everything in the registry
    pub entities: usize,
}

impl Census {
    /// Count what is currently in `world`
    pub fn take(world: &World) -> Self {
        let renderer = world.renderer();
        Self {
            asteroids: renderer.count_shape(Shape::Asteroid.id()),
            bullets: renderer.count_shape(Shape::Bullet.id()),
            players: renderer.count_shape(Shape::Ship.id()),
            entities: world.len(),
        }
    }
}

impl fmt::Display for Census {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} asteroids, {} bullets, {} players ({} entities)",
            self.asteroids, self.bullets, self.players, self.entities
        )
    }
}

/// Totals for a finished run
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunSummary {
    /// Frames simulated
    pub frames: u64,
    /// Simulation time reached, in seconds
    pub sim_time: f64,
    /// Collision pairs dispatched
    pub collisions: usize,
    /// Timeouts fired
    pub timeouts_fired: usize,
    /// Entities removed
    pub removed: usize,
    /// Population after the last frame
    pub census: Census,
    /// Wall-clock seconds spent simulating
    pub wall_time: f32,
    /// Wall-clock frame rate of the run
    pub average_fps: f32,
}

/// Simulate a full run
pub fn run(config: &AsteroidsConfig) -> Result<RunSummary, AppError> {
    config.validate()?;

    let mut world = World::from_config(&config.engine);
    spawn_initial_wave(&mut world, &config.game);

    let pilot = config.run.autopilot.then(|| Autopilot::new(config.run.fire_interval));
    let dt = config.engine.fixed_timestep;
    let mut timer = Timer::new();
    let mut summary = RunSummary::default();

    log::info!(
        "Running {} frames at {:.1} Hz (autopilot: {})",
        config.run.frames,
        1.0 / dt,
        pilot.is_some()
    );

    for frame in 0..config.run.frames {
        if let Some(pilot) = &pilot {
            for event in pilot.events(frame) {
                world.key_event(event);
            }
        }

        let stats = world.tick(dt);
        timer.update();

        summary.frames += 1;
        summary.collisions += stats.collisions;
        summary.timeouts_fired += stats.timeouts_fired;
        summary.removed += stats.removed;

        let interval = config.run.report_interval;
        if interval > 0 && (frame + 1) % interval == 0 {
            log::info!("Frame {} (t={:.2}s): {}", frame + 1, world.now(), Census::take(&world));
        }
    }

    summary.sim_time = world.now();
    summary.census = Census::take(&world);
    summary.wall_time = timer.total_time();
    summary.average_fps = timer.average_fps();
    Ok(summary)
}
