//! Game configuration
//!
//! Every tunable the behaviors read lives here. Defaults reproduce the classic
//! feel: a 32×18 arena, four asteroid tiers, half-second bullets and a two
//! second respawn. The whole file can be overridden from TOML or RON through
//! [`Config::load_from_file`]; missing fields keep their defaults.

use roid_engine::config::{Config, ConfigError};
use roid_engine::core::config::EngineConfig;
use roid_engine::foundation::math::Vec2;
use serde::{Deserialize, Serialize};

/// Playfield extents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Half the arena width; x runs from `-half_width` to `half_width`
    pub half_width: f32,
    /// Half the arena height
    pub half_height: f32,
    /// How far past the edge a wrapping entity travels before reappearing
    pub wrap_margin: f32,
}

impl ArenaConfig {
    /// Whether `position` lies inside the visible arena (edges inclusive)
    pub fn contains(&self, position: &Vec2) -> bool {
        position.x.abs() <= self.half_width && position.y.abs() <= self.half_height
    }

    /// Full size of the wrap zone on each axis
    pub fn wrap_extent(&self) -> Vec2 {
        Vec2::new(
            2.0 * (self.half_width + self.wrap_margin),
            2.0 * (self.half_height + self.wrap_margin),
        )
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            half_width: 16.0,
            half_height: 9.0,
            wrap_margin: 0.1,
        }
    }
}

/// Asteroid tiers, indexed by magnitude (0 = smallest)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsteroidConfig {
    /// Collision and draw radius per magnitude
    pub radii: [f32; 4],
    /// Multiplier on `base_speed` per magnitude
    pub speed_multipliers: [f32; 4],
    /// Drift speed before the tier multiplier
    pub base_speed: f32,
    /// Spin in radians per second
    pub angular_velocity: f32,
    /// Children spawned when a damaged asteroid splits
    pub split_count: u32,
    /// Magnitude of the asteroids in the opening wave
    pub initial_magnitude: u8,
}

impl AsteroidConfig {
    /// Largest magnitude with a tier entry
    #[allow(clippy::cast_possible_truncation)]
    pub fn max_magnitude(&self) -> u8 {
        (self.radii.len() - 1) as u8
    }

    /// Radius of a `magnitude` asteroid, clamped to the largest tier
    pub fn radius(&self, magnitude: u8) -> f32 {
        self.radii[usize::from(magnitude.min(self.max_magnitude()))]
    }

    /// Drift speed of a `magnitude` asteroid, clamped to the largest tier
    pub fn speed(&self, magnitude: u8) -> f32 {
        self.base_speed * self.speed_multipliers[usize::from(magnitude.min(self.max_magnitude()))]
    }
}

impl Default for AsteroidConfig {
    fn default() -> Self {
        Self {
            radii: [0.3, 0.6, 1.0, 2.0],
            speed_multipliers: [4.0, 3.0, 2.0, 1.0],
            base_speed: 0.3,
            angular_velocity: 0.1,
            split_count: 3,
            initial_magnitude: 3,
        }
    }
}

/// Bullet tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletConfig {
    /// Collision radius
    pub radius: f32,
    /// Muzzle speed
    pub speed: f32,
    /// Seconds before the bullet expires
    pub lifetime: f64,
}

impl Default for BulletConfig {
    fn default() -> Self {
        Self {
            radius: 0.2,
            speed: 16.0,
            lifetime: 0.5,
        }
    }
}

/// Ship tuning; steps are applied once per tick while the key is held
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Collision radius
    pub radius: f32,
    /// Heading change per tick
    pub turn_step: f32,
    /// Velocity gained per tick of thrust
    pub thrust_step: f32,
    /// Flame scale change per tick
    pub flame_step: f32,
    /// Seconds between a crash and the replacement ship
    pub respawn_delay: f64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            radius: 0.5,
            turn_step: 0.1,
            thrust_step: 0.1,
            flame_step: 0.1,
            respawn_delay: 2.0,
        }
    }
}

/// All gameplay tunables
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Playfield
    pub arena: ArenaConfig,
    /// Asteroid tiers
    pub asteroids: AsteroidConfig,
    /// Bullets
    pub bullets: BulletConfig,
    /// Player ship
    pub player: PlayerConfig,
    /// Asteroids in the opening wave
    pub initial_asteroids: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            arena: ArenaConfig::default(),
            asteroids: AsteroidConfig::default(),
            bullets: BulletConfig::default(),
            player: PlayerConfig::default(),
            initial_asteroids: 5,
        }
    }
}

impl GameConfig {
    /// Validate ranges the behaviors rely on
    pub fn validate(&self) -> Result<(), ConfigError> {
        let arena = &self.arena;
        require_finite("arena", &[arena.half_width, arena.half_height, arena.wrap_margin])?;
        let tiers = &self.asteroids;
        require_finite("asteroids.radii", &tiers.radii)?;
        require_finite("asteroids.speed_multipliers", &tiers.speed_multipliers)?;
        require_finite("asteroids", &[tiers.base_speed, tiers.angular_velocity])?;
        require_finite("bullets", &[self.bullets.radius, self.bullets.speed])?;
        let player = &self.player;
        require_finite(
            "player",
            &[player.radius, player.turn_step, player.thrust_step, player.flame_step],
        )?;
        if !self.bullets.lifetime.is_finite() || !player.respawn_delay.is_finite() {
            return Err(ConfigError::Invalid("delays must be finite".to_string()));
        }

        if self.arena.half_width <= 0.0 || self.arena.half_height <= 0.0 {
            return Err(ConfigError::Invalid("arena extents must be positive".to_string()));
        }
        if self.arena.wrap_margin < 0.0 {
            return Err(ConfigError::Invalid("wrap_margin cannot be negative".to_string()));
        }
        if self.asteroids.radii.iter().any(|r| *r <= 0.0) {
            return Err(ConfigError::Invalid("asteroid radii must be positive".to_string()));
        }
        if self.bullets.radius <= 0.0 || self.player.radius <= 0.0 {
            return Err(ConfigError::Invalid("collider radii must be positive".to_string()));
        }
        if self.bullets.lifetime < 0.0 || self.player.respawn_delay < 0.0 {
            return Err(ConfigError::Invalid("delays cannot be negative".to_string()));
        }
        Ok(())
    }
}

/// Reject NaN and infinite tunables in `section`
fn require_finite(section: &str, values: &[f32]) -> Result<(), ConfigError> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{section} values must be finite")))
    }
}

/// Headless driver settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Frames to simulate
    pub frames: u64,
    /// Log a population summary every this many frames (0 disables)
    pub report_interval: u64,
    /// Drive the ship with the scripted autopilot
    pub autopilot: bool,
    /// Frames between autopilot shots
    pub fire_interval: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            frames: 1800,
            report_interval: 120,
            autopilot: true,
            fire_interval: 12,
        }
    }
}

/// # Complete Application Configuration
///
/// Top-level configuration loaded by the `asteroids` binary.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AsteroidsConfig {
    /// Engine core configuration
    pub engine: EngineConfig,
    /// Gameplay tunables
    pub game: GameConfig,
    /// Driver settings
    pub run: RunConfig,
}

impl AsteroidsConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.engine.validate()?;
        self.game.validate()?;
        if self.run.autopilot && self.run.fire_interval == 0 {
            return Err(ConfigError::Invalid("fire_interval must be at least 1".to_string()));
        }
        Ok(())
    }
}

impl Config for AsteroidsConfig {}
