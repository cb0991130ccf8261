//! Configuration loading for the bridge.
//!
//! All bridge settings are loaded from a TOML configuration file.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::units::UnitScale;

/// Complete bridge configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Unit conversion settings
    #[serde(default)]
    pub units: UnitsSection,
    /// Frame clock settings
    #[serde(default)]
    pub clock: ClockSection,
    /// Solver settings
    #[serde(default)]
    pub solver: SolverSection,
    /// Episode reset settings
    #[serde(default)]
    pub episode: EpisodeSection,
    /// Demo scene settings
    #[serde(default)]
    pub scene: SceneSection,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            units: UnitsSection::default(),
            clock: ClockSection::default(),
            solver: SolverSection::default(),
            episode: EpisodeSection::default(),
            scene: SceneSection::default(),
        }
    }
}

impl BridgeConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Serializes the configuration as a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Checks every section, failing on the first invalid value.
    ///
    /// Parsing and validation are separate steps so callers can apply
    /// overrides in between.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.unit_scale()?;
        if !self.clock.max_dt.is_finite() || self.clock.max_dt <= 0.0 {
            return Err(ConfigError::InvalidMaxDt(self.clock.max_dt));
        }
        if !self.solver.gravity.iter().all(|g| g.is_finite()) {
            return Err(ConfigError::InvalidGravity);
        }
        if self.solver.solver_iterations == 0 {
            return Err(ConfigError::InvalidSolverIterations);
        }
        if self.episode.reset_interval == 0 {
            return Err(ConfigError::InvalidResetInterval);
        }
        if !self.scene.restitution.is_finite() || self.scene.restitution < 0.0 {
            return Err(ConfigError::InvalidRestitution(self.scene.restitution));
        }
        Ok(())
    }

    /// The configured unit scale.
    pub fn unit_scale(&self) -> Result<UnitScale, ConfigError> {
        UnitScale::new(self.units.units_per_meter)
    }
}

/// Unit conversion configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitsSection {
    /// Display units per simulation meter
    pub units_per_meter: f32,
}

impl Default for UnitsSection {
    fn default() -> Self {
        Self {
            units_per_meter: 3.0,
        }
    }
}

/// Frame clock configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockSection {
    /// Upper bound on one frame's delta, seconds
    pub max_dt: f32,
}

impl Default for ClockSection {
    fn default() -> Self {
        Self { max_dt: 0.25 }
    }
}

/// Solver configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSection {
    /// Gravity vector, m/s^2
    pub gravity: [f32; 2],
    /// Constraint solver iterations per step
    pub solver_iterations: usize,
}

impl Default for SolverSection {
    fn default() -> Self {
        Self {
            gravity: [0.0, -9.8],
            solver_iterations: 4,
        }
    }
}

/// Episode reset configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EpisodeSection {
    /// Simulation steps between ball resets
    pub reset_interval: u32,
}

impl Default for EpisodeSection {
    fn default() -> Self {
        Self {
            reset_interval: 250,
        }
    }
}

/// Demo scene configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneSection {
    /// Restitution for both the ground and the ball
    pub restitution: f32,
    /// Ball spawn position, display units
    pub spawn_position: [f32; 2],
    /// Ground tilt, radians
    pub ground_tilt: f32,
}

impl Default for SceneSection {
    fn default() -> Self {
        Self {
            restitution: 0.8,
            spawn_position: [2.5, 5.0],
            ground_tilt: 0.1,
        }
    }
}

/// Errors that can occur loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Error parsing TOML config
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    /// Error serializing TOML config
    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    /// Scale factor out of range
    #[error("units_per_meter must be finite and positive, got {0}")]
    InvalidScale(f32),
    /// Frame clamp out of range
    #[error("clock.max_dt must be finite and positive, got {0}")]
    InvalidMaxDt(f32),
    /// Gravity component not finite
    #[error("solver.gravity components must be finite")]
    InvalidGravity,
    /// Solver iteration count out of range
    #[error("solver.solver_iterations must be at least 1")]
    InvalidSolverIterations,
    /// Reset interval out of range
    #[error("episode.reset_interval must be at least 1")]
    InvalidResetInterval,
    /// Restitution out of range
    #[error("scene.restitution must be finite and non-negative, got {0}")]
    InvalidRestitution(f32),
}

/// Generates a default configuration file content.
pub fn default_config_toml() -> String {
    r#"# Physics bridge configuration

[units]
# Display units per simulation meter
units_per_meter = 3.0

[clock]
# Upper bound on one frame's delta, seconds
max_dt = 0.25

[solver]
gravity = [0.0, -9.8]
solver_iterations = 4

[episode]
# Simulation steps between ball resets
reset_interval = 250

[scene]
restitution = 0.8
# Display units
spawn_position = [2.5, 5.0]
# Radians
ground_tilt = 0.1
"#
    .to_string()
}
