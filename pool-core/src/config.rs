//! World and material configuration.
//!
//! Loads world settings and body material presets from YAML files, so table
//! size, substep count and ball properties can change without recompiling.
//!
//! ## Directory Structure
//!
//! ```text
//! config/
//! ├── world/
//! │   ├── default.yaml
//! │   └── ...
//! └── materials/
//!     ├── pool_ball.yaml
//!     └── cue_ball.yaml
//! ```
//!
//! Every field of [`WorldConfig`] has a default, so a YAML file only needs to
//! list what it changes.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{constants, PlayField, Vec2};

/// Error type for configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("config not found: {0}")]
    NotFound(String),

    #[error("invalid config: {0}")]
    Invalid(String),
}

// =============================================================================
// World Configuration
// =============================================================================

/// Construction parameters for a [`PhysicsWorld`](crate::world::PhysicsWorld).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Uniform acceleration applied to every dynamic body.
    pub gravity: Vec2,
    /// Outer fixed timestep in seconds.
    pub time_step: f64,
    /// Equal substeps per outer step.
    pub substeps: u32,
    /// Constraint relaxation rounds per substep.
    pub iterations: u32,
    /// Bounds used by the positional clamp.
    pub field: PlayField,
    /// Velocity multiplier after each boundary contact; 1.0 is a no-op.
    pub cushion_damping: f64,
    /// Fraction of body-body overlap corrected per contact.
    pub correction_percent: f64,
}

impl WorldConfig {
    /// Pool table defaults: top-down (no gravity), 240 Hz, 4 substeps.
    pub fn pool_table() -> Self {
        Self {
            gravity: Vec2::ZERO,
            time_step: constants::TIME_STEP,
            substeps: constants::SUBSTEPS,
            iterations: constants::RELAXATION_ITERATIONS,
            field: PlayField::pool_table(),
            cushion_damping: 1.0,
            correction_percent: constants::POSITIONAL_CORRECTION_PERCENT,
        }
    }

    /// Substep length in seconds.
    pub fn substep_dt(&self) -> f64 {
        self.time_step / self.substeps.max(1) as f64
    }

    /// Parse a config from YAML text and validate it.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Reject settings the simulation loop cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.substeps == 0 {
            return Err(ConfigError::Invalid("substeps must be at least 1".into()));
        }
        if self.iterations == 0 {
            return Err(ConfigError::Invalid("iterations must be at least 1".into()));
        }
        if !(self.time_step.is_finite() && self.time_step > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "time_step must be positive and finite, got {}",
                self.time_step
            )));
        }
        if !self.gravity.is_finite() {
            return Err(ConfigError::Invalid("gravity must be finite".into()));
        }
        let field = &self.field;
        if !(field.margin >= 0.0 && field.right() > field.left() && field.bottom() > field.top())
        {
            return Err(ConfigError::Invalid(format!(
                "play field {}x{} with margin {} has no interior",
                field.width, field.height, field.margin
            )));
        }
        if !(0.0..=1.0).contains(&self.correction_percent) {
            return Err(ConfigError::Invalid(format!(
                "correction_percent must be within 0-1, got {}",
                self.correction_percent
            )));
        }
        if !(self.cushion_damping.is_finite() && self.cushion_damping >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "cushion_damping must be non-negative, got {}",
                self.cushion_damping
            )));
        }
        Ok(())
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self::pool_table()
    }
}

// =============================================================================
// Body Materials
// =============================================================================

/// Physical preset for spawning bodies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyMaterial {
    pub name: String,
    pub radius: f64,
    pub mass: f64,
    /// Bounciness, 0-1.
    pub restitution: f64,
    /// Per-substep velocity damping, 0-1.
    pub friction: f64,
}

impl BodyMaterial {
    /// Standard object ball.
    pub fn pool_ball() -> Self {
        Self {
            name: "Pool Ball".to_string(),
            radius: 15.0,
            mass: 1.0,
            restitution: 0.9,
            friction: 0.005,
        }
    }
}

impl Default for BodyMaterial {
    fn default() -> Self {
        Self::pool_ball()
    }
}

// =============================================================================
// Loader
// =============================================================================

/// Configuration loader with a configurable base directory.
pub struct ConfigLoader {
    base_path: PathBuf,
}

impl ConfigLoader {
    /// Create a loader rooted at `base_path`.
    ///
    /// The base path should contain `world/` and `materials/` subdirectories.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Load and validate a world config by name (without `.yaml`).
    ///
    /// # Example
    /// ```ignore
    /// let loader = ConfigLoader::new("config");
    /// let config = loader.load_world("default")?;
    /// ```
    pub fn load_world(&self, name: &str) -> Result<WorldConfig, ConfigError> {
        let contents = self.read("world", name)?;
        let config = WorldConfig::from_yaml_str(&contents)?;
        debug!("loaded world config '{}'", name);
        Ok(config)
    }

    /// Load a body material by name.
    pub fn load_material(&self, name: &str) -> Result<BodyMaterial, ConfigError> {
        let contents = self.read("materials", name)?;
        let material: BodyMaterial = serde_yaml::from_str(&contents)?;
        debug!("loaded material '{}' ({})", name, material.name);
        Ok(material)
    }

    /// List all available world configs.
    pub fn list_worlds(&self) -> Result<Vec<String>, ConfigError> {
        self.list("world")
    }

    /// List all available materials.
    pub fn list_materials(&self) -> Result<Vec<String>, ConfigError> {
        self.list("materials")
    }

    fn read(&self, subdir: &str, name: &str) -> Result<String, ConfigError> {
        let path = self.base_path.join(subdir).join(format!("{}.yaml", name));
        if !path.exists() {
            return Err(ConfigError::NotFound(name.to_string()));
        }
        Ok(fs::read_to_string(&path)?)
    }

    fn list(&self, subdir: &str) -> Result<Vec<String>, ConfigError> {
        let path = self.base_path.join(subdir);
        if !path.exists() {
            return Ok(vec![]);
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&path)? {
            let file_name = entry?.file_name();
            if let Some(name) = file_name.to_string_lossy().strip_suffix(".yaml") {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}

/// Load a world config from an explicit file path.
pub fn load_world_file<P: AsRef<Path>>(path: P) -> Result<WorldConfig, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ConfigError::NotFound(path.display().to_string()));
    }
    let config = WorldConfig::from_yaml_str(&fs::read_to_string(path)?)?;
    debug!("loaded world config from {}", path.display());
    Ok(config)
}

// =============================================================================
// Tests
// =============================================================================
