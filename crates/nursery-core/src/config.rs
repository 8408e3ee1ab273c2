//! Configuration loading and typed config structures for a Nursery session.
//!
//! The canonical configuration lives in `nursery-config.yaml` at the
//! project root. This module defines strongly-typed structs that mirror the
//! YAML structure and a loader that reads, overrides, and validates it.
//! Every field has a default, so a partial file (or an empty one) works.
//!
//! The `behavior` section deserializes straight into
//! [`BehaviorConfig`] from `nursery-agents`.

use std::path::Path;

use nursery_agents::{AgentError, BehaviorConfig};
use serde::Deserialize;

/// Environment variable that overrides `world.seed`.
pub const SEED_ENV_VAR: &str = "NURSERY_SEED";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A world setting is out of range.
    #[error("invalid world configuration: {reason}")]
    Invalid {
        /// What is wrong.
        reason: String,
    },

    /// A behavior setting is out of range.
    #[error("invalid behavior configuration: {source}")]
    Behavior {
        /// The underlying validation error.
        #[from]
        source: AgentError,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level session configuration.
///
/// Mirrors the structure of `nursery-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SimulationConfig {
    /// Household-level settings (seed, size, timing).
    #[serde(default)]
    pub world: WorldConfig,

    /// Emotional rates, regime thresholds, and interaction tuning.
    #[serde(default)]
    pub behavior: BehaviorConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// The `NURSERY_SEED` environment variable, when set, overrides
    /// `world.seed`. The result is validated before it is returned.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if it is not valid YAML, and
    /// [`ConfigError::Invalid`] / [`ConfigError::Behavior`] if a value is
    /// out of range or the seed override is not a number.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&contents)?;
        config.apply_seed_override(std::env::var(SEED_ENV_VAR).ok().as_deref())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a YAML string without validating it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Replace `world.seed` with `value` when one is given.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `value` is not a `u64`.
    pub fn apply_seed_override(&mut self, value: Option<&str>) -> Result<(), ConfigError> {
        if let Some(raw) = value {
            self.world.seed = raw.trim().parse().map_err(|err| ConfigError::Invalid {
                reason: format!("{SEED_ENV_VAR}={raw:?} is not a valid seed: {err}"),
            })?;
        }
        Ok(())
    }

    /// Check every section.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for a bad world setting or
    /// [`ConfigError::Behavior`] for a bad behavior setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.world.validate()?;
        self.behavior.validate()?;
        Ok(())
    }
}

/// Household-level configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WorldConfig {
    /// Human-readable session name.
    #[serde(default = "default_world_name")]
    pub name: String,

    /// Random seed for reproducibility.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Number of children to spawn.
    #[serde(default = "default_children")]
    pub children: u32,

    /// Number of rooms in the house.
    #[serde(default = "default_rooms")]
    pub rooms: u32,

    /// Simulated seconds per tick.
    #[serde(default = "default_step_seconds")]
    pub step_seconds: f32,

    /// Real-time milliseconds between ticks (0 = run flat out).
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Stop after this many ticks (0 = unlimited).
    #[serde(default = "default_max_ticks")]
    pub max_ticks: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            name: default_world_name(),
            seed: default_seed(),
            children: default_children(),
            rooms: default_rooms(),
            step_seconds: default_step_seconds(),
            tick_interval_ms: default_tick_interval_ms(),
            max_ticks: default_max_ticks(),
        }
    }
}

impl WorldConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !self.step_seconds.is_finite() || self.step_seconds <= 0.0 {
            return Err(ConfigError::Invalid {
                reason: format!(
                    "world.step_seconds must be finite and > 0, got {}",
                    self.step_seconds
                ),
            });
        }
        if self.rooms == 0 {
            return Err(ConfigError::Invalid {
                reason: "world.rooms must be at least 1".to_owned(),
            });
        }
        Ok(())
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default log filter (trace, debug, info, warn, error, or a full
    /// `EnvFilter` directive). `RUST_LOG` takes precedence.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions
// ---------------------------------------------------------------------------

fn default_world_name() -> String {
    "Nursery".to_owned()
}

const fn default_seed() -> u64 {
    42
}

const fn default_children() -> u32 {
    4
}

const fn default_rooms() -> u32 {
    3
}

const fn default_step_seconds() -> f32 {
    0.5
}

const fn default_tick_interval_ms() -> u64 {
    100
}

const fn default_max_ticks() -> u64 {
    0
}

fn default_log_level() -> String {
    "info".to_owned()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = SimulationConfig::default();
        assert_eq!(config.world.seed, 42);
        assert_eq!(config.world.children, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_yaml_gives_defaults() {
        assert_eq!(SimulationConfig::parse("").unwrap(), SimulationConfig::default());
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
world:
  name: "Test House"
  seed: 7
  children: 6
  rooms: 2
  step_seconds: 0.25
  tick_interval_ms: 0
  max_ticks: 500

behavior:
  mood:
    hunger_rate: 0.01
  regime:
    upset_timeout_seconds: 20.0
  interaction:
    proximity_radius: 4.0

logging:
  level: debug
"#;
        let config = SimulationConfig::parse(yaml).unwrap();
        assert_eq!(config.world.name, "Test House");
        assert_eq!(config.world.children, 6);
        assert_eq!(config.world.max_ticks, 500);
        assert!((config.behavior.mood.hunger_rate - 0.01).abs() < f32::EPSILON);
        assert!((config.behavior.regime.upset_timeout_seconds - 20.0).abs() < f32::EPSILON);
        // Untouched fields keep their defaults.
        assert!((config.behavior.regime.tantrum_timeout_seconds - 45.0).abs() < f32::EPSILON);
        assert_eq!(config.logging.level, "debug");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn seed_override_applies() {
        let mut config = SimulationConfig::default();
        config.apply_seed_override(Some(" 1234 ")).unwrap();
        assert_eq!(config.world.seed, 1234);
        config.apply_seed_override(None).unwrap();
        assert_eq!(config.world.seed, 1234);
    }

    #[test]
    fn bad_seed_override_rejected() {
        let mut config = SimulationConfig::default();
        assert!(matches!(
            config.apply_seed_override(Some("forty-two")),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn non_positive_step_rejected() {
        let yaml = "world:\n  step_seconds: 0.0\n";
        let config = SimulationConfig::parse(yaml).unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn negative_rate_rejected() {
        let yaml = "behavior:\n  mood:\n    comfort_decay: -0.5\n";
        let config = SimulationConfig::parse(yaml).unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Behavior { .. })));
    }

    #[test]
    fn load_project_config_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("nursery-config.yaml");
        if path.exists() {
            let contents = std::fs::read_to_string(&path).unwrap();
            let config = SimulationConfig::parse(&contents);
            assert!(config.is_ok(), "Failed to parse project config: {config:?}");
            let config = config.unwrap();
            assert!(config.validate().is_ok());
            let defaults = BehaviorConfig::default();
            assert!(
                (config.behavior.regime.tantrum_timeout_seconds
                    - defaults.regime.tantrum_timeout_seconds)
                    .abs()
                    < f32::EPSILON
            );
        }
    }

    #[test]
    fn malformed_yaml_rejected() {
        assert!(matches!(
            SimulationConfig::parse("world: [unclosed"),
            Err(ConfigError::Yaml { .. })
        ));
    }
}
