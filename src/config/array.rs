//! Array configuration: first allocation size and growth strategy.

use super::{Config, parse_env_var};
use crate::containers::{DEFAULT_INITIAL_CAPACITY, GrowthPolicy};
use crate::error::{ArrayError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Serializable growth strategies
///
/// Closures cannot be stored in a config file; these presets cover the
/// common shapes and convert into a [`GrowthPolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GrowthStrategy {
    /// `capacity * 2`
    #[default]
    Doubling,
    /// `capacity * 103 / 64`, at least one more slot
    GoldenRatio,
    /// `capacity + step`
    Linear {
        /// Slots added per growth
        step: usize,
    },
}

impl GrowthStrategy {
    /// Short name used in logs and debug output
    pub fn label(&self) -> &'static str {
        match self {
            Self::Doubling => "doubling",
            Self::GoldenRatio => "golden_ratio",
            Self::Linear { .. } => "linear",
        }
    }
}

impl fmt::Display for GrowthStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear { step } => write!(f, "linear:{}", step),
            other => f.write_str(other.label()),
        }
    }
}

impl FromStr for GrowthStrategy {
    type Err = ArrayError;

    /// Accepts `doubling`, `golden` / `golden_ratio` and `linear:<step>`
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim().to_lowercase();
        match s.as_str() {
            "doubling" | "double" => Ok(Self::Doubling),
            "golden" | "golden_ratio" => Ok(Self::GoldenRatio),
            _ => {
                let step = s
                    .strip_prefix("linear:")
                    .ok_or_else(|| ArrayError::configuration(format!("unknown growth strategy '{}'", s)))?;
                let step = step
                    .parse::<usize>()
                    .map_err(|e| ArrayError::configuration(format!("invalid linear step '{}': {}", step, e)))?;
                Ok(Self::Linear { step })
            }
        }
    }
}

/// Configuration for constructing a [`DynamicArray`](crate::DynamicArray)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrayConfig {
    /// Slots allocated by the constructor
    pub initial_capacity: usize,
    /// How capacity grows once the array is full
    pub growth: GrowthStrategy,
}

impl ArrayConfig {
    /// Set the initial capacity
    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    /// Set the growth strategy
    pub fn with_growth(mut self, growth: GrowthStrategy) -> Self {
        self.growth = growth;
        self
    }

    /// Growth policy described by this config
    pub fn policy(&self) -> GrowthPolicy {
        self.growth.into()
    }
}

impl Default for ArrayConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            growth: GrowthStrategy::Doubling,
        }
    }
}

impl Config for ArrayConfig {
    fn validate(&self) -> Result<()> {
        if self.initial_capacity == 0 {
            return Err(ArrayError::configuration("initial_capacity must be greater than 0"));
        }
        if let GrowthStrategy::Linear { step: 0 } = self.growth {
            return Err(ArrayError::configuration("linear growth step must be greater than 0"));
        }
        Ok(())
    }

    /// An unparsable `INITIAL_CAPACITY` falls back to the default, but a set
    /// `GROWTH` must name a known strategy.
    fn from_env_with_prefix(prefix: &str) -> Result<Self> {
        let defaults = Self::default();
        let config = Self {
            initial_capacity: parse_env_var(
                &format!("{}INITIAL_CAPACITY", prefix),
                defaults.initial_capacity,
            ),
            growth: match env::var(format!("{}GROWTH", prefix)) {
                Ok(value) => value.parse::<GrowthStrategy>()?,
                Err(_) => defaults.growth,
            },
        };
        config.validate()?;
        Ok(config)
    }

    fn performance_preset() -> Self {
        Self { initial_capacity: 64, growth: GrowthStrategy::Doubling }
    }

    fn memory_preset() -> Self {
        Self { initial_capacity: 4, growth: GrowthStrategy::GoldenRatio }
    }

    fn realtime_preset() -> Self {
        Self { initial_capacity: 1024, growth: GrowthStrategy::Doubling }
    }

    fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let serialized = serde_json::to_string_pretty(self)
            .map_err(|e| ArrayError::configuration(format!("Failed to serialize array config: {}", e)))?;
        std::fs::write(path, serialized)
            .map_err(|e| ArrayError::configuration(format!("Failed to write array config file: {}", e)))?;
        Ok(())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ArrayError::configuration(format!("Failed to read array config file: {}", e)))?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| ArrayError::configuration(format!("Failed to parse array config file: {}", e)))?;
        config.validate()?;
        Ok(config)
    }
}
