//! Configuration APIs for dynarray
//!
//! Arrays can be built directly from a growth closure, or from an
//! [`ArrayConfig`] that is validated, serializable and loadable from the
//! environment.
//!
//! # Preset Configurations
//!
//! ```rust
//! use dynarray::config::{ArrayConfig, Config};
//!
//! // Large first allocation, doubling growth
//! let config = ArrayConfig::performance_preset();
//!
//! // Small first allocation, ~1.6x growth
//! let config = ArrayConfig::memory_preset();
//! ```
//!
//! # Environment Initialization
//!
//! ```rust
//! use dynarray::config::{ArrayConfig, Config};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Reads DYNARRAY_INITIAL_CAPACITY and DYNARRAY_GROWTH
//! let config = ArrayConfig::from_env()?;
//!
//! // Same keys under a custom prefix
//! let config = ArrayConfig::from_env_with_prefix("MYAPP_")?;
//! # Ok(())
//! # }
//! ```

use crate::error::Result;
use std::env;
use std::fmt;
use std::path::Path;

pub mod array;

#[cfg(test)]
mod tests;

pub use array::{ArrayConfig, GrowthStrategy};

/// Common configuration trait providing validation, environment initialization,
/// and preset management functionality.
pub trait Config: Clone + fmt::Debug {
    /// Validate the configuration for correctness and consistency.
    fn validate(&self) -> Result<()>;

    /// Initialize configuration from environment variables with the
    /// `DYNARRAY_` prefix.
    fn from_env() -> Result<Self>
    where
        Self: Default,
    {
        Self::from_env_with_prefix("DYNARRAY_")
    }

    /// Initialize configuration from environment variables with a custom prefix.
    ///
    /// Unset variables keep their default values.
    fn from_env_with_prefix(prefix: &str) -> Result<Self>
    where
        Self: Default;

    /// Get a performance-optimized preset configuration.
    fn performance_preset() -> Self;

    /// Get a memory-optimized preset configuration.
    fn memory_preset() -> Self;

    /// Get a real-time preset configuration.
    ///
    /// Favors few, predictable reallocations over memory footprint.
    fn realtime_preset() -> Self;

    /// Get a balanced preset configuration, the default.
    fn balanced_preset() -> Self
    where
        Self: Default,
    {
        Self::default()
    }

    /// Save configuration to a JSON file.
    fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()>;

    /// Load and validate configuration from a JSON file.
    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self>;
}

/// Parse an environment variable, falling back to `default` when it is
/// unset or does not parse.
pub fn parse_env_var<T>(var_name: &str, default: T) -> T
where
    T: std::str::FromStr + Clone,
{
    env::var(var_name)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}
