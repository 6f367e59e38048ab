//! # dynarray: resizable array with a pluggable growth policy
//!
//! [`DynamicArray<T>`] is a contiguous array with amortized constant-time
//! append, checked indexed access, insertion and removal at any position,
//! and a growth policy chosen at construction.
//!
//! ## Key Features
//!
//! - **Checked operations**: out-of-range indices are reported as errors, never partially applied
//! - **Injectable growth**: any `capacity -> capacity` closure, or a serializable preset
//! - **Generation-checked cursors**: a [`Cursor`] taken before a reallocation reports itself stale
//! - **Configuration**: [`config::ArrayConfig`] with presets, environment and JSON file loading
//!
//! ## Quick Start
//!
//! ```rust
//! use dynarray::{DynamicArray, GrowthPolicy};
//!
//! let mut array = DynamicArray::with_policy(GrowthPolicy::from_fn(|cap| cap + 1));
//! for i in 0..11 {
//!     array.push(i)?;
//! }
//! assert_eq!(array.capacity(), 11);
//!
//! array.for_each(|x| *x *= 2);
//! assert_eq!(*array.get(10)?, 20);
//!
//! let cursor = array.begin();
//! array.push(11)?; // grows, replacing the buffer
//! assert!(cursor.get(&array).is_err());
//! # Ok::<(), dynarray::ArrayError>(())
//! ```

#![warn(missing_docs)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod config;
pub mod containers;
pub mod error;

// Re-export core types
pub use config::{ArrayConfig, GrowthStrategy};
pub use containers::{
    ArrayStats, BufferId, Cursor, DEFAULT_INITIAL_CAPACITY, DynamicArray, GrowthPolicy,
};
pub use error::{ArrayError, Result};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library (currently only logs the version)
pub fn init() {
    log::debug!("Initializing dynarray v{}", VERSION);
}
