//! Error handling for the dynarray library
//!
//! Every fallible operation returns [`Result`], carrying an [`ArrayError`]
//! that describes what was rejected. Failed operations never leave partial
//! state behind.

use thiserror::Error;

/// Main error type for the dynarray library
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArrayError {
    /// Index outside the valid range of an operation
    #[error("Index out of bounds for {operation}: index {index}, len {len}")]
    OutOfBounds {
        /// Operation that rejected the index
        operation: &'static str,
        /// The invalid index
        index: usize,
        /// Number of live elements at the time of the call
        len: usize,
    },

    /// Cursor refers to a buffer the array no longer owns
    #[error("Stale cursor at position {position}: the array has reallocated or is a different array")]
    StaleCursor {
        /// Position held by the cursor
        position: usize,
    },

    /// Growth policy returned a capacity that is not larger than the current one
    #[error("Growth policy stalled: capacity {capacity} -> {proposed}")]
    StalledGrowth {
        /// Capacity when growth was requested
        capacity: usize,
        /// Capacity proposed by the policy
        proposed: usize,
    },

    /// Requested capacity does not fit in the address space
    #[error("Capacity overflow: {requested} slots")]
    CapacityOverflow {
        /// Number of slots requested
        requested: usize,
    },

    /// Memory allocation failures
    #[error("Memory allocation failed: requested {size} bytes")]
    OutOfMemory {
        /// Number of bytes requested
        size: usize,
    },

    /// Configuration or parameter errors
    #[error("Invalid configuration: {message}")]
    Configuration {
        /// Configuration error message
        message: String,
    },
}

impl ArrayError {
    /// Create an out of bounds error
    pub fn out_of_bounds(operation: &'static str, index: usize, len: usize) -> Self {
        Self::OutOfBounds { operation, index, len }
    }

    /// Create a stale cursor error
    pub fn stale_cursor(position: usize) -> Self {
        Self::StaleCursor { position }
    }

    /// Create a stalled growth error
    pub fn stalled_growth(capacity: usize, proposed: usize) -> Self {
        Self::StalledGrowth { capacity, proposed }
    }

    /// Create a capacity overflow error
    pub fn capacity_overflow(requested: usize) -> Self {
        Self::CapacityOverflow { requested }
    }

    /// Create an out of memory error
    pub fn out_of_memory(size: usize) -> Self {
        Self::OutOfMemory { size }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration { message: message.into() }
    }

    /// Check if this is a recoverable error
    ///
    /// Allocation failures may succeed on retry; everything else is a
    /// caller mistake that retrying cannot fix.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::OutOfMemory { .. } => true,
            Self::OutOfBounds { .. } => false,
            Self::StaleCursor { .. } => false,
            Self::StalledGrowth { .. } => false,
            Self::CapacityOverflow { .. } => false,
            Self::Configuration { .. } => false,
        }
    }

    /// Get the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Self::OutOfBounds { .. } => "bounds",
            Self::StaleCursor { .. } => "cursor",
            Self::StalledGrowth { .. } => "growth",
            Self::CapacityOverflow { .. } => "capacity",
            Self::OutOfMemory { .. } => "memory",
            Self::Configuration { .. } => "config",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, ArrayError>;

/// Check that `index` addresses a live element
#[inline]
pub fn check_bounds(operation: &'static str, index: usize, len: usize) -> Result<()> {
    if index >= len {
        Err(ArrayError::out_of_bounds(operation, index, len))
    } else {
        Ok(())
    }
}

/// Check that `index` is a valid insertion point (one past the end included)
#[inline]
pub fn check_insert_position(index: usize, len: usize) -> Result<()> {
    if index > len {
        Err(ArrayError::out_of_bounds("insert", index, len))
    } else {
        Ok(())
    }
}
