//! Resizable array and its supporting types
//!
//! - **`DynamicArray<T>`** - contiguous array with checked indexing and a pluggable growth policy
//! - **`Cursor<T>`** - bidirectional position that detects buffer replacement
//! - **`GrowthPolicy`** - capacity function consulted when the array is full

mod cursor;
mod dynamic_array;
mod growth;
mod slot_buffer;

pub use cursor::Cursor;
pub use dynamic_array::{ArrayStats, DEFAULT_INITIAL_CAPACITY, DynamicArray, IntoIter};
pub use growth::GrowthPolicy;
pub use slot_buffer::BufferId;
