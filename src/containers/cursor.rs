//! Position cursors over a `DynamicArray`
//!
//! A [`Cursor`] is a plain `(buffer id, position)` pair. It borrows nothing,
//! so any number of cursors can coexist with mutation of the array, but it is
//! tied to the buffer that was current when it was created: once the array
//! grows into a new buffer, every older cursor is stale and dereferencing it
//! fails with [`ArrayError::StaleCursor`].

use super::dynamic_array::DynamicArray;
use super::slot_buffer::BufferId;
use crate::error::{ArrayError, Result, check_bounds};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Bidirectional position into the storage of a [`DynamicArray<T>`]
///
/// Moving a cursor never clamps: stepping past `end()` or before `begin()`
/// yields a cursor whose dereference reports out of bounds.
///
/// # Examples
///
/// ```rust
/// use dynarray::DynamicArray;
///
/// let mut array = DynamicArray::from_values([1, 2, 3])?;
/// let mut cursor = array.begin();
/// let end = array.end();
/// let mut seen = Vec::new();
/// while cursor != end {
///     seen.push(*cursor.get(&array)?);
///     cursor.advance();
/// }
/// assert_eq!(seen, [1, 2, 3]);
/// # Ok::<(), dynarray::ArrayError>(())
/// ```
pub struct Cursor<T> {
    buffer: BufferId,
    position: usize,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Cursor<T> {
    pub(crate) fn new(buffer: BufferId, position: usize) -> Self {
        Self {
            buffer,
            position,
            _marker: PhantomData,
        }
    }

    /// A cursor attached to no array; every dereference reports it stale
    pub fn detached() -> Self {
        Self::new(BufferId::DETACHED, 0)
    }

    /// Current position
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Buffer this cursor was created on
    #[inline]
    pub fn buffer_id(&self) -> BufferId {
        self.buffer
    }

    /// Whether `array` no longer owns the buffer this cursor refers to
    #[inline]
    pub fn is_stale(&self, array: &DynamicArray<T>) -> bool {
        self.buffer != array.buffer_id()
    }

    fn check(&self, array: &DynamicArray<T>) -> Result<()> {
        if self.is_stale(array) {
            return Err(ArrayError::stale_cursor(self.position));
        }
        check_bounds("cursor", self.position, array.len())
    }

    /// Element under the cursor
    pub fn get<'a>(&self, array: &'a DynamicArray<T>) -> Result<&'a T> {
        self.check(array)?;
        Ok(&array.as_slice()[self.position])
    }

    /// Mutable element under the cursor
    pub fn get_mut<'a>(&self, array: &'a mut DynamicArray<T>) -> Result<&'a mut T> {
        self.check(array)?;
        Ok(&mut array.as_mut_slice()[self.position])
    }

    /// Step forward and return the moved cursor
    pub fn advance(&mut self) -> Self {
        self.position = self.position.wrapping_add(1);
        *self
    }

    /// Step forward and return the cursor as it was before the step
    pub fn advance_post(&mut self) -> Self {
        let prior = *self;
        self.position = self.position.wrapping_add(1);
        prior
    }

    /// Step backward and return the moved cursor
    pub fn retreat(&mut self) -> Self {
        self.position = self.position.wrapping_sub(1);
        *self
    }

    /// Step backward and return the cursor as it was before the step
    pub fn retreat_post(&mut self) -> Self {
        let prior = *self;
        self.position = self.position.wrapping_sub(1);
        prior
    }
}

impl<T> Clone for Cursor<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<T> {}

impl<T> Default for Cursor<T> {
    fn default() -> Self {
        Self::detached()
    }
}

impl<T> PartialEq for Cursor<T> {
    fn eq(&self, other: &Self) -> bool {
        self.buffer == other.buffer && self.position == other.position
    }
}

impl<T> Eq for Cursor<T> {}

impl<T> Hash for Cursor<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.buffer.hash(state);
        self.position.hash(state);
    }
}

impl<T> fmt::Debug for Cursor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("buffer", &self.buffer)
            .field("position", &self.position)
            .finish()
    }
}
