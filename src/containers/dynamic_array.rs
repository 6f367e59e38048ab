//! DynamicArray: resizable array with an injectable growth policy
//!
//! Storage is a [`SlotBuffer`] whose every slot holds a value: slots below
//! `len` are live, the rest hold `T::default()` filler. When an insertion
//! finds the array full, the growth policy picks a new capacity, a fresh
//! buffer of that size is allocated, the live elements are moved over, and
//! the old buffer is dropped. Capacity never shrinks.

use super::cursor::Cursor;
use super::growth::GrowthPolicy;
use super::slot_buffer::{BufferId, SlotBuffer};
use crate::config::{ArrayConfig, Config};
use crate::error::{ArrayError, Result, check_bounds, check_insert_position};
use std::alloc::{self, Layout};
use std::fmt;
use std::iter::FusedIterator;
use std::mem;
use std::ops::{Deref, DerefMut, Index, IndexMut};
use std::ptr::{self, NonNull};
use std::slice;

/// Capacity allocated by constructors that are not given one
pub const DEFAULT_INITIAL_CAPACITY: usize = 10;

/// Snapshot of an array's storage state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrayStats {
    /// Live elements
    pub len: usize,
    /// Allocated slots
    pub capacity: usize,
    /// Buffer replacements since construction
    pub reallocations: usize,
    /// Identity of the current buffer
    pub buffer_id: BufferId,
}

/// Resizable array with amortized O(1) append and a pluggable growth policy
///
/// Every index-taking operation is checked and reports
/// [`ArrayError::OutOfBounds`] without touching the array. `get` and
/// `remove` accept `index < len`; `insert` also accepts `index == len`.
///
/// # Examples
///
/// ```rust
/// use dynarray::DynamicArray;
///
/// let mut array = DynamicArray::new();
/// for i in 0..10 {
///     array.push(i)?;
/// }
/// assert_eq!(array.capacity(), 10);
///
/// array.push(10)?;
/// assert_eq!(array.capacity(), 20);
///
/// array.insert(0, -1)?;
/// assert_eq!(*array.get(0)?, -1);
/// assert_eq!(array.remove(0)?, -1);
/// assert_eq!(array.len(), 11);
/// # Ok::<(), dynarray::ArrayError>(())
/// ```
pub struct DynamicArray<T> {
    slots: SlotBuffer<T>,
    len: usize,
    policy: GrowthPolicy,
    reallocations: usize,
}

/// Allocate the first buffer of an array whose constructor cannot fail.
fn initial_slots<T: Default>(capacity: usize) -> SlotBuffer<T> {
    match SlotBuffer::allocate(capacity) {
        Ok(slots) => slots,
        Err(ArrayError::OutOfMemory { .. }) => match Layout::array::<T>(capacity) {
            Ok(layout) => alloc::handle_alloc_error(layout),
            Err(_) => panic!("capacity overflow"),
        },
        Err(err) => panic!("{}", err),
    }
}

impl<T: Default> DynamicArray<T> {
    /// Create an empty array with the default capacity and doubling growth
    #[inline]
    pub fn new() -> Self {
        Self::with_policy(GrowthPolicy::default())
    }

    /// Create an empty array with the default capacity and a custom policy
    pub fn with_policy(policy: GrowthPolicy) -> Self {
        Self {
            slots: initial_slots(DEFAULT_INITIAL_CAPACITY),
            len: 0,
            policy,
            reallocations: 0,
        }
    }

    /// Create an array of `len` default values
    ///
    /// Capacity is `2 * len` when `len` exceeds the default capacity,
    /// otherwise the default capacity.
    pub fn with_len(len: usize) -> Result<Self> {
        Self::with_len_and_policy(len, GrowthPolicy::default())
    }

    /// Create an array of `len` default values with a custom policy
    pub fn with_len_and_policy(len: usize, policy: GrowthPolicy) -> Result<Self> {
        let capacity = if len > DEFAULT_INITIAL_CAPACITY {
            len.checked_mul(2).ok_or_else(|| ArrayError::capacity_overflow(len))?
        } else {
            DEFAULT_INITIAL_CAPACITY
        };
        Ok(Self {
            slots: SlotBuffer::allocate(capacity)?,
            len,
            policy,
            reallocations: 0,
        })
    }

    /// Create an empty array from a validated [`ArrayConfig`]
    pub fn with_config(config: &ArrayConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            slots: SlotBuffer::allocate(config.initial_capacity)?,
            len: 0,
            policy: config.policy(),
            reallocations: 0,
        })
    }

    /// Create an array by pushing each value in turn
    ///
    /// Starts from the default capacity, so the growth policy applies as the
    /// values arrive rather than through one bulk allocation.
    pub fn from_values<I>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        Self::from_values_with_policy(values, GrowthPolicy::default())
    }

    /// Create an array by pushing each value in turn under a custom policy
    pub fn from_values_with_policy<I>(values: I, policy: GrowthPolicy) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let mut array = Self::with_policy(policy);
        array.extend_from_iter(values)?;
        Ok(array)
    }

    /// Append an element
    pub fn push(&mut self, value: T) -> Result<()> {
        if self.len == self.slots.capacity() {
            self.grow()?;
        }

        self.slots.slots_mut()[self.len] = value;
        self.len += 1;
        Ok(())
    }

    /// Insert an element at `index`, shifting later elements right
    ///
    /// `index == len` appends.
    pub fn insert(&mut self, index: usize, value: T) -> Result<()> {
        check_insert_position(index, self.len)?;

        if self.len == self.slots.capacity() {
            self.grow()?;
        }

        let len = self.len;
        let slots = self.slots.slots_mut();
        slots[len] = value;
        slots[index..=len].rotate_right(1);
        self.len += 1;
        Ok(())
    }

    /// Remove and return the element at `index`, shifting later elements left
    ///
    /// Capacity is unchanged; the vacated trailing slot becomes filler.
    pub fn remove(&mut self, index: usize) -> Result<T> {
        check_bounds("remove", index, self.len)?;

        let len = self.len;
        let slots = self.slots.slots_mut();
        slots[index..len].rotate_left(1);
        self.len -= 1;
        Ok(mem::take(&mut slots[len - 1]))
    }

    /// Drop every element, keeping capacity and the current buffer
    ///
    /// Cursors stay attached to the buffer but no position is live.
    pub fn clear(&mut self) {
        let len = self.len;
        self.slots.slots_mut()[..len].fill_with(T::default);
        self.len = 0;
    }

    /// Push every value from `values`, stopping at the first failure
    pub fn extend_from_iter<I>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        for value in values {
            self.push(value)?;
        }
        Ok(())
    }

    /// Replace the buffer with a larger one chosen by the growth policy.
    /// Nothing changes if the policy stalls or allocation fails.
    fn grow(&mut self) -> Result<()> {
        let capacity = self.slots.capacity();
        let proposed = self.policy.next_capacity(capacity);
        if proposed <= capacity {
            log::warn!(
                "Growth policy '{}' stalled at capacity {} (proposed {})",
                self.policy.label(),
                capacity,
                proposed
            );
            return Err(ArrayError::stalled_growth(capacity, proposed));
        }

        let mut fresh = SlotBuffer::allocate(proposed)?;
        let len = self.len;
        fresh.slots_mut()[..len].swap_with_slice(&mut self.slots.slots_mut()[..len]);

        log::debug!(
            "DynamicArray grew from {} to {} slots ({} -> {})",
            capacity,
            proposed,
            self.slots.id(),
            fresh.id()
        );
        self.slots = fresh;
        self.reallocations += 1;
        Ok(())
    }
}

impl<T> DynamicArray<T> {
    /// Number of live elements
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the array has no live elements
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of allocated slots
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Identity of the current buffer
    #[inline]
    pub fn buffer_id(&self) -> BufferId {
        self.slots.id()
    }

    /// Growth policy chosen at construction
    pub fn policy(&self) -> &GrowthPolicy {
        &self.policy
    }

    /// Storage counters
    pub fn stats(&self) -> ArrayStats {
        ArrayStats {
            len: self.len,
            capacity: self.slots.capacity(),
            reallocations: self.reallocations,
            buffer_id: self.slots.id(),
        }
    }

    /// Element at `index`
    #[inline]
    pub fn get(&self, index: usize) -> Result<&T> {
        check_bounds("get", index, self.len)?;
        Ok(&self.slots.slots()[index])
    }

    /// Mutable element at `index`
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        check_bounds("get", index, self.len)?;
        Ok(&mut self.slots.slots_mut()[index])
    }

    /// Live elements as a slice
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.slots.slots()[..self.len]
    }

    /// Live elements as a mutable slice
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        let len = self.len;
        &mut self.slots.slots_mut()[..len]
    }

    /// Apply `action` to every element in index order
    pub fn for_each<F>(&mut self, mut action: F)
    where
        F: FnMut(&mut T),
    {
        for item in self.as_mut_slice() {
            action(item);
        }
    }

    /// Cursor at the first element
    #[inline]
    pub fn begin(&self) -> Cursor<T> {
        Cursor::new(self.slots.id(), 0)
    }

    /// Cursor one past the last element
    #[inline]
    pub fn end(&self) -> Cursor<T> {
        Cursor::new(self.slots.id(), self.len)
    }

    /// Cursor at an arbitrary position; not checked until dereferenced
    #[inline]
    pub fn cursor_at(&self, position: usize) -> Cursor<T> {
        Cursor::new(self.slots.id(), position)
    }

    /// Borrowing iterator over the live elements
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Mutably borrowing iterator over the live elements
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Move the live elements out into a `Vec`
    pub fn into_vec(self) -> Vec<T> {
        self.into_iter().collect()
    }
}

/// Build a [`DynamicArray`] from a list of values, pushing each in order
///
/// Expands to [`DynamicArray::from_values`] and so returns a `Result`.
///
/// ```rust
/// use dynarray::dynamic_array;
///
/// let array = dynamic_array![1, 2, 3]?;
/// assert_eq!(array.as_slice(), &[1, 2, 3]);
/// # Ok::<(), dynarray::ArrayError>(())
/// ```
#[macro_export]
macro_rules! dynamic_array {
    () => {
        $crate::DynamicArray::from_values(::std::iter::empty())
    };
    ($($value:expr),+ $(,)?) => {
        $crate::DynamicArray::from_values([$($value),+])
    };
}

impl<T: Default> Default for DynamicArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deref for DynamicArray<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T> DerefMut for DynamicArray<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<T> Index<usize> for DynamicArray<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.as_slice()[index]
    }
}

impl<T> IndexMut<usize> for DynamicArray<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.as_mut_slice()[index]
    }
}

impl<T: fmt::Debug> fmt::Debug for DynamicArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl<T: PartialEq> PartialEq for DynamicArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for DynamicArray<T> {}

/// Deep copy: the clone owns a new buffer of the same capacity and shares
/// the growth policy.
impl<T: Clone + Default> Clone for DynamicArray<T> {
    fn clone(&self) -> Self {
        let mut slots = initial_slots(self.capacity());
        slots.slots_mut()[..self.len].clone_from_slice(self.as_slice());
        Self {
            slots,
            len: self.len,
            policy: self.policy.clone(),
            reallocations: 0,
        }
    }
}

impl<'a, T> IntoIterator for &'a DynamicArray<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut DynamicArray<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T> IntoIterator for DynamicArray<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        let len = self.len;
        let (ptr, cap, layout) = self.slots.into_raw_parts();
        IntoIter {
            ptr,
            cap,
            layout,
            len,
            front: 0,
            back: len,
        }
    }
}

/// Owning iterator over the live elements of a [`DynamicArray`]
///
/// Elements are moved straight out of the array's buffer. Whatever is not
/// consumed, filler included, is dropped with the iterator.
pub struct IntoIter<T> {
    ptr: NonNull<T>,
    cap: usize,
    layout: Layout,
    len: usize,
    // Unread live elements are `[front, back)`
    front: usize,
    back: usize,
}

impl<T> IntoIter<T> {
    /// Elements not yet yielded
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: `[front, back)` are initialized and not yet moved out
        unsafe { slice::from_raw_parts(self.ptr.as_ptr().add(self.front), self.back - self.front) }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }
        // SAFETY: `front < back <= len`, and the slot is read exactly once
        let value = unsafe { ptr::read(self.ptr.as_ptr().add(self.front)) };
        self.front += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        // SAFETY: `back` was in `[front, len)` and is never read again
        Some(unsafe { ptr::read(self.ptr.as_ptr().add(self.back)) })
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        let base = self.ptr.as_ptr();
        unsafe {
            // SAFETY: unread live elements and the filler past `len` are
            // still initialized; yielded slots are skipped
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(base.add(self.front), self.back - self.front));
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(base.add(self.len), self.cap - self.len));
            if self.layout.size() != 0 {
                // SAFETY: the block was allocated with `self.layout`
                alloc::dealloc(base as *mut u8, self.layout);
            }
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

// Safety: IntoIter<T> owns the remaining elements, like the array it came from
unsafe impl<T: Send> Send for IntoIter<T> {}
unsafe impl<T: Sync> Sync for IntoIter<T> {}

impl<T> From<DynamicArray<T>> for Vec<T> {
    fn from(array: DynamicArray<T>) -> Self {
        array.into_vec()
    }
}
