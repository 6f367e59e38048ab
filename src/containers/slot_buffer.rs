//! SlotBuffer: fixed block of initialized slots backing a `DynamicArray`
//!
//! A buffer is allocated once with `std::alloc`, every slot is filled with
//! `T::default()`, and it is never resized. Growth replaces the whole buffer.
//! Each allocation receives a process-unique [`BufferId`] so cursors can tell
//! whether the storage they were created on is still current.

use crate::error::{ArrayError, Result};
use std::alloc::{self, Layout};
use std::fmt;
use std::mem;
use std::ptr::{self, NonNull};
use std::slice;
use std::sync::atomic::{AtomicU64, Ordering};

/// Id 0 is reserved for detached cursors.
static NEXT_BUFFER_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of one slot allocation
///
/// Two ids compare equal only if they name the same allocation. A new id is
/// issued on every construction, growth and clone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BufferId(u64);

impl BufferId {
    /// Id carried by cursors that were never attached to an array
    pub const DETACHED: BufferId = BufferId(0);

    fn next() -> Self {
        Self(NEXT_BUFFER_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Whether this id refers to no buffer at all
    #[inline]
    pub fn is_detached(self) -> bool {
        self.0 == 0
    }

    /// Raw numeric value, useful in log lines
    #[inline]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for BufferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "buf#{}", self.0)
    }
}

pub(crate) struct SlotBuffer<T> {
    ptr: NonNull<T>,
    cap: usize,
    layout: Layout,
    id: BufferId,
}

/// Releases a partially filled allocation if `T::default()` panics.
struct FillGuard<T> {
    ptr: NonNull<T>,
    layout: Layout,
    initialized: usize,
}

impl<T> Drop for FillGuard<T> {
    fn drop(&mut self) {
        unsafe {
            // SAFETY: exactly `initialized` leading slots were written
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.ptr.as_ptr(), self.initialized));
            if self.layout.size() != 0 {
                // SAFETY: allocated with this layout in `SlotBuffer::allocate`
                alloc::dealloc(self.ptr.as_ptr() as *mut u8, self.layout);
            }
        }
    }
}

impl<T: Default> SlotBuffer<T> {
    /// Allocate `cap` slots, each holding `T::default()`
    pub(crate) fn allocate(cap: usize) -> Result<Self> {
        let layout = Layout::array::<T>(cap).map_err(|_| ArrayError::capacity_overflow(cap))?;

        let ptr = if layout.size() == 0 {
            NonNull::dangling()
        } else {
            // SAFETY: layout has a non-zero size
            let raw = unsafe { alloc::alloc(layout) as *mut T };
            NonNull::new(raw).ok_or_else(|| ArrayError::out_of_memory(layout.size()))?
        };

        let mut guard = FillGuard { ptr, layout, initialized: 0 };
        while guard.initialized < cap {
            unsafe {
                // SAFETY: index is below `cap` and the slot is uninitialized
                ptr::write(ptr.as_ptr().add(guard.initialized), T::default());
            }
            guard.initialized += 1;
        }
        mem::forget(guard);

        Ok(Self {
            ptr,
            cap,
            layout,
            id: BufferId::next(),
        })
    }
}

impl<T> SlotBuffer<T> {
    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.cap
    }

    #[inline]
    pub(crate) fn id(&self) -> BufferId {
        self.id
    }

    /// All `cap` slots, filler included
    #[inline]
    pub(crate) fn slots(&self) -> &[T] {
        // SAFETY: every slot was initialized in `allocate` and stays initialized
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.cap) }
    }

    #[inline]
    pub(crate) fn slots_mut(&mut self) -> &mut [T] {
        // SAFETY: as in `slots`, and `&mut self` guarantees exclusivity
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.cap) }
    }
    /// Give up ownership without dropping any slot or freeing the block.
    /// The caller becomes responsible for both.
    pub(crate) fn into_raw_parts(self) -> (NonNull<T>, usize, Layout) {
        let this = mem::ManuallyDrop::new(self);
        (this.ptr, this.cap, this.layout)
    }
}

impl<T> Drop for SlotBuffer<T> {
    fn drop(&mut self) {
        unsafe {
            // SAFETY: all `cap` slots are initialized
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.ptr.as_ptr(), self.cap));
            if self.layout.size() != 0 {
                // SAFETY: allocated with `self.layout` in `allocate`
                alloc::dealloc(self.ptr.as_ptr() as *mut u8, self.layout);
            }
        }
    }
}

// Safety: SlotBuffer<T> owns its slots, so it is Send/Sync exactly when T is
unsafe impl<T: Send> Send for SlotBuffer<T> {}
unsafe impl<T: Sync> Sync for SlotBuffer<T> {}
