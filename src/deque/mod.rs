//! `Deque` - a double-ended, random-access sequence over a table of chunks.
//!
//! ## Layout
//!
//! Elements live in fixed-size chunks of `CHUNK` uninitialised slots. A table of
//! chunk handles orders the chunks, and two cursors, `begin` and `end`, delimit
//! the half-open window of live slots. Every slot in `[begin, end)` holds a
//! value; no slot outside it does.
//!
//! ```text
//!   chunk:   0          1          2          3
//!          [ . . . . ][ . . x x ][ x x x x ][ x . . . ]
//!                            ^begin             ^end
//! ```
//!
//! ## Growth
//!
//! A push that needs a slot outside the table grows it to three times its
//! capacity and re-centres the old chunk handles (see [`crate::growth`]). Only
//! handles move; storage blocks, and the values in them, stay put. Growth is
//! lazy, so `end` may rest on `(chunk_count, 0)`, one past the last chunk,
//! until the next `push_back` needs a slot there.
//!
//! ## Time Complexity
//! - **`push_back` / `push_front`**: O(1) amortised
//! - **`pop_back` / `pop_front`**: O(1)
//! - **Indexing**: O(1), one division (a shift for power-of-two chunks)
//! - **`insert` / `remove`**: O(len - index)
//! - **`reserve`**: O(chunk count), no element is moved
//!
//! ## Example
//! ```rust
//! use chunk_deque::Deque;
//!
//! let mut d: Deque<i32, 8> = Deque::new();
//! d.push_back(1);
//! d.push_back(2);
//! d.push_front(0);
//! assert_eq!(d.len(), 3);
//! assert_eq!(d.at(0), Ok(&0));
//! assert_eq!(d[2], 2);
//! assert!(d.at(3).is_err());
//! ```

mod fill;
mod traits;

use core::fmt;
use core::ptr;

use crate::alloc::{ChunkTable, GrowFailure};
use crate::cursor::Cursor;
use crate::cursor_mut::CursorMut;
use crate::error::DequeError;
use crate::growth;
use crate::iter::{Iter, IterMut};

pub use traits::IntoIter;

/// Chunk size used when none is given.
pub const DEFAULT_CHUNK: usize = 64;

/// A double-ended queue with O(1) indexing, stored in `CHUNK`-element blocks.
///
/// `T` needs no `Default` or `Clone` bound for the core operations: slots are
/// raw storage and values are moved in and out explicitly.
pub struct Deque<T, const CHUNK: usize = DEFAULT_CHUNK> {
    table: ChunkTable<T, CHUNK>,
    begin: Cursor<CHUNK>,
    end: Cursor<CHUNK>,
    len: usize,
}

// SAFETY: the deque owns its elements exactly like `Vec<T>` does.
unsafe impl<T: Send, const CHUNK: usize> Send for Deque<T, CHUNK> {}
// SAFETY: shared access only hands out `&T`.
unsafe impl<T: Sync, const CHUNK: usize> Sync for Deque<T, CHUNK> {}

impl<T, const CHUNK: usize> Deque<T, CHUNK> {
    const CHUNK_IS_NONZERO: () = assert!(CHUNK != 0, "Deque CHUNK must be > 0");

    /// Creates an empty deque with storage for one chunk.
    pub fn new() -> Self {
        let mut deque = Self::unallocated();
        deque.grow_or_raise(CHUNK);
        deque
    }

    /// Creates an empty deque able to take `capacity` `push_back` calls without
    /// growing.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut deque = Self::new();
        deque.reserve(capacity);
        deque
    }

    /// A deque with an empty chunk table. Only valid as a transient state:
    /// every public constructor allocates at least one chunk.
    pub(crate) const fn unallocated() -> Self {
        let () = Self::CHUNK_IS_NONZERO;
        Self {
            table: ChunkTable::new(),
            begin: Cursor::ZERO,
            end: Cursor::ZERO,
            len: 0,
        }
    }

    /// A deque over `chunks` empty chunks whose window starts, empty, at `start`.
    pub(crate) fn with_window(chunks: usize, start: Cursor<CHUNK>) -> Self {
        let mut deque = Self::unallocated();
        deque.table = match ChunkTable::with_chunks(chunks) {
            Ok(table) => table,
            Err(failure) => failure.raise(),
        };
        deque.begin = start;
        deque.end = start;
        deque
    }

    /// Returns the chunk size parameter as a runtime value.
    #[inline]
    pub const fn chunk_size() -> usize {
        CHUNK
    }

    /// Number of live elements.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the deque holds no elements.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Total slots across all allocated chunks. Never shrinks.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Number of chunks in the table.
    #[inline]
    pub fn chunk_count(&self) -> usize {
        self.table.chunk_count()
    }

    /// Cursor of the first element (equal to [`end`](Self::end) when empty).
    #[inline]
    pub const fn begin(&self) -> Cursor<CHUNK> {
        self.begin
    }

    /// Cursor one past the last element.
    #[inline]
    pub const fn end(&self) -> Cursor<CHUNK> {
        self.end
    }

    /// Logical index of the element `cursor` points at, or `None` if the cursor
    /// lies outside the live window.
    ///
    /// Cursors go stale when the table grows; a stale cursor is either rejected
    /// here or maps to some other live element, never to an empty slot.
    #[inline]
    pub fn index_of(&self, cursor: Cursor<CHUNK>) -> Option<usize> {
        if self.begin <= cursor && cursor < self.end {
            Some(cursor.position() - self.begin.position())
        } else {
            None
        }
    }

    /// The single translation from logical index to cursor.
    #[inline]
    fn cursor_of(&self, index: usize) -> Cursor<CHUNK> {
        Cursor::from_position(self.begin.position() + index)
    }

    #[inline]
    fn slot_of(&self, index: usize) -> Option<*mut T> {
        if index >= self.len {
            return None;
        }
        // SAFETY: `index < len`, so the cursor lies in `[begin, end)` inside the table.
        Some(unsafe { self.table.slot(self.cursor_of(index)) })
    }

    /// Returns a reference to element `index`, or `None` if out of bounds.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        // SAFETY: the slot is live and shared access follows `&self`.
        self.slot_of(index).map(|slot| unsafe { &*slot })
    }

    /// Returns a mutable reference to element `index`, or `None` if out of bounds.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        // SAFETY: the slot is live and exclusive access follows `&mut self`.
        self.slot_of(index).map(|slot| unsafe { &mut *slot })
    }

    /// Checked access.
    ///
    /// # Errors
    /// Returns [`DequeError::OutOfRange`] if `index >= self.len()`.
    #[inline]
    pub fn at(&self, index: usize) -> Result<&T, DequeError> {
        let len = self.len;
        self.get(index).ok_or(DequeError::OutOfRange { index, len })
    }

    /// Checked mutable access.
    ///
    /// # Errors
    /// Returns [`DequeError::OutOfRange`] if `index >= self.len()`.
    #[inline]
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, DequeError> {
        let len = self.len;
        self.get_mut(index).ok_or(DequeError::OutOfRange { index, len })
    }

    /// Returns the element at `cursor` if it lies in the live window.
    #[inline]
    pub fn get_at(&self, cursor: Cursor<CHUNK>) -> Option<&T> {
        self.index_of(cursor)?;
        // SAFETY: `index_of` confirmed the cursor addresses a live slot.
        Some(unsafe { &*self.table.slot(cursor) })
    }

    /// Returns a reference to element `index` without bounds checks.
    ///
    /// # Safety
    /// Caller must ensure `index < self.len()`.
    #[inline]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(index < self.len);
        &*self.table.slot(self.cursor_of(index))
    }

    /// Returns a mutable reference to element `index` without bounds checks.
    ///
    /// # Safety
    /// Caller must ensure `index < self.len()`.
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.len);
        &mut *self.table.slot(self.cursor_of(index))
    }

    /// First element, if any.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.get(0)
    }

    /// Last element, if any.
    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.len.checked_sub(1).and_then(|i| self.get(i))
    }

    /// Mutable first element, if any.
    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.get_mut(0)
    }

    /// Mutable last element, if any.
    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        match self.len.checked_sub(1) {
            Some(i) => self.get_mut(i),
            None => None,
        }
    }

    /// Appends an element to the back.
    ///
    /// Grows the table to three times its capacity first if `end` has run off
    /// the last chunk.
    ///
    /// # Panics
    /// Panics on capacity overflow; aborts through
    /// [`handle_alloc_error`](std::alloc::handle_alloc_error) if the allocator fails.
    pub fn push_back(&mut self, value: T) {
        if self.end.chunk() == self.table.chunk_count() {
            self.grow_or_raise(growth::growth_target(self.capacity(), CHUNK));
        }
        // SAFETY: `end` is inside the table and outside the live window.
        unsafe { self.table.write(self.end, value) };
        self.end.step_forward();
        self.len += 1;
    }

    /// Prepends an element to the front.
    ///
    /// Grows the table first if `begin` sits on the very first slot. The new
    /// `begin` is committed only after the value is in place.
    ///
    /// # Panics
    /// Same conditions as [`push_back`](Self::push_back).
    pub fn push_front(&mut self, value: T) {
        if self.begin == Cursor::ZERO {
            self.grow_or_raise(growth::growth_target(self.capacity(), CHUNK));
        }
        let mut begin = self.begin;
        begin.step_back();
        // SAFETY: `begin` is now the empty slot just before the live window.
        unsafe { self.table.write(begin, value) };
        self.begin = begin;
        self.len += 1;
    }

    /// Removes and returns the last element, or `None` if empty.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        self.end.step_back();
        self.len -= 1;
        // SAFETY: `end` now addresses the last live slot, which leaves the window.
        Some(unsafe { self.table.read(self.end) })
    }

    /// Removes and returns the first element, or `None` if empty.
    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let slot = self.begin;
        self.begin.step_forward();
        self.len -= 1;
        // SAFETY: `slot` was the first live slot and has just left the window.
        Some(unsafe { self.table.read(slot) })
    }

    /// Drops every element. Capacity is kept.
    pub fn clear(&mut self) {
        while self.pop_back().is_some() {}
    }

    /// Inserts `value` so that it ends up at `index`, shifting the elements at
    /// and after `index` one slot toward the back.
    ///
    /// Inserting at `0` or `len` is a plain `push_front` / `push_back`.
    /// Otherwise the value is appended (growing if needed) and walked down to
    /// `index` one swap at a time through the chunks. Moves cannot fail, so the
    /// shift never stops half way.
    ///
    /// # Panics
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, value: T) {
        assert!(
            index <= self.len,
            "insertion index (is {index}) should be <= len (is {})",
            self.len
        );
        if index == self.len {
            return self.push_back(value);
        }
        if index == 0 {
            return self.push_front(value);
        }
        self.push_back(value);

        let target = self.cursor_of(index);
        let mut hole = self.end;
        hole.step_back();
        while hole > target {
            let mut prev = hole;
            prev.step_back();
            // SAFETY: both cursors address distinct live slots.
            unsafe { ptr::swap(self.table.slot(prev), self.table.slot(hole)) };
            hole = prev;
        }
    }

    /// Removes and returns element `index`, shifting later elements one slot
    /// toward the front. Returns `None` if `index` is out of bounds.
    ///
    /// Removing the first element is a plain `pop_front`. Otherwise the element
    /// is walked to the back one swap at a time and taken with `pop_back`.
    #[doc(alias = "erase")]
    pub fn remove(&mut self, index: usize) -> Option<T> {
        if index >= self.len {
            return None;
        }
        if index == 0 {
            return self.pop_front();
        }

        let mut hole = self.cursor_of(index);
        let mut last = self.end;
        last.step_back();
        while hole < last {
            let mut next = hole;
            next.step_forward();
            // SAFETY: both cursors address distinct live slots.
            unsafe { ptr::swap(self.table.slot(hole), self.table.slot(next)) };
            hole = next;
        }
        self.pop_back()
    }

    /// Ensures `capacity() >= min_capacity`. Never shrinks.
    ///
    /// Growth re-centres the chunk handles; on an empty deque the window is then
    /// moved to position zero so the whole reservation serves `push_back`.
    ///
    /// # Panics
    /// Panics on capacity overflow; aborts if the allocator fails.
    pub fn reserve(&mut self, min_capacity: usize) {
        if let Err(failure) = self.reserve_inner(min_capacity) {
            failure.raise();
        }
    }

    /// Fallible [`reserve`](Self::reserve).
    ///
    /// # Errors
    /// Returns [`DequeError::CapacityOverflow`] or [`DequeError::AllocFailed`];
    /// the deque is unchanged in either case.
    pub fn try_reserve(&mut self, min_capacity: usize) -> Result<(), DequeError> {
        self.reserve_inner(min_capacity)
            .map_err(|failure| failure.into_error(min_capacity.div_ceil(CHUNK)))
    }

    fn reserve_inner(&mut self, min_capacity: usize) -> Result<(), GrowFailure> {
        let grew = self.try_grow(min_capacity)?;
        if grew && self.is_empty() {
            self.begin = Cursor::ZERO;
            self.end = Cursor::ZERO;
        }
        Ok(())
    }

    fn grow_or_raise(&mut self, requested: usize) {
        if let Err(failure) = self.try_grow(requested) {
            failure.raise();
        }
    }

    /// Applies the growth policy for `requested` slots. Returns whether the
    /// table actually grew.
    fn try_grow(&mut self, requested: usize) -> Result<bool, GrowFailure> {
        let old_chunks = self.table.chunk_count();
        let Some(plan) = growth::plan(old_chunks, self.capacity(), requested, CHUNK) else {
            return Ok(false);
        };
        if plan.chunk_count.checked_mul(CHUNK).is_none() {
            return Err(GrowFailure::CapacityOverflow);
        }
        if let Err(failure) = self.table.regrow(plan) {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                old_chunks,
                new_chunks = plan.chunk_count,
                ?failure,
                "deque chunk table growth failed"
            );
            return Err(failure);
        }
        self.begin = self.begin.shifted_chunks(plan.shift);
        self.end = self.end.shifted_chunks(plan.shift);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            old_chunks,
            new_chunks = plan.chunk_count,
            shift = plan.shift,
            capacity = self.capacity(),
            len = self.len,
            "deque chunk table grown"
        );
        Ok(true)
    }

    /// Returns a read-only random-access iterator over the elements.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T, CHUNK> {
        Iter::new(&self.table, self.begin, self.end)
    }

    /// Returns a mutable iterator over the elements.
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T, CHUNK> {
        IterMut::new(&mut self.table, self.begin, self.end)
    }

    /// A mutable random-access cursor at the first element.
    #[inline]
    pub fn cursor_front_mut(&mut self) -> CursorMut<'_, T, CHUNK> {
        CursorMut::new(self, 0)
    }

    /// A mutable random-access cursor one past the last element.
    #[inline]
    pub fn cursor_end_mut(&mut self) -> CursorMut<'_, T, CHUNK> {
        let len = self.len;
        CursorMut::new(self, len)
    }

    /// A mutable random-access cursor at element `index`.
    ///
    /// # Panics
    /// Panics if `index > len`.
    #[inline]
    pub fn cursor_at_mut(&mut self, index: usize) -> CursorMut<'_, T, CHUNK> {
        assert!(
            index <= self.len,
            "cursor index (is {index}) should be <= len (is {})",
            self.len
        );
        CursorMut::new(self, index)
    }

    /// Appends a value into the slot at `end`, which the caller has made sure
    /// exists. Used where the table layout is fixed in advance.
    ///
    /// # Safety
    /// `self.end.chunk() < self.chunk_count()`.
    #[inline]
    pub(crate) unsafe fn push_back_within(&mut self, value: T) {
        self.table.write(self.end, value);
        self.end.step_forward();
        self.len += 1;
    }

    /// Prepends into the slot before `begin`, which the caller has made sure
    /// exists.
    ///
    /// # Safety
    /// `self.begin != Cursor::ZERO`.
    #[inline]
    pub(crate) unsafe fn push_front_within(&mut self, value: T) {
        let mut begin = self.begin;
        begin.step_back();
        self.table.write(begin, value);
        self.begin = begin;
        self.len += 1;
    }
}

impl<T, const CHUNK: usize> Drop for Deque<T, CHUNK> {
    fn drop(&mut self) {
        // Drop only the live window; the chunks release their storage afterwards.
        while self.begin < self.end {
            let slot = self.begin;
            self.begin.step_forward();
            self.len -= 1;
            // SAFETY: `slot` was live and has left the window before being dropped.
            unsafe { self.table.drop_in_place(slot) };
        }
    }
}

impl<T, const CHUNK: usize> Default for Deque<T, CHUNK> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug, const CHUNK: usize> fmt::Debug for Deque<T, CHUNK> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
