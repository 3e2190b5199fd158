//! Random-access iterators over a [`Deque`](crate::Deque).
//!
//! Both iterator forms wrap the same [`RawIter`]: a pointer to the chunk-handle
//! array and three cursors. `start` is the deque's `begin` and bounds how far
//! back random access may reach; `front..back` is what the iterator has not yet
//! yielded. Every step, jump and distance is cursor arithmetic, so each is O(1)
//! no matter how many chunks it crosses.
//!
//! - [`Iter`] hands out `&T`. Besides `Iterator` and `DoubleEndedIterator` it
//!   supports `+=`, `-=`, `+`, `-` by `isize`, signed distance (`&a - &b`) and
//!   ordering by position.
//! - [`IterMut`] hands out `&mut T` and is a plain double-ended iterator:
//!   jumping back to an element already yielded would alias a live `&mut T`.
//!   It converts one way into an [`Iter`] over what it has not yet yielded.
//!
//! The iterators borrow the deque, so nothing can grow the chunk table while
//! one is alive.
//!
//! ```rust
//! use chunk_deque::Deque;
//!
//! let d: Deque<u32, 4> = (0..10).collect();
//! let begin = d.iter();
//! let mut it = begin.clone() + 7;
//! assert_eq!(it.get(), Some(&7));
//! it -= 5;
//! assert_eq!(it.get(), Some(&2));
//! assert_eq!(&it - &begin, 2);
//! assert!(begin < it);
//! let reversed: Vec<u32> = d.iter().rev().copied().collect();
//! assert_eq!(reversed, (0..10).rev().collect::<Vec<_>>());
//! ```

use core::cmp::Ordering;
use core::fmt;
use core::iter::FusedIterator;
use core::marker::PhantomData;
use core::ops::{Add, AddAssign, Sub, SubAssign};

use crate::alloc::{Chunk, ChunkTable};
use crate::cursor::Cursor;

/// Cursor arithmetic shared by [`Iter`] and [`IterMut`].
///
/// Invariant: `start <= front <= back`, and every slot in `[start, back)` is
/// live for as long as the borrow the owning iterator carries.
pub(crate) struct RawIter<T, const CHUNK: usize> {
    chunks: *const Chunk<T, CHUNK>,
    start: Cursor<CHUNK>,
    front: Cursor<CHUNK>,
    back: Cursor<CHUNK>,
}

impl<T, const CHUNK: usize> Clone for RawIter<T, CHUNK> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, const CHUNK: usize> Copy for RawIter<T, CHUNK> {}

impl<T, const CHUNK: usize> RawIter<T, CHUNK> {
    #[inline]
    pub(crate) fn new(
        table: &ChunkTable<T, CHUNK>,
        begin: Cursor<CHUNK>,
        end: Cursor<CHUNK>,
    ) -> Self {
        Self {
            chunks: table.as_ptr(),
            start: begin,
            front: begin,
            back: end,
        }
    }

    #[inline]
    fn len(&self) -> usize {
        self.back.position() - self.front.position()
    }

    /// # Safety
    /// `cursor` must lie in `[start, back)`.
    #[inline]
    unsafe fn slot(&self, cursor: Cursor<CHUNK>) -> *mut T {
        debug_assert!(self.start <= cursor && cursor < self.back);
        (*self.chunks.add(cursor.chunk())).slot_ptr(cursor.offset())
    }

    #[inline]
    fn next(&mut self) -> Option<*mut T> {
        if self.front == self.back {
            return None;
        }
        // SAFETY: `front < back`.
        let slot = unsafe { self.slot(self.front) };
        self.front.step_forward();
        Some(slot)
    }

    #[inline]
    fn next_back(&mut self) -> Option<*mut T> {
        if self.front == self.back {
            return None;
        }
        let mut last = self.back;
        last.step_back();
        // SAFETY: `back` was strictly past `front`, so `last` addresses a live slot.
        let slot = unsafe { self.slot(last) };
        self.back = last;
        Some(slot)
    }

    /// Skips `n` elements from the front, stopping at `back`.
    #[inline]
    fn skip_front(&mut self, n: usize) {
        let n = n.min(self.len());
        self.front = Cursor::from_position(self.front.position() + n);
    }

    /// Skips `n` elements from the back, stopping at `front`.
    #[inline]
    fn skip_back(&mut self, n: usize) {
        let n = n.min(self.len());
        self.back = Cursor::from_position(self.back.position() - n);
    }

    /// The live slot `delta` elements from `front`, if it lies in `[start, back)`.
    #[inline]
    fn slot_at(&self, delta: isize) -> Option<*mut T> {
        let cursor = self.front.checked_offset(delta)?;
        if self.start <= cursor && cursor < self.back {
            // SAFETY: bounds checked just above.
            Some(unsafe { self.slot(cursor) })
        } else {
            None
        }
    }

    /// Moves `front` by `delta`.
    ///
    /// # Panics
    /// Panics if the new position falls outside `[start, back]`.
    #[inline]
    fn seek(&mut self, delta: isize) {
        match self.front.checked_offset(delta) {
            Some(cursor) if self.start <= cursor && cursor <= self.back => self.front = cursor,
            _ => seek_out_of_bounds(delta),
        }
    }
}

#[cold]
#[inline(never)]
fn seek_out_of_bounds(delta: isize) -> ! {
    panic!("iterator moved by {delta} past the bounds of the deque")
}

/// Read-only random-access iterator over a deque.
pub struct Iter<'a, T, const CHUNK: usize> {
    raw: RawIter<T, CHUNK>,
    _marker: PhantomData<&'a T>,
}

// SAFETY: `Iter` behaves like `&'a [T]`.
unsafe impl<T: Sync, const CHUNK: usize> Send for Iter<'_, T, CHUNK> {}
// SAFETY: as above.
unsafe impl<T: Sync, const CHUNK: usize> Sync for Iter<'_, T, CHUNK> {}

impl<'a, T, const CHUNK: usize> Iter<'a, T, CHUNK> {
    #[inline]
    pub(crate) fn new(
        table: &'a ChunkTable<T, CHUNK>,
        begin: Cursor<CHUNK>,
        end: Cursor<CHUNK>,
    ) -> Self {
        Self {
            raw: RawIter::new(table, begin, end),
            _marker: PhantomData,
        }
    }

    /// The element at the current position, without advancing.
    #[inline]
    pub fn get(&self) -> Option<&'a T> {
        self.peek_at(0)
    }

    /// The element `delta` positions from the current one, if it is inside the
    /// deque and not already consumed from the back.
    #[inline]
    pub fn peek_at(&self, delta: isize) -> Option<&'a T> {
        // SAFETY: `slot_at` only returns live slots, shared for `'a`.
        self.raw.slot_at(delta).map(|slot| unsafe { &*slot })
    }

    /// Logical index of the current position in the deque.
    #[inline]
    pub fn index(&self) -> usize {
        self.raw.front.position() - self.raw.start.position()
    }

    /// The current position as a detached cursor.
    #[inline]
    pub fn cursor(&self) -> Cursor<CHUNK> {
        self.raw.front
    }

    /// Starts the iterator `n` elements in, keeping the whole deque reachable
    /// by stepping back.
    #[inline]
    pub(crate) fn advanced(mut self, n: usize) -> Self {
        self.raw.skip_front(n);
        self
    }

    /// Moves one position forward (pre-increment).
    ///
    /// # Panics
    /// Panics if already at the end.
    #[inline]
    pub fn step_forward(&mut self) {
        self.raw.seek(1);
    }

    /// Moves one position back (pre-decrement).
    ///
    /// # Panics
    /// Panics if already at the first element.
    #[inline]
    pub fn step_back(&mut self) {
        self.raw.seek(-1);
    }
}

impl<T, const CHUNK: usize> Clone for Iter<'_, T, CHUNK> {
    fn clone(&self) -> Self {
        Self {
            raw: self.raw,
            _marker: PhantomData,
        }
    }
}

impl<T, const CHUNK: usize> fmt::Debug for Iter<'_, T, CHUNK> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("front", &self.raw.front)
            .field("back", &self.raw.back)
            .finish_non_exhaustive()
    }
}

impl<'a, T, const CHUNK: usize> Iterator for Iter<'a, T, CHUNK> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        // SAFETY: live slot, shared for `'a`.
        self.raw.next().map(|slot| unsafe { &*slot })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.raw.len();
        (len, Some(len))
    }

    #[inline]
    fn nth(&mut self, n: usize) -> Option<&'a T> {
        self.raw.skip_front(n);
        self.next()
    }

    #[inline]
    fn count(self) -> usize {
        self.raw.len()
    }

    #[inline]
    fn last(mut self) -> Option<&'a T> {
        self.next_back()
    }
}

impl<'a, T, const CHUNK: usize> DoubleEndedIterator for Iter<'a, T, CHUNK> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a T> {
        // SAFETY: live slot, shared for `'a`.
        self.raw.next_back().map(|slot| unsafe { &*slot })
    }

    #[inline]
    fn nth_back(&mut self, n: usize) -> Option<&'a T> {
        self.raw.skip_back(n);
        self.next_back()
    }
}

impl<T, const CHUNK: usize> ExactSizeIterator for Iter<'_, T, CHUNK> {}
impl<T, const CHUNK: usize> FusedIterator for Iter<'_, T, CHUNK> {}

impl<T, const CHUNK: usize> AddAssign<isize> for Iter<'_, T, CHUNK> {
    /// # Panics
    /// Panics if the new position falls outside the deque.
    #[inline]
    fn add_assign(&mut self, delta: isize) {
        self.raw.seek(delta);
    }
}

impl<T, const CHUNK: usize> SubAssign<isize> for Iter<'_, T, CHUNK> {
    /// # Panics
    /// Panics if the new position falls outside the deque.
    #[inline]
    fn sub_assign(&mut self, delta: isize) {
        match delta.checked_neg() {
            Some(delta) => self.raw.seek(delta),
            None => seek_out_of_bounds(delta),
        }
    }
}

impl<T, const CHUNK: usize> Add<isize> for Iter<'_, T, CHUNK> {
    type Output = Self;

    #[inline]
    fn add(mut self, delta: isize) -> Self {
        self += delta;
        self
    }
}

impl<T, const CHUNK: usize> Sub<isize> for Iter<'_, T, CHUNK> {
    type Output = Self;

    #[inline]
    fn sub(mut self, delta: isize) -> Self {
        self -= delta;
        self
    }
}

/// Signed distance in elements between two iterators over the same deque.
impl<T, const CHUNK: usize> Sub for &Iter<'_, T, CHUNK> {
    type Output = isize;

    #[inline]
    fn sub(self, origin: Self) -> isize {
        self.raw.front - origin.raw.front
    }
}

/// Iterators compare by position only. Comparing iterators over different
/// deques is meaningless but safe.
impl<T, const CHUNK: usize> PartialEq for Iter<'_, T, CHUNK> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.raw.front == other.raw.front
    }
}

impl<T, const CHUNK: usize> Eq for Iter<'_, T, CHUNK> {}

impl<T, const CHUNK: usize> PartialOrd for Iter<'_, T, CHUNK> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.raw.front.cmp(&other.raw.front))
    }
}

/// Mutable iterator over a deque.
pub struct IterMut<'a, T, const CHUNK: usize> {
    raw: RawIter<T, CHUNK>,
    _marker: PhantomData<&'a mut T>,
}

// SAFETY: `IterMut` behaves like `&'a mut [T]`.
unsafe impl<T: Send, const CHUNK: usize> Send for IterMut<'_, T, CHUNK> {}
// SAFETY: as above.
unsafe impl<T: Sync, const CHUNK: usize> Sync for IterMut<'_, T, CHUNK> {}

impl<'a, T, const CHUNK: usize> IterMut<'a, T, CHUNK> {
    #[inline]
    pub(crate) fn new(
        table: &'a mut ChunkTable<T, CHUNK>,
        begin: Cursor<CHUNK>,
        end: Cursor<CHUNK>,
    ) -> Self {
        Self {
            raw: RawIter::new(table, begin, end),
            _marker: PhantomData,
        }
    }

    /// Logical index of the next element `next` would yield.
    #[inline]
    pub fn index(&self) -> usize {
        self.raw.front.position() - self.raw.start.position()
    }

    /// The current position as a detached cursor.
    #[inline]
    pub fn cursor(&self) -> Cursor<CHUNK> {
        self.raw.front
    }

    /// Read-only view of the elements not yet yielded.
    #[inline]
    pub fn as_iter(&self) -> Iter<'_, T, CHUNK> {
        let mut raw = self.raw;
        raw.start = raw.front;
        Iter {
            raw,
            _marker: PhantomData,
        }
    }
}

/// One-way conversion to the read-only form. The result cannot reach back
/// over elements this iterator already handed out.
impl<'a, T, const CHUNK: usize> From<IterMut<'a, T, CHUNK>> for Iter<'a, T, CHUNK> {
    #[inline]
    fn from(iter: IterMut<'a, T, CHUNK>) -> Self {
        let mut raw = iter.raw;
        raw.start = raw.front;
        Iter {
            raw,
            _marker: PhantomData,
        }
    }
}

impl<T, const CHUNK: usize> fmt::Debug for IterMut<'_, T, CHUNK> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IterMut")
            .field("front", &self.raw.front)
            .field("back", &self.raw.back)
            .finish_non_exhaustive()
    }
}

impl<'a, T, const CHUNK: usize> Iterator for IterMut<'a, T, CHUNK> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<&'a mut T> {
        // SAFETY: each live slot is yielded at most once, exclusively for `'a`.
        self.raw.next().map(|slot| unsafe { &mut *slot })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.raw.len();
        (len, Some(len))
    }

    #[inline]
    fn nth(&mut self, n: usize) -> Option<&'a mut T> {
        self.raw.skip_front(n);
        self.next()
    }

    #[inline]
    fn count(self) -> usize {
        self.raw.len()
    }
}

impl<'a, T, const CHUNK: usize> DoubleEndedIterator for IterMut<'a, T, CHUNK> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a mut T> {
        // SAFETY: each live slot is yielded at most once, exclusively for `'a`.
        self.raw.next_back().map(|slot| unsafe { &mut *slot })
    }
}

impl<T, const CHUNK: usize> ExactSizeIterator for IterMut<'_, T, CHUNK> {}
impl<T, const CHUNK: usize> FusedIterator for IterMut<'_, T, CHUNK> {}

#[cfg(test)]
mod tests {
    use crate::Deque;

    fn sample() -> Deque<i32, 3> {
        let mut d = Deque::new();
        for i in 0..6 {
            d.push_back(i);
        }
        for i in 1..=4 {
            d.push_front(-i);
        }
        d
    }

    #[test]
    fn forward_and_reverse_agree() {
        let d = sample();
        let forward: Vec<_> = d.iter().copied().collect();
        let mut reverse: Vec<_> = d.iter().rev().copied().collect();
        reverse.reverse();
        assert_eq!(forward, reverse);
        assert_eq!(forward, vec![-4, -3, -2, -1, 0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn next_back_walks_every_chunk_down_to_front() {
        let d: Deque<usize, 4> = (0..10).collect();
        let mut it = d.iter();
        assert_eq!(it.next_back(), Some(&9));
        assert_eq!(it.last(), Some(&8));

        let mut it = d.iter();
        let mut seen = Vec::new();
        while let Some(&x) = it.next_back() {
            seen.push(x);
            assert_eq!(it.len(), x);
        }
        assert_eq!(seen, (0..10).rev().collect::<Vec<_>>());
        assert_eq!(it.next(), None);

        let mut d = d;
        let mut values = d.iter_mut();
        assert_eq!(values.nth_back(4), Some(&mut 5));
        assert_eq!(values.next_back(), Some(&mut 4));
        assert_eq!(values.len(), 4);
    }

    #[test]
    fn jumps_cross_several_chunks() {
        let d = sample();
        let begin = d.iter();
        let it = begin.clone() + 8;
        assert_eq!(it.get(), Some(&4));
        assert_eq!(it.index(), 8);
        let back = it.clone() - 7;
        assert_eq!(back.get(), Some(&-3));
        assert_eq!(&it - &back, 7);
        assert_eq!(&back - &it, -7);
        assert_eq!(it.peek_at(-8), Some(&-4));
        assert_eq!(it.peek_at(2), None);
        assert_eq!(it.peek_at(-9), None);
    }

    #[test]
    fn ordering_by_position() {
        let d = sample();
        let a = d.iter();
        let mut b = a.clone();
        assert!(a == b);
        b.step_forward();
        assert!(a < b && b > a && a <= b && b >= a && a != b);
        b.step_back();
        assert!(a == b);
    }

    #[test]
    fn end_iterator_can_step_back_to_last() {
        let d = sample();
        let mut end = d.iter() + 10;
        assert_eq!(end.get(), None);
        assert_eq!(end.len(), 0);
        end.step_back();
        assert_eq!(end.get(), Some(&5));
    }

    #[test]
    #[should_panic(expected = "past the bounds")]
    fn stepping_before_begin_panics() {
        let d = sample();
        let mut it = d.iter();
        it.step_back();
    }

    #[test]
    #[should_panic(expected = "past the bounds")]
    fn jumping_past_end_panics() {
        let d = sample();
        let _ = d.iter() + 11;
    }

    #[test]
    fn nth_skips_in_constant_steps() {
        let d = sample();
        let mut it = d.iter();
        assert_eq!(it.nth(4), Some(&0));
        assert_eq!(it.nth_back(1), Some(&4));
        assert_eq!(it.len(), 3);
        assert_eq!(it.nth(10), None);
        assert_eq!(it.next(), None);
    }

    #[test]
    fn iter_mut_writes_every_element() {
        let mut d = sample();
        for (x, value) in d.iter_mut().zip((0..).step_by(10)) {
            *x = value;
        }
        assert_eq!(
            d.iter().copied().collect::<Vec<_>>(),
            (0..10).map(|i| i * 10).collect::<Vec<_>>()
        );
        if let Some(last) = d.iter_mut().next_back() {
            *last = -1;
        }
        assert_eq!(d.back(), Some(&-1));
    }

    #[test]
    fn iter_mut_converts_to_read_only_view_of_the_rest() {
        let mut d = sample();
        let mut it = d.iter_mut();
        let first = it.next().unwrap();
        *first = 100;
        assert_eq!(it.index(), 1);
        assert_eq!(it.as_iter().get(), Some(&-3));
        let view: super::Iter<'_, i32, 3> = it.into();
        assert_eq!(view.index(), 0);
        assert_eq!(view.peek_at(-1), None);
        assert_eq!(view.len(), 9);
        assert_eq!(d[0], 100);
    }
}
