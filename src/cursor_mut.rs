//! Mutable random access with editing.
//!
//! [`CursorMut`] holds the deque's exclusive borrow and a logical index in
//! `[0, len]`. It can jump anywhere in O(1), write through the element it
//! points at, and insert or remove there. Since it holds `&mut Deque` rather
//! than raw cursors, growth caused by an insert cannot leave it dangling.
//!
//! ```rust
//! use chunk_deque::Deque;
//!
//! let mut d: Deque<char, 2> = "abcdef".chars().collect();
//! let mut cursor = d.cursor_at_mut(2);
//! cursor.seek(2);
//! if let Some(c) = cursor.current() {
//!     *c = 'E';
//! }
//! cursor.insert('x');
//! cursor.seek(-3);
//! assert_eq!(cursor.remove(), Some('b'));
//! assert_eq!(d.iter().collect::<String>(), "acdxEf");
//! ```

use core::fmt;

use crate::cursor::Cursor;
use crate::deque::Deque;
use crate::iter::Iter;

/// A mutable cursor over a deque, positioned at a logical index.
pub struct CursorMut<'a, T, const CHUNK: usize> {
    deque: &'a mut Deque<T, CHUNK>,
    index: usize,
}

impl<'a, T, const CHUNK: usize> CursorMut<'a, T, CHUNK> {
    #[inline]
    pub(crate) fn new(deque: &'a mut Deque<T, CHUNK>, index: usize) -> Self {
        debug_assert!(index <= deque.len());
        Self { deque, index }
    }

    /// Logical index of the current position; `len` means past the end.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// The current position as a detached cursor into the chunk table.
    #[inline]
    pub fn cursor(&self) -> Cursor<CHUNK> {
        Cursor::from_position(self.deque.begin().position() + self.index)
    }

    /// The element under the cursor, or `None` past the end.
    #[inline]
    pub fn get(&self) -> Option<&T> {
        self.deque.get(self.index)
    }

    /// Mutable access to the element under the cursor.
    #[inline]
    pub fn current(&mut self) -> Option<&mut T> {
        self.deque.get_mut(self.index)
    }

    /// The element `delta` positions away, if there is one.
    pub fn peek_at(&self, delta: isize) -> Option<&T> {
        let index = self.index.checked_add_signed(delta)?;
        self.deque.get(index)
    }

    /// Moves one position forward.
    ///
    /// # Panics
    /// Panics if already past the end.
    #[inline]
    pub fn step_forward(&mut self) {
        self.seek(1);
    }

    /// Moves one position back.
    ///
    /// # Panics
    /// Panics if already at the first element.
    #[inline]
    pub fn step_back(&mut self) {
        self.seek(-1);
    }

    /// Moves by `delta` positions in O(1).
    ///
    /// # Panics
    /// Panics if the result falls outside `0..=len`.
    pub fn seek(&mut self, delta: isize) {
        match self.index.checked_add_signed(delta) {
            Some(index) if index <= self.deque.len() => self.index = index,
            _ => panic!(
                "cursor at {} moved by {delta} outside a deque of length {}",
                self.index,
                self.deque.len()
            ),
        }
    }

    /// Inserts `value` at the current position. The cursor then points at the
    /// new element; everything from the old current element on moves back by
    /// one.
    pub fn insert(&mut self, value: T) {
        self.deque.insert(self.index, value);
    }

    /// Removes the element under the cursor, which then points at its
    /// successor. Returns `None` past the end.
    pub fn remove(&mut self) -> Option<T> {
        self.deque.remove(self.index)
    }

    /// A read-only random-access iterator starting at the current position.
    pub fn as_iter(&self) -> Iter<'_, T, CHUNK> {
        self.deque.iter().advanced(self.index)
    }

    /// Read-only access to the whole deque.
    #[inline]
    pub fn as_deque(&self) -> &Deque<T, CHUNK> {
        self.deque
    }
}

impl<'a, T, const CHUNK: usize> From<CursorMut<'a, T, CHUNK>> for Iter<'a, T, CHUNK> {
    fn from(cursor: CursorMut<'a, T, CHUNK>) -> Self {
        let deque: &'a Deque<T, CHUNK> = cursor.deque;
        deque.iter().advanced(cursor.index)
    }
}

impl<T: fmt::Debug, const CHUNK: usize> fmt::Debug for CursorMut<'_, T, CHUNK> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorMut")
            .field("index", &self.index)
            .field("current", &self.get())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use crate::Deque;

    #[test]
    fn insert_leaves_cursor_on_new_element() {
        let mut d: Deque<u8, 2> = (0..5).collect();
        let mut c = d.cursor_at_mut(3);
        c.insert(42);
        assert_eq!(c.get(), Some(&42));
        assert_eq!(c.peek_at(1), Some(&3));
        assert_eq!(c.peek_at(-1), Some(&2));
        assert_eq!(
            d.iter().copied().collect::<Vec<_>>(),
            vec![0, 1, 2, 42, 3, 4]
        );
    }

    #[test]
    fn insert_that_grows_keeps_the_cursor_valid() {
        let mut d: Deque<u32, 2> = Deque::new();
        d.push_back(1);
        d.push_back(3);
        let chunks = d.chunk_count();
        let mut c = d.cursor_at_mut(1);
        c.insert(2);
        c.step_forward();
        assert_eq!(c.get(), Some(&3));
        assert!(c.as_deque().chunk_count() > chunks);
    }

    #[test]
    fn remove_moves_to_successor() {
        let mut d: Deque<u8, 3> = (0..6).collect();
        let mut c = d.cursor_front_mut();
        c.seek(2);
        assert_eq!(c.remove(), Some(2));
        assert_eq!(c.get(), Some(&3));
        c.seek(3);
        assert_eq!(c.index(), 5);
        assert_eq!(c.remove(), None);
        assert_eq!(d.len(), 5);
    }

    #[test]
    fn end_cursor_appends() {
        let mut d: Deque<u8, 3> = (0..3).collect();
        let mut c = d.cursor_end_mut();
        assert!(c.current().is_none());
        c.insert(3);
        c.step_forward();
        c.insert(4);
        assert_eq!(d.iter().copied().collect::<Vec<_>>(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn converts_to_iterator_at_same_position() {
        let mut d: Deque<u8, 4> = (10..20).collect();
        let c = d.cursor_at_mut(6);
        assert_eq!(c.cursor(), c.as_deque().begin() + 6);
        assert_eq!(c.as_iter().get(), Some(&16));
        let mut it: crate::Iter<'_, u8, 4> = c.into();
        assert_eq!(it.index(), 6);
        it -= 6;
        assert_eq!(it.get(), Some(&10));
    }

    #[test]
    #[should_panic(expected = "outside a deque of length 3")]
    fn seek_past_end_panics() {
        let mut d: Deque<u8, 4> = (0..3).collect();
        let mut c = d.cursor_front_mut();
        c.seek(4);
    }
}
