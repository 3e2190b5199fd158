//! `Cursor` - a `(chunk, offset)` address into a chunk table.
//!
//! A cursor is a plain value: it does not borrow the deque it was taken from and
//! it carries no element type. Its absolute position is
//! `chunk * CHUNK + offset`, and every arithmetic operation works on that
//! position in O(1) before splitting it back into `(chunk, offset)`, so a single
//! `+=` can carry across any number of chunks.
//!
//! ```rust
//! use chunk_deque::Cursor;
//!
//! let mut c = Cursor::<4>::new(0, 3);
//! c.step_forward();
//! assert_eq!((c.chunk(), c.offset()), (1, 0));
//!
//! let far = c + 9;
//! assert_eq!(far.position(), 13);
//! assert_eq!(far - c, 9);
//! ```

use core::cmp::Ordering;
use core::fmt;
use core::ops::{Add, AddAssign, Sub, SubAssign};

/// A logical position inside a table of `CHUNK`-slot chunks.
///
/// Ordering and equality follow the absolute position. The derived ordering on
/// `(chunk, offset)` is the same thing because `offset < CHUNK` always holds.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Cursor<const CHUNK: usize> {
    chunk: usize,
    offset: usize,
}

impl<const CHUNK: usize> Cursor<CHUNK> {
    /// The cursor at absolute position zero.
    pub const ZERO: Self = Self {
        chunk: 0,
        offset: 0,
    };

    /// Creates a cursor from its parts.
    ///
    /// # Panics
    /// Panics if `offset >= CHUNK`.
    #[inline]
    pub const fn new(chunk: usize, offset: usize) -> Self {
        assert!(
            offset < CHUNK,
            "cursor offset must be smaller than the chunk size"
        );
        Self { chunk, offset }
    }

    /// Splits an absolute position into `(chunk, offset)`.
    #[inline]
    pub const fn from_position(position: usize) -> Self {
        let (chunk, offset) = index_split::<CHUNK>(position);
        Self { chunk, offset }
    }

    /// Index of the chunk this cursor points into.
    #[inline]
    pub const fn chunk(self) -> usize {
        self.chunk
    }

    /// Slot offset inside the chunk, always `< CHUNK`.
    #[inline]
    pub const fn offset(self) -> usize {
        self.offset
    }

    /// Absolute position: `chunk * CHUNK + offset`.
    #[inline]
    pub const fn position(self) -> usize {
        self.chunk * CHUNK + self.offset
    }

    /// Moves one slot forward, wrapping into the next chunk at a boundary.
    #[inline]
    pub fn step_forward(&mut self) {
        self.offset += 1;
        if self.offset == CHUNK {
            self.offset = 0;
            self.chunk += 1;
        }
    }

    /// Moves one slot backward, wrapping into the previous chunk at a boundary.
    ///
    /// # Panics
    /// Panics if the cursor is at absolute position zero.
    #[inline]
    pub fn step_back(&mut self) {
        if self.offset == 0 {
            if self.chunk == 0 {
                moved_before_origin();
            }
            self.chunk -= 1;
            self.offset = CHUNK - 1;
        } else {
            self.offset -= 1;
        }
    }

    /// Returns the cursor `delta` slots away, or `None` if that would fall
    /// before position zero or overflow `usize`.
    #[inline]
    pub fn checked_offset(self, delta: isize) -> Option<Self> {
        let position = self.position();
        let moved = if delta >= 0 {
            position.checked_add(delta.unsigned_abs())?
        } else {
            position.checked_sub(delta.unsigned_abs())?
        };
        Some(Self::from_position(moved))
    }

    /// Signed distance in elements from `origin` to `self`.
    #[inline]
    pub fn offset_from(self, origin: Self) -> isize {
        match self.cmp(&origin) {
            Ordering::Less => -(distance(origin.position() - self.position())),
            _ => distance(self.position() - origin.position()),
        }
    }

    /// Same offset, `shift` chunks further into the table. Used when the chunk
    /// table re-centres its handles.
    #[inline]
    pub(crate) const fn shifted_chunks(self, shift: usize) -> Self {
        Self {
            chunk: self.chunk + shift,
            offset: self.offset,
        }
    }
}

impl<const CHUNK: usize> fmt::Debug for Cursor<CHUNK> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cursor({}:{})", self.chunk, self.offset)
    }
}

impl<const CHUNK: usize> AddAssign<isize> for Cursor<CHUNK> {
    #[inline]
    fn add_assign(&mut self, delta: isize) {
        *self = match self.checked_offset(delta) {
            Some(moved) => moved,
            None => moved_before_origin(),
        };
    }
}

impl<const CHUNK: usize> SubAssign<isize> for Cursor<CHUNK> {
    #[inline]
    fn sub_assign(&mut self, delta: isize) {
        *self = match delta.checked_neg().and_then(|back| self.checked_offset(back)) {
            Some(moved) => moved,
            None => moved_before_origin(),
        };
    }
}

impl<const CHUNK: usize> Add<isize> for Cursor<CHUNK> {
    type Output = Self;

    #[inline]
    fn add(mut self, delta: isize) -> Self {
        self += delta;
        self
    }
}

impl<const CHUNK: usize> Sub<isize> for Cursor<CHUNK> {
    type Output = Self;

    #[inline]
    fn sub(mut self, delta: isize) -> Self {
        self -= delta;
        self
    }
}

impl<const CHUNK: usize> Sub for Cursor<CHUNK> {
    type Output = isize;

    #[inline]
    fn sub(self, origin: Self) -> isize {
        self.offset_from(origin)
    }
}

#[cold]
#[inline(never)]
fn moved_before_origin() -> ! {
    panic!("cursor moved outside the addressable range of the chunk table")
}

#[inline]
fn distance(elements: usize) -> isize {
    isize::try_from(elements).unwrap_or_else(|_| moved_before_origin())
}

#[inline]
pub(crate) const fn index_split<const CHUNK: usize>(idx: usize) -> (usize, usize) {
    assert!(CHUNK != 0, "Deque CHUNK must be > 0");
    if CHUNK.is_power_of_two() {
        let shift = CHUNK.trailing_zeros();
        let mask = CHUNK - 1;
        (idx >> shift, idx & mask)
    } else {
        (idx / CHUNK, idx % CHUNK)
    }
}
