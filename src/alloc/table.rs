use core::alloc::Layout;
use std::alloc::handle_alloc_error;

use crate::alloc::chunk::Chunk;
use crate::cursor::Cursor;
use crate::error::DequeError;
use crate::growth::Growth;

/// Why a table could not be allocated or grown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum GrowFailure {
    /// The requested size does not fit in the address space.
    CapacityOverflow,
    /// The allocator refused a request of this layout.
    Alloc(Layout),
}

impl GrowFailure {
    /// Public form of the failure, tagged with the chunk count being built.
    pub(crate) fn into_error(self, chunks: usize) -> DequeError {
        match self {
            Self::CapacityOverflow => DequeError::CapacityOverflow,
            Self::Alloc(_) => DequeError::AllocFailed { chunks },
        }
    }

    /// Reports the failure the way infallible std collections do.
    #[cold]
    pub(crate) fn raise(self) -> ! {
        match self {
            Self::CapacityOverflow => panic!("capacity overflow"),
            Self::Alloc(layout) => handle_alloc_error(layout),
        }
    }
}

/// Ordered, exclusively owned handles to every chunk of a deque.
///
/// Growing the table moves handles, never elements: the storage blocks stay
/// where they are, so values already constructed in them are untouched.
pub(crate) struct ChunkTable<T, const CHUNK: usize> {
    chunks: Vec<Chunk<T, CHUNK>>,
}

impl<T, const CHUNK: usize> ChunkTable<T, CHUNK> {
    /// A table with no chunks. Nothing is allocated.
    pub(crate) const fn new() -> Self {
        Self { chunks: Vec::new() }
    }

    /// A table of `count` freshly allocated empty chunks.
    pub(crate) fn with_chunks(count: usize) -> Result<Self, GrowFailure> {
        Ok(Self {
            chunks: Self::allocate(count)?,
        })
    }

    #[inline]
    pub(crate) fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.chunks.len() * CHUNK
    }

    /// Grows to `growth.chunk_count` chunks with the existing handles moved to
    /// `[growth.shift, growth.shift + old_count)`.
    ///
    /// Every allocation happens before the first handle moves, so on failure the
    /// table is exactly as it was.
    pub(crate) fn regrow(&mut self, growth: Growth) -> Result<(), GrowFailure> {
        let old = self.chunks.len();
        debug_assert!(growth.chunk_count > old);
        debug_assert!(growth.shift + old <= growth.chunk_count);

        let mut back = Self::allocate(growth.chunk_count - old - growth.shift)?;
        let mut table = Self::allocate(growth.shift)?;
        table
            .try_reserve_exact(old + back.len())
            .map_err(|_| handle_array_failure::<T, CHUNK>(growth.chunk_count))?;

        table.append(&mut self.chunks);
        table.append(&mut back);
        self.chunks = table;
        Ok(())
    }

    /// Pointer to the slot addressed by `cursor`.
    ///
    /// # Safety
    /// `cursor.chunk() < self.chunk_count()`.
    #[inline]
    pub(crate) unsafe fn slot(&self, cursor: Cursor<CHUNK>) -> *mut T {
        debug_assert!(cursor.chunk() < self.chunks.len());
        self.chunks
            .get_unchecked(cursor.chunk())
            .slot_ptr(cursor.offset())
    }

    /// Moves `value` into the empty slot at `cursor`.
    ///
    /// # Safety
    /// `cursor.chunk() < self.chunk_count()` and the slot is empty.
    #[inline]
    pub(crate) unsafe fn write(&self, cursor: Cursor<CHUNK>, value: T) {
        debug_assert!(cursor.chunk() < self.chunks.len());
        self.chunks
            .get_unchecked(cursor.chunk())
            .write(cursor.offset(), value);
    }

    /// Moves the value out of the live slot at `cursor`.
    ///
    /// # Safety
    /// `cursor.chunk() < self.chunk_count()` and the slot is live.
    #[inline]
    pub(crate) unsafe fn read(&self, cursor: Cursor<CHUNK>) -> T {
        debug_assert!(cursor.chunk() < self.chunks.len());
        self.chunks
            .get_unchecked(cursor.chunk())
            .read(cursor.offset())
    }

    /// Drops the value in the live slot at `cursor`.
    ///
    /// # Safety
    /// `cursor.chunk() < self.chunk_count()` and the slot is live.
    #[inline]
    pub(crate) unsafe fn drop_in_place(&self, cursor: Cursor<CHUNK>) {
        debug_assert!(cursor.chunk() < self.chunks.len());
        self.chunks
            .get_unchecked(cursor.chunk())
            .drop_in_place(cursor.offset());
    }

    /// Base of the handle array, for iterators that outlive a single call.
    #[inline]
    pub(crate) fn as_ptr(&self) -> *const Chunk<T, CHUNK> {
        self.chunks.as_ptr()
    }

    fn allocate(count: usize) -> Result<Vec<Chunk<T, CHUNK>>, GrowFailure> {
        let layout = Chunk::<T, CHUNK>::layout().ok_or(GrowFailure::CapacityOverflow)?;
        let mut fresh = Vec::new();
        fresh
            .try_reserve_exact(count)
            .map_err(|_| handle_array_failure::<T, CHUNK>(count))?;
        for _ in 0..count {
            fresh.push(Chunk::try_new(layout).map_err(GrowFailure::Alloc)?);
        }
        Ok(fresh)
    }
}

fn handle_array_failure<T, const CHUNK: usize>(count: usize) -> GrowFailure {
    match Layout::array::<Chunk<T, CHUNK>>(count) {
        Ok(layout) => GrowFailure::Alloc(layout),
        Err(_) => GrowFailure::CapacityOverflow,
    }
}
