use core::alloc::Layout;
use core::marker::PhantomData;
use core::ptr::NonNull;
use std::alloc::{alloc, dealloc};

/// A fixed block of `CHUNK` uninitialised slots for `T`.
///
/// A chunk owns its storage but never the values in it: slots are written and
/// destroyed explicitly by the container, and dropping a chunk only releases the
/// memory.
pub(crate) struct Chunk<T, const CHUNK: usize> {
    ptr: NonNull<T>,
    _marker: PhantomData<T>,
}

impl<T, const CHUNK: usize> Chunk<T, CHUNK> {
    /// Layout of one chunk's storage, or `None` if it overflows `isize`.
    #[inline]
    pub(crate) fn layout() -> Option<Layout> {
        Layout::array::<T>(CHUNK).ok()
    }

    /// Allocates a chunk, returning the layout that could not be served on failure.
    ///
    /// Zero-sized storage (zero-sized `T`) is never allocated; the slot pointer
    /// is dangling but well aligned, which is all a ZST access needs.
    pub(crate) fn try_new(layout: Layout) -> Result<Self, Layout> {
        if layout.size() == 0 {
            return Ok(Self {
                ptr: NonNull::dangling(),
                _marker: PhantomData,
            });
        }
        // SAFETY: `layout` has a non-zero size.
        let raw = unsafe { alloc(layout) };
        match NonNull::new(raw.cast::<T>()) {
            Some(ptr) => Ok(Self {
                ptr,
                _marker: PhantomData,
            }),
            None => Err(layout),
        }
    }

    /// Pointer to slot `offset`.
    ///
    /// # Safety
    /// `offset < CHUNK`.
    #[inline]
    pub(crate) unsafe fn slot_ptr(&self, offset: usize) -> *mut T {
        debug_assert!(offset < CHUNK);
        self.ptr.as_ptr().add(offset)
    }

    /// Moves `value` into slot `offset`.
    ///
    /// # Safety
    /// `offset < CHUNK` and the slot is empty; a live value there would leak.
    #[inline]
    pub(crate) unsafe fn write(&self, offset: usize, value: T) {
        self.slot_ptr(offset).write(value);
    }

    /// Moves the value out of slot `offset`, leaving the slot empty.
    ///
    /// # Safety
    /// `offset < CHUNK` and the slot is live.
    #[inline]
    pub(crate) unsafe fn read(&self, offset: usize) -> T {
        self.slot_ptr(offset).read()
    }

    /// Destroys the value in slot `offset` in place.
    ///
    /// # Safety
    /// `offset < CHUNK` and the slot is live.
    #[inline]
    pub(crate) unsafe fn drop_in_place(&self, offset: usize) {
        core::ptr::drop_in_place(self.slot_ptr(offset));
    }
}

impl<T, const CHUNK: usize> Drop for Chunk<T, CHUNK> {
    fn drop(&mut self) {
        if let Some(layout) = Self::layout() {
            if layout.size() != 0 {
                // SAFETY: the storage was allocated in `try_new` with this layout.
                unsafe { dealloc(self.ptr.as_ptr().cast::<u8>(), layout) };
            }
        }
    }
}
