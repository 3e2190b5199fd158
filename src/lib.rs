//! # `chunk-deque` - Chunked Double-Ended Queue
//!
//! A double-ended sequence with O(1) indexing, stored in fixed-size chunks of
//! uninitialised slots reached through a re-centring table of chunk handles.
//!
//! ## Guarantees
//!
//! ### Memory Safety
//! - **Live window only**: exactly the slots between the `begin` and `end`
//!   cursors hold values; every drop, clone and move touches only those.
//! - **Stable storage**: growth reallocates the handle table, never a chunk, so
//!   values are never moved by a push.
//! - **Borrow-checked invalidation**: iterators borrow the deque, so nothing can
//!   grow the table under them. Detached [`Cursor`]s are checked against the
//!   live window before use.
//!
//! ### Failure Atomicity
//! - **Growth**: every new chunk and the new handle table are allocated before
//!   any handle moves. A failed growth leaves the deque as it was.
//! - **Sizing constructors**: construction steps are undone in reverse order if
//!   an element fails to build, by `Err` or by panic.
//!
//! ## Key Features
//!
//! - **Both ends in O(1)**: `push_front` and `push_back` grow the table to three
//!   times its capacity and re-centre it, so both ends get room.
//! - **Random access**: [`Iter`] jumps, measures distances and compares
//!   positions in O(1); [`CursorMut`] adds writes, inserts and removals.
//! - **Const chunk size**: `CHUNK` is a const generic, so index splitting is a
//!   shift and mask for powers of two.
//!
//! ## Example
//!
//! ```rust
//! use chunk_deque::Deque;
//!
//! let mut d: Deque<u32> = Deque::new();
//! for i in 0..100 {
//!     d.push_back(i);
//!     d.push_front(i);
//! }
//! assert_eq!(d.len(), 200);
//! assert_eq!(d[0], 99);
//! assert_eq!(d[199], 99);
//!
//! let mut it = d.iter();
//! it += 100;
//! assert_eq!(it.get(), Some(&0));
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub(crate) mod alloc;
pub mod cursor;
pub mod cursor_mut;
pub mod deque;
pub mod error;
pub mod growth;
pub mod iter;
#[cfg(feature = "proptest")]
pub mod strategy;

pub use cursor::Cursor;
pub use cursor_mut::CursorMut;
pub use deque::{Deque, IntoIter, DEFAULT_CHUNK};
pub use error::DequeError;
pub use iter::{Iter, IterMut};

// Compile-time assertions for memory layout
const _: () = {
    use core::mem;

    // A cursor is two words; the deque header is a handle vector, two cursors
    // and the length.
    assert!(mem::size_of::<Cursor<64>>() == 2 * mem::size_of::<usize>());
    assert!(mem::size_of::<Deque<u8>>() == 8 * mem::size_of::<usize>());

    // Chunk handles are a single non-null pointer.
    assert!(mem::size_of::<alloc::Chunk<u64, 64>>() == mem::size_of::<usize>());
    assert!(
        mem::size_of::<Option<alloc::Chunk<u64, 64>>>() == mem::size_of::<usize>()
    );
};
