//! Sizing constructors with all-or-nothing construction.
//!
//! Elements are built in an alternating order: even steps append at the back,
//! odd steps prepend at the front, starting from the middle of a table sized
//! for exactly `len` elements. The window is centred at position `len / 2` so
//! neither end ever needs to grow during the fill.
//!
//! The number of completed steps is the undo log. If building an element
//! fails, by `Err` or by panic, the completed steps are undone in exact reverse
//! order (`pop_back` for even steps, `pop_front` for odd ones) and only then is
//! the storage released and the failure passed on.

use core::convert::Infallible;
use core::mem;

use super::Deque;
use crate::cursor::Cursor;

/// Owns a deque under construction and unwinds it on drop unless disarmed.
struct Rollback<T, const CHUNK: usize> {
    deque: Deque<T, CHUNK>,
    constructed: usize,
}

impl<T, const CHUNK: usize> Rollback<T, CHUNK> {
    fn finish(mut self) -> Deque<T, CHUNK> {
        self.constructed = 0;
        mem::replace(&mut self.deque, Deque::unallocated())
    }
}

impl<T, const CHUNK: usize> Drop for Rollback<T, CHUNK> {
    fn drop(&mut self) {
        #[cfg(feature = "tracing")]
        {
            if self.constructed > 0 {
                tracing::debug!(
                    constructed = self.constructed,
                    "rolling back partially constructed deque"
                );
            }
        }
        while self.constructed > 0 {
            self.constructed -= 1;
            let undone = if self.constructed.is_multiple_of(2) {
                self.deque.pop_back()
            } else {
                self.deque.pop_front()
            };
            drop(undone);
        }
    }
}

impl<T, const CHUNK: usize> Deque<T, CHUNK> {
    /// Creates a deque of `len` elements, asking `f` for the element at each
    /// logical index.
    ///
    /// `f` is called in construction order, not index order: indices
    /// `len / 2, len / 2 - 1, len / 2 + 1, len / 2 - 2, ...`. The resulting
    /// deque is nonetheless `[f(0), f(1), ..., f(len - 1)]`.
    ///
    /// # Errors
    /// The first `Err` from `f` is returned after every element built so far
    /// has been dropped, newest first.
    ///
    /// ```rust
    /// use chunk_deque::Deque;
    ///
    /// let d: Deque<usize, 4> = Deque::try_from_fn(6, |i| Ok::<_, ()>(i * i)).unwrap();
    /// assert_eq!(d.iter().copied().collect::<Vec<_>>(), [0, 1, 4, 9, 16, 25]);
    ///
    /// let failed: Result<Deque<usize, 4>, &str> =
    ///     Deque::try_from_fn(6, |i| if i == 0 { Err("no zero") } else { Ok(i) });
    /// assert_eq!(failed.unwrap_err(), "no zero");
    /// ```
    pub fn try_from_fn<E, F>(len: usize, mut f: F) -> Result<Self, E>
    where
        F: FnMut(usize) -> Result<T, E>,
    {
        let half = len / 2;
        let chunks = len.div_ceil(CHUNK).max(1);
        let mut guard = Rollback {
            deque: Self::with_window(chunks, Cursor::from_position(half)),
            constructed: 0,
        };

        for step in 0..len {
            let j = step / 2;
            if step.is_multiple_of(2) {
                let value = f(half + j)?;
                // SAFETY: at most `len - half` back steps, so `end <= len <= capacity`
                // before the last one; the slot at `end` exists.
                unsafe { guard.deque.push_back_within(value) };
            } else {
                let value = f(half - 1 - j)?;
                // SAFETY: `begin` starts at `half` and moves back at most `half` times.
                unsafe { guard.deque.push_front_within(value) };
            }
            guard.constructed += 1;
        }
        Ok(guard.finish())
    }

    /// Creates a deque of `len` default values.
    pub fn with_len(len: usize) -> Self
    where
        T: Default,
    {
        match Self::try_from_fn(len, |_| Ok::<T, Infallible>(T::default())) {
            Ok(deque) => deque,
            Err(never) => match never {},
        }
    }

    /// Creates a deque of `len` clones of `value`.
    ///
    /// If a clone panics, the clones made so far are dropped in reverse order of
    /// creation before the panic continues.
    pub fn from_elem(len: usize, value: &T) -> Self
    where
        T: Clone,
    {
        match Self::try_from_fn(len, |_| Ok::<T, Infallible>(value.clone())) {
            Ok(deque) => deque,
            Err(never) => match never {},
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn from_elem_fills_every_slot() {
        let d: Deque<char, 2> = Deque::from_elem(5, &'x');
        assert_eq!(d.len(), 5);
        assert!(d.iter().all(|&c| c == 'x'));
        assert_eq!(d.capacity(), 6);
    }

    #[test]
    fn with_len_uses_default() {
        let d: Deque<String, 4> = Deque::with_len(9);
        assert_eq!(d.len(), 9);
        assert!(d.iter().all(String::is_empty));
    }

    #[test]
    fn sized_fill_never_grows() {
        for len in 0..40 {
            let d: Deque<usize, 4> = Deque::try_from_fn(len, Ok::<_, ()>).unwrap();
            assert_eq!(d.chunk_count(), len.div_ceil(4).max(1));
            assert_eq!(
                d.iter().copied().collect::<Vec<_>>(),
                (0..len).collect::<Vec<_>>()
            );
        }
    }

    #[test]
    fn construction_order_alternates_from_the_middle() {
        let order = RefCell::new(Vec::new());
        let _: Deque<usize, 3> = Deque::try_from_fn(6, |i| {
            order.borrow_mut().push(i);
            Ok::<_, ()>(i)
        })
        .unwrap();
        assert_eq!(order.into_inner(), vec![3, 2, 4, 1, 5, 0]);
    }

    #[test]
    fn error_unwinds_in_reverse_construction_order() {
        struct Logged<'a>(usize, &'a RefCell<Vec<usize>>);
        impl Drop for Logged<'_> {
            fn drop(&mut self) {
                self.1.borrow_mut().push(self.0);
            }
        }

        let dropped = RefCell::new(Vec::new());
        let result: Result<Deque<Logged<'_>, 2>, usize> = Deque::try_from_fn(7, |i| {
            if i == 1 {
                Err(i)
            } else {
                Ok(Logged(i, &dropped))
            }
        });
        assert_eq!(result.err(), Some(1));
        // Built 3, 2, 4 before index 1 failed; undone newest first.
        assert_eq!(dropped.into_inner(), vec![4, 2, 3]);
    }
}
