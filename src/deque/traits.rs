use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;
use core::ops::{Index, IndexMut};

use super::Deque;
use crate::iter::{Iter, IterMut};

impl<T, const CHUNK: usize> Index<usize> for Deque<T, CHUNK> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Some(value) => value,
            None => index_out_of_bounds(index, self.len()),
        }
    }
}

impl<T, const CHUNK: usize> IndexMut<usize> for Deque<T, CHUNK> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        let len = self.len();
        match self.get_mut(index) {
            Some(value) => value,
            None => index_out_of_bounds(index, len),
        }
    }
}

#[cold]
#[inline(never)]
fn index_out_of_bounds(index: usize, len: usize) -> ! {
    panic!("index out of bounds: the len is {len} but the index is {index}")
}

/// Copying keeps the source's layout: an equal-sized chunk table and the same
/// cursors. Only the live window is cloned; empty slots stay empty.
impl<T: Clone, const CHUNK: usize> Clone for Deque<T, CHUNK> {
    fn clone(&self) -> Self {
        let mut copy = Self::with_window(self.chunk_count(), self.begin());
        for value in self {
            // SAFETY: same chunk count and start as `self`, so every slot of
            // `self`'s window exists in `copy`. A panicking clone leaves `copy`
            // holding exactly the values cloned so far, which it drops.
            unsafe { copy.push_back_within(value.clone()) };
        }
        copy
    }

    fn clone_from(&mut self, source: &Self) {
        if self.chunk_count() != source.chunk_count() {
            *self = source.clone();
            return;
        }
        self.clear();
        self.begin = source.begin();
        self.end = source.begin();
        for value in source {
            // SAFETY: same chunk count and start as `source`.
            unsafe { self.push_back_within(value.clone()) };
        }
    }
}

impl<T: PartialEq, const A: usize, const B: usize> PartialEq<Deque<T, B>> for Deque<T, A> {
    fn eq(&self, other: &Deque<T, B>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq, const CHUNK: usize> Eq for Deque<T, CHUNK> {}

impl<T: Hash, const CHUNK: usize> Hash for Deque<T, CHUNK> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len());
        for value in self {
            value.hash(state);
        }
    }
}

impl<T, const CHUNK: usize> Extend<T> for Deque<T, CHUNK> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<'a, T: Copy + 'a, const CHUNK: usize> Extend<&'a T> for Deque<T, CHUNK> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T, const CHUNK: usize> FromIterator<T> for Deque<T, CHUNK> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut deque = Self::with_capacity(iter.size_hint().0);
        deque.extend(iter);
        deque
    }
}

impl<T, const CHUNK: usize> From<Vec<T>> for Deque<T, CHUNK> {
    fn from(vec: Vec<T>) -> Self {
        vec.into_iter().collect()
    }
}

impl<T, const CHUNK: usize, const N: usize> From<[T; N]> for Deque<T, CHUNK> {
    fn from(array: [T; N]) -> Self {
        array.into_iter().collect()
    }
}

impl<'a, T, const CHUNK: usize> IntoIterator for &'a Deque<T, CHUNK> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, CHUNK>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, const CHUNK: usize> IntoIterator for &'a mut Deque<T, CHUNK> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T, CHUNK>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T, const CHUNK: usize> IntoIterator for Deque<T, CHUNK> {
    type Item = T;
    type IntoIter = IntoIter<T, CHUNK>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { deque: self }
    }
}

/// Owning iterator over a deque's elements. Unconsumed elements are dropped
/// with the iterator.
pub struct IntoIter<T, const CHUNK: usize> {
    deque: Deque<T, CHUNK>,
}

impl<T, const CHUNK: usize> IntoIter<T, CHUNK> {
    /// The elements not yet yielded, as a read-only iterator.
    pub fn as_iter(&self) -> Iter<'_, T, CHUNK> {
        self.deque.iter()
    }
}

impl<T, const CHUNK: usize> Iterator for IntoIter<T, CHUNK> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.deque.pop_front()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.deque.len();
        (len, Some(len))
    }
}

impl<T, const CHUNK: usize> DoubleEndedIterator for IntoIter<T, CHUNK> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        self.deque.pop_back()
    }
}

impl<T, const CHUNK: usize> ExactSizeIterator for IntoIter<T, CHUNK> {}
impl<T, const CHUNK: usize> FusedIterator for IntoIter<T, CHUNK> {}
