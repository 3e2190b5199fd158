//! `proptest` strategies for generating deques.
//!
//! Enabled by the `proptest` feature. Generated deques are built by a random
//! mix of `push_front` and `push_back`, so their windows sit at arbitrary
//! offsets in tables that have grown from either end.

use core::fmt::Debug;

use proptest::collection::{vec, SizeRange};
use proptest::prelude::any;
use proptest::strategy::Strategy;

use crate::deque::Deque;

/// Strategy for deques of `size` elements drawn from `element`.
///
/// Each element is pushed to the front or the back at random.
pub fn deque<T, S, const CHUNK: usize>(
    element: S,
    size: impl Into<SizeRange>,
) -> impl Strategy<Value = Deque<T, CHUNK>>
where
    T: Debug,
    S: Strategy<Value = T>,
{
    vec((any::<bool>(), element), size).prop_map(|pushes| {
        let mut deque = Deque::new();
        for (front, value) in pushes {
            if front {
                deque.push_front(value);
            } else {
                deque.push_back(value);
            }
        }
        deque
    })
}
