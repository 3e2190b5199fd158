//! Error type shared by the fallible deque operations.

use core::fmt;

/// The error type for checked access and fallible growth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DequeError {
    /// A checked access named an index at or past the end of the deque.
    OutOfRange {
        /// The requested logical index.
        index: usize,
        /// The length of the deque at the time of the access.
        len: usize,
    },
    /// The requested capacity does not fit in the address space.
    CapacityOverflow,
    /// The allocator refused chunk storage or the chunk table itself.
    AllocFailed {
        /// The chunk count the failed growth was aiming for.
        chunks: usize,
    },
}

impl fmt::Display for DequeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::OutOfRange { index, len } => {
                write!(f, "deque index {index} out of range for length {len}")
            }
            Self::CapacityOverflow => f.write_str("deque capacity overflow"),
            Self::AllocFailed { chunks } => {
                write!(
                    f,
                    "memory allocation failed while growing to {chunks} chunks"
                )
            }
        }
    }
}

impl std::error::Error for DequeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_index_and_len() {
        let err = DequeError::OutOfRange { index: 3, len: 3 };
        assert_eq!(err.to_string(), "deque index 3 out of range for length 3");
    }

    #[test]
    fn display_alloc_failure() {
        let err = DequeError::AllocFailed { chunks: 12 };
        assert!(err.to_string().contains("12 chunks"));
    }
}
