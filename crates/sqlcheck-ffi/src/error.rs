//! Errors raised on the Rust side of the boundary.

/// Why a [`ForeignBuffer`](crate::ForeignBuffer) operation was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoundaryError {
    /// A buffer of zero bytes was requested.
    #[error("cannot allocate a zero-sized buffer")]
    ZeroSized,

    /// The allocator could not provide the buffer.
    #[error("allocation of {byte_count} bytes failed")]
    AllocationFailed {
        /// Requested size.
        byte_count: usize,
    },

    /// The text and its NUL terminator do not fit.
    #[error("text needs {needed} bytes but the buffer holds {capacity}")]
    TooLarge {
        /// Text length plus the terminator.
        needed: usize,
        /// Buffer size.
        capacity: usize,
    },

    /// The text holds a NUL byte, which would cut it short on the other side.
    #[error("text contains a NUL byte at position {position}")]
    InteriorNul {
        /// Byte position of the first NUL.
        position: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            BoundaryError::TooLarge {
                needed: 9,
                capacity: 4
            }
            .to_string(),
            "text needs 9 bytes but the buffer holds 4"
        );
        assert_eq!(
            BoundaryError::InteriorNul { position: 3 }.to_string(),
            "text contains a NUL byte at position 3"
        );
    }
}
