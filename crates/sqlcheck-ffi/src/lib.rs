//! # sqlcheck-ffi
//!
//! Exposes the sqlcheck validator to hosts that live in another memory space,
//! such as a C program or a JavaScript engine running the crate as wasm.
//!
//! The host owns every buffer it passes in:
//!
//! 1. `sqlcheck_alloc(n)` reserves a buffer of `n` bytes.
//! 2. `sqlcheck_write_string(buf, n, text, len)` copies the SQL text and a
//!    NUL terminator into it.
//! 3. `sqlcheck_is_valid_sql(buf)` answers `1` or `0`. The extended checks
//!    `sqlcheck_error_offset` and `sqlcheck_statement_count` follow the same
//!    contract.
//! 4. `sqlcheck_free(buf)` releases it.
//!
//! Rust hosts get the same protocol with scoped release through
//! [`ForeignBuffer`]:
//!
//! ```rust
//! use sqlcheck_ffi::ForeignBuffer;
//!
//! let buffer = ForeignBuffer::for_str("SELECT 1")?;
//! assert!(buffer.check());
//! buffer.release();
//!
//! let buffer = ForeignBuffer::for_str("SELECT 1 FROM")?;
//! assert_eq!(buffer.error_offset(), Some(13));
//! # Ok::<(), sqlcheck_ffi::BoundaryError>(())
//! ```

mod buffer;
mod entry;
mod error;

pub use buffer::ForeignBuffer;
pub use entry::{
    sqlcheck_alloc, sqlcheck_error_offset, sqlcheck_free, sqlcheck_is_valid_sql,
    sqlcheck_statement_count, sqlcheck_write_string,
};
pub use error::BoundaryError;
