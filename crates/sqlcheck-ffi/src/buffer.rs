//! Buffers handed across the boundary.
//!
//! Every allocation carries a hidden header holding its size, so a host can
//! release a buffer by pointer alone. [`ForeignBuffer`] wraps one allocation
//! for Rust hosts and releases it on every exit path.

#![allow(unsafe_code)]

use std::alloc::{self, Layout};
use std::ffi::{CStr, c_char};
use std::ptr::NonNull;
use std::slice;

use tracing::trace;

use crate::entry::{sqlcheck_error_offset, sqlcheck_is_valid_sql, sqlcheck_write_string};
use crate::error::BoundaryError;

// ============================================================================
// Header-prefixed allocation
// ============================================================================

const HEADER_SIZE: usize = size_of::<usize>();
const ALIGNMENT: usize = align_of::<usize>();

fn layout(byte_count: usize) -> Option<Layout> {
    let total = byte_count.checked_add(HEADER_SIZE)?;
    Layout::from_size_align(total, ALIGNMENT).ok()
}

/// Reserves `byte_count` usable bytes. Returns `None` for zero bytes or when
/// the allocator fails.
pub(crate) fn allocate(byte_count: usize) -> Option<NonNull<u8>> {
    if byte_count == 0 {
        return None;
    }
    let layout = layout(byte_count)?;

    // SAFETY: the layout is at least HEADER_SIZE bytes.
    let base = NonNull::new(unsafe { alloc::alloc(layout) })?;
    // SAFETY: the block is aligned for usize and starts with HEADER_SIZE bytes
    // reserved for the size.
    unsafe {
        base.cast::<usize>().write(byte_count);
        Some(base.add(HEADER_SIZE))
    }
}

/// Returns the usable size recorded for `ptr`.
///
/// # Safety
///
/// `ptr` must come from [`allocate`] and must not have been released.
pub(crate) unsafe fn allocation_size(ptr: NonNull<u8>) -> usize {
    // SAFETY: the header sits directly before the user pointer.
    unsafe { ptr.sub(HEADER_SIZE).cast::<usize>().read() }
}

/// Returns the allocation behind `ptr` to the allocator.
///
/// # Safety
///
/// `ptr` must come from [`allocate`] and must not have been released.
pub(crate) unsafe fn release(ptr: NonNull<u8>) {
    // SAFETY: same allocation as the one `allocate` produced.
    unsafe {
        let byte_count = allocation_size(ptr);
        if let Some(layout) = layout(byte_count) {
            alloc::dealloc(ptr.sub(HEADER_SIZE).as_ptr(), layout);
        }
    }
}

// ============================================================================
// ForeignBuffer
// ============================================================================

/// One buffer of the allocate / write / check / release protocol, owned by a
/// Rust host.
///
/// The buffer is released when dropped, so early returns and panics in the
/// host never leak it.
#[derive(Debug)]
pub struct ForeignBuffer {
    ptr: NonNull<u8>,
    capacity: usize,
    /// Length of the written text, NUL excluded. `None` until a write.
    len: Option<usize>,
}

impl ForeignBuffer {
    /// Allocates a buffer of `byte_count` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`BoundaryError::ZeroSized`] for a zero size and
    /// [`BoundaryError::AllocationFailed`] when the allocator gives up.
    pub fn allocate(byte_count: usize) -> Result<Self, BoundaryError> {
        if byte_count == 0 {
            return Err(BoundaryError::ZeroSized);
        }
        let ptr = allocate(byte_count).ok_or(BoundaryError::AllocationFailed { byte_count })?;
        trace!(byte_count, "buffer allocated");
        Ok(Self {
            ptr,
            capacity: byte_count,
            len: None,
        })
    }

    /// Allocates a buffer sized to `text` plus its NUL terminator and writes
    /// `text` into it.
    ///
    /// # Errors
    ///
    /// Fails when the allocation fails or `text` contains a NUL byte.
    pub fn for_str(text: &str) -> Result<Self, BoundaryError> {
        let mut buffer = Self::allocate(text.len().saturating_add(1))?;
        buffer.write_str(text)?;
        Ok(buffer)
    }

    /// Returns the number of usable bytes.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Writes `text` and a NUL terminator at the start of the buffer.
    ///
    /// # Errors
    ///
    /// Returns [`BoundaryError::InteriorNul`] when `text` holds a NUL byte and
    /// [`BoundaryError::TooLarge`] when it does not fit with its terminator.
    /// The buffer is left untouched on error.
    pub fn write_str(&mut self, text: &str) -> Result<(), BoundaryError> {
        if let Some(position) = text.bytes().position(|byte| byte == 0) {
            return Err(BoundaryError::InteriorNul { position });
        }
        let too_large = BoundaryError::TooLarge {
            needed: text.len().saturating_add(1),
            capacity: self.capacity,
        };
        if text.len() >= self.capacity {
            return Err(too_large);
        }

        // SAFETY: the buffer is writable for `capacity` bytes and cannot
        // overlap the borrowed `text`.
        let status = unsafe {
            sqlcheck_write_string(self.ptr.as_ptr(), self.capacity, text.as_ptr(), text.len())
        };
        if status != 0 {
            return Err(too_large);
        }
        self.len = Some(text.len());
        Ok(())
    }

    /// Returns the written text as a C string, or `None` before any write.
    #[must_use]
    pub fn as_c_str(&self) -> Option<&CStr> {
        let len = self.len?;
        // SAFETY: a successful write left `len` non-NUL bytes and a NUL.
        let bytes = unsafe { slice::from_raw_parts(self.ptr.as_ptr(), len + 1) };
        CStr::from_bytes_with_nul(bytes).ok()
    }

    /// Returns the raw pointer handed to the entry points.
    #[must_use]
    pub const fn as_ptr(&self) -> *const c_char {
        self.ptr.as_ptr().cast_const().cast()
    }

    /// Validates the written text through the exported check. An unwritten
    /// buffer is never valid.
    #[must_use]
    pub fn check(&self) -> bool {
        if self.len.is_none() {
            return false;
        }
        // SAFETY: the buffer holds a NUL-terminated string.
        unsafe { sqlcheck_is_valid_sql(self.as_ptr()) == 1 }
    }

    /// Returns the diagnostic byte offset for the written text, or `None`
    /// when it is valid or unwritten.
    #[must_use]
    pub fn error_offset(&self) -> Option<usize> {
        self.len?;
        // SAFETY: the buffer holds a NUL-terminated string.
        let offset = unsafe { sqlcheck_error_offset(self.as_ptr()) };
        usize::try_from(offset).ok()
    }

    /// Releases the buffer now rather than at the end of the scope.
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for ForeignBuffer {
    fn drop(&mut self) {
        trace!(capacity = self.capacity, "buffer released");
        // SAFETY: the pointer came from `allocate` and is released only here.
        unsafe { release(self.ptr) }
    }
}
