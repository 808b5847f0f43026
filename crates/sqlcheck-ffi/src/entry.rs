//! Exported entry points.
//!
//! A host drives the validator in four steps: allocate a buffer, write the
//! SQL text into it, check it, release it. Every entry point is total: bad
//! pointers it can detect, invalid UTF-8 and internal panics all map to the
//! documented failure value instead of unwinding into the host.

#![allow(unsafe_code)]

use std::ffi::{CStr, c_char, c_int};
use std::panic::{self, AssertUnwindSafe};
use std::ptr::{self, NonNull};

use sqlcheck_core::{ValidationError, Validator};
use tracing::{debug, error};

use crate::buffer;

/// Reserves a buffer of at least `byte_count` bytes.
///
/// Returns null for a zero size or when the allocation fails. The buffer must
/// be released with [`sqlcheck_free`].
#[unsafe(no_mangle)]
pub extern "C" fn sqlcheck_alloc(byte_count: usize) -> *mut u8 {
    buffer::allocate(byte_count).map_or(ptr::null_mut(), NonNull::as_ptr)
}

/// Copies `text_len` bytes of `text` into `buf` and appends a NUL byte.
///
/// Returns `0` on success, or `-1` without writing anything when a pointer is
/// null or `text_len + 1` exceeds `capacity`.
///
/// # Safety
///
/// `buf` must be writable for `capacity` bytes, `text` must be readable for
/// `text_len` bytes, and the two regions must not overlap.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn sqlcheck_write_string(
    buf: *mut u8,
    capacity: usize,
    text: *const u8,
    text_len: usize,
) -> c_int {
    if buf.is_null() || text.is_null() {
        return -1;
    }
    match text_len.checked_add(1) {
        Some(needed) if needed <= capacity => {}
        _ => {
            debug!(text_len, capacity, "text does not fit the buffer");
            return -1;
        }
    }

    // SAFETY: both regions were checked against their lengths above and the
    // caller guarantees they are valid and disjoint.
    unsafe {
        ptr::copy_nonoverlapping(text, buf, text_len);
        buf.add(text_len).write(0);
    }
    0
}

/// Returns `1` when the NUL-terminated string at `query` is valid SQL and `0`
/// otherwise, including for a null pointer and for invalid UTF-8.
///
/// # Safety
///
/// A non-null `query` must point to a NUL-terminated string that stays
/// readable for the duration of the call. The pointer is not retained.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn sqlcheck_is_valid_sql(query: *const c_char) -> c_int {
    // SAFETY: forwarded from the caller.
    unsafe {
        guarded(query, 0, |bytes| {
            c_int::from(Validator::default().validate_bytes(bytes).is_valid())
        })
    }
}

/// Returns the byte offset of the first diverging token, or `-1` when the
/// string is valid or `query` is null.
///
/// # Safety
///
/// Same contract as [`sqlcheck_is_valid_sql`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn sqlcheck_error_offset(query: *const c_char) -> isize {
    // SAFETY: forwarded from the caller.
    unsafe {
        guarded(query, -1, |bytes| {
            Validator::default()
                .validate_bytes(bytes)
                .offset()
                .map_or(-1, |offset| isize::try_from(offset).unwrap_or(isize::MAX))
        })
    }
}

/// Returns the number of statements in a valid string, or `-1` when it is
/// invalid or `query` is null.
///
/// # Safety
///
/// Same contract as [`sqlcheck_is_valid_sql`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn sqlcheck_statement_count(query: *const c_char) -> c_int {
    // SAFETY: forwarded from the caller.
    unsafe {
        guarded(query, -1, |bytes| {
            count_statements(bytes)
                .map_or(-1, |count| c_int::try_from(count).unwrap_or(c_int::MAX))
        })
    }
}

/// Releases a buffer obtained from [`sqlcheck_alloc`]. Null is a no-op.
///
/// # Safety
///
/// A non-null `ptr` must come from [`sqlcheck_alloc`] and must not have been
/// released already.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn sqlcheck_free(ptr: *mut u8) {
    if let Some(ptr) = NonNull::new(ptr) {
        // SAFETY: forwarded from the caller.
        unsafe { buffer::release(ptr) }
    }
}

/// Reads the C string at `query` and runs `check` on its bytes, answering
/// `fallback` for a null pointer or a panic.
///
/// # Safety
///
/// A non-null `query` must point to a readable NUL-terminated string.
unsafe fn guarded<T>(query: *const c_char, fallback: T, check: impl FnOnce(&[u8]) -> T) -> T {
    if query.is_null() {
        debug!("null query pointer");
        return fallback;
    }
    // SAFETY: non-null, and the caller guarantees a NUL-terminated string.
    let bytes = unsafe { CStr::from_ptr(query) }.to_bytes();

    panic::catch_unwind(AssertUnwindSafe(|| check(bytes))).unwrap_or_else(|_| {
        error!(len = bytes.len(), "validator panicked, reporting the input as invalid");
        fallback
    })
}

fn count_statements(bytes: &[u8]) -> Result<usize, ValidationError> {
    Ok(Validator::default().statements_bytes(bytes)?.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_pointers() {
        unsafe {
            assert_eq!(sqlcheck_is_valid_sql(ptr::null()), 0);
            assert_eq!(sqlcheck_error_offset(ptr::null()), -1);
            assert_eq!(sqlcheck_statement_count(ptr::null()), -1);
            assert_eq!(sqlcheck_write_string(ptr::null_mut(), 8, b"x".as_ptr(), 1), -1);
            sqlcheck_free(ptr::null_mut());
        }
        assert!(sqlcheck_alloc(0).is_null());
    }

    #[test]
    fn test_checks_on_static_strings() {
        unsafe {
            assert_eq!(sqlcheck_is_valid_sql(c"SELECT 1".as_ptr()), 1);
            assert_eq!(sqlcheck_is_valid_sql(c"INVALID SQL".as_ptr()), 0);
            assert_eq!(sqlcheck_error_offset(c"SELECT 1 2".as_ptr()), 9);
            assert_eq!(sqlcheck_statement_count(c"SELECT 1; SELECT 2;".as_ptr()), 2);
            assert_eq!(sqlcheck_statement_count(c"".as_ptr()), -1);
        }
    }

    #[test]
    fn test_invalid_utf8() {
        let query = c"SELECT '\xff'";
        unsafe {
            assert_eq!(sqlcheck_is_valid_sql(query.as_ptr()), 0);
            assert_eq!(sqlcheck_error_offset(query.as_ptr()), 8);
            assert_eq!(sqlcheck_statement_count(query.as_ptr()), -1);
        }
    }

    #[test]
    fn test_count_statements() {
        assert_eq!(count_statements(b"BEGIN; COMMIT"), Ok(2));
        assert_eq!(
            count_statements(b"\xc3"),
            Err(ValidationError::InvalidUtf8 { offset: 0 })
        );
    }
}
