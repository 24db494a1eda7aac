//! FFI bindings for the insight engine
//!
//! This module provides C-compatible functions so a non-Rust host (for
//! example the Coach-Fit Node backend) can embed the engine. All functions
//! use null-terminated C strings and return allocated memory that must be
//! freed by the caller using `insight_free_string`.

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use chrono::{DateTime, Utc};

use crate::pipeline::InsightEngine;

// Thread-local storage for the last error message
thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

/// Set the last error message
fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

/// Clear the last error message
fn clear_last_error() {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = None;
    });
}

/// Helper to convert C string to Rust string
unsafe fn cstr_to_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string())
}

/// Helper to convert Rust string to C string (caller must free)
fn string_to_cstr(s: &str) -> *mut c_char {
    match CString::new(s) {
        Ok(cstr) => cstr.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

/// Derive an insight report from a workout snapshot JSON array.
///
/// `now_rfc3339` is the injected reference time ("today" for all window
/// bucketing); pass the host's current time as an RFC 3339 string.
///
/// # Safety
/// - `snapshot_json` and `now_rfc3339` must be valid null-terminated C strings.
/// - Returns a newly allocated report JSON string that must be freed with
///   `insight_free_string`.
/// - Returns NULL on error; call `insight_last_error` for the message.
#[no_mangle]
pub unsafe extern "C" fn insight_report_from_json(
    snapshot_json: *const c_char,
    now_rfc3339: *const c_char,
) -> *mut c_char {
    clear_last_error();

    let json = match cstr_to_string(snapshot_json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid snapshot JSON string pointer");
            return ptr::null_mut();
        }
    };

    let now_raw = match cstr_to_string(now_rfc3339) {
        Some(s) => s,
        None => {
            set_last_error("Invalid timestamp string pointer");
            return ptr::null_mut();
        }
    };

    let now: DateTime<Utc> = match DateTime::parse_from_rfc3339(&now_raw) {
        Ok(timestamp) => timestamp.with_timezone(&Utc),
        Err(e) => {
            set_last_error(&format!("Invalid reference timestamp: {e}"));
            return ptr::null_mut();
        }
    };

    let engine = InsightEngine::new();
    match engine.derive_from_json(&json, now) {
        Ok(report) => match report.to_json() {
            Ok(out) => string_to_cstr(&out),
            Err(e) => {
                set_last_error(&e.to_string());
                ptr::null_mut()
            }
        },
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

/// Get the last error message.
///
/// # Safety
/// - Returns a newly allocated string that must be freed with
///   `insight_free_string`, or NULL if there is no pending error.
#[no_mangle]
pub unsafe extern "C" fn insight_last_error() -> *mut c_char {
    LAST_ERROR.with(|e| match &*e.borrow() {
        Some(msg) => string_to_cstr(msg.to_str().unwrap_or("Unknown error")),
        None => ptr::null_mut(),
    })
}

/// Free a string returned by this module.
///
/// # Safety
/// - `ptr` must be a pointer returned by a function in this module, or NULL.
/// - Must not be called twice on the same pointer.
#[no_mangle]
pub unsafe extern "C" fn insight_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

/// Engine version as a static string; do NOT free the result.
///
/// # Safety
/// - The returned pointer is valid for the lifetime of the program.
#[no_mangle]
pub unsafe extern "C" fn insight_version() -> *const c_char {
    concat!(env!("CARGO_PKG_VERSION"), "\0").as_ptr() as *const c_char
}
