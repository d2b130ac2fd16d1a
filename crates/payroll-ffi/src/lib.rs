//! C FFI bindings for payroll-core
//!
//! A host UI owns file picking, text decoding and the download; it hands
//! both decoded exports to `payroll_merge` and gets back either the CSV
//! text or the message to show the user.

use payroll_core::{run_import, to_csv, ImportConfig};
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

/// Opaque handle to the outcome of a merge
pub struct FfiMergeResult {
    inner: Result<Merged, String>,
}

struct Merged {
    csv: String,
    line_count: usize,
}

fn merge_texts(labor: &str, tips: &str) -> Result<Merged, String> {
    let run = run_import(labor, tips, &ImportConfig::default()).map_err(|e| e.to_string())?;
    let csv = to_csv(&run.lines).map_err(|e| e.to_string())?;
    Ok(Merged {
        csv,
        line_count: run.lines.len(),
    })
}

/// Merge a labor export and a tips export
///
/// # Safety
/// - `labor` and `tips` must be valid, NUL-terminated UTF-8 C strings
/// - Returns null only if either pointer is null or not valid UTF-8
/// - Free the result with `payroll_free_result`
#[no_mangle]
pub unsafe extern "C" fn payroll_merge(
    labor: *const c_char,
    tips: *const c_char,
) -> *mut FfiMergeResult {
    if labor.is_null() || tips.is_null() {
        return ptr::null_mut();
    }

    let (labor, tips) = match (CStr::from_ptr(labor).to_str(), CStr::from_ptr(tips).to_str()) {
        (Ok(l), Ok(t)) => (l, t),
        _ => return ptr::null_mut(),
    };

    Box::into_raw(Box::new(FfiMergeResult {
        inner: merge_texts(labor, tips),
    }))
}

/// Free a merge result
///
/// # Safety
/// - `result` must be a valid pointer returned by `payroll_merge` or null
#[no_mangle]
pub unsafe extern "C" fn payroll_free_result(result: *mut FfiMergeResult) {
    if !result.is_null() {
        drop(Box::from_raw(result));
    }
}

/// Whether the merge succeeded
///
/// # Safety
/// - `result` must be a valid pointer returned by `payroll_merge`
#[no_mangle]
pub unsafe extern "C" fn payroll_result_ok(result: *const FfiMergeResult) -> bool {
    if result.is_null() {
        return false;
    }
    (*result).inner.is_ok()
}

/// Number of ledger lines, 0 on failure
///
/// # Safety
/// - `result` must be a valid pointer returned by `payroll_merge`
#[no_mangle]
pub unsafe extern "C" fn payroll_result_line_count(result: *const FfiMergeResult) -> usize {
    if result.is_null() {
        return 0;
    }
    match &(*result).inner {
        Ok(merged) => merged.line_count,
        Err(_) => 0,
    }
}

/// CSV text of a successful merge
///
/// # Safety
/// - `result` must be a valid pointer returned by `payroll_merge`
/// - Returns null if the merge failed
/// - Caller must free the returned string with `payroll_free_string`
#[no_mangle]
pub unsafe extern "C" fn payroll_result_csv(result: *const FfiMergeResult) -> *mut c_char {
    if result.is_null() {
        return ptr::null_mut();
    }

    (*result)
        .inner
        .as_ref()
        .ok()
        .and_then(|m| CString::new(m.csv.as_str()).ok())
        .map(|s| s.into_raw())
        .unwrap_or(ptr::null_mut())
}

/// Error message of a failed merge
///
/// # Safety
/// - `result` must be a valid pointer returned by `payroll_merge`
/// - Returns null if the merge succeeded
/// - Caller must free the returned string with `payroll_free_string`
#[no_mangle]
pub unsafe extern "C" fn payroll_result_error(result: *const FfiMergeResult) -> *mut c_char {
    if result.is_null() {
        return ptr::null_mut();
    }

    (*result)
        .inner
        .as_ref()
        .err()
        .and_then(|e| CString::new(e.as_str()).ok())
        .map(|s| s.into_raw())
        .unwrap_or(ptr::null_mut())
}

/// Free a string returned by other FFI functions
///
/// # Safety
/// - `s` must be a valid pointer returned by a payroll_* function or null
#[no_mangle]
pub unsafe extern "C" fn payroll_free_string(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(s: &str) -> CString {
        CString::new(s).unwrap()
    }

    unsafe fn take_string(s: *mut c_char) -> String {
        let out = CStr::from_ptr(s).to_str().unwrap().to_string();
        payroll_free_string(s);
        out
    }

    #[test]
    fn test_merge_success() {
        let labor = c("Employee ID,Job Code,Regular Hours,Overtime Hours,Normal Rate\n42,212,10,2,15\n");
        let tips = c("Employee ID,Job,Tips and Gratuity after Pooling\n7,Bartender,123.455\n");

        unsafe {
            let result = payroll_merge(labor.as_ptr(), tips.as_ptr());
            assert!(!result.is_null());
            assert!(payroll_result_ok(result));
            assert_eq!(payroll_result_line_count(result), 3);
            assert!(payroll_result_error(result).is_null());

            let csv = take_string(payroll_result_csv(result));
            assert!(csv.contains("7,TPCRRS,,,123.46,BARTEND"));
            payroll_free_result(result);
        }
    }

    #[test]
    fn test_merge_failure_message() {
        let labor = c("Employee ID,Job Code\n42,999\n");
        let tips = c("Employee ID,Job\n");

        unsafe {
            let result = payroll_merge(labor.as_ptr(), tips.as_ptr());
            assert!(!payroll_result_ok(result));
            assert!(payroll_result_csv(result).is_null());

            let message = take_string(payroll_result_error(result));
            assert!(message.starts_with("[LABOR] Row 2"));
            payroll_free_result(result);
        }
    }

    #[test]
    fn test_null_input() {
        let tips = c("");
        unsafe {
            assert!(payroll_merge(ptr::null(), tips.as_ptr()).is_null());
        }
    }
}
