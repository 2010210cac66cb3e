//! Scoped capture of libxml parser errors.
//!
//! Schema validation errors are collected per validation context by libxml
//! itself. Parser errors go through the thread-local structured error handler,
//! so this guard installs its own handler on acquire, collects every record
//! raised while it is alive, and puts the previous handler back on drop.
use std::ffi::CStr;
use std::marker::PhantomData;
use std::os::raw::{c_char, c_void};

use libxml::bindings::{
    __xmlStructuredError, __xmlStructuredErrorContext, xmlErrorPtr, xmlResetLastError,
    xmlSetStructuredErrorFunc, xmlStructuredErrorFunc,
};

use crate::issue::SchemaIssue;

/// Guard over libxml's structured error handler. Not `Send`: the handler is
/// per thread.
pub(crate) struct ErrorCapture {
    issues: *mut Vec<SchemaIssue>,
    previous_handler: xmlStructuredErrorFunc,
    previous_context: *mut c_void,
    _not_send: PhantomData<*const ()>,
}

impl ErrorCapture {
    pub(crate) fn acquire() -> Self {
        let issues = Box::into_raw(Box::new(Vec::new()));
        let (previous_handler, previous_context) =
            unsafe { (*__xmlStructuredError(), *__xmlStructuredErrorContext()) };
        unsafe {
            xmlResetLastError();
            xmlSetStructuredErrorFunc(issues as *mut c_void, Some(collect_issue));
        }
        Self {
            issues,
            previous_handler,
            previous_context,
            _not_send: PhantomData,
        }
    }

    /// Drains every record raised since `acquire` or the previous drain.
    pub(crate) fn drain(&self) -> Vec<SchemaIssue> {
        std::mem::take(unsafe { &mut *self.issues })
    }
}

impl Drop for ErrorCapture {
    fn drop(&mut self) {
        unsafe {
            xmlSetStructuredErrorFunc(self.previous_context, self.previous_handler);
            xmlResetLastError();
            drop(Box::from_raw(self.issues));
        }
    }
}

unsafe extern "C" fn collect_issue(user_data: *mut c_void, error: xmlErrorPtr) {
    if user_data.is_null() || error.is_null() {
        return;
    }
    let issues = unsafe { &mut *(user_data as *mut Vec<SchemaIssue>) };
    let error = unsafe { &*error };
    issues.push(SchemaIssue::new(
        error.code,
        unsafe { owned_string(error.file) },
        Some(error.line),
        unsafe { owned_string(error.message) }.unwrap_or_default(),
    ));
}

/// # Safety
/// `ptr` must be null or point to a NUL-terminated string owned by libxml.
unsafe fn owned_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    let value = unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned();
    if value.is_empty() { None } else { Some(value) }
}
