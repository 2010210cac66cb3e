use std::ffi::CString;
use std::fmt::Display;
use std::os::raw::{c_char, c_void};

/// Opaque handle to a string validator.
#[repr(C)]
pub struct FfiValidator {
    pub ptr: *mut c_void,
}

impl Default for FfiValidator {
    fn default() -> Self {
        Self {
            ptr: std::ptr::null_mut(),
        }
    }
}

/// Owned C string, released with `xmlvalid_string_free`.
#[repr(C)]
pub struct FfiString {
    pub ptr: *mut c_char,
}

impl Default for FfiString {
    fn default() -> Self {
        Self {
            ptr: std::ptr::null_mut(),
        }
    }
}

impl From<String> for FfiString {
    fn from(value: String) -> Self {
        FfiString {
            ptr: into_c_string(value),
        }
    }
}

/// Outcome of a fallible call. On failure `value` holds its default (null
/// handles, `false`) and `error` owns a message released with
/// `xmlvalid_error_free`.
#[repr(C)]
pub struct FfiResult<T> {
    pub ok: bool,
    pub value: T,
    pub error: *mut c_char,
}

impl<T> FfiResult<T> {
    pub fn ok(value: T) -> Self {
        Self {
            ok: true,
            value,
            error: std::ptr::null_mut(),
        }
    }
}

impl<T: Default> FfiResult<T> {
    pub fn err(message: impl Display) -> Self {
        Self {
            ok: false,
            value: T::default(),
            error: into_c_string(message.to_string()),
        }
    }
}

impl<T: Default, E: Display> From<Result<T, E>> for FfiResult<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::ok(value),
            Err(err) => Self::err(err),
        }
    }
}

/// Validator messages quote the input XML, which may carry NUL bytes. They
/// are dropped so the rest of the text survives.
fn into_c_string(value: String) -> *mut c_char {
    let bytes: Vec<u8> = value.into_bytes().into_iter().filter(|b| *b != 0).collect();
    CString::new(bytes).unwrap_or_default().into_raw()
}

#[cfg(test)]
mod tests {
    use std::ffi::CStr;

    use super::*;

    fn take(ptr: *mut c_char) -> String {
        unsafe { CString::from_raw(ptr) }.into_string().expect("utf-8")
    }

    #[test]
    fn ok_leaves_error_null() {
        let result = FfiResult::ok(true);
        assert!(result.ok);
        assert!(result.value);
        assert!(result.error.is_null());
    }

    #[test]
    fn failed_results_carry_default_values() {
        let result = FfiResult::<FfiValidator>::err("schema missing");
        assert!(!result.ok);
        assert!(result.value.ptr.is_null());
        assert_eq!(take(result.error), "schema missing");
    }

    #[test]
    fn results_convert_from_std() {
        let result: FfiResult<bool> = Err::<bool, _>("bad path").into();
        assert!(!result.ok);
        assert!(!result.value);
        assert_eq!(take(result.error), "bad path");

        let result: FfiResult<bool> = Ok::<_, String>(true).into();
        assert!(result.ok && result.value);
    }

    #[test]
    fn interior_nul_is_dropped() {
        let result = FfiResult::<bool>::err("bad\0message");
        let message = unsafe { CStr::from_ptr(result.error) }
            .to_string_lossy()
            .into_owned();
        assert_eq!(message, "badmessage");
        take(result.error);

        let value = FfiString::from("<a>\0</a>".to_string());
        assert_eq!(take(value.ptr), "<a></a>");
    }
}
