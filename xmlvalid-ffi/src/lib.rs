//! C ABI bindings for xmlvalid.
//!
//! Validators are created from a schema path and validate NUL-terminated XML
//! strings. Handles and strings returned here are owned by the caller and
//! released with the matching `*_free` function.
use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_void};

use xmlvalid_core::{StringValidator, Validator, ValidatorOptions};

mod types;

pub use types::{FfiResult, FfiString, FfiValidator};

fn required_string(ptr: *const c_char, label: &str) -> Result<String, String> {
    if ptr.is_null() {
        return Err(format!("{label} is null"));
    }
    let value = unsafe { CStr::from_ptr(ptr) }
        .to_str()
        .map_err(|_| format!("{label} is not valid utf-8"))?;
    Ok(value.to_string())
}

fn borrow_validator<'a>(validator: *mut FfiValidator) -> Result<&'a mut StringValidator, String> {
    match unsafe { validator.as_mut() } {
        Some(handle) if !handle.ptr.is_null() => {
            Ok(unsafe { &mut *(handle.ptr as *mut StringValidator) })
        }
        _ => Err("validator handle is null".to_string()),
    }
}

fn into_handle(validator: StringValidator) -> FfiValidator {
    FfiValidator {
        ptr: Box::into_raw(Box::new(validator)) as *mut c_void,
    }
}

/// Return static version string.
#[unsafe(no_mangle)]
pub extern "C" fn xmlvalid_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}

#[unsafe(no_mangle)]
/// # Safety
/// `value` must come from this library and must not be used after this call.
pub unsafe extern "C" fn xmlvalid_string_free(value: FfiString) {
    if !value.ptr.is_null() {
        unsafe { drop(CString::from_raw(value.ptr)) };
    }
}

#[unsafe(no_mangle)]
/// # Safety
/// `error` must be null or the `error` pointer of a failed [`FfiResult`].
pub unsafe extern "C" fn xmlvalid_error_free(error: *mut c_char) {
    if !error.is_null() {
        unsafe { drop(CString::from_raw(error)) };
    }
}

#[unsafe(no_mangle)]
/// # Safety
/// `schema` must be null or a valid NUL-terminated string.
pub unsafe extern "C" fn xmlvalid_validator_new(schema: *const c_char) -> FfiResult<FfiValidator> {
    let create = || -> Result<FfiValidator, String> {
        let schema = required_string(schema, "schema path")?;
        let validator = StringValidator::new(schema, ValidatorOptions::default())
            .map_err(|err| err.to_string())?;
        Ok(into_handle(validator))
    };
    create().into()
}

#[unsafe(no_mangle)]
/// # Safety
/// Both pointers must be null or valid NUL-terminated strings.
pub unsafe extern "C" fn xmlvalid_validator_with_options(
    schema: *const c_char,
    options_path: *const c_char,
) -> FfiResult<FfiValidator> {
    let create = || -> Result<FfiValidator, String> {
        let schema = required_string(schema, "schema path")?;
        let options_path = required_string(options_path, "options path")?;
        let options = ValidatorOptions::from_file(&options_path).map_err(|err| err.to_string())?;
        let validator = StringValidator::new(schema, options).map_err(|err| err.to_string())?;
        Ok(into_handle(validator))
    };
    create().into()
}

#[unsafe(no_mangle)]
/// # Safety
/// `validator` must be null or a handle returned by `xmlvalid_validator_new`.
pub unsafe extern "C" fn xmlvalid_validator_schema(
    validator: *mut FfiValidator,
) -> FfiResult<FfiString> {
    borrow_validator(validator)
        .map(|validator| FfiString::from(validator.schema().to_string_lossy().into_owned()))
        .into()
}

#[unsafe(no_mangle)]
/// # Safety
/// `validator` must be a live handle and `schema` a valid NUL-terminated string.
/// On failure the previous schema stays in place.
pub unsafe extern "C" fn xmlvalid_validator_set_schema(
    validator: *mut FfiValidator,
    schema: *const c_char,
) -> FfiResult<bool> {
    let update = || -> Result<bool, String> {
        let validator = borrow_validator(validator)?;
        let schema = required_string(schema, "schema path")?;
        validator.set_schema(schema).map_err(|err| err.to_string())?;
        Ok(true)
    };
    update().into()
}

#[unsafe(no_mangle)]
/// Returns `ok = true` with `value` holding the validation outcome. `ok = false`
/// is reserved for invalid arguments.
///
/// # Safety
/// `validator` must be a live handle and `xml` a valid NUL-terminated string.
pub unsafe extern "C" fn xmlvalid_validator_is_valid(
    validator: *mut FfiValidator,
    xml: *const c_char,
) -> FfiResult<bool> {
    let check = || -> Result<bool, String> {
        let validator = borrow_validator(validator)?;
        let xml = required_string(xml, "xml")?;
        Ok(validator.is_valid(&xml))
    };
    check().into()
}

#[unsafe(no_mangle)]
/// Joined error text of the last failed validation.
///
/// # Safety
/// `validator` must be null or a live handle.
pub unsafe extern "C" fn xmlvalid_validator_error(
    validator: *mut FfiValidator,
) -> FfiResult<FfiString> {
    borrow_validator(validator)
        .map(|validator| FfiString::from(validator.error().to_string()))
        .into()
}

#[unsafe(no_mangle)]
/// Rendered messages of the last validation, one per line. Empty after a
/// successful validation.
///
/// # Safety
/// `validator` must be null or a live handle.
pub unsafe extern "C" fn xmlvalid_validator_messages(
    validator: *mut FfiValidator,
) -> FfiResult<FfiString> {
    borrow_validator(validator)
        .map(|validator| {
            let joined = validator
                .messages()
                .iter()
                .map(|(_, message)| message)
                .collect::<Vec<_>>()
                .join("\n");
            FfiString::from(joined)
        })
        .into()
}

#[unsafe(no_mangle)]
/// # Safety
/// `validator` must be null or a handle returned by this library. The handle
/// is cleared and must not be used afterwards.
pub unsafe extern "C" fn xmlvalid_validator_free(validator: *mut FfiValidator) {
    if validator.is_null() {
        return;
    }
    let validator = unsafe { &mut *validator };
    if validator.ptr.is_null() {
        return;
    }
    unsafe { drop(Box::from_raw(validator.ptr as *mut StringValidator)) };
    validator.ptr = std::ptr::null_mut();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_nul_terminated() {
        let version = unsafe { CStr::from_ptr(xmlvalid_version()) };
        assert_eq!(version.to_str().unwrap(), env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn null_arguments_are_errors() {
        unsafe {
            let result = xmlvalid_validator_new(std::ptr::null());
            assert!(!result.ok);
            assert!(result.value.ptr.is_null());
            xmlvalid_error_free(result.error);

            let result = xmlvalid_validator_is_valid(std::ptr::null_mut(), std::ptr::null());
            assert!(!result.ok);
            xmlvalid_error_free(result.error);
        }
    }
}
