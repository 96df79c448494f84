//! Utility functions and conversions for FFI

use crate::error::RegistrationError;
use crate::ffi::types::{Sha1dcCarrierDescriptor, Sha1dcFieldDescriptor};
use crate::marshal::{CarrierDescriptor, FieldDescriptor};
use std::ffi::{CStr, c_char};

/// Upper bound on descriptor fields read from the host
const MAX_CARRIER_FIELDS: usize = 64;

/// Run an FFI body, mapping a panic to `$fallback`
#[macro_export]
macro_rules! ffi_catch_panic {
    ($fallback:expr, $($body:tt)*) => {{
        match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| { $($body)* })) {
            Ok(result) => result,
            Err(_) => {
                log::error!("Panic caught at FFI boundary");
                $fallback
            }
        }
    }};
}

/// Convert a C string, reporting null as a missing `what`
fn c_str_to_string(s: *const c_char, what: &str) -> Result<Option<String>, RegistrationError> {
    if s.is_null() {
        return Ok(None);
    }
    // SAFETY: non-null and, per the load contract, NUL-terminated.
    unsafe { CStr::from_ptr(s) }
        .to_str()
        .map(|s| Some(s.to_string()))
        .map_err(|_| RegistrationError::invalid_utf8(what))
}

fn field_from_ffi(field: &Sha1dcFieldDescriptor) -> Result<FieldDescriptor, RegistrationError> {
    let name = c_str_to_string(field.name, "field name")?.unwrap_or_default();
    let signature = c_str_to_string(field.signature, "field signature")?.unwrap_or_default();
    Ok(FieldDescriptor {
        name,
        signature,
        offset: field.offset,
    })
}

/// Copy the host's carrier descriptor into owned Rust values
pub(crate) fn descriptor_from_ffi(
    descriptor: *const Sha1dcCarrierDescriptor,
) -> Result<CarrierDescriptor, RegistrationError> {
    if descriptor.is_null() {
        return Err(RegistrationError::missing_class(""));
    }
    // SAFETY: non-null; the host keeps it alive for the duration of load.
    let raw = unsafe { &*descriptor };

    let class_name = c_str_to_string(raw.class_name, "class name")?
        .ok_or_else(|| RegistrationError::missing_class(""))?;

    let fields = if raw.fields.is_null() || raw.field_count == 0 {
        Vec::new()
    } else {
        let count = raw.field_count.min(MAX_CARRIER_FIELDS);
        // SAFETY: the host declares `field_count` entries at `fields`.
        let raw_fields = unsafe { std::slice::from_raw_parts(raw.fields, count) };
        raw_fields
            .iter()
            .map(field_from_ffi)
            .collect::<Result<Vec<_>, _>>()?
    };

    Ok(CarrierDescriptor {
        class_name,
        size: raw.size,
        fields,
    })
}
