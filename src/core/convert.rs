// SPDX-License-Identifier: MIT

//! Bidirectional codec between [`Value`] and CoreFoundation objects.
//!
//! Every reference returned by [`to_cf`] is owned (+1) by the caller,
//! including strings and booleans; release it once the native API has
//! consumed it. CF objects with no plist-compatible coercion (URLs, UUIDs,
//! keyed-archiver UIDs) fail with `UnsupportedType` instead of being
//! stringified.

use std::{
    collections::HashMap,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use core_foundation::{
    array::{
        CFArrayCreate, CFArrayGetCount, CFArrayGetTypeID, CFArrayGetValueAtIndex,
        kCFTypeArrayCallBacks,
    },
    base::{CFGetTypeID, CFRelease, CFRetain, CFTypeRef, TCFType, kCFAllocatorDefault},
    data::{CFDataCreate, CFDataGetBytePtr, CFDataGetLength, CFDataGetTypeID},
    date::{CFDateCreate, CFDateGetAbsoluteTime, CFDateGetTypeID},
    dictionary::{
        CFDictionaryCreate, CFDictionaryGetCount, CFDictionaryGetKeysAndValues,
        CFDictionaryGetTypeID, kCFTypeDictionaryKeyCallBacks, kCFTypeDictionaryValueCallBacks,
    },
    number::{
        CFBooleanGetTypeID, CFNumber, CFNumberCreate, CFNumberGetTypeID, CFNumberGetValue,
        kCFBooleanFalse, kCFBooleanTrue, kCFNumberDoubleType, kCFNumberSInt64Type,
    },
    string::{CFString, CFStringGetTypeID},
};

use crate::core::{error::DefaultsError, types::Value};

// CFAbsoluteTime counts seconds from Jan 1 2001, 978307200s after UNIX_EPOCH.
const APPLE_EPOCH_UNIX: f64 = 978_307_200.0;

fn absolute_to_system_time(abs: f64) -> SystemTime {
    let unix = abs + APPLE_EPOCH_UNIX;
    if unix >= 0.0 {
        UNIX_EPOCH + Duration::from_secs_f64(unix)
    } else {
        UNIX_EPOCH - Duration::from_secs_f64(-unix)
    }
}

fn system_time_to_absolute(t: SystemTime) -> f64 {
    match t.duration_since(UNIX_EPOCH) {
        Ok(d) => d.as_secs_f64() - APPLE_EPOCH_UNIX,
        Err(e) => -e.duration().as_secs_f64() - APPLE_EPOCH_UNIX,
    }
}

unsafe fn boolean_from_cf(r: CFTypeRef) -> Option<bool> {
    // CFBoolean has exactly two canonical instances; compare identity.
    let true_ref = unsafe { kCFBooleanTrue } as CFTypeRef;
    let false_ref = unsafe { kCFBooleanFalse } as CFTypeRef;
    if r == true_ref {
        Some(true)
    } else if r == false_ref {
        Some(false)
    } else {
        None
    }
}

unsafe fn number_from_cf(r: CFTypeRef) -> Option<Value> {
    use core_foundation_sys::number::{CFNumberIsFloatType, CFNumberType};
    let num = unsafe { CFNumber::wrap_under_get_rule(r as _) };

    // Integers may be stored at any width; the float flag is the reliable
    // discriminator, not the stored type.
    let is_float = unsafe { CFNumberIsFloatType(num.as_concrete_TypeRef()) } as i32 != 0;

    if !is_float {
        let mut val: i64 = 0;
        let ok = unsafe {
            CFNumberGetValue(
                num.as_concrete_TypeRef(),
                kCFNumberSInt64Type as CFNumberType,
                &mut val as *mut i64 as *mut _,
            )
        };
        if ok as i32 != 0 {
            return Some(Value::Integer(val));
        }
    }

    let mut val: f64 = 0.0;
    let ok = unsafe {
        CFNumberGetValue(
            num.as_concrete_TypeRef(),
            kCFNumberDoubleType as CFNumberType,
            &mut val as *mut f64 as *mut _,
        )
    };
    if ok as i32 != 0 {
        return Some(Value::Real(val));
    }
    None
}

unsafe fn array_from_cf(r: CFTypeRef) -> Result<Value, DefaultsError> {
    let len = unsafe { CFArrayGetCount(r as _) };
    let mut out = Vec::with_capacity(len as usize);
    for i in 0..len {
        let item = unsafe { CFArrayGetValueAtIndex(r as _, i) };
        if !item.is_null() {
            out.push(unsafe { from_cf(item as _) }?);
        }
    }
    Ok(Value::Array(out))
}

unsafe fn dictionary_from_cf(r: CFTypeRef) -> Result<Value, DefaultsError> {
    let count = unsafe { CFDictionaryGetCount(r as _) } as usize;
    if count == 0 {
        return Ok(Value::Dictionary(HashMap::new()));
    }

    let mut keys: Vec<CFTypeRef> = vec![std::ptr::null(); count];
    let mut vals: Vec<CFTypeRef> = vec![std::ptr::null(); count];
    unsafe {
        CFDictionaryGetKeysAndValues(
            r as _,
            keys.as_mut_ptr() as *mut _,
            vals.as_mut_ptr() as *mut _,
        );
    }

    let mut map = HashMap::with_capacity(count);
    for (kref, vref) in keys.into_iter().zip(vals) {
        // Non-string keys cannot appear in a plist dictionary; skip them.
        if kref.is_null() || unsafe { CFGetTypeID(kref as _) } != unsafe { CFStringGetTypeID() } {
            continue;
        }
        let key = unsafe { CFString::wrap_under_get_rule(kref as _) }.to_string();
        if !vref.is_null() {
            map.insert(key, unsafe { from_cf(vref) }?);
        }
    }
    Ok(Value::Dictionary(map))
}

/// Convert a borrowed CF object into a [`Value`].
pub(crate) unsafe fn from_cf(r: CFTypeRef) -> Result<Value, DefaultsError> {
    let tid = unsafe { CFGetTypeID(r) };

    if tid == unsafe { CFStringGetTypeID() } {
        let s = unsafe { CFString::wrap_under_get_rule(r as _) }.to_string();
        Ok(Value::String(s))
    } else if tid == unsafe { CFBooleanGetTypeID() } {
        unsafe { boolean_from_cf(r) }
            .map(Value::Boolean)
            .ok_or(DefaultsError::UnsupportedType("CFBoolean"))
    } else if tid == unsafe { CFNumberGetTypeID() } {
        unsafe { number_from_cf(r) }.ok_or(DefaultsError::UnsupportedType("CFNumber"))
    } else if tid == unsafe { CFDataGetTypeID() } {
        let len = unsafe { CFDataGetLength(r as _) } as usize;
        let ptr = unsafe { CFDataGetBytePtr(r as _) };
        let bytes = if len == 0 || ptr.is_null() {
            Vec::new()
        } else {
            unsafe { std::slice::from_raw_parts(ptr, len) }.to_vec()
        };
        Ok(Value::Data(bytes))
    } else if tid == unsafe { CFDateGetTypeID() } {
        let abs = unsafe { CFDateGetAbsoluteTime(r as _) };
        Ok(Value::Date(absolute_to_system_time(abs)))
    } else if tid == unsafe { CFArrayGetTypeID() } {
        unsafe { array_from_cf(r) }
    } else if tid == unsafe { CFDictionaryGetTypeID() } {
        unsafe { dictionary_from_cf(r) }
    } else {
        Err(DefaultsError::UnsupportedType("CoreFoundation"))
    }
}

/// Convert a [`Value`] into an owned (+1) CF object.
pub(crate) fn to_cf(value: &Value) -> CFTypeRef {
    match value {
        Value::String(s) => {
            let cs = CFString::new(s);
            let ptr = cs.as_concrete_TypeRef() as CFTypeRef;
            unsafe { CFRetain(ptr as *const _ as *mut _) };
            ptr
        }

        Value::Integer(i) => unsafe {
            CFNumberCreate(
                kCFAllocatorDefault,
                kCFNumberSInt64Type,
                i as *const i64 as *const _,
            ) as CFTypeRef
        },

        Value::Real(f) => unsafe {
            CFNumberCreate(
                kCFAllocatorDefault,
                kCFNumberDoubleType,
                f as *const f64 as *const _,
            ) as CFTypeRef
        },

        Value::Boolean(b) => unsafe {
            let ptr = (if *b { kCFBooleanTrue } else { kCFBooleanFalse }) as CFTypeRef;
            CFRetain(ptr as *const _ as *mut _);
            ptr
        },

        Value::Data(bytes) => unsafe {
            CFDataCreate(kCFAllocatorDefault, bytes.as_ptr(), bytes.len() as isize) as CFTypeRef
        },

        Value::Date(t) => unsafe {
            CFDateCreate(kCFAllocatorDefault, system_time_to_absolute(*t)) as CFTypeRef
        },

        Value::Array(items) => unsafe {
            let cf_items: Vec<CFTypeRef> = items.iter().map(to_cf).collect();
            let arr = CFArrayCreate(
                kCFAllocatorDefault,
                cf_items.as_ptr() as *const _,
                cf_items.len() as isize,
                &kCFTypeArrayCallBacks,
            ) as CFTypeRef;

            for &item in &cf_items {
                CFRelease(item as *const _ as *mut _);
            }
            arr
        },

        Value::Dictionary(map) => unsafe {
            let keys: Vec<CFTypeRef> = map
                .keys()
                .map(|k| {
                    let cs = CFString::new(k);
                    let ptr = cs.as_concrete_TypeRef() as CFTypeRef;
                    CFRetain(ptr as *const _ as *mut _);
                    ptr
                })
                .collect();
            let values: Vec<CFTypeRef> = map.values().map(to_cf).collect();

            let dict = CFDictionaryCreate(
                kCFAllocatorDefault,
                keys.as_ptr() as *const _,
                values.as_ptr() as *const _,
                keys.len() as isize,
                &kCFTypeDictionaryKeyCallBacks,
                &kCFTypeDictionaryValueCallBacks,
            ) as CFTypeRef;

            for &k in &keys {
                CFRelease(k as *const _ as *mut _);
            }
            for &v in &values {
                CFRelease(v as *const _ as *mut _);
            }
            dict
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apple_epoch_round_trip() {
        let now = UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        let abs = system_time_to_absolute(now);
        assert_eq!(absolute_to_system_time(abs), now);
    }

    #[test]
    fn apple_epoch_is_2001() {
        // CFAbsoluteTime zero is Jan 1 2001 00:00:00 UTC.
        let t = absolute_to_system_time(0.0);
        let unix = t.duration_since(UNIX_EPOCH).map(|d| d.as_secs()).ok();
        assert_eq!(unix, Some(978_307_200));
    }
}
