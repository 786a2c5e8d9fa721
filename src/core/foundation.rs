// SPDX-License-Identifier: MIT

//! Raw CFPreferences glue.
//!
//! Thin wrappers over the CFPreferences application-value API:
//! single key read, key listing, write, delete (a null set), and
//! synchronize. All conversion goes through [`crate::core::convert`];
//! nothing here is exported outside the crate.

use anyhow::{Result, bail};
use std::collections::HashMap;

use core_foundation::{
    base::{CFRelease, TCFType},
    string::CFString,
};

use core_foundation_sys::{
    array::{CFArrayGetCount, CFArrayGetValueAtIndex},
    base::CFGetTypeID,
    preferences::{
        CFPreferencesAppSynchronize, CFPreferencesCopyAppValue, CFPreferencesCopyKeyList,
        CFPreferencesSetAppValue, kCFPreferencesAnyHost, kCFPreferencesCurrentUser,
    },
    string::CFStringGetTypeID,
};

use crate::core::{convert, types::Value};

/// Whether the native preference API is usable for this domain.
///
/// A synchronize round-trip is the cheapest end-to-end check: it exercises
/// the same code path every subsequent write will take.
pub(crate) fn probe(domain: &str) -> bool {
    synchronize(domain).is_ok()
}

/// Flush pending writes for the domain.
pub(crate) fn synchronize(domain: &str) -> Result<()> {
    unsafe {
        let domain_cf = CFString::new(domain);
        if CFPreferencesAppSynchronize(domain_cf.as_concrete_TypeRef()) != 0 {
            Ok(())
        } else {
            bail!("CFPreferences synchronize failed for domain {domain}")
        }
    }
}

/// Read a single key. `Ok(None)` when the key is absent.
pub(crate) fn copy_value(domain: &str, key: &str) -> Result<Option<Value>> {
    unsafe {
        let domain_cf = CFString::new(domain);
        let key_cf = CFString::new(key);
        let raw = CFPreferencesCopyAppValue(
            key_cf.as_concrete_TypeRef(),
            domain_cf.as_concrete_TypeRef(),
        );
        if raw.is_null() {
            return Ok(None);
        }
        // Copy rule: we own `raw` and must release it after converting.
        let value = convert::from_cf(raw as _);
        CFRelease(raw as *const _ as *mut _);
        Ok(Some(value?))
    }
}

/// List all keys present in the domain for CurrentUser / AnyHost.
pub(crate) fn key_list(domain: &str) -> Result<Vec<String>> {
    unsafe {
        let domain_cf = CFString::new(domain);
        let keys_ref = CFPreferencesCopyKeyList(
            domain_cf.as_concrete_TypeRef(),
            kCFPreferencesCurrentUser,
            kCFPreferencesAnyHost,
        );
        if keys_ref.is_null() {
            return Ok(Vec::new());
        }
        let len = CFArrayGetCount(keys_ref);
        let mut out = Vec::with_capacity(len as usize);
        for i in 0..len {
            let item = CFArrayGetValueAtIndex(keys_ref, i);
            if !item.is_null() && CFGetTypeID(item as _) == CFStringGetTypeID() {
                out.push(CFString::wrap_under_get_rule(item as _).to_string());
            }
        }
        CFRelease(keys_ref as *const _ as *mut _);
        out.sort();
        Ok(out)
    }
}

/// Read the whole domain as a key-value map.
pub(crate) fn copy_all(domain: &str) -> Result<HashMap<String, Value>> {
    let mut map = HashMap::new();
    for key in key_list(domain)? {
        if let Some(value) = copy_value(domain, &key)? {
            map.insert(key, value);
        }
    }
    Ok(map)
}

/// Write a single key and synchronize.
pub(crate) fn set_value(domain: &str, key: &str, value: &Value) -> Result<()> {
    unsafe {
        let domain_cf = CFString::new(domain);
        let key_cf = CFString::new(key);
        let value_ref = convert::to_cf(value);
        CFPreferencesSetAppValue(
            key_cf.as_concrete_TypeRef(),
            value_ref,
            domain_cf.as_concrete_TypeRef(),
        );
        // SetAppValue retains the value; drop our +1 from to_cf.
        CFRelease(value_ref as *const _ as *mut _);
    }
    synchronize(domain)
}

/// Remove a single key and synchronize. Succeeds if the key was absent.
pub(crate) fn remove_value(domain: &str, key: &str) -> Result<()> {
    unsafe {
        let domain_cf = CFString::new(domain);
        let key_cf = CFString::new(key);
        CFPreferencesSetAppValue(
            key_cf.as_concrete_TypeRef(),
            std::ptr::null(),
            domain_cf.as_concrete_TypeRef(),
        );
    }
    synchronize(domain)
}
