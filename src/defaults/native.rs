// SPDX-License-Identifier: MIT

//! Native backend: the CFPreferences binding.
//!
//! Holds nothing but the domain name; every read queries the platform store
//! and every write goes through a set-and-synchronize in
//! [`crate::core::foundation`], so the native store is authoritative
//! immediately. `synchronize` here is a no-op for the same reason.

use std::collections::HashMap;

use crate::core::{
    error::DefaultsError,
    foundation,
    types::{Domain, Value},
};

use super::backend::{BackendKind, PreferenceBackend};

pub(crate) struct NativeBackend {
    name: String,
}

impl NativeBackend {
    /// Probe the native binding for this domain. `None` means the caller
    /// should fall back to the file backend.
    pub(crate) fn probe(domain: &Domain) -> Option<Self> {
        let name = domain.native_name()?;
        if foundation::probe(&name) {
            Some(NativeBackend { name })
        } else {
            None
        }
    }
}

/// Unwrap a `DefaultsError` carried through the glue layer, or wrap the
/// platform failure message.
fn map_err(e: anyhow::Error) -> DefaultsError {
    match e.downcast::<DefaultsError>() {
        Ok(inner) => inner,
        Err(other) => DefaultsError::Backend(other.to_string()),
    }
}

impl PreferenceBackend for NativeBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Native
    }

    fn get(&self, key: &str) -> Result<Option<Value>, DefaultsError> {
        foundation::copy_value(&self.name, key).map_err(map_err)
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), DefaultsError> {
        foundation::set_value(&self.name, key, &value).map_err(map_err)
    }

    fn remove(&mut self, key: &str) -> Result<(), DefaultsError> {
        foundation::remove_value(&self.name, key).map_err(map_err)
    }

    fn contains(&self, key: &str) -> bool {
        matches!(foundation::copy_value(&self.name, key), Ok(Some(_)))
    }

    fn keys(&self) -> Result<Vec<String>, DefaultsError> {
        foundation::key_list(&self.name).map_err(map_err)
    }

    fn dictionary(&self) -> Result<HashMap<String, Value>, DefaultsError> {
        foundation::copy_all(&self.name).map_err(map_err)
    }

    fn synchronize(&mut self) -> Result<(), DefaultsError> {
        // Each write already synchronized; the store is authoritative.
        Ok(())
    }
}
