// SPDX-License-Identifier: MIT

//! Backend capability interface and one-shot selection.
//!
//! A backend is anything that can serve the mapping operations of a store.
//! Selection happens once, at store construction: path domains always get
//! the file backend; otherwise the native binding is probed and the file
//! backend is the fallback. There is no runtime re-probing.

use std::collections::HashMap;

use crate::core::{
    error::DefaultsError,
    types::{Domain, Value},
};

use super::file::FileBackend;
#[cfg(target_os = "macos")]
use super::native::NativeBackend;

/// Which backend a store ended up with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// The platform preference API (CFPreferences).
    Native,
    /// Direct plist file access.
    File,
}

/// Capability interface both backends implement.
///
/// `get` returns `Ok(None)` for an absent key; mapping `None` to
/// `KeyNotFound` is the facade's job. `remove` of an absent key succeeds.
pub(crate) trait PreferenceBackend {
    fn kind(&self) -> BackendKind;
    fn get(&self, key: &str) -> Result<Option<Value>, DefaultsError>;
    fn set(&mut self, key: &str, value: Value) -> Result<(), DefaultsError>;
    fn remove(&mut self, key: &str) -> Result<(), DefaultsError>;
    fn contains(&self, key: &str) -> bool;
    fn keys(&self) -> Result<Vec<String>, DefaultsError>;
    fn dictionary(&self) -> Result<HashMap<String, Value>, DefaultsError>;
    fn synchronize(&mut self) -> Result<(), DefaultsError>;
}

/// Pick the backend for a domain. Decided once per store instance.
pub(crate) fn select(domain: &Domain) -> Result<Box<dyn PreferenceBackend>, DefaultsError> {
    if matches!(domain, Domain::Path(_)) {
        return Ok(Box::new(FileBackend::open(domain.path())?));
    }

    #[cfg(target_os = "macos")]
    if let Some(native) = NativeBackend::probe(domain) {
        return Ok(Box::new(native));
    }

    Ok(Box::new(FileBackend::open(domain.path())?))
}
