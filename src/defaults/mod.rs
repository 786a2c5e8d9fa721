// SPDX-License-Identifier: MIT

//! The `UserDefaults` facade.
//!
//! A store binds one [`Domain`] to one backend, chosen at construction:
//! the platform preference API where it is usable, a direct plist file
//! otherwise. The mapping surface (get / set / remove / contains) delegates
//! to the backend after value coercion; `sync` flushes the file backend and
//! is a no-op on the native one.

mod backend;
mod bundle;
mod convert;
mod file;
#[cfg(target_os = "macos")]
mod native;

use std::collections::HashMap;

use crate::core::{
    error::DefaultsError,
    types::{Domain, Value},
};

pub use backend::BackendKind;

/// Dictionary-style handle on a preference domain.
///
/// # Examples
///
/// ```no_run
/// use userdefaults::UserDefaults;
///
/// # fn main() -> Result<(), userdefaults::DefaultsError> {
/// let mut store = UserDefaults::with_suite("com.example.app")?;
/// store.set("count", 5)?;
/// assert_eq!(store.get("count")?.as_i64(), Some(5));
/// store.remove("count")?;
/// assert!(!store.contains("count"));
/// store.sync()?;
/// # Ok(())
/// # }
/// ```
pub struct UserDefaults {
    domain: Domain,
    backend: Box<dyn backend::PreferenceBackend>,
}

impl UserDefaults {
    /// Store for the current application's own bundle identifier.
    ///
    /// Fails when no identifier can be detected (no `Info.plist` beside the
    /// executable and no usable `XPC_SERVICE_NAME`).
    pub fn standard() -> Result<Self, DefaultsError> {
        let id = bundle::bundle_id().ok_or_else(|| {
            DefaultsError::Backend("cannot determine a bundle identifier for this process".into())
        })?;
        Self::open(Domain::User(id))
    }

    /// Store for an explicit suite / application domain.
    pub fn with_suite(name: &str) -> Result<Self, DefaultsError> {
        Self::open(Domain::User(name.to_string()))
    }

    /// Store for any domain, including a direct plist path.
    pub fn open(domain: Domain) -> Result<Self, DefaultsError> {
        let backend = backend::select(&domain)?;
        Ok(UserDefaults { domain, backend })
    }

    /// The domain this store is bound to.
    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    /// Which backend was selected at construction.
    pub fn backend(&self) -> BackendKind {
        self.backend.kind()
    }

    /// Value for `key`. Fails with `KeyNotFound` when absent.
    pub fn get(&self, key: &str) -> Result<Value, DefaultsError> {
        self.backend
            .get(key)?
            .ok_or_else(|| DefaultsError::KeyNotFound(key.to_string()))
    }

    /// Write `value` under `key`, coercing through [`Value`].
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> Result<(), DefaultsError> {
        self.backend.set(key, value.into())
    }

    /// Delete `key`. Succeeds whether or not the key was present.
    pub fn remove(&mut self, key: &str) -> Result<(), DefaultsError> {
        self.backend.remove(key)
    }

    /// Whether `key` is present. Never fails.
    pub fn contains(&self, key: &str) -> bool {
        self.backend.contains(key)
    }

    /// All keys in the domain, sorted.
    pub fn keys(&self) -> Result<Vec<String>, DefaultsError> {
        self.backend.keys()
    }

    /// Number of entries in the domain.
    pub fn len(&self) -> Result<usize, DefaultsError> {
        self.keys().map(|keys| keys.len())
    }

    pub fn is_empty(&self) -> Result<bool, DefaultsError> {
        self.len().map(|n| n == 0)
    }

    /// Snapshot of the whole domain as a map.
    pub fn dictionary(&self) -> Result<HashMap<String, Value>, DefaultsError> {
        self.backend.dictionary()
    }

    /// Flush pending state.
    ///
    /// File backend: serialize the in-memory mapping to the backing file,
    /// overwriting it. Native backend: no-op, because every write already
    /// synchronized.
    pub fn sync(&mut self) -> Result<(), DefaultsError> {
        self.backend.synchronize()
    }

    /// Run `f` with a store for `domain`, syncing on every exit path.
    ///
    /// The final `sync` runs whether `f` succeeds or fails, so mutations made
    /// before a failure are still persisted. If `f` fails, its error is
    /// returned and the sync outcome is discarded; if `f` succeeds, a sync
    /// failure is reported.
    pub fn scoped<T>(
        domain: Domain,
        f: impl FnOnce(&mut UserDefaults) -> Result<T, DefaultsError>,
    ) -> Result<T, DefaultsError> {
        let mut store = Self::open(domain)?;
        let result = f(&mut store);
        let flushed = store.sync();
        match result {
            Ok(value) => flushed.map(|()| value),
            Err(e) => {
                let _ = flushed;
                Err(e)
            }
        }
    }
}
