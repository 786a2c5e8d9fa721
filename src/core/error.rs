// SPDX-License-Identifier: MIT

//! Error type for defaults access.

use std::fmt;

/// Errors that can occur when interacting with a defaults store.
#[derive(Debug)]
pub enum DefaultsError {
    /// Underlying file I/O failed.
    Io(std::io::Error),
    /// The backing plist could not be parsed or serialized.
    Plist(plist::Error),
    /// Lookup of an absent key. Never raised by containment checks or deletion.
    KeyNotFound(String),
    /// A foreign representation with no plist-compatible coercion.
    UnsupportedType(&'static str),
    /// The native preference API reported a failure.
    Backend(String),
}

impl fmt::Display for DefaultsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultsError::Io(e) => write!(f, "IO error: {e}"),
            DefaultsError::Plist(e) => write!(f, "plist error: {e}"),
            DefaultsError::KeyNotFound(key) => write!(f, "key not found: {key}"),
            DefaultsError::UnsupportedType(ty) => {
                write!(f, "no plist-compatible coercion for {ty} value")
            }
            DefaultsError::Backend(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for DefaultsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DefaultsError::Io(e) => Some(e),
            DefaultsError::Plist(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DefaultsError {
    fn from(e: std::io::Error) -> Self {
        DefaultsError::Io(e)
    }
}

impl From<plist::Error> for DefaultsError {
    fn from(e: plist::Error) -> Self {
        DefaultsError::Plist(e)
    }
}
