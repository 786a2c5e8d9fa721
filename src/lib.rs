// SPDX-License-Identifier: MIT

//! Dictionary-style interface to a user's defaults.
//!
//! One facade, [`UserDefaults`], over two interchangeable backends: the
//! platform preference API (CFPreferences, on macOS) and a direct plist file
//! fallback for everywhere the native binding is unavailable. The backend is
//! probed once at construction; afterwards the store behaves like a mapping
//! of string keys to plist-representable [`Value`]s.
//!
//! ```no_run
//! use std::path::PathBuf;
//! use userdefaults::{Domain, UserDefaults};
//!
//! # fn main() -> Result<(), userdefaults::DefaultsError> {
//! let domain = Domain::Path(PathBuf::from("/tmp/com.example.app.plist"));
//! UserDefaults::scoped(domain, |store| {
//!     store.set("launch-count", 5)?;
//!     store.set("greeting", "hello")?;
//!     Ok(())
//! })?; // synced on exit, error or not
//! # Ok(())
//! # }
//! ```

mod core;
mod defaults;

pub use crate::core::error::DefaultsError;
pub use crate::core::types::{Domain, Value};
pub use defaults::{BackendKind, UserDefaults};
