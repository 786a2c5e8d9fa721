// SPDX-License-Identifier: MIT

//! Shared primitives: domains, values, errors, and the CoreFoundation glue.

pub mod error;
pub mod types;

#[cfg(target_os = "macos")]
pub(crate) mod convert;
#[cfg(target_os = "macos")]
pub(crate) mod foundation;
