// SPDX-License-Identifier: MIT

//! Domains and the plist-compatible value representation.
//!
//! Every value a store can hold is a [`Value`]; everything a store can point
//! at is a [`Domain`]. Host types coerce into [`Value`] through `From` impls,
//! so `store.set("count", 5)` works without naming the enum.

use std::{collections::HashMap, path::PathBuf, time::SystemTime};

/// Preference domain a store is bound to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Domain {
    /// An application or suite domain in reverse-DNS form, e.g. "com.example.app".
    User(String),
    /// The global preferences domain (".GlobalPreferences").
    Global,
    /// A direct path to a plist file. Always served by the file backend.
    Path(PathBuf),
}

impl Domain {
    /// Filesystem location of the backing plist for this domain.
    pub fn path(&self) -> PathBuf {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        match self {
            Domain::Global => home.join("Library/Preferences/.GlobalPreferences.plist"),
            Domain::User(name) => home.join(format!("Library/Preferences/{name}.plist")),
            Domain::Path(path) => path.clone(),
        }
    }

    /// Name understood by the native preference API, if the domain has one.
    #[cfg(target_os = "macos")]
    pub(crate) fn native_name(&self) -> Option<String> {
        match self {
            Domain::Global => Some(String::from(".GlobalPreferences")),
            Domain::User(name) => Some(name.clone()),
            Domain::Path(_) => None,
        }
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Domain::User(s) => write!(f, "{s}"),
            Domain::Global => write!(f, "NSGlobalDomain"),
            Domain::Path(p) => write!(f, "{}", p.display()),
        }
    }
}

/// A value representable in a property list.
///
/// This is the exchange type between the host program and either backend.
/// Integer subtypes collapse to `i64` and both float widths to `f64`; a
/// round-trip preserves the value, not the original host type.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Boolean(bool),
    Integer(i64),
    Real(f64),
    String(String),
    Data(Vec<u8>),
    Date(SystemTime),
    Array(Vec<Value>),
    Dictionary(HashMap<String, Value>),
}

impl Value {
    /// Name of the contained type, as used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Real(_) => "real",
            Value::String(_) => "string",
            Value::Data(_) => "data",
            Value::Date(_) => "date",
            Value::Array(_) => "array",
            Value::Dictionary(_) => "dictionary",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric view; integers widen to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Real(f) => Some(*f),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_data(&self) -> Option<&[u8]> {
        match self {
            Value::Data(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<SystemTime> {
        match self {
            Value::Date(t) => Some(*t),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_dictionary(&self) -> Option<&HashMap<String, Value>> {
        match self {
            Value::Dictionary(d) => Some(d),
            _ => None,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Real(fl) => write!(f, "{fl}"),
            Value::String(s) => write!(f, "{s}"),
            Value::Data(data) => write!(f, "<data: {} bytes>", data.len()),
            Value::Date(t) => write!(f, "<date: {t:?}>"),
            Value::Array(arr) => {
                write!(
                    f,
                    "[{}]",
                    arr.iter()
                        .map(|v| v.to_string())
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            }
            Value::Dictionary(dict) => {
                write!(
                    f,
                    "{{{}}}",
                    dict.iter()
                        .map(|(k, v)| format!("{k}: {v}"))
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Integer(i64::from(i))
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Integer(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Real(f)
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::Real(f64::from(f))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<u8>> for Value {
    fn from(d: Vec<u8>) -> Self {
        Value::Data(d)
    }
}

impl From<SystemTime> for Value {
    fn from(t: SystemTime) -> Self {
        Value::Date(t)
    }
}

impl From<Vec<Value>> for Value {
    fn from(a: Vec<Value>) -> Self {
        Value::Array(a)
    }
}

impl From<HashMap<String, Value>> for Value {
    fn from(d: HashMap<String, Value>) -> Self {
        Value::Dictionary(d)
    }
}
