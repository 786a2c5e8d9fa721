// SPDX-License-Identifier: MIT

//! File-based backend: direct plist access.
//!
//! The whole plist is loaded into memory at construction and is the current
//! truth until [`FileBackend::synchronize`] serializes it back. A missing
//! file yields an empty mapping. No locking is performed; concurrent
//! external writers race with last-writer-wins semantics.

use std::{
    collections::HashMap,
    fs,
    io::Cursor,
    path::PathBuf,
};

use plist::Value as PlistValue;

use crate::core::{error::DefaultsError, types::Value};

use super::{
    backend::{BackendKind, PreferenceBackend},
    convert::{from_plist, to_plist},
};

/// Magic prefix of a binary plist.
const BPLIST_MAGIC: &[u8] = b"bplist";

pub(crate) struct FileBackend {
    path: PathBuf,
    entries: HashMap<String, Value>,
    /// Serialize back in the format the file was found in; new files are
    /// written binary, matching what the platform itself writes.
    binary: bool,
}

impl FileBackend {
    /// Load the plist at `path`, or start empty if there is none.
    pub(crate) fn open(path: PathBuf) -> Result<Self, DefaultsError> {
        let (entries, binary) = match fs::read(&path) {
            Ok(bytes) => {
                let binary = bytes.starts_with(BPLIST_MAGIC);
                let root = PlistValue::from_reader(Cursor::new(&bytes))?;
                let dict = match root {
                    PlistValue::Dictionary(dict) => dict,
                    other => {
                        return Err(DefaultsError::Backend(format!(
                            "plist root must be a dictionary, found {} in {}",
                            plist_kind(&other),
                            path.display(),
                        )));
                    }
                };
                let mut entries = HashMap::with_capacity(dict.len());
                for (key, value) in &dict {
                    entries.insert(key.clone(), from_plist(value)?);
                }
                (entries, binary)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => (HashMap::new(), true),
            Err(e) => return Err(DefaultsError::Io(e)),
        };

        Ok(FileBackend {
            path,
            entries,
            binary,
        })
    }

    /// Serialize the mapping and atomically replace the backing file.
    fn save(&self) -> Result<(), DefaultsError> {
        // Sorted keys keep the output stable across syncs and processes.
        let mut keys: Vec<&String> = self.entries.keys().collect();
        keys.sort();

        let mut dict = plist::Dictionary::new();
        for key in keys {
            if let Some(value) = self.entries.get(key) {
                dict.insert(key.clone(), to_plist(value));
            }
        }
        let root = PlistValue::Dictionary(dict);

        let mut buf = Vec::new();
        if self.binary {
            root.to_writer_binary(&mut buf)?;
        } else {
            root.to_writer_xml(&mut buf)?;
        }

        // Write a sibling temp file, then rename over the original.
        let file_name = self.path.file_name().ok_or_else(|| {
            DefaultsError::Backend(format!("invalid plist path: {}", self.path.display()))
        })?;
        let dir = self.path.parent().ok_or_else(|| {
            DefaultsError::Backend(format!("invalid plist path: {}", self.path.display()))
        })?;
        let tmp_path = dir.join(format!("{}.tmp", file_name.to_string_lossy()));

        fs::write(&tmp_path, &buf)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

fn plist_kind(val: &PlistValue) -> &'static str {
    match val {
        PlistValue::Boolean(_) => "boolean",
        PlistValue::Integer(_) => "integer",
        PlistValue::Real(_) => "real",
        PlistValue::String(_) => "string",
        PlistValue::Data(_) => "data",
        PlistValue::Date(_) => "date",
        PlistValue::Array(_) => "array",
        PlistValue::Dictionary(_) => "dictionary",
        _ => "unknown value",
    }
}

impl PreferenceBackend for FileBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::File
    }

    fn get(&self, key: &str) -> Result<Option<Value>, DefaultsError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), DefaultsError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), DefaultsError> {
        self.entries.remove(key);
        Ok(())
    }

    fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    fn keys(&self) -> Result<Vec<String>, DefaultsError> {
        let mut keys: Vec<String> = self.entries.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }

    fn dictionary(&self) -> Result<HashMap<String, Value>, DefaultsError> {
        Ok(self.entries.clone())
    }

    fn synchronize(&mut self) -> Result<(), DefaultsError> {
        self.save()
    }
}
