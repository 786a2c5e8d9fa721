// SPDX-License-Identifier: MIT

//! Codec between [`Value`] and the `plist` crate's value tree.
//!
//! `to_plist` is total: every [`Value`] has a plist form. `from_plist` is
//! not: keyed-archiver UIDs and any representation this crate does not model
//! fail with `UnsupportedType` rather than being stringified.

use std::{collections::HashMap, time::SystemTime};

use plist::Value as PlistValue;

use crate::core::{error::DefaultsError, types::Value};

pub(crate) fn from_plist(val: &PlistValue) -> Result<Value, DefaultsError> {
    let val = match val {
        PlistValue::Boolean(b) => Value::Boolean(*b),
        PlistValue::Integer(i) => Value::Integer(
            i.as_signed()
                .ok_or(DefaultsError::UnsupportedType("out-of-range integer"))?,
        ),
        PlistValue::Real(f) => Value::Real(*f),
        PlistValue::String(s) => Value::String(s.clone()),
        PlistValue::Data(bytes) => Value::Data(bytes.clone()),
        PlistValue::Date(date) => Value::Date(SystemTime::from(*date)),
        PlistValue::Array(arr) => {
            let mut out = Vec::with_capacity(arr.len());
            for item in arr {
                out.push(from_plist(item)?);
            }
            Value::Array(out)
        }
        PlistValue::Dictionary(dict) => {
            let mut out = HashMap::with_capacity(dict.len());
            for (k, v) in dict {
                out.insert(k.clone(), from_plist(v)?);
            }
            Value::Dictionary(out)
        }
        PlistValue::Uid(_) => return Err(DefaultsError::UnsupportedType("uid")),
        _ => return Err(DefaultsError::UnsupportedType("plist")),
    };
    Ok(val)
}

pub(crate) fn to_plist(val: &Value) -> PlistValue {
    match val {
        Value::Boolean(b) => PlistValue::Boolean(*b),
        Value::Integer(i) => PlistValue::Integer((*i).into()),
        Value::Real(f) => PlistValue::Real(*f),
        Value::String(s) => PlistValue::String(s.clone()),
        Value::Data(bytes) => PlistValue::Data(bytes.clone()),
        Value::Date(t) => PlistValue::Date(plist::Date::from(*t)),
        Value::Array(arr) => PlistValue::Array(arr.iter().map(to_plist).collect()),
        Value::Dictionary(dict) => PlistValue::Dictionary(
            dict.iter().map(|(k, v)| (k.clone(), to_plist(v))).collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use std::time::{Duration, UNIX_EPOCH};

    #[test]
    fn scalars_round_trip() {
        let values = [
            Value::Boolean(true),
            Value::Integer(-42),
            Value::Real(2.75),
            Value::String("hello".into()),
            Value::Data(vec![0, 1, 2, 255]),
        ];
        for v in values {
            assert_eq!(from_plist(&to_plist(&v)).unwrap(), v);
        }
    }

    #[test]
    fn nested_structures_round_trip() {
        let mut dict = HashMap::new();
        dict.insert("flag".to_string(), Value::Boolean(false));
        dict.insert(
            "items".to_string(),
            Value::Array(vec![Value::Integer(1), Value::String("two".into())]),
        );
        let v = Value::Dictionary(dict);
        assert_eq!(from_plist(&to_plist(&v)).unwrap(), v);
    }

    #[test]
    fn dates_round_trip() {
        let t = UNIX_EPOCH + Duration::from_secs(1_600_000_000);
        let v = Value::Date(t);
        assert_eq!(from_plist(&to_plist(&v)).unwrap(), v);
    }

    #[test]
    fn uid_has_no_coercion() {
        let uid = PlistValue::Uid(plist::Uid::new(7));
        assert!(matches!(
            from_plist(&uid),
            Err(DefaultsError::UnsupportedType("uid"))
        ));
    }
}
