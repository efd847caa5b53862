//! Tree reader: parses a JSON document back into a settings tree.
//!
//! JSON does not record whether an integer was signed, so any integer that
//! fits in `i64` becomes [`SettingValue::Int`]; only larger non-negative
//! integers become [`SettingValue::UInt`]. Booleans, floats and `null` have
//! no setting kind and are rejected.
//!
//! There is no nesting limit: `set` accepts keys of any depth, so anything
//! the writer produces must load again. Deep documents grow the stack on the
//! heap instead of overflowing it.

use crate::error::{Result, SettingsError};
use crate::value::{dismantle, SettingList, SettingMap, SettingValue};
use serde::de::{Deserialize, Deserializer, Error, MapAccess, SeqAccess, Visitor};
use std::fmt;
use std::io::Read;

/// Read a document whose root must be an object.
pub fn read_map<R: Read>(reader: R) -> Result<SettingMap> {
    into_root(read_document(serde_json::Deserializer::from_reader(reader))?)
}

/// Parse a document string whose root must be an object.
pub fn parse_map(text: &str) -> Result<SettingMap> {
    into_root(read_document(serde_json::Deserializer::from_str(text))?)
}

/// Parse any single value, e.g. `[1,"two"]` or `42`.
pub fn parse_value(text: &str) -> Result<SettingValue> {
    read_document(serde_json::Deserializer::from_str(text))
}

/// Deserialize one value without serde_json's depth limit, then reject
/// trailing input.
fn read_document<'de, R>(mut de: serde_json::Deserializer<R>) -> Result<SettingValue>
where
    R: serde_json::de::Read<'de>,
{
    de.disable_recursion_limit();
    let value = SettingValue::deserialize(serde_stacker::Deserializer::new(&mut de))?;
    de.end()?;
    Ok(value)
}

fn into_root(value: SettingValue) -> Result<SettingMap> {
    match value {
        SettingValue::Map(map) => Ok(map),
        SettingValue::Int(_)
        | SettingValue::UInt(_)
        | SettingValue::String(_)
        | SettingValue::List(_) => {
            let found = value.kind();
            dismantle(vec![value]);
            Err(SettingsError::InvalidRoot { found })
        }
    }
}

impl<'de> Deserialize<'de> for SettingValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(SettingValueVisitor)
    }
}

struct SettingValueVisitor;

impl<'de> Visitor<'de> for SettingValueVisitor {
    type Value = SettingValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a setting value (integer, string, list or map)")
    }

    fn visit_i64<E: Error>(self, n: i64) -> std::result::Result<SettingValue, E> {
        Ok(SettingValue::Int(n))
    }

    fn visit_u64<E: Error>(self, n: u64) -> std::result::Result<SettingValue, E> {
        Ok(match i64::try_from(n) {
            Ok(n) => SettingValue::Int(n),
            Err(_) => SettingValue::UInt(n),
        })
    }

    fn visit_str<E: Error>(self, s: &str) -> std::result::Result<SettingValue, E> {
        Ok(SettingValue::String(s.to_string()))
    }

    fn visit_string<E: Error>(self, s: String) -> std::result::Result<SettingValue, E> {
        Ok(SettingValue::String(s))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<SettingValue, A::Error> {
        let mut items = SettingList::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(SettingValue::List(items))
    }

    // Duplicate keys: the last occurrence wins.
    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<SettingValue, A::Error> {
        let mut map = SettingMap::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry::<String, SettingValue>()? {
            map.insert(key, value);
        }
        Ok(SettingValue::Map(map))
    }
}
