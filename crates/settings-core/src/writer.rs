//! Tree writer: renders a settings tree as JSON with sorted keys.
//!
//! Output is deterministic. Map keys are emitted in ascending byte order,
//! sorted per map as it is visited, so two trees with the same content
//! serialize identically no matter what order their keys were inserted in.
//! Lists keep their stored element order. Integers are written as bare
//! literals and strings are escaped only as JSON requires. Nesting depth is
//! unbounded; deep trees grow the stack on the heap while they are written.
//!
//! # Example
//! ```
//! use settings_core::writer::{value_to_string, Format};
//! use settings_core::{SettingMap, SettingValue};
//!
//! let mut map = SettingMap::new();
//! map.insert("zoom".to_string(), SettingValue::Int(100));
//! map.insert("theme".to_string(), SettingValue::from("dark"));
//!
//! let json = value_to_string(&SettingValue::Map(map), Format::Compact).unwrap();
//! assert_eq!(json, r#"{"theme":"dark","zoom":100}"#);
//! ```

use crate::error::Result;
use crate::value::{SettingMap, SettingValue};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::ser::PrettyFormatter;
use std::io::Write;

/// Layout of the emitted document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// One member per line, four-space indentation.
    #[default]
    Pretty,
    /// No insignificant whitespace.
    Compact,
}

const PRETTY_INDENT: &[u8] = b"    ";

/// Write a map as the root object of a document, then flush the sink.
pub fn write_map<W: Write>(map: &SettingMap, sink: W, format: Format) -> Result<()> {
    write_serialized(&SortedMap(map), sink, format)
}

/// Write any value as a standalone document, then flush the sink.
pub fn write_value<W: Write>(value: &SettingValue, sink: W, format: Format) -> Result<()> {
    write_serialized(value, sink, format)
}

/// Render a map as a root object into a `String`.
pub fn map_to_string(map: &SettingMap, format: Format) -> Result<String> {
    let mut buf = Vec::new();
    write_map(map, &mut buf, format)?;
    into_utf8(buf)
}

/// Render a single value into a `String`.
pub fn value_to_string(value: &SettingValue, format: Format) -> Result<String> {
    let mut buf = Vec::new();
    write_value(value, &mut buf, format)?;
    into_utf8(buf)
}

fn write_serialized<T, W>(value: &T, sink: W, format: Format) -> Result<()>
where
    T: Serialize + ?Sized,
    W: Write,
{
    let mut sink = match format {
        Format::Pretty => {
            let formatter = PrettyFormatter::with_indent(PRETTY_INDENT);
            let mut ser = serde_json::Serializer::with_formatter(sink, formatter);
            value.serialize(serde_stacker::Serializer::new(&mut ser))?;
            ser.into_inner()
        }
        Format::Compact => {
            let mut ser = serde_json::Serializer::new(sink);
            value.serialize(serde_stacker::Serializer::new(&mut ser))?;
            ser.into_inner()
        }
    };
    sink.flush()?;
    Ok(())
}

fn into_utf8(buf: Vec<u8>) -> Result<String> {
    Ok(String::from_utf8(buf)?)
}

impl Serialize for SettingValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            SettingValue::Int(n) => serializer.serialize_i64(*n),
            SettingValue::UInt(n) => serializer.serialize_u64(*n),
            SettingValue::String(s) => serializer.serialize_str(s),
            SettingValue::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            SettingValue::Map(map) => SortedMap(map).serialize(serializer),
        }
    }
}

/// Serializes a map's entries in ascending key order.
struct SortedMap<'a>(&'a SettingMap);

impl Serialize for SortedMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut entries: Vec<(&String, &SettingValue)> = self.0.iter().collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));

        let mut out = serializer.serialize_map(Some(entries.len()))?;
        for (key, value) in entries {
            out.serialize_entry(key, value)?;
        }
        out.end()
    }
}
