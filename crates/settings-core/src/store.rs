//! The settings store: a single root map addressed by slash-delimited keys.
//!
//! `set` walks the key's components from the root, creating maps for any
//! missing parent and replacing any non-map parent with an empty map. The
//! replacement discards whatever the parent held; use [`Settings::try_set`]
//! to refuse instead. `find` makes the same walk without creating anything
//! and stops at the first missing or non-map parent.
//!
//! Keys may have any number of components. Every walk over the tree here is
//! a loop, and dropping a store takes the tree apart iteratively.

use crate::error::{Result, SettingsError};
use crate::path::KeyPath;
use crate::reader;
use crate::value::{dismantle, FromSetting, SettingMap, SettingValue};
use crate::writer::{self, Format};
use std::io::{Read, Write};
use tracing::{debug, trace};

/// Hierarchical settings tree. The root is always a map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    root: SettingMap,
}

impl Settings {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a store from a JSON document whose root is an object.
    pub fn load<R: Read>(reader: R) -> Result<Self> {
        let root = reader::read_map(reader)?;
        debug!(entries = root.len(), "loaded settings");
        Ok(Self { root })
    }

    /// Like [`Settings::load`], from an in-memory string.
    pub fn from_json(text: &str) -> Result<Self> {
        let root = reader::parse_map(text)?;
        debug!(entries = root.len(), "parsed settings");
        Ok(Self { root })
    }

    /// Store `value` at `key`, overwriting whatever was there.
    ///
    /// Missing parents are created as maps. A parent that holds a scalar or
    /// list is replaced by an empty map, dropping its old contents.
    pub fn set(&mut self, key: &str, value: impl Into<SettingValue>) {
        trace!(key, "set");
        let path = KeyPath::parse(key);
        insert(&mut self.root, key, path.parents(), path.leaf(), value.into());
    }

    /// Like [`Settings::set`], but fails instead of replacing a non-map
    /// parent. On error the tree is left untouched.
    pub fn try_set(&mut self, key: &str, value: impl Into<SettingValue>) -> Result<()> {
        let path = KeyPath::parse(key);
        let mut cursor = &self.root;
        for component in path.parents() {
            match cursor.get(*component) {
                // Everything below a missing entry is created fresh.
                None => break,
                Some(SettingValue::Map(child)) => cursor = child,
                Some(
                    found @ (SettingValue::Int(_)
                    | SettingValue::UInt(_)
                    | SettingValue::String(_)
                    | SettingValue::List(_)),
                ) => {
                    return Err(SettingsError::TypeConflict {
                        key: key.to_string(),
                        component: component.to_string(),
                        found: found.kind(),
                    });
                }
            }
        }
        self.set(key, value);
        Ok(())
    }

    /// Look up `key`, returning a copy of the stored value.
    pub fn find(&self, key: &str) -> Option<SettingValue> {
        trace!(key, "find");
        self.get_ref(key).cloned()
    }

    /// Look up `key` without copying.
    pub fn get_ref(&self, key: &str) -> Option<&SettingValue> {
        let path = KeyPath::parse(key);
        let mut cursor = &self.root;
        for component in path.parents() {
            cursor = match cursor.get(*component)? {
                SettingValue::Map(child) => child,
                SettingValue::Int(_)
                | SettingValue::UInt(_)
                | SettingValue::String(_)
                | SettingValue::List(_) => return None,
            };
        }
        cursor.get(path.leaf())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get_ref(key).is_some()
    }

    /// Look up `key` and convert it, yielding `None` if it is missing or of
    /// the wrong kind.
    pub fn get<T: FromSetting>(&self, key: &str) -> Option<T> {
        self.get_ref(key).and_then(T::from_setting)
    }

    /// Look up `key` and convert it, falling back to `default`.
    pub fn get_or<T: FromSetting>(&self, key: &str, default: T) -> T {
        self.get(key).unwrap_or(default)
    }

    pub fn root(&self) -> &SettingMap {
        &self.root
    }

    /// Number of top-level entries.
    pub fn len(&self) -> usize {
        self.root.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Write the whole tree as pretty-printed JSON with sorted keys.
    pub fn save<W: Write>(&self, sink: W) -> Result<()> {
        self.save_with(sink, Format::Pretty)
    }

    pub fn save_with<W: Write>(&self, sink: W, format: Format) -> Result<()> {
        debug!(entries = self.root.len(), ?format, "saving settings");
        writer::write_map(&self.root, sink, format)
    }

    pub fn to_string_pretty(&self) -> Result<String> {
        self.to_string_with(Format::Pretty)
    }

    pub fn to_string_with(&self, format: Format) -> Result<String> {
        writer::map_to_string(&self.root, format)
    }
}

impl Drop for Settings {
    fn drop(&mut self) {
        dismantle(self.root.drain().map(|(_, child)| child).collect());
    }
}

/// Descend through `parents` from `root` and store `value` under `leaf`.
fn insert(root: &mut SettingMap, key: &str, parents: &[&str], leaf: &str, value: SettingValue) {
    let mut cursor = root;
    for (depth, component) in parents.iter().enumerate() {
        let entry = cursor
            .entry((*component).to_string())
            .or_insert_with(SettingValue::empty_map);

        match entry {
            SettingValue::Map(child) => cursor = child,
            SettingValue::Int(_)
            | SettingValue::UInt(_)
            | SettingValue::String(_)
            | SettingValue::List(_) => {
                debug!(
                    key,
                    component = *component,
                    discarded = entry.kind(),
                    "replacing non-map value with a map"
                );
                let fresh = branch(&parents[depth + 1..], leaf, value);
                dismantle(vec![std::mem::replace(entry, fresh)]);
                return;
            }
        }
    }
    if let Some(previous) = cursor.insert(leaf.to_string(), value) {
        dismantle(vec![previous]);
    }
}

/// Build the maps for `parents`, innermost first, holding `value` at `leaf`.
fn branch(parents: &[&str], leaf: &str, value: SettingValue) -> SettingValue {
    let mut node = SettingValue::Map(SettingMap::from([(leaf.to_string(), value)]));
    for component in parents.iter().rev() {
        node = SettingValue::Map(SettingMap::from([((*component).to_string(), node)]));
    }
    node
}
