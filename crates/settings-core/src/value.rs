//! Setting values: the node type of the settings tree.
//!
//! A [`SettingValue`] is one of exactly five kinds. Every algorithm over the
//! tree (insert, lookup, write, read, typed extraction) matches all five
//! explicitly, without wildcard arms, so adding a kind is a compile error at
//! each of those sites until it is handled.

use std::collections::HashMap;

/// Ordered, heterogeneous list of values.
pub type SettingList = Vec<SettingValue>;

/// Named children of a map node. Storage order is irrelevant; writers sort
/// keys on output.
pub type SettingMap = HashMap<String, SettingValue>;

/// A node in the settings tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingValue {
    Int(i64),
    UInt(u64),
    String(String),
    List(SettingList),
    Map(SettingMap),
}

impl SettingValue {
    /// A fresh, empty map node.
    pub fn empty_map() -> Self {
        SettingValue::Map(SettingMap::new())
    }

    /// True if this node can be descended into by a path component.
    pub fn is_map(&self) -> bool {
        matches!(self, SettingValue::Map(_))
    }

    /// Human-readable name of this value's kind, used in logs and errors.
    pub fn kind(&self) -> &'static str {
        match self {
            SettingValue::Int(_) => "an integer",
            SettingValue::UInt(_) => "an unsigned integer",
            SettingValue::String(_) => "a string",
            SettingValue::List(_) => "a list",
            SettingValue::Map(_) => "a map",
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            SettingValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_uint(&self) -> Option<u64> {
        match self {
            SettingValue::UInt(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            SettingValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[SettingValue]> {
        match self {
            SettingValue::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&SettingMap> {
        match self {
            SettingValue::Map(map) => Some(map),
            _ => None,
        }
    }
}

/// Drop subtrees one node at a time instead of through recursive drop glue,
/// which would exhaust the stack on deeply nested maps.
pub(crate) fn dismantle(mut pending: Vec<SettingValue>) {
    while let Some(value) = pending.pop() {
        match value {
            SettingValue::List(items) => pending.extend(items),
            SettingValue::Map(map) => pending.extend(map.into_values()),
            SettingValue::Int(_) | SettingValue::UInt(_) | SettingValue::String(_) => {}
        }
    }
}

impl From<i32> for SettingValue {
    fn from(n: i32) -> Self {
        SettingValue::Int(i64::from(n))
    }
}

impl From<i64> for SettingValue {
    fn from(n: i64) -> Self {
        SettingValue::Int(n)
    }
}

impl From<u32> for SettingValue {
    fn from(n: u32) -> Self {
        SettingValue::UInt(u64::from(n))
    }
}

impl From<u64> for SettingValue {
    fn from(n: u64) -> Self {
        SettingValue::UInt(n)
    }
}

impl From<&str> for SettingValue {
    fn from(s: &str) -> Self {
        SettingValue::String(s.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(s: String) -> Self {
        SettingValue::String(s)
    }
}

impl From<SettingMap> for SettingValue {
    fn from(map: SettingMap) -> Self {
        SettingValue::Map(map)
    }
}

impl<T: Into<SettingValue>> From<Vec<T>> for SettingValue {
    fn from(items: Vec<T>) -> Self {
        SettingValue::List(items.into_iter().map(Into::into).collect())
    }
}

/// Conversion from a stored value into a host type.
///
/// Returns `None` when the stored kind does not match, so callers can fall
/// back to a default the same way they would for a missing key.
///
/// Integer targets accept both integer kinds whenever the number fits: a
/// reloaded document cannot tell `UInt(5)` from `Int(5)`.
pub trait FromSetting: Sized {
    fn from_setting(value: &SettingValue) -> Option<Self>;
}

impl FromSetting for SettingValue {
    fn from_setting(value: &SettingValue) -> Option<Self> {
        Some(value.clone())
    }
}

impl FromSetting for i64 {
    fn from_setting(value: &SettingValue) -> Option<Self> {
        match value {
            SettingValue::Int(n) => Some(*n),
            SettingValue::UInt(n) => i64::try_from(*n).ok(),
            SettingValue::String(_) | SettingValue::List(_) | SettingValue::Map(_) => None,
        }
    }
}

impl FromSetting for i32 {
    fn from_setting(value: &SettingValue) -> Option<Self> {
        i64::from_setting(value).and_then(|n| i32::try_from(n).ok())
    }
}

impl FromSetting for u64 {
    fn from_setting(value: &SettingValue) -> Option<Self> {
        match value {
            SettingValue::Int(n) => u64::try_from(*n).ok(),
            SettingValue::UInt(n) => Some(*n),
            SettingValue::String(_) | SettingValue::List(_) | SettingValue::Map(_) => None,
        }
    }
}

impl FromSetting for u32 {
    fn from_setting(value: &SettingValue) -> Option<Self> {
        u64::from_setting(value).and_then(|n| u32::try_from(n).ok())
    }
}

impl FromSetting for String {
    fn from_setting(value: &SettingValue) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

/// All elements must convert; one mismatch rejects the whole list.
impl<T: FromSetting> FromSetting for Vec<T> {
    fn from_setting(value: &SettingValue) -> Option<Self> {
        value.as_list()?.iter().map(T::from_setting).collect()
    }
}

impl FromSetting for SettingMap {
    fn from_setting(value: &SettingValue) -> Option<Self> {
        value.as_map().cloned()
    }
}
