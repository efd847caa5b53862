//! # settings-core
//!
//! A hierarchical settings tree addressed by slash-delimited keys.
//!
//! Values are integers, unsigned integers, strings, lists of values, or maps
//! of named values. Setting a key creates any missing parent maps along the
//! way; looking one up never creates anything. Saving writes JSON with map
//! keys sorted, so the output depends only on the tree's content and never on
//! the order keys were set in.
//!
//! ## Quick start
//!
//! ```rust
//! use settings_core::{SettingValue, Settings};
//!
//! let mut settings = Settings::new();
//! settings.set("display/zoom", 100);
//! settings.set("display/theme", "dark");
//! settings.set("recent/0", "file1.ptb");
//!
//! assert_eq!(settings.find("display/zoom"), Some(SettingValue::Int(100)));
//! assert_eq!(settings.get_or("display/scale", 1), 1);
//!
//! let json = settings.to_string_pretty().unwrap();
//! assert_eq!(
//!     json,
//!     r#"{
//!     "display": {
//!         "theme": "dark",
//!         "zoom": 100
//!     },
//!     "recent": {
//!         "0": "file1.ptb"
//!     }
//! }"#
//! );
//!
//! // JSON → Settings (roundtrip)
//! let back = Settings::from_json(&json).unwrap();
//! assert_eq!(back, settings);
//! ```
//!
//! ## Modules
//!
//! - [`value`] — `SettingValue`, the five node kinds, and typed extraction
//! - [`path`] — key → component decomposition
//! - [`store`] — `Settings`: set / find / save / load
//! - [`writer`] — sorted-key JSON output
//! - [`reader`] — JSON input
//! - [`error`] — Error types for load/save/strict-set failures

pub mod error;
pub mod path;
pub mod reader;
pub mod store;
pub mod value;
pub mod writer;

pub use error::{Result, SettingsError};
pub use path::KeyPath;
pub use store::Settings;
pub use value::{FromSetting, SettingList, SettingMap, SettingValue};
pub use writer::Format;
