//! Loading settings documents back into a tree.
use settings_core::reader::parse_value;
use settings_core::{Format, SettingValue, Settings, SettingsError};

// ============================================================================
// Accepted input
// ============================================================================

#[test]
fn load_nested_document() {
    let json = r#"{"display":{"zoom":100,"theme":"dark"},"recent":["a.ptb","b.ptb"]}"#;
    let settings = Settings::from_json(json).unwrap();

    assert_eq!(settings.find("display/zoom"), Some(SettingValue::Int(100)));
    assert_eq!(settings.find("display/theme"), Some(SettingValue::from("dark")));
    assert_eq!(
        settings.get::<Vec<String>>("recent"),
        Some(vec!["a.ptb".to_string(), "b.ptb".to_string()])
    );
}

#[test]
fn load_from_reader() {
    let json = b"{\n    \"a\": {\n        \"b\": -1\n    }\n}";
    let settings = Settings::load(&json[..]).unwrap();
    assert_eq!(settings.find("a/b"), Some(SettingValue::Int(-1)));
}

#[test]
fn load_empty_object() {
    let settings = Settings::from_json("{}").unwrap();
    assert!(settings.is_empty());
}

#[test]
fn integers_within_i64_load_as_int() {
    let settings = Settings::from_json(r#"{"n":5,"neg":-5,"max":9223372036854775807}"#).unwrap();
    assert_eq!(settings.find("n"), Some(SettingValue::Int(5)));
    assert_eq!(settings.find("neg"), Some(SettingValue::Int(-5)));
    assert_eq!(settings.find("max"), Some(SettingValue::Int(i64::MAX)));
}

#[test]
fn integers_beyond_i64_load_as_uint() {
    let settings = Settings::from_json(r#"{"big":18446744073709551615}"#).unwrap();
    assert_eq!(settings.find("big"), Some(SettingValue::UInt(u64::MAX)));
}

#[test]
fn duplicate_keys_last_wins() {
    let settings = Settings::from_json(r#"{"a":1,"a":2}"#).unwrap();
    assert_eq!(settings.find("a"), Some(SettingValue::Int(2)));
}

#[test]
fn keys_containing_slashes_load_literally() {
    // Such keys cannot be reached by a path, but they survive a load/save cycle.
    let settings = Settings::from_json(r#"{"a/b":1}"#).unwrap();
    assert_eq!(settings.find("a/b"), None);
    assert_eq!(settings.root().get("a/b"), Some(&SettingValue::Int(1)));
    assert_eq!(
        settings.to_string_with(Format::Compact).unwrap(),
        r#"{"a/b":1}"#
    );
}

#[test]
fn parse_value_accepts_any_supported_root() {
    assert_eq!(parse_value("42").unwrap(), SettingValue::Int(42));
    assert_eq!(parse_value(r#""x""#).unwrap(), SettingValue::from("x"));
    assert_eq!(
        parse_value(r#"[1,"two",[]]"#).unwrap(),
        SettingValue::List(vec![
            SettingValue::Int(1),
            SettingValue::from("two"),
            SettingValue::List(vec![]),
        ])
    );
}

// ============================================================================
// Rejected input
// ============================================================================

#[test]
fn reject_non_object_root() {
    for (json, kind) in [
        ("[1,2]", "a list"),
        ("7", "an integer"),
        (r#""text""#, "a string"),
    ] {
        match Settings::from_json(json) {
            Err(SettingsError::InvalidRoot { found }) => assert_eq!(found, kind),
            other => panic!("expected InvalidRoot for {json}, got {other:?}"),
        }
    }
}

#[test]
fn reject_unsupported_kinds() {
    for json in [
        r#"{"flag":true}"#,
        r#"{"ratio":1.5}"#,
        r#"{"nothing":null}"#,
        r#"{"nested":{"list":[1,false]}}"#,
    ] {
        match Settings::from_json(json) {
            Err(SettingsError::Json(err)) => {
                assert!(
                    err.to_string().contains("expected a setting value"),
                    "unexpected message for {json}: {err}"
                );
            }
            other => panic!("expected Json error for {json}, got {other:?}"),
        }
    }
}

#[test]
fn reject_malformed_json() {
    assert!(matches!(
        Settings::from_json(r#"{"a":"#),
        Err(SettingsError::Json(_))
    ));
    assert!(matches!(
        Settings::from_json(r#"{"a":1} trailing"#),
        Err(SettingsError::Json(_))
    ));
    assert!(matches!(Settings::from_json(""), Err(SettingsError::Json(_))));
}

// ============================================================================
// Save → load
// ============================================================================

#[test]
fn save_then_load_reproduces_tree() {
    let mut settings = Settings::new();
    settings.set("display/zoom", 100);
    settings.set("display/theme", "dark");
    settings.set("recent", vec!["a.ptb", "b.ptb"]);
    settings.set("window/geometry", vec![0, -10, 800, 600]);
    settings.set("empty", settings_core::SettingMap::new());

    let mut buf = Vec::new();
    settings.save(&mut buf).unwrap();
    let reloaded = Settings::load(buf.as_slice()).unwrap();
    assert_eq!(reloaded, settings);
}

#[test]
fn small_uint_reloads_as_int_but_extracts_as_u64() {
    let mut settings = Settings::new();
    settings.set("count", 5u32);

    let reloaded = Settings::from_json(&settings.to_string_pretty().unwrap()).unwrap();
    assert_eq!(reloaded.find("count"), Some(SettingValue::Int(5)));
    assert_eq!(reloaded.get::<u32>("count"), Some(5));
}

#[test]
fn load_then_save_normalizes_key_order() {
    let settings = Settings::from_json(r#"{"z":1,"a":{"y":2,"b":3}}"#).unwrap();
    assert_eq!(
        settings.to_string_with(Format::Compact).unwrap(),
        r#"{"a":{"b":3,"y":2},"z":1}"#
    );
}

// ============================================================================
// Deep nesting
// ============================================================================

fn deep_key(depth: usize) -> String {
    vec!["k"; depth].join("/")
}

#[test]
fn deep_compact_document_round_trips() {
    let key = deep_key(10_000);
    let mut settings = Settings::new();
    settings.set(&key, 1);

    let json = settings.to_string_with(Format::Compact).unwrap();
    let reloaded = Settings::from_json(&json).unwrap();
    assert_eq!(reloaded.get::<i64>(&key), Some(1));
}

#[test]
fn pretty_document_nested_past_200_levels_loads() {
    let key = deep_key(500);
    let mut settings = Settings::new();
    settings.set(&key, "leaf");

    let mut buf = Vec::new();
    settings.save(&mut buf).unwrap();
    let reloaded = Settings::load(buf.as_slice()).unwrap();
    assert_eq!(reloaded.get::<String>(&key), Some("leaf".to_string()));
}

#[test]
fn parse_value_accepts_deep_lists() {
    let text = format!("{}1{}", "[".repeat(1_000), "]".repeat(1_000));
    let value = parse_value(&text).unwrap();

    let mut depth = 0;
    let mut cursor = &value;
    while let SettingValue::List(items) = cursor {
        depth += 1;
        cursor = &items[0];
    }
    assert_eq!(depth, 1_000);
    assert_eq!(cursor, &SettingValue::Int(1));
}

#[test]
fn deep_non_object_root_is_rejected() {
    let text = format!("{}{}", "[".repeat(50_000), "]".repeat(50_000));
    assert!(matches!(
        Settings::from_json(&text),
        Err(SettingsError::InvalidRoot { found: "a list" })
    ));
}
