// crates/upy-shim-plist/tests/parsing.rs

use upy_shim_plist::{Dictionary, PlistValue, parse, to_xml_string};
use std::fs;
use std::path::PathBuf;

/// Routes parser logs to the test harness; set `RUST_LOG=trace` to see them.
fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Helper function to load a test file from the `tests/data/` directory.
fn load_test_file(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("data");
    path.push(name);

    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read test file {:?}: {}", path, e))
}

fn dict(entries: Vec<(&str, PlistValue)>) -> PlistValue {
    PlistValue::Dictionary(entries.into_iter().collect())
}

/// The single-network record from a Wi-Fi scan, written inline.
#[test]
fn test_scan_record_scenario() {
    init_logger();
    let xml = "<plist><dict><key>SSID_STR</key><string>CafeNet</string><key>RSSI</key><integer>-47</integer><key>WEP</key><false/></dict></plist>";
    let value = parse(xml).expect("Failed to parse scan record");

    assert_eq!(
        value,
        dict(vec![
            ("SSID_STR", PlistValue::String("CafeNet".into())),
            ("RSSI", PlistValue::Integer(-47)),
            ("WEP", PlistValue::Boolean(false)),
        ])
    );
}

#[test]
fn test_nested_array_scenario() {
    init_logger();
    let xml = "<plist><array><integer>1</integer><integer>2</integer></array></plist>";
    let value = parse(xml).expect("Failed to parse array");
    assert_eq!(
        value,
        PlistValue::Array(vec![PlistValue::Integer(1), PlistValue::Integer(2)])
    );
}

#[test]
fn test_duplicate_keys_last_write_wins() {
    init_logger();
    let xml = "<dict><key>a</key><string>x</string><key>a</key><string>y</string></dict>";
    let value = parse(xml).unwrap();
    let dict = value.as_dictionary().expect("Expected a dictionary");

    assert_eq!(dict.len(), 1);
    assert_eq!(dict.get("a"), Some(&PlistValue::String("y".into())));
}

#[test]
fn test_empty_containers() {
    init_logger();
    assert_eq!(parse("<dict></dict>").unwrap(), PlistValue::Dictionary(Dictionary::new()));
    assert_eq!(parse("<array></array>").unwrap(), PlistValue::Array(vec![]));
    assert_eq!(parse("<plist><dict/></plist>").unwrap(), PlistValue::Dictionary(Dictionary::new()));
}

/// Keys come back exactly once each and in document order.
#[test]
fn test_dict_keys_keep_document_order() {
    init_logger();
    let xml = "<dict><key>z</key><integer>1</integer><key>a</key><integer>2</integer><key>m</key><true/></dict>";
    let value = parse(xml).unwrap();
    let keys: Vec<&str> = value.as_dictionary().unwrap().keys().collect();
    assert_eq!(keys, vec!["z", "a", "m"]);
}

/// Large dictionaries keep every key, in order, with last-write-wins
/// replacement still applied in place.
#[test]
fn test_large_dictionary() {
    init_logger();
    const KEYS: usize = 20_000;
    let mut xml = String::from("<plist><dict>");
    for i in 0..KEYS {
        xml.push_str(&format!("<key>k{i}</key><integer>{i}</integer>"));
    }
    xml.push_str("<key>k0</key><string>replaced</string></dict></plist>");

    let value = parse(&xml).expect("Failed to parse large dictionary");
    let dict = value.as_dictionary().expect("Expected a dictionary");

    assert_eq!(dict.len(), KEYS);
    assert_eq!(dict.keys().next(), Some("k0"));
    assert_eq!(dict.get("k0"), Some(&PlistValue::String("replaced".into())));
    assert_eq!(dict.get("k19999"), Some(&PlistValue::Integer(19_999)));
    assert_eq!(dict.keys().last(), Some("k19999"));
}

#[test]
fn test_trailing_key_is_discarded() {
    init_logger();
    let value = parse("<dict><key>a</key><integer>1</integer><key>dangling</key></dict>").unwrap();
    let dict = value.as_dictionary().unwrap();
    assert_eq!(dict.len(), 1);
    assert!(!dict.contains_key("dangling"));
}

/// Parses a real-world shaped `airport -s -x` document, including the
/// DOCTYPE line, indentation, entities and multi-line `<data>` blocks.
#[test]
fn test_parse_airport_scan_file() {
    init_logger();
    let xml = load_test_file("airport_scan.xml");
    let value = parse(&xml).expect("Failed to parse scan file");

    let networks = value.as_array().expect("Scan root must be an array");
    assert_eq!(networks.len(), 3);

    let cafe = &networks[0];
    assert_eq!(cafe.get("SSID_STR").and_then(PlistValue::as_str), Some("CafeNet"));
    assert_eq!(cafe.get("RSSI").and_then(PlistValue::as_integer), Some(-47));
    assert_eq!(cafe.get("CHANNEL").and_then(PlistValue::as_integer), Some(6));
    assert_eq!(
        cafe.get("HT_CAPS_IE").and_then(|v| v.get("CAPS")).and_then(PlistValue::as_integer),
        Some(6255)
    );
    // Data is kept verbatim; decoding is the caller's business.
    let ssid_data = cafe.get("SSID").and_then(PlistValue::as_data).unwrap();
    assert_eq!(ssid_data.trim(), "Q2FmZU5ldA==");

    let home = &networks[1];
    assert_eq!(home.get("SSID_STR").and_then(PlistValue::as_str), Some("Home & Garden"));
    let ciphers = home
        .get("RSN_IE")
        .and_then(|v| v.get("IE_KEY_RSN_UCIPHERS"))
        .and_then(PlistValue::as_array)
        .unwrap();
    assert_eq!(ciphers, &[PlistValue::Integer(4)]);

    let old = &networks[2];
    assert_eq!(old.get("WEP").and_then(PlistValue::as_boolean), Some(true));
}

/// A hand-built tree written out by `to_xml_string` parses back to itself.
#[test]
fn test_round_trip_hand_built_tree() {
    init_logger();
    let original = dict(vec![
        ("name", PlistValue::String("  padded <value> ".into())),
        ("empty", PlistValue::String(String::new())),
        ("count", PlistValue::Integer(i64::MIN)),
        ("enabled", PlistValue::Boolean(true)),
        (
            "nested",
            PlistValue::Array(vec![
                PlistValue::Array(vec![]),
                dict(vec![("inner", PlistValue::Boolean(false))]),
                PlistValue::Integer(42),
            ]),
        ),
        ("", PlistValue::String("empty key".into())),
    ]);

    let xml = to_xml_string(&original).expect("Failed to serialize plist");
    let parsed = parse(&xml).expect("Failed to parse serialized plist");
    assert_eq!(parsed, original);
}

/// Parsed trees serialize to JSON with dictionary order preserved.
#[test]
fn test_serialize_to_json() {
    init_logger();
    let value = parse("<dict><key>b</key><array><true/><integer>3</integer></array><key>a</key><data>AA==</data></dict>").unwrap();
    let json = serde_json::to_string(&value).unwrap();
    assert_eq!(json, r#"{"b":[true,3],"a":"AA=="}"#);
}
