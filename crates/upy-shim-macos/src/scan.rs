// crates/upy-shim-macos/src/scan.rs
//! Interpretation of `airport -s -x` output.
//!
//! The scan is a plist array with one dictionary per access point. Only the
//! fields exposed by `WLAN.scan()` are extracted; everything else (IE blobs,
//! HT capabilities, ...) is ignored.

use crate::error::WlanError;
use log::info;
use serde::{Serialize, Serializer};
use upy_shim::AuthMode;
use upy_shim_plist::{Dictionary, PlistValue};

/// Unicast cipher suite ids from the 802.11 RSN element.
const CIPHER_TKIP: i64 = 2;
const CIPHER_CCMP: i64 = 4;

/// One access point, in the field order of a MicroPython scan tuple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanResult {
    pub ssid: String,
    pub bssid: String,
    pub channel: i64,
    pub rssi: i64,
    #[serde(serialize_with = "serialize_auth_mode")]
    pub auth_mode: AuthMode,
    /// `airport` only lists broadcasting networks.
    pub hidden: bool,
}

fn serialize_auth_mode<S: Serializer>(mode: &AuthMode, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(mode)
}

/// Parses the XML printed by `airport -s -x`.
pub fn parse_scan_output(xml: &str) -> Result<Vec<ScanResult>, WlanError> {
    let plist = upy_shim_plist::parse(xml)?;
    let results = scan_results_from_plist(&plist)?;
    info!("Scan found {} access points", results.len());
    Ok(results)
}

/// Maps each record of a parsed scan to a `ScanResult`.
pub fn scan_results_from_plist(plist: &PlistValue) -> Result<Vec<ScanResult>, WlanError> {
    let records = plist
        .as_array()
        .ok_or(WlanError::UnexpectedShape("scan output is not an array"))?;

    records
        .iter()
        .map(|record| {
            let record = record
                .as_dictionary()
                .ok_or(WlanError::UnexpectedShape("scan record is not a dictionary"))?;
            scan_result(record)
        })
        .collect()
}

fn scan_result(record: &Dictionary) -> Result<ScanResult, WlanError> {
    Ok(ScanResult {
        ssid: string_field(record, "SSID_STR")?.to_string(),
        bssid: string_field(record, "BSSID")?.to_string(),
        channel: integer_field(record, "CHANNEL")?,
        rssi: integer_field(record, "RSSI")?,
        auth_mode: auth_mode(record)?,
        hidden: false,
    })
}

fn string_field<'a>(record: &'a Dictionary, key: &'static str) -> Result<&'a str, WlanError> {
    record
        .get(key)
        .ok_or(WlanError::MissingField(key))?
        .as_str()
        .ok_or(WlanError::UnexpectedShape(key))
}

fn integer_field(record: &Dictionary, key: &'static str) -> Result<i64, WlanError> {
    record
        .get(key)
        .ok_or(WlanError::MissingField(key))?
        .as_integer()
        .ok_or(WlanError::UnexpectedShape(key))
}

/// Derives the authentication mode of one scan record.
///
/// `WEP` wins over everything else. Otherwise the unicast ciphers of the RSN
/// element (or, failing that, the WPA element) decide: TKIP only is WPA,
/// CCMP only is WPA2, both is mixed mode. No security element means open.
pub fn auth_mode(record: &Dictionary) -> Result<AuthMode, WlanError> {
    if record.get("WEP").is_some_and(is_truthy) {
        return Ok(AuthMode::Wep);
    }

    let element = ["RSN", "WPA"].into_iter().find_map(|kind| {
        let key = format!("{}_IE", kind);
        record
            .get(&key)
            .filter(|value| is_truthy(value))
            .map(|value| (kind, value))
    });
    let Some((kind, element)) = element else {
        return Ok(AuthMode::Open);
    };

    let element = element
        .as_dictionary()
        .ok_or(WlanError::UnexpectedShape("security element is not a dictionary"))?;
    let mut ciphers = match element.get(&format!("IE_KEY_{}_UCIPHERS", kind)) {
        Some(value) => value
            .as_array()
            .ok_or(WlanError::UnexpectedShape("cipher list is not an array"))?
            .iter()
            .map(|cipher| {
                cipher
                    .as_integer()
                    .ok_or(WlanError::UnexpectedShape("cipher id is not an integer"))
            })
            .collect::<Result<Vec<_>, _>>()?,
        None => Vec::new(),
    };
    ciphers.sort_unstable();

    let mode = match ciphers.as_slice() {
        [CIPHER_TKIP] => Some(AuthMode::WpaPsk),
        [CIPHER_TKIP, CIPHER_CCMP] => Some(AuthMode::WpaWpa2Psk),
        [CIPHER_CCMP] => Some(AuthMode::Wpa2Psk),
        _ => None,
    };
    mode.ok_or(WlanError::UnknownCiphers(ciphers))
}

/// Truthiness of a plist value: `false`, zero and empty values are false.
fn is_truthy(value: &PlistValue) -> bool {
    match value {
        PlistValue::Boolean(b) => *b,
        PlistValue::Integer(n) => *n != 0,
        PlistValue::String(s) | PlistValue::Data(s) => !s.is_empty(),
        PlistValue::Array(items) => !items.is_empty(),
        PlistValue::Dictionary(dict) => !dict.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ciphers(kind: &str, ids: &[i64]) -> Dictionary {
        let list = PlistValue::Array(ids.iter().map(|&id| PlistValue::Integer(id)).collect());
        let element: Dictionary = [(format!("IE_KEY_{}_UCIPHERS", kind), list)]
            .into_iter()
            .collect();
        [(format!("{}_IE", kind), PlistValue::Dictionary(element))]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_cipher_combinations() {
        assert_eq!(auth_mode(&ciphers("RSN", &[2])).unwrap(), AuthMode::WpaPsk);
        assert_eq!(auth_mode(&ciphers("RSN", &[4, 2])).unwrap(), AuthMode::WpaWpa2Psk);
        assert_eq!(auth_mode(&ciphers("WPA", &[4])).unwrap(), AuthMode::Wpa2Psk);
        assert!(matches!(
            auth_mode(&ciphers("RSN", &[1, 4])),
            Err(WlanError::UnknownCiphers(ids)) if ids == vec![1, 4]
        ));
        assert!(matches!(
            auth_mode(&ciphers("RSN", &[])),
            Err(WlanError::UnknownCiphers(ids)) if ids.is_empty()
        ));
    }

    #[test]
    fn test_wep_and_open() {
        let mut record = ciphers("RSN", &[4]);
        record.insert("WEP".to_string(), PlistValue::Boolean(true));
        assert_eq!(auth_mode(&record).unwrap(), AuthMode::Wep);

        record.insert("WEP".to_string(), PlistValue::Boolean(false));
        assert_eq!(auth_mode(&record).unwrap(), AuthMode::Wpa2Psk);

        assert_eq!(auth_mode(&Dictionary::new()).unwrap(), AuthMode::Open);
    }

    #[test]
    fn test_empty_rsn_falls_back_to_wpa() {
        let mut record = ciphers("WPA", &[2]);
        record.insert("RSN_IE".to_string(), PlistValue::Dictionary(Dictionary::new()));
        assert_eq!(auth_mode(&record).unwrap(), AuthMode::WpaPsk);
    }

    #[test]
    fn test_record_fields() {
        let record: Dictionary = [
            ("SSID_STR", PlistValue::from("Lobby")),
            ("BSSID", PlistValue::from("aa:bb:cc:dd:ee:ff")),
            ("CHANNEL", PlistValue::Integer(1)),
            ("RSSI", PlistValue::Integer(-60)),
        ]
        .into_iter()
        .collect();
        let results = scan_results_from_plist(&PlistValue::Array(vec![PlistValue::Dictionary(record)])).unwrap();
        assert_eq!(
            results,
            vec![ScanResult {
                ssid: "Lobby".to_string(),
                bssid: "aa:bb:cc:dd:ee:ff".to_string(),
                channel: 1,
                rssi: -60,
                auth_mode: AuthMode::Open,
                hidden: false,
            }]
        );
    }

    #[test]
    fn test_missing_and_mistyped_fields() {
        let record: Dictionary = [("SSID_STR", PlistValue::from("Lobby"))].into_iter().collect();
        let scan = PlistValue::Array(vec![PlistValue::Dictionary(record)]);
        assert!(matches!(
            scan_results_from_plist(&scan),
            Err(WlanError::MissingField("BSSID"))
        ));

        let record: Dictionary = [
            ("SSID_STR", PlistValue::from("Lobby")),
            ("BSSID", PlistValue::from("aa:bb:cc:dd:ee:ff")),
            ("CHANNEL", PlistValue::from("six")),
        ]
        .into_iter()
        .collect();
        let scan = PlistValue::Array(vec![PlistValue::Dictionary(record)]);
        assert!(matches!(
            scan_results_from_plist(&scan),
            Err(WlanError::UnexpectedShape("CHANNEL"))
        ));

        assert!(matches!(
            scan_results_from_plist(&PlistValue::from("nope")),
            Err(WlanError::UnexpectedShape(_))
        ));
    }
}
