// crates/upy-shim-macos/src/lib.rs
//! macOS backend for the MicroPython `network` and `machine` modules.
//!
//! Everything here shells out through a `CommandRunner`, so the logic can be
//! exercised off-host with scripted command output.

pub mod command;
pub mod error;
pub mod helpers;
pub mod machine;
pub mod scan;
pub mod wlan;

pub use command::ShellRunner;
pub use error::WlanError;
pub use helpers::{
    ConnectConfig, OpenNetworkConnection, PortalProbe, classify_probe, connect_to_open_network,
    connect_to_open_network_with, connect_to_ssid, external_ip, open_networks, probe_captive_portal,
};
pub use machine::{freq, unique_id};
pub use scan::{ScanResult, auth_mode, parse_scan_output, scan_results_from_plist};
pub use wlan::{IfConfig, Wlan, WlanConfig};
