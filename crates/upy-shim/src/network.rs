//! Platform-independent types of the `network` module: interface ids,
//! connection status and authentication modes, with the numeric values the
//! MicroPython API exposes.

use core::fmt;

/// Which WLAN interface to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum InterfaceId {
    /// Station (client) interface, `network.STA_IF`.
    Station = 0,
    /// Access-point interface, `network.AP_IF`.
    AccessPoint = 1,
}

/// Connection state reported by `WLAN.status()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum WlanStatus {
    Idle = 0,
    Connecting = 1,
    WrongPassword = 2,
    NoApFound = 3,
    ConnectFail = 4,
    GotIp = 5,
}

impl WlanStatus {
    /// Returns true while a connection attempt may still succeed.
    pub fn is_pending(self) -> bool {
        matches!(self, WlanStatus::Idle | WlanStatus::Connecting)
    }
}

/// Authentication mode of an access point, as returned in scan results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum AuthMode {
    Open = 0,
    Wep = 1,
    WpaPsk = 2,
    Wpa2Psk = 3,
    WpaWpa2Psk = 4,
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AuthMode::Open => "OPEN",
            AuthMode::Wep => "WEP",
            AuthMode::WpaPsk => "WPA-PSK",
            AuthMode::Wpa2Psk => "WPA2-PSK",
            AuthMode::WpaWpa2Psk => "WPA/WPA2-PSK",
        };
        f.pad(name)
    }
}
