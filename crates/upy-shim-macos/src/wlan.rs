// crates/upy-shim-macos/src/wlan.rs

use crate::error::WlanError;
use crate::scan::{ScanResult, parse_scan_output};
use log::{debug, info};
use upy_shim::{CommandRunner, InterfaceId, ShimError, WlanStatus, shell_quote};

/// Path of the private `airport` utility used for scanning.
pub const AIRPORT_PATH: &str =
    "/System/Library/PrivateFrameworks/Apple80211.framework/Versions/Current/Resources/airport";

const NETWORKSETUP: &str = "networksetup";

/// What `networksetup -getairportnetwork` prints when not associated.
const NOT_ASSOCIATED: &str = "You are not associated with an AirPort network.\n";
/// Prefix of the `-getairportnetwork` output when associated.
const ASSOCIATED_PREFIX: &str = "Current Wi-Fi Network: ";

/// Configuration for the Wi-Fi controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WlanConfig {
    /// BSD name of the Wi-Fi interface.
    pub interface: String,
}

impl Default for WlanConfig {
    fn default() -> Self {
        Self {
            interface: "en0".to_string(),
        }
    }
}

/// IP configuration of the interface: `(ip, subnet, gateway, dns)` in MicroPython.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IfConfig {
    pub ip: String,
    pub subnet: String,
    pub gateway: String,
    /// First nameserver from `/etc/resolv.conf`, or empty if there is none.
    pub dns: String,
}

/// `network.WLAN` for the station interface, driven by macOS command-line tools.
pub struct Wlan<R> {
    runner: R,
    config: WlanConfig,
}

impl<R: CommandRunner> Wlan<R> {
    /// Creates a controller for `interface_id` using the default configuration.
    pub fn new(runner: R, interface_id: InterfaceId) -> Result<Self, WlanError> {
        Self::with_config(runner, interface_id, WlanConfig::default())
    }

    /// Only the station interface can be driven; access-point mode is not available.
    pub fn with_config(runner: R, interface_id: InterfaceId, config: WlanConfig) -> Result<Self, WlanError> {
        if interface_id != InterfaceId::Station {
            return Err(ShimError::NotImplemented("access point interface").into());
        }
        Ok(Self { runner, config })
    }

    pub fn interface(&self) -> &str {
        &self.config.interface
    }

    pub fn runner_mut(&mut self) -> &mut R {
        &mut self.runner
    }

    /// Powers the Wi-Fi radio on or off.
    pub fn set_active(&mut self, active: bool) -> Result<(), WlanError> {
        let state = if active { "on" } else { "off" };
        self.runner
            .run_program(NETWORKSETUP, &["-setairportpower", &self.config.interface, state])?;
        info!("Wi-Fi on {} turned {}", self.config.interface, state);
        Ok(())
    }

    /// Returns whether the Wi-Fi radio is powered.
    pub fn is_active(&mut self) -> Result<bool, WlanError> {
        let out = self
            .runner
            .run_program(NETWORKSETUP, &["-getairportpower", &self.config.interface])?;
        Ok(out.ends_with("On\n"))
    }

    /// Joins `ssid`. `networksetup` prints nothing on success.
    ///
    /// The SSID and password are passed as program arguments, so any bytes a
    /// scan reports are safe to use here.
    pub fn connect(&mut self, ssid: &str, password: &str) -> Result<(), WlanError> {
        let out = self.runner.run_program(
            NETWORKSETUP,
            &["-setairportnetwork", &self.config.interface, ssid, password],
        )?;
        let out = out.trim();
        if !out.is_empty() {
            return Err(WlanError::ConnectionFailed(out.to_string()));
        }
        debug!("Association with {:?} requested", ssid);
        Ok(())
    }

    fn associated_network(&mut self) -> Result<String, WlanError> {
        Ok(self
            .runner
            .run_program(NETWORKSETUP, &["-getairportnetwork", &self.config.interface])?)
    }

    pub fn disconnect(&mut self) -> Result<(), WlanError> {
        Err(ShimError::NotImplemented("WLAN.disconnect").into())
    }

    /// Returns whether the interface is associated with a network.
    pub fn is_connected(&mut self) -> Result<bool, WlanError> {
        let out = self.associated_network()?;
        if out == NOT_ASSOCIATED {
            Ok(false)
        } else if out.starts_with(ASSOCIATED_PREFIX) {
            Ok(true)
        } else {
            Err(WlanError::InvalidOutput(out))
        }
    }

    /// Name of the network the interface is associated with, if any.
    pub fn current_ssid(&mut self) -> Result<Option<String>, WlanError> {
        let out = self.associated_network()?;
        if out == NOT_ASSOCIATED {
            return Ok(None);
        }
        out.strip_prefix(ASSOCIATED_PREFIX)
            .map(|ssid| Some(ssid.trim().to_string()))
            .ok_or(WlanError::InvalidOutput(out.clone()))
    }

    /// `GotIp` when associated, `Idle` otherwise. The tools give no finer detail.
    pub fn status(&mut self) -> Result<WlanStatus, WlanError> {
        if self.is_connected()? {
            Ok(WlanStatus::GotIp)
        } else {
            Ok(WlanStatus::Idle)
        }
    }

    /// Reads the interface's IP configuration.
    pub fn ifconfig(&mut self) -> Result<IfConfig, WlanError> {
        // 1. Address and netmask; macOS prints the netmask as hex (0xffffff00).
        let command = format!(
            "ifconfig {} | awk '/inet /{{print $2, $4}}'",
            shell_quote(&self.config.interface)
        );
        let out = self.runner.run(&command)?;
        let mut fields = out.split_whitespace();
        let (Some(ip), Some(netmask)) = (fields.next(), fields.next()) else {
            return Err(WlanError::InvalidOutput(out.clone()));
        };
        let mask = parse_netmask(netmask).ok_or_else(|| WlanError::InvalidOutput(out.clone()))?;
        let subnet = dotted_quad(mask);

        // 2. Default gateway.
        let gateway = self
            .runner
            .run("route -n get default | awk '/gateway: /{print $2}'")?
            .trim()
            .to_string();

        // 3. First configured nameserver.
        let dns = self
            .runner
            .run("awk '/^nameserver/{print $2}' /etc/resolv.conf")?
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_string();

        Ok(IfConfig {
            ip: ip.to_string(),
            subnet,
            gateway,
            dns,
        })
    }

    /// Hardware address of the interface, `WLAN.config('mac')`.
    pub fn mac(&mut self) -> Result<[u8; 6], WlanError> {
        let command = format!(
            "ifconfig {} | awk '/ether/{{print $2}}'",
            shell_quote(&self.config.interface)
        );
        let out = self.runner.run(&command)?;
        let bytes = hex::decode(out.trim().replace(':', ""))?;
        <[u8; 6]>::try_from(bytes.as_slice()).map_err(|_| WlanError::InvalidOutput(out.clone()))
    }

    /// Lists nearby access points.
    pub fn scan(&mut self) -> Result<Vec<ScanResult>, WlanError> {
        let xml = self.runner.run(&format!("{} -s -x", AIRPORT_PATH))?;
        parse_scan_output(&xml)
    }
}

/// Accepts `0xffffff00` (as printed by macOS) or a plain decimal integer.
fn parse_netmask(netmask: &str) -> Option<u32> {
    match netmask.strip_prefix("0x") {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None => netmask.parse().ok(),
    }
}

fn dotted_quad(mask: u32) -> String {
    let [a, b, c, d] = mask.to_be_bytes();
    format!("{}.{}.{}.{}", a, b, c, d)
}
