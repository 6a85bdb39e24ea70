// crates/upy-shim-macos/src/helpers.rs
//! Higher-level connection helpers built on `Wlan`: join a network and wait
//! for it, pick the strongest open network, and detect captive portals.

use crate::error::WlanError;
use crate::scan::ScanResult;
use crate::wlan::Wlan;
use log::{debug, info, warn};
use std::io::BufRead;
use std::thread;
use std::time::Duration;
use upy_shim::{AuthMode, CommandRunner, WlanStatus};
use upy_shim_http::{HttpError, RequestOptions, Response};

/// Endpoint that answers 204 when the Internet is reachable without a portal.
pub const CAPTIVE_PROBE_URL: &str = "http://clients3.google.com/generate_204";
/// Endpoint that answers with the caller's public address as plain text.
pub const EXTERNAL_IP_URL: &str = "https://icanhazip.com/";

/// How long to wait for an association to complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectConfig {
    /// Delay between two status checks.
    pub poll_interval: Duration,
    /// Status checks before giving up.
    pub max_polls: u32,
}

impl Default for ConnectConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(250),
            max_polls: 120,
        }
    }
}

/// Joins `ssid` and blocks until the interface reports an address.
pub fn connect_to_ssid<R: CommandRunner>(
    wlan: &mut Wlan<R>,
    ssid: &str,
    password: &str,
    config: &ConnectConfig,
) -> Result<(), WlanError> {
    wlan.connect(ssid, password)?;

    for poll in 0..config.max_polls {
        match wlan.status()? {
            WlanStatus::GotIp => {
                info!("Connected to {:?} after {} polls", ssid, poll + 1);
                return Ok(());
            }
            status if status.is_pending() => {
                upy_shim::idle();
                thread::sleep(config.poll_interval);
            }
            status => {
                return Err(WlanError::ConnectionFailed(format!("wlan status {:?}", status)));
            }
        }
    }
    Err(WlanError::ConnectionFailed(format!(
        "no address after {} status checks",
        config.max_polls
    )))
}

/// Open networks from a scan, strongest signal first.
pub fn open_networks(results: &[ScanResult]) -> Vec<ScanResult> {
    let mut open: Vec<ScanResult> = results
        .iter()
        .filter(|ap| ap.auth_mode == AuthMode::Open)
        .cloned()
        .collect();
    open.sort_by(|a, b| b.rssi.cmp(&a.rssi));
    open
}

/// The network joined by `connect_to_open_network`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenNetworkConnection {
    /// `None` when an existing association was kept.
    pub ssid: Option<String>,
    pub ip: String,
}

/// Joins the strongest open network that gives Internet access.
///
/// Unless `force` is set, an existing association is kept as is. Candidates
/// are tried strongest first; one is rejected when the association fails or
/// when a captive portal sits in front of it.
pub fn connect_to_open_network<R: CommandRunner>(
    wlan: &mut Wlan<R>,
    force: bool,
    config: &ConnectConfig,
) -> Result<OpenNetworkConnection, WlanError> {
    connect_to_open_network_with(wlan, force, config, probe_captive_portal)
}

/// Same as `connect_to_open_network`, with a custom Internet-access check.
pub fn connect_to_open_network_with<R, F>(
    wlan: &mut Wlan<R>,
    force: bool,
    config: &ConnectConfig,
    mut probe: F,
) -> Result<OpenNetworkConnection, WlanError>
where
    R: CommandRunner,
    F: FnMut() -> PortalProbe,
{
    if !force && wlan.is_connected()? {
        let ip = wlan.ifconfig()?.ip;
        debug!("Already connected, keeping {}", ip);
        return Ok(OpenNetworkConnection { ssid: None, ip });
    }

    let candidates = open_networks(&wlan.scan()?);
    if candidates.is_empty() {
        return Err(WlanError::NoOpenNetworks);
    }

    for ap in &candidates {
        if let Err(e) = connect_to_ssid(wlan, &ap.ssid, "", config) {
            warn!("Skipping {:?} ({} dBm): {}", ap.ssid, ap.rssi, e);
            continue;
        }
        let result = probe();
        if result.is_captive() {
            warn!("Skipping {:?}: {:?}", ap.ssid, result);
            continue;
        }

        let ip = wlan.ifconfig()?.ip;
        info!("Joined open network {:?} with address {}", ap.ssid, ip);
        return Ok(OpenNetworkConnection {
            ssid: Some(ap.ssid.clone()),
            ip,
        });
    }
    Err(WlanError::AllCandidatesFailed)
}

// --- Captive Portal Detection ---

/// Outcome of requesting the probe URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortalProbe {
    /// 204: direct Internet access.
    Online,
    /// 3xx with a `Location`, usually the portal's splash page.
    Redirected(String),
    /// Any other status.
    Captive(u16),
    /// The request itself failed.
    Unreachable(String),
}

impl PortalProbe {
    pub fn is_captive(&self) -> bool {
        !matches!(self, PortalProbe::Online)
    }

    /// The portal URL, when the probe was redirected.
    pub fn location(&self) -> Option<&str> {
        match self {
            PortalProbe::Redirected(location) => Some(location.as_str()),
            _ => None,
        }
    }
}

/// Classifies the answer to a probe request.
pub fn classify_probe<R: BufRead>(result: Result<Response<R>, HttpError>) -> PortalProbe {
    match result {
        Err(e) => PortalProbe::Unreachable(e.to_string()),
        Ok(response) if response.status_code == 204 => PortalProbe::Online,
        Ok(response) => match response.location() {
            Some(location) => PortalProbe::Redirected(location.to_string()),
            None => PortalProbe::Captive(response.status_code),
        },
    }
}

/// Requests `CAPTIVE_PROBE_URL` and classifies the answer.
pub fn probe_captive_portal() -> PortalProbe {
    let mut response = upy_shim_http::get(CAPTIVE_PROBE_URL, &RequestOptions::new());
    if let Ok(response) = response.as_mut() {
        response.close();
    }
    let probe = classify_probe(response);
    debug!("Captive portal probe: {:?}", probe);
    probe
}

/// The public address of this machine as seen by `EXTERNAL_IP_URL`.
pub fn external_ip() -> Result<String, WlanError> {
    let mut response = upy_shim_http::get(EXTERNAL_IP_URL, &RequestOptions::new())?;
    Ok(response.text()?.trim().to_string())
}
