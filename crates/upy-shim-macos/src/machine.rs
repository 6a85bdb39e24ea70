// crates/upy-shim-macos/src/machine.rs
//! Host-backed parts of the `machine` module. Pins, signals and the reset
//! cause live in the platform-agnostic `upy_shim` crate.

use crate::error::WlanError;
use upy_shim::CommandRunner;

/// CPU clock in Hz, from `sysctl hw.cpufrequency`.
pub fn freq<R: CommandRunner>(runner: &mut R) -> Result<u64, WlanError> {
    let out = runner.run("sysctl hw.cpufrequency")?;
    // `hw.cpufrequency: 2600000000`
    let mut fields = out.split_whitespace();
    match (fields.next(), fields.next(), fields.next()) {
        (Some(_), Some(value), None) => value
            .parse()
            .map_err(|_| WlanError::InvalidOutput(out.clone())),
        _ => Err(WlanError::InvalidOutput(out.clone())),
    }
}

/// The machine's serial number, read from the I/O registry.
pub fn unique_id<R: CommandRunner>(runner: &mut R) -> Result<String, WlanError> {
    let out = runner.run(
        "ioreg -c IOPlatformExpertDevice -d 2 | awk '/IOPlatformSerialNumber/{gsub(/\"/, \"\", $3); print $3}'",
    )?;
    Ok(out.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use upy_shim::ShimError;

    struct Canned(&'static str);

    impl CommandRunner for Canned {
        fn run(&mut self, _command: &str) -> Result<String, ShimError> {
            Ok(self.0.to_string())
        }
    }

    #[test]
    fn test_freq() {
        assert_eq!(freq(&mut Canned("hw.cpufrequency: 2600000000\n")).unwrap(), 2_600_000_000);
        assert!(matches!(freq(&mut Canned("")), Err(WlanError::InvalidOutput(_))));
        assert!(matches!(
            freq(&mut Canned("sysctl: unknown oid 'hw.cpufrequency'\n")),
            Err(WlanError::InvalidOutput(_))
        ));
    }

    #[test]
    fn test_unique_id() {
        assert_eq!(unique_id(&mut Canned("C02XK1ABJG5J\n")).unwrap(), "C02XK1ABJG5J");
    }
}
