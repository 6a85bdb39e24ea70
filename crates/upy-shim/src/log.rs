//! Log lines tagged with the peripheral they concern.
//!
//! Several shift registers can share a program, so every line carries a tag
//! such as `[machine.ShiftRegisterSipo@13]` naming the module, the peripheral
//! and the data pin that identifies the instance.

use alloc::format;
use alloc::string::String;

/// A peripheral that can name itself in a log line.
pub trait Tagged {
    fn tag(&self) -> String;
}

/// Tag for one peripheral instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeripheralTag {
    pub module: &'static str,
    pub peripheral: &'static str,
    /// Pin that distinguishes this instance from others of its kind.
    pub pin: u8,
}

impl Tagged for PeripheralTag {
    fn tag(&self) -> String {
        format!("{}.{}@{}", self.module, self.peripheral, self.pin)
    }
}

/// `peripheral_log!(info, tag, "fmt", args..)` logs at the named `log` level
/// with `[tag] ` in front of the message.
macro_rules! peripheral_log {
    ($level:ident, $tag:expr, $fmt:literal $(, $($arg:tt)+)?) => {
        log::$level!(
            concat!("[{}] ", $fmt),
            $crate::log::Tagged::tag(&$tag)
            $(, $($arg)+)?
        )
    };
}

pub(crate) use peripheral_log;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_names_module_peripheral_and_pin() {
        let tag = PeripheralTag {
            module: "machine",
            peripheral: "ShiftRegisterSipo",
            pin: 13,
        };
        assert_eq!(tag.tag(), "machine.ShiftRegisterSipo@13");
    }
}
