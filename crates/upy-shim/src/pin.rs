// crates/upy-shim/src/pin.rs
//! In-memory stand-ins for `machine.Pin`, `machine.Signal` and `machine.ADC`.
//!
//! On a desktop there is no GPIO bank, so a `Pin` simply remembers the mode,
//! pull and level it was configured with. Drivers written against the
//! `OutputPin`/`InputPin` HAL traits run unchanged against these stubs.

use crate::hal::{InputPin, OutputPin, ShimError};
use crate::types::{Level, PinMode, Pull};

/// Software model of a single GPIO pin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pin {
    id: u8,
    mode: PinMode,
    pull: Pull,
    level: Level,
}

impl Pin {
    /// Creates pin `id` configured as `mode`, with no pull and a low level.
    pub fn new(id: u8, mode: PinMode) -> Self {
        Self {
            id,
            mode,
            pull: Pull::None,
            level: Level::Low,
        }
    }

    /// Creates pin `id` with an explicit initial configuration.
    pub fn with_config(id: u8, mode: PinMode, pull: Pull, level: Level) -> Self {
        Self {
            id,
            mode,
            pull,
            level,
        }
    }

    pub fn id(&self) -> u8 {
        self.id
    }

    pub fn mode(&self) -> PinMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: PinMode) {
        self.mode = mode;
    }

    pub fn pull(&self) -> Pull {
        self.pull
    }

    pub fn set_pull(&mut self, pull: Pull) {
        self.pull = pull;
    }

    pub fn value(&self) -> Level {
        self.level
    }

    /// Sets the level; any truthy value maps to `High`.
    pub fn set_value(&mut self, level: impl Into<Level>) {
        self.level = level.into();
    }

    pub fn on(&mut self) {
        self.level = Level::High;
    }

    pub fn off(&mut self) {
        self.level = Level::Low;
    }

    pub fn toggle(&mut self) {
        self.level = !self.level;
    }

    /// Drive strength cannot be modelled on the host.
    pub fn drive(&mut self) -> Result<(), ShimError> {
        Err(ShimError::NotImplemented("Pin.drive"))
    }

    /// Interrupts cannot be modelled on the host.
    pub fn irq(&mut self) -> Result<(), ShimError> {
        Err(ShimError::NotImplemented("Pin.irq"))
    }
}

impl OutputPin for Pin {
    fn set_level(&mut self, level: Level) -> Result<(), ShimError> {
        self.level = level;
        Ok(())
    }
}

impl InputPin for Pin {
    fn level(&self) -> Result<Level, ShimError> {
        Ok(self.level)
    }
}

/// An output pin with optional active-low inversion, like `machine.Signal`.
///
/// `on()` means "asserted": high for a normal signal, low for an inverted one.
#[derive(Debug)]
pub struct Signal<P> {
    pin: P,
    invert: bool,
}

impl<P: OutputPin> Signal<P> {
    pub fn new(pin: P, invert: bool) -> Self {
        Self { pin, invert }
    }

    /// Asserts (`true`) or de-asserts (`false`) the signal.
    pub fn set_value(&mut self, asserted: bool) -> Result<(), ShimError> {
        self.pin.set_level(Level::from(asserted != self.invert))
    }

    pub fn on(&mut self) -> Result<(), ShimError> {
        self.set_value(true)
    }

    pub fn off(&mut self) -> Result<(), ShimError> {
        self.set_value(false)
    }

    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: OutputPin + InputPin> Signal<P> {
    /// Returns whether the signal is currently asserted.
    pub fn value(&self) -> Result<bool, ShimError> {
        Ok(bool::from(self.pin.level()?) != self.invert)
    }
}

/// Analog input stub. The host has no ADC, so every read returns 0.
#[derive(Debug, Default, Clone, Copy)]
pub struct Adc;

impl Adc {
    pub fn read(&self) -> u16 {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pin_defaults_and_levels() {
        let mut pin = Pin::new(13, PinMode::Out);
        assert_eq!(pin.id(), 13);
        assert_eq!(pin.value(), Level::Low);
        assert_eq!(pin.pull(), Pull::None);

        pin.on();
        assert_eq!(pin.value(), Level::High);
        pin.toggle();
        assert_eq!(pin.value(), Level::Low);
        pin.set_value(true);
        assert!(pin.is_high().unwrap());
        pin.off();
        assert!(pin.is_low().unwrap());
    }

    #[test]
    fn test_pin_reconfiguration() {
        let mut pin = Pin::with_config(2, PinMode::In, Pull::PullUp, Level::High);
        assert_eq!(pin.mode(), PinMode::In);
        pin.set_mode(PinMode::OpenDrain);
        pin.set_pull(Pull::PullDown);
        assert_eq!(pin.mode(), PinMode::OpenDrain);
        assert_eq!(pin.pull(), Pull::PullDown);
        assert_eq!(pin.drive(), Err(ShimError::NotImplemented("Pin.drive")));
        assert!(pin.irq().is_err());
    }

    #[test]
    fn test_signal_inversion() {
        let mut normal = Signal::new(Pin::new(1, PinMode::Out), false);
        normal.on().unwrap();
        assert!(normal.value().unwrap());
        assert_eq!(normal.into_inner().value(), Level::High);

        let mut inverted = Signal::new(Pin::new(2, PinMode::Out), true);
        inverted.on().unwrap();
        assert!(inverted.value().unwrap());
        let pin = inverted.into_inner();
        assert_eq!(pin.value(), Level::Low);

        let mut inverted = Signal::new(pin, true);
        inverted.off().unwrap();
        assert!(!inverted.value().unwrap());
        assert_eq!(inverted.into_inner().value(), Level::High);
    }

    #[test]
    fn test_adc_reads_zero() {
        assert_eq!(Adc.read(), 0);
    }
}
