// crates/upy-shim/src/shift_register.rs
//! Driver for serial-in, parallel-out shift registers (e.g., SN74HC595).
//!
//! The register is driven through three `OutputPin`s (data, clock, latch) and
//! exposes its eight outputs in three ways:
//! - as a byte (`shift_out`, `pin_values`),
//! - through an Adafruit-GPIO-style API (`setup`, `output`, `input`, ...),
//! - as individual `OutputPin` handles (`output_pin`).
//!
//! The outputs cannot be read back from hardware, so the driver keeps a
//! shadow copy of the last latched byte.

use crate::hal::{InputPin, OutputPin, ShimError};
use crate::log::{PeripheralTag, peripheral_log};
use crate::types::{BitOrder, Edge, Level, PinMode, SHIFT_REGISTER_LENGTH};
use alloc::vec::Vec;

/// Pin assignment and power-on state for a shift register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftRegisterConfig {
    pub data_pin: u8,
    pub clock_pin: u8,
    pub latch_pin: u8,
    /// Byte latched onto the outputs during construction.
    pub initial_values: u8,
}

impl Default for ShiftRegisterConfig {
    fn default() -> Self {
        Self {
            data_pin: 13,
            clock_pin: 14,
            latch_pin: 15,
            initial_values: 0x00,
        }
    }
}

/// An 8-bit serial-in, parallel-out shift register.
pub struct ShiftRegisterSipo<P> {
    data: P,
    clock: P,
    latch: P,
    /// Shadow of the byte currently latched onto the outputs.
    pin_values: u8,
    /// Data pin number, used to tell registers apart in logs.
    id: u8,
}

impl<P: OutputPin> ShiftRegisterSipo<P> {
    /// Takes ownership of the three control pins, drives them low and
    /// latches `initial_values` onto the outputs.
    pub fn new(data: P, clock: P, latch: P, initial_values: u8) -> Result<Self, ShimError> {
        Self::with_id(data, clock, latch, initial_values, 0)
    }

    /// Same as `new`, with the pin numbers taken from a configuration.
    ///
    /// `make_pin` turns a pin number into the pin object, e.g.
    /// `|id| Pin::new(id, PinMode::Out)`.
    pub fn from_config(
        config: &ShiftRegisterConfig,
        mut make_pin: impl FnMut(u8) -> P,
    ) -> Result<Self, ShimError> {
        Self::with_id(
            make_pin(config.data_pin),
            make_pin(config.clock_pin),
            make_pin(config.latch_pin),
            config.initial_values,
            config.data_pin,
        )
    }

    fn with_id(
        mut data: P,
        mut clock: P,
        mut latch: P,
        initial_values: u8,
        id: u8,
    ) -> Result<Self, ShimError> {
        data.set_low()?;
        clock.set_low()?;
        latch.set_low()?;

        let mut register = Self {
            data,
            clock,
            latch,
            pin_values: 0,
            id,
        };
        register.shift_out(initial_values, BitOrder::MsbFirst)?;
        peripheral_log!(info, register.log_tag(), "Initialized with outputs {:#010b}", initial_values);
        Ok(register)
    }

    fn log_tag(&self) -> PeripheralTag {
        PeripheralTag {
            module: "machine",
            peripheral: "ShiftRegisterSipo",
            pin: self.id,
        }
    }

    /// Number of parallel outputs.
    pub fn len(&self) -> u8 {
        SHIFT_REGISTER_LENGTH
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// The byte currently latched onto the outputs (bit n = output n).
    pub fn pin_values(&self) -> u8 {
        self.pin_values
    }

    /// Clocks `value` into the register and latches it onto the outputs.
    ///
    /// With `MsbFirst`, bit 7 is clocked first and therefore ends up on
    /// output 7.
    pub fn shift_out(&mut self, value: u8, order: BitOrder) -> Result<(), ShimError> {
        for step in 0..SHIFT_REGISTER_LENGTH {
            let bit = match order {
                BitOrder::MsbFirst => SHIFT_REGISTER_LENGTH - 1 - step,
                BitOrder::LsbFirst => step,
            };
            self.data.set_level(Level::from((value >> bit) & 1 == 1))?;
            self.clock.set_high()?;
            self.clock.set_low()?;
        }

        self.latch.set_high()?;
        self.latch.set_low()?;

        // The shadow reflects which bit ends up on which output.
        self.pin_values = match order {
            BitOrder::MsbFirst => value,
            BitOrder::LsbFirst => value.reverse_bits(),
        };
        peripheral_log!(trace, self.log_tag(), "Latched {:#010b}", self.pin_values);
        Ok(())
    }

    /// Returns the level of output `pin`.
    pub fn get(&self, pin: u8) -> Result<Level, ShimError> {
        let mask = Self::mask(pin)?;
        Ok(Level::from(self.pin_values & mask != 0))
    }

    /// Sets output `pin`, re-latching the whole register with that bit changed.
    pub fn set(&mut self, pin: u8, level: impl Into<Level>) -> Result<(), ShimError> {
        let mask = Self::mask(pin)?;
        let value = match level.into() {
            Level::High => self.pin_values | mask,
            Level::Low => self.pin_values & !mask,
        };
        self.shift_out(value, BitOrder::MsbFirst)
    }

    fn mask(pin: u8) -> Result<u8, ShimError> {
        if pin < SHIFT_REGISTER_LENGTH {
            Ok(1 << pin)
        } else {
            Err(ShimError::InvalidPin(pin))
        }
    }

    // --- Adafruit GPIO-style API ---

    /// Configures `pin`. Only `PinMode::Out` is supported.
    pub fn setup(&mut self, pin: u8, mode: PinMode) -> Result<(), ShimError> {
        Self::mask(pin)?;
        if mode != PinMode::Out {
            peripheral_log!(warn, self.log_tag(), "Rejected mode {:?} for output {}", mode, pin);
            return Err(ShimError::InvalidMode(mode));
        }
        Ok(())
    }

    /// Configures several pins; stops at the first failure.
    pub fn setup_pins(&mut self, pins: &[(u8, PinMode)]) -> Result<(), ShimError> {
        for &(pin, mode) in pins {
            self.setup(pin, mode)?;
        }
        Ok(())
    }

    /// Drives `pin` to `level`. Nothing is shifted if it is already there.
    pub fn output(&mut self, pin: u8, level: impl Into<Level>) -> Result<(), ShimError> {
        let level = level.into();
        if self.get(pin)? == level {
            peripheral_log!(debug, self.log_tag(), "Output {} already at {}", pin, level);
            return Ok(());
        }
        self.set(pin, level)
    }

    pub fn input(&self, pin: u8) -> Result<Level, ShimError> {
        self.get(pin)
    }

    pub fn set_high(&mut self, pin: u8) -> Result<(), ShimError> {
        self.output(pin, Level::High)
    }

    pub fn set_low(&mut self, pin: u8) -> Result<(), ShimError> {
        self.output(pin, Level::Low)
    }

    pub fn is_high(&self, pin: u8) -> Result<bool, ShimError> {
        Ok(self.input(pin)? == Level::High)
    }

    pub fn is_low(&self, pin: u8) -> Result<bool, ShimError> {
        Ok(self.input(pin)? == Level::Low)
    }

    /// Applies several levels with a single shift. Later entries for the same
    /// pin override earlier ones.
    pub fn output_pins(&mut self, pins: &[(u8, Level)]) -> Result<(), ShimError> {
        let mut value = self.pin_values;
        for &(pin, level) in pins {
            let mask = Self::mask(pin)?;
            value = match level {
                Level::High => value | mask,
                Level::Low => value & !mask,
            };
        }
        self.shift_out(value, BitOrder::MsbFirst)
    }

    pub fn input_pins(&self, pins: &[u8]) -> Result<Vec<Level>, ShimError> {
        pins.iter().map(|&pin| self.input(pin)).collect()
    }

    /// The outputs cannot generate edges, so event detection is unavailable.
    pub fn add_event_detect(&mut self, _pin: u8, _edge: Edge) -> Result<(), ShimError> {
        Err(ShimError::NotImplemented("add_event_detect"))
    }

    pub fn remove_event_detect(&mut self, _pin: u8) -> Result<(), ShimError> {
        Err(ShimError::NotImplemented("remove_event_detect"))
    }

    pub fn event_detected(&self, _pin: u8) -> Result<bool, ShimError> {
        Err(ShimError::NotImplemented("event_detected"))
    }

    pub fn wait_for_edge(&mut self, _pin: u8, _edge: Edge) -> Result<(), ShimError> {
        Err(ShimError::NotImplemented("wait_for_edge"))
    }

    /// No event detection is ever registered, so there is nothing to clean up.
    pub fn cleanup(&mut self, _pin: Option<u8>) {}

    // --- Pin Handles ---

    /// Returns a `Pin`-like handle for output `pin`.
    pub fn output_pin(&mut self, pin: u8) -> Result<ShiftRegisterOutputPin<'_, P>, ShimError> {
        Self::mask(pin)?;
        Ok(ShiftRegisterOutputPin {
            register: self,
            pin,
        })
    }

    /// Releases the control pins.
    pub fn release(self) -> (P, P, P) {
        (self.data, self.clock, self.latch)
    }
}

/// A single shift-register output, usable anywhere an `OutputPin` is expected.
///
/// Writes re-latch the whole register; reads come from the register's shadow.
pub struct ShiftRegisterOutputPin<'a, P> {
    register: &'a mut ShiftRegisterSipo<P>,
    pin: u8,
}

impl<P: OutputPin> ShiftRegisterOutputPin<'_, P> {
    pub fn id(&self) -> u8 {
        self.pin
    }

    pub fn value(&self) -> Level {
        // The index was validated when the handle was created.
        Level::from(self.register.pin_values & (1 << self.pin) != 0)
    }

    pub fn set_value(&mut self, level: impl Into<Level>) -> Result<(), ShimError> {
        self.register.set(self.pin, level)
    }

    pub fn on(&mut self) -> Result<(), ShimError> {
        self.set_value(Level::High)
    }

    pub fn off(&mut self) -> Result<(), ShimError> {
        self.set_value(Level::Low)
    }

    /// Shift-register outputs are always outputs.
    pub fn mode(&self) -> PinMode {
        PinMode::Out
    }

    pub fn set_mode(&mut self, mode: PinMode) -> Result<(), ShimError> {
        if mode != PinMode::Out {
            return Err(ShimError::InvalidMode(mode));
        }
        Ok(())
    }

    pub fn pull(&self) -> Result<(), ShimError> {
        Err(ShimError::NotImplemented("ShiftRegisterOutputPin.pull"))
    }

    pub fn drive(&self) -> Result<(), ShimError> {
        Err(ShimError::NotImplemented("ShiftRegisterOutputPin.drive"))
    }

    pub fn irq(&mut self) -> Result<(), ShimError> {
        Err(ShimError::NotImplemented("ShiftRegisterOutputPin.irq"))
    }
}

impl<P: OutputPin> OutputPin for ShiftRegisterOutputPin<'_, P> {
    fn set_level(&mut self, level: Level) -> Result<(), ShimError> {
        self.register.set(self.pin, level)
    }
}

impl<P: OutputPin> InputPin for ShiftRegisterOutputPin<'_, P> {
    fn level(&self) -> Result<Level, ShimError> {
        Ok(self.value())
    }
}
