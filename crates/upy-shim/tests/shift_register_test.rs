// crates/upy-shim/tests/shift_register_test.rs

use std::cell::RefCell;
use std::rc::Rc;

use upy_shim::{
    BitOrder, Level, OutputPin, PinMode, ShiftRegisterConfig, ShiftRegisterSipo, ShimError,
};

// --- Simulated 74HC595 ---

/// Behavioural model of the chip: data is sampled on the rising clock edge
/// into the shift stage, and copied to the outputs on the rising latch edge.
#[derive(Default)]
struct Chip {
    data: Level,
    clock: Level,
    latch: Level,
    shift_stage: u8,
    outputs: u8,
    clock_pulses: usize,
}

#[derive(Clone, Copy)]
enum Line {
    Data,
    Clock,
    Latch,
}

struct ChipPin {
    line: Line,
    chip: Rc<RefCell<Chip>>,
}

impl OutputPin for ChipPin {
    fn set_level(&mut self, level: Level) -> Result<(), ShimError> {
        let mut chip = self.chip.borrow_mut();
        match self.line {
            Line::Data => chip.data = level,
            Line::Clock => {
                if chip.clock == Level::Low && level == Level::High {
                    // Q7 is the oldest bit, new bits enter at Q0.
                    chip.shift_stage = (chip.shift_stage << 1) | chip.data.as_u8();
                    chip.clock_pulses += 1;
                }
                chip.clock = level;
            }
            Line::Latch => {
                if chip.latch == Level::Low && level == Level::High {
                    chip.outputs = chip.shift_stage;
                }
                chip.latch = level;
            }
        }
        Ok(())
    }
}

/// A pin whose control line always fails, like a GPIO that was released.
struct BrokenPin;

impl OutputPin for BrokenPin {
    fn set_level(&mut self, _level: Level) -> Result<(), ShimError> {
        Err(ShimError::IoError)
    }
}

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn attach(initial: u8) -> (ShiftRegisterSipo<ChipPin>, Rc<RefCell<Chip>>) {
    let chip = Rc::new(RefCell::new(Chip::default()));
    let config = ShiftRegisterConfig {
        data_pin: 4,
        clock_pin: 5,
        latch_pin: 6,
        initial_values: initial,
    };
    let register = ShiftRegisterSipo::from_config(&config, |id| ChipPin {
        line: match id {
            4 => Line::Data,
            5 => Line::Clock,
            _ => Line::Latch,
        },
        chip: chip.clone(),
    })
    .unwrap();
    (register, chip)
}

#[test]
fn test_initial_value_reaches_outputs() {
    init_logger();
    let (register, chip) = attach(0b0110_1001);
    assert_eq!(chip.borrow().outputs, 0b0110_1001);
    assert_eq!(chip.borrow().clock_pulses, 8);
    assert_eq!(register.pin_values(), chip.borrow().outputs);
}

#[test]
fn test_shadow_matches_hardware_for_both_bit_orders() {
    init_logger();
    let (mut register, chip) = attach(0x00);
    for value in [0x00u8, 0x01, 0x80, 0xa5, 0x3c, 0xff] {
        register.shift_out(value, BitOrder::MsbFirst).unwrap();
        assert_eq!(chip.borrow().outputs, value);
        assert_eq!(register.pin_values(), value);

        register.shift_out(value, BitOrder::LsbFirst).unwrap();
        assert_eq!(chip.borrow().outputs, value.reverse_bits());
        assert_eq!(register.pin_values(), chip.borrow().outputs);
    }
}

#[test]
fn test_gpio_api_drives_single_outputs() {
    init_logger();
    let (mut register, chip) = attach(0x00);

    register.setup(3, PinMode::Out).unwrap();
    register.output(3, true).unwrap();
    assert_eq!(chip.borrow().outputs, 0b0000_1000);

    register.set_high(7).unwrap();
    register.set_low(3).unwrap();
    assert_eq!(chip.borrow().outputs, 0b1000_0000);
    assert!(register.is_high(7).unwrap());
    assert!(register.is_low(3).unwrap());
}

#[test]
fn test_output_pin_handle_drives_hardware() {
    init_logger();
    let (mut register, chip) = attach(0x0f);
    {
        let mut handle = register.output_pin(0).unwrap();
        handle.off().unwrap();
        handle.set_high().unwrap();
        handle.set_low().unwrap();
    }
    assert_eq!(chip.borrow().outputs, 0x0e);
}

#[test]
fn test_pin_errors_propagate() {
    init_logger();
    let result = ShiftRegisterSipo::new(BrokenPin, BrokenPin, BrokenPin, 0x00);
    assert!(matches!(result, Err(ShimError::IoError)));
}
