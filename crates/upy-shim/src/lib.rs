#![cfg_attr(not(feature = "std"), no_std)]

// 'alloc' is used for owned strings in errors and log tags
extern crate alloc;

// --- Foundation Modules ---
pub mod types;
pub mod hal;
mod log;

// --- machine ---
pub mod machine;
pub mod pin;
pub mod shift_register;

// --- network ---
pub mod network;

// --- Top-level Exports ---
pub use types::{BitOrder, Edge, Level, PinMode, Pull, ResetCause, SHIFT_REGISTER_LENGTH};
pub use hal::{CommandRunner, InputPin, OutputPin, ShimError, shell_quote};
pub use machine::{idle, reset_cause};
pub use pin::{Adc, Pin, Signal};
pub use shift_register::{ShiftRegisterConfig, ShiftRegisterOutputPin, ShiftRegisterSipo};
pub use network::{AuthMode, InterfaceId, WlanStatus};
