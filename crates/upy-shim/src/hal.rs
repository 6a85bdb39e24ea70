use crate::types::{Level, PinMode};
use alloc::borrow::Cow;
use alloc::string::String;
use core::fmt;

/// Defines a portable, descriptive Error type for the machine shims.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShimError {
    /// The operation exists in the MicroPython API but has no desktop backing.
    NotImplemented(&'static str),
    /// A pin index is outside the range of the device (e.g., >= 8 on a shift register).
    InvalidPin(u8),
    /// The requested pin mode is not supported by this pin.
    InvalidMode(PinMode),
    /// An underlying I/O error occurred.
    IoError,
    /// A shell command could not be started.
    CommandFailed(String),
}

impl fmt::Display for ShimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotImplemented(what) => write!(f, "Not implemented: {}", what),
            Self::InvalidPin(pin) => write!(f, "Invalid pin index: {}", pin),
            Self::InvalidMode(mode) => write!(f, "Unsupported pin mode: {:?}", mode),
            Self::IoError => write!(f, "An underlying I/O error occurred"),
            Self::CommandFailed(cmd) => write!(f, "Command failed: {}", cmd),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ShimError {}

/// Hardware Abstraction Layer (HAL) for a digital output.
///
/// Implemented by the in-memory `Pin` stub, by shift-register output handles,
/// and by any real GPIO backend. Drivers such as `ShiftRegisterSipo` only
/// talk to their pins through this trait.
pub trait OutputPin {
    /// Drives the pin to `level`.
    fn set_level(&mut self, level: Level) -> Result<(), ShimError>;

    fn set_high(&mut self) -> Result<(), ShimError> {
        self.set_level(Level::High)
    }

    fn set_low(&mut self) -> Result<(), ShimError> {
        self.set_level(Level::Low)
    }
}

/// Hardware Abstraction Layer (HAL) for reading a digital level.
pub trait InputPin {
    /// Returns the current level of the pin.
    fn level(&self) -> Result<Level, ShimError>;

    fn is_high(&self) -> Result<bool, ShimError> {
        Ok(self.level()? == Level::High)
    }

    fn is_low(&self) -> Result<bool, ShimError> {
        Ok(self.level()? == Level::Low)
    }
}

/// Hardware Abstraction Layer (HAL) for the host operating system's shell.
///
/// Desktop implementations of network and machine functions are thin
/// wrappers around system utilities; routing every invocation through this
/// trait keeps them testable with scripted output.
pub trait CommandRunner {
    /// Runs `command` through the shell and returns its standard output.
    ///
    /// A non-zero exit status is not an error by itself: several utilities
    /// report failures on stdout, and callers interpret the text.
    fn run(&mut self, command: &str) -> Result<String, ShimError>;

    /// Runs `program` with `args` passed as separate arguments.
    ///
    /// Arguments are never interpreted by a shell, so untrusted values such
    /// as SSIDs and passwords reach the program verbatim. The default
    /// implementation quotes each argument with [`shell_quote`] and hands the
    /// joined line to [`CommandRunner::run`]; runners that can spawn
    /// processes directly should override it.
    fn run_program(&mut self, program: &str, args: &[&str]) -> Result<String, ShimError> {
        let mut command = String::from(program);
        for arg in args {
            command.push(' ');
            command.push_str(&shell_quote(arg));
        }
        self.run(&command)
    }
}

/// Quotes `arg` as a single POSIX shell word.
///
/// Words made only of characters the shell treats literally are returned
/// unchanged. Anything else is wrapped in single quotes, with embedded single
/// quotes written as `'\''`.
pub fn shell_quote(arg: &str) -> Cow<'_, str> {
    let is_plain = |c: char| c.is_ascii_alphanumeric() || "-_./:=@%+,".contains(c);
    if !arg.is_empty() && arg.chars().all(is_plain) {
        return Cow::Borrowed(arg);
    }
    let mut quoted = String::with_capacity(arg.len() + 2);
    quoted.push('\'');
    for c in arg.chars() {
        if c == '\'' {
            quoted.push_str("'\\''");
        } else {
            quoted.push(c);
        }
    }
    quoted.push('\'');
    Cow::Owned(quoted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec::Vec;

    /// Records command lines instead of running them.
    #[derive(Default)]
    struct EchoRunner {
        history: Vec<String>,
    }

    impl CommandRunner for EchoRunner {
        fn run(&mut self, command: &str) -> Result<String, ShimError> {
            self.history.push(command.to_string());
            Ok(String::new())
        }
    }

    #[test]
    fn test_plain_words_are_not_quoted() {
        assert_eq!(shell_quote("en0"), "en0");
        assert_eq!(shell_quote("-setairportpower"), "-setairportpower");
        assert!(matches!(shell_quote("10.0.0.1"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_metacharacters_are_quoted() {
        assert_eq!(shell_quote(""), "''");
        assert_eq!(shell_quote("Cafe Net"), "'Cafe Net'");
        assert_eq!(shell_quote("$(reboot)"), "'$(reboot)'");
        assert_eq!(shell_quote("a\"; rm -rf ~; \""), "'a\"; rm -rf ~; \"'");
        assert_eq!(shell_quote("it's"), "'it'\\''s'");
    }

    #[test]
    fn test_default_run_program_quotes_each_argument() {
        let mut runner = EchoRunner::default();
        runner
            .run_program("networksetup", &["-setairportnetwork", "en0", "x\"; reboot; \"", ""])
            .unwrap();
        assert_eq!(
            runner.history,
            ["networksetup -setairportnetwork en0 'x\"; reboot; \"' ''"]
        );
    }
}
