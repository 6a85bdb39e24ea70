//! Board-level functions of the `machine` module.

use crate::types::ResetCause;

/// A desktop process always starts from a cold boot.
pub fn reset_cause() -> ResetCause {
    ResetCause::PowerOn
}

/// Gives up the CPU until the next interrupt. The host scheduler already
/// does this for us, so it returns immediately.
pub fn idle() {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_cause_is_power_on() {
        assert_eq!(reset_cause(), ResetCause::PowerOn);
        idle();
    }
}
