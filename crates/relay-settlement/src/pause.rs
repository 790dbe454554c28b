//! Pause switch for the value-moving entry points.
//!
//! While paused, forwarding and batch settlement refuse to start. Queries,
//! emergency recovery, tagging and pending registration are unaffected.

use relay_types::{RelayError, Result};

#[derive(Debug, Clone, Copy, Default)]
pub struct PauseSwitch {
    paused: bool,
}

impl PauseSwitch {
    #[must_use]
    pub fn new(paused: bool) -> Self {
        Self { paused }
    }

    /// Set the switch. Returns whether the state actually changed.
    pub fn set(&mut self, paused: bool) -> bool {
        let changed = self.paused != paused;
        self.paused = paused;
        changed
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Guard an operation that must not run while paused.
    pub fn check_running(&self) -> Result<()> {
        if self.paused {
            Err(RelayError::Paused)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_running_by_default() {
        let switch = PauseSwitch::default();
        assert!(!switch.is_paused());
        assert!(switch.check_running().is_ok());
    }

    #[test]
    fn paused_blocks() {
        let mut switch = PauseSwitch::new(false);
        assert!(switch.set(true));
        assert_eq!(switch.check_running().unwrap_err(), RelayError::Paused);
    }

    #[test]
    fn set_reports_change() {
        let mut switch = PauseSwitch::new(true);
        assert!(!switch.set(true));
        assert!(switch.set(false));
        assert!(switch.check_running().is_ok());
    }
}
