//! Switch state and debouncing
//!
//! The operator commands the actuator through a three-position momentary
//! switch. Both halves arrive as separate digital inputs; mechanical bounce
//! on either is filtered here into confirmed logical transitions.

use crate::clock::reached;

/// Confirmation window for a changed switch level
pub const DEBOUNCE_MS: u32 = 30;

/// Confirmed position of the command switch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Switch {
    /// Neither half engaged
    #[default]
    Neutral,
    /// Lock half engaged
    Lock,
    /// Release half engaged
    Release,
}

/// Confirmed switch value plus the timestamp of its last change
///
/// The timestamp doubles as the press-duration reference for the
/// enhanced-indication short-press window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SwitchState {
    pub switch: Switch,
    pub changed_at_ms: u32,
}

/// Debouncer for the two switch halves
///
/// Holds a single pending arming deadline shared by both halves. That is
/// sufficient because the halves are mutually exclusive by wiring (a
/// three-position toggle cannot close both contacts); the HAL boundary
/// carries that contract.
#[derive(Debug, Clone)]
pub struct Debouncer {
    confirmed: SwitchState,
    pending_at: Option<u32>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new()
    }
}

impl Debouncer {
    pub fn new() -> Self {
        Self {
            confirmed: SwitchState::default(),
            pending_at: None,
        }
    }

    /// Current confirmed switch state
    pub fn state(&self) -> SwitchState {
        self.confirmed
    }

    /// Feed one cycle's raw samples; returns the confirmed edge, if any
    ///
    /// A raw value differing from the confirmed baseline arms the window on
    /// first sight and confirms once the window has passed. A sample that
    /// matches the baseline cancels any pending edge, so chatter shorter
    /// than [`DEBOUNCE_MS`] never confirms.
    pub fn update(
        &mut self,
        lock_active: bool,
        release_active: bool,
        now_ms: u32,
    ) -> Option<SwitchState> {
        // Both inputs are evaluated, but only one half can transition per
        // cycle; Lock is sampled first, matching the wiring's exclusivity.
        let raw = if lock_active {
            Switch::Lock
        } else if release_active {
            Switch::Release
        } else {
            Switch::Neutral
        };

        if raw == self.confirmed.switch {
            self.pending_at = None;
            return None;
        }

        match self.pending_at {
            None => {
                self.pending_at = Some(now_ms.wrapping_add(DEBOUNCE_MS));
                None
            }
            Some(deadline) if reached(now_ms, deadline) => {
                self.pending_at = None;
                self.confirmed = SwitchState {
                    switch: raw,
                    changed_at_ms: now_ms,
                };
                Some(self.confirmed)
            }
            Some(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stable_neutral_no_edge() {
        let mut deb = Debouncer::new();
        for t in (0..200).step_by(10) {
            assert_eq!(deb.update(false, false, t), None);
        }
        assert_eq!(deb.state().switch, Switch::Neutral);
    }

    #[test]
    fn test_press_confirms_after_window() {
        let mut deb = Debouncer::new();
        assert_eq!(deb.update(true, false, 0), None); // arms
        assert_eq!(deb.update(true, false, 10), None);
        assert_eq!(deb.update(true, false, 20), None);
        let edge = deb.update(true, false, 30).expect("confirmed");
        assert_eq!(edge.switch, Switch::Lock);
        assert_eq!(edge.changed_at_ms, 30);
        assert_eq!(deb.state(), edge);
    }

    #[test]
    fn test_chatter_cancels_pending_edge() {
        let mut deb = Debouncer::new();
        assert_eq!(deb.update(true, false, 0), None);
        assert_eq!(deb.update(false, false, 10), None); // reverts, cancels
        assert_eq!(deb.update(true, false, 20), None); // re-arms
        assert_eq!(deb.update(true, false, 40), None); // window not over
        assert!(deb.update(true, false, 50).is_some());
    }

    #[test]
    fn test_release_edge_back_to_neutral() {
        let mut deb = Debouncer::new();
        deb.update(false, true, 0);
        assert_eq!(
            deb.update(false, true, 30).map(|s| s.switch),
            Some(Switch::Release)
        );

        deb.update(false, false, 100);
        let edge = deb.update(false, false, 130).expect("confirmed");
        assert_eq!(edge.switch, Switch::Neutral);
        assert_eq!(edge.changed_at_ms, 130);
    }

    #[test]
    fn test_lock_sampled_before_release() {
        // Both active is a wiring fault; the Lock half wins deterministically.
        let mut deb = Debouncer::new();
        deb.update(true, true, 0);
        assert_eq!(
            deb.update(true, true, 30).map(|s| s.switch),
            Some(Switch::Lock)
        );
    }
}
