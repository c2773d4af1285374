//! Property tests for the debouncer and the settings codec.

use proptest::prelude::*;

use shaftlock_core::settings::{Settings, MAX_RUN_MS, MIN_RUN_MS};
use shaftlock_core::switch::{Debouncer, Switch, DEBOUNCE_MS};

proptest! {
    /// Chatter: any sequence of active bursts shorter than the debounce
    /// window, each reverting to the original level, confirms nothing.
    #[test]
    fn chatter_below_the_window_never_confirms(
        bursts in prop::collection::vec((1u32..DEBOUNCE_MS, 1u32..200), 1..20)
    ) {
        let mut debouncer = Debouncer::new();
        let mut now = 0u32;

        for (active_ms, gap_ms) in bursts {
            // Sampled every millisecond while the bounce lasts
            for _ in 0..active_ms {
                prop_assert!(debouncer.update(true, false, now).is_none());
                now += 1;
            }
            // Reverts to the original level before the window passes
            prop_assert!(debouncer.update(false, false, now).is_none());
            now += gap_ms;
        }

        prop_assert_eq!(debouncer.state().switch, Switch::Neutral);
    }

    /// A level held to the window always confirms, whatever preceded it.
    #[test]
    fn held_level_always_confirms(
        noise in prop::collection::vec(any::<bool>(), 0..50)
    ) {
        let mut debouncer = Debouncer::new();
        let mut now = 0u32;

        for level in noise {
            debouncer.update(level, false, now);
            now += 1;
        }

        // Hold Lock well past the window; wherever the noise left the
        // debouncer, the held level must end up confirmed
        for _ in 0..=2 * DEBOUNCE_MS {
            debouncer.update(true, false, now);
            now += 1;
        }
        prop_assert_eq!(debouncer.state().switch, Switch::Lock);
    }

    /// Loading any block yields validated settings, and the loaded value
    /// round-trips unchanged (save-of-load idempotency).
    #[test]
    fn load_is_always_valid_and_idempotent(block in prop::array::uniform5(any::<u8>())) {
        let settings = Settings::from_block(&block);

        prop_assert!((MIN_RUN_MS..=MAX_RUN_MS).contains(&settings.run_duration_ms));
        prop_assert!(settings.max_current != 0);
        prop_assert_eq!(Settings::from_block(&settings.to_block()), settings);
    }
}
