//! Bounded, fixed-delay retry for flaky page interactions

use crate::browser::{Locator, Page};
use std::time::Duration;

pub const DEFAULT_ATTEMPTS: usize = 4;
pub const DEFAULT_DELAY: Duration = Duration::from_millis(1500);

/// Click `locator`, retrying up to `max_attempts` times with a fixed `delay`
/// after each failure. Returns whether any attempt succeeded.
pub fn click_with_retry<P: Page>(
    page: &P,
    locator: &Locator<'_>,
    max_attempts: usize,
    delay: Duration,
) -> bool {
    for attempt in 1..=max_attempts {
        match page.click(locator) {
            Ok(()) => return true,
            Err(e) => {
                log::warn!(
                    "Retry click {}/{} for '{}': {}",
                    attempt,
                    max_attempts,
                    locator,
                    e
                );
                std::thread::sleep(delay);
            }
        }
    }
    false
}
